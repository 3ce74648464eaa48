use crate::error::ActionError;

/// How the agent's dispatcher should treat an action.
pub trait Action {
    type Output;

    fn is_asynchronous(&self) -> bool;
    fn is_persistent(&self) -> bool;
    /// Whether arguments and results may be written to the agent log.
    fn is_loggable(&self) -> bool;

    fn resume(&self) -> Result<Self::Output, ActionError>;
    fn cancel(&self) -> Result<(), ActionError>;
}
