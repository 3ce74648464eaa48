pub mod action;
pub mod error;
pub mod ids;
pub mod model;
pub mod outcomes;

pub use action::*;
pub use error::*;
pub use ids::*;
pub use model::*;
pub use outcomes::*;
