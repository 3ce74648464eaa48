pub mod apply_spec;
pub mod cert;
pub mod config;
pub mod decode;
pub mod locator;
pub mod survey;
pub mod util;

pub use apply_spec::*;
pub use cert::*;
pub use config::*;
pub use decode::*;
pub use locator::*;
pub use survey::*;
pub use util::*;
