pub mod memory;
pub mod os;
pub mod traits;

pub use memory::*;
pub use os::*;
pub use traits::*;
