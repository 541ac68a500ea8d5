pub mod call_log;
pub mod extension;

pub use call_log::*;
pub use extension::*;
