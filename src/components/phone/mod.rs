mod incoming;
mod logs;
mod panel;

pub use incoming::*;
pub use logs::*;
pub use panel::*;
