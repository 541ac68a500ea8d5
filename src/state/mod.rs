pub mod phone;
pub mod stores;
pub mod ui;

pub use phone::*;
pub use stores::*;
pub use ui::*;
