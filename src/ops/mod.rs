pub mod navigate;
pub mod store;
pub mod undo;

pub use store::{TodoError, TodoStore};
