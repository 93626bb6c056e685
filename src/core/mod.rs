pub mod comment_tree;
pub mod contract;
pub mod engine;
pub mod pagination;

pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
