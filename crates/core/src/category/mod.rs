//! Income and expense categorization.

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::CategoryError;
pub use types::{
    Category, CategoryKind, CreateCategoryInput, FlowKind, Subcategory, MAX_NAME_LEN,
};
