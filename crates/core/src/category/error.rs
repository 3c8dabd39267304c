//! Category error types.

use finora_shared::types::SubcategoryId;
use thiserror::Error;

/// Category-related errors.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Name is empty or whitespace-only.
    #[error("Category name is required")]
    NameRequired,

    /// Name exceeds the maximum length.
    #[error("Category name is too long: {len} characters (max {max})")]
    NameTooLong {
        /// Length of the rejected name after trimming.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// A subcategory with the same name (ignoring case) already exists.
    #[error("Subcategory name already exists: {0}")]
    DuplicateSubcategory(String),

    /// Subcategory not found on this category.
    #[error("Subcategory not found: {0}")]
    SubcategoryNotFound(SubcategoryId),
}
