use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

///
/// A single failed input rule. The messages are shown to users as-is.
///
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Description is required and must be valid text")]
    DescriptionRequired,
    #[error("Amount is required")]
    AmountRequired,
    #[error("Amount must be a valid number")]
    AmountNotNumeric,
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Amount too large (maximum: 1,000,000,000)")]
    AmountTooLarge,
    #[error("Type must be \"income\" or \"expense\"")]
    InvalidType,
    #[error("Category name is required")]
    CategoryNameRequired,
    #[error("Category name too long (maximum: 100 characters)")]
    CategoryNameTooLong,
    #[error("Parent category ID '{0}' is not a valid ID")]
    InvalidParentId(String),
    #[error("Month '{0}' must use the YYYY-MM format")]
    InvalidMonth(String),
}
