use axum::response::IntoResponse;
use log::error;
use sea_orm::DbErr;
use thiserror::Error;

use crate::{response::{bad_request_response, internal_server_error_response, not_found_response}, validations};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An error occurred while connecting to the database: {0}")]
    DbErr(#[from] DbErr),
    #[error(transparent)]
    Validation(#[from] validations::error::Error),
    #[error("Category with ID '{0}' not found")]
    CategoryNotFound(String),
    #[error("Category with ID '{0}' cannot be deleted while transactions use it")]
    CategoryInUse(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        return match self {
            Error::DbErr(_) => {
                error!("{}", self);
                internal_server_error_response()
            },
            Error::Validation(_) | Error::CategoryInUse(_) => {
                bad_request_response(self.to_string())
            },
            Error::CategoryNotFound(_) => {
                not_found_response(self.to_string())
            },
        };
    }
}
