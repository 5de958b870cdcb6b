use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

use crate::response::{MessageDto, ValidationErrorDto};

pub const FEATURE_NAME_FIELD: &str = "feature.name";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid {field}: {messages:?}")]
    Validation {
        field: &'static str,
        messages: Vec<String>,
    },
    #[error("Unauthenticated.")]
    Unauthenticated,
    #[error("database error: {0}")]
    Persistence(#[from] DbErr),
    #[error("system_exception")]
    SystemException,
}

impl AppError {
    pub fn required(field: &'static str) -> Self {
        Self::Validation {
            field,
            messages: vec![format!("The {} field is required.", field)],
        }
    }

    pub fn must_be_string(field: &'static str) -> Self {
        Self::Validation {
            field,
            messages: vec![format!("The {} field must be a string.", field)],
        }
    }

    pub fn need_login() -> Self {
        Self::Unauthenticated
    }

    pub fn system_exception() -> Self {
        Self::SystemException
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Persistence(_) | Self::SystemException => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            Self::Validation { field, messages } => {
                builder.json(ValidationErrorDto::new(field, messages.clone()))
            }
            Self::Unauthenticated => builder.json(MessageDto::new(self.to_string())),
            Self::Persistence(_) | Self::SystemException => {
                error!("request failed: {}", self);
                builder.json(MessageDto::new("Server Error"))
            }
        }
    }
}

pub fn map_tx_error(err: TransactionError<DbErr>) -> AppError {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => AppError::Persistence(e),
    }
}
