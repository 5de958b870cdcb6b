use std::collections::BTreeMap;

use actix_web::{error::JsonPayloadError, HttpRequest};
use log::debug;
use serde::Serialize;

use crate::error::{AppError, FEATURE_NAME_FIELD};

#[derive(Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ValidationErrorDto {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorDto {
    pub fn new(field: &str, messages: Vec<String>) -> Self {
        let message = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), messages);
        Self { message, errors }
    }
}

/// A body that cannot be read as `{"feature": {"name": ...}}` carries no feature name at all.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("rejected request body: {}", err);
    AppError::required(FEATURE_NAME_FIELD).into()
}
