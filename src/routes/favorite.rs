use actix_web::{web, HttpResponse};
use log::debug;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::{map_tx_error, AppError, FEATURE_NAME_FIELD};
use crate::favorite_store;
use crate::response::MessageDto;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(add))
            .route(web::delete().to(remove)),
    )
    .service(
        web::resource("/")
            .route(web::get().to(list))
            .route(web::post().to(add))
            .route(web::delete().to(remove)),
    );
}

/// A validated, trimmed, non-empty feature name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureName(String);

impl FeatureName {
    /// Reads `feature.name` from the body. Only objects are looked into, an array
    /// anywhere on the path means the field is missing.
    fn parse(payload: &Value) -> Result<Self, AppError> {
        let value = payload
            .as_object()
            .and_then(|root| root.get("feature"))
            .and_then(Value::as_object)
            .and_then(|feature| feature.get("name"));
        Self::from_value(value)
    }

    fn from_value(value: Option<&Value>) -> Result<Self, AppError> {
        match value {
            None | Some(Value::Null) => Err(AppError::required(FEATURE_NAME_FIELD)),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(AppError::required(FEATURE_NAME_FIELD));
                }
                Ok(Self(trimmed.to_string()))
            }
            Some(Value::Array(items)) if items.is_empty() => {
                Err(AppError::required(FEATURE_NAME_FIELD))
            }
            Some(_) => Err(AppError::must_be_string(FEATURE_NAME_FIELD)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

async fn list(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    let names = favorite_store::list_feature_names(db.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(names))
}

async fn add(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let feature = FeatureName::parse(&payload)?;

    let user_id = auth.user_id;
    let favorite = db
        .transaction::<_, _, sea_orm::DbErr>(|txn| {
            let feature = feature.clone();
            Box::pin(async move {
                favorite_store::first_or_create(txn, user_id, feature.as_str()).await
            })
        })
        .await
        .map_err(map_tx_error)?;
    debug!("user {} favorited {} (row {})", user_id, favorite.feature_name, favorite.id);

    Ok(HttpResponse::Ok().json(MessageDto::new("Favorited")))
}

async fn remove(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let feature = FeatureName::parse(&payload)?;

    let removed = favorite_store::delete(db.get_ref(), auth.user_id, feature.as_str()).await?;
    debug!("user {} unfavorited {} ({} rows)", auth.user_id, feature.as_str(), removed);

    Ok(HttpResponse::Ok().json(MessageDto::new("Unfavorited")))
}
