use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::config::AppConfig;
use crate::entity::user;
use crate::error::AppError;

/// The caller's identity, resolved from a bearer token issued by the identity service.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db = match req.app_data::<web::Data<DatabaseConnection>>() {
            Some(db) => db.clone(),
            None => {
                return Box::pin(async { Err(AppError::system_exception().into()) });
            }
        };
        let config = match req.app_data::<web::Data<AppConfig>>() {
            Some(cfg) => cfg.clone(),
            None => {
                return Box::pin(async { Err(AppError::system_exception().into()) });
            }
        };
        let token = extract_token(req, &config);

        Box::pin(async move {
            let token = token.ok_or_else(AppError::need_login)?;
            let auth = authenticate_token(&db, &config, &token).await?;
            Ok(auth)
        })
    }
}

fn extract_token(req: &HttpRequest, config: &AppConfig) -> Option<String> {
    let header = config.token_header.as_str();
    req.headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(strip_bearer)
        .filter(|v| !v.is_empty())
}

fn strip_bearer(raw: &str) -> String {
    let raw = raw.trim();
    let (scheme, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    if scheme.eq_ignore_ascii_case("bearer") {
        return rest.trim().to_string();
    }
    raw.to_string()
}

async fn authenticate_token(
    db: &DatabaseConnection,
    config: &AppConfig,
    token: &str,
) -> Result<AuthUser, AppError> {
    let claims = decode_jwt(config, token)?;
    let user_id = extract_user_id(&claims).ok_or_else(AppError::need_login)?;
    let exists = user::Entity::find_by_id(user_id).one(db).await?.is_some();
    if !exists {
        return Err(AppError::need_login());
    }
    Ok(AuthUser { user_id })
}

fn decode_jwt(config: &AppConfig, token: &str) -> Result<serde_json::Value, AppError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // exp is checked when present, tokens without one are accepted
    validation.required_spec_claims.clear();
    decode::<serde_json::Value>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::need_login())
}

fn extract_user_id(claims: &serde_json::Value) -> Option<i32> {
    for key in ["sub", "userId", "user_id", "loginId", "id"] {
        if let Some(value) = claims.get(key) {
            if let Some(id) = value.as_i64() {
                return i32::try_from(id).ok();
            }
            if let Some(s) = value.as_str() {
                if let Ok(id) = s.trim().parse::<i32>() {
                    return Some(id);
                }
            }
        }
    }
    None
}
