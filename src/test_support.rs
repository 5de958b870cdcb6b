use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use crate::config::AppConfig;
use crate::db::init_schema;
use crate::entity::user;

pub const TEST_SECRET: &str = "test-secret";

/// In-memory SQLite with the bundled schema. One pooled connection, since every
/// `:memory:` connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    init_schema(&db).await.unwrap();
    db
}

pub async fn create_user(db: &DatabaseConnection, username: &str) -> i32 {
    let now = Utc::now();
    user::ActiveModel {
        username: Set(username.to_string()),
        created: Set(Some(now)),
        updated: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        sqlite_path: ":memory:".to_string(),
        database_url: Some("sqlite::memory:".to_string()),
        jwt_secret: TEST_SECRET.to_string(),
        token_header: "Authorization".to_string(),
    }
}

pub fn token_with_claims(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer_for(user_id: i32) -> String {
    format!("Bearer {}", token_with_claims(serde_json::json!({ "sub": user_id.to_string() })))
}
