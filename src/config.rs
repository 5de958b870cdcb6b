use std::env;

pub const DEV_JWT_SECRET: &str = "favorites-dev-secret";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub sqlite_path: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_header: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        let sqlite_path =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "./data/favorites.sqlite".to_string());
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let token_header = env::var("TOKEN_HEADER")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "Authorization".to_string());

        Self {
            server_host,
            server_port,
            sqlite_path,
            database_url,
            jwt_secret,
            token_header,
        }
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let path = self.sqlite_path.trim();
        if path.starts_with("sqlite:") || path.starts_with("file:") {
            return path.to_string();
        }
        format!("sqlite://{}?mode=rwc", path)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
