mod auth;
mod config;
mod db;
mod entity;
mod error;
mod favorite_store;
mod response;
mod routes;
#[cfg(test)]
mod test_support;

use std::io;

use actix_web::{middleware, web, App, HttpServer};
use config::AppConfig;
use db::connect_db;
use log::{info, warn};
use response::json_error_handler;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env();
    if config.uses_dev_secret() {
        warn!("JWT_SECRET is not set, falling back to the development secret");
    }
    let db = connect_db(&config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("db connect failed: {}", e)))?;
    let bind = (config.server_host.clone(), config.server_port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(middleware::Logger::default())
            .wrap(middleware::from_fn(routes::cors::cors_handler))
            .configure(routes::config)
    })
    .bind(bind.clone())?;
    info!("server started at http://{}:{}", bind.0, bind.1);
    server.run().await
}
