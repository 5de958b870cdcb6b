use actix_web::web;

pub mod cors;
pub mod favorite;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/favorites").configure(favorite::config));
}
