use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    http::Method,
    middleware::Next,
    web, Error, HttpResponse,
};

use crate::config::AppConfig;

const BASE_ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";

pub async fn cors_handler<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody,
{
    let allow_headers = allow_headers(req.app_data::<web::Data<AppConfig>>().map(|c| c.token_header.as_str()));

    let mut res = if req.method() == Method::OPTIONS {
        let res = HttpResponse::Ok().finish().map_into_right_body();
        req.into_response(res)
    } else {
        next.call(req).await?.map_into_left_body()
    };

    let headers = res.headers_mut();
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-max-age"),
        HeaderValue::from_static("86400"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_str(&allow_headers)
            .unwrap_or_else(|_| HeaderValue::from_static(BASE_ALLOW_HEADERS)),
    );
    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(
        HeaderName::from_static("pragma"),
        HeaderValue::from_static("no-cache"),
    );

    Ok(res)
}

fn allow_headers(token_header: Option<&str>) -> String {
    match token_header.map(str::trim) {
        Some(h) if !h.is_empty() && !h.eq_ignore_ascii_case("authorization") => {
            format!("{}, {}", BASE_ALLOW_HEADERS, h)
        }
        _ => BASE_ALLOW_HEADERS.to_string(),
    }
}
