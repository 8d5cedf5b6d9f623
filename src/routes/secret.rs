use crate::{
    config::SecretConfig,
    secret::{self, SecretRecord},
    ServiceError,
};
use actix_web::{get, post, web, HttpResponse};
use log::*;
use serde::Deserialize;
use serde_json::json;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(put_secret).service(get_secret);
}

#[derive(Debug, Deserialize)]
pub struct PutSecretRequest {
    #[serde(default)]
    pub secret: Option<String>,
}

#[get("/secret")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[post("/secret")]
/// Stores a Base64 secret under the identifier it decodes to, returning where to find it.
pub async fn put_secret(
    body: Option<web::Json<PutSecretRequest>>,
    config: web::Data<SecretConfig>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing put_secret request");

    let secret = body
        .and_then(|b| b.into_inner().secret)
        .filter(|s| !s.is_empty())
        .ok_or(ServiceError::NoSecret)?;
    let identifier = secret::decode_identifier(&secret)?;

    let path = {
        let dir = config.dir.clone();
        let identifier = identifier.clone();
        let record = SecretRecord { secret };
        web::block(move || secret::fs_put_secret(&dir, &identifier, &record)).await??
    };
    trace!("wrote secret to {}", path.display());

    Ok(HttpResponse::Ok().json(json!({
        "secretURL": secret::locator(&config.base_url, &identifier),
    })))
}

#[get("/secret/{identifier}")]
pub async fn get_secret(
    identifier: web::Path<String>,
    config: web::Data<SecretConfig>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing get_secret request");

    let dir = config.dir.clone();
    let identifier = identifier.into_inner();
    let record = web::block(move || secret::fs_get_secret(&dir, &identifier)).await??;

    Ok(HttpResponse::Ok().json(record))
}
