use crate::{
    contact::ContactPayload,
    store::{self, Store},
    ServiceError,
};
use actix::Addr;
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::*;
use serde_json::{json, Value};
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(hello)
        .service(list_contacts)
        .service(create_contact)
        .service(update_contact)
        .service(delete_contact);
}

/// Ids we couldn't have handed out simply aren't in the store.
fn contact_id(raw: &str) -> Result<Uuid, ServiceError> {
    raw.parse().map_err(|_| ServiceError::not_found(raw))
}

#[get("/")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Hello API" }))
}

#[get("/contacts")]
/// Every contact, in the order they were created.
pub async fn list_contacts(srv: web::Data<Addr<Store>>) -> Result<HttpResponse, ServiceError> {
    debug!("servicing list_contacts request");

    let contacts = srv.send(store::ListContacts).await?;

    Ok(HttpResponse::Ok().json(contacts))
}

#[post("/contacts")]
pub async fn create_contact(
    body: web::Json<Value>,
    srv: web::Data<Addr<Store>>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing create_contact request");

    let fields = ContactPayload::from_json(body.into_inner())?.validate_new()?;
    let contact = srv.send(store::CreateContact(fields)).await?;

    Ok(HttpResponse::Created().json(contact))
}

#[put("/contacts/{id}")]
/// Merges whichever fields the body supplies over the contact. The id always comes from the path.
pub async fn update_contact(
    id: web::Path<String>,
    body: web::Json<Value>,
    srv: web::Data<Addr<Store>>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing update_contact request");

    let patch = ContactPayload::from_json(body.into_inner())?.validate_patch()?;
    let id = contact_id(&id)?;
    let contact = srv.send(store::UpdateContact { id, patch }).await??;

    Ok(HttpResponse::Ok().json(contact))
}

#[delete("/contacts/{id}")]
pub async fn delete_contact(
    id: web::Path<String>,
    srv: web::Data<Addr<Store>>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing delete_contact request");

    let id = contact_id(&id)?;
    let contact = srv.send(store::DeleteContact(id)).await??;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Contact deleted",
        "contact": contact,
    })))
}
