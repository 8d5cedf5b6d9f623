//! # API Flow
//! The contact book serves a small set of JSON routes over HTTP.
//!
//! ## Managing contacts
//! Writes go through the [`contact`] validator before they ever reach the
//! [`store::Store`] actor, which owns the only copy of the contact list.
//! Handlers turn whatever comes back into a response, see [`ServiceError`].
//!
//! ## Storing secrets
//! The secret server is unrelated to contacts: it decodes a Base64 secret into
//! an identifier, writes the secret to disk under that name and hands back a URL.

#![deny(clippy::pedantic)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::*;
use serde_json::json;
use std::fmt;

pub mod config;
pub mod contact;
pub mod routes;
pub mod secret;
pub mod store;

pub use config::Config;
pub use contact::{Contact, ContactPayload};
pub use store::Store;

#[derive(Debug)]
/// The contact book was unable to service you, for any of these reasons.
pub enum ServiceError {
    /// Something went wrong on our end.
    InternalServerError,
    /// The request you send us was invalid or not usable for any number of reasons.
    BadRequest(String),
    /// The contact you sent us broke one or more field rules.
    Validation(Vec<String>),
    /// We don't know anything about the contact with this id.
    NotFound(String),
    /// A secret was asked to be stored, but none was given.
    NoSecret,
    /// We don't know anything about what you requested.
    NoData,
}
impl ServiceError {
    /// A shortcut for making a `ServiceError::BadRequest`.
    /// ```
    /// use contact_book::ServiceError;
    ///
    /// let br = ServiceError::bad_request("you're bad and you should feel bad");
    /// let is_br = matches!(br, ServiceError::BadRequest(_));
    /// assert!(is_br, "ServiceError::bad_request() should always return a BadRequest variant");
    /// ```
    pub fn bad_request<T: ToString + ?Sized>(t: &T) -> Self {
        Self::BadRequest(t.to_string())
    }

    /// A shortcut for making a `ServiceError::NotFound` about a contact id.
    pub fn not_found<T: ToString + ?Sized>(id: &T) -> Self {
        Self::NotFound(id.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ServiceError::*;

        match self {
            InternalServerError => write!(f, "An unexpected error occurred"),
            BadRequest(s) => write!(f, "{}", s),
            Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            NotFound(id) => write!(f, "Contact with id {} not found", id),
            NoSecret => write!(f, "No secret provided"),
            NoData => write!(f, "Data not found"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        use ServiceError::*;

        match self {
            InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            BadRequest(_) | Validation(_) | NoSecret => StatusCode::BAD_REQUEST,
            NotFound(_) | NoData => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        use ServiceError::*;

        // client mistakes aren't faults of ours, keep them out of the error log
        match self {
            InternalServerError => error!("{}", self),
            _ => debug!("{}", self),
        }

        let body = match self {
            Validation(errors) => json!({
                "message": "Validation failed",
                "errors": errors,
            }),
            NoSecret => json!({ "status": self.to_string() }),
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<store::Error> for ServiceError {
    fn from(e: store::Error) -> ServiceError {
        match e {
            store::Error::NotFound(id) => ServiceError::not_found(&id),
        }
    }
}

impl From<contact::Violations> for ServiceError {
    fn from(v: contact::Violations) -> ServiceError {
        ServiceError::Validation(v.into_messages())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> ServiceError {
        error!("serde json error: {}", e);
        ServiceError::InternalServerError
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> ServiceError {
        error!("io error: {}", e);
        match e.kind() {
            std::io::ErrorKind::NotFound => ServiceError::NoData,
            _ => ServiceError::InternalServerError,
        }
    }
}

impl From<actix::MailboxError> for ServiceError {
    fn from(e: actix::MailboxError) -> ServiceError {
        error!("mailbox error: {}", e);
        ServiceError::InternalServerError
    }
}

impl From<actix_web::error::BlockingError> for ServiceError {
    fn from(e: actix_web::error::BlockingError) -> ServiceError {
        error!("blocking pool error: {}", e);
        ServiceError::InternalServerError
    }
}
