//! Everything that turns an HTTP request into a call on the store or the secret folder.
pub mod contacts;
pub mod secret;
