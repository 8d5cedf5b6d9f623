//! Secrets are Base64 text. What the text decodes to names the file the secret is written to,
//! and the URL it can be fetched back from.
//!
//! Nothing stops two secrets that decode to the same identifier from overwriting each other,
//! and the identifier is used as a file name as-is.
use crate::ServiceError;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};


/// Standard alphabet, padding optional and stray trailing bits ignored, as browsers' `atob` reads it.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// What ends up on disk for each secret: exactly what the client sent us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretRecord {
    pub secret: String,
}

/// Base64-decodes a secret into the identifier it's stored under.
pub fn decode_identifier(secret: &str) -> Result<String, ServiceError> {
    let compact: String = secret.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = FORGIVING
        .decode(&compact)
        .map_err(|e| ServiceError::bad_request(&format!("secret is not valid base64: {}", e)))?;

    String::from_utf8(bytes).map_err(|_| ServiceError::bad_request("secret does not decode to text"))
}

pub fn record_path(dir: &Path, identifier: &str) -> PathBuf {
    dir.join(format!("{}.json", identifier))
}

/// Where a client can find the secret stored under `identifier` again.
pub fn locator(base_url: &str, identifier: &str) -> String {
    format!("{}/secret/{}", base_url.trim_end_matches('/'), identifier)
}

/// Writes the record, clobbering whatever was stored under the same identifier before.
///
/// Any write failure is a fault on our end, even a missing folder.
pub fn fs_put_secret(
    dir: &Path,
    identifier: &str,
    record: &SecretRecord,
) -> Result<PathBuf, ServiceError> {
    let path = record_path(dir, identifier);
    fs::write(&path, serde_json::to_vec(record)?).map_err(|e| {
        error!("couldn't write secret to {}: {}", path.display(), e);
        ServiceError::InternalServerError
    })?;

    Ok(path)
}

pub fn fs_get_secret(dir: &Path, identifier: &str) -> Result<SecretRecord, ServiceError> {
    Ok(serde_json::from_slice(&fs::read(record_path(dir, identifier))?)?)
}
