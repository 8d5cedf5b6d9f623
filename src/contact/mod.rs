use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

mod validate;
pub use validate::Violations;

#[cfg(test)]
mod test;

/// What sort of relationship a contact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Personal,
    Business,
    Family,
}
use ContactType::*;

impl ContactType {
    pub const ALL: [ContactType; 3] = [Personal, Business, Family];

    pub fn as_str(self) -> &'static str {
        match self {
            Personal => "personal",
            Business => "business",
            Family => "family",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Where a contact lives. Nothing in here is checked beyond being a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A contact as the store keeps it, and as clients see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContactType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Stamps a freshly validated contact with its identity. Both timestamps start out equal.
    pub fn new(id: Uuid, fields: NewContact, now: DateTime<Utc>) -> Self {
        let NewContact {
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
        } = fields;

        Self {
            id,
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: every field the patch carries overwrites ours, everything else stays.
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        let ContactPatch {
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
        } = patch;

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
        if kind.is_some() {
            self.kind = kind;
        }
        if address.is_some() {
            self.address = address;
        }
        if date_of_birth.is_some() {
            self.date_of_birth = date_of_birth;
        }

        // the wall clock can step backwards; updated_at can't
        self.updated_at = now.max(self.updated_at);
    }
}

/// Everything needed to create a contact, already checked against the field rules.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub kind: Option<ContactType>,
    pub address: Option<Address>,
    pub date_of_birth: Option<String>,
}

/// The fields an update supplied, already checked. `None` means "leave it alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub kind: Option<ContactType>,
    pub address: Option<Address>,
    pub date_of_birth: Option<String>,
}

/// A write payload straight off the wire, before any rule has looked at it.
///
/// Every field is optional here so that a missing field turns into a [`Violations`]
/// entry instead of a deserialization failure. Unknown fields, `id` included, are ignored;
/// the id of an update always comes from the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub kind: Option<String>,
    pub address: Option<Address>,
    pub date_of_birth: Option<String>,
    /// Wire names of the fields that held something other than text.
    mistyped: Vec<&'static str>,
}

impl ContactPayload {
    /// Reads a payload out of an arbitrary JSON body.
    ///
    /// Numbers and booleans are taken as their text. A field holding anything else
    /// is remembered and reported alongside every other rule by `validate_new`/`validate_patch`.
    /// Only a body that isn't a JSON object at all is refused outright.
    pub fn from_json(body: Value) -> Result<Self, Violations> {
        let mut fields = match body {
            Value::Object(fields) => fields,
            _ => return Err(Violations::not_an_object()),
        };
        let mut mistyped = Vec::new();
        let mut text = |name: &'static str| text_field(fields.remove(name), name, &mut mistyped);

        let first_name = text("firstName");
        let last_name = text("lastName");
        let phone_number = text("phoneNumber");
        let kind = text("type");
        let date_of_birth = text("dateOfBirth");

        let address = match fields.remove("address") {
            None | Some(Value::Null) => None,
            Some(Value::Object(mut a)) => Some(Address {
                street: text_field(a.remove("street"), "address.street", &mut mistyped),
                city: text_field(a.remove("city"), "address.city", &mut mistyped),
                state: text_field(a.remove("state"), "address.state", &mut mistyped),
                postal_code: text_field(a.remove("postalCode"), "address.postalCode", &mut mistyped),
                country: text_field(a.remove("country"), "address.country", &mut mistyped),
            }),
            Some(_) => {
                mistyped.push("address");
                None
            }
        };

        Ok(Self {
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
            mistyped,
        })
    }
}

fn text_field(value: Option<Value>, name: &'static str, mistyped: &mut Vec<&'static str>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => {
            mistyped.push(name);
            None
        }
    }
}
