//! Field rules for contact payloads.
//!
//! Every rule runs on every payload; a caller gets the full list of what's wrong in one go.
use super::{ContactPatch, ContactPayload, ContactType, NewContact};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const PHONE_NUMBER_REQUIRED: &str = "Phone number is required";
pub const PHONE_NUMBER_FORMAT: &str =
    "Phone number must be a valid international format (e.g., +1234567890)";
pub const TYPE_ONE_OF: &str = "Type must be one of: personal, business, family";
pub const DATE_OF_BIRTH_FORMAT: &str = "Date of birth must be a valid date";
pub const PAYLOAD_NOT_AN_OBJECT: &str = "Contact payload must be a JSON object";

lazy_static! {
    /// An optional `+`, then 2 to 15 ASCII digits, the first of which isn't `0`.
    static ref PHONE_NUMBER: Regex =
        Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("phone number pattern should compile");
}

/// Every rule a payload broke, in the order the fields are checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub(super) fn not_an_object() -> Self {
        Self(vec![PAYLOAD_NOT_AN_OBJECT.to_string()])
    }

    fn push(&mut self, message: &str) {
        self.0.push(message.to_string());
    }

    fn push_type_error(&mut self, field: &str) {
        let expected = if field == "address" { "an object" } else { "a string" };
        self.0.push(format!("{} must be {}", field, expected));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl std::error::Error for Violations {}

/// Whether a missing field counts against the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Presence {
    /// Creating: required fields must be there.
    Required,
    /// Updating: anything left out just isn't changed.
    Optional,
}

impl ContactPayload {
    /// Checks a payload for creating a contact; `firstName`, `lastName` and `phoneNumber` must all be there.
    pub fn validate_new(self) -> Result<NewContact, Violations> {
        let mut violations = Violations::default();
        let checked = self.check(Presence::Required, &mut violations);

        match checked {
            ContactPatch {
                first_name: Some(first_name),
                last_name: Some(last_name),
                phone_number: Some(phone_number),
                kind,
                address,
                date_of_birth,
            } if violations.is_empty() => Ok(NewContact {
                first_name,
                last_name,
                phone_number,
                kind,
                address,
                date_of_birth,
            }),
            _ => Err(violations),
        }
    }

    /// Checks a partial payload for updating a contact. Fields left out are fine,
    /// fields supplied must hold up to the same rules as on creation.
    pub fn validate_patch(self) -> Result<ContactPatch, Violations> {
        let mut violations = Violations::default();
        let patch = self.check(Presence::Optional, &mut violations);

        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(violations)
        }
    }

    fn check(self, presence: Presence, violations: &mut Violations) -> ContactPatch {
        let ContactPayload {
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
            mistyped,
        } = self;

        let first_name = if well_typed(&mistyped, "firstName", violations) {
            required_text(first_name, presence, FIRST_NAME_REQUIRED, violations)
        } else {
            None
        };
        let last_name = if well_typed(&mistyped, "lastName", violations) {
            required_text(last_name, presence, LAST_NAME_REQUIRED, violations)
        } else {
            None
        };
        let phone_number = if well_typed(&mistyped, "phoneNumber", violations) {
            // a blank number is both missing and not a number
            let blank = phone_number.as_deref().map_or(false, |p| p.trim().is_empty());
            let phone_number =
                required_text(phone_number, presence, PHONE_NUMBER_REQUIRED, violations);
            if blank {
                violations.push(PHONE_NUMBER_FORMAT);
            }
            phone_number.filter(|p| {
                let ok = PHONE_NUMBER.is_match(p);
                if !ok {
                    violations.push(PHONE_NUMBER_FORMAT);
                }
                ok
            })
        } else {
            None
        };
        let kind = if well_typed(&mistyped, "type", violations) {
            kind.and_then(|k| match k.parse::<ContactType>() {
                Ok(t) => Some(t),
                Err(_) => {
                    violations.push(TYPE_ONE_OF);
                    None
                }
            })
        } else {
            None
        };
        let address = if well_typed(&mistyped, "address", violations) {
            address
        } else {
            None
        };
        let date_of_birth = if well_typed(&mistyped, "dateOfBirth", violations) {
            date_of_birth.map(|d| d.trim().to_string()).filter(|d| {
                let ok = d.is_empty() || is_calendar_date(d);
                if !ok {
                    violations.push(DATE_OF_BIRTH_FORMAT);
                }
                ok
            })
        } else {
            None
        };

        ContactPatch {
            first_name,
            last_name,
            phone_number,
            kind,
            address,
            date_of_birth,
        }
    }
}

/// Records a type error for `name` and anything nested under it (`address.city`),
/// returning whether there were none.
fn well_typed(mistyped: &[&str], name: &str, violations: &mut Violations) -> bool {
    let mut ok = true;
    for &field in mistyped {
        let nested = field
            .strip_prefix(name)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('.'));
        if nested {
            violations.push_type_error(field);
            ok = false;
        }
    }
    ok
}

/// Trims `value`, recording `message` if it's blank, or missing when it has to be there.
fn required_text(
    value: Option<String>,
    presence: Presence,
    message: &str,
    violations: &mut Violations,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        None if presence == Presence::Optional => None,
        _ => {
            violations.push(message);
            None
        }
    }
}

/// Accepts plain dates (`1990-04-01`) and full timestamps, with or without an offset.
fn is_calendar_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}
