use super::validate::*;
use super::*;
use serde_json::json;

fn payload(body: serde_json::Value) -> ContactPayload {
    ContactPayload::from_json(body).expect("test payload should be well-formed")
}

fn ana() -> ContactPayload {
    payload(json!({
        "firstName": "Ana",
        "lastName": "Li",
        "phoneNumber": "+12025550123",
    }))
}

#[test]
fn minimal_contact_is_valid() {
    let new = ana().validate_new().expect("Ana should be a valid contact");
    assert_eq!(new.first_name, "Ana");
    assert_eq!(new.last_name, "Li");
    assert_eq!(new.phone_number, "+12025550123");
    assert_eq!(new.kind, None);
    assert_eq!(new.address, None);
    assert_eq!(new.date_of_birth, None);
}

#[test]
fn full_contact_is_valid() {
    let new = payload(json!({
        "firstName": "  Bob ",
        "lastName": "Stone",
        "phoneNumber": " 14155552671 ",
        "type": "business",
        "address": { "street": "1 Main St", "city": "Springfield", "postalCode": "12345" },
        "dateOfBirth": "1990-04-01",
    }))
    .validate_new()
    .expect("every field here follows the rules");

    assert_eq!(new.first_name, "Bob", "names should be stored trimmed");
    assert_eq!(new.phone_number, "14155552671");
    assert_eq!(new.kind, Some(ContactType::Business));
    assert_eq!(
        new.address,
        Some(Address {
            street: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            postal_code: Some("12345".to_string()),
            ..Address::default()
        })
    );
    assert_eq!(new.date_of_birth.as_deref(), Some("1990-04-01"));
}

#[test]
fn every_violation_is_reported_at_once() {
    let violations = payload(json!({
        "lastName": "   ",
        "phoneNumber": "0123",
        "type": "enemy",
        "dateOfBirth": "the thirty-second of Smarch",
    }))
    .validate_new()
    .expect_err("nothing about this payload is right");

    assert_eq!(
        violations.messages(),
        &[
            FIRST_NAME_REQUIRED,
            LAST_NAME_REQUIRED,
            PHONE_NUMBER_FORMAT,
            TYPE_ONE_OF,
            DATE_OF_BIRTH_FORMAT,
        ]
    );
}

#[test]
fn missing_first_name_is_named() {
    let violations = payload(json!({ "lastName": "Li", "phoneNumber": "+12025550123" }))
        .validate_new()
        .expect_err("first name is required");

    assert!(
        violations.messages().iter().any(|m| m.contains("First name")),
        "violations don't mention the first name: {:?}",
        violations
    );
}

#[test]
fn phone_numbers() {
    let check = |phone: &str| {
        let mut p = ana();
        p.phone_number = Some(phone.to_string());
        p.validate_new()
    };

    for &ok in &["+14155552671", "12345", "+12", "123456789012345"] {
        assert!(check(ok).is_ok(), "{} should be a valid phone number", ok);
    }
    for &bad in &["012345", "+0123", "1", "1234567890123456", "+1 415 555 2671", "phone", "++1415"] {
        let violations = check(bad).expect_err(bad);
        assert_eq!(violations.messages(), &[PHONE_NUMBER_FORMAT], "for {}", bad);
    }

    let violations = check("   ").expect_err("blank phone number");
    assert_eq!(violations.messages(), &[PHONE_NUMBER_REQUIRED, PHONE_NUMBER_FORMAT]);

    let mut missing = ana();
    missing.phone_number = None;
    let violations = missing.validate_new().expect_err("missing phone number");
    assert_eq!(violations.messages(), &[PHONE_NUMBER_REQUIRED]);
}

#[test]
fn type_must_match_exactly() {
    let check = |kind: &str| {
        let mut p = ana();
        p.kind = Some(kind.to_string());
        p.validate_new()
    };

    assert_eq!(check("personal").unwrap().kind, Some(ContactType::Personal));
    for &bad in &[" personal ", "Personal", "", "enemy"] {
        let violations = check(bad).expect_err(bad);
        assert_eq!(violations.messages(), &[TYPE_ONE_OF], "for {:?}", bad);
    }
}

#[test]
fn dates_of_birth() {
    let check = |dob: &str| {
        let mut p = ana();
        p.date_of_birth = Some(dob.to_string());
        p.validate_new()
    };

    for &ok in &["1990-04-01", "2000-02-29", "1990-04-01T00:00:00Z", "1990-04-01T12:30:00", ""] {
        assert!(check(ok).is_ok(), "{:?} should be a valid date of birth", ok);
    }
    for &bad in &["1990-02-30", "2001-02-29", "yesterday", "04/01/1990"] {
        assert!(check(bad).is_err(), "{:?} shouldn't be a valid date of birth", bad);
    }
}

#[test]
fn wrong_shape_is_reported_with_everything_else() {
    let violations = payload(json!({
        "firstName": { "given": "Ana" },
        "phoneNumber": "0",
        "address": { "street": ["1", "Main St"], "city": "Springfield" },
    }))
    .validate_new()
    .expect_err("a name can't be an object");

    assert_eq!(
        violations.messages(),
        &[
            "firstName must be a string",
            LAST_NAME_REQUIRED,
            PHONE_NUMBER_FORMAT,
            "address.street must be a string",
        ]
    );

    let violations = payload(json!({ "firstName": "Ana", "lastName": "Li", "phoneNumber": "+1", "address": "Main St" }))
        .validate_new()
        .expect_err("an address has to be an object");
    assert_eq!(violations.messages(), &[PHONE_NUMBER_FORMAT, "address must be an object"]);
}

#[test]
fn numbers_are_read_as_text() {
    let new = payload(json!({ "firstName": "Ana", "lastName": 7, "phoneNumber": 14155552671_u64 }))
        .validate_new()
        .expect("numbers stand in for strings");
    assert_eq!(new.last_name, "7");
    assert_eq!(new.phone_number, "14155552671");

    let patch = payload(json!({ "phoneNumber": null, "dateOfBirth": null }))
        .validate_patch()
        .expect("nulls are the same as leaving a field out");
    assert_eq!(patch, ContactPatch::default());
}

#[test]
fn body_must_be_an_object() {
    for body in &[json!("Ana Li"), json!(["Ana", "Li"]), json!(null)] {
        let violations = ContactPayload::from_json(body.clone()).expect_err("not an object");
        assert_eq!(violations.messages(), &[PAYLOAD_NOT_AN_OBJECT], "for {}", body);
    }
}

#[test]
fn patch_only_checks_what_it_carries() {
    let patch = payload(json!({ "lastName": " X " }))
        .validate_patch()
        .expect("a lone last name is a fine update");
    assert_eq!(
        patch,
        ContactPatch {
            last_name: Some("X".to_string()),
            ..ContactPatch::default()
        }
    );

    assert_eq!(payload(json!({})).validate_patch(), Ok(ContactPatch::default()));

    let violations = payload(json!({ "firstName": "", "phoneNumber": "0" }))
        .validate_patch()
        .expect_err("supplied fields still follow the rules");
    assert_eq!(violations.messages(), &[FIRST_NAME_REQUIRED, PHONE_NUMBER_FORMAT]);
}

#[test]
fn apply_merges_over_the_existing_contact() {
    let created = chrono::Utc::now();
    let id = uuid::Uuid::new_v4();
    let mut contact = Contact::new(id, ana().validate_new().unwrap(), created);
    assert_eq!(contact.created_at, contact.updated_at);

    let later = created + chrono::Duration::seconds(5);
    contact.apply(
        ContactPatch {
            last_name: Some("X".to_string()),
            date_of_birth: Some(String::new()),
            ..ContactPatch::default()
        },
        later,
    );

    assert_eq!(contact.id, id);
    assert_eq!(contact.first_name, "Ana");
    assert_eq!(contact.last_name, "X");
    assert_eq!(contact.phone_number, "+12025550123");
    assert_eq!(contact.date_of_birth.as_deref(), Some(""), "empty values overwrite too");
    assert_eq!(contact.created_at, created);
    assert_eq!(contact.updated_at, later);

    // a clock that steps backwards mustn't drag updated_at below created_at
    contact.apply(ContactPatch::default(), created - chrono::Duration::hours(1));
    assert!(contact.created_at <= contact.updated_at);
}

#[test]
fn contact_json_shape() {
    let now = chrono::Utc::now();
    let mut new = ana().validate_new().unwrap();
    new.kind = Some(ContactType::Family);
    let contact = Contact::new(uuid::Uuid::new_v4(), new, now);

    let value = serde_json::to_value(&contact).unwrap();
    assert_eq!(value["firstName"], "Ana");
    assert_eq!(value["type"], "family");
    assert!(value.get("address").is_none(), "absent optionals stay off the wire");
    assert!(value["createdAt"].is_string());
    assert_eq!(value["createdAt"], value["updatedAt"]);
}
