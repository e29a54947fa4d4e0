use serde_json::json;
use time::macros::datetime;

use carnet_domain::{
	Contact, ContactForm, ContactPatch, ContactStatus, InteractionKind, Reliability, Sensitivity,
	wire,
};

fn store_document() -> serde_json::Value {
	json!({
		"id": "665f1c2e9b3d2a0012345678",
		"firstName": "Jean",
		"lastName": "Dupont",
		"alias": "JD",
		"organization": "ACME",
		"email": "jd@example.org",
		"sensitivity": "high",
		"reliability": "medium",
		"status": "active",
		"tags": [{ "tag": "finance", "id": "t1" }],
		"notes": "Prefers encrypted channels.",
		"interactions": [
			{
				"id": "i1",
				"date": "2024-01-10T00:00:00.000Z",
				"type": "encrypted",
				"notes": "Initial contact."
			},
			{
				"id": "i2",
				"date": "2024-03-05T09:30:00.000Z",
				"type": "meeting",
				"notes": "Met in person."
			}
		],
		"lastContact": "2024-03-05T09:30:00.000Z",
		"createdAt": "2023-12-01T08:00:00.000Z",
		"updatedAt": "2024-03-05T09:31:00.000Z"
	})
}

#[test]
fn store_document_round_trips_through_the_typed_model() {
	let contact: Contact =
		serde_json::from_value(store_document()).expect("Document must deserialize.");

	assert_eq!(contact.first_name, "Jean");
	assert_eq!(contact.sensitivity, Sensitivity::High);
	assert_eq!(contact.reliability, Reliability::Medium);
	assert_eq!(contact.status, ContactStatus::Active);
	assert_eq!(contact.tags[0].tag, "finance");
	assert_eq!(contact.interactions.len(), 2);
	assert_eq!(contact.interactions[0].kind, InteractionKind::Encrypted);
	assert_eq!(contact.last_contact, Some(datetime!(2024-03-05 9:30 UTC)));

	let value = serde_json::to_value(&contact).expect("Contact must serialize.");

	assert_eq!(value["interactions"][1]["type"], "meeting");
	assert_eq!(value["lastContact"], "2024-03-05T09:30:00Z");
}

#[test]
fn minimal_document_fills_defaults() {
	let contact: Contact = serde_json::from_value(json!({
		"id": "c1",
		"firstName": "Ana",
		"lastName": "Lima",
		"createdAt": "2024-01-01T00:00:00Z",
		"updatedAt": "2024-01-01T00:00:00Z"
	}))
	.expect("Minimal document must deserialize.");

	assert_eq!(contact.sensitivity, Sensitivity::Low);
	assert_eq!(contact.reliability, Reliability::Medium);
	assert_eq!(contact.status, ContactStatus::Potential);
	assert!(contact.interactions.is_empty());
	assert_eq!(contact.last_contact, None);
}

#[test]
fn null_last_contact_deserializes_as_absent() {
	let contact: Contact = serde_json::from_value(json!({
		"id": "c1",
		"firstName": "Ana",
		"lastName": "Lima",
		"lastContact": null,
		"createdAt": "2024-01-01T00:00:00Z",
		"updatedAt": "2024-01-01T00:00:00Z"
	}))
	.expect("Null derived date must deserialize.");

	assert_eq!(contact.last_contact, None);
}

#[test]
fn day_only_dates_are_accepted() {
	let parsed = wire::parse_date("2024-03-05").expect("Day-only date must parse.");

	assert_eq!(parsed, datetime!(2024-03-05 0:00 UTC));
	assert!(wire::parse_date("not a date").is_err());
}

#[test]
fn form_serializes_with_wire_names_and_without_derived_fields() {
	let form: ContactForm = serde_json::from_value(json!({
		"firstName": "Ana",
		"lastName": "Lima",
		"status": "verified"
	}))
	.expect("Form must deserialize.");
	let value = serde_json::to_value(&form).expect("Form must serialize.");
	let object = value.as_object().expect("Form must serialize to an object.");

	assert_eq!(object.get("firstName").and_then(|v| v.as_str()), Some("Ana"));
	assert!(!object.contains_key("lastContact"));
	assert!(!object.contains_key("createdAt"));
}

#[test]
fn form_patch_serializes_the_full_document() {
	let form = ContactForm {
		first_name: "Ana".to_string(),
		last_name: "Lima".to_string(),
		organization: Some("Le Monde".to_string()),
		..ContactForm::default()
	};
	let value =
		serde_json::to_value(ContactPatch::from_form(form)).expect("Patch must serialize.");
	let object = value.as_object().expect("Patch must serialize to an object.");

	assert_eq!(object.get("organization").and_then(|v| v.as_str()), Some("Le Monde"));
	assert_eq!(object.get("status").and_then(|v| v.as_str()), Some("potential"));
	// No interactions on the form, so the derived date is an explicit clear.
	assert_eq!(object.get("lastContact"), Some(&serde_json::Value::Null));
}
