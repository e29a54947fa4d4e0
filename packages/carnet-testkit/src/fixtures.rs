//! Canned documents and config for store and service tests.

use time::{OffsetDateTime, macros::datetime};

use carnet_config::{Config, Export, Service, Store};
use carnet_domain::{
	Contact, ContactStatus, Interaction, InteractionKind, Reliability, Sensitivity, timeline,
};

/// Points at nothing reachable; doubles ignore it.
pub fn config() -> Config {
	Config {
		store: Store {
			api_base: "http://localhost:3000/api".to_string(),
			collection: "contacts".to_string(),
			timeout_ms: 1_000,
			page_limit: 20,
			default_headers: serde_json::Map::new(),
		},
		service: Service { log_level: "debug".to_string() },
		export: Export { filename_prefix: "contacts".to_string() },
	}
}

pub fn contact(id: &str) -> Contact {
	Contact {
		id: id.to_string(),
		first_name: "Jean".to_string(),
		last_name: "Dupont".to_string(),
		alias: None,
		organization: Some("ACME".to_string()),
		position: None,
		email: Some("jean@example.org".to_string()),
		phone: None,
		sensitivity: Sensitivity::Medium,
		reliability: Reliability::Medium,
		status: ContactStatus::Active,
		tags: Vec::new(),
		notes: None,
		interactions: Vec::new(),
		last_contact: None,
		created_at: datetime!(2024-01-01 0:00 UTC),
		updated_at: datetime!(2024-01-01 0:00 UTC),
	}
}

/// A contact whose derived date already agrees with its timeline.
pub fn contact_with_interactions(id: &str, interactions: Vec<Interaction>) -> Contact {
	let last_contact = timeline::last_contact(&interactions);

	Contact { interactions, last_contact, ..contact(id) }
}

pub fn interaction(id: Option<&str>, date: OffsetDateTime) -> Interaction {
	Interaction {
		id: id.map(ToString::to_string),
		date,
		kind: InteractionKind::Call,
		notes: "Checked in.".to_string(),
	}
}
