use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{timeline, wire};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {field} value {value:?}.")]
pub struct UnknownVariant {
	pub field: &'static str,
	pub value: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
	#[default]
	Low,
	Medium,
	High,
}
impl Sensitivity {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Low => "Public",
			Self::Medium => "Sensitive",
			Self::High => "Confidential",
		}
	}
}
impl std::str::FromStr for Sensitivity {
	type Err = UnknownVariant;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"low" => Ok(Self::Low),
			"medium" => Ok(Self::Medium),
			"high" => Ok(Self::High),
			_ => Err(UnknownVariant { field: "sensitivity", value: raw.to_string() }),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
	Low,
	#[default]
	Medium,
	High,
}
impl Reliability {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Low => "Low",
			Self::Medium => "Medium",
			Self::High => "High",
		}
	}
}
impl std::str::FromStr for Reliability {
	type Err = UnknownVariant;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"low" => Ok(Self::Low),
			"medium" => Ok(Self::Medium),
			"high" => Ok(Self::High),
			_ => Err(UnknownVariant { field: "reliability", value: raw.to_string() }),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
	#[default]
	Potential,
	Active,
	Verified,
	Inactive,
}
impl ContactStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Potential => "potential",
			Self::Active => "active",
			Self::Verified => "verified",
			Self::Inactive => "inactive",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Potential => "Potential",
			Self::Active => "Active",
			Self::Verified => "Verified",
			Self::Inactive => "Inactive",
		}
	}
}
impl std::str::FromStr for ContactStatus {
	type Err = UnknownVariant;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"potential" => Ok(Self::Potential),
			"active" => Ok(Self::Active),
			"verified" => Ok(Self::Verified),
			"inactive" => Ok(Self::Inactive),
			_ => Err(UnknownVariant { field: "status", value: raw.to_string() }),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
	Call,
	Meeting,
	Email,
	Encrypted,
	#[default]
	Other,
}
impl InteractionKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Call => "call",
			Self::Meeting => "meeting",
			Self::Email => "email",
			Self::Encrypted => "encrypted",
			Self::Other => "other",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Call => "Call",
			Self::Meeting => "Meeting",
			Self::Email => "Email",
			Self::Encrypted => "Encrypted",
			Self::Other => "Other",
		}
	}
}
impl std::str::FromStr for InteractionKind {
	type Err = UnknownVariant;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"call" => Ok(Self::Call),
			"meeting" => Ok(Self::Meeting),
			"email" => Ok(Self::Email),
			"encrypted" => Ok(Self::Encrypted),
			"other" => Ok(Self::Other),
			_ => Err(UnknownVariant { field: "type", value: raw.to_string() }),
		}
	}
}

/// Array-of-objects tag shape used by the store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tag {
	pub tag: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
}
impl Tag {
	pub fn new(tag: impl Into<String>) -> Self {
		Self { tag: tag.into(), id: None }
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
	/// Assigned by the store for rows it created; pre-assigned by the caller
	/// otherwise.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(with = "crate::wire")]
	pub date: OffsetDateTime,
	#[serde(rename = "type")]
	pub kind: InteractionKind,
	pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
	pub id: String,
	pub first_name: String,
	pub last_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub organization: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default)]
	pub sensitivity: Sensitivity,
	#[serde(default)]
	pub reliability: Reliability,
	#[serde(default)]
	pub status: ContactStatus,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<Tag>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(default)]
	pub interactions: Vec<Interaction>,
	/// Derived from the interaction list; absent when the list is empty.
	#[serde(default, with = "crate::wire::option", skip_serializing_if = "Option::is_none")]
	pub last_contact: Option<OffsetDateTime>,
	#[serde(with = "crate::wire")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::wire")]
	pub updated_at: OffsetDateTime,
}
impl Contact {
	/// Form view of the document, dropping store-owned and derived fields.
	pub fn to_form(&self) -> ContactForm {
		ContactForm {
			first_name: self.first_name.clone(),
			last_name: self.last_name.clone(),
			alias: self.alias.clone(),
			organization: self.organization.clone(),
			position: self.position.clone(),
			email: self.email.clone(),
			phone: self.phone.clone(),
			sensitivity: self.sensitivity,
			reliability: self.reliability,
			status: self.status,
			tags: self.tags.clone(),
			notes: self.notes.clone(),
			interactions: self.interactions.clone(),
		}
	}
}

/// Create/edit payload. Store-owned fields (`id`, timestamps) and the derived
/// date have no slot here.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub organization: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default)]
	pub sensitivity: Sensitivity,
	#[serde(default)]
	pub reliability: Reliability,
	#[serde(default)]
	pub status: ContactStatus,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<Tag>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub interactions: Vec<Interaction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
	MissingField { field: &'static str },
	BlankInteractionNotes { index: usize },
}
impl RejectReason {
	/// Wire-name path of the offending field.
	pub fn field(&self) -> String {
		match self {
			Self::MissingField { field } => (*field).to_string(),
			Self::BlankInteractionNotes { index } => format!("interactions[{index}].notes"),
		}
	}
}

pub fn validate_form(form: &ContactForm) -> Result<(), RejectReason> {
	if form.first_name.trim().is_empty() {
		return Err(RejectReason::MissingField { field: "firstName" });
	}
	if form.last_name.trim().is_empty() {
		return Err(RejectReason::MissingField { field: "lastName" });
	}

	for (index, interaction) in form.interactions.iter().enumerate() {
		if interaction.notes.trim().is_empty() {
			return Err(RejectReason::BlankInteractionNotes { index });
		}
	}

	Ok(())
}

/// Shallow patch of a single interaction row.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPatch {
	#[serde(default, with = "crate::wire::option", skip_serializing_if = "Option::is_none")]
	pub date: Option<OffsetDateTime>,
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<InteractionKind>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}
impl InteractionPatch {
	pub fn is_empty(&self) -> bool {
		self.date.is_none() && self.kind.is_none() && self.notes.is_none()
	}
}

/// The one wire shape for mutations. Fields left unset are omitted and keep
/// their stored value. `last_contact` is private: the constructors derive it
/// from the interactions they carry, so no caller can write it directly.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub position: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sensitivity: Option<Sensitivity>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reliability: Option<Reliability>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<ContactStatus>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<Tag>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub interactions: Option<Vec<Interaction>>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "wire::serialize_derived")]
	last_contact: Option<Option<OffsetDateTime>>,
}
impl ContactPatch {
	pub fn from_form(form: ContactForm) -> Self {
		let last_contact = Some(timeline::last_contact(&form.interactions));

		Self {
			first_name: Some(form.first_name),
			last_name: Some(form.last_name),
			alias: form.alias,
			organization: form.organization,
			position: form.position,
			email: form.email,
			phone: form.phone,
			sensitivity: Some(form.sensitivity),
			reliability: Some(form.reliability),
			status: Some(form.status),
			tags: Some(form.tags),
			notes: form.notes,
			interactions: Some(form.interactions),
			last_contact,
		}
	}

	/// Timeline-only patch: interactions plus the derived date, nothing else.
	/// An empty list yields `Some(None)`, serialized as null to clear the
	/// stored value.
	pub fn timeline(interactions: Vec<Interaction>) -> Self {
		let last_contact = Some(timeline::last_contact(&interactions));

		Self { interactions: Some(interactions), last_contact, ..Self::default() }
	}

	pub fn last_contact(&self) -> Option<Option<OffsetDateTime>> {
		self.last_contact
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn interaction(id: &str, date: OffsetDateTime) -> Interaction {
		Interaction {
			id: Some(id.to_string()),
			date,
			kind: InteractionKind::Call,
			notes: "Spoke briefly.".to_string(),
		}
	}

	#[test]
	fn form_without_first_name_is_rejected() {
		let form = ContactForm { last_name: "Doe".to_string(), ..ContactForm::default() };
		let err = validate_form(&form).expect_err("Blank first name must be rejected.");

		assert_eq!(err, RejectReason::MissingField { field: "firstName" });
		assert_eq!(err.field(), "firstName");
	}

	#[test]
	fn form_with_blank_interaction_notes_is_rejected() {
		let mut interaction = interaction("i1", datetime!(2024-01-10 0:00 UTC));

		interaction.notes = "   ".to_string();

		let form = ContactForm {
			first_name: "Jane".to_string(),
			last_name: "Doe".to_string(),
			interactions: vec![interaction],
			..ContactForm::default()
		};
		let err = validate_form(&form).expect_err("Blank notes must be rejected.");

		assert_eq!(err.field(), "interactions[0].notes");
	}

	#[test]
	fn form_patch_carries_derived_date() {
		let form = ContactForm {
			first_name: "Jane".to_string(),
			last_name: "Doe".to_string(),
			interactions: vec![
				interaction("i1", datetime!(2024-01-10 0:00 UTC)),
				interaction("i2", datetime!(2024-03-05 0:00 UTC)),
			],
			..ContactForm::default()
		};
		let patch = ContactPatch::from_form(form);

		assert_eq!(patch.last_contact(), Some(Some(datetime!(2024-03-05 0:00 UTC))));
	}

	#[test]
	fn timeline_patch_with_empty_list_serializes_null_derived_date() {
		let patch = ContactPatch::timeline(Vec::new());
		let value = serde_json::to_value(&patch).expect("Patch must serialize.");
		let object = value.as_object().expect("Patch must serialize to an object.");

		assert_eq!(object.get("lastContact"), Some(&serde_json::Value::Null));
		assert!(object.get("firstName").is_none());
	}

	#[test]
	fn timeline_patch_omits_identity_fields() {
		let patch = ContactPatch::timeline(vec![interaction("i1", datetime!(2024-02-01 0:00 UTC))]);
		let value = serde_json::to_value(&patch).expect("Patch must serialize.");
		let object = value.as_object().expect("Patch must serialize to an object.");

		assert_eq!(object.len(), 2);
		assert_eq!(object.get("lastContact").and_then(|v| v.as_str()), Some("2024-02-01T00:00:00Z"));
		assert!(object.contains_key("interactions"));
	}
}
