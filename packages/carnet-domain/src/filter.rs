use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::contact::{ContactStatus, Reliability, Sensitivity};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// List-view filter state. Blank strings count as unset and are dropped at
/// query-build time.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilters {
	pub page: u32,
	pub limit: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sensitivity: Option<Sensitivity>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reliability: Option<Reliability>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ContactStatus>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub organization: Option<String>,
	#[serde(default, with = "crate::wire::option", skip_serializing_if = "Option::is_none")]
	pub date_from: Option<OffsetDateTime>,
	#[serde(default, with = "crate::wire::option", skip_serializing_if = "Option::is_none")]
	pub date_to: Option<OffsetDateTime>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub has_notes: Option<bool>,
	/// Reserved filter; translated when non-empty.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<String>,
}
impl Default for ContactFilters {
	fn default() -> Self {
		Self {
			page: DEFAULT_PAGE,
			limit: DEFAULT_LIMIT,
			search: None,
			sensitivity: None,
			reliability: None,
			status: None,
			organization: None,
			date_from: None,
			date_to: None,
			has_notes: None,
			tags: Vec::new(),
		}
	}
}
impl ContactFilters {
	pub fn with_limit(limit: u32) -> Self {
		Self { limit: limit.max(1), ..Self::default() }
	}

	/// Merges a patch into the current state. Touching anything other than
	/// `page`/`limit` invalidates the current page, so the result snaps back
	/// to page 1.
	pub fn apply(&self, patch: &FilterPatch) -> Self {
		let mut next = self.clone();

		if let Some(page) = patch.page {
			next.page = page.max(1);
		}
		if let Some(limit) = patch.limit {
			next.limit = limit.max(1);
		}
		if let Some(search) = &patch.search {
			next.search = search.clone();
		}
		if let Some(sensitivity) = patch.sensitivity {
			next.sensitivity = sensitivity;
		}
		if let Some(reliability) = patch.reliability {
			next.reliability = reliability;
		}
		if let Some(status) = patch.status {
			next.status = status;
		}
		if let Some(organization) = &patch.organization {
			next.organization = organization.clone();
		}
		if let Some(date_from) = patch.date_from {
			next.date_from = date_from;
		}
		if let Some(date_to) = patch.date_to {
			next.date_to = date_to;
		}
		if let Some(has_notes) = patch.has_notes {
			next.has_notes = has_notes;
		}
		if let Some(tags) = &patch.tags {
			next.tags = tags.clone();
		}
		if patch.touches_filters() {
			next.page = 1;
		}

		next
	}
}

/// Partial update of [`ContactFilters`]. Outer `Some` means "touched"; the
/// inner value distinguishes setting from clearing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPatch {
	pub page: Option<u32>,
	pub limit: Option<u32>,
	pub search: Option<Option<String>>,
	pub sensitivity: Option<Option<Sensitivity>>,
	pub reliability: Option<Option<Reliability>>,
	pub status: Option<Option<ContactStatus>>,
	pub organization: Option<Option<String>>,
	pub date_from: Option<Option<OffsetDateTime>>,
	pub date_to: Option<Option<OffsetDateTime>>,
	pub has_notes: Option<Option<bool>>,
	pub tags: Option<Vec<String>>,
}
impl FilterPatch {
	pub fn page(page: u32) -> Self {
		Self { page: Some(page), ..Self::default() }
	}

	pub fn limit(limit: u32) -> Self {
		Self { limit: Some(limit), ..Self::default() }
	}

	pub fn search(raw: impl Into<String>) -> Self {
		Self { search: Some(Some(raw.into())), ..Self::default() }
	}

	pub fn touches_filters(&self) -> bool {
		self.search.is_some()
			|| self.sensitivity.is_some()
			|| self.reliability.is_some()
			|| self.status.is_some()
			|| self.organization.is_some()
			|| self.date_from.is_some()
			|| self.date_to.is_some()
			|| self.has_notes.is_some()
			|| self.tags.is_some()
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn populated() -> ContactFilters {
		ContactFilters {
			page: 4,
			limit: 50,
			search: Some("dupont".to_string()),
			sensitivity: Some(Sensitivity::High),
			status: Some(ContactStatus::Active),
			organization: Some("ACME".to_string()),
			date_from: Some(datetime!(2024-01-01 0:00 UTC)),
			has_notes: Some(true),
			..ContactFilters::default()
		}
	}

	#[test]
	fn defaults_start_on_first_page() {
		let filters = ContactFilters::default();

		assert_eq!(filters.page, 1);
		assert_eq!(filters.limit, 20);
	}

	#[test]
	fn touching_a_filter_snaps_back_to_first_page() {
		let next = populated().apply(&FilterPatch::search("acme"));

		assert_eq!(next.page, 1);
		assert_eq!(next.search.as_deref(), Some("acme"));
	}

	#[test]
	fn clearing_a_filter_also_snaps_back() {
		let next = populated()
			.apply(&FilterPatch { sensitivity: Some(None), ..FilterPatch::default() });

		assert_eq!(next.page, 1);
		assert_eq!(next.sensitivity, None);
	}

	#[test]
	fn page_only_patch_keeps_every_filter() {
		let current = populated();
		let next = current.apply(&FilterPatch::page(5));

		assert_eq!(next.page, 5);
		assert_eq!(next.search, current.search);
		assert_eq!(next.sensitivity, current.sensitivity);
		assert_eq!(next.status, current.status);
		assert_eq!(next.organization, current.organization);
		assert_eq!(next.date_from, current.date_from);
		assert_eq!(next.has_notes, current.has_notes);
	}

	#[test]
	fn limit_only_patch_keeps_every_filter() {
		let current = populated();
		let next = current.apply(&FilterPatch::limit(10));

		assert_eq!(next.limit, 10);
		assert_eq!(next.page, current.page);
		assert_eq!(next.search, current.search);
	}

	#[test]
	fn page_is_clamped_to_one() {
		let next = ContactFilters::default().apply(&FilterPatch::page(0));

		assert_eq!(next.page, 1);
	}

	#[test]
	fn combined_patch_with_page_still_resets() {
		let patch = FilterPatch { page: Some(7), search: Some(Some("x".to_string())), ..FilterPatch::default() };
		let next = populated().apply(&patch);

		assert_eq!(next.page, 1);
	}
}
