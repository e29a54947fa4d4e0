//! Translates a filter state into the store's bracketed query-parameter
//! language. Distinct filters AND together as independent `where[...]` keys;
//! only free-text search fans out into an OR group.

use time::format_description::well_known::Rfc3339;

use crate::Result;
use carnet_domain::ContactFilters;

/// OR-group members for free-text search, in wire order.
const SEARCH_FIELDS: [&str; 4] = ["firstName", "lastName", "organization", "email"];

pub fn build_query(filters: &ContactFilters) -> Result<Vec<(String, String)>> {
	let mut pairs = vec![
		("page".to_string(), filters.page.max(1).to_string()),
		("limit".to_string(), filters.limit.max(1).to_string()),
	];

	if let Some(search) = trimmed(&filters.search) {
		for (index, field) in SEARCH_FIELDS.iter().enumerate() {
			pairs.push((format!("where[or][{index}][{field}][contains]"), search.to_string()));
		}
	}
	if let Some(sensitivity) = filters.sensitivity {
		pairs.push(("where[sensitivity][equals]".to_string(), sensitivity.as_str().to_string()));
	}
	if let Some(reliability) = filters.reliability {
		pairs.push(("where[reliability][equals]".to_string(), reliability.as_str().to_string()));
	}
	if let Some(status) = filters.status {
		pairs.push(("where[status][equals]".to_string(), status.as_str().to_string()));
	}
	if let Some(organization) = trimmed(&filters.organization) {
		pairs.push(("where[organization][contains]".to_string(), organization.to_string()));
	}
	if let Some(date_from) = filters.date_from {
		pairs.push((
			"where[lastContact][greater_than_equal]".to_string(),
			date_from.format(&Rfc3339)?,
		));
	}
	if let Some(date_to) = filters.date_to {
		pairs.push(("where[lastContact][less_than_equal]".to_string(), date_to.format(&Rfc3339)?));
	}
	if let Some(has_notes) = filters.has_notes {
		pairs.push(("where[notes][exists]".to_string(), has_notes.to_string()));
	}

	let tags: Vec<&str> =
		filters.tags.iter().map(String::as_str).filter(|tag| !tag.trim().is_empty()).collect();

	if !tags.is_empty() {
		pairs.push(("where[tags.tag][in]".to_string(), tags.join(",")));
	}

	Ok(pairs)
}

fn trimmed(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
