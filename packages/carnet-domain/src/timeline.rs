//! Pure helpers over a contact's embedded interaction list. The derived
//! last-contact date is computed here and nowhere else.

use time::OffsetDateTime;

use crate::contact::{Interaction, InteractionPatch};

/// Maximum interaction date, or `None` for an empty list.
pub fn last_contact(interactions: &[Interaction]) -> Option<OffsetDateTime> {
	interactions.iter().map(|interaction| interaction.date).max()
}

pub fn find(interactions: &[Interaction], id: &str) -> Option<usize> {
	interactions.iter().position(|interaction| interaction.id.as_deref() == Some(id))
}

pub fn apply_patch(interaction: &Interaction, patch: &InteractionPatch) -> Interaction {
	let mut next = interaction.clone();

	if let Some(date) = patch.date {
		next.date = date;
	}
	if let Some(kind) = patch.kind {
		next.kind = kind;
	}
	if let Some(notes) = &patch.notes {
		next.notes = notes.clone();
	}

	next
}

/// Newest first. The stored order is storage order and is never rewritten,
/// so this clones.
pub fn sorted_for_display(interactions: &[Interaction]) -> Vec<Interaction> {
	let mut sorted = interactions.to_vec();

	sorted.sort_by(|a, b| b.date.cmp(&a.date));

	sorted
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use crate::contact::InteractionKind;

	use super::*;

	fn interaction(id: &str, date: OffsetDateTime) -> Interaction {
		Interaction {
			id: Some(id.to_string()),
			date,
			kind: InteractionKind::Meeting,
			notes: "Met at the station.".to_string(),
		}
	}

	#[test]
	fn last_contact_of_empty_list_is_absent() {
		assert_eq!(last_contact(&[]), None);
	}

	#[test]
	fn last_contact_is_the_maximum_date() {
		let interactions = vec![
			interaction("i1", datetime!(2024-01-10 0:00 UTC)),
			interaction("i2", datetime!(2024-03-05 0:00 UTC)),
			interaction("i3", datetime!(2024-02-01 0:00 UTC)),
		];

		assert_eq!(last_contact(&interactions), Some(datetime!(2024-03-05 0:00 UTC)));
	}

	#[test]
	fn patch_merges_only_provided_fields() {
		let base = interaction("i1", datetime!(2024-01-10 0:00 UTC));
		let patch = InteractionPatch {
			notes: Some("Followed up by phone.".to_string()),
			..InteractionPatch::default()
		};
		let next = apply_patch(&base, &patch);

		assert_eq!(next.date, base.date);
		assert_eq!(next.kind, base.kind);
		assert_eq!(next.notes, "Followed up by phone.");
	}

	#[test]
	fn display_sort_is_newest_first_and_leaves_input_alone() {
		let interactions = vec![
			interaction("i1", datetime!(2024-01-10 0:00 UTC)),
			interaction("i2", datetime!(2024-03-05 0:00 UTC)),
		];
		let sorted = sorted_for_display(&interactions);

		assert_eq!(sorted[0].id.as_deref(), Some("i2"));
		assert_eq!(interactions[0].id.as_deref(), Some("i1"));
	}

	#[test]
	fn find_matches_by_id() {
		let interactions = vec![
			interaction("i1", datetime!(2024-01-10 0:00 UTC)),
			interaction("i2", datetime!(2024-03-05 0:00 UTC)),
		];

		assert_eq!(find(&interactions, "i2"), Some(1));
		assert_eq!(find(&interactions, "missing"), None);
	}
}
