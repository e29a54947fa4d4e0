//! Plain-text renderings of contact lists. Everything here formats into a
//! `String`; writing it somewhere is the caller's concern.

mod error;

pub use error::{Error, Result};

// crates.io
use time::{Date, OffsetDateTime, macros::format_description};
// self
use carnet_domain::{Contact, ContactStatus, Reliability, Sensitivity};

const CSV_HEADER: &str = "First name,Last name,Alias,Organization,Position,Email,Phone,Status,\
                          Sensitivity,Reliability,Tags,Last contact,Created,Updated";

/// Spreadsheet-ready rendering, one row per contact. Cells containing a
/// comma, quote or line break are quoted with inner quotes doubled.
pub fn csv(contacts: &[Contact]) -> Result<String> {
	let mut out = String::from(CSV_HEADER);

	out.push('\n');

	for contact in contacts {
		let tags =
			contact.tags.iter().map(|tag| tag.tag.as_str()).collect::<Vec<_>>().join("; ");
		let cells = [
			contact.first_name.clone(),
			contact.last_name.clone(),
			contact.alias.clone().unwrap_or_default(),
			contact.organization.clone().unwrap_or_default(),
			contact.position.clone().unwrap_or_default(),
			contact.email.clone().unwrap_or_default(),
			contact.phone.clone().unwrap_or_default(),
			contact.status.label().to_string(),
			contact.sensitivity.label().to_string(),
			contact.reliability.label().to_string(),
			tags,
			match contact.last_contact {
				Some(date) => day(date)?,
				None => String::new(),
			},
			day(contact.created_at)?,
			day(contact.updated_at)?,
		];
		let row = cells.iter().map(|cell| escape(cell)).collect::<Vec<_>>().join(",");

		out.push_str(&row);
		out.push('\n');
	}

	Ok(out)
}

/// Narrative summary: totals, per-dimension breakdowns and a one-line entry
/// per contact.
pub fn report(contacts: &[Contact], generated_at: OffsetDateTime) -> Result<String> {
	let total = contacts.len();
	let mut out = format!("Contact report, generated {}\n", day(generated_at)?);

	out.push_str(&format!("\nTotal contacts: {total}\n"));
	breakdown(
		&mut out,
		"By status",
		total,
		STATUSES.map(|status| {
			(status.label(), contacts.iter().filter(|contact| contact.status == status).count())
		}),
	);
	breakdown(
		&mut out,
		"By sensitivity",
		total,
		SENSITIVITIES.map(|sensitivity| {
			(
				sensitivity.label(),
				contacts.iter().filter(|contact| contact.sensitivity == sensitivity).count(),
			)
		}),
	);
	breakdown(
		&mut out,
		"By reliability",
		total,
		RELIABILITIES.map(|reliability| {
			(
				reliability.label(),
				contacts.iter().filter(|contact| contact.reliability == reliability).count(),
			)
		}),
	);

	if !contacts.is_empty() {
		out.push_str("\nContacts:\n");

		for contact in contacts {
			out.push_str(&entry(contact)?);
			out.push('\n');
		}
	}

	Ok(out)
}

/// `prefix_YYYY-MM-DD.ext`.
pub fn default_filename(prefix: &str, extension: &str, on: Date) -> Result<String> {
	let day_only = format_description!("[year]-[month]-[day]");

	Ok(format!("{prefix}_{}.{extension}", on.format(&day_only)?))
}

const STATUSES: [ContactStatus; 4] = [
	ContactStatus::Potential,
	ContactStatus::Active,
	ContactStatus::Verified,
	ContactStatus::Inactive,
];
const SENSITIVITIES: [Sensitivity; 3] = [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High];
const RELIABILITIES: [Reliability; 3] = [Reliability::Low, Reliability::Medium, Reliability::High];

fn escape(cell: &str) -> String {
	if cell.contains(['"', ',', '\n', '\r']) {
		format!("\"{}\"", cell.replace('"', "\"\""))
	} else {
		cell.to_string()
	}
}

fn day(date: OffsetDateTime) -> Result<String> {
	let day_only = format_description!("[year]-[month]-[day]");

	Ok(date.format(&day_only)?)
}

fn breakdown<'a>(
	out: &mut String,
	title: &str,
	total: usize,
	rows: impl IntoIterator<Item = (&'a str, usize)>,
) {
	out.push('\n');
	out.push_str(title);
	out.push_str(":\n");

	for (label, count) in rows {
		out.push_str(&format!("  {label:<14}{count:>5}{}\n", percent(count, total)));
	}
}

fn percent(count: usize, total: usize) -> String {
	if total == 0 {
		return String::new();
	}

	format!("  ({:.1}%)", count as f64 * 100. / total as f64)
}

fn entry(contact: &Contact) -> Result<String> {
	let mut line = format!("  - {} {}", contact.first_name, contact.last_name);

	if let Some(organization) = &contact.organization {
		line.push_str(&format!(" ({organization})"));
	}

	line.push_str(&format!(", {}", contact.status.label()));

	match contact.last_contact {
		Some(date) => line.push_str(&format!(", last contact {}", day(date)?)),
		None => line.push_str(", no recorded contact"),
	}

	Ok(line)
}
