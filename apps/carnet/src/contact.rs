// crates.io
use color_eyre::{Result, eyre};
use time::OffsetDateTime;
// self
use carnet_domain::{
	ContactFilters, ContactForm, ContactStatus, Reliability, Sensitivity, Tag, wire,
};
use carnet_service::{
	ContactOp, ContactService, CreateRequest, DeleteRequest, FetchRequest, ListRequest,
	UpdateRequest,
};

#[derive(Debug, clap::Args)]
pub struct IdArg {
	/// Contact id.
	pub id: String,
}

#[derive(Debug, Default, clap::Args)]
pub struct FilterArgs {
	/// Match against first name, last name, organization or email.
	#[arg(long, value_name = "TEXT")]
	pub search: Option<String>,
	/// Filter by status: potential, active, verified or inactive.
	#[arg(long, value_name = "STATUS")]
	pub status: Option<ContactStatus>,
	/// Filter by sensitivity: low, medium or high.
	#[arg(long, value_name = "LEVEL")]
	pub sensitivity: Option<Sensitivity>,
	/// Filter by reliability: low, medium or high.
	#[arg(long, value_name = "LEVEL")]
	pub reliability: Option<Reliability>,
	#[arg(long, value_name = "NAME")]
	pub organization: Option<String>,
	/// Earliest last-contact date to include.
	#[arg(long, value_name = "DATE")]
	pub from: Option<String>,
	/// Latest last-contact date to include.
	#[arg(long, value_name = "DATE")]
	pub to: Option<String>,
	/// Only contacts with notes.
	#[arg(long, conflicts_with = "without_notes")]
	pub with_notes: bool,
	/// Only contacts without notes.
	#[arg(long)]
	pub without_notes: bool,
	/// Restrict to a tag; repeatable.
	#[arg(long = "tag", value_name = "TAG")]
	pub tags: Vec<String>,
	#[arg(long, value_name = "N")]
	pub page: Option<u32>,
	#[arg(long, value_name = "N")]
	pub limit: Option<u32>,
}
impl FilterArgs {
	pub fn into_filters(self, default_limit: u32) -> Result<ContactFilters> {
		let mut filters = ContactFilters::with_limit(self.limit.unwrap_or(default_limit));

		filters.page = self.page.unwrap_or(carnet_domain::filter::DEFAULT_PAGE).max(1);
		filters.search = self.search;
		filters.status = self.status;
		filters.sensitivity = self.sensitivity;
		filters.reliability = self.reliability;
		filters.organization = self.organization;
		filters.date_from = parse_date_flag(self.from.as_deref(), "--from")?;
		filters.date_to = parse_date_flag(self.to.as_deref(), "--to")?;
		filters.has_notes = match (self.with_notes, self.without_notes) {
			(true, _) => Some(true),
			(_, true) => Some(false),
			_ => None,
		};
		filters.tags = self.tags;

		Ok(filters)
	}
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
	#[arg(long, value_name = "NAME")]
	pub first_name: String,
	#[arg(long, value_name = "NAME")]
	pub last_name: String,
	#[command(flatten)]
	pub overlay: OverlayArgs,
}

#[derive(Debug, clap::Args)]
pub struct EditArgs {
	/// Contact id.
	pub id: String,
	#[arg(long, value_name = "NAME")]
	pub first_name: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub last_name: Option<String>,
	#[command(flatten)]
	pub overlay: OverlayArgs,
}

/// Optional form fields shared by `create` and `edit`. Absent flags leave
/// the corresponding form field alone.
#[derive(Debug, Default, clap::Args)]
pub struct OverlayArgs {
	#[arg(long, value_name = "NAME")]
	pub alias: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub organization: Option<String>,
	#[arg(long, value_name = "TITLE")]
	pub position: Option<String>,
	#[arg(long, value_name = "ADDRESS")]
	pub email: Option<String>,
	#[arg(long, value_name = "NUMBER")]
	pub phone: Option<String>,
	/// Sensitivity: low, medium or high.
	#[arg(long, value_name = "LEVEL")]
	pub sensitivity: Option<Sensitivity>,
	/// Reliability: low, medium or high.
	#[arg(long, value_name = "LEVEL")]
	pub reliability: Option<Reliability>,
	/// Status: potential, active, verified or inactive.
	#[arg(long, value_name = "STATUS")]
	pub status: Option<ContactStatus>,
	/// Replace the tag list; repeatable.
	#[arg(long = "tag", value_name = "TAG")]
	pub tags: Vec<String>,
	#[arg(long, value_name = "TEXT")]
	pub notes: Option<String>,
}
impl OverlayArgs {
	pub fn apply(self, form: &mut ContactForm) {
		if let Some(alias) = self.alias {
			form.alias = Some(alias);
		}
		if let Some(organization) = self.organization {
			form.organization = Some(organization);
		}
		if let Some(position) = self.position {
			form.position = Some(position);
		}
		if let Some(email) = self.email {
			form.email = Some(email);
		}
		if let Some(phone) = self.phone {
			form.phone = Some(phone);
		}
		if let Some(sensitivity) = self.sensitivity {
			form.sensitivity = sensitivity;
		}
		if let Some(reliability) = self.reliability {
			form.reliability = reliability;
		}
		if let Some(status) = self.status {
			form.status = status;
		}
		if !self.tags.is_empty() {
			form.tags = self.tags.into_iter().map(Tag::new).collect();
		}
		if let Some(notes) = self.notes {
			form.notes = Some(notes);
		}
	}
}

pub async fn list(service: &ContactService, args: FilterArgs) -> Result<()> {
	let filters = args.into_filters(service.config().store.page_limit)?;
	let response = service.list(ListRequest { filters }).await?;

	crate::print_json(&response)
}

pub async fn show(service: &ContactService, arg: IdArg) -> Result<()> {
	let response = service.fetch(FetchRequest { id: arg.id }).await?;

	crate::print_json(&response.contact)
}

pub async fn create(service: &ContactService, args: CreateArgs) -> Result<()> {
	let mut form = ContactForm {
		first_name: args.first_name,
		last_name: args.last_name,
		..ContactForm::default()
	};

	args.overlay.apply(&mut form);

	let response = service.create(CreateRequest { form }).await?;

	eprintln!("Created contact {}.", response.contact.id);

	crate::print_json(&response.contact)
}

pub async fn edit(service: &ContactService, args: EditArgs) -> Result<()> {
	let current = service.fetch(FetchRequest { id: args.id.clone() }).await?;
	let mut form = current.contact.to_form();

	if let Some(first_name) = args.first_name {
		form.first_name = first_name;
	}
	if let Some(last_name) = args.last_name {
		form.last_name = last_name;
	}

	args.overlay.apply(&mut form);

	let response = service.update(UpdateRequest { id: args.id, form }).await?;

	crate::print_json(&response.contact)
}

pub async fn delete(service: &ContactService, arg: IdArg) -> Result<()> {
	let response = service.delete(DeleteRequest { id: arg.id }).await?;

	match response.op {
		ContactOp::None => eprintln!("Contact {} was already gone.", response.id),
		_ => eprintln!("Deleted contact {}.", response.id),
	}

	crate::print_json(&response)
}

fn parse_date_flag(raw: Option<&str>, flag: &str) -> Result<Option<OffsetDateTime>> {
	raw.map(|raw| {
		wire::parse_date(raw)
			.map_err(|err| eyre::eyre!("{flag} must be an RFC3339 or YYYY-MM-DD date: {err}"))
	})
	.transpose()
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn filter_flags_map_onto_filters() {
		let args = FilterArgs {
			search: Some("dupont".to_string()),
			status: Some(ContactStatus::Active),
			from: Some("2024-01-01".to_string()),
			with_notes: true,
			tags: vec!["whistleblower".to_string()],
			page: Some(3),
			..FilterArgs::default()
		};
		let filters = args.into_filters(20).expect("Conversion must succeed.");

		assert_eq!(filters.page, 3);
		assert_eq!(filters.limit, 20);
		assert_eq!(filters.search.as_deref(), Some("dupont"));
		assert_eq!(filters.status, Some(ContactStatus::Active));
		assert_eq!(filters.date_from, Some(datetime!(2024-01-01 0:00 UTC)));
		assert_eq!(filters.has_notes, Some(true));
		assert_eq!(filters.tags, vec!["whistleblower".to_string()]);
	}

	#[test]
	fn absent_flags_fall_back_to_defaults() {
		let filters = FilterArgs::default().into_filters(25).expect("Conversion must succeed.");

		assert_eq!(filters.page, 1);
		assert_eq!(filters.limit, 25);
		assert_eq!(filters.search, None);
		assert_eq!(filters.has_notes, None);
	}

	#[test]
	fn bad_date_flags_name_the_flag() {
		let args = FilterArgs { to: Some("03/05/2024".to_string()), ..FilterArgs::default() };
		let err = args.into_filters(20).expect_err("A bad date must be rejected.");

		assert!(err.to_string().contains("--to"));
	}

	#[test]
	fn overlay_leaves_untouched_fields_alone() {
		let mut form = ContactForm {
			first_name: "Jean".to_string(),
			last_name: "Dupont".to_string(),
			organization: Some("ACME".to_string()),
			..ContactForm::default()
		};
		let overlay = OverlayArgs {
			position: Some("Editor".to_string()),
			status: Some(ContactStatus::Verified),
			..OverlayArgs::default()
		};

		overlay.apply(&mut form);

		assert_eq!(form.organization.as_deref(), Some("ACME"));
		assert_eq!(form.position.as_deref(), Some("Editor"));
		assert_eq!(form.status, ContactStatus::Verified);
	}
}
