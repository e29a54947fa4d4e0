// std
use std::path::PathBuf;
// crates.io
use clap::ValueEnum;
use color_eyre::Result;
use time::OffsetDateTime;
// self
use crate::contact::FilterArgs;
use carnet_domain::{Contact, ContactFilters, FilterPatch};
use carnet_service::{ContactService, ListRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
	Csv,
	Report,
}
impl Format {
	fn extension(self) -> &'static str {
		match self {
			Self::Csv => "csv",
			Self::Report => "txt",
		}
	}
}

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
	#[command(flatten)]
	pub filters: FilterArgs,
	/// Output format.
	#[arg(long, value_enum, default_value = "csv")]
	pub format: Format,
	/// Write to FILE, or into DIR under the configured default name.
	#[arg(long, value_name = "PATH")]
	pub out: Option<PathBuf>,
}

pub async fn run(service: &ContactService, args: ExportArgs) -> Result<()> {
	let filters = args.filters.into_filters(service.config().store.page_limit)?;
	let contacts = collect_all(service, filters).await?;
	let now = OffsetDateTime::now_utc();
	let rendered = match args.format {
		Format::Csv => carnet_export::csv(&contacts)?,
		Format::Report => carnet_export::report(&contacts, now)?,
	};

	match args.out {
		Some(path) => {
			let path = if path.is_dir() {
				let filename = carnet_export::default_filename(
					&service.config().export.filename_prefix,
					args.format.extension(),
					now.date(),
				)?;

				path.join(filename)
			} else {
				path
			};

			std::fs::write(&path, &rendered)?;
			eprintln!("Wrote {} contacts to {}.", contacts.len(), path.display());
		},
		None => print!("{rendered}"),
	}

	Ok(())
}

/// Walks every page of the filtered list. Advancing the page through a patch
/// keeps the other filters pinned.
async fn collect_all(
	service: &ContactService,
	mut filters: ContactFilters,
) -> Result<Vec<Contact>> {
	let mut contacts = Vec::new();

	loop {
		let response = service.list(ListRequest { filters: filters.clone() }).await?;
		let next_page = response.page + 1;
		let has_next = response.has_next;

		contacts.extend(response.items);

		if !has_next {
			return Ok(contacts);
		}

		filters = filters.apply(&FilterPatch::page(next_page));
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use carnet_testkit::{MemoryStore, fixtures};

	use super::*;

	#[tokio::test]
	async fn collect_all_walks_every_page_without_dropping_filters() {
		let store = Arc::new(MemoryStore::with_contacts(
			(0..5).map(|index| fixtures::contact(&format!("c{index}"))).collect(),
		));
		let service = ContactService::with_store(fixtures::config(), store.clone());
		let mut filters = ContactFilters::with_limit(2);

		filters.search = Some("dupont".to_string());

		let contacts = collect_all(&service, filters).await.expect("Walk must succeed.");

		assert_eq!(contacts.len(), 5);

		let query = store.last_query().expect("The store must have been queried.");

		assert!(query.contains(&("page".to_string(), "3".to_string())));
		assert!(query.iter().any(|(key, _)| key.starts_with("where[or]")));
	}
}
