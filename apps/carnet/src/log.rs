// crates.io
use color_eyre::{Result, eyre};
use time::{OffsetDateTime, macros::format_description};
// self
use carnet_domain::{Interaction, InteractionKind, InteractionPatch, timeline, wire};
use carnet_service::{
	AddInteractionRequest, ContactOp, ContactService, DeleteInteractionRequest, FetchRequest,
	UpdateInteractionRequest,
};

#[derive(Debug, clap::Subcommand)]
pub enum LogCommand {
	/// Log a new interaction.
	Add(AddArgs),
	/// Edit one interaction row.
	Edit(EditArgs),
	/// Remove one interaction row.
	Rm(RmArgs),
	/// Print a contact's timeline, newest first.
	Show(ShowArgs),
}

#[derive(Debug, clap::Args)]
pub struct AddArgs {
	/// Contact id.
	pub contact: String,
	/// Interaction date; defaults to now.
	#[arg(long, value_name = "DATE")]
	pub date: Option<String>,
	/// Interaction type: call, meeting, email, encrypted or other.
	#[arg(long = "type", value_name = "TYPE")]
	pub kind: Option<InteractionKind>,
	#[arg(long, value_name = "TEXT")]
	pub notes: String,
}

#[derive(Debug, clap::Args)]
pub struct EditArgs {
	/// Contact id.
	pub contact: String,
	/// Interaction id.
	pub interaction: String,
	#[arg(long, value_name = "DATE")]
	pub date: Option<String>,
	/// Interaction type: call, meeting, email, encrypted or other.
	#[arg(long = "type", value_name = "TYPE")]
	pub kind: Option<InteractionKind>,
	#[arg(long, value_name = "TEXT")]
	pub notes: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct RmArgs {
	/// Contact id.
	pub contact: String,
	/// Interaction id.
	pub interaction: String,
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
	/// Contact id.
	pub contact: String,
}

pub async fn run(service: &ContactService, command: LogCommand) -> Result<()> {
	match command {
		LogCommand::Add(args) => add(service, args).await,
		LogCommand::Edit(args) => edit(service, args).await,
		LogCommand::Rm(args) => rm(service, args).await,
		LogCommand::Show(args) => show(service, args).await,
	}
}

async fn add(service: &ContactService, args: AddArgs) -> Result<()> {
	let date = match args.date.as_deref() {
		Some(raw) => parse_date(raw)?,
		None => OffsetDateTime::now_utc(),
	};
	let interaction =
		Interaction { id: None, date, kind: args.kind.unwrap_or_default(), notes: args.notes };
	let response = service
		.add_interaction(AddInteractionRequest { contact_id: args.contact, interaction })
		.await?;

	eprintln!("Logged interaction {}.", response.interaction_id);

	crate::print_json(&response.contact)
}

async fn edit(service: &ContactService, args: EditArgs) -> Result<()> {
	let date = args.date.as_deref().map(parse_date).transpose()?;
	let patch = InteractionPatch { date, kind: args.kind, notes: args.notes };
	let response = service
		.update_interaction(UpdateInteractionRequest {
			contact_id: args.contact,
			interaction_id: args.interaction,
			patch,
		})
		.await?;

	crate::print_json(&response.contact)
}

async fn rm(service: &ContactService, args: RmArgs) -> Result<()> {
	let response = service
		.delete_interaction(DeleteInteractionRequest {
			contact_id: args.contact,
			interaction_id: args.interaction,
		})
		.await?;

	if response.op == ContactOp::None {
		eprintln!("Interaction was already gone.");
	}

	crate::print_json(&response.contact)
}

async fn show(service: &ContactService, args: ShowArgs) -> Result<()> {
	let response = service.fetch(FetchRequest { id: args.contact }).await?;
	let day_only = format_description!("[year]-[month]-[day]");

	for interaction in timeline::sorted_for_display(&response.contact.interactions) {
		println!(
			"{}  {:<9}  {}",
			interaction.date.format(&day_only)?,
			interaction.kind.label(),
			interaction.notes,
		);
	}

	Ok(())
}

fn parse_date(raw: &str) -> Result<OffsetDateTime> {
	wire::parse_date(raw)
		.map_err(|err| eyre::eyre!("--date must be an RFC3339 or YYYY-MM-DD date: {err}"))
}
