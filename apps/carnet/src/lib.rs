//! Terminal client for the contact store. Data commands print JSON to
//! stdout; logs and progress go to stderr so output stays pipeable.

pub mod auth;
pub mod contact;
pub mod export;
pub mod log;

// std
use std::{path::PathBuf, sync::Arc};
// crates.io
use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use carnet_service::ContactService;
use carnet_store::Session;

#[derive(Debug, Parser)]
#[command(
	version = carnet_cli::VERSION,
	rename_all = "kebab",
	styles = carnet_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Session token. Falls back to the CARNET_TOKEN environment variable.
	#[arg(long, value_name = "TOKEN")]
	pub token: Option<String>,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Sign in and print the session token.
	Login(auth::LoginArgs),
	/// Show the signed-in user.
	Whoami,
	/// List contacts matching the filters.
	List(contact::FilterArgs),
	/// Print one contact.
	Show(contact::IdArg),
	/// Create a contact.
	Create(contact::CreateArgs),
	/// Update a contact, overlaying the given fields on the stored document.
	Edit(contact::EditArgs),
	/// Delete a contact.
	Delete(contact::IdArg),
	/// Work with a contact's interaction timeline.
	#[command(subcommand)]
	Log(log::LogCommand),
	/// Render the filtered contacts as CSV or a text report.
	Export(export::ExportArgs),
}

pub async fn run(args: Args) -> Result<()> {
	let config = carnet_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	tracing::debug!(config = %args.config.display(), "Loaded configuration.");

	let token = args.token.or_else(|| std::env::var("CARNET_TOKEN").ok());
	let session = Arc::new(match token {
		Some(token) => Session::with_token(token),
		None => Session::new(),
	});
	let service = ContactService::new(config, session.clone());

	match args.command {
		Command::Login(login) => auth::login(&service, &session, login).await,
		Command::Whoami => auth::whoami(&service, &session).await,
		Command::List(filters) => contact::list(&service, filters).await,
		Command::Show(arg) => contact::show(&service, arg).await,
		Command::Create(create) => contact::create(&service, create).await,
		Command::Edit(edit) => contact::edit(&service, edit).await,
		Command::Delete(arg) => contact::delete(&service, arg).await,
		Command::Log(command) => log::run(&service, command).await,
		Command::Export(export) => export::run(&service, export).await,
	}
}

pub(crate) fn print_json<T>(value: &T) -> Result<()>
where
	T: serde::Serialize,
{
	println!("{}", serde_json::to_string_pretty(value)?);

	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_well_formed() {
		Args::command().debug_assert();
	}
}
