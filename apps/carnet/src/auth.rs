// crates.io
use color_eyre::{Result, eyre};
// self
use carnet_service::ContactService;
use carnet_store::{Credentials, Session, auth};

#[derive(Debug, clap::Args)]
pub struct LoginArgs {
	#[arg(long, value_name = "EMAIL")]
	pub email: String,
	#[arg(long, value_name = "PASSWORD")]
	pub password: String,
}

pub async fn login(service: &ContactService, session: &Session, args: LoginArgs) -> Result<()> {
	let credentials = Credentials { email: args.email, password: args.password };
	let auth = auth::login(&service.config().store, session, &credentials).await?;

	// Shell-sourceable so `eval "$(carnet ... login ...)"` keeps the token.
	println!("export CARNET_TOKEN={}", auth.token);
	eprintln!("Signed in as {}.", auth.user.email);

	Ok(())
}

pub async fn whoami(service: &ContactService, session: &Session) -> Result<()> {
	match auth::me(&service.config().store, session).await? {
		Some(user) => crate::print_json(&user),
		None => Err(eyre::eyre!("No signed-in user for this token.")),
	}
}
