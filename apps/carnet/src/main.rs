use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = carnet::Args::parse();

	carnet::run(args).await
}
