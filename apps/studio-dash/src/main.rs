use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = studio_dash::Args::parse();
	studio_dash::run(args).await
}
