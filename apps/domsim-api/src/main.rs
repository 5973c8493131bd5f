use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = domsim_api::Args::parse();

	domsim_api::run(args).await
}
