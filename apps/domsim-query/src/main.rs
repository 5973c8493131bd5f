use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = domsim_query::Args::parse();

	domsim_query::run(args).await
}
