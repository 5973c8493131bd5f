use std::{
	fs,
	io::{self, Write},
	path::PathBuf,
};

use clap::{Parser, Subcommand};

use domsim_service::SimilarityService;

#[derive(Debug, Parser)]
#[command(
	version = domsim_cli::VERSION,
	rename_all = "kebab",
	styles = domsim_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// List every selectable domain.
	Domains,
	/// Show the indexed record of one domain.
	Record { domain: String },
	/// Rank domains similar to DOMAIN.
	Similar { domain: String },
	/// Write the similarity table for DOMAIN as CSV.
	Export {
		domain: String,
		/// Output file; defaults to stdout.
		#[arg(long, short = 'o', value_name = "FILE")]
		output: Option<PathBuf>,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = domsim_config::load(&args.config)?;

	domsim_cli::init_tracing(&config.service.log_level);

	let service = SimilarityService::new(&config)?;

	match args.command {
		Command::Domains => print_json(&service.domains().await?),
		Command::Record { domain } => print_json(&service.record(&domain).await?),
		Command::Similar { domain } => print_json(&service.similar(&domain).await?),
		Command::Export { domain, output } => {
			let export = service.export_csv(&domain).await?;

			match output {
				Some(path) => {
					fs::write(&path, export.bytes.as_slice())?;

					tracing::info!(path = %path.display(), "Wrote similarity export.");

					Ok(())
				},
				None => {
					io::stdout().write_all(export.bytes.as_slice())?;

					Ok(())
				},
			}
		},
	}
}

fn print_json<T>(value: &T) -> color_eyre::Result<()>
where
	T: serde::Serialize,
{
	println!("{}", serde_json::to_string_pretty(value)?);

	Ok(())
}
