#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod logging;

#[derive(Parser)]
#[command(name = "manilit", about = "Render decoded manifests as pruned source literals")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Render(cmd::render::Args),
	Schema(cmd::schema::Args),
}

fn main() {
	logging::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> manilit::manifest::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Render(args) => cmd::render::run(args),
		Commands::Schema(args) => cmd::schema::run(args),
	}
}
