#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use fltdoc::flt::ParseOptions;

mod cmd;

#[derive(Parser)]
#[command(name = "fltdoc", about = "OpenFlight .flt inspection tools")]
struct Cli {
	/// Narrate every decoded record on stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	/// Record missing texture attribute files instead of failing.
	#[arg(long, global = true)]
	skip_missing_textures: bool,
	/// Do not load external databases or texture attribute files.
	#[arg(long, global = true)]
	no_externals: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Validate the header and report where record dispatch resumes.
	Check(cmd::check::Args),
	/// Print header metadata and document counts.
	Info(cmd::info::Args),
	/// Print the scene graph.
	Tree(cmd::tree::Args),
	/// List loaded external databases and texture attributes.
	Externals(cmd::externals::Args),
	/// List vertex palette entries by offset.
	Vertices(cmd::vertices::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli) {
		eprintln!("error ({}): {err}", err.kind().as_str());
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
	tracing_subscriber::fmt().with_max_level(level).with_target(false).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> fltdoc::flt::Result<()> {
	let options = ParseOptions {
		skip_missing_textures: cli.skip_missing_textures,
		verbose: cli.verbose,
		resolve_externals: !cli.no_externals,
	};

	match cli.command {
		Commands::Check(args) => cmd::check::run(args),
		Commands::Info(args) => cmd::info::run(args, &options),
		Commands::Tree(args) => cmd::tree::run(args, &options),
		Commands::Externals(args) => cmd::externals::run(args, &options),
		Commands::Vertices(args) => cmd::vertices::run(args, &options),
	}
}
