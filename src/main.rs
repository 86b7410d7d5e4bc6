use std::fs;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use contents_i18n::{Project, TranslationMemory};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn dump_memory_arg() -> Arg {
    Arg::new("dump-memory")
        .long("dump-memory")
        .help("Also write the translation memory as JSON to this file")
        .value_parser(clap::value_parser!(PathBuf))
}

fn cli() -> Command {
    Command::new("contents-i18n")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract translatable content into gettext templates and write translated documents")
        .arg(
            Arg::new("project")
                .long("project")
                .short('p')
                .help("Project root directory")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(".")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("extract")
                .about("Collect translatable texts and write contents.pot")
                .arg(dump_memory_arg()),
        )
        .subcommand(
            Command::new("translate")
                .about("Write contents+<language>.lr for every page from the catalogs"),
        )
        .subcommand(
            Command::new("build")
                .about("Run translate, then extract")
                .arg(dump_memory_arg()),
        )
}

fn extract(project: &Project, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut memory = TranslationMemory::new();
    project.collect(&mut memory)?;
    project.write_template(&memory)?;

    if let Some(path) = matches.get_one::<PathBuf>("dump-memory") {
        fs::write(path, memory.to_json()?)?;
        info!("Dumped translation memory to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let root = matches
        .get_one::<PathBuf>("project")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let project = Project::open(root)?;

    match matches.subcommand() {
        Some(("extract", sub)) => extract(&project, sub)?,
        Some(("translate", _)) => {
            project.translate_contents()?;
        }
        Some(("build", sub)) => {
            project.translate_contents()?;
            extract(&project, sub)?;
        }
        _ => unreachable!("a subcommand is required"),
    }
    Ok(())
}
