use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use bbking::{Config, Engine};

mod cli;
use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.init();
}

fn read_all(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            log::debug!("Using config from: {}", path.display());
            Config::from_file(path)?
        }
        None => {
            log::debug!("Using default config");
            Config::default()
        }
    };
    if !cli.libraries.is_empty() {
        config.tag_libraries = cli.libraries.clone();
    }
    config.template_dirs.extend(cli.template_dirs.iter().cloned());
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render { file } => {
            let engine = Engine::from_config(&load_config(cli)?)?;
            let input = read_all(file.as_ref())?;
            let html = engine.render(&input)?;
            println!("{}", html);
        }
        Commands::Parse { file } => {
            let input = read_all(file.as_ref())?;
            let nodes = bbking_parser::parse(&input);
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }
        Commands::Tags => {
            let engine = Engine::from_config(&load_config(cli)?)?;
            for definition in engine.compiler().registry().definitions()? {
                println!("[{}] {}", definition.name(), definition.contract());
                for line in definition.usage() {
                    println!("    {}", line);
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
