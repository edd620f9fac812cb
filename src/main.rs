use anyhow::Result;
use clap::Parser;
use wikidoc::cli::{Cli, Command, ConfigCommand};
use wikidoc::commands::check::{self, CheckArgs};
use wikidoc::commands::config;
use wikidoc::commands::preview::{self, PreviewArgs};
use wikidoc::commands::show::{self, ShowArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Check {
            paths,
            format,
            freestanding,
        } => {
            check::execute(CheckArgs {
                paths,
                format,
                freestanding,
            })?;
        }
        Command::Preview {
            file,
            format,
            freestanding,
        } => {
            preview::execute(PreviewArgs {
                file,
                format,
                freestanding,
            })?;
        }
        Command::Show { name, format } => {
            show::execute(ShowArgs { name, format })?;
        }
        Command::Config(cmd) => match cmd {
            ConfigCommand::Get { key } => {
                config::get(&key)?;
            }
            ConfigCommand::List => {
                config::list()?;
            }
            ConfigCommand::Path => {
                config::path()?;
            }
        },
    }

    Ok(())
}
