//! autocomment - check-in comments generated from associated work items.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autocomment::cli::{self, Cli, Commands, InternalCommands};
use autocomment::config::Config;
use autocomment::Error;

/// Exit code when evaluation was cancelled rather than completed.
const EXIT_CANCELLED: i32 = 130;

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr so hook output stays readable
    let level = Config::load()
        .map(|c| c.log.level)
        .unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autocomment={}", level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(Error::Cancelled) => {
            eprintln!("Policy evaluation cancelled.");
            EXIT_CANCELLED
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, Error> {
    match cli.command {
        Commands::Install => cli::hooks::install()?,
        Commands::Uninstall => cli::hooks::uninstall()?,
        Commands::Associate {
            id,
            type_name,
            title,
        } => cli::items::associate(id, &type_name, &title)?,
        Commands::Dissociate { id } => cli::items::dissociate(id)?,
        Commands::Items { json } => cli::items::list(json)?,
        Commands::Preview => cli::check::preview()?,
        Commands::Policies => cli::policy::list()?,
        Commands::Enable { id } => cli::policy::set_enabled(&id, true)?,
        Commands::Disable { id } => cli::policy::set_enabled(&id, false)?,
        Commands::Check { message_file } => return cli::check::run(&message_file),
        Commands::Internal {
            command: InternalCommands::PostCommit,
        } => cli::internal::post_commit()?,
    }

    Ok(0)
}
