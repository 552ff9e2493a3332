use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use human_panic::setup_panic;
use kaopei::prelude::*;
use tracing::{Level, enabled, error, info};

/// kaopei
///
/// Pick a photo of your outfit and let the KaoPei fashion director, the rudest
/// AI critic around, roast it, give advice and score it out of 10.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(flatten)]
    logging: LoggingOpts,

    #[clap(flatten)]
    config: ConfigOptions,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
struct VersionArgs {
    #[arg(long, action)]
    pub short: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Review an outfit photo.
    #[clap(alias("r"))]
    Roast(RoastArgs),
    /// List the found config files, and personas detected
    #[clap(alias("l"))]
    List,
    /// Print version info and exit
    #[clap(alias("v"))]
    Version(VersionArgs),
}

#[tokio::main]
async fn main() {
    setup_panic!();
    dotenvy::dotenv().ok();
    let opts = Cli::parse();

    let (_guard, file_location) = match opts
        .logging
        .configure_logging(&opts.config.get_run_id(), command_prefix(&opts.command))
    {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Unable to set up logging: {:?}", e);
            std::process::exit(2);
        }
    };
    let error_code = run_subcommand(opts).await;

    if error_code != 0 || enabled!(Level::DEBUG) {
        info!(target: "user", "More detailed logs at {}", file_location);
    }

    std::process::exit(error_code);
}

fn command_prefix(command: &Command) -> &'static str {
    match command {
        Command::Roast(_) => "roast",
        Command::List | Command::Version(_) => "root",
    }
}

async fn run_subcommand(opts: Cli) -> i32 {
    let loaded_config = match opts.config.load_config().await {
        Err(e) => {
            error!(target: "user", "Failed to load configuration: {}", e);
            return 2;
        }
        Ok(c) => c,
    };

    handle_commands(&loaded_config, &opts.command)
        .await
        .unwrap_or_else(|e| {
            error!(target: "user", "Critical Error. {}", e);
            1
        })
}

async fn handle_commands(found_config: &FoundConfig, command: &Command) -> Result<i32> {
    match command {
        Command::Roast(args) => roast_root(found_config, args).await,
        Command::List => show_config(found_config).map(|_| 0),
        Command::Version(args) => print_version(args).await,
    }
}

fn show_config(found_config: &FoundConfig) -> Result<()> {
    info!(target: "user", "Personas");
    if found_config.personas.is_empty() {
        let builtin = RoastPersona::builtin();
        info!(target: "user", "- {} (built-in): {}", builtin.full_name, builtin.description());
    } else {
        print_details(&found_config.working_dir, &found_config.personas);
    }

    info!(target: "user", "");
    info!(target: "user", "{}: {}", "Response schema".white().bold(), RESPONSE_SCHEMA_VERSION);
    if found_config.config_path.is_empty() {
        info!(target: "user", "{}: none found", "Config dirs".white().bold());
    } else {
        info!(target: "user", "{}", "Config dirs".white().bold());
        for path in &found_config.config_path {
            info!(target: "user", "- {}", path.display());
        }
    }

    Ok(())
}

async fn print_version(args: &VersionArgs) -> Result<i32> {
    if args.short {
        println!("kaopei {}", env!("KAOPEI_VERSION"));
    } else {
        info!(target: "user", "{}: {:60}", "Version".white().bold(), env!("KAOPEI_VERSION"));
        info!(target: "user", "{}: {:60}", "Build Timestamp".white().bold(), env!("VERGEN_BUILD_TIMESTAMP"));
    }

    Ok(0)
}
