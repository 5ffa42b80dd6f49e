use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fxc::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct ConvertOptions {
    /// Amount to convert; empty, invalid or non-positive amounts become 1
    amount: Option<String>,
    /// Source currency code, e.g. USD
    from: Option<String>,
    /// Target currency code, e.g. INR
    to: Option<String>,
    /// Use the Nth configured quick amount instead of AMOUNT
    #[arg(short, long)]
    quick: Option<usize>,
    /// Swap source and target currencies
    #[arg(short, long)]
    swap: bool,
}

impl From<ConvertOptions> for fxc::ConvertArgs {
    fn from(opts: ConvertOptions) -> Self {
        fxc::ConvertArgs {
            amount: opts.amount,
            from: opts.from,
            to: opts.to,
            quick: opts.quick,
            swap: opts.swap,
        }
    }
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// Show favorite pairs with live rates
    List,
    /// Add a pair such as USD-INR
    Add { pair: String },
    /// Remove a pair
    Remove { pair: String },
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert(ConvertOptions),
    /// Show recent conversions
    History,
    /// Manage favorite currency pairs
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesCommand>,
    },
    /// Save the flag image for a currency
    Flag {
        /// Currency code, e.g. EUR
        currency: String,
        /// Output file (defaults to <CODE>.png or <CODE>.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert interactively, reading amounts and commands from stdin
    Interactive(ConvertOptions),
}

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Convert(opts) => fxc::AppCommand::Convert(opts.into()),
            Commands::History => fxc::AppCommand::History,
            Commands::Favorites { action } => fxc::AppCommand::Favorites(match action {
                None | Some(FavoritesCommand::List) => fxc::FavoritesAction::List,
                Some(FavoritesCommand::Add { pair }) => fxc::FavoritesAction::Add(pair),
                Some(FavoritesCommand::Remove { pair }) => fxc::FavoritesAction::Remove(pair),
            }),
            Commands::Flag { currency, output } => fxc::AppCommand::Flag { currency, output },
            Commands::Interactive(opts) => fxc::AppCommand::Interactive(opts.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxc::cli::setup::setup(),
        Some(cmd) => fxc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
