pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{
    ConversionInput, Converter, CurrencyCode, CurrencyRateProvider, PairKey, RateResolver,
};
use crate::store::{DiskStore, KeyValueStore, MemoryStore};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Arguments for a single conversion. Anything left out comes from config.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// 1-based position in the configured quick amounts; overrides `amount`.
    pub quick: Option<usize>,
    pub swap: bool,
}

#[derive(Debug, Clone)]
pub enum FavoritesAction {
    List,
    Add(String),
    Remove(String),
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Convert(ConvertArgs),
    History,
    Favorites(FavoritesAction),
    Flag {
        currency: String,
        output: Option<PathBuf>,
    },
    Interactive(ConvertArgs),
}

fn conversion_input(args: &ConvertArgs, config: &AppConfig) -> Result<ConversionInput> {
    let amount = match args.quick {
        Some(position) => config.quick_amount(position)?.to_string(),
        None => args
            .amount
            .clone()
            .unwrap_or_else(|| config.defaults.amount.to_string()),
    };
    let from = match &args.from {
        Some(code) => code.parse()?,
        None => config.defaults.from.clone(),
    };
    let to = match &args.to {
        Some(code) => code.parse()?,
        None => config.defaults.to.clone(),
    };

    let mut input = ConversionInput::new(amount, from, to);
    if args.swap {
        input.swap();
    }
    Ok(input)
}

fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskStore::open(&path));
    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Data directory unavailable, history will not be saved");
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let live_rates: Arc<dyn CurrencyRateProvider> = Arc::new(
        providers::ExchangeRateApiProvider::new(&config.providers.exchange_rate.base_url)?,
    );

    if let AppCommand::Flag { currency, output } = command {
        let currency: CurrencyCode = currency.parse()?;
        let provider = providers::FlagProvider::new(&config.providers.flags.base_url)?;
        cli::flag::run(&provider, &currency, output).await?;
        return Ok(());
    }

    let store = open_store(&config);
    let mut converter = Converter::new(RateResolver::new(live_rates.clone()), store).await;

    match command {
        AppCommand::Convert(args) => {
            let input = conversion_input(&args, &config)?;
            cli::convert::run(&mut converter, input).await
        }
        AppCommand::History => {
            cli::history::run(&converter.state().history);
            Ok(())
        }
        AppCommand::Favorites(FavoritesAction::List) => {
            cli::favorites::list(&converter.state().favorites, live_rates.as_ref()).await
        }
        AppCommand::Favorites(FavoritesAction::Add(pair)) => {
            let pair: PairKey = pair.parse()?;
            cli::favorites::add(&mut converter, pair).await
        }
        AppCommand::Favorites(FavoritesAction::Remove(pair)) => {
            let pair: PairKey = pair.parse()?;
            cli::favorites::remove(&mut converter, pair).await
        }
        AppCommand::Interactive(args) => {
            let input = conversion_input(&args, &config)?;
            let session = cli::interactive::Session::new(
                converter,
                config,
                live_rates,
                input,
                std::io::stdout(),
            );
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin).await?;
            Ok(())
        }
        AppCommand::Flag { .. } => unreachable!("Flag command is handled before opening the store"),
    }
}
