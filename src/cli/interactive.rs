//! Line-driven conversion session.
//!
//! Amount lines are debounced; currency changes, swaps and quick amounts
//! convert immediately. Conversions run on their own tasks and a result is
//! shown only if no newer conversion was started in the meantime.

use super::{convert, favorites, ui};
use crate::core::config::AppConfig;
use crate::core::converter::Prepared;
use crate::core::scheduler::{Debouncer, RequestTracker, Ticket};
use crate::core::{
    ConversionError, ConversionInput, ConversionRequest, ConversionResult, Converter,
    CurrencyCode, CurrencyRateProvider,
};
use anyhow::{Result, bail};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

const HELP: &str = "\
Commands:
  <amount>       set the amount (converts after a short pause)
  from <CODE>    set the source currency
  to <CODE>      set the target currency
  swap           swap source and target currencies
  quick <N>      use quick amount N
  convert        convert now
  history        show recent conversions
  favorites      show favorite pairs with live rates
  help           show this help
  quit           leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Amount(String),
    From(CurrencyCode),
    To(CurrencyCode),
    Swap,
    Quick(usize),
    Convert,
    History,
    Favorites,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let Some(first) = line.chars().next() else {
        return Ok(None);
    };
    if first.is_ascii_digit() || matches!(first, '.' | '-' | '+') {
        return Ok(Some(Command::Amount(line.to_string())));
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let argument = words.next();
    let command = match (keyword.as_str(), argument) {
        ("from", Some(code)) => Command::From(code.parse()?),
        ("to", Some(code)) => Command::To(code.parse()?),
        ("quick", Some(n)) => Command::Quick(n.parse().map_err(|_| {
            anyhow::anyhow!("Invalid quick amount position: {}", n)
        })?),
        ("swap", None) => Command::Swap,
        ("convert", None) => Command::Convert,
        ("history", None) => Command::History,
        ("favorites", None) => Command::Favorites,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => bail!("Unknown command: {} (type 'help')", line),
    };
    Ok(Some(command))
}

type Completion = (
    Ticket,
    ConversionRequest,
    Result<ConversionResult, ConversionError>,
);

pub struct Session<W: Write> {
    converter: Converter,
    config: AppConfig,
    live_rates: Arc<dyn CurrencyRateProvider>,
    input: ConversionInput,
    tracker: RequestTracker,
    debouncer: Debouncer,
    trigger_seq: u64,
    awaiting_trigger: Option<u64>,
    in_flight: usize,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(
        converter: Converter,
        config: AppConfig,
        live_rates: Arc<dyn CurrencyRateProvider>,
        input: ConversionInput,
        out: W,
    ) -> Self {
        let debouncer = Debouncer::new(config.debounce());
        Self {
            converter,
            config,
            live_rates,
            input,
            tracker: RequestTracker::new(),
            debouncer,
            trigger_seq: 0,
            awaiting_trigger: None,
            in_flight: 0,
            out,
        }
    }

    /// Runs until `quit`, or until input ends and outstanding work is done.
    pub async fn run<R>(mut self, reader: R) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel::<u64>();
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Completion>();
        let mut input_open = true;

        writeln!(
            self.out,
            "{}",
            ui::style_text(
                &format!(
                    "Converting {} → {}. Type an amount, or 'help'.",
                    self.input.from, self.input.to
                ),
                ui::StyleType::Subtle
            )
        )?;
        self.start(&result_tx)?;

        loop {
            if !input_open && self.awaiting_trigger.is_none() && self.in_flight == 0 {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        input_open = false;
                        continue;
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => self.handle(command, &trigger_tx, &result_tx).await?,
                        Ok(None) => {}
                        Err(e) => writeln!(
                            self.out,
                            "{}",
                            ui::style_text(&e.to_string(), ui::StyleType::Error)
                        )?,
                    }
                }
                Some(seq) = trigger_rx.recv() => {
                    // Older triggers that fired before being cancelled are ignored.
                    if self.awaiting_trigger == Some(seq) {
                        self.awaiting_trigger = None;
                        self.start(&result_tx)?;
                    }
                }
                Some((ticket, request, outcome)) = result_rx.recv() => {
                    self.in_flight -= 1;
                    self.finish(ticket, request, outcome).await?;
                }
            }
        }

        self.debouncer.cancel();
        Ok(self.out)
    }

    async fn handle(
        &mut self,
        command: Command,
        triggers: &UnboundedSender<u64>,
        results: &UnboundedSender<Completion>,
    ) -> Result<()> {
        match command {
            Command::Amount(amount) => {
                self.input.amount = amount;
                self.trigger_seq += 1;
                let seq = self.trigger_seq;
                let tx = triggers.clone();
                self.debouncer.schedule(move || {
                    let _ = tx.send(seq);
                });
                self.awaiting_trigger = Some(seq);
            }
            Command::From(code) => {
                self.input.from = code;
                self.start_now(results)?;
            }
            Command::To(code) => {
                self.input.to = code;
                self.start_now(results)?;
            }
            Command::Swap => {
                self.input.swap();
                writeln!(
                    self.out,
                    "Currencies swapped: {} → {}",
                    self.input.from, self.input.to
                )?;
                self.start_now(results)?;
            }
            Command::Quick(position) => match self.config.quick_amount(position) {
                Ok(amount) => {
                    self.input.amount = amount.to_string();
                    self.start_now(results)?;
                }
                Err(e) => writeln!(
                    self.out,
                    "{}",
                    ui::style_text(&e.to_string(), ui::StyleType::Error)
                )?,
            },
            Command::Convert => self.start_now(results)?,
            Command::History => {
                let text = self.converter.state().history.display_as_table(chrono::Utc::now());
                writeln!(self.out, "{text}")?;
            }
            Command::Favorites => {
                let rates = favorites::fetch_rates(
                    &self.converter.state().favorites,
                    self.live_rates.as_ref(),
                )
                .await;
                writeln!(self.out, "{}", favorites::display_as_table(&rates))?;
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Starts a conversion, superseding any pending debounced one.
    fn start_now(&mut self, results: &UnboundedSender<Completion>) -> Result<()> {
        self.debouncer.cancel();
        self.awaiting_trigger = None;
        self.start(results)
    }

    fn start(&mut self, results: &UnboundedSender<Completion>) -> Result<()> {
        let ticket = self.tracker.issue();
        match self.converter.prepare(&self.input) {
            Prepared::Ready(conversion) => {
                writeln!(self.out, "{}", conversion.display_as_text())?;
            }
            Prepared::Pending(request) => {
                if let Some(message) = self.converter.status().progress_message() {
                    writeln!(
                        self.out,
                        "{}",
                        ui::style_text(message, ui::StyleType::Subtle)
                    )?;
                }
                let resolver = self.converter.resolver().clone();
                let tx = results.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let outcome = resolver.resolve(&request).await;
                    let _ = tx.send((ticket, request, outcome));
                });
            }
        }
        Ok(())
    }

    async fn finish(
        &mut self,
        ticket: Ticket,
        request: ConversionRequest,
        outcome: Result<ConversionResult, ConversionError>,
    ) -> Result<()> {
        if !self.tracker.is_current(ticket) {
            debug!(?request, "Discarding superseded conversion result");
            return Ok(());
        }

        match self.converter.complete(request, outcome).await {
            Ok(conversion) => writeln!(self.out, "{}", conversion.display_as_text())?,
            Err(e) => writeln!(self.out, "{}", convert::display_error(&e))?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amounts() {
        assert_eq!(
            parse_command("250").unwrap(),
            Some(Command::Amount("250".to_string()))
        );
        assert_eq!(
            parse_command(" .5 ").unwrap(),
            Some(Command::Amount(".5".to_string()))
        );
        assert_eq!(
            parse_command("-3").unwrap(),
            Some(Command::Amount("-3".to_string()))
        );
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("from eur").unwrap(),
            Some(Command::From("EUR".parse().unwrap()))
        );
        assert_eq!(
            parse_command("TO gbp").unwrap(),
            Some(Command::To("GBP".parse().unwrap()))
        );
        assert_eq!(parse_command("quick 3").unwrap(), Some(Command::Quick(3)));
        assert_eq!(parse_command("swap").unwrap(), Some(Command::Swap));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("history").unwrap(), Some(Command::History));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("from").is_err());
        assert!(parse_command("from dollars").is_err());
        assert!(parse_command("quick x").is_err());
        assert!(parse_command("swap now").is_err());
        assert!(parse_command("hello").is_err());
    }
}
