use super::ui;
use crate::core::converter::Prepared;
use crate::core::format::format_number;
use crate::core::{
    Conversion, ConversionError, ConversionInput, ConversionStatus, Converter, RateSource,
};
use anyhow::Result;

impl Conversion {
    /// Result line followed by a status line describing where the rate came from.
    pub fn display_as_text(&self) -> String {
        let request = &self.request;
        let line = format!(
            "{} {} = {} {}",
            format_number(request.amount),
            request.from,
            format_number(self.result.converted_amount),
            request.to
        );

        match self.source {
            RateSource::Live => format!(
                "{}\n{}",
                ui::style_text(&line, ui::StyleType::Result),
                ui::style_text(
                    &format!(
                        "Updated just now · 1 {} = {} {}",
                        request.from,
                        format_number(self.result.raw_rate),
                        request.to
                    ),
                    ui::StyleType::Subtle
                )
            ),
            RateSource::Fallback => format!(
                "{} (Demo Rate)\n{}\n{}",
                ui::style_text(&line, ui::StyleType::Result),
                ui::style_text("Demo data", ui::StyleType::Subtle),
                ui::style_text(
                    "Live rates unavailable, using demo exchange rates",
                    ui::StyleType::Notice
                )
            ),
            RateSource::SameCurrency => format!(
                "{}\n{}",
                ui::style_text(&line, ui::StyleType::Result),
                ui::style_text("Same currency", ui::StyleType::Subtle)
            ),
        }
    }
}

impl ConversionStatus {
    /// Progress text while a conversion is in this state.
    pub fn progress_message(self) -> Option<&'static str> {
        match self {
            ConversionStatus::Loading => Some("Fetching exchange rate..."),
            ConversionStatus::Idle | ConversionStatus::Success | ConversionStatus::Error => None,
        }
    }
}

pub fn display_error(error: &ConversionError) -> String {
    let message = match error {
        ConversionError::RateUnavailable(pair) => {
            format!("Exchange rate not available for this currency pair ({pair}).")
        }
        other => other.to_string(),
    };
    ui::style_text(&message, ui::StyleType::Error)
}

/// Converts once, with a spinner while the rate loads. A failed conversion is
/// returned to the caller, which reports it.
pub async fn convert(converter: &mut Converter, input: &ConversionInput) -> Result<Conversion> {
    let conversion = match converter.prepare(input) {
        Prepared::Ready(conversion) => conversion,
        Prepared::Pending(request) => {
            let pb = converter.status().progress_message().map(ui::new_spinner);
            let outcome = converter.resolver().resolve(&request).await;
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            converter.complete(request, outcome).await?
        }
    };
    Ok(conversion)
}

pub async fn run(converter: &mut Converter, input: ConversionInput) -> Result<()> {
    let conversion = convert(converter, &input).await?;
    println!("{}", conversion.display_as_text());
    Ok(())
}
