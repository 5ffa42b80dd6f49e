use super::ui;
use crate::core::currency::CurrencyCode;
use crate::providers::{FlagImage, FlagProvider};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Fetches the flag for `currency` and writes it to `output`, or to
/// `<CODE>.png` / `<CODE>.svg` in the current directory.
pub async fn run(
    provider: &FlagProvider,
    currency: &CurrencyCode,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let image = provider.fetch(currency).await;
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{currency}.{}", image.extension())));

    std::fs::write(&path, image.bytes())
        .with_context(|| format!("Failed to write flag to {}", path.display()))?;

    match &image {
        FlagImage::Png { url, .. } => {
            println!("Saved {currency} flag from {url} to {}", path.display())
        }
        FlagImage::Placeholder { .. } => println!(
            "{}",
            ui::style_text(
                &format!(
                    "Flag for {currency} unavailable, saved placeholder to {}",
                    path.display()
                ),
                ui::StyleType::Notice
            )
        ),
    }
    Ok(path)
}
