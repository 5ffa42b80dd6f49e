use super::ui;
use crate::core::currency::{CurrencyRateProvider, PairKey};
use crate::core::favorites::Favorites;
use crate::core::format::format_number;
use crate::core::Converter;
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;
use tracing::{debug, error};

pub struct FavoriteRate {
    pub pair: PairKey,
    pub rate: Option<f64>,
}

/// Fetches live rates for every favorite concurrently. Failed pairs have no rate.
pub async fn fetch_rates(
    favorites: &Favorites,
    provider: &dyn CurrencyRateProvider,
) -> Vec<FavoriteRate> {
    let futures = favorites.pairs().iter().map(|pair| async move {
        debug!(%pair, "Fetching rate for favorite pair");
        let rate = match provider.get_rate(pair.from.as_str(), pair.to.as_str()).await {
            Ok(rate) => Some(rate),
            Err(e) => {
                error!(error = %e, %pair, "Error loading favorite pair rate");
                None
            }
        };
        FavoriteRate {
            pair: pair.clone(),
            rate,
        }
    });
    join_all(futures).await
}

pub fn display_as_table(rates: &[FavoriteRate]) -> String {
    if rates.is_empty() {
        return ui::style_text("No favorite pairs yet", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Pair"), ui::header_cell("Rate")]);
    for favorite in rates {
        table.add_row(vec![
            Cell::new(format!("{}/{}", favorite.pair.from, favorite.pair.to)),
            favorite
                .rate
                .map_or_else(ui::na_cell, |r| ui::number_cell(format_number(r))),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Favorite pairs", ui::StyleType::Title),
        table
    )
}

pub async fn list(favorites: &Favorites, provider: &dyn CurrencyRateProvider) -> Result<()> {
    let pb = ui::new_spinner("Fetching favorite rates...");
    let rates = fetch_rates(favorites, provider).await;
    pb.finish_and_clear();

    println!("{}", display_as_table(&rates));
    Ok(())
}

pub async fn add(converter: &mut Converter, pair: PairKey) -> Result<()> {
    if converter.add_favorite(pair.clone()).await? {
        println!("Added {pair} to favorites");
    } else {
        println!("{pair} is already a favorite");
    }
    Ok(())
}

pub async fn remove(converter: &mut Converter, pair: PairKey) -> Result<()> {
    if converter.remove_favorite(&pair).await? {
        println!("Removed {pair} from favorites");
    } else {
        println!("{pair} is not a favorite");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::tests::StubRates;

    #[tokio::test]
    async fn test_fetch_rates_marks_failures() {
        let provider = StubRates::live(&[("USD-INR", 83.5)]);
        let favorites = Favorites::default(); // USD-INR, EUR-USD

        let rates = fetch_rates(&favorites, &provider).await;
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].pair.to_string(), "USD-INR");
        assert_eq!(rates[0].rate, Some(83.5));
        assert_eq!(rates[1].pair.to_string(), "EUR-USD");
        assert_eq!(rates[1].rate, None);

        let text = display_as_table(&rates);
        assert!(text.contains("USD/INR"));
        assert!(text.contains("83.50"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_no_favorites() {
        assert!(display_as_table(&[]).contains("No favorite pairs yet"));
    }
}
