//! Currency to country mapping for flag images.

use crate::core::currency::CurrencyCode;

// Sorted by currency code for binary search.
const CURRENCY_COUNTRIES: &[(&str, &str)] = &[
    ("AED", "AE"),
    ("ARS", "AR"),
    ("AUD", "AU"),
    ("BDT", "BD"),
    ("BRL", "BR"),
    ("CAD", "CA"),
    ("CHF", "CH"),
    ("CLP", "CL"),
    ("CNY", "CN"),
    ("COP", "CO"),
    ("CZK", "CZ"),
    ("DKK", "DK"),
    ("EGP", "EG"),
    ("EUR", "FR"),
    ("GBP", "GB"),
    ("HKD", "HK"),
    ("HUF", "HU"),
    ("IDR", "ID"),
    ("ILS", "IL"),
    ("INR", "IN"),
    ("JPY", "JP"),
    ("KES", "KE"),
    ("KRW", "KR"),
    ("LKR", "LK"),
    ("MXN", "MX"),
    ("MYR", "MY"),
    ("NGN", "NG"),
    ("NOK", "NO"),
    ("NPR", "NP"),
    ("NZD", "NZ"),
    ("PHP", "PH"),
    ("PKR", "PK"),
    ("PLN", "PL"),
    ("RUB", "RU"),
    ("SAR", "SA"),
    ("SEK", "SE"),
    ("SGD", "SG"),
    ("THB", "TH"),
    ("TRY", "TR"),
    ("TWD", "TW"),
    ("UAH", "UA"),
    ("USD", "US"),
    ("VND", "VN"),
    ("ZAR", "ZA"),
];

/// Country whose flag represents `currency`.
pub fn country_for(currency: &CurrencyCode) -> Option<&'static str> {
    CURRENCY_COUNTRIES
        .binary_search_by(|(code, _)| (*code).cmp(currency.as_str()))
        .ok()
        .map(|i| CURRENCY_COUNTRIES[i].1)
}

pub fn flag_url(base_url: &str, country: &str) -> String {
    format!("{}/{}/flat/64.png", base_url.trim_end_matches('/'), country)
}

/// 32x24 grey placeholder labelled with the currency code.
pub fn placeholder_svg(currency: &CurrencyCode) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="24" viewBox="0 0 32 24">"#,
            r##"<rect width="32" height="24" fill="#f0f0f0"/>"##,
            r##"<text x="16" y="14" text-anchor="middle" font-size="8" fill="#666">{}</text>"##,
            "</svg>"
        ),
        currency
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_country_lookup() {
        assert_eq!(country_for(&code("USD")), Some("US"));
        assert_eq!(country_for(&code("INR")), Some("IN"));
        assert_eq!(country_for(&code("EUR")), Some("FR"));
        assert_eq!(country_for(&code("XYZ")), None);
    }

    #[test]
    fn test_table_is_sorted_and_covers_demo_currencies() {
        let codes: Vec<&str> = CURRENCY_COUNTRIES.iter().map(|(code, _)| *code).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
        for demo in ["USD", "INR", "EUR", "GBP", "JPY", "AUD", "CAD"] {
            assert!(codes.contains(&demo), "{demo} missing");
        }
    }

    #[test]
    fn test_flag_url() {
        assert_eq!(
            flag_url("https://flagsapi.com/", "IN"),
            "https://flagsapi.com/IN/flat/64.png"
        );
    }

    #[test]
    fn test_placeholder_is_labelled() {
        let svg = placeholder_svg(&code("XYZ"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="32" height="24""#));
        assert!(svg.contains(">XYZ</text>"));
        assert!(svg.ends_with("</svg>"));
    }
}
