use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::core::currency::CurrencyCode;
use crate::core::flags;

/// A flag image, or the placeholder drawn when none could be fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagImage {
    Png { url: String, bytes: Vec<u8> },
    Placeholder { svg: String },
}

impl FlagImage {
    pub fn extension(&self) -> &'static str {
        match self {
            FlagImage::Png { .. } => "png",
            FlagImage::Placeholder { .. } => "svg",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            FlagImage::Png { bytes, .. } => bytes,
            FlagImage::Placeholder { svg } => svg.as_bytes(),
        }
    }
}

/// Fetches flag images by country code from a flagsapi.com style host.
pub struct FlagProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FlagProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("fxc/1.0").build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Fetches the flag for `currency`, substituting a placeholder on any failure.
    pub async fn fetch(&self, currency: &CurrencyCode) -> FlagImage {
        let Some(country) = flags::country_for(currency) else {
            debug!(%currency, "No country for currency, using placeholder");
            return FlagImage::Placeholder {
                svg: flags::placeholder_svg(currency),
            };
        };

        let url = flags::flag_url(&self.base_url, country);
        match self.fetch_png(&url).await {
            Ok(bytes) => FlagImage::Png { url, bytes },
            Err(e) => {
                warn!(error = %e, %currency, "Flag image failed to load, using placeholder");
                FlagImage::Placeholder {
                    svg: flags::placeholder_svg(currency),
                }
            }
        }
    }

    async fn fetch_png(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Requesting flag from {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for flag: {}", response.status(), url));
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(anyhow!("Empty flag image: {}", url));
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fetches_flag_by_country() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/IN/flat/64.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_MAGIC))
            .mount(&mock_server)
            .await;

        let provider = FlagProvider::new(&mock_server.uri()).unwrap();
        let image = provider.fetch(&code("INR")).await;

        assert_eq!(image.extension(), "png");
        assert_eq!(image.bytes(), PNG_MAGIC);
        match image {
            FlagImage::Png { url, .. } => assert!(url.ends_with("/IN/flat/64.png")),
            other => panic!("Expected png, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_uses_placeholder() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = FlagProvider::new(&mock_server.uri()).unwrap();
        let image = provider.fetch(&code("USD")).await;

        assert_eq!(image, FlagImage::Placeholder {
            svg: flags::placeholder_svg(&code("USD")),
        });
        assert_eq!(image.extension(), "svg");
    }

    #[tokio::test]
    async fn test_unknown_currency_skips_network() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_MAGIC))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = FlagProvider::new(&mock_server.uri()).unwrap();
        let image = provider.fetch(&code("XYZ")).await;
        assert!(matches!(image, FlagImage::Placeholder { .. }));
        assert!(String::from_utf8_lossy(image.bytes()).contains("XYZ"));
    }
}
