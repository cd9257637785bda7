//! Content fetching from URLs, files, and stdin.
//!
//! URL fetching needs the `fetch` feature. [`HttpSource`] wraps it in a
//! current-thread tokio runtime so the pipeline can stay synchronous and
//! process one page at a time.

use std::fs;
use std::path::PathBuf;

use crate::{MetricsError, Result};

#[cfg(feature = "fetch")]
pub use http::{FetchConfig, HttpSource, fetch_url};

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    use crate::extract::article_text;
    use crate::pipeline::TextSource;
    use crate::{MetricsError, Result};

    /// HTTP client configuration for fetching web pages.
    #[derive(Debug, Clone)]
    pub struct FetchConfig {
        /// Request timeout in seconds.
        pub timeout: u64,
        /// Custom User-Agent string.
        pub user_agent: String,
    }

    impl Default for FetchConfig {
        fn default() -> Self {
            Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; textmetrics/0.1)".to_string() }
        }
    }

    /// Fetches HTML content from a URL.
    ///
    /// Follows redirects and respects the configured timeout. Non-success
    /// status codes are errors rather than scored error pages, so a 4xx or
    /// 5xx response gives the record a null row.
    pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| MetricsError::InvalidUrl(format!("{url}: {e}")))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(MetricsError::InvalidUrl(format!("{url}: scheme must be http or https")));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(MetricsError::HttpError)?;

        let response = client
            .get(parsed_url)
            .header("User-Agent", &config.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MetricsError::Timeout { timeout: config.timeout }
                } else {
                    MetricsError::HttpError(e)
                }
            })?
            .error_for_status()?;

        let content = response.text().await?;

        Ok(content)
    }

    /// Fetches pages over HTTP and extracts their article text.
    pub struct HttpSource {
        runtime: tokio::runtime::Runtime,
        config: FetchConfig,
    }

    impl HttpSource {
        pub fn new(config: FetchConfig) -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            Ok(Self { runtime, config })
        }

        /// Fetches the raw HTML of a page.
        pub fn fetch_html(&self, url: &str) -> Result<String> {
            self.runtime.block_on(fetch_url(url, &self.config))
        }
    }

    impl TextSource for HttpSource {
        fn article_text(&self, url: &str) -> Result<String> {
            let html = self.fetch_html(url)?;
            article_text(&html)
        }
    }
}

/// Reads content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(MetricsError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(MetricsError::from)
    }
}

/// Reads content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(MetricsError::from)?;

    Ok(buffer)
}
