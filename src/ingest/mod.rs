//! Web page ingestion: URL validation, fetching and HTML text extraction

pub mod fetcher;
pub mod html;

pub use fetcher::PageFetcher;
pub use fetcher::EXAMPLE_DOMAIN_TEXT;
pub use html::html_to_text;

use crate::errors::KbRagError;
use crate::errors::Result;

/// Trim the URL and check it is an http(s) URL
pub fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(KbRagError::InvalidInput(
            "URL must start with http:// or https://".to_string(),
        ));
    }
    url::Url::parse(url).map_err(|e| KbRagError::InvalidInput(format!("Invalid URL: {e}")))?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(
            validate_url("  https://burningman.org/culture/ ").unwrap(),
            "https://burningman.org/culture/"
        );
        assert!(validate_url("http://localhost:8000").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        for bad in ["ftp://example.com", "example.com", "", "javascript:alert(1)"] {
            match validate_url(bad) {
                Err(KbRagError::InvalidInput(msg)) => {
                    assert_eq!(msg, "URL must start with http:// or https://");
                }
                other => panic!("expected invalid input for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_url_rejects_malformed() {
        assert!(matches!(
            validate_url("http://"),
            Err(KbRagError::InvalidInput(_))
        ));
    }
}
