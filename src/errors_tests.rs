//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::KbRagError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = KbRagError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_config_error() {
        let error = KbRagError::ConfigError("port must not be 0".to_string());
        assert!(matches!(error, KbRagError::ConfigError(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    #[test]
    fn test_detail_errors_display_bare_message() {
        // These messages are returned to API clients verbatim
        let error = KbRagError::InvalidInput("URL must start with http:// or https://".into());
        assert_eq!(error.to_string(), "URL must start with http:// or https://");

        let error = KbRagError::EmptyKnowledgeBase("Knowledge base is empty.".into());
        assert_eq!(error.to_string(), "Knowledge base is empty.");
    }

    #[test]
    fn test_embedding_error() {
        let error = KbRagError::EmbeddingError("Generation failed".to_string());
        assert!(error.to_string().starts_with("Embedding error"));
    }

    // ====== Classification Tests ======

    #[test]
    fn test_client_errors() {
        assert!(KbRagError::Fetch("Failed to fetch URL: timeout".into()).is_client_error());
        assert!(KbRagError::InvalidInput("No text found at URL".into()).is_client_error());
        assert!(KbRagError::EmptyKnowledgeBase("empty".into()).is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!KbRagError::EmbeddingError("down".into()).is_client_error());
        assert!(!KbRagError::HttpError("reset".into()).is_client_error());
        assert!(!KbRagError::Io(io::Error::new(io::ErrorKind::Other, "disk")).is_client_error());
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: KbRagError = io_err.into();

        match err {
            KbRagError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        let err: KbRagError = parse_result.unwrap_err().into();
        assert!(matches!(err, KbRagError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_result: Result<toml::Value, _> = toml::from_str("port = = 1");
        let err: KbRagError = parse_result.unwrap_err().into();
        assert!(matches!(err, KbRagError::TomlParsing(_)));
    }

    // ====== Result Type Tests ======

    #[test]
    fn test_result_and_then() {
        let result: crate::Result<i32> = Ok(42);
        let chained = result.and_then(|v| {
            if v > 40 {
                Ok(v + 10)
            } else {
                Err(KbRagError::Custom("Too small".to_string()))
            }
        });
        assert_eq!(chained.unwrap(), 52);
    }
}
