use thiserror::Error;

/// Failure talking to the metadata API. Every variant is recoverable:
/// callers treat it as "no result" for the item at hand.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Network failure or non-2xx response
    #[error("{context} failed: {reason}")]
    UpstreamUnavailable { context: String, reason: String },

    /// Response body did not have the expected shape
    #[error("{context} returned an unexpected payload: {reason}")]
    MalformedPayload { context: String, reason: String },

    #[error("no TMDB API key configured (run `marquee config api-key` or set MARQUEE_TMDB_API_KEY)")]
    MissingApiKey,
}

impl MetadataError {
    pub fn upstream(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::UpstreamUnavailable {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedPayload {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetadataError::upstream("search 'Heat'", "404 Not Found");
        assert_eq!(err.to_string(), "search 'Heat' failed: 404 Not Found");
        assert!(!err.is_malformed());

        let err = MetadataError::malformed("movie 949", "missing field `id`");
        assert!(err.is_malformed());
    }
}
