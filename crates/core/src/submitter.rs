use async_trait::async_trait;
use thiserror::Error;

use crate::diagnostics::{unix_timestamp_millis, DiagnosticRecord, FileDiagnosticsLog};
use crate::response::{interpret_response, QueryOutcome, RawResponse, NETWORK_ERROR_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait QueryTransport {
    async fn fetch(&self, query_text: &str) -> Result<RawResponse, TransportError>;
}

#[derive(Debug)]
pub struct QuerySubmitter<T: QueryTransport> {
    transport: T,
    diagnostics: Option<FileDiagnosticsLog>,
}

impl<T: QueryTransport> QuerySubmitter<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, log: FileDiagnosticsLog) -> Self {
        self.diagnostics = Some(log);
        self
    }

    pub async fn submit(&self, query_text: &str) -> QueryOutcome {
        match self.transport.fetch(query_text).await {
            Ok(response) => match interpret_response(&response) {
                Ok(outcome) => outcome,
                Err(error) => self.report_exception(query_text, &error.to_string()),
            },
            Err(error) => self.report_exception(query_text, &error.to_string()),
        }
    }

    fn report_exception(&self, query_text: &str, detail: &str) -> QueryOutcome {
        if let Some(log) = &self.diagnostics {
            let record = DiagnosticRecord {
                timestamp_unix_ms: unix_timestamp_millis(),
                query_text: query_text.to_string(),
                detail: detail.to_string(),
            };
            // A submission must settle even when the diagnostics file is unwritable.
            let _ = log.append(&record);
        }
        QueryOutcome::Failure(NETWORK_ERROR_MESSAGE.to_string())
    }
}
