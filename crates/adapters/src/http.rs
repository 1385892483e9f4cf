use async_trait::async_trait;
use drill_core::response::RawResponse;
use drill_core::submitter::{QueryTransport, TransportError};

#[derive(Debug, Clone)]
pub struct HttpQueryTransport {
    agent: ureq::Agent,
    query_url: String,
}

impl HttpQueryTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::Agent::new(),
            query_url: query_endpoint_url(base_url),
        }
    }

    #[must_use]
    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

#[must_use]
pub fn query_endpoint_url(base_url: &str) -> String {
    format!("{}/query", base_url.trim_end_matches('/'))
}

fn fetch_blocking(
    agent: &ureq::Agent,
    query_url: &str,
    query_text: &str,
) -> Result<RawResponse, TransportError> {
    let request = agent.get(query_url).query("text", query_text);
    match request.call() {
        Ok(response) => read_response(response),
        // Non-2xx responses still carry the body the caller must interpret.
        Err(ureq::Error::Status(_, response)) => read_response(response),
        Err(ureq::Error::Transport(transport)) => Err(TransportError::new(transport.to_string())),
    }
}

fn read_response(response: ureq::Response) -> Result<RawResponse, TransportError> {
    let status = response.status();
    let status_text = response.status_text().to_string();
    let body = response
        .into_string()
        .map_err(|source| TransportError::new(source.to_string()))?;
    Ok(RawResponse {
        status,
        status_text,
        body,
    })
}

#[async_trait]
impl QueryTransport for HttpQueryTransport {
    async fn fetch(&self, query_text: &str) -> Result<RawResponse, TransportError> {
        let agent = self.agent.clone();
        let query_url = self.query_url.clone();
        let query_text = query_text.to_string();
        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &query_url, &query_text))
            .await
            .map_err(|source| TransportError::new(source.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::{query_endpoint_url, HttpQueryTransport};

    #[test]
    fn query_url_appends_the_query_path() {
        assert_eq!(
            query_endpoint_url("http://127.0.0.1:5000"),
            "http://127.0.0.1:5000/query"
        );
    }

    #[test]
    fn query_url_tolerates_a_trailing_slash() {
        assert_eq!(
            query_endpoint_url("http://127.0.0.1:5000/"),
            "http://127.0.0.1:5000/query"
        );
    }

    #[test]
    fn transport_exposes_its_resolved_url() {
        let transport = HttpQueryTransport::new("http://example.test:9999/");
        assert_eq!(transport.query_url(), "http://example.test:9999/query");
    }
}
