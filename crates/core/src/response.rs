use serde_json::Value;
use thiserror::Error;

pub const NO_RESULTS_NOTICE: &str = "No results found.";
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected response format.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error or unable to connect to server.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub cells: Vec<String>,
}

impl ResultRow {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Results(ResultSet),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseFormatError {
    #[error("response body is not valid JSON: {0}")]
    MalformedJson(String),
}

pub fn interpret_response(response: &RawResponse) -> Result<QueryOutcome, ResponseFormatError> {
    let document: Value = serde_json::from_str(&response.body)
        .map_err(|source| ResponseFormatError::MalformedJson(source.to_string()))?;

    if !is_success_status(response.status) {
        let message = error_field(&document).unwrap_or_else(|| {
            format!("Error: {} {}", response.status, response.status_text)
        });
        return Ok(QueryOutcome::Failure(message));
    }

    match parse_result_set(&document) {
        Some(result_set) => Ok(QueryOutcome::Results(result_set)),
        None => {
            let message =
                error_field(&document).unwrap_or_else(|| UNEXPECTED_FORMAT_MESSAGE.to_string());
            Ok(QueryOutcome::Failure(message))
        }
    }
}

#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

#[must_use]
pub fn cell_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn error_field(document: &Value) -> Option<String> {
    document
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_result_set(document: &Value) -> Option<ResultSet> {
    let columns = document
        .get("columns")?
        .as_array()?
        .iter()
        .map(|column| column.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    let rows = document
        .get("rows")?
        .as_array()?
        .iter()
        .map(|row| {
            let cells = row.as_array()?.iter().map(cell_display).collect();
            Some(ResultRow::new(cells))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(ResultSet { columns, rows })
}
