use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::constants::DEFAULT_STATUS_CODE;
use crate::mock::schema::TypeSchema;

/// Mock configuration of one operation: its responses keyed by normalized
/// status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MockParameters {
    pub responses: IndexMap<i32, MockResponse>,
}

impl MockParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the response to serve.
    ///
    /// An exact match on `status_code` wins, then the `default` response.
    /// Without a requested code, the lowest 2xx response is preferred, then
    /// whatever was declared first.
    #[must_use]
    pub fn find_response(&self, status_code: Option<i32>) -> Option<&MockResponse> {
        if let Some(code) = status_code {
            return self
                .responses
                .get(&code)
                .or_else(|| self.responses.get(&DEFAULT_STATUS_CODE));
        }

        self.responses
            .iter()
            .filter(|(code, _)| (200..300).contains(*code))
            .min_by_key(|(code, _)| **code)
            .map(|(_, response)| response)
            .or_else(|| self.responses.get(&DEFAULT_STATUS_CODE))
            .or_else(|| self.responses.values().next())
    }
}

/// One configured response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    /// Concrete status code, [`DEFAULT_STATUS_CODE`] for the `default` entry.
    pub status_code: i32,
    pub description: Option<String>,
    pub content: IndexMap<String, MediaDefinition>,
    pub headers: IndexMap<String, MockHeader>,
}

impl MockResponse {
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.status_code == DEFAULT_STATUS_CODE
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status_code: DEFAULT_STATUS_CODE,
            description: None,
            content: IndexMap::new(),
            headers: IndexMap::new(),
        }
    }
}

/// Body description for one media type of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaDefinition {
    pub schema: Option<TypeSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MockHeader {
    pub required: bool,
    pub schema: Option<TypeSchema>,
}
