use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::constants;
use crate::mock::parameters::MockParameters;
use crate::mock::schema::TypeSchema;
use crate::spec::pointer::SpecificationPointer;

/// Where a request parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        match location {
            constants::PARAM_LOCATION_PATH => Some(Self::Path),
            constants::PARAM_LOCATION_QUERY => Some(Self::Query),
            constants::PARAM_LOCATION_HEADER => Some(Self::Header),
            constants::PARAM_LOCATION_COOKIE => Some(Self::Cookie),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => constants::PARAM_LOCATION_PATH,
            Self::Query => constants::PARAM_LOCATION_QUERY,
            Self::Header => constants::PARAM_LOCATION_HEADER,
            Self::Cookie => constants::PARAM_LOCATION_COOKIE,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request parameter declared by an operation or its path item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockParameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<TypeSchema>,
}

/// Matches request paths against a templated `OpenAPI` path.
///
/// `/pets/{petId}` compiles to `^/pets/(?P<petId>[^/]+)$`. Template names
/// that are not valid capture-group names, or that repeat, get a generated
/// group name; [`captures`](Self::captures) still reports the name written
/// in the template.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    regex: Regex,
    /// Capture group name and template name, per template segment.
    parameters: Vec<(String, String)>,
}

impl UrlMatcher {
    /// Compiles the matcher for `path`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the generated pattern does not compile.
    pub fn new(path: &str) -> Result<Self, regex::Error> {
        let mut pattern = String::from("^");
        let mut parameters: Vec<(String, String)> = Vec::new();
        let mut rest = path;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
                break;
            };
            pattern.push_str(&regex::escape(&rest[..open]));

            let name = &rest[open + 1..close];
            let group = unique_group_name(name, &parameters);
            pattern.push_str(&format!("(?P<{group}>[^/]+)"));
            parameters.push((group, name.to_string()));
            rest = &rest[close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        Ok(Self {
            regex: Regex::new(&pattern)?,
            parameters,
        })
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Number of templated segments.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.parameters.len()
    }

    /// Values of the path parameters in `path`, if it matches, keyed by the
    /// names used in the template.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.parameters
                .iter()
                .filter_map(|(group, name)| {
                    captures
                        .name(group)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for UrlMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for UrlMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A capture-group name for template `name` not yet used in `taken`.
fn unique_group_name(name: &str, taken: &[(String, String)]) -> String {
    let mut base: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if !base.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        base.insert(0, '_');
    }

    let is_taken = |candidate: &str| taken.iter().any(|(group, _)| group == candidate);
    if !is_taken(&base) {
        return base;
    }
    (2..)
        .map(|suffix| format!("{base}_{suffix}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}

/// One path/method pair of the document with everything needed to answer it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockEndpoint {
    pub path: String,
    /// Upper-case HTTP method.
    pub http_method: String,
    pub parameters: MockParameters,
    pub request_parameters: Vec<MockParameter>,
    pub url_matcher: UrlMatcher,
}

impl MockEndpoint {
    /// Targets of the recursive schema references anywhere in this endpoint.
    #[must_use]
    pub fn schema_references(&self) -> Vec<&SpecificationPointer> {
        let mut found = Vec::new();
        for response in self.parameters.responses.values() {
            for media in response.content.values() {
                if let Some(schema) = &media.schema {
                    schema.collect_references(&mut found);
                }
            }
            for header in response.headers.values() {
                if let Some(schema) = &header.schema {
                    schema.collect_references(&mut found);
                }
            }
        }
        for parameter in &self.request_parameters {
            if let Some(schema) = &parameter.schema {
                schema.collect_references(&mut found);
            }
        }
        found
    }
}

/// Every endpoint of a parsed document, in document order, together with
/// the expansions of recursively referenced schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MockEndpointCollection {
    endpoints: Vec<MockEndpoint>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    schemas: IndexMap<SpecificationPointer, TypeSchema>,
}

impl MockEndpointCollection {
    #[must_use]
    pub fn new(endpoints: Vec<MockEndpoint>) -> Self {
        Self {
            endpoints,
            schemas: IndexMap::new(),
        }
    }

    /// Attaches the expansions that [`TypeSchema::Reference`] leaves point to.
    #[must_use]
    pub fn with_schemas(mut self, schemas: IndexMap<SpecificationPointer, TypeSchema>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Endpoint serving `method` on `path`.
    ///
    /// Among the matching endpoints the one with the fewest templated
    /// segments wins, so `/pets/mine` is preferred over `/pets/{id}`. Ties go
    /// to the endpoint declared first.
    #[must_use]
    pub fn find(&self, method: &str, path: &str) -> Option<&MockEndpoint> {
        self.endpoints
            .iter()
            .filter(|endpoint| {
                endpoint.http_method.eq_ignore_ascii_case(method)
                    && endpoint.url_matcher.is_match(path)
            })
            .min_by_key(|endpoint| endpoint.url_matcher.template_count())
    }

    /// The expanded schema a [`TypeSchema::Reference`] leaf points to.
    #[must_use]
    pub fn resolve_schema(&self, target: &SpecificationPointer) -> Option<&TypeSchema> {
        self.schemas.get(target)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MockEndpoint> {
        self.endpoints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a MockEndpointCollection {
    type Item = &'a MockEndpoint;
    type IntoIter = std::slice::Iter<'a, MockEndpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}
