use crate::constants;
use crate::error::ParsingError;
use crate::mock::{MockParameters, MockResponse};
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::contextual::ContextualParser;
use crate::spec::pointer::SpecificationPointer;
use crate::spec::reference::ReferenceResolvingParser;

/// Parses the `responses` map of one operation into [`MockParameters`].
#[derive(Debug, Clone)]
pub struct EndpointParser<R> {
    response_parser: ReferenceResolvingParser<R>,
}

impl<R> EndpointParser<R>
where
    R: ContextualParser<Output = MockResponse>,
{
    /// Every response goes through reference resolution before `response_parser`
    /// sees it.
    #[must_use]
    pub const fn new(response_parser: R) -> Self {
        Self {
            response_parser: ReferenceResolvingParser::new(response_parser),
        }
    }
}

impl<R> ContextualParser for EndpointParser<R>
where
    R: ContextualParser<Output = MockResponse>,
{
    type Output = MockParameters;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let mut mock_parameters = MockParameters::new();
        let schema = specification.get_object(pointer)?;

        let Some(responses) = schema.get(constants::FIELD_RESPONSES) else {
            return Ok(mock_parameters);
        };

        let responses_pointer = pointer.with_path_element(constants::FIELD_RESPONSES);
        let responses = responses.as_object().ok_or_else(|| {
            ParsingError::invalid_value(
                "Responses must be a mapping of status codes to responses",
                responses_pointer.clone(),
            )
        })?;

        for (status_code, response_specification) in responses {
            let response_pointer = responses_pointer.with_path_element(status_code);

            let parsed_status_code = parse_status_code(status_code)
                .ok_or_else(|| ParsingError::invalid_status_code(response_pointer.clone()))?;
            if !response_specification.is_object() && !response_specification.is_array() {
                return Err(ParsingError::invalid_response_specification(response_pointer));
            }

            let mut response = self
                .response_parser
                .parse_pointed_schema(specification, &response_pointer)?;
            response.status_code = parsed_status_code;
            mock_parameters.responses.insert(parsed_status_code, response);
        }

        Ok(mock_parameters)
    }
}

/// Normalizes a status-code token.
///
/// Integer-like tokens (ASCII digits only) convert directly; `default` maps
/// to [`constants::DEFAULT_STATUS_CODE`]. Anything else is `None`.
#[must_use]
pub fn parse_status_code(token: &str) -> Option<i32> {
    if token == constants::DEFAULT_STATUS_TOKEN {
        return Some(constants::DEFAULT_STATUS_CODE);
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
