//! `$ref` resolution in front of any [`ContextualParser`].
//!
//! Any object kind can be replaced by a reference, so resolution lives here
//! once and wraps whichever parser fits the target, instead of being repeated
//! in every parser.

use serde_json::Value;
use std::collections::HashSet;

use crate::constants;
use crate::error::ParsingError;
use crate::spec::accessor::{kind_name, SpecificationAccessor};
use crate::spec::contextual::ContextualParser;
use crate::spec::pointer::SpecificationPointer;

/// Decorator that follows `$ref` chains before handing the resolved pointer
/// to the wrapped parser.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolvingParser<P> {
    inner: P,
}

impl<P> ReferenceResolvingParser<P> {
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: ContextualParser> ContextualParser for ReferenceResolvingParser<P> {
    type Output = P::Output;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        resolve_reference_and_parse_pointed_schema(specification, pointer, &self.inner)
    }

    fn parse_recursive_reference(
        &self,
        target: &SpecificationPointer,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        self.inner.parse_recursive_reference(target, pointer)
    }
}

/// Resolves `pointer` and parses the target with `parser`.
///
/// When at least one reference was followed, the target stays marked as in
/// progress on the accessor while `parser` runs. A nested reference back to a
/// target that is still in progress is handed to
/// [`ContextualParser::parse_recursive_reference`] instead of being expanded
/// again.
///
/// # Errors
///
/// Returns an error for cyclic `$ref` chains and unresolvable references, and
/// passes on whatever `parser` returns.
pub fn resolve_reference_and_parse_pointed_schema<P>(
    specification: &SpecificationAccessor<'_>,
    pointer: &SpecificationPointer,
    parser: &P,
) -> Result<P::Output, ParsingError>
where
    P: ContextualParser + ?Sized,
{
    let resolved = resolve_reference(specification, pointer)?;
    if resolved == *pointer {
        return parser.parse_pointed_schema(specification, &resolved);
    }

    let Some(_guard) = specification.enter_reference(&resolved) else {
        return parser.parse_recursive_reference(&resolved, pointer);
    };
    parser.parse_pointed_schema(specification, &resolved)
}

/// Follows the `$ref` chain starting at `pointer` and returns the pointer of
/// the first node that is not a reference.
///
/// # Errors
///
/// - the chain revisits a pointer (reported at the original `pointer`)
/// - a `$ref` value is not a local reference string
/// - a reference target does not exist
pub fn resolve_reference(
    specification: &SpecificationAccessor<'_>,
    pointer: &SpecificationPointer,
) -> Result<SpecificationPointer, ParsingError> {
    let mut visited = HashSet::new();
    visited.insert(pointer.clone());

    let mut current = pointer.clone();
    let mut node = specification.get_schema(&current)?;

    while let Some(reference) = reference_of(node) {
        let target = parse_reference(reference, &current)?;
        if !visited.insert(target.clone()) {
            return Err(ParsingError::cyclic_reference(&target, pointer.clone()));
        }

        node = specification.get_schema(&target).map_err(|err| {
            ParsingError::unresolvable_reference(
                format!("Unresolvable reference '{target}': {err}"),
                current.clone(),
            )
        })?;
        current = target;
    }

    Ok(current)
}

/// Whether `node` is a reference node.
#[must_use]
pub fn is_reference(node: &Value) -> bool {
    reference_of(node).is_some()
}

fn reference_of(node: &Value) -> Option<&Value> {
    node.as_object()?.get(constants::REFERENCE_KEY)
}

fn parse_reference(
    reference: &Value,
    holder: &SpecificationPointer,
) -> Result<SpecificationPointer, ParsingError> {
    let holder_ref = || holder.with_path_element(constants::REFERENCE_KEY);

    let text = reference.as_str().ok_or_else(|| {
        ParsingError::unresolvable_reference(
            format!("Reference must be a string, found {}", kind_name(reference)),
            holder_ref(),
        )
    })?;

    SpecificationPointer::from_reference(text)
        .map_err(|err| ParsingError::unresolvable_reference(err.to_string(), holder_ref()))
}
