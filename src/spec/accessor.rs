//! Read-only access to a decoded specification document.

use serde_json::{Map, Value};
use std::cell::RefCell;

use crate::error::ParsingError;
use crate::spec::pointer::{PathSegment, SpecificationPointer};

/// A read-only view over a decoded specification document.
///
/// Besides path lookups, the accessor remembers which reference targets are
/// being parsed right now, so a schema that reaches itself again through
/// nested fields is not expanded forever; see
/// [`enter_reference`](Self::enter_reference).
#[derive(Debug)]
pub struct SpecificationAccessor<'a> {
    document: &'a Value,
    active_references: RefCell<Vec<SpecificationPointer>>,
}

impl<'a> SpecificationAccessor<'a> {
    #[must_use]
    pub const fn new(document: &'a Value) -> Self {
        Self {
            document,
            active_references: RefCell::new(Vec::new()),
        }
    }

    /// The whole document.
    #[must_use]
    pub const fn document(&self) -> &'a Value {
        self.document
    }

    /// Returns the node at `pointer`, whatever its kind.
    ///
    /// # Errors
    ///
    /// Fails at the first step that cannot be taken: the error's pointer is
    /// the node that could not be traversed, not the full requested pointer.
    pub fn get_value(&self, pointer: &SpecificationPointer) -> Result<&'a Value, ParsingError> {
        let mut current = self.document;

        for (depth, segment) in pointer.segments().iter().enumerate() {
            let parent = current;
            let next = match parent {
                Value::Object(map) => map.get(&segment.as_key()),
                Value::Array(items) => segment.as_index().and_then(|index| items.get(index)),
                _ => {
                    return Err(ParsingError::structural_access(
                        format!("Cannot traverse into {} with '{segment}'", kind_name(parent)),
                        pointer.prefix(depth),
                    ));
                }
            };

            current = next.ok_or_else(|| {
                ParsingError::structural_access(
                    missing_segment_message(parent, segment),
                    pointer.prefix(depth),
                )
            })?;
        }

        Ok(current)
    }

    /// Returns the structured node (mapping or sequence) at `pointer`.
    ///
    /// # Errors
    ///
    /// Fails like [`get_value`](Self::get_value), and additionally when the
    /// node is a scalar.
    pub fn get_schema(&self, pointer: &SpecificationPointer) -> Result<&'a Value, ParsingError> {
        let value = self.get_value(pointer)?;
        if value.is_object() || value.is_array() {
            Ok(value)
        } else {
            Err(ParsingError::structural_access(
                format!("Expected a mapping or a sequence, found {}", kind_name(value)),
                pointer.clone(),
            ))
        }
    }

    /// Returns the mapping at `pointer`.
    ///
    /// # Errors
    ///
    /// Fails like [`get_value`](Self::get_value), and additionally when the
    /// node is not a mapping.
    pub fn get_object(
        &self,
        pointer: &SpecificationPointer,
    ) -> Result<&'a Map<String, Value>, ParsingError> {
        let value = self.get_value(pointer)?;
        value.as_object().ok_or_else(|| {
            ParsingError::structural_access(
                format!("Expected a mapping, found {}", kind_name(value)),
                pointer.clone(),
            )
        })
    }

    /// Marks `target` as being parsed until the returned guard is dropped.
    ///
    /// Returns `None` when `target` is already being parsed further up the
    /// current descent.
    #[must_use]
    pub fn enter_reference(&self, target: &SpecificationPointer) -> Option<ReferenceGuard<'_>> {
        let mut active = self.active_references.borrow_mut();
        if active.contains(target) {
            return None;
        }
        active.push(target.clone());
        Some(ReferenceGuard {
            active: &self.active_references,
        })
    }
}

/// Keeps a reference target marked as in progress. See
/// [`SpecificationAccessor::enter_reference`].
#[derive(Debug)]
pub struct ReferenceGuard<'g> {
    active: &'g RefCell<Vec<SpecificationPointer>>,
}

impl Drop for ReferenceGuard<'_> {
    fn drop(&mut self) {
        self.active.borrow_mut().pop();
    }
}

/// Short name of a node's kind for diagnostics.
pub(crate) const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn missing_segment_message(parent: &Value, segment: &PathSegment) -> String {
    if parent.is_array() {
        format!("Index '{segment}' is out of bounds")
    } else {
        format!("Key '{}' not found", segment.as_key())
    }
}
