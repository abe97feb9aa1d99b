//! Immutable locations inside a specification document.
//!
//! A [`SpecificationPointer`] is an ordered list of [`PathSegment`]s. It
//! renders as a JSON pointer fragment (`#/paths/~1users/get`), which is the
//! same vocabulary `$ref` values use, so a reference target can be turned
//! into a pointer with [`SpecificationPointer::from_reference`].

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants;

/// One step of a [`SpecificationPointer`].
///
/// Segments compare and hash by their textual form, so `Index(0)` and
/// `Key("0")` address the same node and are equal.
#[derive(Clone, Debug, Eq)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A sequence index.
    Index(usize),
}

impl PathSegment {
    /// Returns the sequence index addressed by this segment, if any.
    ///
    /// Key segments that consist solely of digits also address sequence
    /// elements, because segments parsed from a `$ref` carry no type.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => {
                if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                key.parse().ok()
            }
        }
    }

    /// Returns the mapping key addressed by this segment.
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Index(index) => index.to_string(),
        }
    }
}

impl PartialEq for PathSegment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Key(a), Self::Key(b)) => a == b,
            (Self::Index(a), Self::Index(b)) => a == b,
            (Self::Key(key), Self::Index(index)) | (Self::Index(index), Self::Key(key)) => {
                *key == index.to_string()
            }
        }
    }
}

impl Hash for PathSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Key(key) => key.as_str().hash(state),
            Self::Index(index) => index.to_string().as_str().hash(state),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(&escape_json_pointer_segment(key)),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Error returned when a `$ref` value is not a local JSON pointer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid reference {reference:?}: expected JSON pointer starting with #/")]
pub struct InvalidReference {
    /// The rejected reference text.
    pub reference: String,
}

/// An ordered, immutable path into a specification document.
///
/// Deriving a child with [`with_path_element`](Self::with_path_element)
/// always produces a new pointer; the receiver is never changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpecificationPointer {
    segments: Vec<PathSegment>,
}

impl SpecificationPointer {
    /// The pointer to the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Builds a pointer from a list of segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a local reference such as `#/components/responses/Ok`.
    ///
    /// `#` alone addresses the root. Segments are unescaped per RFC 6901.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReference`] for anything that is not a local pointer.
    pub fn from_reference(reference: &str) -> Result<Self, InvalidReference> {
        let invalid = || InvalidReference {
            reference: reference.to_string(),
        };

        let fragment = reference
            .strip_prefix(constants::REFERENCE_PREFIX)
            .ok_or_else(invalid)?;
        if fragment.is_empty() {
            return Ok(Self::root());
        }

        let path = fragment.strip_prefix('/').ok_or_else(invalid)?;
        let segments = path
            .split('/')
            .map(|segment| unescape_json_pointer_segment(segment).map(PathSegment::Key))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        Ok(Self { segments })
    }

    /// Returns a new pointer with `segment` appended.
    #[must_use]
    pub fn with_path_element(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// The segments of this pointer, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this pointer addresses the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The pointer made of the first `len` segments.
    #[must_use]
    pub(crate) fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

impl fmt::Display for SpecificationPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(constants::REFERENCE_PREFIX)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for SpecificationPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Escape a JSON pointer segment per RFC 6901.
///
/// `~` becomes `~0` and `/` becomes `~1`. The order matters: `~` must be
/// escaped first.
pub(crate) fn escape_json_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Reverse of [`escape_json_pointer_segment`]. Returns `None` for a dangling
/// or unknown escape.
fn unescape_json_pointer_segment(segment: &str) -> Option<String> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(ch);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_hash() {
        assert_eq!(SpecificationPointer::root().to_string(), "#");
    }

    #[test]
    fn test_with_path_element_does_not_mutate_receiver() {
        let base = SpecificationPointer::from_segments(["paths"]);
        let child = base.with_path_element("/users").with_path_element("get");

        assert_eq!(base.to_string(), "#/paths");
        assert_eq!(child.to_string(), "#/paths/~1users/get");
    }

    #[test]
    fn test_index_segments_render_as_numbers() {
        let pointer = SpecificationPointer::root()
            .with_path_element("parameters")
            .with_path_element(3usize);
        assert_eq!(pointer.to_string(), "#/parameters/3");
    }

    #[test]
    fn test_escape_tilde_before_slash() {
        assert_eq!(escape_json_pointer_segment("a~/b"), "a~0~1b");
    }

    #[test]
    fn test_from_reference_round_trips_escaped_segments() {
        let pointer =
            SpecificationPointer::from_reference("#/paths/~1users~1{id}/get").unwrap();
        assert_eq!(
            pointer.segments(),
            &[
                PathSegment::from("paths"),
                PathSegment::from("/users/{id}"),
                PathSegment::from("get"),
            ]
        );
        assert_eq!(pointer.to_string(), "#/paths/~1users~1{id}/get");
    }

    #[test]
    fn test_from_reference_root() {
        assert!(SpecificationPointer::from_reference("#").unwrap().is_root());
    }

    #[test]
    fn test_from_reference_rejects_external_documents() {
        let err = SpecificationPointer::from_reference("other.yaml#/components/schemas/A")
            .unwrap_err();
        assert_eq!(err.reference, "other.yaml#/components/schemas/A");
        assert!(SpecificationPointer::from_reference("#components").is_err());
        assert!(SpecificationPointer::from_reference("#/bad~2escape").is_err());
    }

    #[test]
    fn test_pointers_with_equal_segments_are_equal() {
        let parsed = SpecificationPointer::from_reference("#/components/responses/Ok").unwrap();
        let built = SpecificationPointer::root()
            .with_path_element("components")
            .with_path_element("responses")
            .with_path_element("Ok");
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_index_and_digit_key_segments_are_the_same_location() {
        let built = SpecificationPointer::root()
            .with_path_element("parameters")
            .with_path_element(0usize);
        let parsed = SpecificationPointer::from_reference("#/parameters/0").unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.to_string(), parsed.to_string());

        let mut seen = std::collections::HashSet::new();
        seen.insert(built);
        assert!(seen.contains(&parsed));

        assert_ne!(PathSegment::Index(0), PathSegment::from("00"));
        assert_ne!(PathSegment::Index(1), PathSegment::from("0"));
    }

    #[test]
    fn test_digit_keys_address_sequence_elements() {
        assert_eq!(PathSegment::from("12").as_index(), Some(12));
        assert_eq!(PathSegment::from("1a").as_index(), None);
        assert_eq!(PathSegment::from("").as_index(), None);
        assert_eq!(PathSegment::Index(4).as_key(), "4");
    }
}
