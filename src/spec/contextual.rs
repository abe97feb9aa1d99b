use crate::error::ParsingError;
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::pointer::SpecificationPointer;

/// A parser for one kind of specification object.
///
/// Implementations read only the sub-tree reachable from `pointer`, recurse
/// into children by deriving child pointers, and report failures against the
/// most specific pointer they know. They never log and never touch anything
/// outside the document.
pub trait ContextualParser {
    /// The configuration fragment produced by this parser.
    type Output;

    /// Parses the object at `pointer`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParsingError`] located at the offending node when the
    /// document does not have the expected shape.
    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError>;

    /// Called instead of [`parse_pointed_schema`](Self::parse_pointed_schema)
    /// when `pointer` refers to `target` while `target` is still being parsed
    /// further up the same chain.
    ///
    /// # Errors
    ///
    /// The default reports a [`CyclicReference`](crate::error::ParsingErrorKind::CyclicReference)
    /// at `pointer`. Parsers whose output may be recursive return a
    /// placeholder instead.
    fn parse_recursive_reference(
        &self,
        target: &SpecificationPointer,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        Err(ParsingError::cyclic_reference(target, pointer.clone()))
    }
}

impl<P> ContextualParser for &P
where
    P: ContextualParser + ?Sized,
{
    type Output = P::Output;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        (**self).parse_pointed_schema(specification, pointer)
    }

    fn parse_recursive_reference(
        &self,
        target: &SpecificationPointer,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        (**self).parse_recursive_reference(target, pointer)
    }
}

impl<P> ContextualParser for Box<P>
where
    P: ContextualParser + ?Sized,
{
    type Output = P::Output;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        (**self).parse_pointed_schema(specification, pointer)
    }

    fn parse_recursive_reference(
        &self,
        target: &SpecificationPointer,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        (**self).parse_recursive_reference(target, pointer)
    }
}
