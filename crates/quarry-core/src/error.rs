use std::sync::Arc;

/// An error that can occur while compiling a query.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    message: String,
}

/// Classifies an [`Error`].
///
/// Unresolvable fields and relations are *not* errors: the offending
/// predicate or sort key is dropped silently so that permission-layer
/// filters referencing hidden fields do not leak schema information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The query descriptor is malformed: a polymorphic traversal is missing
    /// its collection scope, an operator received a value it cannot work
    /// with, or a value cannot be coerced to the field's type.
    InvalidQuery,

    /// An operator name is not present in the operator registry.
    UnknownOperator,

    /// The filter tree nests deeper than the recursion limit.
    FilterTooDeep,
}

impl Error {
    fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            inner: Arc::new(ErrorInner { kind, message }),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidQuery, message.into())
    }

    pub fn unknown_operator(operator: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::UnknownOperator,
            format!("`{}`", operator.as_ref()),
        )
    }

    pub fn filter_too_deep(limit: usize) -> Self {
        Self::new(
            ErrorKind::FilterTooDeep,
            format!("filter nests deeper than {limit} levels"),
        )
    }

    pub fn type_conversion(value: impl core::fmt::Debug, ty: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::InvalidQuery,
            format!("cannot convert {value:?} to {}", ty.as_ref()),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn is_invalid_query(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidQuery)
    }

    pub fn is_unknown_operator(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnknownOperator)
    }

    pub fn is_filter_too_deep(&self) -> bool {
        matches!(self.kind(), ErrorKind::FilterTooDeep)
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let prefix = match self.inner.kind {
            ErrorKind::InvalidQuery => "invalid query",
            ErrorKind::UnknownOperator => "unknown operator",
            ErrorKind::FilterTooDeep => "filter too deep",
        };
        write!(f, "{prefix}: {}", self.inner.message)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("message", &self.inner.message)
                .finish()
        }
    }
}
