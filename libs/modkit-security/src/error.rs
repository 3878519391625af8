/// A predicate constructor received data it cannot represent.
///
/// Raised at construction time, never at translation time: a leaf that
/// exists is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid predicate argument `{field}`: {reason}")]
pub struct InvalidPredicateArgument {
    field: &'static str,
    reason: String,
}

impl InvalidPredicateArgument {
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending argument.
    #[inline]
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
