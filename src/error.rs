use crate::action::Action;

/// Result type alias used throughout the crate.
pub type Result<T, E = IterateError> = std::result::Result<T, E>;

/// Broad classification of an [`IterateError`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The chain asked for behaviour its configuration cannot provide
    Configuration,
    /// An adapter was asked to do something its backing structure cannot do
    Capability,
    /// A source was mutated while another traversal of it was still active
    Reentrancy,
}

/// Errors raised while building or driving an iteration chain
///
/// Every error is raised synchronously at the point where the unsupported
/// request is made and aborts the traversal that is currently running.
/// Nothing is retried: `each` can simply be called again.
#[derive(Debug, thiserror::Error)]
pub enum IterateError {
    /// A comparator-dependent operation found no comparator, neither
    /// configured on the chain nor passed inline.
    #[error("comparator required: `{operation}` needs a comparator and none is configured")]
    ComparatorRequired { operation: &'static str },

    /// A strict adapter was asked to remove or replace an element and has no
    /// way of doing so.
    #[error("{adapter} source does not support {action:?}")]
    Unsupported {
        adapter: &'static str,
        action: Action,
    },

    /// The backing structure is already borrowed by an active traversal.
    #[error("{adapter} source is already in use by an active traversal")]
    Reentrant { adapter: &'static str },
}

impl IterateError {
    pub fn comparator_required(operation: &'static str) -> Self {
        IterateError::ComparatorRequired { operation }
    }

    pub fn unsupported(adapter: &'static str, action: Action) -> Self {
        IterateError::Unsupported { adapter, action }
    }

    pub fn reentrant(adapter: &'static str) -> Self {
        IterateError::Reentrant { adapter }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IterateError::ComparatorRequired { .. } => ErrorKind::Configuration,
            IterateError::Unsupported { .. } => ErrorKind::Capability,
            IterateError::Reentrant { .. } => ErrorKind::Reentrancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_required_display() {
        let error = IterateError::comparator_required("sorted");
        let display_str = error.to_string();
        assert!(display_str.contains("comparator required"));
        assert!(display_str.contains("sorted"));
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_unsupported_display() {
        let error = IterateError::unsupported("iterable", Action::Remove);
        let display_str = error.to_string();
        assert!(display_str.contains("iterable"));
        assert!(display_str.contains("Remove"));
        assert_eq!(error.kind(), ErrorKind::Capability);
    }

    #[test]
    fn test_reentrant_kind() {
        let error = IterateError::reentrant("array");
        assert_eq!(error.kind(), ErrorKind::Reentrancy);
        assert!(error.to_string().contains("already in use"));
    }
}
