//! Error types for layout configuration.
//!
//! Only configuration mistakes surface as errors. A missing or unreadable
//! environment (headless execution) is handled by the fallback-width policy in
//! [`crate::viewport`] and never reaches the caller.

use thiserror::Error;

/// Errors raised while validating layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The coordinator was mounted without any children.
    #[error("masonry requires at least one child")]
    MissingChildren,

    /// A breakpoint table was built with the same threshold twice.
    #[error("duplicate breakpoint threshold {threshold}")]
    DuplicateThreshold {
        /// The threshold that appeared more than once.
        threshold: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LayoutError::MissingChildren.to_string(),
            "masonry requires at least one child"
        );
        assert_eq!(
            LayoutError::DuplicateThreshold { threshold: 750 }.to_string(),
            "duplicate breakpoint threshold 750"
        );
    }
}
