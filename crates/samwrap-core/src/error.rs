//! Error types for the samwrap backend.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SamwrapError (top-level wrapper)
//! ├── LoweringError  - conversion sites that cannot be lowered
//! └── CodegenError   - wrapper class generation failures
//! ```
//!
//! Only wrapper generation can fail inside the backend; the cache that sits in
//! front of it is pure bookkeeping. A `CodegenError` reaches the caller exactly
//! as the generator produced it.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Codegen Errors
// ============================================================================

/// Errors raised while emitting a wrapper class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// The SAM descriptor cannot be turned into a valid class.
    #[error("malformed SAM descriptor for '{interface}': {detail}")]
    MalformedSam { interface: String, detail: String },

    /// A class with this name was already emitted in the session.
    #[error("class '{name}' is already defined in this session")]
    DuplicateClass { name: String },

    /// A class needs more constant pool entries than an operand can address.
    #[error("constant pool of class '{class}' exceeds {limit} entries")]
    ConstantPoolOverflow { class: String, limit: usize },
}

impl CodegenError {
    pub fn malformed(interface: impl Into<String>, detail: impl Into<String>) -> Self {
        CodegenError::MalformedSam {
            interface: interface.into(),
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Lowering Errors
// ============================================================================

/// Errors raised while lowering SAM conversions in a file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoweringError {
    /// The converted-to interface is not declared anywhere visible.
    #[error("unknown interface '{name}' at {span}")]
    UnknownInterface { name: String, span: Span },

    /// The interface exists but does not have exactly one abstract method.
    #[error("'{name}' at {span} is not a SAM interface ({abstract_methods} abstract methods)")]
    NotSamInterface {
        name: String,
        abstract_methods: usize,
        span: Span,
    },

    /// Wrapper generation failed; aborts the current file.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl LoweringError {
    /// Source location of the offending conversion, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            LoweringError::UnknownInterface { span, .. } => Some(*span),
            LoweringError::NotSamInterface { span, .. } => Some(*span),
            LoweringError::Codegen(_) => None,
        }
    }
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error for callers that do not care which phase failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamwrapError {
    #[error("lowering error: {0}")]
    Lowering(#[from] LoweringError),

    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codegen_error_display() {
        let err = CodegenError::malformed("Producer", "empty method name");
        assert_eq!(
            err.to_string(),
            "malformed SAM descriptor for 'Producer': empty method name"
        );
    }

    #[test]
    fn codegen_error_passes_through_lowering_unchanged() {
        let err = CodegenError::DuplicateClass {
            name: "MainKt$sam$Producer$0".into(),
        };
        let lowering: LoweringError = err.clone().into();
        assert_eq!(lowering.to_string(), err.to_string());
        assert_eq!(lowering, LoweringError::Codegen(err));
        assert_eq!(lowering.span(), None);
    }

    #[test]
    fn lowering_error_span() {
        let err = LoweringError::UnknownInterface {
            name: "Missing".into(),
            span: Span::new(4, 9, 7),
        };
        assert_eq!(err.span(), Some(Span::new(4, 9, 7)));
        assert_eq!(err.to_string(), "unknown interface 'Missing' at 4:9");
    }

    #[test]
    fn unified_error_wraps_phases() {
        let err: SamwrapError = CodegenError::ConstantPoolOverflow {
            class: "A".into(),
            limit: 65535,
        }
        .into();
        assert!(matches!(err, SamwrapError::Codegen(_)));
    }
}
