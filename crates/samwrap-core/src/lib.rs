//! Core types shared by the samwrap crates.
//!
//! - [`Span`]: source locations
//! - [`FileId`]: compilation unit identity
//! - [`TypeHash`]: deterministic interface hashes
//! - [`SamType`] / [`SamMethod`]: single-abstract-method interface descriptors
//! - [`CodegenError`], [`LoweringError`], [`SamwrapError`]: error hierarchy

pub mod error;
pub mod ids;
pub mod sam;
pub mod span;
pub mod type_hash;

pub use error::{CodegenError, LoweringError, SamwrapError};
pub use ids::FileId;
pub use sam::{SamMethod, SamType, VOID};
pub use span::Span;
pub use type_hash::TypeHash;
