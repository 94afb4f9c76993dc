//! Deterministic hash-based identity for interfaces.
//!
//! A [`TypeHash`] is computed from a qualified name, so the same interface
//! always gets the same hash no matter which file or session produced it.
//!
//! ```
//! use samwrap_core::TypeHash;
//!
//! let a = TypeHash::from_name("com/example/Producer");
//! let b = TypeHash::from_name("com/example/Producer");
//! assert_eq!(a, b);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain marker mixed into every type hash.
pub const TYPE_MARKER: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Hash of a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(TYPE_MARKER ^ xxh64(name.as_bytes(), 0))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
