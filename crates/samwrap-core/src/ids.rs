//! Identifiers for compilation units.

use std::fmt;

/// Identifies one source file within a compilation session.
///
/// Two syntax trees with the same `FileId` are treated as the same unit by the
/// backend: generated classes are scoped to it and shared between the
/// conversion sites it contains.
///
/// ```
/// use samwrap_core::FileId;
///
/// let file = FileId::new(3);
/// assert_eq!(file.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file_{}", self.0)
    }
}

impl From<u32> for FileId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}
