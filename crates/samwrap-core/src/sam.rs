//! Descriptors of single-abstract-method interfaces.
//!
//! A [`SamType`] is the identity the backend uses when a function literal is
//! converted to an interface instance. It is a value type: two descriptors built
//! from the same interface name and method signature compare equal and hash the
//! same, which is what lets the wrapper cache share generated classes.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TypeHash;

/// Return type name used for methods that produce no value.
pub const VOID: &str = "void";

/// The one abstract method of a SAM interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamMethod {
    name: String,
    params: Vec<String>,
    return_type: String,
}

impl SamMethod {
    pub fn new<S: Into<String>>(name: S, params: Vec<String>, return_type: S) -> Self {
        Self {
            name: name.into(),
            params,
            return_type: return_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == VOID
    }

    /// Signature string in the form `(A,B)R`.
    pub fn descriptor(&self) -> String {
        format!("({}){}", self.params.join(","), self.return_type)
    }
}

/// A resolved SAM interface: its internal name and its abstract method.
///
/// Internal names use `/` as the package separator, e.g. `com/example/Producer`.
///
/// Equality and hashing go through the precomputed interface hash, so cache
/// lookups never rehash the interface name.
#[derive(Debug, Clone)]
pub struct SamType {
    interface: String,
    hash: TypeHash,
    method: SamMethod,
}

impl SamType {
    pub fn new(interface: impl Into<String>, method: SamMethod) -> Self {
        let interface = interface.into();
        let hash = TypeHash::from_name(&interface);
        Self {
            interface,
            hash,
            method,
        }
    }

    /// Internal name of the interface.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The interface name without its package.
    pub fn simple_name(&self) -> &str {
        self.interface
            .rsplit_once('/')
            .map_or(self.interface.as_str(), |(_, name)| name)
    }

    pub fn type_hash(&self) -> TypeHash {
        self.hash
    }

    pub fn method(&self) -> &SamMethod {
        &self.method
    }
}

impl PartialEq for SamType {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.interface == other.interface && self.method == other.method
    }
}

impl Eq for SamType {}

impl Hash for SamType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal interfaces have equal hashes, so the name itself can be skipped.
        self.hash.hash(state);
        self.method.hash(state);
    }
}

impl fmt::Display for SamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.interface,
            self.method.name,
            self.method.descriptor()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producer() -> SamType {
        SamType::new(
            "com/example/Producer",
            SamMethod::new("produce", vec![], "java/lang/Object"),
        )
    }

    #[test]
    fn simple_name_strips_package() {
        assert_eq!(producer().simple_name(), "Producer");
        let bare = SamType::new("Runnable", SamMethod::new("run", vec![], VOID));
        assert_eq!(bare.simple_name(), "Runnable");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(producer(), producer());
        let other = SamType::new(
            "com/example/Producer",
            SamMethod::new("get", vec![], "java/lang/Object"),
        );
        assert_ne!(producer(), other);
        assert_eq!(producer().type_hash(), other.type_hash());
    }

    #[test]
    fn equal_types_hash_equal() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(sam: &SamType) -> u64 {
            let mut hasher = DefaultHasher::new();
            sam.hash(&mut hasher);
            hasher.finish()
        }

        let renamed = SamType::new(
            "com/example/Supplier",
            SamMethod::new("produce", vec![], "java/lang/Object"),
        );
        assert_eq!(hash_of(&producer()), hash_of(&producer()));
        assert_ne!(producer(), renamed);
        assert_ne!(hash_of(&producer()), hash_of(&renamed));
    }

    #[test]
    fn descriptor_and_display() {
        let sam = SamType::new(
            "Combiner",
            SamMethod::new("combine", vec!["A".into(), "B".into()], "C"),
        );
        assert_eq!(sam.method().descriptor(), "(A,B)C");
        assert_eq!(sam.method().arity(), 2);
        assert_eq!(sam.to_string(), "Combiner.combine(A,B)C");
    }

    #[test]
    fn void_methods() {
        let sam = SamType::new("Runnable", SamMethod::new("run", vec![], VOID));
        assert!(sam.method().returns_void());
        assert!(!producer().method().returns_void());
    }
}
