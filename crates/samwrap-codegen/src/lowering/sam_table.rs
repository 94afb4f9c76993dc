//! Interfaces visible to a file, and whether each one is SAM-convertible.

use rustc_hash::FxHashMap;
use samwrap_core::{LoweringError, SamMethod, SamType, Span, VOID};
use samwrap_syntax::{ClassDecl, InterfaceDecl, Item, SourceFile, TypeRef};

const OBJECT: &str = "java/lang/Object";

/// What a registered interface name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamLookup {
    Sam(SamType),
    NotSam { abstract_methods: usize },
}

/// Interfaces by simple name and by internal name.
///
/// An interface is SAM-convertible when exactly one of its methods has no
/// default body. When two interfaces share a simple name the one registered
/// last wins for simple-name lookups; internal names are always unambiguous.
#[derive(Debug, Clone, Default)]
pub struct SamInterfaceTable {
    entries: FxHashMap<String, SamLookup>,
}

impl SamInterfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interface known to be SAM-convertible, e.g. a library type.
    pub fn register_sam(&mut self, sam: SamType) {
        self.entries
            .insert(sam.simple_name().to_string(), SamLookup::Sam(sam.clone()));
        self.entries
            .insert(sam.interface().to_string(), SamLookup::Sam(sam));
    }

    /// Register every interface declared in `file`, including ones nested in
    /// classes.
    pub fn register_file(&mut self, file: &SourceFile<'_>) {
        let prefix = match file.package {
            Some(package) if !package.is_empty() => format!("{package}/"),
            _ => String::new(),
        };
        self.register_items(file.items(), &prefix);
    }

    fn register_items(&mut self, items: &[Item<'_>], prefix: &str) {
        for item in items {
            match item {
                Item::Interface(interface) => self.register_interface(interface, prefix),
                Item::Class(class) => self.register_class(class, prefix),
                Item::Function(_) | Item::Property(_) => {}
            }
        }
    }

    fn register_class(&mut self, class: &ClassDecl<'_>, prefix: &str) {
        let nested = format!("{prefix}{}$", class.name.name);
        self.register_items(class.members, &nested);
    }

    fn register_interface(&mut self, interface: &InterfaceDecl<'_>, prefix: &str) {
        let simple = interface.name.name;
        let internal = format!("{prefix}{simple}");

        let mut abstract_methods = interface.abstract_methods();
        let lookup = match (abstract_methods.next(), abstract_methods.next()) {
            (Some(method), None) => {
                let params = method
                    .params
                    .iter()
                    .map(|param| internal_type(Some(&param.ty)))
                    .collect();
                let sam = SamType::new(
                    internal.as_str(),
                    SamMethod::new(
                        method.name.name.to_string(),
                        params,
                        internal_type(method.return_type.as_ref()),
                    ),
                );
                SamLookup::Sam(sam)
            }
            _ => SamLookup::NotSam {
                abstract_methods: interface.abstract_methods().count(),
            },
        };

        self.entries.insert(simple.to_string(), lookup.clone());
        self.entries.insert(internal, lookup);
    }

    pub fn get(&self, name: &str) -> Option<&SamLookup> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The SAM type for a conversion to `name` written at `span`.
    pub fn resolve(&self, name: &str, span: Span) -> Result<SamType, LoweringError> {
        match self.entries.get(name) {
            Some(SamLookup::Sam(sam)) => Ok(sam.clone()),
            Some(SamLookup::NotSam { abstract_methods }) => Err(LoweringError::NotSamInterface {
                name: name.to_string(),
                abstract_methods: *abstract_methods,
                span,
            }),
            None => Err(LoweringError::UnknownInterface {
                name: name.to_string(),
                span,
            }),
        }
    }
}

/// Internal name used in descriptors for a source-level type.
fn internal_type(ty: Option<&TypeRef<'_>>) -> String {
    match ty.map(|ty| ty.name) {
        None | Some("Unit") => VOID.to_string(),
        Some("Any") => OBJECT.to_string(),
        Some("String") => "java/lang/String".to_string(),
        Some(name) => name.to_string(),
    }
}
