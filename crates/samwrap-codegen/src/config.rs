//! Per-session code generation settings.

/// Settings read by the wrapper generator.
///
/// ```
/// use samwrap_codegen::GenerationConfig;
///
/// let config = GenerationConfig::default().with_file_class_suffix("Facade");
/// assert_eq!(config.file_class_suffix, "Facade");
/// assert_eq!(config.max_function_arity, 22);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Appended to a file's stem to name the class holding its top-level code.
    pub file_class_suffix: String,
    /// Function interface type names are this prefix plus the arity.
    pub function_class_prefix: String,
    /// Largest lambda arity a wrapper can forward.
    pub max_function_arity: usize,
    /// Superclass of every generated wrapper.
    pub object_class: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            file_class_suffix: "Kt".to_string(),
            function_class_prefix: "kotlin/jvm/functions/Function".to_string(),
            max_function_arity: 22,
            object_class: "java/lang/Object".to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_class_suffix = suffix.into();
        self
    }

    pub fn with_function_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.function_class_prefix = prefix.into();
        self
    }

    pub fn with_max_function_arity(mut self, arity: usize) -> Self {
        self.max_function_arity = arity;
        self
    }

    pub fn with_object_class(mut self, class: impl Into<String>) -> Self {
        self.object_class = class.into();
        self
    }

    /// Internal name of the function interface for `arity` parameters.
    pub fn function_class(&self, arity: usize) -> String {
        format!("{}{}", self.function_class_prefix, arity)
    }
}
