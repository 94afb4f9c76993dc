//! Generation of SAM wrapper classes.
//!
//! A wrapper implements one SAM interface by holding a function value and
//! forwarding the interface's single method to the function's `invoke`:
//!
//! ```text
//! final synthetic class MainKt$sam$Producer$0 implements Producer {
//!     private final Function0 function;
//!     <init>(Function0 function) { this.function = function; }
//!     public final Object produce() { return (Object) function.invoke(); }
//! }
//! ```
//!
//! [`WrapperGenerator`] is the seam the session calls on a cache miss;
//! [`SamWrapperCodegen`] is the implementation used by default.

use samwrap_core::{CodegenError, FileId, SamType, VOID};
use samwrap_syntax::SourceFile;
use tracing::debug;

use crate::bytecode::{BytecodeChunk, Constant, ConstantPool, MAX_CONSTANTS, OpCode};
use crate::class_file::{ClassArtifact, ClassFlags, FieldDef, MemberFlags, MethodDef, OutputArtifacts};
use crate::config::GenerationConfig;
use crate::sam_wrappers::WrapperClass;

/// Name of the field holding the wrapped function value.
pub const FUNCTION_FIELD: &str = "function";

const CONSTRUCTOR: &str = "<init>";
const INVOKE: &str = "invoke";

/// Everything the generator needs to emit one wrapper.
#[derive(Debug, Clone, Copy)]
pub struct WrapperRequest<'a> {
    pub sam: &'a SamType,
    pub file: FileId,
    /// Internal name of the file class, e.g. `com/example/MainKt`.
    pub file_class: &'a str,
    /// File name recorded on the generated class.
    pub source_file: &'a str,
    /// Whether the requesting code lives in an inline context.
    pub inline: bool,
    /// Class that declares the wrapper as an inner class.
    pub outer_class: &'a str,
}

/// Emits a wrapper class into the session output and describes it.
///
/// On success exactly one class has been added to `output`. On failure
/// `output` is unchanged and the error is handed back to the caller as is.
pub trait WrapperGenerator {
    fn generate(
        &mut self,
        request: &WrapperRequest<'_>,
        config: &GenerationConfig,
        output: &mut OutputArtifacts,
    ) -> Result<WrapperClass, CodegenError>;
}

/// Default wrapper generator.
///
/// Names are `{file class}$sam[$i]${interface}${n}` where `n` counts the
/// wrappers this generator emitted in the session, which keeps every name
/// unique and makes names depend only on request order.
#[derive(Debug, Default)]
pub struct SamWrapperCodegen {
    emitted: u32,
}

impl SamWrapperCodegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of wrappers successfully emitted so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl WrapperGenerator for SamWrapperCodegen {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn generate(
        &mut self,
        request: &WrapperRequest<'_>,
        config: &GenerationConfig,
        output: &mut OutputArtifacts,
    ) -> Result<WrapperClass, CodegenError> {
        validate_sam(request.sam, config)?;

        let name = wrapper_name(request, self.emitted);
        let class = build_wrapper(&name, request, config)?;
        let wrapper = WrapperClass::new(
            name,
            request.sam.interface(),
            constructor_descriptor(request.sam, config),
        );
        output.add(class)?;
        self.emitted += 1;

        debug!(
            class = wrapper.name(),
            interface = request.sam.interface(),
            file = %request.file,
            inline = request.inline,
            "emitted SAM wrapper"
        );
        Ok(wrapper)
    }
}

/// Internal name of the class holding a file's top-level declarations.
///
/// `src/main.kt` in package `com/example` becomes `com/example/MainKt`.
pub fn file_class_name(file: &SourceFile<'_>, suffix: &str) -> String {
    let stem = file.stem();
    let mut chars = stem.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    match file.package {
        Some(package) if !package.is_empty() => format!("{package}/{capitalized}{suffix}"),
        _ => format!("{capitalized}{suffix}"),
    }
}

/// Name of the `ordinal`-th wrapper of the session.
pub fn wrapper_name(request: &WrapperRequest<'_>, ordinal: u32) -> String {
    let inline_marker = if request.inline { "$i" } else { "" };
    format!(
        "{}$sam{}${}${}",
        request.file_class,
        inline_marker,
        request.sam.simple_name(),
        ordinal
    )
}

fn validate_sam(sam: &SamType, config: &GenerationConfig) -> Result<(), CodegenError> {
    let interface = sam.interface();
    if interface.is_empty() {
        return Err(CodegenError::malformed(interface, "empty interface name"));
    }
    if interface.split('/').any(|segment| !is_valid_name(segment)) {
        return Err(CodegenError::malformed(interface, "invalid internal name"));
    }

    let method = sam.method();
    if !is_valid_name(method.name()) {
        return Err(CodegenError::malformed(
            interface,
            format!("invalid method name '{}'", method.name()),
        ));
    }
    if method.params().iter().any(|p| p.is_empty()) || method.return_type().is_empty() {
        return Err(CodegenError::malformed(interface, "empty type in method signature"));
    }

    let limit = config.max_function_arity.min(u8::MAX as usize - 1);
    if method.arity() > limit {
        return Err(CodegenError::malformed(
            interface,
            format!("arity {} exceeds the limit of {}", method.arity(), limit),
        ));
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | ';' | '[' | '/' | '<' | '>'))
}

fn constructor_descriptor(sam: &SamType, config: &GenerationConfig) -> String {
    format!("({}){}", config.function_class(sam.method().arity()), VOID)
}

fn invoke_descriptor(arity: usize, config: &GenerationConfig) -> String {
    let params = vec![config.object_class.as_str(); arity].join(",");
    format!("({}){}", params, config.object_class)
}

fn build_wrapper(
    name: &str,
    request: &WrapperRequest<'_>,
    config: &GenerationConfig,
) -> Result<ClassArtifact, CodegenError> {
    let sam = request.sam;
    let method = sam.method();
    let arity = method.arity();
    let function_class = config.function_class(arity);

    let mut constants = ConstantPool::new();
    let mut constant = |c: Constant| {
        constants.add(c).ok_or_else(|| CodegenError::ConstantPoolOverflow {
            class: name.to_string(),
            limit: MAX_CONSTANTS,
        })
    };
    constant(Constant::class(name))?;
    let object_init = constant(Constant::method(
        config.object_class.as_str(),
        CONSTRUCTOR,
        format!("(){VOID}"),
    ))?;
    let function_field = constant(Constant::field(name, FUNCTION_FIELD, function_class.as_str()))?;
    let invoke = constant(Constant::method(
        function_class.as_str(),
        INVOKE,
        invoke_descriptor(arity, config),
    ))?;
    let result_class = if method.returns_void() {
        None
    } else {
        Some(constant(Constant::class(method.return_type()))?)
    };

    // Inlined code may be copied into other packages, so its wrappers must be
    // reachable from anywhere.
    let (class_flags, member_visibility) = if request.inline {
        (ClassFlags::PUBLIC, MemberFlags::PUBLIC)
    } else {
        (ClassFlags::empty(), MemberFlags::empty())
    };

    let mut init = BytecodeChunk::new();
    init.write_op(OpCode::LoadThis, 0);
    init.emit_with_constant(OpCode::InvokeSpecial, object_init, 0);
    init.write_op(OpCode::LoadThis, 0);
    init.write_op(OpCode::LoadArg, 0);
    init.write_byte(1, 0);
    init.emit_with_constant(OpCode::PutField, function_field, 0);
    init.write_op(OpCode::Return, 0);

    let mut forward = BytecodeChunk::new();
    forward.write_op(OpCode::LoadThis, 0);
    forward.emit_with_constant(OpCode::GetField, function_field, 0);
    for slot in 1..=arity {
        forward.write_op(OpCode::LoadArg, 0);
        // validate_sam keeps arity below u8::MAX
        forward.write_byte(slot as u8, 0);
    }
    forward.emit_with_constant(OpCode::InvokeInterface, invoke, 0);
    forward.write_byte(arity as u8, 0);
    match result_class {
        Some(class) => {
            forward.emit_with_constant(OpCode::CheckCast, class, 0);
            forward.write_op(OpCode::ReturnValue, 0);
        }
        None => {
            forward.write_op(OpCode::Pop, 0);
            forward.write_op(OpCode::Return, 0);
        }
    }

    Ok(ClassArtifact {
        name: name.to_string(),
        flags: class_flags | ClassFlags::FINAL | ClassFlags::SUPER | ClassFlags::SYNTHETIC,
        super_class: config.object_class.clone(),
        interfaces: vec![sam.interface().to_string()],
        source_file: request.source_file.to_string(),
        outer_class: Some(request.outer_class.to_string()),
        constants,
        fields: vec![FieldDef {
            name: FUNCTION_FIELD.to_string(),
            descriptor: function_class,
            flags: MemberFlags::PRIVATE | MemberFlags::FINAL,
        }],
        methods: vec![
            MethodDef {
                name: CONSTRUCTOR.to_string(),
                descriptor: constructor_descriptor(sam, config),
                flags: member_visibility | MemberFlags::SYNTHETIC,
                code: init,
            },
            MethodDef {
                name: method.name().to_string(),
                descriptor: method.descriptor(),
                flags: MemberFlags::PUBLIC | MemberFlags::FINAL | MemberFlags::SYNTHETIC,
                code: forward,
            },
        ],
    })
}
