//! Main code-generation driver.
//!
//! Holds the LLVM context, module and builder, the table of known function
//! signatures, and the import paths recorded during lowering. Per-function
//! lowering state lives in [`FnLowering`] and never outlives one function.

use std::{collections::HashMap, path::PathBuf};

use inkwell::{
    basic_block::BasicBlock,
    builder::Builder,
    context::Context,
    module::Module,
    passes::PassManager,
    types::{BasicMetadataTypeEnum, BasicType, BasicTypeEnum},
    values::{FunctionValue, PointerValue},
};

use crate::{
    ast::{
        nodes::{Node, Prototype},
        types::ValueType,
    },
    errors::errors::Error,
    Position,
};

use super::stmt::gen_statement;

/// The code generator. `'a` is the lifetime of the LLVM context.
pub struct Compiler<'a> {
    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,

    /// Known function signatures, keyed by name. Read-only during body
    /// lowering; used for callee resolution and arity checks.
    pub prototypes: HashMap<String, Prototype>,
    /// Paths recorded by import nodes, for a later resolution phase.
    pub imports: Vec<String>,
}

/// Lowering state scoped to a single function: the symbol table, the shared
/// return-value slot and the designated exit block. Created when lowering of
/// a function starts and discarded when its LLVM function is finalised.
pub struct FnLowering<'a> {
    pub function: FunctionValue<'a>,
    /// Variable name to (storage slot, declared type).
    pub variables: HashMap<String, (PointerValue<'a>, ValueType)>,
    /// The one slot every `return` statement stores into. `None` for void
    /// functions.
    pub return_slot: Option<PointerValue<'a>>,
    /// The single block holding the function's only return instruction.
    pub exit_block: BasicBlock<'a>,
    pub return_type: ValueType,
}

impl<'a> Compiler<'a> {
    pub fn new(context: &'a Context, module_name: &str) -> Self {
        Compiler {
            module: context.create_module(module_name),
            builder: context.create_builder(),
            context,
            prototypes: HashMap::new(),
            imports: Vec::new(),
        }
    }

    /// Saves the current LLVM module to a file.
    pub fn save_module_to_file(&self, output_file: PathBuf) {
        self.module.print_to_file(output_file).unwrap();
    }

    /// Runs the verifier pass over the finished module.
    fn run_passes(&self) {
        let fpm = PassManager::create(());
        fpm.add_verifier_pass();
        fpm.run_on(&self.module);
    }

    /// Maps a value type to an LLVM basic type. `Void` has no basic type
    /// and is handled at the signature level.
    pub fn convert_type(&self, ty: ValueType) -> BasicTypeEnum<'a> {
        match ty {
            ValueType::I64 => self.context.i64_type().into(),
            ValueType::I32 => self.context.i32_type().into(),
            ValueType::I16 => self.context.i16_type().into(),
            ValueType::I8 => self.context.i8_type().into(),
            ValueType::Float => self.context.f32_type().into(),
            ValueType::Double => self.context.f64_type().into(),
            ValueType::Bool => self.context.bool_type().into(),
            ValueType::Void | ValueType::Str | ValueType::Untyped => {
                panic!("{} has no storage representation", ty)
            }
        }
    }

    /// Creates the LLVM function object for a prototype and records the
    /// signature for later callee resolution.
    pub fn declare_function(&mut self, proto: &Prototype) -> FunctionValue<'a> {
        if let Some(existing) = self.module.get_function(&proto.name) {
            return existing;
        }

        let params: Vec<BasicMetadataTypeEnum<'a>> = proto
            .arg_types
            .iter()
            .map(|ty| self.convert_type(*ty).into())
            .collect();

        let function_type = if proto.return_type == ValueType::Void {
            self.context.void_type().fn_type(params.as_slice(), false)
        } else {
            self.convert_type(proto.return_type)
                .fn_type(params.as_slice(), false)
        };

        let function = self.module.add_function(&proto.name, function_type, None);
        self.prototypes.insert(proto.name.clone(), proto.clone());

        function
    }

    /// Lowers one function body under the single-exit protocol.
    ///
    /// Protocol, fixed for every function: entry block with one storage
    /// slot per parameter; one shared return-value slot and one exit block;
    /// body nodes lowered in order; a fall-through branch to the exit block
    /// if the last body block lacks a terminator; and the function's only
    /// return instruction in the exit block.
    pub fn gen_function(&mut self, proto: &Prototype, body: &[Node]) -> Result<(), Error> {
        let function = self.declare_function(proto);

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        let mut variables = HashMap::new();
        for (i, param) in function.get_params().iter().enumerate() {
            let ty = proto.arg_types[i];
            let slot = self
                .builder
                .build_alloca(self.convert_type(ty), &proto.arg_names[i])
                .unwrap();
            self.builder.build_store(slot, *param).unwrap();
            variables.insert(proto.arg_names[i].clone(), (slot, ty));
        }

        let return_slot = if proto.return_type != ValueType::Void {
            let slot_type = self.convert_type(proto.return_type);
            let slot = self.builder.build_alloca(slot_type, "retval").unwrap();
            // Falling off the end of a function without a return statement
            // yields zero rather than an undefined load.
            self.builder
                .build_store(slot, slot_type.const_zero())
                .unwrap();
            Some(slot)
        } else {
            None
        };

        let exit_block = self.context.append_basic_block(function, "exit");

        let mut lowering = FnLowering {
            function,
            variables,
            return_slot,
            exit_block,
            return_type: proto.return_type,
        };

        for node in body {
            gen_statement(self, &mut lowering, node)?;
        }

        let current = self.builder.get_insert_block().unwrap();
        if current.get_terminator().is_none() {
            self.builder.build_unconditional_branch(exit_block).unwrap();
        }

        self.builder.position_at_end(exit_block);
        match lowering.return_slot {
            Some(slot) => {
                let value = self.builder.build_load(slot, "retload").unwrap();
                self.builder.build_return(Some(&value)).unwrap();
            }
            None => {
                self.builder.build_return(None).unwrap();
            }
        }

        Ok(())
    }

    /// Lowers every top-level node.
    ///
    /// Function signatures are declared up front so call sites resolve
    /// independent of declaration order. Statement nodes outside any
    /// function are gathered into a synthesized `main` returning `i32`.
    pub fn compile(&mut self, nodes: &[Node]) -> Result<(), Error> {
        for node in nodes {
            if let Node::Function(function) = node {
                self.declare_function(&function.proto);
            }
        }

        let mut top_level = vec![];
        for node in nodes {
            match node {
                Node::Function(function) => {
                    self.gen_function(&function.proto, &function.body)?;
                }
                Node::Import { path } => {
                    self.imports.push(path.clone());
                }
                other => top_level.push(other.clone()),
            }
        }

        if !top_level.is_empty() {
            let proto = Prototype {
                name: String::from("main"),
                arg_types: vec![],
                arg_names: vec![],
                return_type: ValueType::I32,
            };
            self.gen_function(&proto, &top_level)?;
        }

        self.run_passes();

        Ok(())
    }
}

/// Compiles a parsed program into an LLVM module written to `output_file`.
///
/// This is the primary entry point for code generation. The returned
/// Compiler keeps the module alive for callers that want to inspect or
/// execute it.
pub fn compile<'a>(
    nodes: &[Node],
    output_file: PathBuf,
    module_name: &str,
    context: &'a Context,
) -> Result<Compiler<'a>, Error> {
    let mut compiler = Compiler::new(context, module_name);

    compiler.compile(nodes)?;
    compiler.save_module_to_file(output_file);

    Ok(compiler)
}

/// Position attached to code-generation errors, which carry no source span.
pub fn codegen_position() -> Position {
    Position::null()
}
