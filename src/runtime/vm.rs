use std::path::PathBuf;

use wasmtime::{Engine, Linker, Module, Store, Trap, TypedFunc};

use crate::bytecode::op::LibraryCall;
use crate::bytecode::unit::{ENTRY_POINT, STDLIB_MODULE};
use crate::runtime::RuntimeError;

/// Export of the prebuilt numeric library that backs `stdlib.pow`.
pub const RELIB_EXPORT: &str = "exponentiate";

/// How the `stdlib` imports get resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stdlib {
    /// Link nothing. Modules that call into `stdlib` fail to instantiate.
    None,
    /// Link the host's own `relib` functions.
    Native,
    /// Load a prebuilt `relib.wasm` and link its exports.
    Module(PathBuf),
}

/// Instantiates compiled modules and links the numeric library.
pub struct Runtime {
    engine: Engine,
    stdlib: Stdlib,
}

impl Runtime {
    pub fn new(stdlib: Stdlib) -> Self {
        Self {
            engine: Engine::default(),
            stdlib,
        }
    }

    pub fn stdlib(&self) -> &Stdlib {
        &self.stdlib
    }

    /// Compile, link and instantiate a binary module.
    pub fn load(&self, wasm: &[u8]) -> Result<Instance, RuntimeError> {
        let module = Module::new(&self.engine, wasm)
            .map_err(|e| RuntimeError::Compile(format!("{:#}", e)))?;

        let mut store = Store::new(&self.engine, ());
        let mut linker: Linker<()> = Linker::new(&self.engine);
        self.link_stdlib(&mut linker, &mut store)?;

        let instance = linker
            .instantiate(&mut store, &module)
            .map_err(|e| RuntimeError::Link(format!("{:#}", e)))?;
        let compute = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, ENTRY_POINT)
            .map_err(|_| RuntimeError::MissingExport(ENTRY_POINT))?;

        Ok(Instance { store, compute })
    }

    /// Load a module and call `compute(p1, p2)` once.
    pub fn run(&self, wasm: &[u8], p1: i32, p2: i32) -> Result<i32, RuntimeError> {
        self.load(wasm)?.compute(p1, p2)
    }

    fn link_stdlib(
        &self,
        linker: &mut Linker<()>,
        store: &mut Store<()>,
    ) -> Result<(), RuntimeError> {
        match &self.stdlib {
            Stdlib::None => Ok(()),

            Stdlib::Native => {
                linker
                    .func_wrap(STDLIB_MODULE, LibraryCall::Pow.name(), |base: i32, exp: i32| {
                        relib::exponentiate(base as u32, exp as u32) as i32
                    })
                    .map_err(|e| RuntimeError::Link(format!("{:#}", e)))?;
                Ok(())
            }

            Stdlib::Module(path) => {
                let stdlib_error = |message: String| RuntimeError::Stdlib {
                    path: path.clone(),
                    message,
                };

                crate::debug!("loading stdlib from {}", path.display());
                let module = Module::from_file(&self.engine, path)
                    .map_err(|e| stdlib_error(format!("{:#}", e)))?;
                let library = Linker::new(&self.engine)
                    .instantiate(&mut *store, &module)
                    .map_err(|e| stdlib_error(format!("{:#}", e)))?;
                let pow = library
                    .get_func(&mut *store, RELIB_EXPORT)
                    .ok_or_else(|| stdlib_error(format!("no \"{}\" export", RELIB_EXPORT)))?;

                linker
                    .define(&*store, STDLIB_MODULE, LibraryCall::Pow.name(), pow)
                    .map_err(|e| RuntimeError::Link(format!("{:#}", e)))?;
                Ok(())
            }
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Stdlib::Native)
    }
}

/// A linked module ready to run.
pub struct Instance {
    store: Store<()>,
    compute: TypedFunc<(i32, i32), i32>,
}

impl Instance {
    pub fn compute(&mut self, p1: i32, p2: i32) -> Result<i32, RuntimeError> {
        self.compute
            .call(&mut self.store, (p1, p2))
            .map_err(|e| match e.downcast_ref::<Trap>() {
                Some(trap) => RuntimeError::Trap(trap.to_string()),
                None => RuntimeError::Trap(format!("{:#}", e)),
            })
    }
}
