//! Compiler for rerun, a tiny stack language over two i32 parameters.
//!
//! A program is a sequence of tokens (`p1`, `p2`, digit literals, `add`,
//! `sub`, `mul`, `div`, `rem`, `cpow`). [`bytecode::compile`] checks the
//! program's stack depth and emits a WebAssembly text module exporting
//! `compute(p1, p2) -> i32`. The [`toolchain`] and [`runtime`] modules turn
//! that text into a running instance.

pub mod bytecode;
pub mod cli;
pub mod error;
pub mod frontend;
pub mod log;
pub mod runtime;
pub mod toolchain;

pub use bytecode::{CompileError, TranslationUnit, compile};
pub use error::{Error, Result};
