use thiserror::Error;

use crate::bytecode::CompileError;
use crate::runtime::RuntimeError;
use crate::toolchain::AssembleError;

/// Any failure on the way from tokens to a computed result.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, Error>;
