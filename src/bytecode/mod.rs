pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod op;
pub mod unit;

pub use compile::{CompiledProgram, Compiler, compile};
pub use compile_error::CompileError;
pub use op::Instruction;
pub use unit::TranslationUnit;
