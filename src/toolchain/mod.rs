//! Turning translation units into binary modules.
//!
//! The compiler core never touches the filesystem; everything that stages
//! artifacts or spawns tools lives here.

pub mod assemble_error;
pub mod assembler;
pub mod external;

pub use assemble_error::AssembleError;
pub use assembler::{Assembler, BuiltinAssembler};
pub use external::{ArtifactNamer, ExternalAssembler, SequenceNamer};
