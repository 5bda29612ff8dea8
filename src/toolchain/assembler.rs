use crate::bytecode::TranslationUnit;
use crate::toolchain::AssembleError;

/// Turns module text into a binary module.
///
/// Implementations must be safe to call concurrently from several threads;
/// each call owns whatever intermediate state it creates.
pub trait Assembler: Send + Sync {
    fn assemble(&self, unit: &TranslationUnit) -> Result<Vec<u8>, AssembleError>;
}

/// Assembles in-process, without staging files or spawning tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinAssembler;

impl BuiltinAssembler {
    pub fn new() -> Self {
        Self
    }
}

impl Assembler for BuiltinAssembler {
    fn assemble(&self, unit: &TranslationUnit) -> Result<Vec<u8>, AssembleError> {
        crate::debug!("assembling {} bytes of module text in-process", unit.text().len());
        wat::parse_str(unit.text()).map_err(|e| AssembleError::Builtin(e.to_string()))
    }
}
