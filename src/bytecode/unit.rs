use std::fmt;

use crate::bytecode::op::{Instruction, LibraryCall};

/// Name of the exported entry point.
pub const ENTRY_POINT: &str = "compute";

/// Namespace that library calls are imported from.
pub const STDLIB_MODULE: &str = "stdlib";

/// A complete WebAssembly text module ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    text: String,
    imports: Vec<LibraryCall>,
}

impl TranslationUnit {
    /// Wrap the instruction stream in the fixed module scaffold. Imports are
    /// declared only for library calls the body actually uses.
    pub fn new(instructions: &[Instruction]) -> Self {
        let mut imports: Vec<LibraryCall> = Vec::new();
        for call in instructions.iter().filter_map(Instruction::library_call) {
            if !imports.contains(&call) {
                imports.push(call);
            }
        }

        let mut text = String::from("\n(module\n");
        for call in &imports {
            text.push_str(&format!(
                "  (import \"{}\" \"{}\" (func ${} (param i32 i32) (result i32)))\n",
                STDLIB_MODULE,
                call.name(),
                call.name()
            ));
        }

        text.push_str("  (func $compute (param $p1 i32) (param $p2 i32) (result i32)\n");
        for instruction in instructions {
            text.push_str("    ");
            text.push_str(&instruction.wat());
            text.push('\n');
        }
        text.push_str("  )\n");
        text.push_str(&format!("  (export \"{}\" (func $compute))\n", ENTRY_POINT));
        text.push_str(")\n");

        Self { text, imports }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Library functions the module imports from `stdlib`.
    pub fn imports(&self) -> &[LibraryCall] {
        &self.imports
    }
}

impl fmt::Display for TranslationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::op::{BinaryOp, Param};

    #[test]
    fn test_scaffold_without_imports() {
        let unit = TranslationUnit::new(&[
            Instruction::LoadParam(Param::P1),
            Instruction::LoadParam(Param::P2),
            Instruction::BinaryOp(BinaryOp::Add),
        ]);

        let expected = "
(module
  (func $compute (param $p1 i32) (param $p2 i32) (result i32)
    local.get $p1
    local.get $p2
    i32.add
  )
  (export \"compute\" (func $compute))
)
";
        assert_eq!(unit.text(), expected);
        assert!(unit.imports().is_empty());
    }

    #[test]
    fn test_scaffold_imports_pow_once() {
        let unit = TranslationUnit::new(&[
            Instruction::LoadParam(Param::P1),
            Instruction::PushConst(2),
            Instruction::CallLibrary(LibraryCall::Pow),
            Instruction::PushConst(2),
            Instruction::CallLibrary(LibraryCall::Pow),
        ]);

        let import = "(import \"stdlib\" \"pow\" (func $pow (param i32 i32) (result i32)))";
        assert_eq!(unit.text().matches(import).count(), 1);
        assert_eq!(unit.text().matches("call $pow").count(), 2);
        assert_eq!(unit.imports(), &[LibraryCall::Pow]);
    }

    #[test]
    fn test_import_precedes_function() {
        let unit = TranslationUnit::new(&[
            Instruction::PushConst(1),
            Instruction::PushConst(1),
            Instruction::CallLibrary(LibraryCall::Pow),
        ]);
        let text = unit.text();
        let import_at = text.find("(import").unwrap();
        let func_at = text.find("(func $compute").unwrap();
        assert!(import_at < func_at);
    }

    #[test]
    fn test_display_matches_text() {
        let unit = TranslationUnit::new(&[Instruction::PushConst(9)]);
        assert_eq!(unit.to_string(), unit.text());
    }
}
