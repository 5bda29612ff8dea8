use crate::{
    bytecode::{Instruction, TranslationUnit, compile_error::CompileError},
    frontend::classify::classify,
};

/// Result of a successful compile: the checked instruction stream and the
/// module text built from it.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub instructions: Vec<Instruction>,
    pub unit: TranslationUnit,
}

/// Single-pass compiler that simulates stack depth while emitting.
///
/// The source language has no control flow, so a linear scan is a complete
/// abstract interpretation: there are no join points to reconcile.
pub struct Compiler {
    /// Instructions emitted so far
    instructions: Vec<Instruction>,

    /// Values on the abstract evaluation stack
    depth: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            depth: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Classify one token, check its stack precondition and append it.
    pub fn push_token(&mut self, index: usize, token: &str) -> Result<(), CompileError> {
        let instruction = classify(index, token)?;
        let effect = instruction.effect();

        if self.depth < effect.pops {
            return Err(CompileError::StackUnderflow {
                index,
                token: token.to_string(),
                available: self.depth,
            });
        }

        self.depth = self.depth - effect.pops + effect.pushes;
        self.instructions.push(instruction);
        Ok(())
    }

    /// Check that exactly one value is left and build the module.
    pub fn finish(self) -> Result<CompiledProgram, CompileError> {
        if self.depth != 1 {
            return Err(CompileError::StackImbalance {
                final_depth: self.depth,
            });
        }

        let unit = TranslationUnit::new(&self.instructions);
        Ok(CompiledProgram {
            instructions: self.instructions,
            unit,
        })
    }

    pub fn compile_program<S: AsRef<str>>(
        mut self,
        tokens: &[S],
    ) -> Result<CompiledProgram, CompileError> {
        for (index, token) in tokens.iter().enumerate() {
            self.push_token(index, token.as_ref())?;
        }

        self.finish()
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile rerun tokens to a translation unit, stopping at the first error.
pub fn compile<S: AsRef<str>>(tokens: &[S]) -> Result<TranslationUnit, CompileError> {
    Compiler::new()
        .compile_program(tokens)
        .map(|program| program.unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::op::{BinaryOp, LibraryCall, Param};

    #[test]
    fn test_add_params() {
        let program = Compiler::new()
            .compile_program(&["p1", "p2", "add"])
            .unwrap();

        assert_eq!(
            program.instructions,
            vec![
                Instruction::LoadParam(Param::P1),
                Instruction::LoadParam(Param::P2),
                Instruction::BinaryOp(BinaryOp::Add),
            ]
        );
        assert!(program.unit.text().contains("local.get $p1\n    local.get $p2\n    i32.add"));
        assert!(program.unit.imports().is_empty());
    }

    #[test]
    fn test_underflow_with_no_values() {
        let err = compile(&["add"]).unwrap_err();
        assert_eq!(
            err,
            CompileError::StackUnderflow {
                index: 0,
                token: "add".to_string(),
                available: 0,
            }
        );
        assert!(err.to_string().contains("there are none."));
    }

    #[test]
    fn test_underflow_with_one_value() {
        let err = compile(&["p1", "add"]).unwrap_err();
        assert_eq!(
            err,
            CompileError::StackUnderflow {
                index: 1,
                token: "add".to_string(),
                available: 1,
            }
        );
        assert!(err.to_string().contains("#2"));
        assert!(err.to_string().contains("there is only one."));
    }

    #[test]
    fn test_too_many_values() {
        let err = compile(&["p1", "p2"]).unwrap_err();
        assert_eq!(err, CompileError::StackImbalance { final_depth: 2 });
    }

    #[test]
    fn test_empty_program() {
        let tokens: [&str; 0] = [];
        let err = compile(&tokens).unwrap_err();
        assert_eq!(err, CompileError::StackImbalance { final_depth: 0 });
    }

    #[test]
    fn test_invalid_token() {
        let err = compile(&["p1", "xyz"]).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidToken {
                index: 1,
                text: "xyz".to_string(),
            }
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = compile(&["xyz", "add"]).unwrap_err();
        assert!(matches!(err, CompileError::InvalidToken { index: 0, .. }));

        let err = compile(&["add", "xyz"]).unwrap_err();
        assert!(matches!(err, CompileError::StackUnderflow { index: 0, .. }));
    }

    #[test]
    fn test_cpow_compiles_with_import() {
        let program = Compiler::new()
            .compile_program(&["p1", "p2", "cpow"])
            .unwrap();

        assert_eq!(program.unit.imports(), &[LibraryCall::Pow]);
        assert!(program.unit.text().contains("(import \"stdlib\" \"pow\""));
        assert!(program.unit.text().contains("call $pow"));
    }

    #[test]
    fn test_cpow_underflow() {
        let err = compile(&["2", "cpow"]).unwrap_err();
        assert!(matches!(
            err,
            CompileError::StackUnderflow {
                index: 1,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_depth_tracks_prefix() {
        let mut compiler = Compiler::new();
        let tokens = ["p1", "p2", "3", "mul", "add"];
        let expected = [1, 2, 3, 2, 1];

        for (index, token) in tokens.iter().enumerate() {
            compiler.push_token(index, token).unwrap();
            assert_eq!(compiler.depth(), expected[index]);
        }
        assert!(compiler.finish().is_ok());
    }

    #[test]
    fn test_failed_token_does_not_change_depth() {
        let mut compiler = Compiler::new();
        compiler.push_token(0, "p1").unwrap();
        assert!(compiler.push_token(1, "sub").is_err());
        assert_eq!(compiler.depth(), 1);
    }

    #[test]
    fn test_long_chain() {
        let tokens = ["1", "2", "add", "3", "mul", "4", "sub", "5", "div", "6", "rem"];
        let program = Compiler::new().compile_program(&tokens).unwrap();
        assert_eq!(program.instructions.len(), tokens.len());
        assert!(program.unit.text().contains("i32.div_u"));
        assert!(program.unit.text().contains("i32.rem_u"));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let tokens: Vec<String> = vec!["7".to_string()];
        let unit = compile(&tokens).unwrap();
        assert!(unit.text().contains("i32.const 7"));
    }

    #[test]
    fn test_independent_compiles_in_parallel() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let literal = i.to_string();
                    compile(&["p1", literal.as_str(), "add"]).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let unit = handle.join().unwrap();
            assert!(unit.text().contains(&format!("i32.const {}\n", i)));
        }
    }
}
