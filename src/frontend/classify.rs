use crate::bytecode::compile_error::CompileError;
use crate::bytecode::op::{BinaryOp, Instruction, LibraryCall, Param};

/// A token is a literal iff it is non-empty and made of ASCII digits only.
pub fn is_literal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a digit-only literal, wrapping modulo 2^32 like i32 arithmetic does.
fn parse_literal(token: &str) -> u32 {
    token.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(10).wrapping_add(u32::from(b - b'0'))
    })
}

/// Map one token to its instruction. `index` is the token's 0-based position
/// and is only used for error reporting.
pub fn classify(index: usize, token: &str) -> Result<Instruction, CompileError> {
    let instruction = match token {
        "p1" => Instruction::LoadParam(Param::P1),
        "p2" => Instruction::LoadParam(Param::P2),

        "add" => Instruction::BinaryOp(BinaryOp::Add),
        "sub" => Instruction::BinaryOp(BinaryOp::Sub),
        "mul" => Instruction::BinaryOp(BinaryOp::Mul),
        "div" => Instruction::BinaryOp(BinaryOp::UnsignedDiv),
        "rem" => Instruction::BinaryOp(BinaryOp::UnsignedRem),

        "cpow" => Instruction::CallLibrary(LibraryCall::Pow),

        _ if is_literal(token) => Instruction::PushConst(parse_literal(token)),

        _ => {
            return Err(CompileError::InvalidToken {
                index,
                text: token.to_string(),
            });
        }
    };

    Ok(instruction)
}
