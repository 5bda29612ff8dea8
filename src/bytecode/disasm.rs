use crate::bytecode::Instruction;
use crate::bytecode::op::BinaryOp;

/// Return a listing of a compiled program: one line per instruction with its
/// mnemonic, stack effect and the stack depth after it runs.
pub fn disassemble_to_string(tokens: &[impl AsRef<str>], instructions: &[Instruction]) -> String {
    let mut output = String::new();
    let mut depth = 0usize;

    output.push_str(&format!(
        "{:<4}  {:<8}  {:<12}  {:<16}  {}\n",
        "#", "token", "op", "effect", "depth"
    ));

    for (ip, instruction) in instructions.iter().enumerate() {
        let effect = instruction.effect();
        depth = depth.saturating_sub(effect.pops) + effect.pushes;
        let token = tokens.get(ip).map(AsRef::as_ref).unwrap_or("?");

        output.push_str(&format!(
            "{:04}  {:<8}  {:<12}  {:<16}  {}\n",
            ip + 1,
            token,
            mnemonic(instruction),
            stack_comment(instruction),
            depth
        ));
    }

    output
}

fn mnemonic(instruction: &Instruction) -> String {
    match instruction {
        Instruction::LoadParam(param) => format!("LOAD {}", param.name().to_uppercase()),
        Instruction::PushConst(value) => format!("PUSH {}", value),
        Instruction::BinaryOp(op) => match op {
            BinaryOp::Add => "ADD".to_string(),
            BinaryOp::Sub => "SUB".to_string(),
            BinaryOp::Mul => "MUL".to_string(),
            BinaryOp::UnsignedDiv => "DIV_U".to_string(),
            BinaryOp::UnsignedRem => "REM_U".to_string(),
        },
        Instruction::CallLibrary(call) => format!("CALL stdlib.{}", call.name()),
    }
}

fn stack_comment(instruction: &Instruction) -> &'static str {
    match instruction {
        Instruction::LoadParam(_) => "( -- p )",
        Instruction::PushConst(_) => "( -- n )",
        Instruction::BinaryOp(_) => "( a b -- c )",
        Instruction::CallLibrary(_) => "( base exp -- r )",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::Compiler;

    #[test]
    fn test_listing_lines() {
        let tokens = ["p1", "2", "cpow"];
        let program = Compiler::new().compile_program(&tokens).unwrap();
        let listing = disassemble_to_string(&tokens, &program.instructions);

        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("0001  p1"));
        assert!(lines[1].contains("LOAD P1"));
        assert!(lines[2].contains("PUSH 2"));
        assert!(lines[3].contains("CALL stdlib.pow"));
        assert!(lines[3].contains("( base exp -- r )"));
    }

    #[test]
    fn test_listing_tracks_depth() {
        let tokens = ["p1", "p2", "rem"];
        let program = Compiler::new().compile_program(&tokens).unwrap();
        let listing = disassemble_to_string(&tokens, &program.instructions);

        let depths: Vec<&str> = listing
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().last().unwrap())
            .collect();
        assert_eq!(depths, vec!["1", "2", "1"]);
        assert!(listing.contains("REM_U"));
    }
}
