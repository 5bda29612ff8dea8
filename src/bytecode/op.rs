// =============================================================================
// INSTRUCTION - compiled form of one rerun token
// =============================================================================

/// Function parameter read by `LoadParam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    P1,
    P2,
}

impl Param {
    pub fn name(self) -> &'static str {
        match self {
            Param::P1 => "p1",
            Param::P2 => "p2",
        }
    }
}

/// Native i32 arithmetic. Division and remainder are unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    UnsignedDiv,
    UnsignedRem,
}

/// Functions imported from the `stdlib` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryCall {
    Pow,
}

impl LibraryCall {
    /// Name of the import inside the `stdlib` namespace.
    pub fn name(self) -> &'static str {
        match self {
            LibraryCall::Pow => "pow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// ( -- p )
    LoadParam(Param),
    /// ( -- n )
    PushConst(u32),
    /// ( a b -- c )
    BinaryOp(BinaryOp),
    /// ( a b -- c ), computed by an imported function
    CallLibrary(LibraryCall),
}

/// Number of values an instruction pops and then pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEffect {
    pub pops: usize,
    pub pushes: usize,
}

impl StackEffect {
    const fn new(pops: usize, pushes: usize) -> Self {
        Self { pops, pushes }
    }
}

impl Instruction {
    pub fn effect(&self) -> StackEffect {
        match self {
            Instruction::LoadParam(_) | Instruction::PushConst(_) => StackEffect::new(0, 1),
            Instruction::BinaryOp(_) | Instruction::CallLibrary(_) => StackEffect::new(2, 1),
        }
    }

    /// The WebAssembly text for this instruction.
    pub fn wat(&self) -> String {
        match self {
            Instruction::LoadParam(param) => format!("local.get ${}", param.name()),
            Instruction::PushConst(value) => format!("i32.const {}", value),
            Instruction::BinaryOp(op) => match op {
                BinaryOp::Add => "i32.add".to_string(),
                BinaryOp::Sub => "i32.sub".to_string(),
                BinaryOp::Mul => "i32.mul".to_string(),
                BinaryOp::UnsignedDiv => "i32.div_u".to_string(),
                BinaryOp::UnsignedRem => "i32.rem_u".to_string(),
            },
            Instruction::CallLibrary(call) => format!("call ${}", call.name()),
        }
    }

    pub fn library_call(&self) -> Option<LibraryCall> {
        match self {
            Instruction::CallLibrary(call) => Some(*call),
            _ => None,
        }
    }
}
