//! The `rerun` command line tool: compile the program given as arguments,
//! assemble it, link the numeric library and run `compute(665, 1)`.

pub mod console;
pub mod options;

use crate::bytecode::Compiler;
use crate::bytecode::disasm::disassemble_to_string;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::toolchain::{Assembler, BuiltinAssembler, ExternalAssembler};

pub use console::{Console, format_result};
pub use options::{Options, REFERENCE_INPUTS, split_flags};

/// Output of one run, already formatted for the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub wat: Option<String>,
    pub listing: Option<String>,
    pub result: i32,
}

fn assembler_for(options: &Options) -> Result<Box<dyn Assembler>> {
    if options.wat2wasm {
        let assembler =
            ExternalAssembler::new(options.assembler.as_str(), &options.workdir, options.cleanup)?;
        Ok(Box::new(assembler))
    } else {
        Ok(Box::new(BuiltinAssembler::new()))
    }
}

/// Compile, assemble and run `tokens` on the reference inputs.
pub fn run(tokens: &[String], options: &Options) -> Result<Report> {
    // Compiling first surfaces program errors before any tool is touched.
    let program = Compiler::new().compile_program(tokens)?;
    crate::debug!(
        "compiled {} tokens, imports: {:?}",
        tokens.len(),
        program.unit.imports()
    );

    let assembler = assembler_for(options)?;
    let wasm = assembler.assemble(&program.unit)?;
    crate::debug!("assembled {} bytes", wasm.len());

    let runtime = Runtime::new(options.stdlib.clone());
    let (p1, p2) = REFERENCE_INPUTS;
    let result = runtime.run(&wasm, p1, p2)?;

    Ok(Report {
        wat: options.wat.then(|| program.unit.text().to_string()),
        listing: options
            .listing
            .then(|| disassemble_to_string(tokens, &program.instructions)),
        result,
    })
}
