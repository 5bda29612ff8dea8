use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use crate::runtime::Stdlib;
use crate::toolchain::external::DEFAULT_COMMAND;

/// Inputs passed to `compute` by the command line tool.
pub const REFERENCE_INPUTS: (i32, i32) = (665, 1);

pub const ENV_ASSEMBLER: &str = "RERUN_WAT2WASM";
pub const ENV_STDLIB: &str = "RERUN_STDLIB";
pub const ENV_WORKDIR: &str = "RERUN_WORKDIR";

/// Split leading `--name` / `--no-name` flags from the program tokens.
///
/// Parsing stops at the first argument that does not start with `--`; a bare
/// `--` is consumed and ends the flags. Later flags override earlier ones.
pub fn split_flags(args: &[String]) -> (BTreeMap<String, bool>, Vec<String>) {
    let mut flags = BTreeMap::new();
    let mut rest = args;

    while let Some((first, tail)) = rest.split_first() {
        let Some(key) = first.strip_prefix("--") else {
            break;
        };
        rest = tail;

        if key.is_empty() {
            break;
        }

        match key.strip_prefix("no-") {
            Some(name) => flags.insert(name.to_string(), false),
            None => flags.insert(key.to_string(), true),
        };
    }

    (flags, rest.to_vec())
}

/// Everything the command line tool needs to know besides the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Delete intermediate artifacts after assembling
    pub cleanup: bool,
    /// Use the external assembler instead of the built-in one
    pub wat2wasm: bool,
    /// Print the translation unit
    pub wat: bool,
    /// Print the instruction listing
    pub listing: bool,
    /// Colorize console output
    pub color: bool,
    /// Enable debug logging
    pub verbose: bool,
    pub help: bool,

    pub assembler: String,
    pub workdir: PathBuf,
    pub stdlib: Stdlib,
}

impl Options {
    /// Defaults, with environment overrides applied.
    pub fn from_env(color: bool) -> Self {
        Self {
            cleanup: true,
            wat2wasm: true,
            wat: false,
            listing: false,
            color,
            verbose: false,
            help: false,
            assembler: env::var(ENV_ASSEMBLER).unwrap_or_else(|_| DEFAULT_COMMAND.to_string()),
            workdir: env::var_os(ENV_WORKDIR)
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            stdlib: env::var_os(ENV_STDLIB)
                .map(|path| Stdlib::Module(PathBuf::from(path)))
                .unwrap_or(Stdlib::Native),
        }
    }

    /// Apply parsed flags. Returns the names that are not options.
    pub fn apply_flags(&mut self, flags: &BTreeMap<String, bool>) -> Vec<String> {
        let mut unknown = Vec::new();

        for (name, &value) in flags {
            match name.as_str() {
                "cleanup" => self.cleanup = value,
                "wat2wasm" => self.wat2wasm = value,
                "wat" => self.wat = value,
                "listing" => self.listing = value,
                "color" => self.color = value,
                "verbose" => self.verbose = value,
                "help" => self.help = value,
                _ => unknown.push(name.clone()),
            }
        }

        unknown
    }
}
