use std::env;
use std::io::IsTerminal;

use rerun::cli::{self, Console, Options, format_result, split_flags};
use rerun::log::{self, Level};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let (flags, tokens) = split_flags(&args);
    let mut options = Options::from_env(std::io::stdout().is_terminal());
    let unknown = options.apply_flags(&flags);

    log::set_color(options.color);
    if options.verbose {
        log::set_level(Level::Debug);
    }
    for name in unknown {
        rerun::warn!("ignoring unknown option --{}", name);
    }

    if options.help {
        print_usage();
        return;
    }

    // Console write failures (e.g. a closed pipe) are not worth a panic.
    let console = Console::new(options.color);
    match cli::run(&tokens, &options) {
        Ok(report) => {
            if let Some(wat) = &report.wat {
                let _ = console.plain(wat);
            }
            if let Some(listing) = &report.listing {
                let _ = console.plain(listing);
            }
            let _ = console.info(&format_result(&tokens, report.result));
        }
        Err(e) => {
            let _ = console.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("RERUN - a tiny stack language compiled to WebAssembly");
    println!();
    println!("Usage:");
    println!("  rerun [--option | --no-option]... [--] <token>...");
    println!();
    println!("Tokens:");
    println!("  p1, p2                    Push a parameter (665 and 1)");
    println!("  <digits>                  Push an unsigned literal");
    println!("  add sub mul div rem       Unsigned i32 arithmetic ( a b -- c )");
    println!("  cpow                      Exponentiation via stdlib.pow ( a b -- c )");
    println!();
    println!("Options:");
    println!("  --no-cleanup              Keep staged .wat/.wasm artifacts");
    println!("  --no-wat2wasm             Assemble in-process instead of running wat2wasm");
    println!("  --wat                     Print the generated module text");
    println!("  --listing                 Print the instruction listing");
    println!("  --color / --no-color      Force colored output on or off");
    println!("  --verbose                 Debug logging");
    println!("  --help                    Show this help");
    println!();
    println!("Environment:");
    println!("  RERUN_WAT2WASM            Assembler command (default: wat2wasm)");
    println!("  RERUN_STDLIB              Prebuilt relib.wasm to link as stdlib");
    println!("  RERUN_WORKDIR             Parent directory for staged artifacts");
}
