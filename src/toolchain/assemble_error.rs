use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while turning a translation unit into a binary module.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Could not create the private staging directory
    #[error("unable to create staging directory in {dir}: {source}")]
    Staging {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or reading an intermediate artifact failed
    #[error("unable to access {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The assembler could not be started at all
    #[error("unable to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The assembler ran and reported failure
    #[error("{command} {}{}", describe_status(.status), describe_stderr(.stderr))]
    AssemblerFailure {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The in-process assembler rejected the module text
    #[error("unable to assemble module: {0}")]
    Builtin(String),
}

fn describe_status(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("terminated with exit code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated with signal {}", signal);
        }
    }

    "terminated abnormally".to_string()
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim_end();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}
