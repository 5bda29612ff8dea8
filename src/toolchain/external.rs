use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use tempfile::TempDir;

use crate::bytecode::TranslationUnit;
use crate::toolchain::{AssembleError, Assembler};

/// Default external assembler from the WebAssembly Binary Toolkit.
pub const DEFAULT_COMMAND: &str = "wat2wasm";

/// Hands out artifact stems. Every call must return a stem not returned
/// before by the same namer.
pub trait ArtifactNamer: Send + Sync {
    fn next_stem(&self) -> String;
}

/// `<prefix>-0`, `<prefix>-1`, ...
#[derive(Debug)]
pub struct SequenceNamer {
    prefix: String,
    next: AtomicU64,
}

impl SequenceNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl Default for SequenceNamer {
    fn default() -> Self {
        Self::new("rerun")
    }
}

impl ArtifactNamer for SequenceNamer {
    fn next_stem(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// The `.wat`/`.wasm` pair for one assemble call. Both files are removed
/// when the guard drops unless cleanup is disabled.
struct StagedArtifacts {
    wat: PathBuf,
    wasm: PathBuf,
    cleanup: bool,
}

impl StagedArtifacts {
    fn new(dir: &Path, stem: &str, cleanup: bool) -> Self {
        Self {
            wat: dir.join(format!("{}.wat", stem)),
            wasm: dir.join(format!("{}.wasm", stem)),
            cleanup,
        }
    }
}

impl Drop for StagedArtifacts {
    fn drop(&mut self) {
        if !self.cleanup {
            crate::info!(
                "keeping {} and {}",
                self.wat.display(),
                self.wasm.display()
            );
            return;
        }

        for path in [&self.wat, &self.wasm] {
            // A missing file means an earlier step failed; that error is
            // already on its way to the caller.
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != io::ErrorKind::NotFound {
                    crate::warn!("unable to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}

/// Staging directory that is either removed on drop or deliberately kept.
enum Staging {
    Owned(TempDir),
    Kept(PathBuf),
}

impl Staging {
    fn path(&self) -> &Path {
        match self {
            Staging::Owned(dir) => dir.path(),
            Staging::Kept(path) => path,
        }
    }
}

/// Runs an external text-to-binary assembler as `<command> [args..] <in.wat> -o <out.wasm>`.
///
/// Artifacts live in a private staging directory with a random name, so
/// separate assemblers (in this or any other process) never collide. Within
/// one assembler, stems come from the injected [`ArtifactNamer`].
pub struct ExternalAssembler {
    command: String,
    args: Vec<String>,
    staging: Staging,
    namer: Box<dyn ArtifactNamer>,
    cleanup: bool,
}

impl ExternalAssembler {
    /// Create an assembler whose staging directory lives under `workdir`.
    pub fn new(
        command: impl Into<String>,
        workdir: &Path,
        cleanup: bool,
    ) -> Result<Self, AssembleError> {
        let dir = tempfile::Builder::new()
            .prefix("rerun-")
            .tempdir_in(workdir)
            .map_err(|source| AssembleError::Staging {
                dir: workdir.to_path_buf(),
                source,
            })?;

        let staging = if cleanup {
            Staging::Owned(dir)
        } else {
            Staging::Kept(dir.keep())
        };
        crate::debug!("staging artifacts in {}", staging.path().display());

        Ok(Self {
            command: command.into(),
            args: Vec::new(),
            staging,
            namer: Box::new(SequenceNamer::default()),
            cleanup,
        })
    }

    /// Arguments passed to the tool before the input file.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_namer(mut self, namer: impl ArtifactNamer + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Assembler for ExternalAssembler {
    fn assemble(&self, unit: &TranslationUnit) -> Result<Vec<u8>, AssembleError> {
        let dir = self.staging.path();
        let artifacts = StagedArtifacts::new(dir, &self.namer.next_stem(), self.cleanup);

        fs::write(&artifacts.wat, unit.text()).map_err(|source| AssembleError::ArtifactIo {
            path: artifacts.wat.clone(),
            source,
        })?;

        crate::debug!(
            "running {} {} -o {}",
            self.command,
            artifacts.wat.display(),
            artifacts.wasm.display()
        );
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(&artifacts.wat)
            .arg("-o")
            .arg(&artifacts.wasm)
            .current_dir(dir)
            .output()
            .map_err(|source| AssembleError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AssembleError::AssemblerFailure {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        fs::read(&artifacts.wasm).map_err(|source| AssembleError::ArtifactIo {
            path: artifacts.wasm.clone(),
            source,
        })
    }
}
