use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::debug;

use crate::utils::config::driver::{DEFAULT_ASSEMBLER, DEFAULT_LINKER};
use crate::utils::errors::{SignalError, SignalResult};

/// Result of one external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub output: String,
}

impl ToolOutput {
    fn from_process(output: Output) -> Self {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Self {
            success: output.status.success(),
            output: text,
        }
    }
}

/// External assembler and linker.
pub trait Toolchain {
    fn assemble(&self, listing: &Path) -> SignalResult<ToolOutput>;
    fn link(&self, object: &Path) -> SignalResult<ToolOutput>;

    /// Object file the assembler produces for `listing`.
    fn object_path(&self, listing: &Path) -> PathBuf {
        listing.with_extension("obj")
    }
}

/// Microsoft Macro Assembler: `ml /c /coff` followed by `link /subsystem:console`.
#[derive(Debug, Clone)]
pub struct MasmToolchain {
    assembler: String,
    linker: String,
}

impl MasmToolchain {
    pub fn new(assembler: impl Into<String>, linker: impl Into<String>) -> Self {
        Self {
            assembler: assembler.into(),
            linker: linker.into(),
        }
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        file: &Path,
        stage: &str,
    ) -> SignalResult<ToolOutput> {
        debug!("{}: {} {:?} {}", stage, program, args, file.display());
        let mut command = Command::new(program);
        command.args(args);
        // ml and link write their outputs into the working directory.
        match (file.parent().filter(|dir| !dir.as_os_str().is_empty()), file.file_name()) {
            (Some(dir), Some(name)) => command.arg(name).current_dir(dir),
            _ => command.arg(file),
        };
        command
            .output()
            .map(ToolOutput::from_process)
            .map_err(|err| {
                SignalError::build_error(stage, format!("failed to run '{}': {}", program, err))
            })
    }
}

impl Default for MasmToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_ASSEMBLER, DEFAULT_LINKER)
    }
}

impl Toolchain for MasmToolchain {
    fn assemble(&self, listing: &Path) -> SignalResult<ToolOutput> {
        self.run(&self.assembler, &["/c", "/coff"], listing, "Assembling")
    }

    fn link(&self, object: &Path) -> SignalResult<ToolOutput> {
        self.run(&self.linker, &["/subsystem:console"], object, "Linking")
    }
}

/// Assembles `listing` and links the resulting object. A failing tool is an error
/// carrying the tool's output.
pub fn assemble_and_link(toolchain: &dyn Toolchain, listing: &Path) -> SignalResult<()> {
    let assembled = toolchain.assemble(listing)?;
    if !assembled.success {
        return Err(SignalError::build_error("Assembling", assembled.output));
    }

    let object = toolchain.object_path(listing);
    let linked = toolchain.link(&object)?;
    if !linked.success {
        return Err(SignalError::build_error("Linking", linked.output));
    }
    Ok(())
}
