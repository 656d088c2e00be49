mod check;
mod init;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::TempDir;

const STYLESHEET: &str = "
    .flex { display: flex; }
    .block { display: block; }
    .items-center { align-items: center; }
    .p-2 { padding: 0.5rem; }
    .p-4 { padding: 1rem; }
";

/// A scratch project directory plus a way to run the binary inside it. The
/// `.git` marker stops config discovery from walking above the sandbox.
pub struct CliTest {
    dir: TempDir,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join(".git"))?;
        Ok(Self { dir })
    }

    /// A project with a default config and a compiled stylesheet in place.
    pub fn with_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".twlintrc.json", "{}")?;
        test.write_file("dist/output.css", STYLESHEET)?;
        Ok(test)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, path: impl AsRef<Path>, contents: &str) -> Result<()> {
        let path = self.dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_twlint"));
        cmd.current_dir(self.dir.path()).env("NO_COLOR", "1").args(args);
        cmd.output().expect("failed to run twlint")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
