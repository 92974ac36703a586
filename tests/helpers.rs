//! Shared test utilities for app2luggage integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment: a scratch directory holding a fake application bundle
/// and a stand-in luggage.make include file.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub temp: TempDir,
    /// Fake application bundle, name contains a space on purpose.
    pub app: PathBuf,
    /// Stand-in Luggage include file.
    pub luggage: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");

        let app = temp.path().join("My App.app");
        fs::create_dir_all(app.join("Contents/MacOS")).expect("Failed to create app bundle");
        fs::write(app.join("Contents/Info.plist"), "<plist/>")
            .expect("Failed to write Info.plist");

        let luggage = temp.path().join("luggage.make");
        fs::write(&luggage, "# stand-in luggage.make\n").expect("Failed to write luggage.make");

        Self { temp, app, luggage }
    }

    /// Command for the binary, working directory set to the scratch dir so
    /// relative workspace paths land inside it.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("app2luggage").expect("binary builds");
        cmd.current_dir(self.temp.path());
        cmd
    }

    /// Command pre-loaded with the minimal valid flag set and the downstream
    /// steps disabled (no tar/bzip2/make needed on the test host).
    pub fn cmd_minimal(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--application")
            .arg(&self.app)
            .arg("--package-id")
            .arg("com.example.myapp")
            .arg("--reverse-domain")
            .arg("com.example")
            .arg("--luggage-path")
            .arg(&self.luggage)
            .arg("--create-tarball=false")
            .arg("--make-dmg=false");
        cmd
    }

    /// Workspace directory the minimal flag set resolves to.
    pub fn workspace(&self) -> PathBuf {
        self.temp.path().join("com.example.myapp")
    }
}
