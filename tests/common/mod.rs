//! Shared test infrastructure for integration tests.

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Fixture metadata loaded from fixture.json.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    /// `obligation` or `arbiter`; omitted when the answers choose the kind.
    #[serde(default)]
    pub kind: Option<String>,
    /// Contract name, which is also the output file stem.
    pub name: String,
    #[serde(default)]
    pub contains: Vec<String>,
    #[serde(default)]
    pub absent: Vec<String>,
    /// Expected occurrence counts for specific snippets.
    #[serde(default)]
    pub counts: Vec<(String, usize)>,
}

/// A fixture directory holding `fixture.json` plus either `spec.json`
/// (non-interactive) or `answers.txt` (piped to the prompts). An optional
/// `expected.sol` pins the whole generated file.
pub struct TestFixture {
    pub fixture_dir: PathBuf,
    pub config: FixtureConfig,
}

/// Generated contract plus the process output that produced it.
pub struct TestResult {
    pub source: String,
    pub stderr: String,
}

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn alkahest() -> Command {
    Command::new(env!("CARGO_BIN_EXE_alkahest"))
}

/// Run the binary with `args`, feeding `stdin` to it.
pub fn run_with_input(args: &[&str], stdin: &str) -> anyhow::Result<Output> {
    let mut child = alkahest()
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or_else(|| anyhow::anyhow!("stdin not captured"))?
        .write_all(stdin.as_bytes())?;
    Ok(child.wait_with_output()?)
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let fixture_dir = manifest_dir().join("tests/fixtures").join(name);
        let config_path = fixture_dir.join("fixture.json");
        let config: FixtureConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e)
            })?)?;
        Ok(Self {
            fixture_dir,
            config,
        })
    }

    fn spec_path(&self) -> Option<PathBuf> {
        let path = self.fixture_dir.join("spec.json");
        path.is_file().then_some(path)
    }

    fn answers(&self) -> anyhow::Result<String> {
        let path = self.fixture_dir.join("answers.txt");
        if !path.is_file() {
            return Ok(String::new());
        }
        Ok(std::fs::read_to_string(path)?)
    }

    /// Generate the fixture's contract into a temp dir and read it back.
    pub fn run(&self) -> anyhow::Result<TestResult> {
        let temp_dir = TempDir::new()?;
        let out_dir = temp_dir.path().join("contracts");
        let out_dir_arg = out_dir.display().to_string();
        let spec_path = self.spec_path().map(|p| p.display().to_string());

        let mut args = vec!["new"];
        if let Some(kind) = self.config.kind.as_deref() {
            args.push(kind);
        }
        if let Some(spec) = spec_path.as_deref() {
            args.extend(["--spec", spec]);
        }
        args.extend(["--out-dir", out_dir_arg.as_str()]);

        let output = run_with_input(&args, &self.answers()?)?;
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(anyhow::anyhow!("alkahest failed: {stderr}"));
        }
        let source = read_contract(&out_dir, &self.config.name)?;
        Ok(TestResult { source, stderr })
    }

    /// Check the generated source against the fixture expectations.
    pub fn assert_expectations(&self, result: &TestResult) {
        let expected_path = self.fixture_dir.join("expected.sol");
        if expected_path.is_file() {
            let expected = std::fs::read_to_string(&expected_path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {e}", expected_path.display()));
            assert_eq!(
                result.source,
                expected,
                "generated source differs from {}",
                expected_path.display()
            );
        }
        for snippet in &self.config.contains {
            assert!(
                result.source.contains(snippet.as_str()),
                "expected {snippet:?} in:\n{}",
                result.source
            );
        }
        for snippet in &self.config.absent {
            assert!(
                !result.source.contains(snippet.as_str()),
                "unexpected {snippet:?} in:\n{}",
                result.source
            );
        }
        for (snippet, expected) in &self.config.counts {
            let actual = result.source.matches(snippet.as_str()).count();
            assert_eq!(actual, *expected, "count of {snippet:?}");
        }
    }
}

fn read_contract(out_dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = out_dir.join(format!("{name}.sol"));
    std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

/// Braces balance and never dip below zero.
pub fn braces_balanced(source: &str) -> bool {
    let mut depth: i64 = 0;
    for ch in source.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
