//! Contract file sink.
//!
//! Composers return text; this module is the only place it reaches disk.
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output file name for a contract: `<Name>.sol`.
pub fn contract_file_name(name: &str) -> String {
    format!("{name}.sol")
}

/// Write `source` to `<out_dir>/<name>.sol`, creating the directory as needed.
pub fn write_contract(out_dir: &Path, name: &str, source: &str, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let path = out_dir.join(contract_file_name(name));
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    fs::write(&path, source.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = source.len(), "wrote contract");
    Ok(path)
}

/// Write `spec` as pretty JSON to `path`, creating parent directories.
pub fn write_spec<T: Serialize>(path: &Path, spec: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut bytes = serde_json::to_vec_pretty(spec).context("serialize spec")?;
    bytes.push(b'\n');
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved spec");
    Ok(())
}

/// Print `source` to `out` unchanged.
pub fn print_contract<W: Write>(mut out: W, source: &str) -> Result<()> {
    out.write_all(source.as_bytes()).context("write contract")?;
    out.flush().context("flush contract")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_named_file_into_new_directory() {
        let root = tempfile::tempdir().expect("temp dir");
        let out_dir = root.path().join("contracts");
        let path = write_contract(&out_dir, "PaymentArbiter", "contract X {}\n", false)
            .expect("write contract");
        assert_eq!(path, out_dir.join("PaymentArbiter.sol"));
        assert_eq!(fs::read_to_string(&path).expect("read back"), "contract X {}\n");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let root = tempfile::tempdir().expect("temp dir");
        write_contract(root.path(), "A", "one", false).expect("first write");
        let err = write_contract(root.path(), "A", "two", false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_contract(root.path(), "A", "two", true).expect("forced write");
        let text = fs::read_to_string(root.path().join("A.sol")).expect("read back");
        assert_eq!(text, "two");
    }

    #[test]
    fn saved_spec_loads_back() {
        use crate::fields::parse_fields;
        use crate::spec::{load_spec, ObligationSpec};
        use crate::wizard::CollectedSpec;

        let spec = ObligationSpec {
            name: "EscrowObligation".to_string(),
            has_verification: true,
            is_revocable: true,
            finalization_term_count: 2,
            data_fields: parse_fields("address arbiter, bytes demand").expect("fields"),
            demand_fields: Some(parse_fields("uint256 deadline").expect("fields")),
        };
        let root = tempfile::tempdir().expect("temp dir");
        let path = root.path().join("specs/escrow.json");
        write_spec(&path, &CollectedSpec::Obligation(spec.clone())).expect("write spec");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("{\n  \"name\": \"EscrowObligation\""));
        let loaded: ObligationSpec = load_spec(&path).expect("load spec");
        assert_eq!(loaded, spec);
    }

    #[test]
    fn print_passes_text_through() {
        let mut buf = Vec::new();
        print_contract(&mut buf, "pragma solidity ^0.8.26;\n").expect("print");
        assert_eq!(buf, b"pragma solidity ^0.8.26;\n");
    }
}
