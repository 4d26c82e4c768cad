use super::format::{append_contract, append_header, append_imports, push_lines, struct_block};
use super::imports::{resolve_imports, ImportStatement, Symbol};
use crate::spec::ArbiterSpec;

const DEMAND_STRUCT: &str = "DemandData";
const MISMATCH_ERROR: &str = "IncompatibleObligation";

/// Compose full arbiter contract source.
///
/// A generic arbiter (no base obligation) skips the stored reference, the
/// schema guard and the base import; the error is declared either way so
/// custom checks can reuse it.
pub fn compose_arbiter(spec: &ArbiterSpec) -> String {
    let base = spec.base_obligation_name.as_deref();

    let mut imports = resolve_imports([
        Symbol::Attestation,
        Symbol::IArbiter,
        Symbol::ArbiterUtils,
    ]);
    if let Some(base) = base {
        imports.push(ImportStatement::local(base));
    }

    let mut out = String::new();
    append_header(&mut out);
    append_imports(&mut out, &imports);

    let mut members = vec![
        "  using ArbiterUtils for Attestation;\n".to_string(),
        struct_block(DEMAND_STRUCT, &spec.demand_fields),
        format!("  error {MISMATCH_ERROR}();\n"),
    ];
    match base {
        Some(base) => {
            members.push(format!("  {base} public immutable baseObligation;\n"));
            members.push(format!(
                "  constructor({base} _baseObligation) {{\n    baseObligation = _baseObligation;\n  }}\n"
            ));
        }
        None => members.push("  constructor() {}\n".to_string()),
    }
    members.push(check_obligation(base.is_some()));

    append_contract(&mut out, &spec.name, &[Symbol::IArbiter.as_str()], &members);
    tracing::debug!(
        name = %spec.name,
        base = base.unwrap_or("<generic>"),
        "composed arbiter"
    );
    out
}

fn check_obligation(specialized: bool) -> String {
    let mut out = String::new();
    push_lines(
        &mut out,
        2,
        &[
            "function checkObligation(",
            "  Attestation memory obligation,",
            "  bytes memory demand,",
            "  bytes32 counteroffer",
            ") public view override returns (bool) {",
        ],
    );
    if specialized {
        out.push_str(&format!(
            "    if (obligation.schema != baseObligation.ATTESTATION_SCHEMA()) revert {MISMATCH_ERROR}();\n"
        ));
    }
    push_lines(
        &mut out,
        4,
        &[
            "DemandData memory demand_ = abi.decode(demand, (DemandData));",
            "",
            "// implement custom checks here.",
            "// early revert with custom errors is recommended on failure.",
            "// remember that utility checks are available in ArbiterUtils",
        ],
    );
    if specialized {
        push_lines(
            &mut out,
            4,
            &["// and you can also use baseObligation.checkObligation() if appropriate."],
        );
    }
    push_lines(&mut out, 4, &["// ...", "return true;"]);
    push_lines(&mut out, 2, &["}"]);
    out
}
