use super::format::{
    append_contract, append_header, append_imports, bool_literal, push_lines, struct_block,
};
use super::imports::{resolve_imports, Symbol};
use crate::fields::render_signature;
use crate::spec::ObligationSpec;

const DATA_STRUCT: &str = "ObligationData";
const DEMAND_STRUCT: &str = "DemandData";

/// Compose full obligation contract source.
pub fn compose_obligation(spec: &ObligationSpec) -> String {
    let mut out = String::new();
    append_header(&mut out);
    append_imports(&mut out, &resolve_imports(obligation_symbols(spec)));

    let mut bases = vec![Symbol::BaseObligation.as_str()];
    if spec.has_verification {
        bases.push(Symbol::IArbiter.as_str());
    }

    let mut members = Vec::new();
    if spec.has_verification {
        members.push("  using ArbiterUtils for Attestation;\n".to_string());
    }
    members.push(struct_block(DATA_STRUCT, &spec.data_fields));
    if spec.has_verification {
        let demand = spec.demand_fields.as_deref().unwrap_or_default();
        members.push(struct_block(DEMAND_STRUCT, demand));
    }
    members.push(constructor(spec));
    members.push(make_obligation(spec.is_revocable));
    for index in 0..spec.effective_finalization_terms() {
        members.push(finalization_term(index));
    }
    if spec.has_verification {
        members.push(check_obligation());
    }

    append_contract(&mut out, &spec.name, &bases, &members);
    tracing::debug!(
        name = %spec.name,
        members = members.len(),
        finalization_terms = spec.effective_finalization_terms(),
        "composed obligation"
    );
    out
}

fn obligation_symbols(spec: &ObligationSpec) -> Vec<Symbol> {
    let mut symbols = vec![
        Symbol::BaseObligation,
        Symbol::Ieas,
        Symbol::ISchemaRegistry,
        Symbol::Attestation,
        Symbol::AttestationRequest,
        Symbol::AttestationRequestData,
    ];
    if spec.is_revocable {
        symbols.push(Symbol::RevocationRequest);
        symbols.push(Symbol::RevocationRequestData);
    }
    if spec.has_verification {
        symbols.push(Symbol::IArbiter);
        symbols.push(Symbol::ArbiterUtils);
    }
    symbols
}

fn constructor(spec: &ObligationSpec) -> String {
    let mut out = String::new();
    push_lines(
        &mut out,
        2,
        &["constructor(IEAS _eas, ISchemaRegistry _schemaRegistry)"],
    );
    out.push_str(&format!(
        "    BaseObligation(_eas, _schemaRegistry, \"{}\", {})\n",
        render_signature(&spec.data_fields),
        bool_literal(spec.is_revocable)
    ));
    push_lines(&mut out, 2, &["{}"]);
    out
}

fn make_obligation(is_revocable: bool) -> String {
    let mut out = String::new();
    push_lines(
        &mut out,
        2,
        &[
            "function makeObligation(",
            "  ObligationData calldata data,",
            "  uint64 expirationTime,",
            "  bytes32 fulfilling",
            ") public returns (bytes32 uid_) {",
        ],
    );
    push_lines(
        &mut out,
        4,
        &[
            "// implement custom obligation pre-conditions here",
            "// ...",
            "uid_ = eas.attest(",
            "  AttestationRequest({",
            "    schema: ATTESTATION_SCHEMA,",
            "    data: AttestationRequestData({",
            "      recipient: msg.sender,",
            "      expirationTime: expirationTime,",
        ],
    );
    out.push_str(&format!(
        "          revocable: {},\n",
        bool_literal(is_revocable)
    ));
    push_lines(
        &mut out,
        4,
        &[
            "      refUID: fulfilling,",
            "      data: abi.encode(data),",
            "      value: 0",
            "    })",
            "  })",
            ");",
            "// implement custom obligation post-conditions here",
            "// ...",
        ],
    );
    push_lines(&mut out, 2, &["}"]);
    out
}

fn finalization_term(index: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  function finalize_{index}(bytes32 obligation) public returns (bool) {{\n"
    ));
    push_lines(
        &mut out,
        4,
        &[
            "// implement custom finalization term (e.g. cancellation or completion) pre-conditions here",
            "// ...",
            "eas.revoke(",
            "  RevocationRequest({",
            "    schema: ATTESTATION_SCHEMA,",
            "    data: RevocationRequestData({uid: obligation, value: 0})",
            "  })",
            ");",
            "// implement custom finalization term (e.g. cancellation or completion) post-conditions here",
            "// ...",
            "return true;",
        ],
    );
    push_lines(&mut out, 2, &["}"]);
    out
}

fn check_obligation() -> String {
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
    push_lines(
        &mut out,
        4,
        &[
            "if (!obligation._checkIntrinsic()) return false;",
            "",
            "ObligationData memory data_ = abi.decode(obligation.data, (ObligationData));",
            "DemandData memory demand_ = abi.decode(demand, (DemandData));",
            "",
            "// implement custom obligation verification logic here",
            "// we recommend early revert on invalid conditions",
            "// ...",
            "return true;",
        ],
    );
    push_lines(&mut out, 2, &["}"]);
    out
}

#[cfg(test)]
#[path = "obligation_tests.rs"]
mod tests;
