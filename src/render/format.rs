use super::imports::ImportStatement;
use crate::fields::Field;

const LICENSE: &str = "// SPDX-License-Identifier: UNLICENSED";
const PRAGMA: &str = "pragma solidity ^0.8.26;";

pub(super) fn append_header(out: &mut String) {
    out.push_str(LICENSE);
    out.push('\n');
    out.push_str(PRAGMA);
    out.push_str("\n\n");
}

pub(super) fn append_imports(out: &mut String, imports: &[ImportStatement]) {
    if imports.is_empty() {
        return;
    }
    for import in imports {
        out.push_str(&import.to_string());
        out.push('\n');
    }
    out.push('\n');
}

/// Emit the contract body. Members are separated by one blank line.
pub(super) fn append_contract(out: &mut String, name: &str, bases: &[&str], members: &[String]) {
    if bases.is_empty() {
        out.push_str(&format!("contract {name} {{\n"));
    } else {
        out.push_str(&format!("contract {name} is {} {{\n", bases.join(", ")));
    }
    out.push_str(&members.join("\n"));
    out.push_str("}\n");
}

pub(super) fn struct_block(name: &str, fields: &[Field]) -> String {
    let mut out = format!("  struct {name} {{\n");
    for field in fields {
        out.push_str(&format!("    {} {};\n", field.type_name, field.identifier));
    }
    out.push_str("  }\n");
    out
}

/// Append lines verbatim, each indented by `indent` spaces.
pub(super) fn push_lines(out: &mut String, indent: usize, lines: &[&str]) {
    let pad = " ".repeat(indent);
    for line in lines {
        if line.is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
}

pub(super) fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
