//! Import resolution from capability symbols.
//!
//! The table is walked in order and the request set is only consulted for
//! membership, so the emitted block never depends on how the caller built
//! the request.
use std::collections::BTreeSet;
use std::fmt;

/// Every symbol a generated contract may import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Attestation,
    Ieas,
    AttestationRequest,
    AttestationRequestData,
    RevocationRequest,
    RevocationRequestData,
    ISchemaRegistry,
    BaseObligation,
    IArbiter,
    ArbiterUtils,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Attestation => "Attestation",
            Symbol::Ieas => "IEAS",
            Symbol::AttestationRequest => "AttestationRequest",
            Symbol::AttestationRequestData => "AttestationRequestData",
            Symbol::RevocationRequest => "RevocationRequest",
            Symbol::RevocationRequestData => "RevocationRequestData",
            Symbol::ISchemaRegistry => "ISchemaRegistry",
            Symbol::BaseObligation => "BaseObligation",
            Symbol::IArbiter => "IArbiter",
            Symbol::ArbiterUtils => "ArbiterUtils",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source modules symbols are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportGroup {
    Common,
    Eas,
    SchemaRegistry,
    BaseObligation,
    Arbiter,
    ArbiterUtils,
}

pub struct GroupEntry {
    pub group: ImportGroup,
    pub symbols: &'static [Symbol],
    pub source: &'static str,
}

pub const IMPORT_GROUPS: &[GroupEntry] = &[
    GroupEntry {
        group: ImportGroup::Common,
        symbols: &[Symbol::Attestation],
        source: "@eas/Common.sol",
    },
    GroupEntry {
        group: ImportGroup::Eas,
        symbols: &[
            Symbol::Ieas,
            Symbol::AttestationRequest,
            Symbol::AttestationRequestData,
            Symbol::RevocationRequest,
            Symbol::RevocationRequestData,
        ],
        source: "@eas/IEAS.sol",
    },
    GroupEntry {
        group: ImportGroup::SchemaRegistry,
        symbols: &[Symbol::ISchemaRegistry],
        source: "@eas/ISchemaRegistry.sol",
    },
    GroupEntry {
        group: ImportGroup::BaseObligation,
        symbols: &[Symbol::BaseObligation],
        source: "../BaseObligation.sol",
    },
    GroupEntry {
        group: ImportGroup::Arbiter,
        symbols: &[Symbol::IArbiter],
        source: "../IArbiter.sol",
    },
    GroupEntry {
        group: ImportGroup::ArbiterUtils,
        symbols: &[Symbol::ArbiterUtils],
        source: "../ArbiterUtils.sol",
    },
];

/// One `import {..} from "..";` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub symbols: Vec<String>,
    pub source: String,
}

impl ImportStatement {
    /// Import of a single named contract that lives outside the table.
    pub fn local(symbol: &str) -> Self {
        Self {
            symbols: vec![symbol.to_string()],
            source: format!("./{symbol}.sol"),
        }
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "import {{{}}} from \"{}\";",
            self.symbols.join(", "),
            self.source
        )
    }
}

/// Whether `name` is one of the symbols the import table can bring in.
pub fn is_table_symbol(name: &str) -> bool {
    IMPORT_GROUPS
        .iter()
        .flat_map(|entry| entry.symbols)
        .any(|symbol| symbol.as_str() == name)
}

/// Map requested symbols to grouped import statements in table order.
pub fn resolve_imports<I>(requested: I) -> Vec<ImportStatement>
where
    I: IntoIterator<Item = Symbol>,
{
    let requested: BTreeSet<Symbol> = requested.into_iter().collect();
    let statements: Vec<ImportStatement> = IMPORT_GROUPS
        .iter()
        .filter_map(|entry| {
            let symbols: Vec<String> = entry
                .symbols
                .iter()
                .filter(|symbol| requested.contains(*symbol))
                .map(|symbol| symbol.to_string())
                .collect();
            if symbols.is_empty() {
                return None;
            }
            tracing::trace!(group = ?entry.group, ?symbols, "import group selected");
            Some(ImportStatement {
                symbols,
                source: entry.source.to_string(),
            })
        })
        .collect();
    tracing::debug!(
        requested = requested.len(),
        statements = statements.len(),
        "resolved imports"
    );
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(statements: &[ImportStatement]) -> Vec<String> {
        statements.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn groups_symbols_in_table_order() {
        let statements = resolve_imports([
            Symbol::AttestationRequestData,
            Symbol::BaseObligation,
            Symbol::Ieas,
            Symbol::Attestation,
        ]);
        assert_eq!(
            render(&statements),
            vec![
                "import {Attestation} from \"@eas/Common.sol\";",
                "import {IEAS, AttestationRequestData} from \"@eas/IEAS.sol\";",
                "import {BaseObligation} from \"../BaseObligation.sol\";",
            ]
        );
    }

    #[test]
    fn table_symbols_are_recognised() {
        assert!(is_table_symbol("IArbiter"));
        assert!(is_table_symbol("IEAS"));
        assert!(!is_table_symbol("PaymentObligation"));
        assert!(!is_table_symbol("Ieas"));
    }

    #[test]
    fn duplicate_requests_collapse() {
        let statements = resolve_imports([Symbol::IArbiter, Symbol::IArbiter, Symbol::IArbiter]);
        assert_eq!(
            render(&statements),
            vec!["import {IArbiter} from \"../IArbiter.sol\";"]
        );
    }

    #[test]
    fn order_is_independent_of_request_order() {
        let forward = resolve_imports([Symbol::ArbiterUtils, Symbol::Attestation, Symbol::Ieas]);
        let backward = resolve_imports([Symbol::Ieas, Symbol::Attestation, Symbol::ArbiterUtils]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_request_emits_nothing() {
        assert!(resolve_imports(std::iter::empty()).is_empty());
    }

    #[test]
    fn every_symbol_belongs_to_exactly_one_group() {
        let all = [
            Symbol::Attestation,
            Symbol::Ieas,
            Symbol::AttestationRequest,
            Symbol::AttestationRequestData,
            Symbol::RevocationRequest,
            Symbol::RevocationRequestData,
            Symbol::ISchemaRegistry,
            Symbol::BaseObligation,
            Symbol::IArbiter,
            Symbol::ArbiterUtils,
        ];
        for symbol in all {
            let owners = IMPORT_GROUPS
                .iter()
                .filter(|entry| entry.symbols.contains(&symbol))
                .count();
            assert_eq!(owners, 1, "{symbol} owned by {owners} groups");
        }
    }

    #[test]
    fn local_import_points_at_sibling_file() {
        assert_eq!(
            ImportStatement::local("PaymentObligation").to_string(),
            "import {PaymentObligation} from \"./PaymentObligation.sol\";"
        );
    }
}
