//! Field list parsing for struct and schema declarations.
//!
//! Field lists arrive as a Solidity parameter list without the enclosing
//! parentheses (`address token, uint256 amount`). Parsing is strict: every
//! entry must be a type followed by an identifier, and an entry whose
//! brackets do not balance is rejected, since that is what a type with an
//! embedded comma looks like once the list has been split.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// One `(type, identifier)` entry. Order within a list is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub type_name: String,
    pub identifier: String,
}

impl Field {
    pub fn new(type_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.identifier)
    }
}

/// Reasons a raw field list is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldListError {
    #[error("field list is empty")]
    Empty,

    #[error("field {index} is empty (stray comma?)")]
    EmptyEntry { index: usize },

    #[error("field {index} ({entry:?}) needs a type and an identifier")]
    MissingIdentifier { index: usize, entry: String },

    #[error("field {index} has an invalid type {type_name:?}")]
    InvalidType { index: usize, type_name: String },

    #[error("field {index} has an invalid identifier {identifier:?}")]
    InvalidIdentifier { index: usize, identifier: String },

    #[error("field {index} ({entry:?}) has unbalanced brackets; types may not contain commas")]
    UnbalancedBrackets { index: usize, entry: String },
}

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex compiles")
    })
}

fn type_name_regex() -> &'static Regex {
    static TYPE_NAME: OnceLock<Regex> = OnceLock::new();
    TYPE_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.\[\]()<>= ]*$").expect("type name regex compiles")
    })
}

/// Whether `text` is a valid Solidity identifier.
pub fn is_identifier(text: &str) -> bool {
    identifier_regex().is_match(text)
}

/// Whether `text` looks like a type expression. Only the character set is
/// checked; whether the type exists is left to the compiler.
pub fn is_type_name(text: &str) -> bool {
    type_name_regex().is_match(text)
}

/// Parse a comma-separated `"<type> <identifier>"` list.
pub fn parse_fields(raw: &str) -> Result<Vec<Field>, FieldListError> {
    if raw.trim().is_empty() {
        return Err(FieldListError::Empty);
    }
    raw.split(',')
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &str) -> Result<Field, FieldListError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    let Some((identifier, type_tokens)) = tokens.split_last() else {
        return Err(FieldListError::EmptyEntry { index });
    };
    if !brackets_balanced(entry) {
        return Err(FieldListError::UnbalancedBrackets {
            index,
            entry: entry.trim().to_string(),
        });
    }
    if type_tokens.is_empty() {
        return Err(FieldListError::MissingIdentifier {
            index,
            entry: entry.trim().to_string(),
        });
    }
    let type_name = type_tokens.join(" ");
    if !is_type_name(&type_name) {
        return Err(FieldListError::InvalidType { index, type_name });
    }
    if !is_identifier(identifier) {
        return Err(FieldListError::InvalidIdentifier {
            index,
            identifier: identifier.to_string(),
        });
    }
    Ok(Field::new(type_name, *identifier))
}

/// Check an already-split field against the same rules `parse_fields` applies.
///
/// The field must survive a re-parse unchanged, so a type with unbalanced
/// brackets or uncollapsed whitespace is rejected here too.
pub fn check_field(index: usize, field: &Field) -> Result<(), FieldListError> {
    if !is_identifier(&field.identifier) {
        return Err(FieldListError::InvalidIdentifier {
            index,
            identifier: field.identifier.clone(),
        });
    }
    let parsed = parse_entry(index, &field.to_string())?;
    if parsed != *field {
        return Err(FieldListError::InvalidType {
            index,
            type_name: field.type_name.clone(),
        });
    }
    Ok(())
}

fn brackets_balanced(entry: &str) -> bool {
    let mut stack = Vec::new();
    for ch in entry.chars() {
        match ch {
            '(' | '[' => stack.push(ch),
            ')' if stack.pop() != Some('(') => return false,
            ']' if stack.pop() != Some('[') => return false,
            _ => {}
        }
    }
    stack.is_empty()
}

/// Render the schema signature: `"type name"` pairs joined by `", "`.
///
/// This string is the registry key for attestations of this shape, so it
/// must follow the declaration order exactly.
pub fn render_signature(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
