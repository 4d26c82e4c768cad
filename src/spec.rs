//! Contract specifications consumed by the composers.
//!
//! Specs are plain data: built once by the wizard or loaded from JSON, then
//! validated before composition so the composers never see a malformed one.
use crate::fields::{check_field, is_identifier, parse_fields, Field, FieldListError};
use crate::render::is_table_symbol;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Structural problems that make a spec unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("contract name is empty")]
    EmptyName,

    #[error("contract name {0:?} is not a valid identifier")]
    InvalidName(String),

    #[error("{0} must contain at least one field")]
    NoFields(&'static str),

    #[error("verification requires demand fields")]
    MissingDemandFields,

    #[error("base obligation {0:?} is not an identifier or clashes with another name")]
    InvalidBaseObligation(String),

    #[error("invalid field list: {0}")]
    Fields(#[from] FieldListError),
}

/// Shared surface of both contract archetypes.
pub trait ContractSpec {
    /// Contract identifier, also used for the output file name.
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), SpecError>;
}

/// Inputs for an obligation contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationSpec {
    pub name: String,
    #[serde(default)]
    pub has_verification: bool,
    #[serde(default)]
    pub is_revocable: bool,
    #[serde(default)]
    pub finalization_term_count: usize,
    #[serde(deserialize_with = "fields_from_json")]
    pub data_fields: Vec<Field>,
    #[serde(
        default,
        deserialize_with = "optional_fields_from_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub demand_fields: Option<Vec<Field>>,
}

impl ObligationSpec {
    /// Number of finalization methods to emit; always 0 for non-revocable specs.
    pub fn effective_finalization_terms(&self) -> usize {
        if self.is_revocable {
            self.finalization_term_count
        } else {
            0
        }
    }
}

impl ContractSpec for ObligationSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), SpecError> {
        validate_name(&self.name)?;
        validate_fields("data_fields", &self.data_fields)?;
        if self.has_verification {
            let demand = self
                .demand_fields
                .as_deref()
                .ok_or(SpecError::MissingDemandFields)?;
            validate_fields("demand_fields", demand)?;
        }
        Ok(())
    }
}

/// Inputs for an arbiter contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbiterSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_obligation_name: Option<String>,
    #[serde(deserialize_with = "fields_from_json")]
    pub demand_fields: Vec<Field>,
}

impl ContractSpec for ArbiterSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), SpecError> {
        validate_name(&self.name)?;
        if let Some(base) = self.base_obligation_name.as_deref() {
            if !is_identifier(base) || base == self.name || is_table_symbol(base) {
                return Err(SpecError::InvalidBaseObligation(base.to_string()));
            }
        }
        validate_fields("demand_fields", &self.demand_fields)
    }
}

fn validate_name(name: &str) -> Result<(), SpecError> {
    if name.trim().is_empty() {
        return Err(SpecError::EmptyName);
    }
    if !is_identifier(name) {
        return Err(SpecError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_fields(label: &'static str, fields: &[Field]) -> Result<(), SpecError> {
    if fields.is_empty() {
        return Err(SpecError::NoFields(label));
    }
    for (index, field) in fields.iter().enumerate() {
        check_field(index, field)?;
    }
    Ok(())
}

/// Field lists in JSON may be a raw parameter string or an explicit array.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldsRepr {
    Raw(String),
    List(Vec<Field>),
}

impl FieldsRepr {
    fn into_fields(self) -> Result<Vec<Field>, FieldListError> {
        match self {
            FieldsRepr::Raw(raw) => parse_fields(&raw),
            FieldsRepr::List(fields) => Ok(fields),
        }
    }
}

fn fields_from_json<'de, D>(deserializer: D) -> Result<Vec<Field>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldsRepr::deserialize(deserializer)?
        .into_fields()
        .map_err(serde::de::Error::custom)
}

fn optional_fields_from_json<'de, D>(deserializer: D) -> Result<Option<Vec<Field>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FieldsRepr>::deserialize(deserializer)?
        .map(FieldsRepr::into_fields)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Load and validate a spec from a JSON file.
pub fn load_spec<T>(path: &Path) -> Result<T>
where
    T: ContractSpec + DeserializeOwned,
{
    let bytes = fs::read(path).with_context(|| format!("read spec {}", path.display()))?;
    let spec: T = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse spec JSON {}", path.display()))?;
    spec.validate()
        .with_context(|| format!("invalid spec {}", path.display()))?;
    Ok(spec)
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
