//! Interactive spec collection as an explicit state machine.
//!
//! `Wizard::feed` consumes exactly one answer and moves to the next step;
//! it never reads or writes anything itself. The driver in `driver` owns
//! the I/O. An empty answer always selects the prompt's default.
use crate::cli::ContractKind;
use crate::fields::{is_identifier, parse_fields, render_signature, Field, FieldListError};
use crate::render::{compose_arbiter, compose_obligation, is_table_symbol};
use crate::spec::{ArbiterSpec, ContractSpec, ObligationSpec, SpecError};
use serde::Serialize;
use thiserror::Error;

mod driver;

pub use driver::run_wizard;

const DEFAULT_OBLIGATION_NAME: &str = "PaymentObligation";
const DEFAULT_ARBITER_NAME: &str = "PaymentArbiter";
const DEFAULT_FIELDS: &str = "address token, uint256 amount";
const DEFAULT_TERM_COUNT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ChooseKind,
    AskName,
    AskFields,
    AskVerification,
    AskDemandFields,
    AskRevocable,
    AskTermCount,
    AskBaseObligation,
    Done,
}

/// Why an answer was not accepted. The wizard stays on the same step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Please choose [O]bligation or [A]rbiter")]
    Kind,

    #[error("{0:?} is not a valid contract name")]
    Name(String),

    #[error("{0}")]
    Fields(#[from] FieldListError),

    #[error("Please answer y or n")]
    YesNo,

    #[error("{0:?} is not a non-negative whole number")]
    Count(String),

    #[error("all questions have been answered")]
    Finished,
}

/// A finished spec of either kind. Serializes as the bare inner spec, the
/// same shape `--spec` reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CollectedSpec {
    Obligation(ObligationSpec),
    Arbiter(ArbiterSpec),
}

impl CollectedSpec {
    pub fn name(&self) -> &str {
        match self {
            CollectedSpec::Obligation(spec) => spec.name(),
            CollectedSpec::Arbiter(spec) => spec.name(),
        }
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        match self {
            CollectedSpec::Obligation(spec) => spec.validate(),
            CollectedSpec::Arbiter(spec) => spec.validate(),
        }
    }

    pub fn compose(&self) -> String {
        match self {
            CollectedSpec::Obligation(spec) => compose_obligation(spec),
            CollectedSpec::Arbiter(spec) => compose_arbiter(spec),
        }
    }
}

#[derive(Debug, Default)]
struct Draft {
    kind: Option<ContractKind>,
    name: String,
    data_fields: Vec<Field>,
    has_verification: bool,
    demand_fields: Option<Vec<Field>>,
    is_revocable: bool,
    term_count: usize,
    base_obligation: Option<String>,
}

#[derive(Debug)]
pub struct Wizard {
    step: Step,
    draft: Draft,
}

impl Wizard {
    /// Start a wizard; a known kind skips the kind question.
    pub fn new(kind: Option<ContractKind>) -> Self {
        let step = if kind.is_some() {
            Step::AskName
        } else {
            Step::ChooseKind
        };
        Self {
            step,
            draft: Draft {
                kind,
                ..Draft::default()
            },
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Question text for the current step, including the default in brackets.
    pub fn prompt(&self) -> String {
        let obligation = self.draft.kind == Some(ContractKind::Obligation);
        match self.step {
            Step::ChooseKind => {
                "What kind of contract do you want to create?\n[O]bligation or [A]rbiter".to_string()
            }
            Step::AskName if obligation => format!(
                "Creating new obligation contract\nWhat's the contract name? We recommend it ends with 'Obligation'. [{DEFAULT_OBLIGATION_NAME}]"
            ),
            Step::AskName => format!(
                "Creating new arbiter contract\nWhat's the contract name? We recommend it ends with 'Arbiter'. [{DEFAULT_ARBITER_NAME}]"
            ),
            Step::AskFields => format!(
                "What's the obligation data schema? Enter a solidity ABI without parentheses. [{DEFAULT_FIELDS}]"
            ),
            Step::AskVerification => {
                "Will it have a default implementation of `checkObligation`? [y/N]".to_string()
            }
            Step::AskDemandFields if obligation => format!(
                "What's the demand schema for `checkObligation`? [{}]",
                render_signature(&self.draft.data_fields)
            ),
            Step::AskDemandFields => format!(
                "What's the demand schema? Enter a solidity ABI without parentheses. [{DEFAULT_FIELDS}]"
            ),
            Step::AskRevocable => {
                "Will it be revocable? This includes normal finalization, like collecting a payment. [y/N]"
                    .to_string()
            }
            Step::AskTermCount => format!(
                "How many finalization terms will it have? This includes cancellation or completion. [{DEFAULT_TERM_COUNT}]"
            ),
            Step::AskBaseObligation => {
                "What base obligation is it for? Leave blank for an obligation-generic arbiter."
                    .to_string()
            }
            Step::Done => String::new(),
        }
    }

    /// Apply one answer. On error the step does not change.
    pub fn feed(&mut self, line: &str) -> Result<Step, AnswerError> {
        let answer = line.trim();
        let next = match self.step {
            Step::ChooseKind => {
                let kind = match answer.chars().next() {
                    Some('o' | 'O') => ContractKind::Obligation,
                    Some('a' | 'A') => ContractKind::Arbiter,
                    _ => return Err(AnswerError::Kind),
                };
                self.draft.kind = Some(kind);
                Step::AskName
            }
            Step::AskName => {
                let default = if self.is_obligation() {
                    DEFAULT_OBLIGATION_NAME
                } else {
                    DEFAULT_ARBITER_NAME
                };
                let name = or_default(answer, default);
                if !is_identifier(name) {
                    return Err(AnswerError::Name(name.to_string()));
                }
                self.draft.name = name.to_string();
                if self.is_obligation() {
                    Step::AskFields
                } else {
                    Step::AskBaseObligation
                }
            }
            Step::AskFields => {
                self.draft.data_fields = parse_fields(or_default(answer, DEFAULT_FIELDS))?;
                Step::AskVerification
            }
            Step::AskVerification => {
                self.draft.has_verification = yes_no(answer)?;
                if self.draft.has_verification {
                    Step::AskDemandFields
                } else {
                    Step::AskRevocable
                }
            }
            Step::AskDemandFields => {
                let fields = if answer.is_empty() {
                    self.default_demand_fields()?
                } else {
                    parse_fields(answer)?
                };
                self.draft.demand_fields = Some(fields);
                if self.is_obligation() {
                    Step::AskRevocable
                } else {
                    Step::Done
                }
            }
            Step::AskRevocable => {
                self.draft.is_revocable = yes_no(answer)?;
                if self.draft.is_revocable {
                    Step::AskTermCount
                } else {
                    Step::Done
                }
            }
            Step::AskTermCount => {
                self.draft.term_count = if answer.is_empty() {
                    DEFAULT_TERM_COUNT
                } else {
                    answer
                        .parse()
                        .map_err(|_| AnswerError::Count(answer.to_string()))?
                };
                Step::Done
            }
            Step::AskBaseObligation => {
                if answer.is_empty() {
                    self.draft.base_obligation = None;
                } else if is_identifier(answer)
                    && answer != self.draft.name
                    && !is_table_symbol(answer)
                {
                    self.draft.base_obligation = Some(answer.to_string());
                } else {
                    return Err(AnswerError::Name(answer.to_string()));
                }
                Step::AskDemandFields
            }
            Step::Done => return Err(AnswerError::Finished),
        };
        tracing::debug!(from = ?self.step, to = ?next, "wizard step");
        self.step = next;
        Ok(next)
    }

    /// The collected spec, once every question has been answered.
    pub fn finish(self) -> Option<CollectedSpec> {
        if self.step != Step::Done {
            return None;
        }
        let draft = self.draft;
        let spec = match draft.kind? {
            ContractKind::Obligation => CollectedSpec::Obligation(ObligationSpec {
                name: draft.name,
                has_verification: draft.has_verification,
                is_revocable: draft.is_revocable,
                finalization_term_count: draft.term_count,
                data_fields: draft.data_fields,
                demand_fields: draft.demand_fields,
            }),
            ContractKind::Arbiter => CollectedSpec::Arbiter(ArbiterSpec {
                name: draft.name,
                base_obligation_name: draft.base_obligation,
                demand_fields: draft.demand_fields.unwrap_or_default(),
            }),
        };
        Some(spec)
    }

    fn is_obligation(&self) -> bool {
        self.draft.kind == Some(ContractKind::Obligation)
    }

    fn default_demand_fields(&self) -> Result<Vec<Field>, AnswerError> {
        if self.is_obligation() {
            Ok(self.draft.data_fields.clone())
        } else {
            Ok(parse_fields(DEFAULT_FIELDS)?)
        }
    }
}

fn or_default<'a>(answer: &'a str, default: &'a str) -> &'a str {
    if answer.is_empty() {
        default
    } else {
        answer
    }
}

fn yes_no(answer: &str) -> Result<bool, AnswerError> {
    match answer.chars().next() {
        None | Some('n' | 'N') => Ok(false),
        Some('y' | 'Y') => Ok(true),
        Some(_) => Err(AnswerError::YesNo),
    }
}
