//! Declarative input validation.
//!
//! Each input type carries const tables of field rules; `apply_rules`
//! evaluates them statelessly. There is no process-wide rule registry:
//! the rules are plain data next to the type they constrain.

use crate::error::ValidationError;
use crate::goods::{CreateGoods, UpdateGoods};

/// A single validation rule for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present.
    Required,
    /// The field, if present, must contain a non-whitespace character.
    NotBlank,
    /// The field, if present, must not exceed this many characters.
    MaxLength(usize),
}

/// Rules for `CreateGoods.name`.
pub const CREATE_NAME_RULES: &[Rule] = &[Rule::Required, Rule::NotBlank, Rule::MaxLength(100)];

/// Rules for `UpdateGoods.name`. The field is optional, so `Required`
/// is omitted.
pub const UPDATE_NAME_RULES: &[Rule] = &[Rule::NotBlank, Rule::MaxLength(100)];

/// Rules for `UpdateGoods.description`.
pub const UPDATE_DESCRIPTION_RULES: &[Rule] = &[Rule::MaxLength(500)];

/// Evaluate a rule set against an optional field value.
///
/// `Required` fails on an absent value; the remaining rules are skipped
/// for absent values so optional fields validate only when supplied.
pub fn apply_rules(
    field: &'static str,
    value: Option<&str>,
    rules: &[Rule],
) -> Result<(), ValidationError> {
    for rule in rules {
        match (rule, value) {
            (Rule::Required, None) => {
                return Err(ValidationError::RequiredFieldMissing { field });
            }
            (Rule::NotBlank, Some(v)) if v.trim().is_empty() => {
                return Err(ValidationError::FieldBlank { field });
            }
            (Rule::MaxLength(max), Some(v)) if v.chars().count() > *max => {
                return Err(ValidationError::FieldTooLong { field, max: *max });
            }
            _ => {}
        }
    }
    Ok(())
}

impl CreateGoods {
    /// Validate this payload against its rule tables.
    pub fn validate(&self) -> Result<(), ValidationError> {
        apply_rules("name", Some(self.name.as_str()), CREATE_NAME_RULES)
    }
}

impl UpdateGoods {
    /// Validate this payload against its rule tables.
    pub fn validate(&self) -> Result<(), ValidationError> {
        apply_rules("name", self.name.as_deref(), UPDATE_NAME_RULES)?;
        apply_rules(
            "description",
            self.description.as_deref(),
            UPDATE_DESCRIPTION_RULES,
        )
    }
}
