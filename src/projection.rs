use serde_json::Value;

use crate::config::OtpConfig;
use crate::traits::FormulaEvaluator;

/// State derived from the canonical value; recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// One slot per field; `None` is an empty field.
    pub field_values: Vec<Option<char>>,
    /// Concatenation of the filled slots.
    pub combined_value: String,
    pub is_complete: bool,
    pub is_valid: bool,
}

impl Projection {
    pub fn compute(
        value: &str,
        total_fields: usize,
        config: &OtpConfig,
        evaluator: Option<&dyn FormulaEvaluator>,
    ) -> Self {
        let field_values = field_values(value, total_fields);
        let combined_value = combine(&field_values);
        let is_complete = is_complete(&field_values);
        let is_valid = is_valid(&combined_value, is_complete, config, evaluator);
        Self {
            field_values,
            combined_value,
            is_complete,
            is_valid,
        }
    }
}

/// Character `i` of `value` for each field `i`; indices past the end are empty.
pub fn field_values(value: &str, total_fields: usize) -> Vec<Option<char>> {
    let mut chars = value.chars();
    (0..total_fields).map(|_| chars.next()).collect()
}

pub fn combine(field_values: &[Option<char>]) -> String {
    field_values.iter().flatten().collect()
}

pub fn is_complete(field_values: &[Option<char>]) -> bool {
    field_values.iter().all(Option::is_some)
}

pub fn is_valid(
    combined_value: &str,
    is_complete: bool,
    config: &OtpConfig,
    evaluator: Option<&dyn FormulaEvaluator>,
) -> bool {
    if !config.required && combined_value.is_empty() {
        return true;
    }
    if config.required && !is_complete {
        return false;
    }
    match (config.validation_formula(), evaluator) {
        (Some(formula), Some(evaluator)) => {
            !matches!(evaluator.evaluate(formula, combined_value), Some(Value::Bool(false)))
        }
        _ => true,
    }
}
