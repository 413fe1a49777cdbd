use serde_json::Value;

use crate::store::VariableKey;

/// Host-side persistent variables, keyed by component and variable name.
///
/// The value stored under a component's `"value"` key is the component's
/// externally visible value.
pub trait VariableStore {
    fn get(&self, key: &VariableKey) -> Option<String>;
    fn set(&mut self, key: &VariableKey, value: String);
}

/// Evaluates the host's custom validation formula against the current value.
///
/// The formula is passed through exactly as configured. `None` means no
/// result is available; the engine treats that as valid. Only
/// `Some(Value::Bool(false))` marks the value invalid.
pub trait FormulaEvaluator {
    fn evaluate(&self, formula: &Value, value: &str) -> Option<Value>;
}

impl<F> FormulaEvaluator for F
where
    F: Fn(&Value, &str) -> Option<Value>,
{
    fn evaluate(&self, formula: &Value, value: &str) -> Option<Value> {
        self(formula, value)
    }
}

pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
}
