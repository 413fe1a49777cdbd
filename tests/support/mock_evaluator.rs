use std::sync::{Arc, Mutex};

use otp_mini::traits::FormulaEvaluator;
use serde_json::Value;

/// Evaluator that rejects one value and records what it was asked.
#[derive(Debug, Clone)]
pub struct RejectingEvaluator {
    rejected: String,
    pub calls: Arc<Mutex<Vec<(Value, String)>>>,
}

impl RejectingEvaluator {
    pub fn new(rejected: &str) -> Self {
        Self {
            rejected: rejected.to_string(),
            calls: Arc::default(),
        }
    }
}

impl FormulaEvaluator for RejectingEvaluator {
    fn evaluate(&self, formula: &Value, value: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((formula.clone(), value.to_string()));
        Some(Value::Bool(value != self.rejected))
    }
}
