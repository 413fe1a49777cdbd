use std::collections::HashMap;

use otp_mini::store::VariableKey;
use otp_mini::traits::VariableStore;

/// Variable store that remembers every write, in order.
#[derive(Default, Debug, Clone)]
pub struct RecordingVariables {
    values: HashMap<VariableKey, String>,
    pub writes: Vec<String>,
}

impl RecordingVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(key: VariableKey, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key, value.to_string());
        Self {
            values,
            writes: Vec::new(),
        }
    }
}

impl VariableStore for RecordingVariables {
    fn get(&self, key: &VariableKey) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &VariableKey, value: String) {
        self.writes.push(value.clone());
        self.values.insert(*key, value);
    }
}
