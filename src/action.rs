use serde_json::Value;

/// Imperative operations a host can invoke by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Focus the first empty field, or the first field when all are filled.
    Focus,
    /// Empty every field.
    Clear,
    /// Replace the value, cut to the field count.
    SetValue(String),
}

impl Action {
    /// Parses a host action call such as `("setValue", ["123456"])`.
    ///
    /// A `setValue` argument that is missing or not a string becomes `""`.
    pub fn from_host(name: &str, args: &[Value]) -> Option<Self> {
        match name {
            "focus" => Some(Action::Focus),
            "clear" => Some(Action::Clear),
            "setValue" => Some(Action::SetValue(coerce_value(args.first()))),
            _ => None,
        }
    }
}

pub(crate) fn coerce_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}
