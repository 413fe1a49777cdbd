use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::format::FormatSpec;

/// Which characters a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// ASCII digits only.
    #[default]
    Numeric,
    /// ASCII letters and digits.
    Alphanumeric,
}

impl InputKind {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            InputKind::Numeric => ch.is_ascii_digit(),
            InputKind::Alphanumeric => ch.is_ascii_alphanumeric(),
        }
    }

    /// Per-field pattern hint for the host's input element.
    pub fn pattern(self) -> &'static str {
        match self {
            InputKind::Numeric => "[0-9]",
            InputKind::Alphanumeric => "[a-zA-Z0-9]",
        }
    }

    /// Virtual keyboard hint for the host's input element.
    pub fn input_mode(self) -> &'static str {
        match self {
            InputKind::Numeric => "numeric",
            InputKind::Alphanumeric => "text",
        }
    }
}

/// Delay before a debounced `change` fires.
///
/// Deserializes from a number of milliseconds or from a string whose leading
/// integer is the delay, so `"500ms"` and `500` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DelayRepr", into = "u64")]
pub struct DebounceDelay {
    millis: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DelayRepr {
    Millis(u64),
    Text(String),
}

impl DebounceDelay {
    pub const DEFAULT: DebounceDelay = DebounceDelay { millis: 500 };

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim_start();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..digits_end]
            .parse::<u64>()
            .map(Self::from_millis)
            .map_err(|_| ConfigError::InvalidDebounceDelay {
                raw: raw.to_string(),
            })
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for DebounceDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<DelayRepr> for DebounceDelay {
    type Error = ConfigError;

    fn try_from(repr: DelayRepr) -> Result<Self, Self::Error> {
        match repr {
            DelayRepr::Millis(ms) => Ok(Self::from_millis(ms)),
            DelayRepr::Text(s) => Self::parse(&s),
        }
    }
}

impl From<DebounceDelay> for u64 {
    fn from(delay: DebounceDelay) -> Self {
        delay.millis
    }
}

/// Mask used when the host leaves `format` empty.
pub const DEFAULT_FORMAT: &str = "xxxxxx";

/// Host-supplied configuration, read-only for the engine.
///
/// Keys follow the host's content object (`autoFocus`, `debounceDelay`, ...);
/// anything missing takes its default. Bound properties may resolve to
/// `null`, which reads as the type's empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtpConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: InputKind,
    #[serde(rename = "value", deserialize_with = "null_as_default")]
    pub initial_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub readonly: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub disabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_focus: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_submit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub debounce: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub debounce_delay: DebounceDelay,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_validation: bool,
    /// Opaque formula handed to the [`FormulaEvaluator`](crate::traits::FormulaEvaluator).
    pub validation: Option<Value>,
    /// Name under which the value is submitted with a form.
    #[serde(deserialize_with = "null_as_default")]
    pub field_name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            kind: InputKind::Numeric,
            initial_value: String::new(),
            required: false,
            readonly: false,
            disabled: false,
            auto_focus: true,
            auto_submit: false,
            debounce: false,
            debounce_delay: DebounceDelay::DEFAULT,
            custom_validation: false,
            validation: None,
            field_name: String::new(),
        }
    }
}

impl OtpConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured mask, or [`DEFAULT_FORMAT`] when it is empty.
    pub fn format_spec(&self) -> FormatSpec {
        if self.format.is_empty() {
            FormatSpec::parse(DEFAULT_FORMAT)
        } else {
            FormatSpec::parse(&self.format)
        }
    }

    /// The initial value cut down to the number of fields in the mask.
    pub fn default_value(&self) -> String {
        let total = self.format_spec().total_fields();
        self.initial_value.chars().take(total).collect()
    }

    /// The custom validation formula, when custom validation applies.
    ///
    /// `null`, `false` and `""` count as no formula.
    pub fn validation_formula(&self) -> Option<&Value> {
        if !self.custom_validation {
            return None;
        }
        self.validation.as_ref().filter(|formula| match formula {
            Value::Null | Value::Bool(false) => false,
            Value::String(text) => !text.is_empty(),
            _ => true,
        })
    }

    /// `None` when change notifications fire immediately.
    pub fn debounce_window(&self) -> Option<Duration> {
        self.debounce.then(|| self.debounce_delay.as_duration())
    }
}
