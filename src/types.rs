use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Display-state flags the host toggles on the component.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u8 {
        const FOCUS    = 0b00001;
        const READONLY = 0b00010;
        const DISABLED = 0b00100;
        const ERROR    = 0b01000;
        const COMPLETE = 0b10000;
    }
}

const STATE_NAMES: [(StateFlags, &str); 5] = [
    (StateFlags::FOCUS, "focus"),
    (StateFlags::READONLY, "readonly"),
    (StateFlags::DISABLED, "disabled"),
    (StateFlags::ERROR, "error"),
    (StateFlags::COMPLETE, "complete"),
];

impl StateFlags {
    /// Host state names for every flag set in `self`.
    pub fn state_names(self) -> impl Iterator<Item = &'static str> {
        STATE_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }

    /// Splits `self` into single-flag values in a stable order.
    pub fn singles(self) -> impl Iterator<Item = StateFlags> {
        STATE_NAMES
            .into_iter()
            .map(|(flag, _)| flag)
            .filter(move |flag| self.contains(*flag))
    }
}

/// Lifecycle notifications, serialized as the host's trigger payload:
/// `{"name": "change", "event": {"value": "123"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "event", rename_all = "lowercase")]
pub enum TriggerEvent {
    Change { value: String },
    Complete { value: String },
    Focus,
    Blur,
    Clear { value: String },
    Submit { value: String },
}

impl TriggerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::Change { .. } => "change",
            TriggerEvent::Complete { .. } => "complete",
            TriggerEvent::Focus => "focus",
            TriggerEvent::Blur => "blur",
            TriggerEvent::Clear { .. } => "clear",
            TriggerEvent::Submit { .. } => "submit",
        }
    }
}

/// Commands emitted by the engine for the host to execute.
///
/// The engine never touches the host's widgets; it describes what should
/// happen and the host applies it in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Focus and select field `i` once the next render has completed.
    FocusField(usize),
    /// Overwrite the displayed content of a field, undoing a rejected keystroke.
    SetFieldText { index: usize, text: String },
    /// Suppress the host's default handling of the current event.
    PreventDefault,
    /// Fire a lifecycle notification.
    Trigger(TriggerEvent),
    /// Turn a single display-state flag on.
    AddState(StateFlags),
    /// Turn a single display-state flag off.
    RemoveState(StateFlags),
}
