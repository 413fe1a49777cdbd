/// Keys the engine reacts to on keydown.
///
/// Hosts map their platform key events to these codes and drop the rest;
/// typed characters arrive through [`InputEvent::Input`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Clears the field, or steps back when the field is already empty.
    Backspace,
    /// Moves focus one field to the left.
    ArrowLeft,
    /// Moves focus one field to the right.
    ArrowRight,
}

/// Events a host forwards from its per-field input elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The raw content of field `index` after the user typed into it.
    ///
    /// May briefly hold more than one character (typing over a filled
    /// field); only the last one counts.
    Input { index: usize, data: String },
    /// A key went down while field `index` had focus.
    KeyDown { index: usize, key: KeyCode },
    /// Plain text pasted anywhere in the group.
    Paste { text: String },
    /// Field `index` received focus.
    Focus { index: usize },
    /// Field `index` lost focus. Whether the group lost focus is decided on
    /// the next tick.
    Blur { index: usize },
}
