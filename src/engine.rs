use std::fmt;
use std::time::Instant;

use unicode_segmentation::UnicodeSegmentation;

use crate::action::Action;
use crate::config::OtpConfig;
use crate::format::FormatSpec;
use crate::key::{InputEvent, KeyCode};
use crate::notify::NotificationGate;
use crate::projection::{self, Projection};
use crate::store::{ComponentId, MemoryVariables, ValueStore};
use crate::traits::{Clipboard, FormulaEvaluator, VariableStore};
use crate::types::{Command, StateFlags, TriggerEvent};

/// Flags derived from the value and configuration, as opposed to `FOCUS`
/// which follows focus events.
const VALUE_FLAGS: StateFlags = StateFlags::READONLY
    .union(StateFlags::DISABLED)
    .union(StateFlags::ERROR)
    .union(StateFlags::COMPLETE);

/// Field-state controller for one OTP component.
///
/// The engine is host-driven: every entry point returns the [`Command`]s the
/// host should apply, in order. It never reads the clock; operations that can
/// start or fire a timer take `now`, and [`Engine::poll`] runs deferred work.
pub struct Engine<V = MemoryVariables> {
    config: OtpConfig,
    format: FormatSpec,
    component: ComponentId,
    store: ValueStore<V>,
    evaluator: Option<Box<dyn FormulaEvaluator + Send>>,
    focused_index: Option<usize>,
    pending_blur: Option<Instant>,
    gate: NotificationGate,
}

/// Point-in-time view of everything a host renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub value: String,
    pub field_values: Vec<Option<char>>,
    pub combined_value: String,
    pub is_complete: bool,
    pub is_valid: bool,
    pub focused_index: Option<usize>,
    /// A debounced `change` is waiting to fire.
    pub is_debouncing: bool,
    pub flags: StateFlags,
}

pub struct EngineBuilder<V = MemoryVariables> {
    config: OtpConfig,
    component: ComponentId,
    variables: V,
    evaluator: Option<Box<dyn FormulaEvaluator + Send>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: OtpConfig::default(),
            component: ComponentId::new(),
            variables: MemoryVariables::new(),
            evaluator: None,
        }
    }
}

impl<V> EngineBuilder<V> {
    pub fn config(mut self, config: OtpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn component(mut self, component: ComponentId) -> Self {
        self.component = component;
        self
    }

    /// Binds the value to a host variable store instead of the in-memory one.
    pub fn variables<W: VariableStore>(self, variables: W) -> EngineBuilder<W> {
        EngineBuilder {
            config: self.config,
            component: self.component,
            variables,
            evaluator: self.evaluator,
        }
    }

    pub fn evaluator(mut self, evaluator: impl FormulaEvaluator + Send + 'static) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }
}

impl<V: VariableStore> EngineBuilder<V> {
    pub fn build(self) -> Engine<V> {
        let format = self.config.format_spec();
        let store = ValueStore::bind(
            self.variables,
            self.component,
            format.total_fields(),
            &self.config.default_value(),
        );
        Engine {
            gate: NotificationGate::new(self.config.debounce_window()),
            config: self.config,
            format,
            component: self.component,
            store,
            evaluator: self.evaluator,
            focused_index: None,
            pending_blur: None,
        }
    }
}

impl Engine {
    pub fn new(config: OtpConfig) -> Self {
        EngineBuilder::default().config(config).build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<V: VariableStore> Engine<V> {
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    pub fn format(&self) -> &FormatSpec {
        &self.format
    }

    pub fn component(&self) -> ComponentId {
        self.component
    }

    pub fn total_fields(&self) -> usize {
        self.format.total_fields()
    }

    /// The canonical value as held by the host binding.
    pub fn value(&self) -> String {
        self.store.get()
    }

    pub fn variables(&self) -> &V {
        self.store.variables()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn is_debouncing(&self) -> bool {
        self.gate.is_debouncing()
    }

    /// Flags as last reported to the host.
    pub fn flags(&self) -> StateFlags {
        self.gate.flags()
    }

    pub fn field_values(&self) -> Vec<Option<char>> {
        projection::field_values(&self.store.get(), self.total_fields())
    }

    pub fn projection(&self) -> Projection {
        Projection::compute(
            &self.store.get(),
            self.total_fields(),
            &self.config,
            self.evaluator(),
        )
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let projection = self.projection();
        EngineSnapshot {
            value: self.store.get(),
            field_values: projection.field_values,
            combined_value: projection.combined_value,
            is_complete: projection.is_complete,
            is_valid: projection.is_valid,
            focused_index: self.focused_index,
            is_debouncing: self.gate.is_debouncing(),
            flags: self.gate.flags(),
        }
    }

    /// `(fieldName, value)` for form submission, when a field name is set.
    pub fn form_field(&self) -> Option<(&str, String)> {
        if self.config.field_name.is_empty() {
            return None;
        }
        Some((self.config.field_name.as_str(), self.projection().combined_value))
    }

    /// Initial flag states, then auto-focus when configured.
    pub fn mount(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        self.sync_flags(&mut out);
        if self.config.auto_focus {
            out.extend(self.focus());
        }
        out
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> Vec<Command> {
        if self.config.disabled {
            tracing::debug!(?event, "ignoring event on disabled component");
            return vec![];
        }
        match event {
            InputEvent::Input { index, data } => self.on_input(index, &data, now),
            InputEvent::KeyDown { index, key } => self.on_keydown(index, key, now),
            InputEvent::Paste { text } => self.on_paste(&text, now),
            InputEvent::Focus { index } => self.on_focus(index),
            InputEvent::Blur { index } => self.on_blur(index, now),
        }
    }

    /// Runs deferred work: confirms a pending blur and fires a due debounced
    /// `change` with the value current at fire time.
    pub fn poll(&mut self, now: Instant) -> Vec<Command> {
        let mut out = Vec::new();

        if self.pending_blur.take().is_some() {
            self.focused_index = None;
            out.push(Command::Trigger(TriggerEvent::Blur));
            self.gate
                .sync_flags(StateFlags::empty(), StateFlags::FOCUS, &mut out);
        }

        if self.gate.fire_due(now) {
            let value = self.projection().combined_value;
            tracing::debug!(%value, "debounced change fired");
            out.push(Command::Trigger(TriggerEvent::Change { value }));
        }

        out
    }

    /// When the host should next call [`Engine::poll`].
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending_blur, self.gate.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Focuses the first empty field, or the first field when all are filled.
    pub fn focus(&self) -> Vec<Command> {
        if self.config.disabled || self.format.is_empty() {
            return vec![];
        }
        let target = self
            .field_values()
            .iter()
            .position(Option::is_none)
            .unwrap_or(0);
        vec![Command::FocusField(target)]
    }

    pub fn clear(&mut self) -> Vec<Command> {
        let value = self.store.set("");
        let mut out = Vec::new();
        if !self.format.is_empty() {
            out.push(Command::FocusField(0));
        }
        out.push(Command::Trigger(TriggerEvent::Clear { value }));
        self.sync_flags(&mut out);
        out
    }

    /// Replaces the value, cut to the field count. Emits `change` subject to
    /// debouncing; completion is reflected in flags only.
    pub fn set_value(&mut self, value: &str, now: Instant) -> Vec<Command> {
        let value = self.store.set(value);
        let mut out = Vec::new();
        if let Some(change) = self.gate.change(&value, now) {
            out.push(Command::Trigger(change));
        }
        self.sync_flags(&mut out);
        out
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Vec<Command> {
        match action {
            Action::Focus => self.focus(),
            Action::Clear => self.clear(),
            Action::SetValue(value) => self.set_value(&value, now),
        }
    }

    pub fn paste_from<C: Clipboard>(&mut self, clipboard: &mut C, now: Instant) -> Vec<Command> {
        match clipboard.get() {
            Some(text) => self.handle_event(InputEvent::Paste { text }, now),
            None => vec![],
        }
    }

    /// Applies a new configuration. When the effective default value changes
    /// the stored value is reset to it; edits never flow back into the config.
    pub fn reconfigure(&mut self, config: OtpConfig) -> Vec<Command> {
        let previous_default = self.config.default_value();
        self.format = config.format_spec();
        self.store.set_capacity(self.format.total_fields());
        self.gate.set_window(config.debounce_window());
        self.config = config;

        let default = self.config.default_value();
        if default != previous_default {
            tracing::debug!(%default, "default value changed, resetting");
            self.store.set(&default);
        } else {
            let current = self.store.get();
            if current.chars().count() > self.total_fields() {
                self.store.set(&current);
            }
        }
        if self.focused_index.is_some_and(|i| i >= self.total_fields()) {
            self.focused_index = None;
        }

        let mut out = Vec::new();
        self.sync_flags(&mut out);
        out
    }

    fn evaluator(&self) -> Option<&dyn FormulaEvaluator> {
        self.evaluator
            .as_deref()
            .map(|e| e as &dyn FormulaEvaluator)
    }

    fn on_input(&mut self, index: usize, data: &str, now: Instant) -> Vec<Command> {
        let mut fields = self.field_values();
        let Some(&current) = fields.get(index) else {
            tracing::debug!(index, "input for a field that does not exist");
            return vec![];
        };
        let restore = Command::SetFieldText {
            index,
            text: current.map(String::from).unwrap_or_default(),
        };

        if self.config.readonly {
            return vec![restore];
        }
        let Some(ch) = last_char(data).filter(|&c| self.config.kind.accepts(c)) else {
            tracing::debug!(index, data, "rejected keystroke");
            return vec![restore];
        };
        tracing::trace!(index, %ch, "accepted keystroke");

        fields[index] = Some(ch);
        let mut out = Vec::new();
        if index + 1 < fields.len() {
            out.push(Command::FocusField(index + 1));
        }
        self.commit(&fields, true, now, &mut out);
        out
    }

    fn on_keydown(&mut self, index: usize, key: KeyCode, now: Instant) -> Vec<Command> {
        let mut fields = self.field_values();
        let Some(&current) = fields.get(index) else {
            return vec![];
        };

        match key {
            KeyCode::Backspace => match current {
                None if index > 0 => vec![Command::FocusField(index - 1), Command::PreventDefault],
                None => vec![],
                Some(_) if self.config.readonly => vec![],
                Some(_) => {
                    fields[index] = None;
                    let mut out = Vec::new();
                    self.commit(&fields, false, now, &mut out);
                    out
                }
            },
            KeyCode::ArrowLeft if index > 0 => vec![Command::FocusField(index - 1)],
            KeyCode::ArrowRight if index + 1 < fields.len() => vec![Command::FocusField(index + 1)],
            _ => vec![],
        }
    }

    fn on_paste(&mut self, text: &str, now: Instant) -> Vec<Command> {
        if self.format.is_empty() {
            return vec![];
        }
        let mut out = vec![Command::PreventDefault];
        if self.config.readonly {
            return out;
        }

        let kind = self.config.kind;
        let pasted: Vec<char> = text.chars().filter(|&c| kind.accepts(c)).collect();
        if pasted.is_empty() {
            tracing::debug!("paste had no usable characters");
            return out;
        }

        // Prefix overwrite: fields past the pasted text keep their characters.
        let mut fields = self.field_values();
        for (slot, ch) in fields.iter_mut().zip(pasted) {
            *slot = Some(ch);
        }

        let last = fields.len() - 1;
        let target = fields
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |filled| (filled + 1).min(last));
        out.push(Command::FocusField(target));
        self.commit(&fields, true, now, &mut out);
        out
    }

    fn on_focus(&mut self, index: usize) -> Vec<Command> {
        if index >= self.total_fields() {
            return vec![];
        }
        self.pending_blur = None;
        self.focused_index = Some(index);
        let mut out = vec![Command::Trigger(TriggerEvent::Focus)];
        self.gate
            .sync_flags(StateFlags::FOCUS, StateFlags::FOCUS, &mut out);
        out
    }

    fn on_blur(&mut self, index: usize, now: Instant) -> Vec<Command> {
        tracing::trace!(index, "blur pending until next tick");
        self.pending_blur.get_or_insert(now);
        vec![]
    }

    /// Persist, notify, then re-derive flags.
    fn commit(
        &mut self,
        fields: &[Option<char>],
        check_complete: bool,
        now: Instant,
        out: &mut Vec<Command>,
    ) {
        let value = self.store.set(&projection::combine(fields));
        if let Some(change) = self.gate.change(&value, now) {
            out.push(Command::Trigger(change));
        }
        if check_complete && projection::is_complete(fields) {
            out.push(Command::Trigger(TriggerEvent::Complete {
                value: value.clone(),
            }));
            if self.config.auto_submit {
                out.push(Command::Trigger(TriggerEvent::Submit { value }));
            }
        }
        self.sync_flags(out);
    }

    fn sync_flags(&mut self, out: &mut Vec<Command>) {
        let projection = self.projection();
        let mut desired = StateFlags::empty();
        desired.set(StateFlags::READONLY, self.config.readonly);
        desired.set(StateFlags::DISABLED, self.config.disabled);
        desired.set(StateFlags::ERROR, !projection.is_valid);
        desired.set(StateFlags::COMPLETE, projection.is_complete);
        self.gate.sync_flags(desired, VALUE_FLAGS, out);
    }
}

impl<V: fmt::Debug> fmt::Debug for Engine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("component", &self.component)
            .field("store", &self.store)
            .field("has_evaluator", &self.evaluator.is_some())
            .field("focused_index", &self.focused_index)
            .field("pending_blur", &self.pending_blur)
            .field("gate", &self.gate)
            .finish()
    }
}

/// The last grapheme of `data`, when it is a single character.
fn last_char(data: &str) -> Option<char> {
    let grapheme = data.graphemes(true).next_back()?;
    let mut chars = grapheme.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_char_takes_final_grapheme() {
        assert_eq!(last_char("12"), Some('2'));
        assert_eq!(last_char(""), None);
        assert_eq!(last_char("1e\u{301}"), None);
    }

    #[test]
    fn next_deadline_prefers_earliest() {
        let t0 = Instant::now();
        let mut eng = Engine::new(OtpConfig {
            debounce: true,
            ..OtpConfig::default()
        });
        assert_eq!(eng.next_deadline(), None);
        let _ = eng.set_value("1", t0);
        assert_eq!(
            eng.next_deadline(),
            Some(t0 + std::time::Duration::from_millis(500))
        );
        let _ = eng.handle_event(InputEvent::Blur { index: 0 }, t0);
        assert_eq!(eng.next_deadline(), Some(t0));
    }
}
