use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::VariableStore;

/// Identity of one OTP component instance within the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ComponentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Address of a persistent variable: `(component, name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableKey {
    pub component: ComponentId,
    pub name: &'static str,
}

impl VariableKey {
    pub const VALUE: &'static str = "value";

    /// The key holding a component's current OTP value.
    pub fn value_of(component: ComponentId) -> Self {
        Self {
            component,
            name: Self::VALUE,
        }
    }
}

/// In-process [`VariableStore`] for hosts without their own variable system.
#[derive(Debug, Default, Clone)]
pub struct MemoryVariables {
    values: HashMap<VariableKey, String>,
}

impl MemoryVariables {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VariableStore for MemoryVariables {
    fn get(&self, key: &VariableKey) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &VariableKey, value: String) {
        self.values.insert(*key, value);
    }
}

/// Owner of the canonical OTP value; every read and write goes through the
/// host binding so the host always observes the current value.
#[derive(Debug)]
pub struct ValueStore<V> {
    variables: V,
    key: VariableKey,
    capacity: usize,
}

impl<V: VariableStore> ValueStore<V> {
    /// Binds to `component`'s value variable, seeding it with `default`
    /// unless the host already holds a value. A held value longer than the
    /// field count is cut down.
    pub fn bind(mut variables: V, component: ComponentId, capacity: usize, default: &str) -> Self {
        let key = VariableKey::value_of(component);
        match variables.get(&key) {
            None => variables.set(&key, truncate(default, capacity)),
            Some(held) if held.chars().count() > capacity => {
                variables.set(&key, truncate(&held, capacity));
            }
            Some(_) => {}
        }
        Self {
            variables,
            key,
            capacity,
        }
    }

    pub fn get(&self) -> String {
        self.variables.get(&self.key).unwrap_or_default()
    }

    /// Stores `value` cut to the field capacity; returns what was stored.
    pub fn set(&mut self, value: &str) -> String {
        let value = truncate(value, self.capacity);
        self.variables.set(&self.key, value.clone());
        value
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn variables(&self) -> &V {
        &self.variables
    }
}

fn truncate(value: &str, capacity: usize) -> String {
    value.chars().take(capacity).collect()
}
