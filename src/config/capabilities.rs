use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
    effects::{grid::GridConfig, particles::FieldConfig},
    foundation::error::{BackdropError, BackdropResult},
};

/// Reads one named option as JSON.
pub type Getter<C> = fn(&C) -> Value;
/// Assigns one named option from JSON.
pub type Setter<C> = fn(&mut C, &Value) -> BackdropResult<()>;

struct Capability<C> {
    name: &'static str,
    get: Getter<C>,
    set: Setter<C>,
}

/// Named `{get, set}` accessors over a configuration struct.
///
/// Hosts that let users edit options at runtime receive this table once instead of reaching
/// into the struct directly; entries keep registration order.
pub struct CapabilityTable<C> {
    entries: Vec<Capability<C>>,
}

impl<C> Default for CapabilityTable<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> CapabilityTable<C> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessor pair. A later entry with the same name replaces the earlier one.
    pub fn with(mut self, name: &'static str, get: Getter<C>, set: Setter<C>) -> Self {
        self.entries.retain(|e| e.name != name);
        self.entries.push(Capability { name, get, set });
        self
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Current value of `name`.
    pub fn get(&self, cfg: &C, name: &str) -> BackdropResult<Value> {
        Ok((self.lookup(name)?.get)(cfg))
    }

    /// Assign `value` to `name`. On error `cfg` is left unchanged.
    pub fn set(&self, cfg: &mut C, name: &str, value: &Value) -> BackdropResult<()> {
        (self.lookup(name)?.set)(cfg, value)
    }

    /// Apply a `name=value` assignment. The value is parsed as JSON when possible and taken as
    /// a plain string otherwise, so `count=50` and `color=#ff0000` both work.
    pub fn apply_assignment(&self, cfg: &mut C, assignment: &str) -> BackdropResult<()> {
        let (name, raw) = assignment.split_once('=').ok_or_else(|| {
            BackdropError::config(format!("expected name=value, got \"{assignment}\""))
        })?;
        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        self.set(cfg, name.trim(), &value)
    }

    /// Every `(name, value)` pair, in registration order.
    pub fn snapshot(&self, cfg: &C) -> Vec<(&'static str, Value)> {
        self.entries.iter().map(|e| (e.name, (e.get)(cfg))).collect()
    }

    fn lookup(&self, name: &str) -> BackdropResult<&Capability<C>> {
        self.entries.iter().find(|e| e.name == name).ok_or_else(|| {
            let known = self.names().collect::<Vec<_>>().join(", ");
            BackdropError::config(format!("unknown option \"{name}\" (known: {known})"))
        })
    }
}

/// Configuration types that publish a [`CapabilityTable`].
pub trait Configurable: Sized {
    /// The accessor table for this type.
    fn capabilities() -> CapabilityTable<Self>;
}

fn decode<T: DeserializeOwned>(name: &str, value: &Value) -> BackdropResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| BackdropError::config(format!("invalid value for \"{name}\": {e}")))
}

macro_rules! field {
    ($table:expr, $name:literal => $field:ident) => {
        $table.with(
            $name,
            |c| json!(c.$field),
            |c, v| {
                c.$field = decode($name, v)?;
                Ok(())
            },
        )
    };
}

impl Configurable for FieldConfig {
    fn capabilities() -> CapabilityTable<Self> {
        let t = CapabilityTable::<Self>::new();
        let t = field!(t, "count" => count);
        let t = field!(t, "color" => color);
        let t = field!(t, "particle_radius" => particle_radius);
        let t = field!(t, "speed_scale" => speed_scale);
        let t = field!(t, "opacity" => opacity);
        let t = field!(t, "on_expire" => on_expire);
        let t = field!(t, "on_resize" => on_resize);
        field!(t, "seed" => seed)
    }
}

impl Configurable for GridConfig {
    fn capabilities() -> CapabilityTable<Self> {
        let t = CapabilityTable::<Self>::new();
        let t = field!(t, "cell_size" => cell_size);
        let t = field!(t, "background" => background);
        let t = field!(t, "grid_color" => grid_color);
        let t = field!(t, "line_color" => line_color);
        let t = field!(t, "speed" => speed);
        let t = field!(t, "rings" => rings);
        let t = field!(t, "ring_spacing" => ring_spacing);
        let t = field!(t, "period" => period);
        let t = field!(t, "ring_alpha" => ring_alpha);
        let t = field!(t, "base_scale" => base_scale);
        let t = field!(t, "grid_line_width" => grid_line_width);
        field!(t, "ring_line_width" => ring_line_width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/capabilities.rs"]
mod tests;
