use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A planet document exactly as the store returned it.
///
/// Nothing is filtered or reshaped: `null` fields, the store's own `_id`,
/// version keys and off-schema values all go back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Planet(Map<String, Value>);

impl Planet {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self::default()
            .with_field("id", id)
            .with_field("name", name.into())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Planet {
    fn from(document: Map<String, Value>) -> Self {
        Self(document)
    }
}

/// A validated planet identifier: always a finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetId(f64);

impl PlanetId {
    /// Coerce a raw request value into an identifier.
    ///
    /// Numbers are taken as-is. Strings are trimmed and parsed as a decimal
    /// floating-point literal. Anything that is not a finite number after
    /// that (`null`, booleans, arrays, objects, empty or non-numeric strings,
    /// `"inf"`, `"NaN"`, overflowing literals) is rejected.
    pub fn coerce(raw: &Value) -> Option<Self> {
        let value = match raw {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            _ => return None,
        };

        value.is_finite().then_some(Self(value))
    }

    /// The id as an integer, when it is integral and in `i64` range.
    pub fn as_integer(self) -> Option<i64> {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
        (self.0.fract() == 0.0 && self.0 >= -LIMIT && self.0 < LIMIT).then_some(self.0 as i64)
    }

    /// Whether a stored `id` value equals this identifier numerically.
    pub fn matches(self, stored: &Value) -> bool {
        stored.as_f64() == Some(self.0)
    }
}

impl From<i64> for PlanetId {
    fn from(id: i64) -> Self {
        Self(id as f64)
    }
}

impl From<PlanetId> for Bson {
    fn from(id: PlanetId) -> Self {
        match id.as_integer() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(id.0),
        }
    }
}

impl std::fmt::Display for PlanetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `id` member of a `POST /planet` body, if there was one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupRequest {
    pub id: Option<Value>,
}

impl LookupRequest {
    /// Parse a raw request body. Anything but a JSON object yields no id.
    pub fn from_body(body: &[u8]) -> Self {
        let id = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| match v {
                Value::Object(mut map) => map.remove("id"),
                _ => None,
            });
        Self { id }
    }

    pub fn planet_id(&self) -> Option<PlanetId> {
        self.id.as_ref().and_then(PlanetId::coerce)
    }
}
