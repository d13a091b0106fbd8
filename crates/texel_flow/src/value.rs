//! # Diagram Values
//!
//! The typed values that flow along diagram edges.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use texel_shared::{Color, Vec2, Vec3};

/// Type tag for node arguments and results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true` / `false`.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// Two floats.
    Vector2,
    /// Three floats.
    Vector3,
    /// Linear RGBA color.
    Color,
    /// Color ramp.
    Gradient,
    /// Text; used for input names.
    String,
}

impl ValueType {
    /// Lowercase name, as written in diagram documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
            Self::Color => "color",
            Self::Gradient => "gradient",
            Self::String => "string",
        }
    }

    /// Zero value of this type.
    #[must_use]
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Vector2 => Value::Vector2(Vec2::ZERO),
            Self::Vector3 => Value::Vector3(Vec3::ZERO),
            Self::Color => Value::Color(Color::CLEAR),
            Self::Gradient => Value::Gradient(Arc::new(Gradient::default())),
            Self::String => Value::String(Arc::from("")),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value.
///
/// Heap-backed variants are reference counted so that copying a value
/// between nodes on every pixel stays cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i32),
    /// Float.
    Float(f32),
    /// 2D vector.
    Vector2(Vec2),
    /// 3D vector.
    Vector3(Vec3),
    /// Color.
    Color(Color),
    /// Color ramp.
    Gradient(Arc<Gradient>),
    /// Text.
    String(Arc<str>),
}

impl Value {
    /// Type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Vector2(_) => ValueType::Vector2,
            Self::Vector3(_) => ValueType::Vector3,
            Self::Color(_) => ValueType::Color,
            Self::Gradient(_) => ValueType::Gradient,
            Self::String(_) => ValueType::String,
        }
    }

    /// Boolean payload, `false` for other types.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Integer payload, `0` for other types.
    #[must_use]
    pub const fn as_int(&self) -> i32 {
        match self {
            Self::Int(v) => *v,
            _ => 0,
        }
    }

    /// Float payload, `0.0` for other types.
    #[must_use]
    pub const fn as_float(&self) -> f32 {
        match self {
            Self::Float(v) => *v,
            _ => 0.0,
        }
    }

    /// 2D vector payload, zero for other types.
    #[must_use]
    pub const fn as_vector2(&self) -> Vec2 {
        match self {
            Self::Vector2(v) => *v,
            _ => Vec2::ZERO,
        }
    }

    /// 3D vector payload, zero for other types.
    #[must_use]
    pub const fn as_vector3(&self) -> Vec3 {
        match self {
            Self::Vector3(v) => *v,
            _ => Vec3::ZERO,
        }
    }

    /// Color payload, transparent black for other types.
    #[must_use]
    pub const fn as_color(&self) -> Color {
        match self {
            Self::Color(c) => *c,
            _ => Color::CLEAR,
        }
    }

    /// Text payload, empty for other types.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s,
            _ => "",
        }
    }

    /// Evaluates a gradient payload; white for other types.
    #[must_use]
    pub fn evaluate_gradient(&self, t: f32) -> Color {
        match self {
            Self::Gradient(g) => g.evaluate(t),
            _ => Color::WHITE,
        }
    }

    /// Converts a TOML literal into a value of type `ty`.
    ///
    /// Integers are accepted where floats are expected, and colors may
    /// omit alpha (which then defaults to 1). Returns `None` when the
    /// literal has the wrong shape.
    #[must_use]
    pub fn from_literal(literal: &toml::Value, ty: ValueType) -> Option<Self> {
        match ty {
            ValueType::Bool => literal.as_bool().map(Self::Bool),
            ValueType::Int => literal
                .as_integer()
                .and_then(|i| i32::try_from(i).ok())
                .map(Self::Int),
            ValueType::Float => number(literal).map(Self::Float),
            ValueType::Vector2 => match floats(literal)?.as_slice() {
                [x, y] => Some(Self::Vector2(Vec2::new(*x, *y))),
                _ => None,
            },
            ValueType::Vector3 => match floats(literal)?.as_slice() {
                [x, y, z] => Some(Self::Vector3(Vec3::new(*x, *y, *z))),
                _ => None,
            },
            ValueType::Color => color(literal).map(Self::Color),
            ValueType::Gradient => gradient(literal).map(|g| Self::Gradient(Arc::new(g))),
            ValueType::String => literal.as_str().map(|s| Self::String(Arc::from(s))),
        }
    }
}

fn number(literal: &toml::Value) -> Option<f32> {
    match literal {
        toml::Value::Float(f) => Some(*f as f32),
        toml::Value::Integer(i) => Some(*i as f32),
        _ => None,
    }
}

fn floats(literal: &toml::Value) -> Option<Vec<f32>> {
    literal.as_array()?.iter().map(number).collect()
}

fn color(literal: &toml::Value) -> Option<Color> {
    match floats(literal)?.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b, 1.0)),
        [r, g, b, a] => Some(Color::new(*r, *g, *b, *a)),
        _ => None,
    }
}

/// `{ keys = [{ time = t, color = [r, g, b, (a)] }, ...] }`; `keys` may be omitted.
fn gradient(literal: &toml::Value) -> Option<Gradient> {
    let table = literal.as_table()?;
    let keys = match table.get("keys") {
        None => Vec::new(),
        Some(keys) => keys
            .as_array()?
            .iter()
            .map(|key| {
                let key = key.as_table()?;
                Some(GradientKey {
                    time: number(key.get("time")?)?,
                    color: color(key.get("color")?)?,
                })
            })
            .collect::<Option<Vec<_>>>()?,
    };
    Some(Gradient::new(keys))
}

/// One color stop of a [`Gradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
    /// Position of the stop, normally in [0, 1].
    pub time: f32,
    /// Color at the stop.
    pub color: Color,
}

/// A color ramp: linear blends between keys, clamped outside them.
///
/// Written in documents as `{ keys = [{ time = 0.0, color = [r, g, b, a] }, ...] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Keys in ascending time order.
    #[serde(default)]
    pub keys: Vec<GradientKey>,
}

impl Gradient {
    /// Creates a gradient, sorting `keys` by time.
    #[must_use]
    pub fn new(keys: Vec<GradientKey>) -> Self {
        Self { keys }.sorted()
    }

    fn sorted(mut self) -> Self {
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Color at `t`. An empty gradient is white.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Color {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Color::WHITE;
        };
        if t <= first.time {
            return first.color;
        }
        if t >= last.time {
            return last.color;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.color;
                }
                return a.color.lerp_unclamped(b.color, (t - a.time) / span);
            }
        }
        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> toml::Value {
        let table: toml::Table = toml::from_str(&format!("v = {text}")).expect("valid literal");
        table["v"].clone()
    }

    #[test]
    fn test_literal_conversion() {
        assert_eq!(Value::from_literal(&literal("2"), ValueType::Float), Some(Value::Float(2.0)));
        assert_eq!(Value::from_literal(&literal("2"), ValueType::Int), Some(Value::Int(2)));
        assert_eq!(Value::from_literal(&literal("2.5"), ValueType::Int), None);
        assert_eq!(
            Value::from_literal(&literal("[1, 0.5, 0]"), ValueType::Color),
            Some(Value::Color(Color::new(1.0, 0.5, 0.0, 1.0)))
        );
        assert_eq!(Value::from_literal(&literal("[1, 2, 3]"), ValueType::Vector2), None);
        assert_eq!(Value::from_literal(&literal("\"x\""), ValueType::Bool), None);
    }

    #[test]
    fn test_gradient_literal_is_sorted() {
        let value = Value::from_literal(
            &literal("{ keys = [{ time = 1.0, color = [1, 1, 1, 1] }, { time = 0.0, color = [0, 0, 0, 1] }] }"),
            ValueType::Gradient,
        )
        .expect("gradient literal");
        assert_eq!(value.evaluate_gradient(0.25), Color::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn test_gradient_literal_accepts_rgb_keys() {
        let value = Value::from_literal(&literal("{ keys = [{ time = 0.5, color = [1, 0, 0] }] }"), ValueType::Gradient);
        assert_eq!(
            value.map(|v| v.evaluate_gradient(0.0)),
            Some(Color::new(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(
            Value::from_literal(&literal("{ keys = [{ time = 0.5 }] }"), ValueType::Gradient),
            None,
            "keys need a color"
        );
    }

    #[test]
    fn test_gradient_clamps_outside_keys() {
        let gradient = Gradient::new(vec![
            GradientKey { time: 0.25, color: Color::BLACK },
            GradientKey { time: 0.75, color: Color::WHITE },
        ]);
        assert_eq!(gradient.evaluate(0.0), Color::BLACK);
        assert_eq!(gradient.evaluate(1.0), Color::WHITE);
        assert_eq!(gradient.evaluate(0.5), Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(Gradient::default().evaluate(0.5), Color::WHITE);
    }

    #[test]
    fn test_accessors_fall_back_to_zero() {
        assert_eq!(Value::Int(3).as_float(), 0.0);
        assert_eq!(Value::Float(3.0).as_int(), 0);
        assert_eq!(ValueType::Vector3.zero(), Value::Vector3(Vec3::ZERO));
    }
}
