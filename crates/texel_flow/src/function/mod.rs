//! # Diagram Functions
//!
//! Every node in a diagram runs one [`FunctionKind`]. Kinds are a closed sum
//! type grouped by category; each exposes its signature (property names,
//! types, defaults and return type) and a pure `compute`.
//!
//! ## Ids
//!
//! Function ids have the form `category.name`, for example `floats.add`,
//! `booleans.float_less` or `noise3d.voronoi_linear_tiled_xy`. Property ids
//! are lowercase (`a`, `point`, `frequency`) and are what documents use as
//! argument keys.

mod boolean;
mod color;
mod math;
mod noise;
mod vector;

pub use boolean::{BoolOp, Comparison, CHOICE_TYPES};
pub use color::{BlendMode, ColorOp};
pub use math::{FloatOp, IntOp};
pub use noise::{Dimensions, NoiseFamily, NoiseFunction};
pub use vector::{Vector2Op, Vector3Op};

use std::fmt;

use texel_shared::{Color, Vec2, Vec3};

use crate::value::{Value, ValueType};

/// Default used for an argument a node leaves unset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyDefault {
    /// The zero value of the property type.
    Zero,
    /// A float constant.
    Float(f32),
    /// An integer constant.
    Int(i32),
}

/// One declared argument of a function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Property {
    /// Key used in documents.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Expected value type.
    pub value_type: ValueType,
    /// Value used when the argument is omitted.
    pub default: PropertyDefault,
}

impl Property {
    /// Declares a property with a zero default.
    #[must_use]
    pub const fn new(id: &'static str, name: &'static str, value_type: ValueType) -> Self {
        Self {
            id,
            name,
            value_type,
            default: PropertyDefault::Zero,
        }
    }

    /// Replaces the default.
    #[must_use]
    pub const fn with_default(mut self, default: PropertyDefault) -> Self {
        self.default = default;
        self
    }

    /// The value used when a node omits this argument.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match (self.default, self.value_type) {
            (PropertyDefault::Float(v), ValueType::Float) => Value::Float(v),
            (PropertyDefault::Int(v), ValueType::Int) => Value::Int(v),
            _ => self.value_type.zero(),
        }
    }
}

/// Static description shared by the non-parametric function groups.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Signature {
    pub key: &'static str,
    pub name: &'static str,
    pub menu: &'static str,
    pub properties: &'static [Property],
    pub returns: ValueType,
}

/// Function grouping, also the id prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Per-pixel position.
    Coordinates,
    /// Named values settable at run time.
    Inputs,
    /// Logic, comparisons and selection.
    Booleans,
    /// Float arithmetic.
    Floats,
    /// Integer arithmetic.
    Ints,
    /// 2D vector math.
    Vector2,
    /// 3D vector math.
    Vector3,
    /// Color construction and access.
    Colors,
    /// 2D noise.
    Noise2D,
    /// 3D noise.
    Noise3D,
    /// Diagram outputs.
    Outputs,
}

impl Category {
    /// Id prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Coordinates => "coordinates",
            Self::Inputs => "input",
            Self::Booleans => "booleans",
            Self::Floats => "floats",
            Self::Ints => "ints",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
            Self::Colors => "colors",
            Self::Noise2D => "noise2d",
            Self::Noise3D => "noise3d",
            Self::Outputs => "output",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// The pixel being evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Texture coordinates of the pixel center.
    pub uv: Vec2,
}

/// Per-pixel coordinate sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coordinate {
    /// Horizontal texture coordinate.
    U,
    /// Vertical texture coordinate.
    V,
    /// Both texture coordinates.
    Uv,
    /// `1 - u`.
    OneMinusU,
    /// `1 - v`.
    OneMinusV,
    /// Pixel column.
    X,
    /// Pixel row.
    Y,
    /// Column to the left.
    XMinusOne,
    /// Column to the right.
    XPlusOne,
    /// Row above.
    YMinusOne,
    /// Row below.
    YPlusOne,
    /// Distance from uv to the texture center.
    UvCenterDistance,
    /// Squared distance from uv to the texture center.
    UvCenterDistanceSquared,
    /// `(u, v, 0)`.
    Uv3,
}

impl Coordinate {
    /// Every coordinate source.
    pub const ALL: [Self; 14] = [
        Self::U,
        Self::V,
        Self::Uv,
        Self::OneMinusU,
        Self::OneMinusV,
        Self::X,
        Self::Y,
        Self::XMinusOne,
        Self::XPlusOne,
        Self::YMinusOne,
        Self::YPlusOne,
        Self::UvCenterDistance,
        Self::UvCenterDistanceSquared,
        Self::Uv3,
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, returns) = match self {
            Self::U => ("u", "U", ValueType::Float),
            Self::V => ("v", "V", ValueType::Float),
            Self::Uv => ("uv", "UV", ValueType::Vector2),
            Self::OneMinusU => ("one_minus_u", "1 - U", ValueType::Float),
            Self::OneMinusV => ("one_minus_v", "1 - V", ValueType::Float),
            Self::X => ("x", "X", ValueType::Int),
            Self::Y => ("y", "Y", ValueType::Int),
            Self::XMinusOne => ("x_minus_1", "X - 1", ValueType::Int),
            Self::XPlusOne => ("x_plus_1", "X + 1", ValueType::Int),
            Self::YMinusOne => ("y_minus_1", "Y - 1", ValueType::Int),
            Self::YPlusOne => ("y_plus_1", "Y + 1", ValueType::Int),
            Self::UvCenterDistance => ("uv_center_distance", "UV Center Distance", ValueType::Float),
            Self::UvCenterDistanceSquared => {
                ("uv_center_distance_squared", "UV Center Distance\u{b2}", ValueType::Float)
            }
            Self::Uv3 => ("uv3", "UV3", ValueType::Vector3),
        };
        Signature {
            key,
            name,
            menu: name,
            properties: &[],
            returns,
        }
    }

    fn compute(self, pixel: &Pixel) -> Value {
        let uv = pixel.uv;
        match self {
            Self::U => Value::Float(uv.x),
            Self::V => Value::Float(uv.y),
            Self::Uv => Value::Vector2(uv),
            Self::OneMinusU => Value::Float(1.0 - uv.x),
            Self::OneMinusV => Value::Float(1.0 - uv.y),
            Self::X => Value::Int(pixel.x),
            Self::Y => Value::Int(pixel.y),
            Self::XMinusOne => Value::Int(pixel.x - 1),
            Self::XPlusOne => Value::Int(pixel.x + 1),
            Self::YMinusOne => Value::Int(pixel.y - 1),
            Self::YPlusOne => Value::Int(pixel.y + 1),
            Self::UvCenterDistance => {
                let (u, v) = (uv.x - 0.5, uv.y - 0.5);
                Value::Float((u * u + v * v).sqrt())
            }
            Self::UvCenterDistanceSquared => {
                let (u, v) = (uv.x - 0.5, uv.y - 0.5);
                Value::Float(u * u + v * v)
            }
            Self::Uv3 => Value::Vector3(uv.extend(0.0)),
        }
    }
}

/// Diagram output functions. Both produce a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFunction {
    /// Passes a color through.
    Color,
    /// Writes a float into every channel.
    Value,
}

const OUTPUT_COLOR: &[Property] = &[Property::new("color", "Color", ValueType::Color)];
const OUTPUT_VALUE: &[Property] = &[Property::new("value", "Value", ValueType::Float)];

const INPUT_BOOL: &[Property] = &[
    Property::new("value", "Bool", ValueType::Bool),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_INT: &[Property] = &[
    Property::new("value", "Int", ValueType::Int),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_FLOAT: &[Property] = &[
    Property::new("value", "Float", ValueType::Float),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_VECTOR2: &[Property] = &[
    Property::new("value", "Vector2", ValueType::Vector2),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_VECTOR3: &[Property] = &[
    Property::new("value", "Vector3", ValueType::Vector3),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_COLOR: &[Property] = &[
    Property::new("value", "Color", ValueType::Color),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_GRADIENT: &[Property] = &[
    Property::new("value", "Gradient", ValueType::Gradient),
    Property::new("name", "Name", ValueType::String),
];
const INPUT_STRING: &[Property] = &[
    Property::new("value", "String", ValueType::String),
    Property::new("name", "Name", ValueType::String),
];

/// Types an input node can hold.
pub const INPUT_TYPES: [ValueType; 7] = [
    ValueType::Bool,
    ValueType::Int,
    ValueType::Float,
    ValueType::Vector2,
    ValueType::Vector3,
    ValueType::Color,
    ValueType::Gradient,
];

/// A node's function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FunctionKind {
    /// Pixel coordinate source.
    Coordinate(Coordinate),
    /// Named run-time input of the given type.
    Input(ValueType),
    /// Boolean function.
    Bool(BoolOp),
    /// Float function.
    Float(FloatOp),
    /// Integer function.
    Int(IntOp),
    /// 2D vector function.
    Vector2(Vector2Op),
    /// 3D vector function.
    Vector3(Vector3Op),
    /// Color function.
    Color(ColorOp),
    /// Noise sampler.
    Noise(NoiseFunction),
    /// Diagram output.
    Output(OutputFunction),
}

impl FunctionKind {
    /// Every built-in function.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut kinds = Vec::new();
        kinds.extend(Coordinate::ALL.into_iter().map(Self::Coordinate));
        kinds.extend(INPUT_TYPES.into_iter().map(Self::Input));
        kinds.extend(BoolOp::all().into_iter().map(Self::Bool));
        kinds.extend(FloatOp::ALL.into_iter().map(Self::Float));
        kinds.extend(IntOp::ALL.into_iter().map(Self::Int));
        kinds.extend(Vector2Op::ALL.into_iter().map(Self::Vector2));
        kinds.extend(Vector3Op::ALL.into_iter().map(Self::Vector3));
        kinds.extend(ColorOp::ALL.into_iter().map(Self::Color));
        kinds.extend(NoiseFunction::all().into_iter().map(Self::Noise));
        kinds.push(Self::Output(OutputFunction::Color));
        kinds.push(Self::Output(OutputFunction::Value));
        kinds
    }

    /// Grouping and id prefix.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Coordinate(_) => Category::Coordinates,
            Self::Input(_) => Category::Inputs,
            Self::Bool(_) => Category::Booleans,
            Self::Float(_) => Category::Floats,
            Self::Int(_) => Category::Ints,
            Self::Vector2(_) => Category::Vector2,
            Self::Vector3(_) => Category::Vector3,
            Self::Color(_) => Category::Colors,
            Self::Noise(noise) => match noise.dimensions {
                Dimensions::Two => Category::Noise2D,
                Dimensions::Three => Category::Noise3D,
            },
            Self::Output(_) => Category::Outputs,
        }
    }

    fn signature(&self) -> Option<Signature> {
        match self {
            Self::Coordinate(c) => Some(c.signature()),
            Self::Bool(op) => Some(op.signature()),
            Self::Float(op) => Some(op.signature()),
            Self::Int(op) => Some(op.signature()),
            Self::Vector2(op) => Some(op.signature()),
            Self::Vector3(op) => Some(op.signature()),
            Self::Color(op) => Some(op.signature()),
            Self::Input(_) | Self::Noise(_) | Self::Output(_) => None,
        }
    }

    /// Registry id, `category.name`.
    #[must_use]
    pub fn id(&self) -> String {
        let key = match (self, self.signature()) {
            (_, Some(signature)) => signature.key.to_string(),
            (Self::Input(ty), None) => ty.name().to_string(),
            (Self::Noise(noise), None) => noise.key(),
            (Self::Output(OutputFunction::Color), None) => "color".to_string(),
            (_, None) => "value".to_string(),
        };
        format!("{}.{key}", self.category().prefix())
    }

    /// Short display name.
    #[must_use]
    pub fn name(&self) -> String {
        match (self, self.signature()) {
            (_, Some(signature)) => signature.name.to_string(),
            (Self::Noise(noise), None) => noise.name(),
            (Self::Input(_), None) => "Input".to_string(),
            (_, None) => "Output".to_string(),
        }
    }

    /// Menu path, `Group/Entry`.
    #[must_use]
    pub fn menu_name(&self) -> String {
        match (self, self.signature()) {
            (Self::Coordinate(_), Some(signature)) => format!("Coordinates/{}", signature.menu),
            (_, Some(signature)) => signature.menu.to_string(),
            (Self::Noise(noise), None) => noise.menu_name(),
            (Self::Input(ty), None) => format!("Input/{}", INPUT_LABELS[input_slot(*ty)]),
            (Self::Output(OutputFunction::Color), None) => "Output/Color".to_string(),
            (_, None) => "Output/Value".to_string(),
        }
    }

    /// Declared arguments, in order.
    #[must_use]
    pub fn properties(&self) -> &'static [Property] {
        match (self, self.signature()) {
            (_, Some(signature)) => signature.properties,
            (Self::Noise(noise), None) => noise.properties(),
            (Self::Input(ty), None) => match ty {
                ValueType::Bool => INPUT_BOOL,
                ValueType::Int => INPUT_INT,
                ValueType::Float => INPUT_FLOAT,
                ValueType::Vector2 => INPUT_VECTOR2,
                ValueType::Vector3 => INPUT_VECTOR3,
                ValueType::Color => INPUT_COLOR,
                ValueType::Gradient => INPUT_GRADIENT,
                ValueType::String => INPUT_STRING,
            },
            (Self::Output(OutputFunction::Color), None) => OUTPUT_COLOR,
            (_, None) => OUTPUT_VALUE,
        }
    }

    /// Type of the computed value. Outputs produce colors.
    #[must_use]
    pub fn return_type(&self) -> ValueType {
        match (self, self.signature()) {
            (_, Some(signature)) => signature.returns,
            (Self::Input(ty), None) => *ty,
            (Self::Noise(noise), None) => noise.return_type(),
            (_, None) => ValueType::Color,
        }
    }

    /// Default for argument `index`.
    #[must_use]
    pub fn default_argument(&self, index: usize) -> Option<Value> {
        self.properties().get(index).map(Property::default_value)
    }

    /// True for named run-time inputs.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// True for output functions.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }

    /// Computes the node value from its arguments, in property order.
    #[must_use]
    pub fn compute(&self, args: &[Value], pixel: &Pixel) -> Value {
        match self {
            Self::Coordinate(c) => c.compute(pixel),
            Self::Input(ty) => args.first().cloned().unwrap_or_else(|| ty.zero()),
            Self::Bool(op) => op.compute(args),
            Self::Float(op) => Value::Float(op.compute(args)),
            Self::Int(op) => Value::Int(op.compute(args)),
            Self::Vector2(op) => op.compute(args),
            Self::Vector3(op) => op.compute(args),
            Self::Color(op) => op.compute(args),
            Self::Noise(noise) => noise.compute(args),
            Self::Output(OutputFunction::Color) => Value::Color(color_arg(args, 0)),
            Self::Output(OutputFunction::Value) => Value::Color(Color::splat(float_arg(args, 0))),
        }
    }
}

const INPUT_LABELS: [&str; 8] = ["Bool", "Int", "Float", "Vector2", "Vector3", "Color", "Gradient", "String"];

const fn input_slot(ty: ValueType) -> usize {
    match ty {
        ValueType::Bool => 0,
        ValueType::Int => 1,
        ValueType::Float => 2,
        ValueType::Vector2 => 3,
        ValueType::Vector3 => 4,
        ValueType::Color => 5,
        ValueType::Gradient => 6,
        ValueType::String => 7,
    }
}

#[inline]
pub(crate) fn bool_arg(args: &[Value], index: usize) -> bool {
    args.get(index).is_some_and(Value::as_bool)
}

#[inline]
pub(crate) fn float_arg(args: &[Value], index: usize) -> f32 {
    args.get(index).map_or(0.0, Value::as_float)
}

#[inline]
pub(crate) fn int_arg(args: &[Value], index: usize) -> i32 {
    args.get(index).map_or(0, Value::as_int)
}

#[inline]
pub(crate) fn vector2_arg(args: &[Value], index: usize) -> Vec2 {
    args.get(index).map_or(Vec2::ZERO, Value::as_vector2)
}

#[inline]
pub(crate) fn vector3_arg(args: &[Value], index: usize) -> Vec3 {
    args.get(index).map_or(Vec3::ZERO, Value::as_vector3)
}

#[inline]
pub(crate) fn color_arg(args: &[Value], index: usize) -> Color {
    args.get(index).map_or(Color::CLEAR, Value::as_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(x: i32, y: i32, u: f32, v: f32) -> Pixel {
        Pixel { x, y, uv: Vec2::new(u, v) }
    }

    #[test]
    fn test_ids_are_unique() {
        let kinds = FunctionKind::all();
        let mut ids: Vec<String> = kinds.iter().map(FunctionKind::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), kinds.len(), "duplicate function ids");
    }

    #[test]
    fn test_known_ids() {
        let ids: Vec<String> = FunctionKind::all().iter().map(FunctionKind::id).collect();
        for id in [
            "coordinates.uv",
            "coordinates.uv_center_distance_squared",
            "input.float",
            "booleans.choose_vector3",
            "booleans.int_between_inclusive",
            "colors.blend_soft_light",
            "vector2.y_minus_x",
            "vector3.normal_dxt5nm",
            "ints.cube",
            "floats.multiply_add",
            "ints.from_float",
            "vector3.cross",
            "colors.gradient",
            "noise2d.perlin_tiled_xy",
            "noise3d.voronoi_chebyshev_tiled_xyz",
            "output.color",
            "output.value",
        ] {
            assert!(ids.iter().any(|candidate| candidate == id), "missing function {id}");
        }
    }

    #[test]
    fn test_defaults_match_property_count() {
        for kind in FunctionKind::all() {
            for (index, property) in kind.properties().iter().enumerate() {
                let default = kind.default_argument(index).expect("default exists");
                assert_eq!(default.value_type(), property.value_type, "{} default type", kind.id());
            }
            assert!(kind.default_argument(kind.properties().len()).is_none());
        }
    }

    #[test]
    fn test_coordinates() {
        let p = pixel(3, 4, 0.25, 0.75);
        assert_eq!(Coordinate::OneMinusV.compute(&p), Value::Float(0.25));
        assert_eq!(Coordinate::XMinusOne.compute(&p), Value::Int(2));
        assert_eq!(Coordinate::Uv3.compute(&p), Value::Vector3(Vec3::new(0.25, 0.75, 0.0)));
        assert_eq!(Coordinate::UvCenterDistanceSquared.compute(&p), Value::Float(0.125));
        assert_eq!(Coordinate::UvCenterDistance.compute(&pixel(0, 0, 0.5, 0.5)), Value::Float(0.0));
    }

    #[test]
    fn test_output_value_fills_every_channel() {
        let kind = FunctionKind::Output(OutputFunction::Value);
        assert_eq!(kind.compute(&[Value::Float(0.5)], &Pixel::default()), Value::Color(Color::splat(0.5)));
        assert_eq!(kind.return_type(), ValueType::Color);
    }

    #[test]
    fn test_input_passes_value_through() {
        let kind = FunctionKind::Input(ValueType::Float);
        let args = [Value::Float(2.5), Value::String("scale".into())];
        assert_eq!(kind.compute(&args, &Pixel::default()), Value::Float(2.5));
        assert_eq!(kind.id(), "input.float");
        assert_eq!(kind.menu_name(), "Input/Float");
    }
}
