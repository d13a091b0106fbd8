//! 2D and 3D vector math.

use std::f32::consts::PI;

use texel_shared::{Color, Vec2, Vec3};

use super::{float_arg, vector2_arg, vector3_arg, Property, Signature};
use crate::value::{Value, ValueType};

const V2_XY: &[Property] = &[
    Property::new("x", "X", ValueType::Float),
    Property::new("y", "Y", ValueType::Float),
];
const V2_AB: &[Property] = &[
    Property::new("a", "A", ValueType::Vector2),
    Property::new("b", "B", ValueType::Vector2),
];
const V2_FLOAT: &[Property] = &[
    Property::new("a", "A", ValueType::Vector2),
    Property::new("b", "B", ValueType::Float),
];
const V2_SCALE: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector2),
    Property::new("factor", "Factor", ValueType::Float),
];
const V2_ONE: &[Property] = &[Property::new("vector", "Vector", ValueType::Vector2)];
const V2_SET_X: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector2),
    Property::new("x", "X", ValueType::Float),
];
const V2_SET_Y: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector2),
    Property::new("y", "Y", ValueType::Float),
];

const V3_XYZ: &[Property] = &[
    Property::new("x", "X", ValueType::Float),
    Property::new("y", "Y", ValueType::Float),
    Property::new("z", "Z", ValueType::Float),
];
const V3_AB: &[Property] = &[
    Property::new("a", "A", ValueType::Vector3),
    Property::new("b", "B", ValueType::Vector3),
];
const V3_FLOAT: &[Property] = &[
    Property::new("a", "A", ValueType::Vector3),
    Property::new("b", "B", ValueType::Float),
];
const V3_SCALE: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector3),
    Property::new("factor", "Factor", ValueType::Float),
];
const V3_ONE: &[Property] = &[Property::new("vector", "Vector", ValueType::Vector3)];
const V3_SET_X: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector3),
    Property::new("x", "X", ValueType::Float),
];
const V3_SET_Y: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector3),
    Property::new("y", "Y", ValueType::Float),
];
const V3_SET_Z: &[Property] = &[
    Property::new("vector", "Vector", ValueType::Vector3),
    Property::new("z", "Z", ValueType::Float),
];
const SPHERE: &[Property] = &[
    Property::new("longitude", "Longitude", ValueType::Float),
    Property::new("latitude", "Latitude", ValueType::Float),
];

/// 2D vector functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vector2Op {
    /// Builds a vector from two floats.
    FromFloats,
    /// Component-wise sum.
    Add,
    /// Adds a float to both components.
    AddFloat,
    /// Component-wise difference.
    Subtract,
    /// Subtracts a float from both components.
    SubtractFloat,
    /// Multiplies by a float.
    Scale,
    /// Dot product.
    Dot,
    /// Euclidean length.
    Length,
    /// Squared length.
    SquareLength,
    /// Flips both components.
    Negate,
    /// Unit vector, or zero for a zero vector.
    Normalize,
    /// X component.
    GetX,
    /// Y component.
    GetY,
    /// Replaces x.
    SetX,
    /// Replaces y.
    SetY,
    /// `x + y`
    XPlusY,
    /// `x * y`
    XTimesY,
    /// `x - y`
    XMinusY,
    /// `y - x`
    YMinusX,
}

impl Vector2Op {
    /// Every 2D vector function.
    pub const ALL: [Self; 19] = [
        Self::FromFloats,
        Self::Add,
        Self::AddFloat,
        Self::Subtract,
        Self::SubtractFloat,
        Self::Scale,
        Self::Dot,
        Self::Length,
        Self::SquareLength,
        Self::Negate,
        Self::Normalize,
        Self::GetX,
        Self::GetY,
        Self::SetX,
        Self::SetY,
        Self::XPlusY,
        Self::XTimesY,
        Self::XMinusY,
        Self::YMinusX,
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties, returns) = match self {
            Self::FromFloats => ("from_floats", "Vector2", "Vector2/From Floats", V2_XY, ValueType::Vector2),
            Self::Add => ("add", "+", "Vector2/+ Add", V2_AB, ValueType::Vector2),
            Self::AddFloat => ("add_float", "+", "Vector2/+ Add Float", V2_FLOAT, ValueType::Vector2),
            Self::Subtract => ("subtract", "-", "Vector2/- Subtract", V2_AB, ValueType::Vector2),
            Self::SubtractFloat => ("subtract_float", "-", "Vector2/- Subtract Float", V2_FLOAT, ValueType::Vector2),
            Self::Scale => ("scale", "Scale", "Vector2/Scale", V2_SCALE, ValueType::Vector2),
            Self::Dot => ("dot", "\u{b7}", "Vector2/\u{b7} Dot", V2_AB, ValueType::Float),
            Self::Length => ("length", "Length", "Vector2/Length", V2_ONE, ValueType::Float),
            Self::SquareLength => ("square_length", "Length\u{b2}", "Vector2/Square Length", V2_ONE, ValueType::Float),
            Self::Negate => ("negate", "Negate", "Vector2/Negate", V2_ONE, ValueType::Vector2),
            Self::Normalize => ("normalize", "Normalize", "Vector2/Normalize", V2_ONE, ValueType::Vector2),
            Self::GetX => ("get_x", "X", "Vector2/Axes/Get X", V2_ONE, ValueType::Float),
            Self::GetY => ("get_y", "Y", "Vector2/Axes/Get Y", V2_ONE, ValueType::Float),
            Self::SetX => ("set_x", "Set X", "Vector2/Axes/Set X", V2_SET_X, ValueType::Vector2),
            Self::SetY => ("set_y", "Set Y", "Vector2/Axes/Set Y", V2_SET_Y, ValueType::Vector2),
            Self::XPlusY => ("x_plus_y", "X + Y", "Vector2/Axes/X + Y", V2_ONE, ValueType::Float),
            Self::XTimesY => ("x_times_y", "X \u{d7} Y", "Vector2/Axes/X \u{d7} Y", V2_ONE, ValueType::Float),
            Self::XMinusY => ("x_minus_y", "X - Y", "Vector2/Axes/X - Y", V2_ONE, ValueType::Float),
            Self::YMinusX => ("y_minus_x", "Y - X", "Vector2/Axes/Y - X", V2_ONE, ValueType::Float),
        };
        Signature {
            key,
            name,
            menu,
            properties,
            returns,
        }
    }

    pub(crate) fn compute(self, args: &[Value]) -> Value {
        let a = vector2_arg(args, 0);
        match self {
            Self::FromFloats => Value::Vector2(Vec2::new(float_arg(args, 0), float_arg(args, 1))),
            Self::Add => Value::Vector2(a + vector2_arg(args, 1)),
            Self::AddFloat => {
                let b = float_arg(args, 1);
                Value::Vector2(Vec2::new(a.x + b, a.y + b))
            }
            Self::Subtract => Value::Vector2(a - vector2_arg(args, 1)),
            Self::SubtractFloat => {
                let b = float_arg(args, 1);
                Value::Vector2(Vec2::new(a.x - b, a.y - b))
            }
            Self::Scale => Value::Vector2(a * float_arg(args, 1)),
            Self::Dot => Value::Float(a.dot(vector2_arg(args, 1))),
            Self::Length => Value::Float(a.length()),
            Self::SquareLength => Value::Float(a.dot(a)),
            Self::Negate => Value::Vector2(-a),
            Self::Normalize => Value::Vector2(a.normalized()),
            Self::GetX => Value::Float(a.x),
            Self::GetY => Value::Float(a.y),
            Self::SetX => Value::Vector2(Vec2::new(float_arg(args, 1), a.y)),
            Self::SetY => Value::Vector2(Vec2::new(a.x, float_arg(args, 1))),
            Self::XPlusY => Value::Float(a.x + a.y),
            Self::XTimesY => Value::Float(a.x * a.y),
            Self::XMinusY => Value::Float(a.x - a.y),
            Self::YMinusX => Value::Float(a.y - a.x),
        }
    }
}

/// 3D vector functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vector3Op {
    /// Builds a vector from three floats.
    FromFloats,
    /// Component-wise sum.
    Add,
    /// Adds a float to every component.
    AddFloat,
    /// Component-wise difference.
    Subtract,
    /// Subtracts a float from every component.
    SubtractFloat,
    /// Multiplies by a float.
    Scale,
    /// Dot product.
    Dot,
    /// Cross product.
    Cross,
    /// Euclidean length.
    Length,
    /// Squared length.
    SquareLength,
    /// Flips every component.
    Negate,
    /// Unit vector, or zero for a zero vector.
    Normalize,
    /// Point on the unit sphere from longitude and latitude, both in [0, 1].
    Sphere,
    /// X component.
    GetX,
    /// Y component.
    GetY,
    /// Z component.
    GetZ,
    /// Replaces x.
    SetX,
    /// Replaces y.
    SetY,
    /// Replaces z.
    SetZ,
    /// `x + y`
    XPlusY,
    /// `x * y`
    XTimesY,
    /// `x - y`
    XMinusY,
    /// `y - x`
    YMinusX,
    /// Packs a normal into an opaque color, `c * 0.5 + 0.5`.
    NormalRgb,
    /// Packs a normal DXT5nm style: x in alpha, y in green.
    NormalDxt5nm,
}

impl Vector3Op {
    /// Every 3D vector function.
    pub const ALL: [Self; 25] = [
        Self::FromFloats,
        Self::Add,
        Self::AddFloat,
        Self::Subtract,
        Self::SubtractFloat,
        Self::Scale,
        Self::Dot,
        Self::Cross,
        Self::Length,
        Self::SquareLength,
        Self::Negate,
        Self::Normalize,
        Self::Sphere,
        Self::GetX,
        Self::GetY,
        Self::GetZ,
        Self::SetX,
        Self::SetY,
        Self::SetZ,
        Self::XPlusY,
        Self::XTimesY,
        Self::XMinusY,
        Self::YMinusX,
        Self::NormalRgb,
        Self::NormalDxt5nm,
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties, returns) = match self {
            Self::FromFloats => ("from_floats", "Vector3", "Vector3/From Floats", V3_XYZ, ValueType::Vector3),
            Self::Add => ("add", "+", "Vector3/+ Add", V3_AB, ValueType::Vector3),
            Self::AddFloat => ("add_float", "+", "Vector3/+ Add Float", V3_FLOAT, ValueType::Vector3),
            Self::Subtract => ("subtract", "-", "Vector3/- Subtract", V3_AB, ValueType::Vector3),
            Self::SubtractFloat => ("subtract_float", "-", "Vector3/- Subtract Float", V3_FLOAT, ValueType::Vector3),
            Self::Scale => ("scale", "Scale", "Vector3/Scale", V3_SCALE, ValueType::Vector3),
            Self::Dot => ("dot", "\u{b7}", "Vector3/\u{b7} Dot", V3_AB, ValueType::Float),
            Self::Cross => ("cross", "\u{d7}", "Vector3/\u{d7} Cross", V3_AB, ValueType::Vector3),
            Self::Length => ("length", "Length", "Vector3/Length", V3_ONE, ValueType::Float),
            Self::SquareLength => ("square_length", "Length\u{b2}", "Vector3/Square Length", V3_ONE, ValueType::Float),
            Self::Negate => ("negate", "Negate", "Vector3/Negate", V3_ONE, ValueType::Vector3),
            Self::Normalize => ("normalize", "Normalize", "Vector3/Normalize", V3_ONE, ValueType::Vector3),
            Self::Sphere => ("sphere", "Sphere", "Vector3/Sphere", SPHERE, ValueType::Vector3),
            Self::GetX => ("get_x", "X", "Vector3/Axes/Get X", V3_ONE, ValueType::Float),
            Self::GetY => ("get_y", "Y", "Vector3/Axes/Get Y", V3_ONE, ValueType::Float),
            Self::GetZ => ("get_z", "Z", "Vector3/Axes/Get Z", V3_ONE, ValueType::Float),
            Self::SetX => ("set_x", "Set X", "Vector3/Axes/Set X", V3_SET_X, ValueType::Vector3),
            Self::SetY => ("set_y", "Set Y", "Vector3/Axes/Set Y", V3_SET_Y, ValueType::Vector3),
            Self::SetZ => ("set_z", "Set Z", "Vector3/Axes/Set Z", V3_SET_Z, ValueType::Vector3),
            Self::XPlusY => ("x_plus_y", "X + Y", "Vector3/Axes/X + Y", V3_ONE, ValueType::Float),
            Self::XTimesY => ("x_times_y", "X \u{d7} Y", "Vector3/Axes/X \u{d7} Y", V3_ONE, ValueType::Float),
            Self::XMinusY => ("x_minus_y", "X - Y", "Vector3/Axes/X - Y", V3_ONE, ValueType::Float),
            Self::YMinusX => ("y_minus_x", "Y - X", "Vector3/Axes/Y - X", V3_ONE, ValueType::Float),
            Self::NormalRgb => ("normal_rgb", "Normal RGB", "Vector3/Normals/RGB", V3_ONE, ValueType::Color),
            Self::NormalDxt5nm => ("normal_dxt5nm", "Normal DXT5nm", "Vector3/Normals/DXT5nm", V3_ONE, ValueType::Color),
        };
        Signature {
            key,
            name,
            menu,
            properties,
            returns,
        }
    }

    pub(crate) fn compute(self, args: &[Value]) -> Value {
        let a = vector3_arg(args, 0);
        match self {
            Self::FromFloats => Value::Vector3(Vec3::new(
                float_arg(args, 0),
                float_arg(args, 1),
                float_arg(args, 2),
            )),
            Self::Add => Value::Vector3(a + vector3_arg(args, 1)),
            Self::AddFloat => Value::Vector3(a + Vec3::splat(float_arg(args, 1))),
            Self::Subtract => Value::Vector3(a - vector3_arg(args, 1)),
            Self::SubtractFloat => Value::Vector3(a - Vec3::splat(float_arg(args, 1))),
            Self::Scale => Value::Vector3(a * float_arg(args, 1)),
            Self::Dot => Value::Float(a.dot(vector3_arg(args, 1))),
            Self::Cross => Value::Vector3(a.cross(vector3_arg(args, 1))),
            Self::Length => Value::Float(a.length()),
            Self::SquareLength => Value::Float(a.dot(a)),
            Self::Negate => Value::Vector3(-a),
            Self::Normalize => Value::Vector3(a.normalized()),
            Self::Sphere => Value::Vector3(sphere(float_arg(args, 0), float_arg(args, 1))),
            Self::GetX => Value::Float(a.x),
            Self::GetY => Value::Float(a.y),
            Self::GetZ => Value::Float(a.z),
            Self::SetX => Value::Vector3(Vec3::new(float_arg(args, 1), a.y, a.z)),
            Self::SetY => Value::Vector3(Vec3::new(a.x, float_arg(args, 1), a.z)),
            Self::SetZ => Value::Vector3(Vec3::new(a.x, a.y, float_arg(args, 1))),
            Self::XPlusY => Value::Float(a.x + a.y),
            Self::XTimesY => Value::Float(a.x * a.y),
            Self::XMinusY => Value::Float(a.x - a.y),
            Self::YMinusX => Value::Float(a.y - a.x),
            Self::NormalRgb => Value::Color(Color::new(a.x * 0.5 + 0.5, a.y * 0.5 + 0.5, a.z * 0.5 + 0.5, 1.0)),
            Self::NormalDxt5nm => Value::Color(Color::new(0.0, a.y * 0.5 + 0.5, 0.0, a.x * 0.5 + 0.5)),
        }
    }
}

/// Longitude wraps once around y; latitude runs from the south pole (0) to the north pole (1).
fn sphere(longitude: f32, latitude: f32) -> Vec3 {
    let ring = (latitude * PI).sin();
    Vec3::new(
        ring * (longitude * (PI * -2.0)).sin(),
        ((latitude - 0.5) * PI).sin(),
        ring * ((longitude + 0.25) * (PI * 2.0)).sin(),
    )
}
