//! Color construction, channel access and layer blending.

use texel_shared::Color;

use super::{color_arg, float_arg, int_arg, vector3_arg, Property, PropertyDefault, Signature};
use crate::value::{Value, ValueType};

const RGBA: &[Property] = &[
    Property::new("r", "R", ValueType::Float),
    Property::new("g", "G", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
    Property::new("a", "A", ValueType::Float).with_default(PropertyDefault::Float(1.0)),
];
const FROM_VECTOR: &[Property] = &[Property::new("vector", "Vector", ValueType::Vector3)];
const LERP: &[Property] = &[
    Property::new("a", "A", ValueType::Color),
    Property::new("b", "B", ValueType::Color),
    Property::new("t", "T", ValueType::Float),
];
const ONE: &[Property] = &[Property::new("color", "Color", ValueType::Color)];
const GRADIENT: &[Property] = &[
    Property::new("gradient", "Gradient", ValueType::Gradient),
    Property::new("t", "T", ValueType::Float),
];
const GRAYSCALE: &[Property] = &[Property::new("value", "Value", ValueType::Float)];
const GET_CHANNEL: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("channel", "Channel", ValueType::Int),
];
const SET_CHANNEL: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("channel", "Channel", ValueType::Int),
    Property::new("value", "Value", ValueType::Float),
];
const SET_RED: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("red", "Red", ValueType::Float),
];
const SET_GREEN: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("green", "Green", ValueType::Float),
];
const SET_BLUE: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("blue", "Blue", ValueType::Float),
];
const SET_ALPHA: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("alpha", "Alpha", ValueType::Float),
];
const AB: &[Property] = &[
    Property::new("a", "A", ValueType::Color),
    Property::new("b", "B", ValueType::Color),
];
const ABC: &[Property] = &[
    Property::new("a", "A", ValueType::Color),
    Property::new("b", "B", ValueType::Color),
    Property::new("c", "C", ValueType::Color),
];
const SCALE: &[Property] = &[
    Property::new("color", "Color", ValueType::Color),
    Property::new("factor", "Factor", ValueType::Float),
];
const LAYERS: &[Property] = &[
    Property::new("top", "Top", ValueType::Color),
    Property::new("bottom", "Bottom", ValueType::Color),
];

/// Layer blend modes. `top` is composited over `bottom` by its alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Alpha compositing.
    Normal,
    /// Channel-wise minimum.
    Darken,
    /// Channel product.
    Multiply,
    /// `1 - (1 - bottom) / top`
    ColorBurn,
    /// `bottom + top - 1`
    LinearBurn,
    /// Channel-wise maximum.
    Lighten,
    /// Inverted product of the inverses.
    Screen,
    /// `bottom / (1 - top)`
    ColorDodge,
    /// `bottom + top`
    LinearDodge,
    /// Multiply or screen, switched on the bottom channel.
    Overlay,
    /// Multiply or screen, switched on the top channel.
    HardLight,
    /// Soft overlay.
    SoftLight,
}

impl BlendMode {
    /// Every blend mode.
    pub const ALL: [Self; 12] = [
        Self::Normal,
        Self::Darken,
        Self::Multiply,
        Self::ColorBurn,
        Self::LinearBurn,
        Self::Lighten,
        Self::Screen,
        Self::ColorDodge,
        Self::LinearDodge,
        Self::Overlay,
        Self::HardLight,
        Self::SoftLight,
    ];

    const fn labels(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Normal => ("blend_normal", "Normal", "Colors/Blend Modes/Normal"),
            Self::Darken => ("blend_darken", "Darken", "Colors/Blend Modes/Darken"),
            Self::Multiply => ("blend_multiply", "Multiply", "Colors/Blend Modes/Multiply"),
            Self::ColorBurn => ("blend_color_burn", "Color Burn", "Colors/Blend Modes/Color Burn"),
            Self::LinearBurn => ("blend_linear_burn", "Linear Burn", "Colors/Blend Modes/Linear Burn"),
            Self::Lighten => ("blend_lighten", "Lighten", "Colors/Blend Modes/Lighten"),
            Self::Screen => ("blend_screen", "Screen", "Colors/Blend Modes/Screen"),
            Self::ColorDodge => ("blend_color_dodge", "Color Dodge", "Colors/Blend Modes/Color Dodge"),
            Self::LinearDodge => ("blend_linear_dodge", "Linear Dodge", "Colors/Blend Modes/Linear Dodge"),
            Self::Overlay => ("blend_overlay", "Overlay", "Colors/Blend Modes/Overlay"),
            Self::HardLight => ("blend_hard_light", "Hard Light", "Colors/Blend Modes/Hard Light"),
            Self::SoftLight => ("blend_soft_light", "Soft Light", "Colors/Blend Modes/Soft Light"),
        }
    }

    /// Composites `top` over `bottom`.
    ///
    /// Every mode except [`BlendMode::Normal`] keeps the bottom alpha.
    #[must_use]
    pub fn blend(self, top: Color, bottom: Color) -> Color {
        match self {
            Self::Normal => normal(top, bottom),
            Self::Darken => layer(top, bottom, |t, b| if t < b { t } else { b }),
            Self::Multiply => layer(top, bottom, |t, b| t * b),
            Self::ColorBurn => layer(top, bottom, |t, b| 1.0 - (1.0 - b) / if t == 0.0 { 1e-10 } else { t }),
            Self::LinearBurn => layer(top, bottom, |t, b| b + t - 1.0),
            Self::Lighten => layer(top, bottom, |t, b| if t > b { t } else { b }),
            Self::Screen => layer(top, bottom, |t, b| 1.0 - (1.0 - b) * (1.0 - t)),
            Self::ColorDodge => layer(top, bottom, |t, b| b / if t == 1.0 { 1e-10 } else { 1.0 - t }),
            Self::LinearDodge => layer(top, bottom, |t, b| b + t),
            Self::Overlay => layer(top, bottom, |t, b| if b < 0.5 { multiply2(t, b) } else { screen2(t, b) }),
            Self::HardLight => layer(top, bottom, |t, b| if t < 0.5 { multiply2(t, b) } else { screen2(t, b) }),
            Self::SoftLight => layer(top, bottom, |t, b| b * b * (1.0 - 2.0 * t) + 2.0 * b * t),
        }
    }
}

#[inline]
fn multiply2(t: f32, b: f32) -> f32 {
    2.0 * b * t
}

#[inline]
fn screen2(t: f32, b: f32) -> f32 {
    1.0 - 2.0 * (1.0 - b) * (1.0 - t)
}

fn layer(top: Color, bottom: Color, mode: impl Fn(f32, f32) -> f32) -> Color {
    let keep = 1.0 - top.a;
    Color::new(
        bottom.r * keep + mode(top.r, bottom.r) * top.a,
        bottom.g * keep + mode(top.g, bottom.g) * top.a,
        bottom.b * keep + mode(top.b, bottom.b) * top.a,
        bottom.a,
    )
}

fn normal(top: Color, mut bottom: Color) -> Color {
    if bottom.a == 1.0 {
        let keep = 1.0 - top.a;
        bottom.r = top.r * top.a + bottom.r * keep;
        bottom.g = top.g * top.a + bottom.g * keep;
        bottom.b = top.b * top.a + bottom.b * keep;
    } else {
        let keep = bottom.a * (1.0 - top.a);
        bottom.a = top.a + keep;
        let inverse = if bottom.a == 0.0 { 1.0 } else { 1.0 / bottom.a };
        bottom.r = (top.r * top.a + bottom.r * keep) * inverse;
        bottom.g = (top.g * top.a + bottom.g * keep) * inverse;
        bottom.b = (top.b * top.a + bottom.b * keep) * inverse;
    }
    bottom
}

/// Color functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorOp {
    /// Builds a color from four floats; alpha defaults to 1.
    FromFloats,
    /// Uses a vector as RGB with opaque alpha.
    FromVector3,
    /// Blends two colors with `t` clamped to [0, 1].
    Lerp,
    /// Red channel.
    GetRed,
    /// Green channel.
    GetGreen,
    /// Blue channel.
    GetBlue,
    /// Alpha channel.
    GetAlpha,
    /// Channel by index 0..=3; other indices read red.
    GetChannel,
    /// Replaces red.
    SetRed,
    /// Replaces green.
    SetGreen,
    /// Replaces blue.
    SetBlue,
    /// Replaces alpha.
    SetAlpha,
    /// Replaces the channel at an index 0..=3; other indices replace red.
    SetChannel,
    /// Channel-wise sum, alpha included.
    Add,
    /// Channel-wise sum of three colors.
    Add3,
    /// Multiplies every channel by a factor.
    Scale,
    /// Clamps every channel into [0, 1].
    Clamp,
    /// Evaluates a gradient at `t`.
    Gradient,
    /// Opaque gray with every color channel set to the value.
    Grayscale,
    /// Layer blend.
    Blend(BlendMode),
}

impl ColorOp {
    /// Every color function.
    pub const ALL: [Self; 31] = [
        Self::FromFloats,
        Self::FromVector3,
        Self::Lerp,
        Self::GetRed,
        Self::GetGreen,
        Self::GetBlue,
        Self::GetAlpha,
        Self::GetChannel,
        Self::SetRed,
        Self::SetGreen,
        Self::SetBlue,
        Self::SetAlpha,
        Self::SetChannel,
        Self::Add,
        Self::Add3,
        Self::Scale,
        Self::Clamp,
        Self::Gradient,
        Self::Grayscale,
        Self::Blend(BlendMode::Normal),
        Self::Blend(BlendMode::Darken),
        Self::Blend(BlendMode::Multiply),
        Self::Blend(BlendMode::ColorBurn),
        Self::Blend(BlendMode::LinearBurn),
        Self::Blend(BlendMode::Lighten),
        Self::Blend(BlendMode::Screen),
        Self::Blend(BlendMode::ColorDodge),
        Self::Blend(BlendMode::LinearDodge),
        Self::Blend(BlendMode::Overlay),
        Self::Blend(BlendMode::HardLight),
        Self::Blend(BlendMode::SoftLight),
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties, returns) = match self {
            Self::FromFloats => ("from_floats", "Color", "Colors/From Floats", RGBA, ValueType::Color),
            Self::FromVector3 => ("from_vector3", "Color", "Colors/From Vector3", FROM_VECTOR, ValueType::Color),
            Self::Lerp => ("lerp", "Lerp", "Colors/Lerp", LERP, ValueType::Color),
            Self::GetRed => ("get_red", "Red", "Colors/Channels/Get Red", ONE, ValueType::Float),
            Self::GetGreen => ("get_green", "Green", "Colors/Channels/Get Green", ONE, ValueType::Float),
            Self::GetBlue => ("get_blue", "Blue", "Colors/Channels/Get Blue", ONE, ValueType::Float),
            Self::GetAlpha => ("get_alpha", "Alpha", "Colors/Channels/Get Alpha", ONE, ValueType::Float),
            Self::GetChannel => ("get_channel", "Channel", "Colors/Channels/Get Channel", GET_CHANNEL, ValueType::Float),
            Self::SetRed => ("set_red", "Set Red", "Colors/Channels/Set Red", SET_RED, ValueType::Color),
            Self::SetGreen => ("set_green", "Set Green", "Colors/Channels/Set Green", SET_GREEN, ValueType::Color),
            Self::SetBlue => ("set_blue", "Set Blue", "Colors/Channels/Set Blue", SET_BLUE, ValueType::Color),
            Self::SetAlpha => ("set_alpha", "Set Alpha", "Colors/Channels/Set Alpha", SET_ALPHA, ValueType::Color),
            Self::SetChannel => (
                "set_channel",
                "Set Channel",
                "Colors/Channels/Set Channel",
                SET_CHANNEL,
                ValueType::Color,
            ),
            Self::Add => ("add", "+", "Colors/Add", AB, ValueType::Color),
            Self::Add3 => ("add3", "+ +", "Colors/Add Add", ABC, ValueType::Color),
            Self::Scale => ("scale", "Scale", "Colors/Scale", SCALE, ValueType::Color),
            Self::Clamp => ("clamp", "Clamp", "Colors/Clamp", ONE, ValueType::Color),
            Self::Gradient => ("gradient", "Gradient", "Colors/Gradient", GRADIENT, ValueType::Color),
            Self::Grayscale => ("grayscale", "Grayscale", "Colors/Grayscale", GRAYSCALE, ValueType::Color),
            Self::Blend(mode) => {
                let (key, name, menu) = mode.labels();
                (key, name, menu, LAYERS, ValueType::Color)
            }
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
        let first = color_arg(args, 0);
        match self {
            Self::FromFloats => Value::Color(Color::new(
                float_arg(args, 0),
                float_arg(args, 1),
                float_arg(args, 2),
                args.get(3).map_or(1.0, Value::as_float),
            )),
            Self::FromVector3 => {
                let v = vector3_arg(args, 0);
                Value::Color(Color::new(v.x, v.y, v.z, 1.0))
            }
            Self::Lerp => Value::Color(first.lerp(color_arg(args, 1), float_arg(args, 2))),
            Self::GetRed => Value::Float(first.r),
            Self::GetGreen => Value::Float(first.g),
            Self::GetBlue => Value::Float(first.b),
            Self::GetAlpha => Value::Float(first.a),
            Self::GetChannel => Value::Float(first.channel(int_arg(args, 1))),
            Self::SetRed => Value::Color(first.with_channel(0, float_arg(args, 1))),
            Self::SetGreen => Value::Color(first.with_channel(1, float_arg(args, 1))),
            Self::SetBlue => Value::Color(first.with_channel(2, float_arg(args, 1))),
            Self::SetAlpha => Value::Color(first.with_channel(3, float_arg(args, 1))),
            Self::SetChannel => Value::Color(first.with_channel(int_arg(args, 1), float_arg(args, 2))),
            Self::Add => {
                let b = color_arg(args, 1);
                Value::Color(Color::new(first.r + b.r, first.g + b.g, first.b + b.b, first.a + b.a))
            }
            Self::Add3 => {
                let (b, c) = (color_arg(args, 1), color_arg(args, 2));
                Value::Color(Color::new(
                    first.r + (b.r + c.r),
                    first.g + (b.g + c.g),
                    first.b + (b.b + c.b),
                    first.a + (b.a + c.a),
                ))
            }
            Self::Scale => {
                let f = float_arg(args, 1);
                Value::Color(Color::new(first.r * f, first.g * f, first.b * f, first.a * f))
            }
            Self::Clamp => Value::Color(Color::new(
                first.r.clamp(0.0, 1.0),
                first.g.clamp(0.0, 1.0),
                first.b.clamp(0.0, 1.0),
                first.a.clamp(0.0, 1.0),
            )),
            Self::Gradient => {
                let t = float_arg(args, 1);
                Value::Color(args.first().map_or(Color::WHITE, |g| g.evaluate_gradient(t)))
            }
            Self::Grayscale => {
                let v = float_arg(args, 0);
                Value::Color(Color::new(v, v, v, 1.0))
            }
            Self::Blend(mode) => Value::Color(mode.blend(first, color_arg(args, 1))),
        }
    }
}
