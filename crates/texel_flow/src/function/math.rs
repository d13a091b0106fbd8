//! Float and integer arithmetic.

use std::f32::consts::PI;

use super::{float_arg, int_arg, Property, Signature};
use crate::value::{Value, ValueType};

const AB: &[Property] = &[
    Property::new("a", "A", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
];
const ABC: &[Property] = &[
    Property::new("a", "A", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
    Property::new("c", "C", ValueType::Float),
];
const LERP: &[Property] = &[
    Property::new("a", "A", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
    Property::new("t", "T", ValueType::Float),
];
const VALUE: &[Property] = &[Property::new("value", "Value", ValueType::Float)];
const SINUSOID: &[Property] = &[
    Property::new("value", "Value", ValueType::Float),
    Property::new("frequency", "Frequency", ValueType::Float),
    Property::new("offset", "Offset", ValueType::Float),
];
const FROM_INT: &[Property] = &[Property::new("int", "Int", ValueType::Int)];

const INT_AB: &[Property] = &[
    Property::new("a", "A", ValueType::Int),
    Property::new("b", "B", ValueType::Int),
];
const INT_ABC: &[Property] = &[
    Property::new("a", "A", ValueType::Int),
    Property::new("b", "B", ValueType::Int),
    Property::new("c", "C", ValueType::Int),
];
const INT_VALUE: &[Property] = &[Property::new("value", "Value", ValueType::Int)];
const FROM_FLOAT: &[Property] = &[Property::new("float", "Float", ValueType::Float)];

/// Float functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatOp {
    /// `a + b`
    Add,
    /// `a + b + c`
    Add3,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a * b + c`
    MultiplyAdd,
    /// `a / b`
    Divide,
    /// `a % b`, sign of `a`
    Modulo,
    /// `v + 1`
    PlusOne,
    /// `v - 1`
    MinusOne,
    /// `1 - v`
    OneMinus,
    /// `1 / v`
    Reciprocal,
    /// Larger of `a` and `b`
    Highest,
    /// Smaller of `a` and `b`
    Lowest,
    /// Mean of `a` and `b`
    Average,
    /// `|v|`
    Absolute,
    /// `v * v`
    Square,
    /// `v * v * v`
    Cube,
    /// Square root
    SquareRoot,
    /// Integer to float
    FromInt,
    /// Interpolation with `t` clamped to [0, 1]
    Lerp,
    /// Cosine
    Cosine,
    /// Sine
    Sine,
    /// `sin((v * frequency + offset) * 2pi)`
    Sinusoid,
    /// Clamp into [0, 1]
    Clamp01,
    /// Fractional part, wrapping negatives into [0, 1)
    Loop01,
    /// Triangle wave bouncing between 0 and 1
    PingPong01,
}

impl FloatOp {
    /// Every float function.
    pub const ALL: [Self; 26] = [
        Self::Add,
        Self::Add3,
        Self::Subtract,
        Self::Multiply,
        Self::MultiplyAdd,
        Self::Divide,
        Self::Modulo,
        Self::PlusOne,
        Self::MinusOne,
        Self::OneMinus,
        Self::Reciprocal,
        Self::Highest,
        Self::Lowest,
        Self::Average,
        Self::Absolute,
        Self::Square,
        Self::Cube,
        Self::SquareRoot,
        Self::FromInt,
        Self::Lerp,
        Self::Cosine,
        Self::Sine,
        Self::Sinusoid,
        Self::Clamp01,
        Self::Loop01,
        Self::PingPong01,
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties) = match self {
            Self::Add => ("add", "+", "Floats/+ Add", AB),
            Self::Add3 => ("add3", "+ +", "Floats/+ + Add Add", ABC),
            Self::Subtract => ("subtract", "-", "Floats/- Subtract", AB),
            Self::Multiply => ("multiply", "\u{d7}", "Floats/\u{d7} Multiply", AB),
            Self::MultiplyAdd => ("multiply_add", "\u{d7} +", "Floats/\u{d7} + Multiply Add", ABC),
            Self::Divide => ("divide", "\u{f7}", "Floats/\u{f7} Divide", AB),
            Self::Modulo => ("modulo", "%", "Floats/% Modulo", AB),
            Self::PlusOne => ("plus_one", "+ 1", "Floats/With 1/+ 1", VALUE),
            Self::MinusOne => ("minus_one", "- 1", "Floats/With 1/- 1", VALUE),
            Self::OneMinus => ("one_minus", "1 -", "Floats/With 1/1 -", VALUE),
            Self::Reciprocal => ("reciprocal", "1 \u{f7}", "Floats/With 1/1 \u{f7}", VALUE),
            Self::Highest => ("highest", "Highest", "Floats/Relative/Highest", AB),
            Self::Lowest => ("lowest", "Lowest", "Floats/Relative/Lowest", AB),
            Self::Average => ("average", "Average", "Floats/Relative/Average", AB),
            Self::Absolute => ("absolute", "Abs", "Floats/Absolute", VALUE),
            Self::Square => ("square", "x\u{b2}", "Floats/x\u{b2} Square", VALUE),
            Self::Cube => ("cube", "x\u{b3}", "Floats/x\u{b3} Cube", VALUE),
            Self::SquareRoot => ("square_root", "\u{221a}", "Floats/\u{221a} Square Root", VALUE),
            Self::FromInt => ("from_int", "Float", "Floats/From Int", FROM_INT),
            Self::Lerp => ("lerp", "Lerp", "Floats/Lerp", LERP),
            Self::Cosine => ("cosine", "Cosine", "Floats/Trigonometry/Cosine", VALUE),
            Self::Sine => ("sine", "Sine", "Floats/Trigonometry/Sine", VALUE),
            Self::Sinusoid => ("sinusoid", "Sinusoid", "Floats/Trigonometry/Sinusoid", SINUSOID),
            Self::Clamp01 => ("clamp01", "Clamp 01", "Floats/Range/Clamp 01", VALUE),
            Self::Loop01 => ("loop01", "Loop 01", "Floats/Range/Loop 01", VALUE),
            Self::PingPong01 => ("pingpong01", "Pingpong 01", "Floats/Range/Pingpong 01", VALUE),
        };
        Signature {
            key,
            name,
            menu,
            properties,
            returns: ValueType::Float,
        }
    }

    pub(crate) fn compute(self, args: &[Value]) -> f32 {
        let a = float_arg(args, 0);
        let b = float_arg(args, 1);
        let c = float_arg(args, 2);
        match self {
            Self::Add => a + b,
            Self::Add3 => a + b + c,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::MultiplyAdd => a * b + c,
            Self::Divide => a / b,
            Self::Modulo => a % b,
            Self::PlusOne => a + 1.0,
            Self::MinusOne => a - 1.0,
            Self::OneMinus => 1.0 - a,
            Self::Reciprocal => 1.0 / a,
            Self::Highest => {
                if a >= b {
                    a
                } else {
                    b
                }
            }
            Self::Lowest => {
                if a <= b {
                    a
                } else {
                    b
                }
            }
            Self::Average => (a + b) * 0.5,
            Self::Absolute => {
                if a >= 0.0 {
                    a
                } else {
                    -a
                }
            }
            Self::Square => a * a,
            Self::Cube => a * a * a,
            Self::SquareRoot => a.sqrt(),
            Self::FromInt => int_arg(args, 0) as f32,
            Self::Lerp => {
                if c <= 0.0 {
                    a
                } else if c >= 1.0 {
                    b
                } else {
                    a + (b - a) * c
                }
            }
            Self::Cosine => a.cos(),
            Self::Sine => a.sin(),
            Self::Sinusoid => ((a * b + c) * (PI * 2.0)).sin(),
            Self::Clamp01 => {
                if a < 0.0 {
                    0.0
                } else if a > 1.0 {
                    1.0
                } else {
                    a
                }
            }
            Self::Loop01 => loop01(a),
            Self::PingPong01 => pingpong01(a),
        }
    }
}

fn loop01(mut v: f32) -> f32 {
    if v < 0.0 {
        v += 1.0 - v.trunc();
    }
    v - v.trunc()
}

fn pingpong01(v: f32) -> f32 {
    let v = if v < 0.0 { -v } else { v };
    let i = v as i32;
    if i & 1 == 1 {
        1.0 - v + i as f32
    } else {
        v - i as f32
    }
}

/// Integer functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntOp {
    /// `a + b`, wrapping
    Add,
    /// `a + b + c`, wrapping
    Add3,
    /// `a - b`, wrapping
    Subtract,
    /// `a * b`, wrapping
    Multiply,
    /// `a / b`; zero when `b` is zero
    Divide,
    /// `a % b`; zero when `b` is zero
    Modulo,
    /// `|v|`, wrapping at `i32::MIN`
    Absolute,
    /// `v * v`, wrapping
    Square,
    /// `v * v * v`, wrapping
    Cube,
    /// Float to integer, truncating toward zero
    FromFloat,
}

impl IntOp {
    /// Every integer function.
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Add3,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Absolute,
        Self::Square,
        Self::Cube,
        Self::FromFloat,
    ];

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties) = match self {
            Self::Add => ("add", "+", "Ints/+ Add", INT_AB),
            Self::Add3 => ("add3", "+ +", "Ints/+ + Add Add", INT_ABC),
            Self::Subtract => ("subtract", "-", "Ints/- Subtract", INT_AB),
            Self::Multiply => ("multiply", "\u{d7}", "Ints/\u{d7} Multiply", INT_AB),
            Self::Divide => ("divide", "\u{f7}", "Ints/\u{f7} Divide", INT_AB),
            Self::Modulo => ("modulo", "%", "Ints/% Modulo", INT_AB),
            Self::Absolute => ("absolute", "Abs", "Ints/Absolute", INT_VALUE),
            Self::Square => ("square", "x\u{b2}", "Ints/x\u{b2} Square", INT_VALUE),
            Self::Cube => ("cube", "x\u{b3}", "Ints/x\u{b3} Cube", INT_VALUE),
            Self::FromFloat => ("from_float", "Int", "Ints/From Float", FROM_FLOAT),
        };
        Signature {
            key,
            name,
            menu,
            properties,
            returns: ValueType::Int,
        }
    }

    pub(crate) fn compute(self, args: &[Value]) -> i32 {
        let a = int_arg(args, 0);
        let b = int_arg(args, 1);
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Add3 => a.wrapping_add(b).wrapping_add(int_arg(args, 2)),
            Self::Subtract => a.wrapping_sub(b),
            Self::Multiply => a.wrapping_mul(b),
            Self::Divide => a.checked_div(b).unwrap_or(0),
            Self::Modulo => a.checked_rem(b).unwrap_or(0),
            Self::Absolute => a.wrapping_abs(),
            Self::Square => a.wrapping_mul(a),
            Self::Cube => a.wrapping_mul(a).wrapping_mul(a),
            Self::FromFloat => float_arg(args, 0) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(values: &[f32]) -> Vec<Value> {
        values.iter().copied().map(Value::Float).collect()
    }

    #[test]
    fn test_float_arithmetic() {
        assert_eq!(FloatOp::MultiplyAdd.compute(&floats(&[2.0, 3.0, 1.0])), 7.0);
        assert_eq!(FloatOp::Modulo.compute(&floats(&[-5.5, 2.0])), -1.5);
        assert_eq!(FloatOp::Highest.compute(&floats(&[1.0, 4.0])), 4.0);
        assert_eq!(FloatOp::Average.compute(&floats(&[1.0, 4.0])), 2.5);
        assert_eq!(FloatOp::FromInt.compute(&[Value::Int(-3)]), -3.0);
    }

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(FloatOp::Lerp.compute(&floats(&[2.0, 4.0, -1.0])), 2.0);
        assert_eq!(FloatOp::Lerp.compute(&floats(&[2.0, 4.0, 0.5])), 3.0);
        assert_eq!(FloatOp::Lerp.compute(&floats(&[2.0, 4.0, 7.0])), 4.0);
    }

    #[test]
    fn test_range_functions() {
        assert_eq!(FloatOp::Clamp01.compute(&floats(&[1.5])), 1.0);
        assert_eq!(FloatOp::Loop01.compute(&floats(&[2.25])), 0.25);
        assert_eq!(FloatOp::Loop01.compute(&floats(&[-0.25])), 0.75);
        assert_eq!(FloatOp::PingPong01.compute(&floats(&[1.25])), 0.75);
        assert_eq!(FloatOp::PingPong01.compute(&floats(&[2.25])), 0.25);
        assert_eq!(FloatOp::PingPong01.compute(&floats(&[-0.5])), 0.5);
    }

    #[test]
    fn test_sinusoid_period() {
        let quarter = FloatOp::Sinusoid.compute(&floats(&[0.25, 1.0, 0.0]));
        assert!((quarter - 1.0).abs() < 1e-6, "sin at quarter period: {quarter}");
    }

    #[test]
    fn test_int_division_by_zero_is_zero() {
        let args = [Value::Int(7), Value::Int(0)];
        assert_eq!(IntOp::Divide.compute(&args), 0);
        assert_eq!(IntOp::Modulo.compute(&args), 0);
        assert_eq!(IntOp::Divide.compute(&[Value::Int(7), Value::Int(2)]), 3);
        assert_eq!(IntOp::Modulo.compute(&[Value::Int(-7), Value::Int(2)]), -1);
        assert_eq!(IntOp::FromFloat.compute(&[Value::Float(-2.7)]), -2);
    }

    #[test]
    fn test_loop01_handles_huge_negatives() {
        let looped = FloatOp::Loop01.compute(&floats(&[-3.0e9]));
        assert!((0.0..=1.0).contains(&looped), "loop01(-3e9) = {looped}");
        assert_eq!(FloatOp::Loop01.compute(&floats(&[-1.0e10])), 0.0);
        assert_eq!(FloatOp::Loop01.compute(&floats(&[-2.75])), 0.25);
        assert_eq!(FloatOp::Loop01.compute(&floats(&[-1.0e-10])), 0.0, "rounds up to a whole loop");
        assert_eq!(FloatOp::Loop01.compute(&floats(&[5.0e9])), 0.0);
    }

    #[test]
    fn test_int_powers_and_sums() {
        assert_eq!(IntOp::Add3.compute(&[Value::Int(1), Value::Int(2), Value::Int(3)]), 6);
        assert_eq!(IntOp::Absolute.compute(&[Value::Int(-9)]), 9);
        assert_eq!(IntOp::Absolute.compute(&[Value::Int(i32::MIN)]), i32::MIN, "abs wraps");
        assert_eq!(IntOp::Square.compute(&[Value::Int(-7)]), 49);
        assert_eq!(IntOp::Cube.compute(&[Value::Int(-3)]), -27);
        assert_eq!(IntOp::Square.compute(&[Value::Int(65_536)]), 0, "square wraps");
    }
}
