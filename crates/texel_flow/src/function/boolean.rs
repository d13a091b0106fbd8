//! Logic, comparisons and branch selection.

use super::{bool_arg, color_arg, float_arg, int_arg, vector3_arg, Property, Signature};
use crate::value::{Value, ValueType};

const AB: &[Property] = &[
    Property::new("a", "A", ValueType::Bool),
    Property::new("b", "B", ValueType::Bool),
];
const NOT: &[Property] = &[Property::new("bool", "Bool", ValueType::Bool)];

const FLOAT_AB: &[Property] = &[
    Property::new("a", "A", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
];
const FLOAT_ABC: &[Property] = &[
    Property::new("a", "A", ValueType::Float),
    Property::new("b", "B", ValueType::Float),
    Property::new("c", "C", ValueType::Float),
];
const INT_AB: &[Property] = &[
    Property::new("a", "A", ValueType::Int),
    Property::new("b", "B", ValueType::Int),
];
const INT_ABC: &[Property] = &[
    Property::new("a", "A", ValueType::Int),
    Property::new("b", "B", ValueType::Int),
    Property::new("c", "C", ValueType::Int),
];

macro_rules! choose_properties {
    ($name:ident, $ty:expr) => {
        const $name: &[Property] = &[
            Property::new("pick_a", "Pick A?", ValueType::Bool),
            Property::new("a", "A", $ty),
            Property::new("b", "B", $ty),
        ];
    };
}

choose_properties!(CHOOSE_BOOL, ValueType::Bool);
choose_properties!(CHOOSE_COLOR, ValueType::Color);
choose_properties!(CHOOSE_FLOAT, ValueType::Float);
choose_properties!(CHOOSE_INT, ValueType::Int);
choose_properties!(CHOOSE_VECTOR3, ValueType::Vector3);

/// Ordering test applied to two numbers, or a range test on three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `a < b`
    Less,
    /// `a <= b`
    LessOrEqual,
    /// `a == b`
    Equal,
    /// `a >= b`
    GreaterOrEqual,
    /// `a > b`
    Greater,
    /// `a <= b <= c`
    BetweenInclusive,
}

impl Comparison {
    /// Every comparison.
    pub const ALL: [Self; 6] = [
        Self::Less,
        Self::LessOrEqual,
        Self::Equal,
        Self::GreaterOrEqual,
        Self::Greater,
        Self::BetweenInclusive,
    ];

    fn test<T: PartialOrd>(self, a: T, b: T, c: T) -> bool {
        match self {
            Self::Less => a < b,
            Self::LessOrEqual => a <= b,
            Self::Equal => a == b,
            Self::GreaterOrEqual => a >= b,
            Self::Greater => a > b,
            Self::BetweenInclusive => a <= b && b <= c,
        }
    }
}

/// Boolean functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// `a && b`
    And,
    /// `a || b`
    Or,
    /// `!v`
    Not,
    /// `a == b`
    Equal,
    /// `a != b`
    NotEqual,
    /// Picks `a` when the condition holds, `b` otherwise.
    ///
    /// Available for bool, color, float, int and vector3.
    Choose(ValueType),
    /// Compares floats.
    Float(Comparison),
    /// Compares integers.
    Int(Comparison),
}

/// Types [`BoolOp::Choose`] is offered for.
pub const CHOICE_TYPES: [ValueType; 5] = [
    ValueType::Bool,
    ValueType::Color,
    ValueType::Float,
    ValueType::Int,
    ValueType::Vector3,
];

impl BoolOp {
    /// Every boolean function.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut ops = vec![Self::And, Self::Or, Self::Not, Self::Equal, Self::NotEqual];
        ops.extend(CHOICE_TYPES.into_iter().map(Self::Choose));
        ops.extend(Comparison::ALL.into_iter().map(Self::Float));
        ops.extend(Comparison::ALL.into_iter().map(Self::Int));
        ops
    }

    pub(crate) const fn signature(self) -> Signature {
        let (key, name, menu, properties, returns) = match self {
            Self::And => ("and", "And", "Booleans/And", AB, ValueType::Bool),
            Self::Or => ("or", "Or", "Booleans/Or", AB, ValueType::Bool),
            Self::Not => ("not", "Not", "Booleans/Not", NOT, ValueType::Bool),
            Self::Equal => ("equal", "==", "Booleans/Bool ==", AB, ValueType::Bool),
            Self::NotEqual => ("not_equal", "!=", "Booleans/Bool !=", AB, ValueType::Bool),
            Self::Choose(ty) => {
                let (key, menu, properties) = match ty {
                    ValueType::Color => ("choose_color", "Booleans/Choose/Color", CHOOSE_COLOR),
                    ValueType::Float => ("choose_float", "Booleans/Choose/Float", CHOOSE_FLOAT),
                    ValueType::Int => ("choose_int", "Booleans/Choose/Int", CHOOSE_INT),
                    ValueType::Vector3 => ("choose_vector3", "Booleans/Choose/Vector3", CHOOSE_VECTOR3),
                    _ => ("choose_bool", "Booleans/Choose/Bool", CHOOSE_BOOL),
                };
                let returns = match ty {
                    ValueType::Color | ValueType::Float | ValueType::Int | ValueType::Vector3 => ty,
                    _ => ValueType::Bool,
                };
                (key, "Choose", menu, properties, returns)
            }
            Self::Float(test) => {
                let (key, name, menu, properties) = match test {
                    Comparison::Less => ("float_less", "<", "Booleans/Float <", FLOAT_AB),
                    Comparison::LessOrEqual => ("float_less_or_equal", "\u{2264}", "Booleans/Float \u{2264}", FLOAT_AB),
                    Comparison::Equal => ("float_equal", "==", "Booleans/Float ==", FLOAT_AB),
                    Comparison::GreaterOrEqual => {
                        ("float_greater_or_equal", "\u{2265}", "Booleans/Float \u{2265}", FLOAT_AB)
                    }
                    Comparison::Greater => ("float_greater", ">", "Booleans/Float >", FLOAT_AB),
                    Comparison::BetweenInclusive => (
                        "float_between_inclusive",
                        "\u{2264} \u{2264}",
                        "Booleans/Float \u{2264} \u{2264}",
                        FLOAT_ABC,
                    ),
                };
                (key, name, menu, properties, ValueType::Bool)
            }
            Self::Int(test) => {
                let (key, name, menu, properties) = match test {
                    Comparison::Less => ("int_less", "<", "Booleans/Int <", INT_AB),
                    Comparison::LessOrEqual => ("int_less_or_equal", "\u{2264}", "Booleans/Int \u{2264}", INT_AB),
                    Comparison::Equal => ("int_equal", "==", "Booleans/Int ==", INT_AB),
                    Comparison::GreaterOrEqual => {
                        ("int_greater_or_equal", "\u{2265}", "Booleans/Int \u{2265}", INT_AB)
                    }
                    Comparison::Greater => ("int_greater", ">", "Booleans/Int >", INT_AB),
                    Comparison::BetweenInclusive => (
                        "int_between_inclusive",
                        "\u{2264} \u{2264}",
                        "Booleans/Int \u{2264} \u{2264}",
                        INT_ABC,
                    ),
                };
                (key, name, menu, properties, ValueType::Bool)
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
        match self {
            Self::And => Value::Bool(bool_arg(args, 0) && bool_arg(args, 1)),
            Self::Or => Value::Bool(bool_arg(args, 0) || bool_arg(args, 1)),
            Self::Not => Value::Bool(!bool_arg(args, 0)),
            Self::Equal => Value::Bool(bool_arg(args, 0) == bool_arg(args, 1)),
            Self::NotEqual => Value::Bool(bool_arg(args, 0) != bool_arg(args, 1)),
            Self::Choose(ty) => {
                let index = if bool_arg(args, 0) { 1 } else { 2 };
                match ty {
                    ValueType::Color => Value::Color(color_arg(args, index)),
                    ValueType::Float => Value::Float(float_arg(args, index)),
                    ValueType::Int => Value::Int(int_arg(args, index)),
                    ValueType::Vector3 => Value::Vector3(vector3_arg(args, index)),
                    _ => Value::Bool(bool_arg(args, index)),
                }
            }
            Self::Float(test) => {
                Value::Bool(test.test(float_arg(args, 0), float_arg(args, 1), float_arg(args, 2)))
            }
            Self::Int(test) => Value::Bool(test.test(int_arg(args, 0), int_arg(args, 1), int_arg(args, 2))),
        }
    }
}
