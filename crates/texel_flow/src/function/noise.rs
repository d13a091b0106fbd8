//! Noise samplers exposed as diagram functions.
//!
//! Every sampler takes the fractal argument list
//! `(point, [offset], frequency, octaves, lacunarity, persistence)`, where
//! `offset` is present only on tiled variants and tiled variants take an
//! integer frequency and lacunarity.

use texel_noise::{perlin, value, voronoi, Metric, Octaves, Tiling};

use super::{float_arg, int_arg, vector2_arg, vector3_arg, Property, PropertyDefault, Signature};
use crate::value::{Value, ValueType};

/// Sampler family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseFamily {
    /// Fractal gradient noise remapped to [0, 1].
    Perlin,
    /// Absolute gradient noise in [0, 1].
    Turbulence,
    /// Value noise in [0, 1].
    Value,
    /// Cellular noise returning `(F1, F2, cell id)`.
    Voronoi(Metric),
}

impl NoiseFamily {
    /// Every family.
    pub const ALL: [Self; 7] = [
        Self::Perlin,
        Self::Turbulence,
        Self::Value,
        Self::Voronoi(Metric::Squared),
        Self::Voronoi(Metric::Linear),
        Self::Voronoi(Metric::Manhattan),
        Self::Voronoi(Metric::Chebyshev),
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Perlin => "perlin",
            Self::Turbulence => "turbulence",
            Self::Value => "value",
            Self::Voronoi(Metric::Squared) => "voronoi_squared",
            Self::Voronoi(Metric::Linear) => "voronoi_linear",
            Self::Voronoi(Metric::Manhattan) => "voronoi_manhattan",
            Self::Voronoi(Metric::Chebyshev) => "voronoi_chebyshev",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Perlin => "Perlin",
            Self::Turbulence => "Turbulence",
            Self::Value => "Value",
            Self::Voronoi(Metric::Squared) => "Voronoi Squared",
            Self::Voronoi(Metric::Linear) => "Voronoi Linear",
            Self::Voronoi(Metric::Manhattan) => "Voronoi Manhattan",
            Self::Voronoi(Metric::Chebyshev) => "Voronoi Chebyshev",
        }
    }
}

/// Sampling dimensionality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimensions {
    /// Samples a Vector2 point.
    Two,
    /// Samples a Vector3 point.
    Three,
}

/// One noise function: family, dimensionality and optional tiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoiseFunction {
    /// Sampler family.
    pub family: NoiseFamily,
    /// 2D or 3D.
    pub dimensions: Dimensions,
    /// Wrapped axes; `None` for regular sampling.
    pub tiling: Option<Tiling>,
}

const TILINGS_2D: [Option<Tiling>; 3] = [None, Some(Tiling::X), Some(Tiling::XY)];
const TILINGS_3D: [Option<Tiling>; 4] = [None, Some(Tiling::X), Some(Tiling::XY), Some(Tiling::XYZ)];

const FREQUENCY: Property = Property::new("frequency", "Frequency", ValueType::Float).with_default(PropertyDefault::Float(1.0));
const OCTAVES: Property = Property::new("octaves", "Octaves", ValueType::Int).with_default(PropertyDefault::Int(1));
const LACUNARITY: Property = Property::new("lacunarity", "Lacunarity", ValueType::Float).with_default(PropertyDefault::Float(2.0));
const PERSISTENCE: Property = Property::new("persistence", "Persistence", ValueType::Float).with_default(PropertyDefault::Float(0.5));
const TILED_FREQUENCY: Property = Property::new("frequency", "Frequency", ValueType::Int).with_default(PropertyDefault::Int(1));
const TILED_LACUNARITY: Property = Property::new("lacunarity", "Lacunarity", ValueType::Int).with_default(PropertyDefault::Int(2));

const REGULAR_2D: &[Property] = &[
    Property::new("point", "Point", ValueType::Vector2),
    FREQUENCY,
    OCTAVES,
    LACUNARITY,
    PERSISTENCE,
];
const REGULAR_3D: &[Property] = &[
    Property::new("point", "Point", ValueType::Vector3),
    FREQUENCY,
    OCTAVES,
    LACUNARITY,
    PERSISTENCE,
];
const TILED_2D: &[Property] = &[
    Property::new("point", "Point", ValueType::Vector2),
    Property::new("offset", "Offset", ValueType::Vector2),
    TILED_FREQUENCY,
    OCTAVES,
    TILED_LACUNARITY,
    PERSISTENCE,
];
const TILED_3D: &[Property] = &[
    Property::new("point", "Point", ValueType::Vector3),
    Property::new("offset", "Offset", ValueType::Vector3),
    TILED_FREQUENCY,
    OCTAVES,
    TILED_LACUNARITY,
    PERSISTENCE,
];

const fn tiling_key(tiling: Tiling) -> &'static str {
    match tiling {
        Tiling::X => "x",
        Tiling::XY => "xy",
        Tiling::XYZ => "xyz",
    }
}

const fn tiling_label(tiling: Tiling) -> &'static str {
    match tiling {
        Tiling::X => "X",
        Tiling::XY => "XY",
        Tiling::XYZ => "XYZ",
    }
}

impl NoiseFunction {
    /// Every family in 2D (regular, tiled X, tiled XY) and 3D (also tiled XYZ).
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut functions = Vec::new();
        for dimensions in [Dimensions::Two, Dimensions::Three] {
            let tilings: &[Option<Tiling>] = match dimensions {
                Dimensions::Two => &TILINGS_2D,
                Dimensions::Three => &TILINGS_3D,
            };
            for family in NoiseFamily::ALL {
                functions.extend(tilings.iter().map(|&tiling| Self {
                    family,
                    dimensions,
                    tiling,
                }));
            }
        }
        functions
    }

    /// Id suffix, e.g. `perlin_tiled_xy`.
    #[must_use]
    pub fn key(&self) -> String {
        match self.tiling {
            None => self.family.key().to_string(),
            Some(tiling) => format!("{}_tiled_{}", self.family.key(), tiling_key(tiling)),
        }
    }

    /// Display name, e.g. `Perlin tXY`.
    #[must_use]
    pub fn name(&self) -> String {
        match self.tiling {
            None => self.family.label().to_string(),
            Some(tiling) => format!("{} t{}", self.family.label(), tiling_label(tiling)),
        }
    }

    /// Menu path, e.g. `Noise 2D/Perlin/Tiled X`.
    #[must_use]
    pub fn menu_name(&self) -> String {
        let group = match self.dimensions {
            Dimensions::Two => "Noise 2D",
            Dimensions::Three => "Noise 3D",
        };
        match self.tiling {
            None => format!("{group}/{}/Regular", self.family.label()),
            Some(tiling) => format!("{group}/{}/Tiled {}", self.family.label(), tiling_label(tiling)),
        }
    }

    /// Declared arguments.
    #[must_use]
    pub const fn properties(&self) -> &'static [Property] {
        match (self.dimensions, self.tiling.is_some()) {
            (Dimensions::Two, false) => REGULAR_2D,
            (Dimensions::Three, false) => REGULAR_3D,
            (Dimensions::Two, true) => TILED_2D,
            (Dimensions::Three, true) => TILED_3D,
        }
    }

    /// Float for Perlin, Turbulence and Value; Vector3 for Voronoi.
    #[must_use]
    pub const fn return_type(&self) -> ValueType {
        match self.family {
            NoiseFamily::Voronoi(_) => ValueType::Vector3,
            _ => ValueType::Float,
        }
    }

    pub(crate) fn compute(&self, args: &[Value]) -> Value {
        match self.tiling {
            None => self.compute_regular(args),
            Some(tiling) => self.compute_tiled(args, tiling),
        }
    }

    fn compute_regular(&self, args: &[Value]) -> Value {
        let frequency = float_arg(args, 1);
        let octaves = Octaves::new(int_arg(args, 2), float_arg(args, 3), float_arg(args, 4));
        match self.dimensions {
            Dimensions::Two => {
                let point = vector2_arg(args, 0);
                match self.family {
                    NoiseFamily::Perlin => Value::Float(perlin::fractal_2d(point, frequency, octaves)),
                    NoiseFamily::Turbulence => Value::Float(perlin::turbulence_2d(point, frequency, octaves)),
                    NoiseFamily::Value => Value::Float(value::fractal_2d(point, frequency, octaves)),
                    NoiseFamily::Voronoi(metric) => {
                        Value::Vector3(voronoi::fractal_2d(point, frequency, octaves, metric))
                    }
                }
            }
            Dimensions::Three => {
                let point = vector3_arg(args, 0);
                match self.family {
                    NoiseFamily::Perlin => Value::Float(perlin::fractal_3d(point, frequency, octaves)),
                    NoiseFamily::Turbulence => Value::Float(perlin::turbulence_3d(point, frequency, octaves)),
                    NoiseFamily::Value => Value::Float(value::fractal_3d(point, frequency, octaves)),
                    NoiseFamily::Voronoi(metric) => {
                        Value::Vector3(voronoi::fractal_3d(point, frequency, octaves, metric))
                    }
                }
            }
        }
    }

    fn compute_tiled(&self, args: &[Value], tiling: Tiling) -> Value {
        let frequency = int_arg(args, 2);
        let octaves = Octaves::new(int_arg(args, 3), int_arg(args, 4), float_arg(args, 5));
        match self.dimensions {
            Dimensions::Two => {
                let (point, offset) = (vector2_arg(args, 0), vector2_arg(args, 1));
                match self.family {
                    NoiseFamily::Perlin => {
                        Value::Float(perlin::fractal_2d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Turbulence => {
                        Value::Float(perlin::turbulence_2d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Value => {
                        Value::Float(value::fractal_2d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Voronoi(metric) => Value::Vector3(voronoi::fractal_2d_tiled(
                        point, offset, tiling, frequency, octaves, metric,
                    )),
                }
            }
            Dimensions::Three => {
                let (point, offset) = (vector3_arg(args, 0), vector3_arg(args, 1));
                match self.family {
                    NoiseFamily::Perlin => {
                        Value::Float(perlin::fractal_3d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Turbulence => {
                        Value::Float(perlin::turbulence_3d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Value => {
                        Value::Float(value::fractal_3d_tiled(point, offset, tiling, frequency, octaves))
                    }
                    NoiseFamily::Voronoi(metric) => Value::Vector3(voronoi::fractal_3d_tiled(
                        point, offset, tiling, frequency, octaves, metric,
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use texel_shared::{Vec2, Vec3};

    use super::*;

    fn defaults(function: &NoiseFunction) -> Vec<Value> {
        function.properties().iter().map(Property::default_value).collect()
    }

    #[test]
    fn test_function_count_and_keys() {
        let all = NoiseFunction::all();
        assert_eq!(all.len(), 49, "7 families x (3 tilings in 2D + 4 in 3D)");
        let tiled = NoiseFunction {
            family: NoiseFamily::Voronoi(Metric::Linear),
            dimensions: Dimensions::Three,
            tiling: Some(Tiling::XYZ),
        };
        assert_eq!(tiled.key(), "voronoi_linear_tiled_xyz");
        assert_eq!(tiled.name(), "Voronoi Linear tXYZ");
        assert_eq!(tiled.menu_name(), "Noise 3D/Voronoi Linear/Tiled XYZ");
        assert_eq!(tiled.return_type(), ValueType::Vector3);
    }

    #[test]
    fn test_regular_wrapper_matches_library() {
        let function = NoiseFunction {
            family: NoiseFamily::Perlin,
            dimensions: Dimensions::Two,
            tiling: None,
        };
        let mut args = defaults(&function);
        let point = Vec2::new(0.37, 0.81);
        args[0] = Value::Vector2(point);
        args[1] = Value::Float(4.0);
        let expected = perlin::fractal_2d(point, 4.0, Octaves::new(1, 2.0, 0.5));
        assert_eq!(function.compute(&args), Value::Float(expected));
    }

    #[test]
    fn test_tiled_defaults() {
        let function = NoiseFunction {
            family: NoiseFamily::Value,
            dimensions: Dimensions::Three,
            tiling: Some(Tiling::XY),
        };
        let args = defaults(&function);
        assert_eq!(args[2], Value::Int(1), "tiled frequency defaults to 1");
        assert_eq!(args[4], Value::Int(2), "tiled lacunarity defaults to 2");
        let point = Vec3::new(0.25, 0.5, 0.75);
        let mut args = args;
        args[0] = Value::Vector3(point);
        let expected = value::fractal_3d_tiled(point, Vec3::ZERO, Tiling::XY, 1, Octaves::new(1, 2, 0.5));
        assert_eq!(function.compute(&args), Value::Float(expected));
    }

    #[test]
    fn test_perlin_node_output_is_unit_range() {
        let function = NoiseFunction {
            family: NoiseFamily::Perlin,
            dimensions: Dimensions::Three,
            tiling: None,
        };
        let mut args = defaults(&function);
        args[1] = Value::Float(3.0);
        args[2] = Value::Int(4);
        for i in 0..400 {
            let t = i as f32 * 0.0173;
            args[0] = Value::Vector3(Vec3::new(t, t * 1.7 - 2.0, 5.0 - t * 0.3));
            let v = function.compute(&args).as_float();
            assert!((0.0..=1.0).contains(&v), "perlin node sample {v} outside [0, 1]");
        }
    }
}
