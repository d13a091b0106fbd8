//! # TEXEL CLI
//!
//! Renders procedural texture diagrams to PNG.
//!
//! ## Usage
//!
//! ```bash
//! # Render every output of a diagram
//! texel render clouds.toml --output out/clouds.png
//!
//! # Override size and an input
//! texel render clouds.toml --width 512 --height 512 --input Scale=4.0
//!
//! # Sweep a float input over 24 looping frames
//! texel render clouds.toml --frames 24 --animate Time --from 0 --to 1 --loop
//!
//! # List functions, sample noise
//! texel functions
//! texel sample perlin --x 0.37 --y 0.81 --frequency 4
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

mod error;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use texel_flow::function::{Dimensions, NoiseFamily, NoiseFunction};
use texel_flow::{Diagram, FunctionKind, FunctionLibrary, Value};
use texel_noise::{Metric, Tiling, Vec2, Vec3};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};
use crate::render::{input_value, parse_assignment, write_outputs, Animation};

/// TEXEL - procedural texture renderer
#[derive(Parser, Debug)]
#[command(name = "texel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a diagram document to PNG
    Render {
        /// Diagram TOML file
        diagram: PathBuf,

        /// Target PNG; output names are appended when there are several outputs
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Override the document width
        #[arg(long)]
        width: Option<u32>,

        /// Override the document height
        #[arg(long)]
        height: Option<u32>,

        /// Set an input, e.g. `Scale=2.0` or `Tint=[1, 0.5, 0]`
        #[arg(short, long = "input", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        inputs: Vec<(String, String)>,

        /// Render only this output
        #[arg(long)]
        output_index: Option<usize>,

        /// Number of animation frames
        #[arg(long, requires = "animate")]
        frames: Option<usize>,

        /// Float input swept across the frames
        #[arg(long, requires = "frames")]
        animate: Option<String>,

        /// Value of the first frame
        #[arg(long, default_value_t = 0.0)]
        from: f32,

        /// Value of the last frame
        #[arg(long, default_value_t = 1.0)]
        to: f32,

        /// Stop one step short of `--to` so the frames repeat seamlessly
        #[arg(long = "loop")]
        looping: bool,
    },

    /// List every function in the standard library
    Functions,

    /// Print a single noise sample
    Sample {
        /// Noise family
        #[arg(value_enum)]
        noise: NoiseArg,

        /// Point X
        #[arg(long, allow_hyphen_values = true)]
        x: f32,

        /// Point Y
        #[arg(long, allow_hyphen_values = true)]
        y: f32,

        /// Point Z; switches to 3D sampling
        #[arg(long, allow_hyphen_values = true)]
        z: Option<f32>,

        /// Base frequency (truncated to an integer when tiled)
        #[arg(long, default_value_t = 1.0)]
        frequency: f32,

        /// Number of octaves
        #[arg(long, default_value_t = 1)]
        octaves: i32,

        /// Frequency multiplier per octave (truncated to an integer when tiled)
        #[arg(long, default_value_t = 2.0)]
        lacunarity: f32,

        /// Amplitude multiplier per octave
        #[arg(long, default_value_t = 0.5)]
        persistence: f32,

        /// Wrap along these axes
        #[arg(long, value_enum)]
        tiling: Option<TilingArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NoiseArg {
    Perlin,
    Turbulence,
    Value,
    VoronoiSquared,
    VoronoiLinear,
    VoronoiManhattan,
    VoronoiChebyshev,
}

impl From<NoiseArg> for NoiseFamily {
    fn from(arg: NoiseArg) -> Self {
        match arg {
            NoiseArg::Perlin => Self::Perlin,
            NoiseArg::Turbulence => Self::Turbulence,
            NoiseArg::Value => Self::Value,
            NoiseArg::VoronoiSquared => Self::Voronoi(Metric::Squared),
            NoiseArg::VoronoiLinear => Self::Voronoi(Metric::Linear),
            NoiseArg::VoronoiManhattan => Self::Voronoi(Metric::Manhattan),
            NoiseArg::VoronoiChebyshev => Self::Voronoi(Metric::Chebyshev),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TilingArg {
    X,
    Xy,
    Xyz,
}

impl From<TilingArg> for Tiling {
    fn from(arg: TilingArg) -> Self {
        match arg {
            TilingArg::X => Self::X,
            TilingArg::Xy => Self::XY,
            TilingArg::Xyz => Self::XYZ,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> CliResult<()> {
    let library = FunctionLibrary::standard();
    match command {
        Commands::Render {
            diagram,
            output,
            width,
            height,
            inputs,
            output_index,
            frames,
            animate,
            from,
            to,
            looping,
        } => {
            let mut built = Diagram::load(&diagram, &library)?;
            if width.is_some() || height.is_some() {
                let w = width.unwrap_or(built.width() as u32);
                let h = height.unwrap_or(built.height() as u32);
                built.set_size(w, h)?;
            }
            for (name, raw) in &inputs {
                let value = input_value(&built, name, raw)?;
                built.set_input(name, value)?;
            }
            let base = output.unwrap_or_else(|| diagram.with_extension("png"));
            let animation = match (frames, animate) {
                (Some(frames), Some(input)) => Some(Animation {
                    input,
                    frames,
                    from,
                    to,
                    looping,
                }),
                _ => None,
            };
            render(&mut built, output_index, &base, animation.as_ref())
        }
        Commands::Functions => {
            for (id, kind) in library.iter() {
                println!("{id:<40} {:<40} {}", kind.menu_name(), kind.return_type());
            }
            Ok(())
        }
        Commands::Sample {
            noise,
            x,
            y,
            z,
            frequency,
            octaves,
            lacunarity,
            persistence,
            tiling,
        } => {
            let function = NoiseFunction {
                family: noise.into(),
                dimensions: if z.is_some() { Dimensions::Three } else { Dimensions::Two },
                tiling: tiling.map(Tiling::from),
            };
            let point = match z {
                Some(z) => Value::Vector3(Vec3::new(x, y, z)),
                None => Value::Vector2(Vec2::new(x, y)),
            };
            let mut args = vec![point.clone()];
            if function.tiling.is_some() {
                let offset = match point {
                    Value::Vector3(_) => Value::Vector3(Vec3::ZERO),
                    _ => Value::Vector2(Vec2::ZERO),
                };
                args.extend([
                    offset,
                    Value::Int(frequency as i32),
                    Value::Int(octaves),
                    Value::Int(lacunarity as i32),
                    Value::Float(persistence),
                ]);
            } else {
                args.extend([
                    Value::Float(frequency),
                    Value::Int(octaves),
                    Value::Float(lacunarity),
                    Value::Float(persistence),
                ]);
            }
            let kind = FunctionKind::Noise(function);
            match kind.compute(&args, &texel_flow::Pixel::default()) {
                Value::Float(v) => println!("{} = {v}", kind.id()),
                Value::Vector3(v) => println!("{} = ({}, {}, {})", kind.id(), v.x, v.y, v.z),
                other => println!("{} = {other:?}", kind.id()),
            }
            Ok(())
        }
    }
}

fn render(
    diagram: &mut Diagram,
    output_index: Option<usize>,
    base: &std::path::Path,
    animation: Option<&Animation>,
) -> CliResult<()> {
    let Some(animation) = animation else {
        write_outputs(diagram, output_index, base, None)?;
        return Ok(());
    };
    if animation.frames == 0 {
        return Err(CliError::Usage("--frames must be at least 1".to_string()));
    }
    for frame in 0..animation.frames {
        let value = animation.value(frame);
        diagram.set_input(&animation.input, Value::Float(value))?;
        tracing::debug!("Frame {} of {}: {} = {}", frame + 1, animation.frames, animation.input, value);
        write_outputs(diagram, output_index, base, Some(frame))?;
    }
    tracing::info!("Rendered {} frames", animation.frames);
    Ok(())
}
