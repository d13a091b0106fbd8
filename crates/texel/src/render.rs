//! # PNG Rendering
//!
//! Turns a built diagram into PNG files: one per output, or one per output
//! and frame when an input is animated.
//!
//! Row 0 of a diagram buffer has the smallest `v`. Images are written with
//! that row at the bottom, so `v` points up as in texture space.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use texel_flow::{Color, Diagram, OutputKind, Value};

use crate::error::{CliError, CliResult};

/// Sweeps a float input over a number of frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Name of the animated float input.
    pub input: String,
    /// Number of frames to write.
    pub frames: usize,
    /// Input value of the first frame.
    pub from: f32,
    /// Input value of the last frame, or of the frame after it when looping.
    pub to: f32,
    /// Leave out the end value so the sequence repeats seamlessly.
    pub looping: bool,
}

impl Animation {
    /// Input value for `frame`.
    #[must_use]
    pub fn value(&self, frame: usize) -> f32 {
        let t = if self.looping {
            frame as f32 / self.frames as f32
        } else if self.frames > 1 {
            frame as f32 / (self.frames - 1) as f32
        } else {
            0.0
        };
        self.from + (self.to - self.from) * t
    }
}

/// Splits `name=value` at the first `=`.
///
/// # Errors
///
/// Returns a message when there is no `=` or the name is empty.
pub fn parse_assignment(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("expected name=value, got '{text}'")),
    }
}

/// Reads `raw` as a TOML literal of the named input's type.
///
/// # Errors
///
/// Fails for unknown inputs and for text that is not a valid literal of the
/// input's type.
pub fn input_value(diagram: &Diagram, name: &str, raw: &str) -> CliResult<Value> {
    let ty = diagram.input_type(name).ok_or_else(|| CliError::Input {
        name: name.to_string(),
        reason: "no such input".to_string(),
    })?;
    let invalid = |reason: String| CliError::Input {
        name: name.to_string(),
        reason,
    };
    let table: toml::Table = toml::from_str(&format!("value = {raw}")).map_err(|e| invalid(e.to_string()))?;
    table
        .get("value")
        .and_then(|literal| Value::from_literal(literal, ty))
        .ok_or_else(|| invalid(format!("'{raw}' is not a {ty}")))
}

/// File for one output and frame: `<dir>/<stem>[_<output>][_<frame>].png`.
#[must_use]
pub fn output_path(base: &Path, output: Option<&str>, frame: Option<usize>) -> PathBuf {
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("texture");
    let mut name = stem.to_string();
    if let Some(output) = output {
        name.push('_');
        name.extend(output.chars().map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' }));
    }
    if let Some(frame) = frame {
        name.push_str(&format!("_{frame:04}"));
    }
    name.push_str(".png");
    base.with_file_name(name)
}

/// Encodes a rendered buffer as RGBA8 according to `kind`, `v` pointing up.
#[must_use]
pub fn to_image(pixels: &[Color], width: usize, height: usize, kind: OutputKind) -> RgbaImage {
    RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let row = height - 1 - y as usize;
        let color = pixels.get(row * width + x as usize).copied().unwrap_or(Color::CLEAR);
        Rgba(kind.to_rgba8(color))
    })
}

/// Renders the selected outputs and writes one PNG each.
///
/// With a single output the file is `base` itself (plus a frame suffix);
/// otherwise output names are appended to the stem.
///
/// # Errors
///
/// Propagates rendering and encoding failures.
pub fn write_outputs(
    diagram: &Diagram,
    output_index: Option<usize>,
    base: &Path,
    frame: Option<usize>,
) -> CliResult<Vec<PathBuf>> {
    let outputs = diagram.outputs();
    if outputs.is_empty() {
        return Err(CliError::Usage(format!("diagram '{}' has no outputs", diagram.name())));
    }

    let rendered: Vec<(usize, Vec<Color>)> = match output_index {
        Some(index) => {
            let index = if index < outputs.len() { index } else { 0 };
            let mut pixels = vec![Color::CLEAR; diagram.pixel_count()];
            diagram.fill_output(&mut pixels, index)?;
            diagram.post_process_output(&mut pixels, index, diagram.normal_format())?;
            vec![(index, pixels)]
        }
        None => diagram.render()?.into_iter().enumerate().collect(),
    };

    let single = rendered.len() == 1;
    let mut written = Vec::with_capacity(rendered.len());
    for (index, pixels) in rendered {
        let output = &outputs[index];
        let path = if single {
            output_path(base, None, frame)
        } else {
            output_path(base, Some(&output.name), frame)
        };
        let image = to_image(&pixels, diagram.width(), diagram.height(), output.kind);
        image.save(&path).map_err(|source| CliError::Image {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("Wrote {} ({})", path.display(), output.name);
        written.push(path);
    }
    Ok(written)
}
