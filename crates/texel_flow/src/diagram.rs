//! # Diagrams
//!
//! A [`Diagram`] is a validated, topologically ordered node graph ready to
//! render. All graph errors (unknown functions, bad references, type
//! mismatches, dependency cycles) are reported by [`Diagram::from_config`];
//! rendering cannot fail except for mis-sized buffers.
//!
//! ## Evaluation
//!
//! ```text
//! for each row in [row_index, row_end):
//!     for each x:
//!         uv = ((x + 0.5) / width, (row + 0.5) / height)
//!         for node in order:  values[node] = compute(args(node), pixel)
//!         buffer[output][row * width + x] = values[output.node]
//! ```
//!
//! Only nodes reachable from an output are evaluated; each is computed once
//! per pixel.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::Path;

use texel_shared::{Color, Vec2};

use crate::config::{ArgumentConfig, DiagramConfig, OutputConfig};
use crate::error::{FlowError, FlowResult};
use crate::function::{FunctionKind, Pixel};
use crate::library::FunctionLibrary;
use crate::output::{encode_normals, generate_normals, Filtering, NormalFormat, OutputKind};
use crate::value::{Value, ValueType};

/// Largest accepted width or height.
pub const MAX_SIZE: u32 = 4096;

/// Resolved node argument.
#[derive(Clone, Debug, PartialEq)]
enum Argument {
    /// Result of the node at this index.
    Node(usize),
    /// Constant.
    Literal(Value),
}

#[derive(Clone, Debug)]
struct Node {
    id: String,
    function: FunctionKind,
    args: Vec<Argument>,
}

impl Node {
    fn dependencies(&self) -> impl Iterator<Item = usize> + '_ {
        self.args.iter().filter_map(|arg| match arg {
            Argument::Node(index) => Some(*index),
            Argument::Literal(_) => None,
        })
    }
}

/// A rendered output of a diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramOutput {
    /// Output name.
    pub name: String,
    /// Buffer interpretation.
    pub kind: OutputKind,
    /// Normal map height sampling.
    pub filtering: Filtering,
    /// Normal map strength.
    pub strength: f32,
    node: usize,
}

/// A compiled diagram.
///
/// Rendering borrows the diagram immutably. Clone it to change inputs
/// independently on several threads.
#[derive(Clone, Debug)]
pub struct Diagram {
    name: String,
    width: usize,
    height: usize,
    normal_format: NormalFormat,
    nodes: Vec<Node>,
    outputs: Vec<DiagramOutput>,
    inputs: BTreeMap<String, usize>,
    /// Every node reachable from any output, dependencies first.
    order: Vec<usize>,
    /// The part of `order` each output needs.
    output_orders: Vec<Vec<usize>>,
}

impl Diagram {
    /// Parses and builds a diagram from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Parse`] for malformed documents and any build
    /// error from [`Diagram::from_config`].
    pub fn from_toml_str(text: &str, library: &FunctionLibrary) -> FlowResult<Self> {
        let config: DiagramConfig = toml::from_str(text)?;
        Self::from_config(&config, library)
    }

    /// Reads and builds a diagram file.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Io`] when the file cannot be read, otherwise as
    /// [`Diagram::from_toml_str`].
    pub fn load(path: impl AsRef<Path>, library: &FunctionLibrary) -> FlowResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FlowError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text, library)
    }

    /// Validates a document and compiles it.
    ///
    /// # Errors
    ///
    /// Fails on invalid sizes, duplicate node ids, unknown functions,
    /// unknown or mistyped arguments, unknown node references, outputs that
    /// do not point at output nodes, and dependency cycles among nodes
    /// reachable from an output.
    pub fn from_config(config: &DiagramConfig, library: &FunctionLibrary) -> FlowResult<Self> {
        let section = &config.diagram;
        let (width, height) = checked_size(section.width, section.height)?;

        let mut index_of = HashMap::with_capacity(config.nodes.len());
        let mut functions = Vec::with_capacity(config.nodes.len());
        for (index, node) in config.nodes.iter().enumerate() {
            if index_of.insert(node.id.as_str(), index).is_some() {
                return Err(FlowError::DuplicateNode(node.id.clone()));
            }
            let function = library.get(&node.function).ok_or_else(|| FlowError::UnknownFunction {
                node: node.id.clone(),
                function: node.function.clone(),
            })?;
            functions.push(*function);
        }

        let mut nodes = Vec::with_capacity(config.nodes.len());
        for (node, &function) in config.nodes.iter().zip(&functions) {
            let args = resolve_arguments(node.id.as_str(), &node.function, function, &node.args, &index_of, &functions)?;
            nodes.push(Node {
                id: node.id.clone(),
                function,
                args,
            });
        }

        let inputs = collect_inputs(&nodes)?;

        let output_configs: Vec<OutputConfig> = if config.outputs.is_empty() {
            nodes
                .iter()
                .filter(|node| node.function.is_output())
                .map(|node| OutputConfig {
                    name: node.id.clone(),
                    node: node.id.clone(),
                    kind: OutputKind::default(),
                    filtering: Filtering::default(),
                    strength: 1.0,
                })
                .collect()
        } else {
            config.outputs.clone()
        };

        let mut outputs = Vec::with_capacity(output_configs.len());
        for output in output_configs {
            let node = *index_of.get(output.node.as_str()).ok_or_else(|| FlowError::UnknownNode {
                owner: format!("output {}", output.name),
                reference: output.node.clone(),
            })?;
            if !nodes[node].function.is_output() {
                return Err(FlowError::NotAnOutput {
                    output: output.name,
                    node: output.node,
                });
            }
            outputs.push(DiagramOutput {
                name: output.name,
                kind: output.kind,
                filtering: output.filtering,
                strength: output.strength,
                node,
            });
        }

        let roots: Vec<usize> = outputs.iter().map(|output| output.node).collect();
        let reachable = reachable_from(&nodes, &roots);
        let order = topological_order(&nodes, &reachable)?;
        let output_orders = outputs
            .iter()
            .map(|output| {
                let needed = reachable_from(&nodes, &[output.node]);
                order.iter().copied().filter(|index| needed.contains(index)).collect()
            })
            .collect();

        tracing::info!(
            "Compiled diagram '{}': {} nodes, {} outputs, {} unreachable nodes pruned",
            section.name,
            nodes.len(),
            outputs.len(),
            nodes.len() - order.len()
        );

        Ok(Self {
            name: section.name.clone(),
            width,
            height,
            normal_format: section.normal_format,
            nodes,
            outputs,
            inputs,
            order,
            output_orders,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// `width * height`, the required buffer length.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Normal map encoding declared by the document.
    #[must_use]
    pub const fn normal_format(&self) -> NormalFormat {
        self.normal_format
    }

    /// Outputs in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[DiagramOutput] {
        &self.outputs
    }

    /// Number of nodes evaluated per pixel when rendering every output.
    #[must_use]
    pub fn evaluated_node_count(&self) -> usize {
        self.order.len()
    }

    /// Changes the render size.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidSize`] unless both sides are in `1..=4096`.
    pub fn set_size(&mut self, width: u32, height: u32) -> FlowResult<()> {
        let (width, height) = checked_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Names of the diagram's inputs.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Declared type of an input.
    #[must_use]
    pub fn input_type(&self, name: &str) -> Option<ValueType> {
        self.inputs.get(name).map(|&index| self.nodes[index].function.return_type())
    }

    /// Current value of an input.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&Value> {
        let index = *self.inputs.get(name)?;
        match self.nodes[index].args.first() {
            Some(Argument::Literal(value)) => Some(value),
            _ => None,
        }
    }

    /// Overwrites an input for subsequent renders.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnknownInput`] for unknown names and
    /// [`FlowError::InputTypeMismatch`] when `value` has the wrong type.
    pub fn set_input(&mut self, name: &str, value: Value) -> FlowResult<()> {
        let index = *self
            .inputs
            .get(name)
            .ok_or_else(|| FlowError::UnknownInput(name.to_string()))?;
        let node = &mut self.nodes[index];
        let expected = node.function.return_type();
        if value.value_type() != expected {
            return Err(FlowError::InputTypeMismatch {
                name: name.to_string(),
                expected,
                found: value.value_type(),
            });
        }
        tracing::debug!("Input '{}' set to {:?}", name, value);
        match node.args.first_mut() {
            Some(slot) => *slot = Argument::Literal(value),
            None => node.args.push(Argument::Literal(value)),
        }
        Ok(())
    }

    /// Renders rows `[row_index, min(height, row_index + row_count))` of every
    /// output into `buffers`, one buffer per output.
    ///
    /// Returns the next row to render, or `height` when the diagram has no
    /// outputs.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::MissingBuffers`] or [`FlowError::BufferSize`]
    /// when the buffers do not match the outputs and size.
    pub fn fill_rows<B: AsMut<[Color]>>(
        &self,
        buffers: &mut [B],
        row_index: usize,
        row_count: usize,
    ) -> FlowResult<usize> {
        if self.outputs.is_empty() {
            return Ok(self.height);
        }
        if buffers.len() < self.outputs.len() {
            return Err(FlowError::MissingBuffers {
                expected: self.outputs.len(),
                found: buffers.len(),
            });
        }
        for (index, buffer) in buffers.iter_mut().enumerate().take(self.outputs.len()) {
            self.check_buffer(index, buffer.as_mut())?;
        }

        let row_end = row_index.saturating_add(row_count).min(self.height);
        let mut values = vec![Value::Float(0.0); self.nodes.len()];
        let mut args = Vec::new();
        for row in row_index..row_end {
            for x in 0..self.width {
                let pixel = self.pixel(x, row);
                self.evaluate(&self.order, &pixel, &mut values, &mut args);
                let offset = row * self.width + x;
                for (output, buffer) in self.outputs.iter().zip(buffers.iter_mut()) {
                    buffer.as_mut()[offset] = values[output.node].as_color();
                }
            }
        }
        tracing::debug!("Rendered rows {}..{} of '{}'", row_index.min(row_end), row_end, self.name);
        Ok(row_end)
    }

    /// Renders every row of every output.
    ///
    /// # Errors
    ///
    /// As [`Diagram::fill_rows`].
    pub fn fill<B: AsMut<[Color]>>(&self, buffers: &mut [B]) -> FlowResult<()> {
        self.fill_rows(buffers, 0, self.height).map(|_| ())
    }

    /// Renders a single output, evaluating only the nodes it depends on.
    ///
    /// An out-of-range `index` renders output 0. Does nothing when the
    /// diagram has no outputs.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::BufferSize`] when `pixels` has the wrong length.
    pub fn fill_output(&self, pixels: &mut [Color], index: usize) -> FlowResult<()> {
        let index = if index < self.outputs.len() { index } else { 0 };
        let Some(output) = self.outputs.get(index) else {
            return Ok(());
        };
        self.check_buffer(index, pixels)?;
        let order = &self.output_orders[index];
        let mut values = vec![Value::Float(0.0); self.nodes.len()];
        let mut args = Vec::new();
        for row in 0..self.height {
            for x in 0..self.width {
                let pixel = self.pixel(x, row);
                self.evaluate(order, &pixel, &mut values, &mut args);
                pixels[row * self.width + x] = values[output.node].as_color();
            }
        }
        Ok(())
    }

    /// Allocates buffers, renders every output and post-processes normal
    /// maps with the document's normal format.
    ///
    /// # Errors
    ///
    /// Infallible for a well-formed diagram; errors are propagated from
    /// [`Diagram::fill`].
    pub fn render(&self) -> FlowResult<Vec<Vec<Color>>> {
        let mut buffers = vec![vec![Color::CLEAR; self.pixel_count()]; self.outputs.len()];
        self.fill(&mut buffers)?;
        self.post_process(&mut buffers, self.normal_format)?;
        Ok(buffers)
    }

    /// Converts the height in the alpha channel of every normal map output
    /// into encoded normals. Other outputs are left alone.
    ///
    /// # Errors
    ///
    /// As [`Diagram::fill_rows`].
    pub fn post_process<B: AsMut<[Color]>>(&self, buffers: &mut [B], format: NormalFormat) -> FlowResult<()> {
        if buffers.len() < self.outputs.len() {
            return Err(FlowError::MissingBuffers {
                expected: self.outputs.len(),
                found: buffers.len(),
            });
        }
        for (index, buffer) in buffers.iter_mut().enumerate().take(self.outputs.len()) {
            self.post_process_output(buffer.as_mut(), index, format)?;
        }
        Ok(())
    }

    /// Post-processes the buffer of a single output. An out-of-range `index`
    /// refers to output 0.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::BufferSize`] when `pixels` has the wrong length.
    pub fn post_process_output(&self, pixels: &mut [Color], index: usize, format: NormalFormat) -> FlowResult<()> {
        let index = if index < self.outputs.len() { index } else { 0 };
        let Some(output) = self.outputs.get(index) else {
            return Ok(());
        };
        if output.kind != OutputKind::NormalMap {
            return Ok(());
        }
        self.check_buffer(index, pixels)?;
        generate_normals(pixels, self.width, self.height, output.filtering, output.strength);
        encode_normals(pixels, format);
        tracing::debug!(
            "Generated {:?} normals for output '{}' ({:?})",
            output.filtering,
            output.name,
            format
        );
        Ok(())
    }

    fn check_buffer(&self, index: usize, buffer: &[Color]) -> FlowResult<()> {
        if buffer.len() == self.pixel_count() {
            Ok(())
        } else {
            Err(FlowError::BufferSize {
                index,
                expected: self.pixel_count(),
                found: buffer.len(),
            })
        }
    }

    fn pixel(&self, x: usize, row: usize) -> Pixel {
        let u_delta = 1.0 / self.width as f32;
        let v_delta = 1.0 / self.height as f32;
        Pixel {
            x: x as i32,
            y: row as i32,
            uv: Vec2::new((x as f32 + 0.5) * u_delta, (row as f32 + 0.5) * v_delta),
        }
    }

    fn evaluate(&self, order: &[usize], pixel: &Pixel, values: &mut [Value], args: &mut Vec<Value>) {
        for &index in order {
            let node = &self.nodes[index];
            args.clear();
            args.extend(node.args.iter().map(|arg| match arg {
                Argument::Node(source) => values[*source].clone(),
                Argument::Literal(value) => value.clone(),
            }));
            values[index] = node.function.compute(args, pixel);
        }
    }
}

fn checked_size(width: u32, height: u32) -> FlowResult<(usize, usize)> {
    if (1..=MAX_SIZE).contains(&width) && (1..=MAX_SIZE).contains(&height) {
        Ok((width as usize, height as usize))
    } else {
        Err(FlowError::InvalidSize { width, height })
    }
}

/// Resolves a node's arguments in property order.
fn resolve_arguments(
    node: &str,
    function_id: &str,
    function: FunctionKind,
    given: &BTreeMap<String, ArgumentConfig>,
    index_of: &HashMap<&str, usize>,
    functions: &[FunctionKind],
) -> FlowResult<Vec<Argument>> {
    let properties = function.properties();
    if let Some(unknown) = given.keys().find(|key| !properties.iter().any(|p| p.id == key.as_str())) {
        return Err(FlowError::UnknownArgument {
            node: node.to_string(),
            function: function_id.to_string(),
            argument: unknown.clone(),
        });
    }

    properties
        .iter()
        .map(|property| match given.get(property.id) {
            None => Ok(Argument::Literal(property.default_value())),
            Some(ArgumentConfig::Node(reference)) => {
                let source = *index_of.get(reference.node.as_str()).ok_or_else(|| FlowError::UnknownNode {
                    owner: format!("node {node}"),
                    reference: reference.node.clone(),
                })?;
                let found = functions[source].return_type();
                if found != property.value_type {
                    return Err(FlowError::TypeMismatch {
                        node: node.to_string(),
                        argument: property.id.to_string(),
                        source_node: reference.node.clone(),
                        expected: property.value_type,
                        found,
                    });
                }
                Ok(Argument::Node(source))
            }
            Some(ArgumentConfig::Literal(literal)) => Value::from_literal(literal, property.value_type)
                .map(Argument::Literal)
                .ok_or_else(|| FlowError::InvalidLiteral {
                    node: node.to_string(),
                    argument: property.id.to_string(),
                    expected: property.value_type,
                }),
        })
        .collect()
}

/// Maps input names to node indices. Input nodes need a literal name.
fn collect_inputs(nodes: &[Node]) -> FlowResult<BTreeMap<String, usize>> {
    let mut inputs = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        if !node.function.is_input() {
            continue;
        }
        let name = match node.args.get(1) {
            Some(Argument::Literal(Value::String(name))) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(FlowError::MissingArgument {
                    node: node.id.clone(),
                    argument: "name".to_string(),
                })
            }
        };
        if let Some(previous) = inputs.insert(name.clone(), index) {
            tracing::warn!(
                "Input '{}' is declared by both '{}' and '{}'; using '{}'",
                name,
                nodes[previous].id,
                node.id,
                node.id
            );
        }
    }
    Ok(inputs)
}

/// Nodes the `roots` depend on, roots included.
fn reachable_from(nodes: &[Node], roots: &[usize]) -> HashSet<usize> {
    let mut reachable = HashSet::new();
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(index) = stack.pop() {
        if reachable.insert(index) {
            stack.extend(nodes[index].dependencies());
        }
    }
    reachable
}

/// Kahn's algorithm over the reachable nodes, dependencies first.
///
/// Ties are broken by declaration order, so the result is deterministic.
fn topological_order(nodes: &[Node], reachable: &HashSet<usize>) -> FlowResult<Vec<usize>> {
    let mut in_degree = vec![0usize; nodes.len()];
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for index in (0..nodes.len()).filter(|index| reachable.contains(index)) {
        for source in nodes[index].dependencies() {
            consumers[source].push(index);
            in_degree[index] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..nodes.len())
        .filter(|index| reachable.contains(index) && in_degree[*index] == 0)
        .collect();
    let mut order = Vec::with_capacity(reachable.len());
    while let Some(index) = queue.pop_front() {
        order.push(index);
        for &consumer in &consumers[index] {
            in_degree[consumer] -= 1;
            if in_degree[consumer] == 0 {
                queue.push_back(consumer);
            }
        }
    }

    if order.len() == reachable.len() {
        return Ok(order);
    }
    let cycle = find_cycle(nodes, reachable).unwrap_or_default();
    Err(FlowError::DependencyCycle(
        cycle.into_iter().map(|index| nodes[index].id.clone()).collect(),
    ))
}

/// Depth-first search for a dependency loop, returned as a closed path.
fn find_cycle(nodes: &[Node], reachable: &HashSet<usize>) -> Option<Vec<usize>> {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut path = Vec::new();
    for start in (0..nodes.len()).filter(|index| reachable.contains(index)) {
        if !visited.contains(&start) {
            if let Some(cycle) = dfs_find_cycle(nodes, start, &mut visited, &mut on_stack, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs_find_cycle(
    nodes: &[Node],
    index: usize,
    visited: &mut HashSet<usize>,
    on_stack: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    visited.insert(index);
    on_stack.insert(index);
    path.push(index);

    for source in nodes[index].dependencies() {
        if !visited.contains(&source) {
            if let Some(cycle) = dfs_find_cycle(nodes, source, visited, on_stack, path) {
                return Some(cycle);
            }
        } else if on_stack.contains(&source) {
            let start = path.iter().position(|&i| i == source).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(source);
            return Some(cycle);
        }
    }

    path.pop();
    on_stack.remove(&index);
    None
}
