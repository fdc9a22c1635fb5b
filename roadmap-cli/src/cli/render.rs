//! Serialisers for generated graphs and the per-node trace.
//!
//! Every writer is read-only over the graph and streams straight into the
//! supplied sink.

use std::fmt;
use std::io::{self, Write};

use clap::ValueEnum;
use roadmap_core::RoadmapGraph;
use thiserror::Error;

/// Output formats understood by [`write_graph`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Undirected graph-description file consumed by route-search tooling.
    #[default]
    Dot,
    /// Whitespace-separated records, one per line.
    Text,
    /// Pretty-printed JSON of the whole graph.
    Json,
}

impl OutputFormat {
    /// Lower-case name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while serialising a graph.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON encoding failed.
    #[error("failed to encode graph as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `graph` to `writer` in the requested `format`.
///
/// # Errors
/// Returns [`RenderError`] when the writer fails or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use roadmap_cli::cli::{OutputFormat, write_graph};
/// # use roadmap_core::{GenerationRequest, RoadmapBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let params = GenerationRequest {
///     node_count: 2,
///     max_edges_per_node: 1,
///     store_count: 1,
///     warehouse_count: 1,
///     good_type_count: 1,
///     supply: vec![1],
///     demand: vec![1],
/// }
/// .validate()?;
/// let graph = RoadmapBuilder::new().with_seed(5).build()?.generate(&params)?;
/// let mut buffer = Vec::new();
/// write_graph(&graph, OutputFormat::Dot, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.starts_with("graph G {\n"));
/// assert!(text.ends_with("}\n"));
/// # Ok(())
/// # }
/// ```
pub fn write_graph(
    graph: &RoadmapGraph,
    format: OutputFormat,
    mut writer: impl Write,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Dot => write_dot(graph, &mut writer)?,
        OutputFormat::Text => write_text(graph, &mut writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, graph)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Writes the graph-description rendering.
///
/// Only the first good type's supply and demand appear on node statements.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_dot(graph: &RoadmapGraph, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph G {{")?;
    for node in graph.nodes() {
        let id = node.id();
        writeln!(
            writer,
            "\"{id}\" [label=\"{id} {tag}\", type={code}, supply={supply}, demand={demand}]",
            tag = node.role().tag(),
            code = node.role().code(),
            supply = node.supply().first().copied().unwrap_or(0),
            demand = node.demand().first().copied().unwrap_or(0),
        )?;
    }
    for (source, edge) in graph.edges() {
        writeln!(
            writer,
            "\"{source}\"--\"{destination}\"[label=\" d = {distance:.3}\\n t = {time}\", distance={distance:.3}, time={time}]",
            destination = edge.destination(),
            distance = edge.distance(),
            time = edge.travel_time(),
        )?;
    }
    writeln!(writer, "}}")
}

/// Writes the plain-text rendering.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_text(graph: &RoadmapGraph, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes {}", graph.nodes().len())?;
    writeln!(writer, "goods {}", graph.good_type_count())?;
    for node in graph.nodes() {
        let position = node.position();
        write!(
            writer,
            "node {} {} {} {} supply",
            node.id(),
            node.role().code(),
            position.x,
            position.y
        )?;
        for units in node.supply() {
            write!(writer, " {units}")?;
        }
        write!(writer, " demand")?;
        for units in node.demand() {
            write!(writer, " {units}")?;
        }
        writeln!(writer)?;
    }
    for (source, edge) in graph.edges() {
        writeln!(
            writer,
            "edge {source} {} {} {}",
            edge.destination(),
            edge.distance(),
            edge.travel_time()
        )?;
    }
    Ok(())
}

/// Writes the human-readable per-node trace.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_trace(graph: &RoadmapGraph, mut writer: impl Write) -> io::Result<()> {
    for node in graph.nodes() {
        writeln!(writer, "Node [{}] is a {}", node.id(), node.role().label())?;
        for edge in node.edges() {
            writeln!(
                writer,
                "> Edge between nodes [{}] and [{}]",
                node.id(),
                edge.destination()
            )?;
            writeln!(
                writer,
                ">> Distance: {:.3}; Time to traverse: {}",
                edge.distance(),
                edge.travel_time()
            )?;
        }
    }
    Ok(())
}
