//! # CLI Command Implementations
//!
//! Each command turns the loaded store into a `Report`, which renders as
//! plain text or as pretty JSON.

use super::{Commands, FilterArgs};
use crate::error::AppError;
use hgx_core::{Edge, EdgeFilter, Hypergraph, Metadata};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

// =============================================================================
// REPORT
// =============================================================================

/// Output of one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub lines: Vec<String>,
    pub json: Value,
}

impl Report {
    fn new(title: impl Into<String>, lines: Vec<String>, json: Value) -> Self {
        Self {
            title: title.into(),
            lines,
            json,
        }
    }

    /// Render for the terminal.
    pub fn render(&self, json_mode: bool) -> Result<String, AppError> {
        if json_mode {
            return Ok(serde_json::to_string_pretty(&self.json)?);
        }
        let mut out = format!("{}\n{}", self.title, "=".repeat(self.title.len()));
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        Ok(out)
    }
}

/// Run one command against a loaded store.
pub fn run(command: &Commands, hg: &mut Hypergraph<u64>) -> Result<Report, AppError> {
    tracing::debug!(?command, "running command");
    match command {
        Commands::Stats => cmd_stats(hg),
        Commands::Nodes => Ok(cmd_nodes(hg)),
        Commands::Edges { filter } => cmd_edges(hg, *filter),
        Commands::Incident { node, filter } => cmd_incident(hg, *node, *filter),
        Commands::Neighbors { node, filter } => cmd_neighbors(hg, *node, *filter),
        Commands::Degrees { filter } => cmd_degrees(hg, *filter),
        Commands::Mapping => Ok(cmd_mapping(hg)),
        Commands::Components { s } => cmd_components(hg, *s),
        Commands::Subgraph { nodes } => {
            let sub = hg.subhypergraph(nodes)?;
            store_report("Subhypergraph", &sub)
        }
        Commands::ByOrders { orders, keep_nodes } => {
            let sub = hg.subhypergraph_by_orders(orders, *keep_nodes)?;
            store_report("Subhypergraph by orders", &sub)
        }
        Commands::RemoveNode { node, keep_edges } => {
            hg.remove_node(node, *keep_edges)?;
            store_report(format!("After removing node {}", node), hg)
        }
        Commands::Export { output } => cmd_export(hg, output),
    }
}

impl FilterArgs {
    /// Convert the flags into a store filter.
    pub fn to_filter(self) -> Result<EdgeFilter, AppError> {
        Ok(EdgeFilter::from_parts(self.order, self.size, self.up_to)?)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn edge_json(hg: &Hypergraph<u64>, edge: &Edge<u64>, metadata: &Metadata) -> Result<Value, AppError> {
    let mut value = json!({
        "nodes": edge.nodes(),
        "order": edge.order(),
    });
    if hg.is_weighted() {
        value["weight"] = json!(hg.get_weight(edge.nodes())?);
    }
    if !metadata.is_empty() {
        value["metadata"] = serde_json::to_value(metadata)?;
    }
    Ok(value)
}

fn edge_line(hg: &Hypergraph<u64>, edge: &Edge<u64>) -> Result<String, AppError> {
    if hg.is_weighted() {
        Ok(format!("{}  weight={}", edge, hg.get_weight(edge.nodes())?))
    } else {
        Ok(edge.to_string())
    }
}

/// Nodes and edges of a (derived) store.
fn store_report(title: impl Into<String>, hg: &Hypergraph<u64>) -> Result<Report, AppError> {
    let nodes = hg.get_nodes();
    let mut lines = vec![
        format!("Nodes ({}): {:?}", nodes.len(), nodes),
        format!("Edges ({}):", hg.num_edges(EdgeFilter::All)?),
    ];
    let mut edges = Vec::new();
    for (edge, metadata) in hg.get_edges_with_meta(EdgeFilter::All)? {
        lines.push(format!("  {}", edge_line(hg, edge)?));
        edges.push(edge_json(hg, edge, metadata)?);
    }
    Ok(Report::new(
        title,
        lines,
        json!({ "nodes": nodes, "edges": edges }),
    ))
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

pub fn cmd_stats(hg: &Hypergraph<u64>) -> Result<Report, AppError> {
    let distribution: serde_json::Map<String, Value> = hg
        .distribution_sizes()
        .into_iter()
        .map(|(size, count)| (size.to_string(), json!(count)))
        .collect();
    let components = hg.connected_components().len();

    let lines = vec![
        format!("Nodes:      {}", hg.num_nodes()),
        format!("Edges:      {}", hg.num_edges(EdgeFilter::All)?),
        format!("Weighted:   {}", hg.is_weighted()),
        format!(
            "Max order:  {}",
            hg.max_order().map_or_else(|| "-".to_string(), |o| o.to_string())
        ),
        format!("Uniform:    {}", hg.is_uniform()),
        format!("Components: {}", components),
        format!("Sizes:      {:?}", hg.distribution_sizes()),
    ];

    Ok(Report::new(
        "Hypergraph Status",
        lines,
        json!({
            "num_nodes": hg.num_nodes(),
            "num_edges": hg.num_edges(EdgeFilter::All)?,
            "weighted": hg.is_weighted(),
            "max_order": hg.max_order(),
            "max_size": hg.max_size(),
            "uniform": hg.is_uniform(),
            "components": components,
            "distribution_sizes": distribution,
        }),
    ))
}

pub fn cmd_nodes(hg: &Hypergraph<u64>) -> Report {
    let nodes = hg.get_nodes_with_meta();
    let lines = nodes
        .iter()
        .map(|(node, metadata)| {
            if metadata.is_empty() {
                node.to_string()
            } else {
                format!("{}  {:?}", node, metadata)
            }
        })
        .collect();
    let json = nodes
        .iter()
        .map(|(node, metadata)| json!({ "id": node, "metadata": metadata }))
        .collect::<Vec<_>>();
    Report::new(format!("Nodes ({})", nodes.len()), lines, json!(json))
}

pub fn cmd_edges(hg: &Hypergraph<u64>, filter: FilterArgs) -> Result<Report, AppError> {
    let filter = filter.to_filter()?;
    let mut lines = Vec::new();
    let mut edges = Vec::new();
    for (edge, metadata) in hg.get_edges_with_meta(filter)? {
        lines.push(edge_line(hg, edge)?);
        edges.push(edge_json(hg, edge, metadata)?);
    }
    Ok(Report::new(
        format!("Edges ({})", edges.len()),
        lines,
        json!(edges),
    ))
}

pub fn cmd_incident(hg: &Hypergraph<u64>, node: u64, filter: FilterArgs) -> Result<Report, AppError> {
    let filter = filter.to_filter()?;
    let incident = hg.get_incident_edges(&node, filter)?;
    let lines = incident
        .iter()
        .map(|edge| edge_line(hg, edge))
        .collect::<Result<Vec<_>, _>>()?;
    let json = incident.iter().map(|edge| edge.nodes()).collect::<Vec<_>>();
    Ok(Report::new(
        format!("Edges incident to {} ({})", node, incident.len()),
        lines,
        json!({ "node": node, "edges": json }),
    ))
}

pub fn cmd_neighbors(hg: &Hypergraph<u64>, node: u64, filter: FilterArgs) -> Result<Report, AppError> {
    let neighbors = hg.get_neighbors(&node, filter.to_filter()?)?;
    Ok(Report::new(
        format!("Neighbors of {} ({})", node, neighbors.len()),
        vec![format!("{:?}", neighbors)],
        json!({ "node": node, "neighbors": neighbors }),
    ))
}

pub fn cmd_degrees(hg: &Hypergraph<u64>, filter: FilterArgs) -> Result<Report, AppError> {
    let filter = filter.to_filter()?;
    let sequence = hg.degree_sequence(filter)?;
    let distribution = hg.degree_distribution(filter)?;

    let mut lines: Vec<String> = sequence
        .iter()
        .map(|(node, degree)| format!("{:>8}  {}", node, degree))
        .collect();
    lines.push(format!("Distribution: {:?}", distribution));

    let degrees = sequence
        .iter()
        .map(|(node, degree)| json!({ "node": node, "degree": degree }))
        .collect::<Vec<_>>();
    let distribution: serde_json::Map<String, Value> = distribution
        .into_iter()
        .map(|(degree, count)| (degree.to_string(), json!(count)))
        .collect();
    Ok(Report::new(
        "Degrees",
        lines,
        json!({ "degrees": degrees, "distribution": distribution }),
    ))
}

pub fn cmd_mapping(hg: &Hypergraph<u64>) -> Report {
    let encoder = hg.get_mapping();
    let lines = encoder
        .iter()
        .map(|(node, code)| format!("{} -> {}", node, code))
        .collect();
    let json = encoder
        .iter()
        .map(|(node, code)| json!({ "node": node, "code": code }))
        .collect::<Vec<_>>();
    Report::new(format!("Mapping ({})", encoder.len()), lines, json!(json))
}

pub fn cmd_components(hg: &Hypergraph<u64>, s: Option<usize>) -> Result<Report, AppError> {
    match s {
        None => {
            let components = hg.connected_components();
            let lines = components
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}: {:?}", i, c))
                .collect();
            Ok(Report::new(
                format!("Connected components ({})", components.len()),
                lines,
                json!({ "connected": hg.is_connected(), "components": components }),
            ))
        }
        Some(s) => {
            let components = hg.s_components(s)?;
            let lines = components
                .iter()
                .enumerate()
                .map(|(i, edges)| {
                    let rendered: Vec<String> = edges.iter().map(|e| e.to_string()).collect();
                    format!("{}: {}", i, rendered.join(" "))
                })
                .collect();
            let json = components
                .iter()
                .map(|edges| edges.iter().map(|e| e.nodes()).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            Ok(Report::new(
                format!("{}-components ({})", s, components.len()),
                lines,
                json!({ "s": s, "components": json }),
            ))
        }
    }
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Resolve an output path against its (existing) parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, AppError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let canonical_parent = parent
        .canonicalize()
        .map_err(|e| AppError::io(parent, e))?;
    if !canonical_parent.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }
    let filename = path
        .file_name()
        .ok_or_else(|| AppError::InvalidArgument("Output path has no filename".to_string()))?;
    Ok(canonical_parent.join(filename))
}

pub fn cmd_export(hg: &Hypergraph<u64>, output: &Path) -> Result<Report, AppError> {
    let output = validate_output_path(output)?;
    let data = serde_json::to_vec_pretty(&hg.snapshot())?;
    std::fs::write(&output, &data).map_err(|e| AppError::io(&output, e))?;
    tracing::info!(path = %output.display(), bytes = data.len(), "exported snapshot");

    Ok(Report::new(
        "Export",
        vec![format!("Exported {} bytes to {}", data.len(), output.display())],
        json!({ "path": output.to_string_lossy(), "bytes": data.len() }),
    ))
}
