//! # Edge-List Input
//!
//! Two input formats:
//!
//! - `text`: one edge per line, members separated by whitespace or commas,
//!   an optional `; <weight>` suffix, `#` starts a comment.
//!
//!   ```text
//!   # members ; weight
//!   1 2        ; 0.5
//!   4,3,5,6,8  ; 2
//!   7 4 6
//!   ```
//!
//!   A file with any weight is loaded as a weighted store; unweighted lines
//!   in it get weight 1.0.
//! - `json`: a serialized `HypergraphSnapshot<u64>`.

use crate::error::AppError;
use clap::ValueEnum;
use hgx_core::{Hypergraph, HypergraphConfig, HypergraphError, HypergraphSnapshot};
use std::path::{Path, PathBuf};

/// Maximum input file size (100 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Weight given to unweighted lines of a weighted text file.
const DEFAULT_LINE_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    #[default]
    Text,
    Json,
}

// =============================================================================
// FILE ACCESS
// =============================================================================

/// Resolve a path to an existing regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, AppError> {
    let canonical = path.canonicalize().map_err(|e| AppError::io(path, e))?;
    if !canonical.is_file() {
        return Err(AppError::InvalidArgument(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    Ok(canonical)
}

/// Read a file as UTF-8 after checking its size.
pub fn read_bounded(path: &Path, max_size: u64) -> Result<String, AppError> {
    let path = validate_file_path(path)?;
    let size = std::fs::metadata(&path)
        .map_err(|e| AppError::io(&path, e))?
        .len();
    if size > max_size {
        return Err(AppError::FileTooLarge {
            size,
            max: max_size,
        });
    }
    std::fs::read_to_string(&path).map_err(|e| AppError::io(&path, e))
}

/// Load a store from a file.
pub fn load(
    path: &Path,
    format: InputFormat,
    config: HypergraphConfig,
) -> Result<Hypergraph<u64>, AppError> {
    let text = read_bounded(path, MAX_INPUT_FILE_SIZE)?;
    let hypergraph = match format {
        InputFormat::Text => parse_text(&text, config)?,
        InputFormat::Json => parse_json(&text, config)?,
    };
    tracing::info!(
        path = %path.display(),
        nodes = hypergraph.num_nodes(),
        weighted = hypergraph.is_weighted(),
        "loaded hypergraph"
    );
    Ok(hypergraph)
}

// =============================================================================
// TEXT FORMAT
// =============================================================================

/// One parsed line: its number, members and optional weight.
struct Line {
    number: usize,
    members: Vec<u64>,
    weight: Option<f64>,
}

fn parse_line(number: usize, raw: &str) -> Result<Option<Line>, AppError> {
    let content = raw.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let (members_part, weight_part) = match content.split_once(';') {
        Some((m, w)) => (m, Some(w.trim())),
        None => (content, None),
    };

    let members = members_part
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u64>().map_err(|_| AppError::Parse {
                line: number,
                message: format!("'{}' is not a node id", token),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if members.is_empty() {
        return Err(AppError::Parse {
            line: number,
            message: "edge has no members".to_string(),
        });
    }

    let weight = weight_part
        .map(|w| {
            w.parse::<f64>().map_err(|_| AppError::Parse {
                line: number,
                message: format!("'{}' is not a weight", w),
            })
        })
        .transpose()?;

    Ok(Some(Line {
        number,
        members,
        weight,
    }))
}

/// Parse the text edge-list format.
pub fn parse_text(text: &str, config: HypergraphConfig) -> Result<Hypergraph<u64>, AppError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if let Some(line) = parse_line(index + 1, raw)? {
            lines.push(line);
        }
    }

    let weighted = config.weighted || lines.iter().any(|l| l.weight.is_some());
    let config = HypergraphConfig { weighted, ..config };
    let weights: Option<Vec<f64>> = weighted.then(|| {
        lines
            .iter()
            .map(|l| l.weight.unwrap_or(DEFAULT_LINE_WEIGHT))
            .collect()
    });

    let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
    let edges = lines.into_iter().map(|l| l.members);

    Hypergraph::from_edges(config, edges, weights.as_deref(), None).map_err(|e| match e {
        HypergraphError::BatchFailed { index, source } => AppError::Parse {
            line: numbers.get(index).copied().unwrap_or_default(),
            message: source.to_string(),
        },
        other => AppError::Hypergraph(other),
    })
}

// =============================================================================
// JSON FORMAT
// =============================================================================

/// Parse a JSON snapshot. `config` applies only if the document has no
/// `config` object of its own.
pub fn parse_json(text: &str, config: HypergraphConfig) -> Result<Hypergraph<u64>, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let has_config = value.get("config").is_some();
    let mut snapshot: HypergraphSnapshot<u64> = serde_json::from_value(value)?;
    if !has_config {
        snapshot.config = config;
    }
    Ok(Hypergraph::try_from(snapshot)?)
}
