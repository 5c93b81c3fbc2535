//! # hgx CLI Module
//!
//! This module implements the CLI interface for hgx.
//!
//! ## Available Commands
//!
//! - `stats` - Summary of the loaded hypergraph
//! - `nodes` - List nodes
//! - `edges` - List edges, optionally filtered by order/size
//! - `incident` - Edges containing a node
//! - `neighbors` - Nodes sharing an edge with a node
//! - `degrees` - Degree of every node
//! - `mapping` - Dense integer encoding of the node set
//! - `components` - Connected (or s-connected) components
//! - `subgraph` - Restrict to a node subset
//! - `by-orders` - Restrict to edges of given orders
//! - `remove-node` - Remove a node and show the result
//! - `export` - Write the hypergraph as a JSON snapshot

mod commands;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::{self, InputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// hgx - hypergraph edge-list toolkit
///
/// Loads an edge list into a deterministic hypergraph store and runs one
/// query or transformation on it.
#[derive(Parser, Debug)]
#[command(name = "hgx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Edge-list file to load
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = InputFormat::Text)]
    pub format: InputFormat,

    /// Treat the input as weighted
    #[arg(long, global = true)]
    pub weighted: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show a summary of the hypergraph
    Stats,

    /// List nodes
    Nodes,

    /// List edges
    Edges {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the edges containing a node
    Incident {
        node: u64,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the neighbors of a node
    Neighbors {
        node: u64,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the degree of every node
    Degrees {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the node-to-code mapping
    Mapping,

    /// Show connected components
    Components {
        /// Group edges sharing at least S nodes instead of grouping nodes
        #[arg(short, long = "overlap", value_name = "S")]
        s: Option<usize>,
    },

    /// Restrict to a node subset (comma-separated)
    Subgraph {
        #[arg(short, long, value_delimiter = ',', required = true)]
        nodes: Vec<u64>,
    },

    /// Restrict to edges of the given orders (comma-separated)
    ByOrders {
        #[arg(short, long, value_delimiter = ',', required = true)]
        orders: Vec<usize>,

        /// Keep nodes left without edges
        #[arg(short, long)]
        keep_nodes: bool,
    },

    /// Remove a node and show the resulting hypergraph
    RemoveNode {
        node: u64,

        /// Rewrite incident edges without the node instead of deleting them
        #[arg(short, long)]
        keep_edges: bool,
    },

    /// Export the hypergraph as a JSON snapshot
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Order/size filter flags shared by several commands.
#[derive(clap::Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Edge order (size - 1)
    #[arg(long)]
    pub order: Option<usize>,

    /// Edge size
    #[arg(long)]
    pub size: Option<usize>,

    /// Match every order/size up to the given one
    #[arg(long)]
    pub up_to: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and a resolved configuration.
pub fn execute(cli: Cli, mut config: AppConfig) -> Result<(), AppError> {
    if cli.weighted {
        config.hypergraph.weighted = true;
    }

    let path = cli.input.as_deref().ok_or_else(|| {
        AppError::InvalidArgument("no input file given (use --input <FILE>)".to_string())
    })?;
    let mut hypergraph = input::load(path, cli.format, config.hypergraph)?;

    let report = run(&cli.command, &mut hypergraph)?;
    println!("{}", report.render(cli.json_mode)?);
    Ok(())
}
