//! CLI entry point for inspecting goal tree views.
//!
//! # Responsibility
//! - Load a forest, apply session commands from flags, print one view as JSON.
//! - Keep output deterministic for quick local sanity checks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use goaltree_core::{
    load_forest_file, sample_forest, GoalField, GoalTreeSession, GridMode, NodeId,
};

#[derive(Parser)]
#[command(
    name = "goaltree",
    version,
    about = "Render goal tree views as JSON",
    long_about = None,
)]
struct Cli {
    /// Forest JSON file. Uses the built-in sample when omitted.
    path: Option<PathBuf>,

    /// View to print.
    #[arg(long, value_enum, default_value_t = View::GridTree)]
    view: View,

    /// Shallowest absolute depth to show.
    #[arg(long, default_value_t = 0)]
    min_depth: usize,

    /// Deepest absolute depth to show.
    #[arg(long, default_value_t = 5)]
    max_depth: usize,

    /// Node ids to collapse, comma-separated.
    #[arg(long, value_delimiter = ',', conflicts_with = "collapse_all")]
    collapse: Vec<String>,

    /// Collapse every node that has children.
    #[arg(long)]
    collapse_all: bool,

    /// Node ids to mark done before rendering, comma-separated.
    #[arg(long, value_delimiter = ',')]
    done: Vec<String>,

    /// Grid column to filter on.
    #[arg(long, default_value = "name", requires = "filter")]
    filter_field: String,

    /// Case-insensitive substring filter for grid views.
    #[arg(long)]
    filter: Option<String>,

    /// Print column fill statistics instead of a view.
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    GridTree,
    GridFlat,
    Graph,
    Visible,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let forest = match &cli.path {
        Some(path) => load_forest_file(path)
            .with_context(|| format!("failed to load forest from {}", path.display()))?,
        None => sample_forest().context("failed to load built-in sample")?,
    };

    let mut session = GoalTreeSession::new(forest);
    session.set_depth_window(cli.min_depth, cli.max_depth);
    if cli.collapse_all {
        session.collapse_all();
    }
    for id in &cli.collapse {
        session.collapse(&NodeId::from(id.trim()))?;
    }
    for id in &cli.done {
        session.set_done(&NodeId::from(id.trim()), true)?;
    }
    if let Some(query) = &cli.filter {
        let field: GoalField = cli.filter_field.parse()?;
        session.set_filter(field, query)?;
    }

    if cli.stats {
        for field in GoalField::ALL {
            println!("{field}: {}", session.fill_stats(field));
        }
        return Ok(());
    }

    let json = match cli.view {
        View::GridTree => {
            session.set_grid_mode(GridMode::Tree);
            serde_json::to_string_pretty(&session.grid_view())?
        }
        View::GridFlat => {
            session.set_grid_mode(GridMode::Flat);
            serde_json::to_string_pretty(&session.grid_view())?
        }
        View::Graph => serde_json::to_string_pretty(&session.graph_layout())?,
        View::Visible => serde_json::to_string_pretty(&session.visible_graph())?,
    };
    println!("{json}");
    Ok(())
}
