//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::Facet;
use crate::models::Difficulty;

#[derive(Parser, Debug)]
#[command(name = "tereverde")]
#[command(version, about = "Browse park attractions and trails with client-side filters")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging and load-failure diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attractions and events
    Attractions {
        #[command(flatten)]
        common: CommonArgs,

        /// Tag to filter by ("all" for every category)
        #[arg(long, default_value = "all")]
        category: Facet<String>,
    },
    /// Trails
    Routes {
        #[command(flatten)]
        common: CommonArgs,

        /// Difficulty level 1 (easy), 2 (moderate) or 3 (hard), or "all"
        #[arg(long, default_value = "all")]
        difficulty: Facet<Difficulty>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Park name to filter by ("all" for every park)
    #[arg(long, default_value = "all")]
    pub park: Facet<String>,

    /// Show the detail view of one entry
    #[arg(long, value_name = "ID")]
    pub show: Option<u64>,

    /// Print a map-search link for one entry
    #[arg(long, value_name = "ID", conflicts_with = "show")]
    pub directions: Option<u64>,

    /// List the available filter values
    #[arg(long)]
    pub facets: bool,

    /// Print matching entries as JSON
    #[arg(long)]
    pub json: bool,
}
