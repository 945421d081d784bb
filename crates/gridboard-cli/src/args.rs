//! Command-line argument definitions for the Gridboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the layout file, the command to run on
//! it, where to write the result, the configuration file and logging
//! verbosity.

use clap::{Parser, Subcommand};

use gridboard::breakpoint::Breakpoint;

/// Command-line arguments for the Gridboard layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the layout file
    #[arg(help = "Path to the TOML layout file")]
    pub input: String,

    /// Write the resulting layout here instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do with the layout.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report problems in the layout; fails if any is an error
    Check,

    /// Print the first free position for a widget of the given size
    Place {
        #[arg(long, default_value_t = 1)]
        width: u32,

        #[arg(long, default_value_t = 1)]
        height: u32,
    },

    /// Insert a widget and write the updated layout
    Insert {
        #[arg(long)]
        id: String,

        #[arg(long, default_value_t = 1)]
        width: u32,

        #[arg(long, default_value_t = 1)]
        height: u32,

        /// Position in display order; appends when omitted
        #[arg(long)]
        index: Option<usize>,
    },

    /// Respace all order keys evenly and write the updated layout
    Reorganize,

    /// Re-place widgets for another column count and write the updated layout
    Reflow {
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..),
            conflicts_with = "breakpoint",
            required_unless_present = "breakpoint"
        )]
        columns: Option<u32>,

        /// Use the configured column count of this breakpoint
        #[arg(long)]
        breakpoint: Option<Breakpoint>,
    },
}
