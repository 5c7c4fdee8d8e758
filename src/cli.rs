use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate api docs in markdown format
    #[cfg(feature = "markdown-docs")]
    #[clap(hide = true)]
    MarkdownDocs {},

    /// Load a model and print a summary
    Inspect {
        /// Model archive (defaults to model_path from config.yaml)
        path: Option<PathBuf>,
    },

    /// Print the vector of a term
    Lookup {
        /// Model archive (defaults to model_path from config.yaml)
        #[clap(short, long)]
        model: Option<PathBuf>,

        /// Term to look up, matched byte for byte
        term: String,
    },

    /// List the terms of a model, one per line
    Terms {
        /// Model archive (defaults to model_path from config.yaml)
        #[clap(short, long)]
        model: Option<PathBuf>,

        /// Stop after this many terms
        #[clap(short, long)]
        limit: Option<usize>,
    },
}
