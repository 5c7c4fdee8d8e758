use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

use synvec::config::Config;
use synvec::word2vec::{load_model, TermEncoding, Word2VecModel};

mod cli;

#[derive(Serialize)]
struct ModelSummary {
    path: PathBuf,
    sha256: String,
    dictionary_size: usize,
    vector_dimension: usize,
    loaded_terms: usize,
    term_encoding: TermEncoding,
    preview: Vec<String>,
}

#[derive(Serialize)]
struct TermVector<'a> {
    term: &'a str,
    vector: &'a [f32],
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_model_path(path: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    path.or_else(|| config.model_path.clone()).context(
        "No model given. Pass a model path or set model_path in config.yaml",
    )
}

fn load(path: &Path) -> Result<Word2VecModel> {
    load_model(path).with_context(|| format!("Failed to load model from {}", path.display()))
}

fn file_sha256(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let config = Config::load()?;
    init_logging(&config.log_filter);

    match args.command {
        #[cfg(feature = "markdown-docs")]
        cli::Command::MarkdownDocs {} => {
            clap_markdown::print_help_markdown::<cli::Args>();
            Ok(())
        }

        cli::Command::Inspect { path } => {
            let path = resolve_model_path(path, &config)?;
            let _span = tracing::info_span!("inspect", path = %path.display()).entered();

            let model = load(&path)?;
            let summary = ModelSummary {
                sha256: file_sha256(&path)?,
                dictionary_size: model.dictionary_size(),
                vector_dimension: model.vector_dimension(),
                loaded_terms: model.len(),
                term_encoding: model.term_encoding(),
                preview: model
                    .iter()
                    .take(config.preview_terms)
                    .map(|entry| entry.term().to_string_lossy())
                    .collect(),
                path,
            };

            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }

        cli::Command::Lookup { model, term } => {
            let path = resolve_model_path(model, &config)?;
            let _span = tracing::info_span!("lookup", path = %path.display()).entered();

            let model = load(&path)?;
            let Some(vector) = model.vector(&term) else {
                bail!("Term {term:?} not found in {}", path.display());
            };

            let output = TermVector {
                term: &term,
                vector,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }

        cli::Command::Terms { model, limit } => {
            let path = resolve_model_path(model, &config)?;
            let _span = tracing::info_span!("terms", path = %path.display()).entered();

            let model = load(&path)?;
            for entry in model.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{}", entry.term());
            }
            Ok(())
        }
    }
}
