//! Command-line argument parsing for askdb.

use clap::Parser;
use std::path::PathBuf;

/// Ask a MongoDB collection questions in plain English via a local LLM.
#[derive(Parser, Debug)]
#[command(name = "askdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSV file to load into the collection (skipped if already populated)
    #[arg(short = 'i', long, value_name = "PATH", default_value = "sample_data.csv")]
    pub input: PathBuf,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use (overrides config): ollama or mock
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Ask a single question instead of the built-in example questions
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub question: Option<String>,

    /// Directory for the query log and result CSV files
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns the questions to process: the ad-hoc question if one was
    /// given, otherwise the built-in example list.
    pub fn questions(&self) -> Vec<String> {
        match &self.question {
            Some(q) => vec![q.clone()],
            None => crate::pipeline::default_questions(),
        }
    }
}
