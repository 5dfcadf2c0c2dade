//! Command-line / environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::recommend::generator::DEFAULT_BASE_URL;
use crate::recommend::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationSettings};

pub const DEFAULT_DATA_PATH: &str = "data/enriched_with_clusters_deployment.csv";

#[derive(Debug, Clone, Parser)]
#[command(name = "ride-recommender", version, about = "Happy to recommend...")]
pub struct Config {
    /// Enriched review table (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Credential for the text-generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// Prime each request with the built-in example reviews
    #[arg(long)]
    pub few_shot: bool,
}

impl Config {
    /// The credential, or the message shown when it is absent.
    pub fn require_api_key(&self) -> Result<&str, String> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err("Set OPENAI_API_KEY environment variable".to_string()),
        }
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            few_shot: self.few_shot,
        }
    }
}
