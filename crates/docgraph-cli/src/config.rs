use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use docgraph_core::GraphConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings for the `docgraph` binary, read from TOML.
///
/// ```toml
/// store_path = "/var/lib/docgraph/documents.json"
/// log_filter = "docgraph_core=debug"
///
/// [graph]
/// contract = "dao.hypha"
///
/// [graph.limits]
/// max_groups = 32
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub store_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub graph: GraphConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("docgraph.json"),
            log_filter: "warn".into(),
            graph: GraphConfig::default(),
        }
    }
}

impl CliConfig {
    /// Read a config file. Without a path the defaults are used.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Apply command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(store) = &cli.store {
            self.store_path = store.clone();
        }
        if cli.verbose {
            self.log_filter = "debug".into();
        }
        self
    }
}
