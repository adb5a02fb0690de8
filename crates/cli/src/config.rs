//! Configuration management for the CLI

use anyhow::{Context, Result};
use gpuscope_lib::inventory::KubeInventory;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KubeConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default namespace filter for usage and workload views
    pub default_namespace: Option<String>,
    /// Default utilization bar width
    pub bar_width: Option<usize>,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("gpuscope").join("config.json"))
    }
}

/// Build the cluster inventory collector, honoring an explicit kubeconfig
/// path over the default discovery chain.
pub async fn make_inventory(kubeconfig: Option<&str>) -> Result<KubeInventory> {
    let client = match kubeconfig {
        Some(path) => {
            debug!(path, "Using explicit kubeconfig");
            let kc = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig at {}", path))?;
            let config = KubeConfig::from_custom_kubeconfig(kc, &KubeConfigOptions::default())
                .await
                .context("Failed to interpret kubeconfig")?;
            Client::try_from(config).context("Failed to build Kubernetes client")?
        }
        None => Client::try_default()
            .await
            .context("Failed to connect to the cluster (is a kubeconfig available?)")?,
    };
    Ok(KubeInventory::new(client))
}
