use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuntimeConfig, TableNames};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub event_log_table: String,
    pub ticket_log_table: String,
    pub simulation_table: String,
    pub simulation_results_table: String,
    pub simulation_players_table: String,
    pub console_config_table: String,
    pub retention_days: i64,
    pub sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3420".to_string(),
            api_token: None,
            event_log_table: "event-log".to_string(),
            ticket_log_table: "ticket-log".to_string(),
            simulation_table: "matchmaking-simulations".to_string(),
            simulation_results_table: "simulation-results".to_string(),
            simulation_players_table: "simulation-players".to_string(),
            console_config_table: "console-config".to_string(),
            retention_days: 7,
            sweep_interval_seconds: 300,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MATCHBOARD_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind_addr) = env::var("MATCHBOARD_BIND_ADDR") {
            if !bind_addr.trim().is_empty() {
                self.bind_addr = bind_addr;
            }
        }
        if let Ok(api_token) = env::var("MATCHBOARD_API_TOKEN") {
            self.api_token = Some(api_token);
        }
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retention_days < 1 {
            return Err(anyhow!("retention_days must be at least 1"));
        }
        if self.sweep_interval_seconds == 0 {
            return Err(anyhow!("sweep_interval_seconds must be positive"));
        }
        let tables = [
            &self.event_log_table,
            &self.ticket_log_table,
            &self.simulation_table,
            &self.simulation_results_table,
            &self.simulation_players_table,
            &self.console_config_table,
        ];
        if tables.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("table names must not be empty"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            tables: TableNames {
                event_log: self.event_log_table.clone(),
                ticket_log: self.ticket_log_table.clone(),
                simulations: self.simulation_table.clone(),
                simulation_results: self.simulation_results_table.clone(),
                simulation_players: self.simulation_players_table.clone(),
                console_config: self.console_config_table.clone(),
            },
            retention_days: self.retention_days,
            sweep_interval_seconds: self.sweep_interval_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }
}
