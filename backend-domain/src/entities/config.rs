// Runtime configuration handed down from the config layer.

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub tables: TableNames,
    /// Log-style records expire this many days after they are written.
    pub retention_days: i64,
    pub sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct TableNames {
    pub event_log: String,
    pub ticket_log: String,
    pub simulations: String,
    pub simulation_results: String,
    pub simulation_players: String,
    pub console_config: String,
}
