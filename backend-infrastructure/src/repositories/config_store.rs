// Console configuration aggregate, stored like any other aggregate.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use backend_domain::ports::{AggregateStore, ConfigRepository, ItemKey};
use backend_domain::ConsoleConfig;

pub const CONSOLE_CONFIG_NAME: &str = "mainConfig";

pub struct StoreConfigRepository {
    store: Arc<dyn AggregateStore>,
    table: String,
}

impl StoreConfigRepository {
    pub fn new(store: Arc<dyn AggregateStore>, table: String) -> Self {
        Self { store, table }
    }
}

#[async_trait]
impl ConfigRepository for StoreConfigRepository {
    async fn get_console_config(&self) -> Result<Option<ConsoleConfig>> {
        let item = self
            .store
            .get_item(
                &self.table,
                &ItemKey::new("configName", CONSOLE_CONFIG_NAME),
            )
            .await?;
        match item {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }

    async fn put_console_config(&self, config: &ConsoleConfig) -> Result<()> {
        let mut item = serde_json::to_value(config)?;
        if let Value::Object(map) = &mut item {
            // Pin the aggregate to its well-known name regardless of input.
            map.insert("configName".to_string(), json!(CONSOLE_CONFIG_NAME));
        }
        self.store.put_item(&self.table, item).await
    }
}
