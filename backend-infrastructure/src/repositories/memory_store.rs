// In-process implementation of the durable store port.
// Mirrors the semantics the aggregators depend on: upsert-on-update,
// conditional puts, atomic numeric adds with missing-attribute-as-zero,
// string-set unions. Every mutation happens under one write lock, so each
// update is atomic with respect to concurrent handlers.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use backend_domain::ports::{AggregateStore, AttrValue, ItemKey, Update};
use backend_domain::TableNames;

struct TableData {
    key_attr: String,
    items: HashMap<String, Map<String, Value>>,
}

pub struct MemoryStore {
    tables: RwLock<HashMap<String, TableData>>,
}

impl MemoryStore {
    /// Registers the schema for every table the aggregators use.
    pub fn new(tables: &TableNames) -> Self {
        let schema = [
            (&tables.event_log, "time-id"),
            (&tables.ticket_log, "ticketId"),
            (&tables.simulations, "simulationId"),
            (&tables.simulation_results, "resultId"),
            (&tables.simulation_players, "profileId"),
            (&tables.console_config, "configName"),
        ];
        let mut data = HashMap::new();
        for (name, key_attr) in schema {
            data.insert(
                name.clone(),
                TableData {
                    key_attr: key_attr.to_string(),
                    items: HashMap::new(),
                },
            );
        }
        Self {
            tables: RwLock::new(data),
        }
    }
}

fn item_key(table: &TableData, item: &Value) -> Result<(String, Map<String, Value>)> {
    let Value::Object(map) = item else {
        bail!("item must be a JSON object");
    };
    let key = map
        .get(&table.key_attr)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("item missing key attribute '{}'", table.key_attr))?;
    Ok((key.to_string(), map.clone()))
}

fn attr_to_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::S(s) => Value::from(s.clone()),
        AttrValue::N(n) => Value::from(*n),
        AttrValue::Ss(set) => Value::from(set.clone()),
    }
}

fn apply_update(item: &mut Map<String, Value>, update: &Update) -> Result<()> {
    for (name, value) in &update.sets {
        item.insert(name.clone(), attr_to_json(value));
    }
    for (name, value) in &update.adds {
        match value {
            AttrValue::N(amount) => {
                let current = match item.get(name) {
                    None | Some(Value::Null) => 0,
                    Some(Value::Number(n)) => n
                        .as_i64()
                        .ok_or_else(|| anyhow!("attribute '{name}' is not an integer"))?,
                    Some(_) => bail!("attribute '{name}' is not a number, cannot add"),
                };
                item.insert(name.clone(), Value::from(current + amount));
            }
            AttrValue::Ss(members) => {
                let mut merged: Vec<String> = match item.get(name) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(existing)) => existing
                        .iter()
                        .map(|v| {
                            v.as_str()
                                .map(str::to_string)
                                .ok_or_else(|| anyhow!("attribute '{name}' is not a string set"))
                        })
                        .collect::<Result<_>>()?,
                    Some(_) => bail!("attribute '{name}' is not a string set, cannot add"),
                };
                for member in members {
                    if !merged.contains(member) {
                        merged.push(member.clone());
                    }
                }
                merged.sort();
                item.insert(name.clone(), Value::from(merged));
            }
            AttrValue::S(_) => bail!("plain strings cannot be added, only set or unioned"),
        }
    }
    Ok(())
}

#[async_trait]
impl AggregateStore for MemoryStore {
    async fn put_item(&self, table: &str, item: Value) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        let (key, map) = item_key(table, &item)?;
        table.items.insert(key, map);
        Ok(())
    }

    async fn put_item_if_absent(&self, table: &str, item: Value) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        let (key, map) = item_key(table, &item)?;
        if table.items.contains_key(&key) {
            return Ok(false);
        }
        table.items.insert(key, map);
        Ok(true)
    }

    async fn update_item(&self, table: &str, key: ItemKey, update: Update) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        if key.attr != table.key_attr {
            bail!(
                "key attribute '{}' does not match table key '{}'",
                key.attr,
                table.key_attr
            );
        }
        let item = table.items.entry(key.value.clone()).or_insert_with(|| {
            let mut item = Map::new();
            item.insert(key.attr.clone(), Value::from(key.value.clone()));
            item
        });
        apply_update(item, &update)
    }

    async fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<Value>> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        Ok(table.items.get(&key.value).cloned().map(Value::Object))
    }

    async fn query_by_field(&self, table: &str, field: &str, value: &str) -> Result<Vec<Value>> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        let mut matches: Vec<(String, Value)> = table
            .items
            .iter()
            .filter(|(_, item)| item.get(field).and_then(Value::as_str) == Some(value))
            .map(|(key, item)| (key.clone(), Value::Object(item.clone())))
            .collect();
        matches.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(matches.into_iter().map(|(_, item)| item).collect())
    }

    async fn purge_expired(&self, table: &str, now: i64) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| anyhow!("unknown table '{table}'"))?;
        let before = table.items.len();
        table.items.retain(|_, item| {
            match item.get("expires").and_then(Value::as_i64) {
                Some(expires) => expires > now,
                None => true,
            }
        });
        Ok(before - table.items.len())
    }
}
