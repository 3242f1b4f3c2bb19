use async_trait::async_trait;
use serde_json::Value;

use crate::entities::ConsoleConfig;

/// Attribute value in a store update expression. Covers the primitives the
/// aggregates rely on: strings, numbers, string sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    S(String),
    N(i64),
    Ss(Vec<String>),
}

/// Primary key of an item, `(attribute name, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub attr: String,
    pub value: String,
}

impl ItemKey {
    pub fn new(attr: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            value: value.into(),
        }
    }
}

/// Conditional multi-field update applied atomically to one item.
/// `sets` overwrite fields; `adds` are commutative: numeric adds treat a
/// missing attribute as zero, string-set adds are unions.
#[derive(Debug, Clone, Default)]
pub struct Update {
    pub sets: Vec<(String, AttrValue)>,
    pub adds: Vec<(String, AttrValue)>,
}

impl Update {
    pub fn set(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.sets.push((name.into(), value));
        self
    }

    pub fn add(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.adds.push((name.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.adds.is_empty()
    }
}

/// Durable key-value store used by every aggregator. Events may be processed
/// by independent concurrent units, so all cross-invocation coordination
/// goes through these atomic primitives.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Unconditional write; overwrites an existing item with the same key.
    async fn put_item(&self, table: &str, item: Value) -> anyhow::Result<()>;

    /// Conditional write; returns `false` without touching the store when an
    /// item with the same key already exists.
    async fn put_item_if_absent(&self, table: &str, item: Value) -> anyhow::Result<bool>;

    /// Atomic conditional update; creates the item when absent.
    async fn update_item(&self, table: &str, key: ItemKey, update: Update) -> anyhow::Result<()>;

    async fn get_item(&self, table: &str, key: &ItemKey) -> anyhow::Result<Option<Value>>;

    /// All items whose top-level string field equals `value`.
    async fn query_by_field(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> anyhow::Result<Vec<Value>>;

    /// Drops items whose `expires` stamp is at or before `now`; returns the
    /// number removed.
    async fn purge_expired(&self, table: &str, now: i64) -> anyhow::Result<usize>;
}

/// Read/write access to the console configuration aggregate.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn get_console_config(&self) -> anyhow::Result<Option<ConsoleConfig>>;
    async fn put_console_config(&self, config: &ConsoleConfig) -> anyhow::Result<()>;
}
