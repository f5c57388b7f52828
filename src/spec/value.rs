// src/spec/value.rs

//! Dynamically shaped input accepted by the scheduler.

use std::collections::BTreeMap;

use crate::exec::{Job, JobHandle};

/// A loosely typed value, as handed over by a caller that builds job tables
/// at runtime (from a config file, a scripting host, etc.).
///
/// Only [`SpecValue::Record`] is accepted as a whole specification; the
/// validator in [`crate::spec::validate`] decides which shapes are accepted
/// as entries.
#[derive(Debug, Clone)]
pub enum SpecValue {
    /// Absent value (`null` / `undefined`).
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Ordered sequence.
    List(Vec<SpecValue>),
    /// Unordered collection.
    Set(Vec<SpecValue>),
    /// Keyed collection whose keys are arbitrary values.
    Map(Vec<(SpecValue, SpecValue)>),
    /// Plain string-keyed mapping, iterated in lexical key order.
    Record(BTreeMap<String, SpecValue>),
    /// Callable job.
    Job(JobHandle),
}

impl SpecValue {
    pub fn job(job: impl Job + 'static) -> Self {
        SpecValue::Job(JobHandle::new(job))
    }

    pub fn record<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SpecValue)>,
    {
        SpecValue::Record(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = SpecValue>) -> Self {
        SpecValue::List(items.into_iter().collect())
    }

    /// A list of strings, e.g. for an `after` field.
    pub fn names<S: AsRef<str>>(names: &[S]) -> Self {
        SpecValue::List(
            names
                .iter()
                .map(|n| SpecValue::String(n.as_ref().to_string()))
                .collect(),
        )
    }

    /// Short name of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SpecValue::Null => "null",
            SpecValue::Bool(_) => "boolean",
            SpecValue::Number(_) => "number",
            SpecValue::String(_) => "string",
            SpecValue::List(_) => "list",
            SpecValue::Set(_) => "set",
            SpecValue::Map(_) => "map",
            SpecValue::Record(_) => "record",
            SpecValue::Job(_) => "job",
        }
    }
}

impl From<JobHandle> for SpecValue {
    fn from(job: JobHandle) -> Self {
        SpecValue::Job(job)
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::String(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        SpecValue::String(s)
    }
}

impl From<toml::Value> for SpecValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => SpecValue::String(s),
            toml::Value::Integer(i) => SpecValue::Number(i as f64),
            toml::Value::Float(f) => SpecValue::Number(f),
            toml::Value::Boolean(b) => SpecValue::Bool(b),
            toml::Value::Datetime(dt) => SpecValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                SpecValue::List(items.into_iter().map(SpecValue::from).collect())
            }
            toml::Value::Table(table) => SpecValue::Record(
                table
                    .into_iter()
                    .map(|(k, v)| (k, SpecValue::from(v)))
                    .collect(),
            ),
        }
    }
}
