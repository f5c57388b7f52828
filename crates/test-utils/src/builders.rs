#![allow(dead_code)]

use std::collections::BTreeMap;

use rundag::exec::JobHandle;
use rundag::spec::{AFTER_KEY, JOB_KEY, SpecValue};

/// Builder for job specifications to simplify test setup.
pub struct SpecBuilder {
    entries: BTreeMap<String, SpecValue>,
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// A bare job with no dependencies.
    pub fn bare(mut self, name: &str, job: JobHandle) -> Self {
        self.entries.insert(name.to_string(), SpecValue::Job(job));
        self
    }

    /// A detailed `{ after, job }` entry.
    pub fn after(mut self, name: &str, deps: &[&str], job: JobHandle) -> Self {
        self.entries
            .insert(name.to_string(), detailed(SpecValue::names(deps), job));
        self
    }

    /// Any value at all, for shape-checking tests.
    pub fn raw(mut self, name: &str, value: SpecValue) -> Self {
        self.entries.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> SpecValue {
        SpecValue::Record(self.entries)
    }
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `{ after: <after>, job: <job> }` with an arbitrary `after` value.
pub fn detailed(after: SpecValue, job: JobHandle) -> SpecValue {
    SpecValue::record([(AFTER_KEY, after), (JOB_KEY, SpecValue::Job(job))])
}
