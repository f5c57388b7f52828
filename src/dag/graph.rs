// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::engine::JobName;
use crate::errors::ScheduleError;
use crate::spec::Jobs;

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Direct dependencies, exactly as listed in `after`.
    deps: Vec<JobName>,
    /// Direct dependents, once per occurrence of this job in their `after`.
    dependents: Vec<JobName>,
}

/// In-memory dependency graph keyed by job name.
///
/// Nothing here assumes the graph is acyclic or that every dependency names
/// a known job; the scheduler finds out when it stalls.
#[derive(Debug, Clone)]
pub struct DagGraph {
    nodes: BTreeMap<JobName, DagNode>,
}

impl DagGraph {
    /// Build the graph from normalized job entries.
    pub fn from_jobs(jobs: &Jobs) -> Self {
        let mut nodes: BTreeMap<JobName, DagNode> = jobs
            .iter()
            .map(|(name, entry)| {
                (
                    name.clone(),
                    DagNode {
                        deps: entry.after().to_vec(),
                        dependents: Vec::new(),
                    },
                )
            })
            .collect();

        for (name, entry) in jobs {
            for dep in entry.after() {
                if let Some(dep_node) = nodes.get_mut(dep) {
                    dep_node.dependents.push(name.clone());
                }
            }
        }

        Self { nodes }
    }

    /// All job names, in lexical order.
    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Immediate dependencies of a job (the names in its `after`).
    pub fn dependencies_of(&self, name: &str) -> &[JobName] {
        self.nodes
            .get(name)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a job (jobs that list this one in `after`).
    pub fn dependents_of(&self, name: &str) -> &[JobName] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// `(job, dependency)` pairs where the dependency is not a known job.
    pub fn unknown_dependencies(&self) -> Vec<(&str, &str)> {
        let mut unknown = Vec::new();
        for (name, node) in &self.nodes {
            for dep in &node.deps {
                if !self.nodes.contains_key(dep) {
                    unknown.push((name.as_str(), dep.as_str()));
                }
            }
        }
        unknown
    }

    /// Dependency cycles among the given jobs.
    ///
    /// Returns strongly connected groups with more than one member, plus jobs
    /// that depend on themselves. Each group is sorted.
    pub fn cycles_among(&self, names: &[JobName]) -> Vec<Vec<JobName>> {
        let subset: BTreeSet<&str> = names.iter().map(|n| n.as_str()).collect();

        // Edge direction: dep -> job.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for &name in &subset {
            graph.add_node(name);
        }
        for &name in &subset {
            for dep in self.dependencies_of(name) {
                if subset.contains(dep.as_str()) {
                    graph.add_edge(dep.as_str(), name, ());
                }
            }
        }

        let mut cycles: Vec<Vec<JobName>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut group: Vec<JobName> = scc.into_iter().map(str::to_string).collect();
                group.sort();
                group
            })
            .collect();

        cycles.sort();
        cycles
    }

    /// The target job plus everything it transitively depends on.
    ///
    /// Dependencies on unknown names are kept out of the set; they stay
    /// unsatisfiable in the selected subgraph as well.
    pub fn required_for(&self, target: &str) -> Result<BTreeSet<JobName>, ScheduleError> {
        if !self.contains(target) {
            return Err(ScheduleError::UnknownJob(target.to_string()));
        }

        let mut needed: BTreeSet<JobName> = BTreeSet::new();
        let mut stack: Vec<&str> = vec![target];

        while let Some(name) = stack.pop() {
            if !self.contains(name) || !needed.insert(name.to_string()) {
                continue;
            }
            stack.extend(self.dependencies_of(name).iter().map(|d| d.as_str()));
        }

        Ok(needed)
    }
}
