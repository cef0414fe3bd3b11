//! Label hierarchy: which labels imply which other labels.
//!
//! A hierarchy is built once from a `label -> [implied labels]` mapping and
//! is read-only afterwards. Building it:
//! - validates every entry (no empty or whitespace-bearing labels, no
//!   duplicate keys)
//! - rejects cycles, naming the labels involved
//! - precomputes the transitive closure of every label
//!
//! Expansion is then a lookup per input label, so it is deterministic and
//! cheap at decision time.
//!
//! # Example
//!
//! ```
//! use warrant_core::LabelHierarchy;
//!
//! let hierarchy = LabelHierarchy::new([
//!     ("ROLE_ADMIN", vec!["ROLE_MODERATOR"]),
//!     ("ROLE_MODERATOR", vec!["ROLE_USER"]),
//! ])
//! .unwrap();
//!
//! let expanded = hierarchy.expand(["ROLE_ADMIN"]);
//! assert!(expanded.contains("ROLE_USER"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::error::{Error, Result};

/// Immutable, validated label implication graph with its closure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelHierarchy {
    /// label -> every label it transitively implies (excluding itself)
    closure: BTreeMap<String, BTreeSet<String>>,
    implications: usize,
}

impl LabelHierarchy {
    /// A hierarchy with no implications; `expand` is the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate a hierarchy from `(label, implied labels)` entries.
    ///
    /// Fails with [`Error::MalformedHierarchy`] on bad label names or
    /// duplicate entries and with [`Error::HierarchyCycle`] when the
    /// implication graph is cyclic (including a label implying itself).
    pub fn new<I, K, V, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();
        let mut seen_keys: BTreeSet<String> = BTreeSet::new();
        let mut implications = 0;

        for (label, implied) in entries {
            let label = label.into();
            validate_label(&label, &label)?;
            if !seen_keys.insert(label.clone()) {
                return Err(Error::malformed(label, "duplicate hierarchy entry"));
            }

            let from = node_for(&mut graph, &mut indices, &label);
            for target in implied {
                let target = target.into();
                validate_label(&label, &target)?;
                let to = node_for(&mut graph, &mut indices, &target);
                graph.update_edge(from, to, ());
                implications += 1;
            }
        }

        if toposort(&graph, None).is_err() {
            return Err(cycle_error(&graph));
        }

        let mut closure = BTreeMap::new();
        for start in graph.node_indices() {
            let mut reachable = BTreeSet::new();
            let mut dfs = Dfs::new(&graph, start);
            while let Some(next) = dfs.next(&graph) {
                if next != start {
                    reachable.insert(graph[next].clone());
                }
            }
            closure.insert(graph[start].clone(), reachable);
        }

        log::info!(
            "Label hierarchy built: {} labels, {} implications",
            closure.len(),
            implications
        );

        Ok(Self {
            closure,
            implications,
        })
    }

    /// Expand a label set into itself plus everything it implies.
    ///
    /// Labels the hierarchy does not know about pass through unchanged.
    pub fn expand<I, S>(&self, labels: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded = BTreeSet::new();
        for label in labels {
            let label = label.as_ref();
            if let Some(implied) = self.closure.get(label) {
                expanded.extend(implied.iter().cloned());
            }
            expanded.insert(label.to_string());
        }
        expanded
    }

    /// Whether any of `labels`, or anything they imply, equals `target`.
    ///
    /// Same answer as `expand(labels).contains(target)` without building the
    /// expanded set.
    pub fn reaches<I, S>(&self, labels: I, target: &str) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().any(|label| {
            let label = label.as_ref();
            label == target || self.implies(label, target)
        })
    }

    /// Whether `label` strictly implies `other`.
    pub fn implies(&self, label: &str, other: &str) -> bool {
        self.closure
            .get(label)
            .is_some_and(|implied| implied.contains(other))
    }

    /// Everything `label` implies, or `None` if the hierarchy never mentions it.
    pub fn reachable(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.closure.get(label)
    }

    /// Every label the hierarchy mentions, as a key or as an implied label.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.closure.keys().map(String::as_str)
    }

    /// Number of distinct labels mentioned.
    pub fn len(&self) -> usize {
        self.closure.len()
    }

    /// Whether the hierarchy mentions no labels at all.
    pub fn is_empty(&self) -> bool {
        self.closure.is_empty()
    }

    /// Number of declared (direct) implications.
    pub fn implication_count(&self) -> usize {
        self.implications
    }
}

fn node_for(
    graph: &mut DiGraph<String, ()>,
    indices: &mut HashMap<String, NodeIndex>,
    label: &str,
) -> NodeIndex {
    if let Some(idx) = indices.get(label) {
        return *idx;
    }
    let idx = graph.add_node(label.to_string());
    indices.insert(label.to_string(), idx);
    idx
}

fn validate_label(entry: &str, label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(Error::malformed(entry, "label is empty"));
    }
    if label.chars().any(char::is_whitespace) {
        return Err(Error::malformed(
            entry,
            format!("label '{label}' contains whitespace"),
        ));
    }
    Ok(())
}

/// Name the labels of the first cyclic strongly connected component.
fn cycle_error(graph: &DiGraph<String, ()>) -> Error {
    for component in kosaraju_scc(graph) {
        let cyclic = component.len() > 1
            || component
                .first()
                .is_some_and(|n| graph.contains_edge(*n, *n));
        if cyclic {
            return Error::hierarchy_cycle(component.iter().map(|n| graph[*n].clone()));
        }
    }
    Error::config("label hierarchy contains a cycle")
}
