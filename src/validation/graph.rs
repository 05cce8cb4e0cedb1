// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::estimators::dataset::{Dataset, VariableSet};

/// Reference causal structure: a directed graph over variable names.
///
/// Only used to derive the expected Markov blanket of a target in self-test
/// scenarios; the engine never learns structure.
#[derive(Debug, Clone, Default)]
pub struct CausalGraph {
    parents: BTreeMap<String, BTreeSet<String>>,
    children: BTreeMap<String, BTreeSet<String>>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the given `(parent, child)` edges.
    pub fn from_edges<S: AsRef<str>>(edges: &[(S, S)]) -> Self {
        let mut graph = Self::new();
        for (parent, child) in edges {
            graph.add_edge(parent.as_ref(), child.as_ref());
        }
        graph
    }

    /// Add an isolated node (no-op if present).
    pub fn add_node(&mut self, name: &str) {
        self.parents.entry(name.to_owned()).or_default();
        self.children.entry(name.to_owned()).or_default();
    }

    pub fn add_edge(&mut self, parent: &str, child: &str) {
        self.add_node(parent);
        self.add_node(child);
        self.children
            .entry(parent.to_owned())
            .or_default()
            .insert(child.to_owned());
        self.parents
            .entry(child.to_owned())
            .or_default()
            .insert(parent.to_owned());
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.parents.keys().map(String::as_str)
    }

    pub fn parents(&self, node: &str) -> impl Iterator<Item = &str> {
        self.parents.get(node).into_iter().flatten().map(String::as_str)
    }

    pub fn children(&self, node: &str) -> impl Iterator<Item = &str> {
        self.children.get(node).into_iter().flatten().map(String::as_str)
    }

    /// Parents, children and the children's other parents of `target`.
    pub fn markov_blanket(&self, target: &str) -> BTreeSet<String> {
        let mut blanket: BTreeSet<String> = self.parents(target).map(str::to_owned).collect();
        for child in self.children(target) {
            blanket.insert(child.to_owned());
            blanket.extend(self.parents(child).map(str::to_owned));
        }
        blanket.remove(target);
        blanket
    }

    /// [`markov_blanket`](Self::markov_blanket) resolved against a dataset's columns.
    pub fn markov_blanket_in(&self, dataset: &Dataset, target: &str) -> Result<VariableSet> {
        let names: Vec<String> = self.markov_blanket(target).into_iter().collect();
        dataset.var_set(&names)
    }
}
