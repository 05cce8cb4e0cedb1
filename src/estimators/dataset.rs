// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{InfoSubsetError, Result};

/// Column index of a variable within a [`Schema`].
pub type VarId = usize;

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a dataset. Every constructed or resampled dataset gets a fresh
/// id; clones share the id of their source since they hold the same samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(u64);

impl DatasetId {
    fn fresh() -> Self {
        Self(NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Column names, their lookup index and per-column alphabet sizes.
///
/// Shared (via `Arc`) between a dataset and all of its resamples.
#[derive(Debug)]
pub struct Schema {
    names: Vec<String>,
    index: HashMap<String, VarId>,
    cardinalities: Vec<usize>,
}

impl Schema {
    fn new(names: Vec<String>, cardinalities: Vec<usize>) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(InfoSubsetError::DuplicateVariable(name.clone()));
            }
        }
        Ok(Self {
            names,
            index,
            cardinalities,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<VarId> {
        self.index.get(name).copied()
    }

    /// Number of distinct categories observed in the column when the dataset
    /// was built. Codes of that column lie in `0..cardinality`.
    pub fn cardinality(&self, var: VarId) -> usize {
        self.cardinalities[var]
    }
}

/// Immutable table of categorical samples.
///
/// Values are stored as compact per-column codes (first-occurrence order) in a
/// samples x variables matrix. Any `Hash + Eq` value type can be ingested;
/// `Option<V>` turns missing values into an ordinary category.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    schema: Arc<Schema>,
    codes: Array2<i32>,
}

impl Dataset {
    /// Build a dataset from row-major values.
    ///
    /// ```rust
    /// use infosubset::estimators::dataset::Dataset;
    ///
    /// let ds = Dataset::from_rows(&["a", "b"], vec![vec!["x", "p"], vec!["y", "p"]]).unwrap();
    /// assert_eq!(ds.n_samples(), 2);
    /// assert_eq!(ds.schema().cardinality(ds.var("a").unwrap()), 2);
    /// ```
    pub fn from_rows<S, V, I>(names: &[S], rows: I) -> Result<Self>
    where
        S: AsRef<str>,
        V: Hash + Eq,
        I: IntoIterator<Item = Vec<V>>,
    {
        let k = names.len();
        let mut encoders: Vec<HashMap<V, i32>> = (0..k).map(|_| HashMap::new()).collect();
        let mut flat: Vec<i32> = Vec::new();
        let mut n = 0usize;
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != k {
                return Err(InfoSubsetError::RaggedRow {
                    row: row_idx,
                    expected: k,
                    found: row.len(),
                });
            }
            for (col, value) in row.into_iter().enumerate() {
                flat.push(encode(&mut encoders[col], value));
            }
            n += 1;
        }
        let cardinalities = encoders.iter().map(HashMap::len).collect();
        let names = names.iter().map(|s| s.as_ref().to_owned()).collect();
        let codes = Array2::from_shape_vec((n, k), flat)?;
        Self::assemble(names, cardinalities, codes)
    }

    /// Build a dataset from named columns of equal length.
    pub fn from_columns<S, V>(columns: Vec<(S, Vec<V>)>) -> Result<Self>
    where
        S: Into<String>,
        V: Hash + Eq,
    {
        let k = columns.len();
        let n = columns.first().map_or(0, |(_, c)| c.len());
        let mut names = Vec::with_capacity(k);
        let mut cardinalities = Vec::with_capacity(k);
        let mut codes = Array2::<i32>::zeros((n, k));
        for (col, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if values.len() != n {
                return Err(InfoSubsetError::ColumnLength {
                    name,
                    expected: n,
                    found: values.len(),
                });
            }
            let mut encoder = HashMap::new();
            for (row, value) in values.into_iter().enumerate() {
                codes[[row, col]] = encode(&mut encoder, value);
            }
            names.push(name);
            cardinalities.push(encoder.len());
        }
        Self::assemble(names, cardinalities, codes)
    }

    /// Build a dataset from an integer matrix (samples x variables). Columns are
    /// re-encoded to compact codes, so any integer labelling is accepted.
    pub fn from_codes<S: AsRef<str>>(names: &[S], data: Array2<i32>) -> Result<Self> {
        if data.ncols() != names.len() {
            return Err(InfoSubsetError::ShapeMismatch {
                expected: names.len(),
                found: data.ncols(),
            });
        }
        let mut codes = Array2::<i32>::zeros(data.raw_dim());
        let mut cardinalities = Vec::with_capacity(names.len());
        for (col, column) in data.axis_iter(Axis(1)).enumerate() {
            let mut encoder = HashMap::new();
            for (row, &value) in column.iter().enumerate() {
                codes[[row, col]] = encode(&mut encoder, value);
            }
            cardinalities.push(encoder.len());
        }
        let names = names.iter().map(|s| s.as_ref().to_owned()).collect();
        Self::assemble(names, cardinalities, codes)
    }

    fn assemble(names: Vec<String>, cardinalities: Vec<usize>, codes: Array2<i32>) -> Result<Self> {
        let schema = Schema::new(names, cardinalities)?;
        Ok(Self {
            id: DatasetId::fresh(),
            schema: Arc::new(schema),
            codes,
        })
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn n_samples(&self) -> usize {
        self.codes.nrows()
    }

    pub fn n_variables(&self) -> usize {
        self.codes.ncols()
    }

    /// View of the code matrix (samples x variables).
    pub fn codes(&self) -> ArrayView2<'_, i32> {
        self.codes.view()
    }

    pub fn row(&self, sample: usize) -> ArrayView1<'_, i32> {
        self.codes.row(sample)
    }

    /// Resolve a column name.
    pub fn var(&self, name: &str) -> Result<VarId> {
        self.schema
            .index_of(name)
            .ok_or_else(|| InfoSubsetError::UnknownVariable(name.to_owned()))
    }

    /// Resolve several column names, keeping their order.
    pub fn vars<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<VarId>> {
        names.iter().map(|n| self.var(n.as_ref())).collect()
    }

    /// Resolve several column names into a canonical set.
    pub fn var_set<S: AsRef<str>>(&self, names: &[S]) -> Result<VariableSet> {
        Ok(self.vars(names)?.into_iter().collect())
    }

    pub fn name(&self, var: VarId) -> &str {
        &self.schema.names[var]
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VarId> + '_ {
        0..self.n_variables()
    }

    /// Render a set as a sorted list of names, or `emptyset`.
    pub fn format_set(&self, set: &VariableSet) -> String {
        if set.is_empty() {
            return "emptyset".to_owned();
        }
        let mut names: Vec<&str> = set.iter().map(|v| self.name(v)).collect();
        names.sort_unstable();
        format!("[{}]", names.join(", "))
    }

    /// New dataset made of the given rows, in order. Panics on an out-of-range
    /// index, like ndarray indexing.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            id: DatasetId::fresh(),
            schema: Arc::clone(&self.schema),
            codes: self.codes.select(Axis(0), indices),
        }
    }

    /// Draw `n_samples` rows with replacement.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let n = self.n_samples();
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.select_rows(&indices)
    }
}

fn encode<V: Hash + Eq>(encoder: &mut HashMap<V, i32>, value: V) -> i32 {
    let next = encoder.len() as i32;
    *encoder.entry(value).or_insert(next)
}

/// Unordered set of variables in canonical (sorted, deduplicated) form, so that
/// sets equal under reordering compare and hash equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableSet {
    ids: Vec<VarId>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(var: VarId) -> Self {
        Self { ids: vec![var] }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.ids.binary_search(&var).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = VarId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[VarId] {
        &self.ids
    }

    /// Returns `true` if the variable was not already present.
    pub fn insert(&mut self, var: VarId) -> bool {
        match self.ids.binary_search(&var) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, var);
                true
            }
        }
    }

    /// Returns `true` if the variable was present.
    pub fn remove(&mut self, var: VarId) -> bool {
        match self.ids.binary_search(&var) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn with(&self, var: VarId) -> Self {
        let mut out = self.clone();
        out.insert(var);
        out
    }

    pub fn without(&self, var: VarId) -> Self {
        let mut out = self.clone();
        out.remove(var);
        out
    }

    pub fn union(&self, other: &VariableSet) -> Self {
        self.iter().chain(other.iter()).collect()
    }

    pub fn is_subset(&self, other: &VariableSet) -> bool {
        self.iter().all(|v| other.contains(v))
    }
}

impl FromIterator<VarId> for VariableSet {
    fn from_iter<I: IntoIterator<Item = VarId>>(iter: I) -> Self {
        let mut ids: Vec<VarId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

impl From<&[VarId]> for VariableSet {
    fn from(ids: &[VarId]) -> Self {
        ids.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = VarId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, VarId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
