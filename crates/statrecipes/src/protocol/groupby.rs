//! Group-wise application of a per-group function.
//!
//! ## Purpose
//!
//! This module splits a frame by the values of its grouping columns, calls a
//! function on each group's rows and stacks the results, tagging each block
//! with its group key.
//!
//! ## Design notes
//!
//! * **Order**: Groups appear in order of first appearance.
//! * **Absent variables**: Grouping variables missing from the frame are
//!   ignored; with none present the call is a single ungrouped call.
//! * **Parallel**: With the `parallel` feature, groups can be processed on
//!   the rayon pool; results keep the sequential order.
//!
//! ## Invariants
//!
//! * Key columns are constant within each group's block of rows.
//! * An ungrouped call passes the input frame through unchanged.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::primitives::errors::StatError;
use crate::primitives::frame::{Column, Frame, KeyValue};

// ============================================================================
// Group Key
// ============================================================================

/// Values of the grouping variables identifying one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupKey {
    entries: Vec<(String, KeyValue)>,
}

impl GroupKey {
    /// `(variable, value)` pairs in grouping order.
    pub fn entries(&self) -> &[(String, KeyValue)] {
        &self.entries
    }

    /// Value of one grouping variable.
    pub fn get(&self, var: &str) -> Option<&KeyValue> {
        self.entries.iter().find(|(v, _)| v == var).map(|(_, k)| k)
    }

    /// Check if this is the key of an ungrouped call.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.entries.is_empty() {
            return f.write_str("<all>");
        }
        for (i, (var, val)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{var}={val}")?;
        }
        Ok(())
    }
}

/// Rows of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group identity.
    pub key: GroupKey,

    /// Row indices into the source frame, in frame order.
    pub rows: Vec<usize>,
}

// ============================================================================
// GroupBy
// ============================================================================

/// Ordered grouping variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBy {
    order: Vec<String>,
    parallel: bool,
}

impl GroupBy {
    /// Group by the given variables, in order.
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
            parallel: false,
        }
    }

    /// No grouping: every call sees the whole frame.
    pub fn none() -> Self {
        Self::default()
    }

    /// Process groups on the rayon pool (requires feature `parallel`).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Configured grouping variables.
    pub fn variables(&self) -> &[String] {
        &self.order
    }

    /// Split `frame` into groups in first-appearance order.
    pub fn groups(&self, frame: &Frame) -> Vec<Group> {
        let vars: Vec<(&str, &Column)> = self
            .order
            .iter()
            .filter_map(|v| frame.column(v).map(|c| (v.as_str(), c)))
            .collect();

        if vars.is_empty() {
            return vec![Group {
                key: GroupKey::default(),
                rows: (0..frame.n_rows()).collect(),
            }];
        }

        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();

        for row in 0..frame.n_rows() {
            let key = GroupKey {
                entries: vars
                    .iter()
                    .map(|(name, col)| (name.to_string(), col.key_at(row)))
                    .collect(),
            };

            match index.get(&key) {
                Some(&g) => groups[g].rows.push(row),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }

        groups
    }

    // ========================================================================
    // Application
    // ========================================================================

    /// Apply `f` to each group and stack the tagged results.
    ///
    /// The first failing group (in group order) aborts the call; its error is
    /// wrapped with the group key.
    pub fn apply<F>(&self, frame: &Frame, f: F) -> Result<Frame, StatError>
    where
        F: Fn(&Frame) -> Result<Frame, StatError> + Sync,
    {
        let results = self.apply_each(frame, f);
        let mut blocks = Vec::with_capacity(results.len());

        for (key, result) in results {
            match result {
                Ok(block) => blocks.push(block),
                Err(err) if key.is_empty() => return Err(err),
                Err(err) => return Err(err.in_group(key.to_string())),
            }
        }

        Frame::concat(&blocks)
    }

    /// Apply `f` to each group and return every group's own result.
    ///
    /// Successful blocks already carry the key columns.
    pub fn apply_each<F>(&self, frame: &Frame, f: F) -> Vec<(GroupKey, Result<Frame, StatError>)>
    where
        F: Fn(&Frame) -> Result<Frame, StatError> + Sync,
    {
        let groups = self.groups(frame);

        let run = |group: &Group| -> (GroupKey, Result<Frame, StatError>) {
            if group.key.is_empty() {
                return (group.key.clone(), f(frame));
            }
            let part = frame.take_rows(&group.rows);
            let result = f(&part).and_then(|block| tag(block, &group.key));
            (group.key.clone(), result)
        };

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return groups.par_iter().map(run).collect();
            }
        }

        groups.iter().map(run).collect()
    }
}

// Prefix `block` with constant key columns (unless it already has them).
fn tag(block: Frame, key: &GroupKey) -> Result<Frame, StatError> {
    let n = block.n_rows();
    let mut out = Frame::new();

    for (var, value) in key.entries() {
        if !block.has_column(var) {
            out.insert(var.clone(), Column::repeat(value, n))?;
        }
    }
    for name in block.names() {
        if let Some(col) = block.column(name) {
            out.insert(name.clone(), col.clone())?;
        }
    }

    Ok(out)
}
