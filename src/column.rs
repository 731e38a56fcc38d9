//! Column-level application of metrics and lookups
//!
//! Host tables expose columns as slices of optional cells. The extension
//! traits here make every metric and lookup callable on such slices,
//! row by row, with output order matching input order. Large columns are
//! split across the rayon pool.

use crate::lookup::{CategoricalLookup, ScalarLookup};
use crate::metric::MetricError;
use crate::scalar::Scalar;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Errors raised while scoring whole columns
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// The two columns have different row counts
    #[error("Column length mismatch: left has {left} rows, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A row held a value the metric cannot take
    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: MetricError,
    },
}

/// Score two string columns pairwise.
///
/// Absent cells produce absent scores.
pub fn score_columns<S>(
    scorer: &Scorer,
    left: &[Option<S>],
    right: &[Option<S>],
) -> Result<Vec<Option<f64>>, ColumnError>
where
    S: AsRef<str> + Sync,
{
    check_lengths(left.len(), right.len())?;
    let parallel = left.len() >= scorer.config().parallel_threshold;
    tracing::debug!(
        metric = %scorer.metric(),
        rows = left.len(),
        parallel,
        "scoring string columns"
    );

    let score = |(a, b): (&Option<S>, &Option<S>)| {
        scorer.score(a.as_ref().map(AsRef::as_ref), b.as_ref().map(AsRef::as_ref))
    };
    let scores = if parallel {
        left.par_iter().zip(right.par_iter()).map(score).collect()
    } else {
        left.iter().zip(right.iter()).map(score).collect()
    };
    Ok(scores)
}

/// Score two untyped columns pairwise.
///
/// Fails if any row holds a non-string, non-null cell.
pub fn score_scalar_columns(
    scorer: &Scorer,
    left: &[Scalar],
    right: &[Scalar],
) -> Result<Vec<Option<f64>>, ColumnError> {
    check_lengths(left.len(), right.len())?;
    let parallel = left.len() >= scorer.config().parallel_threshold;
    tracing::debug!(
        metric = %scorer.metric(),
        rows = left.len(),
        parallel,
        "scoring scalar columns"
    );

    let score = |(row, (a, b)): (usize, (&Scalar, &Scalar))| {
        scorer
            .score_scalars(a, b)
            .map_err(|source| ColumnError::Row { row, source })
    };
    if parallel {
        left.par_iter().zip(right.par_iter()).enumerate().map(score).collect()
    } else {
        left.iter().zip(right.iter()).enumerate().map(score).collect()
    }
}

fn check_lengths(left: usize, right: usize) -> Result<(), ColumnError> {
    if left == right {
        Ok(())
    } else {
        Err(ColumnError::LengthMismatch { left, right })
    }
}

/// Similarity metrics as column methods.
pub trait SimilarityColumnExt {
    /// Pairwise scores against `other`, row by row.
    fn similarity_with(&self, other: &Self, scorer: &Scorer)
        -> Result<Vec<Option<f64>>, ColumnError>;
}

impl<S: AsRef<str> + Sync> SimilarityColumnExt for [Option<S>] {
    fn similarity_with(
        &self,
        other: &Self,
        scorer: &Scorer,
    ) -> Result<Vec<Option<f64>>, ColumnError> {
        score_columns(scorer, self, other)
    }
}

impl SimilarityColumnExt for [Scalar] {
    fn similarity_with(
        &self,
        other: &Self,
        scorer: &Scorer,
    ) -> Result<Vec<Option<f64>>, ColumnError> {
        score_scalar_columns(scorer, self, other)
    }
}

/// Categorical lookups as column methods.
pub trait LookupColumnExt<K, V> {
    /// Replace every cell through `lookup`; absent cells get the default.
    ///
    /// Columns of at least `parallel_threshold` rows are mapped on the rayon
    /// pool.
    fn map_lookup(&self, lookup: &CategoricalLookup<K, V>, parallel_threshold: usize) -> Vec<V>;
}

impl<K, V, Q> LookupColumnExt<K, V> for [Option<Q>]
where
    K: Eq + Hash + Debug + Borrow<Q> + Sync + Send,
    V: Clone + Send + Sync,
    Q: Eq + Hash + Sync,
{
    fn map_lookup(&self, lookup: &CategoricalLookup<K, V>, parallel_threshold: usize) -> Vec<V> {
        if self.len() >= parallel_threshold {
            self.par_iter().map(|cell| lookup.apply(cell.as_ref())).collect()
        } else {
            self.iter().map(|cell| lookup.apply(cell.as_ref())).collect()
        }
    }
}

/// Apply an untyped lookup to an untyped column.
///
/// See [`crate::ScorerConfig::parallel_threshold`] for the usual threshold.
#[must_use]
pub fn map_scalar_column(
    lookup: &ScalarLookup,
    column: &[Scalar],
    parallel_threshold: usize,
) -> Vec<Scalar> {
    let parallel = column.len() >= parallel_threshold;
    tracing::debug!(
        rows = column.len(),
        output_type = %lookup.output_type(),
        parallel,
        "mapping scalar column"
    );
    if parallel {
        column.par_iter().map(|cell| lookup.apply(cell)).collect()
    } else {
        column.iter().map(|cell| lookup.apply(cell)).collect()
    }
}
