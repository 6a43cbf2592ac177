//! Assigns sequences to segment rows
//!
//! Two strategies, chosen up front from the sequence identifiers:
//! - **KeyJoin**: every identifier is an integer, used as a join key against
//!   `SegmentRow::start` (left join, unmatched rows keep an empty sequence).
//! - **Positional**: otherwise row *i* takes the *i*-th record in file order.

use std::collections::HashMap;
use thiserror::Error;

use crate::io::fasta::SequenceSet;
use crate::types::SegmentRow;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("no segment row received a sequence")]
    NoSequenceData,
}

/// Key a sequence record is matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentKey {
    /// Identifier parsed as an integer, compared with `SegmentRow::start`
    Key(i64),
    /// 0-based record index in file order
    Position(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentStrategy {
    KeyJoin,
    Positional,
}

impl AlignmentStrategy {
    /// KeyJoin only when the set is non-empty and every identifier parses
    /// as an integer.
    pub fn select(sequences: &SequenceSet) -> Self {
        let all_numeric = !sequences.is_empty()
            && sequences.iter().all(|r| parse_key(&r.id).is_some());
        if all_numeric {
            AlignmentStrategy::KeyJoin
        } else {
            AlignmentStrategy::Positional
        }
    }

    /// Alignment keys of every record under this strategy, in file order
    pub fn keys(&self, sequences: &SequenceSet) -> Vec<AlignmentKey> {
        sequences
            .iter()
            .enumerate()
            .map(|(idx, record)| match self {
                AlignmentStrategy::KeyJoin => parse_key(&record.id)
                    .map(AlignmentKey::Key)
                    .unwrap_or(AlignmentKey::Position(idx)),
                AlignmentStrategy::Positional => AlignmentKey::Position(idx),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    pub segment: SegmentRow,
    /// Empty when no record was assigned to this row
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRows {
    pub strategy: AlignmentStrategy,
    pub rows: Vec<AlignedRow>,
}

impl AlignedRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that received a non-empty sequence
    pub fn matched(&self) -> usize {
        self.rows.iter().filter(|r| !r.sequence.is_empty()).count()
    }
}

/// Align segment rows to sequence records.
///
/// Fails with [`AlignError::NoSequenceData`] when no row ends up with a
/// non-empty sequence.
pub fn align(rows: &[SegmentRow], sequences: &SequenceSet) -> Result<AlignedRows, AlignError> {
    let strategy = AlignmentStrategy::select(sequences);
    let aligned = match strategy {
        AlignmentStrategy::KeyJoin => key_join(rows, sequences),
        AlignmentStrategy::Positional => {
            if !sequences.is_empty() {
                log::warn!("Sequence identifiers are not numeric; aligning rows by position");
            }
            positional(rows, sequences)
        }
    };

    let result = AlignedRows { strategy, rows: aligned };
    log::debug!(
        "Aligned {} of {} rows using {:?}",
        result.matched(),
        result.len(),
        strategy
    );

    if result.matched() == 0 {
        return Err(AlignError::NoSequenceData);
    }
    Ok(result)
}

fn key_join(rows: &[SegmentRow], sequences: &SequenceSet) -> Vec<AlignedRow> {
    // First record wins when two identifiers parse to the same key
    let mut by_key: HashMap<i64, &str> = HashMap::with_capacity(sequences.len());
    for (key, record) in AlignmentStrategy::KeyJoin.keys(sequences).into_iter().zip(sequences.iter()) {
        if let AlignmentKey::Key(k) = key {
            by_key.entry(k).or_insert(record.sequence.as_str());
        }
    }

    rows.iter()
        .map(|row| {
            let sequence = i64::try_from(row.start)
                .ok()
                .and_then(|start| by_key.get(&start))
                .map(|s| s.to_string())
                .unwrap_or_default();
            AlignedRow { segment: row.clone(), sequence }
        })
        .collect()
}

fn positional(rows: &[SegmentRow], sequences: &SequenceSet) -> Vec<AlignedRow> {
    let records = sequences.records();
    rows.iter()
        .enumerate()
        .map(|(idx, row)| AlignedRow {
            segment: row.clone(),
            sequence: records.get(idx).map(|r| r.sequence.clone()).unwrap_or_default(),
        })
        .collect()
}

fn parse_key(id: &str) -> Option<i64> {
    id.trim().parse::<i64>().ok()
}
