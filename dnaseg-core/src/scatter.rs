//! Segment length vs. position, grouped by best word

use std::collections::HashMap;

use crate::types::{GenomicPos, SegmentRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterGroup {
    pub word: String,
    /// `(start, length)` in row order
    pub points: Vec<(GenomicPos, u64)>,
}

impl ScatterGroup {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Group rows by `Best Word`; groups appear in the order their word is
/// first seen. Rows with a blank word are left out.
pub fn group_by_word(rows: &[SegmentRow]) -> Vec<ScatterGroup> {
    let mut groups: Vec<ScatterGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let Some(word) = row.word() else { continue };
        let idx = *index.entry(word).or_insert_with(|| {
            groups.push(ScatterGroup {
                word: word.to_string(),
                points: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].points.push((row.start, row.length));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_word_first_appearance() {
        let rows = vec![
            SegmentRow::new(10, 5, "TTT"),
            SegmentRow::new(20, 3, "ACG"),
            SegmentRow::new(30, 2, "TTT"),
        ];
        let groups = group_by_word(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].word, "TTT");
        assert_eq!(groups[0].points, vec![(10, 5), (30, 2)]);
        assert_eq!(groups[1].word, "ACG");
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_blank_words_are_not_plotted() {
        let rows = vec![
            SegmentRow::new(10, 5, ""),
            SegmentRow::new(20, 3, "ACG"),
            SegmentRow::new(30, 2, "  "),
        ];
        let groups = group_by_word(&rows);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].points, vec![(20, 3)]);
    }

    #[test]
    fn test_group_by_word_empty() {
        assert!(group_by_word(&[]).is_empty());
    }
}
