//! Word frequency ranking for the `Best Word` column

use std::collections::HashMap;

use crate::types::WordCount;

/// Count each distinct value and keep those seen at least `threshold` times.
///
/// Results are sorted by count, highest first; equal counts keep the order
/// in which the words first appeared. Returns `None` when no word reaches
/// the threshold, in which case there is nothing to chart.
pub fn aggregate<I, S>(values: I, threshold: usize) -> Option<Vec<WordCount>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in values {
        let word = value.as_ref();
        match index.get(word) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                index.insert(word.to_string(), counts.len());
                counts.push(WordCount::new(word, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-appearance order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.retain(|wc| wc.count >= threshold);

    if counts.is_empty() {
        None
    } else {
        Some(counts)
    }
}
