//! GC metrics: skew of a sequence, block and moving averages of a series

use crate::types::{BlockPoint, SeriesPoint};

/// GC skew `(G - C) / (G + C)` of a sequence, `0.0` when it has neither base.
///
/// Only upper-case `G` and `C` are counted; soft-masked (lower-case) bases
/// are ignored. This matches the files the analyzer has always been run on
/// and is a known limitation for soft-masked assemblies.
pub fn gc_skew(sequence: &str) -> f64 {
    let (g, c) = sequence.bytes().fold((0u64, 0u64), |(g, c), b| match b {
        b'G' => (g + 1, c),
        b'C' => (g, c + 1),
        _ => (g, c),
    });

    if g + c == 0 {
        return 0.0;
    }
    (g as f64 - c as f64) / (g + c) as f64
}

/// Mean of consecutive, non-overlapping blocks of `block_size` points.
///
/// The block size is clamped to the series length (and to at least 1), so a
/// short series yields a single block. The last block may be shorter.
pub fn block_average(series: &[SeriesPoint], block_size: usize) -> Vec<BlockPoint> {
    if series.is_empty() {
        return Vec::new();
    }
    let block_size = block_size.clamp(1, series.len());

    series
        .chunks(block_size)
        .map(|block| BlockPoint {
            start: block[0].position,
            end: block[block.len() - 1].position,
            value: mean(block.iter().map(|p| p.value)),
        })
        .collect()
}

/// Trailing moving average with one output per input point.
///
/// The first `window - 1` outputs average only the points seen so far.
pub fn moving_average(series: &[SeriesPoint], window: usize) -> Vec<SeriesPoint> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(series.len());
    let mut sum = 0.0;

    for (i, point) in series.iter().enumerate() {
        sum += point.value;
        if i >= window {
            sum -= series[i - window].value;
        }
        let n = (i + 1).min(window);
        out.push(SeriesPoint::new(point.position, sum / n as f64));
    }

    out
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(values: &[f64]) -> Vec<SeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| SeriesPoint::new(i as u64 * 1000, v))
            .collect()
    }

    #[test]
    fn test_gc_skew_basic() {
        assert_eq!(gc_skew("GGGC"), 0.5);
        assert_eq!(gc_skew("CCCC"), -1.0);
        assert_eq!(gc_skew("GATTACA"), 0.0);
    }

    #[test]
    fn test_gc_skew_without_gc_is_zero() {
        assert_eq!(gc_skew(""), 0.0);
        assert_eq!(gc_skew("ATATNN"), 0.0);
    }

    #[test]
    fn test_gc_skew_ignores_lower_case() {
        assert_eq!(gc_skew("gggG"), 1.0);
        assert_eq!(gc_skew("gcgc"), 0.0);
    }

    #[test]
    fn test_block_average_last_block_shorter() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let blocks = block_average(&s, 2);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], BlockPoint { start: 0, end: 1000, value: 1.5 });
        assert_eq!(blocks[1], BlockPoint { start: 2000, end: 3000, value: 3.5 });
        assert_eq!(blocks[2], BlockPoint { start: 4000, end: 4000, value: 5.0 });
    }

    #[test]
    fn test_block_average_clamps_to_length() {
        let s = series(&[40.0, 42.0, 44.0]);
        let blocks = block_average(&s, 100);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 0);
        assert_eq!(blocks[0].end, 2000);
        assert!((blocks[0].value - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_block_average_zero_block_size() {
        let s = series(&[1.0, 2.0]);
        assert_eq!(block_average(&s, 0).len(), 2);
        assert!(block_average(&[], 10).is_empty());
    }

    #[test]
    fn test_moving_average_warm_up() {
        let s = series(&[2.0, 4.0, 6.0, 8.0]);
        let avg: Vec<f64> = moving_average(&s, 3).iter().map(|p| p.value).collect();
        assert_eq!(avg, vec![2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn test_moving_average_keeps_positions() {
        let s = series(&[1.0, 1.0, 1.0]);
        let out = moving_average(&s, 50);
        let positions: Vec<u64> = out.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0, 1000, 2000]);
    }

    proptest! {
        #[test]
        fn prop_gc_skew_bounded(seq in "[ACGTNacgtn]{0,200}") {
            let skew = gc_skew(&seq);
            prop_assert!((-1.0..=1.0).contains(&skew));
            if !seq.contains('G') && !seq.contains('C') {
                prop_assert_eq!(skew, 0.0);
            }
        }

        #[test]
        fn prop_block_count_and_tail(values in prop::collection::vec(0.0f64..100.0, 1..300), b in 1usize..50) {
            let n = values.len();
            prop_assume!(b <= n);
            let blocks = block_average(&series(&values), b);
            prop_assert_eq!(blocks.len(), (n + b - 1) / b);

            let tail = if n % b == 0 { b } else { n % b };
            let expected = values[n - tail..].iter().sum::<f64>() / tail as f64;
            let last = blocks.last().unwrap().value;
            prop_assert!((last - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_moving_average_shape(values in prop::collection::vec(-50.0f64..50.0, 0..300), w in 0usize..80) {
            let out = moving_average(&series(&values), w);
            prop_assert_eq!(out.len(), values.len());
            if let Some(first) = out.first() {
                prop_assert_eq!(first.value, values[0]);
            }
        }
    }
}
