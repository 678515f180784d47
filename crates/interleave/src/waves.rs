//! Waves policy: legacy intersection-prefix interleave

use contracts::Lines;

/// Interleave `sequences` in waves.
///
/// Each wave walks the indices from where the previous wave stopped up to the
/// length of the shortest remaining sequence, taking one element per remaining
/// sequence per index. Sequences fully consumed by the wave are then dropped
/// and the next wave starts with the survivors.
pub fn waves(sequences: Vec<Lines>) -> Lines {
    let total = sequences.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    let mut remaining: Vec<(usize, std::vec::IntoIter<String>)> = sequences
        .into_iter()
        .map(|seq| (seq.len(), seq.into_iter()))
        .collect();
    let mut consumed = 0;

    while let Some(bound) = remaining.iter().map(|(len, _)| *len).min() {
        for _ in consumed..bound {
            for (_, cursor) in &mut remaining {
                merged.extend(cursor.next());
            }
        }
        consumed = bound;
        remaining.retain(|(len, _)| *len > bound);
    }

    merged
}
