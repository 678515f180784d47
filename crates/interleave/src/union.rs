//! Union policy: round-robin by global index

use contracts::Lines;

/// Interleave `sequences` by index, in source order.
///
/// For each index `i` below the longest length, every sequence that has an
/// element at `i` contributes it. Exhausted sequences stop contributing.
pub fn union(sequences: Vec<Lines>) -> Lines {
    let total = sequences.iter().map(Vec::len).sum();
    let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);

    let mut cursors: Vec<_> = sequences.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    for _ in 0..longest {
        for cursor in &mut cursors {
            merged.extend(cursor.next());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Lines {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_staggered_lengths() {
        let merged = union(vec![
            lines(&["Hello"]),
            lines(&["World", "is big"]),
            lines(&["!", "even a", "english sentence?"]),
        ]);
        assert_eq!(
            merged,
            lines(&["Hello", "World", "!", "is big", "even a", "english sentence?"])
        );
    }

    #[test]
    fn test_leading_empty_source() {
        assert_eq!(union(vec![vec![], lines(&["x", "y"])]), lines(&["x", "y"]));
    }

    #[test]
    fn test_empty_set() {
        assert!(union(Vec::new()).is_empty());
        assert!(union(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_longer_first_source_continues_alone() {
        let merged = union(vec![lines(&["a1", "a2", "a3"]), lines(&["b1"])]);
        assert_eq!(merged, lines(&["a1", "b1", "a2", "a3"]));
    }
}
