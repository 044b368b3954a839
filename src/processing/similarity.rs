//! Character-level similarity between two strings.
//!
//! The score is the Ratcliff/Obershelp ratio: the longest common block is
//! located, the same search recurses on the unmatched text to its left and
//! right, and the matched character count `M` yields `2 * M / (|a| + |b|)`.

/// Returns a case-insensitive similarity ratio in `[0, 1]`.
///
/// Block selection is order dependent, so both argument orders are scored and
/// the better alignment is kept. This makes the ratio symmetric.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&a, &b).max(matching_characters(&b, &a));
    2.0 * matched as f64 / total as f64
}

/// Sums the sizes of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Finds the longest common block within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // previous[x + 1] holds the common suffix length ending at a[i - 1], b[blo + x]
    let mut previous = vec![0usize; width + 1];

    for i in alo..ahi {
        let mut current = vec![0usize; width + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let offset = j - blo;
            let run = previous[offset] + 1;
            current[offset + 1] = run;
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        previous = current;
    }

    best
}
