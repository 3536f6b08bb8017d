//! Sequence similarity for fuzzy keyword matching
//!
//! Implements the Ratcliff/Obershelp ratio (the measure behind Python's
//! difflib.SequenceMatcher) so fuzzy scores line up with the thresholds
//! the matcher was tuned against.

/// Similarity ratio between two strings (0.0-1.0)
///
/// Defined as 2*M/T where M is the total length of matching blocks and T
/// the combined length of both inputs. Two empty strings are identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0;
    }

    let matches = matching_total(&a_chars, &b_chars);
    (2.0 * matches as f64) / total as f64
}

/// Total length of all matching blocks
///
/// Finds the longest common block, then recurses on the pieces before and
/// after it on both sides, the way Ratcliff/Obershelp defines the measure.
fn matching_total(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (i, j, size) = longest_block(a, b);
    if size == 0 {
        return 0;
    }

    size + matching_total(&a[..i], &b[..j]) + matching_total(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block as (start_a, start_b, length)
///
/// Ties break toward the earliest start in `a`, then in `b`, matching
/// SequenceMatcher.find_longest_match.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);

    // Dynamic programming over block lengths ending at (i, j)
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &a_char) in a.iter().enumerate() {
        for (j, &b_char) in b.iter().enumerate() {
            if a_char == b_char {
                let length = prev[j] + 1;
                curr[j + 1] = length;
                if length > best.2 {
                    best = (i + 1 - length, j + 1 - length, length);
                }
            } else {
                curr[j + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
