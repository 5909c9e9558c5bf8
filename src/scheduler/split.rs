//! Split planner: chunks weekly hours into contiguous blocks.
//!
//! # Algorithm
//!
//! 1. If the user registered patterns for the subject that sum to the
//!    requested total, one of them is chosen uniformly at random.
//! 2. Otherwise a default table applies:
//!
//! | Total | Blocks |
//! |-------|--------|
//! | 6 | `3+3` or `2+2+2` (coin flip) |
//! | 5 | `3+2` |
//! | 4 | `2+2` |
//! | 3, 2, 1 | single block |
//! | other | greedy threes, a remainder of 4 becomes `2+2` |

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::SplitConstraints;

/// Splits `total` hours of a subject into block sizes.
///
/// The returned blocks always sum to `total` and are all positive; `0`
/// yields no blocks. Zero-size blocks in a user pattern are dropped.
///
/// # Example
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_timetable::models::SplitConstraints;
/// use u_timetable::scheduler::plan_blocks;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let blocks = plan_blocks(5, "MAT", &SplitConstraints::new(), &mut rng);
/// assert_eq!(blocks, vec![3, 2]);
/// ```
pub fn plan_blocks<R: Rng + ?Sized>(
    total: u32,
    subject_code: &str,
    constraints: &SplitConstraints,
    rng: &mut R,
) -> Vec<u32> {
    let matching = constraints.matching(subject_code, total);
    if let Some(pattern) = matching.choose(rng) {
        return pattern.blocks.iter().copied().filter(|&b| b > 0).collect();
    }

    match total {
        6 => {
            if rng.random_bool(0.5) {
                vec![3, 3]
            } else {
                vec![2, 2, 2]
            }
        }
        5 => vec![3, 2],
        4 => vec![2, 2],
        _ => default_blocks(total),
    }
}

/// Greedy decomposition preferring blocks of three.
fn default_blocks(total: u32) -> Vec<u32> {
    let mut blocks = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        let block = match remaining {
            4 => 2,
            r if r >= 3 => 3,
            r => r,
        };
        blocks.push(block);
        remaining -= block;
    }
    blocks
}
