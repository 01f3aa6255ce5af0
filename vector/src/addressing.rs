//! How an index picks its path through the tree.
//!
//! Indices are split into 5-bit digits, but unlike the usual bitmapped vector
//! trie the digits are consumed least-significant first: the root chooses a
//! child using the lowest five bits, that child uses the next five bits, and so
//! on. The number of levels walked depends on the index itself (see
//! [`depth_for`]), so small indices live close to the root and an index never
//! needs more levels than it has digits.

/// Number of index bits consumed per tree level.
pub const BITS_PER_LEVEL: u32 = 5;

/// Number of child slots in every node.
pub const BRANCHING: usize = 1 << BITS_PER_LEVEL;

const MASK: usize = BRANCHING - 1;

/// The digit of `idx` that selects a child at `level`, where the root is level
/// zero.
///
/// Levels past the width of `usize` have digit zero.
pub fn digit(idx: usize, level: u8) -> usize {
    let shifted = idx
        .checked_shr(BITS_PER_LEVEL * u32::from(level))
        .unwrap_or(0);
    shifted & MASK
}

/// The number of levels to descend from the root to reach the node addressed
/// by `n`, i.e. the number of 5-bit digits in `n`.
///
/// Zero still takes one digit, so this is never less than one.
pub fn depth_for(n: usize) -> u8 {
    match n.checked_ilog2() {
        None => 1,
        // The unwrap is fine unless someone has a usize with more than 1275 bits.
        Some(log) => (log / BITS_PER_LEVEL + 1).try_into().unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_least_significant_first() {
        let idx = 0b10101_00011_11111;
        assert_eq!(digit(idx, 0), 0b11111);
        assert_eq!(digit(idx, 1), 0b00011);
        assert_eq!(digit(idx, 2), 0b10101);
        assert_eq!(digit(idx, 3), 0);
    }

    #[test]
    fn digit_past_the_word() {
        assert_eq!(digit(usize::MAX, 13), 0);
        assert_eq!(digit(usize::MAX, 200), 0);
        // 64 = 12 * 5 + 4, so the top level only has four bits left.
        #[cfg(target_pointer_width = "64")]
        assert_eq!(digit(usize::MAX, 12), 0b1111);
    }

    #[test]
    fn depths() {
        assert_eq!(depth_for(0), 1);
        assert_eq!(depth_for(1), 1);
        assert_eq!(depth_for(31), 1);
        assert_eq!(depth_for(32), 2);
        assert_eq!(depth_for(1023), 2);
        assert_eq!(depth_for(1024), 3);
        assert_eq!(depth_for(32 * 32 * 32), 4);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(depth_for(usize::MAX), 13);
    }

    #[test]
    fn depth_covers_every_digit() {
        for n in [0, 5, 31, 32, 33, 1000, 1024, 40_000, 1 << 20] {
            let depth = depth_for(n);
            let rebuilt: usize = (0..depth)
                .map(|level| digit(n, level) << (BITS_PER_LEVEL * u32::from(level)))
                .sum();
            assert_eq!(rebuilt, n);
            if depth > 1 {
                assert_ne!(digit(n, depth - 1), 0);
            }
        }
    }
}
