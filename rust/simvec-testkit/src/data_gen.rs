//! Data generation utilities for testing.
//!
//! Produces reproducible sequences of container operations. A test applies
//! the same sequence to the container under test and to a `Vec` and compares
//! the two after every step.

/// One mutation of a sequence container.
///
/// Positions are raw random numbers; [`Op::resolve`] maps them into the valid
/// range for the container's current length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    PushBack(u32),
    PopBack,
    Insert { pos: usize, value: u32 },
    Erase { pos: usize },
    Resize(usize),
    Reserve(usize),
    Clear,
}

impl Op {
    /// Clamps the operation's position into the valid range for `len`.
    ///
    /// Returns `None` when the operation has no valid position (erasing from
    /// an empty container).
    pub fn resolve(self, len: usize) -> Option<Op> {
        match self {
            Op::Insert { pos, value } => Some(Op::Insert {
                pos: pos % (len + 1),
                value,
            }),
            Op::Erase { .. } if len == 0 => None,
            Op::Erase { pos } => Some(Op::Erase { pos: pos % len }),
            op => Some(op),
        }
    }
}

/// Generates `count` random operations from a fixed `seed`.
///
/// Sizes passed to `Resize`/`Reserve` stay below `max_len`, and the mix is
/// weighted towards growth so that sequences exercise reallocation.
pub fn random_ops(seed: u64, count: usize, max_len: usize) -> Vec<Op> {
    assert_ne!(max_len, 0);
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| match rng.u32(..100) {
            0..35 => Op::PushBack(rng.u32(..)),
            35..45 => Op::PopBack,
            45..65 => Op::Insert {
                pos: rng.usize(..),
                value: rng.u32(..),
            },
            65..85 => Op::Erase { pos: rng.usize(..) },
            85..93 => Op::Resize(rng.usize(..max_len)),
            93..98 => Op::Reserve(rng.usize(..max_len)),
            _ => Op::Clear,
        })
        .collect()
}

/// Generates `len` random values from a fixed `seed`.
pub fn random_values(seed: u64, len: usize) -> Vec<u32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.u32(..1000)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ops_reproducible() {
        assert_eq!(random_ops(7, 200, 64), random_ops(7, 200, 64));
        assert_eq!(random_values(3, 10), random_values(3, 10));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Op::Erase { pos: 5 }.resolve(0), None);
        assert_eq!(Op::Erase { pos: 5 }.resolve(3), Some(Op::Erase { pos: 2 }));
        assert_eq!(
            Op::Insert { pos: 7, value: 1 }.resolve(3),
            Some(Op::Insert { pos: 3, value: 1 })
        );
        assert_eq!(Op::Clear.resolve(0), Some(Op::Clear));
    }
}
