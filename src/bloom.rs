// This program is free software; you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation; either version 2 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA
// 02110-1301, USA.

use bit_vec::BitVec;
use std::f64::consts::LN_2;

use crate::error::Error;
use crate::murmur::Murmur32;

/// A standard BloomFilter.  If an item is inserted then `contains` is
/// guaranteed to return `true` for that item.  For items not inserted
/// `contains` will probably return false.  The probability that
/// `contains` returns `true` for an item that was not inserted is
/// called the False Positive Rate.
///
/// Keys are hashed with a family of `k` seeded murmur3 accumulators,
/// where accumulator `i` always uses seed `i`.  The seeds are part of
/// the structure's identity: a filter restored from its serialized form
/// reproduces the exact bit positions of the filter that wrote it.
///
/// # False Positive Rate
/// The false positive rate is specified as a float in the range (0,1).
/// It indicates that out of `X` probes, `X * rate` should return a
/// false positive.  Higher values lead to smaller (but more inaccurate)
/// filters.  The rate holds up to the planned capacity `n` and degrades
/// as more distinct keys are added beyond it.
///
/// # Example Usage
///
/// ```rust
/// use murmur_bloom::BloomFilter;
///
/// let expected_num_items = 1000;
///
/// // out of 100 items that are not inserted, expect 1 to return true for contains
/// let false_positive_rate = 0.01;
///
/// let mut filter = BloomFilter::new(expected_num_items, false_positive_rate).unwrap();
/// filter.add(b"one");
/// filter.contains(b"one"); /* true */
/// filter.contains(b"two"); /* probably false */
/// ```
#[derive(Debug)]
pub struct BloomFilter {
    pub(crate) m: u32,
    pub(crate) k: u32,
    pub(crate) bits: BitVec,
    pub(crate) hashers: Vec<Murmur32>,
}

impl BloomFilter {
    /// Create a BloomFilter that expects to hold `expected_num_items`.
    /// The filter will be sized to have a false positive rate of the
    /// value specified in `rate`.
    ///
    /// Fails with [`Error::InvalidParameters`] when `expected_num_items`
    /// is zero, `rate` is outside `(0, 1)`, or the resulting bit count
    /// does not fit in a `u32`.
    pub fn new(expected_num_items: u32, rate: f64) -> Result<BloomFilter, Error> {
        let invalid = Error::InvalidParameters {
            n: expected_num_items,
            p: rate,
        };
        if expected_num_items == 0 || !(rate > 0.0 && rate < 1.0) {
            return Err(invalid);
        }

        let m = (-(expected_num_items as f64) * rate.ln() / (LN_2 * LN_2)).ceil();
        if !(m >= 1.0) || m > u32::MAX as f64 {
            return Err(invalid);
        }
        let m = m as u32;

        BloomFilter::with_size(m, hash_count(m, expected_num_items))
    }

    /// Create a BloomFilter with an explicit number of bits and hash
    /// functions.  Fails with [`Error::InvalidShape`] when either is
    /// zero.
    pub fn with_size(num_bits: u32, num_hashes: u32) -> Result<BloomFilter, Error> {
        if num_bits == 0 || num_hashes == 0 {
            return Err(Error::InvalidShape {
                m: num_bits,
                k: num_hashes,
            });
        }
        Ok(BloomFilter {
            m: num_bits,
            k: num_hashes,
            bits: BitVec::from_elem(num_bits as usize, false),
            hashers: (0..num_hashes).map(Murmur32::with_seed).collect(),
        })
    }

    /// Get the number of bits this BloomFilter is using.
    pub fn num_bits(&self) -> u32 {
        self.m
    }

    /// Get the number of hash functions this BloomFilter is using.
    pub fn num_hashes(&self) -> u32 {
        self.k
    }

    /// Insert `key` into this BloomFilter.  Always succeeds, including
    /// for the empty key.
    pub fn add(&mut self, key: &[u8]) {
        for hasher in &self.hashers {
            let mut digest = *hasher;
            digest.update(key);
            let idx = (digest.finish() % self.m) as usize;
            self.bits.set(idx, true);
        }
    }

    /// Check if `key` has been inserted into this BloomFilter.  Can
    /// return false positives, but never false negatives.  Returns as
    /// soon as any probed bit is unset.
    pub fn contains(&self, key: &[u8]) -> bool {
        for hasher in &self.hashers {
            let mut digest = *hasher;
            digest.update(key);
            let idx = (digest.finish() % self.m) as usize;
            if !self.bits[idx] {
                return false;
            }
        }
        true
    }

    /// Merge `other` into `self` so that `self` contains the items
    /// inserted into either filter.  `other` is left unmodified.
    ///
    /// Both filters must have the same number of bits and hashes;
    /// otherwise [`Error::ShapeMismatch`] is returned and `self` is not
    /// mutated.  The merged filter's false positive rate degrades
    /// toward that of a filter loaded with the combined key count.
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), Error> {
        if self.m != other.m || self.k != other.k {
            return Err(Error::ShapeMismatch {
                m: self.m,
                k: self.k,
                other_m: other.m,
                other_k: other.k,
            });
        }
        self.bits.or(&other.bits);
        Ok(())
    }
}

/// Return the number of bits needed to satisfy the specified false
/// positive rate, if the filter will hold `num_items` items:
/// `ceil(-n * ln(p) / ln(2)^2)`.
///
/// Rounds up so the bit array is never under-provisioned.  Expects
/// `num_items > 0` and `rate` in `(0, 1)`; [`BloomFilter::new`]
/// validates both.
pub fn bit_count(num_items: u32, rate: f64) -> u32 {
    (-(num_items as f64) * rate.ln() / (LN_2 * LN_2)).ceil() as u32
}

/// Return the optimal number of hashes for the given number of bits
/// and items in a filter: `ceil(ln(2) * m / n)`, at least 1.
///
/// Expects `num_items > 0`; [`BloomFilter::new`] validates this before
/// sizing.
pub fn hash_count(num_bits: u32, num_items: u32) -> u32 {
    let k = (LN_2 * num_bits as f64 / num_items as f64).ceil() as u32;
    k.max(1)
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use std::collections::HashSet;

    use super::{bit_count, hash_count, BloomFilter};
    use crate::error::Error;

    #[test]
    fn sizing() {
        assert_eq!(bit_count(100, 0.01), 959);
        assert_eq!(hash_count(959, 100), 7);

        assert_eq!(bit_count(500000, 0.01), 4792530);
        assert_eq!(hash_count(4792530, 500000), 7);

        // n far larger than m still yields a usable hash count
        assert_eq!(hash_count(10, 1000000), 1);
    }

    #[test]
    fn debug_formatting() {
        let b = BloomFilter::new(100, 0.01).unwrap();
        let formatted = format!("{b:?}");
        assert!(formatted.contains("BloomFilter"));
        assert!(formatted.contains("959"));
    }

    #[test]
    fn simple() {
        let mut b = BloomFilter::new(100, 0.01).unwrap();
        b.add(b"one");
        assert!(b.contains(b"one"));
        assert!(!b.contains(b"two"));
    }

    #[test]
    fn known_keys() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.num_bits(), 959);
        assert_eq!(filter.num_hashes(), 7);

        for key in [b"cfkuouhbuq", b"cawakensvd", b"wtpyceapwn", b"ehnfcuxuqu"] {
            filter.add(key);
        }
        for key in [b"cfkuouhbuq", b"cawakensvd", b"wtpyceapwn", b"ehnfcuxuqu"] {
            assert!(filter.contains(key));
        }
        assert!(!filter.contains(b"zxfinprwoo"));
    }

    #[test]
    fn empty_key() {
        let mut b = BloomFilter::new(100, 0.01).unwrap();
        assert!(!b.contains(b""));
        b.add(b"");
        assert!(b.contains(b""));
    }

    #[test]
    fn no_false_negatives() {
        let mut b = BloomFilter::new(1000, 0.01).unwrap();
        let mut rng = rand::thread_rng();
        let keys: Vec<[u8; 8]> = (0..1000).map(|_| rng.gen::<u64>().to_le_bytes()).collect();

        for key in &keys {
            b.add(key);
        }
        for key in &keys {
            assert!(b.contains(key));
        }
    }

    #[test]
    fn invalid_parameters() {
        for (n, p) in [
            (0, 0.01),
            (100, 0.0),
            (100, 1.0),
            (100, -0.5),
            (100, 2.0),
            (100, f64::NAN),
        ] {
            assert!(matches!(
                BloomFilter::new(n, p),
                Err(Error::InvalidParameters { .. })
            ));
        }
        assert!(matches!(
            BloomFilter::with_size(0, 3),
            Err(Error::InvalidShape { .. })
        ));
        assert!(matches!(
            BloomFilter::with_size(64, 0),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn union() {
        let mut b1 = BloomFilter::new(20, 0.01).unwrap();
        b1.add(b"one");
        let mut b2 = BloomFilter::new(20, 0.01).unwrap();
        b2.add(b"two");

        b1.union(&b2).unwrap();

        assert!(b1.contains(b"one"));
        assert!(b1.contains(b"two"));
        // other operand untouched
        assert!(b2.contains(b"two"));
        assert!(!b2.contains(b"one"));
    }

    #[test]
    fn union_shape_mismatch() {
        let mut b1 = BloomFilter::new(100, 0.01).unwrap();
        b1.add(b"one");
        let b2 = BloomFilter::new(200, 0.01).unwrap();

        assert!(matches!(b1.union(&b2), Err(Error::ShapeMismatch { .. })));
        // receiver left unchanged on failure
        assert!(b1.contains(b"one"));
        assert!(!b1.contains(b"two"));
    }

    #[test]
    fn fpr_test() {
        let cnt = 100000u32;
        let rate = 0.01f64;

        let mut b = BloomFilter::new(cnt, rate).unwrap();
        let mut set: HashSet<u64> = HashSet::new();
        let mut rng = rand::thread_rng();

        for _ in 0..cnt {
            let v = rng.gen::<u64>();
            set.insert(v);
            b.add(&v.to_le_bytes());
        }

        let mut false_positives = 0;
        for _ in 0..cnt {
            let v = rng.gen::<u64>();
            match (b.contains(&v.to_le_bytes()), set.contains(&v)) {
                (true, false) => false_positives += 1,
                (false, true) => unreachable!("false negative"),
                _ => {}
            }
        }

        // make sure we're not too far off
        let actual_rate = false_positives as f64 / cnt as f64;
        assert!(actual_rate < rate * 3.0, "actual rate {actual_rate}");
    }
}
