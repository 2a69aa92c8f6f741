// A Rust BloomFilter implementation.

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

//! A Bloom Filter with a seeded streaming murmur3 hash family and a
//! stable binary serialization format.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! murmur-bloom = "0.1.0"
//! ```
//!
//! # Bloom Filters
//!
//! A Bloom Filter is an Approximate Set Membership structure, which
//! means it can track a set of items and check if an item is a member
//! of the set it is tracking.  It is able to do this using a much
//! smaller amount of memory than storing the actual items, at the
//! cost of occasionally indicating that an item is in the set even
//! though it is not.  This occurrence is called a "False Positive".  A
//! Bloom Filter will never have a "False Negative" however, which
//! would be indicating that an item is *not* in the set when in fact
//! it is.  The frequency of false positives can be precisely bounded
//! by setting the size of the filter, and is called the False Positive
//! Rate.
//!
//! This crate hashes raw byte keys with `k` murmur3 (x86, 32-bit)
//! accumulators seeded `0, 1, .., k-1`.  Because the seeds are fixed,
//! two filters built with the same parameters always agree on bit
//! positions, which makes filters mergeable with [`BloomFilter::union`]
//! and gives the serialized form a stable, implementation-independent
//! meaning.
//!
//! # Example Usage
//!
//! ```rust
//! use murmur_bloom::BloomFilter;
//!
//! let expected_num_items = 1000;
//!
//! // out of 100 items that are not inserted, expect 1 to return true for contains
//! let false_positive_rate = 0.01;
//!
//! let mut filter = BloomFilter::new(expected_num_items, false_positive_rate).unwrap();
//! filter.add(b"one");
//! filter.contains(b"one"); /* true */
//! filter.contains(b"two"); /* probably false */
//! ```
//!
//! # Persistence
//!
//! A filter serializes to an 8-byte little-endian `(m, k)` header
//! followed by the bit array packed MSB-first, and restores to a filter
//! that answers membership queries identically:
//!
//! ```rust
//! use murmur_bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.add(b"persisted");
//!
//! let mut buf = Vec::new();
//! filter.write_to(&mut buf).unwrap();
//!
//! let (restored, _) = BloomFilter::read_from(&mut buf.as_slice()).unwrap();
//! assert!(restored.contains(b"persisted"));
//! ```

pub mod bloom;
pub mod codec;
pub mod error;
pub mod murmur;

pub use crate::bloom::{bit_count, hash_count, BloomFilter};
pub use crate::error::{Error, Section};
pub use crate::murmur::Murmur32;
