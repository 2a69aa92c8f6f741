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

//! A streaming implementation of the 32-bit x86 variant of murmur3.
//!
//! The digest is incremental: a key can be fed in arbitrary chunks and
//! produces the same value as hashing the concatenation in one call.
//! Partial 4-byte blocks are buffered in a small tail between `update`
//! calls and folded in by `finish`.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

const FMIX1: u32 = 0x85eb_ca6b;
const FMIX2: u32 = 0xc2b2_ae35;

const BLOCK_SIZE: usize = 4;

/// Seeded, resettable murmur3 x86_32 accumulator.
///
/// # Example
///
/// ```rust
/// use murmur_bloom::Murmur32;
///
/// let mut digest = Murmur32::with_seed(5);
/// digest.update(b"hello, ");
/// digest.update(b"murmur3");
/// assert_eq!(digest.finish(), 4015002046);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Murmur32 {
    seed: u32,
    h: u32,
    len: u64,
    tail: [u8; BLOCK_SIZE],
    tail_len: usize,
}

impl Murmur32 {
    /// Create an accumulator for `seed`, ready to receive input.
    pub fn with_seed(seed: u32) -> Murmur32 {
        Murmur32 {
            seed,
            h: seed,
            len: 0,
            tail: [0; BLOCK_SIZE],
            tail_len: 0,
        }
    }

    /// Rewind to the freshly seeded state so the accumulator can be
    /// reused for a new key.
    pub fn reset(&mut self) {
        self.h = self.seed;
        self.len = 0;
        self.tail_len = 0;
    }

    /// The seed this accumulator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Feed `bytes` into the digest.  May be called any number of times
    /// before `finish`; splitting the input across calls does not change
    /// the result.
    pub fn update(&mut self, mut bytes: &[u8]) {
        self.len += bytes.len() as u64;

        if self.tail_len > 0 {
            let free = BLOCK_SIZE - self.tail_len;
            if bytes.len() < free {
                self.tail[self.tail_len..self.tail_len + bytes.len()].copy_from_slice(bytes);
                self.tail_len += bytes.len();
                return;
            }
            self.tail[self.tail_len..].copy_from_slice(&bytes[..free]);
            bytes = &bytes[free..];
            let block = u32::from_le_bytes(self.tail);
            self.mix(block);
            self.tail_len = 0;
        }

        while bytes.len() >= BLOCK_SIZE {
            let block = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            bytes = &bytes[BLOCK_SIZE..];
            self.mix(block);
        }

        self.tail[..bytes.len()].copy_from_slice(bytes);
        self.tail_len = bytes.len();
    }

    /// Finalize the digest over everything fed so far.  Does not consume
    /// the accumulator; call `reset` before starting the next key.
    pub fn finish(&self) -> u32 {
        let mut h = self.h;
        let mut k: u32 = 0;

        if self.tail_len >= 3 {
            k ^= (self.tail[2] as u32) << 16;
        }
        if self.tail_len >= 2 {
            k ^= (self.tail[1] as u32) << 8;
        }
        if self.tail_len >= 1 {
            k ^= self.tail[0] as u32;
            k = k.wrapping_mul(C1);
            k = k.rotate_left(R1);
            k = k.wrapping_mul(C2);
            h ^= k;
        }

        h ^= self.len as u32;

        h ^= h >> 16;
        h = h.wrapping_mul(FMIX1);
        h ^= h >> 13;
        h = h.wrapping_mul(FMIX2);
        h ^= h >> 16;

        h
    }

    fn mix(&mut self, mut k: u32) {
        k = k.wrapping_mul(C1);
        k = k.rotate_left(R1);
        k = k.wrapping_mul(C2);

        self.h ^= k;
        self.h = self.h.rotate_left(R2);
        self.h = self.h.wrapping_mul(M).wrapping_add(N);
    }
}
