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

//! Binary serialization of [`BloomFilter`].
//!
//! The wire layout is stable and all integers are little-endian:
//!
//! ```text
//! offset 0 : u32  m   (bit-array length in bits)
//! offset 4 : u32  k   (hash-function count)
//! offset 8 : ceil(m/8) bytes of packed bits
//! ```
//!
//! Bit `8*b + 0` occupies the most significant bit of packed byte `b`;
//! when `m` is not a multiple of 8 the final byte is left-aligned with
//! zero padding in the unused low-order bits.

use bit_vec::BitVec;
use std::io::{self, Read, Write};

use crate::bloom::BloomFilter;
use crate::error::{Error, Section};

const HEADER_LEN: usize = 8;

impl BloomFilter {
    /// Serialize this filter to `writer` and return the total number of
    /// bytes written, always `8 + ceil(m / 8)`.
    ///
    /// A rejected write is surfaced immediately as [`Error::Write`]
    /// naming the section that failed; partially written output is not
    /// usable.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        let mut header = [0u8; HEADER_LEN];
        header[..4].copy_from_slice(&self.m.to_le_bytes());
        header[4..].copy_from_slice(&self.k.to_le_bytes());
        writer.write_all(&header).map_err(|source| Error::Write {
            section: Section::Header,
            source,
        })?;

        let body = self.bits.to_bytes();
        writer.write_all(&body).map_err(|source| Error::Write {
            section: Section::Body,
            source,
        })?;

        Ok(HEADER_LEN + body.len())
    }

    /// Deserialize a filter from `reader`, returning it together with
    /// the total number of bytes consumed.
    ///
    /// The returned filter is immediately usable and answers `contains`
    /// exactly like the filter that was written.  A stream that ends
    /// before the `ceil(m / 8)` body bytes promised by the header is an
    /// [`Error::Read`]; a header with a zero bit or hash count is an
    /// [`Error::InvalidShape`].  No partially initialized filter is
    /// ever returned.
    ///
    /// The header's byte count is not taken on faith: the body is read
    /// through a bounded `take` and nothing shape-sized is allocated
    /// until the promised bytes have actually arrived, so a corrupt
    /// header costs at most what the source really yields.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<(BloomFilter, usize), Error> {
        let mut header = [0u8; HEADER_LEN];
        reader.read_exact(&mut header).map_err(|source| Error::Read {
            section: Section::Header,
            source,
        })?;
        let m = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let k = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        let body_len = (m as usize + 7) / 8;
        let mut body = Vec::new();
        reader
            .take(body_len as u64)
            .read_to_end(&mut body)
            .map_err(|source| Error::Read {
                section: Section::Body,
                source,
            })?;
        if body.len() < body_len {
            return Err(Error::Read {
                section: Section::Body,
                source: io::ErrorKind::UnexpectedEof.into(),
            });
        }

        let mut filter = BloomFilter::with_size(m, k)?;

        // from_bytes yields a multiple of 8 bits; drop the padding.
        let mut bits = BitVec::from_bytes(&body);
        bits.truncate(m as usize);
        filter.bits = bits;

        Ok((filter, HEADER_LEN + body.len()))
    }
}
