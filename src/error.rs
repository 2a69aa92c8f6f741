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

//! Error types for filter construction, serialization and merging.

use std::fmt;
use std::io;

/// The part of the serialized layout an I/O failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The fixed 8-byte `(m, k)` header.
    Header,
    /// The packed bit-array body.
    Body,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::Body => write!(f, "body"),
        }
    }
}

/// Error returned by fallible filter operations.
///
/// Every failure is surfaced synchronously to the caller; the crate never
/// retries I/O on its own.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `(n, p)` do not describe a buildable filter.
    #[error("invalid filter parameters: n = {n}, p = {p}")]
    InvalidParameters { n: u32, p: f64 },

    /// A zero bit count or hash count, either requested directly or read
    /// from a serialized header.
    #[error("invalid filter shape: {m} bits, {k} hashes")]
    InvalidShape { m: u32, k: u32 },

    /// The sink rejected a write while serializing.
    #[error("failed to write filter {section}")]
    Write {
        section: Section,
        #[source]
        source: io::Error,
    },

    /// The source failed or ended early while deserializing.
    #[error("failed to read filter {section}")]
    Read {
        section: Section,
        #[source]
        source: io::Error,
    },

    /// Union operands disagree on shape; the receiver was not touched.
    #[error("filter shape mismatch: {m} bits / {k} hashes vs {other_m} bits / {other_k} hashes")]
    ShapeMismatch {
        m: u32,
        k: u32,
        other_m: u32,
        other_k: u32,
    },
}
