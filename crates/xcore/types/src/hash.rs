// Copyright 2015-2020 Parity Technologies (UK) Ltd.
// This file is part of Xcore.

// Xcore is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Xcore is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Xcore.  If not, see <http://www.gnu.org/licenses/>.

//! SHA3-256 helpers. The chain hashes with NIST SHA3, not legacy Keccak.

use ethereum_types::H256;
use tiny_keccak::{Hasher, Sha3};

/// The SHA3-256 of the empty byte string.
pub const SHA3_EMPTY: H256 = H256([
    0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61, 0xd6,
    0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b, 0x80, 0xf8,
    0x43, 0x4a,
]);

/// The SHA3-256 of the RLP encoding of an empty string (`0x80`).
pub const SHA3_NULL_RLP: H256 = H256([
    0xbc, 0x20, 0x71, 0xa4, 0xde, 0x84, 0x6f, 0x28, 0x57, 0x02, 0x44, 0x7f, 0x25, 0x89, 0xdd,
    0x16, 0x36, 0x78, 0xe0, 0x97, 0x2a, 0x8a, 0x1b, 0x0d, 0x28, 0xb0, 0x4e, 0xd5, 0xc0, 0x94,
    0x54, 0x7f,
]);

/// The SHA3-256 of the RLP encoding of an empty list (`0xc0`). This is the
/// uncles digest of a block with no uncles.
pub const SHA3_EMPTY_LIST_RLP: H256 = H256([
    0xf1, 0x8f, 0x47, 0x84, 0x8f, 0xb2, 0x93, 0x46, 0x8f, 0x64, 0x1c, 0x33, 0x86, 0x3d, 0xca,
    0x9e, 0x52, 0x78, 0xfa, 0x8e, 0x96, 0x90, 0xf7, 0x7f, 0x7d, 0xc9, 0x6e, 0x95, 0x4e, 0xf9,
    0x22, 0x1b,
]);

/// SHA3-256 of `data`.
pub fn sha3<T: AsRef<[u8]>>(data: T) -> H256 {
    let mut out = [0u8; 32];
    let mut hasher = Sha3::v256();
    hasher.update(data.as_ref());
    hasher.finalize(&mut out);
    H256(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_match_constants() {
        assert_eq!(sha3([0u8; 0]), SHA3_EMPTY);
        assert_eq!(sha3([0x80u8]), SHA3_NULL_RLP);
        assert_eq!(sha3([0xc0u8]), SHA3_EMPTY_LIST_RLP);
    }

    #[test]
    fn hashes_are_stable() {
        assert_eq!(sha3(b"xcore"), sha3(b"xcore"));
        assert_ne!(sha3(b"xcore"), sha3(b"xcor"));
    }
}
