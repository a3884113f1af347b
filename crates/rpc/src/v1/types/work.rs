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

//! Mining work package.

use ethereum_types::{H256, U64};
use serde::{Serialize, Serializer};
use xcore::engines;

/// The result of a `pow_getWork` call: the seal hash to mine on, the epoch
/// seed hash, the boundary target and the block number. Serialized as a
/// flat array of hex strings for mining client compatibility.
#[derive(Debug, PartialEq, Eq)]
pub struct Work {
    /// The hash the proof-of-work is computed over.
    pub seal_hash: H256,
    /// Seed hash of the block's epoch.
    pub seed_hash: H256,
    /// Boundary a conforming proof-of-work hash must not exceed.
    pub target: H256,
    /// Number of the block being sealed.
    pub number: u64,
}

impl From<engines::Work> for Work {
    fn from(work: engines::Work) -> Work {
        Work {
            seal_hash: work.seal_hash,
            seed_hash: work.seed_hash,
            target: work.target,
            number: work.number,
        }
    }
}

impl Serialize for Work {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (
            &self.seal_hash,
            &self.seed_hash,
            &self.target,
            U64::from(self.number),
        )
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::Work;
    use ethereum_types::H256;

    #[test]
    fn serializes_as_a_flat_hex_array() {
        let work = Work {
            seal_hash: H256::repeat_byte(1),
            seed_hash: H256::repeat_byte(2),
            target: H256::repeat_byte(3),
            number: 1,
        };
        let serialized = ::serde_json::to_string(&work).unwrap();
        assert_eq!(
            serialized,
            concat!(
                "[\"0x0101010101010101010101010101010101010101010101010101010101010101\",",
                "\"0x0202020202020202020202020202020202020202020202020202020202020202\",",
                "\"0x0303030303030303030303030303030303030303030303030303030303030303\",",
                "\"0x1\"]"
            )
        );
    }
}
