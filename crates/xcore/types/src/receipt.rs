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

//! Transaction execution receipt.

use ethereum_types::Bloom;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// Receipt of a transaction execution. Produced by the executor (out of
/// scope here) and handed to the engine when a block is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Cumulative energy used in the block up to and including this
    /// transaction.
    pub energy_used: u64,
    /// Bloom over the logs emitted by the transaction.
    pub log_bloom: Bloom,
}

impl Receipt {
    /// Create a new receipt.
    pub fn new(energy_used: u64, log_bloom: Bloom) -> Receipt {
        Receipt {
            energy_used,
            log_bloom,
        }
    }
}

impl Encodable for Receipt {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.energy_used);
        s.append(&self.log_bloom);
    }
}

impl Decodable for Receipt {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        Ok(Receipt {
            energy_used: r.val_at(0)?,
            log_bloom: r.val_at(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Receipt;
    use ethereum_types::Bloom;

    #[test]
    fn rlp_round_trips() {
        let receipt = Receipt::new(40_000, Bloom::repeat_byte(0x11));
        let decoded: Receipt = rlp::decode(&rlp::encode(&receipt)).unwrap();
        assert_eq!(decoded, receipt);
    }
}
