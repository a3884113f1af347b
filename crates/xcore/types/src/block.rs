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

//! Block type.

use ethereum_types::H256;
use parity_bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::{hash::sha3, header::Header, receipt::Receipt, transaction::Transaction};

/// A block: header plus the transaction and uncle lists it commits to.
///
/// Receipts are kept alongside for block assembly; they are not part of the
/// wire encoding (the header commits to them through `receipts_root`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The header of this block.
    pub header: Header,
    /// The transactions in this block.
    pub transactions: Vec<Transaction>,
    /// The uncles of this block.
    pub uncles: Vec<Header>,
    /// The receipts produced by executing `transactions`.
    pub receipts: Vec<Receipt>,
}

impl Block {
    /// Assemble a block from its parts.
    pub fn new(
        header: Header,
        transactions: Vec<Transaction>,
        uncles: Vec<Header>,
        receipts: Vec<Receipt>,
    ) -> Block {
        Block {
            header,
            transactions,
            uncles,
            receipts,
        }
    }

    /// Wrap a bare header into a block with empty bodies.
    pub fn from_header(header: Header) -> Block {
        Block {
            header,
            ..Default::default()
        }
    }

    /// The digest committing to a list of uncle headers; what
    /// `Header::uncles_hash` must be set to.
    pub fn uncles_digest(uncles: &[Header]) -> H256 {
        let mut s = RlpStream::new();
        s.append_list(uncles);
        sha3(s.out())
    }

    /// Get the RLP encoding of this block.
    pub fn rlp_bytes(&self) -> Bytes {
        rlp::encode(self)
    }
}

impl Encodable for Block {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.header);
        s.append_list(&self.transactions);
        s.append_list(&self.uncles);
    }
}

impl Decodable for Block {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        if r.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Block {
            header: r.val_at(0)?,
            transactions: r.list_at(1)?,
            uncles: r.list_at(2)?,
            receipts: Vec::new(),
        })
    }
}
