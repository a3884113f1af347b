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

//! Transaction type.
//!
//! The consensus engine never executes transactions; blocks carry them as
//! opaque payload between the miner and the importer. Only the fields needed
//! to hash and (de)serialize a block are modelled here.

use ethereum_types::{H256, U256};
use parity_bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::{address::Address, hash::sha3};

/// Transaction action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a contract.
    Create,
    /// Message call to a given address.
    Call(Address),
}

impl Default for Action {
    fn default() -> Action {
        Action::Create
    }
}

impl Encodable for Action {
    fn rlp_append(&self, s: &mut RlpStream) {
        match *self {
            Action::Create => s.append_internal(&""),
            Action::Call(ref addr) => s.append_internal(addr),
        };
    }
}

impl Decodable for Action {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        if r.is_empty() {
            if r.is_data() {
                Ok(Action::Create)
            } else {
                Err(DecoderError::RlpExpectedToBeData)
            }
        } else {
            Ok(Action::Call(r.as_val()?))
        }
    }
}

/// A transaction, as carried inside a block body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Nonce.
    pub nonce: u64,
    /// Energy price.
    pub energy_price: U256,
    /// Energy paid up front for the execution.
    pub energy: u64,
    /// Action, see [`Action`].
    pub action: Action,
    /// Transferred value.
    pub value: U256,
    /// Transaction data.
    pub data: Bytes,
}

impl Transaction {
    /// The SHA3-256 of the RLP encoding of this transaction.
    pub fn hash(&self) -> H256 {
        sha3(rlp::encode(self))
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(6);
        s.append(&self.nonce);
        s.append(&self.energy_price);
        s.append(&self.energy);
        s.append(&self.action);
        s.append(&self.value);
        s.append(&self.data);
    }
}

impl Decodable for Transaction {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        if r.item_count()? != 6 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Transaction {
            nonce: r.val_at(0)?,
            energy_price: r.val_at(1)?,
            energy: r.val_at(2)?,
            action: r.val_at(3)?,
            value: r.val_at(4)?,
            data: r.val_at(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Transaction};
    use crate::address::Address;
    use ethereum_types::U256;

    #[test]
    fn rlp_round_trips() {
        let tx = Transaction {
            nonce: 3,
            energy_price: U256::from(20_000_000_000u64),
            energy: 21_000,
            action: Action::Call(Address::repeat_byte(0xab)),
            value: U256::from(10),
            data: vec![0x01, 0x02],
        };
        let decoded: Transaction = rlp::decode(&rlp::encode(&tx)).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn create_round_trips() {
        let tx = Transaction {
            action: Action::Create,
            ..Default::default()
        };
        let decoded: Transaction = rlp::decode(&rlp::encode(&tx)).unwrap();
        assert_eq!(decoded.action, Action::Create);
    }

    #[test]
    fn hash_depends_on_payload() {
        let a = Transaction::default();
        let mut b = Transaction::default();
        b.nonce = 1;
        assert_ne!(a.hash(), b.hash());
    }
}
