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

//! Block header.

use ethereum_types::{Bloom, H256, U256};
use parity_bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::{
    address::Address,
    hash::{sha3, SHA3_EMPTY_LIST_RLP, SHA3_NULL_RLP},
    BlockNumber,
};

/// Semantic boolean for when the seal fields (mix digest and nonce) are
/// included in an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seal {
    /// The seal fields are present.
    With,
    /// The seal fields are not present.
    Without,
}

/// A block header.
///
/// The seal of a header is its `(mix_digest, nonce)` pair. The bare hash
/// excludes both, so it is stable while a sealer searches the nonce space;
/// the full hash identifies the sealed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Parent hash.
    parent_hash: H256,
    /// Digest of the RLP of the uncle list.
    uncles_hash: H256,
    /// Block author (receives the block reward).
    author: Address,
    /// State root.
    state_root: H256,
    /// Transactions root.
    transactions_root: H256,
    /// Receipts root.
    receipts_root: H256,
    /// Bloom filter over the logs of the block.
    log_bloom: Bloom,
    /// Difficulty this header was sealed at.
    difficulty: U256,
    /// Block number.
    number: BlockNumber,
    /// Energy ceiling for the block.
    energy_limit: u64,
    /// Energy spent by the block.
    energy_used: u64,
    /// Timestamp, seconds since the unix epoch.
    timestamp: u64,
    /// Arbitrary author payload, bounded by the chain params.
    extra_data: Bytes,
    /// Seal: carried for client compatibility, never interpreted.
    mix_digest: H256,
    /// Seal: the proof-of-work nonce.
    nonce: u64,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            parent_hash: H256::zero(),
            uncles_hash: SHA3_EMPTY_LIST_RLP,
            author: Address::zero(),
            state_root: SHA3_NULL_RLP,
            transactions_root: SHA3_NULL_RLP,
            receipts_root: SHA3_NULL_RLP,
            log_bloom: Bloom::zero(),
            difficulty: U256::zero(),
            number: 0,
            energy_limit: 0,
            energy_used: 0,
            timestamp: 0,
            extra_data: Vec::new(),
            mix_digest: H256::zero(),
            nonce: 0,
        }
    }
}

impl Header {
    /// Create a new, default-valued header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent hash.
    pub fn parent_hash(&self) -> &H256 {
        &self.parent_hash
    }

    /// Uncles digest.
    pub fn uncles_hash(&self) -> &H256 {
        &self.uncles_hash
    }

    /// Block author.
    pub fn author(&self) -> &Address {
        &self.author
    }

    /// State root.
    pub fn state_root(&self) -> &H256 {
        &self.state_root
    }

    /// Transactions root.
    pub fn transactions_root(&self) -> &H256 {
        &self.transactions_root
    }

    /// Receipts root.
    pub fn receipts_root(&self) -> &H256 {
        &self.receipts_root
    }

    /// Log bloom.
    pub fn log_bloom(&self) -> &Bloom {
        &self.log_bloom
    }

    /// Difficulty.
    pub fn difficulty(&self) -> &U256 {
        &self.difficulty
    }

    /// Block number.
    pub fn number(&self) -> BlockNumber {
        self.number
    }

    /// Energy limit.
    pub fn energy_limit(&self) -> u64 {
        self.energy_limit
    }

    /// Energy used.
    pub fn energy_used(&self) -> u64 {
        self.energy_used
    }

    /// Timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Extra data.
    pub fn extra_data(&self) -> &Bytes {
        &self.extra_data
    }

    /// Mix digest seal field.
    pub fn mix_digest(&self) -> &H256 {
        &self.mix_digest
    }

    /// Nonce seal field.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Whether the header declares any uncles.
    pub fn has_uncles(&self) -> bool {
        self.uncles_hash != SHA3_EMPTY_LIST_RLP
    }

    /// Set the parent hash.
    pub fn set_parent_hash(&mut self, a: H256) {
        self.parent_hash = a;
    }

    /// Set the uncles digest.
    pub fn set_uncles_hash(&mut self, a: H256) {
        self.uncles_hash = a;
    }

    /// Set the author.
    pub fn set_author(&mut self, a: Address) {
        self.author = a;
    }

    /// Set the state root.
    pub fn set_state_root(&mut self, a: H256) {
        self.state_root = a;
    }

    /// Set the transactions root.
    pub fn set_transactions_root(&mut self, a: H256) {
        self.transactions_root = a;
    }

    /// Set the receipts root.
    pub fn set_receipts_root(&mut self, a: H256) {
        self.receipts_root = a;
    }

    /// Set the log bloom.
    pub fn set_log_bloom(&mut self, a: Bloom) {
        self.log_bloom = a;
    }

    /// Set the difficulty.
    pub fn set_difficulty(&mut self, a: U256) {
        self.difficulty = a;
    }

    /// Set the block number.
    pub fn set_number(&mut self, a: BlockNumber) {
        self.number = a;
    }

    /// Set the energy limit.
    pub fn set_energy_limit(&mut self, a: u64) {
        self.energy_limit = a;
    }

    /// Set the energy used.
    pub fn set_energy_used(&mut self, a: u64) {
        self.energy_used = a;
    }

    /// Set the timestamp.
    pub fn set_timestamp(&mut self, a: u64) {
        self.timestamp = a;
    }

    /// Set the extra data.
    pub fn set_extra_data(&mut self, a: Bytes) {
        self.extra_data = a;
    }

    /// Set the mix digest seal field.
    pub fn set_mix_digest(&mut self, a: H256) {
        self.mix_digest = a;
    }

    /// Set the nonce seal field.
    pub fn set_nonce(&mut self, a: u64) {
        self.nonce = a;
    }

    /// The SHA3-256 of the fully sealed header RLP.
    pub fn hash(&self) -> H256 {
        sha3(self.rlp(Seal::With))
    }

    /// The SHA3-256 of the header RLP without the seal fields. This is the
    /// value the proof-of-work is computed over and it does not change while
    /// a sealer iterates nonces.
    pub fn bare_hash(&self) -> H256 {
        sha3(self.rlp(Seal::Without))
    }

    /// The RLP of this header, with or without the seal fields.
    pub fn rlp(&self, with_seal: Seal) -> Bytes {
        let mut s = RlpStream::new();
        self.stream_rlp(&mut s, with_seal);
        s.out()
    }

    /// Place this header into an RLP stream `s`.
    fn stream_rlp(&self, s: &mut RlpStream, with_seal: Seal) {
        let fields = match with_seal {
            Seal::With => 15,
            Seal::Without => 13,
        };
        s.begin_list(fields);
        s.append(&self.parent_hash);
        s.append(&self.uncles_hash);
        s.append(&self.author);
        s.append(&self.state_root);
        s.append(&self.transactions_root);
        s.append(&self.receipts_root);
        s.append(&self.log_bloom);
        s.append(&self.difficulty);
        s.append(&self.number);
        s.append(&self.energy_limit);
        s.append(&self.energy_used);
        s.append(&self.timestamp);
        s.append(&self.extra_data);
        if let Seal::With = with_seal {
            s.append(&self.mix_digest);
            s.append(&self.nonce);
        }
    }
}

impl Encodable for Header {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.stream_rlp(s, Seal::With);
    }
}

impl Decodable for Header {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        if r.item_count()? != 15 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Header {
            parent_hash: r.val_at(0)?,
            uncles_hash: r.val_at(1)?,
            author: r.val_at(2)?,
            state_root: r.val_at(3)?,
            transactions_root: r.val_at(4)?,
            receipts_root: r.val_at(5)?,
            log_bloom: r.val_at(6)?,
            difficulty: r.val_at(7)?,
            number: r.val_at(8)?,
            energy_limit: r.val_at(9)?,
            energy_used: r.val_at(10)?,
            timestamp: r.val_at(11)?,
            extra_data: r.val_at(12)?,
            mix_digest: r.val_at(13)?,
            nonce: r.val_at(14)?,
        })
    }
}
