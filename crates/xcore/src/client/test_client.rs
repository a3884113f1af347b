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

//! Test client.

use std::collections::HashMap;

use ethereum_types::{H256, U256};
use parking_lot::RwLock;

use client::ChainReader;
use engines::Engine;
use spec::CommonParams;
use state::StateDB;
use types::{block::Block, hash::sha3, header::Header, Address, BlockNumber};

/// In-memory chain for tests. Blocks inserted become visible to every
/// `ChainReader` method at once.
pub struct TestChainReader {
    /// Chain parameters handed to the engine.
    pub params: CommonParams,
    /// All known blocks by hash.
    pub blocks: RwLock<HashMap<H256, Block>>,
    /// Genesis block hash.
    pub genesis_hash: H256,
}

impl TestChainReader {
    /// A chain holding only the genesis block derived from `params`.
    pub fn new(params: CommonParams) -> TestChainReader {
        let genesis = genesis_header(&params);
        let genesis_hash = genesis.hash();
        let mut blocks = HashMap::new();
        blocks.insert(genesis_hash, Block::from_header(genesis));
        TestChainReader {
            params,
            blocks: RwLock::new(blocks),
            genesis_hash,
        }
    }

    /// A chain with the test parameters.
    pub fn new_test() -> TestChainReader {
        TestChainReader::new(CommonParams::test())
    }

    /// The genesis header.
    pub fn genesis(&self) -> Header {
        self.blocks.read()[&self.genesis_hash].header.clone()
    }

    /// Make a block part of the chain.
    pub fn insert(&self, block: Block) {
        self.blocks.write().insert(block.header.hash(), block);
    }
}

impl ChainReader for TestChainReader {
    fn config(&self) -> &CommonParams {
        &self.params
    }

    fn header_by_hash(&self, hash: &H256) -> Option<Header> {
        self.blocks.read().get(hash).map(|b| b.header.clone())
    }

    fn header(&self, hash: &H256, number: BlockNumber) -> Option<Header> {
        self.blocks
            .read()
            .get(hash)
            .filter(|b| b.header.number() == number)
            .map(|b| b.header.clone())
    }

    fn block(&self, hash: &H256) -> Option<Block> {
        self.blocks.read().get(hash).cloned()
    }
}

/// The genesis header for `params`.
pub fn genesis_header(params: &CommonParams) -> Header {
    let mut header = Header::new();
    header.set_difficulty(params.minimum_difficulty);
    header.set_energy_limit(8_000_000);
    header.set_timestamp(1_000);
    header
}

/// A bare header extending `parent` that satisfies the family rules of
/// `engine`; tests mutate it from there to provoke specific failures.
pub fn make_child(engine: &dyn Engine, parent: &Header) -> Header {
    let mut header = Header::new();
    header.set_parent_hash(parent.hash());
    header.set_number(parent.number() + 1);
    header.set_timestamp(parent.timestamp() + 4);
    header.set_energy_limit(parent.energy_limit());
    header.set_difficulty(engine.calc_difficulty(header.timestamp(), parent));
    header
}

/// In-memory state database for tests.
#[derive(Default)]
pub struct TestStateDB {
    /// Balances by address.
    pub balances: HashMap<Address, U256>,
    /// Every account touched so far, in touch order.
    pub touched: Vec<Address>,
}

impl TestStateDB {
    /// Fresh empty state.
    pub fn new() -> TestStateDB {
        TestStateDB::default()
    }
}

impl StateDB for TestStateDB {
    fn add_balance(&mut self, address: &Address, amount: &U256) {
        self.touched.push(*address);
        *self.balances.entry(*address).or_insert_with(U256::zero) += *amount;
    }

    fn intermediate_root(&mut self, _delete_empty: bool) -> H256 {
        // digest over the sorted balance set; any content change moves it
        let mut accounts: Vec<_> = self.balances.iter().collect();
        accounts.sort_by_key(|&(address, _)| *address);
        let mut data = Vec::new();
        for (address, balance) in accounts {
            data.extend_from_slice(address.as_bytes());
            let mut buf = [0u8; 32];
            balance.to_big_endian(&mut buf);
            data.extend_from_slice(&buf);
        }
        sha3(&data)
    }
}
