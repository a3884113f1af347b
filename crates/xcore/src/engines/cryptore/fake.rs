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

//! Stand-in engines that skip the proof-of-work.
//!
//! They share the difficulty and reward rules of [`Cryptore`] but accept
//! every seal (optionally delayed, optionally failing one block number) or,
//! in full-fake form, skip header verification entirely. There is no remote
//! sealer and no VM behind them.

use std::{
    sync::{atomic::AtomicBool, Arc},
    thread,
    time::Duration,
};

use crossbeam_channel::Sender;
use ethereum_types::U256;
use unexpected::OutOfBounds;

use client::ChainReader;
use engines::{block_reward, Engine};
use error::Error;
use spec::CommonParams;
use state::StateDB;
use types::{
    block::Block, errors::BlockError, header::Header, receipt::Receipt,
    transaction::Transaction,
};
use verification;

use super::calculate_difficulty;

/// A consensus engine which accepts seals without proof-of-work.
pub struct FakeCryptore {
    params: CommonParams,
    delay: Option<Duration>,
    fail_at: Option<u64>,
    full: bool,
}

impl FakeCryptore {
    /// Accept every seal immediately.
    pub fn new_faker(params: CommonParams) -> FakeCryptore {
        FakeCryptore {
            params,
            delay: None,
            fail_at: None,
            full: false,
        }
    }

    /// Accept every seal except the one of the block at `number`.
    pub fn new_fake_failer(params: CommonParams, number: u64) -> FakeCryptore {
        FakeCryptore {
            fail_at: Some(number),
            ..FakeCryptore::new_faker(params)
        }
    }

    /// Accept every seal after sleeping for `delay`.
    pub fn new_fake_delayer(params: CommonParams, delay: Duration) -> FakeCryptore {
        FakeCryptore {
            delay: Some(delay),
            ..FakeCryptore::new_faker(params)
        }
    }

    /// Accept everything; header verification is skipped entirely.
    pub fn new_full_faker(params: CommonParams) -> FakeCryptore {
        FakeCryptore {
            full: true,
            ..FakeCryptore::new_faker(params)
        }
    }
}

impl Engine for FakeCryptore {
    fn name(&self) -> &str {
        "FakeCryptore"
    }

    fn params(&self) -> &CommonParams {
        &self.params
    }

    fn verify_header(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        check_seal: bool,
    ) -> Result<(), Error> {
        if self.full {
            return Ok(());
        }
        verification::verify_header(self, chain, header, check_seal)
    }

    fn verify_block_family(
        &self,
        header: &Header,
        parent: &Header,
        is_uncle: bool,
        check_seal: bool,
        now: u64,
    ) -> Result<(), Error> {
        if self.full {
            return Ok(());
        }
        verification::verify_family(self, header, parent, is_uncle, check_seal, now)
    }

    fn verify_uncles(&self, chain: &dyn ChainReader, block: &Block) -> Result<(), Error> {
        if self.full {
            return Ok(());
        }
        verification::verify_uncles(self, chain, block)
    }

    fn verify_seal(&self, header: &Header) -> Result<(), Error> {
        if self.full {
            return Ok(());
        }
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        if self.fail_at == Some(header.number()) {
            return Err(BlockError::InvalidProofOfWork(OutOfBounds {
                min: None,
                max: None,
                found: U256::zero(),
            })
            .into());
        }
        Ok(())
    }

    fn prepare(&self, chain: &dyn ChainReader, header: &mut Header) -> Result<(), Error> {
        let parent = chain
            .header(header.parent_hash(), header.number().saturating_sub(1))
            .ok_or_else(|| BlockError::UnknownAncestor(*header.parent_hash()))?;
        header.set_difficulty(calculate_difficulty(
            &self.params,
            header.timestamp(),
            &parent,
        ));
        Ok(())
    }

    fn finalize(
        &self,
        _chain: &dyn ChainReader,
        header: &mut Header,
        state: &mut dyn StateDB,
        _transactions: &[Transaction],
        uncles: &[Header],
    ) -> Result<(), Error> {
        block_reward::apply_block_rewards(state, header, uncles, &self.params);
        header.set_state_root(state.intermediate_root(true));
        Ok(())
    }

    fn finalize_and_assemble(
        &self,
        chain: &dyn ChainReader,
        mut header: Header,
        state: &mut dyn StateDB,
        transactions: Vec<Transaction>,
        uncles: Vec<Header>,
        receipts: Vec<Receipt>,
    ) -> Result<Block, Error> {
        header.set_uncles_hash(Block::uncles_digest(&uncles));
        self.finalize(chain, &mut header, state, &transactions, &uncles)?;
        Ok(Block::new(header, transactions, uncles, receipts))
    }

    fn seal(
        &self,
        _chain: &dyn ChainReader,
        block: Block,
        results: Sender<Block>,
        _stop: Arc<AtomicBool>,
    ) -> Result<(), Error> {
        // the input block, unchanged, is the sealed block
        let _ = results.send(block);
        Ok(())
    }

    fn calc_difficulty(&self, time: u64, parent: &Header) -> U256 {
        calculate_difficulty(&self.params, time, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::test_client::{make_child, TestChainReader};
    use crossbeam_channel::unbounded;

    #[test]
    fn fake_seal_returns_the_block_unchanged() {
        let engine = FakeCryptore::new_faker(CommonParams::test());
        let chain = TestChainReader::new_test();
        let block = Block::from_header(make_child(&engine, &chain.genesis()));
        let hash = block.header.hash();

        let (tx, rx) = unbounded();
        engine
            .seal(&chain, block, tx, Arc::new(AtomicBool::new(false)))
            .unwrap();
        assert_eq!(rx.recv().unwrap().header.hash(), hash);
    }

    #[test]
    fn failer_rejects_only_its_block_number() {
        let engine = FakeCryptore::new_fake_failer(CommonParams::test(), 3);
        let mut header = Header::new();
        header.set_number(2);
        assert!(engine.verify_seal(&header).is_ok());
        header.set_number(3);
        assert!(engine.verify_seal(&header).is_err());
        header.set_number(4);
        assert!(engine.verify_seal(&header).is_ok());
    }

    #[test]
    fn delayer_sleeps_before_accepting() {
        let delay = Duration::from_millis(50);
        let engine = FakeCryptore::new_fake_delayer(CommonParams::test(), delay);
        let started = ::std::time::Instant::now();
        assert!(engine.verify_seal(&Header::new()).is_ok());
        assert!(started.elapsed() >= delay);
    }

    #[test]
    fn full_faker_skips_header_verification() {
        let engine = FakeCryptore::new_full_faker(CommonParams::test());
        let chain = TestChainReader::new_test();
        // nonsense header with no parent anywhere
        let mut header = Header::new();
        header.set_number(99);
        assert!(engine.verify_header(&chain, &header, true).is_ok());
    }

    #[test]
    fn faker_still_enforces_the_family_rules() {
        let engine = FakeCryptore::new_faker(CommonParams::test());
        let chain = TestChainReader::new_test();
        let mut header = make_child(&engine, &chain.genesis());
        header.set_difficulty(U256::from(1234567));
        assert!(engine.verify_header(&chain, &header, true).is_err());
    }
}
