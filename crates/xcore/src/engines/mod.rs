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

//! Consensus engine specification and basic implementations.

pub mod block_reward;
pub mod cryptore;

pub use self::cryptore::{Cryptore, CryptoreConfig, FakeCryptore, SharedCryptore, Work};

use std::{
    collections::BTreeMap,
    error, fmt,
    sync::{atomic::AtomicBool, Arc},
};

use crossbeam_channel::Sender;
use ethereum_types::{H256, U256};

use client::ChainReader;
use error::Error;
use spec::CommonParams;
use state::StateDB;
use types::{
    block::Block, header::Header, receipt::Receipt, transaction::Transaction, Address,
};

/// The number of generations back that uncles can be.
pub const MAX_UNCLE_AGE: usize = 7;

/// Engine-level errors, as opposed to errors of the blocks it processes.
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum EngineError {
    /// A work package was requested while no block is being sealed.
    NoMiningWork,
    /// The engine has been closed.
    Stopped,
    /// Invalid engine configuration or environment.
    Custom(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::EngineError::*;
        let msg = match *self {
            NoMiningWork => "No mining work available yet".into(),
            Stopped => "Engine has been stopped".into(),
            Custom(ref s) => s.clone(),
        };

        f.write_fmt(format_args!("Engine error ({})", msg))
    }
}

impl error::Error for EngineError {
    fn description(&self) -> &str {
        "Engine error"
    }
}

/// A proof-of-work consensus engine.
///
/// One engine instance serves a client: the importer verifies through it,
/// the miner prepares, finalizes and seals through it, and the RPC layer
/// reaches the remote sealer through the concrete [`Cryptore`] type.
/// Verification methods are safe to call from worker threads.
pub trait Engine: Sync + Send {
    /// The name of this engine.
    fn name(&self) -> &str;

    /// The chain parameters this engine was constructed with.
    fn params(&self) -> &CommonParams;

    /// The address receiving the reward for `header`: its author.
    fn author(&self, header: &Header) -> Address {
        *header.author()
    }

    /// Additional engine-specific information for the user/developer
    /// concerning `header`.
    fn extra_info(&self, _header: &Header) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Verify `header` against its parent as found through `chain`.
    /// Headers the chain already contains verify trivially; a missing
    /// parent is `UnknownAncestor`.
    fn verify_header(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        check_seal: bool,
    ) -> Result<(), Error>;

    /// Verify `header` against a known `parent`: the stateless family
    /// checks plus, when `check_seal` is set, the proof-of-work. `now`
    /// anchors the future-block bound; uncles are exempt from it.
    fn verify_block_family(
        &self,
        header: &Header,
        parent: &Header,
        is_uncle: bool,
        check_seal: bool,
        now: u64,
    ) -> Result<(), Error>;

    /// Verify the uncles of `block`: count, ancestry window, uniqueness and
    /// the uncle headers themselves.
    fn verify_uncles(&self, chain: &dyn ChainReader, block: &Block) -> Result<(), Error>;

    /// Verify the proof-of-work seal of `header` against its declared
    /// difficulty.
    fn verify_seal(&self, header: &Header) -> Result<(), Error>;

    /// Populate the difficulty of a header under construction from its
    /// parent.
    fn prepare(&self, chain: &dyn ChainReader, header: &mut Header) -> Result<(), Error>;

    /// Apply block and uncle rewards, then move the resulting state root
    /// into `header`.
    fn finalize(
        &self,
        chain: &dyn ChainReader,
        header: &mut Header,
        state: &mut dyn StateDB,
        transactions: &[Transaction],
        uncles: &[Header],
    ) -> Result<(), Error>;

    /// Like `finalize`, but also assemble the resulting block.
    fn finalize_and_assemble(
        &self,
        chain: &dyn ChainReader,
        header: Header,
        state: &mut dyn StateDB,
        transactions: Vec<Transaction>,
        uncles: Vec<Header>,
        receipts: Vec<Receipt>,
    ) -> Result<Block, Error>;

    /// Start searching for a nonce that seals `block`. The sealed block is
    /// delivered on `results`; nothing is delivered if `stop` is raised or
    /// a later `seal` call supersedes this one. At most one sealing job per
    /// engine is live.
    fn seal(
        &self,
        chain: &dyn ChainReader,
        block: Block,
        results: Sender<Block>,
        stop: Arc<AtomicBool>,
    ) -> Result<(), Error>;

    /// The hash the proof-of-work is computed over. Independent of the
    /// header's nonce and mix digest.
    fn seal_hash(&self, header: &Header) -> H256 {
        header.bare_hash()
    }

    /// The difficulty a child of `parent` sealed at `time` must declare.
    fn calc_difficulty(&self, time: u64, parent: &Header) -> U256;

    /// Aggregate hash rate in hashes per second: local workers plus live
    /// remote miner reports.
    fn hashrate(&self) -> f64 {
        0.0
    }

    /// Number of local sealing threads. Zero means one per logical CPU,
    /// negative disables local sealing.
    fn threads(&self) -> isize {
        0
    }

    /// Change the local sealing thread count; an in-flight sealing job is
    /// restarted with the new pool size.
    fn set_threads(&self, _threads: isize) {}

    /// Shut the engine down: abort sealing, drain the remote sealer and
    /// release the proof-of-work VM. Idempotent.
    fn close(&self) {}
}
