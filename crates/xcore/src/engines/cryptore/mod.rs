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

//! The Cryptore engine: RandomX proof-of-work consensus.
//!
//! [`Cryptore`] is the production engine. [`FakeCryptore`] provides the
//! development and test stand-ins that share its difficulty and reward
//! rules but accept (or fail) seals without hashing. [`SharedCryptore`]
//! borrows one process-wide instance so several clients in one process can
//! mine against a single VM.

mod fake;
mod remote;
mod sealer;
mod work_notify;

pub use self::fake::FakeCryptore;
pub use self::remote::Work;

use std::{
    cmp,
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Once,
    },
};

use crossbeam_channel::Sender;
use cryptore::{difficulty_to_boundary, CryptoreManager};
use ethereum_types::{BigEndianHash, H256, U256};
use parking_lot::Mutex;
use unexpected::OutOfBounds;
use url::Url;

use client::ChainReader;
use engines::{block_reward, Engine, EngineError};
use error::{Error, ErrorKind};
use spec::CommonParams;
use state::StateDB;
use types::{
    block::Block, errors::BlockError, header::Header, receipt::Receipt,
    transaction::Transaction,
};
use verification;

use self::remote::RemoteSealer;
use self::sealer::Sealer;

/// Cryptore engine configuration.
#[derive(Debug, Clone, Default)]
pub struct CryptoreConfig {
    /// URLs notified of every new work package.
    pub notify_urls: Vec<Url>,
    /// Skip the proof-of-work check on remotely submitted solutions.
    pub noverify: bool,
    /// Touch reward accounts on finalization instead of paying out.
    pub no_reward: bool,
}

/// The difficulty a block sealed at `time` on top of `parent` must declare.
///
/// `parent_diff + (parent_diff / divisor) * x` with
/// `x = b - (time - parent_time) / increment_divisor` clamped at `-99`,
/// where `b` is 1, or 2 when the parent declared uncles. The result never
/// goes below the chain's minimum difficulty.
pub fn calculate_difficulty(params: &CommonParams, time: u64, parent: &Header) -> U256 {
    let bomb_factor = if parent.has_uncles() { 2u64 } else { 1 };
    let parent_difficulty = *parent.difficulty();
    let adjustment = parent_difficulty / params.difficulty_bound_divisor;

    let elapsed = time.saturating_sub(parent.timestamp());
    let increments = elapsed / params.difficulty_increment_divisor;
    let target = if increments <= bomb_factor {
        parent_difficulty + adjustment * U256::from(bomb_factor - increments)
    } else {
        parent_difficulty - adjustment * U256::from(cmp::min(increments - bomb_factor, 99))
    };

    cmp::max(params.minimum_difficulty, target)
}

/// Check the proof-of-work seal of `header` against its declared
/// difficulty. Shared between the engine and the remote sealer loop.
pub(crate) fn verify_block_seal(
    manager: &CryptoreManager,
    header: &Header,
) -> Result<(), Error> {
    let difficulty = *header.difficulty();
    if difficulty.is_zero() {
        return Err(BlockError::InvalidDifficulty(OutOfBounds {
            min: Some(U256::one()),
            max: None,
            found: difficulty,
        })
        .into());
    }

    let out = match manager.compute(&header.bare_hash(), header.nonce()) {
        Ok(out) => out,
        Err(e) => {
            warn!(target: "engine", "RandomX failure while checking a seal: {}", e);
            return Err(BlockError::InvalidProofOfWork(OutOfBounds {
                min: None,
                max: None,
                found: U256::zero(),
            })
            .into());
        }
    };

    let boundary = difficulty_to_boundary(&difficulty);
    if out > boundary {
        return Err(BlockError::InvalidProofOfWork(OutOfBounds {
            min: None,
            max: Some(boundary.into_uint()),
            found: out.into_uint(),
        })
        .into());
    }
    Ok(())
}

/// Engine using the Cryptore proof-of-work: RandomX over the bare header
/// hash and a nonce, with a fixed VM key.
pub struct Cryptore {
    params: CommonParams,
    config: CryptoreConfig,
    manager: Arc<CryptoreManager>,
    sealer: Sealer,
    remote: RemoteSealer,
    closed: AtomicBool,
    close_once: Once,
}

impl Cryptore {
    /// Create a new engine. This allocates the RandomX VM; an allocation
    /// failure is fatal and surfaces here.
    pub fn new(params: CommonParams, config: CryptoreConfig) -> Result<Arc<Cryptore>, Error> {
        let manager = Arc::new(
            CryptoreManager::new().map_err(|e| ErrorKind::PowUnavailable(e.to_string()))?,
        );
        Ok(Cryptore::with_manager(params, config, manager))
    }

    /// Engine over an existing VM handle. Lets tests share one RandomX
    /// instance; production construction goes through `new`.
    pub(crate) fn with_manager(
        params: CommonParams,
        config: CryptoreConfig,
        manager: Arc<CryptoreManager>,
    ) -> Arc<Cryptore> {
        let remote = RemoteSealer::spawn(manager.clone(), config.noverify, &config.notify_urls);
        Arc::new(Cryptore {
            sealer: Sealer::new(manager.clone()),
            remote,
            manager,
            params,
            config,
            closed: AtomicBool::new(false),
            close_once: Once::new(),
        })
    }

    /// Engine for unit tests: normal semantics over the shared test VM,
    /// with the difficulty floor lowered so sealing terminates quickly.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn new_test() -> Arc<Cryptore> {
        Cryptore::with_manager(
            CommonParams::test(),
            CryptoreConfig::default(),
            test_manager(),
        )
    }

    /// The current work package for remote miners.
    pub fn work(&self) -> Result<Work, Error> {
        self.remote.work()
    }

    /// Try to accept a remotely mined solution for the stashed work package
    /// with the given seal hash.
    pub fn submit_work(&self, nonce: u64, seal_hash: H256) -> bool {
        self.remote.submit_work(nonce, seal_hash)
    }

    /// Record the hash rate a remote miner reports for itself. Returns
    /// false once the engine is closed.
    pub fn submit_hashrate(&self, rate: u64, id: H256) -> bool {
        self.remote.submit_hashrate(rate, id)
    }
}

impl Engine for Cryptore {
    fn name(&self) -> &str {
        "Cryptore"
    }

    fn params(&self) -> &CommonParams {
        &self.params
    }

    fn extra_info(&self, header: &Header) -> BTreeMap<String, String> {
        let mut info = BTreeMap::new();
        info.insert("nonce".to_owned(), format!("{:#x}", header.nonce()));
        info.insert("mixDigest".to_owned(), format!("{:#x}", header.mix_digest()));
        info
    }

    fn verify_header(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        check_seal: bool,
    ) -> Result<(), Error> {
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
        verification::verify_family(self, header, parent, is_uncle, check_seal, now)
    }

    fn verify_uncles(&self, chain: &dyn ChainReader, block: &Block) -> Result<(), Error> {
        verification::verify_uncles(self, chain, block)
    }

    fn verify_seal(&self, header: &Header) -> Result<(), Error> {
        verify_block_seal(&self.manager, header)
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
        if self.config.no_reward {
            block_reward::touch_rewards(state, header, uncles);
        } else {
            block_reward::apply_block_rewards(state, header, uncles, &self.params);
        }
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
        stop: Arc<AtomicBool>,
    ) -> Result<(), Error> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(EngineError::Stopped.into());
        }
        // Remote miners get the package even when local sealing is idle.
        self.remote.notify_work(block.clone(), results.clone());
        self.sealer.seal(block, results, stop);
        Ok(())
    }

    fn calc_difficulty(&self, time: u64, parent: &Header) -> U256 {
        calculate_difficulty(&self.params, time, parent)
    }

    fn hashrate(&self) -> f64 {
        self.sealer.hashrate() + self.remote.hashrate()
    }

    fn threads(&self) -> isize {
        self.sealer.threads()
    }

    fn set_threads(&self, threads: isize) {
        self.sealer.set_threads(threads);
    }

    fn close(&self) {
        self.close_once.call_once(|| {
            debug!(target: "engine", "closing cryptore engine");
            self.closed.store(true, Ordering::SeqCst);
            self.sealer.abort();
            self.remote.shutdown();
        });
    }
}

impl Drop for Cryptore {
    fn drop(&mut self) {
        self.close();
    }
}

lazy_static! {
    static ref SHARED_CRYPTORE: Mutex<Option<Arc<Cryptore>>> = Mutex::new(None);
}

#[cfg(any(test, feature = "test-helpers"))]
lazy_static! {
    static ref TEST_MANAGER: Arc<CryptoreManager> =
        Arc::new(CryptoreManager::new().expect("RandomX allocates in the test environment; qed"));
}

#[cfg(any(test, feature = "test-helpers"))]
fn test_manager() -> Arc<CryptoreManager> {
    TEST_MANAGER.clone()
}

/// Initialize the process-wide shared engine. The first call constructs the
/// instance, later calls return it unchanged.
pub fn init_shared(params: CommonParams, config: CryptoreConfig) -> Result<Arc<Cryptore>, Error> {
    let mut shared = SHARED_CRYPTORE.lock();
    if let Some(ref engine) = *shared {
        return Ok(engine.clone());
    }
    let engine = Cryptore::new(params, config)?;
    *shared = Some(engine.clone());
    Ok(engine)
}

/// Tear the shared engine down at process shutdown. Engines borrowed
/// earlier keep the instance alive until they drop.
pub fn teardown_shared() {
    if let Some(engine) = SHARED_CRYPTORE.lock().take() {
        engine.close();
    }
}

/// An engine borrowing the process-wide [`Cryptore`] instance set up with
/// [`init_shared`]. All operations are forwarded; closing a borrower leaves
/// the shared instance running.
pub struct SharedCryptore {
    inner: Arc<Cryptore>,
}

impl SharedCryptore {
    /// Borrow the shared engine; [`init_shared`] must have run.
    pub fn new() -> Result<SharedCryptore, Error> {
        SHARED_CRYPTORE
            .lock()
            .clone()
            .map(|inner| SharedCryptore { inner })
            .ok_or_else(|| {
                EngineError::Custom("shared cryptore engine not initialized".into()).into()
            })
    }

    /// The underlying shared engine, e.g. for wiring up RPC.
    pub fn engine(&self) -> Arc<Cryptore> {
        self.inner.clone()
    }
}

impl Engine for SharedCryptore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn params(&self) -> &CommonParams {
        self.inner.params()
    }

    fn extra_info(&self, header: &Header) -> BTreeMap<String, String> {
        self.inner.extra_info(header)
    }

    fn verify_header(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        check_seal: bool,
    ) -> Result<(), Error> {
        self.inner.verify_header(chain, header, check_seal)
    }

    fn verify_block_family(
        &self,
        header: &Header,
        parent: &Header,
        is_uncle: bool,
        check_seal: bool,
        now: u64,
    ) -> Result<(), Error> {
        self.inner
            .verify_block_family(header, parent, is_uncle, check_seal, now)
    }

    fn verify_uncles(&self, chain: &dyn ChainReader, block: &Block) -> Result<(), Error> {
        self.inner.verify_uncles(chain, block)
    }

    fn verify_seal(&self, header: &Header) -> Result<(), Error> {
        self.inner.verify_seal(header)
    }

    fn prepare(&self, chain: &dyn ChainReader, header: &mut Header) -> Result<(), Error> {
        self.inner.prepare(chain, header)
    }

    fn finalize(
        &self,
        chain: &dyn ChainReader,
        header: &mut Header,
        state: &mut dyn StateDB,
        transactions: &[Transaction],
        uncles: &[Header],
    ) -> Result<(), Error> {
        self.inner
            .finalize(chain, header, state, transactions, uncles)
    }

    fn finalize_and_assemble(
        &self,
        chain: &dyn ChainReader,
        header: Header,
        state: &mut dyn StateDB,
        transactions: Vec<Transaction>,
        uncles: Vec<Header>,
        receipts: Vec<Receipt>,
    ) -> Result<Block, Error> {
        self.inner
            .finalize_and_assemble(chain, header, state, transactions, uncles, receipts)
    }

    fn seal(
        &self,
        chain: &dyn ChainReader,
        block: Block,
        results: Sender<Block>,
        stop: Arc<AtomicBool>,
    ) -> Result<(), Error> {
        self.inner.seal(chain, block, results, stop)
    }

    fn calc_difficulty(&self, time: u64, parent: &Header) -> U256 {
        self.inner.calc_difficulty(time, parent)
    }

    fn hashrate(&self) -> f64 {
        self.inner.hashrate()
    }

    fn threads(&self) -> isize {
        self.inner.threads()
    }

    fn set_threads(&self, threads: isize) {
        self.inner.set_threads(threads)
    }

    fn close(&self) {
        // the shared instance outlives its borrowers; teardown_shared
        // closes it
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::test_client::{TestChainReader, TestStateDB};
    use crossbeam_channel::unbounded;
    use std::{thread, time::Duration};
    use types::Address;

    fn engine_with(config: CryptoreConfig) -> Arc<Cryptore> {
        Cryptore::with_manager(CommonParams::test(), config, test_manager())
    }

    fn wait_for_current(engine: &Cryptore, seal_hash: H256) -> Work {
        for _ in 0..200 {
            if let Ok(work) = engine.work() {
                if work.seal_hash == seal_hash {
                    return work;
                }
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("work package never became current");
    }

    fn parent_header() -> Header {
        let mut parent = Header::new();
        parent.set_number(10);
        parent.set_timestamp(1_000);
        parent.set_difficulty(U256::from(0x20000));
        parent
    }

    #[test]
    fn difficulty_rises_on_fast_blocks() {
        let params = CommonParams::test();
        let parent = parent_header();
        assert_eq!(
            calculate_difficulty(&params, 1_001, &parent),
            U256::from(0x20040)
        );
        assert_eq!(
            calculate_difficulty(&params, 1_004, &parent),
            U256::from(0x20040)
        );
    }

    #[test]
    fn difficulty_holds_at_the_target_cadence() {
        let params = CommonParams::test();
        let parent = parent_header();
        assert_eq!(
            calculate_difficulty(&params, 1_005, &parent),
            U256::from(0x20000)
        );
        assert_eq!(
            calculate_difficulty(&params, 1_009, &parent),
            U256::from(0x20000)
        );
    }

    #[test]
    fn difficulty_falls_on_slow_blocks() {
        let params = CommonParams::test();
        let parent = parent_header();
        // x = 1 - 100/5 = -19
        assert_eq!(
            calculate_difficulty(&params, 1_100, &parent),
            U256::from(0x20000 - 0x40 * 19)
        );
    }

    #[test]
    fn uncled_parents_push_difficulty_harder() {
        let params = CommonParams::test();
        let mut parent = parent_header();
        parent.set_uncles_hash(H256::repeat_byte(1));
        assert_eq!(
            calculate_difficulty(&params, 1_005, &parent),
            U256::from(0x20040)
        );
        assert_eq!(
            calculate_difficulty(&params, 1_014, &parent),
            U256::from(0x20000)
        );
        assert_eq!(
            calculate_difficulty(&params, 1_015, &parent),
            U256::from(0x1ffc0)
        );
    }

    #[test]
    fn downward_pressure_clamps_at_ninety_nine() {
        let params = CommonParams::test();
        let parent = parent_header();
        assert_eq!(
            calculate_difficulty(&params, 1_000_000, &parent),
            U256::from(0x20000 - 0x40 * 99)
        );
    }

    #[test]
    fn difficulty_never_drops_below_the_minimum() {
        let params = CommonParams::default();
        let parent = parent_header();
        assert_eq!(
            calculate_difficulty(&params, 1_100, &parent),
            params.minimum_difficulty
        );
    }

    #[test]
    fn test_mode_seals_within_seconds() {
        let engine = Cryptore::new_test();
        let chain = TestChainReader::new_test();
        engine.set_threads(1);

        let mut header = Header::new();
        header.set_number(1);
        header.set_difficulty(U256::from(2));

        let (results, sealed) = unbounded();
        engine
            .seal(
                &chain,
                Block::from_header(header),
                results,
                Arc::new(AtomicBool::new(false)),
            )
            .unwrap();

        let block = sealed
            .recv_timeout(Duration::from_secs(10))
            .expect("sealed in time");
        engine.verify_seal(&block.header).unwrap();
    }

    #[test]
    fn remote_work_flow() {
        let engine = engine_with(CryptoreConfig::default());
        let chain = TestChainReader::new_test();
        engine.set_threads(-1);
        let (results, _sealed) = unbounded();

        let mut header = Header::new();
        header.set_number(1);
        header.set_difficulty(U256::from(1u64 << 48));
        let first_hash = header.bare_hash();
        engine
            .seal(
                &chain,
                Block::from_header(header),
                results.clone(),
                Arc::new(AtomicBool::new(false)),
            )
            .unwrap();

        let work = wait_for_current(&engine, first_hash);
        assert_eq!(work.number, 1);
        assert_eq!(work.seed_hash, ::cryptore::seed_hash(1));
        assert_eq!(work.target, difficulty_to_boundary(&U256::from(1u64 << 48)));
        assert!(!engine.submit_work(0, first_hash));

        let mut header = Header::new();
        header.set_number(1);
        header.set_difficulty(U256::from(1u64 << 49));
        let second_hash = header.bare_hash();
        engine
            .seal(
                &chain,
                Block::from_header(header),
                results,
                Arc::new(AtomicBool::new(false)),
            )
            .unwrap();

        let work = wait_for_current(&engine, second_hash);
        assert_eq!(work.target, difficulty_to_boundary(&U256::from(1u64 << 49)));
    }

    #[test]
    fn hashrate_aggregates_remote_reports() {
        let engine = engine_with(CryptoreConfig::default());
        assert!(engine.submit_hashrate(100, H256::repeat_byte(0xaa)));
        assert!(engine.submit_hashrate(200, H256::repeat_byte(0xbb)));
        assert!(engine.submit_hashrate(300, H256::repeat_byte(0xcc)));

        let mut rate = 0.0;
        for _ in 0..200 {
            rate = engine.hashrate();
            if rate >= 600.0 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(rate, 600.0);
    }

    #[test]
    fn closed_engines_refuse_service() {
        let engine = engine_with(CryptoreConfig::default());
        engine.close();
        // closing twice is the same as closing once
        engine.close();

        assert!(matches!(
            engine.work().unwrap_err(),
            Error(ErrorKind::Engine(EngineError::Stopped), _)
        ));
        assert!(!engine.submit_hashrate(100, H256::repeat_byte(0xaa)));
        assert!(!engine.submit_work(0, H256::repeat_byte(0xaa)));

        let chain = TestChainReader::new_test();
        let (results, _sealed) = unbounded();
        assert!(engine
            .seal(
                &chain,
                Block::default(),
                results,
                Arc::new(AtomicBool::new(false))
            )
            .is_err());
    }

    #[test]
    fn prepare_sets_the_difficulty() {
        let engine = engine_with(CryptoreConfig::default());
        let chain = TestChainReader::new_test();
        let genesis = chain.genesis();

        let mut header = Header::new();
        header.set_parent_hash(genesis.hash());
        header.set_number(1);
        header.set_timestamp(genesis.timestamp() + 7);
        engine.prepare(&chain, &mut header).unwrap();
        assert_eq!(
            *header.difficulty(),
            calculate_difficulty(engine.params(), header.timestamp(), &genesis)
        );

        let mut orphan = Header::new();
        orphan.set_parent_hash(H256::repeat_byte(9));
        orphan.set_number(1);
        assert!(engine.prepare(&chain, &mut orphan).is_err());
    }

    #[test]
    fn finalize_credits_rewards_and_sets_the_root() {
        let engine = engine_with(CryptoreConfig::default());
        let chain = TestChainReader::new_test();
        let mut state = TestStateDB::new();
        let reward = engine.params().block_reward;

        let mut header = Header::new();
        header.set_number(10);
        header.set_author(Address::repeat_byte(1));
        let mut uncle = Header::new();
        uncle.set_number(9);
        uncle.set_author(Address::repeat_byte(2));

        engine
            .finalize(&chain, &mut header, &mut state, &[], &[uncle])
            .unwrap();

        assert_eq!(
            state.balances[&Address::repeat_byte(1)],
            reward + reward / U256::from(32)
        );
        assert_eq!(
            state.balances[&Address::repeat_byte(2)],
            reward * U256::from(7) / U256::from(8)
        );
        assert_eq!(*header.state_root(), state.intermediate_root(true));
    }

    #[test]
    fn no_reward_engines_only_touch() {
        let engine = engine_with(CryptoreConfig {
            no_reward: true,
            ..Default::default()
        });
        let chain = TestChainReader::new_test();
        let mut state = TestStateDB::new();

        let mut header = Header::new();
        header.set_number(10);
        header.set_author(Address::repeat_byte(1));

        engine
            .finalize(&chain, &mut header, &mut state, &[], &[])
            .unwrap();
        assert_eq!(state.balances[&Address::repeat_byte(1)], U256::zero());
        assert_eq!(state.touched, vec![Address::repeat_byte(1)]);
    }

    #[test]
    fn finalize_and_assemble_commits_to_the_uncles() {
        let engine = engine_with(CryptoreConfig::default());
        let chain = TestChainReader::new_test();
        let mut state = TestStateDB::new();

        let mut header = Header::new();
        header.set_number(10);
        let mut uncle = Header::new();
        uncle.set_number(9);
        let uncles = vec![uncle];

        let block = engine
            .finalize_and_assemble(
                &chain,
                header,
                &mut state,
                Vec::new(),
                uncles.clone(),
                Vec::new(),
            )
            .unwrap();
        assert_eq!(*block.header.uncles_hash(), Block::uncles_digest(&uncles));
        assert_eq!(block.uncles, uncles);
    }

    #[test]
    fn thread_count_round_trips() {
        let engine = engine_with(CryptoreConfig::default());
        assert_eq!(engine.threads(), 0);
        engine.set_threads(4);
        assert_eq!(engine.threads(), 4);
        engine.set_threads(-1);
        assert_eq!(engine.threads(), -1);
    }

    #[test]
    fn extra_info_reports_the_seal() {
        let engine = engine_with(CryptoreConfig::default());
        let mut header = Header::new();
        header.set_nonce(5);
        let info = engine.extra_info(&header);
        assert_eq!(info["nonce"], "0x5");
        assert!(info.contains_key("mixDigest"));
    }

    #[test]
    fn shared_engine_is_a_singleton_until_teardown() {
        let first = init_shared(CommonParams::test(), CryptoreConfig::default()).unwrap();
        let second = init_shared(CommonParams::default(), CryptoreConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let borrower = SharedCryptore::new().unwrap();
        borrower.set_threads(3);
        assert_eq!(first.threads(), 3);

        // closing a borrower leaves the shared instance running
        borrower.close();
        assert!(matches!(
            borrower.engine().work().unwrap_err(),
            Error(ErrorKind::Engine(EngineError::NoMiningWork), _)
        ));

        teardown_shared();
        assert!(matches!(
            first.work().unwrap_err(),
            Error(ErrorKind::Engine(EngineError::Stopped), _)
        ));
    }
}
