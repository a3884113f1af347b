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

//! Header and uncle verification functions.
//!
//! Single-header verification is done in two layers: `verify_header`
//! resolves the parent through the chain, `verify_family` runs the
//! stateless checks of one header against one parent. Batches go through
//! `verify_headers`, which fans the work out over a thread pool and emits
//! the results strictly in input order.

use std::{
    cmp,
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

use crossbeam_channel::{bounded, unbounded, Receiver};
use ethereum_types::H256;
use unexpected::{Mismatch, OutOfBounds};

use client::ChainReader;
use engines::{Engine, MAX_UNCLE_AGE};
use error::Error;
use types::{block::Block, errors::BlockError, header::Header};

/// Headers dated more than this many seconds past the wall clock are
/// rejected as future blocks. Uncles are exempt.
pub const ALLOWED_FUTURE_SECS: u64 = 15;

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Verify `header` against the chain. Headers the chain already contains
/// verify trivially; a missing parent is `UnknownAncestor`.
pub fn verify_header(
    engine: &dyn Engine,
    chain: &dyn ChainReader,
    header: &Header,
    check_seal: bool,
) -> Result<(), Error> {
    if chain.header_by_hash(&header.hash()).is_some() {
        return Ok(());
    }
    let parent = chain
        .header(header.parent_hash(), header.number().saturating_sub(1))
        .ok_or_else(|| BlockError::UnknownAncestor(*header.parent_hash()))?;
    engine.verify_block_family(header, &parent, false, check_seal, unix_now())
}

/// The stateless checks of one header against its parent, in protocol
/// order. `now` anchors the future-block bound; `is_uncle` exempts the
/// header from it.
pub fn verify_family(
    engine: &dyn Engine,
    header: &Header,
    parent: &Header,
    is_uncle: bool,
    check_seal: bool,
    now: u64,
) -> Result<(), Error> {
    let params = engine.params();

    if header.extra_data().len() > params.maximum_extra_data_size {
        return Err(BlockError::ExtraDataTooLong(OutOfBounds {
            min: None,
            max: Some(params.maximum_extra_data_size),
            found: header.extra_data().len(),
        })
        .into());
    }

    if !is_uncle && header.timestamp() > now + ALLOWED_FUTURE_SECS {
        return Err(BlockError::FutureBlock(OutOfBounds {
            min: None,
            max: Some(now + ALLOWED_FUTURE_SECS),
            found: header.timestamp(),
        })
        .into());
    }

    if header.timestamp() <= parent.timestamp() {
        return Err(BlockError::OlderBlockTime(OutOfBounds {
            min: Some(parent.timestamp() + 1),
            max: None,
            found: header.timestamp(),
        })
        .into());
    }

    let expected_difficulty = engine.calc_difficulty(header.timestamp(), parent);
    if *header.difficulty() != expected_difficulty {
        return Err(BlockError::BadDifficulty(Mismatch {
            expected: expected_difficulty,
            found: *header.difficulty(),
        })
        .into());
    }

    let energy_cap = i64::max_value() as u64;
    if header.energy_limit() > energy_cap {
        return Err(BlockError::InvalidEnergyLimit(OutOfBounds {
            min: None,
            max: Some(energy_cap),
            found: header.energy_limit(),
        })
        .into());
    }

    if header.energy_used() > header.energy_limit() {
        return Err(BlockError::InvalidEnergyUsed(OutOfBounds {
            min: None,
            max: Some(header.energy_limit()),
            found: header.energy_used(),
        })
        .into());
    }

    let delta = if header.energy_limit() > parent.energy_limit() {
        header.energy_limit() - parent.energy_limit()
    } else {
        parent.energy_limit() - header.energy_limit()
    };
    let bound = parent.energy_limit() / params.energy_limit_bound_divisor;
    if delta >= bound || header.energy_limit() < params.min_energy_limit {
        return Err(BlockError::InvalidEnergyLimit(OutOfBounds {
            min: Some(params.min_energy_limit),
            max: Some(parent.energy_limit() + bound),
            found: header.energy_limit(),
        })
        .into());
    }

    if header.number() != parent.number() + 1 {
        return Err(BlockError::InvalidNumber(Mismatch {
            expected: parent.number() + 1,
            found: header.number(),
        })
        .into());
    }

    if check_seal {
        engine.verify_seal(header)?;
    }
    Ok(())
}

/// Verify a batch of headers concurrently, emitting one result per header
/// in input order through the returned stream.
///
/// `check_seals[i]` controls the seal check of `headers[i]`; a short vector
/// means no seal check for the uncovered tail. Raising the abort flag stops
/// workers from picking up further headers; results not yet emitted are
/// dropped. Consecutive headers use their in-batch predecessor as parent
/// when the hashes chain; anything else falls back to the chain.
pub fn verify_headers(
    engine: Arc<dyn Engine>,
    chain: Arc<dyn ChainReader>,
    headers: Vec<Header>,
    check_seals: Vec<bool>,
) -> (Arc<AtomicBool>, Receiver<Result<(), Error>>) {
    let count = headers.len();
    let abort = Arc::new(AtomicBool::new(false));
    let (out_tx, out_rx) = bounded(count);
    if count == 0 {
        return (abort, out_rx);
    }

    let headers = Arc::new(headers);
    let check_seals = Arc::new(check_seals);
    let next = Arc::new(AtomicUsize::new(0));
    let (done_tx, done_rx) = unbounded();
    let now = unix_now();

    let workers = cmp::min(count, num_cpus::get());
    for worker in 0..workers {
        let engine = engine.clone();
        let chain = chain.clone();
        let headers = headers.clone();
        let check_seals = check_seals.clone();
        let next = next.clone();
        let abort = abort.clone();
        let done_tx = done_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("verifier-{}", worker))
            .spawn(move || loop {
                let index = next.fetch_add(1, Ordering::SeqCst);
                if index >= count || abort.load(Ordering::SeqCst) {
                    break;
                }
                let check_seal = check_seals.get(index).cloned().unwrap_or(false);
                let result = verify_one(&*engine, &*chain, &headers, index, check_seal, now);
                if done_tx.send((index, result)).is_err() {
                    break;
                }
            });
        if let Err(e) = spawned {
            warn!(target: "client", "failed to spawn verification worker: {}", e);
        }
    }
    drop(done_tx);

    let reorder_abort = abort.clone();
    let spawned = thread::Builder::new()
        .name("verifier-order".into())
        .spawn(move || {
            let mut pending: HashMap<usize, Result<(), Error>> = HashMap::new();
            let mut cursor = 0;
            while cursor < count {
                let (index, result) = match done_rx.recv() {
                    Ok(done) => done,
                    Err(_) => break,
                };
                pending.insert(index, result);
                while let Some(result) = pending.remove(&cursor) {
                    if reorder_abort.load(Ordering::SeqCst) || out_tx.send(result).is_err() {
                        return;
                    }
                    cursor += 1;
                }
            }
        });
    if let Err(e) = spawned {
        warn!(target: "client", "failed to spawn the verification reorder stage: {}", e);
    }

    (abort, out_rx)
}

fn verify_one(
    engine: &dyn Engine,
    chain: &dyn ChainReader,
    headers: &[Header],
    index: usize,
    check_seal: bool,
    now: u64,
) -> Result<(), Error> {
    let header = &headers[index];
    if chain.header_by_hash(&header.hash()).is_some() {
        return Ok(());
    }

    let parent_from_chain;
    let parent = if index > 0 && headers[index - 1].hash() == *header.parent_hash() {
        &headers[index - 1]
    } else {
        parent_from_chain = chain
            .header(header.parent_hash(), header.number().saturating_sub(1))
            .ok_or_else(|| BlockError::UnknownAncestor(*header.parent_hash()))?;
        &parent_from_chain
    };
    engine.verify_block_family(header, parent, false, check_seal, now)
}

/// Verify the uncles of `block`.
///
/// The ancestry window covers [`MAX_UNCLE_AGE`] generations starting at the
/// block's parent, with the block itself counting as included. Each uncle
/// must be new to that window, must not itself be an ancestor, must attach
/// to an ancestor other than the block's parent, and must carry a valid
/// sealed header of its own.
pub fn verify_uncles(
    engine: &dyn Engine,
    chain: &dyn ChainReader,
    block: &Block,
) -> Result<(), Error> {
    let header = &block.header;
    let max_uncles = engine.params().maximum_uncle_count;
    if block.uncles.len() > max_uncles {
        return Err(BlockError::TooManyUncles(OutOfBounds {
            min: None,
            max: Some(max_uncles),
            found: block.uncles.len(),
        })
        .into());
    }
    if block.uncles.is_empty() {
        return Ok(());
    }

    // Gather the ancestry window and every uncle already embedded in it.
    let mut ancestors: HashMap<H256, Header> = HashMap::new();
    let mut included: HashSet<H256> = HashSet::new();
    let mut hash = *header.parent_hash();
    for _ in 0..MAX_UNCLE_AGE {
        let ancestor = match chain.header_by_hash(&hash) {
            Some(header) => header,
            None => break,
        };
        if ancestor.has_uncles() {
            let body = chain
                .block(&hash)
                .ok_or_else(|| BlockError::UnknownAncestor(hash))?;
            for uncle in &body.uncles {
                included.insert(uncle.hash());
            }
        }
        let parent_hash = *ancestor.parent_hash();
        ancestors.insert(hash, ancestor);
        hash = parent_hash;
    }
    ancestors.insert(header.hash(), header.clone());
    included.insert(header.hash());

    let now = unix_now();
    for uncle in &block.uncles {
        let uncle_hash = uncle.hash();
        if !included.insert(uncle_hash) {
            return Err(BlockError::DuplicateUncle(uncle_hash).into());
        }
        if ancestors.contains_key(&uncle_hash) {
            return Err(BlockError::UncleIsAncestor(uncle_hash).into());
        }
        let uncle_parent = match ancestors.get(uncle.parent_hash()) {
            Some(parent) if uncle.parent_hash() != header.parent_hash() => parent,
            _ => return Err(BlockError::DanglingUncle(uncle_hash).into()),
        };
        engine.verify_block_family(uncle, uncle_parent, true, true, now)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::test_client::{make_child, TestChainReader};
    use engines::FakeCryptore;
    use error::ErrorKind;
    use ethereum_types::U256;
    use spec::CommonParams;
    use std::time::Duration;
    use types::Address;

    fn engine_and_chain() -> (FakeCryptore, TestChainReader) {
        (
            FakeCryptore::new_faker(CommonParams::test()),
            TestChainReader::new_test(),
        )
    }

    fn assert_block_err(result: Result<(), Error>, check: fn(&BlockError) -> bool) {
        match result {
            Err(Error(ErrorKind::Block(ref err), _)) if check(err) => {}
            other => panic!("unexpected verification outcome: {:?}", other),
        }
    }

    #[test]
    fn known_headers_verify_trivially() {
        let (engine, chain) = engine_and_chain();
        // the genesis would fail every family rule, but it is known
        assert!(verify_header(&engine, &chain, &chain.genesis(), true).is_ok());
    }

    #[test]
    fn orphans_are_unknown_ancestors() {
        let (engine, chain) = engine_and_chain();
        let mut header = Header::new();
        header.set_number(5);
        header.set_parent_hash(H256::repeat_byte(0x77));
        assert_block_err(verify_header(&engine, &chain, &header, false), |e| {
            matches!(e, BlockError::UnknownAncestor(_))
        });
    }

    #[test]
    fn family_accepts_a_well_formed_child() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let header = make_child(&engine, &parent);
        assert!(verify_family(&engine, &header, &parent, false, true, 1_000_000).is_ok());
    }

    #[test]
    fn extra_data_is_bounded() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_extra_data(vec![0u8; 33]);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::ExtraDataTooLong(_)),
        );
    }

    #[test]
    fn future_bound_is_inclusive() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let now = 1_000_000;

        let mut header = make_child(&engine, &parent);
        header.set_timestamp(now + ALLOWED_FUTURE_SECS);
        header.set_difficulty(engine.calc_difficulty(header.timestamp(), &parent));
        assert!(verify_family(&engine, &header, &parent, false, false, now).is_ok());

        header.set_timestamp(now + ALLOWED_FUTURE_SECS + 1);
        header.set_difficulty(engine.calc_difficulty(header.timestamp(), &parent));
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, now),
            |e| matches!(e, BlockError::FutureBlock(_)),
        );
    }

    #[test]
    fn uncles_may_sit_in_the_future() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let now = 1_000_000;
        let mut header = make_child(&engine, &parent);
        header.set_timestamp(now + ALLOWED_FUTURE_SECS + 1);
        header.set_difficulty(engine.calc_difficulty(header.timestamp(), &parent));
        assert!(verify_family(&engine, &header, &parent, true, false, now).is_ok());
    }

    #[test]
    fn time_must_advance_past_the_parent() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_timestamp(parent.timestamp());
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::OlderBlockTime(_)),
        );
    }

    #[test]
    fn difficulty_must_match_the_calculation() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_difficulty(*header.difficulty() + U256::one());
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::BadDifficulty(_)),
        );
    }

    #[test]
    fn energy_limit_cap_is_two_to_the_sixty_three() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_energy_limit(i64::max_value() as u64 + 1);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::InvalidEnergyLimit(_)),
        );
    }

    #[test]
    fn energy_used_stays_within_the_limit() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_energy_used(header.energy_limit() + 1);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::InvalidEnergyUsed(_)),
        );
    }

    #[test]
    fn energy_limit_delta_bound_is_exclusive() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let bound = parent.energy_limit() / engine.params().energy_limit_bound_divisor;

        let mut header = make_child(&engine, &parent);
        header.set_energy_limit(parent.energy_limit() + bound - 1);
        assert!(verify_family(&engine, &header, &parent, false, false, 1_000_000).is_ok());

        header.set_energy_limit(parent.energy_limit() + bound);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::InvalidEnergyLimit(_)),
        );
    }

    #[test]
    fn energy_limit_has_a_floor() {
        let (engine, chain) = engine_and_chain();
        let mut parent = chain.genesis();
        parent.set_energy_limit(5_002);
        let mut header = make_child(&engine, &parent);
        // within the delta bound but below the chain minimum
        header.set_energy_limit(4_999);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::InvalidEnergyLimit(_)),
        );
    }

    #[test]
    fn number_must_increment() {
        let (engine, chain) = engine_and_chain();
        let parent = chain.genesis();
        let mut header = make_child(&engine, &parent);
        header.set_number(parent.number() + 2);
        assert_block_err(
            verify_family(&engine, &header, &parent, false, false, 1_000_000),
            |e| matches!(e, BlockError::InvalidNumber(_)),
        );
    }

    fn build_batch(engine: &dyn Engine, chain: &TestChainReader, len: usize) -> Vec<Header> {
        let mut headers = Vec::with_capacity(len);
        let mut parent = chain.genesis();
        for _ in 0..len {
            let header = make_child(engine, &parent);
            parent = header.clone();
            headers.push(header);
        }
        headers
    }

    #[test]
    fn batches_verify_in_input_order() {
        let (engine, chain) = engine_and_chain();
        let headers = build_batch(&engine, &chain, 64);
        let seals = vec![true; headers.len()];

        let engine: Arc<dyn Engine> = Arc::new(engine);
        let chain: Arc<dyn ChainReader> = Arc::new(chain);
        let (_abort, results) = verify_headers(engine, chain, headers, seals);

        let collected: Vec<_> = results.iter().collect();
        assert_eq!(collected.len(), 64);
        assert!(collected.iter().all(|result| result.is_ok()));
    }

    #[test]
    fn a_corrupt_header_fails_at_its_own_index() {
        let (engine, chain) = engine_and_chain();
        let mut headers = build_batch(&engine, &chain, 64);
        let bad = *headers[32].difficulty() + U256::one();
        headers[32].set_difficulty(bad);
        let seals = vec![false; headers.len()];

        let engine: Arc<dyn Engine> = Arc::new(engine);
        let chain: Arc<dyn ChainReader> = Arc::new(chain);
        let (_abort, results) = verify_headers(engine, chain, headers, seals);

        let collected: Vec<_> = results.iter().collect();
        assert_eq!(collected.len(), 64);
        assert!(collected[..32].iter().all(|result| result.is_ok()));
        match collected[32] {
            Err(Error(ErrorKind::Block(BlockError::BadDifficulty(_)), _)) => {}
            ref other => panic!("expected BadDifficulty at index 32, got {:?}", other),
        }
        // the corruption broke the hash chain; everything after is an
        // orphan from the batch's point of view
        assert!(collected[33..].iter().all(|result| result.is_err()));
    }

    #[test]
    fn aborting_cuts_the_result_stream_short() {
        let engine = FakeCryptore::new_fake_delayer(CommonParams::test(), Duration::from_millis(10));
        let chain = TestChainReader::new_test();
        let headers = build_batch(&engine, &chain, 256);
        let seals = vec![true; headers.len()];

        let engine: Arc<dyn Engine> = Arc::new(engine);
        let chain: Arc<dyn ChainReader> = Arc::new(chain);
        let (abort, results) = verify_headers(engine, chain, headers, seals);

        assert!(results.recv_timeout(Duration::from_secs(5)).is_ok());
        abort.store(true, Ordering::SeqCst);
        let drained = results.iter().count();
        assert!(drained < 255, "abort did not stop the stream: {}", drained);
    }

    #[test]
    fn empty_batches_finish_immediately() {
        let (engine, chain) = engine_and_chain();
        let engine: Arc<dyn Engine> = Arc::new(engine);
        let chain: Arc<dyn ChainReader> = Arc::new(chain);
        let (_abort, results) = verify_headers(engine, chain, Vec::new(), Vec::new());
        assert_eq!(results.iter().count(), 0);
    }

    // A small tree for the uncle rules: g - b1 - b2 - b3, with u1 and u2
    // both children of b1.
    struct UncleWorld {
        engine: FakeCryptore,
        chain: TestChainReader,
        b1: Header,
        b2: Header,
        b3: Header,
        u1: Header,
        u2: Header,
    }

    fn uncle_world() -> UncleWorld {
        let engine = FakeCryptore::new_faker(CommonParams::test());
        let chain = TestChainReader::new_test();
        let genesis = chain.genesis();

        let b1 = make_child(&engine, &genesis);
        let b2 = make_child(&engine, &b1);
        let b3 = make_child(&engine, &b2);

        let mut u1 = make_child(&engine, &b1);
        u1.set_author(Address::repeat_byte(0x0a));
        let mut u2 = make_child(&engine, &b1);
        u2.set_author(Address::repeat_byte(0x0b));

        chain.insert(Block::from_header(b1.clone()));
        chain.insert(Block::from_header(b2.clone()));
        chain.insert(Block::from_header(b3.clone()));

        UncleWorld {
            engine,
            chain,
            b1,
            b2,
            b3,
            u1,
            u2,
        }
    }

    fn block_with_uncles(world: &UncleWorld, uncles: Vec<Header>) -> Block {
        let mut header = make_child(&world.engine, &world.b3);
        header.set_uncles_hash(Block::uncles_digest(&uncles));
        Block::new(header, Vec::new(), uncles, Vec::new())
    }

    #[test]
    fn two_uncles_pass_three_do_not() {
        let world = uncle_world();
        let block = block_with_uncles(&world, vec![world.u1.clone(), world.u2.clone()]);
        assert!(verify_uncles(&world.engine, &world.chain, &block).is_ok());

        let mut u3 = make_child(&world.engine, &world.b2);
        u3.set_author(Address::repeat_byte(0x0c));
        let block =
            block_with_uncles(&world, vec![world.u1.clone(), world.u2.clone(), u3]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::TooManyUncles(_))
        });
    }

    #[test]
    fn repeated_uncles_are_duplicates() {
        let world = uncle_world();
        let block = block_with_uncles(&world, vec![world.u1.clone(), world.u1.clone()]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::DuplicateUncle(_))
        });
    }

    #[test]
    fn uncles_already_embedded_in_an_ancestor_are_duplicates() {
        let world = uncle_world();

        // rebuild b3 so that it embeds u1
        let uncles = vec![world.u1.clone()];
        let mut b3 = make_child(&world.engine, &world.b2);
        b3.set_uncles_hash(Block::uncles_digest(&uncles));
        world
            .chain
            .insert(Block::new(b3.clone(), Vec::new(), uncles, Vec::new()));

        let mut header = make_child(&world.engine, &b3);
        let uncles = vec![world.u1.clone()];
        header.set_uncles_hash(Block::uncles_digest(&uncles));
        let block = Block::new(header, Vec::new(), uncles, Vec::new());

        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::DuplicateUncle(_))
        });
    }

    #[test]
    fn ancestors_cannot_be_uncles() {
        let world = uncle_world();
        let block = block_with_uncles(&world, vec![world.b1.clone()]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::UncleIsAncestor(_))
        });
    }

    #[test]
    fn uncles_attached_to_the_blocks_own_parent_dangle() {
        let world = uncle_world();
        let mut sibling = make_child(&world.engine, &world.b3);
        sibling.set_author(Address::repeat_byte(0x0d));
        let block = block_with_uncles(&world, vec![sibling]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::DanglingUncle(_))
        });
    }

    #[test]
    fn uncles_with_unknown_parents_dangle() {
        let world = uncle_world();
        let mut stranger = Header::new();
        stranger.set_number(3);
        stranger.set_parent_hash(H256::repeat_byte(0x3f));
        stranger.set_timestamp(2_000);
        let block = block_with_uncles(&world, vec![stranger]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::DanglingUncle(_))
        });
    }

    #[test]
    fn uncle_headers_are_verified_like_blocks() {
        let world = uncle_world();
        let mut bad = world.u1.clone();
        bad.set_difficulty(*bad.difficulty() + U256::one());
        let block = block_with_uncles(&world, vec![bad]);
        assert_block_err(verify_uncles(&world.engine, &world.chain, &block), |e| {
            matches!(e, BlockError::BadDifficulty(_))
        });
    }

    #[test]
    fn uncle_seals_are_checked_through_the_engine() {
        // fail the seal check exactly at the uncles' height
        let engine = FakeCryptore::new_fake_failer(CommonParams::test(), 2);
        let world = uncle_world();
        let block = block_with_uncles(&world, vec![world.u1.clone()]);
        assert_block_err(verify_uncles(&engine, &world.chain, &block), |e| {
            matches!(e, BlockError::InvalidProofOfWork(_))
        });
    }

    #[test]
    fn blocks_without_uncles_short_circuit() {
        let world = uncle_world();
        let block = block_with_uncles(&world, Vec::new());
        assert!(verify_uncles(&world.engine, &world.chain, &block).is_ok());
    }
}
