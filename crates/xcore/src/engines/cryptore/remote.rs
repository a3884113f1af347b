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

//! Remote sealing: work-package distribution to external miners and intake
//! of their solutions and hash rate reports.
//!
//! One thread owns all the state and serializes every operation; the rest
//! of the engine talks to it over channels, so no lock is shared with the
//! sealing or verification paths.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use cryptore::{difficulty_to_boundary, seed_hash, CryptoreManager};
use ethereum_types::H256;
use parking_lot::Mutex;
use url::Url;

use engines::EngineError;
use error::Error;
use types::block::Block;

use super::work_notify::WorkPoster;

/// Upper bound on stashed work packages; older packages are evicted in
/// arrival order.
const WORK_CAP: usize = 8;

/// Remote miner hash rate reports expire after this long.
const RATE_TTL: Duration = Duration::from_secs(10);

/// Housekeeping interval of the event loop.
const TICK: Duration = Duration::from_secs(2);

/// A work package as handed to remote miners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    /// Hash the proof-of-work is computed over.
    pub seal_hash: H256,
    /// Seed hash of the block's epoch, for mining client compatibility.
    pub seed_hash: H256,
    /// Boundary a conforming proof-of-work hash must not exceed.
    pub target: H256,
    /// Number of the block being sealed.
    pub number: u64,
}

struct SealTask {
    block: Block,
    results: Sender<Block>,
}

struct Submission {
    nonce: u64,
    seal_hash: H256,
}

/// Handle to the remote sealing loop of an engine.
pub struct RemoteSealer {
    new_work_tx: Sender<SealTask>,
    get_work_tx: Sender<Sender<Result<Work, Error>>>,
    submit_work_tx: Sender<(Submission, Sender<bool>)>,
    submit_rate_tx: Sender<(H256, u64)>,
    fetch_rate_tx: Sender<Sender<f64>>,
    exit_tx: Sender<()>,
    exit_ack_rx: Receiver<()>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl RemoteSealer {
    /// Start the sealing loop thread.
    pub fn spawn(manager: Arc<CryptoreManager>, noverify: bool, notify: &[Url]) -> RemoteSealer {
        let (new_work_tx, new_work_rx) = unbounded();
        let (get_work_tx, get_work_rx) = unbounded::<Sender<Result<Work, Error>>>();
        let (submit_work_tx, submit_work_rx) = unbounded::<(Submission, Sender<bool>)>();
        let (submit_rate_tx, submit_rate_rx) = unbounded();
        let (fetch_rate_tx, fetch_rate_rx) = unbounded::<Sender<f64>>();
        let (exit_tx, exit_rx) = bounded(1);
        let (exit_ack_tx, exit_ack_rx) = bounded(1);

        let mut inner = Inner {
            manager,
            noverify,
            poster: WorkPoster::new(notify),
            current: None,
            works: HashMap::new(),
            order: VecDeque::new(),
            rates: HashMap::new(),
        };

        let handle = thread::Builder::new()
            .name("remote-sealer".into())
            .spawn(move || {
                loop {
                    select! {
                        recv(new_work_rx) -> msg => match msg {
                            Ok(task) => inner.accept_work(task),
                            Err(_) => break,
                        },
                        recv(get_work_rx) -> msg => match msg {
                            Ok(reply) => {
                                let work = inner
                                    .current
                                    .clone()
                                    .ok_or_else(|| EngineError::NoMiningWork.into());
                                let _ = reply.send(work);
                            }
                            Err(_) => break,
                        },
                        recv(submit_work_rx) -> msg => match msg {
                            Ok((submission, reply)) => {
                                let _ = reply.send(inner.submit(submission));
                            }
                            Err(_) => break,
                        },
                        recv(submit_rate_rx) -> msg => match msg {
                            Ok((id, rate)) => {
                                inner.rates.insert(id, (rate, Instant::now()));
                            }
                            Err(_) => break,
                        },
                        recv(fetch_rate_rx) -> msg => match msg {
                            Ok(reply) => {
                                let _ = reply.send(inner.live_rate());
                            }
                            Err(_) => break,
                        },
                        recv(exit_rx) -> _ => break,
                        default(TICK) => inner.prune_rates(),
                    }
                }
                debug!(target: "miner", "remote sealer loop drained");
                let _ = exit_ack_tx.send(());
            })
            .expect("failed to spawn the remote sealer thread");

        RemoteSealer {
            new_work_tx,
            get_work_tx,
            submit_work_tx,
            submit_rate_tx,
            fetch_rate_tx,
            exit_tx,
            exit_ack_rx,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Queue `block` as the newest remote work package.
    pub fn notify_work(&self, block: Block, results: Sender<Block>) {
        let _ = self.new_work_tx.send(SealTask { block, results });
    }

    /// The current work package, or `NoMiningWork` before any block was
    /// posted, or `Stopped` after shutdown.
    pub fn work(&self) -> Result<Work, Error> {
        let (reply_tx, reply_rx) = bounded(1);
        if self.get_work_tx.send(reply_tx).is_err() {
            return Err(EngineError::Stopped.into());
        }
        match reply_rx.recv() {
            Ok(work) => work,
            Err(_) => Err(EngineError::Stopped.into()),
        }
    }

    /// Try to accept a solution for the stashed package with `seal_hash`.
    pub fn submit_work(&self, nonce: u64, seal_hash: H256) -> bool {
        let (reply_tx, reply_rx) = bounded(1);
        if self
            .submit_work_tx
            .send((Submission { nonce, seal_hash }, reply_tx))
            .is_err()
        {
            return false;
        }
        reply_rx.recv().unwrap_or(false)
    }

    /// Record a remote miner's self-reported hash rate. False once the
    /// engine is closed.
    pub fn submit_hashrate(&self, rate: u64, id: H256) -> bool {
        self.submit_rate_tx.send((id, rate)).is_ok()
    }

    /// Aggregate hash rate of remote miners that reported within the TTL.
    pub fn hashrate(&self) -> f64 {
        let (reply_tx, reply_rx) = bounded(1);
        if self.fetch_rate_tx.send(reply_tx).is_err() {
            return 0.0;
        }
        reply_rx.recv().unwrap_or(0.0)
    }

    /// Stop the loop and wait for its acknowledgement.
    pub fn shutdown(&self) {
        if self.exit_tx.send(()).is_ok() {
            let _ = self.exit_ack_rx.recv();
        }
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

struct Inner {
    manager: Arc<CryptoreManager>,
    noverify: bool,
    poster: Option<WorkPoster>,
    current: Option<Work>,
    works: HashMap<H256, SealTask>,
    order: VecDeque<H256>,
    rates: HashMap<H256, (u64, Instant)>,
}

impl Inner {
    fn accept_work(&mut self, task: SealTask) {
        let header = &task.block.header;
        let work = Work {
            seal_hash: header.bare_hash(),
            seed_hash: seed_hash(header.number()),
            target: difficulty_to_boundary(header.difficulty()),
            number: header.number(),
        };
        debug!(
            target: "miner",
            "new remote work package: seal_hash={:?} number={}",
            work.seal_hash, work.number
        );

        if let Some(ref poster) = self.poster {
            poster.post(&work);
        }

        let seal_hash = work.seal_hash;
        self.current = Some(work);
        if self.works.insert(seal_hash, task).is_none() {
            self.order.push_back(seal_hash);
        }
        while self.order.len() > WORK_CAP {
            if let Some(stale) = self.order.pop_front() {
                trace!(target: "miner", "evicting stale work package {:?}", stale);
                self.works.remove(&stale);
            }
        }
    }

    fn submit(&mut self, submission: Submission) -> bool {
        let header = match self.works.get(&submission.seal_hash) {
            Some(task) => {
                let mut header = task.block.header.clone();
                header.set_nonce(submission.nonce);
                header
            }
            None => {
                warn!(
                    target: "miner",
                    "work submitted but none pending: seal_hash={:?}",
                    submission.seal_hash
                );
                return false;
            }
        };

        if !self.noverify {
            if let Err(e) = super::verify_block_seal(&self.manager, &header) {
                warn!(
                    target: "miner",
                    "invalid proof-of-work submitted: seal_hash={:?} err={}",
                    submission.seal_hash, e
                );
                return false;
            }
        }

        let task = self
            .works
            .remove(&submission.seal_hash)
            .expect("presence checked on entry; the loop is single-threaded; qed");
        self.order.retain(|hash| *hash != submission.seal_hash);

        let mut sealed = task.block;
        sealed.header = header;
        let number = sealed.header.number();
        if task.results.send(sealed).is_err() {
            warn!(
                target: "miner",
                "solution for #{} found but the result channel is gone", number
            );
            return false;
        }
        debug!(target: "miner", "remote solution accepted for #{}", number);
        true
    }

    fn live_rate(&mut self) -> f64 {
        self.prune_rates();
        self.rates.values().map(|&(rate, _)| rate as f64).sum()
    }

    fn prune_rates(&mut self) {
        let now = Instant::now();
        self.rates
            .retain(|_, &mut (_, reported)| now.duration_since(reported) < RATE_TTL);
    }
}
