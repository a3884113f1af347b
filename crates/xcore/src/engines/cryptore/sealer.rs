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

//! Local sealing: a nonce-search thread pool.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicIsize, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::Sender;
use cryptore::{difficulty_to_boundary, CryptoreManager};
use ethereum_types::H256;
use parking_lot::Mutex;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use types::block::Block;

/// Attempts a worker accumulates between hash rate updates.
const METER_BATCH: u64 = 8;

/// Meter tick length.
const TICK: Duration = Duration::from_secs(5);

/// Decay window of the hash rate average, in seconds.
const WINDOW_SECS: f64 = 60.0;

/// Exponentially weighted hash rate over roughly the last minute.
/// Updates are lossy under contention; reads converge within the window.
pub struct HashrateMeter {
    inner: Mutex<MeterInner>,
}

struct MeterInner {
    rate: f64,
    uncounted: u64,
    last_tick: Instant,
}

impl HashrateMeter {
    fn new() -> HashrateMeter {
        HashrateMeter {
            inner: Mutex::new(MeterInner {
                rate: 0.0,
                uncounted: 0,
                last_tick: Instant::now(),
            }),
        }
    }

    /// Record `attempts` completed hashes.
    pub fn mark(&self, attempts: u64) {
        let mut inner = self.inner.lock();
        inner.uncounted += attempts;
        Self::fold(&mut inner);
    }

    /// Current hashes per second.
    pub fn rate(&self) -> f64 {
        let mut inner = self.inner.lock();
        Self::fold(&mut inner);
        inner.rate
    }

    fn fold(inner: &mut MeterInner) {
        let elapsed = inner.last_tick.elapsed();
        if elapsed < TICK {
            return;
        }
        let secs = elapsed.as_secs_f64();
        let instant_rate = inner.uncounted as f64 / secs;
        let alpha = 1.0 - (-secs / WINDOW_SECS).exp();
        inner.rate += alpha * (instant_rate - inner.rate);
        inner.uncounted = 0;
        inner.last_tick = Instant::now();
    }
}

struct SealJob {
    block: Block,
    results: Sender<Block>,
    stop: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
    found: Arc<AtomicBool>,
}

/// The local sealing pool of an engine. At most one job is live; accepting
/// a block aborts the previous search.
pub struct Sealer {
    manager: Arc<CryptoreManager>,
    threads: AtomicIsize,
    job: Mutex<Option<SealJob>>,
    meter: Arc<HashrateMeter>,
    rng: Mutex<SmallRng>,
}

impl Sealer {
    /// A sealer hashing through `manager`. Thread count starts at zero,
    /// meaning one worker per logical CPU.
    pub fn new(manager: Arc<CryptoreManager>) -> Sealer {
        Sealer {
            manager,
            threads: AtomicIsize::new(0),
            job: Mutex::new(None),
            meter: Arc::new(HashrateMeter::new()),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Configured thread count.
    pub fn threads(&self) -> isize {
        self.threads.load(Ordering::SeqCst)
    }

    /// Update the thread count and restart an in-flight search with the new
    /// pool size.
    pub fn set_threads(&self, threads: isize) {
        self.threads.store(threads, Ordering::SeqCst);
        let mut slot = self.job.lock();
        if let Some(job) = slot.take() {
            job.abort.store(true, Ordering::SeqCst);
            if !job.stop.load(Ordering::SeqCst) {
                // a solved job keeps its found flag, so the restart cannot
                // deliver a second block
                *slot = Some(self.spawn_workers(job.block, job.results, job.stop, job.found));
            }
        }
    }

    /// Search for a seal of `block`, superseding any previous job. The
    /// sealed block goes out on `results`; nothing is delivered when the
    /// search is aborted or `stop` raised.
    pub fn seal(&self, block: Block, results: Sender<Block>, stop: Arc<AtomicBool>) {
        let mut slot = self.job.lock();
        if let Some(old) = slot.take() {
            trace!(target: "miner", "superseding in-flight seal job #{}", old.block.header.number());
            old.abort.store(true, Ordering::SeqCst);
        }
        let found = Arc::new(AtomicBool::new(false));
        *slot = Some(self.spawn_workers(block, results, stop, found));
    }

    /// Abort the current job, if any. Its result channel receives nothing.
    pub fn abort(&self) {
        if let Some(job) = self.job.lock().take() {
            job.abort.store(true, Ordering::SeqCst);
        }
    }

    /// Local hashes per second.
    pub fn hashrate(&self) -> f64 {
        self.meter.rate()
    }

    fn spawn_workers(
        &self,
        block: Block,
        results: Sender<Block>,
        stop: Arc<AtomicBool>,
        found: Arc<AtomicBool>,
    ) -> SealJob {
        let abort = Arc::new(AtomicBool::new(false));

        let configured = self.threads();
        let count = if configured < 0 {
            // local sealing disabled; the job stays registered so a later
            // set_threads can pick it up
            0
        } else if configured == 0 {
            num_cpus::get()
        } else {
            configured as usize
        };

        if count > 0 {
            let bare_hash = block.header.bare_hash();
            let boundary = difficulty_to_boundary(block.header.difficulty());
            let seed: u64 = self.rng.lock().gen();
            let stride = ((1u128 << 64) / count as u128) as u64;
            debug!(
                target: "miner",
                "starting {} seal workers for #{} at difficulty {}",
                count, block.header.number(), block.header.difficulty()
            );

            for worker in 0..count {
                let start_nonce = seed.wrapping_add((worker as u64).wrapping_mul(stride));
                let manager = self.manager.clone();
                let meter = self.meter.clone();
                let block = block.clone();
                let results = results.clone();
                let stop = stop.clone();
                let abort = abort.clone();
                let found = found.clone();
                let spawned = thread::Builder::new()
                    .name(format!("sealer-{}", worker))
                    .spawn(move || {
                        mine(
                            manager, meter, block, bare_hash, boundary, start_nonce, results,
                            stop, abort, found,
                        )
                    });
                if let Err(e) = spawned {
                    warn!(target: "miner", "failed to spawn seal worker: {}", e);
                }
            }
        }

        SealJob {
            block,
            results,
            stop,
            abort,
            found,
        }
    }
}

fn mine(
    manager: Arc<CryptoreManager>,
    meter: Arc<HashrateMeter>,
    block: Block,
    bare_hash: H256,
    boundary: H256,
    start_nonce: u64,
    results: Sender<Block>,
    stop: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
    found: Arc<AtomicBool>,
) {
    trace!(target: "miner", "seal worker starting at nonce {:#x}", start_nonce);
    let mut nonce = start_nonce;
    let mut attempts = 0u64;
    loop {
        if found.load(Ordering::SeqCst)
            || abort.load(Ordering::SeqCst)
            || stop.load(Ordering::SeqCst)
        {
            break;
        }

        match manager.compute(&bare_hash, nonce) {
            Ok(out) => {
                if out <= boundary && !found.swap(true, Ordering::SeqCst) {
                    let mut sealed = block;
                    sealed.header.set_nonce(nonce);
                    // any value works for the mix digest; it is not part of
                    // the seal equation
                    sealed.header.set_mix_digest(out);
                    debug!(
                        target: "miner",
                        "seal found for #{}: nonce={:#x}",
                        sealed.header.number(), nonce
                    );
                    if results.send(sealed).is_err() {
                        warn!(target: "miner", "seal found but the result channel is gone");
                    }
                    attempts += 1;
                    break;
                }
            }
            Err(e) => {
                warn!(target: "miner", "RandomX failure while sealing: {}", e);
                break;
            }
        }

        attempts += 1;
        if attempts % METER_BATCH == 0 {
            meter.mark(METER_BATCH);
        }
        nonce = nonce.wrapping_add(1);
    }
    meter.mark(attempts % METER_BATCH);
}
