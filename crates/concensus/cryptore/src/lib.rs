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

//! Cryptore proof-of-work primitives.
//!
//! The PoW of the chain is a single RandomX invocation over
//! `(bare header hash, nonce)` with a fixed VM key. Everything a sealer or a
//! verifier needs from RandomX goes through [`CryptoreManager`]; the
//! remaining items are the pure seed-chain and difficulty/boundary helpers
//! shared with remote mining clients.

#![warn(missing_docs)]

extern crate ethereum_types;
extern crate parking_lot;
extern crate randomx_rs;
extern crate tiny_keccak;

#[macro_use]
extern crate log;

use ethereum_types::{BigEndianHash, H256, U256};
use parking_lot::Mutex;
use randomx_rs::{RandomXCache, RandomXError, RandomXFlag, RandomXVM};
use tiny_keccak::{Hasher, Sha3};

/// The fixed key the chain's RandomX VM is initialized with.
pub const RANDOMX_KEY: &'static [u8] = b"56789";

/// Number of consecutive blocks sharing one seed hash.
pub const EPOCH_LENGTH: u64 = 30_000;

fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut hasher = Sha3::v256();
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// Seed hash of the epoch `block_number` falls into: zero for the first
/// epoch, then one further SHA3-256 per completed epoch.
///
/// Mining clients expect a seed in every work package; the PoW itself keys
/// off [`RANDOMX_KEY`] and never reads this value.
pub fn seed_hash(block_number: u64) -> H256 {
    let epochs = block_number / EPOCH_LENGTH;
    let mut seed = [0u8; 32];
    for _ in 0..epochs {
        seed = sha3_256(&seed);
    }
    H256(seed)
}

/// Convert a difficulty to the proof-of-work boundary. Basically just
/// `f(x) = 2^256 / x`.
pub fn difficulty_to_boundary(difficulty: &U256) -> H256 {
    if *difficulty <= U256::one() {
        BigEndianHash::from_uint(&U256::max_value())
    } else {
        BigEndianHash::from_uint(&(((U256::one() << 255) / *difficulty) << 1))
    }
}

/// Convert a proof-of-work boundary to its original difficulty. Basically
/// just `f(x) = 2^256 / x`.
pub fn boundary_to_difficulty(boundary: &H256) -> U256 {
    let d = boundary.into_uint();
    if d <= U256::one() {
        U256::max_value()
    } else {
        ((U256::one() << 255) / d) << 1
    }
}

// The VM handle has no thread affinity; all access is serialized by the
// mutex in `CryptoreManager`.
struct Vm(RandomXVM);

unsafe impl Send for Vm {}

/// Owner of the RandomX virtual machine used for sealing and verification.
///
/// The VM is not re-entrant, so one hash is in flight at a time per manager;
/// a call to [`CryptoreManager::compute`] blocks on the internal mutex for
/// the duration of one RandomX round.
pub struct CryptoreManager {
    vm: Mutex<Vm>,
}

impl CryptoreManager {
    /// Allocate the RandomX cache for [`RANDOMX_KEY`] and build the VM.
    /// Allocation failure here is fatal for the caller.
    pub fn new() -> Result<CryptoreManager, RandomXError> {
        let flags = RandomXFlag::get_recommended_flags();
        trace!(target: "cryptore", "initializing RandomX VM, flags: {:?}", flags);
        let cache = RandomXCache::new(flags, RANDOMX_KEY)?;
        let vm = RandomXVM::new(flags, Some(cache), None)?;
        Ok(CryptoreManager {
            vm: Mutex::new(Vm(vm)),
        })
    }

    /// Proof-of-work hash of `(bare_hash, nonce)`; the nonce is appended
    /// little-endian. Deterministic across platforms.
    pub fn compute(&self, bare_hash: &H256, nonce: u64) -> Result<H256, RandomXError> {
        let mut input = [0u8; 40];
        input[..32].copy_from_slice(bare_hash.as_bytes());
        input[32..].copy_from_slice(&nonce.to_le_bytes());

        let vm = self.vm.lock();
        let out = vm.0.calculate_hash(&input)?;
        Ok(H256::from_slice(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn seed_hash_chains_per_epoch() {
        let zero = H256::zero();
        assert_eq!(seed_hash(0), zero);
        assert_eq!(seed_hash(EPOCH_LENGTH - 1), zero);

        let first = H256::from_str(
            "9e6291970cb44dd94008c79bcaf9d86f18b4b49ba5b2a04781db7199ed3b9e4e",
        )
        .unwrap();
        assert_eq!(seed_hash(EPOCH_LENGTH), first);
        assert_eq!(seed_hash(2 * EPOCH_LENGTH - 1), first);

        let second = H256::from_str(
            "3ffcf92d9c820def681c81ab1dffa44c3166539addb445c7731921af69bce8c7",
        )
        .unwrap();
        assert_eq!(seed_hash(2 * EPOCH_LENGTH), second);
    }

    #[test]
    fn difficulty_boundary_pairs() {
        assert_eq!(
            difficulty_to_boundary(&U256::from(1)),
            BigEndianHash::from_uint(&U256::max_value())
        );
        assert_eq!(
            difficulty_to_boundary(&U256::from(2)),
            H256::from_str("8000000000000000000000000000000000000000000000000000000000000000")
                .unwrap()
        );
        assert_eq!(
            difficulty_to_boundary(&U256::from(4)),
            H256::from_str("4000000000000000000000000000000000000000000000000000000000000000")
                .unwrap()
        );
        assert_eq!(
            difficulty_to_boundary(&U256::from(32)),
            H256::from_str("0800000000000000000000000000000000000000000000000000000000000000")
                .unwrap()
        );
    }

    #[test]
    fn boundary_round_trips_on_powers_of_two() {
        for shift in 1..255 {
            let difficulty = U256::one() << shift;
            let boundary = difficulty_to_boundary(&difficulty);
            assert_eq!(boundary_to_difficulty(&boundary), difficulty);
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let manager = CryptoreManager::new().unwrap();
        let hash = H256::repeat_byte(0x42);
        let a = manager.compute(&hash, 7).unwrap();
        let b = manager.compute(&hash, 7).unwrap();
        assert_eq!(a, b);
        let c = manager.compute(&hash, 8).unwrap();
        assert_ne!(a, c);
    }
}
