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

//! Pow rpc interface.

use ethereum_types::{H256, U64};
use jsonrpc_core::Result;

use v1::types::Work;

/// Pow rpc interface, the mining surface served to remote sealers.
#[rpc(server)]
pub trait Pow {
    /// Returns the current work package: seal hash, seed hash, target and
    /// block number, all hex-encoded.
    #[rpc(name = "pow_getWork")]
    fn work(&self) -> Result<Work>;

    /// Submits a proof-of-work solution for the stashed package with the
    /// given seal hash. Returns whether the solution was accepted.
    #[rpc(name = "pow_submitWork")]
    fn submit_work(&self, nonce: U64, seal_hash: H256) -> Result<bool>;

    /// Records the hash rate a remote miner reports for itself, keyed by a
    /// client-chosen identifier. Returns false once the engine is closed.
    #[rpc(name = "pow_submitHashrate")]
    fn submit_hashrate(&self, rate: U64, id: H256) -> Result<bool>;

    /// Returns the aggregate hash rate: local sealing plus the live remote
    /// reports.
    #[rpc(name = "pow_hashrate")]
    fn hashrate(&self) -> Result<U64>;
}
