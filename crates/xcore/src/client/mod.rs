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

//! Chain access capabilities consumed by the engine.

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_client;

use ethereum_types::H256;

use spec::CommonParams;
use types::{block::Block, header::Header, BlockNumber};

/// Read-only view of the chain the engine verifies against. Implemented by
/// the chain database of the client; everything here must be cheap and
/// callable from verification worker threads.
pub trait ChainReader: Send + Sync {
    /// The parameters of the chain.
    fn config(&self) -> &CommonParams;

    /// Retrieve a header by hash, if known.
    fn header_by_hash(&self, hash: &H256) -> Option<Header>;

    /// Retrieve the header with the given hash at the given number, if it
    /// is part of the chain.
    fn header(&self, hash: &H256, number: BlockNumber) -> Option<Header>;

    /// Retrieve a whole block by hash, if known.
    fn block(&self, hash: &H256) -> Option<Block>;
}
