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

//! Pow rpc implementation.

use std::sync::Arc;

use ethereum_types::{H256, U64};
use jsonrpc_core::Result;
use xcore::engines::{Cryptore, Engine};

use v1::helpers::errors;
use v1::traits::Pow;
use v1::types::Work;

/// Pow rpc implementation, backed by a live Cryptore engine.
pub struct PowClient {
    engine: Arc<Cryptore>,
}

impl PowClient {
    /// Serve the `pow` namespace for `engine`.
    pub fn new(engine: Arc<Cryptore>) -> PowClient {
        PowClient { engine }
    }
}

impl Pow for PowClient {
    fn work(&self) -> Result<Work> {
        self.engine.work().map(Into::into).map_err(errors::engine)
    }

    fn submit_work(&self, nonce: U64, seal_hash: H256) -> Result<bool> {
        Ok(self.engine.submit_work(nonce.as_u64(), seal_hash))
    }

    fn submit_hashrate(&self, rate: U64, id: H256) -> Result<bool> {
        Ok(self.engine.submit_hashrate(rate.as_u64(), id))
    }

    fn hashrate(&self) -> Result<U64> {
        Ok(U64::from(self.engine.hashrate() as u64))
    }
}
