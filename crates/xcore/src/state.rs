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

//! The slice of account state the engine needs for block finalization.

use ethereum_types::{H256, U256};
use types::Address;

/// Account state as visible to the engine when rewards are applied.
///
/// Implemented by the state database of the client; the engine only ever
/// credits balances and asks for the resulting root.
pub trait StateDB {
    /// Credit `amount` to `address`. A zero amount still marks the account
    /// as touched, which is what the no-reward engines rely on.
    fn add_balance(&mut self, address: &Address, amount: &U256);

    /// Compute the intermediate state root over all changes so far,
    /// removing empty accounts when `delete_empty` is set.
    fn intermediate_root(&mut self, delete_empty: bool) -> H256;
}
