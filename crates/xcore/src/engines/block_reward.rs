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

//! Block and uncle reward application.

use ethereum_types::U256;

use spec::CommonParams;
use state::StateDB;
use types::header::Header;

/// Credit the rewards for a finalized block: the static reward plus an
/// inclusion bonus of 1/32 per uncle to the author, and the depth-scaled
/// reward to each uncle author.
///
/// Assumes all uncles are valid uncles, i.e. within the ancestry window, so
/// the depth arithmetic cannot underflow.
pub fn apply_block_rewards(
    state: &mut dyn StateDB,
    header: &Header,
    uncles: &[Header],
    params: &CommonParams,
) {
    let reward = params.block_reward;

    let author_reward = reward + reward / U256::from(32) * U256::from(uncles.len());
    state.add_balance(header.author(), &author_reward);
    trace!(target: "engine", "#{}: author reward {} to {:?}", header.number(), author_reward, header.author());

    let number = header.number();
    for uncle in uncles {
        let uncle_reward = reward * U256::from(8 + uncle.number() - number) / U256::from(8);
        state.add_balance(uncle.author(), &uncle_reward);
        trace!(target: "engine", "#{}: uncle reward {} to {:?}", header.number(), uncle_reward, uncle.author());
    }
}

/// Touch the reward recipients with a zero-value credit instead of paying
/// out. Keeps state-access semantics identical for engines configured
/// without rewards.
pub fn touch_rewards(state: &mut dyn StateDB, header: &Header, uncles: &[Header]) {
    state.add_balance(header.author(), &U256::zero());
    for uncle in uncles {
        state.add_balance(uncle.author(), &U256::zero());
    }
}
