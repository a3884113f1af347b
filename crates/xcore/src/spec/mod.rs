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

//! Chain parameters.

use ethereum_types::U256;

/// Parameters common to the whole chain, supplied by the chain spec and
/// consumed by the engine and the verifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonParams {
    /// Maximum size of the extra data field of a header.
    pub maximum_extra_data_size: usize,
    /// Minimum energy limit.
    pub min_energy_limit: u64,
    /// How much the energy limit can change between a block and its parent:
    /// the absolute delta must stay below `parent_limit / divisor`.
    pub energy_limit_bound_divisor: u64,
    /// Minimum difficulty; the difficulty calculation never goes below it.
    pub minimum_difficulty: U256,
    /// Difficulty bound divisor: the adjustment step is
    /// `parent_difficulty / divisor`.
    pub difficulty_bound_divisor: U256,
    /// Seconds of block time per unit of downward difficulty pressure.
    pub difficulty_increment_divisor: u64,
    /// Static block reward, in ore.
    pub block_reward: U256,
    /// Maximum number of uncles a block may declare.
    pub maximum_uncle_count: usize,
}

impl Default for CommonParams {
    fn default() -> Self {
        CommonParams {
            maximum_extra_data_size: 32,
            min_energy_limit: 5_000,
            energy_limit_bound_divisor: 1_024,
            minimum_difficulty: U256::from(0x20000),
            difficulty_bound_divisor: U256::from(0x800),
            difficulty_increment_divisor: 5,
            block_reward: U256::from(5_000_000_000_000_000_000u64),
            maximum_uncle_count: 2,
        }
    }
}

impl CommonParams {
    /// Parameters for unit tests: mainnet rules with the difficulty floor
    /// lowered so sealing terminates quickly.
    pub fn test() -> Self {
        CommonParams {
            minimum_difficulty: U256::one(),
            ..Default::default()
        }
    }
}
