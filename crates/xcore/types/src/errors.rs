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

//! Block verification errors.

use std::{error, fmt};

use ethereum_types::{H256, U256};
use unexpected::{Mismatch, OutOfBounds};

use crate::BlockNumber;

/// Errors concerning block processing.
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum BlockError {
    /// Block has too many uncles.
    TooManyUncles(OutOfBounds<usize>),
    /// Extra data is of an invalid length.
    ExtraDataTooLong(OutOfBounds<usize>),
    /// Energy limit header field is out of bounds.
    InvalidEnergyLimit(OutOfBounds<u64>),
    /// Energy used exceeds the energy limit.
    InvalidEnergyUsed(OutOfBounds<u64>),
    /// Number field of header is wrong.
    InvalidNumber(Mismatch<BlockNumber>),
    /// Difficulty does not match the calculated difficulty for the parent
    /// and timestamp.
    BadDifficulty(Mismatch<U256>),
    /// Difficulty is out of range; the proof-of-work boundary is undefined
    /// for it.
    InvalidDifficulty(OutOfBounds<U256>),
    /// Proof-of-work hash is above the boundary for the declared difficulty.
    InvalidProofOfWork(OutOfBounds<U256>),
    /// Timestamp is too far in the future.
    FutureBlock(OutOfBounds<u64>),
    /// Timestamp does not advance past the parent's.
    OlderBlockTime(OutOfBounds<u64>),
    /// Parent of the header is not known.
    UnknownAncestor(H256),
    /// An uncle appears twice, in the block or in the recent ancestry.
    DuplicateUncle(H256),
    /// An uncle is one of the block's own ancestors.
    UncleIsAncestor(H256),
    /// An uncle's parent is not within the ancestry window, or is the
    /// block's own parent.
    DanglingUncle(H256),
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::BlockError::*;

        let msg = match *self {
            TooManyUncles(ref oob) => format!("Block has too many uncles. {}", oob),
            ExtraDataTooLong(ref oob) => format!("Extra block data too long. {}", oob),
            InvalidEnergyLimit(ref oob) => format!("Invalid energy limit. {}", oob),
            InvalidEnergyUsed(ref oob) => format!("Energy used above energy limit. {}", oob),
            InvalidNumber(ref mis) => format!("Invalid number in header: {}", mis),
            BadDifficulty(ref mis) => format!("Invalid block difficulty: {}", mis),
            InvalidDifficulty(ref oob) => format!("Difficulty out of bounds: {}", oob),
            InvalidProofOfWork(ref oob) => format!("Invalid proof of work: {}", oob),
            FutureBlock(ref oob) => format!("Block timestamp too far in the future: {}", oob),
            OlderBlockTime(ref oob) => format!("Block timestamp not ahead of parent: {}", oob),
            UnknownAncestor(ref hash) => format!("Unknown ancestor: {}", hash),
            DuplicateUncle(ref hash) => format!("Uncle {} already in chain or block", hash),
            UncleIsAncestor(ref hash) => format!("Uncle {} is an ancestor", hash),
            DanglingUncle(ref hash) => format!("Uncle {} has no ancestor parent", hash),
        };

        f.write_fmt(format_args!("Block error ({})", msg))
    }
}

impl error::Error for BlockError {
    fn description(&self) -> &str {
        "Block error"
    }
}
