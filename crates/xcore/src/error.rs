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

//! General error types for use in xcore.

use engines::EngineError;
use types::errors::BlockError;

error_chain! {
    errors {
        /// Error concerning block processing.
        Block(err: BlockError) {
            description("Block error")
            display("{}", err)
        }

        /// Error concerning the consensus engine.
        Engine(err: EngineError) {
            description("Engine error")
            display("{}", err)
        }

        /// The proof-of-work subsystem is unavailable.
        PowUnavailable(msg: String) {
            description("Proof-of-work unavailable")
            display("Proof-of-work unavailable: {}", msg)
        }
    }
}

impl From<BlockError> for Error {
    fn from(error: BlockError) -> Error {
        ErrorKind::Block(error).into()
    }
}

impl From<EngineError> for Error {
    fn from(error: EngineError) -> Error {
        ErrorKind::Engine(error).into()
    }
}
