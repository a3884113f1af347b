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

//! RPC error construction.

use jsonrpc_core::{Error, ErrorCode};
use xcore::engines::EngineError;
use xcore::ErrorKind;

mod codes {
    pub const NO_WORK: i64 = -32001;
    pub const STOPPED: i64 = -32004;
    pub const UNSUPPORTED: i64 = -32000;
}

/// No work package is available yet.
pub fn no_work() -> Error {
    Error {
        code: ErrorCode::ServerError(codes::NO_WORK),
        message: "No mining work available yet".into(),
        data: None,
    }
}

/// The engine has been closed.
pub fn stopped() -> Error {
    Error {
        code: ErrorCode::ServerError(codes::STOPPED),
        message: "Engine is stopped".into(),
        data: None,
    }
}

/// Map an engine-level failure onto the RPC error space.
pub fn engine(error: xcore::Error) -> Error {
    match *error.kind() {
        ErrorKind::Engine(EngineError::NoMiningWork) => no_work(),
        ErrorKind::Engine(EngineError::Stopped) => stopped(),
        ref other => Error {
            code: ErrorCode::ServerError(codes::UNSUPPORTED),
            message: format!("{}", other),
            data: None,
        },
    }
}
