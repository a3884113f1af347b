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

//! Xcore JSON-RPC interfaces: the `pow` namespace served to remote miners.

#![warn(missing_docs)]

extern crate ethereum_types;
extern crate jsonrpc_core;
extern crate serde;
extern crate xcore;

#[macro_use]
extern crate jsonrpc_derive;

#[cfg(test)]
extern crate common_types as types;
#[cfg(test)]
extern crate crossbeam_channel;
#[cfg(test)]
extern crate serde_json;

pub mod v1;

pub use v1::{Pow, PowClient};
