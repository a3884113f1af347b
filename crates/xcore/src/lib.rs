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

#![warn(missing_docs, unused_extern_crates)]

//! Xcore consensus library
//!
//! The proof-of-work engine of the chain together with its verifiers and
//! sealers. The chain database, state and transaction execution stay behind
//! the [`client::ChainReader`] and [`state::StateDB`] capabilities.

extern crate common_types as types;
extern crate cryptore;
extern crate ethereum_types;
extern crate num_cpus;
extern crate parking_lot;
extern crate rand;
extern crate reqwest;
extern crate unexpected;
extern crate url;

#[macro_use]
extern crate crossbeam_channel;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod client;
pub mod engines;
pub mod error;
pub mod spec;
pub mod state;
pub mod verification;

pub use error::{Error, ErrorKind};
