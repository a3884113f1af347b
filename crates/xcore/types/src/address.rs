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

//! Account address type.

use fixed_hash::construct_fixed_hash;
use impl_rlp::impl_fixed_hash_rlp;
use impl_serde::impl_fixed_hash_serde;

construct_fixed_hash! {
    /// A 22-byte ICAN account identifier. The two leading bytes are the
    /// checksum/network prefix, the remaining twenty the account body.
    pub struct Address(22);
}

impl_fixed_hash_rlp!(Address, 22);
impl_fixed_hash_serde!(Address, 22);

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn address_is_22_bytes() {
        assert_eq!(Address::len_bytes(), 22);
        assert_eq!(Address::zero().as_bytes().len(), 22);
    }

    #[test]
    fn rlp_round_trips() {
        let mut addr = Address::zero();
        addr.0[0] = 0xcb;
        addr.0[21] = 0x7f;
        let encoded = rlp::encode(&addr);
        assert_eq!(rlp::decode::<Address>(&encoded).unwrap(), addr);
    }
}
