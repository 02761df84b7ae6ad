// Copyright 2019. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::types::PrivateKey;
use newtype_ops::newtype_ops;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error, Formatter},
    iter::Sum,
};

/// All wallet arithmetic uses this newtype to keep raw `u64`s from being mixed up with heights, indices and the
/// like. One `Amount` unit is the smallest indivisible unit of value.
#[derive(Copy, Default, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(pub u64);

// You can only add or subtract amounts from amounts
newtype_ops! { [Amount] {add sub} {:=} Self Self }
newtype_ops! { [Amount] {add sub} {:=} &Self &Self }
newtype_ops! { [Amount] {add sub} {:=} Self &Self }

// Multiplication and division only makes sense when an amount is scaled by a plain integer
newtype_ops! { [Amount] {mul div rem} {:=} Self u64 }

impl Amount {
    pub fn checked_sub(self, v: Amount) -> Option<Amount> {
        self.0.checked_sub(v.0).map(Amount)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Amount(v)
    }
}

impl From<Amount> for u64 {
    fn from(v: Amount) -> Self {
        v.0
    }
}

/// Commitments commit to an amount via the value generator, so amounts must lift into scalars
impl From<Amount> for PrivateKey {
    fn from(v: Amount) -> Self {
        v.0.into()
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount(0), |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.fold(Amount(0), |acc, v| acc + *v)
    }
}
