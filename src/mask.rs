/*  ************************************************************

    QR-Logo: http://qrlogo.kaarposoft.dk

    Copyright (C) 2011-2018 Henrik Kaare Poulsen

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.

    ************************************************************ */


//  ************************************************************
//! Data mask patterns
//!
//! A mask pattern is a predicate over module coordinates; a data
//! module is inverted wherever the predicate holds. Applying the
//! same mask twice restores the original bit, so encoder and
//! decoder share [`apply`].
//  ************************************************************

pub const N_MASKS: u8 = 8;


//  ************************************************************
/// True if mask pattern `m` inverts the module at `(x, y)`
//  ************************************************************

pub fn mask(m: u8, x: usize, y: usize) -> bool {
    match m {
        0 => (y * x % 2) + (y * x % 3) == 0,
        1 => (y / 2 + x / 3) % 2 == 0,
        2 => ((y * x) % 2 + (y * x) % 3) % 2 == 0,
        3 => ((y + x) % 2 + (y * x) % 3) % 2 == 0,
        4 => y % 2 == 0,
        5 => (y + x) % 2 == 0,
        6 => (y + x) % 3 == 0,
        7 => x % 3 == 0,
        _ => false,
    }
}


//  ************************************************************
/// Apply mask pattern `m` to a data module bit
//  ************************************************************

pub fn apply(m: u8, x: usize, y: usize, bit: bool) -> bool {
    bit != mask(m, x, y)
}
