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
//! Format information
//  ************************************************************
//!
//! The format word carries the error correction level and the mask
//! id: 5 payload bits (2 level, 3 mask) followed by 10 check bits
//! from polynomial division against [`FORMAT_GENERATOR`]. After the
//! division, the bits at writing positions 10 and 13 are inverted;
//! both are check bits.
//!
//! The word is written at two mirrored locations flanking the
//! finder patterns. Reading uses the payload bits of the primary
//! copy only.

use super::logging;
use super::matrix::Matrix;
use super::ErrorCorrectionLevel;


//  ************************************************************

pub const N_FORMAT_BITS: usize = 15;

/// Check bit generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u16 = 0b101_0011_0111;

/// Inverts writing positions 10 and 13 of the finished word
const FORMAT_FLIP: u16 = 0b000_0000_0001_0010;


//  ************************************************************
/// The 15 bit format word for `ec` and `mask`
//  ************************************************************

pub fn format_word(ec: ErrorCorrectionLevel, mask: u8) -> u16 {
    let payload = ((ec as u16) << 3) | u16::from(mask & 0b111);
    let mut check = payload << 10;
    for i in (10..N_FORMAT_BITS).rev() {
        if check & (1u16 << i) != 0 {
            check ^= FORMAT_GENERATOR << (i - 10);
        }
    }
    let word = ((payload << 10) | check) ^ FORMAT_FLIP;
    trace!("format_word: ec={:?} mask={} word={:#017b}", ec, mask, word);
    word
}


//  ************************************************************
/// Grid positions of format bit `n`, primary copy first
//  ************************************************************
///
/// Writing position 0 holds the most significant bit of the word.
/// The primary copy flanks the top left finder; the mirrored copy
/// is split between the top right and bottom left finders.

pub fn format_bit_positions(n: usize, n_modules: usize) -> [(usize, usize); 2] {
    let n_modules = n_modules as i32;
    let ((x0, y0), (mut x1, mut y1)) = [
        ((8, 0), (-1, 8)),
        ((8, 1), (-2, 8)),
        ((8, 2), (-3, 8)),
        ((8, 3), (-4, 8)),
        ((8, 4), (-5, 8)),
        ((8, 5), (-6, 8)),
        ((8, 7), (-7, 8)),
        ((8, 8), (-8, 8)),
        ((7, 8), (8, -7)),
        ((5, 8), (8, -6)),
        ((4, 8), (8, -5)),
        ((3, 8), (8, -4)),
        ((2, 8), (8, -3)),
        ((1, 8), (8, -2)),
        ((0, 8), (8, -1)),
    ][n];
    if x1 < 0 {
        x1 += n_modules;
    }
    if y1 < 0 {
        y1 += n_modules;
    }
    [(x0, y0), (x1 as usize, y1 as usize)]
}


//  ************************************************************
/// Write the format word at both mirrored locations
//  ************************************************************

pub fn write_format(matrix: &mut Matrix, ec: ErrorCorrectionLevel, mask: u8) {
    trace!("write_format: ec={:?} mask={}", ec, mask);
    let word = format_word(ec, mask);
    let w = matrix.width();
    for n in 0..N_FORMAT_BITS {
        let bit = word >> (N_FORMAT_BITS - 1 - n) & 1 == 1;
        let [(x0, y0), (x1, y1)] = format_bit_positions(n, w);
        matrix.set_rotated_bit(x0, y0, bit);
        matrix.set_rotated_bit(x1, y1, bit);
    }
}


//  ************************************************************
/// Error correction level and mask id from the primary copy
//  ************************************************************
///
/// Only the five payload bits are read; the check bits are never
/// inspected, so the inverted positions do not matter here.

pub fn read_format(matrix: &Matrix) -> Option<(ErrorCorrectionLevel, u8)> {
    let w = matrix.width();
    let mut payload = 0u16;
    for n in 0..5 {
        let [(x, y), _] = format_bit_positions(n, w);
        payload = payload << 1 | u16::from(matrix.rotated_bit(x, y));
    }
    let code = (payload >> 3) as u8;
    let mask = (payload & 0b111) as u8;
    debug!("read_format: code={} mask={}", code, mask);
    let ec = ErrorCorrectionLevel::from_format_code(code)?;
    Some((ec, mask))
}
