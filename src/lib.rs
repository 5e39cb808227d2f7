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
//! Structural QR symbol codec
//  ************************************************************
//!
//! Encodes text into a QR module matrix, and decodes such a matrix
//! back to text. The codec works directly on dark/light modules;
//! locating a symbol within a camera image is out of scope.
//!
//! - [`encode`] / [`encode_with_ec`] build a [`matrix::Matrix`] from text
//! - [`decode`] reads text back from anything implementing [`DarkImage`]
//! - [`render`] draws a matrix into a [`PixelSink`] with a quiet zone

#[macro_use]
pub mod logging;
pub mod datacodec;
pub mod format;
pub mod galois;
pub mod mask;
pub mod matrix;
pub mod prng;
pub mod qr;
pub mod qrdecode;
pub mod qrencode;
pub mod reedsolomon;

pub use matrix::Matrix;
pub use qrdecode::{decode, DecodingResult};
pub use qrencode::{encode, encode_with_ec, render};


//  ************************************************************
/// Data mode of a segment in the QR data stream
//  ************************************************************
///
/// The discriminant is the four bit mode indicator which precedes
/// each segment in the data stream.
///
/// # Note
///
/// Only `EightBit` and `Eci` segments are fully handled;
/// `Numeric`, `AlphaNumeric` and `Kanji` are recognized but
/// their payloads are not decoded.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Terminator = 0b0000,
    Numeric = 0b0001,
    AlphaNumeric = 0b0010,
    EightBit = 0b0100,
    Eci = 0b0111,
    Kanji = 0b1000,
}

impl Mode {
    //  ************************************************************
    /// Mode from a four bit mode indicator
    //  ************************************************************

    pub fn from_indicator(indicator: u8) -> Option<Mode> {
        match indicator {
            0b0000 => Some(Mode::Terminator),
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::AlphaNumeric),
            0b0100 => Some(Mode::EightBit),
            0b0111 => Some(Mode::Eci),
            0b1000 => Some(Mode::Kanji),
            _ => None,
        }
    }
}


//  ************************************************************
/// Error Correction Level of a QR symbol
//  ************************************************************
///
/// The discriminant is the two bit code carried in the format
/// information word; note that `Low` carries the *highest* code.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCorrectionLevel {
    /// ~ 30% error correction capability
    High = 0,
    /// ~ 25% error correction capability
    Quality = 1,
    /// ~ 15% error correction capability
    Medium = 2,
    /// ~ 7% error correction capability
    Low = 3,
}

impl ErrorCorrectionLevel {
    //  ************************************************************
    /// Error correction level from the two bit format information code
    //  ************************************************************

    pub fn from_format_code(code: u8) -> Option<ErrorCorrectionLevel> {
        match code {
            0 => Some(ErrorCorrectionLevel::High),
            1 => Some(ErrorCorrectionLevel::Quality),
            2 => Some(ErrorCorrectionLevel::Medium),
            3 => Some(ErrorCorrectionLevel::Low),
            _ => None,
        }
    }
}


//  ************************************************************
/// Clockwise rotation of a symbol relative to canonical orientation
//  ************************************************************

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    //  ************************************************************
    /// Map canonical coordinates to stored coordinates
    //  ************************************************************
    ///
    /// Returns where the canonical module `(x, y)` is found in the
    /// stored grid of a symbol of width `width` rotated by `self`.

    pub fn transform(self, x: usize, y: usize, width: usize) -> (usize, usize) {
        let n = width - 1;
        match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (n - y, x),
            Rotation::R180 => (n - x, n - y),
            Rotation::R270 => (y, n - x),
        }
    }

    //  ************************************************************
    /// The rotation undoing `self`
    //  ************************************************************

    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R0,
            Rotation::R90 => Rotation::R270,
            Rotation::R180 => Rotation::R180,
            Rotation::R270 => Rotation::R90,
        }
    }
}


//  ************************************************************
/// Generic interface to dark/light module sources
//  ************************************************************
///
/// Implemented by [`matrix::Matrix`] itself, and by any image-like
/// type which can tell whether the module at `(x, y)` is dark.

pub trait DarkImage {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn dark(&self, x: usize, y: usize) -> bool;
}


//  ************************************************************
/// Generic interface to pixel destinations for rendering
//  ************************************************************

pub trait PixelSink {
    fn set_pixel(&mut self, x: usize, y: usize, dark: bool);
}


//  ************************************************************
/// Set logging level
//  ************************************************************

pub fn set_loglevel(lvl: usize) {
    logging::set_loglevel(lvl);
}
