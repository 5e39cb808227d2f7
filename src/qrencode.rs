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
//! Encode text to a QR symbol
//  ************************************************************
//!
//! The encoder picks the smallest version whose capacity holds the
//! text, always writes the data stream under mask 0, and renders
//! through an abstract [`PixelSink`].
//!
//! There is no capacity validation: a text too long for the
//! populated capacity tables clamps the version and yields an
//! underfilled grid.

use std::cmp;

use super::datacodec;
use super::format;
use super::logging;
use super::matrix::Matrix;
use super::qr;
use super::qr::BitSeq;
use super::reedsolomon::ReedSolomonEncoder;
use super::{ErrorCorrectionLevel, PixelSink};


//  ************************************************************
/// Encode `text` at error correction level `Low`
//  ************************************************************

pub fn encode(text: &str) -> Matrix {
    encode_with_ec(text, ErrorCorrectionLevel::Low)
}


//  ************************************************************
/// Encode `text` at the given error correction level
//  ************************************************************

pub fn encode_with_ec(text: &str, ec: ErrorCorrectionLevel) -> Matrix {
    log!("encode: begin encoding text of {} bytes", text.len());
    let n_bits = datacodec::bit_length(text);
    let version = qr::version_from_n_bits(n_bits, ec);
    let n_data_codewords = qr::n_data_codewords(version, ec);
    let n_ec_codewords = qr::n_ec_codewords(version, ec);
    debug!(
        "encode: version={} ec={:?} n_bits={} n_data_codewords={} n_ec_codewords={}",
        version, ec, n_bits, n_data_codewords, n_ec_codewords
    );

    // bit_length assumes the 8 bit count field; a clamped version
    // of 10 or above writes the 16 bit field instead
    let n_segment_bits = n_bits + (qr::n_count_bits(version) - 8);
    let mut bits = BitSeq::new(cmp::max(n_data_codewords, (n_segment_bits + 7) / 8));
    datacodec::append_segment(&mut bits, text, version);
    set_padding(&mut bits, n_data_codewords);

    let stream = BitSeq::from(add_error_correction(bits.into_bytes(), n_ec_codewords));

    let mut matrix = Matrix::new(version);
    matrix.set_mask(0);
    matrix.write_data(&stream);
    format::write_format(&mut matrix, ec, 0);
    log!("encode: done; version={} width={}", version, matrix.width());
    matrix
}


//  ************************************************************
/// Fill the data region after the segments with pad codewords
//  ************************************************************

fn set_padding(bits: &mut BitSeq, n_data_codewords: usize) {
    let pad: [u8; 2] = [0xEC, 0x11];
    let mut pi = 0;
    for i in bits.next_byte_idx()..n_data_codewords {
        bits.set_u8(pad[pi], i);
        pi = 1 - pi;
    }
}


//  ************************************************************
/// Append the error correction codewords to the data codewords
//  ************************************************************

fn add_error_correction(mut bytes: Vec<u8>, n_ec_codewords: usize) -> Vec<u8> {
    let rs = ReedSolomonEncoder::new(n_ec_codewords);
    let parity = rs.encode(&bytes);
    debug!("add_error_correction: {} data bytes, {} ec bytes", bytes.len(), parity.len());
    bytes.extend_from_slice(&parity);
    bytes
}


//  ************************************************************
/// Render `matrix` onto `sink`
//  ************************************************************
///
/// Every pixel of the output square is set, light or dark. The
/// square is `(width + 2 * quiet_zone) * module_px` pixels wide.

pub fn render<T: PixelSink>(matrix: &Matrix, sink: &mut T, module_px: usize, quiet_zone: usize) {
    let w = matrix.width();
    let dim = (w + 2 * quiet_zone) * module_px;
    log!("render: {} modules -> {} pixels", w, dim);
    for px in 0..dim {
        for py in 0..dim {
            let x = px / module_px;
            let y = py / module_px;
            let dark = x >= quiet_zone
                && x < quiet_zone + w
                && y >= quiet_zone
                && y < quiet_zone + w
                && matrix.raw(x - quiet_zone, y - quiet_zone);
            sink.set_pixel(px, py, dark);
        }
    }
}
