/*  ************************************************************

    QR-Logo: http://qrlogo.kaarposoft.dk

    Copyright (C) 2018 Henrik Kaare Poulsen

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
//! Test encoding and then decoding QR symbols held in a matrix
//  ************************************************************

extern crate qrsym;

use qrsym::logging;
use qrsym::prng::Rng;
use qrsym::qr;
use qrsym::qrdecode::decode;
use qrsym::qrencode::{encode, encode_with_ec};
use qrsym::{DarkImage, ErrorCorrectionLevel, Matrix, Rotation};

mod common;
use common::print_decoding_result;


//  ************************************************************
//  Test round trips through every version with populated tables
//  ************************************************************

#[test]
fn encode_decode_matrix_low_fixed_lengths() {
    roundtrip_versions(0, 61);
}

#[test]
fn encode_decode_matrix_low_random_lengths() {
    roundtrip_versions(4, 62);
}

#[test]
fn encode_decode_matrix_empty_text() {
    logging::set_loglevel(1);
    let res = decode(&encode(""));
    print_decoding_result(&res);
    assert!(res.err.is_none(), "decode failed: {}", res.err.unwrap());
    assert_eq!(res.version, Some(1));
    assert_eq!(res.text, Some(String::new()));
}


//  ************************************************************
//  Test decoding physically rotated symbols
//  ************************************************************

#[test]
fn encode_decode_matrix_rotated_r90() {
    rotated_roundtrip(Rotation::R90);
}

#[test]
fn encode_decode_matrix_rotated_r180() {
    rotated_roundtrip(Rotation::R180);
}

#[test]
fn encode_decode_matrix_rotated_r270() {
    rotated_roundtrip(Rotation::R270);
}


//  ************************************************************
//  Test text which needs an ECI segment announcing UTF-8
//  ************************************************************

#[test]
fn encode_decode_matrix_eci_snowman() {
    eci_roundtrip("\u{2603}", 1);
}

#[test]
fn encode_decode_matrix_eci_danish() {
    eci_roundtrip("h\u{e5}ber p\u{e5} r\u{f8}d gr\u{f8}d", 2);
}

#[test]
fn encode_decode_matrix_eci_japanese() {
    eci_roundtrip("\u{65e5}\u{672c}\u{8a9e}\u{30c6}\u{30ad}\u{30b9}\u{30c8}", 2);
}

#[test]
fn encode_decode_matrix_eci_long() {
    eci_roundtrip(&"\u{e6}\u{f8}\u{e5}".repeat(12), 4);
}


//  ************************************************************
//  Test the levels above Low
//
//  For those levels the decoder only reads the fixed version 1
//  prefix positions, so only short version 1 payloads round trip.
//  ************************************************************

#[test]
fn encode_decode_matrix_short_medium() {
    short_text_roundtrip(ErrorCorrectionLevel::Medium);
}

#[test]
fn encode_decode_matrix_short_quality() {
    short_text_roundtrip(ErrorCorrectionLevel::Quality);
}

#[test]
fn encode_decode_matrix_short_high() {
    short_text_roundtrip(ErrorCorrectionLevel::High);
}


//  ************************************************************
/// Round trip random ASCII texts at level Low, all versions
//  ************************************************************
///
/// For every version the tested lengths hold the boundary lengths
/// (the shortest and longest text selecting that version) plus
/// `n_random` random lengths in between.

fn roundtrip_versions(n_random: usize, seed: u32) {
    logging::set_loglevel(1);
    let ec = ErrorCorrectionLevel::Low;
    let mut rng = Rng::new(seed);
    for version in qr::VERSION_MIN..=qr::VERSION_SUPPORTED_MAX {
        let max_len = qr::n_data_codewords(version, ec) - 2;
        let min_len = if version == qr::VERSION_MIN { 0 } else { qr::n_data_codewords(version - 1, ec) - 1 };
        let mut lengths = vec![max_len, max_len - 1, min_len];
        for _ in 0..n_random {
            lengths.push(rng.get_usize_clamped(min_len, max_len));
        }
        for len in lengths {
            println!(
                "\n\n========== ========== MATRIX TEST ==========> ec={:?} version={} min={} max={} len={}",
                ec, version, min_len, max_len, len
            );
            let text = rng.get_ascii_string(len);
            let res = decode(&encode_with_ec(&text, ec));
            print_decoding_result(&res);
            assert!(res.err.is_none(), "decode failed: {}", res.err.unwrap());
            assert_eq!(res.version, Some(version), "wrong version for a {} byte text", len);
            let decoded = res.text.unwrap();
            assert!(decoded == text, "decoded to wrong text: expected {:?}; got {:?}", text, decoded);
        }
    }
}


//  ************************************************************
/// Round trip a full capacity text through a rotated view
//  ************************************************************

fn rotated_roundtrip(rotation: Rotation) {
    logging::set_loglevel(1);
    let ec = ErrorCorrectionLevel::Low;
    for version in qr::VERSION_MIN..=qr::VERSION_SUPPORTED_MAX {
        let len = qr::n_data_codewords(version, ec) - 2;
        let text: String = "0123456789".chars().cycle().take(len).collect();
        println!("\n\n========== ========== ROTATED TEST ==========> rotation={:?} version={} len={}", rotation, version, len);
        let matrix = encode_with_ec(&text, ec);
        let res = decode(&RotatedWrapper { matrix: &matrix, rotation });
        print_decoding_result(&res);
        assert!(res.err.is_none(), "decode failed: {}", res.err.unwrap());
        assert_eq!(res.version, Some(version));
        assert_eq!(res.rotation, Some(rotation), "wrong rotation at version {}", version);
        let decoded = res.text.unwrap();
        assert!(decoded == text, "decoded to wrong text: expected {:?}; got {:?}", text, decoded);
    }
}


//  ************************************************************
/// Round trip a text carrying an ECI segment
//  ************************************************************

fn eci_roundtrip(text: &str, expected_version: u8) {
    logging::set_loglevel(1);
    assert!(!text.is_ascii(), "test text must need the ECI segment");
    let res = decode(&encode(text));
    print_decoding_result(&res);
    assert!(res.err.is_none(), "decode failed: {}", res.err.unwrap());
    assert_eq!(res.version, Some(expected_version));
    let decoded = res.text.unwrap();
    assert!(decoded == text, "decoded to wrong text: expected {:?}; got {:?}", text, decoded);
}


//  ************************************************************
/// Round trip short texts at a level above Low
//  ************************************************************

fn short_text_roundtrip(ec: ErrorCorrectionLevel) {
    logging::set_loglevel(1);
    for text in ["", "A", "42", "qr!", "HELLO"].iter() {
        println!("\n\n========== ========== SHORT TEXT TEST ==========> ec={:?} text={:?}", ec, text);
        let res = decode(&encode_with_ec(text, ec));
        print_decoding_result(&res);
        assert!(res.err.is_none(), "decode failed: {}", res.err.unwrap());
        assert_eq!(res.version, Some(1));
        assert_eq!(res.ec, Some(ec));
        assert_eq!(res.text, Some(text.to_string()), "round trip at {:?}", ec);
    }
}


//  ************************************************************
/// A matrix as it would appear physically rotated
//  ************************************************************

pub struct RotatedWrapper<'a> {
    matrix: &'a Matrix,
    rotation: Rotation,
}

impl<'a> DarkImage for RotatedWrapper<'a> {
    fn width(&self) -> usize {
        self.matrix.width()
    }
    fn height(&self) -> usize {
        self.matrix.width()
    }
    fn dark(&self, x: usize, y: usize) -> bool {
        let (sx, sy) = self.rotation.inverse().transform(x, y, self.matrix.width());
        self.matrix.raw(sx, sy)
    }
}
