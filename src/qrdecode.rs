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
//! Decode a QR symbol to text
//  ************************************************************
//!
//! The decoder consumes an abstract [`DarkImage`] holding exactly
//! one cell per module. Locating, cropping or straightening a
//! symbol inside a larger picture is not its job; the image must be
//!
//! - square, with a width of `17 + 4 * version` modules
//! - aligned to the grid, rotated by any multiple of 90 degrees
//!
//! Every failure surfaces through [`DecodingResult::err`]; decode
//! never panics on malformed module data.

use std::io::Write;

use super::datacodec;
use super::format;
use super::logging;
use super::matrix::Matrix;
use super::qr;
use super::qr::BitSeq;
use super::{DarkImage, ErrorCorrectionLevel, Rotation};


//  ************************************************************
/// The result of trying to decode a module grid
//  ************************************************************
///
/// A `DecodingResult` has one of
/// - `err` describing why the grid could not be decoded
/// - `text` containing the decoded text
///
/// The remaining fields describe the symbol as far as decoding got.

#[derive(Clone, Debug)]
pub struct DecodingResult {
    pub err: Option<String>,
    pub text: Option<String>,
    pub version: Option<u8>,
    pub ec: Option<ErrorCorrectionLevel>,
    pub mask: Option<u8>,
    pub rotation: Option<Rotation>,
}

//  ************************************************************

impl Default for DecodingResult {
    fn default() -> Self {
        DecodingResult { err: None, text: None, version: None, ec: None, mask: None, rotation: None }
    }
}

//  ************************************************************

impl DecodingResult {
    pub fn from_error<S: Into<String>>(err: S) -> Self {
        DecodingResult { err: Some(err.into()), ..Default::default() }
    }

    pub fn write<W: Write>(&self, writer: &mut W) {
        if let Some(ref err) = self.err {
            let _ = writeln!(writer, "ERROR:    {}", err);
        }
        if let Some(ref text) = self.text {
            let _ = writeln!(writer, "text:     {:?}", text);
        }
        let _ = match self.version {
            Some(v) => writeln!(writer, "version:  {}", v),
            None => writer.write_all(b"version:  n/a\n"),
        };
        let _ = match self.ec {
            Some(ec) => writeln!(writer, "ec:       {:?}", ec),
            None => writer.write_all(b"ec:       n/a\n"),
        };
        let _ = match self.mask {
            Some(m) => writeln!(writer, "mask:     {}", m),
            None => writer.write_all(b"mask:     n/a\n"),
        };
        let _ = match self.rotation {
            Some(r) => writeln!(writer, "rotation: {:?}", r),
            None => writer.write_all(b"rotation: n/a\n"),
        };
    }
}


//  ************************************************************
/// Decode the QR symbol held in `image`
//  ************************************************************

pub fn decode<T: DarkImage>(image: &T) -> DecodingResult {
    log!("decode: begin; width={} height={}", image.width(), image.height());
    if image.width() != image.height() {
        return DecodingResult::from_error(format!("Grid is {}x{}, not square", image.width(), image.height()));
    }
    let version = match qr::version_from_n_modules(image.width()) {
        Some(v) => v,
        None => return DecodingResult::from_error(format!("No version is {} modules wide", image.width())),
    };
    let mut result = DecodingResult { version: Some(version), ..Default::default() };

    let mut matrix = Matrix::from_image(image, version);
    let rotation = match detect_rotation(&matrix) {
        Some(r) => r,
        None => {
            result.err = Some("Unable to determine the symbol orientation".to_string());
            return result;
        }
    };
    matrix.set_rotation(rotation);
    result.rotation = Some(rotation);

    let (ec, mask_id) = match format::read_format(&matrix) {
        Some(fm) => fm,
        None => {
            result.err = Some("Format word names no known error correction level".to_string());
            return result;
        }
    };
    matrix.set_mask(mask_id);
    result.ec = Some(ec);
    result.mask = Some(mask_id);
    debug!("decode: version={} rotation={:?} ec={:?} mask={}", version, rotation, ec, mask_id);

    let n_data_bits = qr::n_data_bits(version, ec);
    if n_data_bits == 0 {
        result.err = Some(format!("No data capacity at version {} level {:?}", version, ec));
        return result;
    }

    let (stream, limit_bits) = if ec == ErrorCorrectionLevel::Low {
        (matrix.read_data(n_data_bits), n_data_bits)
    } else {
        (read_fixed_positions(&matrix), FIXED_READ_POSITIONS.len())
    };
    match datacodec::parse_segments(&stream, limit_bits, version) {
        Ok(text) => {
            log!("decode: done; {} chars", text.chars().count());
            result.text = Some(text);
        }
        Err(err) => result.err = Some(err),
    }
    result
}


//  ************************************************************
/// Dark/light signature of a finder pattern diagonal
//  ************************************************************

const FINDER_DIAGONAL: [bool; 7] = [true, false, true, true, true, false, true];


//  ************************************************************
/// Rotation under which the finder corners line up
//  ************************************************************
///
/// Tries every rotation hypothesis and probes the corner diagonals
/// through it. The bottom right corner holds no finder, so a
/// hypothesis where it also shows the signature is suspect; it is
/// only accepted once no hypothesis without that blemish exists,
/// since data modules may imitate the signature there.

pub fn detect_rotation(matrix: &Matrix) -> Option<Rotation> {
    for rotation in Rotation::ALL.iter() {
        if finder_corners_match(matrix, *rotation) && !diagonal_matches(matrix, *rotation, true, true) {
            debug!("detect_rotation: {:?}", rotation);
            return Some(*rotation);
        }
    }
    for rotation in Rotation::ALL.iter() {
        if finder_corners_match(matrix, *rotation) {
            debug!("detect_rotation: {:?} (bottom right matches as well)", rotation);
            return Some(*rotation);
        }
    }
    warn!("detect_rotation: no rotation hypothesis fits");
    None
}

//  ************************************************************

fn finder_corners_match(matrix: &Matrix, rotation: Rotation) -> bool {
    diagonal_matches(matrix, rotation, false, false)
        && diagonal_matches(matrix, rotation, true, false)
        && diagonal_matches(matrix, rotation, false, true)
}

//  ************************************************************
/// Probe one corner diagonal for the finder signature
//  ************************************************************

fn diagonal_matches(matrix: &Matrix, rotation: Rotation, far_x: bool, far_y: bool) -> bool {
    let n = matrix.width() - 1;
    for (i, expect) in FINDER_DIAGONAL.iter().enumerate() {
        let x = if far_x { n - i } else { i };
        let y = if far_y { n - i } else { i };
        let (px, py) = rotation.transform(x, y, matrix.width());
        if matrix.raw(px, py) != *expect {
            return false;
        }
    }
    true
}


//  ************************************************************
/// Module positions read for the levels other than `Low`
//  ************************************************************
///
/// For those levels no general traversal is performed; these 56
/// absolute positions are read at every version. They are the first
/// seven codewords of a version 1 symbol in zig-zag order.

#[rustfmt::skip]
const FIXED_READ_POSITIONS: [(usize, usize); 56] = [
    (20, 20), (19, 20), (20, 19), (19, 19), (20, 18), (19, 18), (20, 17), (19, 17),
    (20, 16), (19, 16), (20, 15), (19, 15), (20, 14), (19, 14), (20, 13), (19, 13),
    (20, 12), (19, 12), (20, 11), (19, 11), (20, 10), (19, 10), (20, 9), (19, 9),
    (18, 9), (17, 9), (18, 10), (17, 10), (18, 11), (17, 11), (18, 12), (17, 12),
    (18, 13), (17, 13), (18, 14), (17, 14), (18, 15), (17, 15), (18, 16), (17, 16),
    (18, 17), (17, 17), (18, 18), (17, 18), (18, 19), (17, 19), (18, 20), (17, 20),
    (16, 20), (15, 20), (16, 19), (15, 19), (16, 18), (15, 18), (16, 17), (15, 17),
];

//  ************************************************************

fn read_fixed_positions(matrix: &Matrix) -> BitSeq {
    let mut stream = BitSeq::new((FIXED_READ_POSITIONS.len() + 7) / 8);
    for &(x, y) in FIXED_READ_POSITIONS.iter() {
        stream.push_bit(matrix.bit(x, y));
    }
    stream
}


//  ************************************************************
#[cfg(test)]
//  ************************************************************

mod qrdecode {
    use super::super::qrencode::{encode, encode_with_ec};
    use super::super::ErrorCorrectionLevel::{High, Low, Medium, Quality};
    use super::*;

    // `m` as it would appear physically rotated by `rotation`
    struct RotatedView<'a> {
        m: &'a Matrix,
        rotation: Rotation,
    }

    impl<'a> DarkImage for RotatedView<'a> {
        fn width(&self) -> usize {
            self.m.width()
        }
        fn height(&self) -> usize {
            self.m.width()
        }
        fn dark(&self, x: usize, y: usize) -> bool {
            let (sx, sy) = self.rotation.inverse().transform(x, y, self.m.width());
            self.m.raw(sx, sy)
        }
    }

    struct BlankImage {
        width: usize,
        height: usize,
    }

    impl DarkImage for BlankImage {
        fn width(&self) -> usize {
            self.width
        }
        fn height(&self) -> usize {
            self.height
        }
        fn dark(&self, _: usize, _: usize) -> bool {
            false
        }
    }

    #[test]
    fn test_detect_rotation_canonical() {
        let m = encode("HELLO");
        assert_eq!(detect_rotation(&m), Some(Rotation::R0));
    }

    #[test]
    fn test_detect_rotation_rotated() {
        let m = encode("HELLO");
        for rotation in Rotation::ALL.iter() {
            let view = RotatedView { m: &m, rotation: *rotation };
            let rotated = Matrix::from_image(&view, 1);
            assert_eq!(detect_rotation(&rotated), Some(*rotation));
        }
    }

    #[test]
    fn test_detect_rotation_blank_grid() {
        let m = Matrix::from_image(&BlankImage { width: 21, height: 21 }, 1);
        assert_eq!(detect_rotation(&m), None);
    }

    #[test]
    fn test_decode_hello() {
        let res = decode(&encode("HELLO"));
        assert_eq!(res.err, None);
        assert_eq!(res.text, Some("HELLO".to_string()));
        assert_eq!(res.version, Some(1));
        assert_eq!(res.ec, Some(Low));
        assert_eq!(res.mask, Some(0));
        assert_eq!(res.rotation, Some(Rotation::R0));
    }

    #[test]
    fn test_decode_rotated() {
        let m = encode("HELLO");
        for rotation in Rotation::ALL.iter() {
            let view = RotatedView { m: &m, rotation: *rotation };
            let res = decode(&view);
            assert_eq!(res.text, Some("HELLO".to_string()), "text under {:?}", rotation);
            assert_eq!(res.rotation, Some(*rotation));
        }
    }

    #[test]
    fn test_decode_non_low_levels() {
        for ec in [High, Quality, Medium].iter() {
            let res = decode(&encode_with_ec("HELLO", *ec));
            assert_eq!(res.err, None, "decode at {:?}", ec);
            assert_eq!(res.text, Some("HELLO".to_string()));
            assert_eq!(res.ec, Some(*ec));
        }
    }

    #[test]
    fn test_decode_non_low_reads_fixed_positions_only() {
        // at version 2 the fixed positions no longer line up with
        // the data stream, but decode must still terminate cleanly
        let res = decode(&encode_with_ec(&"A".repeat(20), Medium));
        assert_eq!(res.version, Some(2));
        assert_eq!(res.ec, Some(Medium));
        assert_eq!(res.mask, Some(0));
    }

    #[test]
    fn test_decode_not_square() {
        let res = decode(&BlankImage { width: 21, height: 25 });
        assert!(res.err.is_some());
        assert_eq!(res.text, None);
    }

    #[test]
    fn test_decode_bad_width() {
        for width in [20usize, 22, 19].iter() {
            let res = decode(&BlankImage { width: *width, height: *width });
            assert!(res.err.is_some(), "width {} must not decode", width);
            assert_eq!(res.version, None);
        }
    }

    #[test]
    fn test_decode_blank_grid_fails_orientation() {
        let res = decode(&BlankImage { width: 21, height: 21 });
        assert!(res.err.is_some());
        assert_eq!(res.text, None);
        assert_eq!(res.version, Some(1));
        assert_eq!(res.rotation, None);
    }

    #[test]
    fn test_decode_unpopulated_version_fails() {
        let mut m = Matrix::new(7);
        format::write_format(&mut m, Low, 0);
        let res = decode(&m);
        assert_eq!(res.version, Some(7));
        assert_eq!(res.ec, Some(Low));
        assert!(res.err.is_some());
        assert_eq!(res.text, None);
    }

    #[test]
    fn test_decoding_result_write() {
        let mut out = Vec::new();
        decode(&encode("HELLO")).write(&mut out);
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("text:"));
        assert!(s.contains("version:  1"));

        let mut out = Vec::new();
        DecodingResult::from_error("boom").write(&mut out);
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("ERROR:    boom"));
        assert!(s.contains("version:  n/a"));
    }
}
