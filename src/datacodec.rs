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
//! Segment encoding and decoding of the data bit stream
//  ************************************************************
//!
//! Text is carried in eight bit byte segments. Text which is not
//! plain ASCII is preceded by an ECI segment announcing UTF-8, and
//! every stream ends with a terminator segment, even when the
//! capacity would allow leaving it out.
//!
//! The parser understands byte and ECI segments. The numeric,
//! alphanumeric and kanji modes have no decoder here; meeting one
//! ends the parse with whatever text was accumulated so far, since
//! the width of such a segment is unknown.

use super::logging;
use super::qr::{n_count_bits, BitSeq};
use super::Mode;


//  ************************************************************

/// Assigned ECI number for UTF-8
const ECI_UTF8: u16 = 26;


//  ************************************************************
/// Number of bits `append_segment` will write for `text`
//  ************************************************************
///
/// The character count field is taken to be 8 bits wide, which
/// holds for every version with a populated capacity table.

pub fn bit_length(text: &str) -> usize {
    let mut n = 4 + 8 + 8 * text.len() + 4;
    if !text.is_ascii() {
        n += 12;
    }
    n
}


//  ************************************************************
/// Append the segments carrying `text`, terminator included
//  ************************************************************

pub fn append_segment(bits: &mut BitSeq, text: &str, version: u8) {
    debug!("append_segment: text.len={} version={}", text.len(), version);
    if !text.is_ascii() {
        bits.append_bits(Mode::Eci as u16, 4);
        bits.append_bits(ECI_UTF8, 8);
    }
    bits.append_bits(Mode::EightBit as u16, 4);
    bits.append_bits(text.len() as u16, n_count_bits(version));
    for byte in text.bytes() {
        bits.append_bits(u16::from(byte), 8);
    }
    bits.append_bits(Mode::Terminator as u16, 4);
}


//  ************************************************************
/// Parse the segments of a data stream back into text
//  ************************************************************
///
/// Reads mode indicators until the terminator or `limit_bits` is
/// reached. An ECI segment switches the charset for the byte
/// segments after it; ECI 25 also switches them to 16 bit units.
/// A segment of a mode without a decoder ends the parse early;
/// the text accumulated up to it is still returned.

pub fn parse_segments(bits: &BitSeq, limit_bits: usize, version: u8) -> Result<String, String> {
    trace!("parse_segments: limit_bits={} version={}", limit_bits, version);
    let mut text = String::new();
    let mut eci: Option<u32> = None;
    let mut idx = 0;
    while idx + 4 <= limit_bits {
        let indicator = bits.get_bits(idx, 4) as u8;
        idx += 4;
        let mode = match Mode::from_indicator(indicator) {
            Some(m) => m,
            None => return Err(format!("Unknown mode indicator {:04b}", indicator)),
        };
        trace!("parse_segments: idx={} mode={:?}", idx - 4, mode);
        match mode {
            Mode::Terminator => break,
            Mode::Numeric | Mode::AlphaNumeric | Mode::Kanji => {
                warn!("parse_segments: no decoder for mode {:?}; dropping the rest of the stream", mode);
                break;
            }
            Mode::Eci => {
                let (number, n_bits) = parse_eci_number(bits, idx, limit_bits)?;
                debug!("parse_segments: ECI {}", number);
                eci = Some(number);
                idx += n_bits;
            }
            Mode::EightBit => {
                let nc = n_count_bits(version);
                if idx + nc > limit_bits {
                    return Err("Character count field is cut short".to_string());
                }
                let count = bits.get_bits(idx, nc) as usize;
                idx += nc;
                let unit_bits = if eci == Some(25) { 16 } else { 8 };
                if idx + count * unit_bits > limit_bits {
                    return Err(format!("Segment of {} units exceeds the {} bit data bound", count, limit_bits));
                }
                let mut units = Vec::with_capacity(count);
                for _ in 0..count {
                    units.push(bits.get_bits(idx, unit_bits));
                    idx += unit_bits;
                }
                text.push_str(&units_to_text(&units, eci));
            }
        }
    }
    Ok(text)
}


//  ************************************************************
/// ECI number at `idx` and the number of bits it occupies
//  ************************************************************
///
/// The width is announced by a unary prefix on the first byte:
/// `0` for one byte, `10` for two, `110` for three.

fn parse_eci_number(bits: &BitSeq, idx: usize, limit_bits: usize) -> Result<(u32, usize), String> {
    if idx + 8 > limit_bits {
        return Err("ECI segment is cut short".to_string());
    }
    let first = bits.get_bits(idx, 8);
    if first & 0x80 == 0 {
        return Ok((u32::from(first & 0x7F), 8));
    }
    if first & 0xC0 == 0x80 {
        if idx + 16 > limit_bits {
            return Err("ECI segment is cut short".to_string());
        }
        return Ok((u32::from(bits.get_bits(idx, 16) & 0x3FFF), 16));
    }
    if idx + 24 > limit_bits {
        return Err("ECI segment is cut short".to_string());
    }
    let number = u32::from(first & 0x1F) << 16 | u32::from(bits.get_bits(idx + 8, 16));
    Ok((number, 24))
}


//  ************************************************************
/// Text from the units of one byte segment under the active ECI
//  ************************************************************

fn units_to_text(units: &[u16], eci: Option<u32>) -> String {
    match eci {
        Some(25) => String::from_utf16_lossy(units),
        Some(26) => {
            let bytes: Vec<u8> = units.iter().map(|&u| u as u8).collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        // Latin-1 (1, 3) and ASCII (27, 170, no ECI) both map one
        // byte to one char, as does the fallback for all other
        // ECI numbers
        _ => units.iter().map(|&u| char::from(u as u8)).collect(),
    }
}
