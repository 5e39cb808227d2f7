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
//! Common definitions for QR symbols
//!
//! Symbol geometry, capacity tables and the [`BitSeq`] bit sequence.
//! Capacity tables are populated for versions 1 to 6;
//! larger versions report zero capacity.
//!
//! # References
//!
//! * [Wikipedia on QR codes](https://en.wikipedia.org/wiki/QR_code)
//! * [ISO 18004:2015](https://www.iso.org/standard/62021.html)
//  ************************************************************

use super::logging;
use super::ErrorCorrectionLevel;


//  ************************************************************

pub const VERSION_MIN: u8 = 1;
pub const VERSION_MAX: u8 = 40;

/// Largest version with populated capacity tables
pub const VERSION_SUPPORTED_MAX: u8 = 6;

pub const QUIET_ZONE: usize = 4;

pub const MODULES_MIN: usize = 17 + 4 * (VERSION_MIN as usize);
pub const MODULES_MAX: usize = 17 + 4 * (VERSION_MAX as usize);


//  ************************************************************

pub fn n_modules_from_version(version: u8) -> usize {
    (17 + 4 * version) as usize
}


//  ************************************************************

pub fn version_from_n_modules(n_modules: usize) -> Option<u8> {
    if n_modules < MODULES_MIN || n_modules > MODULES_MAX || (n_modules - 17) % 4 != 0 {
        return None;
    }
    Some(((n_modules - 17) / 4) as u8)
}


//  ************************************************************
/// Number of data codewords in a symbol
///
/// Zero for versions without populated capacity tables.
//  ************************************************************

pub fn n_data_codewords(version: u8, ec: ErrorCorrectionLevel) -> usize {
    if version < VERSION_MIN || version > VERSION_SUPPORTED_MAX {
        return 0;
    }
    // columns are indexed by format code: H, Q, M, L
    [
        [9, 13, 16, 19],
        [16, 22, 28, 34],
        [26, 34, 44, 55],
        [36, 48, 64, 80],
        [46, 62, 86, 108],
        [60, 76, 108, 136],
    ][version as usize - 1][ec as usize]
}


//  ************************************************************
/// Number of error correction codewords per block
///
/// Zero for versions without populated capacity tables.
//  ************************************************************

pub fn n_ec_codewords(version: u8, ec: ErrorCorrectionLevel) -> usize {
    trace!("n_ec_codewords v={} e={:?} V={} E={}", version, ec, version as usize, ec as usize);
    if version < VERSION_MIN || version > VERSION_SUPPORTED_MAX {
        return 0;
    }
    [
        [17, 13, 10, 7],
        [28, 22, 16, 10],
        [22, 18, 26, 15],
        [16, 26, 18, 20],
        [22, 18, 24, 26],
        [28, 24, 16, 18],
    ][version as usize - 1][ec as usize]
}


//  ************************************************************
/// Number of data bits in a symbol
//  ************************************************************

pub fn n_data_bits(version: u8, ec: ErrorCorrectionLevel) -> usize {
    8 * n_data_codewords(version, ec)
}


//  ************************************************************
/// Smallest version whose data capacity holds `n_bits` bits
///
/// Clamps to `VERSION_MAX` when no supported version fits.
//  ************************************************************

pub fn version_from_n_bits(n_bits: usize, ec: ErrorCorrectionLevel) -> u8 {
    for version in VERSION_MIN..=VERSION_MAX {
        let capacity = n_data_bits(version, ec);
        if capacity >= n_bits && capacity > 0 {
            debug!("version_from_n_bits n_bits={} ec={:?} version={}", n_bits, ec, version);
            return version;
        }
    }
    warn!("version_from_n_bits: no version holds {} bits at ec={:?}", n_bits, ec);
    VERSION_MAX
}


//  ************************************************************
/// Width of the character count field of an eight bit segment
//  ************************************************************

pub fn n_count_bits(version: u8) -> usize {
    if version < 10 {
        8
    } else {
        16
    }
}


//  ************************************************************
/// Sequence of bits stored in a byte vector
//  ************************************************************

pub struct BitSeq {
    data: Vec<u8>,
    idx: usize,
}

//  ************************************************************
impl BitSeq {
    //  ************************************************************
    pub fn new(n_bytes: usize) -> Self {
        BitSeq { data: vec![0; n_bytes], idx: 0 }
    }


    //  ************************************************************
    pub fn get_bits(&self, idx: usize, n_bits: usize) -> u16 {
        let len = self.data.len();
        let shift = 24 - (idx & 7) - n_bits;
        let mask = (1 << n_bits) - 1;
        let bidx = idx / 8;
        let mut res = 0u32;
        res += (self.data[bidx] as u32) << 16;
        if len > bidx + 1 {
            res += (self.data[bidx + 1] as u32) << 8;
            if len > bidx + 2 {
                res += self.data[bidx + 2] as u32;
            }
        }
        ((res >> shift) & mask) as u16
    }

    //  ************************************************************
    pub fn set_bits(&mut self, bits: u16, idx: usize, n_bits: usize) {
        let len = self.data.len();
        insane!("BitSeq::set: data.len()={} bits={} idx={} n_bits={}", len, bits, idx, n_bits);
        let bidx = idx / 8;
        let shift = 24 - (idx & 7) - n_bits;
        let mut v = (u32::from(bits)) << shift;
        if len > bidx + 2 {
            self.data[bidx + 2] = (v & 0x00FF) as u8;
        }
        v >>= 8;
        if len > bidx + 1 {
            self.data[bidx + 1] = (v & 0x00FF) as u8;
        }
        v >>= 8;
        self.data[bidx] |= (v & 0x00FF) as u8;
    }

    //  ************************************************************
    pub fn append_bits(&mut self, bits: u16, n_bits: usize) {
        let idx = self.idx;
        self.set_bits(bits, idx, n_bits);
        self.idx += n_bits;
    }

    //  ************************************************************
    pub fn set_u8(&mut self, byte: u8, byte_idx: usize) {
        self.data[byte_idx] = byte;
    }

    //  ************************************************************
    pub fn push_bit(&mut self, set: bool) {
        if set {
            let byte = self.idx / 8;
            let bit = self.idx % 8;
            let new = 1 << (7 - bit);
            let old = self.data[byte];
            let res = old | new;
            insane!("push_bit len={} byte={} bit={} new={} old={} res={}", self.data.len(), byte, bit, new, old, res);
            self.data[byte] = res;
        };
        self.idx += 1;
    }

    //  ************************************************************
    /// Number of bits appended or pushed so far
    //  ************************************************************
    pub fn n_bits(&self) -> usize {
        self.idx
    }

    //  ************************************************************
    pub fn n_bytes(&self) -> usize {
        self.data.len()
    }

    //  ************************************************************
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    //  ************************************************************
    pub fn next_byte_idx(&self) -> usize {
        (self.idx - 1) / 8 + 1
    }
}


//  ************************************************************
impl From<Vec<u8>> for BitSeq {
    fn from(data: Vec<u8>) -> Self {
        let idx = 8 * data.len();
        BitSeq { data, idx }
    }
}


//  ************************************************************
impl From<BitSeq> for Vec<u8> {
    fn from(bs: BitSeq) -> Self {
        bs.data
    }
}

//  ************************************************************
impl<'a> IntoIterator for &'a BitSeq {
    type Item = bool;
    type IntoIter = BitSeqIterator<'a>;
    fn into_iter(self) -> Self::IntoIter {
        insane!("BitSeq::IntoIterator: {:?}", self.data);
        BitSeqIterator { bits: &self.data, byte_idx: 0, bit_mask: 1 << 7 }
    }
}


//  ************************************************************
/// Iterator over bits in a `BitSeq`
//  ************************************************************

pub struct BitSeqIterator<'a> {
    bits: &'a Vec<u8>,
    byte_idx: usize,
    bit_mask: u8,
}

//  ************************************************************
impl<'a> Iterator for BitSeqIterator<'a> {
    type Item = bool;
    fn next(&mut self) -> Option<bool> {
        if self.bit_mask == 0 {
            self.byte_idx += 1;
            if self.byte_idx >= self.bits.len() {
                return None;
            }
            self.bit_mask = 1 << 7;
        }
        let res = Some(self.bits[self.byte_idx] & self.bit_mask > 0);
        self.bit_mask >>= 1;
        res
    }
}
