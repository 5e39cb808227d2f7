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
//! Reed Solomon error correction codewords
//  ************************************************************
//!
//! The generator polynomial is the product of `(x + alpha^k)` for
//! `k = 0 .. n_ec_codewords`, kept in exponent form. Error
//! correction codewords are the remainder of the message polynomial
//! times `x^n_ec_codewords` divided by the generator.
//!
//! All arithmetic goes through [`galois::tables`], including its
//! modulo 256 exponent reduction.

use super::galois;
use super::galois::GaloisTables;
use super::logging;


//  ************************************************************
/// Generator polynomial in exponent form, highest degree first
//  ************************************************************
///
/// The leading coefficient is always `alpha^0`; the returned vector
/// has `n_ec_codewords + 1` entries.

pub fn generator_polynomial_alphas(n_ec_codewords: usize, t: &GaloisTables) -> Vec<u8> {
    trace!("generator_polynomial_alphas begin; n={}", n_ec_codewords);
    let mut alphas = vec![0u8];
    for k in 0..n_ec_codewords {
        let k = k as u8;
        let mut next = Vec::with_capacity(alphas.len() + 1);
        next.push(alphas[0]);
        for j in 1..alphas.len() {
            next.push(t.add_alpha(alphas[j], t.multiply_alpha(alphas[j - 1], k)));
        }
        next.push(t.multiply_alpha(alphas[alphas.len() - 1], k));
        alphas = next;
    }
    trace!("generator_polynomial_alphas done; n={}, alphas={:?}", n_ec_codewords, alphas);
    alphas
}


//  ************************************************************
/// Reed Solomon encoder
//  ************************************************************

pub struct ReedSolomonEncoder {
    n_ec_codewords: usize,
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    //  ************************************************************
    pub fn new(n_ec_codewords: usize) -> Self {
        let generator = generator_polynomial_alphas(n_ec_codewords, galois::tables());
        ReedSolomonEncoder { n_ec_codewords, generator }
    }

    //  ************************************************************
    /// Error correction codewords for `msg`
    //  ************************************************************

    pub fn encode(&self, msg: &[u8]) -> Vec<u8> {
        let n = self.n_ec_codewords;
        trace!("ReedSolomonEncoder::encode begin; n={}", n);
        let t = galois::tables();
        let mut rem = Vec::with_capacity(msg.len() + n);
        rem.extend_from_slice(msg);
        rem.resize(msg.len() + n, 0);
        for i in 0..msg.len() {
            let lead = rem[i];
            if lead == 0 {
                continue;
            }
            let le = t.exponent(lead);
            for (j, &g) in self.generator.iter().enumerate() {
                rem[i + j] ^= t.value(t.multiply_alpha(g, le));
            }
        }
        let parity = rem.split_off(msg.len());
        trace!("ReedSolomonEncoder::encode done; n={}, parity={:?}", n, parity);
        parity
    }
}


//  ************************************************************
#[cfg(test)]
//  ************************************************************

mod reedsolomon {
    use super::*;

    #[test]
    fn generator_02() {
        let alphas = generator_polynomial_alphas(2, galois::tables());
        let expected: Vec<u8> = vec![0, 25, 1];
        assert!(alphas == expected, "invalid generator 02; got {:?}; expected {:?}", alphas, expected);
    }

    #[test]
    fn generator_03() {
        let alphas = generator_polynomial_alphas(3, galois::tables());
        let expected: Vec<u8> = vec![0, 198, 199, 3];
        assert!(alphas == expected, "invalid generator 03; got {:?}; expected {:?}", alphas, expected);
    }

    #[test]
    fn generator_07() {
        let alphas = generator_polynomial_alphas(7, galois::tables());
        let expected: Vec<u8> = vec![0, 87, 229, 146, 149, 238, 102, 21];
        assert!(alphas == expected, "invalid generator 07; got {:?}; expected {:?}", alphas, expected);
    }

    #[test]
    fn generator_shape() {
        let t = galois::tables();
        for n in 0..=28 {
            let alphas = generator_polynomial_alphas(n, t);
            assert_eq!(alphas.len(), n + 1, "generator {} length", n);
            assert_eq!(alphas[0], 0, "generator {} must be monic", n);
        }
    }

    #[test]
    fn encode_zero_message() {
        let rs = ReedSolomonEncoder::new(7);
        let parity = rs.encode(&[0u8; 19]);
        assert_eq!(parity, vec![0u8; 7]);
    }

    #[test]
    fn encode_parity_length() {
        for n in [7usize, 10, 13, 17, 28].iter() {
            let rs = ReedSolomonEncoder::new(*n);
            let parity = rs.encode(&[0x12, 0x34, 0x56]);
            assert_eq!(parity.len(), *n);
        }
    }

    // remainder of a full codeword divided by the generator
    fn codeword_remainder(codeword: &[u8], gen_alphas: &[u8]) -> Vec<u8> {
        let t = galois::tables();
        let gen_values: Vec<u8> = gen_alphas.iter().map(|&a| t.value(a)).collect();
        let n_parity = gen_values.len() - 1;
        let mut rem = codeword.to_vec();
        for i in 0..codeword.len() - n_parity {
            let lead = rem[i];
            if lead == 0 {
                continue;
            }
            for (j, &g) in gen_values.iter().enumerate() {
                rem[i + j] ^= t.multiply(g, lead);
            }
        }
        rem.split_off(codeword.len() - n_parity)
    }

    #[test]
    fn encode_divides_cleanly() {
        let msg: Vec<u8> = vec![0x40, 0x54, 0x84, 0x54, 0xC4, 0xC4, 0xF0, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11];
        let rs = ReedSolomonEncoder::new(7);
        let parity = rs.encode(&msg);
        let mut codeword = msg.clone();
        codeword.extend_from_slice(&parity);
        let alphas = generator_polynomial_alphas(7, galois::tables());
        let rem = codeword_remainder(&codeword, &alphas);
        assert_eq!(rem, vec![0u8; 7], "codeword must be divisible by the generator");
    }

    #[test]
    fn encode_depends_on_message() {
        let rs = ReedSolomonEncoder::new(10);
        let p1 = rs.encode(&[1, 2, 3, 4, 5]);
        let p2 = rs.encode(&[1, 2, 3, 4, 6]);
        assert!(p1 != p2, "different messages must give different parity");
    }

    #[test]
    fn encode_no_ec_codewords() {
        let rs = ReedSolomonEncoder::new(0);
        assert!(rs.encode(&[1, 2, 3]).is_empty());
    }
}
