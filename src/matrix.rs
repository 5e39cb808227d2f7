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
//! QR module matrix
//!
//! [`Matrix`] stores the physical dark/light modules of a symbol
//! together with a map of which modules carry data. Access goes
//! through two composable transforms:
//!
//! * a [`Rotation`] mapping canonical coordinates to stored ones
//! * a mask pattern inverting data modules
//!
//! Neither transform is ever applied to the stored grid itself;
//! [`Matrix::bit`] and [`Matrix::set_bit`] compose them on the fly.
//! [`SnakeCursor`] walks the zig-zag module order used for the
//! data stream.
//  ************************************************************

use super::logging;
use super::mask;
use super::qr::{n_modules_from_version, BitSeq};
use super::{DarkImage, Rotation};


//  ************************************************************
/// Dark/light modules of a QR symbol
//  ************************************************************

pub struct Matrix {
    width: usize,
    bits: Vec<bool>,
    non_data: Vec<bool>,
    rotation: Rotation,
    mask: u8,
}

impl Matrix {
    //  ************************************************************
    /// New matrix with all function patterns drawn
    //  ************************************************************
    ///
    /// Data modules start out light. The alignment block is drawn
    /// for every version, including version 1.

    pub fn new(version: u8) -> Self {
        let width = n_modules_from_version(version);
        let mut matrix = Matrix {
            width,
            bits: vec![false; width * width],
            non_data: vec![false; width * width],
            rotation: Rotation::R0,
            mask: 0,
        };
        matrix.draw_patterns();
        matrix
    }

    //  ************************************************************
    /// New matrix holding the modules of `image`
    //  ************************************************************
    ///
    /// The image is copied as-is; only the non-data map is drawn.

    pub fn from_image<T: DarkImage>(image: &T, version: u8) -> Self {
        let mut matrix = Matrix::new(version);
        for x in 0..matrix.width {
            for y in 0..matrix.width {
                let dark = image.dark(x, y);
                matrix.set_raw(x, y, dark);
            }
        }
        matrix
    }

    //  ************************************************************
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn set_mask(&mut self, mask: u8) {
        self.mask = mask;
    }

    //  ************************************************************
    /// Stored module, no transforms applied
    //  ************************************************************

    pub fn raw(&self, x: usize, y: usize) -> bool {
        self.bits[x * self.width + y]
    }

    fn set_raw(&mut self, x: usize, y: usize, dark: bool) {
        self.bits[x * self.width + y] = dark;
    }

    //  ************************************************************
    /// True if the module at canonical `(x, y)` carries no data
    //  ************************************************************

    pub fn is_non_data(&self, x: usize, y: usize) -> bool {
        self.non_data[x * self.width + y]
    }

    //  ************************************************************
    /// Module at canonical coordinates, rotation applied
    //  ************************************************************

    pub fn rotated_bit(&self, x: usize, y: usize) -> bool {
        let (px, py) = self.rotation.transform(x, y, self.width);
        self.bits[px * self.width + py]
    }

    pub fn set_rotated_bit(&mut self, x: usize, y: usize, dark: bool) {
        let (px, py) = self.rotation.transform(x, y, self.width);
        self.bits[px * self.width + py] = dark;
    }

    //  ************************************************************
    /// Data bit at canonical coordinates, rotation and mask applied
    //  ************************************************************

    pub fn bit(&self, x: usize, y: usize) -> bool {
        mask::apply(self.mask, x, y, self.rotated_bit(x, y))
    }

    pub fn set_bit(&mut self, x: usize, y: usize, bit: bool) {
        let physical = mask::apply(self.mask, x, y, bit);
        self.set_rotated_bit(x, y, physical);
    }

    //  ************************************************************
    /// Write a bit stream into the data modules in zig-zag order
    //  ************************************************************
    ///
    /// Writing stops when the stream is exhausted; any remaining
    /// data modules are left light.

    pub fn write_data(&mut self, stream: &BitSeq) {
        let mut bits = stream.into_iter();
        let mut n = 0;
        for (x, y) in SnakeCursor::new(self.width) {
            if self.is_non_data(x, y) {
                continue;
            }
            match bits.next() {
                Some(bit) => {
                    self.set_bit(x, y, bit);
                    n += 1;
                }
                None => break,
            }
        }
        debug!("Matrix::write_data: {} bits written", n);
    }

    //  ************************************************************
    /// Read `n_bits` bits from the data modules in zig-zag order
    //  ************************************************************

    pub fn read_data(&self, n_bits: usize) -> BitSeq {
        let mut stream = BitSeq::new((n_bits + 7) / 8);
        let mut n = 0;
        for (x, y) in SnakeCursor::new(self.width) {
            if n >= n_bits {
                break;
            }
            if self.is_non_data(x, y) {
                continue;
            }
            stream.push_bit(self.bit(x, y));
            n += 1;
        }
        debug!("Matrix::read_data: {} of {} bits read", n, n_bits);
        stream
    }

    //  ************************************************************
    //  Function patterns
    //  ************************************************************

    fn draw_patterns(&mut self) {
        let w = self.width;
        let n8 = w - 8;

        // Finders and separators; the marked rects also cover
        // the format information modules
        self.draw_finder(0, 0);
        self.draw_finder(w - 7, 0);
        self.draw_finder(0, w - 7);
        self.mark_rect(0, 0, 9, 9);
        self.mark_rect(n8, 0, 8, 9);
        self.mark_rect(0, n8, 9, 8);

        // Timing
        for i in 8..n8 {
            if i % 2 == 0 {
                self.set_raw(i, 6, true);
                self.set_raw(6, i, true);
            }
        }
        self.mark_rect(8, 6, n8 - 8, 1);
        self.mark_rect(6, 8, 1, n8 - 8);

        // Alignment block near the bottom right corner
        self.draw_alignment(w - 9, w - 9);
        self.mark_rect(w - 9, w - 9, 5, 5);

        // Dark module above the bottom left finder
        self.set_raw(8, n8, true);
    }

    fn draw_finder(&mut self, x0: usize, y0: usize) {
        for i in 0..=5 {
            self.set_raw(x0 + i, y0, true);
            self.set_raw(x0 + 6, y0 + i, true);
            self.set_raw(x0 + 6 - i, y0 + 6, true);
            self.set_raw(x0, y0 + 6 - i, true);
        }
        for x in x0 + 2..=x0 + 4 {
            for y in y0 + 2..=y0 + 4 {
                self.set_raw(x, y, true);
            }
        }
    }

    fn draw_alignment(&mut self, x0: usize, y0: usize) {
        for i in 0..=3 {
            self.set_raw(x0 + i, y0, true);
            self.set_raw(x0 + 4, y0 + i, true);
            self.set_raw(x0 + 4 - i, y0 + 4, true);
            self.set_raw(x0, y0 + 4 - i, true);
        }
        self.set_raw(x0 + 2, y0 + 2, true);
    }

    fn mark_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize) {
        for x in x0..x0 + w {
            for y in y0..y0 + h {
                self.non_data[x * self.width + y] = true;
            }
        }
    }

    //  ************************************************************
    /// Log the stored modules as ascii art
    //  ************************************************************

    pub fn log_modules(&self) {
        for y in 0..self.width {
            let mut s = String::with_capacity(2 * self.width);
            for x in 0..self.width {
                if self.raw(x, y) {
                    s.push('#');
                } else {
                    s.push('.');
                }
                s.push(' ');
            }
            log!("modules[{:3}] {}", y, s);
        }
    }
}


//  ************************************************************
impl DarkImage for Matrix {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.width
    }
    fn dark(&self, x: usize, y: usize) -> bool {
        self.raw(x, y)
    }
}


//  ************************************************************
/// Cursor walking the zig-zag module order of the data stream
//  ************************************************************
///
/// Starts at the bottom right corner, walks column pairs upwards
/// and downwards in turn, and skips the timing column entirely.
/// The cursor emits *every* module of a column pair; callers skip
/// non-data modules themselves. It terminates once the column
/// index would become negative.

pub struct SnakeCursor {
    width: i32,
    x: i32,
    y: i32,
    going_up: bool,
    reading_right: bool,
}

impl SnakeCursor {
    pub fn new(width: usize) -> Self {
        let width = width as i32;
        SnakeCursor { width, x: width - 1, y: width - 1, going_up: true, reading_right: true }
    }

    /// Back to the bottom right corner
    pub fn reset(&mut self) {
        self.x = self.width - 1;
        self.y = self.width - 1;
        self.going_up = true;
        self.reading_right = true;
    }
}

//  ************************************************************
impl Iterator for SnakeCursor {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.x < 0 {
            return None;
        }
        let item = (self.x as usize, self.y as usize);
        if self.reading_right {
            self.x -= 1;
            self.reading_right = false;
        } else {
            self.x += 1;
            self.reading_right = true;
            let at_edge = if self.going_up { self.y == 0 } else { self.y == self.width - 1 };
            if at_edge {
                self.going_up = !self.going_up;
                self.x -= 2;
                if self.x == 6 {
                    // the timing column is not part of any column pair
                    self.x -= 1;
                }
            } else if self.going_up {
                self.y -= 1;
            } else {
                self.y += 1;
            }
        }
        insane!("SnakeCursor: [{}, {}]", item.0, item.1);
        Some(item)
    }
}
