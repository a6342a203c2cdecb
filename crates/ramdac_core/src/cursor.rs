/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    cursor.rs

    Hardware cursor RAM and position counters

*/

//! Hardware cursor bitmap RAM and position counters.

pub const CURSOR32_RAM_SIZE: usize = 256;
pub const CURSOR64_RAM_SIZE: usize = 1024;
pub const CURSOR_POS_MASK: u16 = 0x0FFF;

pub const CURSOR_SIZE_32: u32 = 32;
pub const CURSOR_SIZE_64: u32 = 64;

/// Cursor bitmap storage. The 64x64 bitmap only exists on chips that support that size.
pub struct CursorRam {
    data32: Box<[u8; CURSOR32_RAM_SIZE]>,
    data64: Option<Box<[u8; CURSOR64_RAM_SIZE]>>,
}

impl CursorRam {
    pub fn new(cursor_64: bool) -> Self {
        Self {
            data32: Box::new([0; CURSOR32_RAM_SIZE]),
            data64: cursor_64.then(|| Box::new([0; CURSOR64_RAM_SIZE])),
        }
    }

    /// Select the bitmap addressed by the cursor RAM data register. The 64x64 bitmap is
    /// used only when present and the cursor is currently 64 pixels wide.
    pub fn bitmap(&self, xsize: u32) -> &[u8] {
        match &self.data64 {
            Some(data64) if xsize == CURSOR_SIZE_64 => &data64[..],
            _ => &self.data32[..],
        }
    }

    fn bitmap_mut(&mut self, xsize: u32) -> &mut [u8] {
        match &mut self.data64 {
            Some(data64) if xsize == CURSOR_SIZE_64 => &mut data64[..],
            _ => &mut self.data32[..],
        }
    }

    /// Read a byte, masking the address into the selected bitmap.
    pub fn read(&self, addr: u16, xsize: u32) -> u8 {
        let bitmap = self.bitmap(xsize);
        bitmap[addr as usize & (bitmap.len() - 1)]
    }

    /// Write a byte, masking the address into the selected bitmap.
    pub fn write(&mut self, addr: u16, xsize: u32, byte: u8) {
        let bitmap = self.bitmap_mut(xsize);
        let index = addr as usize & (bitmap.len() - 1);
        bitmap[index] = byte;
    }
}

/// A 12-bit cursor position counter, programmed a byte at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorCounter(u16);

impl CursorCounter {
    pub fn set_low(&mut self, byte: u8) {
        self.0 = (self.0 & 0x0F00) | byte as u16;
    }

    pub fn set_high(&mut self, byte: u8) {
        self.0 = (self.0 & 0x00FF) | (((byte & 0x0F) as u16) << 8);
    }

    pub fn low(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn high(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn value(&self) -> u16 {
        self.0 & CURSOR_POS_MASK
    }

    /// Displayed coordinate. The counter addresses the cursor's bottom-right corner.
    pub fn displayed(&self, size: u32) -> i32 {
        self.value() as i32 - size as i32
    }
}
