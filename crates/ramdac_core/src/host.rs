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

    host.rs

    RAM DAC host adapter interface

*/

//! The interface between the RAM DAC and the video adapter that hosts it.
//!
//! The RAM DAC does not own the generic VGA palette, the DAC address counter or the
//! hardware cursor overlay state; the SVGA adapter does, and the RAM DAC reads and
//! updates them through [RamdacHost] on every register access. The host is passed into
//! each transaction, so several chips can be driven independently and the host must
//! serialize access if it renders on another thread.

/// Build the 6-bit to 8-bit channel expansion table: replicate the top bits into the
/// vacated low bits so that 0x3F maps to 0xFF.
const fn make_6to8_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        table[i] = ((i << 2) | (i >> 4)) as u8;
        i += 1;
    }
    table
}

pub const EXPAND_6TO8: [u8; 64] = make_6to8_table();

/// DAC channel precision, selected by command register 0 bit 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DacPrecision {
    #[default]
    SixBit,
    EightBit,
}

/// Hardware cursor overlay state as consumed by the adapter's renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HwCursor {
    pub enabled: bool,
    pub xsize: u32,
    pub ysize: u32,
    /// First bitmap row to display. A 32x32 cursor is stored in the bottom half of the
    /// 64 line cursor window.
    pub yoff: u32,
    /// Displayed position: the programmed position minus the cursor size, so may be negative.
    pub x: i32,
    pub y: i32,
}

/// State and notifications the RAM DAC shares with its host adapter.
pub trait RamdacHost {
    /// Forward a write to the generic VGA DAC ports (palette index, data and pixel mask).
    fn vga_dac_write(&mut self, addr: u16, byte: u8);
    /// Forward a read to the generic VGA DAC ports.
    fn vga_dac_read(&mut self, addr: u16) -> u8;

    /// The shared DAC address counter.
    fn dac_addr(&self) -> u16;
    fn set_dac_addr(&mut self, addr: u16);
    /// Position within the generic palette's R, G, B component sequence.
    fn dac_pos(&self) -> u8;
    fn set_dac_pos(&mut self, pos: u8);
    /// DAC read/write state as reported through the DAC state port.
    fn dac_status(&self) -> u8;
    fn set_dac_status(&mut self, status: u8);

    fn dac_precision(&self) -> DacPrecision;
    fn set_dac_precision(&mut self, precision: DacPrecision);

    /// Set the output bit depth used to lay out scanlines.
    fn set_bpp(&mut self, bpp: u32);
    fn hw_cursor(&self) -> &HwCursor;
    fn hw_cursor_mut(&mut self) -> &mut HwCursor;

    /// Whether the adapter is configured to take its border color from extended palette entry 0.
    fn overscan_enabled(&self) -> bool;
    fn overscan_color(&self) -> u32;
    fn set_overscan_color(&mut self, color: u32);

    /// Request that display timings and mode layout be recalculated.
    fn recalc_timings(&mut self);
    /// Request a full redraw of the next frame(s).
    fn mark_dirty(&mut self);

    fn expand_6to8(&self, value: u8) -> u8 {
        EXPAND_6TO8[(value & 0x3F) as usize]
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}
