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

    basic_host.rs

    Reference host adapter for the RAM DAC

*/

//! A minimal SVGA host for a RAM DAC: the generic 256 entry VGA palette, the shared DAC
//! address counter, and the mode/cursor/border state the RAM DAC programs.
//!
//! Adapters embed a RAM DAC and implement [RamdacHost] on their own state; this one exists
//! for the headless runner and for tests.

use crate::host::{pack_rgb, DacPrecision, HwCursor, RamdacHost};

pub const DAC_STATE_WRITE: u8 = 0;
pub const DAC_STATE_READ: u8 = 0x03;

// Offsets of the generic DAC ports, as seen through the low two address bits.
const PEL_ADDRESS_WRITE_MODE: u16 = 0x00;
const PEL_DATA: u16 = 0x01;
const PEL_MASK: u16 = 0x02;
const PEL_ADDRESS_READ_MODE: u16 = 0x03;

pub struct BasicHost {
    pub color_registers: [[u8; 3]; 256],
    pub color_registers_u32: [u32; 256],
    pel_mask: u8,
    dac_addr: u16,
    dac_pos: u8,
    dac_status: u8,
    dac_latch: [u8; 2],
    precision: DacPrecision,

    bpp: u32,
    hw_cursor: HwCursor,
    overscan_enable: bool,
    overscan_color: u32,

    recalc_requests: u32,
    dirty: bool,
}

impl Default for BasicHost {
    fn default() -> Self {
        Self {
            color_registers: [[0; 3]; 256],
            color_registers_u32: [0; 256],
            pel_mask: 0xFF,
            dac_addr: 0,
            dac_pos: 0,
            dac_status: 0,
            dac_latch: [0; 2],
            precision: DacPrecision::SixBit,

            bpp: 8,
            hw_cursor: HwCursor::default(),
            overscan_enable: false,
            overscan_color: 0,

            recalc_requests: 0,
            dirty: false,
        }
    }
}

impl BasicHost {
    pub fn new(overscan_enable: bool) -> Self {
        Self {
            overscan_enable,
            ..Self::default()
        }
    }

    pub fn bpp(&self) -> u32 {
        self.bpp
    }

    pub fn pel_mask(&self) -> u8 {
        self.pel_mask
    }

    pub fn set_overscan_enabled(&mut self, state: bool) {
        self.overscan_enable = state;
    }

    /// Number of timing recalculations requested since creation.
    pub fn recalc_requests(&self) -> u32 {
        self.recalc_requests
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    fn expand(&self, byte: u8) -> u8 {
        match self.precision {
            DacPrecision::EightBit => byte,
            DacPrecision::SixBit => self.expand_6to8(byte),
        }
    }

    fn write_pel_data(&mut self, byte: u8) {
        self.dac_status = DAC_STATE_WRITE;
        self.dirty = true;
        match self.dac_pos {
            0 | 1 => {
                self.dac_latch[self.dac_pos as usize] = byte;
                self.dac_pos += 1;
            }
            _ => {
                let color = (self.dac_addr & 0xFF) as usize;
                self.color_registers[color] = [self.dac_latch[0], self.dac_latch[1], byte];
                self.color_registers_u32[color] = pack_rgb(
                    self.expand(self.dac_latch[0]),
                    self.expand(self.dac_latch[1]),
                    self.expand(byte),
                );
                log::trace!(
                    "Wrote color register [{}] ({:02X},{:02X},{:02X})",
                    color,
                    self.dac_latch[0],
                    self.dac_latch[1],
                    byte
                );
                self.dac_addr = (self.dac_addr + 1) & 0xFF;
                self.dac_pos = 0;
            }
        }
    }

    fn read_pel_data(&mut self) -> u8 {
        // The read index was pre-incremented when it was loaded.
        let color = (self.dac_addr.wrapping_sub(1) & 0xFF) as usize;
        self.dac_status = DAC_STATE_READ;
        let rgb_idx = self.dac_pos as usize;
        let byte = self.color_registers[color][rgb_idx.min(2)];

        if self.dac_pos < 2 {
            self.dac_pos += 1;
        }
        else {
            self.dac_pos = 0;
            self.dac_addr = (self.dac_addr + 1) & 0xFF;
        }

        match self.precision {
            DacPrecision::EightBit => byte,
            DacPrecision::SixBit => byte & 0x3F,
        }
    }
}

impl RamdacHost for BasicHost {
    fn vga_dac_write(&mut self, addr: u16, byte: u8) {
        match addr & 0x03 {
            PEL_ADDRESS_WRITE_MODE | PEL_ADDRESS_READ_MODE => {
                self.dac_pos = 0;
                self.dac_status = (addr & 0x03) as u8;
                self.dac_addr = (byte as u16 + (addr & 0x01)) & 0xFF;
            }
            PEL_DATA => self.write_pel_data(byte),
            PEL_MASK => {
                if self.pel_mask != byte {
                    self.dirty = true;
                }
                self.pel_mask = byte;
            }
            _ => {}
        }
    }

    fn vga_dac_read(&mut self, addr: u16) -> u8 {
        match addr & 0x03 {
            PEL_ADDRESS_WRITE_MODE => self.dac_addr as u8,
            PEL_DATA => self.read_pel_data(),
            PEL_MASK => self.pel_mask,
            _ => self.dac_status,
        }
    }

    fn dac_addr(&self) -> u16 {
        self.dac_addr
    }

    fn set_dac_addr(&mut self, addr: u16) {
        self.dac_addr = addr;
    }

    fn dac_pos(&self) -> u8 {
        self.dac_pos
    }

    fn set_dac_pos(&mut self, pos: u8) {
        self.dac_pos = pos;
    }

    fn dac_status(&self) -> u8 {
        self.dac_status
    }

    fn set_dac_status(&mut self, status: u8) {
        self.dac_status = status;
    }

    fn dac_precision(&self) -> DacPrecision {
        self.precision
    }

    fn set_dac_precision(&mut self, precision: DacPrecision) {
        self.precision = precision;
    }

    fn set_bpp(&mut self, bpp: u32) {
        self.bpp = bpp;
    }

    fn hw_cursor(&self) -> &HwCursor {
        &self.hw_cursor
    }

    fn hw_cursor_mut(&mut self) -> &mut HwCursor {
        &mut self.hw_cursor
    }

    fn overscan_enabled(&self) -> bool {
        self.overscan_enable
    }

    fn overscan_color(&self) -> u32 {
        self.overscan_color
    }

    fn set_overscan_color(&mut self, color: u32) {
        self.overscan_color = color;
    }

    fn recalc_timings(&mut self) {
        self.recalc_requests += 1;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
