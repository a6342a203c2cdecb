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

    ramdac.rs

    RAM DAC device state

*/

//! The RAM DAC device: chip identity, command registers, extended palette and cursor RAM.
//!
//! The register protocol itself lives in [crate::io].

use serde_derive::Serialize;

use crate::{
    bpp::resolve_bpp,
    chip_type::{ChipType, RamdacCaps},
    cursor::{CursorCounter, CursorRam, CURSOR_SIZE_32, CURSOR_SIZE_64},
    error::RamdacError,
    ext_palette::{ExtendedPalette, TransferPhase, TransferState, EXT_PALETTE_SIZE},
    host::RamdacHost,
    registers::{CommandRegister0, CommandRegister3},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum RamdacStateEntry {
    Value8(u8),
    Value16(u16),
    String(String),
    Color(String, u8, u8, u8),
}

pub struct Ramdac {
    pub(crate) chip: ChipType,
    pub(crate) caps: &'static RamdacCaps,
    pub(crate) status: u8,

    pub(crate) cr0: u8,
    pub(crate) cr1: u8,
    pub(crate) cr2: u8,
    pub(crate) cr3: u8,
    pub(crate) cr4: u8,

    pub(crate) ext_palette: ExtendedPalette,
    pub(crate) xfer: TransferState,

    pub(crate) cursor_ram: CursorRam,
    pub(crate) cursor_x: CursorCounter,
    pub(crate) cursor_y: CursorCounter,
}

impl Ramdac {
    /// Attach a RAM DAC of the given type to a host adapter, applying the power-on
    /// cursor configuration to the host.
    pub fn new<H: RamdacHost + ?Sized>(chip: ChipType, host: &mut H) -> Self {
        let caps = chip.caps();

        let cursor = host.hw_cursor_mut();
        cursor.xsize = CURSOR_SIZE_32;
        cursor.ysize = CURSOR_SIZE_32;
        cursor.yoff = CURSOR_SIZE_32;

        log::debug!("Attached {} RAM DAC ({:?}), status id: {:02X}", chip, caps.tier, chip.status_id());

        Self {
            chip,
            caps,
            status: chip.status_id(),
            cr0: 0,
            cr1: 0,
            cr2: 0,
            cr3: 0,
            cr4: 0,
            ext_palette: ExtendedPalette::default(),
            xfer: TransferState::default(),
            cursor_ram: CursorRam::new(caps.cursor_64),
            cursor_x: CursorCounter::default(),
            cursor_y: CursorCounter::default(),
        }
    }

    /// Attach a RAM DAC by numeric type ID. Unknown IDs are rejected.
    pub fn from_id<H: RamdacHost + ?Sized>(id: u8, host: &mut H) -> Result<Self, RamdacError> {
        Ok(Self::new(ChipType::from_id(id)?, host))
    }

    pub fn chip_type(&self) -> ChipType {
        self.chip
    }

    pub fn caps(&self) -> &'static RamdacCaps {
        self.caps
    }

    /// The status register ID bits.
    pub fn status_id(&self) -> u8 {
        self.status
    }

    pub fn command_registers(&self) -> [u8; 5] {
        [self.cr0, self.cr1, self.cr2, self.cr3, self.cr4]
    }

    pub fn ext_addr(&self) -> u8 {
        self.ext_palette.addr
    }

    /// Packed 0x00RRGGBB color of an extended palette entry.
    pub fn ext_palette_u32(&self, index: usize) -> u32 {
        self.ext_palette.lookup[index % EXT_PALETTE_SIZE]
    }

    pub fn ext_palette(&self) -> &ExtendedPalette {
        &self.ext_palette
    }

    pub fn transfer_phase(&self) -> TransferPhase {
        self.xfer.phase
    }

    /// The programmed cursor position counters (x, y).
    pub fn cursor_position(&self) -> (u16, u16) {
        (self.cursor_x.value(), self.cursor_y.value())
    }

    /// The cursor bitmap currently selected by the host's cursor size.
    pub fn cursor_bitmap<H: RamdacHost + ?Sized>(&self, host: &H) -> &[u8] {
        self.cursor_ram.bitmap(host.hw_cursor().xsize)
    }

    /// The indexed register block is only reachable on chips that have one, and only while
    /// command register 0 bit 7 is set.
    pub(crate) fn indexed_enabled(&self) -> bool {
        self.caps.indexed_regs && CommandRegister0::from_bytes([self.cr0]).indexed_enable()
    }

    /// Address counter bits 9-8, held in command register 3 on chips with a 10-bit counter.
    pub(crate) fn addr_hi_bits(&self) -> u16 {
        if self.caps.wide_addr {
            (CommandRegister3::from_bytes([self.cr3]).addr_hi() as u16) << 8
        }
        else {
            0
        }
    }

    pub(crate) fn increment_dac_addr<H: RamdacHost + ?Sized>(&self, host: &mut H) {
        host.set_dac_addr(host.dac_addr().wrapping_add(1) & self.caps.addr_mask);
    }

    pub(crate) fn update_bpp<H: RamdacHost + ?Sized>(&self, host: &mut H) {
        let bpp = resolve_bpp(self.cr1, self.cr2);
        log::debug!("RAM DAC output depth: {} bpp (cr1: {:02X} cr2: {:02X})", bpp, self.cr1, self.cr2);
        host.set_bpp(bpp);
        // Scanline layout depends on depth even if the value didn't change.
        host.recalc_timings();
    }

    pub(crate) fn update_cursor_x<H: RamdacHost + ?Sized>(&self, host: &mut H) {
        let cursor = host.hw_cursor_mut();
        cursor.x = self.cursor_x.displayed(cursor.xsize);
    }

    pub(crate) fn update_cursor_y<H: RamdacHost + ?Sized>(&self, host: &mut H) {
        let cursor = host.hw_cursor_mut();
        cursor.y = self.cursor_y.displayed(cursor.ysize);
    }

    /// Apply a new command register 3: cursor size, and the address counter's high bits.
    pub(crate) fn write_cr3<H: RamdacHost + ?Sized>(&mut self, byte: u8, host: &mut H) {
        self.cr3 = byte;
        let cr3 = CommandRegister3::from_bytes([byte]);

        let size = if cr3.cursor_64() { CURSOR_SIZE_64 } else { CURSOR_SIZE_32 };
        let cursor = host.hw_cursor_mut();
        cursor.xsize = size;
        cursor.ysize = size;
        cursor.yoff = if size == CURSOR_SIZE_32 { CURSOR_SIZE_32 } else { 0 };
        cursor.x = self.cursor_x.displayed(size);
        cursor.y = self.cursor_y.displayed(size);
        log::debug!("RAM DAC cursor size: {}x{}", size, size);

        let addr = (host.dac_addr() & 0x00FF) | ((cr3.addr_hi() as u16) << 8);
        host.set_dac_addr(addr);
        host.recalc_timings();
    }

    #[rustfmt::skip]
    pub fn get_state(&self) -> Vec<(String, RamdacStateEntry)> {
        let mut state_vec = Vec::new();
        state_vec.push((String::from("Type"), RamdacStateEntry::String(format!("{}", self.chip))));
        state_vec.push((String::from("Status ID"), RamdacStateEntry::Value8(self.status)));
        for (i, cr) in self.command_registers().iter().enumerate() {
            state_vec.push((format!("Command Register {}", i), RamdacStateEntry::String(format!("{:08b}", cr))));
        }
        state_vec.push((String::from("Indexed Enable"), RamdacStateEntry::String(format!("{}", self.indexed_enabled()))));
        state_vec.push((String::from("Bpp"), RamdacStateEntry::Value8(resolve_bpp(self.cr1, self.cr2) as u8)));
        state_vec.push((String::from("Ext Address"), RamdacStateEntry::Value8(self.ext_palette.addr)));
        state_vec.push((String::from("Ext Transfer Phase"), RamdacStateEntry::String(format!("{:?}", self.xfer.phase))));
        for (i, entry) in self.ext_palette.entries.iter().enumerate() {
            let packed = self.ext_palette.lookup[i];
            state_vec.push((
                format!("Ext Palette {}", i),
                RamdacStateEntry::Color(
                    format!("{:06X}", packed),
                    (packed >> 16) as u8,
                    (packed >> 8) as u8,
                    packed as u8,
                ),
            ));
            state_vec.push((format!("Ext Palette {} [raw]", i), RamdacStateEntry::String(format!("{:02X},{:02X},{:02X}", entry.r, entry.g, entry.b))));
        }
        state_vec.push((String::from("Cursor X"), RamdacStateEntry::Value16(self.cursor_x.value())));
        state_vec.push((String::from("Cursor Y"), RamdacStateEntry::Value16(self.cursor_y.value())));
        state_vec
    }
}
