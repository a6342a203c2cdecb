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

    io.rs

    RAM DAC register read/write transactions

*/

//! Register reads and writes.
//!
//! The adapter decodes its DAC port range (normally 0x3C6-0x3C9) and drives RS2/RS3 from
//! one of its own extended registers, giving sixteen registers in total:
//!
//!   RS   Write                           Read
//!   ---- ------------------------------  ------------------------------
//!   0000 Palette write index (generic)   Palette write index (generic)
//!   0001 Palette data (generic)          Palette data (generic)
//!   0010 Pixel read mask (generic)       Pixel read mask (generic)
//!   0011 Palette read index              Address counter low byte
//!   0100 Ext palette write index         Ext palette address
//!   0101 Ext palette data                Ext palette data
//!   0110 Command register 0              Command register 0
//!   0111 Ext palette read index          Ext palette address
//!   1000 Command register 1              Command register 1
//!   1001 Command register 2              Command register 2
//!   1010 Indexed: CR3, CR4               Status / indexed: CR3, CR4
//!   1011 Cursor RAM data                 Cursor RAM data
//!   1100 Cursor X low                    Cursor X low
//!   1101 Cursor X high                   Cursor X high
//!   1110 Cursor Y low                    Cursor Y low
//!   1111 Cursor Y high                   Cursor Y high

use crate::{
    basic_host::DAC_STATE_READ,
    ext_palette::{ExtPaletteEntry, ExtendedPalette},
    host::{pack_rgb, DacPrecision, RamdacHost},
    ramdac::Ramdac,
    registers::*,
};

impl Ramdac {
    /// Handle a write from the adapter's port dispatch.
    pub fn write_u8<H: RamdacHost + ?Sized>(&mut self, addr: u16, rs2: bool, rs3: bool, byte: u8, host: &mut H) {
        let rs = RegisterSelect::decode(addr, rs2, rs3);
        self.write_register(rs, addr, byte, host);
    }

    /// Handle a read from the adapter's port dispatch.
    pub fn read_u8<H: RamdacHost + ?Sized>(&mut self, addr: u16, rs2: bool, rs3: bool, host: &mut H) -> u8 {
        let rs = RegisterSelect::decode(addr, rs2, rs3);
        self.read_register(rs, addr, host)
    }

    pub fn write_register<H: RamdacHost + ?Sized>(&mut self, rs: RegisterSelect, addr: u16, byte: u8, host: &mut H) {
        log::trace!("RAM DAC write {}: {:02X}", rs, byte);
        match rs {
            RegisterSelect::PaletteWriteIndex => {
                host.vga_dac_write(addr, byte);
                self.reset_transfer(host);
                let hi = self.addr_hi_bits();
                host.set_dac_addr(host.dac_addr() | hi);
            }
            RegisterSelect::PaletteReadIndex => {
                self.reset_transfer(host);
                host.set_dac_status((addr & 0x03) as u8);
                let dac_addr = (byte as u16 | self.addr_hi_bits()).wrapping_add(1) & self.caps.addr_mask;
                host.set_dac_addr(dac_addr);
            }
            RegisterSelect::PaletteData | RegisterSelect::PixelMask => {
                host.vga_dac_write(addr, byte);
            }
            RegisterSelect::ExtPaletteWriteIndex | RegisterSelect::ExtPaletteReadIndex => {
                self.reset_transfer(host);
                host.set_dac_status(rs.code() & 0x03);
                // Loading the read index pre-increments, as on the generic palette.
                self.ext_palette.addr = byte.wrapping_add(rs.code() & 0x01);
            }
            RegisterSelect::ExtPaletteData => {
                host.set_dac_status(0);
                host.mark_dirty();
                // The R, G, B position is shared with the generic palette.
                self.xfer.sync(host.dac_pos());
                if let Some((r, g, b)) = self.xfer.push(byte) {
                    self.write_ext_palette_entry(ExtPaletteEntry { r, g, b }, host);
                }
                host.set_dac_pos(self.xfer.phase.index());
            }
            RegisterSelect::CommandReg0 => {
                self.cr0 = byte;
                let precision = if CommandRegister0::from_bytes([byte]).dac_8bit() {
                    DacPrecision::EightBit
                }
                else {
                    DacPrecision::SixBit
                };
                log::debug!("RAM DAC command register 0: {:02X} ({:?})", byte, precision);
                host.set_dac_precision(precision);
            }
            RegisterSelect::CommandReg1 => {
                self.cr1 = byte;
                self.update_bpp(host);
            }
            RegisterSelect::CommandReg2 => {
                self.cr2 = byte;
                host.hw_cursor_mut().enabled = CommandRegister2::from_bytes([byte]).cursor_mode() != 0;
                self.update_bpp(host);
            }
            RegisterSelect::Indexed => {
                if !self.indexed_enabled() {
                    return;
                }
                let dac_addr = host.dac_addr();
                match (dac_addr & 0xFF) as u8 {
                    SUBREG_CMD3 => self.write_cr3(byte, host),
                    SUBREG_CMD4 | SUBREG_SIG_RED | SUBREG_SIG_GREEN | SUBREG_SIG_BLUE => {
                        // The signature analysis registers are read-only.
                        if self.caps.cmd_reg4 && dac_addr == SUBREG_CMD4 as u16 {
                            log::debug!("RAM DAC command register 4: {:02X}", byte);
                            self.cr4 = byte;
                        }
                    }
                    _ => {}
                }
            }
            RegisterSelect::CursorRamData => {
                let xsize = host.hw_cursor().xsize;
                self.cursor_ram.write(host.dac_addr() & 0x03FF, xsize, byte);
                self.increment_dac_addr(host);
            }
            RegisterSelect::CursorXLow => {
                self.cursor_x.set_low(byte);
                self.update_cursor_x(host);
            }
            RegisterSelect::CursorXHigh => {
                self.cursor_x.set_high(byte);
                self.update_cursor_x(host);
            }
            RegisterSelect::CursorYLow => {
                self.cursor_y.set_low(byte);
                self.update_cursor_y(host);
            }
            RegisterSelect::CursorYHigh => {
                self.cursor_y.set_high(byte);
                self.update_cursor_y(host);
            }
        }
    }

    pub fn read_register<H: RamdacHost + ?Sized>(&mut self, rs: RegisterSelect, addr: u16, host: &mut H) -> u8 {
        let byte = match rs {
            RegisterSelect::PaletteWriteIndex | RegisterSelect::PaletteData | RegisterSelect::PixelMask => {
                host.vga_dac_read(addr)
            }
            RegisterSelect::PaletteReadIndex => (host.dac_addr() & 0xFF) as u8,
            RegisterSelect::ExtPaletteWriteIndex | RegisterSelect::ExtPaletteReadIndex => self.ext_palette.addr,
            RegisterSelect::ExtPaletteData => self.read_ext_palette_data(host),
            RegisterSelect::CommandReg0 => self.cr0,
            RegisterSelect::CommandReg1 => self.cr1,
            RegisterSelect::CommandReg2 => self.cr2,
            RegisterSelect::Indexed => self.read_indexed(host),
            RegisterSelect::CursorRamData => {
                // The counter was pre-incremented when it was loaded.
                let xsize = host.hw_cursor().xsize;
                let byte = self.cursor_ram.read(host.dac_addr().wrapping_sub(1) & 0x03FF, xsize);
                self.increment_dac_addr(host);
                byte
            }
            RegisterSelect::CursorXLow => self.cursor_x.low(),
            RegisterSelect::CursorXHigh => self.cursor_x.high(),
            RegisterSelect::CursorYLow => self.cursor_y.low(),
            RegisterSelect::CursorYHigh => self.cursor_y.high(),
        };
        log::trace!("RAM DAC read {}: {:02X}", rs, byte);
        byte
    }

    fn reset_transfer<H: RamdacHost + ?Sized>(&mut self, host: &mut H) {
        self.xfer.reset();
        host.set_dac_pos(0);
    }

    fn write_ext_palette_entry<H: RamdacHost + ?Sized>(&mut self, entry: ExtPaletteEntry, host: &mut H) {
        let index = ExtendedPalette::entry_index(self.ext_palette.addr);
        let packed = match host.dac_precision() {
            DacPrecision::EightBit => pack_rgb(entry.r, entry.g, entry.b),
            DacPrecision::SixBit => pack_rgb(
                host.expand_6to8(entry.r & 0x3F),
                host.expand_6to8(entry.g & 0x3F),
                host.expand_6to8(entry.b & 0x3F),
            ),
        };
        self.ext_palette.set_entry(index, entry, packed);
        log::trace!("Wrote ext palette [{}] {:06X}", index, packed);

        // Entry 0 doubles as the border color when the adapter is configured for it.
        if index == 0 && host.overscan_enabled() {
            let old_color = host.overscan_color();
            host.set_overscan_color(packed);
            if old_color != packed {
                host.recalc_timings();
            }
        }
        self.ext_palette.advance();
    }

    /// Read the extended palette data register.
    ///
    /// Each component step falls through into the next, so whatever phase a read starts in,
    /// it completes the whole transfer and returns blue.
    fn read_ext_palette_data<H: RamdacHost + ?Sized>(&mut self, host: &mut H) -> u8 {
        let index = ExtendedPalette::entry_index(self.ext_palette.addr.wrapping_sub(1));
        let entry = self.ext_palette.entries[index];
        let precision = host.dac_precision();
        host.set_dac_status(DAC_STATE_READ);

        self.xfer.sync(host.dac_pos());
        let mut phase = self.xfer.phase;
        let byte = loop {
            let component = match precision {
                DacPrecision::EightBit => entry.component(phase),
                DacPrecision::SixBit => entry.component(phase) & 0x3F,
            };
            match phase.next() {
                Some(next) => phase = next,
                None => break component,
            }
        };

        self.reset_transfer(host);
        self.ext_palette.advance();
        byte
    }

    fn read_status<H: RamdacHost + ?Sized>(&self, host: &H) -> u8 {
        self.status | if host.dac_status() != 0 { STATUS_DAC_ACTIVE } else { 0 }
    }

    fn read_indexed<H: RamdacHost + ?Sized>(&self, host: &H) -> u8 {
        if !self.indexed_enabled() {
            return self.read_status(host);
        }
        let dac_addr = host.dac_addr();
        match (dac_addr & 0xFF) as u8 {
            SUBREG_STATUS => self.read_status(host),
            SUBREG_CMD3 => (self.cr3 & CR3_READ_MASK) | ((dac_addr & 0x0300) >> 8) as u8,
            SUBREG_CMD4 | SUBREG_SIG_RED | SUBREG_SIG_GREEN | SUBREG_SIG_BLUE if self.caps.cmd_reg4 => {
                if dac_addr == SUBREG_CMD4 as u16 {
                    self.cr4
                }
                else {
                    // TODO: Red, green and blue signature analysis registers.
                    log::warn!("Read from unimplemented RAM DAC indexed register: {:03X}", dac_addr);
                    NO_IO_BYTE
                }
            }
            _ => NO_IO_BYTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{basic_host::BasicHost, chip_type::ChipType, ext_palette::TransferPhase, host::HwCursor};
    use strum::IntoEnumIterator;

    const PORT_WRITE_INDEX: u16 = 0x3C8;
    const PORT_READ_INDEX: u16 = 0x3C7;

    fn attach(chip: ChipType) -> (Ramdac, BasicHost) {
        let mut host = BasicHost::default();
        let ramdac = Ramdac::new(chip, &mut host);
        (ramdac, host)
    }

    fn write(ramdac: &mut Ramdac, host: &mut BasicHost, rs: RegisterSelect, byte: u8) {
        ramdac.write_register(rs, rs.code() as u16, byte, host);
    }

    fn read(ramdac: &mut Ramdac, host: &mut BasicHost, rs: RegisterSelect) -> u8 {
        ramdac.read_register(rs, rs.code() as u16, host)
    }

    fn write_ext_color(ramdac: &mut Ramdac, host: &mut BasicHost, index: u8, rgb: [u8; 3]) {
        write(ramdac, host, RegisterSelect::ExtPaletteWriteIndex, index);
        for byte in rgb {
            write(ramdac, host, RegisterSelect::ExtPaletteData, byte);
        }
    }

    /// Enable the indexed block and select a sub-register through the palette write index.
    fn select_indexed(ramdac: &mut Ramdac, host: &mut BasicHost, subreg: u8) {
        write(ramdac, host, RegisterSelect::CommandReg0, 0x80);
        ramdac.write_register(RegisterSelect::PaletteWriteIndex, PORT_WRITE_INDEX, subreg, host);
    }

    #[test]
    fn command_registers_round_trip() {
        for chip in ChipType::iter() {
            let (mut ramdac, mut host) = attach(chip);
            for rs in [RegisterSelect::CommandReg0, RegisterSelect::CommandReg1, RegisterSelect::CommandReg2] {
                for byte in [0x00, 0x5A, 0xA5, 0xFF] {
                    write(&mut ramdac, &mut host, rs, byte);
                    assert_eq!(read(&mut ramdac, &mut host, rs), byte, "{} on {}", rs, chip);
                }
            }
        }
    }

    #[test]
    fn decoded_port_access() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        // RS2 + offset 2 = command register 0
        ramdac.write_u8(0x3C6, true, false, 0x02, &mut host);
        assert_eq!(ramdac.command_registers()[0], 0x02);
        assert_eq!(ramdac.read_u8(0x3C6, true, false, &mut host), 0x02);
        // RS3 + offset 1 = command register 2
        ramdac.write_u8(0x3C9, false, true, 0x03, &mut host);
        assert!(host.hw_cursor().enabled);
    }

    #[test]
    fn dac_precision_follows_cr0() {
        let (mut ramdac, mut host) = attach(ChipType::Bt484);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        assert_eq!(host.dac_precision(), DacPrecision::EightBit);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0xFD);
        assert_eq!(host.dac_precision(), DacPrecision::SixBit);
    }

    #[test]
    fn bpp_resolution_requests_recalc() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        let before = host.recalc_requests();
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg1, 0x28);
        assert_eq!(host.bpp(), 8);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg2, 0x20);
        assert_eq!(host.bpp(), 16);
        assert!(!host.hw_cursor().enabled);
        // Same value again still recalculates.
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg2, 0x20);
        assert_eq!(host.recalc_requests(), before + 3);

        write(&mut ramdac, &mut host, RegisterSelect::CommandReg1, 0x20);
        assert_eq!(host.bpp(), 15);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg1, 0x00);
        assert_eq!(host.bpp(), 32);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg1, 0x60);
        assert_eq!(host.bpp(), 4);
    }

    #[test]
    fn ext_palette_write_8bit() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write_ext_color(&mut ramdac, &mut host, 0, [0x11, 0x22, 0x33]);
        assert_eq!(ramdac.ext_palette_u32(0), 0x112233);
        assert_eq!(ramdac.ext_palette().entries[0], ExtPaletteEntry { r: 0x11, g: 0x22, b: 0x33 });
        assert_eq!(ramdac.ext_addr(), 1);
        assert_eq!(host.dac_pos(), 0);
        assert!(host.take_dirty());
    }

    #[test]
    fn ext_palette_write_6bit() {
        let (mut ramdac, mut host) = attach(ChipType::Bt484);
        write_ext_color(&mut ramdac, &mut host, 2, [0x3F, 0x00, 0x3F]);
        assert_eq!(ramdac.ext_palette_u32(2), 0xFF00FF);
        // Out of range components are masked to 6 bits before expansion.
        write_ext_color(&mut ramdac, &mut host, 7, [0xFF, 0x40, 0x01]);
        assert_eq!(ramdac.ext_palette_u32(3), 0xFF0004);
    }

    #[test]
    fn ext_palette_partial_transfer_restarts_on_index_load() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteWriteIndex, 1);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData, 0x99);
        assert_eq!(host.dac_pos(), 1);
        write_ext_color(&mut ramdac, &mut host, 1, [0x01, 0x02, 0x03]);
        assert_eq!(ramdac.ext_palette_u32(1), 0x010203);
    }

    #[test]
    fn ext_palette_transfer_restarts_on_palette_write_index() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteWriteIndex, 0);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData, 0xAA);
        assert_eq!(ramdac.transfer_phase(), TransferPhase::Green);

        ramdac.write_register(RegisterSelect::PaletteWriteIndex, PORT_WRITE_INDEX, 0x00, &mut host);
        assert_eq!(host.dac_pos(), 0);
        assert_eq!(ramdac.transfer_phase(), TransferPhase::Red);

        for byte in [0x11, 0x22, 0x33] {
            write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData, byte);
        }
        assert_eq!(ramdac.ext_palette_u32(0), 0x112233);
        assert_eq!(ramdac.ext_addr(), 1);
    }

    #[test]
    fn ext_palette_transfer_follows_generic_data_position() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteWriteIndex, 2);

        // A generic palette data write moves the shared position on to green.
        ramdac.write_register(RegisterSelect::PaletteData, 0x3C9, 0x05, &mut host);
        assert_eq!(host.dac_pos(), 1);

        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData, 0x11);
        assert_eq!(host.dac_pos(), 2);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData, 0x22);
        assert_eq!(host.dac_pos(), 0);
        assert_eq!(ramdac.ext_palette().entries[2].g, 0x11);
        assert_eq!(ramdac.ext_palette().entries[2].b, 0x22);
        assert_eq!(ramdac.ext_addr(), 3);
    }

    #[test]
    fn ext_palette_index_registers() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485a);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteWriteIndex, 0x10);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::ExtPaletteWriteIndex), 0x10);
        assert_eq!(host.dac_status(), 0);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex, 0x10);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex), 0x11);
        assert_eq!(host.dac_status(), 3);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex, 0xFF);
        assert_eq!(ramdac.ext_addr(), 0x00);
    }

    #[test]
    fn ext_palette_read_cascades_to_blue() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write_ext_color(&mut ramdac, &mut host, 1, [0xA1, 0xB2, 0xC3]);

        // Entering at red.
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex, 1);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData), 0xC3);
        assert_eq!(ramdac.transfer_phase().index(), 0);
        assert_eq!(ramdac.ext_addr(), 3);
        assert_eq!(host.dac_status(), DAC_STATE_READ);

        // Entering at green and at blue, after partial writes.
        for partial in [1, 2] {
            write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex, 1);
            host.set_dac_pos(partial);
            assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData), 0xC3);
            assert_eq!(ramdac.transfer_phase().index(), 0);
            assert_eq!(host.dac_pos(), 0);
            assert_eq!(ramdac.ext_addr(), 3);
        }

        // 6-bit mode masks the returned component.
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x00);
        write(&mut ramdac, &mut host, RegisterSelect::ExtPaletteReadIndex, 1);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::ExtPaletteData), 0x03);
    }

    #[test]
    fn overscan_follows_ext_entry_0() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        host.set_overscan_enabled(true);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);

        let before = host.recalc_requests();
        write_ext_color(&mut ramdac, &mut host, 0, [0x10, 0x20, 0x30]);
        assert_eq!(host.overscan_color(), 0x102030);
        assert_eq!(host.recalc_requests(), before + 1);

        // Unchanged color: no recalculation.
        write_ext_color(&mut ramdac, &mut host, 4, [0x10, 0x20, 0x30]);
        assert_eq!(host.recalc_requests(), before + 1);

        // Other entries never touch the border.
        write_ext_color(&mut ramdac, &mut host, 1, [0xFF, 0xFF, 0xFF]);
        assert_eq!(host.overscan_color(), 0x102030);
    }

    #[test]
    fn overscan_disabled() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x02);
        write_ext_color(&mut ramdac, &mut host, 0, [0x10, 0x20, 0x30]);
        assert_eq!(host.overscan_color(), 0);
    }

    #[test]
    fn read_index_load_and_wrap() {
        let (mut ramdac, mut host) = attach(ChipType::Bt484);
        ramdac.write_register(RegisterSelect::PaletteReadIndex, PORT_READ_INDEX, 0xFF, &mut host);
        assert_eq!(host.dac_addr(), 0x00);
        assert_eq!(host.dac_status(), 3);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::PaletteReadIndex), 0x00);

        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x03);
        ramdac.write_register(RegisterSelect::PaletteReadIndex, PORT_READ_INDEX, 0xFF, &mut host);
        assert_eq!(host.dac_addr(), 0x000);
        ramdac.write_register(RegisterSelect::PaletteReadIndex, PORT_READ_INDEX, 0x10, &mut host);
        assert_eq!(host.dac_addr(), 0x311);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::PaletteReadIndex), 0x11);
    }

    #[test]
    fn write_index_carries_cr3_high_bits() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x02);
        assert_eq!(host.dac_addr(), 0x201);
        ramdac.write_register(RegisterSelect::PaletteWriteIndex, PORT_WRITE_INDEX, 0x40, &mut host);
        assert_eq!(host.dac_addr(), 0x240);

        // Narrow counters never carry high bits.
        let (mut ramdac, mut host) = attach(ChipType::Att20c504);
        ramdac.cr3 = 0x03;
        ramdac.write_register(RegisterSelect::PaletteWriteIndex, PORT_WRITE_INDEX, 0x40, &mut host);
        assert_eq!(host.dac_addr(), 0x040);
    }

    #[test]
    fn cursor_ram_address_wrap() {
        let (mut ramdac, mut host) = attach(ChipType::Bt484);
        host.set_dac_addr(0xFF);
        write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, 0x5A);
        assert_eq!(host.dac_addr(), 0x00);
        assert_eq!(ramdac.cursor_bitmap(&host)[0xFF], 0x5A);

        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        host.set_dac_addr(0xFF);
        write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, 0x01);
        assert_eq!(host.dac_addr(), 0x100);
        host.set_dac_addr(0x3FF);
        write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, 0x02);
        assert_eq!(host.dac_addr(), 0x000);
    }

    #[test]
    fn cursor_ram_buffer_selection() {
        // 64x64 cursor on a BT485 addresses the 1024 byte bitmap.
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x04);
        assert_eq!(host.hw_cursor().xsize, 64);
        host.set_dac_addr(0x3FE);
        write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, 0xAA);
        assert_eq!(ramdac.cursor_bitmap(&host).len(), 1024);
        assert_eq!(ramdac.cursor_bitmap(&host)[0x3FE], 0xAA);

        // Back to 32x32: the 256 byte bitmap, untouched by the write above.
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x00);
        assert_eq!(ramdac.cursor_bitmap(&host).len(), 256);
        assert!(ramdac.cursor_bitmap(&host).iter().all(|&b| b == 0));

        // A BT484 only ever has the 32x32 bitmap, even if the host cursor claims 64.
        let (mut ramdac, mut host) = attach(ChipType::Bt484);
        host.hw_cursor_mut().xsize = 64;
        host.set_dac_addr(0x12);
        write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, 0x77);
        assert_eq!(ramdac.cursor_bitmap(&host).len(), 256);
        assert_eq!(ramdac.cursor_bitmap(&host)[0x12], 0x77);
    }

    #[test]
    fn cursor_ram_read_back() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        ramdac.write_register(RegisterSelect::PaletteWriteIndex, PORT_WRITE_INDEX, 0x20, &mut host);
        for byte in 0..4u8 {
            write(&mut ramdac, &mut host, RegisterSelect::CursorRamData, byte + 1);
        }
        ramdac.write_register(RegisterSelect::PaletteReadIndex, PORT_READ_INDEX, 0x20, &mut host);
        let data: Vec<u8> = (0..4).map(|_| read(&mut ramdac, &mut host, RegisterSelect::CursorRamData)).collect();
        assert_eq!(data, vec![1, 2, 3, 4]);
        assert_eq!(host.dac_addr(), 0x25);
    }

    #[test]
    fn cursor_position() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        write(&mut ramdac, &mut host, RegisterSelect::CursorXLow, 0x40);
        write(&mut ramdac, &mut host, RegisterSelect::CursorXHigh, 0xF1);
        write(&mut ramdac, &mut host, RegisterSelect::CursorYLow, 0x10);
        write(&mut ramdac, &mut host, RegisterSelect::CursorYHigh, 0x00);
        assert_eq!(ramdac.cursor_position(), (0x140, 0x010));
        assert_eq!(host.hw_cursor().x, 0x140 - 32);
        assert_eq!(host.hw_cursor().y, 0x10 - 32);

        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::CursorXLow), 0x40);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::CursorXHigh), 0x01);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::CursorYLow), 0x10);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::CursorYHigh), 0x00);

        // Changing size recomputes the displayed position.
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x04);
        assert_eq!(
            *host.hw_cursor(),
            HwCursor {
                enabled: false,
                xsize: 64,
                ysize: 64,
                yoff: 0,
                x: 0x140 - 64,
                y: 0x10 - 64,
            }
        );
    }

    #[test]
    fn indexed_block_gating() {
        let check_no_effect = |ramdac: &mut Ramdac, host: &mut BasicHost| {
            for subreg in 0..=0xFFu16 {
                host.set_dac_addr(subreg);
                let cursor = *host.hw_cursor();
                let recalcs = host.recalc_requests();
                write(ramdac, host, RegisterSelect::Indexed, 0xFF);
                assert_eq!(ramdac.command_registers()[3..], [0, 0], "sub-address {:02X}", subreg);
                assert_eq!(*host.hw_cursor(), cursor);
                assert_eq!(host.dac_addr(), subreg);
                assert_eq!(host.recalc_requests(), recalcs);
            }
        };

        // No indexed block on BT484 / 20C504, even with CR0 bit 7 set.
        for chip in [ChipType::Bt484, ChipType::Att20c504] {
            let (mut ramdac, mut host) = attach(chip);
            write(&mut ramdac, &mut host, RegisterSelect::CommandReg0, 0x80);
            check_no_effect(&mut ramdac, &mut host);
        }

        // Present but disabled by CR0 bit 7.
        for chip in [ChipType::Bt485, ChipType::Att20c505, ChipType::Bt485a] {
            let (mut ramdac, mut host) = attach(chip);
            check_no_effect(&mut ramdac, &mut host);

            // Disabled reads fall back to the status register.
            host.set_dac_addr(SUBREG_CMD3 as u16);
            assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), chip.status_id());
        }
    }

    #[test]
    fn status_register() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        host.set_dac_status(0);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0x60);
        host.set_dac_status(3);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0x64);

        select_indexed(&mut ramdac, &mut host, SUBREG_STATUS);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0x60);
    }

    #[test]
    fn cr3_read_back() {
        let (mut ramdac, mut host) = attach(ChipType::Att20c505);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD3);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0xF6);
        assert_eq!(host.dac_addr(), 0x201);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0xF6);

        // Bits 1-0 read back from the address counter rather than the register.
        host.set_dac_addr(0x101);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0xF5);
    }

    #[test]
    fn cr4_only_on_bt485a() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485a);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD4);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x5C);
        assert_eq!(ramdac.command_registers()[4], 0x5C);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), 0x5C);

        // Signature registers are unimplemented: writes ignored, reads float.
        host.set_dac_addr(SUBREG_SIG_GREEN as u16);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x11);
        assert_eq!(ramdac.command_registers()[4], 0x5C);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), NO_IO_BYTE);

        // CR4 needs the whole counter to be 2, not just the low byte.
        host.set_dac_addr(0x102);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x00);
        assert_eq!(ramdac.command_registers()[4], 0x5C);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), NO_IO_BYTE);

        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        select_indexed(&mut ramdac, &mut host, SUBREG_CMD4);
        write(&mut ramdac, &mut host, RegisterSelect::Indexed, 0x5C);
        assert_eq!(ramdac.command_registers()[4], 0);
        assert_eq!(read(&mut ramdac, &mut host, RegisterSelect::Indexed), NO_IO_BYTE);
    }

    #[test]
    fn generic_palette_delegation() {
        let (mut ramdac, mut host) = attach(ChipType::Bt485);
        ramdac.write_u8(0x3C8, false, false, 0x05, &mut host);
        for byte in [0x01, 0x02, 0x03] {
            ramdac.write_u8(0x3C9, false, false, byte, &mut host);
        }
        assert_eq!(host.color_registers[5], [0x01, 0x02, 0x03]);
        ramdac.write_u8(0x3C6, false, false, 0x7F, &mut host);
        assert_eq!(ramdac.read_u8(0x3C6, false, false, &mut host), 0x7F);
        assert_eq!(ramdac.read_u8(0x3C8, false, false, &mut host), 0x06);
    }
}
