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

    registers.rs

    Register select decoding and command register layouts

*/

//! Register select decoding and command register layouts.

use modular_bitfield::prelude::*;
use strum_macros::Display;

/// Value returned for reads that nothing drives.
pub const NO_IO_BYTE: u8 = 0xFF;

// Sub-addresses of the indexed register block (RS = 1010), taken from the low byte of the
// DAC address counter.
pub const SUBREG_STATUS: u8 = 0x00;
pub const SUBREG_CMD3: u8 = 0x01;
pub const SUBREG_CMD4: u8 = 0x02;
pub const SUBREG_SIG_RED: u8 = 0x20;
pub const SUBREG_SIG_GREEN: u8 = 0x21;
pub const SUBREG_SIG_BLUE: u8 = 0x22;

pub const CR3_READ_MASK: u8 = 0xFC;
pub const STATUS_DAC_ACTIVE: u8 = 0x04;

/// The sixteen registers addressable through RS3..RS0.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum RegisterSelect {
    #[strum(to_string = "Palette Write Index")]
    PaletteWriteIndex = 0x0,
    #[strum(to_string = "Palette Data")]
    PaletteData = 0x1,
    #[strum(to_string = "Pixel Read Mask")]
    PixelMask = 0x2,
    #[strum(to_string = "Palette Read Index")]
    PaletteReadIndex = 0x3,
    #[strum(to_string = "Ext Palette Write Index")]
    ExtPaletteWriteIndex = 0x4,
    #[strum(to_string = "Ext Palette Data")]
    ExtPaletteData = 0x5,
    #[strum(to_string = "Command Register 0")]
    CommandReg0 = 0x6,
    #[strum(to_string = "Ext Palette Read Index")]
    ExtPaletteReadIndex = 0x7,
    #[strum(to_string = "Command Register 1")]
    CommandReg1 = 0x8,
    #[strum(to_string = "Command Register 2")]
    CommandReg2 = 0x9,
    #[strum(to_string = "Status / Indexed Register")]
    Indexed = 0xA,
    #[strum(to_string = "Cursor RAM Data")]
    CursorRamData = 0xB,
    #[strum(to_string = "Cursor X Low")]
    CursorXLow = 0xC,
    #[strum(to_string = "Cursor X High")]
    CursorXHigh = 0xD,
    #[strum(to_string = "Cursor Y Low")]
    CursorYLow = 0xE,
    #[strum(to_string = "Cursor Y High")]
    CursorYHigh = 0xF,
}

impl RegisterSelect {
    /// Form the register select code from the port offset and the RS2/RS3 lines, which the
    /// adapter drives from its own extended registers.
    #[inline]
    pub fn decode(addr: u16, rs2: bool, rs3: bool) -> Self {
        let code = (addr & 0x03) as u8 | ((rs2 as u8) << 2) | ((rs3 as u8) << 3);
        Self::from_code(code)
    }

    pub fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0x0 => RegisterSelect::PaletteWriteIndex,
            0x1 => RegisterSelect::PaletteData,
            0x2 => RegisterSelect::PixelMask,
            0x3 => RegisterSelect::PaletteReadIndex,
            0x4 => RegisterSelect::ExtPaletteWriteIndex,
            0x5 => RegisterSelect::ExtPaletteData,
            0x6 => RegisterSelect::CommandReg0,
            0x7 => RegisterSelect::ExtPaletteReadIndex,
            0x8 => RegisterSelect::CommandReg1,
            0x9 => RegisterSelect::CommandReg2,
            0xA => RegisterSelect::Indexed,
            0xB => RegisterSelect::CursorRamData,
            0xC => RegisterSelect::CursorXLow,
            0xD => RegisterSelect::CursorXHigh,
            0xE => RegisterSelect::CursorYLow,
            _ => RegisterSelect::CursorYHigh,
        }
    }

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

#[bitfield]
#[derive(Copy, Clone)]
pub struct CommandRegister0 {
    #[skip]
    unused0: B1,
    pub dac_8bit: bool,
    #[skip]
    unused1: B5,
    pub indexed_enable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, BitfieldSpecifier)]
pub enum PixelDepth {
    Bpp32,
    Bpp16,
    Bpp8,
    Bpp4,
}

#[bitfield]
#[derive(Copy, Clone)]
pub struct CommandRegister1 {
    #[skip]
    unused0: B3,
    /// In 16-bit modes, selects 5:6:5 over 5:5:5.
    pub select_565: bool,
    #[skip]
    unused1: B1,
    #[bits = 2]
    pub pixel_depth: PixelDepth,
    #[skip]
    unused2: B1,
}

#[bitfield]
#[derive(Copy, Clone)]
pub struct CommandRegister2 {
    pub cursor_mode: B2,
    #[skip]
    unused0: B3,
    /// Route pixels through the true-color path instead of the palette.
    pub truecolor_enable: bool,
    #[skip]
    unused1: B2,
}

#[bitfield]
#[derive(Copy, Clone)]
pub struct CommandRegister3 {
    pub addr_hi: B2,
    pub cursor_64: bool,
    #[skip]
    unused: B5,
}
