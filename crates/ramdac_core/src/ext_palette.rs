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

    ext_palette.rs

    Extended (overlay) palette

*/

//! The four entry extended (overlay) palette and its three byte transfer sequencer.

pub const EXT_PALETTE_SIZE: usize = 4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtPaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Position within an R, G, B transfer through the extended palette data register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransferPhase {
    #[default]
    Red,
    Green,
    Blue,
}

impl TransferPhase {
    pub fn index(&self) -> u8 {
        match self {
            TransferPhase::Red => 0,
            TransferPhase::Green => 1,
            TransferPhase::Blue => 2,
        }
    }

    /// Phase for a shared DAC position counter. Positions past blue clamp to blue.
    pub fn from_index(pos: u8) -> TransferPhase {
        match pos {
            0 => TransferPhase::Red,
            1 => TransferPhase::Green,
            _ => TransferPhase::Blue,
        }
    }

    pub fn next(&self) -> Option<TransferPhase> {
        match self {
            TransferPhase::Red => Some(TransferPhase::Green),
            TransferPhase::Green => Some(TransferPhase::Blue),
            TransferPhase::Blue => None,
        }
    }
}

impl ExtPaletteEntry {
    pub fn component(&self, phase: TransferPhase) -> u8 {
        match phase {
            TransferPhase::Red => self.r,
            TransferPhase::Green => self.g,
            TransferPhase::Blue => self.b,
        }
    }
}

/// Partially assembled extended palette write.
#[derive(Copy, Clone, Debug, Default)]
pub struct TransferState {
    pub phase: TransferPhase,
    pub r: u8,
    pub g: u8,
}

impl TransferState {
    pub fn reset(&mut self) {
        self.phase = TransferPhase::Red;
    }

    /// Follow the host's DAC position, which generic palette accesses and index loads also move.
    pub fn sync(&mut self, pos: u8) {
        self.phase = TransferPhase::from_index(pos);
    }

    /// Latch one component. Returns the completed (r, g, b) triple on the third byte and
    /// rewinds to the red phase.
    pub fn push(&mut self, byte: u8) -> Option<(u8, u8, u8)> {
        match self.phase {
            TransferPhase::Red => {
                self.r = byte;
                self.phase = TransferPhase::Green;
                None
            }
            TransferPhase::Green => {
                self.g = byte;
                self.phase = TransferPhase::Blue;
                None
            }
            TransferPhase::Blue => {
                self.phase = TransferPhase::Red;
                Some((self.r, self.g, byte))
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExtendedPalette {
    pub entries: [ExtPaletteEntry; EXT_PALETTE_SIZE],
    /// Packed 0x00RRGGBB colors, rebuilt whenever an entry is completed.
    pub lookup: [u32; EXT_PALETTE_SIZE],
    /// Extended palette address register. Only the low two bits select an entry.
    pub addr: u8,
}

impl ExtendedPalette {
    #[inline]
    pub fn entry_index(addr: u8) -> usize {
        (addr & 0x03) as usize
    }

    pub fn set_entry(&mut self, index: usize, entry: ExtPaletteEntry, packed: u32) {
        self.entries[index] = entry;
        self.lookup[index] = packed;
    }

    #[inline]
    pub fn advance(&mut self) {
        self.addr = self.addr.wrapping_add(1);
    }
}
