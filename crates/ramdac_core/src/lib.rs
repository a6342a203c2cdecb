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

    lib.rs

    RAM DAC core library

*/

//! Emulation of the Brooktree BT484/BT485/BT485A and AT&T 20C504/20C505 true-color RAM DACs
//! found on S3 and other SVGA adapters.
//!
//! A [Ramdac] holds the chip's private state: command registers, the four entry extended
//! palette and the hardware cursor bitmap and position. Everything it shares with the
//! adapter, such as the generic VGA palette and the DAC address counter, is reached through
//! the [RamdacHost] trait passed into each register access.

pub mod basic_host;
pub mod bpp;
pub mod chip_type;
pub mod cursor;
pub mod error;
pub mod ext_palette;
pub mod host;
pub mod io;
pub mod ramdac;
pub mod registers;

pub use basic_host::BasicHost;
pub use chip_type::{ChipType, RamdacCaps, RamdacTier};
pub use error::RamdacError;
pub use host::{DacPrecision, HwCursor, RamdacHost};
pub use ramdac::{Ramdac, RamdacStateEntry};
pub use registers::RegisterSelect;
