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

    bpp.rs

    Output bit depth resolution

*/

//! Output pixel depth selection from command registers 1 and 2.

use crate::registers::{CommandRegister1, CommandRegister2, PixelDepth};

/// Resolve the output bits per pixel. Without the true-color path enabled the palette
/// is always in use, so the depth is 8 regardless of command register 1.
pub fn resolve_bpp(cr1: u8, cr2: u8) -> u32 {
    if !CommandRegister2::from_bytes([cr2]).truecolor_enable() {
        return 8;
    }
    let cr1 = CommandRegister1::from_bytes([cr1]);
    match cr1.pixel_depth() {
        PixelDepth::Bpp32 => 32,
        PixelDepth::Bpp16 if cr1.select_565() => 16,
        PixelDepth::Bpp16 => 15,
        PixelDepth::Bpp8 => 8,
        PixelDepth::Bpp4 => 4,
    }
}
