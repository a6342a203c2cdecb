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

    replay.rs

    Register access trace replay

*/

//! Replay of a register access trace against a RAM DAC attached to the reference host.

use colored::*;

use ramdac_config::{AccessEntry, AccessOp};
use ramdac_core::{BasicHost, Ramdac, RegisterSelect};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplayResults {
    pub writes: usize,
    pub reads: usize,
    pub passed: usize,
    pub failed: usize,
}

pub fn replay(
    ramdac: &mut Ramdac,
    host: &mut BasicHost,
    trace: &[AccessEntry],
    stop_on_mismatch: bool,
) -> ReplayResults {
    let mut results = ReplayResults::default();

    for (i, access) in trace.iter().enumerate() {
        let rs = RegisterSelect::decode(access.offset, access.rs2, access.rs3);
        match access.op {
            AccessOp::Write => {
                let value = access.value.unwrap_or_default();
                ramdac.write_u8(access.offset, access.rs2, access.rs3, value, host);
                results.writes += 1;
            }
            AccessOp::Read => {
                let value = ramdac.read_u8(access.offset, access.rs2, access.rs3, host);
                results.reads += 1;
                match access.expect {
                    Some(expect) if expect == value => {
                        results.passed += 1;
                        println!("{:04}| {:<26} read {:02X} {}", i, rs.to_string(), value, "PASS".green());
                    }
                    Some(expect) => {
                        results.failed += 1;
                        println!(
                            "{:04}| {:<26} read {:02X} expected {:02X} {}",
                            i,
                            rs.to_string(),
                            value,
                            expect,
                            "FAIL".red()
                        );
                        if stop_on_mismatch {
                            log::warn!("Stopping on mismatch at access {}", i);
                            break;
                        }
                    }
                    None => {
                        println!("{:04}| {:<26} read {:02X}", i, rs.to_string(), value);
                    }
                }
            }
        }
    }

    results
}
