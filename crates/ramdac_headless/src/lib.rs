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

    Headless harness library

*/

//! RAM DAC headless harness main library component.

#![forbid(unsafe_code)]

mod replay;

use colored::*;

use ramdac_config::ConfigFileParams;
use ramdac_core::{BasicHost, DacPrecision, Ramdac, RamdacHost};

pub use crate::replay::{replay, ReplayResults};

pub fn run() {
    // Resolve the configuration by parsing the configuration toml and merging it with
    // command line arguments.
    let config = match ramdac_config::read_config_file("./ramdac.toml") {
        Ok(config) => config,
        Err(e) => match e.downcast_ref::<std::io::Error>() {
            Some(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "Configuration file not found! Please create ramdac.toml in the current directory \
                               or provide the path to configuration file with --configfile."
                );
                std::process::exit(1);
            }
            Some(e) => {
                eprintln!("Unknown IO error reading configuration file:\n{}", e);
                std::process::exit(1);
            }
            None => {
                eprintln!(
                    "Failed to parse configuration file. There may be a typo or otherwise invalid toml:\n{}",
                    e
                );
                std::process::exit(1);
            }
        },
    };

    // RUST_LOG takes priority over the configured level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.headless.log_level.as_str()))
        .init();

    match run_config(&config) {
        Ok(results) if results.failed == 0 => {
            println!("{}", "All reads matched.".green());
        }
        Ok(results) => {
            let msg = format!("{} of {} reads mismatched.", results.failed, results.reads);
            println!("{}", msg.as_str().red());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Attach the configured RAM DAC to a fresh reference host and replay the access trace.
pub fn run_config(config: &ConfigFileParams) -> Result<ReplayResults, anyhow::Error> {
    let mut host = BasicHost::new(config.ramdac.overscan);
    if config.ramdac.dac_8bit {
        host.set_dac_precision(DacPrecision::EightBit);
    }
    let mut ramdac = Ramdac::new(config.ramdac.chip_type, &mut host);

    println!(
        "Replaying {} accesses on {} (status id: {:02X})",
        config.access.len(),
        ramdac.chip_type(),
        ramdac.status_id()
    );

    let results = replay(&mut ramdac, &mut host, &config.access, config.headless.stop_on_mismatch);
    println!(
        "{} writes, {} reads, {} passed, {} failed.",
        results.writes, results.reads, results.passed, results.failed
    );

    if config.headless.dump_state {
        let state = ramdac.get_state();
        println!("{}", serde_json::to_string_pretty(&state)?);
        println!(
            "Host: bpp: {} dac_addr: {:03X} overscan: {:06X} cursor: {:?}",
            host.bpp(),
            host.dac_addr(),
            host.overscan_color(),
            host.hw_cursor()
        );
    }

    Ok(results)
}
