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

    Harness configuration file parsing

*/

//! The `ramdac_config` crate parses the RAM DAC harness configuration file, and overlays
//! command line arguments on top of the configuration file settings.
//! Command line arguments always take priority over the configuration file.
//!
//! Features:
//! - `use_bpaf`: Enable BPAF support for command line argument parsing.

#[cfg(feature = "use_bpaf")]
mod bpaf_config;

use std::{path::Path, str::FromStr};

#[cfg(feature = "use_bpaf")]
pub use bpaf_config::{cli_args, CmdLineArgs};

use cfg_if::cfg_if;
use ramdac_core::ChipType;
use serde_derive::Deserialize;

const fn _default_true() -> bool {
    true
}

fn _default_log_level() -> String {
    String::from("info")
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessOp {
    Write,
    Read,
}

impl FromStr for AccessOp {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "write" => Ok(AccessOp::Write),
            "read" => Ok(AccessOp::Read),
            _ => Err("Bad value for access op".to_string()),
        }
    }
}

/// One register access in the replay trace.
#[derive(Debug, Deserialize)]
pub struct AccessEntry {
    pub op: AccessOp,
    /// Port offset. Only the low two bits reach the RAM DAC.
    pub offset: u16,
    #[serde(default)]
    pub rs2: bool,
    #[serde(default)]
    pub rs3: bool,
    pub value: Option<u8>,
    pub expect: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct Ramdac {
    #[serde(rename = "type", default)]
    pub chip_type: ChipType,
    #[serde(default)]
    pub overscan: bool,
    #[serde(default)]
    pub dac_8bit: bool,
}

#[derive(Debug, Deserialize)]
pub struct Headless {
    #[serde(default = "_default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub dump_state: bool,
    #[serde(default = "_default_true")]
    pub stop_on_mismatch: bool,
}

impl Default for Headless {
    fn default() -> Self {
        Self {
            log_level: _default_log_level(),
            dump_state: false,
            stop_on_mismatch: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfigFileParams {
    pub ramdac: Ramdac,
    #[serde(default)]
    pub headless: Headless,
    #[serde(default)]
    pub access: Vec<AccessEntry>,
}

impl ConfigFileParams {
    #[cfg(feature = "use_bpaf")]
    pub fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(chip_type) = shell_args.ramdac_type {
            self.ramdac.chip_type = chip_type;
        }
        if let Some(log_level) = shell_args.log_level {
            self.headless.log_level = log_level;
        }

        self.ramdac.overscan |= shell_args.overscan;
        self.headless.dump_state |= shell_args.dump_state;
    }

    /// Check the access trace for entries that can't be replayed.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (i, access) in self.access.iter().enumerate() {
            if access.op == AccessOp::Write && access.value.is_none() {
                anyhow::bail!("Access {}: write to offset {:X} has no value", i, access.offset);
            }
            if access.op == AccessOp::Write && access.expect.is_some() {
                log::warn!("Access {}: 'expect' is ignored on writes", i);
            }
        }
        Ok(())
    }
}

#[cfg(feature = "use_bpaf")]
pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;

    // Command line arguments override config file arguments
    toml_args.overlay(shell_args);
    toml_args.validate()?;

    Ok(toml_args)
}

#[cfg(not(feature = "use_bpaf"))]
pub fn read_config(toml_string: impl AsRef<str>) -> Result<ConfigFileParams, anyhow::Error> {
    let toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;
    toml_args.validate()?;
    Ok(toml_args)
}

/// Read the TOML configuration from a file path, parse and overlay command line arguments.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    cfg_if! {
        if #[cfg(feature = "use_bpaf")] {
            log::debug!("Reading command line arguments...");
            let shell_args = cli_args().run();

            // Allow configuration file path to be overridden by command line argument 'config_file'
            let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
                std::fs::read_to_string(configfile_path)?
            }
            else {
                std::fs::read_to_string(default_path)?
            };

            read_config(toml_string, shell_args)
        } else {
            log::debug!("Argument reading disabled...");
            let toml_string = std::fs::read_to_string(default_path)?;
            read_config(toml_string)
        }
    }
}
