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

    chip_type.rs

    RAM DAC models and capability tiers

*/

//! Chip models, their capability tiers, and the per-model capability table.

use core::fmt;
use std::str::FromStr;

use serde::{self, Deserializer};
use strum_macros::{Display, EnumIter};

use crate::error::RamdacError;

/// Address counter width masks.
pub const DAC_ADDR_MASK_8: u16 = 0x00FF;
pub const DAC_ADDR_MASK_10: u16 = 0x03FF;

/// The concrete RAM DAC models that can be attached to an adapter.
#[derive(Copy, Clone, Debug, Default, Display, EnumIter, Hash, Eq, PartialEq)]
pub enum ChipType {
    #[strum(to_string = "BT484")]
    Bt484,
    #[strum(to_string = "AT&T 20C504")]
    Att20c504,
    #[default]
    #[strum(to_string = "BT485")]
    Bt485,
    #[strum(to_string = "AT&T 20C505")]
    Att20c505,
    #[strum(to_string = "BT485A")]
    Bt485a,
}

/// Capability tier. Models within a tier behave identically apart from their status ID.
///
/// Ordering is meaningful: every feature present at a tier is present at all higher tiers.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum RamdacTier {
    /// BT484, AT&T 20C504
    V0,
    /// BT485
    V1,
    /// AT&T 20C505
    V2,
    /// BT485A
    V3,
}

/// Per-tier constants, looked up once per register access.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RamdacCaps {
    pub tier: RamdacTier,
    /// Mask applied to the shared DAC address counter (8 or 10 bits).
    pub addr_mask: u16,
    /// The address counter carries bits 9-8 from command register 3.
    pub wide_addr: bool,
    /// A 64x64 cursor and its 1024 byte bitmap are available.
    pub cursor_64: bool,
    /// Command register 3 and the status register are reachable through the indexed
    /// sub-register block.
    pub indexed_regs: bool,
    /// Command register 4 (and the signature analysis registers) exist.
    pub cmd_reg4: bool,
}

const CAPS_V0: RamdacCaps = RamdacCaps {
    tier: RamdacTier::V0,
    addr_mask: DAC_ADDR_MASK_8,
    wide_addr: false,
    cursor_64: false,
    indexed_regs: false,
    cmd_reg4: false,
};

const CAPS_V1: RamdacCaps = RamdacCaps {
    tier: RamdacTier::V1,
    addr_mask: DAC_ADDR_MASK_10,
    wide_addr: true,
    cursor_64: true,
    indexed_regs: true,
    cmd_reg4: false,
};

const CAPS_V2: RamdacCaps = RamdacCaps {
    tier: RamdacTier::V2,
    ..CAPS_V1
};

const CAPS_V3: RamdacCaps = RamdacCaps {
    tier: RamdacTier::V3,
    cmd_reg4: true,
    ..CAPS_V1
};

impl ChipType {
    pub fn tier(&self) -> RamdacTier {
        match self {
            ChipType::Bt484 | ChipType::Att20c504 => RamdacTier::V0,
            ChipType::Bt485 => RamdacTier::V1,
            ChipType::Att20c505 => RamdacTier::V2,
            ChipType::Bt485a => RamdacTier::V3,
        }
    }

    pub fn caps(&self) -> &'static RamdacCaps {
        match self.tier() {
            RamdacTier::V0 => &CAPS_V0,
            RamdacTier::V1 => &CAPS_V1,
            RamdacTier::V2 => &CAPS_V2,
            RamdacTier::V3 => &CAPS_V3,
        }
    }

    /// The identification bits reported in the status register.
    ///
    /// Both the BT484 and BT485 datasheets claim SR7=0 and SR6=1, but drivers in the wild
    /// expect the values below.
    pub fn status_id(&self) -> u8 {
        match self {
            ChipType::Bt484 => 0x40,
            ChipType::Att20c504 => 0x40,
            ChipType::Bt485 => 0x60,
            ChipType::Att20c505 => 0xD0,
            ChipType::Bt485a => 0x20,
        }
    }

    /// Resolve a numeric chip type ID, as stored in adapter configuration tables.
    pub fn from_id(id: u8) -> Result<Self, RamdacError> {
        match id {
            0 => Ok(ChipType::Bt484),
            1 => Ok(ChipType::Att20c504),
            2 => Ok(ChipType::Bt485),
            3 => Ok(ChipType::Att20c505),
            4 => Ok(ChipType::Bt485a),
            _ => Err(RamdacError::BadTypeId(id)),
        }
    }
}

impl FromStr for ChipType {
    type Err = RamdacError;
    fn from_str(s: &str) -> Result<Self, RamdacError>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "bt484" => Ok(ChipType::Bt484),
            "att20c504" => Ok(ChipType::Att20c504),
            "bt485" => Ok(ChipType::Bt485),
            "att20c505" => Ok(ChipType::Att20c505),
            "bt485a" => Ok(ChipType::Bt485a),
            _ => Err(RamdacError::UnknownType(s.to_string())),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ChipType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChipTypeVisitor;

        impl serde::de::Visitor<'_> for ChipTypeVisitor {
            type Value = ChipType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`bt484`, `att20c504`, `bt485`, `att20c505` or `bt485a`")
            }

            fn visit_str<E>(self, value: &str) -> Result<ChipType, E>
            where
                E: serde::de::Error,
            {
                value.parse::<ChipType>().map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<ChipType, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(value)
                    .map_err(|_| E::custom(format!("invalid chip type id: {}", value)))
                    .and_then(|id| ChipType::from_id(id).map_err(E::custom))
            }

            fn visit_i64<E>(self, value: i64) -> Result<ChipType, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(value)
                    .map_err(|_| E::custom(format!("invalid chip type id: {}", value)))
                    .and_then(|id| ChipType::from_id(id).map_err(E::custom))
            }
        }

        deserializer.deserialize_any(ChipTypeVisitor)
    }
}
