use std::fmt;
use std::str::FromStr;

use astro_float::{RoundingMode, WORD_BIT_SIZE};
use lazy_static::lazy_static;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::*;

/// Significant decimal digits every number carries
pub const DECIMAL_DIGITS: usize = 256;

/// Process-wide numeric settings. Created once, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct NumericContext {
    /// significant decimal digits
    pub digits: usize,
    /// mantissa size in bits: ceil(digits * log2(10))
    pub precision: usize,
    /// mantissa bits actually kept, the precision rounded up to whole words
    pub stored_bits: usize,
    /// digits that always print a stored mantissa so it reads back
    /// exactly: ceil(stored_bits * log10(2)) + 1
    pub print_digits: usize,
    pub rounding: RoundingMode,
}

impl NumericContext {
    fn with_digits(digits: usize) -> Self {
        let bits = (digits as f64 * std::f64::consts::LOG2_10).ceil() as usize;
        let stored_bits = bits.div_ceil(WORD_BIT_SIZE) * WORD_BIT_SIZE;
        let print_digits = (stored_bits as f64 * std::f64::consts::LOG10_2).ceil() as usize + 1;
        NumericContext {
            digits,
            precision: bits,
            stored_bits,
            print_digits,
            rounding: RoundingMode::ToEven,
        }
    }
}

lazy_static! {
    pub static ref CONTEXT: NumericContext = NumericContext::with_digits(DECIMAL_DIGITS);
}

/// Session switches that change how operations behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalcOptions {
    /// keep the stack at exactly four levels, the bottom one is copied on pop
    pub replicate_stack: bool,
    /// trigonometric functions work in radians instead of degrees
    pub radians: bool,
    /// snapshots are kept for undo
    pub save_history: bool,
    /// percent operations put Y back before the result
    pub percent_leaves_y: bool,
}

impl Default for CalcOptions {
    fn default() -> Self {
        CalcOptions {
            replicate_stack: false,
            radians: false,
            save_history: true,
            percent_leaves_y: true,
        }
    }
}

impl CalcOptions {
    pub fn get(&self, opt: CalcOption) -> bool {
        match opt {
            CalcOption::ReplicateStack => self.replicate_stack,
            CalcOption::Radians => self.radians,
            CalcOption::SaveHistory => self.save_history,
            CalcOption::PercentLeavesY => self.percent_leaves_y,
        }
    }

    pub fn set(&mut self, opt: CalcOption, value: bool) {
        match opt {
            CalcOption::ReplicateStack => self.replicate_stack = value,
            CalcOption::Radians => self.radians = value,
            CalcOption::SaveHistory => self.save_history = value,
            CalcOption::PercentLeavesY => self.percent_leaves_y = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalcOption {
    ReplicateStack,
    Radians,
    SaveHistory,
    PercentLeavesY,
}

impl CalcOption {
    pub const ALL: [CalcOption; 4] = [
        CalcOption::ReplicateStack,
        CalcOption::Radians,
        CalcOption::SaveHistory,
        CalcOption::PercentLeavesY,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CalcOption::ReplicateStack => "ReplicateStack",
            CalcOption::Radians => "Radians",
            CalcOption::SaveHistory => "SaveHistory",
            CalcOption::PercentLeavesY => "PercentLeavesY",
        }
    }
}

impl fmt::Display for CalcOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalcOption {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalcOption::ALL
            .iter()
            .find(|o| o.name() == s)
            .copied()
            .ok_or_else(|| CalcError::UnknownOption(s.to_string()))
    }
}

/// Word size used by the bitwise operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitCount {
    Bits8,
    Bits16,
    #[default]
    Bits32,
    Bits64,
}

impl BitCount {
    /// the 64-bit mask leaves the sign bit clear
    pub fn mask(&self) -> i64 {
        match self {
            BitCount::Bits8 => 0xFF,
            BitCount::Bits16 => 0xFFFF,
            BitCount::Bits32 => 0xFFFF_FFFF,
            BitCount::Bits64 => 0x7FFF_FFFF_FFFF_FFFF,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            BitCount::Bits8 => 8,
            BitCount::Bits16 => 16,
            BitCount::Bits32 => 32,
            BitCount::Bits64 => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(BitCount::Bits8),
            16 => Some(BitCount::Bits16),
            32 => Some(BitCount::Bits32),
            64 => Some(BitCount::Bits64),
            _ => None,
        }
    }
}
