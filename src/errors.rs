use std::fmt;

use crate::decimal::Decimal;

/// Outcome of every calculator operation. `NoError` is the success code
/// used when results are reported as plain codes.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcError {
    NoError,

    DivideByZero,
    InvalidRoot,
    InvalidLog,
    InvalidTan,
    InvalidInverseTrig,
    InvalidInverseHypTrig,

    UnknownConstant,
    UnknownConversion,
    InvalidConversion,
    UnknownSI,

    NoFunction,
    NoHistorySaved,
    NotImplemented,

    InvalidNumber(String),
    UnknownOption(String),
    ParseFailed(String),
}

pub type CalcResult = Result<Decimal, CalcError>;
pub type CalcErrorResult = Result<(), CalcError>;

impl CalcError {
    /// Collapses a result into the flat code taxonomy: `Ok` becomes `NoError`
    pub fn from_result<T>(res: &Result<T, CalcError>) -> CalcError {
        match res {
            Ok(..) => CalcError::NoError,
            Err(e) => e.clone(),
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == CalcError::NoError
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::NoError => write!(f, "OK"),

            CalcError::DivideByZero => write!(f, "Divide by zero"),
            CalcError::InvalidRoot => write!(f, "Invalid root"),
            CalcError::InvalidLog => write!(f, "Logarithm of a non-positive number"),
            CalcError::InvalidTan => write!(f, "Tangent is undefined for odd multiples of 90 degrees"),
            CalcError::InvalidInverseTrig => write!(f, "Argument of inverse trigonometric function out of range [-1, 1]"),
            CalcError::InvalidInverseHypTrig => write!(f, "Argument of inverse hyperbolic function out of range"),

            CalcError::UnknownConstant => write!(f, "Unknown constant"),
            CalcError::UnknownConversion => write!(f, "Unknown conversion"),
            CalcError::InvalidConversion => write!(f, "Value cannot be converted"),
            CalcError::UnknownSI => write!(f, "Unknown SI prefix"),

            CalcError::NoFunction => write!(f, "No such function"),
            CalcError::NoHistorySaved => write!(f, "History is disabled"),
            CalcError::NotImplemented => write!(f, "Not implemented"),

            CalcError::InvalidNumber(s) => write!(f, "Failed to convert '{}' to number", s),
            CalcError::UnknownOption(s) => write!(f, "Unknown option '{}'", s),
            CalcError::ParseFailed(s) => write!(f, "Failed to parse command line: {}", s),
        }
    }
}

impl std::error::Error for CalcError {}
