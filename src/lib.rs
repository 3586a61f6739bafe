//! # RPN calculator engine
//!
//! The computational core of a reverse Polish calculator: a 256 digit
//! decimal number type, an operand stack with undo history, scientific
//! operations, physical constants and densities, SI prefixes, and a unit
//! conversion solver that also handles currencies from external rates.
//!
//! Stack positions are named X (top), Y, Z and T. Every operation pops its
//! operands, X first, and pushes the result. An operation that fails puts
//! its operands back and returns an error, so the stack is never left half
//! consumed:
//!
//! ```
//! use arpcalc_core::{CalcError, Calculator, Decimal};
//!
//! let mut calc = Calculator::new();
//! calc.enter(Decimal::from(6));
//! calc.enter(Decimal::from(0));
//! assert_eq!(calc.command("/"), Err(CalcError::DivideByZero));
//! assert_eq!(calc.stack().len(), 2);
//! ```
//!
//! Options:
//! * `ReplicateStack` - the stack is kept exactly four deep, popping copies T
//! * `Radians` - trigonometric functions take and return radians (degrees by default)
//! * `SaveHistory` - every command saves a snapshot for `undo`
//! * `PercentLeavesY` - percent operations keep Y under the result
//!
//! The list of supported operations:
//! * arithmetic: plus, minus, times, divide, power, xrooty, remainder, integerdivide
//! * powers and logarithms: square, cube, sqrt, cuberoot, etox, tentox, twotox, loge, log10, log2
//! * trigonometric functions (including inverted ones): sin, cos, tan, inversesin, inversecos, inversetan, inversetan2
//! * hyperbolic functions (including inverted ones): sinh, cosh, tanh, inversesinh, inversecosh, inversetanh, inversetanh2
//! * rounding: round, floor, ceiling, integerpart, floatingpart, absolute, negate, reciprocal
//! * bitwise operations on 8, 16, 32 or 64 bit words: bitwiseand, bitwiseor, bitwisexor, bitwisenot
//! * percentages: percent, percentchange
//! * stack: swap, duplicate, drop, rollUp, rollDown, clear, undo
//! * sexagesimal time and angles: hourstohms, hmstohours, hourstohm, hmtohours
//! * `Const-<name>`, `Density-<material>`, `SI-<prefix>`, `Convert_<category>_<from>_<to>`
//!
//! Conversions search the category for a chain of unit pairs, first path
//! found in declaration order wins. A failing step restores the stack.
//!
//! A whole line can be evaluated at once with [`parse::eval`]:
//!
//! ```
//! use arpcalc_core::{parse, Calculator, Decimal};
//!
//! let mut calc = Calculator::new();
//! parse::eval("32 \"Convert_Temperature_Fahrenheit_Celsius\"", &mut calc).unwrap();
//! assert_eq!(calc.x(), Decimal::from(0));
//! ```

#[macro_use]
extern crate pest_derive;

pub mod calc;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod decimal;
pub mod errors;
pub mod ops;
pub mod parse;
pub mod si;
pub mod stack;

pub use calc::Calculator;
pub use config::{BitCount, CalcOption, CalcOptions};
pub use conversion::ConversionGraph;
pub use decimal::Decimal;
pub use errors::{CalcError, CalcErrorResult, CalcResult};
pub use stack::Stack;
