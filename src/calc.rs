//! Calculator session: one stack, the conversion tables, and named
//! variables, driven by command names.

use std::collections::BTreeMap;

use crate::config::{BitCount, CalcOption};
use crate::conversion::ConversionGraph;
use crate::decimal::Decimal;
use crate::errors::*;
use crate::stack::Stack;

use num_traits::Zero;

const CONST_PREFIX: &str = "Const-";
const DENSITY_PREFIX: &str = "Density-";
const SI_PREFIX: &str = "SI-";
const CONVERT_PREFIX: &str = "Convert_";

// commands that only change how numbers are shown
const DISPLAY_COMMANDS: [&str; 4] = ["EngL", "EngR", "base", "ShowAll"];

type StackOp = fn(&mut Stack) -> CalcErrorResult;

// operation names accepted by `Calculator::command`
fn operation(name: &str) -> Option<StackOp> {
    let op: StackOp = match name {
        "+" | "plus" => Stack::plus,
        "-" | "minus" => Stack::minus,
        "*" | "times" => Stack::times,
        "/" | "divide" => Stack::divide,
        "^" | "power" => Stack::power,
        "%" | "percent" => Stack::percent,
        "percentchange" => Stack::percent_change,
        "r" | "sqrt" | "squareroot" => Stack::square_root,
        "cuberoot" => Stack::cube_root,
        "xrooty" => Stack::xrooty,
        "w" | "swap" => Stack::swap,
        "dup" | "duplicate" => Stack::duplicate,
        "drop" => Stack::drop,
        "rollUp" | "rUp" => |s| {
            s.roll_up();
            Ok(())
        },
        "rollDown" | "rDown" => |s| {
            s.roll_down();
            Ok(())
        },
        "clear" => |s| {
            s.clear();
            Ok(())
        },
        "random" => Stack::random,
        "negate" | "plusMinus" => Stack::negate,
        "reciprocal" => Stack::reciprocal,
        "square" => Stack::square,
        "cube" => Stack::cube,
        "etox" => Stack::etox,
        "tentox" => Stack::tentox,
        "twotox" => Stack::twotox,
        "log10" => Stack::log10,
        "loge" | "ln" => Stack::loge,
        "log2" => Stack::log2,
        "absolute" => Stack::absolute,
        "integerpart" => Stack::integer_part,
        "floatingpart" => Stack::fractional_part,
        "integerdivide" => Stack::integer_divide,
        "remainder" => Stack::remainder,
        "ceiling" => Stack::ceiling,
        "floor" => Stack::floor,
        "round" => Stack::round,
        "bitwiseand" => Stack::bitwise_and,
        "bitwiseor" => Stack::bitwise_or,
        "bitwisexor" => Stack::bitwise_xor,
        "bitwisenot" => Stack::bitwise_not,
        "sin" => Stack::sin,
        "cos" => Stack::cos,
        "tan" => Stack::tan,
        "inversesin" => Stack::inverse_sin,
        "inversecos" => Stack::inverse_cos,
        "inversetan" => Stack::inverse_tan,
        "inversetan2" => Stack::inverse_tan2,
        "sinh" => Stack::sinh,
        "cosh" => Stack::cosh,
        "tanh" => Stack::tanh,
        "inversesinh" => Stack::inverse_sinh,
        "inversecosh" => Stack::inverse_cosh,
        "inversetanh" => Stack::inverse_tanh,
        "inversetanh2" => Stack::inverse_tanh2,
        "hmstohours" => Stack::hms_to_hours,
        "hmtohours" => Stack::hm_to_hours,
        "hourstohms" => Stack::hours_to_hms,
        "hourstohm" => Stack::hours_to_hm,
        "p" | "pi" => |s| s.constant("Pi"),
        _ => return None,
    };
    Some(op)
}

/// Checks whether `command` would recognize the name
pub fn is_command(name: &str) -> bool {
    operation(name).is_some()
        || matches!(name, "u" | "undo")
        || DISPLAY_COMMANDS.contains(&name)
        || [CONST_PREFIX, DENSITY_PREFIX, SI_PREFIX, CONVERT_PREFIX]
            .iter()
            .any(|p| name.starts_with(p))
}

/// One calculator session
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    stack: Stack,
    conversions: ConversionGraph,
    variables: BTreeMap<String, Decimal>,
    variables_changed: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_stack(stack: Stack) -> Self {
        Calculator {
            stack,
            ..Default::default()
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn conversions(&self) -> &ConversionGraph {
        &self.conversions
    }

    /// X, zero for an empty stack
    pub fn x(&self) -> Decimal {
        self.stack.peek()
    }

    /// Pushes a new value, undo takes it off again
    pub fn enter(&mut self, v: Decimal) {
        self.stack.save_history();
        self.stack.push(v);
    }

    // runs a mutating step with an undo snapshot that is dropped if it fails
    fn guarded<F>(&mut self, f: F) -> CalcErrorResult
    where
        F: FnOnce(&mut Calculator) -> CalcErrorResult,
    {
        self.stack.save_history();
        let res = f(self);
        if res.is_err() {
            self.stack.discard_history();
        }
        res
    }

    /// Runs one command by name: an operation (`"+"`, `"sqrt"`, `"swap"`...),
    /// `undo`, or a prefixed command `Const-<name>`, `Density-<name>`,
    /// `SI-<prefix>`, `Convert_<category>_<from>_<to>`.
    pub fn command(&mut self, name: &str) -> CalcErrorResult {
        if DISPLAY_COMMANDS.contains(&name) {
            return Err(CalcError::NotImplemented);
        }
        if name == "u" || name == "undo" {
            return self.stack.undo();
        }
        if let Some(constant) = name.strip_prefix(CONST_PREFIX) {
            return self.guarded(|c| c.stack.constant(constant));
        }
        if let Some(material) = name.strip_prefix(DENSITY_PREFIX) {
            return self.guarded(|c| c.stack.density(material));
        }
        if let Some(prefix) = name.strip_prefix(SI_PREFIX) {
            return self.guarded(|c| c.stack.si_prefix(prefix));
        }
        if let Some(rest) = name.strip_prefix(CONVERT_PREFIX) {
            let parts: Vec<&str> = rest.splitn(3, '_').collect();
            if parts.len() != 3 {
                return Err(CalcError::UnknownConversion);
            }
            return self.convert(parts[0], parts[1], parts[2]);
        }

        match operation(name) {
            Some(op) => self.guarded(|c| op(&mut c.stack)),
            None => {
                tracing::debug!(command = name, "unknown command");
                Err(CalcError::NoFunction)
            }
        }
    }

    /// Converts X between two units of a category
    pub fn convert(&mut self, category: &str, from: &str, to: &str) -> CalcErrorResult {
        self.guarded(|c| c.conversions.convert(&mut c.stack, category, from, to))
    }

    /// Saves X under `name`
    pub fn store(&mut self, name: &str) {
        self.variables.insert(name.to_string(), self.stack.peek());
        self.variables_changed = true;
    }

    /// Pushes the value saved under `name`, or zero when there is none
    pub fn recall(&mut self, name: &str) {
        let v = self.variables.get(name).cloned().unwrap_or_else(Decimal::zero);
        self.enter(v);
    }

    /// Replaces all variables, e.g. with the ones saved by a previous session
    pub fn load_variables(&mut self, vars: BTreeMap<String, Decimal>) {
        self.variables = vars;
    }

    pub fn variables(&self) -> &BTreeMap<String, Decimal> {
        &self.variables
    }

    /// True once `store` was called since the last `mark_variables_saved`
    pub fn variables_changed(&self) -> bool {
        self.variables_changed
    }

    pub fn mark_variables_saved(&mut self) {
        self.variables_changed = false;
    }

    pub fn set_option(&mut self, opt: CalcOption, value: bool) {
        self.stack.set_option(opt, value);
    }

    pub fn option(&self, opt: CalcOption) -> bool {
        self.stack.option(opt)
    }

    pub fn set_option_by_name(&mut self, name: &str, value: bool) -> CalcErrorResult {
        let opt = name.parse::<CalcOption>().map_err(|e| {
            tracing::warn!(option = name, "invalid option");
            e
        })?;
        self.set_option(opt, value);
        Ok(())
    }

    pub fn option_by_name(&self, name: &str) -> Result<bool, CalcError> {
        let opt = name.parse::<CalcOption>().map_err(|e| {
            tracing::warn!(option = name, "invalid option");
            e
        })?;
        Ok(self.option(opt))
    }

    pub fn option_names(&self) -> Vec<&'static str> {
        CalcOption::ALL.iter().map(|o| o.name()).collect()
    }

    pub fn set_bit_count(&mut self, bc: BitCount) {
        self.stack.set_bit_count(bc);
    }

    /// Takes a fresh set of exchange rates (units per euro keyed by ISO
    /// code) and the date they were published
    pub fn process_currency_data(&mut self, rates: &BTreeMap<String, f64>, date: &str) {
        self.conversions.register_currencies(rates);
        self.conversions.set_currency_date(date);
    }

    pub fn raw_currency_data(&self) -> &BTreeMap<String, f64> {
        self.conversions.raw_currency_data()
    }

    pub fn currency_date(&self) -> Option<&str> {
        self.conversions.currency_date()
    }
}
