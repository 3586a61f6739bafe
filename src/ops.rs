//! Calculator operations. Every operation pops its operands (X first, then
//! Y), and either pushes its result or, on failure, pushes the operands
//! back and returns the error, so a failed call leaves the stack as it was.

use lazy_static::lazy_static;
use num_traits::{One, Zero};
use rand::Rng;

use crate::constants::{self, CONSTANTS, DENSITIES};
use crate::decimal::Decimal;
use crate::errors::*;
use crate::stack::Stack;

const RANDOM_LIMIT: f64 = 32768.0;

lazy_static! {
    // intermediate results this close to an integer are treated as that integer
    static ref SETTLE_EPSILON: Decimal = Decimal::from(10).pow(&Decimal::from(-200));
}

// X -> f(X)
macro_rules! one_arg_op {
    ($($id:ident => $f:expr),+ $(,)?) => {
        $(
            pub fn $id(&mut self) -> CalcErrorResult {
                let f: fn(&Decimal) -> Decimal = $f;
                let x = self.pop();
                self.push(f(&x));
                Ok(())
            }
        )+
    };
}

// Y, X -> f(Y, X)
macro_rules! two_arg_op {
    ($($id:ident => $f:expr),+ $(,)?) => {
        $(
            pub fn $id(&mut self) -> CalcErrorResult {
                let f: fn(&Decimal, &Decimal) -> Decimal = $f;
                let x = self.pop();
                let y = self.pop();
                self.push(f(&y, &x));
                Ok(())
            }
        )+
    };
}

// X -> f(X), X is put back when `bad(X)` holds
macro_rules! guarded_one_arg_op {
    ($($id:ident => $err:ident if $bad:expr, $f:expr);+ $(;)?) => {
        $(
            pub fn $id(&mut self) -> CalcErrorResult {
                let bad: fn(&Decimal) -> bool = $bad;
                let f: fn(&Decimal) -> Decimal = $f;
                let x = self.pop();
                if bad(&x) {
                    self.push(x);
                    return Err(CalcError::$err);
                }
                self.push(f(&x));
                Ok(())
            }
        )+
    };
}

// Y, X -> f(Y, X), X is put back when it is zero
macro_rules! divisor_op {
    ($($id:ident => $f:expr),+ $(,)?) => {
        $(
            pub fn $id(&mut self) -> CalcErrorResult {
                let f: fn(&Decimal, &Decimal) -> Decimal = $f;
                let x = self.pop();
                if x.is_zero() {
                    self.push(x);
                    return Err(CalcError::DivideByZero);
                }
                let y = self.pop();
                self.push(f(&y, &x));
                Ok(())
            }
        )+
    };
}

// Y, X -> f(Y, X) on the masked integer values
macro_rules! bitwise_op {
    ($($id:ident => $op:tt),+ $(,)?) => {
        $(
            pub fn $id(&mut self) -> CalcErrorResult {
                let mask = self.bit_mask();
                let x = self.pop().round().to_i64() & mask;
                let y = self.pop().round().to_i64() & mask;
                self.push(Decimal::from((y $op x) & mask));
                Ok(())
            }
        )+
    };
}

fn hundred() -> Decimal {
    Decimal::from(100)
}

fn sixty() -> Decimal {
    Decimal::from(60)
}

fn half_pi() -> Decimal {
    &Decimal::pi() / &Decimal::from(2)
}

// truncation toward zero, written as floor/ceil by sign
fn integer_part(x: &Decimal) -> Decimal {
    if x.is_positive() {
        x.floor()
    } else {
        x.ceil()
    }
}

// Drops the last mantissa bits and snaps values that only miss an integer
// by accumulated rounding noise
fn settle(v: Decimal) -> Decimal {
    let mut v = v;
    v.reduce_precision();
    let r = v.round();
    if (&v - &r).abs() < *SETTLE_EPSILON {
        r
    } else {
        v
    }
}

// whole part (by sign), positive fractional part, sign
fn split_sexagesimal(x: &Decimal) -> (Decimal, Decimal, Decimal) {
    if !x.is_negative() {
        let whole = x.floor();
        let frac = x - &whole;
        (whole, frac, Decimal::one())
    } else {
        let whole = x.ceil();
        let frac = &whole - x;
        (whole, frac, -Decimal::one())
    }
}

impl Stack {
    fn to_radians(&self, x: &Decimal) -> Decimal {
        if self.options().radians {
            x.clone()
        } else {
            &(x * &Decimal::pi()) / &Decimal::from(180)
        }
    }

    fn from_radians(&self, x: &Decimal) -> Decimal {
        if self.options().radians {
            x.clone()
        } else {
            &(x * &Decimal::from(180)) / &Decimal::pi()
        }
    }

    pub fn random(&mut self) -> CalcErrorResult {
        let v: f64 = rand::thread_rng().gen_range(0.0..RANDOM_LIMIT);
        self.push(Decimal::from(v));
        Ok(())
    }

    two_arg_op!(
        plus => |y, x| y + x,
        minus => |y, x| y - x,
        times => |y, x| y * x,
        power => |y, x| y.pow(x),
    );

    divisor_op!(
        divide => |y, x| y / x,
        remainder => |y, x| y.remainder(x),
        integer_divide => |y, x| {
            let v = y / x;
            if v.is_negative() {
                v.ceil()
            } else {
                v.floor()
            }
        },
    );

    one_arg_op!(
        negate => |x| &Decimal::zero() - x,
        etox => |x| Decimal::e().pow(x),
        tentox => |x| Decimal::from(10).pow(x),
        twotox => |x| Decimal::from(2).pow(x),
        square => |x| x * x,
        cube => |x| &(x * x) * x,
        integer_part => integer_part,
        fractional_part => |x| x - &integer_part(x),
        absolute => |x| x.abs(),
        ceiling => |x| x.ceil(),
        floor => |x| x.floor(),
        round => |x| x.round(),
        square_root => |x| x.sqrt(),
        cube_root => |x| x.cbrt(),
        cosh => |x| x.cosh(),
        sinh => |x| x.sinh(),
        tanh => |x| x.tanh(),
        inverse_cosh => |x| x.acosh(),
        inverse_sinh => |x| x.asinh(),
        inverse_tanh => |x| x.atanh(),
    );

    guarded_one_arg_op!(
        reciprocal => DivideByZero if |x| x.is_zero(), |x| &Decimal::one() / x;
        log10 => InvalidLog if |x| !x.is_positive(), |x| x.log10();
        loge => InvalidLog if |x| !x.is_positive(), |x| x.ln();
        log2 => InvalidLog if |x| !x.is_positive(), |x| &x.ln() / &Decimal::from(2).ln();
    );

    bitwise_op!(
        bitwise_and => &,
        bitwise_or => |,
        bitwise_xor => ^,
    );

    pub fn bitwise_not(&mut self) -> CalcErrorResult {
        let mask = self.bit_mask();
        let x = self.pop().round().to_i64() & mask;
        self.push(Decimal::from(!x & mask));
        Ok(())
    }

    /// Y to the power 1/X
    pub fn xrooty(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let y = self.pop();
        if x.is_zero() || y.is_negative() {
            self.push(y);
            self.push(x);
            return Err(CalcError::InvalidRoot);
        }
        self.push(y.root(&x));
        Ok(())
    }

    /// X percent of Y
    pub fn percent(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let y = self.pop();
        let v = &(&x / &hundred()) * &y;
        if self.options().percent_leaves_y {
            self.push(y);
        }
        self.push(v);
        Ok(())
    }

    /// Change from Y to X in percent of Y
    pub fn percent_change(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let y = self.pop();
        if y.is_zero() {
            self.push(y);
            self.push(x);
            return Err(CalcError::DivideByZero);
        }
        let v = &(&(&x - &y) / &y) * &hundred();
        if self.options().percent_leaves_y {
            self.push(y);
        }
        self.push(v);
        Ok(())
    }

    pub fn cos(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let v = self.to_radians(&x).cos();
        self.push(v);
        Ok(())
    }

    pub fn sin(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let v = self.to_radians(&x).sin();
        self.push(v);
        Ok(())
    }

    /// Rejects exact odd multiples of a right angle. The test runs in the
    /// angle unit of the input, so 90 degrees is caught exactly.
    pub fn tan(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let quarter = if self.options().radians {
            half_pi()
        } else {
            Decimal::from(90)
        };
        if x.remainder(&quarter).is_zero() {
            let turns = &x / &quarter;
            if turns.remainder(&Decimal::from(2)).abs() == Decimal::one() {
                self.push(x);
                return Err(CalcError::InvalidTan);
            }
        }
        let v = self.to_radians(&x).tan();
        self.push(v);
        Ok(())
    }

    fn inverse_trig(&mut self, f: fn(&Decimal) -> Decimal) -> CalcErrorResult {
        let x = self.pop();
        if x.abs() > Decimal::one() {
            self.push(x);
            return Err(CalcError::InvalidInverseTrig);
        }
        let v = self.from_radians(&f(&x));
        self.push(v);
        Ok(())
    }

    pub fn inverse_cos(&mut self) -> CalcErrorResult {
        self.inverse_trig(Decimal::acos)
    }

    pub fn inverse_sin(&mut self) -> CalcErrorResult {
        self.inverse_trig(Decimal::asin)
    }

    pub fn inverse_tan(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let v = self.from_radians(&x.atan());
        self.push(v);
        Ok(())
    }

    /// Four quadrant arctangent of Y/X
    pub fn inverse_tan2(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let y = self.pop();
        let v = if x.is_positive() {
            (&y / &x).atan()
        } else if x.is_negative() && !y.is_negative() {
            &(&y / &x).atan() + &Decimal::pi()
        } else if x.is_negative() {
            &(&y / &x).atan() - &Decimal::pi()
        } else if y.is_positive() {
            half_pi()
        } else if y.is_negative() {
            -half_pi()
        } else {
            self.push(y);
            self.push(x);
            return Err(CalcError::DivideByZero);
        };
        let v = self.from_radians(&v);
        self.push(v);
        Ok(())
    }

    /// Inverse hyperbolic tangent of Y/X, computed as ln((1+r)/(1-r))/2
    pub fn inverse_tanh2(&mut self) -> CalcErrorResult {
        let x = self.pop();
        if x.is_zero() {
            self.push(x);
            return Err(CalcError::DivideByZero);
        }
        let y = self.pop();
        let ratio = &y / &x;
        if ratio == Decimal::one() {
            self.push(y);
            self.push(x);
            return Err(CalcError::DivideByZero);
        }
        let v = &(&Decimal::one() + &ratio) / &(&Decimal::one() - &ratio);
        if !v.is_positive() {
            self.push(y);
            self.push(x);
            return Err(CalcError::InvalidInverseHypTrig);
        }
        self.push(&Decimal::from(0.5) * &v.ln());
        Ok(())
    }

    pub fn swap(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let y = self.pop();
        self.push(x);
        self.push(y);
        Ok(())
    }

    pub fn duplicate(&mut self) -> CalcErrorResult {
        let x = self.peek();
        self.push(x);
        Ok(())
    }

    pub fn drop(&mut self) -> CalcErrorResult {
        self.pop();
        Ok(())
    }

    /// H.MMSS to decimal hours
    pub fn hms_to_hours(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let (hours, frac, sign) = split_sexagesimal(&x);
        let minutes = settle(&frac * &hundred());
        let seconds = settle(&(&minutes - &minutes.floor()) * &hundred());
        let minutes = minutes.floor();
        let part = &(&minutes + &(&seconds / &sixty())) / &sixty();
        self.push(&hours + &(&sign * &part));
        Ok(())
    }

    /// H.MM to decimal hours
    pub fn hm_to_hours(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let (hours, frac, sign) = split_sexagesimal(&x);
        let minutes = settle(&frac * &hundred());
        self.push(&hours + &(&sign * &(&minutes / &sixty())));
        Ok(())
    }

    /// Decimal hours to H.MMSS
    pub fn hours_to_hms(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let (mut hours, frac, sign) = split_sexagesimal(&x);
        let minutes = settle(&frac * &sixty());
        let mut seconds = settle(&(&minutes - &minutes.floor()) * &sixty());
        let mut minutes = minutes.floor();
        while seconds >= sixty() {
            seconds = &seconds - &sixty();
            minutes = &minutes + &Decimal::one();
        }
        while minutes >= sixty() {
            minutes = &minutes - &sixty();
            hours = &hours + &sign;
        }
        let part = &(&minutes + &(&seconds / &hundred())) / &hundred();
        self.push(&hours + &(&sign * &part));
        Ok(())
    }

    /// Decimal hours to H.MM
    pub fn hours_to_hm(&mut self) -> CalcErrorResult {
        let x = self.pop();
        let (mut hours, frac, sign) = split_sexagesimal(&x);
        let mut minutes = settle(&frac * &sixty());
        while minutes >= sixty() {
            minutes = &minutes - &sixty();
            hours = &hours + &sign;
        }
        self.push(&hours + &(&sign * &(&minutes / &hundred())));
        Ok(())
    }

    /// Pushes a physical constant looked up by name
    pub fn constant(&mut self, name: &str) -> CalcErrorResult {
        let c = constants::find(&CONSTANTS, name).ok_or(CalcError::UnknownConstant)?;
        self.push(c.value.clone());
        Ok(())
    }

    /// Pushes a material density in kg/m³
    pub fn density(&mut self, name: &str) -> CalcErrorResult {
        let c = constants::find(&DENSITIES, name).ok_or(CalcError::UnknownConstant)?;
        self.push(c.value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BitCount, CalcOption};

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    fn stack_of(vals: &[&str]) -> Stack {
        let mut stack = Stack::new();
        stack.push_all(vals.iter().map(|s| d(s)));
        stack
    }

    fn close(a: &Decimal, b: &Decimal) -> bool {
        (a - b).abs() < d("1e-60")
    }

    fn assert_unchanged(stack: &Stack, vals: &[&str]) {
        let expected: Vec<Decimal> = vals.iter().rev().map(|s| d(s)).collect();
        assert_eq!(stack.stack_for_display(), expected);
    }

    #[test]
    fn test_arith() {
        let mut stack = stack_of(&["6", "2"]);
        assert_eq!(stack.divide(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(3));
        assert_eq!(stack.len(), 1);

        let mut stack = stack_of(&["7", "2"]);
        assert_eq!(stack.minus(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(5));

        let mut stack = stack_of(&["2", "10"]);
        assert_eq!(stack.power(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(1024));
    }

    #[test]
    fn test_divide_by_zero() {
        for op in [Stack::divide, Stack::remainder, Stack::integer_divide] {
            let mut stack = stack_of(&["6", "0"]);
            assert_eq!(op(&mut stack), Err(CalcError::DivideByZero));
            assert_unchanged(&stack, &["6", "0"]);
        }
        let mut stack = stack_of(&["0"]);
        assert_eq!(stack.reciprocal(), Err(CalcError::DivideByZero));
        assert_unchanged(&stack, &["0"]);
    }

    #[test]
    fn test_integer_ops() {
        let mut stack = stack_of(&["-7", "2"]);
        assert_eq!(stack.integer_divide(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(-3));

        let mut stack = stack_of(&["7", "2"]);
        assert_eq!(stack.remainder(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(-1));

        let mut stack = stack_of(&["-2.75"]);
        assert_eq!(stack.integer_part(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(-2));

        let mut stack = stack_of(&["-2.75"]);
        assert_eq!(stack.fractional_part(), Ok(()));
        assert_eq!(stack.peek(), d("-0.75"));
    }

    #[test]
    fn test_xrooty() {
        let mut stack = stack_of(&["-8", "3"]);
        assert_eq!(stack.xrooty(), Err(CalcError::InvalidRoot));
        assert_unchanged(&stack, &["-8", "3"]);

        let mut stack = stack_of(&["8", "0"]);
        assert_eq!(stack.xrooty(), Err(CalcError::InvalidRoot));
        assert_unchanged(&stack, &["8", "0"]);

        let mut stack = stack_of(&["81", "4"]);
        assert_eq!(stack.xrooty(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::from(3)));
    }

    #[test]
    fn test_percent() {
        let mut stack = stack_of(&["80", "25"]);
        assert_eq!(stack.percent(), Ok(()));
        assert_unchanged(&stack, &["80", "20"]);

        let mut stack = stack_of(&["80", "25"]);
        stack.set_option(CalcOption::PercentLeavesY, false);
        assert_eq!(stack.percent(), Ok(()));
        assert_unchanged(&stack, &["20"]);

        let mut stack = stack_of(&["50", "75"]);
        assert_eq!(stack.percent_change(), Ok(()));
        assert_unchanged(&stack, &["50", "50"]);

        let mut stack = stack_of(&["0", "75"]);
        assert_eq!(stack.percent_change(), Err(CalcError::DivideByZero));
        assert_unchanged(&stack, &["0", "75"]);
    }

    #[test]
    fn test_logs() {
        for op in [Stack::log10, Stack::loge, Stack::log2] {
            let mut stack = stack_of(&["0"]);
            assert_eq!(op(&mut stack), Err(CalcError::InvalidLog));
            assert_unchanged(&stack, &["0"]);
            let mut stack = stack_of(&["-1"]);
            assert_eq!(op(&mut stack), Err(CalcError::InvalidLog));
        }
        let mut stack = stack_of(&["1024"]);
        assert_eq!(stack.log2(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::from(10)));
    }

    #[test]
    fn test_tan() {
        let mut stack = stack_of(&["90"]);
        assert_eq!(stack.tan(), Err(CalcError::InvalidTan));
        assert_unchanged(&stack, &["90"]);

        for angle in ["270", "-90", "450"] {
            let mut stack = stack_of(&[angle]);
            assert_eq!(stack.tan(), Err(CalcError::InvalidTan), "{}", angle);
        }

        let mut stack = stack_of(&["45"]);
        assert_eq!(stack.tan(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::one()));

        let mut stack = stack_of(&["180"]);
        assert_eq!(stack.tan(), Ok(()));
    }

    #[test]
    fn test_tan_radians() {
        let mut stack = Stack::new();
        stack.set_option(CalcOption::Radians, true);
        stack.push(half_pi());
        assert_eq!(stack.tan(), Err(CalcError::InvalidTan));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_trig_degrees() {
        let mut stack = stack_of(&["30"]);
        assert_eq!(stack.sin(), Ok(()));
        assert!(close(&stack.peek(), &d("0.5")));

        let mut stack = stack_of(&["0.5"]);
        assert_eq!(stack.inverse_cos(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::from(60)));

        let mut stack = stack_of(&["1.5"]);
        assert_eq!(stack.inverse_sin(), Err(CalcError::InvalidInverseTrig));
        assert_unchanged(&stack, &["1.5"]);
    }

    #[test]
    fn test_atan2() {
        let cases = [
            ("1", "1", "45"),
            ("1", "-1", "135"),
            ("-1", "-1", "-135"),
            ("1", "0", "90"),
            ("-1", "0", "-90"),
        ];
        for (y, x, expected) in cases {
            let mut stack = stack_of(&[y, x]);
            assert_eq!(stack.inverse_tan2(), Ok(()));
            assert!(close(&stack.peek(), &d(expected)), "{} {}", y, x);
        }
        let mut stack = stack_of(&["0", "0"]);
        assert_eq!(stack.inverse_tan2(), Err(CalcError::DivideByZero));
        assert_unchanged(&stack, &["0", "0"]);
    }

    #[test]
    fn test_atanh2() {
        let mut stack = stack_of(&["1", "0"]);
        assert_eq!(stack.inverse_tanh2(), Err(CalcError::DivideByZero));
        assert_unchanged(&stack, &["1", "0"]);

        let mut stack = stack_of(&["2", "2"]);
        assert_eq!(stack.inverse_tanh2(), Err(CalcError::DivideByZero));
        assert_unchanged(&stack, &["2", "2"]);

        let mut stack = stack_of(&["3", "1"]);
        assert_eq!(stack.inverse_tanh2(), Err(CalcError::InvalidInverseHypTrig));
        assert_unchanged(&stack, &["3", "1"]);

        let mut stack = stack_of(&["1", "2"]);
        assert_eq!(stack.inverse_tanh2(), Ok(()));
        assert!(close(&stack.peek(), &d("0.5").atanh()));
    }

    #[test]
    fn test_bitwise() {
        let mut stack = stack_of(&["12", "10"]);
        assert_eq!(stack.bitwise_and(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(8));

        let mut stack = stack_of(&["12", "10"]);
        assert_eq!(stack.bitwise_or(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(14));

        let mut stack = stack_of(&["12", "10"]);
        assert_eq!(stack.bitwise_xor(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(6));

        let mut stack = stack_of(&["0"]);
        stack.set_bit_count(BitCount::Bits8);
        assert_eq!(stack.bitwise_not(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(255));

        // operands are rounded, not truncated
        let mut stack = stack_of(&["2.6", "3"]);
        assert_eq!(stack.bitwise_and(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(3));
    }

    #[test]
    fn test_stack_ops() {
        let mut stack = stack_of(&["1", "2"]);
        assert_eq!(stack.swap(), Ok(()));
        assert_unchanged(&stack, &["2", "1"]);
        assert_eq!(stack.duplicate(), Ok(()));
        assert_unchanged(&stack, &["2", "1", "1"]);
        assert_eq!(stack.drop(), Ok(()));
        assert_eq!(stack.negate(), Ok(()));
        assert_unchanged(&stack, &["2", "-1"]);
    }

    #[test]
    fn test_unary() {
        let mut stack = stack_of(&["3"]);
        assert_eq!(stack.square(), Ok(()));
        assert_eq!(stack.cube(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(729));
        assert_eq!(stack.cube_root(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::from(9)));

        let mut stack = stack_of(&["3"]);
        assert_eq!(stack.twotox(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(8));
        assert_eq!(stack.tentox(), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(100_000_000));

        let mut stack = stack_of(&["1"]);
        assert_eq!(stack.etox(), Ok(()));
        assert!(close(&stack.peek(), &Decimal::e()));
    }

    #[test]
    fn test_random() {
        let mut stack = Stack::new();
        assert_eq!(stack.random(), Ok(()));
        let v = stack.peek();
        assert!(!v.is_negative());
        assert!(v < Decimal::from(32768));
    }

    #[test]
    fn test_hms() {
        let mut stack = stack_of(&["1.3"]);
        assert_eq!(stack.hms_to_hours(), Ok(()));
        assert!(close(&stack.peek(), &d("1.5")));

        let mut stack = stack_of(&["2.75"]);
        assert_eq!(stack.hours_to_hms(), Ok(()));
        assert!(close(&stack.peek(), &d("2.45")));

        let mut stack = stack_of(&["1.1"]);
        assert_eq!(stack.hours_to_hms(), Ok(()));
        assert!(close(&stack.peek(), &d("1.06")));

        let mut stack = stack_of(&["-1.5"]);
        assert_eq!(stack.hours_to_hm(), Ok(()));
        assert!(close(&stack.peek(), &d("-1.3")));

        let mut stack = stack_of(&["1.3"]);
        assert_eq!(stack.hm_to_hours(), Ok(()));
        assert!(close(&stack.peek(), &d("1.5")));
    }

    #[test]
    fn test_constants() {
        let mut stack = Stack::new();
        assert_eq!(stack.constant("Pi"), Ok(()));
        assert!(stack.peek().to_string().starts_with("3.14159265358979"));
        assert_eq!(stack.constant("SpeedofLightinVacuum"), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(299_792_458));
        assert_eq!(stack.constant("Unobtainium"), Err(CalcError::UnknownConstant));
        assert_eq!(stack.density("Water"), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(1000));
        assert_eq!(stack.density("Unobtainium"), Err(CalcError::UnknownConstant));
        assert_eq!(stack.len(), 3);
    }
}
