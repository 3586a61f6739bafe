use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use astro_float::{BigFloat, Consts, Radix, RoundingMode, Sign, INF_NEG, INF_POS, NAN, WORD_BIT_SIZE};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

use crate::config::CONTEXT;
use crate::errors::*;

// decimal exponents beyond these limits overflow to infinity or underflow to zero
const MAX_DECIMAL_EXP: i64 = 100_000_000;
// integer exponents up to this size are computed by exact multiplication
const MAX_INT_POWER: i64 = 1 << 20;

thread_local! {
    static CONSTS: RefCell<Option<Consts>> = RefCell::new(Consts::new().ok());
}

// The closure must not call back into with_consts
fn with_consts<R>(f: impl FnOnce(&mut Consts) -> R) -> Option<R> {
    CONSTS.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn p() -> usize {
    CONTEXT.precision
}

fn rm() -> RoundingMode {
    CONTEXT.rounding
}

fn big(i: i64, prec: usize) -> BigFloat {
    BigFloat::from_i64(i, prec)
}

// nearest integer, ties to even
fn round_half_even(q: &BigFloat, prec: usize) -> BigFloat {
    let f = q.floor();
    let diff = BigFloat::sub(q, &f, prec, rm());
    let half = BigFloat::from_f64(0.5, prec);
    match BigFloat::cmp(&diff, &half) {
        Some(c) if c < 0 => f,
        Some(c) if c > 0 => BigFloat::add(&f, &big(1, prec), prec, rm()),
        _ => {
            let halved = BigFloat::div(&f, &big(2, prec), prec, rm());
            if halved.fract().is_zero() {
                f
            } else {
                BigFloat::add(&f, &big(1, prec), prec, rm())
            }
        }
    }
}

// base^k by squaring
fn powi(base: &BigFloat, mut k: u64, prec: usize) -> BigFloat {
    let mut result = big(1, prec);
    let mut base = base.clone();
    while k > 0 {
        if k & 1 == 1 {
            result = BigFloat::mul(&result, &base, prec, rm());
        }
        k >>= 1;
        if k > 0 {
            base = BigFloat::mul(&base, &base, prec, rm());
        }
    }
    result
}

/// A decimal literal split into its parts: the value is
/// `digits * 10^exp`, negated when `negative` is set
struct Literal {
    negative: bool,
    digits: Vec<u8>,
    exp: i64,
}

impl Literal {
    // [+-] digits [. digits] [(e|E) [+-] digits], at least one mantissa digit
    fn scan(s: &str) -> Option<Literal> {
        let bytes = s.as_bytes();
        let mut pos = 0;
        let mut negative = false;
        if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
            negative = bytes[pos] == b'-';
            pos += 1;
        }

        let mut digits = Vec::new();
        let mut frac_len: i64 = 0;
        let mut seen_digit = false;
        let mut seen_point = false;
        while pos < bytes.len() {
            let c = bytes[pos];
            if c.is_ascii_digit() {
                seen_digit = true;
                if !(digits.is_empty() && c == b'0') {
                    digits.push(c - b'0');
                }
                if seen_point {
                    frac_len += 1;
                }
            } else if c == b'.' && !seen_point {
                seen_point = true;
            } else {
                break;
            }
            pos += 1;
        }
        if !seen_digit {
            return None;
        }

        let mut exp: i64 = 0;
        if pos < bytes.len() {
            if bytes[pos] != b'e' && bytes[pos] != b'E' {
                return None;
            }
            pos += 1;
            let mut exp_neg = false;
            if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
                exp_neg = bytes[pos] == b'-';
                pos += 1;
            }
            if pos == bytes.len() {
                return None;
            }
            while pos < bytes.len() {
                let c = bytes[pos];
                if !c.is_ascii_digit() {
                    return None;
                }
                exp = exp.saturating_mul(10).saturating_add((c - b'0') as i64);
                pos += 1;
            }
            if exp_neg {
                exp = -exp;
            }
        }

        // leading zeros were skipped, so fraction digits that were zeros
        // before the first significant digit are not in `digits` but still
        // count in frac_len
        Some(Literal {
            negative,
            digits,
            exp: exp.saturating_sub(frac_len),
        })
    }

    // scientific form `[-]0.ddd e<exp>` that BigFloat::parse reads
    fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.digits.len() + 24);
        if self.negative {
            out.push('-');
        }
        out.push_str("0.");
        out.extend(self.digits.iter().map(|d| (b'0' + d) as char));
        let magnitude = self.exp.saturating_add(self.digits.len() as i64);
        out.push_str(&format!("e{}", magnitude));
        out
    }

    fn into_decimal(self) -> Decimal {
        if self.digits.is_empty() {
            return Decimal::zero();
        }
        let magnitude = self.exp.saturating_add(self.digits.len() as i64);
        let value = if magnitude > MAX_DECIMAL_EXP {
            if self.negative {
                INF_NEG
            } else {
                INF_POS
            }
        } else if magnitude < -MAX_DECIMAL_EXP {
            big(0, p())
        } else {
            let text = self.normalized();
            with_consts(|cc| BigFloat::parse(&text, Radix::Dec, p(), rm(), cc)).unwrap_or(NAN)
        };
        Decimal::wrap(value)
    }
}

/// Arbitrary precision real number. All instances share the precision and
/// rounding mode of the process-wide `NumericContext`.
#[derive(Clone, Debug)]
pub struct Decimal {
    value: BigFloat,
    prec: usize,
}

macro_rules! transcendental_fn {
    ($($id:ident),+) => {
        $(
            pub fn $id(&self) -> Decimal {
                self.with_cc(|v, cc| v.$id(p(), rm(), cc))
            }
        )+
    };
}

macro_rules! rounding_fn {
    ($($id:ident => $inner:ident),+) => {
        $(
            pub fn $id(&self) -> Decimal {
                Decimal::wrap(self.value.$inner())
            }
        )+
    };
}

impl Decimal {
    fn wrap(value: BigFloat) -> Decimal {
        Decimal { value, prec: p() }
    }

    fn with_cc(&self, f: impl FnOnce(&BigFloat, &mut Consts) -> BigFloat) -> Decimal {
        Decimal::wrap(with_consts(|cc| f(&self.value, cc)).unwrap_or(NAN))
    }

    pub fn from_i64(i: i64) -> Decimal {
        Decimal::wrap(big(i, p()))
    }

    pub fn from_f64(f: f64) -> Decimal {
        Decimal::wrap(BigFloat::from_f64(f, p()))
    }

    pub fn nan() -> Decimal {
        Decimal::wrap(NAN)
    }

    pub fn infinity(negative: bool) -> Decimal {
        Decimal::wrap(if negative { INF_NEG } else { INF_POS })
    }

    /// Parses a base 10 literal: optional sign, digits with an optional
    /// fraction, optional exponent. `inf`, `-inf` and `nan` are accepted
    /// so that everything `to_string` produces reads back.
    pub fn parse(s: &str) -> CalcResult {
        match s {
            "nan" | "-nan" | "NaN" => return Ok(Decimal::nan()),
            "inf" | "+inf" | "Inf" => return Ok(Decimal::infinity(false)),
            "-inf" | "-Inf" => return Ok(Decimal::infinity(true)),
            _ => {}
        }
        Literal::scan(s)
            .map(Literal::into_decimal)
            .ok_or_else(|| CalcError::InvalidNumber(s.to_string()))
    }

    /// For literals written in the source: a malformed one gives NaN
    pub(crate) fn literal(s: &str) -> Decimal {
        Decimal::parse(s).unwrap_or_else(|_| Decimal::nan())
    }

    /// Checks the syntax only, nothing is computed
    pub fn is_valid_string(s: &str) -> bool {
        matches!(s, "nan" | "-nan" | "NaN" | "inf" | "+inf" | "Inf" | "-inf" | "-Inf") || Literal::scan(s).is_some()
    }

    pub fn pi() -> Decimal {
        Decimal::wrap(with_consts(|cc| cc.pi(p(), rm())).unwrap_or(NAN))
    }

    pub fn e() -> Decimal {
        Decimal::wrap(with_consts(|cc| cc.e(p(), rm())).unwrap_or(NAN))
    }

    /// Three-way comparison. NaN compares equal to everything here, use
    /// `partial_cmp` to tell it apart.
    pub fn compare(&self, other: &Decimal) -> Ordering {
        match BigFloat::cmp(&self.value, &other.value) {
            Some(c) if c < 0 => Ordering::Less,
            Some(c) if c > 0 => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.value.is_inf()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_nan() && !self.is_zero() && self.value.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_nan() && !self.is_zero() && !self.value.is_negative()
    }

    /// IEEE remainder: `self - n * other` where n is `self / other`
    /// rounded to the nearest integer, ties to even
    pub fn remainder(&self, other: &Decimal) -> Decimal {
        if self.is_nan() || other.is_nan() || self.is_infinite() || other.is_zero() {
            return Decimal::nan();
        }
        if other.is_infinite() {
            return self.clone();
        }
        let wide = p() * 2;
        let q = BigFloat::div(&self.value, &other.value, wide, rm());
        let n = round_half_even(&q, wide);
        let prod = BigFloat::mul(&n, &other.value, wide, rm());
        Decimal::wrap(BigFloat::sub(&self.value, &prod, p(), rm()))
    }

    /// Nearest integer, ties to even
    pub fn round(&self) -> Decimal {
        if self.is_nan() || self.is_infinite() {
            return self.clone();
        }
        Decimal::wrap(round_half_even(&self.value, p()))
    }

    rounding_fn!(floor => floor, ceil => ceil, trunc => int);

    pub fn fract(&self) -> Decimal {
        Decimal::wrap(self.value.fract())
    }

    pub fn abs(&self) -> Decimal {
        Decimal::wrap(self.value.abs())
    }

    pub fn is_integer(&self) -> bool {
        !self.is_nan() && !self.is_infinite() && self.value.fract().is_zero()
    }

    pub fn pow(&self, exponent: &Decimal) -> Decimal {
        if exponent.is_zero() {
            return Decimal::one();
        }
        if self.is_zero() {
            return if exponent.is_negative() {
                Decimal::infinity(false)
            } else {
                Decimal::zero()
            };
        }
        if let Some(n) = exponent.small_integer() {
            let wide = p() + 64;
            let r = powi(&self.value, n.unsigned_abs(), wide);
            return if n < 0 {
                Decimal::wrap(BigFloat::div(&big(1, wide), &r, p(), rm()))
            } else {
                Decimal::wrap(BigFloat::mul(&r, &big(1, wide), p(), rm()))
            };
        }
        self.with_cc(|v, cc| v.pow(&exponent.value, p(), rm(), cc))
    }

    // integral values small enough for repeated squaring
    fn small_integer(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        let limit = Decimal::from(MAX_INT_POWER);
        if self.abs().compare(&limit) == Ordering::Greater {
            return None;
        }
        Some(self.to_i64())
    }

    pub fn sqrt(&self) -> Decimal {
        Decimal::wrap(self.value.sqrt(p(), rm()))
    }

    pub fn cbrt(&self) -> Decimal {
        if self.is_negative() {
            return -Decimal::wrap(self.abs().value.cbrt(p(), rm()));
        }
        Decimal::wrap(self.value.cbrt(p(), rm()))
    }

    /// `self^(1/n)`; the reciprocal is rounded before the power is taken
    pub fn root(&self, n: &Decimal) -> Decimal {
        let inv = &Decimal::one() / n;
        self.pow(&inv)
    }

    transcendental_fn!(sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh, ln, log10);

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Integer part (truncated toward zero), `None` for NaN and infinities
    pub fn to_bigint(&self) -> Option<BigInt> {
        if self.is_nan() || self.is_infinite() {
            return None;
        }
        let t = self.trunc();
        if t.is_zero() {
            return Some(BigInt::zero());
        }
        let (negative, raw, point) = t.decimal_digits()?;
        let (digits, exp) = round_digits(&raw, point, CONTEXT.print_digits);
        if exp < 0 {
            return Some(BigInt::zero());
        }
        let len = exp as usize + 1;
        let mut s: String = digits.iter().take(len).map(|d| (b'0' + d) as char).collect();
        while s.len() < len {
            s.push('0');
        }
        let v = BigInt::parse_bytes(s.as_bytes(), 10)?;
        Some(if negative { -v } else { v })
    }

    /// Truncates toward zero, saturating at the i64 range; NaN gives 0
    pub fn to_i64(&self) -> i64 {
        if self.is_nan() {
            return 0;
        }
        if self.compare(&Decimal::from(i64::MAX)) != Ordering::Less {
            return i64::MAX;
        }
        if self.compare(&Decimal::from(i64::MIN)) != Ordering::Greater {
            return i64::MIN;
        }
        self.to_bigint().and_then(|b| b.to_i64()).unwrap_or(0)
    }

    /// Drops the two lowest mantissa bits and rounds the value to fit.
    /// Only the hours/minutes/seconds conversions use it, to hide the
    /// last-bit noise that repeated floor and subtract steps accumulate.
    pub(crate) fn reduce_precision(&mut self) {
        if self.prec <= 2 {
            return;
        }
        let prec = self.prec - 2;
        if self.value.set_precision(prec, rm()).is_ok() {
            self.prec = prec;
        }
    }

    // sign, significant digits without leading zeros and the decimal
    // exponent of the first digit; taken one word wider than the stored
    // mantissa so there are digits left over for rounding
    fn decimal_digits(&self) -> Option<(bool, Vec<u8>, i64)> {
        let mut wide = self.value.clone();
        wide.set_precision(CONTEXT.stored_bits + WORD_BIT_SIZE, rm()).ok()?;
        let (sign, raw, exp) = with_consts(|cc| wide.convert_to_radix(Radix::Dec, rm(), cc))?.ok()?;
        let start = raw.iter().position(|d| *d != 0)?;
        Some((sign == Sign::Neg, raw[start..].to_vec(), exp as i64 - 1 - start as i64))
    }

    // %.256g output, widened a digit at a time up to print_digits until
    // it reads back as the same value
    fn shortest_exact(&self) -> Option<String> {
        let (negative, raw, point) = self.decimal_digits()?;
        let mut last = None;
        for limit in CONTEXT.digits..=CONTEXT.print_digits {
            let (digits, point) = round_digits(&raw, point, limit);
            let text = format_general(negative, &digits, point);
            if Decimal::parse(&text).map_or(false, |back| back.compare(self) == Ordering::Equal) {
                return Some(text);
            }
            last = Some(text);
        }
        last
    }
}

// at most `limit` significant digits, ties to even, trailing zeros removed
fn round_digits(raw: &[u8], mut point: i64, limit: usize) -> (Vec<u8>, i64) {
    let mut digits = raw.to_vec();
    if digits.len() > limit {
        let rest = &digits[limit..];
        let first = rest[0];
        let tail_nonzero = rest[1..].iter().any(|d| *d != 0);
        let round_up = first > 5 || (first == 5 && (tail_nonzero || digits[limit - 1] % 2 == 1));
        digits.truncate(limit);
        if round_up {
            let mut i = limit;
            loop {
                if i == 0 {
                    digits.insert(0, 1);
                    digits.truncate(limit);
                    point += 1;
                    break;
                }
                i -= 1;
                if digits[i] == 9 {
                    digits[i] = 0;
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }
    }
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    (digits, point)
}

// printf("%.256g") layout of already rounded digits
fn format_general(negative: bool, digits: &[u8], point: i64) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let chars: Vec<char> = digits.iter().map(|d| (b'0' + d) as char).collect();
    if point < -4 || point >= CONTEXT.digits as i64 {
        out.push(chars[0]);
        if chars.len() > 1 {
            out.push('.');
            out.extend(&chars[1..]);
        }
        let sign = if point < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", sign, point.abs()));
    } else if point < 0 {
        out.push_str("0.");
        for _ in 0..(-point - 1) {
            out.push('0');
        }
        out.extend(&chars);
    } else {
        let int_len = point as usize + 1;
        for i in 0..int_len {
            out.push(*chars.get(i).unwrap_or(&'0'));
        }
        if chars.len() > int_len {
            out.push('.');
            out.extend(&chars[int_len..]);
        }
    }
    out
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_nan() {
            return write!(f, "nan");
        }
        if self.is_infinite() {
            return write!(f, "{}", if self.value.is_negative() { "-inf" } else { "inf" });
        }
        if self.is_zero() {
            return write!(f, "0");
        }
        match self.shortest_exact() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{}", self.value),
        }
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl From<i64> for Decimal {
    fn from(i: i64) -> Self {
        Decimal::from_i64(i)
    }
}

impl From<i32> for Decimal {
    fn from(i: i32) -> Self {
        Decimal::from_i64(i as i64)
    }
}

impl From<f64> for Decimal {
    fn from(f: f64) -> Self {
        Decimal::from_f64(f)
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Decimal::from_i64(0)
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl One for Decimal {
    fn one() -> Self {
        Decimal::from_i64(1)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(self.compare(other))
    }
}

macro_rules! binary_op {
    ($tr:ident, $method:ident, $inner:expr) => {
        impl<'a, 'b> $tr<&'b Decimal> for &'a Decimal {
            type Output = Decimal;
            fn $method(self, rhs: &'b Decimal) -> Decimal {
                Decimal::wrap($inner(&self.value, &rhs.value, p(), rm()))
            }
        }
        impl<'b> $tr<&'b Decimal> for Decimal {
            type Output = Decimal;
            fn $method(self, rhs: &'b Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }
        impl $tr<Decimal> for Decimal {
            type Output = Decimal;
            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }
    };
}

binary_op!(Add, add, BigFloat::add);
binary_op!(Sub, sub, BigFloat::sub);
binary_op!(Mul, mul, BigFloat::mul);
binary_op!(Div, div, BigFloat::div);

impl<'a, 'b> Rem<&'b Decimal> for &'a Decimal {
    type Output = Decimal;
    fn rem(self, rhs: &'b Decimal) -> Decimal {
        self.remainder(rhs)
    }
}

impl Rem<Decimal> for Decimal {
    type Output = Decimal;
    fn rem(self, rhs: Decimal) -> Decimal {
        self.remainder(&rhs)
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        Decimal::wrap(BigFloat::mul(&self.value, &big(-1, p()), p(), rm()))
    }
}

impl Neg for Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        -&self
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Decimal::parse(&s).map_err(serde::de::Error::custom)
    }
}
