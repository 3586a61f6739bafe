use lazy_static::lazy_static;

use crate::decimal::Decimal;
use crate::errors::*;
use crate::stack::Stack;

/// A unit prefix: `base^power`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefix {
    pub name: &'static str,
    pub symbol: &'static str,
    pub base: i64,
    pub power: i64,
}

impl Prefix {
    pub fn multiplier(&self) -> Decimal {
        Decimal::from(self.base).pow(&Decimal::from(self.power))
    }
}

macro_rules! prefixes {
    ($base:expr; $($name:literal, $symbol:literal, $power:expr);+ $(;)?) => {
        vec![$(Prefix { name: $name, symbol: $symbol, base: $base, power: $power }),+]
    };
}

lazy_static! {
    pub static ref DECIMAL_PREFIXES: Vec<Prefix> = prefixes![10;
        "Yocto", "y", -24;
        "Zepto", "z", -21;
        "Atto", "a", -18;
        "Femto", "f", -15;
        "Pico", "p", -12;
        "Nano", "n", -9;
        "Micro", "µ", -6;
        "Milli", "m", -3;
        "Kilo", "k", 3;
        "Mega", "M", 6;
        "Giga", "G", 9;
        "Tera", "T", 12;
        "Peta", "P", 15;
        "Exa", "E", 18;
        "Zetta", "Z", 21;
        "Yotta", "Y", 24;
    ];

    pub static ref BINARY_PREFIXES: Vec<Prefix> = prefixes![2;
        "Kibi", "Ki", 10;
        "Mebi", "Mi", 20;
        "Gibi", "Gi", 30;
        "Tebi", "Ti", 40;
        "Pebi", "Pi", 50;
        "Exbi", "Ei", 60;
    ];
}

/// Looks a prefix up by its full name first, then by its symbol
pub fn find_prefix(name: &str) -> Option<Prefix> {
    let all = || DECIMAL_PREFIXES.iter().chain(BINARY_PREFIXES.iter());
    all()
        .find(|p| p.name == name)
        .or_else(|| all().find(|p| p.symbol == name))
        .copied()
}

impl Stack {
    /// Scales X by the named prefix, `Kilo` or `k` multiplies by 1000
    pub fn si_prefix(&mut self, name: &str) -> CalcErrorResult {
        let prefix = find_prefix(name).ok_or(CalcError::UnknownSI)?;
        let x = self.pop();
        self.push(&x * &prefix.multiplier());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefix() {
        assert_eq!(find_prefix("Kilo").map(|p| p.power), Some(3));
        assert_eq!(find_prefix("k").map(|p| p.name), Some("Kilo"));
        assert_eq!(find_prefix("Ki").map(|p| p.name), Some("Kibi"));
        assert_eq!(find_prefix("Pi").map(|p| p.name), Some("Pebi"));
        assert_eq!(find_prefix("kilo"), None);
    }

    #[test]
    fn test_si_prefix() {
        let mut stack = Stack::new();
        stack.push(Decimal::from(3));
        assert_eq!(stack.si_prefix("Kilo"), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(3000));
        assert_eq!(stack.si_prefix("Ki"), Ok(()));
        assert_eq!(stack.peek(), Decimal::from(3_072_000));
        assert_eq!(stack.si_prefix("Milli"), Ok(()));
        assert_eq!(stack.peek().to_string(), "3072");
    }

    #[test]
    fn test_unknown_prefix() {
        let mut stack = Stack::new();
        stack.push(Decimal::from(3));
        assert_eq!(stack.si_prefix("Kilogram"), Err(CalcError::UnknownSI));
        assert_eq!(stack.stack_for_display(), vec![Decimal::from(3)]);
    }
}
