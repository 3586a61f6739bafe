use arpcalc_core::{CalcError, CalcOption, ConversionGraph, Decimal, Stack};
use num_traits::Zero;
use proptest::prelude::*;

fn decimal_string() -> impl Strategy<Value = String> {
    (any::<bool>(), 0u64..1_000_000_000, 0u32..1_000_000, -40i32..40).prop_map(|(neg, int, frac, exp)| {
        format!("{}{}.{:06}e{}", if neg { "-" } else { "" }, int, frac, exp)
    })
}

fn long_decimal_string() -> impl Strategy<Value = String> {
    ("-?[1-9][0-9]{0,3}", "[0-9]{257,300}", -400i32..400).prop_map(|(int, frac, exp)| format!("{}.{}e{}", int, frac, exp))
}

// quotients, roots and transcendental results use every mantissa bit
fn computed_value() -> impl Strategy<Value = Decimal> {
    (1i64..100_000, 1i64..100_000, 0usize..4).prop_map(|(a, b, kind)| {
        let (a, b) = (Decimal::from(a), Decimal::from(b));
        match kind {
            0 => &a / &b,
            1 => (&a / &b).sqrt(),
            2 => a.ln() / b,
            _ => &Decimal::pi() * &(&a / &b),
        }
    })
}

fn reads_back(v: &Decimal) -> bool {
    Decimal::parse(&v.to_string()).map_or(false, |back| back.compare(v) == std::cmp::Ordering::Equal)
}

fn small_value() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000).prop_map(Decimal::from)
}

fn close(a: &Decimal, b: &Decimal) -> bool {
    let scale = if b.abs() > Decimal::from(1) { b.abs() } else { Decimal::from(1) };
    (a - b).abs() / scale < Decimal::from(10).pow(&Decimal::from(-60))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_string_round_trip(s in decimal_string()) {
        let v = Decimal::parse(&s).unwrap();
        let printed = v.to_string();
        let back = Decimal::parse(&printed).unwrap();
        prop_assert_eq!(v.compare(&back), std::cmp::Ordering::Equal, "{} printed as {}", s, printed);
        prop_assert!(Decimal::is_valid_string(&printed));
    }

    #[test]
    fn prop_long_string_round_trip(s in long_decimal_string()) {
        let v = Decimal::parse(&s).unwrap();
        prop_assert!(reads_back(&v), "{} printed as {}", s, v);
    }

    #[test]
    fn prop_computed_round_trip(v in computed_value()) {
        prop_assert!(reads_back(&v), "{} does not read back", v);
    }

    #[test]
    fn prop_underflow_yields_zero(pops in 1usize..20) {
        let mut stack = Stack::new();
        for _ in 0..pops {
            prop_assert_eq!(stack.pop(), Decimal::zero());
            prop_assert_eq!(stack.peek(), Decimal::zero());
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn prop_replicating_depth(ops in proptest::collection::vec(any::<Option<i64>>(), 0..40)) {
        let mut stack = Stack::new();
        stack.set_option(CalcOption::ReplicateStack, true);
        for op in ops {
            match op {
                Some(v) => stack.push(Decimal::from(v)),
                None => {
                    stack.pop();
                }
            }
            prop_assert!(stack.len() <= 4);
        }
    }

    #[test]
    fn prop_undo_restores(values in proptest::collection::vec(small_value(), 0..8), extra in small_value()) {
        let mut stack = Stack::new();
        stack.push_all(values);
        let before = stack.stack_for_display();
        stack.save_history();
        stack.push(extra);
        let _ = stack.plus();
        prop_assert_eq!(stack.undo(), Ok(()));
        prop_assert_eq!(stack.stack_for_display(), before);
    }

    #[test]
    fn prop_divide_by_zero_rolls_back(values in proptest::collection::vec(small_value(), 0..6)) {
        let mut stack = Stack::new();
        stack.push_all(values);
        stack.push(Decimal::zero());
        let before = stack.stack_for_display();
        prop_assert_eq!(stack.divide(), Err(CalcError::DivideByZero));
        prop_assert_eq!(stack.stack_for_display(), before.clone());
        prop_assert_eq!(stack.reciprocal(), Err(CalcError::DivideByZero));
        prop_assert_eq!(stack.stack_for_display(), before);
    }

    #[test]
    fn prop_inches_round_trip(v in small_value()) {
        let graph = ConversionGraph::new();
        let mut stack = Stack::new();
        stack.push(v.clone());
        prop_assert_eq!(graph.convert(&mut stack, "Distance", "Inches", "Millimetres"), Ok(()));
        prop_assert_eq!(graph.convert(&mut stack, "Distance", "Millimetres", "Inches"), Ok(()));
        prop_assert!(close(&stack.peek(), &v));
    }

    #[test]
    fn prop_same_unit_is_identity(v in small_value(), category in "[A-Za-z ]{0,12}", unit in "[A-Za-z ]{0,12}") {
        let graph = ConversionGraph::new();
        let mut stack = Stack::new();
        stack.push(v.clone());
        prop_assert_eq!(graph.convert(&mut stack, &category, &unit, &unit), Ok(()));
        prop_assert_eq!(stack.stack_for_display(), vec![v]);
    }
}
