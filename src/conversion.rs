//! Unit conversions. Every category is a directed graph of units, and a
//! conversion between two units walks the first path found by a depth first
//! search, applying each edge to X in turn. A failing edge puts the whole
//! stack back the way it was.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;

use crate::decimal::Decimal;
use crate::errors::*;
use crate::stack::Stack;

/// Category that `register_currencies` fills in
pub const CURRENCY_CATEGORY: &str = "Currency";
/// All currency rates are relative to this unit
pub const BASE_CURRENCY: &str = "Euros";

lazy_static! {
    /// ISO code to the unit name used in the currency category
    pub static ref CURRENCIES: BTreeMap<&'static str, &'static str> = [
        ("AUD", "Australian Dollars"),
        ("BGN", "Bulgarian Levs"),
        ("BRL", "Brazilian Real"),
        ("CAD", "Canadian Dollars"),
        ("CHF", "Swiss Francs"),
        ("CNY", "Chinese Yuan"),
        ("CZK", "Czech Koruna"),
        ("DKK", "Danish Krone"),
        ("EUR", "Euros"),
        ("GBP", "GB Pounds"),
        ("HKD", "Hong Kong Dollars"),
        ("HRK", "Croatian Kuna"),
        ("HUF", "Hungarian Forint"),
        ("IDR", "Indonesian Rupiah"),
        ("ILS", "Israeli New Shekels"),
        ("INR", "Indian Rupees"),
        ("ISK", "Icelandic Krona"),
        ("JPY", "Japanese Yen"),
        ("KRW", "South Korean Won"),
        ("MXN", "Mexican Pesos"),
        ("MYR", "Malaysian Ringgit"),
        ("NOK", "Norwegian Krone"),
        ("NZD", "New Zealand Dollars"),
        ("PHP", "Philippine Pesos"),
        ("PLN", "Polish Złoty"),
        ("RON", "Romanian Leu"),
        ("RUB", "Russian Rubles"),
        ("SEK", "Swedish Krona"),
        ("SGD", "Singapore Dollars"),
        ("THB", "Thai Baht"),
        ("TRY", "Turkish Lira"),
        ("USD", "US Dollars"),
        ("ZAR", "South African Rand"),
    ]
    .into_iter()
    .collect();

    static ref UNIT_SYMBOLS: HashMap<&'static str, &'static str> = [
        ("Acres", "ac"),
        ("Angstroms", "Å"),
        ("Atmosphere", "atm"),
        ("Bar", "bar"),
        ("Bytes", "B"),
        ("Calories", "cal"),
        ("Calories Per Second", "cal/s"),
        ("Celsius", "°C"),
        ("Centimetres", "cm"),
        ("Chains", "ch"),
        ("Cubic Centimetres", "cc"),
        ("Cubic Decimetres", "dm³"),
        ("Cubic Feet", "cu ft"),
        ("Cubic Inches", "cu in"),
        ("Cubic Metres", "m³"),
        ("Cubic Millimetres", "mm³"),
        ("Cubic Yards", "cu yd"),
        ("Date in Year", "D.M(Y)"),
        ("Day of Year", "N.(Y)"),
        ("Days", "days"),
        ("Degrees", "deg"),
        ("Degrees.Minutes", "D.M"),
        ("Degrees.Minutes-Seconds", "DMS"),
        ("Fahrenheit", "°F"),
        ("Fathoms", "fm"),
        ("Feet", "ft"),
        ("Feet Per Second", "ft/s"),
        ("Fluid Ounces", "fl.oz"),
        ("Furlongs", "furlongs"),
        ("Gallons", "gal"),
        ("Gibibytes", "GiB"),
        ("Gigabytes", "GB"),
        ("Gram-Force", "gf"),
        ("Gram-Force Centimetres", "gf cm"),
        ("Gram-Force Metres", "gf m"),
        ("Gram-Force Millimetres", "gf mm"),
        ("Grams", "g"),
        ("Hectares", "ha"),
        ("Hectopascal", "hPa"),
        ("Hertz", "Hz"),
        ("Horsepower (Mech)", "hp(mech)"),
        ("Horsepower (Metric)", "hp(met)"),
        ("Hours", "hr"),
        ("Hours.Minutes-Seconds", "HMS"),
        ("Hundredweight", "cwt"),
        ("Inches", "in"),
        ("Inches of Mercury", "in Hg"),
        ("Joules", "J"),
        ("Kelvin", "K"),
        ("Kibibytes", "KiB"),
        ("Kilobytes", "kB"),
        ("Kilocalories", "kcal"),
        ("Kilogram-Force", "kgf"),
        ("Kilogram-Force Centimetres", "kgf cm"),
        ("Kilogram-Force Metres", "kgf m"),
        ("Kilogram-Force Millimetres", "kgf mm"),
        ("Kilograms", "kg"),
        ("Kilograms Per Sq. cm", "kg/cm²"),
        ("Kilojoules", "kJ"),
        ("Kilometres", "km"),
        ("Kilometres Per Hour", "km/h"),
        ("Kilometres Per Litre", "km/l"),
        ("Kilonewtons", "kN"),
        ("Kilopascal", "kPa"),
        ("Kilowatt-Hours", "kWh"),
        ("Kilowatts", "kW"),
        ("Knots", "kt"),
        ("Light Years", "ly"),
        ("Litres", "l"),
        ("Litres Per 100 Kilometres", "l/100 km"),
        ("Mebibytes", "MiB"),
        ("Megabytes", "MB"),
        ("Megajoules", "MJ"),
        ("Megapascal", "MPa"),
        ("Megawatts", "MW"),
        ("Metres", "m"),
        ("Metres Per Hour", "m/hr"),
        ("Metres Per Second", "m/s"),
        ("Microgram", "µg"),
        ("Micrometres", "µm"),
        ("Micronewtons", "µN"),
        ("Microns", "µm"),
        ("Microseconds", "µs"),
        ("Miles", "miles"),
        ("Miles Per Gallon", "mpg"),
        ("Miles Per Hour", "mph"),
        ("Miles Per Litre", "mpl"),
        ("Miles Per US Gallon", "mpg(US)"),
        ("Millibar", "mbar"),
        ("Milligrams", "mg"),
        ("Millilitres", "ml"),
        ("Millimetres", "mm"),
        ("Millinewtons", "mN"),
        ("Milliseconds", "ms"),
        ("Mils", "mil"),
        ("Minutes", "min"),
        ("Nanometres", "nm"),
        ("Nanoseconds", "ns"),
        ("Nautical Miles", "NM"),
        ("Newton Centimetres", "N cm"),
        ("Newton Metres", "Nm"),
        ("Newton Millimetres", "N mm"),
        ("Newtons", "N"),
        ("Ounce-Force", "ozf"),
        ("Ounce-Force Feet", "ozf-ft"),
        ("Ounce-Force Inches", "ozf-in"),
        ("Ounces", "oz"),
        ("Pascal", "Pa"),
        ("Pints", "pt"),
        ("Points", "pt"),
        ("Pound-Force", "lbf"),
        ("Pound-Force Feet", "lbf ft"),
        ("Pound-Force Inches", "lbf in"),
        ("Pounds", "lb"),
        ("Pounds Per Sq. Inch", "psi"),
        ("RPM", "RPM"),
        ("Radians", "rad"),
        ("Radians Per Second", "rad/s"),
        ("Seconds", "s"),
        ("Sq. Centimetres", "cm²"),
        ("Sq. Feet", "sq ft"),
        ("Sq. Inches", "sq in"),
        ("Sq. Kilometres", "km²"),
        ("Sq. Metres", "m²"),
        ("Sq. Miles", "sq mi"),
        ("Sq. Millimetres", "mm²"),
        ("Sq. Yards", "sq yd"),
        ("Stone", "st"),
        ("Tebibytes", "TiB"),
        ("Terabytes", "TB"),
        ("Thou", "th"),
        ("Tonnes", "t"),
        ("Tons", "ton"),
        ("Torr", "Torr"),
        ("US Fluid Ounces", "fl.oz(US)"),
        ("US Gallons", "gal(US)"),
        ("US Hundredweight", "cwt(US)"),
        ("US Pints", "pt(US)"),
        ("US Tons", "ton(US)"),
        ("Watts", "W"),
        ("Weeks", "wk"),
        ("Yards", "yd"),
    ]
    .into_iter()
    .collect();
}

// month lengths with a 29 day February; non leap years are corrected after
const DAYS_IN_MONTH: [i64; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
// day 59 is the 28th of February
const LAST_DAY_BEFORE_LEAP: i64 = 59;
const MAX_DAY_OF_YEAR: i64 = 366;
// years below this are taken as "no year given"
const MIN_EXPLICIT_YEAR: i64 = 1900;

/// Conversions that are not a plain scale factor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomConversion {
    Identity,
    KelvinToCelsius,
    CelsiusToKelvin,
    FahrenheitToCelsius,
    CelsiusToFahrenheit,
    PintsToGallons,
    GallonsToPints,
    UkPintsToLitres,
    LitresToUkPints,
    UsPintsToLitres,
    LitresToUsPints,
    InchesToMillimetres,
    MillimetresToInches,
    RadiansToDegrees,
    DegreesToRadians,
    OuncesToGrams,
    GramsToOunces,
    GramsToKilograms,
    KilogramsToGrams,
    KilogramsToPounds,
    PoundsToKilograms,
    KilogramsToStone,
    StoneToKilograms,
    NewtonMetresToPoundFeet,
    PoundFeetToNewtonMetres,
    RpmToHertz,
    HertzToRpm,
    RadPerSecToHertz,
    HertzToRadPerSec,
    MphToFeetPerSecond,
    FeetPerSecondToMph,
    MphToKmh,
    KmhToMph,
    MpgToMpl,
    MplToMpg,
    MpgToUsMpg,
    UsMpgToMpg,
    KmplToMpl,
    MplToKmpl,
    KmplToLitresPer100Km,
    LitresPer100KmToKmpl,
    HoursToHms,
    HmsToHours,
    HoursToHm,
    HmToHours,
    DayOfYearToDate,
    DateToDayOfYear,
}

/// How one edge of the graph changes X
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConversionKind {
    /// X * factor
    Multiplier(f64),
    /// X / factor, the exact inverse of `Multiplier` with the same factor
    Divisor(f64),
    Custom(CustomConversion),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub kind: ConversionKind,
}

impl Conversion {
    pub fn new(from: &str, to: &str, kind: ConversionKind) -> Conversion {
        Conversion {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }
}

// "A" => "B": kind
macro_rules! edges {
    ($($from:literal => $to:literal : $kind:expr),+ $(,)?) => {
        vec![$(Conversion::new($from, $to, $kind)),+]
    };
}

// factors are written as decimal literals, take them as such instead of
// their nearest binary value
fn factor(f: f64) -> Decimal {
    Decimal::parse(&f.to_string()).unwrap_or_else(|_| Decimal::from_f64(f))
}

fn multiply(stack: &mut Stack, by: Decimal) -> CalcErrorResult {
    let x = stack.pop();
    stack.push(x * by);
    Ok(())
}

fn divide(stack: &mut Stack, by: Decimal) -> CalcErrorResult {
    let x = stack.pop();
    stack.push(x / by);
    Ok(())
}

// X * num / den, for ratios that have no short decimal form
fn ratio(stack: &mut Stack, num: i64, den: i64) -> CalcErrorResult {
    let x = stack.pop();
    stack.push(x * Decimal::from(num) / Decimal::from(den));
    Ok(())
}

fn offset(stack: &mut Stack, by: Decimal) -> CalcErrorResult {
    let x = stack.pop();
    stack.push(x + by);
    Ok(())
}

// 1/x * 100 either way round
fn per_hundred(stack: &mut Stack) -> CalcErrorResult {
    let x = stack.pop();
    if x.is_zero() {
        stack.push(x);
        return Err(CalcError::DivideByZero);
    }
    stack.push(Decimal::from(100) / x);
    Ok(())
}

fn this_year() -> i64 {
    i64::from(Local::now().year())
}

fn is_leap(year: i64) -> bool {
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 2, 29))
        .is_some()
}

// X * scale as a whole number, None when it does not fit
fn scaled_integer(x: &Decimal, scale: i64) -> Option<i64> {
    let v = (x * &Decimal::from(scale)).round();
    if v.is_nan() || v.is_infinite() || v.is_negative() {
        return None;
    }
    let i = v.to_i64();
    if i == i64::MAX {
        return None;
    }
    Some(i)
}

fn encode(whole: i64, scale: i64) -> Decimal {
    Decimal::from(whole) / Decimal::from(scale)
}

// N.YYYY -> D.MMYYYY
fn day_of_year_to_date(stack: &mut Stack) -> CalcErrorResult {
    let x = stack.pop();
    let invalid = |stack: &mut Stack, x: Decimal| {
        stack.push(x);
        Err(CalcError::InvalidConversion)
    };
    if x.is_nan() || x.is_negative() || x > Decimal::from(MAX_DAY_OF_YEAR) {
        return invalid(stack, x);
    }
    let total = match scaled_integer(&x, 10_000) {
        Some(total) => total,
        None => return invalid(stack, x),
    };
    let mut day = total / 10_000;
    let mut year = total % 10_000;
    if year < MIN_EXPLICIT_YEAR {
        year = this_year();
    }
    if day < 1 {
        return invalid(stack, x);
    }
    if !is_leap(year) && day > LAST_DAY_BEFORE_LEAP {
        day += 1;
    }
    for (month, &length) in DAYS_IN_MONTH.iter().enumerate() {
        if day <= length {
            let month = month as i64 + 1;
            stack.push(encode(day * 1_000_000 + month * 10_000 + year, 1_000_000));
            return Ok(());
        }
        day -= length;
    }
    invalid(stack, x)
}

// D.MMYYYY -> N.YYYY
fn date_to_day_of_year(stack: &mut Stack) -> CalcErrorResult {
    let x = stack.pop();
    let total = match scaled_integer(&x, 1_000_000) {
        Some(total) => total,
        None => {
            stack.push(x);
            return Err(CalcError::InvalidConversion);
        }
    };
    let day = total / 1_000_000;
    let month = (total / 10_000) % 100;
    let mut year = total % 10_000;
    if year < MIN_EXPLICIT_YEAR {
        year = this_year();
    }
    let leap = is_leap(year);
    let valid_month = (1..=12).contains(&month);
    let month_length = if !valid_month {
        0
    } else if month == 2 && !leap {
        28
    } else {
        DAYS_IN_MONTH[month as usize - 1]
    };
    if day < 1 || day > month_length {
        stack.push(x);
        return Err(CalcError::InvalidConversion);
    }
    let mut day_of_year = DAYS_IN_MONTH[..month as usize - 1].iter().sum::<i64>() + day;
    if !leap && day_of_year > LAST_DAY_BEFORE_LEAP {
        day_of_year -= 1;
    }
    stack.push(encode(day_of_year * 10_000 + year, 10_000));
    Ok(())
}

impl CustomConversion {
    /// Applies the conversion to X. Some conversions walk other categories
    /// of `graph`.
    pub fn apply(&self, graph: &ConversionGraph, stack: &mut Stack) -> CalcErrorResult {
        use CustomConversion::*;

        match self {
            Identity => Ok(()),
            KelvinToCelsius => offset(stack, -Decimal::literal("273.15")),
            CelsiusToKelvin => offset(stack, Decimal::literal("273.15")),
            FahrenheitToCelsius => {
                let x = stack.pop();
                stack.push((x - Decimal::from(32)) * Decimal::from(5) / Decimal::from(9));
                Ok(())
            }
            CelsiusToFahrenheit => {
                let x = stack.pop();
                stack.push(x * Decimal::from(9) / Decimal::from(5) + Decimal::from(32));
                Ok(())
            }
            PintsToGallons => divide(stack, Decimal::from(8)),
            GallonsToPints => multiply(stack, Decimal::from(8)),
            UkPintsToLitres => multiply(stack, Decimal::literal("0.568261485")),
            LitresToUkPints => divide(stack, Decimal::literal("0.568261485")),
            UsPintsToLitres => multiply(stack, Decimal::literal("0.473176473")),
            LitresToUsPints => divide(stack, Decimal::literal("0.473176473")),
            InchesToMillimetres => multiply(stack, Decimal::literal("25.4")),
            MillimetresToInches => divide(stack, Decimal::literal("25.4")),
            RadiansToDegrees => multiply(stack, Decimal::from(180) / Decimal::pi()),
            DegreesToRadians => multiply(stack, Decimal::pi() / Decimal::from(180)),
            OuncesToGrams => multiply(stack, Decimal::literal("28.349523125")),
            GramsToOunces => divide(stack, Decimal::literal("28.349523125")),
            GramsToKilograms => divide(stack, Decimal::from(1000)),
            KilogramsToGrams => multiply(stack, Decimal::from(1000)),
            KilogramsToPounds => divide(stack, Decimal::literal("0.45359237")),
            PoundsToKilograms => multiply(stack, Decimal::literal("0.45359237")),
            KilogramsToStone => divide(stack, Decimal::literal("6.35029318")),
            StoneToKilograms => multiply(stack, Decimal::literal("6.35029318")),
            NewtonMetresToPoundFeet => multiply(stack, Decimal::literal("0.737562149277")),
            PoundFeetToNewtonMetres => divide(stack, Decimal::literal("0.737562149277")),
            RpmToHertz => divide(stack, Decimal::from(60)),
            HertzToRpm => multiply(stack, Decimal::from(60)),
            RadPerSecToHertz => divide(stack, Decimal::from(2) * Decimal::pi()),
            HertzToRadPerSec => multiply(stack, Decimal::from(2) * Decimal::pi()),
            MphToFeetPerSecond => ratio(stack, 5280, 3600),
            FeetPerSecondToMph => ratio(stack, 3600, 5280),
            MphToKmh => graph.convert(stack, "Distance", "Miles", "Kilometres"),
            KmhToMph => graph.convert(stack, "Distance", "Kilometres", "Miles"),
            MpgToMpl => graph.convert(stack, "Volume", "Litres", "Gallons"),
            MplToMpg => graph.convert(stack, "Volume", "Gallons", "Litres"),
            MpgToUsMpg => graph.convert(stack, "Volume", "US Gallons", "Gallons"),
            UsMpgToMpg => graph.convert(stack, "Volume", "Gallons", "US Gallons"),
            KmplToMpl => graph.convert(stack, "Distance", "Kilometres", "Miles"),
            MplToKmpl => graph.convert(stack, "Distance", "Miles", "Kilometres"),
            KmplToLitresPer100Km | LitresPer100KmToKmpl => per_hundred(stack),
            HoursToHms => stack.hours_to_hms(),
            HmsToHours => stack.hms_to_hours(),
            HoursToHm => stack.hours_to_hm(),
            HmToHours => stack.hm_to_hours(),
            DayOfYearToDate => day_of_year_to_date(stack),
            DateToDayOfYear => date_to_day_of_year(stack),
        }
    }
}

fn builtin_categories() -> BTreeMap<String, Vec<Conversion>> {
    use ConversionKind::{Custom, Divisor as Div, Multiplier as Mul};
    use CustomConversion::*;

    let mut categories = BTreeMap::new();
    categories.insert(
        "Volume",
        edges![
            "Pints" => "Fluid Ounces": Mul(20.0),
            "Fluid Ounces" => "Pints": Div(20.0),
            "US Fluid Ounces" => "Cubic Inches": Mul(1.8046875),
            "Cubic Inches" => "US Fluid Ounces": Div(1.8046875),
            "US Pints" => "US Fluid Ounces": Mul(16.0),
            "US Fluid Ounces" => "US Pints": Div(16.0),
            "Pints" => "Gallons": Custom(PintsToGallons),
            "Gallons" => "Pints": Custom(GallonsToPints),
            "US Pints" => "US Gallons": Custom(PintsToGallons),
            "US Gallons" => "US Pints": Custom(GallonsToPints),
            "Pints" => "Litres": Custom(UkPintsToLitres),
            "Litres" => "Pints": Custom(LitresToUkPints),
            "US Pints" => "Litres": Custom(UsPintsToLitres),
            "Litres" => "US Pints": Custom(LitresToUsPints),
            "Millilitres" => "Litres": Div(1000.0),
            "Litres" => "Millilitres": Mul(1000.0),
            "Millilitres" => "Cubic Centimetres": Custom(Identity),
            "Cubic Centimetres" => "Millilitres": Custom(Identity),
            "Litres" => "Cubic Metres": Div(1000.0),
            "Cubic Metres" => "Litres": Mul(1000.0),
            "Cubic Millimetres" => "Cubic Metres": Div(1e9),
            "Cubic Metres" => "Cubic Millimetres": Mul(1e9),
            "Cubic Decimetres" => "Cubic Metres": Div(1000.0),
            "Cubic Metres" => "Cubic Decimetres": Mul(1000.0),
            "Millilitres" => "Cubic Inches": Div(16.387064),
            "Cubic Inches" => "Millilitres": Mul(16.387064),
            "Cubic Inches" => "Cubic Feet": Div(1728.0),
            "Cubic Feet" => "Cubic Inches": Mul(1728.0),
            "Cubic Feet" => "Cubic Yards": Div(27.0),
            "Cubic Yards" => "Cubic Feet": Mul(27.0),
        ],
    );
    categories.insert(
        "Mass",
        edges![
            "Ounces" => "Grams": Custom(OuncesToGrams),
            "Grams" => "Ounces": Custom(GramsToOunces),
            "Grams" => "Kilograms": Custom(GramsToKilograms),
            "Kilograms" => "Grams": Custom(KilogramsToGrams),
            "Kilograms" => "Pounds": Custom(KilogramsToPounds),
            "Pounds" => "Kilograms": Custom(PoundsToKilograms),
            "Kilograms" => "Stone": Custom(KilogramsToStone),
            "Stone" => "Kilograms": Custom(StoneToKilograms),
            "Grams" => "Microgram": Mul(1e6),
            "Microgram" => "Grams": Div(1e6),
            "Grams" => "Milligrams": Mul(1000.0),
            "Milligrams" => "Grams": Div(1000.0),
            "Tonnes" => "Kilograms": Mul(1000.0),
            "Kilograms" => "Tonnes": Div(1000.0),
            "Stone" => "Hundredweight": Div(8.0),
            "Hundredweight" => "Stone": Mul(8.0),
            "Pounds" => "US Hundredweight": Div(100.0),
            "US Hundredweight" => "Pounds": Mul(100.0),
            "Hundredweight" => "Tons": Div(20.0),
            "Tons" => "Hundredweight": Mul(20.0),
            "Pounds" => "US Tons": Div(2000.0),
            "US Tons" => "Pounds": Mul(2000.0),
        ],
    );
    categories.insert(
        "Torque",
        edges![
            "Pound-Force Feet" => "Newton Metres": Custom(PoundFeetToNewtonMetres),
            "Newton Metres" => "Pound-Force Feet": Custom(NewtonMetresToPoundFeet),
            "Newton Metres" => "Newton Centimetres": Mul(100.0),
            "Newton Centimetres" => "Newton Metres": Div(100.0),
            "Newton Metres" => "Newton Millimetres": Mul(1000.0),
            "Newton Millimetres" => "Newton Metres": Div(1000.0),
            "Newton Metres" => "Kilogram-Force Metres": Div(9.80665),
            "Kilogram-Force Metres" => "Newton Metres": Mul(9.80665),
            "Kilogram-Force Metres" => "Kilogram-Force Centimetres": Mul(100.0),
            "Kilogram-Force Centimetres" => "Kilogram-Force Metres": Div(100.0),
            "Kilogram-Force Metres" => "Kilogram-Force Millimetres": Mul(1000.0),
            "Kilogram-Force Millimetres" => "Kilogram-Force Metres": Div(1000.0),
            "Kilogram-Force Metres" => "Gram-Force Metres": Mul(1000.0),
            "Gram-Force Metres" => "Kilogram-Force Metres": Div(1000.0),
            "Gram-Force Metres" => "Gram-Force Millimetres": Mul(1000.0),
            "Gram-Force Millimetres" => "Gram-Force Metres": Div(1000.0),
            "Gram-Force Metres" => "Gram-Force Centimetres": Mul(100.0),
            "Gram-Force Centimetres" => "Gram-Force Metres": Div(100.0),
            "Pound-Force Feet" => "Pound-Force Inches": Mul(12.0),
            "Pound-Force Inches" => "Pound-Force Feet": Div(12.0),
            "Pound-Force Feet" => "Ounce-Force Feet": Mul(16.0),
            "Ounce-Force Feet" => "Pound-Force Feet": Div(16.0),
            "Pound-Force Inches" => "Ounce-Force Inches": Mul(16.0),
            "Ounce-Force Inches" => "Pound-Force Inches": Div(16.0),
        ],
    );
    categories.insert(
        "Speed",
        edges![
            "Metres Per Second" => "Kilometres Per Hour": Mul(3.6),
            "Kilometres Per Hour" => "Metres Per Second": Div(3.6),
            "Kilometres Per Hour" => "Metres Per Hour": Mul(1000.0),
            "Metres Per Hour" => "Kilometres Per Hour": Div(1000.0),
            "Miles Per Hour" => "Feet Per Second": Custom(MphToFeetPerSecond),
            "Feet Per Second" => "Miles Per Hour": Custom(FeetPerSecondToMph),
            "Miles Per Hour" => "Kilometres Per Hour": Custom(MphToKmh),
            "Kilometres Per Hour" => "Miles Per Hour": Custom(KmhToMph),
            "Knots" => "Metres Per Hour": Mul(1852.0),
            "Metres Per Hour" => "Knots": Div(1852.0),
        ],
    );
    categories.insert(
        "Time",
        edges![
            "Seconds" => "Nanoseconds": Mul(1e9),
            "Nanoseconds" => "Seconds": Div(1e9),
            "Seconds" => "Microseconds": Mul(1e6),
            "Microseconds" => "Seconds": Div(1e6),
            "Seconds" => "Milliseconds": Mul(1e3),
            "Milliseconds" => "Seconds": Div(1e3),
            "Minutes" => "Seconds": Mul(60.0),
            "Seconds" => "Minutes": Div(60.0),
            "Hours" => "Minutes": Mul(60.0),
            "Minutes" => "Hours": Div(60.0),
            "Days" => "Hours": Mul(24.0),
            "Hours" => "Days": Div(24.0),
            "Weeks" => "Days": Mul(7.0),
            "Days" => "Weeks": Div(7.0),
            "Hours" => "Hours.Minutes-Seconds": Custom(HoursToHms),
            "Hours.Minutes-Seconds" => "Hours": Custom(HmsToHours),
        ],
    );
    categories.insert(
        "Date",
        edges![
            "Day of Year" => "Date in Year": Custom(DayOfYearToDate),
            "Date in Year" => "Day of Year": Custom(DateToDayOfYear),
        ],
    );
    categories.insert(
        "Force",
        edges![
            "Newtons" => "Micronewtons": Mul(1e6),
            "Micronewtons" => "Newtons": Div(1e6),
            "Newtons" => "Millinewtons": Mul(1e3),
            "Millinewtons" => "Newtons": Div(1e3),
            "Kilonewtons" => "Newtons": Mul(1e3),
            "Newtons" => "Kilonewtons": Div(1e3),
            "Kilogram-Force" => "Newtons": Mul(9.80665),
            "Newtons" => "Kilogram-Force": Div(9.80665),
            "Kilogram-Force" => "Gram-Force": Mul(1000.0),
            "Gram-Force" => "Kilogram-Force": Div(1000.0),
            "Pound-Force" => "Newtons": Mul(4.4482216152605),
            "Newtons" => "Pound-Force": Div(4.4482216152605),
            "Pound-Force" => "Ounce-Force": Mul(16.0),
            "Ounce-Force" => "Pound-Force": Div(16.0),
        ],
    );
    categories.insert(
        "Pressure",
        edges![
            "Pascal" => "Hectopascal": Div(100.0),
            "Hectopascal" => "Pascal": Mul(100.0),
            "Pascal" => "Kilopascal": Div(1e3),
            "Kilopascal" => "Pascal": Mul(1e3),
            "Pascal" => "Megapascal": Div(1e6),
            "Megapascal" => "Pascal": Mul(1e6),
            "Millibar" => "Pascal": Mul(100.0),
            "Pascal" => "Millibar": Div(100.0),
            "Millibar" => "Bar": Div(1000.0),
            "Bar" => "Millibar": Mul(1000.0),
            "Pascal" => "Atmosphere": Div(101325.0),
            "Atmosphere" => "Pascal": Mul(101325.0),
            "Kilopascal" => "Kilograms Per Sq. cm": Div(98.0665),
            "Kilograms Per Sq. cm" => "Kilopascal": Mul(98.0665),
            "Pascal" => "Pounds Per Sq. Inch": Div(6894.757293168),
            "Pounds Per Sq. Inch" => "Pascal": Mul(6894.757293168),
            "Pascal" => "Inches of Mercury": Div(3386.389),
            "Inches of Mercury" => "Pascal": Mul(3386.389),
            "Torr" => "Atmosphere": Div(760.0),
            "Atmosphere" => "Torr": Mul(760.0),
        ],
    );
    categories.insert(
        "Energy",
        edges![
            "Kilojoules" => "Joules": Mul(1000.0),
            "Joules" => "Kilojoules": Div(1000.0),
            "Megajoules" => "Kilojoules": Mul(1000.0),
            "Kilojoules" => "Megajoules": Div(1000.0),
            "Joules" => "Kilowatt-Hours": Div(3.6e6),
            "Kilowatt-Hours" => "Joules": Mul(3.6e6),
            "Joules" => "Kilocalories": Div(4184.0),
            "Kilocalories" => "Joules": Mul(4184.0),
            "Kilocalories" => "Calories": Mul(1000.0),
            "Calories" => "Kilocalories": Div(1000.0),
        ],
    );
    categories.insert(
        "Temperature",
        edges![
            "Kelvin" => "Celsius": Custom(KelvinToCelsius),
            "Celsius" => "Kelvin": Custom(CelsiusToKelvin),
            "Celsius" => "Fahrenheit": Custom(CelsiusToFahrenheit),
            "Fahrenheit" => "Celsius": Custom(FahrenheitToCelsius),
        ],
    );
    categories.insert(
        "Area",
        edges![
            "Sq. Millimetres" => "Sq. Metres": Div(1e6),
            "Sq. Metres" => "Sq. Millimetres": Mul(1e6),
            "Sq. Centimetres" => "Sq. Metres": Div(10000.0),
            "Sq. Metres" => "Sq. Centimetres": Mul(10000.0),
            "Sq. Metres" => "Sq. Kilometres": Div(1e6),
            "Sq. Kilometres" => "Sq. Metres": Mul(1e6),
            "Sq. Metres" => "Hectares": Div(10000.0),
            "Hectares" => "Sq. Metres": Mul(10000.0),
            "Sq. Millimetres" => "Sq. Inches": Div(645.16),
            "Sq. Inches" => "Sq. Millimetres": Mul(645.16),
            "Sq. Inches" => "Sq. Feet": Div(144.0),
            "Sq. Feet" => "Sq. Inches": Mul(144.0),
            "Sq. Feet" => "Sq. Yards": Div(9.0),
            "Sq. Yards" => "Sq. Feet": Mul(9.0),
            "Sq. Yards" => "Acres": Div(4840.0),
            "Acres" => "Sq. Yards": Mul(4840.0),
            "Sq. Yards" => "Sq. Miles": Div(3097600.0),
            "Sq. Miles" => "Sq. Yards": Mul(3097600.0),
        ],
    );
    categories.insert(
        "Data Size",
        edges![
            "Kibibytes" => "Bytes": Mul(1024.0),
            "Bytes" => "Kibibytes": Div(1024.0),
            "Mebibytes" => "Kibibytes": Mul(1024.0),
            "Kibibytes" => "Mebibytes": Div(1024.0),
            "Gibibytes" => "Mebibytes": Mul(1024.0),
            "Mebibytes" => "Gibibytes": Div(1024.0),
            "Tebibytes" => "Gibibytes": Mul(1024.0),
            "Gibibytes" => "Tebibytes": Div(1024.0),
            "Kilobytes" => "Bytes": Mul(1000.0),
            "Bytes" => "Kilobytes": Div(1000.0),
            "Megabytes" => "Kilobytes": Mul(1000.0),
            "Kilobytes" => "Megabytes": Div(1000.0),
            "Gigabytes" => "Megabytes": Mul(1000.0),
            "Megabytes" => "Gigabytes": Div(1000.0),
            "Terabytes" => "Gigabytes": Mul(1000.0),
            "Gigabytes" => "Terabytes": Div(1000.0),
        ],
    );
    categories.insert(
        "Distance",
        edges![
            "Inches" => "Millimetres": Custom(InchesToMillimetres),
            "Millimetres" => "Inches": Custom(MillimetresToInches),
            "Metres" => "Millimetres": Mul(1000.0),
            "Millimetres" => "Metres": Div(1000.0),
            "Millimetres" => "Microns": Mul(1000.0),
            "Microns" => "Millimetres": Div(1000.0),
            "Nanometres" => "Microns": Div(1000.0),
            "Microns" => "Nanometres": Mul(1000.0),
            "Micrometres" => "Microns": Custom(Identity),
            "Microns" => "Micrometres": Custom(Identity),
            "Nanometres" => "Angstroms": Mul(10.0),
            "Angstroms" => "Nanometres": Div(10.0),
            "Metres" => "Centimetres": Mul(100.0),
            "Centimetres" => "Metres": Div(100.0),
            "Kilometres" => "Metres": Mul(1000.0),
            "Metres" => "Kilometres": Div(1000.0),
            "Inches" => "Thou": Mul(1000.0),
            "Thou" => "Inches": Div(1000.0),
            "Inches" => "Points": Mul(72.0),
            "Points" => "Inches": Div(72.0),
            "Inches" => "Feet": Div(12.0),
            "Feet" => "Inches": Mul(12.0),
            "Yards" => "Feet": Mul(3.0),
            "Feet" => "Yards": Div(3.0),
            "Yards" => "Miles": Div(1760.0),
            "Miles" => "Yards": Mul(1760.0),
            "Yards" => "Furlongs": Div(220.0),
            "Furlongs" => "Yards": Mul(220.0),
            "Metres" => "Microns": Mul(1e6),
            "Microns" => "Metres": Div(1e6),
            "Mils" => "Thou": Custom(Identity),
            "Thou" => "Mils": Custom(Identity),
            "Nautical Miles" => "Metres": Mul(1852.0),
            "Metres" => "Nautical Miles": Div(1852.0),
            "Fathoms" => "Feet": Mul(6.0),
            "Feet" => "Fathoms": Div(6.0),
            "Chains" => "Yards": Mul(22.0),
            "Yards" => "Chains": Div(22.0),
            "Light Years" => "Metres": Mul(9460730472580800.0),
            "Metres" => "Light Years": Div(9460730472580800.0),
        ],
    );
    categories.insert(
        "Angle",
        edges![
            "Radians" => "Degrees": Custom(RadiansToDegrees),
            "Degrees" => "Radians": Custom(DegreesToRadians),
            "Degrees" => "Degrees.Minutes-Seconds": Custom(HoursToHms),
            "Degrees.Minutes-Seconds" => "Degrees": Custom(HmsToHours),
            "Degrees.Minutes" => "Degrees": Custom(HmToHours),
            "Degrees" => "Degrees.Minutes": Custom(HoursToHm),
        ],
    );
    categories.insert(
        "Power",
        edges![
            "Watts" => "Kilowatts": Div(1000.0),
            "Kilowatts" => "Watts": Mul(1000.0),
            "Watts" => "Horsepower (Mech)": Div(745.69987158227022),
            "Horsepower (Mech)" => "Watts": Mul(745.69987158227022),
            "Horsepower (Metric)" => "Watts": Mul(735.49875),
            "Watts" => "Horsepower (Metric)": Div(735.49875),
            "Megawatts" => "Watts": Mul(1e6),
            "Watts" => "Megawatts": Div(1e6),
            "Calories Per Second" => "Watts": Mul(4.184),
            "Watts" => "Calories Per Second": Div(4.184),
        ],
    );
    categories.insert(
        "Frequency",
        edges![
            "RPM" => "Hertz": Custom(RpmToHertz),
            "Hertz" => "RPM": Custom(HertzToRpm),
            "Radians Per Second" => "Hertz": Custom(RadPerSecToHertz),
            "Hertz" => "Radians Per Second": Custom(HertzToRadPerSec),
        ],
    );
    categories.insert(
        "Fuel Economy",
        edges![
            "Miles Per Gallon" => "Miles Per Litre": Custom(MpgToMpl),
            "Miles Per Litre" => "Miles Per Gallon": Custom(MplToMpg),
            "Miles Per Gallon" => "Miles Per US Gallon": Custom(MpgToUsMpg),
            "Miles Per US Gallon" => "Miles Per Gallon": Custom(UsMpgToMpg),
            "Kilometres Per Litre" => "Miles Per Litre": Custom(KmplToMpl),
            "Miles Per Litre" => "Kilometres Per Litre": Custom(MplToKmpl),
            "Kilometres Per Litre" => "Litres Per 100 Kilometres": Custom(KmplToLitresPer100Km),
            "Litres Per 100 Kilometres" => "Kilometres Per Litre": Custom(LitresPer100KmToKmpl),
        ],
    );

    categories
        .into_iter()
        .map(|(name, edges)| (name.to_string(), edges))
        .collect()
}

// an edge may not lead back to a unit already on the path
fn seen(path: &[&Conversion], unit: &str) -> bool {
    path.iter().any(|c| c.from == unit || c.to == unit)
}

fn find_path<'a>(edges: &'a [Conversion], from: &str, to: &str, so_far: &[&'a Conversion]) -> Option<Vec<&'a Conversion>> {
    let next: Vec<&'a Conversion> = edges
        .iter()
        .filter(|c| c.from == from && !seen(so_far, &c.to))
        .collect();

    if let Some(direct) = next.iter().find(|c| c.to == to) {
        return Some(vec![*direct]);
    }

    for step in next {
        let mut path = so_far.to_vec();
        path.push(step);
        if let Some(rest) = find_path(edges, &step.to, to, &path) {
            let mut found = vec![step];
            found.extend(rest);
            return Some(found);
        }
    }
    None
}

/// All conversion categories plus the currency data they were built from
#[derive(Clone, Debug)]
pub struct ConversionGraph {
    categories: BTreeMap<String, Vec<Conversion>>,
    raw_currency_data: BTreeMap<String, f64>,
    currency_date: Option<String>,
}

impl Default for ConversionGraph {
    fn default() -> ConversionGraph {
        ConversionGraph {
            categories: builtin_categories(),
            raw_currency_data: BTreeMap::new(),
            currency_date: None,
        }
    }
}

impl ConversionGraph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Converts X from `from` to `to` within `category`. Converting a unit
    /// to itself always succeeds, even for an unknown category.
    pub fn convert(&self, stack: &mut Stack, category: &str, from: &str, to: &str) -> CalcErrorResult {
        if from == to {
            return Ok(());
        }
        let edges = self.categories.get(category).ok_or(CalcError::UnknownConversion)?;
        let known_from = edges.iter().any(|c| c.from == from);
        let known_to = edges.iter().any(|c| c.to == to);
        if !known_from || !known_to {
            return Err(CalcError::UnknownConversion);
        }
        let path = find_path(edges, from, to, &[]).ok_or(CalcError::UnknownConversion)?;

        tracing::debug!(category, from, to, steps = path.len(), "converting");
        let saved = stack.snapshot();
        for (step, conv) in path.iter().enumerate() {
            tracing::debug!(step, from = %conv.from, to = %conv.to, kind = ?conv.kind, "conversion step");
            let res = match conv.kind {
                ConversionKind::Multiplier(f) => multiply(stack, factor(f)),
                ConversionKind::Divisor(f) => divide(stack, factor(f)),
                ConversionKind::Custom(custom) => custom.apply(self, stack),
            };
            if let Err(e) = res {
                stack.restore(saved);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Rebuilds the currency category from rates given as units per euro,
    /// keyed by ISO code. Unknown codes are skipped. Nothing changes when
    /// no rate was usable.
    pub fn register_currencies(&mut self, rates: &BTreeMap<String, f64>) {
        let mut edges = Vec::new();
        for (code, &rate) in rates {
            let name = match CURRENCIES.get(code.as_str()) {
                Some(name) => *name,
                None => {
                    tracing::warn!(code = %code, "unknown currency");
                    continue;
                }
            };
            if !rate.is_finite() || rate <= 0.0 {
                tracing::warn!(code = %code, rate, "unusable currency rate");
                continue;
            }
            edges.push(Conversion::new(BASE_CURRENCY, name, ConversionKind::Multiplier(rate)));
            edges.push(Conversion::new(name, BASE_CURRENCY, ConversionKind::Divisor(rate)));
        }
        if edges.is_empty() {
            return;
        }
        tracing::debug!(currencies = edges.len() / 2, "currencies registered");
        self.categories.insert(CURRENCY_CATEGORY.to_string(), edges);
        self.raw_currency_data = rates.clone();
    }

    pub fn raw_currency_data(&self) -> &BTreeMap<String, f64> {
        &self.raw_currency_data
    }

    pub fn set_currency_date(&mut self, date: &str) {
        self.currency_date = Some(date.to_string());
    }

    pub fn currency_date(&self) -> Option<&str> {
        self.currency_date.as_deref()
    }

    /// Category names in alphabetical order
    pub fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn edges(&self, category: &str) -> &[Conversion] {
        self.categories.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Units a conversion can start from
    pub fn available_units(&self, category: &str) -> BTreeSet<String> {
        self.edges(category).iter().map(|c| c.from.clone()).collect()
    }

    /// Every unit of the category, as a source or a target
    pub fn all_units(&self, category: &str) -> BTreeSet<String> {
        self.edges(category)
            .iter()
            .flat_map(|c| [c.from.clone(), c.to.clone()])
            .collect()
    }

    /// Source units of the first category (alphabetically) `unit` belongs to
    pub fn available_conversions(&self, unit: &str) -> BTreeSet<String> {
        self.categories
            .keys()
            .find(|name| self.edges(name).iter().any(|c| c.from == unit))
            .map(|name| self.available_units(name))
            .unwrap_or_default()
    }
}

/// Short symbol for a unit, currencies give their ISO code
pub fn unit_symbol(unit: &str) -> Option<&'static str> {
    if let Some(symbol) = UNIT_SYMBOLS.get(unit) {
        return Some(*symbol);
    }
    CURRENCIES.iter().find(|(_, name)| **name == unit).map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn close(a: &Decimal, b: &Decimal) -> bool {
        (a - b).abs() < Decimal::from(10).pow(&Decimal::from(-40))
    }

    fn convert(value: &str, category: &str, from: &str, to: &str) -> Result<Decimal, CalcError> {
        let graph = ConversionGraph::new();
        let mut stack = Stack::new();
        stack.push(Decimal::literal(value));
        graph.convert(&mut stack, category, from, to)?;
        assert_eq!(stack.len(), 1);
        Ok(stack.peek())
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert("32", "Temperature", "Fahrenheit", "Celsius"), Ok(Decimal::zero()));
        assert_eq!(convert("100", "Temperature", "Celsius", "Fahrenheit"), Ok(Decimal::from(212)));
        let k = convert("212", "Temperature", "Fahrenheit", "Kelvin").unwrap();
        assert!(close(&k, &Decimal::literal("373.15")));
    }

    #[test]
    fn test_same_unit() {
        assert_eq!(convert("5", "No Such Category", "Inches", "Inches"), Ok(Decimal::from(5)));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(convert("5", "No Such Category", "Inches", "Feet"), Err(CalcError::UnknownConversion));
        assert_eq!(convert("5", "Distance", "Inches", "Parsecs"), Err(CalcError::UnknownConversion));
        assert_eq!(convert("5", "Distance", "Kelvin", "Inches"), Err(CalcError::UnknownConversion));
    }

    #[test]
    fn test_multi_step() {
        let km = convert("1", "Distance", "Miles", "Kilometres").unwrap();
        assert!(close(&km, &Decimal::literal("1.609344")));
        let mm = convert("1", "Distance", "Feet", "Millimetres").unwrap();
        assert!(close(&mm, &Decimal::literal("304.8")));
        let ml = convert("1", "Volume", "US Pints", "Millilitres").unwrap();
        assert!(close(&ml, &Decimal::literal("473.176473")));
    }

    #[test]
    fn test_round_trip() {
        let mm = convert("3", "Distance", "Inches", "Millimetres").unwrap();
        assert!(close(&mm, &Decimal::literal("76.2")));
        let inches = convert("76.2", "Distance", "Millimetres", "Inches").unwrap();
        assert!(close(&inches, &Decimal::from(3)));
        let back = convert("3", "Data Size", "Gibibytes", "Bytes").unwrap();
        assert_eq!(back, Decimal::from(3 * 1024 * 1024 * 1024_i64));
    }

    #[test]
    fn test_custom_through_other_category() {
        let kmh = convert("60", "Speed", "Miles Per Hour", "Kilometres Per Hour").unwrap();
        assert!(close(&kmh, &Decimal::literal("96.56064")));
    }

    #[test]
    fn test_miles_per_hour_to_feet_per_second() {
        assert_eq!(convert("15", "Speed", "Miles Per Hour", "Feet Per Second"), Ok(Decimal::from(22)));
        assert_eq!(convert("22", "Speed", "Feet Per Second", "Miles Per Hour"), Ok(Decimal::from(15)));
        let fps = convert("1", "Speed", "Miles Per Hour", "Feet Per Second").unwrap();
        assert_eq!(fps, Decimal::from(22) / Decimal::from(15));
    }

    #[test]
    fn test_failure_restores_stack() {
        let graph = ConversionGraph::new();
        let mut stack = Stack::new();
        stack.push(Decimal::from(7));
        stack.push(Decimal::zero());
        let res = graph.convert(&mut stack, "Fuel Economy", "Kilometres Per Litre", "Litres Per 100 Kilometres");
        assert_eq!(res, Err(CalcError::DivideByZero));
        assert_eq!(stack.stack_for_display(), vec![Decimal::zero(), Decimal::from(7)]);
    }

    #[test]
    fn test_fuel_economy() {
        assert_eq!(
            convert("20", "Fuel Economy", "Kilometres Per Litre", "Litres Per 100 Kilometres"),
            Ok(Decimal::from(5))
        );
    }

    #[test]
    fn test_currency() {
        let mut graph = ConversionGraph::new();
        let mut rates = BTreeMap::new();
        rates.insert("USD".to_string(), 1.1);
        rates.insert("XXX".to_string(), 2.0);
        graph.register_currencies(&rates);
        assert!(graph.categories().contains(&CURRENCY_CATEGORY.to_string()));
        assert_eq!(graph.raw_currency_data(), &rates);

        let mut stack = Stack::new();
        stack.push(Decimal::literal("1.1"));
        assert_eq!(graph.convert(&mut stack, "Currency", "US Dollars", "Euros"), Ok(()));
        assert_eq!(stack.peek(), Decimal::one());
        assert_eq!(graph.convert(&mut stack, "Currency", "Euros", "US Dollars"), Ok(()));
        assert_eq!(stack.peek(), Decimal::literal("1.1"));
    }

    #[test]
    fn test_currency_nothing_usable() {
        let mut graph = ConversionGraph::new();
        let mut rates = BTreeMap::new();
        rates.insert("XXX".to_string(), 2.0);
        graph.register_currencies(&rates);
        assert!(!graph.categories().contains(&CURRENCY_CATEGORY.to_string()));
        assert!(graph.raw_currency_data().is_empty());
        graph.set_currency_date("2024-01-02");
        assert_eq!(graph.currency_date(), Some("2024-01-02"));
    }

    #[test]
    fn test_dates() {
        assert_eq!(convert("60.2024", "Date", "Day of Year", "Date in Year"), Ok(Decimal::literal("29.022024")));
        assert_eq!(convert("60.2023", "Date", "Day of Year", "Date in Year"), Ok(Decimal::literal("1.032023")));
        assert_eq!(convert("31.122023", "Date", "Date in Year", "Day of Year"), Ok(Decimal::literal("365.2023")));
        assert_eq!(convert("1.032024", "Date", "Date in Year", "Day of Year"), Ok(Decimal::literal("61.2024")));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(convert("367", "Date", "Day of Year", "Date in Year"), Err(CalcError::InvalidConversion));
        assert_eq!(convert("366.2023", "Date", "Day of Year", "Date in Year"), Err(CalcError::InvalidConversion));
        assert_eq!(convert("30.022024", "Date", "Date in Year", "Day of Year"), Err(CalcError::InvalidConversion));
        assert_eq!(convert("1.132024", "Date", "Date in Year", "Day of Year"), Err(CalcError::InvalidConversion));
    }

    #[test]
    fn test_listings() {
        let graph = ConversionGraph::new();
        let categories = graph.categories();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert!(graph.available_units("Temperature").contains("Kelvin"));
        assert!(!graph.available_units("Nothing").contains("Kelvin"));
        assert!(graph.all_units("Volume").contains("Cubic Yards"));
        assert!(graph.available_conversions("Fahrenheit").contains("Celsius"));
        assert!(graph.available_conversions("Parsecs").is_empty());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(unit_symbol("Celsius"), Some("°C"));
        assert_eq!(unit_symbol("US Dollars"), Some("USD"));
        assert_eq!(unit_symbol("Parsecs"), None);
    }
}
