use lazy_static::lazy_static;

use crate::decimal::Decimal;

/// A named value that can be put on the stack
#[derive(Clone, Debug)]
pub struct Constant {
    pub name: &'static str,
    pub symbol: &'static str,
    pub value: Decimal,
    pub unit: &'static str,
    pub category: &'static str,
}

impl Constant {
    /// Exact match, or a match against the name with its spaces removed
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.name.replace(' ', "") == name
    }
}

// values are written as literals so they keep all their digits
fn literal(name: &'static str, symbol: &'static str, value: &str, unit: &'static str, category: &'static str) -> Constant {
    Constant {
        name,
        symbol,
        value: Decimal::literal(value),
        unit,
        category,
    }
}

fn density(name: &'static str, value: &str, category: &'static str) -> Constant {
    literal(name, "ρ", value, "kg m⁻³", category)
}

lazy_static! {
    pub static ref CONSTANTS: Vec<Constant> = vec![
        Constant {
            name: "Pi",
            symbol: "π",
            value: Decimal::pi(),
            unit: "",
            category: "Universal",
        },
        Constant {
            name: "Euler's Number",
            symbol: "e",
            value: Decimal::e(),
            unit: "",
            category: "Universal",
        },
        literal("Speed of Light in Vacuum", "c", "299792458", "m s⁻¹", "Universal"),
        literal("Gravitational Constant", "G", "6.67408e-11", "m³ kg⁻¹ s⁻²", "Universal"),
        literal("Planck Constant", "h", "6.62607004e-34", "J s", "Universal"),
        literal("Reduced Planck Constant", "ħ", "1.0545718e-34", "J s", "Universal"),
        literal("Permeability of Free Space", "μ₀", "1.256637061e-6", "N A⁻²", "Electromagnetic"),
        literal("Permittivity of Free Space", "ε₀", "8.854187818e-12", "F m⁻¹", "Electromagnetic"),
        literal("Elementary Charge", "e", "1.602176621e-19", "C", "Electromagnetic"),
        literal("Magnetic Flux Quantum", "Φ₀", "2.067833831e-15", "Wb", "Electromagnetic"),
        literal("Conductance Quantum", "G₀", "7.748091731e-5", "S", "Electromagnetic"),
        literal("Electron Mass", "mₑ", "9.10938356e-31", "kg", "Atomic"),
        literal("Proton Mass", "mₚ", "1.672621898e-27", "kg", "Atomic"),
        literal("Fine Structure Constant", "α", "0.007297353", "", "Atomic"),
        literal("Rydberg Constant", "R∞", "10973731.57", "m⁻¹", "Atomic"),
        literal("Bohr Radius", "a₀", "5.291772107e-11", "m", "Atomic"),
        literal("Classical Electron Radius", "rₑ", "2.817940323e-15", "m", "Atomic"),
        literal("Atomic Mass Unit", "u", "1.66053904e-27", "kg", "Physical"),
        literal("Avogadro Constant", "Nᴀ", "6.022140857e23", "mol⁻¹", "Physical"),
        literal("Faraday Constant", "F", "96485.33289", "C mol⁻¹", "Physical"),
        literal("Molar Gas Constant", "R", "8.3144598", "J mol⁻¹ K⁻¹", "Physical"),
        literal("Boltzmann Constant", "k", "1.38064852e-23", "J K⁻¹", "Physical"),
        literal("Stefan-Boltzmann Constant", "σ", "5.670367e-8", "W m⁻² K⁻⁴", "Physical"),
        literal("Electron Volt", "eV", "1.602176621e-19", "J", "Physical"),
        literal("Standard Gravity", "g₀", "9.80665", "m s⁻²", "Other"),
    ];

    pub static ref DENSITIES: Vec<Constant> = vec![
        density("Aluminium", "2700", "Metals"),
        density("Brass", "8530", "Metals"),
        density("Bronze", "8800", "Metals"),
        density("Copper", "8960", "Metals"),
        density("Gold", "19300", "Metals"),
        density("Cast Iron", "7200", "Metals"),
        density("Lead", "11340", "Metals"),
        density("Magnesium", "1740", "Metals"),
        density("Mild Steel", "7850", "Metals"),
        density("Stainless Steel", "8000", "Metals"),
        density("Silver", "10490", "Metals"),
        density("Tin", "7310", "Metals"),
        density("Titanium", "4506", "Metals"),
        density("Zinc", "7140", "Metals"),
        density("Water", "1000", "Liquids"),
        density("Sea Water", "1025", "Liquids"),
        density("Petrol", "745", "Liquids"),
        density("Diesel", "832", "Liquids"),
        density("Ethanol", "789", "Liquids"),
        density("Mercury", "13534", "Liquids"),
        density("Olive Oil", "913", "Liquids"),
        density("Air", "1.225", "Gases"),
        density("Helium", "0.1786", "Gases"),
        density("Hydrogen", "0.08988", "Gases"),
        density("Nitrogen", "1.2506", "Gases"),
        density("Oxygen", "1.429", "Gases"),
        density("Carbon Dioxide", "1.977", "Gases"),
        density("ABS", "1050", "Plastics"),
        density("Acrylic", "1180", "Plastics"),
        density("Nylon", "1150", "Plastics"),
        density("Polycarbonate", "1200", "Plastics"),
        density("Polyethylene", "950", "Plastics"),
        density("Polypropylene", "905", "Plastics"),
        density("PVC", "1380", "Plastics"),
        density("PTFE", "2200", "Plastics"),
        density("Concrete", "2400", "Other"),
        density("Glass", "2500", "Other"),
        density("Ice", "917", "Other"),
        density("Oak", "750", "Other"),
        density("Pine", "500", "Other"),
        density("Granite", "2700", "Other"),
    ];
}

pub fn find<'a>(table: &'a [Constant], name: &str) -> Option<&'a Constant> {
    table.iter().find(|c| c.matches(name))
}

/// Categories in the order they first appear
pub fn categories(table: &[Constant]) -> Vec<&'static str> {
    let mut cats: Vec<&'static str> = Vec::new();
    for c in table {
        if !cats.contains(&c.category) {
            cats.push(c.category);
        }
    }
    cats
}

pub fn in_category<'a>(table: &'a [Constant], category: &str) -> Vec<&'a Constant> {
    table.iter().filter(|c| c.category == category).collect()
}
