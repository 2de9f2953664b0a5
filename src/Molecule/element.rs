use crate::errors::IsotopeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// symbol, mass number of the most abundant isotope
struct ElementData {
    name: &'static str,
    dominant_isotope: u16,
}

const ELEMENTS: &[ElementData] = &[
    ElementData { name: "H", dominant_isotope: 1 },
    ElementData { name: "He", dominant_isotope: 4 },
    ElementData { name: "Li", dominant_isotope: 7 },
    ElementData { name: "Be", dominant_isotope: 9 },
    ElementData { name: "B", dominant_isotope: 11 },
    ElementData { name: "C", dominant_isotope: 12 },
    ElementData { name: "N", dominant_isotope: 14 },
    ElementData { name: "O", dominant_isotope: 16 },
    ElementData { name: "F", dominant_isotope: 19 },
    ElementData { name: "Ne", dominant_isotope: 20 },
    ElementData { name: "Na", dominant_isotope: 23 },
    ElementData { name: "Mg", dominant_isotope: 24 },
    ElementData { name: "Al", dominant_isotope: 27 },
    ElementData { name: "Si", dominant_isotope: 28 },
    ElementData { name: "P", dominant_isotope: 31 },
    ElementData { name: "S", dominant_isotope: 32 },
    ElementData { name: "Cl", dominant_isotope: 35 },
    ElementData { name: "Ar", dominant_isotope: 40 },
    ElementData { name: "K", dominant_isotope: 39 },
    ElementData { name: "Ca", dominant_isotope: 40 },
    ElementData { name: "Ti", dominant_isotope: 48 },
    ElementData { name: "Cr", dominant_isotope: 52 },
    ElementData { name: "Mn", dominant_isotope: 55 },
    ElementData { name: "Fe", dominant_isotope: 56 },
    ElementData { name: "Co", dominant_isotope: 59 },
    ElementData { name: "Ni", dominant_isotope: 58 },
    ElementData { name: "Cu", dominant_isotope: 63 },
    ElementData { name: "Zn", dominant_isotope: 64 },
    ElementData { name: "Br", dominant_isotope: 79 },
    ElementData { name: "I", dominant_isotope: 127 },
];

fn lookup(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.iter().find(|e| e.name == symbol)
}

/// Chemical element with an optional isotope mass number.
///
/// `isotope == None` is the normal (natural abundance) element. Only atoms whose isotope
/// is set are touched by isotope stripping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub symbol: String,
    pub isotope: Option<u16>,
}

impl Element {
    /// normal element, the symbol must be known
    pub fn new(symbol: &str) -> Result<Self, IsotopeError> {
        if lookup(symbol).is_none() {
            return Err(IsotopeError::UnknownElement(symbol.to_string()));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            isotope: None,
        })
    }

    pub fn with_isotope(symbol: &str, mass_number: u16) -> Result<Self, IsotopeError> {
        let mut element = Self::new(symbol)?;
        element.isotope = Some(mass_number);
        Ok(element)
    }

    /// the same element without isotope marker
    pub fn default_isotope(&self) -> Element {
        Element {
            symbol: self.symbol.clone(),
            isotope: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.isotope.is_none()
    }

    pub fn dominant_mass_number(&self) -> Option<u16> {
        lookup(&self.symbol).map(|e| e.dominant_isotope)
    }

    /// True if an isotope is set and it is not the most abundant one.
    /// Explicit "12C" is not enriched.
    pub fn is_enriched(&self) -> bool {
        match self.isotope {
            Some(n) => self.dominant_mass_number() != Some(n),
            None => false,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.isotope {
            Some(n) => write!(f, "{}{}", n, self.symbol),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// Parses "C", "13C", and "D"/"T" as shortcuts for 2H/3H.
impl FromStr for Element {
    type Err = IsotopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "D" => return Element::with_isotope("H", 2),
            "T" => return Element::with_isotope("H", 3),
            _ => {}
        }
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        let symbol = &s[digits.len()..];
        if digits.is_empty() {
            Element::new(symbol)
        } else {
            let mass_number = digits
                .parse::<u16>()
                .map_err(|_| IsotopeError::UnknownElement(s.to_string()))?;
            Element::with_isotope(symbol, mass_number)
        }
    }
}
