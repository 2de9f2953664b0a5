//! # Settings Module
//!
//! ## Purpose
//! Parameters of an isotope study: which element is labeled, with which isotope, how many
//! labeled atoms a species may carry, and how strictly pre-exponential factors are checked.
//!
//! ## JSON layout
//! ```json
//! {
//!   "maximum_isotopic_atoms": 2,
//!   "element": "C",
//!   "isotope": 13,
//!   "rate_tolerance": 1e-5,
//!   "halve_identical_reactants": true,
//!   "thermo_temperatures": [300, 400, 500, 600, 800, 1000, 1500]
//! }
//! ```
//! Isotopomers of species with NASA polynomials get their thermochemistry tabulated at
//! `thermo_temperatures` (K); an empty list keeps the polynomials.
//! Only `maximum_isotopic_atoms` is required by the study pipeline; every other field has
//! a default.

use crate::Molecule::element::Element;
use crate::errors::IsotopeError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeSettings {
    /// upper bound of labeled atoms per species
    #[serde(default, alias = "maximumIsotopicAtoms")]
    pub maximum_isotopic_atoms: Option<usize>,
    /// symbol of the labeled element
    #[serde(default = "default_element")]
    pub element: String,
    /// mass number of the label
    #[serde(default = "default_isotope")]
    pub isotope: u16,
    /// relative tolerance for the pre-exponential factor check
    #[serde(default = "default_rate_tolerance")]
    pub rate_tolerance: f64,
    #[serde(default = "default_halving")]
    pub halve_identical_reactants: bool,
    /// Cp sampling temperatures of tabulated isotopomer thermo, K
    #[serde(default = "default_thermo_temperatures")]
    pub thermo_temperatures: Vec<f64>,
}

fn default_element() -> String {
    "C".to_string()
}
fn default_isotope() -> u16 {
    13
}
fn default_rate_tolerance() -> f64 {
    1e-5
}
fn default_halving() -> bool {
    true
}
fn default_thermo_temperatures() -> Vec<f64> {
    vec![300.0, 400.0, 500.0, 600.0, 800.0, 1000.0, 1500.0]
}

impl Default for IsotopeSettings {
    fn default() -> Self {
        Self {
            maximum_isotopic_atoms: None,
            element: default_element(),
            isotope: default_isotope(),
            rate_tolerance: default_rate_tolerance(),
            halve_identical_reactants: default_halving(),
            thermo_temperatures: default_thermo_temperatures(),
        }
    }
}

impl IsotopeSettings {
    pub fn new(maximum_isotopic_atoms: usize) -> Self {
        Self {
            maximum_isotopic_atoms: Some(maximum_isotopic_atoms),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, IsotopeError> {
        let settings: IsotopeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IsotopeError> {
        let text = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&text)?;
        info!("Loaded isotope settings from '{}'", path.as_ref().display());
        Ok(settings)
    }

    /// element and tolerance must make sense; the label bound is checked where it is needed
    pub fn validate(&self) -> Result<(), IsotopeError> {
        let target = self.target_element()?;
        if !target.is_enriched() {
            return Err(IsotopeError::Config(format!(
                "{} is the most abundant isotope of {}, labels would not be enriched",
                target, self.element
            )));
        }
        if !(self.rate_tolerance.is_finite() && self.rate_tolerance > 0.0) {
            return Err(IsotopeError::Config(format!(
                "rate_tolerance must be positive, got {}",
                self.rate_tolerance
            )));
        }
        if let Some(t) = self
            .thermo_temperatures
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0))
        {
            return Err(IsotopeError::Config(format!(
                "thermo_temperatures must be positive, got {}",
                t
            )));
        }
        Ok(())
    }

    /// the isotope placed by the generator, e.g. 13C
    pub fn target_element(&self) -> Result<Element, IsotopeError> {
        Element::with_isotope(&self.element, self.isotope)
    }

    pub fn max_labels(&self) -> Result<usize, IsotopeError> {
        self.maximum_isotopic_atoms
            .ok_or(IsotopeError::MissingLabelBound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = IsotopeSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, IsotopeSettings::default());
        assert!(matches!(settings.max_labels(), Err(IsotopeError::MissingLabelBound)));
        assert_eq!(
            settings.target_element().unwrap(),
            Element::with_isotope("C", 13).unwrap()
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"maximumIsotopicAtoms": 2, "element": "O", "isotope": 18}}"#
        )
        .unwrap();
        let settings = IsotopeSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.max_labels().unwrap(), 2);
        assert_eq!(settings.target_element().unwrap().to_string(), "18O");
        assert_eq!(settings.thermo_temperatures.len(), 7);
        let untabulated = IsotopeSettings::from_json_str(r#"{"thermo_temperatures": []}"#).unwrap();
        assert!(untabulated.thermo_temperatures.is_empty());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            IsotopeSettings::from_json_str(r#"{"element": "Qq"}"#),
            Err(IsotopeError::UnknownElement(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_json_str(r#"{"element": "C", "isotope": 12}"#),
            Err(IsotopeError::Config(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_json_str(r#"{"element": "O", "isotope": 16, "maximumIsotopicAtoms": 1}"#),
            Err(IsotopeError::Config(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_json_str(r#"{"rate_tolerance": -1.0}"#),
            Err(IsotopeError::Config(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_json_str(r#"{"thermo_temperatures": [300, -1]}"#),
            Err(IsotopeError::Config(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_json_str("{not json"),
            Err(IsotopeError::Settings(_))
        ));
        assert!(matches!(
            IsotopeSettings::from_file("/definitely/not/here.json"),
            Err(IsotopeError::Io(_))
        ));
    }
}
