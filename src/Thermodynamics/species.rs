use crate::Molecule::oracle::{IsomorphismOracle, SymmetryNumber};
use crate::Molecule::structure::Structure;
use crate::Thermodynamics::R;
use crate::Thermodynamics::thermo_record::ThermoRecord;
use crate::errors::IsotopeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chemical species: resonance structures (the first one is primary) and thermochemistry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub label: String,
    /// index assigned by the reaction model, used in simulation column headers
    #[serde(default)]
    pub index: Option<usize>,
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub thermo: Option<ThermoRecord>,
    #[serde(default = "default_reactive")]
    pub reactive: bool,
}

fn default_reactive() -> bool {
    true
}

impl Species {
    pub fn new(label: &str, structure: Structure) -> Self {
        Self {
            label: label.to_string(),
            index: None,
            structures: vec![structure],
            thermo: None,
            reactive: true,
        }
    }

    pub fn with_thermo(mut self, thermo: ThermoRecord) -> Self {
        self.thermo = Some(thermo);
        self
    }

    pub fn primary(&self) -> Result<&Structure, IsotopeError> {
        self.structures.first().ok_or_else(|| IsotopeError::EmptySpecies {
            species: self.label.clone(),
        })
    }

    /// Symmetry number of the primary structure; must be positive and finite.
    pub fn symmetry_number(&self, provider: &dyn SymmetryNumber) -> Result<f64, IsotopeError> {
        let sigma = provider.symmetry_number(self.primary()?);
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(IsotopeError::NonPositiveSymmetry {
                entity: self.label.clone(),
                value: sigma,
            });
        }
        Ok(sigma)
    }

    /// any resonance form of one matches any resonance form of the other
    pub fn is_isomorphic(
        &self,
        other: &Species,
        oracle: &dyn IsomorphismOracle,
        label_sensitive: bool,
    ) -> Result<bool, IsotopeError> {
        for a in self.structures.iter() {
            for b in other.structures.iter() {
                if oracle.is_isomorphic(a, b, label_sensitive)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Enriched if the primary structure has an atom with a non-dominant isotope.
    pub fn is_enriched(&self) -> bool {
        self.structures
            .first()
            .map(|s| s.is_enriched())
            .unwrap_or(false)
    }

    /// Heat capacity limits from the atom count: 2.5R for atoms, 3.5R (linear diatomics)
    /// or 4R at T -> 0, plus R per vibrational mode at T -> infinity.
    /// Molecules with more than two atoms are treated as nonlinear.
    pub fn fill_cp0_cp_inf(&mut self) -> Result<(), IsotopeError> {
        let n_atoms = self.primary()?.atoms.len() as f64;
        let (cp0, cp_inf) = if n_atoms <= 1.0 {
            (2.5 * R, 2.5 * R)
        } else if n_atoms == 2.0 {
            (3.5 * R, 3.5 * R + (3.0 * n_atoms - 5.0) * R)
        } else {
            (4.0 * R, 4.0 * R + (3.0 * n_atoms - 6.0) * R)
        };
        match self.thermo.as_mut() {
            Some(thermo) => {
                thermo.set_cp_limits(cp0, cp_inf);
                Ok(())
            }
            None => Err(IsotopeError::MissingThermo {
                species: self.label.clone(),
            }),
        }
    }

    /// Replaces NASA polynomials by data tabulated at `temperatures`, keeping S298, H298
    /// and the Cp limits. Tabulated species, species without thermo and an empty
    /// temperature list are left as they are.
    pub fn tabulate_thermo(&mut self, temperatures: &[f64]) -> Result<(), IsotopeError> {
        if temperatures.is_empty() {
            return Ok(());
        }
        if let Some(thermo @ ThermoRecord::Nasa(_)) = self.thermo.as_ref() {
            let data = thermo
                .to_thermo_data(temperatures)
                .ok_or_else(|| IsotopeError::MissingThermo {
                    species: self.label.clone(),
                })?;
            self.thermo = Some(ThermoRecord::Data(data));
        }
        Ok(())
    }

    /// "label(index)" as written by the simulation profile writer
    pub fn column_header(&self) -> Option<String> {
        self.index.map(|i| format!("{}({})", self.label, i))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.structures.first() {
            Some(s) => write!(f, "{} {}", self.label, s),
            None => write!(f, "{}", self.label),
        }
    }
}
