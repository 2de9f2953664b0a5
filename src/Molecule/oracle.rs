//! Capabilities the isotope tools consume: isomorphism test, symmetry numbers and
//! resonance forms. `GraphToolkit` is the default implementation on top of petgraph.
use super::structure::Structure;
use crate::errors::IsotopeError;
use petgraph::algo::is_isomorphic_matching;

/// Structural equivalence of two structures.
/// Must be deterministic and free of side effects.
pub trait IsomorphismOracle {
    /// `label_sensitive == false` ignores isotope markers
    fn is_isomorphic(
        &self,
        a: &Structure,
        b: &Structure,
        label_sensitive: bool,
    ) -> Result<bool, IsotopeError>;
}

pub trait SymmetryNumber {
    fn symmetry_number(&self, structure: &Structure) -> f64;
}

pub trait ResonanceGenerator {
    /// all resonance forms, the given structure first
    fn resonance_forms(&self, structure: &Structure) -> Vec<Structure>;
}

/// everything the generator and the rate-factor corrector need
pub trait MoleculeToolkit: IsomorphismOracle + SymmetryNumber + ResonanceGenerator {}

impl<T: IsomorphismOracle + SymmetryNumber + ResonanceGenerator> MoleculeToolkit for T {}

/// petgraph VF2 isomorphism, automorphism-count symmetry numbers, no resonance.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphToolkit;

impl GraphToolkit {
    pub fn new() -> Self {
        GraphToolkit
    }
}

impl IsomorphismOracle for GraphToolkit {
    fn is_isomorphic(
        &self,
        a: &Structure,
        b: &Structure,
        label_sensitive: bool,
    ) -> Result<bool, IsotopeError> {
        if a.atoms.len() != b.atoms.len() || a.bonds.len() != b.bonds.len() {
            return Ok(false);
        }
        let g0 = a.to_graph(label_sensitive)?;
        let g1 = b.to_graph(label_sensitive)?;
        Ok(is_isomorphic_matching(
            &g0,
            &g1,
            |x, y| x == y,
            |x, y| x == y,
        ))
    }
}

impl SymmetryNumber for GraphToolkit {
    fn symmetry_number(&self, structure: &Structure) -> f64 {
        structure.automorphism_count() as f64
    }
}

impl ResonanceGenerator for GraphToolkit {
    fn resonance_forms(&self, structure: &Structure) -> Vec<Structure> {
        vec![structure.clone()]
    }
}
