use super::stripper::strip_in_place;
use crate::Kinetics::reaction::{Mechanism, resolve, same_reaction};
use crate::Molecule::oracle::IsomorphismOracle;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;

/// True if species `a` and `b` of the pool differ only in isotope labeling.
/// Labels are removed in place for the comparison and restored before returning,
/// also when the oracle fails.
pub fn same_species_family(
    pool: &mut [Species],
    a: usize,
    b: usize,
    oracle: &dyn IsomorphismOracle,
) -> Result<bool, IsotopeError> {
    let stripped = strip_in_place(pool, &[a, b])?;
    let result = if a == b {
        Ok(true)
    } else {
        stripped[a].is_isomorphic(&stripped[b], oracle, true)
    };
    stripped.restore();
    result
}

/// True if reactions `a` and `b` of the mechanism differ only in isotope labeling.
pub fn same_reaction_family(
    mechanism: &mut Mechanism,
    a: usize,
    b: usize,
    oracle: &dyn IsomorphismOracle,
) -> Result<bool, IsotopeError> {
    let Mechanism { species, reactions } = mechanism;
    let rxn_a = reactions.get(a).ok_or(IsotopeError::UnknownReaction(a))?;
    let rxn_b = reactions.get(b).ok_or(IsotopeError::UnknownReaction(b))?;
    if a == b {
        return Ok(true);
    }
    let mut indices = rxn_a.species_indices();
    indices.extend(rxn_b.species_indices());
    let stripped = strip_in_place(species, &indices)?;
    let result = (|| -> Result<bool, IsotopeError> {
        let a_side = (
            resolve(&stripped, &rxn_a.reactants)?,
            resolve(&stripped, &rxn_a.products)?,
        );
        let b_side = (
            resolve(&stripped, &rxn_b.reactants)?,
            resolve(&stripped, &rxn_b.products)?,
        );
        same_reaction(
            (&a_side.0, &a_side.1),
            (&b_side.0, &b_side.1),
            oracle,
            true,
        )
    })();
    stripped.restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::kinetics::{ElementaryStruct, RateLaw};
    use crate::Kinetics::reaction::Reaction;
    use crate::Molecule::oracle::GraphToolkit;
    use crate::Molecule::structure::Structure;

    /// oracle that always fails, labels must still come back
    struct BrokenOracle;
    impl IsomorphismOracle for BrokenOracle {
        fn is_isomorphic(
            &self,
            _a: &Structure,
            _b: &Structure,
            _label_sensitive: bool,
        ) -> Result<bool, IsotopeError> {
            Err(IsotopeError::Oracle("toolkit unavailable".to_string()))
        }
    }

    fn species() -> Vec<Species> {
        vec![
            Species::new("C2", Structure::from_symbols(&["C", "C"], &[(0, 1)]).unwrap()),
            Species::new("13C-C", Structure::from_symbols(&["13C", "C"], &[(0, 1)]).unwrap()),
            Species::new("CO", Structure::from_symbols(&["C", "O"], &[(0, 1)]).unwrap()),
            Species::new("C", Structure::from_symbols(&["C"], &[]).unwrap()),
            Species::new("13C", Structure::from_symbols(&["13C"], &[]).unwrap()),
        ]
    }

    #[test]
    fn test_species_family() {
        let mut pool = species();
        let before = pool.clone();
        let oracle = GraphToolkit::new();
        assert!(same_species_family(&mut pool, 0, 1, &oracle).unwrap());
        assert!(!same_species_family(&mut pool, 1, 2, &oracle).unwrap());
        assert!(same_species_family(&mut pool, 1, 1, &oracle).unwrap());
        assert_eq!(pool, before);
    }

    #[test]
    fn test_restore_after_oracle_failure() {
        let mut pool = species();
        let before = pool.clone();
        let result = same_species_family(&mut pool, 0, 1, &BrokenOracle);
        assert!(matches!(result, Err(IsotopeError::Oracle(_))));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_reaction_family() {
        let mut mech = Mechanism::new();
        for s in species() {
            mech.add_species(s);
        }
        let law = || -> RateLaw { ElementaryStruct::new(1e13, 0.0, 0.0).into() };
        // C + C -> C2, 13C + C -> 13C-C, C2 -> C + C, C + C -> CO
        mech.add_reaction(Reaction::new("r0", vec![3, 3], vec![0], law())).unwrap();
        mech.add_reaction(Reaction::new("r1", vec![4, 3], vec![1], law())).unwrap();
        mech.add_reaction(Reaction::new("r2", vec![0], vec![3, 3], law())).unwrap();
        mech.add_reaction(Reaction::new("r3", vec![3, 3], vec![2], law())).unwrap();
        let before = mech.clone();
        let oracle = GraphToolkit::new();
        assert!(same_reaction_family(&mut mech, 0, 1, &oracle).unwrap());
        assert!(same_reaction_family(&mut mech, 1, 2, &oracle).unwrap());
        assert!(!same_reaction_family(&mut mech, 1, 3, &oracle).unwrap());
        assert!(matches!(
            same_reaction_family(&mut mech, 0, 8, &oracle),
            Err(IsotopeError::UnknownReaction(8))
        ));
        assert_eq!(mech, before);
    }
}
