use crate::Kinetics::reaction::{DetachedReaction, Mechanism, Reaction};
use crate::Molecule::element::Element;
use crate::Molecule::oracle::ResonanceGenerator;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq)]
struct SavedLabel {
    species: usize,
    structure: usize,
    atom: usize,
    element: Element,
}

/// Species pool with isotope labels temporarily removed.
///
/// This is the restore token of an in-place strip: labels are written back by
/// [`StrippedLabels::restore`] or, at the latest, when the guard is dropped, so every exit
/// path (mismatch, oracle error, panic) restores the pool. While the guard lives it holds
/// the only borrow of the pool, read access goes through `Deref`.
#[derive(Debug)]
pub struct StrippedLabels<'a> {
    pool: &'a mut [Species],
    saved: Vec<SavedLabel>,
}

impl<'a> StrippedLabels<'a> {
    /// number of atoms whose label was removed
    pub fn n_stripped(&self) -> usize {
        self.saved.len()
    }

    pub fn restore(mut self) {
        self.restore_labels();
    }

    fn restore_labels(&mut self) {
        // reverse order, so an atom saved twice ends with its first saved element
        while let Some(label) = self.saved.pop() {
            self.pool[label.species].structures[label.structure].atoms[label.atom].element =
                label.element;
        }
    }
}

impl Deref for StrippedLabels<'_> {
    type Target = [Species];

    fn deref(&self) -> &[Species] {
        &*self.pool
    }
}

impl Drop for StrippedLabels<'_> {
    fn drop(&mut self) {
        self.restore_labels();
    }
}

/// Removes the isotope labels of every structure of the given species in place.
/// All indices are checked before anything is modified; repeated indices are stripped once.
pub fn strip_in_place<'a>(
    pool: &'a mut [Species],
    indices: &[usize],
) -> Result<StrippedLabels<'a>, IsotopeError> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= pool.len()) {
        return Err(IsotopeError::UnknownSpecies(bad));
    }
    let mut saved = Vec::new();
    let mut visited: Vec<usize> = Vec::with_capacity(indices.len());
    for &i in indices {
        if visited.contains(&i) {
            continue;
        }
        visited.push(i);
        for (s, structure) in pool[i].structures.iter_mut().enumerate() {
            for (atom, element) in structure.strip_labels() {
                saved.push(SavedLabel {
                    species: i,
                    structure: s,
                    atom,
                    element,
                });
            }
        }
    }
    Ok(StrippedLabels { pool, saved })
}

/// in-place strip of every reactant and product of a reaction
pub fn strip_reaction_in_place<'a>(
    pool: &'a mut [Species],
    reaction: &Reaction,
) -> Result<StrippedLabels<'a>, IsotopeError> {
    strip_in_place(pool, &reaction.species_indices())
}

/// Unlabeled copy of a species: the primary structure is stripped, the other resonance
/// forms are dropped and regenerated from the stripped structure.
pub fn strip_species_copy(
    species: &Species,
    resonance: &dyn ResonanceGenerator,
) -> Result<Species, IsotopeError> {
    let mut primary = species.primary()?.clone();
    primary.strip_labels();
    let mut structures = resonance.resonance_forms(&primary);
    if structures.is_empty() {
        structures.push(primary);
    }
    Ok(Species {
        structures,
        ..species.clone()
    })
}

/// Detached copy of a reaction with stripped copies of its species.
pub fn strip_reaction_copy(
    mechanism: &Mechanism,
    reaction: usize,
    resonance: &dyn ResonanceGenerator,
) -> Result<DetachedReaction, IsotopeError> {
    let detached = mechanism.detach(reaction)?;
    let strip_all = |list: &[Species]| {
        list.iter()
            .map(|s| strip_species_copy(s, resonance))
            .collect::<Result<Vec<Species>, IsotopeError>>()
    };
    Ok(DetachedReaction {
        reactants: strip_all(&detached.reactants)?,
        products: strip_all(&detached.products)?,
        ..detached
    })
}

pub fn is_species_enriched(species: &Species) -> bool {
    species.is_enriched()
}

/// true if any reactant or product carries an enriched isotope
pub fn is_reaction_enriched(mechanism: &Mechanism, reaction: usize) -> Result<bool, IsotopeError> {
    let (reactants, products) = mechanism.participants(reaction)?;
    Ok(reactants
        .iter()
        .chain(products.iter())
        .any(|s| is_species_enriched(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::kinetics::ElementaryStruct;
    use crate::Molecule::oracle::{GraphToolkit, IsomorphismOracle};
    use crate::Molecule::structure::Structure;

    fn pool() -> Vec<Species> {
        vec![
            Species::new("13CH3", Structure::from_symbols(&["13C"], &[]).unwrap()),
            Species::new(
                "ethanol",
                Structure::from_symbols(&["13C", "C", "18O"], &[(0, 1), (1, 2)]).unwrap(),
            ),
            Species::new("CH3", Structure::from_symbols(&["C"], &[]).unwrap()),
        ]
    }

    #[test]
    fn test_strip_and_restore() {
        let mut species = pool();
        let before = species.clone();
        {
            let stripped = strip_in_place(&mut species, &[1, 0, 1]).unwrap();
            assert_eq!(stripped.n_stripped(), 3);
            assert!(!stripped[0].primary().unwrap().has_isotope_labels());
            assert!(!stripped[1].primary().unwrap().has_isotope_labels());
            stripped.restore();
        }
        assert_eq!(species, before);
        let oracle = GraphToolkit::new();
        assert!(
            oracle
                .is_isomorphic(&species[1].structures[0], &before[1].structures[0], true)
                .unwrap()
        );
    }

    #[test]
    fn test_restore_on_drop() {
        let mut species = pool();
        let before = species.clone();
        let stripped = strip_in_place(&mut species, &[0]).unwrap();
        drop(stripped);
        assert_eq!(species, before);
    }

    #[test]
    fn test_unknown_index_rejected_without_mutation() {
        let mut species = pool();
        let before = species.clone();
        assert!(matches!(
            strip_in_place(&mut species, &[0, 9]),
            Err(IsotopeError::UnknownSpecies(9))
        ));
        assert_eq!(species, before);
    }

    #[test]
    fn test_copy_mode() {
        let species = pool();
        let toolkit = GraphToolkit::new();
        let stripped = strip_species_copy(&species[1], &toolkit).unwrap();
        assert!(!stripped.is_enriched());
        assert_eq!(stripped.structures.len(), 1);
        assert!(is_species_enriched(&species[1]));

        let mut mech = Mechanism::new();
        for s in species {
            mech.add_species(s);
        }
        mech.add_reaction(Reaction::new(
            "13CH3 + CH3",
            vec![0, 2],
            vec![1],
            ElementaryStruct::new(1e13, 0.0, 0.0).into(),
        ))
        .unwrap();
        assert!(is_reaction_enriched(&mech, 0).unwrap());
        let detached = strip_reaction_copy(&mech, 0, &toolkit).unwrap();
        assert!(detached.reactants.iter().all(|s| !s.is_enriched()));
        assert!(!detached.products[0].primary().unwrap().has_isotope_labels());
        // the mechanism itself is untouched
        assert!(mech.species[0].is_enriched());
    }

    #[test]
    fn test_reaction_in_place() {
        let mut mech = Mechanism::new();
        for s in pool() {
            mech.add_species(s);
        }
        let reaction = Reaction::new(
            "r",
            vec![0, 0],
            vec![1],
            ElementaryStruct::new(1.0, 0.0, 0.0).into(),
        );
        let stripped = strip_reaction_in_place(&mut mech.species, &reaction).unwrap();
        assert_eq!(stripped.n_stripped(), 3);
        drop(stripped);
        assert!(mech.species[0].is_enriched());
    }
}
