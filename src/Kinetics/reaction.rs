use crate::Kinetics::kinetics::{KineticModel, RateLaw};
use crate::Molecule::oracle::IsomorphismOracle;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

/// Reaction of a mechanism. Reactants and products are indices into the species pool
/// of the mechanism, so reactions share species and never own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub label: String,
    #[serde(default)]
    pub index: Option<usize>,
    pub reactants: Vec<usize>,
    pub products: Vec<usize>,
    pub kinetics: RateLaw,
}

impl Reaction {
    pub fn new(label: &str, reactants: Vec<usize>, products: Vec<usize>, kinetics: RateLaw) -> Self {
        Self {
            label: label.to_string(),
            index: None,
            reactants,
            products,
            kinetics,
        }
    }

    /// every species index of the reaction, reactants first, each index once
    pub fn species_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = Vec::with_capacity(self.reactants.len() + self.products.len());
        for &i in self.reactants.iter().chain(self.products.iter()) {
            if !indices.contains(&i) {
                indices.push(i);
            }
        }
        indices
    }

    /// label with the model index, as used in diagnostics
    pub fn identity(&self) -> String {
        match self.index {
            Some(i) => format!("{} (#{})", self.label, i),
            None => self.label.clone(),
        }
    }
}

/// Reaction that owns its species, e.g. a reaction whose species were stripped by copy.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedReaction {
    pub label: String,
    pub reactants: Vec<Species>,
    pub products: Vec<Species>,
    pub kinetics: RateLaw,
}

/// Species pool plus the reactions between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
}

impl Mechanism {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_species(&mut self, species: Species) -> usize {
        self.species.push(species);
        self.species.len() - 1
    }

    /// adds a reaction after checking that its species exist
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<usize, IsotopeError> {
        for &i in reaction.reactants.iter().chain(reaction.products.iter()) {
            if i >= self.species.len() {
                return Err(IsotopeError::UnknownSpecies(i));
            }
        }
        self.reactions.push(reaction);
        Ok(self.reactions.len() - 1)
    }

    /// index of the species with that label
    pub fn find_species(&self, label: &str) -> Option<usize> {
        self.species.iter().position(|s| s.label == label)
    }

    pub fn reaction(&self, i: usize) -> Result<&Reaction, IsotopeError> {
        self.reactions.get(i).ok_or(IsotopeError::UnknownReaction(i))
    }

    /// (reactants, products) of a reaction resolved to species
    pub fn participants(&self, i: usize) -> Result<(Vec<&Species>, Vec<&Species>), IsotopeError> {
        let reaction = self.reaction(i)?;
        Ok((
            resolve(&self.species, &reaction.reactants)?,
            resolve(&self.species, &reaction.products)?,
        ))
    }

    /// "A + B <=> C"
    pub fn equation(&self, i: usize) -> Result<String, IsotopeError> {
        let (reactants, products) = self.participants(i)?;
        let side = |list: &[&Species]| {
            list.iter()
                .map(|s| s.label.as_str())
                .collect::<Vec<&str>>()
                .join(" + ")
        };
        Ok(format!("{} <=> {}", side(&reactants), side(&products)))
    }

    /// rate constant of every reaction at temperature (K), pressure (Pa) and third-body
    /// concentration
    pub fn rate_constants(&self, temperature: f64, pressure: f64, concentration: f64) -> Vec<f64> {
        self.reactions
            .iter()
            .map(|r| r.kinetics.K_const(temperature, pressure, concentration))
            .collect()
    }

    /// k of every reaction (rows) at every temperature (columns)
    pub fn rate_table(
        &self,
        temperatures: &[f64],
        pressure: f64,
        concentration: f64,
    ) -> Result<Table, IsotopeError> {
        let mut table = Table::new();
        let mut header = vec![Cell::new("Reaction")];
        header.extend(temperatures.iter().map(|t| Cell::new(&format!("k({} K)", t))));
        table.add_row(Row::new(header));
        let columns: Vec<Vec<f64>> = temperatures
            .iter()
            .map(|&t| self.rate_constants(t, pressure, concentration))
            .collect();
        for i in 0..self.reactions.len() {
            let mut row = vec![Cell::new(&self.equation(i)?)];
            row.extend(columns.iter().map(|k| Cell::new(&format!("{:.4e}", k[i]))));
            table.add_row(Row::new(row));
        }
        Ok(table)
    }

    /// Reaction with stripped or otherwise modified species resolved to owned copies.
    pub fn detach(&self, i: usize) -> Result<DetachedReaction, IsotopeError> {
        let reaction = self.reaction(i)?;
        let (reactants, products) = self.participants(i)?;
        Ok(DetachedReaction {
            label: reaction.label.clone(),
            reactants: reactants.into_iter().cloned().collect(),
            products: products.into_iter().cloned().collect(),
            kinetics: reaction.kinetics.clone(),
        })
    }
}

pub fn resolve<'a>(pool: &'a [Species], indices: &[usize]) -> Result<Vec<&'a Species>, IsotopeError> {
    indices
        .iter()
        .map(|&i| pool.get(i).ok_or(IsotopeError::UnknownSpecies(i)))
        .collect()
}

/// Multiset match of two species lists: every species of `a` pairs with a distinct
/// isomorphic species of `b`.
pub fn same_species_lists(
    a: &[&Species],
    b: &[&Species],
    oracle: &dyn IsomorphismOracle,
    label_sensitive: bool,
) -> Result<bool, IsotopeError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    let mut taken = vec![false; b.len()];
    match_from(0, a, b, &mut taken, oracle, label_sensitive)
}

fn match_from(
    i: usize,
    a: &[&Species],
    b: &[&Species],
    taken: &mut [bool],
    oracle: &dyn IsomorphismOracle,
    label_sensitive: bool,
) -> Result<bool, IsotopeError> {
    if i == a.len() {
        return Ok(true);
    }
    for j in 0..b.len() {
        if taken[j] || !a[i].is_isomorphic(b[j], oracle, label_sensitive)? {
            continue;
        }
        taken[j] = true;
        if match_from(i + 1, a, b, taken, oracle, label_sensitive)? {
            return Ok(true);
        }
        taken[j] = false;
    }
    Ok(false)
}

/// Two reactions are isomorphic if reactants match reactants and products match
/// products, or if they match in the reverse direction.
pub fn same_reaction(
    (a_reactants, a_products): (&[&Species], &[&Species]),
    (b_reactants, b_products): (&[&Species], &[&Species]),
    oracle: &dyn IsomorphismOracle,
    label_sensitive: bool,
) -> Result<bool, IsotopeError> {
    if same_species_lists(a_reactants, b_reactants, oracle, label_sensitive)?
        && same_species_lists(a_products, b_products, oracle, label_sensitive)?
    {
        return Ok(true);
    }
    Ok(same_species_lists(a_reactants, b_products, oracle, label_sensitive)?
        && same_species_lists(a_products, b_reactants, oracle, label_sensitive)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::kinetics::{Arrhenius, ElementaryStruct, FalloffStruct, PressureStruct};
    use crate::Molecule::oracle::GraphToolkit;
    use crate::Molecule::structure::Structure;
    use approx::assert_relative_eq;

    fn mechanism() -> Mechanism {
        let mut mech = Mechanism::new();
        let ch3 = mech.add_species(Species::new("CH3", Structure::from_symbols(&["C"], &[]).unwrap()));
        let c2 = mech.add_species(Species::new(
            "C2H6",
            Structure::from_symbols(&["C", "C"], &[(0, 1)]).unwrap(),
        ));
        mech.add_reaction(Reaction::new(
            "recombination",
            vec![ch3, ch3],
            vec![c2],
            ElementaryStruct::new(1e13, 0.0, 0.0).into(),
        ))
        .unwrap();
        mech
    }

    #[test]
    fn test_add_reaction_checks_species() {
        let mut mech = mechanism();
        let bad = Reaction::new("bad", vec![7], vec![0], ElementaryStruct::new(1.0, 0.0, 0.0).into());
        assert!(matches!(mech.add_reaction(bad), Err(IsotopeError::UnknownSpecies(7))));
        assert_eq!(mech.equation(0).unwrap(), "CH3 + CH3 <=> C2H6");
        assert_eq!(mech.reactions[0].species_indices(), vec![0, 1]);
        assert_eq!(mech.find_species("C2H6"), Some(1));
    }

    #[test]
    fn test_reverse_direction_is_same_reaction() {
        let mech = mechanism();
        let oracle = GraphToolkit::new();
        let (r, p) = mech.participants(0).unwrap();
        assert!(same_reaction((&r, &p), (&p, &r), &oracle, true).unwrap());
        assert!(!same_species_lists(&r, &p, &oracle, true).unwrap());
        let detached = mech.detach(0).unwrap();
        assert_eq!(detached.reactants.len(), 2);
        assert_eq!(detached.products[0].label, "C2H6");
    }

    #[test]
    fn test_rate_constants_of_pressure_dependent_laws() {
        let mut mech = mechanism();
        mech.add_reaction(Reaction::new(
            "falloff recombination",
            vec![0, 0],
            vec![1],
            FalloffStruct {
                low_rate: Arrhenius::new(1e10, 0.0, 0.0),
                high_rate: Arrhenius::new(1e6, 0.0, 0.0),
                troe: Some(vec![0.5, 300.0, 1000.0]),
            }
            .into(),
        ))
        .unwrap();
        mech.add_reaction(Reaction::new(
            "dissociation",
            vec![1],
            vec![0, 0],
            PressureStruct {
                plog: vec![
                    (1e4, Arrhenius::new(1.0, 0.0, 0.0)),
                    (1e6, Arrhenius::new(100.0, 0.0, 0.0)),
                ],
            }
            .into(),
        ))
        .unwrap();

        let k = mech.rate_constants(1000.0, 1e5, 1e-4);
        assert_eq!(k.len(), 3);
        assert_relative_eq!(k[0], 1e13);
        // P_r = 1 at M = 1e-4; Troe F_c = 0.5*e^(-10/3) + 0.5*e^(-1)
        let f_c: f64 = 0.5 * f64::exp(-1000.0 / 300.0) + 0.5 * f64::exp(-1.0);
        let c = -0.4 - 0.67 * f_c.log10();
        let n = 0.75 - 1.27 * f_c.log10();
        let f_1 = c / (n - 0.14 * c);
        let troe = 10.0_f64.powf(f_c.log10() / (1.0 + f_1 * f_1));
        assert_relative_eq!(k[1], 1e6 * 0.5 * troe, max_relative = 1e-12);
        assert!(k[1] < 0.5e6);
        assert_relative_eq!(k[2], 10.0, max_relative = 1e-12);

        // high-pressure limit is reached at large M
        let k_high = mech.rate_constants(1000.0, 1e5, 1e6);
        assert_relative_eq!(k_high[1], 1e6, max_relative = 1e-2);

        let table = mech.rate_table(&[500.0, 1000.0], 1e5, 1e-4).unwrap();
        assert_eq!(table.len(), 4);
    }
}
