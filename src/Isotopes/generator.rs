use super::corrections::correct_entropy;
use crate::Molecule::element::Element;
use crate::Molecule::oracle::MoleculeToolkit;
use crate::Molecule::structure::Structure;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use crate::settings::IsotopeSettings;
use log::{debug, info};

struct Frame {
    structure: Structure,
    /// labels placed so far
    depth: usize,
    /// next atom to try
    cursor: usize,
}

/// Every structure reachable from `root` by relabeling up to `max_labels` atoms of the
/// target element, in depth-first pre-order. Contains duplicates: the same labeling is
/// reached along different paths.
pub fn enumerate_labelings(root: &Structure, max_labels: usize, target: &Element) -> Vec<Structure> {
    let mut pool = Vec::new();
    if max_labels == 0 {
        return pool;
    }
    let mut stack = vec![Frame {
        structure: root.clone(),
        depth: 0,
        cursor: 0,
    }];
    while let Some(frame) = stack.last_mut() {
        let next = frame.structure.atoms[frame.cursor..]
            .iter()
            .position(|atom| atom.element.symbol == target.symbol && atom.element != *target)
            .map(|offset| frame.cursor + offset);
        let Some(atom) = next else {
            stack.pop();
            continue;
        };
        frame.cursor = atom + 1;
        let labeled = frame.structure.relabeled(atom, target);
        let depth = frame.depth + 1;
        pool.push(labeled.clone());
        if depth < max_labels {
            stack.push(Frame {
                structure: labeled,
                depth,
                cursor: 0,
            });
        }
    }
    pool
}

/// Distinct isotopomers of `reference` with 1..=`max_labels` atoms carrying the `target`
/// isotope.
///
/// Candidates are deduplicated label-sensitively, keeping the first of each class in
/// enumeration order. Each isotopomer copies the reference thermochemistry and `reactive`
/// flag, gets its resonance forms regenerated and, if the reference has thermo, its entropy
/// corrected by the symmetry number ratio. Labels are `<reference>_iso<n>`, counted from 1.
pub fn generate_isotopomers<T: MoleculeToolkit>(
    reference: &Species,
    max_labels: usize,
    target: &Element,
    toolkit: &T,
) -> Result<Vec<Species>, IsotopeError> {
    let root = reference.primary()?;
    let candidates = enumerate_labelings(root, max_labels, target);
    debug!(
        "{}: {} labeled candidates with up to {} {} atoms",
        reference.label,
        candidates.len(),
        max_labels,
        target
    );
    let mut unique: Vec<Structure> = Vec::new();
    for candidate in candidates {
        let mut duplicate = false;
        for kept in unique.iter() {
            if toolkit.is_isomorphic(kept, &candidate, true)? {
                duplicate = true;
                break;
            }
        }
        if !duplicate {
            unique.push(candidate);
        }
    }

    let mut isotopomers = Vec::with_capacity(unique.len());
    for (n, structure) in unique.into_iter().enumerate() {
        let mut structures = toolkit.resonance_forms(&structure);
        if structures.is_empty() {
            structures.push(structure);
        }
        let mut isotopomer = Species {
            label: format!("{}_iso{}", reference.label, n + 1),
            index: None,
            structures,
            thermo: reference.thermo.clone(),
            reactive: reference.reactive,
        };
        if isotopomer.thermo.is_some() {
            correct_entropy(&mut isotopomer, reference, toolkit)?;
        }
        isotopomers.push(isotopomer);
    }
    info!(
        "Generated {} isotopomers of {} with up to {} {} atoms",
        isotopomers.len(),
        reference.label,
        max_labels,
        target
    );
    Ok(isotopomers)
}

/// Species pool for network expansion: Cp limits of the references are filled in,
/// then come the isotopomers of every reference, then the references themselves.
/// Isotopomer thermo given as NASA polynomials is tabulated at the settings temperatures.
pub fn expand_species_pool<T: MoleculeToolkit>(
    references: &[Species],
    settings: &IsotopeSettings,
    toolkit: &T,
) -> Result<Vec<Species>, IsotopeError> {
    settings.validate()?;
    let max_labels = settings.max_labels()?;
    let target = settings.target_element()?;
    let mut originals: Vec<Species> = references.to_vec();
    for species in originals.iter_mut() {
        if species.thermo.is_some() {
            species.fill_cp0_cp_inf()?;
        }
    }
    let mut pool = Vec::new();
    for species in originals.iter() {
        for mut isotopomer in generate_isotopomers(species, max_labels, &target, toolkit)? {
            isotopomer.tabulate_thermo(&settings.thermo_temperatures)?;
            pool.push(isotopomer);
        }
    }
    pool.extend(originals);
    info!("Species pool for network expansion: {} species", pool.len());
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Molecule::oracle::GraphToolkit;
    use crate::Thermodynamics::R;
    use crate::Thermodynamics::thermo_record::{NasaPolynomial, NasaThermo, ThermoData, ThermoRecord};
    use approx::assert_relative_eq;

    fn c13() -> Element {
        Element::with_isotope("C", 13).unwrap()
    }

    fn species(label: &str, symbols: &[&str], bonds: &[(usize, usize)]) -> Species {
        Species::new(label, Structure::from_symbols(symbols, bonds).unwrap())
            .with_thermo(ThermoRecord::Data(ThermoData::new(0.0, 200.0)))
    }

    #[test]
    fn test_single_carbon_gives_one_isotopomer() {
        let co = species("CO", &["C", "O"], &[(0, 1)]);
        let isotopomers = generate_isotopomers(&co, 1, &c13(), &GraphToolkit::new()).unwrap();
        assert_eq!(isotopomers.len(), 1);
        assert_eq!(isotopomers[0].label, "CO_iso1");
        assert_eq!(isotopomers[0].structures[0].to_string(), "[13C O]");
        // CO and 13CO both have symmetry number 1
        assert_relative_eq!(isotopomers[0].thermo.as_ref().unwrap().s298().unwrap(), 200.0);
    }

    #[test]
    fn test_ethane_skeleton() {
        let c2 = species("C2", &["C", "C"], &[(0, 1)]);
        let toolkit = GraphToolkit::new();
        assert_eq!(enumerate_labelings(c2.primary().unwrap(), 2, &c13()).len(), 4);
        let isotopomers = generate_isotopomers(&c2, 2, &c13(), &toolkit).unwrap();
        assert_eq!(isotopomers.len(), 2);
        // 13C-C: sigma 2 -> 1
        assert_relative_eq!(
            isotopomers[0].thermo.as_ref().unwrap().s298().unwrap(),
            200.0 + R * 2.0_f64.ln(),
            epsilon = 1e-9
        );
        // 13C-13C keeps sigma 2
        assert_relative_eq!(
            isotopomers[1].thermo.as_ref().unwrap().s298().unwrap(),
            200.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nothing_to_label() {
        let toolkit = GraphToolkit::new();
        let c2 = species("C2", &["C", "C"], &[(0, 1)]);
        assert!(generate_isotopomers(&c2, 0, &c13(), &toolkit).unwrap().is_empty());
        let water = species("H2O", &["H", "O", "H"], &[(0, 1), (1, 2)]);
        assert!(generate_isotopomers(&water, 3, &c13(), &toolkit).unwrap().is_empty());
    }

    #[test]
    fn test_label_bound_and_no_duplicates() {
        let propane = species("C3H8", &["C", "C", "C"], &[(0, 1), (1, 2)]);
        let toolkit = GraphToolkit::new();
        let root = propane.primary().unwrap().clone();
        for max_labels in 1..=3 {
            let isotopomers = generate_isotopomers(&propane, max_labels, &c13(), &toolkit).unwrap();
            for iso in isotopomers.iter() {
                let labels = root.isotope_differences(iso.primary().unwrap());
                assert!(labels >= 1 && labels <= max_labels);
            }
            for (i, a) in isotopomers.iter().enumerate() {
                for b in isotopomers.iter().skip(i + 1) {
                    assert!(!a.is_isomorphic(b, &toolkit, true).unwrap());
                }
            }
        }
        // terminal, central, two terminal, terminal+central, all three
        let all = generate_isotopomers(&propane, 3, &c13(), &toolkit).unwrap();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let propane = species("C3H8", &["C", "C", "C"], &[(0, 1), (1, 2)]);
        let toolkit = GraphToolkit::new();
        let first = generate_isotopomers(&propane, 2, &c13(), &toolkit).unwrap();
        let second = generate_isotopomers(&propane, 2, &c13(), &toolkit).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expand_species_pool() {
        let refs = vec![
            species("CO", &["C", "O"], &[(0, 1)]),
            species("C2", &["C", "C"], &[(0, 1)]),
        ];
        let settings = IsotopeSettings::new(1);
        let pool = expand_species_pool(&refs, &settings, &GraphToolkit::new()).unwrap();
        let labels: Vec<&str> = pool.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["CO_iso1", "C2_iso1", "CO", "C2"]);
        match &pool[2].thermo {
            Some(ThermoRecord::Data(data)) => assert_eq!(data.cp0, Some(3.5 * R)),
            _ => panic!("expected tabulated thermo"),
        }
        assert!(matches!(
            expand_species_pool(&refs, &IsotopeSettings::default(), &GraphToolkit::new()),
            Err(IsotopeError::MissingLabelBound)
        ));
    }

    #[test]
    fn test_rejects_unenriched_target() {
        let refs = vec![species("CO", &["C", "O"], &[(0, 1)])];
        let settings = IsotopeSettings {
            isotope: 12,
            ..IsotopeSettings::new(1)
        };
        assert!(matches!(
            expand_species_pool(&refs, &settings, &GraphToolkit::new()),
            Err(IsotopeError::Config(_))
        ));
    }

    #[test]
    fn test_nasa_isotopomers_are_tabulated() {
        // GRI-Mech 3.0 CO coefficients on a C-C skeleton, so the label breaks the symmetry
        let nasa = NasaThermo {
            polynomials: vec![
                NasaPolynomial {
                    t_min: 200.0,
                    t_max: 1000.0,
                    coeffs: [
                        3.57953347,
                        -6.1035368e-4,
                        1.01681433e-6,
                        9.07005884e-10,
                        -9.04424499e-13,
                        -1.4344086e4,
                        3.50840928,
                    ],
                },
                NasaPolynomial {
                    t_min: 1000.0,
                    t_max: 3500.0,
                    coeffs: [
                        2.71518561,
                        2.06252743e-3,
                        -9.98825771e-7,
                        2.30053008e-10,
                        -2.03647716e-14,
                        -1.41518724e4,
                        7.81868772,
                    ],
                },
            ],
            cp0: None,
            cp_inf: None,
        };
        let s_ref = nasa.s(298.15).unwrap();
        let c2 = Species::new("C2", Structure::from_symbols(&["C", "C"], &[(0, 1)]).unwrap())
            .with_thermo(ThermoRecord::Nasa(nasa));
        let toolkit = GraphToolkit::new();

        let pool = expand_species_pool(&[c2.clone()], &IsotopeSettings::new(1), &toolkit).unwrap();
        assert_eq!(pool.len(), 2);
        match &pool[0].thermo {
            Some(ThermoRecord::Data(data)) => {
                assert_eq!(data.cp_data.len(), 7);
                assert_eq!(data.cp_data[0].0, 300.0);
                assert_relative_eq!(data.cp_data[0].1, 29.1, epsilon = 0.1);
                assert_relative_eq!(data.s298, s_ref + R * 2.0_f64.ln(), epsilon = 1e-9);
                assert_eq!(data.cp0, Some(3.5 * R));
            }
            other => panic!("expected tabulated thermo, got {:?}", other),
        }
        // the reference keeps its polynomials
        assert!(matches!(pool[1].thermo, Some(ThermoRecord::Nasa(_))));

        let settings = IsotopeSettings {
            thermo_temperatures: Vec::new(),
            ..IsotopeSettings::new(1)
        };
        let pool = expand_species_pool(&[c2], &settings, &toolkit).unwrap();
        assert!(matches!(pool[0].thermo, Some(ThermoRecord::Nasa(_))));
    }
}
