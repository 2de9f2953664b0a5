use crate::Isotopes::concentrations::Trajectory;
use crate::Isotopes::corrections::correct_rate_factors;
use crate::Isotopes::generator::generate_isotopomers;
use crate::Isotopes::study::{IsotopeStudy, NetworkExpander, Simulator};
use crate::Kinetics::kinetics::{Arrhenius, ElementaryStruct, FalloffStruct, KineticModel, PressureStruct, RateLaw};
use crate::Kinetics::reaction::{Mechanism, Reaction};
use crate::Molecule::element::Element;
use crate::Molecule::oracle::{GraphToolkit, IsomorphismOracle};
use crate::Molecule::structure::{Bond, BondOrder, Structure};
use crate::Thermodynamics::R;
use crate::Thermodynamics::species::Species;
use crate::Thermodynamics::thermo_record::{ThermoData, ThermoRecord};
use crate::errors::IsotopeError;
use crate::settings::IsotopeSettings;
use log::error;
use nalgebra::DMatrix;
use prettytable::{Table, row};

fn ethane() -> Result<Species, IsotopeError> {
    Ok(
        Species::new("C2H6", Structure::from_symbols(&["C", "C"], &[(0, 1)])?)
            .with_thermo(ThermoRecord::Data(ThermoData::new(-84.0e3, 229.2))),
    )
}

fn methyl() -> Result<Species, IsotopeError> {
    Ok(Species::new("CH3", Structure::from_symbols(&["C"], &[])?)
        .with_thermo(ThermoRecord::Data(ThermoData::new(146.0e3, 194.0))))
}

/// all recombinations of one-carbon species whose product is in the pool
struct MethylRecombination {
    kinetics: RateLaw,
}

impl MethylRecombination {
    fn elementary() -> Self {
        Self {
            kinetics: ElementaryStruct::new(1.0e13, 0.0, 0.0).into(),
        }
    }

    /// Troe falloff, rate constants in cm3/(mol*s)
    fn falloff() -> Self {
        Self {
            kinetics: FalloffStruct {
                low_rate: Arrhenius::new(8.054e31, -3.75, 4.1e3),
                high_rate: Arrhenius::new(2.277e15, -0.69, 0.73e3),
                troe: Some(vec![0.0, 570.0, 1.0e30, 1.0e30]),
            }
            .into(),
        }
    }
}

impl NetworkExpander for MethylRecombination {
    fn expand(&mut self, pool: Vec<Species>) -> Result<Mechanism, IsotopeError> {
        let toolkit = GraphToolkit::new();
        let mut mechanism = Mechanism::new();
        for (i, mut species) in pool.into_iter().enumerate() {
            species.index = Some(i);
            mechanism.add_species(species);
        }
        let radicals: Vec<usize> = (0..mechanism.species.len())
            .filter(|&i| {
                mechanism.species[i]
                    .primary()
                    .map(|s| s.atoms.len() == 1)
                    .unwrap_or(false)
            })
            .collect();
        for (n, &i) in radicals.iter().enumerate() {
            for &j in radicals[n..].iter() {
                let atoms = vec![
                    mechanism.species[i].primary()?.atoms[0].clone(),
                    mechanism.species[j].primary()?.atoms[0].clone(),
                ];
                let product = Structure::new(
                    atoms,
                    vec![Bond {
                        a: 0,
                        b: 1,
                        order: BondOrder::Single,
                    }],
                )?;
                let mut found = None;
                for (k, species) in mechanism.species.iter().enumerate() {
                    if toolkit.is_isomorphic(species.primary()?, &product, true)? {
                        found = Some(k);
                        break;
                    }
                }
                if let Some(k) = found {
                    let label = format!(
                        "{} + {}",
                        mechanism.species[i].label, mechanism.species[j].label
                    );
                    mechanism.add_reaction(Reaction::new(
                        &label,
                        vec![i, j],
                        vec![k],
                        self.kinetics.clone(),
                    ))?;
                }
            }
        }
        Ok(mechanism)
    }
}

/// statistical distribution for a 13C fraction `p` of the methyl pool
struct StatisticalMixture {
    p: f64,
}

impl Simulator for StatisticalMixture {
    fn simulate(&mut self, mechanism: &Mechanism) -> Result<Trajectory, IsotopeError> {
        let p = self.p;
        let times = vec![0.0, 1.0e-3, 1.0e-2];
        let mut headers = Vec::new();
        let mut column_values = Vec::new();
        for species in mechanism.species.iter() {
            headers.push(
                species
                    .column_header()
                    .unwrap_or_else(|| species.label.clone()),
            );
            let structure = species.primary()?;
            let labeled = structure.atoms.iter().filter(|a| a.element.is_enriched()).count() as i32;
            let plain = structure.atoms.len() as i32 - labeled;
            let multiplicity = if labeled == 1 && plain == 1 { 2.0 } else { 1.0 };
            column_values.push(multiplicity * p.powi(labeled) * (1.0 - p).powi(plain));
        }
        let data = DMatrix::from_fn(times.len(), headers.len(), |row, col| {
            (1.0 + row as f64) * column_values[col]
        });
        Trajectory::new(times, headers, data)
    }
}

pub fn isotope_examples(task: usize) {
    let result = match task {
        // ISOTOPOMERS OF A C3 SKELETON
        0 => (|| -> Result<(), IsotopeError> {
            let propane = Species::new(
                "C3H8",
                Structure::from_symbols(&["C", "C", "C"], &[(0, 1), (1, 2)])?,
            )
            .with_thermo(ThermoRecord::Data(ThermoData::new(-104.7e3, 270.3)));
            let c13 = Element::with_isotope("C", 13)?;
            let isotopomers = generate_isotopomers(&propane, 3, &c13, &GraphToolkit::new())?;
            let mut table = Table::new();
            table.add_row(row!["Isotopomer", "Structure", "S298, J/(mol*K)"]);
            for iso in isotopomers.iter() {
                let s298 = iso.thermo.as_ref().and_then(|t| t.s298()).unwrap_or(f64::NAN);
                table.add_row(row![iso.label, iso.primary()?.to_string(), format!("{:.3}", s298)]);
            }
            table.printstd();
            Ok(())
        })(),
        // RATE FACTOR CONSISTENCY FOR METHYL RECOMBINATION
        1 => (|| -> Result<(), IsotopeError> {
            let toolkit = GraphToolkit::new();
            let settings = IsotopeSettings::new(2);
            let pool = crate::Isotopes::generator::expand_species_pool(
                &[methyl()?, ethane()?],
                &settings,
                &toolkit,
            )?;
            let mut mechanism = MethylRecombination::elementary().expand(pool)?;
            let reactions: Vec<usize> = (0..mechanism.reactions.len()).collect();
            let report = correct_rate_factors(&mut mechanism, &reactions, &toolkit, &settings)?;
            report.print();
            for (i, reaction) in mechanism.reactions.iter().enumerate() {
                println!(
                    "{}: A = {:.3e}",
                    mechanism.equation(i)?,
                    reaction.kinetics.pre_exponential().unwrap_or(f64::NAN)
                );
            }
            Ok(())
        })(),
        // COMPLETE STUDY
        2 => (|| -> Result<(), IsotopeError> {
            let toolkit = GraphToolkit::new();
            let study = IsotopeStudy::new(IsotopeSettings::new(2), &toolkit);
            let result = study.run(
                &[methyl()?, ethane()?],
                &mut MethylRecombination::elementary(),
                &mut StatisticalMixture { p: 0.011 },
            )?;
            result.correction_report.print();
            for (i, table) in result.probabilities.computed() {
                println!("isotope family {:?}", result.species_clusters[i]);
                table.print_table();
            }
            for failure in result.probabilities.failures.iter() {
                println!("isotope family {:?}: {}", failure.members, failure.error);
            }
            Ok(())
        })(),
        // RATE CONSTANTS OF A PRESSURE DEPENDENT FAMILY
        3 => (|| -> Result<(), IsotopeError> {
            let toolkit = GraphToolkit::new();
            let settings = IsotopeSettings::new(2);
            let pool = crate::Isotopes::generator::expand_species_pool(
                &[methyl()?, ethane()?],
                &settings,
                &toolkit,
            )?;
            let mut mechanism = MethylRecombination::falloff().expand(pool)?;
            let reactions: Vec<usize> = (0..mechanism.reactions.len()).collect();
            let report = correct_rate_factors(&mut mechanism, &reactions, &toolkit, &settings)?;
            report.print();
            // dissociation of the unlabeled ethane, tabulated by pressure
            let ethane = mechanism
                .find_species("C2H6")
                .ok_or_else(|| IsotopeError::Config("no C2H6 in the pool".to_string()))?;
            let methyl = mechanism
                .find_species("CH3")
                .ok_or_else(|| IsotopeError::Config("no CH3 in the pool".to_string()))?;
            mechanism.add_reaction(Reaction::new(
                "C2H6 dissociation",
                vec![ethane],
                vec![methyl, methyl],
                PressureStruct {
                    plog: vec![
                        (1.0e4, Arrhenius::new(4.6e61, -13.6, 4.6e5)),
                        (1.0e5, Arrhenius::new(8.7e46, -9.4, 4.3e5)),
                        (1.0e6, Arrhenius::new(1.9e31, -4.8, 4.0e5)),
                    ],
                }
                .into(),
            ))?;
            let temperatures = [800.0, 1000.0, 1200.0];
            for pressure in [1.0e4, 1.0e5, 1.0e6] {
                // ideal gas third-body concentration at 1000 K, mol/cm3
                let concentration = pressure / (R * 1000.0) * 1.0e-6;
                println!("P = {:.1e} Pa", pressure);
                mechanism
                    .rate_table(&temperatures, pressure, concentration)?
                    .printstd();
            }
            Ok(())
        })(),
        _ => {
            println!("no example with number {}", task);
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("Example {} failed: {}", task, e);
    }
}
