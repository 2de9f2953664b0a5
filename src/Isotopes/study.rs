use super::clustering::cluster_species;
use super::concentrations::{IsotopomerDistributions, Trajectory, isotopomer_probabilities};
use super::corrections::{CorrectionReport, correct_rate_factors};
use super::generator::expand_species_pool;
use crate::Kinetics::reaction::Mechanism;
use crate::Molecule::oracle::MoleculeToolkit;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use crate::settings::IsotopeSettings;
use log::{info, warn};

/// Builds the reaction network for a species pool (an RMG-like generator).
pub trait NetworkExpander {
    fn expand(&mut self, pool: Vec<Species>) -> Result<Mechanism, IsotopeError>;
}

/// Integrates a mechanism and returns the concentration profiles.
pub trait Simulator {
    fn simulate(&mut self, mechanism: &Mechanism) -> Result<Trajectory, IsotopeError>;
}

#[derive(Debug)]
pub struct StudyResult {
    pub mechanism: Mechanism,
    pub species_clusters: Vec<Vec<usize>>,
    pub correction_report: CorrectionReport,
    pub trajectory: Trajectory,
    /// isotopomer distribution of every species cluster, with the clusters that failed
    pub probabilities: IsotopomerDistributions,
}

/// Isotope labeling study of a reaction model: isotopomer generation, network expansion,
/// rate factor consistency, simulation and isotopomer distributions.
pub struct IsotopeStudy<'a, T: MoleculeToolkit> {
    pub settings: IsotopeSettings,
    pub toolkit: &'a T,
}

impl<'a, T: MoleculeToolkit> IsotopeStudy<'a, T> {
    pub fn new(settings: IsotopeSettings, toolkit: &'a T) -> Self {
        Self { settings, toolkit }
    }

    pub fn run(
        &self,
        references: &[Species],
        expander: &mut dyn NetworkExpander,
        simulator: &mut dyn Simulator,
    ) -> Result<StudyResult, IsotopeError> {
        self.settings.validate()?;
        let max_labels = self.settings.max_labels()?;
        info!(
            "Isotope study of {} species, up to {} {} atoms per species",
            references.len(),
            max_labels,
            self.settings.target_element()?
        );
        let pool = expand_species_pool(references, &self.settings, self.toolkit)?;
        let mut mechanism = expander.expand(pool)?;
        info!(
            "Expanded mechanism: {} species, {} reactions",
            mechanism.species.len(),
            mechanism.reactions.len()
        );
        let all_reactions: Vec<usize> = (0..mechanism.reactions.len()).collect();
        let correction_report =
            correct_rate_factors(&mut mechanism, &all_reactions, self.toolkit, &self.settings)?;
        let all_species: Vec<usize> = (0..mechanism.species.len()).collect();
        let species_clusters = cluster_species(&mut mechanism.species, &all_species, self.toolkit)?;
        let trajectory = simulator.simulate(&mechanism)?;
        let probabilities =
            isotopomer_probabilities(&trajectory, &species_clusters, &mechanism.species)?;
        info!(
            "Isotopomer distributions computed for {} of {} species clusters",
            probabilities.computed().count(),
            species_clusters.len()
        );
        if !probabilities.is_complete() {
            warn!(
                "{} species clusters have no isotopomer distribution",
                probabilities.failures.len()
            );
        }
        Ok(StudyResult {
            mechanism,
            species_clusters,
            correction_report,
            trajectory,
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Molecule::oracle::GraphToolkit;
    use crate::Molecule::structure::Structure;
    use crate::Thermodynamics::thermo_record::{ThermoData, ThermoRecord};

    struct NoReactions;
    impl NetworkExpander for NoReactions {
        fn expand(&mut self, pool: Vec<Species>) -> Result<Mechanism, IsotopeError> {
            let mut mechanism = Mechanism::new();
            for (i, mut species) in pool.into_iter().enumerate() {
                species.index = Some(i);
                mechanism.add_species(species);
            }
            Ok(mechanism)
        }
    }

    /// constant unit concentration of every species
    struct Flat;
    impl Simulator for Flat {
        fn simulate(&mut self, mechanism: &Mechanism) -> Result<Trajectory, IsotopeError> {
            let headers: Vec<String> = mechanism
                .species
                .iter()
                .map(|s| s.column_header().unwrap_or_else(|| s.label.clone()))
                .collect();
            let n = headers.len();
            Trajectory::new(vec![0.0, 1.0], headers, nalgebra::DMatrix::from_element(2, n, 1.0))
        }
    }

    #[test]
    fn test_run_without_label_bound() {
        let study = IsotopeStudy::new(IsotopeSettings::default(), &GraphToolkit);
        let result = study.run(&[], &mut NoReactions, &mut Flat);
        assert!(matches!(result, Err(IsotopeError::MissingLabelBound)));
    }

    #[test]
    fn test_run_species_only() {
        let co = Species::new("CO", Structure::from_symbols(&["C", "O"], &[(0, 1)]).unwrap())
            .with_thermo(ThermoRecord::Data(ThermoData::new(-110.5e3, 197.7)));
        let toolkit = GraphToolkit::new();
        let study = IsotopeStudy::new(IsotopeSettings::new(1), &toolkit);
        let result = study.run(&[co], &mut NoReactions, &mut Flat).unwrap();
        assert_eq!(result.mechanism.species.len(), 2);
        assert_eq!(result.species_clusters.len(), 1);
        assert!(result.probabilities.is_complete());
        assert_eq!(result.probabilities.tables[0].as_ref().unwrap().data[(0, 0)], 0.5);
        assert!(result.correction_report.clusters.is_empty());
    }
}
