use super::clustering::cluster_reactions;
use super::stripper::{is_reaction_enriched, strip_reaction_copy};
use crate::Kinetics::kinetics::{KineticModel, RateLaw};
use crate::Kinetics::reaction::Mechanism;
use crate::Molecule::oracle::{MoleculeToolkit, SymmetryNumber};
use crate::Thermodynamics::R;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use crate::settings::IsotopeSettings;
use log::{error, info, warn};
use prettytable::{Table, row};

/// Shifts the standard entropy of an isotopomer by R*ln(sigma_ref/sigma_iso), the
/// difference of the symmetry contributions of the reference and the labeled species.
/// Returns the applied shift; nothing but the entropy is changed.
pub fn correct_entropy<S: SymmetryNumber>(
    isotopomer: &mut Species,
    reference: &Species,
    symmetry: &S,
) -> Result<f64, IsotopeError> {
    let sigma_ref = reference.symmetry_number(symmetry)?;
    let sigma_iso = isotopomer.symmetry_number(symmetry)?;
    let delta_s = R * sigma_ref.ln() - R * sigma_iso.ln();
    match isotopomer.thermo.as_mut() {
        Some(thermo) => thermo.add_entropy(delta_s),
        None => {
            return Err(IsotopeError::MissingThermo {
                species: isotopomer.label.clone(),
            });
        }
    }
    Ok(delta_s)
}

/// product of reactant symmetry numbers over product of product symmetry numbers
pub fn reaction_symmetry_number(
    reactants: &[&Species],
    products: &[&Species],
    symmetry: &dyn SymmetryNumber,
) -> Result<f64, IsotopeError> {
    let mut sigma = 1.0;
    for species in reactants {
        sigma *= species.symmetry_number(symmetry)?;
    }
    for species in products {
        sigma /= species.symmetry_number(symmetry)?;
    }
    Ok(sigma)
}

/// pre-exponential factor overwritten in one reaction
#[derive(Debug, Clone, PartialEq)]
pub struct RateCorrection {
    pub reaction: String,
    pub reference: String,
    pub old: f64,
    pub new: f64,
}

/// cluster whose correction was abandoned
#[derive(Debug)]
pub struct ClusterFailure {
    pub members: Vec<usize>,
    pub error: IsotopeError,
}

#[derive(Debug, Default)]
pub struct CorrectionReport {
    pub clusters: Vec<Vec<usize>>,
    pub corrections: Vec<RateCorrection>,
    /// reactions whose A was halved for identical reactants
    pub halved: Vec<String>,
    /// clusters without an unlabeled member, reference built by stripping the first member
    pub synthesized_references: Vec<String>,
    pub failures: Vec<ClusterFailure>,
}

impl CorrectionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Reaction", "Reference", "A old", "A new"]);
        for c in self.corrections.iter() {
            table.add_row(row![
                c.reaction,
                c.reference,
                format!("{:.4e}", c.old),
                format!("{:.4e}", c.new)
            ]);
        }
        table
    }

    pub fn print(&self) {
        self.to_table().printstd();
        for label in self.halved.iter() {
            println!("halved for identical reactants: {}", label);
        }
        for failure in self.failures.iter() {
            println!("cluster {:?} not corrected: {}", failure.members, failure.error);
        }
    }
}

fn pre_exponential_of(kinetics: &RateLaw, reaction: &str) -> Result<f64, IsotopeError> {
    kinetics
        .pre_exponential()
        .ok_or_else(|| IsotopeError::MissingPreExponential {
            reaction: reaction.to_string(),
        })
}

/// Makes pre-exponential factors of isotopically equivalent reactions consistent.
///
/// The reactions are clustered into isotope families. In every cluster the first member
/// without enriched isotopes is the reference (if there is none, a stripped copy of the
/// first member is used and a warning is logged), and each member gets
/// `A = A_ref * sigma(member) / sigma(reference)` with sigma the reaction symmetry
/// number, unless its A already agrees within `settings.rate_tolerance`. Afterwards
/// elementary reactions of the cluster with two identical reactants get A halved when
/// `settings.halve_identical_reactants` is set.
///
/// A failing cluster (zero symmetry number, rate law without a single A) is left untouched
/// and listed in the report; the other clusters are still corrected. Errors of the
/// clustering itself abort the whole call.
pub fn correct_rate_factors<T: MoleculeToolkit>(
    mechanism: &mut Mechanism,
    reactions: &[usize],
    toolkit: &T,
    settings: &IsotopeSettings,
) -> Result<CorrectionReport, IsotopeError> {
    let clusters = cluster_reactions(mechanism, reactions, toolkit)?;
    let mut report = CorrectionReport::default();
    for cluster in clusters.iter() {
        if let Err(e) = correct_cluster(mechanism, cluster, toolkit, settings, &mut report) {
            error!("Rate factors of cluster {:?} not corrected: {}", cluster, e);
            report.failures.push(ClusterFailure {
                members: cluster.clone(),
                error: e,
            });
        }
    }
    info!(
        "{} reaction clusters: {} rate factors corrected, {} halved, {} failed",
        clusters.len(),
        report.corrections.len(),
        report.halved.len(),
        report.failures.len()
    );
    report.clusters = clusters;
    Ok(report)
}

/// Nothing is written to the mechanism before every member of the cluster is evaluated.
fn correct_cluster<T: MoleculeToolkit>(
    mechanism: &mut Mechanism,
    cluster: &[usize],
    toolkit: &T,
    settings: &IsotopeSettings,
    report: &mut CorrectionReport,
) -> Result<(), IsotopeError> {
    let Some(&first) = cluster.first() else {
        return Ok(());
    };
    let mut reference = None;
    for &i in cluster {
        if !is_reaction_enriched(mechanism, i)? {
            reference = Some(i);
            break;
        }
    }
    let (ref_label, ref_a, ref_sigma, synthesized) = match reference {
        Some(i) => {
            let reaction = mechanism.reaction(i)?;
            let (reactants, products) = mechanism.participants(i)?;
            (
                reaction.identity(),
                pre_exponential_of(&reaction.kinetics, &reaction.identity())?,
                reaction_symmetry_number(&reactants, &products, toolkit)?,
                false,
            )
        }
        None => {
            let stripped = strip_reaction_copy(mechanism, first, toolkit)?;
            let reactants: Vec<&Species> = stripped.reactants.iter().collect();
            let products: Vec<&Species> = stripped.products.iter().collect();
            let label = format!("{} (unlabeled)", stripped.label);
            (
                label.clone(),
                pre_exponential_of(&stripped.kinetics, &label)?,
                reaction_symmetry_number(&reactants, &products, toolkit)?,
                true,
            )
        }
    };

    let mut updated: Vec<(usize, RateLaw)> = Vec::new();
    let mut corrections = Vec::new();
    for &i in cluster {
        let reaction = mechanism.reaction(i)?;
        let (reactants, products) = mechanism.participants(i)?;
        let sigma = reaction_symmetry_number(&reactants, &products, toolkit)?;
        let expected = ref_a * sigma / ref_sigma;
        let current = pre_exponential_of(&reaction.kinetics, &reaction.identity())?;
        if approx::relative_eq!(current, expected, max_relative = settings.rate_tolerance) {
            continue;
        }
        let mut kinetics = reaction.kinetics.clone();
        if !kinetics.set_pre_exponential(expected) {
            return Err(IsotopeError::MissingPreExponential {
                reaction: reaction.identity(),
            });
        }
        updated.push((i, kinetics));
        corrections.push(RateCorrection {
            reaction: reaction.identity(),
            reference: ref_label.clone(),
            old: current,
            new: expected,
        });
    }

    let mut halved = Vec::new();
    if settings.halve_identical_reactants {
        for &i in cluster {
            let reaction = mechanism.reaction(i)?;
            if !reaction.kinetics.is_arrhenius() || reaction.reactants.len() != 2 {
                continue;
            }
            let (reactants, _) = mechanism.participants(i)?;
            if !reactants[0].is_isomorphic(reactants[1], toolkit, true)? {
                continue;
            }
            let position = updated.iter().position(|(j, _)| *j == i);
            let kinetics = match position {
                Some(p) => &mut updated[p].1,
                None => {
                    updated.push((i, reaction.kinetics.clone()));
                    let last = updated.len() - 1;
                    &mut updated[last].1
                }
            };
            let a = pre_exponential_of(kinetics, &reaction.identity())?;
            kinetics.set_pre_exponential(0.5 * a);
            halved.push(reaction.identity());
        }
    }

    if synthesized {
        warn!(
            "No unlabeled reaction in cluster {:?}, using {} as reference",
            cluster, ref_label
        );
        report.synthesized_references.push(ref_label);
    }
    for correction in corrections.iter() {
        info!(
            "Pre-exponential factor of {} changed from {:.4e} to {:.4e} (reference {})",
            correction.reaction, correction.old, correction.new, correction.reference
        );
    }
    for (i, kinetics) in updated {
        mechanism.reactions[i].kinetics = kinetics;
    }
    for label in halved.iter() {
        info!("Pre-exponential factor of {} halved for identical reactants", label);
    }
    report.corrections.extend(corrections);
    report.halved.extend(halved);
    Ok(())
}
