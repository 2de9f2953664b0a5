use super::equivalence::{same_reaction_family, same_species_family};
use crate::Kinetics::reaction::Mechanism;
use crate::Molecule::oracle::IsomorphismOracle;
use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use log::debug;

/// Partitions `members` into clusters of the equivalence relation `same`.
///
/// Members are taken from the end of the working list; each one is compared with the
/// first member of every open cluster and joins the first that matches, otherwise it
/// opens a new cluster. The first error of `same` aborts the partition.
pub fn cluster_by<F>(members: &[usize], mut same: F) -> Result<Vec<Vec<usize>>, IsotopeError>
where
    F: FnMut(usize, usize) -> Result<bool, IsotopeError>,
{
    let mut working: Vec<usize> = members.to_vec();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    while let Some(candidate) = working.pop() {
        let mut placed = false;
        for cluster in clusters.iter_mut() {
            if same(cluster[0], candidate)? {
                cluster.push(candidate);
                placed = true;
                break;
            }
        }
        if !placed {
            clusters.push(vec![candidate]);
        }
    }
    Ok(clusters)
}

/// groups species of the pool that differ only in isotope labeling
pub fn cluster_species(
    pool: &mut [Species],
    members: &[usize],
    oracle: &dyn IsomorphismOracle,
) -> Result<Vec<Vec<usize>>, IsotopeError> {
    let clusters = cluster_by(members, |a, b| same_species_family(pool, a, b, oracle))?;
    debug!(
        "{} species grouped into {} isotopomer clusters",
        members.len(),
        clusters.len()
    );
    Ok(clusters)
}

/// groups reactions of the mechanism that differ only in isotope labeling
pub fn cluster_reactions(
    mechanism: &mut Mechanism,
    members: &[usize],
    oracle: &dyn IsomorphismOracle,
) -> Result<Vec<Vec<usize>>, IsotopeError> {
    let clusters = cluster_by(members, |a, b| same_reaction_family(mechanism, a, b, oracle))?;
    debug!(
        "{} reactions grouped into {} isotopomer clusters",
        members.len(),
        clusters.len()
    );
    Ok(clusters)
}
