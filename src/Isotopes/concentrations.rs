use crate::Thermodynamics::species::Species;
use crate::errors::IsotopeError;
use log::{debug, error};
use nalgebra::DMatrix;
use prettytable::{Cell, Row, Table};

/// Concentration profiles: one row per time sample, one column per species.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub headers: Vec<String>,
    pub data: DMatrix<f64>,
}

impl Trajectory {
    pub fn new(time: Vec<f64>, headers: Vec<String>, data: DMatrix<f64>) -> Result<Self, IsotopeError> {
        let trajectory = Self { time, headers, data };
        trajectory.check_shape()?;
        Ok(trajectory)
    }

    /// one time sample per row and one header per column
    pub fn check_shape(&self) -> Result<(), IsotopeError> {
        if self.data.nrows() != self.time.len() || self.data.ncols() != self.headers.len() {
            return Err(IsotopeError::Config(format!(
                "concentration table is {}x{}, expected {} time samples and {} columns",
                self.data.nrows(),
                self.data.ncols(),
                self.time.len(),
                self.headers.len()
            )));
        }
        Ok(())
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// column of a species: "label(index)" as written by the simulator, else the bare label
    fn species_column(&self, species: &Species) -> Result<usize, IsotopeError> {
        species
            .column_header()
            .and_then(|header| self.column_index(&header))
            .or_else(|| self.column_index(&species.label))
            .ok_or_else(|| IsotopeError::MissingColumn {
                header: species
                    .column_header()
                    .unwrap_or_else(|| species.label.clone()),
            })
    }

    /// sub-trajectory with the given columns, in that order
    pub fn select_columns(&self, columns: &[usize]) -> Result<Trajectory, IsotopeError> {
        self.check_shape()?;
        if let Some(&bad) = columns.iter().find(|&&c| c >= self.headers.len()) {
            return Err(IsotopeError::Config(format!(
                "column {} is out of range of {} columns",
                bad,
                self.headers.len()
            )));
        }
        Ok(Trajectory {
            time: self.time.clone(),
            headers: columns.iter().map(|&c| self.headers[c].clone()).collect(),
            data: self.data.select_columns(columns.iter()),
        })
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("t")];
        header.extend(self.headers.iter().map(|h| Cell::new(h)));
        table.add_row(Row::new(header));
        for (t, values) in self.time.iter().zip(self.data.row_iter()) {
            let mut row = vec![Cell::new(&format!("{:.4e}", t))];
            row.extend(
                values
                    .iter()
                    .map(|value| Cell::new(&format!("{:.4e}", value))),
            );
            table.add_row(Row::new(row));
        }
        table
    }

    pub fn print_table(&self) {
        self.to_table().printstd();
    }
}

/// One sub-trajectory per species cluster, with the concentration columns of its members.
pub fn retrieve_concentrations(
    trajectory: &Trajectory,
    clusters: &[Vec<usize>],
    species: &[Species],
) -> Result<Vec<Trajectory>, IsotopeError> {
    let mut result = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        let mut columns = Vec::with_capacity(cluster.len());
        for &i in cluster {
            let member = species.get(i).ok_or(IsotopeError::UnknownSpecies(i))?;
            columns.push(trajectory.species_column(member)?);
        }
        result.push(trajectory.select_columns(&columns)?);
    }
    debug!("Concentrations retrieved for {} clusters", result.len());
    Ok(result)
}

/// Fractions of each column in the row total. A row whose total is zero or not finite
/// is an error.
pub fn compute_probabilities(trajectory: &Trajectory) -> Result<Trajectory, IsotopeError> {
    let mut data = trajectory.data.clone();
    for (row, mut values) in data.row_iter_mut().enumerate() {
        let total: f64 = values.sum();
        if !total.is_finite() || total == 0.0 {
            return Err(IsotopeError::ZeroConcentration {
                row,
                time: trajectory.time.get(row).copied().unwrap_or(f64::NAN),
                total,
            });
        }
        values /= total;
    }
    Ok(Trajectory {
        time: trajectory.time.clone(),
        headers: trajectory.headers.clone(),
        data,
    })
}

/// cluster whose probabilities could not be computed
#[derive(Debug)]
pub struct ProbabilityFailure {
    /// position of the cluster in the cluster list
    pub cluster: usize,
    pub members: Vec<usize>,
    pub error: IsotopeError,
}

/// Isotopomer distributions of all clusters. `tables[i]` belongs to cluster `i` and is
/// `None` when that cluster failed; the failure is listed in `failures`.
#[derive(Debug, Default)]
pub struct IsotopomerDistributions {
    pub tables: Vec<Option<Trajectory>>,
    pub failures: Vec<ProbabilityFailure>,
}

impl IsotopomerDistributions {
    /// (cluster position, table) of the clusters that succeeded
    pub fn computed(&self) -> impl Iterator<Item = (usize, &Trajectory)> {
        self.tables
            .iter()
            .enumerate()
            .filter_map(|(i, table)| table.as_ref().map(|t| (i, t)))
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Probability tables of every cluster. Missing columns abort the call; a cluster with a
/// degenerate row is recorded as a failure and the other clusters are still computed.
pub fn isotopomer_probabilities(
    trajectory: &Trajectory,
    clusters: &[Vec<usize>],
    species: &[Species],
) -> Result<IsotopomerDistributions, IsotopeError> {
    let concentrations = retrieve_concentrations(trajectory, clusters, species)?;
    let mut distributions = IsotopomerDistributions::default();
    for (i, (cluster, table)) in clusters.iter().zip(concentrations.iter()).enumerate() {
        match compute_probabilities(table) {
            Ok(probabilities) => distributions.tables.push(Some(probabilities)),
            Err(e) => {
                error!("Isotopomer probabilities of cluster {:?} not computed: {}", cluster, e);
                distributions.tables.push(None);
                distributions.failures.push(ProbabilityFailure {
                    cluster: i,
                    members: cluster.clone(),
                    error: e,
                });
            }
        }
    }
    Ok(distributions)
}
