//! Error type shared by the molecule model, the isotope tools and the study pipeline.
//!
//! Configuration errors abort the enclosing operation, numeric errors abort the affected
//! cluster or species only, invariant violations are rejected before anything is mutated.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsotopeError {
    // configuration
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Missing the maximum number of isotopic atoms (maximum_isotopic_atoms) in settings")]
    MissingLabelBound,
    #[error("Species '{species}' has no thermodynamic data")]
    MissingThermo { species: String },
    #[error("Rate law of reaction '{reaction}' has no pre-exponential factor")]
    MissingPreExponential { reaction: String },
    #[error("Column '{header}' not found in the concentration table")]
    MissingColumn { header: String },
    #[error("Unknown element symbol: '{0}'")]
    UnknownElement(String),
    // numeric
    #[error("Symmetry number of '{entity}' must be positive, got {value}")]
    NonPositiveSymmetry { entity: String, value: f64 },
    #[error("Total concentration of the cluster is {total} at row {row} (t = {time})")]
    ZeroConcentration { row: usize, time: f64, total: f64 },
    // invariant violations
    #[error("Species index {0} is out of range of the species pool")]
    UnknownSpecies(usize),
    #[error("Reaction index {0} is out of range of the reaction list")]
    UnknownReaction(usize),
    #[error("Species '{species}' has no structure")]
    EmptySpecies { species: String },
    #[error("Bond refers to atom {atom} but the structure has {n_atoms} atoms")]
    InvalidBond { atom: usize, n_atoms: usize },
    // collaborators
    #[error("Isomorphism oracle failed: {0}")]
    Oracle(String),
    #[error("Failed to initialize logging: {0}")]
    Logger(String),
    #[error("Failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
