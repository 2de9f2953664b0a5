/// universal gas constant, J/(mol*K)
pub const R: f64 = 8.314462618;

/// thermochemistry of a species: tabulated values at 298.15 K or NASA 7-coefficient
/// polynomials, with entropy shifts used by the isotopomer corrections
/// # Examples
/// ```
/// use IsoThe::Thermodynamics::thermo_record::{ThermoData, ThermoRecord};
/// let mut thermo = ThermoRecord::Data(ThermoData::new(-74.87e3, 186.25));
/// thermo.add_entropy(1.0);
/// assert_eq!(thermo.s298(), Some(187.25));
/// ```
#[allow(non_snake_case)]
pub mod thermo_record;
/// species: resonance structures, thermochemistry, symmetry number
pub mod species;
