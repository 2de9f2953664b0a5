/// isotopomer generation, rate factor corrections and a complete isotope study on small
/// hydrocarbon skeletons
pub mod isotope_examples;
