/// reversible removal of isotope labels: copies, or in-place with a restoring guard
/// # Examples
/// ```
/// use IsoThe::Isotopes::stripper::strip_in_place;
/// use IsoThe::Molecule::structure::Structure;
/// use IsoThe::Thermodynamics::species::Species;
/// let mut pool = vec![Species::new("13CO", Structure::from_symbols(&["13C", "O"], &[(0, 1)]).unwrap())];
/// {
///     let stripped = strip_in_place(&mut pool, &[0]).unwrap();
///     assert!(!stripped[0].is_enriched());
/// }
/// assert!(pool[0].is_enriched());
/// ```
pub mod stripper;
/// "same isotope family" predicates for species and reactions
pub mod equivalence;
/// partition of species or reactions into isotope families
pub mod clustering;
/// eng
/// Enumeration of isotopomers of a species. All placements of up to N labeled atoms of the
/// chosen element are generated, duplicates are removed by label-sensitive isomorphism and
/// the entropy of each isotopomer is corrected for the change of its symmetry number.
/// # Examples
/// ```
/// use IsoThe::Isotopes::generator::generate_isotopomers;
/// use IsoThe::Molecule::element::Element;
/// use IsoThe::Molecule::oracle::GraphToolkit;
/// use IsoThe::Molecule::structure::Structure;
/// use IsoThe::Thermodynamics::species::Species;
/// let propane = Species::new("C3H8", Structure::from_symbols(&["C", "C", "C"], &[(0, 1), (1, 2)]).unwrap());
/// let c13 = Element::with_isotope("C", 13).unwrap();
/// let isotopomers = generate_isotopomers(&propane, 1, &c13, &GraphToolkit::new()).unwrap();
/// // terminal and central label
/// assert_eq!(isotopomers.len(), 2);
/// ```
pub mod generator;
/// eng
/// Symmetry number corrections: entropy of isotopomers and pre-exponential factors of
/// isotopically equivalent reactions, halving of rate factors for identical reactants.
pub mod corrections;
/// concentration profiles of isotope families and isotopomer distributions
pub mod concentrations;
/// the whole study: generation, network expansion, corrections, simulation, distributions
pub mod study;
