/// chemical elements with isotope markers, and the table of most abundant isotopes
///  # Examples
/// ```
/// use IsoThe::Molecule::element::Element;
/// let c13: Element = "13C".parse().unwrap();
/// assert!(c13.is_enriched());
/// assert_eq!(c13.default_isotope(), Element::new("C").unwrap());
/// ```
pub mod element;
/// molecular graph: atoms, bonds, isotope stripping of a single structure, automorphisms
pub mod structure;
/// isomorphism oracle, symmetry number provider and resonance generator
/// # Examples
/// ```
/// use IsoThe::Molecule::oracle::{GraphToolkit, IsomorphismOracle, SymmetryNumber};
/// use IsoThe::Molecule::structure::Structure;
/// let toolkit = GraphToolkit::new();
/// let a = Structure::from_symbols(&["13C", "C"], &[(0, 1)]).unwrap();
/// let b = Structure::from_symbols(&["C", "13C"], &[(0, 1)]).unwrap();
/// assert!(toolkit.is_isomorphic(&a, &b, true).unwrap());
/// assert_eq!(toolkit.symmetry_number(&a), 1.0);
/// ```
pub mod oracle;
