use super::element::Element;
use crate::errors::IsotopeError;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub element: Element,
    #[serde(default)]
    pub charge: i8,
    #[serde(default)]
    pub radical_electrons: u8,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            charge: 0,
            radical_electrons: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

/// node weight of the atom graph; isotope is dropped in label-insensitive mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomKey {
    symbol: String,
    isotope: Option<u16>,
    charge: i8,
    radical_electrons: u8,
}

/// Molecular graph: atoms carrying element/isotope, bonds between atom indices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Structure {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Structure {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, IsotopeError> {
        let n_atoms = atoms.len();
        for bond in bonds.iter() {
            for atom in [bond.a, bond.b] {
                if atom >= n_atoms {
                    return Err(IsotopeError::InvalidBond { atom, n_atoms });
                }
            }
            if bond.a == bond.b {
                return Err(IsotopeError::Config(format!(
                    "bond of atom {} with itself",
                    bond.a
                )));
            }
        }
        Ok(Self { atoms, bonds })
    }

    /// Structure from element symbols ("C", "13C", ...) and single bonds.
    /// Handy for small skeletons in examples and tests.
    pub fn from_symbols(symbols: &[&str], bonds: &[(usize, usize)]) -> Result<Self, IsotopeError> {
        let atoms = symbols
            .iter()
            .map(|s| s.parse::<Element>().map(Atom::new))
            .collect::<Result<Vec<Atom>, IsotopeError>>()?;
        let bonds = bonds
            .iter()
            .map(|&(a, b)| Bond {
                a,
                b,
                order: BondOrder::Single,
            })
            .collect();
        Structure::new(atoms, bonds)
    }

    pub fn count_element(&self, symbol: &str) -> usize {
        self.atoms
            .iter()
            .filter(|atom| atom.element.symbol == symbol)
            .count()
    }

    /// copy of the structure with one atom relabeled
    pub fn relabeled(&self, atom: usize, element: &Element) -> Structure {
        let mut copy = self.clone();
        copy.atoms[atom].element = element.clone();
        copy
    }

    /// number of atoms whose element/isotope differs (atom-by-atom, same atom order)
    pub fn isotope_differences(&self, other: &Structure) -> usize {
        self.atoms
            .iter()
            .zip(other.atoms.iter())
            .filter(|(a, b)| a.element != b.element)
            .count()
    }

    pub fn is_enriched(&self) -> bool {
        self.atoms.iter().any(|atom| atom.element.is_enriched())
    }

    pub fn has_isotope_labels(&self) -> bool {
        self.atoms.iter().any(|atom| !atom.element.is_default())
    }

    /// Rewrites every labeled atom to the normal element and returns
    /// (atom index, original element) pairs for restoring.
    pub fn strip_labels(&mut self) -> Vec<(usize, Element)> {
        let mut removed = Vec::new();
        for (i, atom) in self.atoms.iter_mut().enumerate() {
            if !atom.element.is_default() {
                let normal = atom.element.default_isotope();
                removed.push((i, std::mem::replace(&mut atom.element, normal)));
            }
        }
        removed
    }

    fn atom_key(atom: &Atom, label_sensitive: bool) -> AtomKey {
        AtomKey {
            symbol: atom.element.symbol.clone(),
            isotope: if label_sensitive {
                atom.element.isotope
            } else {
                None
            },
            charge: atom.charge,
            radical_electrons: atom.radical_electrons,
        }
    }

    pub fn to_graph(&self, label_sensitive: bool) -> Result<UnGraph<AtomKey, BondOrder>, IsotopeError> {
        let n_atoms = self.atoms.len();
        let mut graph = UnGraph::with_capacity(n_atoms, self.bonds.len());
        for atom in self.atoms.iter() {
            graph.add_node(Self::atom_key(atom, label_sensitive));
        }
        for bond in self.bonds.iter() {
            if bond.a >= n_atoms || bond.b >= n_atoms {
                return Err(IsotopeError::InvalidBond {
                    atom: bond.a.max(bond.b),
                    n_atoms,
                });
            }
            graph.add_edge(NodeIndex::new(bond.a), NodeIndex::new(bond.b), bond.order);
        }
        Ok(graph)
    }

    fn adjacency(&self) -> Vec<Vec<Option<BondOrder>>> {
        let n = self.atoms.len();
        let mut adj = vec![vec![None; n]; n];
        for bond in self.bonds.iter() {
            if bond.a < n && bond.b < n {
                adj[bond.a][bond.b] = Some(bond.order);
                adj[bond.b][bond.a] = Some(bond.order);
            }
        }
        adj
    }

    /// Number of label-preserving automorphisms of the atom graph.
    pub fn automorphism_count(&self) -> usize {
        let n = self.atoms.len();
        if n == 0 {
            return 1;
        }
        let adj = self.adjacency();
        let keys: Vec<AtomKey> = self.atoms.iter().map(|a| Self::atom_key(a, true)).collect();
        let degree: Vec<usize> = adj
            .iter()
            .map(|row| row.iter().filter(|b| b.is_some()).count())
            .collect();
        let mut image: Vec<usize> = Vec::with_capacity(n);
        let mut used = vec![false; n];
        let mut count = 0;
        Self::extend_mapping(&adj, &keys, &degree, &mut image, &mut used, &mut count);
        count
    }

    fn extend_mapping(
        adj: &[Vec<Option<BondOrder>>],
        keys: &[AtomKey],
        degree: &[usize],
        image: &mut Vec<usize>,
        used: &mut [bool],
        count: &mut usize,
    ) {
        let i = image.len();
        if i == keys.len() {
            *count += 1;
            return;
        }
        for j in 0..keys.len() {
            if used[j] || keys[j] != keys[i] || degree[j] != degree[i] {
                continue;
            }
            let consistent = image
                .iter()
                .enumerate()
                .all(|(k, &mapped)| adj[i][k] == adj[j][mapped]);
            if !consistent {
                continue;
            }
            used[j] = true;
            image.push(j);
            Self::extend_mapping(adj, keys, degree, image, used, count);
            image.pop();
            used[j] = false;
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let atoms: Vec<String> = self.atoms.iter().map(|a| a.element.to_string()).collect();
        write!(f, "[{}]", atoms.join(" "))
    }
}
