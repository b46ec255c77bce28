use nalgebra::Point3;

/// Represents an atom within a conformer.
///
/// Atoms are leaf entities, owned exclusively by their conformer. Names follow
/// the PDB 4-column convention (e.g. `" CA "`, `"1HB "`), where the character
/// in column 1 carries the element: the element class used by the similarity
/// algorithms is the 2-character substring starting there.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The PDB-style atom name.
    pub name: String,
    /// The partial atomic charge in elementary charge units.
    pub charge: f64,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Whether the atom is logically enabled. Disabled atoms stay in their
    /// slot but are skipped by the similarity algorithms.
    pub on: bool,
    /// A free-form provenance tag recording how the atom was created.
    pub history: String,
}

impl Default for Atom {
    /// The neutral state every freshly inserted atom slot starts in:
    /// inactive, unnamed, zero charge, at the origin.
    fn default() -> Self {
        Self {
            name: String::new(),
            charge: 0.0,
            position: Point3::origin(),
            on: false,
            history: String::new(),
        }
    }
}

impl Atom {
    /// Creates an active atom with the given name and position.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            position,
            on: true,
            ..Self::default()
        }
    }

    /// The 2-character element-class substring of the name (columns 1-2).
    ///
    /// Shorter names yield a truncated or empty class.
    pub fn element_class(&self) -> &str {
        let end = self.name.len().min(3);
        self.name.get(1..end).unwrap_or("")
    }

    /// Whether this atom is a hydrogen, judged by the element column.
    pub fn is_hydrogen(&self) -> bool {
        self.name.as_bytes().get(1) == Some(&b'H')
    }
}
