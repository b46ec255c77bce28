use super::StructureError;
use super::atom::Atom;
use crate::geometry::transform::TransformRecorder;

/// One candidate atomic arrangement for a residue (e.g. a protonation or
/// rotameric state).
///
/// A conformer owns a fixed-size array of atoms: the atom count is set at
/// creation and never changes for the lifetime of the conformer entry. The
/// atoms themselves are freely mutable through [`Conformer::atoms_mut`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conformer {
    /// The conformer type name (e.g. `"ASP-1"`).
    pub name: String,
    /// A unique identifier encoding the residue context; maintained by
    /// [`crate::models::protein::Protein::assign_conformer_ids`].
    pub uniq_id: String,
    /// A short creation record; its first two characters appear in the
    /// unique identifier.
    pub history: String,
    /// Self energy, populated and read by external energy drivers. Opaque to
    /// this library.
    pub e_self: f64,
    atoms: Vec<Atom>,
}

impl Conformer {
    /// Creates a conformer with `n_atom` atom slots, each zero-initialized
    /// to the neutral [`Atom::default`] state.
    pub fn with_atom_count(n_atom: usize) -> Self {
        Self {
            atoms: vec![Atom::default(); n_atom],
            ..Self::default()
        }
    }

    /// The number of atom slots. Fixed at creation.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Mutable access to the atom slots. The slice length cannot change, so
    /// the fixed-count invariant holds through this access path.
    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    /// Iterates over the active atoms.
    pub fn active_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|a| a.on)
    }

    /// Iterates over the active heavy (non-hydrogen) atoms.
    pub fn heavy_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.active_atoms().filter(|a| !a.is_hydrogen())
    }

    /// Field-wise copy from `src` into this conformer, reusing the already
    /// allocated atom storage.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AtomCountMismatch`] without mutating anything
    /// when the two conformers do not have the same number of atom slots.
    pub fn copy_from(&mut self, src: &Conformer) -> Result<(), StructureError> {
        if src.atom_count() != self.atom_count() {
            return Err(StructureError::AtomCountMismatch {
                target: self.atom_count(),
                source_len: src.atom_count(),
            });
        }

        self.name.clone_from(&src.name);
        self.uniq_id.clone_from(&src.uniq_id);
        self.history.clone_from(&src.history);
        self.e_self = src.e_self;
        for (slot, atom) in self.atoms.iter_mut().zip(&src.atoms) {
            slot.clone_from(atom);
        }
        Ok(())
    }

    /// Applies an accumulated rigid-body transform to every atom position.
    pub fn transform(&mut self, op: &TransformRecorder) {
        for atom in &mut self.atoms {
            atom.position = op.apply(atom.position);
        }
    }
}
