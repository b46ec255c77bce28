use super::StructureError;
use super::residue::Residue;

/// The root of the structure ownership tree: an ordered sequence of residues.
///
/// A freshly constructed protein is empty. Dropping or [`clear`](Self::clear)ing
/// a protein releases every residue, conformer, and atom beneath it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Protein {
    residues: Vec<Residue>,
}

impl Protein {
    /// Creates an empty protein.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Mutable access to the residue sequence as a slice; entries can be
    /// edited and reordered but not added or removed through this path.
    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    /// Inserts a default (empty, conformer-less) residue at `pos`, shifting
    /// existing entries at `pos` and beyond forward by one. `pos` may equal
    /// the current length to append. Returns the insertion position.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::OutOfRange`] when `pos` exceeds the current
    /// length; the sequence is left unchanged.
    pub fn insert_residue(&mut self, pos: usize) -> Result<usize, StructureError> {
        if pos > self.residues.len() {
            return Err(StructureError::OutOfRange {
                index: pos,
                len: self.residues.len(),
            });
        }
        self.residues.insert(pos, Residue::default());
        Ok(pos)
    }

    /// Deletes the residue at `pos`, cascading the release of its conformers
    /// and atoms, and shifts subsequent entries back by one. Returns the
    /// deletion position.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::OutOfRange`] when `pos` is not a live entry;
    /// the sequence is left unchanged.
    pub fn delete_residue(&mut self, pos: usize) -> Result<usize, StructureError> {
        if pos >= self.residues.len() {
            return Err(StructureError::OutOfRange {
                index: pos,
                len: self.residues.len(),
            });
        }
        self.residues.remove(pos);
        Ok(pos)
    }

    /// Deep copy from `src` into this (empty) protein.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NonEmptyTarget`] without mutating anything
    /// when this protein already holds residues. The caller decides whether
    /// to clear and retry or abort.
    pub fn copy_from(&mut self, src: &Protein) -> Result<(), StructureError> {
        if !self.residues.is_empty() {
            return Err(StructureError::NonEmptyTarget {
                residues: self.residues.len(),
            });
        }
        for src_res in &src.residues {
            let mut res = Residue::default();
            res.copy_from(src_res);
            self.residues.push(res);
        }
        Ok(())
    }

    /// Releases the whole residue/conformer/atom tree and resets the protein
    /// to the empty state. Safe to call on an already-empty protein.
    pub fn clear(&mut self) {
        self.residues.clear();
    }

    /// Rewrites every conformer's unique identifier from its residue context:
    /// residue name, the first two history characters, chain, sequence number,
    /// insertion code, and the conformer's index within the residue.
    ///
    /// Blank or NUL insertion codes are rendered as `_`.
    pub fn assign_conformer_ids(&mut self) {
        for res in &mut self.residues {
            let ins = match res.insert_code {
                '\0' | ' ' => '_',
                code => code,
            };
            let name = res.name.clone();
            let chain_id = res.chain_id;
            let seq_num = res.seq_num;
            for (index, conf) in res.conformers_mut().iter_mut().enumerate() {
                let mut history = conf.history.chars();
                let h0 = history.next().unwrap_or(' ');
                let h1 = history.next().unwrap_or(' ');
                conf.uniq_id = format!(
                    "{:>3}{}{}{}{:04}{}{:03}",
                    name, h0, h1, chain_id, seq_num, ins, index
                );
            }
        }
    }
}
