use super::StructureError;
use super::conformer::Conformer;

/// One monomer unit of a protein chain, holding its candidate conformers.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// The 3-letter residue name (e.g. `"ASP"`).
    pub name: String,
    /// The chain identifier character.
    pub chain_id: char,
    /// The residue sequence number within the chain.
    pub seq_num: i32,
    /// The PDB insertion code; blank when absent.
    pub insert_code: char,
    conformers: Vec<Conformer>,
}

impl Default for Residue {
    fn default() -> Self {
        Self {
            name: String::new(),
            chain_id: ' ',
            seq_num: 0,
            insert_code: ' ',
            conformers: Vec::new(),
        }
    }
}

impl Residue {
    /// Creates a residue with no conformers.
    pub fn new(name: &str, chain_id: char, seq_num: i32, insert_code: char) -> Self {
        Self {
            name: name.to_string(),
            chain_id,
            seq_num,
            insert_code,
            ..Self::default()
        }
    }

    pub fn conformer_count(&self) -> usize {
        self.conformers.len()
    }

    pub fn conformers(&self) -> &[Conformer] {
        &self.conformers
    }

    /// Mutable access to the conformer sequence as a slice, so entries can be
    /// edited and reordered but not added or removed through this path.
    pub fn conformers_mut(&mut self) -> &mut [Conformer] {
        &mut self.conformers
    }

    /// Inserts a new conformer with `n_atom` zero-initialized atoms at `pos`,
    /// shifting existing entries at `pos` and beyond forward by one.
    ///
    /// `pos` may equal the current length to append. Returns the insertion
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::OutOfRange`] when `pos` exceeds the current
    /// length; the sequence is left unchanged.
    pub fn insert_conformer(&mut self, pos: usize, n_atom: usize) -> Result<usize, StructureError> {
        if pos > self.conformers.len() {
            return Err(StructureError::OutOfRange {
                index: pos,
                len: self.conformers.len(),
            });
        }
        self.conformers.insert(pos, Conformer::with_atom_count(n_atom));
        Ok(pos)
    }

    /// Deletes the conformer at `pos` (and its atoms), shifting subsequent
    /// entries back by one. Returns the deletion position.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::OutOfRange`] when `pos` is not a live entry;
    /// the sequence is left unchanged.
    pub fn delete_conformer(&mut self, pos: usize) -> Result<usize, StructureError> {
        if pos >= self.conformers.len() {
            return Err(StructureError::OutOfRange {
                index: pos,
                len: self.conformers.len(),
            });
        }
        self.conformers.remove(pos);
        Ok(pos)
    }

    /// Deep copy from `src`: identity fields plus a rebuilt conformer
    /// sequence, entry by entry.
    pub fn copy_from(&mut self, src: &Residue) {
        self.name.clone_from(&src.name);
        self.chain_id = src.chain_id;
        self.seq_num = src.seq_num;
        self.insert_code = src.insert_code;
        self.conformers.clear();
        for conformer in &src.conformers {
            self.conformers.push(conformer.clone());
        }
    }
}
