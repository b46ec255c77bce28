//! Canonical ordering of conformers and residues, and generation of
//! symmetry-swapped conformer variants.
//!
//! These routines keep a protein in canonical form before it is handed to
//! external energy evaluation. They consume the parameter store through the
//! [`ParamStore`] interface; lookup misses are normal (a warning at most),
//! never fatal, and a composite pass always continues with the next residue.

use crate::models::StructureError;
use crate::models::protein::Protein;
use crate::params::ParamStore;
use tracing::warn;

/// Reorders each residue's conformers to follow the canonical conformer-name
/// ordering from the parameter store.
///
/// The reorder is the historical search-and-move scheme: walk the conformer
/// sequence with a cursor into the canonical list, and whenever the current
/// entry does not carry the cursor's name, pull the first later entry that
/// does up to the current slot (a block move, so relative order of the moved
/// block is preserved). When no later entry matches, the cursor advances to
/// the next canonical name and the same slot is retried.
///
/// A residue without a canonical list, or with conformers that exhaust the
/// canonical list, is reported with a warning and left partially sorted;
/// the pass continues with the remaining residues.
pub fn sort_conformers(protein: &mut Protein, params: &impl ParamStore) {
    for res in protein.residues_mut() {
        let Some(canonical) = params.conformer_list(&res.name) else {
            warn!(
                residue = %res.name,
                "no canonical conformer list for residue, skipping sort"
            );
            continue;
        };

        let mut cursor = 0;
        let mut i = 0;
        while i < res.conformer_count() {
            if cursor >= canonical.len() {
                warn!(
                    residue = %res.name,
                    seq = res.seq_num,
                    chain = %res.chain_id,
                    "some conformers could not be sorted"
                );
                break;
            }
            if res.conformers()[i].name == canonical[cursor] {
                i += 1;
                continue;
            }
            let found = (i + 1..res.conformer_count())
                .find(|&j| res.conformers()[j].name == canonical[cursor]);
            match found {
                Some(j) => {
                    res.conformers_mut()[i..=j].rotate_right(1);
                    i += 1;
                }
                None => cursor += 1,
            }
        }
    }
}

/// Orders residues by chain identifier, then by sequence number within each
/// chain.
///
/// Two in-place selection passes with block moves; O(n²) and intentionally
/// simple, which is acceptable at typical residue counts. Insertion codes do
/// not participate in the ordering.
pub fn sort_residues(protein: &mut Protein) {
    let res = protein.residues_mut();
    let n = res.len();

    for i in 0..n {
        let mut j = i + 1;
        while j < n {
            if res[i].chain_id > res[j].chain_id {
                res[i..=j].rotate_right(1);
                j = i + 1;
            } else {
                j += 1;
            }
        }
    }

    for i in 0..n {
        let mut j = i + 1;
        while j < n {
            if res[i].chain_id == res[j].chain_id && res[i].seq_num > res[j].seq_num {
                res[i..=j].rotate_right(1);
                j = i + 1;
            } else {
                j += 1;
            }
        }
    }
}

/// Expands each residue with symmetry-swapped copies of its conformers.
///
/// For every numbered swap rule the parameter store holds for the residue
/// name (discovery stops at the first miss), and for every existing conformer
/// except the first (the backbone entry), a copy is appended with the two
/// named atoms' positions exchanged for each pair in the rule. Atom slots are
/// resolved through the store with the new conformer's name; a pair whose
/// atoms cannot be resolved, or whose slot is out of range, is skipped.
pub fn generate_swapped_conformers(
    protein: &mut Protein,
    params: &impl ParamStore,
) -> Result<(), StructureError> {
    for res in protein.residues_mut() {
        let mut rule_idx = 0;
        while let Some(rule) = params.swap_rule(&res.name, rule_idx) {
            rule_idx += 1;

            let n_conf = res.conformer_count();
            for i_conf in 1..n_conf {
                let source = res.conformers()[i_conf].clone();
                let pos = res.insert_conformer(res.conformer_count(), source.atom_count())?;
                res.conformers_mut()[pos].copy_from(&source)?;

                for (name1, name2) in &rule.pairs {
                    let Some(i) = params.atom_index(&source.name, name1) else {
                        continue;
                    };
                    let Some(j) = params.atom_index(&source.name, name2) else {
                        continue;
                    };

                    let atoms = res.conformers_mut()[pos].atoms_mut();
                    if i >= atoms.len() || j >= atoms.len() {
                        warn!(
                            conformer = %source.name,
                            slot_a = i,
                            slot_b = j,
                            "swap rule references an atom slot out of range, skipping pair"
                        );
                        continue;
                    }
                    let tmp = atoms[i].position;
                    atoms[i].position = atoms[j].position;
                    atoms[j].position = tmp;
                }
            }
        }
    }
    Ok(())
}
