//! Structural-similarity tests and distance metrics between conformer pairs.
//!
//! All four functions use the same greedy first-fit atom matching: each atom
//! of the first conformer scans the second conformer's atoms in storage order
//! and takes the first acceptable partner. This is intentionally not a global
//! optimal assignment, and the same partner may be taken more than once; the
//! iteration-order sensitivity is part of the contract relied on by the
//! duplicate-pruning callers.

use crate::models::conformer::Conformer;
use nalgebra::{distance, distance_squared};

/// Sentinel distance returned when two conformers cannot be paired at all
/// (heavy-atom count mismatch, or a missing exact-name counterpart).
pub const MATCH_SENTINEL: f64 = 999.0;

/// Charges differing by more than this are considered distinct.
const CHARGE_TOLERANCE: f64 = 1e-3;

/// Threshold-narrowing step for [`heavy_atom_max_distance`], applied to the
/// squared test distance.
const NARROWING_EPSILON: f64 = 1e-4;

/// Tests whether two conformers describe the same atomic arrangement.
///
/// The conformers match only when their atom counts and active-atom counts
/// are equal and every active atom of `c1` finds some active atom of `c2`
/// with the same element class, a charge within `1e-3`, and a Euclidean
/// distance below `threshold`.
pub fn exact_match(c1: &Conformer, c2: &Conformer, threshold: f64) -> bool {
    if c1.atom_count() != c2.atom_count() {
        return false;
    }
    if c1.active_atoms().count() != c2.active_atoms().count() {
        return false;
    }

    let threshold_sq = threshold * threshold;
    c1.active_atoms().all(|a1| {
        c2.active_atoms().any(|a2| {
            a1.element_class() == a2.element_class()
                && (a1.charge - a2.charge).abs() <= CHARGE_TOLERANCE
                && distance_squared(&a1.position, &a2.position) < threshold_sq
        })
    })
}

/// Tests whether two conformers have the same heavy-atom topology.
///
/// As [`exact_match`], but restricted to active non-hydrogen atoms, requiring
/// equal heavy-atom counts, and ignoring charge: only the element class and
/// the distance threshold decide a pairing.
pub fn heavy_atom_match(c1: &Conformer, c2: &Conformer, threshold: f64) -> bool {
    if c1.heavy_atoms().count() != c2.heavy_atoms().count() {
        return false;
    }

    let threshold_sq = threshold * threshold;
    c1.heavy_atoms().all(|a1| {
        c2.heavy_atoms().any(|a2| {
            a1.element_class() == a2.element_class()
                && distance_squared(&a1.position, &a2.position) < threshold_sq
        })
    })
}

/// Returns the smallest matching radius at which every heavy atom of `c1`
/// still pairs with a heavy atom of `c2` under the greedy element-class rule.
///
/// Starting from a large bound, each round records the maximum distance among
/// the greedy pairings, then shrinks the squared test threshold to that
/// maximum (squared) minus a small epsilon and tries again. The rounds stop
/// when some heavy atom can no longer be paired, and the last admissible
/// threshold is returned.
///
/// Returns [`MATCH_SENTINEL`] when the heavy-atom counts differ, and `0.0`
/// when both conformers have no heavy atoms.
pub fn heavy_atom_max_distance(c1: &Conformer, c2: &Conformer) -> f64 {
    let n_heavy = c1.heavy_atoms().count();
    if n_heavy != c2.heavy_atoms().count() {
        return MATCH_SENTINEL;
    }
    if n_heavy == 0 {
        return 0.0;
    }

    let mut next_test_dist = MATCH_SENTINEL;
    let mut test_dist_sq;
    loop {
        test_dist_sq = next_test_dist * next_test_dist - NARROWING_EPSILON;
        next_test_dist = 0.0;

        let mut all_matched = true;
        for a1 in c1.heavy_atoms() {
            let partner = c2.heavy_atoms().find(|a2| {
                a1.element_class() == a2.element_class()
                    && distance_squared(&a1.position, &a2.position) < test_dist_sq
            });
            match partner {
                Some(a2) => {
                    let d = distance(&a1.position, &a2.position);
                    if d > next_test_dist {
                        next_test_dist = d;
                    }
                }
                None => {
                    all_matched = false;
                    break;
                }
            }
        }
        if !all_matched {
            break;
        }
    }

    (test_dist_sq + NARROWING_EPSILON).sqrt()
}

/// Root-mean-square distance over the heavy atoms of two conformers.
///
/// Pairing requires an exact full-name match, not just an element-class
/// match. Returns [`MATCH_SENTINEL`] when the heavy-atom counts differ or
/// when any heavy atom of `c1` lacks an exact-name counterpart in `c2`, and
/// `0.0` when there are no heavy atoms.
pub fn heavy_atom_rmsd(c1: &Conformer, c2: &Conformer) -> f64 {
    let n_heavy = c1.heavy_atoms().count();
    if n_heavy != c2.heavy_atoms().count() {
        return MATCH_SENTINEL;
    }
    if n_heavy == 0 {
        return 0.0;
    }

    let mut sum_dist_sq = 0.0;
    for a1 in c1.heavy_atoms() {
        match c2.heavy_atoms().find(|a2| a2.name == a1.name) {
            Some(a2) => sum_dist_sq += distance_squared(&a1.position, &a2.position),
            None => return MATCH_SENTINEL,
        }
    }
    (sum_dist_sq / n_heavy as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::atom::Atom;
    use nalgebra::Point3;

    fn conformer(atoms: &[(&str, f64, [f64; 3])]) -> Conformer {
        let mut conf = Conformer::with_atom_count(atoms.len());
        for (slot, (name, charge, pos)) in conf.atoms_mut().iter_mut().zip(atoms) {
            *slot = Atom::new(name, Point3::new(pos[0], pos[1], pos[2]));
            slot.charge = *charge;
        }
        conf
    }

    fn asp_pair() -> (Conformer, Conformer) {
        let c1 = conformer(&[
            (" CG ", 0.1, [0.0, 0.0, 0.0]),
            (" OD1", -0.5, [1.2, 0.0, 0.0]),
            (" OD2", -0.5, [-0.6, 1.0, 0.0]),
            (" HD2", 0.3, [-1.0, 1.5, 0.0]),
        ]);
        (c1.clone(), c1)
    }

    #[test]
    fn exact_match_accepts_identical_copy() {
        let (c1, c2) = asp_pair();
        assert!(exact_match(&c1, &c2, 0.1));
    }

    #[test]
    fn exact_match_rejects_atom_count_mismatch() {
        let (c1, _) = asp_pair();
        let c2 = conformer(&[(" CG ", 0.1, [0.0, 0.0, 0.0])]);
        assert!(!exact_match(&c1, &c2, 0.1));
    }

    #[test]
    fn exact_match_rejects_active_count_mismatch() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[3].on = false;
        assert!(!exact_match(&c1, &c2, 0.1));
    }

    #[test]
    fn exact_match_rejects_charge_difference() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[1].charge += 0.01;
        assert!(!exact_match(&c1, &c2, 0.1));
    }

    #[test]
    fn exact_match_rejects_displaced_atom() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[2].position.x += 0.5;
        assert!(!exact_match(&c1, &c2, 0.1));
        // A generous threshold admits the displacement again.
        assert!(exact_match(&c1, &c2, 1.0));
    }

    #[test]
    fn exact_match_ignores_inactive_atoms() {
        let (mut c1, mut c2) = asp_pair();
        c1.atoms_mut()[3].on = false;
        c2.atoms_mut()[3].on = false;
        c2.atoms_mut()[3].position.x += 50.0;
        assert!(exact_match(&c1, &c2, 0.1));
    }

    #[test]
    fn heavy_atom_match_ignores_hydrogens_and_charge() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[3].position.x += 50.0; // hydrogen moved far away
        c2.atoms_mut()[1].charge = 0.9; // charge differs on a heavy atom
        assert!(heavy_atom_match(&c1, &c2, 0.1));
    }

    #[test]
    fn heavy_atom_match_rejects_heavy_count_mismatch() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[2].on = false;
        assert!(!heavy_atom_match(&c1, &c2, 0.1));
    }

    #[test]
    fn heavy_atom_match_pairs_by_element_class() {
        // OD1 and OD2 share the element class "OD", so swapped oxygens still
        // match under the greedy rule.
        let c1 = conformer(&[
            (" OD1", -0.5, [1.0, 0.0, 0.0]),
            (" OD2", -0.5, [0.0, 1.0, 0.0]),
        ]);
        let c2 = conformer(&[
            (" OD1", -0.5, [0.0, 1.0, 0.0]),
            (" OD2", -0.5, [1.0, 0.0, 0.0]),
        ]);
        assert!(heavy_atom_match(&c1, &c2, 0.1));
    }

    #[test]
    fn max_distance_returns_sentinel_on_count_mismatch() {
        let (c1, mut c2) = asp_pair();
        c2.atoms_mut()[0].on = false;
        assert_eq!(heavy_atom_max_distance(&c1, &c2), MATCH_SENTINEL);
    }

    #[test]
    fn max_distance_of_identical_conformers_is_small() {
        let (c1, c2) = asp_pair();
        let d = heavy_atom_max_distance(&c1, &c2);
        // The narrowing loop bottoms out at the epsilon floor.
        assert!(d <= NARROWING_EPSILON.sqrt() + 1e-12);
    }

    #[test]
    fn max_distance_reports_the_largest_needed_pairing_radius() {
        let c1 = conformer(&[
            (" CA ", 0.0, [0.0, 0.0, 0.0]),
            (" CB ", 0.0, [2.0, 0.0, 0.0]),
        ]);
        let c2 = conformer(&[
            (" CA ", 0.0, [0.0, 0.5, 0.0]),
            (" CB ", 0.0, [2.0, 0.0, 0.0]),
        ]);
        let d = heavy_atom_max_distance(&c1, &c2);
        assert!(d <= MATCH_SENTINEL);
        assert!((d - 0.5).abs() < 0.01);
    }

    #[test]
    fn max_distance_without_heavy_atoms_is_zero() {
        let c1 = conformer(&[(" HA ", 0.0, [0.0, 0.0, 0.0])]);
        let c2 = conformer(&[(" HA ", 0.0, [5.0, 0.0, 0.0])]);
        assert_eq!(heavy_atom_max_distance(&c1, &c2), 0.0);
    }

    #[test]
    fn rmsd_of_identical_copy_is_zero() {
        let (c1, c2) = asp_pair();
        assert_eq!(heavy_atom_rmsd(&c1, &c2), 0.0);
    }

    #[test]
    fn rmsd_requires_exact_name_counterparts() {
        let c1 = conformer(&[(" OD1", -0.5, [0.0, 0.0, 0.0])]);
        let c2 = conformer(&[(" OD2", -0.5, [0.0, 0.0, 0.0])]);
        // Same element class, different full name: the RMSD metric is
        // stricter than the topology match.
        assert_eq!(heavy_atom_rmsd(&c1, &c2), MATCH_SENTINEL);
        assert!(heavy_atom_match(&c1, &c2, 0.1));
    }

    #[test]
    fn rmsd_averages_squared_displacements() {
        let c1 = conformer(&[
            (" CA ", 0.0, [0.0, 0.0, 0.0]),
            (" CB ", 0.0, [1.0, 0.0, 0.0]),
        ]);
        let c2 = conformer(&[
            (" CA ", 0.0, [0.0, 0.0, 3.0]),
            (" CB ", 0.0, [1.0, 0.0, 4.0]),
        ]);
        // sqrt((9 + 16) / 2)
        assert!((heavy_atom_rmsd(&c1, &c2) - (12.5f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rmsd_without_heavy_atoms_is_zero() {
        let c1 = conformer(&[(" HA ", 0.0, [0.0, 0.0, 0.0])]);
        let c2 = conformer(&[(" HB ", 0.0, [5.0, 0.0, 0.0])]);
        assert_eq!(heavy_atom_rmsd(&c1, &c2), 0.0);
    }
}
