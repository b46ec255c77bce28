//! The narrow interface to the external parameter store, plus an in-memory
//! implementation of it.
//!
//! The real parameter database (and its file-format parser) is an external
//! collaborator; this library only consumes three typed lookups from it. The
//! [`InMemoryParams`] implementation exists for tests and for embedders that
//! assemble parameters programmatically or from this library's own TOML form.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// A numbered symmetry-swap rule: pairs of atom names whose positions are
/// exchanged to produce a symmetry-equivalent conformer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapRule {
    pub pairs: Vec<(String, String)>,
}

/// Read-only lookups this library requires from the parameter store.
///
/// Every lookup either succeeds or reports "not found" via `None`; a miss is
/// never an error at this layer (it signals "no canonical order available" or
/// "no further rules").
pub trait ParamStore {
    /// The canonical conformer-name ordering for a residue type.
    fn conformer_list(&self, res_name: &str) -> Option<&[String]>;

    /// The `index`-th symmetry-swap rule for a residue type. Rules are
    /// numbered densely from zero; the first `None` terminates discovery.
    fn swap_rule(&self, res_name: &str, index: usize) -> Option<&SwapRule>;

    /// The atom slot index of `atom_name` within conformer type `conf_name`.
    fn atom_index(&self, conf_name: &str, atom_name: &str) -> Option<usize>;
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// A [`ParamStore`] backed by plain maps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InMemoryParams {
    conformer_lists: HashMap<String, Vec<String>>,
    swap_rules: HashMap<String, Vec<SwapRule>>,
    atom_indices: HashMap<String, HashMap<String, usize>>,
}

impl InMemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a parameter set from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn set_conformer_list(&mut self, res_name: &str, names: Vec<String>) {
        self.conformer_lists.insert(res_name.to_string(), names);
    }

    /// Appends a swap rule for `res_name`; rules keep their insertion order
    /// as their number.
    pub fn add_swap_rule(&mut self, res_name: &str, rule: SwapRule) {
        self.swap_rules
            .entry(res_name.to_string())
            .or_default()
            .push(rule);
    }

    pub fn set_atom_index(&mut self, conf_name: &str, atom_name: &str, index: usize) {
        self.atom_indices
            .entry(conf_name.to_string())
            .or_default()
            .insert(atom_name.to_string(), index);
    }
}

impl ParamStore for InMemoryParams {
    fn conformer_list(&self, res_name: &str) -> Option<&[String]> {
        self.conformer_lists.get(res_name).map(Vec::as_slice)
    }

    fn swap_rule(&self, res_name: &str, index: usize) -> Option<&SwapRule> {
        self.swap_rules.get(res_name)?.get(index)
    }

    fn atom_index(&self, conf_name: &str, atom_name: &str) -> Option<usize> {
        self.atom_indices.get(conf_name)?.get(atom_name).copied()
    }
}
