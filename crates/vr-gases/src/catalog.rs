use crate::error::{GasError, GasResult};
use crate::gas::Gas;
use std::collections::HashSet;

/// Every gas the panel knows about, ordered by index.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemGases {
    gases: Vec<Gas>,
}

impl SystemGases {
    /// Build the catalogue. Indices and names must both be unique.
    pub fn new(gases: impl IntoIterator<Item = Gas>) -> GasResult<Self> {
        let mut gases: Vec<Gas> = gases.into_iter().collect();
        if gases.is_empty() {
            return Err(GasError::Empty);
        }

        let mut names = HashSet::new();
        let mut indices = HashSet::new();
        for gas in &gases {
            if !indices.insert(gas.index()) {
                return Err(GasError::Duplicate {
                    what: "index",
                    value: gas.index().to_string(),
                });
            }
            if !names.insert(gas.name()) {
                return Err(GasError::Duplicate {
                    what: "name",
                    value: gas.name().to_string(),
                });
            }
        }

        gases.sort_by_key(Gas::index);
        Ok(Self { gases })
    }

    pub fn by_index(&self, index: u32) -> Option<&Gas> {
        self.gases
            .binary_search_by_key(&index, Gas::index)
            .ok()
            .map(|pos| &self.gases[pos])
    }

    pub fn by_name(&self, name: &str) -> Option<&Gas> {
        let name = name.trim();
        self.gases.iter().find(|gas| gas.name() == name)
    }

    /// Like `by_name` but reports the miss as an error.
    pub fn require(&self, name: &str) -> GasResult<&Gas> {
        self.by_name(name).ok_or_else(|| GasError::UnknownGas {
            name: name.to_string(),
        })
    }

    /// Case-insensitive substring search over names.
    pub fn search(&self, query: &str) -> Vec<&Gas> {
        let query = query.trim().to_ascii_lowercase();
        self.gases
            .iter()
            .filter(|gas| query.is_empty() || gas.name().to_ascii_lowercase().contains(&query))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gas> + '_ {
        self.gases.iter()
    }

    pub fn len(&self) -> usize {
        self.gases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gases.is_empty()
    }

    /// Lowest index in the catalogue.
    pub fn min_index(&self) -> u32 {
        self.gases.first().map(Gas::index).unwrap_or(0)
    }

    /// Highest index in the catalogue.
    pub fn max_index(&self) -> u32 {
        self.gases.last().map(Gas::index).unwrap_or(0)
    }
}
