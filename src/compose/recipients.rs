use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Insertion-ordered set of recipient addresses.
///
/// Addresses are compared by exact match on their trimmed form. Format is not
/// checked here; run input through `validate_address_list` first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every address not already present and returns how many were new.
    pub fn add<I, S>(&mut self, addresses: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for address in addresses {
            let address = address.as_ref().trim();
            if address.is_empty() || self.index.contains(address) {
                continue;
            }

            self.index.insert(address.to_string());
            self.order.push(address.to_string());
            added += 1;
        }
        added
    }

    pub fn remove(&mut self, address: &str) -> bool {
        let address = address.trim();
        if !self.index.remove(address) {
            return false;
        }

        self.order.retain(|existing| existing != address);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index.contains(address.trim())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}

impl Serialize for RecipientSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
