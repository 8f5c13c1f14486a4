//! The component registry of one compile run.
//!
//! An ordered name → descriptor mapping. Insertion order drives the order of
//! registry entries in the module, placeholder containers in the host
//! document, and style concatenation.

use std::collections::HashMap;

use tracing::warn;

use crate::ComponentDescriptor;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<ComponentDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor.
    ///
    /// A repeated name replaces the earlier descriptor but keeps its position,
    /// the same as assigning an existing key on a JS object.
    pub fn insert(&mut self, descriptor: ComponentDescriptor) {
        if let Some(&position) = self.index.get(&descriptor.name) {
            warn!(
                component = %descriptor.name,
                "component name collision, later source replaces earlier entry"
            );
            self.entries[position] = descriptor;
            return;
        }
        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push(descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentDescriptor> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|d| d.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ComponentDescriptor;
    type IntoIter = std::slice::Iter<'a, ComponentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
