// Implicit element indexing: per-property orchestration of the descriptor
// patterns, the per-file indexing payload, and occurrence emission through a
// host-provided sink.

use std::collections::HashMap;

use tracing::{debug, trace};
use tree_sitter::Node;

use crate::patterns::{self, DescriptorMatch};
use crate::types::{FileContext, ImplicitElement, IndexKey};

/// Identifier registered for [`IndexKey::Components`] by default.
pub const COMPONENTS_INDEX_ID: &str = "vue.components.index";
/// Identifier registered for [`IndexKey::Options`] by default.
pub const OPTIONS_INDEX_ID: &str = "vue.options.index";

/// Explicit mapping from index keys to index identifiers.
///
/// Constructed once at initialization and passed by reference into the
/// indexer; never consulted as ambient global state. The registered set is
/// open: hosts may add or replace entries, and an element whose key has no
/// registered identifier is silently skipped at indexing time.
#[derive(Debug, Clone)]
pub struct IndexRegistry {
    entries: HashMap<IndexKey, String>,
}

impl Default for IndexRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(IndexKey::Components, COMPONENTS_INDEX_ID);
        registry.register(IndexKey::Options, OPTIONS_INDEX_ID);
        registry
    }
}

impl IndexRegistry {
    /// A registry with no entries; every lookup misses until the host
    /// registers identifiers.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: IndexKey, identifier: impl Into<String>) {
        self.entries.insert(key, identifier.into());
    }

    pub fn identifier(&self, key: IndexKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Receiver for index occurrences, owned by the host.
pub trait OccurrenceSink {
    fn occurrence(&mut self, index_id: &str, symbol_name: &str);
}

/// Append-only, single-writer sequence of implicit elements accumulated for
/// one file. Discarded together with the tree it borrows from.
#[derive(Debug, Default)]
pub struct IndexingData<'tree> {
    elements: Vec<ImplicitElement<'tree>>,
}

impl<'tree> IndexingData<'tree> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn add_implicit_element(&mut self, element: ImplicitElement<'tree>) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[ImplicitElement<'tree>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Stateless per-property orchestrator over the descriptor patterns.
pub struct ImplicitElementIndexer<'r> {
    registry: &'r IndexRegistry,
}

impl<'r> ImplicitElementIndexer<'r> {
    pub fn new(registry: &'r IndexRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate the descriptor patterns for one visited property and append
    /// the resulting element, if any, to the file's indexing data.
    ///
    /// At most one element is produced per object literal because only the
    /// first property triggers evaluation.
    pub fn on_property_visited<'a, 'tree>(
        &self,
        property: Node<'tree>,
        source: &[u8],
        file: &FileContext,
        data: &'a mut IndexingData<'tree>,
    ) -> Option<&'a ImplicitElement<'tree>> {
        let DescriptorMatch { name, index_key } =
            patterns::match_descriptor(property, source, file)?;
        debug!(name = %name, key = ?index_key, file = %file.file_name, "implicit element");
        data.add_implicit_element(ImplicitElement::new(name, index_key, property));
        data.elements.last()
    }

    /// Emit one occurrence for the element to the sink.
    ///
    /// Returns false without emitting when no identifier is registered for
    /// the element's key; an unregistered key is a configuration gap, not a
    /// fault.
    pub fn index(&self, element: &ImplicitElement<'_>, sink: &mut dyn OccurrenceSink) -> bool {
        match self.registry.identifier(element.index_key) {
            Some(identifier) => {
                sink.occurrence(identifier, &element.name);
                true
            }
            None => {
                trace!(key = ?element.index_key, "no index registered, skipping occurrence");
                false
            }
        }
    }

    /// Index every element accumulated for a file; returns how many
    /// occurrences were emitted.
    pub fn index_all(&self, data: &IndexingData<'_>, sink: &mut dyn OccurrenceSink) -> usize {
        data.elements()
            .iter()
            .filter(|element| self.index(element, sink))
            .count()
    }
}
