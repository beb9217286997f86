//! Identifier and parent lookups over a borrowed model tree.
//!
//! The tree itself owns its elements; these indices only borrow them. Both are meant to be
//! built for a single pass over an unchanging tree and dropped before the tree is mutated.

use rustc_hash::FxHashMap;

use crate::element::SModelElement;
use crate::error::IndexError;

/// Identifier registry: `id -> element`.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex<'a> {
    id2element: FxHashMap<&'a str, &'a SModelElement>,
}

impl<'a> ModelIndex<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single element. Children are not visited.
    pub fn add(&mut self, element: &'a SModelElement) -> Result<(), IndexError> {
        if self.id2element.contains_key(element.id.as_str()) {
            return Err(IndexError::DuplicateId {
                id: element.id.clone(),
            });
        }
        self.id2element.insert(element.id.as_str(), element);
        Ok(())
    }

    pub fn remove(&mut self, element: &SModelElement) {
        self.id2element.remove(element.id.as_str());
    }

    pub fn get_by_id(&self, id: &str) -> Option<&'a SModelElement> {
        self.id2element.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id2element.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.id2element.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2element.is_empty()
    }
}

/// [`ModelIndex`] extended with a `child id -> parent element` map.
///
/// `add` records parent pointers for the direct children of the added element only; use
/// [`ParentIndex::add_tree`] (or [`ParentIndex::from_root`]) to cover a whole subtree.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex<'a> {
    base: ModelIndex<'a>,
    id2parent: FxHashMap<&'a str, &'a SModelElement>,
}

impl<'a> ParentIndex<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index covering `root` and all of its descendants.
    pub fn from_root(root: &'a SModelElement) -> Result<Self, IndexError> {
        let mut index = Self::new();
        index.add_tree(root)?;
        Ok(index)
    }

    /// Registers `element` and points each of its direct children at it.
    ///
    /// A child that already had a parent is re-pointed at `element`.
    pub fn add(&mut self, element: &'a SModelElement) -> Result<(), IndexError> {
        self.base.add(element)?;
        for child in element.children() {
            self.id2parent.insert(child.id.as_str(), element);
        }
        Ok(())
    }

    /// Drops the parent pointers of the direct children of `element`, then unregisters it.
    pub fn remove(&mut self, element: &SModelElement) {
        for child in element.children() {
            self.id2parent.remove(child.id.as_str());
        }
        self.base.remove(element);
    }

    /// Calls [`ParentIndex::add`] for `root` and every descendant, in pre-order.
    pub fn add_tree(&mut self, root: &'a SModelElement) -> Result<(), IndexError> {
        let before = self.base.len();
        for element in root.iter_preorder() {
            self.add(element)?;
        }
        tracing::trace!(
            root = %root.id,
            added = self.base.len() - before,
            "indexed model subtree"
        );
        Ok(())
    }

    pub fn get_parent(&self, id: &str) -> Option<&'a SModelElement> {
        self.id2parent.get(id).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&'a SModelElement> {
        self.base.get_by_id(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.base.contains(id)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn base(&self) -> &ModelIndex<'a> {
        &self.base
    }
}
