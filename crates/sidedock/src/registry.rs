//! Name lookup for registered panels.

use crate::error::{LayoutError, LayoutResult};
use crate::types::PanelId;
use indexmap::IndexMap;

/// Maps panel names to ids, in registration order.
///
/// Names are unique; a second registration under the same name is a
/// configuration error. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    by_name: IndexMap<String, PanelId>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, name: &str, id: PanelId) -> LayoutResult<()> {
        if self.by_name.contains_key(name) {
            return Err(LayoutError::DuplicatePanelName(name.to_string()));
        }
        self.by_name.insert(name.to_string(), id);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<PanelId> {
        self.by_name.get(name).copied()
    }

    /// Like [`get`](Self::get), failing with [`LayoutError::UnknownPanel`].
    pub fn require(&self, name: &str) -> LayoutResult<PanelId> {
        self.get(name)
            .ok_or_else(|| LayoutError::UnknownPanel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
