//! Influencers the user has marked for bulk actions.

use crate::CoreError;

/// Insertion-ordered set of selected influencer ids.
///
/// Sizes are a page of search results, so a `Vec` with linear membership
/// checks is enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Adds a single id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadySelected`] when the id is already present.
    pub fn add(&mut self, id: &str) -> Result<(), CoreError> {
        if self.contains(id) {
            return Err(CoreError::AlreadySelected(id.to_string()));
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    /// Flips membership of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Marks every id as selected. Ids already present are left alone.
    pub fn mark_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            if !self.contains(id) {
                self.ids.push(id.to_string());
            }
        }
    }

    /// Drops ids for which `known` returns false.
    pub fn retain_known<F>(&mut self, known: F)
    where
        F: Fn(&str) -> bool,
    {
        self.ids.retain(|id| known(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
