use std::collections::BTreeSet;

/// Deduplicated set of ingredient names the user intends to buy.
///
/// Entries are case-sensitive and whitespace-trimmed. The list lives
/// in memory only; a restart yields an empty list. Callers share it
/// behind a lock, so every method here is a plain synchronous set
/// operation.
#[derive(Debug, Default)]
pub struct ShoppingList {
    items: BTreeSet<String>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the trimmed ingredient. Returns whether an insertion
    /// occurred; re-adding an existing entry is a no-op, and empty or
    /// whitespace-only input is silently rejected.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let trimmed = ingredient.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.items.insert(trimmed.to_string())
    }

    /// Discard each given ingredient if present. Absent entries are
    /// silently ignored.
    pub fn remove_all(&mut self, ingredients: &[String]) {
        for ingredient in ingredients {
            self.items.remove(ingredient.as_str());
        }
    }

    /// Current entries, lexicographically sorted.
    pub fn items(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    /// Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
