use crate::catalog::{Artwork, ArtworkId};
use std::collections::HashSet;

/// Selected records, keyed by artwork id and kept in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    records: Vec<Artwork>,
    ids: HashSet<ArtworkId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `false` if a record with the same id was already selected.
    pub fn insert(&mut self, artwork: Artwork) -> bool {
        if !self.ids.insert(artwork.id) {
            return false;
        }
        self.records.push(artwork);
        true
    }

    pub fn remove(&mut self, id: ArtworkId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|record| record.id != id);
        true
    }

    /// Flip membership of `artwork`; returns whether it ends up selected.
    pub fn toggle(&mut self, artwork: &Artwork) -> bool {
        if self.remove(artwork.id) {
            false
        } else {
            self.insert(artwork.clone())
        }
    }

    /// Drop the current selection and select `records` instead.
    pub fn replace(&mut self, records: impl IntoIterator<Item = Artwork>) {
        self.records.clear();
        self.ids.clear();
        for record in records {
            self.insert(record);
        }
    }

    pub fn contains_all<'a>(&self, mut records: impl Iterator<Item = &'a Artwork>) -> bool {
        records.all(|record| self.contains(record.id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|record| record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(id: ArtworkId) -> Artwork {
        Artwork {
            id,
            title: format!("Artwork {}", id),
            artist_display: String::new(),
            place_of_origin: String::new(),
            inscriptions: String::new(),
            date_start: None,
            date_end: None,
        }
    }

    #[test]
    fn test_membership_is_by_id() {
        let mut selection = Selection::new();
        assert!(selection.insert(artwork(7)));

        // Same id, different payload: still a duplicate
        let mut renamed = artwork(7);
        renamed.title = "Renamed".to_string();
        assert!(!selection.insert(renamed));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.records()[0].title, "Artwork 7");
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut selection = Selection::new();
        assert!(selection.toggle(&artwork(1)));
        assert!(selection.toggle(&artwork(2)));
        assert!(!selection.toggle(&artwork(1)));
        assert!(!selection.contains(1));
        assert!(selection.contains(2));
        assert!(!selection.remove(1));
    }

    #[test]
    fn test_replace_keeps_order_and_dedups() {
        let mut selection = Selection::new();
        selection.insert(artwork(99));
        selection.replace(vec![artwork(3), artwork(1), artwork(3), artwork(2)]);

        assert!(!selection.contains(99));
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
