//! Offer browsing over a trader's catalog.

use rand::Rng;

use crate::data::TradeItem;

/// Read-only view over the session's snapshot of a trader's catalog, plus
/// the cursor for cyclic offer browsing.
///
/// Invariant: the selection index is always valid for the catalog's current
/// length, or the explicit "none" sentinel; never out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCatalog {
    items: Vec<TradeItem>,
    selected: Option<usize>,
}

impl OfferCatalog {
    #[must_use]
    pub const fn new(items: Vec<TradeItem>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[TradeItem] {
        &self.items
    }

    /// The selection index, if any offer is selected.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected offer. On first access of a non-empty catalog the
    /// selection defaults to index 0.
    pub fn current(&mut self) -> Option<&TradeItem> {
        let idx = self.normalized_index()?;
        self.selected = Some(idx);
        self.items.get(idx)
    }

    /// Advance the selection cyclically and return the new offer.
    ///
    /// A stale selection (index no longer valid for the catalog) falls back
    /// to index 0 instead of wrapping from it.
    pub fn next(&mut self) -> Option<&TradeItem> {
        if self.items.is_empty() {
            self.selected = None;
            return None;
        }
        let idx = match self.selected {
            Some(idx) if idx < self.items.len() => (idx + 1) % self.items.len(),
            _ => 0,
        };
        self.selected = Some(idx);
        self.items.get(idx)
    }

    /// Uniform pick over the catalog; does not move the selection.
    pub fn random_item<R: Rng>(&self, rng: &mut R) -> Option<&TradeItem> {
        if self.items.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.items.len());
        self.items.get(idx)
    }

    /// The selected offer, or a random one when no valid selection exists.
    ///
    /// The random fallback becomes the new selection, keeping later intents
    /// aimed at the same offer.
    pub fn selected_or_random<R: Rng>(&mut self, rng: &mut R) -> Option<TradeItem> {
        if self.items.is_empty() {
            self.selected = None;
            return None;
        }
        let idx = match self.normalized_index() {
            Some(idx) => idx,
            None => rng.gen_range(0..self.items.len()),
        };
        self.selected = Some(idx);
        self.items.get(idx).cloned()
    }

    fn normalized_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        match self.selected {
            Some(idx) if idx < self.items.len() => Some(idx),
            _ => Some(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_item(name: &str) -> TradeItem {
        TradeItem {
            name: name.to_string(),
            gold_cost: 5,
            food_restore: 1,
            water_restore: 1,
        }
    }

    fn sample_catalog() -> OfferCatalog {
        OfferCatalog::new(vec![make_item("salt"), make_item("flour"), make_item("tea")])
    }

    #[test]
    fn current_defaults_to_first_offer() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.selected_index(), None);
        assert_eq!(catalog.current().map(|item| item.name.as_str()), Some("salt"));
        assert_eq!(catalog.selected_index(), Some(0));
    }

    #[test]
    fn next_cycles_back_to_start_after_full_pass() {
        let mut catalog = sample_catalog();
        let first = catalog.current().cloned().expect("non-empty catalog");
        for _ in 0..catalog.len() {
            let _ = catalog.next();
        }
        assert_eq!(catalog.current().cloned(), Some(first));
    }

    #[test]
    fn next_recovers_from_stale_selection() {
        let mut catalog = sample_catalog();
        catalog.selected = Some(99);
        assert_eq!(catalog.next().map(|item| item.name.as_str()), Some("salt"));
        assert_eq!(catalog.selected_index(), Some(0));
    }

    #[test]
    fn empty_catalog_yields_no_offers() {
        let mut catalog = OfferCatalog::new(Vec::new());
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(catalog.current().is_none());
        assert!(catalog.next().is_none());
        assert!(catalog.random_item(&mut rng).is_none());
        assert!(catalog.selected_or_random(&mut rng).is_none());
        assert_eq!(catalog.selected_index(), None);
    }

    #[test]
    fn random_item_stays_in_bounds() {
        let catalog = sample_catalog();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..32 {
            let item = catalog.random_item(&mut rng).expect("non-empty catalog");
            assert!(catalog.items().contains(item));
        }
    }

    #[test]
    fn selected_or_random_pins_the_fallback_pick() {
        let mut catalog = sample_catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        let picked = catalog.selected_or_random(&mut rng).expect("non-empty");
        let idx = catalog.selected_index().expect("selection pinned");
        assert_eq!(catalog.items()[idx], picked);
        // A second call with a live selection ignores the RNG entirely.
        let again = catalog.selected_or_random(&mut rng).expect("non-empty");
        assert_eq!(again, picked);
    }
}
