//! Holds the most recent candidate set so re-ranking skips acquisition.

use crate::RecommendationCard;

/// At most one candidate set, unscored and in acquisition order.
///
/// An empty set is never stored; [`CandidateCache::get`] treats it as a
/// miss so the next ranking pass tries the provider again.
///
/// # Examples
/// ```
/// use wayfarer_core::CandidateCache;
///
/// let mut cache = CandidateCache::new();
/// assert!(cache.get().is_none());
/// cache.store(Vec::new());
/// assert!(cache.get().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateCache {
    cards: Option<Vec<RecommendationCard>>,
}

impl CandidateCache {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: None }
    }

    /// Create a cache pre-seeded with `cards`.
    #[must_use]
    pub fn seeded(cards: Vec<RecommendationCard>) -> Self {
        let mut cache = Self::new();
        cache.store(cards);
        cache
    }

    /// Cached candidates, if any.
    #[must_use]
    pub fn get(&self) -> Option<&[RecommendationCard]> {
        self.cards.as_deref()
    }

    /// Replace the cached set; an empty set clears the cache.
    pub fn store(&mut self, cards: Vec<RecommendationCard>) {
        self.cards = if cards.is_empty() { None } else { Some(cards) };
    }

    /// Drop the cached set.
    pub fn clear(&mut self) {
        self.cards = None;
    }

    /// Whether a candidate set is held.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.cards.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecommendationCard, geodesy::lat_lng, test_support::toronto_pois};
    use rstest::rstest;

    fn cards() -> Vec<RecommendationCard> {
        toronto_pois()
            .iter()
            .map(|poi| RecommendationCard::from_poi(poi, Some(lat_lng(43.6532, -79.3832))))
            .collect()
    }

    #[rstest]
    fn seeded_cache_returns_cards_in_order() {
        let expected = cards();
        let cache = CandidateCache::seeded(expected.clone());
        assert_eq!(cache.get(), Some(expected.as_slice()));
    }

    #[rstest]
    fn store_replaces_previous_set() {
        let mut cache = CandidateCache::seeded(cards());
        let replacement: Vec<_> = cards().into_iter().take(1).collect();
        cache.store(replacement);
        assert_eq!(cache.get().map(<[_]>::len), Some(1));
    }

    #[rstest]
    fn clear_drops_the_set() {
        let mut cache = CandidateCache::seeded(cards());
        cache.clear();
        assert!(!cache.is_populated());
    }
}
