//! Score recommendation cards for a user's preferences and context.
//!
//! The `Scorer` trait assigns a ranking score to a
//! [`RecommendationCard`](crate::RecommendationCard). [`WeightedScorer`] is
//! the stock implementation: a rating term, a distance term and a flat
//! budget credit, weighted 40/40/20 by default.

use thiserror::Error;

use crate::{Context, Preferences, RecommendationCard, poi::MAX_RATING};

/// Upper bound of any sanitised score.
pub const MAX_SCORE: f64 = 100.0;

/// Calculate a ranking score for a recommendation card.
///
/// Higher scores rank earlier. Implementations must be thread-safe
/// (`Send` + `Sync`) and infallible; return `0.0` when no information is
/// available.
///
/// Implementations must:
/// - Produce finite scores.
/// - Return values in `0.0..=MAX_SCORE`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use wayfarer_core::{Context, Preferences, RecommendationCard, Scorer};
///
/// struct RatingOnly;
///
/// impl Scorer for RatingOnly {
///     fn score(&self, card: &RecommendationCard, _: &Preferences, _: &Context) -> f64 {
///         Self::sanitise(f64::from(card.rating) * 20.0)
///     }
/// }
/// # let _ = RatingOnly;
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `card` under `preferences` and `context`.
    fn score(&self, card: &RecommendationCard, preferences: &Preferences, context: &Context)
    -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=MAX_SCORE`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, MAX_SCORE)
    }
}

/// Maximum contribution of each scoring term.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Credit for a perfect five-star rating.
    pub rating: f64,
    /// Credit for a place at the user's location.
    pub distance: f64,
    /// Flat credit for every candidate that survived the budget filter.
    pub budget: f64,
}

/// Errors returned by [`ScoreWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreWeightsError {
    /// A weight was NaN or infinite.
    #[error("score weights must be finite")]
    NotFinite,
    /// A weight was below zero.
    #[error("score weights must not be negative")]
    Negative,
    /// Every weight was zero.
    #[error("score weights must not all be zero")]
    ZeroTotal,
    /// The weights summed to more than [`MAX_SCORE`].
    #[error("score weights must sum to at most {MAX_SCORE}")]
    AboveMaximum,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when a weight is not finite or negative,
    /// or the total is zero or above [`MAX_SCORE`].
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        let weights = [self.rating, self.distance, self.budget];
        if !weights.iter().all(|weight| weight.is_finite()) {
            return Err(ScoreWeightsError::NotFinite);
        }
        if weights.iter().any(|weight| *weight < 0.0) {
            return Err(ScoreWeightsError::Negative);
        }
        let total = self.total();
        if total == 0.0 {
            return Err(ScoreWeightsError::ZeroTotal);
        }
        if total > MAX_SCORE {
            return Err(ScoreWeightsError::AboveMaximum);
        }
        Ok(self)
    }

    /// Sum of the three weights.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weights are summed")]
    pub fn total(self) -> f64 {
        self.rating + self.distance + self.budget
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: 40.0,
            distance: 40.0,
            budget: 20.0,
        }
    }
}

/// Scores cards by rating, proximity and a flat budget credit.
///
/// `score = rating / 5 * w_rating + max(0, 1 - distance / radius) * w_distance + w_budget`
///
/// A zero radius earns no distance credit.
///
/// # Examples
/// ```
/// use wayfarer_core::{Context, Preferences, RecommendationCard, Scorer, WeightedScorer};
/// use wayfarer_core::geodesy::lat_lng;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let card = RecommendationCard {
///     place_id: "poi_001".into(),
///     name: "CN Tower".into(),
///     rating: 5.0,
///     distance_metres: 0.0,
///     summary: "Landmark".into(),
///     location: lat_lng(43.6426, -79.3871),
///     score: 0.0,
/// };
/// let context = Context::now(None, None);
/// let score = WeightedScorer::default().score(&card, &Preferences::default(), &context);
/// assert_eq!(score, 100.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedScorer {
    weights: ScoreWeights,
}

impl WeightedScorer {
    /// Create a scorer with validated `weights`.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when the weights are invalid.
    pub fn new(weights: ScoreWeights) -> Result<Self, ScoreWeightsError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    #[expect(clippy::float_arithmetic, reason = "rating is normalised to 0..=1")]
    fn rating_term(&self, rating: f32) -> f64 {
        f64::from(rating) / f64::from(MAX_RATING) * self.weights.rating
    }

    #[expect(clippy::float_arithmetic, reason = "proximity decays linearly with distance")]
    fn distance_term(&self, distance_metres: f64, radius_metres: u32) -> f64 {
        if radius_metres == 0 {
            return 0.0;
        }
        let proximity = (1.0 - distance_metres / f64::from(radius_metres)).max(0.0);
        proximity * self.weights.distance
    }
}

impl Scorer for WeightedScorer {
    #[expect(clippy::float_arithmetic, reason = "terms are summed")]
    fn score(
        &self,
        card: &RecommendationCard,
        preferences: &Preferences,
        _context: &Context,
    ) -> f64 {
        let raw = self.rating_term(card.rating)
            + self.distance_term(card.distance_metres, preferences.radius_metres)
            + self.weights.budget;
        Self::sanitise(raw)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point scores"
)]
mod tests {
    use super::*;
    use crate::geodesy::lat_lng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn context() -> Context {
        Context::now(Some(lat_lng(43.6532, -79.3832)), None)
    }

    fn card(rating: f32, distance_metres: f64) -> RecommendationCard {
        RecommendationCard {
            place_id: "p".to_owned(),
            name: "Somewhere".to_owned(),
            rating,
            distance_metres,
            summary: String::new(),
            location: lat_lng(0.0, 0.0),
            score: 0.0,
        }
    }

    #[rstest]
    #[case(5.0, 0.0, 100.0)]
    #[case(0.0, 2_000.0, 20.0)]
    #[case(0.0, 5_000.0, 20.0)]
    #[case(2.5, 1_000.0, 60.0)]
    fn weighted_terms(
        context: Context,
        #[case] rating: f32,
        #[case] distance: f64,
        #[case] expected: f64,
    ) {
        let score = WeightedScorer::default().score(
            &card(rating, distance),
            &Preferences::default(),
            &context,
        );
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn zero_radius_earns_no_distance_credit(context: Context) {
        let prefs = Preferences::default().with_radius_metres(0);
        let score = WeightedScorer::default().score(&card(5.0, 0.0), &prefs, &context);
        assert!((score - 60.0).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(-4.0, 0.0)]
    #[case(140.0, MAX_SCORE)]
    fn sanitise_guards_range(#[case] raw: f64, #[case] expected: f64) {
        assert_eq!(WeightedScorer::sanitise(raw), expected);
    }

    #[rstest]
    #[case(ScoreWeights { rating: f64::NAN, ..ScoreWeights::default() }, ScoreWeightsError::NotFinite)]
    #[case(ScoreWeights { budget: -1.0, ..ScoreWeights::default() }, ScoreWeightsError::Negative)]
    #[case(ScoreWeights { rating: 0.0, distance: 0.0, budget: 0.0 }, ScoreWeightsError::ZeroTotal)]
    #[case(ScoreWeights { rating: 80.0, ..ScoreWeights::default() }, ScoreWeightsError::AboveMaximum)]
    fn invalid_weights_are_rejected(#[case] weights: ScoreWeights, #[case] expected: ScoreWeightsError) {
        assert_eq!(WeightedScorer::new(weights), Err(expected));
    }

    #[rstest]
    fn custom_weights_shift_the_balance(context: Context) {
        let scorer = WeightedScorer::new(ScoreWeights {
            rating: 70.0,
            distance: 30.0,
            budget: 0.0,
        })
        .expect("valid weights");
        let score = scorer.score(&card(5.0, 2_000.0), &Preferences::default(), &context);
        assert!((score - 70.0).abs() < 1e-9, "got {score}");
    }
}
