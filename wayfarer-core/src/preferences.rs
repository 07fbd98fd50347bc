//! User search intent: interests, budget, radius and transport mode.
//!
//! Parsing of user-facing labels is deliberately lossy. An unrecognised
//! budget admits every price tier and an unrecognised transport mode falls
//! back to walking, so a typo never empties a result list.

use std::fmt;

use crate::PriceTier;

/// Search radius applied when the caller does not choose one, in metres.
pub const DEFAULT_RADIUS_METRES: u32 = 2_000;

/// User-facing budget category.
///
/// # Examples
/// ```
/// use wayfarer_core::{Budget, PriceTier};
///
/// let budget = Budget::parse("Medium");
/// assert!(budget.admits(PriceTier::Moderate));
/// assert!(!budget.admits(PriceTier::Expensive));
/// assert_eq!(Budget::parse("lavish"), Budget::Unrestricted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Budget {
    /// Admits `$` only.
    Low,
    /// Admits `$` and `$$`.
    Medium,
    /// Admits every tier.
    High,
    /// Any unrecognised label; admits every tier.
    Unrestricted,
}

impl Budget {
    /// Parse a budget label case-insensitively, mapping unknown labels to
    /// [`Budget::Unrestricted`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unrestricted,
        }
    }

    /// Return the most expensive tier this budget accepts, if it caps one.
    #[must_use]
    pub const fn ceiling(self) -> Option<PriceTier> {
        match self {
            Self::Low => Some(PriceTier::Inexpensive),
            Self::Medium => Some(PriceTier::Moderate),
            Self::High | Self::Unrestricted => None,
        }
    }

    /// Whether a place priced at `tier` fits this budget.
    #[must_use]
    pub fn admits(self, tier: PriceTier) -> bool {
        self.ceiling().is_none_or(|ceiling| tier <= ceiling)
    }

    /// Lowercase label of the budget.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrestricted => "unrestricted",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Budget {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<String> for Budget {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<Budget> for String {
    fn from(budget: Budget) -> Self {
        budget.as_str().to_owned()
    }
}

/// How the user intends to travel between places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum TransportMode {
    /// On foot, 5 km/h.
    #[default]
    Walking,
    /// By car, 40 km/h.
    Driving,
    /// Public transport, 20 km/h.
    Transit,
}

impl TransportMode {
    /// Parse a mode label case-insensitively; unknown labels mean walking.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::TransportMode;
    ///
    /// assert_eq!(TransportMode::parse("DRIVING"), TransportMode::Driving);
    /// assert_eq!(TransportMode::parse("hovercraft"), TransportMode::Walking);
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "driving" => Self::Driving,
            "transit" => Self::Transit,
            _ => Self::Walking,
        }
    }

    /// Average travel speed in metres per hour.
    ///
    /// Whole-number hourly rates keep minute estimates exact: 1000 m on
    /// foot is 12 minutes rather than 12.0048.
    #[must_use]
    pub const fn metres_per_hour(self) -> u32 {
        match self {
            Self::Walking => 5_000,
            Self::Driving => 40_000,
            Self::Transit => 20_000,
        }
    }

    /// Lowercase label of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TransportMode {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<String> for TransportMode {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        mode.as_str().to_owned()
    }
}

/// A user's search intent for one ranking request.
///
/// # Examples
/// ```
/// use wayfarer_core::{Budget, Preferences, TransportMode};
///
/// let prefs = Preferences::default()
///     .with_interests(["museum"])
///     .with_budget(Budget::Medium)
///     .with_radius_metres(1_500);
/// assert_eq!(prefs.transport_mode, TransportMode::Walking);
/// assert_eq!(prefs.radius_metres, 1_500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Preferences {
    /// Free-text interest terms in the order the user gave them.
    pub interests: Vec<String>,
    /// Budget category, when the user stated one.
    pub budget: Option<Budget>,
    /// Search radius around the user, in metres.
    pub radius_metres: u32,
    /// Preferred way of travelling.
    pub transport_mode: TransportMode,
    /// Whether the user needs step-free or otherwise accessible venues.
    pub accessibility_needs: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            budget: None,
            radius_metres: DEFAULT_RADIUS_METRES,
            transport_mode: TransportMode::default(),
            accessibility_needs: false,
        }
    }
}

impl Preferences {
    /// Replace the interests while returning `self` for chaining.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Set the budget while returning `self` for chaining.
    #[must_use]
    pub const fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Set the search radius while returning `self` for chaining.
    #[must_use]
    pub const fn with_radius_metres(mut self, radius_metres: u32) -> Self {
        self.radius_metres = radius_metres;
        self
    }

    /// Set the transport mode while returning `self` for chaining.
    #[must_use]
    pub const fn with_transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    /// Set the accessibility flag while returning `self` for chaining.
    #[must_use]
    pub const fn with_accessibility_needs(mut self, needs: bool) -> Self {
        self.accessibility_needs = needs;
        self
    }

    /// Overwrite the fields present in `delta`.
    ///
    /// An empty interest list and a zero radius count as absent. The
    /// returned [`DeltaEffect`] tells the caller whether cached candidates
    /// are still valid.
    pub fn merge(&mut self, delta: PreferencesDelta) -> DeltaEffect {
        let mut effect = DeltaEffect::Unchanged;

        if let Some(interests) = delta.interests.filter(|terms| !terms.is_empty()) {
            if interests != self.interests {
                effect = DeltaEffect::Refetch;
            }
            self.interests = interests;
        }
        if let Some(budget) = delta.budget {
            if self.budget != Some(budget) {
                effect = DeltaEffect::Refetch;
            }
            self.budget = Some(budget);
        }
        if let Some(radius) = delta.radius_metres.filter(|metres| *metres > 0) {
            if radius != self.radius_metres {
                effect = DeltaEffect::Refetch;
            }
            self.radius_metres = radius;
        }
        if let Some(mode) = delta.transport_mode {
            if mode != self.transport_mode {
                effect = effect.max(DeltaEffect::Rescore);
            }
            self.transport_mode = mode;
        }
        if let Some(needs) = delta.accessibility_needs {
            if needs != self.accessibility_needs {
                effect = effect.max(DeltaEffect::Rescore);
            }
            self.accessibility_needs = needs;
        }
        effect
    }
}

/// A partial update to [`Preferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PreferencesDelta {
    /// Replacement interests; ignored when empty.
    pub interests: Option<Vec<String>>,
    /// Replacement budget.
    pub budget: Option<Budget>,
    /// Replacement radius; ignored when zero.
    pub radius_metres: Option<u32>,
    /// Replacement transport mode.
    pub transport_mode: Option<TransportMode>,
    /// Replacement accessibility flag.
    pub accessibility_needs: Option<bool>,
}

/// What a [`PreferencesDelta`] changed, ordered by how much work it forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeltaEffect {
    /// Nothing changed.
    Unchanged,
    /// Only scoring inputs changed; cached candidates remain valid.
    Rescore,
    /// An acquisition filter changed; cached candidates are stale.
    Refetch,
}
