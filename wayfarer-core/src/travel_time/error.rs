use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeProvider::get_etas`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// The request carried no origin coordinate.
    #[error("an origin coordinate is required")]
    MissingOrigin,
    /// The request carried no destinations, or an empty list of them.
    ///
    /// Callers that treat ETAs as advisory should use
    /// [`crate::travel_time::estimate_etas`], which maps this to an empty
    /// list.
    #[error("at least one destination is required")]
    EmptyInput,
}
