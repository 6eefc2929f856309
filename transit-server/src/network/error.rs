//! Graph build errors.

/// Why a transit graph could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A parameter is out of range.
    #[error("invalid graph parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A coordinate cannot be placed in the metric plane.
    #[error("cannot project coordinate ({lon}, {lat})")]
    Projection { lon: f64, lat: f64 },

    /// No stop with a usable name survived filtering.
    #[error("no named stops to build a graph from")]
    NoStops,
}
