use thiserror::Error;

/// Errors raised while turning an area specification into an [`Area`](crate::models::Area)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeofenceError {
    /// Neither a radius nor a geometry was supplied
    #[error("radius or geom must be provided")]
    MissingAreaSpec,

    /// A radius was supplied without both center coordinates
    #[error("lon and lat must be provided with a radius")]
    IncompleteRadiusSpec,

    /// The area could not be built into a valid polygon
    #[error("invalid area: {0}")]
    InvalidArea(String),
}

