use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KeplightError {
    #[error("Orbital period must be strictly positive, got {0} days")]
    NonPositivePeriod(f64),

    #[error("Semi-major axis must be strictly positive, got {0} primary radii")]
    NonPositiveSemiMajorAxis(f64),

    #[error("Eccentricity must lie in [0, 1) for a bound orbit, got {0}")]
    EccentricityOutOfRange(f64),

    #[error("Inclination must lie in [0, 180] degrees, got {0}")]
    InclinationOutOfRange(f64),

    #[error("Orbital element `{name}` is not finite: {value}")]
    NonFiniteElement { name: &'static str, value: f64 },

    #[error("Length scale must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    #[error("Observation time at index {index} is not finite: {value}")]
    NonFiniteTime { index: usize, value: f64 },

    #[error("Body index {index} out of range ({len} bodies)")]
    BodyIndexOutOfRange { index: usize, len: usize },
}
