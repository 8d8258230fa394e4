use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("area must have positive width and height, got {width} x {height}")]
    DegenerateArea { width: f64, height: f64 },

    #[error("invalid speed range [{min}, {max}]: need 0 < min <= max")]
    InvalidSpeed { min: f64, max: f64 },

    #[error("start position {0} lies outside the movement area")]
    StartOutsideArea(dtn_core::Position),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
