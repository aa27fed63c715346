//! # LIA Core
//!
//! Core types and traits for LIA, a continuously running cognitive agent.
//!
//! This crate provides the shared vocabulary:
//! - **Experience**: One event observed in the outside world
//! - **LiaConfig**: The tunables of the cognitive cycle
//! - **LiaError**: Unified error type
//! - **ExperienceSource**: The seam collectors plug into
//!
//! The cognitive engine itself (memory, desires, world model, scheduler)
//! lives in `lia-brain`.

pub mod config;
pub mod error;
pub mod experience;
pub mod traits;

// Re-export main types at crate root
pub use config::LiaConfig;
pub use error::{LiaError, LiaResult};
pub use experience::Experience;
pub use traits::ExperienceSource;

/// Clamp a score into [0, 1], mapping NaN to 0
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(0.42), 0.42);
    }
}
