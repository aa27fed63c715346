//! # Traits - Seams Between LIA and the Outside World
//!
//! Collectors live outside the cognitive core. The core only knows this
//! trait; the brain crate wraps every source so that a failing feed can
//! never abort a cycle.

use async_trait::async_trait;

use crate::error::LiaResult;
use crate::experience::Experience;

/// A feed of experiences (social platforms, HTTP endpoints, an inbox...)
///
/// Implementations may fail freely; the caller converts any error into an
/// empty batch plus a warning.
#[async_trait]
pub trait ExperienceSource: Send + Sync {
    /// Name of this source (for logging)
    fn name(&self) -> &str;

    /// Fetch whatever is new since the previous call
    async fn fetch(&self) -> LiaResult<Vec<Experience>>;
}
