//! Geolocation resolver
//!
//! Produces a best-effort coordinate with a bounded wait. Any failure, a
//! missing location capability, or a timeout all resolve to
//! [`Coordinate::SENTINEL`] so that vendor discovery is always attempted.

use async_trait::async_trait;
use shopsmart_common::Coordinate;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default bound on a location query
pub const DEFAULT_GEO_TIMEOUT: Duration = Duration::from_secs(8);

/// Hints passed to the platform location source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: DEFAULT_GEO_TIMEOUT,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("no location capability")]
    Unsupported,

    #[error("location query exceeded {0:?}")]
    Timeout(Duration),
}

/// A platform location capability
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Coordinate, LocationError>;
}

/// Location source that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Resolves a coordinate, never fails
#[derive(Clone)]
pub struct GeolocationResolver {
    source: Option<Arc<dyn LocationSource>>,
    options: PositionOptions,
}

impl GeolocationResolver {
    pub fn new(source: Arc<dyn LocationSource>, timeout: Duration) -> Self {
        Self {
            source: Some(source),
            options: PositionOptions {
                high_accuracy: true,
                timeout,
            },
        }
    }

    /// Resolver for a platform without location capability
    pub fn unavailable() -> Self {
        Self {
            source: None,
            options: PositionOptions::default(),
        }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Resolve the current position, or the sentinel within the bound
    pub async fn resolve(&self) -> Coordinate {
        match self.query().await {
            Ok(coordinate) => {
                debug!("Resolved position {}, {}", coordinate.lat, coordinate.lng);
                coordinate
            }
            Err(LocationError::Unsupported) => {
                debug!("No location capability, using sentinel coordinate");
                Coordinate::SENTINEL
            }
            Err(e) => {
                warn!("{}, using sentinel coordinate", e);
                Coordinate::SENTINEL
            }
        }
    }

    /// One bounded query against the location source
    async fn query(&self) -> Result<Coordinate, LocationError> {
        let source = self.source.as_ref().ok_or(LocationError::Unsupported)?;
        tokio::time::timeout(self.options.timeout, source.current_position(&self.options))
            .await
            .map_err(|_| LocationError::Timeout(self.options.timeout))?
    }
}

impl std::fmt::Debug for GeolocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeolocationResolver")
            .field("available", &self.source.is_some())
            .field("options", &self.options)
            .finish()
    }
}
