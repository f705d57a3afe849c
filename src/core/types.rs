//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation time unit. Action costs, budgets and day lengths are all hours.
pub type Hours = u32;

/// Identifier for a location in the travel graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier for a party member (unique within a roster)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier for an event template
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive numeric range used for random magnitudes (damage, yields)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Draw a value from the range. Degenerate ranges return `min` without
    /// consuming randomness.
    pub fn roll(&self, rng: &mut dyn rand::RngCore) -> f32 {
        use rand::Rng;
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_span_roll_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let span = Span::new(5.0, 25.0);
        for _ in 0..200 {
            let v = span.roll(&mut rng);
            assert!((5.0..=25.0).contains(&v));
        }
    }

    #[test]
    fn test_fixed_span_consumes_no_randomness() {
        let mut a = ChaCha8Rng::seed_from_u64(1);
        let b = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Span::fixed(3.0).roll(&mut a), 3.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = LocationId::new("river_fork");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"river_fork\"");
        assert_eq!(id.to_string(), "river_fork");
    }

    #[test]
    fn test_event_id_borrows_its_name() {
        let id = EventId::new("heavy_rain");
        assert_eq!(id.as_str(), "heavy_rain");
        assert_eq!(id.as_str(), id.to_string());
    }
}
