//! Expedition clock
//!
//! Tracks the day counter and the hours accumulated toward the next day
//! boundary. Advancing reports how many boundaries were crossed so daily
//! effects can be applied once per boundary.

use serde::{Deserialize, Serialize};

use crate::core::types::Hours;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    day: u32,
    hour_of_day: Hours,
    hours_per_day: Hours,
}

impl Calendar {
    pub fn new(hours_per_day: Hours) -> Self {
        Self {
            day: 0,
            hour_of_day: 0,
            hours_per_day: hours_per_day.max(1),
        }
    }

    /// Advance by `hours`, returning the number of day boundaries crossed
    pub fn advance(&mut self, hours: Hours) -> u32 {
        let total = self.hour_of_day as u64 + hours as u64;
        let per_day = self.hours_per_day as u64;
        let crossed = (total / per_day) as u32;
        self.hour_of_day = (total % per_day) as Hours;
        self.day += crossed;
        crossed
    }

    pub fn current_day(&self) -> u32 {
        self.day
    }

    pub fn hour_of_day(&self) -> Hours {
        self.hour_of_day
    }

    pub fn hours_per_day(&self) -> Hours {
        self.hours_per_day
    }

    /// Hours remaining until the next day boundary
    pub fn hours_until_next_day(&self) -> Hours {
        self.hours_per_day - self.hour_of_day
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(24)
    }
}
