//! Professional model.
//!
//! Professionals are the workers tasks are allocated to. Each one has a
//! throughput (`capacity`, effort units processed per hour) and an hourly
//! rate billed per started hour.

use serde::{Deserialize, Serialize};

/// A professional that can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    /// Human-readable, unique name.
    pub name: String,
    /// Effort units processed per hour (> 0).
    pub capacity: f64,
    /// Cost per billable hour (>= 0).
    pub hourly_rate: f64,
}

impl Professional {
    /// Creates a new professional.
    pub fn new(name: impl Into<String>, capacity: f64, hourly_rate: f64) -> Self {
        Self {
            name: name.into(),
            capacity,
            hourly_rate,
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the hourly rate.
    pub fn with_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = hourly_rate;
        self
    }

    /// Hours needed to process `weight` units at normal pace.
    #[inline]
    pub fn base_hours(&self, weight: f64) -> f64 {
        weight / self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_builder() {
        let p = Professional::new("felipe", 2.0, 100.0)
            .with_capacity(3.0)
            .with_rate(110.0);

        assert_eq!(p.name, "felipe");
        assert!((p.capacity - 3.0).abs() < 1e-10);
        assert!((p.hourly_rate - 110.0).abs() < 1e-10);
    }

    #[test]
    fn test_base_hours() {
        let p = Professional::new("gabriel", 5.0, 130.0);
        assert!((p.base_hours(10.0) - 2.0).abs() < 1e-10);
        assert!((p.base_hours(2.5) - 0.5).abs() < 1e-10);
    }
}
