//! Moving average filter
//!
//! Fixed-capacity sliding window over one sensor channel. Each channel
//! owns its own instance.

use heapless::Deque;

/// Window length used by the reference device
pub const DEFAULT_WINDOW_LEN: usize = 5;

/// Largest supported window length
pub const MAX_WINDOW_LEN: usize = 32;

/// Sliding-window arithmetic mean
///
/// Samples are held in arrival order. Once `capacity` samples are held,
/// each push evicts the oldest one first. Until the window fills, the mean
/// is taken over the samples received so far, so the first outputs are
/// biased towards the first readings.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    samples: Deque<f32, MAX_WINDOW_LEN>,
    capacity: usize,
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            samples: Deque::new(),
            capacity: DEFAULT_WINDOW_LEN,
        }
    }
}

impl MovingAverage {
    /// Create a filter holding at most `capacity` samples
    ///
    /// Returns None unless `capacity` is in `1..=MAX_WINDOW_LEN`.
    pub fn new(capacity: usize) -> Option<Self> {
        if !(1..=MAX_WINDOW_LEN).contains(&capacity) {
            return None;
        }
        Some(Self {
            samples: Deque::new(),
            capacity,
        })
    }

    /// Add a sample and return the mean of the window
    pub fn push(&mut self, value: f32) -> f32 {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        // Cannot fail: the loop above left room below capacity <= MAX_WINDOW_LEN
        let _ = self.samples.push_back(value);

        self.mean().unwrap_or(value)
    }

    /// Mean of the samples currently held, or None before the first push
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no sample has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the window has reached its capacity
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Drop all samples
    ///
    /// The acquisition loop never calls this; it exists for reconfiguration.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_start_mean() {
        let mut filter = MovingAverage::new(5).unwrap();

        assert_eq!(filter.push(100.0), 100.0);
        assert_eq!(filter.push(102.0), 101.0);
        assert_eq!(filter.push(98.0), 100.0);
        assert_eq!(filter.len(), 3);
        assert!(!filter.is_full());
    }

    #[test]
    fn test_evicts_oldest() {
        let mut filter = MovingAverage::new(3).unwrap();

        filter.push(1.0);
        filter.push(2.0);
        filter.push(3.0);
        assert!(filter.is_full());

        // Window is now [2, 3, 10]
        assert_eq!(filter.push(10.0), 5.0);
        // Window is now [3, 10, 20]
        assert_eq!(filter.push(20.0), 11.0);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_capacity_one_tracks_input() {
        let mut filter = MovingAverage::new(1).unwrap();

        assert_eq!(filter.push(4.0), 4.0);
        assert_eq!(filter.push(-7.5), -7.5);
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_capacity_out_of_range() {
        assert!(MovingAverage::new(0).is_none());
        assert!(MovingAverage::new(MAX_WINDOW_LEN + 1).is_none());
        assert!(MovingAverage::new(40).is_none());
        assert_eq!(MovingAverage::new(MAX_WINDOW_LEN).unwrap().capacity(), MAX_WINDOW_LEN);
        assert_eq!(MovingAverage::default().capacity(), DEFAULT_WINDOW_LEN);
    }

    #[test]
    fn test_largest_window_keeps_every_sample() {
        let mut filter = MovingAverage::new(MAX_WINDOW_LEN).unwrap();
        for _ in 0..8 {
            filter.push(1000.0);
        }
        let mut out = 0.0;
        for _ in 0..MAX_WINDOW_LEN - 8 {
            out = filter.push(0.0);
        }
        assert!(filter.is_full());
        assert_eq!(out, 250.0);

        // One more push evicts the first 1000.0
        assert_eq!(filter.push(0.0), 218.75);
    }

    #[test]
    fn test_mean_before_first_push() {
        let mut filter = MovingAverage::new(5).unwrap();
        assert_eq!(filter.mean(), None);
        assert!(filter.is_empty());

        filter.push(3.0);
        filter.reset();
        assert_eq!(filter.mean(), None);
    }
}
