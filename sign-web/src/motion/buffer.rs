//! Rolling trajectory buffer for one fingertip
//!
//! Fixed capacity ring; the oldest sample is overwritten once full.

use super::trajectory::TrajectoryPoint;

/// Default capacity, about half a second at 60fps
pub const DEFAULT_CAPACITY: usize = 30;

/// Ring buffer that keeps the most recent samples in chronological order
pub struct TrajectoryBuffer {
    data: Vec<TrajectoryPoint>,

    /// Next slot to write once the buffer has wrapped
    write_index: usize,

    capacity: usize,
}

impl TrajectoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            write_index: 0,
            capacity,
        }
    }

    pub fn push(&mut self, point: TrajectoryPoint) {
        if self.data.len() < self.capacity {
            self.data.push(point);
        } else {
            self.data[self.write_index] = point;
        }
        self.write_index = (self.write_index + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest
    pub fn to_vec(&self) -> Vec<TrajectoryPoint> {
        if !self.is_full() {
            return self.data.clone();
        }
        let mut result = Vec::with_capacity(self.capacity);
        result.extend_from_slice(&self.data[self.write_index..]);
        result.extend_from_slice(&self.data[..self.write_index]);
        result
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.write_index = 0;
    }
}

impl Default for TrajectoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
