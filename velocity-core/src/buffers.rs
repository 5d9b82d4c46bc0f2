// Ring buffer for raw displacement samples.
// Invariants: head is the next write slot and stays in [0, capacity); offsets
// of any sign and magnitude normalize into [0, capacity).

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    cap: usize,
    head: usize,
    written: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    pub fn new(cap: usize) -> Result<Self, ConfigError> {
        if cap == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            buf: vec![T::default(); cap],
            cap,
            head: 0,
            written: 0,
        })
    }

    pub fn push(&mut self, value: T) {
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.cap;
        self.written = self.cap.min(self.written + 1);
    }

    // 0 is the most recent write; larger offsets walk back in time. Slots
    // never written resolve to a stored default, so callers decide
    // meaningfulness from samples_written.
    pub fn at_offset(&self, from_latest: isize) -> T {
        let idx = (self.head as isize - 1 - from_latest).rem_euclid(self.cap as isize);
        self.buf[idx as usize].clone()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn samples_written(&self) -> usize {
        self.written
    }

    pub fn clear(&mut self) {
        for slot in self.buf.iter_mut() {
            *slot = T::default();
        }
        self.head = 0;
        self.written = 0;
    }
}
