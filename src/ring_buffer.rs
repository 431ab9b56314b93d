//! Single-producer / single-consumer sample ring.
//!
//! The capture callback is the only writer; the analyzer tick is the only
//! reader. The producer never blocks and never allocates. `snapshot()` may
//! race with the last handful of writes — that is tolerated by design (see
//! the module-level concurrency notes in the main loop): windows overlap
//! heavily, so a torn read costs at most a few stale samples, never a
//! missed detection.
//!
//! Modeled on the teacher's own debug log ring (`AtomicUsize` write
//! position over an `UnsafeCell` slice, published with `Release` and
//! observed with `Acquire`) rather than pulling in a ring-buffer crate —
//! the access pattern here is the same single-writer, single-reader shape.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-capacity circular store of the most recent `capacity` samples.
pub struct SampleRing {
    buf: Box<[UnsafeCell<f32>]>,
    capacity: usize,
    /// Total samples ever written. Published with `Release`, read with `Acquire`.
    write_pos: AtomicUsize,
}

unsafe impl Sync for SampleRing {}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be nonzero");
        let mut v = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            v.push(UnsafeCell::new(0.0f32));
        }
        Self {
            buf: v.into_boxed_slice(),
            capacity,
            write_pos: AtomicUsize::new(0),
        }
    }

    /// Write one block of samples. Called only from the capture callback.
    ///
    /// Performs no allocation and never blocks.
    pub fn write(&self, samples: &[f32]) {
        let mut pos = self.write_pos.load(Ordering::Relaxed);
        for &s in samples {
            let idx = pos % self.capacity;
            unsafe {
                *self.buf[idx].get() = s;
            }
            pos += 1;
        }
        self.write_pos.store(pos, Ordering::Release);
    }

    /// Return a contiguous, oldest-first copy of the most recent `capacity`
    /// samples (or fewer, before the buffer has filled once).
    pub fn snapshot(&self) -> Vec<f32> {
        let pos = self.write_pos.load(Ordering::Acquire);
        let n = pos.min(self.capacity);
        let mut out = Vec::with_capacity(n);
        let start = pos - n;
        for i in 0..n {
            let idx = (start + i) % self.capacity;
            out.push(unsafe { *self.buf[idx].get() });
        }
        out
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_before_fill_returns_partial() {
        let ring = SampleRing::new(8);
        ring.write(&[1.0, 2.0, 3.0]);
        assert_eq!(ring.snapshot(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn snapshot_rotates_oldest_first_after_wraparound() {
        let ring = SampleRing::new(4);
        ring.write(&[1.0, 2.0, 3.0, 4.0]);
        ring.write(&[5.0, 6.0]);
        assert_eq!(ring.snapshot(), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn snapshot_length_never_exceeds_capacity() {
        let ring = SampleRing::new(4);
        ring.write(&[0.0; 100]);
        assert_eq!(ring.snapshot().len(), 4);
    }
}
