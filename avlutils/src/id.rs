//! Process-lifetime-unique identifier allocation
//!
//! Resources and groups expose stable external handles (MPRIS object paths,
//! drag-and-drop references). Those handles must never collide and must never
//! be reused while the process runs, so the allocator keeps every issued id
//! in a set and draws random candidates until it finds a fresh one.

use rand::Rng;
use std::collections::HashSet;
use std::sync::Mutex;

/// Default identifier width in hex digits (8 digits = 32-bit space).
pub const DEFAULT_HEX_WIDTH: usize = 8;

/// Collision-checked random hex id allocator.
///
/// Each call to [`allocate`](IdAllocator::allocate) returns a fixed-width
/// lowercase hex string that has never been issued by this allocator.
/// Ids are not released unless the embedding application explicitly calls
/// [`release`](IdAllocator::release); the default policy is never-release.
///
/// The allocator is internally locked and safe to share across threads.
#[derive(Debug)]
pub struct IdAllocator {
    hex_width: usize,
    issued: Mutex<HashSet<String>>,
}

impl IdAllocator {
    /// Creates an allocator with the default 8-hex-digit width.
    pub fn new() -> Self {
        Self::with_width(DEFAULT_HEX_WIDTH)
    }

    /// Creates an allocator with a custom width, clamped to 1..=16 hex digits.
    pub fn with_width(hex_width: usize) -> Self {
        Self {
            hex_width: hex_width.clamp(1, 16),
            issued: Mutex::new(HashSet::new()),
        }
    }

    /// Identifier width in hex digits.
    pub fn hex_width(&self) -> usize {
        self.hex_width
    }

    /// Allocates a fresh identifier, retrying on collision.
    pub fn allocate(&self) -> String {
        let mut rng = rand::rng();
        let mut issued = self.issued.lock().expect("id allocator mutex poisoned");
        loop {
            let raw: u64 = rng.random();
            let masked = if self.hex_width == 16 {
                raw
            } else {
                raw & ((1u64 << (self.hex_width * 4)) - 1)
            };
            let candidate = format!("{:0width$x}", masked, width = self.hex_width);
            if issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Returns an id to the pool. Only meaningful when the application has
    /// opted into id recycling; nothing in the core calls this.
    pub fn release(&self, id: &str) -> bool {
        self.issued
            .lock()
            .expect("id allocator mutex poisoned")
            .remove(id)
    }

    /// Number of ids issued and still held.
    pub fn issued_count(&self) -> usize {
        self.issued
            .lock()
            .expect("id allocator mutex poisoned")
            .len()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allocate_fixed_width() {
        let alloc = IdAllocator::new();
        let id = alloc.allocate();
        assert_eq!(id.len(), DEFAULT_HEX_WIDTH);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_allocate_never_repeats() {
        let alloc = IdAllocator::with_width(2);
        // Width 2 gives a 256-id space; drain most of it and check uniqueness.
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(alloc.allocate()), "id reused");
        }
        assert_eq!(alloc.issued_count(), 200);
    }

    #[test]
    fn test_release_frees_id() {
        let alloc = IdAllocator::new();
        let id = alloc.allocate();
        assert!(alloc.release(&id));
        assert!(!alloc.release(&id));
        assert_eq!(alloc.issued_count(), 0);
    }

    #[test]
    fn test_width_is_clamped() {
        let alloc = IdAllocator::with_width(64);
        assert_eq!(alloc.hex_width(), 16);
        assert_eq!(alloc.allocate().len(), 16);
    }
}
