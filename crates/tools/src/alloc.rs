use crate::StatisticsOverlay;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// System allocator wrapper that counts live heap bytes.
///
/// Install with `#[global_allocator]` in the binary to feed the "Memory"
/// overlay entry.
#[derive(Debug, Default)]
pub struct TrackingAllocator {
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl TrackingAllocator {
    pub const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Bytes currently allocated.
    pub fn live_bytes(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Highest value `live_bytes` has reached.
    pub fn peak_bytes(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Write the "Memory" entry in KiB.
    pub fn publish(&self, stats: &mut StatisticsOverlay) {
        stats.set(
            "Memory",
            format!(
                "{} KiB (peak {} KiB)",
                self.live_bytes() / 1024,
                self.peak_bytes() / 1024
            ),
        );
    }

    fn grow(&self, bytes: usize) {
        let live = self.live.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.peak.fetch_max(live, Ordering::Relaxed);
    }

    fn shrink(&self, bytes: usize) {
        self.live.fetch_sub(bytes, Ordering::Relaxed);
    }
}

// SAFETY: every call is forwarded to `System`; the counters are bookkeeping only.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.shrink(layout.size());
            self.grow(new_size);
        }
        new_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_live_and_peak_bytes() {
        let tracker = TrackingAllocator::new();
        let layout = Layout::from_size_align(4096, 8).unwrap();
        unsafe {
            let a = tracker.alloc(layout);
            let b = tracker.alloc_zeroed(layout);
            assert_eq!(tracker.live_bytes(), 8192);

            let a = tracker.realloc(a, layout, 1024);
            assert_eq!(tracker.live_bytes(), 4096 + 1024);

            tracker.dealloc(a, Layout::from_size_align(1024, 8).unwrap());
            tracker.dealloc(b, layout);
        }
        assert_eq!(tracker.live_bytes(), 0);
        assert_eq!(tracker.peak_bytes(), 8192);
    }

    #[test]
    fn publish_reports_kib() {
        let tracker = TrackingAllocator::new();
        tracker.grow(3 * 1024);
        let mut stats = StatisticsOverlay::new();
        tracker.publish(&mut stats);
        assert_eq!(stats.get("Memory"), Some("3 KiB (peak 3 KiB)"));
    }
}
