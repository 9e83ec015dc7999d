use crate::StatisticsOverlay;
use std::time::Duration;

const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second counter that publishes once per elapsed second.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: Duration,
    last: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame of length `delta`. Returns the new rate when a full
    /// second has elapsed, then starts the next window.
    pub fn tick(&mut self, delta: Duration) -> Option<f64> {
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed < SAMPLE_WINDOW {
            return None;
        }
        let fps = self.frames as f64 / self.elapsed.as_secs_f64();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        self.last = Some(fps);
        tracing::trace!(fps, "frame rate sample");
        Some(fps)
    }

    /// Last published rate.
    pub fn fps(&self) -> Option<f64> {
        self.last
    }

    /// Tick and write the "FPS" entry when a new rate is available.
    pub fn publish(&mut self, delta: Duration, stats: &mut StatisticsOverlay) {
        if let Some(fps) = self.tick(delta) {
            stats.set("FPS", format!("{fps:.0}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_after_one_second() {
        let mut counter = FpsCounter::new();
        let frame = Duration::from_millis(20);
        for _ in 0..49 {
            assert_eq!(counter.tick(frame), None);
        }
        let fps = counter.tick(frame).unwrap();
        assert!((fps - 50.0).abs() < 1e-9);
        assert_eq!(counter.fps(), Some(fps));
    }

    #[test]
    fn resets_between_windows() {
        let mut counter = FpsCounter::new();
        assert!(counter.tick(Duration::from_millis(1500)).is_some());
        for _ in 0..9 {
            assert!(counter.tick(Duration::from_millis(100)).is_none());
        }
        let fps = counter.tick(Duration::from_millis(100)).unwrap();
        assert!((fps - 10.0).abs() < 1e-9);
    }

    #[test]
    fn publish_writes_overlay_entry() {
        let mut counter = FpsCounter::new();
        let mut stats = StatisticsOverlay::new();
        counter.publish(Duration::from_millis(500), &mut stats);
        assert!(stats.get("FPS").is_none());
        counter.publish(Duration::from_millis(500), &mut stats);
        assert_eq!(stats.get("FPS"), Some("2"));
    }
}
