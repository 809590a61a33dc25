//! Frame-rate bookkeeping for the HUD

/// Frames in the rolling average
pub const FPS_SAMPLE_SIZE: usize = 60;
/// Seconds between readout refreshes
pub const UPDATE_INTERVAL: f32 = 1.0;

/// Rolling FPS monitor. Readouts refresh once per interval so the HUD number
/// is stable enough to read.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    frame_times: [f32; FPS_SAMPLE_SIZE],
    frame_index: usize,
    samples: usize,
    update_timer: f32,
    current_fps: f32,
    average_fps: f32,
    min_fps: f32,
    max_fps: f32,
    frame_count: u64,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_SAMPLE_SIZE],
            frame_index: 0,
            samples: 0,
            update_timer: 0.0,
            current_fps: 0.0,
            average_fps: 0.0,
            min_fps: f32::MAX,
            max_fps: 0.0,
            frame_count: 0,
        }
    }

    /// Record one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.frame_count += 1;
        self.update_timer += dt;

        self.frame_times[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % FPS_SAMPLE_SIZE;
        self.samples = (self.samples + 1).min(FPS_SAMPLE_SIZE);

        if self.update_timer >= UPDATE_INTERVAL {
            self.current_fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };

            let sum: f32 = self.frame_times[..self.samples].iter().sum();
            self.average_fps = if sum > 0.0 { self.samples as f32 / sum } else { 0.0 };

            self.min_fps = self.min_fps.min(self.current_fps);
            self.max_fps = self.max_fps.max(self.current_fps);
            self.update_timer = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }

    pub fn average_fps(&self) -> f32 {
        self.average_fps
    }

    /// `f32::MAX` until the first refresh
    pub fn min_fps(&self) -> f32 {
        self.min_fps
    }

    pub fn max_fps(&self) -> f32 {
        self.max_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_readout_before_interval() {
        let mut perf = PerformanceMonitor::new();
        for _ in 0..10 {
            perf.update(1.0 / 60.0);
        }
        assert_eq!(perf.average_fps(), 0.0);
        assert_eq!(perf.frame_count(), 10);
    }

    #[test]
    fn test_steady_rate_after_one_second() {
        let mut perf = PerformanceMonitor::new();
        // 0.25 is exact in binary, so four frames reach the interval exactly
        for _ in 0..4 {
            perf.update(0.25);
        }
        assert!((perf.average_fps() - 4.0).abs() < 1e-4);
        assert!((perf.current_fps() - 4.0).abs() < 1e-4);
        assert_eq!(perf.min_fps(), perf.max_fps());
    }

    #[test]
    fn test_average_window_is_bounded() {
        let mut perf = PerformanceMonitor::new();
        for _ in 0..FPS_SAMPLE_SIZE {
            perf.update(0.5);
        }
        // Refreshes land every 8 fast frames; after 64 the window holds only fast ones
        for _ in 0..64 {
            perf.update(0.125);
        }
        assert!((perf.average_fps() - 8.0).abs() < 1e-3);
        assert!((perf.min_fps() - 2.0).abs() < 1e-4);
        assert!((perf.max_fps() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset() {
        let mut perf = PerformanceMonitor::new();
        perf.update(1.0);
        perf.reset();
        assert_eq!(perf.frame_count(), 0);
        assert_eq!(perf.min_fps(), f32::MAX);
    }
}
