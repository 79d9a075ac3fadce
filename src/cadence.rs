// Frame pacing: the render loop clock and periodic FPS logging.
// Visual: the heatmap repaints at a steady rate whether or not the mouse moves.

use std::time::{Duration, Instant};

/// How often to log frame stats (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;

/// Fixed-rate frame clock. One of these per active render loop; the
/// generation tells successive loops apart.
#[derive(Debug)]
pub struct RenderLoop {
    generation: u64,
    fps: u32,
    interval: Duration,
    next_due: Instant,
}

impl RenderLoop {
    /// A loop whose first frame is due immediately.
    pub fn new(generation: u64, fps: u32, now: Instant) -> Self {
        let fps = fps.max(1);
        Self {
            generation,
            fps,
            interval: Duration::from_secs_f64(1.0 / fps as f64),
            next_due: now,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[cfg(test)]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// True if a frame is due at `now`; advances the schedule when it is.
    /// A stalled host skips missed frames instead of bursting to catch up.
    pub fn poll(&mut self, now: Instant) -> bool {
        // 1) Not yet: the host keeps pumping events without a new frame.
        if now < self.next_due {
            return false;
        }
        // 2) Due: book the next slot one interval later.
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

/// Frame timing, logged periodically.
pub struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frames_since_log: u32,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            frame_count: 0,
            last_log_time: now,
            frames_since_log: 0,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn record_frame(&mut self, now: Instant) {
        self.frame_count += 1;
        self.frames_since_log += 1;

        let elapsed = now.duration_since(self.last_log_time).as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!("FPS: {:.1} | total frames: {}", fps, self.frame_count);
            self.last_log_time = now;
            self.frames_since_log = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_due_immediately() {
        let t0 = Instant::now();
        let mut rl = RenderLoop::new(1, 50, t0);
        assert!(rl.poll(t0));
        assert!(!rl.poll(t0));
        assert!(!rl.poll(t0 + Duration::from_millis(10)));
        assert!(rl.poll(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn stall_does_not_burst() {
        let t0 = Instant::now();
        let mut rl = RenderLoop::new(1, 100, t0);
        assert!(rl.poll(t0));
        let late = t0 + Duration::from_secs(1);
        assert!(rl.poll(late));
        assert!(!rl.poll(late));
        assert!(rl.poll(late + rl.interval()));
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        let rl = RenderLoop::new(3, 0, Instant::now());
        assert_eq!(rl.fps(), 1);
        assert_eq!(rl.interval(), Duration::from_secs(1));
        assert_eq!(rl.generation(), 3);
    }

    #[test]
    fn stats_count_frames() {
        let t0 = Instant::now();
        let mut stats = FrameStats::new(t0);
        for i in 0..10 {
            stats.record_frame(t0 + Duration::from_secs(i));
        }
        assert_eq!(stats.frame_count(), 10);
    }
}
