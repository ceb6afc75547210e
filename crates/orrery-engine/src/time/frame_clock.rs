/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Timestamp handed over by the frame-pacing collaborator, in
    /// milliseconds. Strictly increasing across the frames of one schedule.
    pub timestamp_ms: f64,

    /// Clamped time elapsed since the previous frame, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from collaborator timestamps.
///
/// One clock per loop, so multiple loops never share delta-time state.
///
/// Delta time is clamped: the minimum avoids zero-dt math in back-to-back
/// callbacks, the maximum keeps animation state sane after a long stall
/// (minimized window, debugger pause).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_index: u64,
    dt_min: f32,
    dt_max: f32,
}

impl FrameClock {
    /// Creates a clock with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self {
            last_ms: None,
            frame_index: 0,
            dt_min: 1e-4,
            dt_max: 0.25,
        }
    }

    /// Creates a clock with custom delta-time clamps, in seconds.
    pub fn with_clamps(dt_min: f32, dt_max: f32) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last_ms: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Drops the delta-time baseline.
    ///
    /// The next tick reports the minimum delta instead of measuring against
    /// a timestamp from the previous schedule. Used when a loop restarts.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Advances the clock to `timestamp_ms` and returns the snapshot.
    ///
    /// The frame-pacing collaborator guarantees non-decreasing timestamps.
    /// A regression is logged and absorbed: `dt` clamps to the minimum and
    /// the clock rebases onto the new timestamp.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        if let Some(last) = self.last_ms {
            if timestamp_ms < last {
                log::warn!(
                    "frame timestamp went backwards ({timestamp_ms} ms after {last} ms); \
                     clamping dt"
                );
            }
        }

        let dt = match self.last_ms {
            Some(last) => (((timestamp_ms - last) / 1000.0) as f32).clamp(self.dt_min, self.dt_max),
            None => self.dt_min,
        };
        self.last_ms = Some(timestamp_ms);

        let frame = FrameTime {
            timestamp_ms,
            dt,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
