/// Amount `skip_back` / `skip_forward` move the playhead, in milliseconds.
pub const SKIP_STEP_MS: f64 = 1000.0;

/// The timeline playhead driven by the host's refresh loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Playhead {
    /// Current time in milliseconds.
    pub current_time: f64,
    pub playing: bool,
}

impl Playhead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pauses and rewinds to zero.
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_time = 0.0;
    }

    /// Moves to `time`, clamped to `[0, duration]`.
    pub fn seek(&mut self, time: f64, duration: f64) {
        self.current_time = time.clamp(0.0, duration.max(0.0));
    }

    pub fn skip_back(&mut self, duration: f64) {
        self.seek(self.current_time - SKIP_STEP_MS, duration);
    }

    pub fn skip_forward(&mut self, duration: f64) {
        self.seek(self.current_time + SKIP_STEP_MS, duration);
    }

    /// Advances by `delta_ms` while playing.
    ///
    /// Reaching the end rewinds to zero and pauses; a negative delta stops at
    /// zero. Returns the new time.
    pub fn tick(&mut self, delta_ms: f64, duration: f64) -> f64 {
        if !self.playing {
            return self.current_time;
        }
        let next = self.current_time + delta_ms;
        if next >= duration {
            self.current_time = 0.0;
            self.playing = false;
        } else {
            self.current_time = next.max(0.0);
        }
        self.current_time
    }
}
