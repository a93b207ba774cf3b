/// Scene playback clock with one-shot dispatch bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    playing: bool,
    time: f32,
    /// Timeline time up to which events have been dispatched
    last_dispatched: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop and rewind to zero
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.last_dispatched = 0.0;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time.max(0.0);
    }

    pub fn last_dispatched(&self) -> f32 {
        self.last_dispatched
    }

    pub fn set_last_dispatched(&mut self, time: f32) {
        self.last_dispatched = time;
    }

    /// Move the playhead and mark everything before it as dispatched
    pub fn seek(&mut self, time: f32) {
        self.set_time(time);
        self.last_dispatched = self.time;
    }

    /// Advance while playing; playback stops at `duration`
    pub fn update(&mut self, dt: f32, duration: f32) {
        if !self.playing {
            return;
        }

        self.time += dt.max(0.0);
        if duration >= 0.0 && self.time > duration {
            self.time = duration;
            self.playing = false;
        }
    }
}
