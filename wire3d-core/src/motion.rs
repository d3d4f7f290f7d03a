/// Time-indexed motion: continuous functions or piecewise-constant samples
use nalgebra::Vector3;

/// A position or orientation triple over time. Positions are (x, y, z);
/// orientations are (yaw, pitch, roll) in radians, applied about the
/// evolving object-local z, x, and y axes.
pub type StateFn = Box<dyn Fn(f64) -> [f64; 3] + Send>;

/// Source for one motion track, resolved once into a [`MotionMap`].
pub enum TrackSource {
    /// A caller-supplied continuous function of time.
    Continuous(StateFn),
    /// Discrete time-ordered samples, held piecewise-constant between
    /// timepoints. Each track carries its own timebase.
    Sampled {
        times: Vec<f64>,
        values: Vec<[f64; 3]>,
    },
}

impl TrackSource {
    pub fn continuous<F>(f: F) -> Self
    where
        F: Fn(f64) -> [f64; 3] + Send + 'static,
    {
        Self::Continuous(Box::new(f))
    }
}

/// Piecewise-constant step function with a remembered cursor.
///
/// Queries are expected, but not required, to arrive with non-decreasing
/// times: the forward scan from the cursor is O(1) amortized for monotonic
/// sequences, and a backwards query falls back to a rescan from the start.
pub struct Piecewise {
    times: Vec<f64>,
    values: Vec<[f64; 3]>,
    cursor: usize,
}

impl Piecewise {
    /// Build from parallel samples; the longer of the two lists is
    /// truncated to the shorter.
    pub fn new(mut times: Vec<f64>, mut values: Vec<[f64; 3]>) -> Self {
        let len = times.len().min(values.len());
        times.truncate(len);
        values.truncate(len);
        Self {
            times,
            values,
            cursor: 0,
        }
    }

    /// The sample in effect at `t`: `None` before the first timepoint,
    /// `values[i]` while `times[i] <= t < times[i + 1]`, and the last value
    /// from the last timepoint onwards.
    pub fn sample(&mut self, t: f64) -> Option<[f64; 3]> {
        if self.times.is_empty() || t < self.times[0] {
            return None;
        }
        if t < self.times[self.cursor] {
            // Time moved backwards; rescan from the start.
            self.cursor = 0;
        }
        while self.cursor + 1 < self.times.len() && self.times[self.cursor + 1] <= t {
            self.cursor += 1;
        }
        Some(self.values[self.cursor])
    }
}

enum Track {
    Continuous(StateFn),
    Steps(Piecewise),
}

impl Track {
    fn resolve(&mut self, t: f64) -> Option<[f64; 3]> {
        match self {
            Track::Continuous(f) => Some(f(t)),
            Track::Steps(p) => p.sample(t),
        }
    }
}

impl From<TrackSource> for Track {
    fn from(source: TrackSource) -> Self {
        match source {
            TrackSource::Continuous(f) => Track::Continuous(f),
            TrackSource::Sampled { times, values } => Track::Steps(Piecewise::new(times, values)),
        }
    }
}

/// Motion of one model over time: independent position and orientation
/// tracks, either of which may be absent. An absent component leaves the
/// model's corresponding state untouched when advanced.
pub struct MotionMap {
    position: Option<Track>,
    orientation: Option<Track>,
}

impl MotionMap {
    pub fn new(position: Option<TrackSource>, orientation: Option<TrackSource>) -> Self {
        Self {
            position: position.map(Track::from),
            orientation: orientation.map(Track::from),
        }
    }

    pub fn positions(source: TrackSource) -> Self {
        Self::new(Some(source), None)
    }

    pub fn orientations(source: TrackSource) -> Self {
        Self::new(None, Some(source))
    }

    /// The state of motion at `t`. The two tracks are resolved
    /// independently and are not required to be in sync.
    pub fn get_state(&mut self, t: f64) -> (Option<Vector3<f64>>, Option<[f64; 3]>) {
        let position = self
            .position
            .as_mut()
            .and_then(|track| track.resolve(t))
            .map(|[x, y, z]| Vector3::new(x, y, z));
        let orientation = self.orientation.as_mut().and_then(|track| track.resolve(t));
        (position, orientation)
    }
}
