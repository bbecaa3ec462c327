//! Single-flight animation channels
//!
//! Each channel runs at most one animation. Starting a new one on a busy
//! channel cancels the running one first, so a stale animation can never emit
//! another frame or complete once it has been replaced.
//!
//! The registry owns no clock: the host calls [`AnimationRegistry::advance`]
//! once per frame with the frame delta and applies the returned frames.

use std::collections::BTreeMap;

use glam::Vec3;

/// Named animation slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    MovePlayer,
    MoveCamera,
}

/// Progress curve applied to a from→to tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out: fast start, gentle settle
    EaseOut,
}

impl Easing {
    pub fn apply(self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::EaseOut => 1.0 - (1.0 - p) * (1.0 - p),
        }
    }
}

/// Something that yields a value for an elapsed time
pub type Sampler<T> = Box<dyn Fn(f32) -> T>;

/// Build a sampler that moves from `from` to `to` over `duration` seconds.
pub fn tween(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Sampler<Vec3> {
    Box::new(move |elapsed| {
        let progress = if duration > 0.0 { elapsed / duration } else { 1.0 };
        from.lerp(to, easing.apply(progress))
    })
}

/// Opaque handle to one started animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    pub channel: Channel,
    id: u64,
}

/// One update emitted by [`AnimationRegistry::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T> {
    pub handle: AnimationHandle,
    pub elapsed: f32,
    pub value: T,
    /// Set on the last frame only; the channel is already free when seen
    pub completed: bool,
}

struct Running<T> {
    id: u64,
    sampler: Sampler<T>,
    duration: f32,
    elapsed: f32,
}

/// Channel → running animation map
pub struct AnimationRegistry<T> {
    running: BTreeMap<Channel, Running<T>>,
    /// Newest uncancelled animation id per channel, kept after completion
    latest: BTreeMap<Channel, u64>,
    next_id: u64,
}

impl<T> Default for AnimationRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnimationRegistry<T> {
    pub fn new() -> Self {
        Self {
            running: BTreeMap::new(),
            latest: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Start `sampler` on `channel` for `duration` seconds.
    ///
    /// Any animation already on the channel is cancelled before the new one
    /// is registered.
    pub fn start(&mut self, channel: Channel, sampler: Sampler<T>, duration: f32) -> AnimationHandle {
        if let Some(old) = self.running.remove(&channel) {
            log::debug!("{:?}: cancelling animation #{} to start a new one", channel, old.id);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.latest.insert(channel, id);
        self.running.insert(
            channel,
            Running {
                id,
                sampler,
                duration: duration.max(0.0),
                elapsed: 0.0,
            },
        );
        AnimationHandle { channel, id }
    }

    /// Stop the animation behind `handle`. Returns false for stale handles.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.running.remove(&handle.channel);
        self.latest.remove(&handle.channel);
        log::debug!("{:?}: animation #{} cancelled", handle.channel, handle.id);
        true
    }

    /// Drop every running animation without completing any
    pub fn cancel_all(&mut self) {
        self.running.clear();
        self.latest.clear();
    }

    /// True while the animation behind `handle` is still running
    pub fn is_live(&self, handle: AnimationHandle) -> bool {
        self.running
            .get(&handle.channel)
            .is_some_and(|r| r.id == handle.id)
    }

    /// True if `handle` is the newest uncancelled animation on its channel.
    ///
    /// Unlike [`Self::is_live`] this stays true for a completed animation, so
    /// frames returned by `advance` can be checked after the caller started
    /// something new on the same channel.
    pub fn is_current(&self, handle: AnimationHandle) -> bool {
        self.latest.get(&handle.channel) == Some(&handle.id)
    }

    /// True if anything is running on `channel`
    pub fn is_active(&self, channel: Channel) -> bool {
        self.running.contains_key(&channel)
    }

    /// Advance every running animation by `dt` seconds.
    ///
    /// Yields one frame per running channel in channel order. Animations that
    /// reach their duration emit a final `completed` frame and are removed.
    pub fn advance(&mut self, dt: f32) -> Vec<Frame<T>> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut frames = Vec::with_capacity(self.running.len());

        for (&channel, anim) in self.running.iter_mut() {
            anim.elapsed = (anim.elapsed + dt).min(anim.duration);
            frames.push(Frame {
                handle: AnimationHandle { channel, id: anim.id },
                elapsed: anim.elapsed,
                value: (anim.sampler)(anim.elapsed),
                completed: anim.elapsed >= anim.duration,
            });
        }

        self.running.retain(|_, anim| anim.elapsed < anim.duration);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(scale: f32) -> Sampler<f32> {
        Box::new(move |t| t * scale)
    }

    #[test]
    fn test_runs_to_completion_once() {
        let mut reg = AnimationRegistry::new();
        let h = reg.start(Channel::MoveCamera, ramp(2.0), 0.5);

        let frames = reg.advance(0.2);
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].completed);
        assert!((frames[0].value - 0.4).abs() < 1e-6);

        let frames = reg.advance(0.4);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].completed);
        assert_eq!(frames[0].elapsed, 0.5);
        assert!((frames[0].value - 1.0).abs() < 1e-6);
        assert!(!reg.is_live(h));
        assert!(!reg.is_active(Channel::MoveCamera));

        assert!(reg.advance(1.0).is_empty());
    }

    #[test]
    fn test_replace_cancels_previous() {
        let mut reg = AnimationRegistry::new();
        let first = reg.start(Channel::MoveCamera, ramp(1.0), 0.8);
        reg.advance(0.3);

        let second = reg.start(Channel::MoveCamera, ramp(10.0), 0.8);
        assert!(!reg.is_live(first));
        assert!(reg.is_live(second));

        let mut completions = Vec::new();
        for _ in 0..20 {
            for frame in reg.advance(0.1) {
                assert_ne!(frame.handle, first, "stale animation emitted a frame");
                if frame.completed {
                    completions.push(frame.handle);
                }
            }
        }
        assert_eq!(completions, vec![second]);
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut reg = AnimationRegistry::new();
        let h = reg.start(Channel::MovePlayer, ramp(1.0), 1.0);
        assert!(reg.cancel(h));
        assert!(!reg.cancel(h));
        assert!(reg.advance(2.0).is_empty());
    }

    #[test]
    fn test_stale_cancel_keeps_newer() {
        let mut reg = AnimationRegistry::new();
        let old = reg.start(Channel::MovePlayer, ramp(1.0), 1.0);
        let new = reg.start(Channel::MovePlayer, ramp(1.0), 1.0);
        assert!(!reg.cancel(old));
        assert!(reg.is_live(new));
    }

    #[test]
    fn test_channels_independent() {
        let mut reg = AnimationRegistry::new();
        reg.start(Channel::MovePlayer, ramp(1.0), 1.0);
        reg.start(Channel::MoveCamera, ramp(1.0), 0.5);
        let frames = reg.advance(0.5);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].handle.channel, Channel::MovePlayer);
        assert!(!frames[0].completed);
        assert!(frames[1].completed);
        assert!(reg.is_active(Channel::MovePlayer));
        assert!(!reg.is_active(Channel::MoveCamera));
    }

    #[test]
    fn test_completed_frame_superseded() {
        let mut reg = AnimationRegistry::new();
        let old = reg.start(Channel::MoveCamera, ramp(1.0), 0.1);
        let frames = reg.advance(0.2);
        assert!(frames[0].completed);
        assert!(reg.is_current(old));

        // Something new starts before the old frame is applied
        let new = reg.start(Channel::MoveCamera, ramp(1.0), 0.5);
        assert!(!reg.is_current(frames[0].handle));
        assert!(reg.is_current(new));

        reg.cancel(new);
        assert!(!reg.is_current(new));
    }

    #[test]
    fn test_elapsed_monotonic() {
        let mut reg = AnimationRegistry::new();
        reg.start(Channel::MovePlayer, ramp(1.0), 1.0);
        let a = reg.advance(0.25)[0].elapsed;
        let b = reg.advance(-5.0)[0].elapsed;
        let c = reg.advance(f32::NAN)[0].elapsed;
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_zero_duration_completes_next_advance() {
        let mut reg = AnimationRegistry::new();
        reg.start(Channel::MoveCamera, ramp(1.0), 0.0);
        let frames = reg.advance(0.0);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].completed);
    }

    #[test]
    fn test_tween_easing() {
        let lin = tween(Vec3::ZERO, Vec3::X, 1.0, Easing::Linear);
        let out = tween(Vec3::ZERO, Vec3::X, 1.0, Easing::EaseOut);
        assert!((lin(0.5).x - 0.5).abs() < 1e-6);
        assert!((out(0.5).x - 0.75).abs() < 1e-6);
        assert_eq!(out(1.0), Vec3::X);
        assert_eq!(out(3.0), Vec3::X);
    }
}
