//! # Animation Loop
//!
//! One loop per page drives every per-frame effect:
//! ```text
//! Frame N (host calls tick(now)):
//! ┌──────────────────────────────────────────────────────────┐
//! │ 1. Skip if stopped                                        │
//! │ 2. Run each effect once, in registration order            │
//! │ 3. Drop effects that returned Finish                      │
//! │ 4. Record FrameStats                                      │
//! │ 5. Tell the host whether to request another frame         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The host owns the actual frame callback (`requestAnimationFrame` in the
//! browser, a plain loop in tests), so a test can step the page one frame at
//! a time or stop it entirely.

use std::cell::RefCell;
use std::rc::Rc;

/// What an effect wants after running a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Run again next frame.
    Continue,
    /// Done; remove from the loop.
    Finish,
}

/// Anything that does one frame's worth of work per display refresh.
pub trait FrameEffect {
    /// Runs one frame. `now_ms` is the host's high-resolution timestamp.
    fn frame(&mut self, now_ms: f64) -> FrameControl;
}

/// Handle to a registered effect, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frames ticked while running.
    pub frame: u64,
    /// Time since the previous tick in milliseconds (0 on the first).
    pub delta_ms: f64,
    /// Effects still registered after the last tick.
    pub active_effects: usize,
    /// Effects that finished during the last tick.
    pub finished_last_frame: usize,
}

/// The per-page animation loop.
pub struct AnimationLoop {
    /// Registered effects in registration order.
    effects: Vec<(EffectId, Box<dyn FrameEffect>)>,
    /// Next id to hand out.
    next_id: u64,
    /// Whether ticks do any work.
    running: bool,
    /// Timestamp of the last tick.
    last_tick_ms: Option<f64>,
    /// Statistics from the last tick.
    stats: FrameStats,
}

impl AnimationLoop {
    /// Creates an empty, running loop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            effects: Vec::with_capacity(8),
            next_id: 1,
            running: true,
            last_tick_ms: None,
            stats: FrameStats::default(),
        }
    }

    /// Registers an effect to run from the next tick on.
    pub fn register(&mut self, effect: Box<dyn FrameEffect>) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.push((id, effect));
        tracing::debug!("Animation effect {} registered", id.0);
        id
    }

    /// Removes an effect. Returns false if it already finished or never existed.
    pub fn cancel(&mut self, id: EffectId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|(effect_id, _)| *effect_id != id);
        before != self.effects.len()
    }

    /// Resumes ticking.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            // Don't report the paused span as one giant frame
            self.last_tick_ms = None;
        }
    }

    /// Pauses ticking. Registered effects are kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns true unless stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true if no effects are registered.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.effects.is_empty()
    }

    /// Returns the number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true if no effects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Returns statistics from the last tick.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Runs one frame of every effect.
    ///
    /// Returns true if the host should request another frame.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }

        let before = self.effects.len();
        self.effects
            .retain_mut(|(_, effect)| effect.frame(now_ms) == FrameControl::Continue);

        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            delta_ms: self.last_tick_ms.map_or(0.0, |last| now_ms - last),
            active_effects: self.effects.len(),
            finished_last_frame: before - self.effects.len(),
        };
        self.last_tick_ms = Some(now_ms);

        !self.effects.is_empty()
    }
}

/// Shared effects run in the loop while event handlers keep a handle to them.
impl<T: FrameEffect> FrameEffect for Rc<RefCell<T>> {
    fn frame(&mut self, now_ms: f64) -> FrameControl {
        self.borrow_mut().frame(now_ms)
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Countdown {
        remaining: u32,
        runs: Rc<Cell<u32>>,
    }

    impl FrameEffect for Countdown {
        fn frame(&mut self, _now_ms: f64) -> FrameControl {
            self.runs.set(self.runs.get() + 1);
            self.remaining -= 1;
            if self.remaining == 0 {
                FrameControl::Finish
            } else {
                FrameControl::Continue
            }
        }
    }

    fn countdown(frames: u32) -> (Box<Countdown>, Rc<Cell<u32>>) {
        let runs = Rc::new(Cell::new(0));
        let effect = Box::new(Countdown {
            remaining: frames,
            runs: Rc::clone(&runs),
        });
        (effect, runs)
    }

    #[test]
    fn test_finished_effects_are_dropped() {
        let mut frames = AnimationLoop::new();
        let (effect, runs) = countdown(3);
        frames.register(effect);

        assert!(frames.tick(0.0));
        assert!(frames.tick(16.0));
        assert!(!frames.tick(32.0));
        assert!(frames.is_idle());
        assert_eq!(runs.get(), 3);
        assert_eq!(frames.stats().finished_last_frame, 1);
    }

    #[test]
    fn test_stop_pauses_without_dropping() {
        let mut frames = AnimationLoop::new();
        let (effect, runs) = countdown(10);
        frames.register(effect);

        frames.tick(0.0);
        frames.stop();
        assert!(!frames.tick(16.0));
        assert!(!frames.tick(32.0));
        assert_eq!(runs.get(), 1);
        assert_eq!(frames.len(), 1);

        frames.start();
        assert!(frames.tick(48.0));
        assert_eq!(runs.get(), 2);
        assert!(frames.stats().delta_ms.abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel() {
        let mut frames = AnimationLoop::new();
        let (first, first_runs) = countdown(10);
        let (second, second_runs) = countdown(10);
        let id = frames.register(first);
        frames.register(second);

        assert!(frames.cancel(id));
        assert!(!frames.cancel(id));
        frames.tick(0.0);
        assert_eq!(first_runs.get(), 0);
        assert_eq!(second_runs.get(), 1);
    }

    #[test]
    fn test_shared_effect_stays_reachable() {
        let mut frames = AnimationLoop::new();
        let (effect, runs) = countdown(2);
        let shared = Rc::new(RefCell::new(*effect));
        frames.register(Box::new(Rc::clone(&shared)));

        frames.tick(0.0);
        assert_eq!(shared.borrow().remaining, 1);
        frames.tick(16.0);
        assert!(frames.is_idle());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_stats_track_delta() {
        let mut frames = AnimationLoop::new();
        let (effect, _) = countdown(10);
        frames.register(effect);

        frames.tick(100.0);
        frames.tick(116.5);
        let stats = frames.stats();
        assert_eq!(stats.frame, 2);
        assert!((stats.delta_ms - 16.5).abs() < 1e-9);
        assert_eq!(stats.active_effects, 1);
    }
}
