//! Fixed timestep loop driver
//!
//! Wall-clock time goes into a lag accumulator; whole ticks are taken out of
//! it. Rendering happens once per frame no matter how many ticks ran.

use std::time::{Duration, Instant};

use super::state::World;
use super::tick::tick;
use crate::consts::MAX_FRAME_TIME;
use crate::platform::input::{Command, InputEvent};
use crate::settings::Settings;

/// Outcome of one outer loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Logical ticks run this frame
    pub ticks: u32,
    /// Whole ticks discarded by the catch-up cap
    pub dropped_ticks: u32,
    pub paused: bool,
    /// Quit was requested; the caller should stop after this frame
    pub quit: bool,
    pub contacts: usize,
    pub blocks_broken: usize,
    pub misses: u32,
    pub rounds_cleared: u32,
}

/// Owns the world and feeds it fixed ticks
#[derive(Debug, Clone)]
pub struct Driver {
    world: World,
    tick: Duration,
    max_frame: Duration,
    tick_cap: Option<u32>,
    lag: Duration,
    paused: bool,
    quit: bool,
}

impl Driver {
    pub fn new(settings: Settings) -> Self {
        Self::from_world(World::new(settings))
    }

    pub fn from_world(world: World) -> Self {
        let settings = &world.settings;
        Self {
            tick: settings.tick_duration().max(Duration::from_nanos(1)),
            max_frame: Duration::try_from_secs_f32(settings.max_frame_time)
                .unwrap_or(Duration::from_secs_f32(MAX_FRAME_TIME)),
            tick_cap: settings.tick_cap(),
            lag: Duration::ZERO,
            paused: false,
            quit: false,
            world,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Time not yet consumed by a tick
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Fraction of a tick pending, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.lag.as_secs_f32() / self.tick.as_secs_f32()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match Command::from_event(event) {
            Some(Command::Steer(dir)) => {
                if let Some(paddle) = self.world.paddle_mut() {
                    paddle.steer(dir);
                }
            }
            Some(Command::TogglePause) => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            Some(Command::Quit) => {
                self.quit = true;
                log::info!("Quit requested");
            }
            None => {}
        }
    }

    /// Run one outer loop iteration
    ///
    /// Events are applied first, then as many ticks as the accumulated lag
    /// allows. While paused, elapsed time is discarded and lag is kept.
    pub fn frame(&mut self, elapsed: Duration, events: &[InputEvent]) -> FrameReport {
        for &event in events {
            self.handle_event(event);
        }

        let mut report = FrameReport {
            paused: self.paused,
            quit: self.quit,
            ..FrameReport::default()
        };
        if self.paused {
            return report;
        }

        self.lag += elapsed.min(self.max_frame);
        while self.lag >= self.tick {
            if self.tick_cap.is_some_and(|cap| report.ticks >= cap) {
                let behind = self.lag.as_nanos() / self.tick.as_nanos();
                let behind = u32::try_from(behind).unwrap_or(u32::MAX);
                self.lag -= self.tick * behind;
                report.dropped_ticks = behind;
                log::warn!("Dropped {} tick(s) catching up", behind);
                break;
            }

            let outcome = tick(&mut self.world);
            report.ticks += 1;
            report.contacts += outcome.contacts;
            report.blocks_broken += outcome.blocks_broken;
            report.misses += u32::from(outcome.missed);
            report.rounds_cleared += u32::from(outcome.round_cleared);
            self.lag -= self.tick;
        }
        report
    }
}

/// Measures wall-clock time between polls
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous poll
    pub fn poll(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::Key;

    fn driver() -> Driver {
        Driver::new(Settings::default())
    }

    #[test]
    fn test_unvalidated_tick_rate_keeps_a_nonzero_tick() {
        let settings = Settings {
            tick_rate_hz: 2_000_000_000,
            max_ticks_per_frame: 4,
            ..Settings::default()
        };
        let mut d = Driver::new(settings);
        assert_eq!(d.tick_duration(), Duration::from_nanos(1));
        let report = d.frame(Duration::from_millis(16), &[]);
        assert_eq!(report.ticks, 4);
        assert!(d.lag() < d.tick_duration());
        assert!(d.alpha().is_finite());
    }

    #[test]
    fn test_sub_tick_frame_runs_nothing() {
        let mut d = driver();
        let half = d.tick_duration() / 2;
        let report = d.frame(half, &[]);
        assert_eq!(report.ticks, 0);
        assert_eq!(d.lag(), half);
        assert!((d.alpha() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_lag_carries_over() {
        let mut d = driver();
        let tick = d.tick_duration();
        let frame = tick * 3 / 2;
        assert_eq!(d.frame(frame, &[]).ticks, 1);
        assert_eq!(d.frame(frame, &[]).ticks, 2);
        assert_eq!(d.lag(), Duration::ZERO);
        assert_eq!(d.world().tick_count, 3);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let settings = Settings {
            max_ticks_per_frame: 4,
            max_frame_time: 1.0,
            ..Settings::default()
        };
        let mut d = Driver::new(settings);
        let tick = d.tick_duration();
        let report = d.frame(tick * 10, &[]);
        assert_eq!(report.ticks, 4);
        assert_eq!(report.dropped_ticks, 6);
        assert!(d.lag() < tick);
    }

    #[test]
    fn test_long_frame_truncated() {
        let settings = Settings {
            max_ticks_per_frame: 0,
            max_frame_time: 0.05,
            ..Settings::default()
        };
        let mut d = Driver::new(settings);
        // 0.05 s at 60 Hz is 3 ticks
        let report = d.frame(Duration::from_secs(2), &[]);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.dropped_ticks, 0);
    }

    #[test]
    fn test_pause_keeps_lag() {
        let mut d = driver();
        let tick = d.tick_duration();
        d.frame(tick / 2, &[]);
        let lag = d.lag();

        let report = d.frame(tick * 5, &[InputEvent::press(Key::Pause)]);
        assert!(report.paused);
        assert_eq!(report.ticks, 0);
        assert_eq!(d.lag(), lag);

        let report = d.frame(tick, &[InputEvent::release(Key::Pause), InputEvent::press(Key::Pause)]);
        assert!(!report.paused);
        assert_eq!(report.ticks, 1);
        assert_eq!(d.lag(), lag);
    }

    #[test]
    fn test_quit_finishes_frame() {
        let mut d = driver();
        let tick = d.tick_duration();
        let report = d.frame(tick * 2, &[InputEvent::press(Key::Quit)]);
        assert!(report.quit);
        assert_eq!(report.ticks, 2);
        assert!(d.should_quit());
    }

    #[test]
    fn test_steer_events_reach_paddle() {
        let mut d = driver();
        d.frame(Duration::ZERO, &[InputEvent::press(Key::Right)]);
        assert_eq!(d.world().paddle().unwrap().velocity, 1);
        d.frame(Duration::ZERO, &[InputEvent::release(Key::Right)]);
        assert_eq!(d.world().paddle().unwrap().velocity, 0);
    }
}
