//! Scripted player for headless runs
//!
//! Emits the same key press/release events a keyboard would, tracking the
//! ball's horizontal position with the paddle.

use super::input::{InputEvent, Key};
use crate::sim::World;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Key currently held down
    held: Option<Key>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<Key> {
        self.held
    }

    /// Events needed to steer toward the ball this frame
    pub fn poll(&mut self, world: &World) -> Vec<InputEvent> {
        let (Some(ball), Some(paddle)) = (world.ball(), world.paddle()) else {
            return self.release_all();
        };

        let dx = ball.center().x - paddle.center().x;
        let deadzone = paddle.size.x * 0.25;
        let want = if dx < -deadzone {
            Some(Key::Left)
        } else if dx > deadzone {
            Some(Key::Right)
        } else {
            None
        };

        if want == self.held {
            return Vec::new();
        }
        let mut events = self.release_all();
        if let Some(key) = want {
            events.push(InputEvent::press(key));
            self.held = Some(key);
        }
        events
    }

    /// Release whatever is held
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        self.held.take().map(InputEvent::release).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_tracks_ball_left() {
        let mut world = World::new(Settings::default());
        world.ball_mut().unwrap().pos.x = 0.1;
        let mut pilot = Autopilot::new();

        let events = pilot.poll(&world);
        assert_eq!(events, vec![InputEvent::press(Key::Left)]);
        assert_eq!(pilot.held(), Some(Key::Left));

        // Holding already: nothing new
        assert!(pilot.poll(&world).is_empty());
    }

    #[test]
    fn test_switches_direction() {
        let mut world = World::new(Settings::default());
        world.ball_mut().unwrap().pos.x = 0.1;
        let mut pilot = Autopilot::new();
        pilot.poll(&world);

        world.ball_mut().unwrap().pos.x = 3.8;
        let events = pilot.poll(&world);
        assert_eq!(
            events,
            vec![InputEvent::release(Key::Left), InputEvent::press(Key::Right)]
        );
    }

    #[test]
    fn test_idle_when_centered() {
        let world = World::new(Settings::default());
        let mut pilot = Autopilot::new();
        // Serve starts over the paddle
        assert!(pilot.poll(&world).is_empty());
        assert_eq!(pilot.held(), None);
    }
}
