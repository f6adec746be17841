//! Button sampling
//!
//! Two buttons, A and B. B alone goes forward, A alone goes back, both
//! together scan, connect or disconnect depending on the connection state.

use billboard_protocol::Command;
use embassy_time::{Duration, Instant};

use crate::config::DEFAULT_BUTTON_DELAY_MS;

/// Tone for a forward press (D5)
pub const NEXT_TONE_HZ: u16 = 587;

/// Tone for a backward press (C5)
pub const PREVIOUS_TONE_HZ: u16 = 523;

/// Tone for a dual press
pub const DUAL_PRESS_TONE_HZ: u16 = 459;

/// An accepted button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// B alone
    Next,
    /// A alone
    Previous,
    /// A and B together
    DualPress,
}

impl InputEvent {
    /// Command sent to the billboard for this press, if any
    pub fn command(&self) -> Option<Command> {
        match self {
            InputEvent::Next => Some(Command::Next),
            InputEvent::Previous => Some(Command::Previous),
            InputEvent::DualPress => None,
        }
    }

    /// Status line text naming the button(s)
    pub fn status_label(&self) -> &'static str {
        match self {
            InputEvent::Next => "B",
            InputEvent::Previous => "A",
            InputEvent::DualPress => "A+B",
        }
    }

    /// Feedback tone frequency
    pub fn tone_hz(&self) -> u16 {
        match self {
            InputEvent::Next => NEXT_TONE_HZ,
            InputEvent::Previous => PREVIOUS_TONE_HZ,
            InputEvent::DualPress => DUAL_PRESS_TONE_HZ,
        }
    }
}

/// Turns button levels into debounced presses
#[derive(Debug, Clone)]
pub struct ButtonSampler {
    debounce: Duration,
    last_accepted: Option<Instant>,
}

impl Default for ButtonSampler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_BUTTON_DELAY_MS as u64))
    }
}

impl ButtonSampler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_accepted: None,
        }
    }

    /// Sample both buttons at `now`
    ///
    /// Returns a press unless nothing is held or the last accepted press
    /// was less than the debounce window ago.
    pub fn sample(&mut self, a_pressed: bool, b_pressed: bool, now: Instant) -> Option<InputEvent> {
        let event = match (a_pressed, b_pressed) {
            (true, true) => InputEvent::DualPress,
            (false, true) => InputEvent::Next,
            (true, false) => InputEvent::Previous,
            (false, false) => return None,
        };

        if let Some(last) = self.last_accepted {
            match now.checked_duration_since(last) {
                Some(elapsed) if elapsed >= self.debounce => {}
                _ => return None,
            }
        }

        self.last_accepted = Some(now);
        Some(event)
    }
}
