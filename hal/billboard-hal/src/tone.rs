//! Buzzer abstraction

/// Piezo buzzer used for button feedback
pub trait Tone {
    /// Start a continuous tone at `frequency_hz`
    fn start_tone(&mut self, frequency_hz: u16);

    /// Silence the buzzer
    fn stop_tone(&mut self);
}

/// Buzzer that makes no sound, for boards without one
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Tone for Silent {
    fn start_tone(&mut self, _frequency_hz: u16) {}

    fn stop_tone(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beep<T: Tone>(tone: &mut T) {
        tone.start_tone(587);
        tone.stop_tone();
    }

    #[test]
    fn test_silent_accepts_tones() {
        let mut tone = Silent;
        beep(&mut tone);
    }
}
