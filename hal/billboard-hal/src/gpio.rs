//! GPIO input abstractions
//!
//! Buttons are plain digital inputs; the board decides the electrical
//! polarity, [`Button`] hides it.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Logic level that means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// Push button on an input pin
#[derive(Debug)]
pub struct Button<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> Button<P> {
    /// Button pulling the pin low when pressed (pull-up wiring)
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active: ActiveLevel::Low,
        }
    }

    /// Button pulling the pin high when pressed
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active: ActiveLevel::High,
        }
    }

    /// Check if the button is currently held
    pub fn is_pressed(&self) -> bool {
        match self.active {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        }
    }
}
