//! Pins wired to the camera, the warning LED, the buttons and the kill switch.
//!
//! The types are generic over `embedded-hal` pin traits so any RP2040 GPIO
//! (or an expander pin) can be used.

use defmt::{info, warn};
use embassy_time::Timer;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::digital::Wait;
use flight_core::{CameraControl, CameraMode, Indicator};

use crate::config::DEBOUNCE;
use crate::Actuation;

/// Camera mode select line: low for the black line, high for the green target.
pub struct CameraModePin<P>(P);

impl<P: OutputPin> CameraModePin<P> {
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self(pin)
    }
}

impl<P: OutputPin> CameraControl for CameraModePin<P> {
    fn select_mode(&mut self, mode: CameraMode) {
        let state = match mode {
            CameraMode::Black => PinState::Low,
            CameraMode::Green => PinState::High,
        };
        if self.0.set_state(state).is_err() {
            warn!("camera mode pin write failed");
        }
    }
}

/// Warning LED.
pub struct StatusLed<P>(P);

impl<P: OutputPin> StatusLed<P> {
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self(pin)
    }
}

impl<P: OutputPin> Indicator for StatusLed<P> {
    fn set(&mut self, on: bool) {
        if self.0.set_state(PinState::from(on)).is_err() {
            warn!("status LED write failed");
        }
    }
}

/// Active-low push button.
pub struct PushButton<P> {
    pin: P,
}

impl<P: Wait> PushButton<P> {
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Wait for the next debounced press.
    pub async fn pressed(&mut self) {
        loop {
            if self.pin.wait_for_falling_edge().await.is_ok() {
                Timer::after(DEBOUNCE).await;
                return;
            }
            warn!("button wait failed");
            Timer::after(DEBOUNCE).await;
        }
    }
}

/// Active-low kill switch driving the actuation override.
///
/// Holding the switch latches the emergency command; releasing it clears
/// the latch so the next mission can be accepted.
pub struct KillSwitch<P> {
    pin: P,
}

impl<P: Wait> KillSwitch<P> {
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub async fn run(&mut self, bus: &Actuation) -> ! {
        loop {
            if self.pin.wait_for_low().await.is_err() {
                // A switch we cannot read is treated as engaged.
                bus.trigger_emergency();
                Timer::after(DEBOUNCE).await;
                continue;
            }
            warn!("kill switch engaged");
            bus.trigger_emergency();
            Timer::after(DEBOUNCE).await;

            if self.pin.wait_for_high().await.is_ok() {
                info!("kill switch released");
                bus.clear_emergency();
                Timer::after(DEBOUNCE).await;
            }
        }
    }
}
