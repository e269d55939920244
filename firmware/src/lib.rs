//! Telemetry-driven mission sequencer firmware for RP2040.
//!
//! This crate binds the chip-agnostic [`flight_core`] pipeline to the
//! RP2040 peripherals: telemetry arrives on a UART, missions are started
//! from two push buttons, and stick commands leave on the same UART towards
//! the stick/switch encoder.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives MAVLink altitude/attitude telemetry over UART (57600 baud, 8N1)
//! 2. Parses completed chunks into the shared [`TelemetryState`]
//! 3. Runs the selected mission script when the mission button is pressed
//! 4. Forwards each actuation command as a binary frame to the encoder
//!
//! # Hardware Configuration
//!
//! | Function       | GPIO | Description |
//! |----------------|------|-------------|
//! | UART1 TX       | 8    | Command frames to the stick encoder |
//! | UART1 RX       | 9    | Telemetry input from the flight controller |
//! | Camera mode    | 16   | Low = black line, high = green target |
//! | Mission button | 14   | Active low, submits the configured mission |
//! | Start button   | 15   | Active low, confirms take-off |
//! | Kill switch    | 13   | Active low, latches the emergency command |
//! | LED            | 25   | On-board LED (warning indicator) |
//!
//! # Architecture
//!
//! Telemetry reception runs on an interrupt-priority executor so that the
//! next read is armed as soon as a chunk completes. Everything else runs on
//! the thread-mode executor:
//!
//! - **Telemetry Task** (high priority): alternates the two reception buffers
//! - **Parser Task**: decodes one completed chunk per wake
//! - **Mission Task**: runs the [`MissionSequencer`](flight_core::MissionSequencer)
//! - **Output Task**: encodes the latest actuation command onto UART TX
//! - **Button / Kill-Switch Tasks**: post commands and the emergency override
//! - **Controller Tasks**: receive the altitude/position controller commands
//!
//! # Modules
//!
//! - [`board`]: pins wired to camera, LED, buttons and kill switch
//! - [`config`]: mission request and timing constants
//! - [`encoder_output`]: actuation frames on UART TX ([`UartEncoderOutput`])
//! - [`telemetry_input`]: double-buffered UART reception ([`UartTelemetryInput`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`telemetry-crc`**: Verify X.25 checksums on telemetry frames
//!
//! # Re-exports
//!
//! This crate re-exports the [`flight_core`] types the binary wires together,
//! so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use flight_core::{
    ActuationBus, ActuationCommand, AltitudeCommand, CommandPort, ControllerLink, MissionOutcome,
    MissionRequest, PositionCommand, TelemetryReceiver, TelemetryState,
};
pub use telemetry_proto::{FrameParser, ParserStats, TELEMETRY_BAUDRATE};

pub mod board;
pub mod config;
pub mod encoder_output;
pub mod telemetry_input;

pub use board::{CameraModePin, KillSwitch, PushButton, StatusLed};
pub use encoder_output::UartEncoderOutput;
pub use telemetry_input::UartTelemetryInput;

/// Lock used for everything shared between the two executors.
pub type SharedMutex = CriticalSectionRawMutex;

/// Bytes per telemetry reception chunk.
pub const CHUNK_LEN: usize = 64;

/// Depth of each controller command queue.
pub const CONTROLLER_QUEUE_DEPTH: usize = 4;

pub type Receiver = TelemetryReceiver<SharedMutex, CHUNK_LEN>;
pub type Port = CommandPort<SharedMutex>;
pub type Actuation = ActuationBus<SharedMutex>;
pub type AltitudeLink = ControllerLink<SharedMutex, AltitudeCommand, CONTROLLER_QUEUE_DEPTH>;
pub type PositionLink = ControllerLink<SharedMutex, PositionCommand, CONTROLLER_QUEUE_DEPTH>;

/// Parser matching the `telemetry-crc` feature.
#[must_use]
pub const fn telemetry_parser() -> FrameParser {
    if cfg!(feature = "telemetry-crc") {
        FrameParser::with_crc()
    } else {
        FrameParser::new()
    }
}
