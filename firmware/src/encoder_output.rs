//! Actuation commands to the stick/switch encoder over UART.

use defmt::{debug, error, warn};
use embassy_rp::uart::{Async, UartTx};
use flight_core::{encode_command_to_vec, COMMAND_FRAME_LEN};

use crate::Actuation;

/// UART transmitter draining the [`ActuationBus`](flight_core::ActuationBus).
///
/// Only the latest command is sent when several are posted while a frame is
/// still on the wire.
pub struct UartEncoderOutput<'d> {
    tx: UartTx<'d, Async>,
    sent: u32,
}

impl<'d> UartEncoderOutput<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx, sent: 0 }
    }

    /// Frames written so far.
    #[inline]
    #[must_use]
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Forward commands from `bus` forever.
    pub async fn run(&mut self, bus: &Actuation) -> ! {
        loop {
            let command = bus.next().await;
            let frame: heapless::Vec<u8, COMMAND_FRAME_LEN> = match encode_command_to_vec(&command)
            {
                Ok(frame) => frame,
                Err(e) => {
                    error!("encode error: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = self.tx.write(&frame).await {
                warn!("encoder UART error: {:?}", e);
                continue;
            }
            self.sent = self.sent.wrapping_add(1);
            if command.is_emergency() {
                debug!("emergency frame sent");
            }
        }
    }
}
