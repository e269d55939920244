//! UART telemetry reception.
//!
//! Fills the two reception buffers of a [`TelemetryReceiver`] in turn. A new
//! read is armed on the returned buffer before anything else happens, so the
//! UART FIFO only has to bridge the few cycles between two DMA transfers.

use defmt::warn;
use embassy_rp::uart::{Async, UartRx};
use flight_core::Chunk;

use crate::{Receiver, CHUNK_LEN};

/// UART receiver feeding completed chunks to the parser task.
pub struct UartTelemetryInput<'d> {
    rx: UartRx<'d, Async>,
    receiver: &'d Receiver,
}

impl<'d> UartTelemetryInput<'d> {
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>, receiver: &'d Receiver) -> Self {
        Self { rx, receiver }
    }

    /// Keep one read outstanding at all times, alternating `buffers`.
    ///
    /// Transport errors are logged and the same buffer is read again; the
    /// parser resynchronizes on the next start marker.
    pub async fn run(&mut self, buffers: [Chunk<CHUNK_LEN>; 2]) -> ! {
        let mut active = self.receiver.start(buffers);
        loop {
            match self.rx.read(&mut active[..]).await {
                Ok(()) => active = self.receiver.complete(active),
                Err(e) => warn!("telemetry UART error: {:?}", e),
            }
        }
    }
}
