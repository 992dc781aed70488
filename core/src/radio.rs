//! Radio service tick: moves bytes between the physical transceiver and the
//! two mailboxes, one frame per tick (spec §3, §4.C).

use crate::config::PACKET_LEN;
use crate::log::info;
use crate::mailbox::Mailboxes;
use crate::protocol::PeerReport;

/// Narrow interface for the physical transceiver; the SPI/GPIO driver stack
/// itself is an external collaborator (spec §1).
pub trait Radio {
    /// `true` if a complete inbound frame is waiting to be read.
    fn readable(&mut self) -> bool;
    /// Read exactly one `PACKET_LEN`-byte frame.
    fn read(&mut self) -> [u8; PACKET_LEN];
    /// Attempt to write one frame; returns the number of bytes actually
    /// accepted by the transceiver (spec: a short write means the send
    /// failed and must be retried).
    fn write(&mut self, frame: &[u8; PACKET_LEN]) -> usize;
}

/// Owns a `Radio` and runs the per-tick read-or-write policy against a
/// shared pair of mailboxes.
pub struct RadioService<R: Radio> {
    radio: R,
}

impl<R: Radio> RadioService<R> {
    pub fn new(radio: R) -> Self {
        Self { radio }
    }

    /// One service tick: prefer draining an inbound frame; otherwise attempt
    /// to transmit one queued outbound report. A short write re-queues the
    /// report for a single retry on the next tick rather than dropping it.
    pub fn tick(&mut self, mailboxes: &Mailboxes) {
        if self.radio.readable() {
            let frame = self.radio.read();
            match PeerReport::from_bytes(&frame) {
                Ok(report) => {
                    if mailboxes.incoming.try_send(report).is_err() {
                        info!("incoming mailbox full, discarding report");
                    }
                }
                Err(_) => info!("dropped malformed inbound frame"),
            }
            return;
        }

        let Ok(report) = mailboxes.outgoing.try_receive() else {
            return;
        };
        let frame = report.to_bytes();
        let written = self.radio.write(&frame);
        if written < PACKET_LEN {
            // Requeue for a retry; if outgoing is now full (another producer
            // raced us) the report is dropped rather than blocking the tick.
            let _ = mailboxes.outgoing.try_send(report);
        }
    }
}
