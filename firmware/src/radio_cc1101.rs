//! CC1101-backed [`vehicle_core::Radio`].
//!
//! `GDO0` is wired to fire high once a full packet lands in the RX FIFO
//! (sync-word-qualified, fixed packet length). The transceiver stays in
//! `Receive` mode between ticks; a transmit strobes into `Transmit` and back.

use cc1101::{AddressFilter, Cc1101};
use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;
use vehicle_core::config::PACKET_LEN;
use vehicle_core::Radio;

pub struct Cc1101Radio<SPI, G> {
    chip: Cc1101<SPI>,
    packet_ready: G,
}

impl<SPI, G> Cc1101Radio<SPI, G>
where
    SPI: SpiDevice,
    G: InputPin,
{
    /// `own_addr` is written to the CC1101's `ADDR` register and self
    /// address-check mode is enabled, so the chip filters out anything not
    /// addressed to this vehicle before it ever reaches the RX FIFO. The
    /// paired vehicle must run with the inverse `VehicleRole` so the two
    /// addresses stay mutually exclusive.
    pub fn new(mut chip: Cc1101<SPI>, packet_ready: G, own_addr: u8) -> Self {
        if chip.set_address_filter(AddressFilter::Device(own_addr)).is_err() {
            defmt::warn!("cc1101 address filter not applied");
        }
        Self { chip, packet_ready }
    }
}

impl<SPI, G> Radio for Cc1101Radio<SPI, G>
where
    SPI: SpiDevice,
    G: InputPin,
{
    fn readable(&mut self) -> bool {
        self.packet_ready.is_high().unwrap_or(false)
    }

    fn read(&mut self) -> [u8; PACKET_LEN] {
        let mut buf = [0u8; PACKET_LEN];
        let _ = self.chip.0.read_fifo(&mut buf);
        let _ = self.chip.to_rx();
        buf
    }

    fn write(&mut self, frame: &[u8; PACKET_LEN]) -> usize {
        let sent = self.chip.0.write_fifo(frame).is_ok() && self.chip.to_tx().is_ok();
        let _ = self.chip.to_rx();
        if sent {
            PACKET_LEN
        } else {
            0
        }
    }
}
