//! Bounded mailboxes shared between the FSM task and the radio task
//! (spec §3 `Mailbox<T, 16>`, spec §5).
//!
//! Both mailboxes must be safe under a concurrent producer and a concurrent
//! consumer, non-blocking on both ends. `embassy_sync::channel::Channel` is
//! exactly this contract — it's the same primitive the teacher repo uses
//! for every cross-task queue (`SIDE_CHANNEL`, `LAYOUT_CHANNEL`, ...) — so
//! `PeerReport` (a small `Copy` value) is pushed through it directly rather
//! than through a separate alloc/put/get/free pool indirection.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::MAILBOX_DEPTH;
use crate::protocol::PeerReport;

type PeerChannel = Channel<CriticalSectionRawMutex, PeerReport, MAILBOX_DEPTH>;

/// The two mailboxes that cross the FSM task / radio task boundary.
pub struct Mailboxes {
    /// Reports delivered by the radio, awaiting FSM-side peer influence.
    pub incoming: PeerChannel,
    /// Reports queued by the FSM, awaiting radio transmission.
    pub outgoing: PeerChannel,
}

impl Default for Mailboxes {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailboxes {
    pub const fn new() -> Self {
        Self {
            incoming: Channel::new(),
            outgoing: Channel::new(),
        }
    }

    /// Allocate and enqueue a report for transmission. Returns `false`
    /// (without modifying the mailbox) if `outgoing` is full.
    pub fn try_queue_send(&self, report: PeerReport) -> bool {
        self.outgoing.try_send(report).is_ok()
    }

    /// Pop one delivered report, if any. Returns `None` without touching
    /// anything if `incoming` is empty.
    pub fn try_receive(&self) -> Option<PeerReport> {
        self.incoming.try_receive().ok()
    }
}
