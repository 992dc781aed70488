//! Logging shim.
//!
//! On embedded targets, tracing goes out over `defmt` (RTT). On the host
//! (unit tests, tooling), it goes through the `log` crate instead. Neither
//! the FSM nor the radio service know which backend is active.

#[cfg(all(not(target_arch = "x86_64"), feature = "defmt"))]
pub use defmt::*;

#[cfg(target_arch = "x86_64")]
pub use log::*;

#[cfg(target_arch = "x86_64")]
use core::fmt;

#[cfg(target_arch = "x86_64")]
/// Wrapper to implement `Display` for `Debug`, mirroring defmt's `Debug2Format`.
pub struct Debug2Format<'a, T: fmt::Debug + ?Sized>(pub &'a T);

#[cfg(target_arch = "x86_64")]
impl<'a, T: fmt::Debug + ?Sized> fmt::Display for Debug2Format<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

// No-op implementations for embedded builds without the `defmt` feature.
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{}};
}
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
#[cfg(all(not(target_arch = "x86_64"), not(feature = "defmt")))]
pub use crate::{debug, error, info, trace, warn};
