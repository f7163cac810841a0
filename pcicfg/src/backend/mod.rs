//! Configuration-space backend drivers.
//!
//! Each backend owns its substrate handle (protocol pointer, port pair, or
//! mapped window) and translates uniform read/write requests into that
//! mechanism's native transactions. All three compile on every target so the
//! codec and dispatch paths stay testable; which one a build actually binds
//! is decided by the crate features (see the crate root).

pub mod ecam;
pub mod efi;
pub mod legacy;

use crate::error::Result;
use crate::types::{PciAddress, Width};

/// A configuration-space access mechanism.
///
/// Every call performs exactly one substrate transaction of the requested
/// width: no read-modify-write widening, no retries, no caching. Values
/// travel in the low bits of a `u32` regardless of width; backends mask
/// reads to the width and ignore bits above it on writes.
pub trait ConfigBackend {
    /// Read one register of the given width.
    fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32>;

    /// Write one register of the given width.
    fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()>;

    /// Highest bus number this mechanism can address.
    fn max_bus(&self) -> u8;

    /// Short mechanism name for diagnostics.
    fn name(&self) -> &'static str;
}
