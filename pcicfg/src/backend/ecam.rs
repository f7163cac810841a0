//! Memory-mapped backend (PCIe Enhanced Configuration Access Mechanism).
//!
//! Configuration space appears as one flat window: 4 KB per function,
//! addressed by the codec's bus/device/function packing. The window may
//! cover the full bus range or, as MCFG tables commonly describe, only a
//! slice of it starting at some first bus; a locator outside the window is
//! reported as an absent device because this mechanism has no way to reach
//! it.

use crate::codec;
use crate::error::{PciError, Result};
use crate::types::{PciAddress, Width};

use super::ConfigBackend;

/// Configuration access through a mapped ECAM window.
pub struct EcamBackend {
    /// Base address of the mapped window.
    base: *mut u8,
    /// First bus the window covers.
    start_bus: u8,
    /// Last bus the window covers.
    end_bus: u8,
}

impl EcamBackend {
    /// Create a backend over a window covering the full bus range.
    ///
    /// # Safety
    ///
    /// - `base` must point to the start of the mapped ECAM region.
    /// - The region must span the full range (256 MB for buses 0-255).
    pub const unsafe fn new(base: *mut u8) -> Self {
        Self {
            base,
            start_bus: 0,
            end_bus: 0xFF,
        }
    }

    /// Create a backend over a window covering `start_bus..=end_bus`, the
    /// shape an MCFG allocation describes.
    ///
    /// # Safety
    ///
    /// - `base` must point to the start of the mapped region for
    ///   `start_bus`.
    /// - The region must span 1 MB for every bus in the range.
    pub const unsafe fn with_bus_range(base: *mut u8, start_bus: u8, end_bus: u8) -> Self {
        assert!(start_bus <= end_bus, "ECAM bus range start exceeds end");
        Self {
            base,
            start_bus,
            end_bus,
        }
    }

    /// Get the base address.
    pub fn base(&self) -> *mut u8 {
        self.base
    }

    /// Byte offset of the register within the mapped window, or `NoDevice`
    /// for a bus the window does not cover. The codec's alignment and range
    /// contract applies before the window test.
    fn window_offset(&self, addr: PciAddress, offset: u16, width: Width) -> Result<usize> {
        let absolute = codec::ecam_offset(addr, offset, width);
        if addr.bus < self.start_bus || addr.bus > self.end_bus {
            log::debug!(
                "PCI {} {} access at offset {:#x} outside ECAM bus range {:#04x}-{:#04x}",
                addr,
                width,
                offset,
                self.start_bus,
                self.end_bus
            );
            return Err(PciError::NoDevice);
        }
        Ok(absolute - ((self.start_bus as usize) << 20))
    }
}

impl ConfigBackend for EcamBackend {
    fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32> {
        let relative = self.window_offset(addr, offset, width)?;
        // SAFETY: constructor contract covers the configured bus range
        let value = unsafe {
            let ptr = self.base.add(relative);
            match width {
                Width::Byte => core::ptr::read_volatile(ptr) as u32,
                Width::Word => core::ptr::read_volatile(ptr as *const u16) as u32,
                Width::Dword => core::ptr::read_volatile(ptr as *const u32),
            }
        };
        Ok(value)
    }

    fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()> {
        let relative = self.window_offset(addr, offset, width)?;
        // SAFETY: constructor contract covers the configured bus range
        unsafe {
            let ptr = self.base.add(relative);
            match width {
                Width::Byte => core::ptr::write_volatile(ptr, value as u8),
                Width::Word => core::ptr::write_volatile(ptr as *mut u16, value as u16),
                Width::Dword => core::ptr::write_volatile(ptr as *mut u32, value),
            }
        }
        Ok(())
    }

    fn max_bus(&self) -> u8 {
        self.end_bus
    }

    fn name(&self) -> &'static str {
        "ECAM"
    }
}

// SAFETY: ECAM access is thread-safe if properly synchronized externally
unsafe impl Send for EcamBackend {}
unsafe impl Sync for EcamBackend {}
