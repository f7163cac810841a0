//! Uniform dispatch over the bound backend.

use crate::backend::ConfigBackend;
use crate::error::Result;
use crate::types::{PciAddress, Width};

/// Configuration-space access front end over a concrete backend.
///
/// The width-specific entry points are thin shims over one generic
/// read/write pipeline, so every call is exactly one backend transaction.
/// Nothing here retries, caches, or substitutes a default value for a
/// failed transaction; errors pass through as the backend reported them.
pub struct ConfigSpace<B: ConfigBackend> {
    backend: B,
}

impl<B: ConfigBackend> ConfigSpace<B> {
    /// Bind the access layer to a backend.
    pub fn new(backend: B) -> Self {
        log::debug!("PCI config access via {}", backend.name());
        Self { backend }
    }

    /// Get a reference to the bound backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read one register of the given width. The value arrives in the low
    /// bits, masked to the width.
    pub fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32> {
        self.backend.read(addr, offset, width)
    }

    /// Write one register of the given width from the low bits of `value`.
    pub fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()> {
        self.backend.write(addr, offset, width, value)
    }

    /// Read an 8-bit register.
    #[inline]
    pub fn read_byte(&self, addr: PciAddress, offset: u16) -> Result<u8> {
        Ok(self.read(addr, offset, Width::Byte)? as u8)
    }

    /// Read a 16-bit register.
    #[inline]
    pub fn read_word(&self, addr: PciAddress, offset: u16) -> Result<u16> {
        Ok(self.read(addr, offset, Width::Word)? as u16)
    }

    /// Read a 32-bit register.
    #[inline]
    pub fn read_dword(&self, addr: PciAddress, offset: u16) -> Result<u32> {
        self.read(addr, offset, Width::Dword)
    }

    /// Write an 8-bit register.
    #[inline]
    pub fn write_byte(&self, addr: PciAddress, offset: u16, value: u8) -> Result<()> {
        self.write(addr, offset, Width::Byte, value as u32)
    }

    /// Write a 16-bit register.
    #[inline]
    pub fn write_word(&self, addr: PciAddress, offset: u16, value: u16) -> Result<()> {
        self.write(addr, offset, Width::Word, value as u32)
    }

    /// Write a 32-bit register.
    #[inline]
    pub fn write_dword(&self, addr: PciAddress, offset: u16, value: u32) -> Result<()> {
        self.write(addr, offset, Width::Dword, value)
    }

    /// Highest bus number the bound backend can address.
    pub fn max_bus(&self) -> u8 {
        self.backend.max_bus()
    }
}
