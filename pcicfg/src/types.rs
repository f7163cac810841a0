//! Core data types shared by every configuration-space backend.
//!
//! A [`PciAddress`] names one function on the bus; a [`Width`] names the size
//! of a single configuration transaction. Both are plain values with no
//! behavior beyond encoding helpers, so the address codec and the backends
//! can stay pure over them.

use core::fmt;

/// Configuration space size for a single function (legacy PCI).
pub const CONFIG_SPACE_SIZE: u16 = 256;

/// Extended configuration space size for a single function (PCIe / ECAM).
pub const ECAM_SPACE_SIZE: u16 = 4096;

/// PCI device/function locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PciAddress {
    /// Bus number (0-255).
    pub bus: u8,
    /// Device number (0-31).
    pub device: u8,
    /// Function number (0-7).
    pub function: u8,
}

impl PciAddress {
    /// Create a new locator.
    ///
    /// # Panics
    ///
    /// Panics if `device` exceeds 31 or `function` exceeds 7. Out-of-range
    /// components cannot name any function, so they are rejected up front
    /// rather than silently masked into some other device's registers.
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        assert!(device < 32, "PCI device number out of range (0-31)");
        assert!(function < 8, "PCI function number out of range (0-7)");
        Self {
            bus,
            device,
            function,
        }
    }

    /// Pack into the 16-bit bus/device/function form (bus in bits 15-8,
    /// device in 7-3, function in 2-0).
    pub const fn to_bdf(self) -> u16 {
        ((self.bus as u16) << 8) | ((self.device as u16) << 3) | (self.function as u16)
    }

    /// Unpack from the 16-bit bus/device/function form.
    pub const fn from_bdf(bdf: u16) -> Self {
        Self {
            bus: (bdf >> 8) as u8,
            device: ((bdf >> 3) & 0x1F) as u8,
            function: (bdf & 0x07) as u8,
        }
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical bb:dd.f form used in diagnostics
        write!(f, "{:02x}:{:02x}.{}", self.bus, self.device, self.function)
    }
}

/// Width of a single configuration-space transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Word,
    /// 32-bit access.
    Dword,
}

impl Width {
    /// Size of the access in bytes.
    pub const fn bytes(self) -> u16 {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
            Width::Dword => 4,
        }
    }

    /// Mask covering the value bits carried by this width.
    pub const fn mask(self) -> u32 {
        match self {
            Width::Byte => 0xFF,
            Width::Word => 0xFFFF,
            Width::Dword => 0xFFFF_FFFF,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Width::Byte => "byte",
            Width::Word => "word",
            Width::Dword => "dword",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bdf_roundtrip() {
        let addr = PciAddress::new(0, 0, 0);
        assert_eq!(addr.to_bdf(), 0);
        assert_eq!(PciAddress::from_bdf(0), addr);

        let addr = PciAddress::new(0xAB, 31, 7);
        assert_eq!(addr.to_bdf(), 0xAB00 | (31 << 3) | 7);
        assert_eq!(PciAddress::from_bdf(addr.to_bdf()), addr);

        // Host bridge neighbor on a typical Q35 layout
        let addr = PciAddress::new(0, 3, 0);
        assert_eq!(addr.to_bdf(), 3 << 3);
    }

    #[test]
    #[should_panic(expected = "device number out of range")]
    fn test_device_out_of_range() {
        let _ = PciAddress::new(0, 32, 0);
    }

    #[test]
    #[should_panic(expected = "function number out of range")]
    fn test_function_out_of_range() {
        let _ = PciAddress::new(0, 0, 8);
    }

    #[test]
    fn test_width_sizes() {
        assert_eq!(Width::Byte.bytes(), 1);
        assert_eq!(Width::Word.bytes(), 2);
        assert_eq!(Width::Dword.bytes(), 4);

        assert_eq!(Width::Byte.mask(), 0xFF);
        assert_eq!(Width::Word.mask(), 0xFFFF);
        assert_eq!(Width::Dword.mask(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(PciAddress::new(0, 3, 0).to_string(), "00:03.0");
        assert_eq!(PciAddress::new(0x12, 0x1F, 7).to_string(), "12:1f.7");
        assert_eq!(Width::Word.to_string(), "word");
    }
}
