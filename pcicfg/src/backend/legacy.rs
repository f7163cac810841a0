//! Legacy port-based backend (configuration mechanism #1).
//!
//! The address of the target register is programmed into the CONFIG_ADDRESS
//! port as a dword, then the data moves through the CONFIG_DATA window with
//! an access sized to the requested width at the byte lane the offset
//! selects. One sized data-port access per call; a narrow access is never
//! widened into a read-modify-write of the surrounding dword.

use crate::codec;
use crate::error::Result;
use crate::types::{PciAddress, Width};

use super::ConfigBackend;

/// CONFIG_ADDRESS register port.
pub const CONFIG_ADDRESS: u16 = 0xCF8;

/// CONFIG_DATA window base port.
pub const CONFIG_DATA: u16 = 0xCFC;

/// Data-port lane for an offset: the dword register is named through
/// CONFIG_ADDRESS and the low two offset bits pick the port within the
/// CONFIG_DATA window.
const fn data_port(offset: u16) -> u16 {
    CONFIG_DATA + (offset & 0x3)
}

#[cfg(target_arch = "x86_64")]
mod pio {
    /// Read 8-bit value from I/O port.
    #[inline]
    pub unsafe fn inb(port: u16) -> u8 {
        let value: u8;
        unsafe {
            core::arch::asm!(
                "in al, dx",
                in("dx") port,
                out("al") value,
                options(nostack, preserves_flags)
            );
        }
        value
    }

    /// Write 8-bit value to I/O port.
    #[inline]
    pub unsafe fn outb(port: u16, value: u8) {
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nostack, preserves_flags)
            );
        }
    }

    /// Read 16-bit value from I/O port.
    #[inline]
    pub unsafe fn inw(port: u16) -> u16 {
        let value: u16;
        unsafe {
            core::arch::asm!(
                "in ax, dx",
                in("dx") port,
                out("ax") value,
                options(nostack, preserves_flags)
            );
        }
        value
    }

    /// Write 16-bit value to I/O port.
    #[inline]
    pub unsafe fn outw(port: u16, value: u16) {
        unsafe {
            core::arch::asm!(
                "out dx, ax",
                in("dx") port,
                in("ax") value,
                options(nostack, preserves_flags)
            );
        }
    }

    /// Read 32-bit value from I/O port.
    #[inline]
    pub unsafe fn inl(port: u16) -> u32 {
        let value: u32;
        unsafe {
            core::arch::asm!(
                "in eax, dx",
                in("dx") port,
                out("eax") value,
                options(nostack, preserves_flags)
            );
        }
        value
    }

    /// Write 32-bit value to I/O port.
    #[inline]
    pub unsafe fn outl(port: u16, value: u32) {
        unsafe {
            core::arch::asm!(
                "out dx, eax",
                in("dx") port,
                in("eax") value,
                options(nostack, preserves_flags)
            );
        }
    }
}

// Inert stand-ins so other targets still compile; reads come back all-ones,
// the bus's answer for an absent device.
#[cfg(not(target_arch = "x86_64"))]
mod pio {
    #[inline]
    pub unsafe fn inb(_port: u16) -> u8 {
        0xFF
    }
    #[inline]
    pub unsafe fn outb(_port: u16, _value: u8) {}
    #[inline]
    pub unsafe fn inw(_port: u16) -> u16 {
        0xFFFF
    }
    #[inline]
    pub unsafe fn outw(_port: u16, _value: u16) {}
    #[inline]
    pub unsafe fn inl(_port: u16) -> u32 {
        0xFFFF_FFFF
    }
    #[inline]
    pub unsafe fn outl(_port: u16, _value: u32) {}
}

/// Configuration access over the legacy 0xCF8/0xCFC port pair.
///
/// The port pair is an architectural constant, so the backend carries no
/// handle. The mechanism reports no transaction status: an absent device
/// reads all-ones by bus rule, and telling that apart from a live register
/// holding all-ones is enumeration's business, not this layer's. Registers
/// past 0xFF are outside what the address port can express and fail the
/// codec's range contract.
pub struct LegacyBackend;

impl LegacyBackend {
    /// Create the port-pair backend.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for LegacyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBackend for LegacyBackend {
    fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32> {
        let address = codec::legacy_address(addr, offset, width);
        // SAFETY: the config ports exist on every PC-compatible platform and
        // the address/data sequence is the mechanism's defined protocol
        let value = unsafe {
            pio::outl(CONFIG_ADDRESS, address);
            match width {
                Width::Byte => pio::inb(data_port(offset)) as u32,
                Width::Word => pio::inw(data_port(offset)) as u32,
                Width::Dword => pio::inl(data_port(offset)),
            }
        };
        Ok(value)
    }

    fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()> {
        let address = codec::legacy_address(addr, offset, width);
        // SAFETY: as for reads; the data-port access is sized to the width
        unsafe {
            pio::outl(CONFIG_ADDRESS, address);
            match width {
                Width::Byte => pio::outb(data_port(offset), value as u8),
                Width::Word => pio::outw(data_port(offset), value as u16),
                Width::Dword => pio::outl(data_port(offset), value),
            }
        }
        Ok(())
    }

    fn max_bus(&self) -> u8 {
        // Bus bits 23-16 of CONFIG_ADDRESS span the whole range
        0xFF
    }

    fn name(&self) -> &'static str {
        "legacy port I/O"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port instructions are privileged, so host tests stop at the pure
    // parts: lane selection and the address register layout.

    #[test]
    fn test_data_port_lanes() {
        assert_eq!(data_port(0x00), 0xCFC);
        assert_eq!(data_port(0x01), 0xCFD);
        assert_eq!(data_port(0x02), 0xCFE);
        assert_eq!(data_port(0x03), 0xCFF);
        assert_eq!(data_port(0x3D), 0xCFD);
        assert_eq!(data_port(0xFC), 0xCFC);
    }

    #[test]
    fn test_lane_and_address_agree() {
        // A word at 0x06 shares the dword address of 0x04 but moves
        // through the upper lane
        let addr = PciAddress::new(0, 31, 0);
        assert_eq!(
            codec::legacy_address(addr, 0x06, Width::Word),
            codec::legacy_address(addr, 0x04, Width::Dword)
        );
        assert_eq!(data_port(0x06), 0xCFE);
    }

    #[test]
    fn test_fixed_bus_range() {
        let backend = LegacyBackend::new();
        assert_eq!(backend.max_bus(), 0xFF);
    }
}
