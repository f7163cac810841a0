//! Pure address codec for the three configuration-access mechanisms.
//!
//! Each backend speaks its own native addressing scheme; the functions here
//! translate a ([`PciAddress`], register offset, [`Width`]) triple into that
//! scheme and back. They hold no state and touch no hardware, so every bit
//! layout is testable on the host.
//!
//! All encoders enforce the caller contract: the offset must be aligned to
//! the access width and must fit the mechanism's register window. A
//! violation panics immediately instead of truncating or rounding the
//! offset into some neighboring register.

use crate::types::{PciAddress, Width, CONFIG_SPACE_SIZE, ECAM_SPACE_SIZE};

/// Enable bit of the legacy CONFIG_ADDRESS dword.
pub const LEGACY_ENABLE: u32 = 1 << 31;

/// Shared caller-contract check: width alignment and window range.
const fn check(offset: u16, window: u16, width: Width) {
    assert!(
        offset % width.bytes() == 0,
        "configuration offset not aligned to access width"
    );
    assert!(
        offset < window,
        "configuration offset beyond the register window"
    );
}

/// Encode a CONFIG_ADDRESS dword for the legacy 0xCF8/0xCFC mechanism.
///
/// Layout: enable bit 31, bus 23-16, device 15-11, function 10-8, and the
/// dword-aligned register in bits 7-2. The byte lane within the dword is
/// not part of the address register; the port backend selects it by sizing
/// its data-port access.
///
/// Panics on a misaligned offset or one at or beyond 256.
pub const fn legacy_address(addr: PciAddress, offset: u16, width: Width) -> u32 {
    check(offset, CONFIG_SPACE_SIZE, width);
    LEGACY_ENABLE
        | ((addr.bus as u32) << 16)
        | ((addr.device as u32) << 11)
        | ((addr.function as u32) << 8)
        | ((offset as u32) & 0xFC)
}

/// Decode a CONFIG_ADDRESS dword. The register comes back dword-aligned
/// because the encoding drops the byte lane.
pub const fn legacy_decode(address: u32) -> (PciAddress, u16) {
    let addr = PciAddress::new(
        (address >> 16) as u8,
        ((address >> 11) & 0x1F) as u8,
        ((address >> 8) & 0x07) as u8,
    );
    (addr, (address & 0xFC) as u16)
}

/// Encode a UEFI root-bridge I/O address.
///
/// Layout: register 7-0, function 15-8, device 23-16, bus 31-24. Registers
/// at or beyond 256 move to the extended-register field in bits 63-32 with
/// bits 7-0 left zero, as the root-bridge protocol specifies.
///
/// Panics on a misaligned offset or one at or beyond 4096.
pub const fn efi_address(addr: PciAddress, offset: u16, width: Width) -> u64 {
    check(offset, ECAM_SPACE_SIZE, width);
    let base = ((addr.bus as u64) << 24)
        | ((addr.device as u64) << 16)
        | ((addr.function as u64) << 8);
    if offset < CONFIG_SPACE_SIZE {
        base | (offset as u64)
    } else {
        base | ((offset as u64) << 32)
    }
}

/// Decode a UEFI root-bridge I/O address, extended-register form included.
pub const fn efi_decode(address: u64) -> (PciAddress, u16) {
    let addr = PciAddress::new(
        (address >> 24) as u8,
        ((address >> 16) & 0xFF) as u8,
        ((address >> 8) & 0xFF) as u8,
    );
    let offset = if (address >> 32) != 0 {
        (address >> 32) as u16
    } else {
        (address & 0xFF) as u16
    };
    (addr, offset)
}

/// Encode a byte offset into an ECAM window: bus 27-20, device 19-15,
/// function 14-12, register 11-0.
///
/// Panics on a misaligned offset or one at or beyond 4096.
pub const fn ecam_offset(addr: PciAddress, offset: u16, width: Width) -> usize {
    check(offset, ECAM_SPACE_SIZE, width);
    ((addr.to_bdf() as usize) << 12) | (offset as usize)
}

/// Decode an ECAM window offset.
pub const fn ecam_decode(offset: usize) -> (PciAddress, u16) {
    (
        PciAddress::from_bdf((offset >> 12) as u16),
        (offset & 0xFFF) as u16,
    )
}
