//! Firmware-mediated backend over the UEFI PCI root bridge I/O protocol.
//!
//! The bindings here are standalone, partial definitions of the pieces this
//! backend actually calls: the protocol's configuration-space access pair
//! plus the status vocabulary needed to classify its answers. Everything is
//! `#[repr(C)]` with `extern "efiapi"` function pointers for UEFI ABI
//! compatibility; members the backend never touches are kept as opaque
//! placeholders so the struct layout still matches the firmware's.

use core::ffi::c_void;

use crate::codec;
use crate::error::{PciError, Result};
use crate::types::{PciAddress, Width};

use super::ConfigBackend;

// ==================== Basic Types ====================

/// UEFI Status code.
pub type Status = usize;

/// Status code constants.
pub mod status {
    use super::Status;

    /// Operation completed successfully.
    pub const SUCCESS: Status = 0;

    /// Invalid parameter was passed.
    pub const INVALID_PARAMETER: Status = 0x8000_0000_0000_0002;

    /// The operation is not supported.
    pub const UNSUPPORTED: Status = 0x8000_0000_0000_0003;

    /// The physical device reported an error.
    pub const DEVICE_ERROR: Status = 0x8000_0000_0000_0007;

    /// Out of resources.
    pub const OUT_OF_RESOURCES: Status = 0x8000_0000_0000_0009;

    /// The item was not found.
    pub const NOT_FOUND: Status = 0x8000_0000_0000_000E;

    /// The device did not respond.
    pub const NO_RESPONSE: Status = 0x8000_0000_0000_0010;

    /// A timeout occurred.
    pub const TIMEOUT: Status = 0x8000_0000_0000_0012;

    /// The operation was aborted.
    pub const ABORTED: Status = 0x8000_0000_0000_0015;

    /// Check if status indicates success.
    #[inline]
    pub const fn is_success(status: Status) -> bool {
        status == SUCCESS
    }

    /// Check if status indicates an error.
    #[inline]
    pub const fn is_error(status: Status) -> bool {
        (status & 0x8000_0000_0000_0000) != 0
    }
}

// ==================== GUID ====================

/// UEFI Globally Unique Identifier.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guid {
    /// First component (32 bits).
    pub data1: u32,
    /// Second component (16 bits).
    pub data2: u16,
    /// Third component (16 bits).
    pub data3: u16,
    /// Final components (8 bytes).
    pub data4: [u8; 8],
}

impl Guid {
    /// Create a GUID from component values.
    pub const fn from_values(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }
}

/// EFI PCI Root Bridge I/O Protocol GUID.
///
/// The embedding loader locates the protocol with this and hands the
/// resulting pointer to [`EfiBackend::new`].
pub const PCI_ROOT_BRIDGE_IO_GUID: Guid = Guid::from_values(
    0x2f707ebb,
    0x4a1a,
    0x11d4,
    [0x9a, 0x38, 0x00, 0x90, 0x27, 0x3f, 0xc1, 0x4d],
);

// ==================== Protocol Definition ====================

/// Transaction width selector for root-bridge accesses.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PciIoWidth {
    /// 8-bit units.
    Uint8 = 0,
    /// 16-bit units.
    Uint16 = 1,
    /// 32-bit units.
    Uint32 = 2,
    /// 64-bit units.
    Uint64 = 3,
}

impl PciIoWidth {
    /// Selector for a uniform access width.
    pub const fn from_width(width: Width) -> Self {
        match width {
            Width::Byte => Self::Uint8,
            Width::Word => Self::Uint16,
            Width::Dword => Self::Uint32,
        }
    }
}

/// Read/write pair for one of the root bridge's address spaces.
#[repr(C)]
pub struct RootBridgeIoAccess {
    /// Read `count` units of `width` at `address` into `buffer`.
    pub read: unsafe extern "efiapi" fn(
        this: *mut PciRootBridgeIo,
        width: PciIoWidth,
        address: u64,
        count: usize,
        buffer: *mut c_void,
    ) -> Status,
    /// Write `count` units of `width` from `buffer` to `address`.
    pub write: unsafe extern "efiapi" fn(
        this: *mut PciRootBridgeIo,
        width: PciIoWidth,
        address: u64,
        count: usize,
        buffer: *mut c_void,
    ) -> Status,
}

/// EFI PCI Root Bridge I/O Protocol (partial definition).
///
/// Only the configuration-space access pair and the trailing segment number
/// are typed; the memory/I/O access pairs and the DMA and attribute members
/// are placeholders that keep the layout aligned with the firmware's.
#[repr(C)]
pub struct PciRootBridgeIo {
    _parent_handle: usize,
    _poll_mem: usize,
    _poll_io: usize,
    _mem: [usize; 2],
    _io: [usize; 2],
    /// Configuration-space access pair.
    pub pci: RootBridgeIoAccess,
    _copy_mem: usize,
    _map: usize,
    _unmap: usize,
    _allocate_buffer: usize,
    _free_buffer: usize,
    _flush: usize,
    _get_attributes: usize,
    _set_attributes: usize,
    _configuration: usize,
    /// PCI segment group this bridge serves.
    pub segment_number: u32,
}

// ==================== Status Translation ====================

/// Map a root-bridge status onto the uniform error taxonomy.
///
/// `NOT_FOUND` and `NO_RESPONSE` both mean nothing answered at the
/// addressed location. Every other non-success status, recognized or not,
/// reports as an I/O failure; an unknown status never becomes a success.
pub fn translate_status(status: Status) -> Result<()> {
    match status {
        status::SUCCESS => Ok(()),
        status::NOT_FOUND | status::NO_RESPONSE => Err(PciError::NoDevice),
        _ => Err(PciError::Io),
    }
}

// ==================== Backend ====================

/// Configuration access through the firmware's root bridge protocol.
///
/// The protocol pointer is bound once at construction and owned by the
/// instance; there is no global state.
pub struct EfiBackend {
    proto: *mut PciRootBridgeIo,
}

impl EfiBackend {
    /// Create a backend over a located protocol instance.
    ///
    /// # Safety
    ///
    /// `proto` must point to a live PCI root bridge I/O protocol instance
    /// (normally located via [`PCI_ROOT_BRIDGE_IO_GUID`]) and must remain
    /// valid for the lifetime of the backend. Boot services must still be
    /// active whenever a transaction is issued.
    pub const unsafe fn new(proto: *mut PciRootBridgeIo) -> Self {
        Self { proto }
    }
}

impl ConfigBackend for EfiBackend {
    fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32> {
        let address = codec::efi_address(addr, offset, width);
        let mut value: u32 = 0;
        // SAFETY: constructor contract guarantees a live protocol instance
        let status = unsafe {
            ((*self.proto).pci.read)(
                self.proto,
                PciIoWidth::from_width(width),
                address,
                1,
                &mut value as *mut u32 as *mut c_void,
            )
        };
        if status != status::SUCCESS {
            log::warn!(
                "PCI {} config read at offset {:#x} ({}) failed: status {:#x}",
                addr,
                offset,
                width,
                status
            );
        }
        translate_status(status)?;
        Ok(value & width.mask())
    }

    fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()> {
        let address = codec::efi_address(addr, offset, width);
        let mut value = value & width.mask();
        // SAFETY: constructor contract guarantees a live protocol instance
        let status = unsafe {
            ((*self.proto).pci.write)(
                self.proto,
                PciIoWidth::from_width(width),
                address,
                1,
                &mut value as *mut u32 as *mut c_void,
            )
        };
        if status != status::SUCCESS {
            log::warn!(
                "PCI {} config write at offset {:#x} ({}) failed: status {:#x}",
                addr,
                offset,
                width,
                status
            );
        }
        translate_status(status)
    }

    fn max_bus(&self) -> u8 {
        // The protocol addresses the full architectural range; enumeration
        // finds out which buses actually answer.
        0xFF
    }

    fn name(&self) -> &'static str {
        "EFI root bridge I/O"
    }
}
