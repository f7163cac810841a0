//! PCI Configuration-Space Access Layer
//!
//! A `no_std` access layer for PCI configuration space in pre-boot
//! environments: one uniform read/write API over interchangeable platform
//! backends, with the backend bound once at build time.
//!
//! # Overview
//!
//! Everything a loader needs to poke device configuration before an OS
//! exists, and nothing more:
//! - A pure address codec for the three access mechanisms
//! - One backend per mechanism, each owning its substrate handle
//! - A two-case error taxonomy (absent device / failed transaction)
//! - Width-safe register access with alignment as a hard caller contract
//!
//! Bus enumeration, BAR sizing, and driver logic all live above this crate;
//! it only moves register values.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               ConfigSpace<B>                │
//! │  (read_byte/word/dword, write_*, max_bus)   │
//! └─────────────────────┬───────────────────────┘
//!                       │ ConfigBackend
//!        ┌──────────────┼──────────────┐
//!        ▼              ▼              ▼
//! ┌──────────────┐ ┌─────────────┐ ┌─────────────┐
//! │  EfiBackend  │ │LegacyBackend│ │ EcamBackend │
//! │ (root bridge │ │ (0xCF8/0xCFC│ │ (mapped 4 KB│
//! │  protocol)   │ │  port pair) │ │ per function│
//! └──────┬───────┘ └──────┬──────┘ └──────┬──────┘
//!        ▼               ▼               ▼
//! ┌──────────────┐ ┌─────────────┐ ┌─────────────┐
//! │UEFI Pci.Read │ │  x86 in/out │ │  volatile   │
//! │  /Pci.Write  │ │ instructions│ │    MMIO     │
//! └──────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! All three backends compile everywhere so their pure layers stay
//! testable; the `codec` module computes every native address.
//!
//! # Features
//!
//! Exactly one backend feature selects what [`ActiveBackend`] names:
//! - `efi-backend` (default): firmware-mediated access through the UEFI
//!   PCI root bridge I/O protocol
//! - `legacy-backend`: configuration mechanism #1 through the 0xCF8/0xCFC
//!   port pair
//! - `ecam-backend`: memory-mapped PCIe extended configuration access
//!
//! # Usage
//!
//! ```ignore
//! use pcicfg::{ConfigSpace, EfiBackend, PciAddress, regs};
//!
//! // Protocol pointer located by the loader via PCI_ROOT_BRIDGE_IO_GUID
//! let pci = ConfigSpace::new(unsafe { EfiBackend::new(proto) });
//!
//! let addr = PciAddress::new(0, 3, 0);
//! if pci.read_word(addr, regs::offset::VENDOR_ID)? != regs::VENDOR_NONE {
//!     let enable = regs::Command::IO_SPACE | regs::Command::MEMORY_SPACE;
//!     pci.write_word(addr, regs::offset::COMMAND, enable.bits())?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod access;
pub mod backend;
pub mod codec;
pub mod error;
pub mod regs;
pub mod types;

pub use access::ConfigSpace;
pub use backend::ecam::EcamBackend;
pub use backend::efi::EfiBackend;
pub use backend::legacy::LegacyBackend;
pub use backend::ConfigBackend;
pub use error::{PciError, Result};
pub use types::{PciAddress, Width};

#[cfg(any(
    all(feature = "efi-backend", feature = "legacy-backend"),
    all(feature = "efi-backend", feature = "ecam-backend"),
    all(feature = "legacy-backend", feature = "ecam-backend"),
))]
compile_error!(
    "select exactly one backend feature: efi-backend, legacy-backend, or ecam-backend"
);

#[cfg(not(any(
    feature = "efi-backend",
    feature = "legacy-backend",
    feature = "ecam-backend"
)))]
compile_error!("select a backend feature: efi-backend, legacy-backend, or ecam-backend");

/// The backend bound by this build's feature selection.
#[cfg(all(
    feature = "efi-backend",
    not(any(feature = "legacy-backend", feature = "ecam-backend"))
))]
pub type ActiveBackend = backend::efi::EfiBackend;

/// The backend bound by this build's feature selection.
#[cfg(all(
    feature = "legacy-backend",
    not(any(feature = "efi-backend", feature = "ecam-backend"))
))]
pub type ActiveBackend = backend::legacy::LegacyBackend;

/// The backend bound by this build's feature selection.
#[cfg(all(
    feature = "ecam-backend",
    not(any(feature = "efi-backend", feature = "legacy-backend"))
))]
pub type ActiveBackend = backend::ecam::EcamBackend;
