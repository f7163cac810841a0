//! Standard configuration-header register map.
//!
//! Byte offsets of the type-0 header plus typed views of the command and
//! status registers. This module is pure data for callers to name registers
//! with; interpreting them (enumeration, BAR sizing, driver setup) is the
//! business of whatever sits on top of the access layer.

/// Type-0 configuration header offsets.
pub mod offset {
    /// Vendor ID (word).
    pub const VENDOR_ID: u16 = 0x00;
    /// Device ID (word).
    pub const DEVICE_ID: u16 = 0x02;
    /// Command register (word).
    pub const COMMAND: u16 = 0x04;
    /// Status register (word).
    pub const STATUS: u16 = 0x06;
    /// Revision ID (byte).
    pub const REVISION_ID: u16 = 0x08;
    /// Programming interface (byte).
    pub const PROG_IF: u16 = 0x09;
    /// Subclass code (byte).
    pub const SUBCLASS: u16 = 0x0A;
    /// Class code (byte).
    pub const CLASS_CODE: u16 = 0x0B;
    /// Cache line size (byte).
    pub const CACHE_LINE_SIZE: u16 = 0x0C;
    /// Latency timer (byte).
    pub const LATENCY_TIMER: u16 = 0x0D;
    /// Header type (byte); bit 7 flags a multi-function device.
    pub const HEADER_TYPE: u16 = 0x0E;
    /// Built-in self test (byte).
    pub const BIST: u16 = 0x0F;
    /// Base address register 0 (dword).
    pub const BAR0: u16 = 0x10;
    /// Base address register 1 (dword).
    pub const BAR1: u16 = 0x14;
    /// Base address register 2 (dword).
    pub const BAR2: u16 = 0x18;
    /// Base address register 3 (dword).
    pub const BAR3: u16 = 0x1C;
    /// Base address register 4 (dword).
    pub const BAR4: u16 = 0x20;
    /// Base address register 5 (dword).
    pub const BAR5: u16 = 0x24;
    /// CardBus CIS pointer (dword).
    pub const CARDBUS_CIS: u16 = 0x28;
    /// Subsystem vendor ID (word).
    pub const SUBSYS_VENDOR_ID: u16 = 0x2C;
    /// Subsystem ID (word).
    pub const SUBSYS_ID: u16 = 0x2E;
    /// Expansion ROM base address (dword).
    pub const ROM_BASE: u16 = 0x30;
    /// Capability list pointer (byte).
    pub const CAP_PTR: u16 = 0x34;
    /// Interrupt line (byte).
    pub const INT_LINE: u16 = 0x3C;
    /// Interrupt pin (byte).
    pub const INT_PIN: u16 = 0x3D;
}

/// Vendor ID read back from a slot with no device behind it.
pub const VENDOR_NONE: u16 = 0xFFFF;

bitflags::bitflags! {
    /// Command register bits (offset 0x04).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Command: u16 {
        /// Respond to I/O space accesses.
        const IO_SPACE         = 1 << 0;
        /// Respond to memory space accesses.
        const MEMORY_SPACE     = 1 << 1;
        /// Device may act as a bus master.
        const BUS_MASTER       = 1 << 2;
        /// Monitor special cycles.
        const SPECIAL_CYCLES   = 1 << 3;
        /// Memory write and invalidate enable.
        const MWI_ENABLE       = 1 << 4;
        /// VGA palette snooping.
        const VGA_SNOOP        = 1 << 5;
        /// Respond to parity errors.
        const PARITY_RESPONSE  = 1 << 6;
        /// Drive SERR# on error.
        const SERR_ENABLE      = 1 << 8;
        /// Fast back-to-back transactions allowed.
        const FAST_BACK2BACK   = 1 << 9;
        /// Legacy INTx assertion disabled.
        const INTX_DISABLE     = 1 << 10;
    }
}

bitflags::bitflags! {
    /// Status register bits (offset 0x06).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusReg: u16 {
        /// An INTx interrupt is pending.
        const INTERRUPT        = 1 << 3;
        /// Capability list present (pointer at offset 0x34).
        const CAP_LIST         = 1 << 4;
        /// 66 MHz capable.
        const MHZ66            = 1 << 5;
        /// Fast back-to-back capable.
        const FAST_BACK2BACK   = 1 << 7;
        /// Master data parity error detected.
        const MASTER_PARITY    = 1 << 8;
        /// Signaled a target abort.
        const SIG_TARGET_ABORT = 1 << 11;
        /// Received a target abort.
        const RCV_TARGET_ABORT = 1 << 12;
        /// Received a master abort.
        const RCV_MASTER_ABORT = 1 << 13;
        /// Signaled a system error on SERR#.
        const SIG_SYSTEM_ERROR = 1 << 14;
        /// Detected a parity error.
        const PARITY_ERROR     = 1 << 15;
    }
}
