//! Shared test fixtures: an in-memory configuration-space substrate.

use std::cell::RefCell;

use pcicfg::{ConfigBackend, PciAddress, PciError, Result, Width};

/// An in-memory substrate: a table of functions, each carrying a 256-byte
/// register file with plain read/write semantics. Locators without a slot
/// behave as absent devices, the way a real bus answers a probe of an
/// empty slot.
pub struct MemBackend {
    slots: RefCell<Vec<(PciAddress, [u8; 256])>>,
    max_bus: u8,
}

impl MemBackend {
    /// An empty bus.
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            max_bus: 0xFF,
        }
    }

    /// A bus holding one Intel host bridge at 00:00.0.
    pub fn with_host_bridge() -> Self {
        let backend = Self::new();
        backend.add_device(PciAddress::new(0, 0, 0), 0x8086, 0x29C0);
        backend
    }

    /// Add a function with the given IDs; every other register starts zero.
    pub fn add_device(&self, addr: PciAddress, vendor: u16, device: u16) {
        let mut regs = [0u8; 256];
        regs[0..2].copy_from_slice(&vendor.to_le_bytes());
        regs[2..4].copy_from_slice(&device.to_le_bytes());
        self.slots.borrow_mut().push((addr, regs));
    }

    /// Cap the reported bus range.
    pub fn set_max_bus(&mut self, max_bus: u8) {
        self.max_bus = max_bus;
    }
}

impl ConfigBackend for MemBackend {
    fn read(&self, addr: PciAddress, offset: u16, width: Width) -> Result<u32> {
        // Same caller contract the real backends enforce through the codec
        assert_eq!(offset % width.bytes(), 0, "misaligned access in fixture");
        assert!(offset < 256, "offset beyond fixture register file");

        let slots = self.slots.borrow();
        let (_, regs) = slots
            .iter()
            .find(|(a, _)| *a == addr)
            .ok_or(PciError::NoDevice)?;
        let at = offset as usize;
        let value = match width {
            Width::Byte => regs[at] as u32,
            Width::Word => u16::from_le_bytes([regs[at], regs[at + 1]]) as u32,
            Width::Dword => {
                u32::from_le_bytes([regs[at], regs[at + 1], regs[at + 2], regs[at + 3]])
            }
        };
        Ok(value)
    }

    fn write(&self, addr: PciAddress, offset: u16, width: Width, value: u32) -> Result<()> {
        assert_eq!(offset % width.bytes(), 0, "misaligned access in fixture");
        assert!(offset < 256, "offset beyond fixture register file");

        let mut slots = self.slots.borrow_mut();
        let (_, regs) = slots
            .iter_mut()
            .find(|(a, _)| *a == addr)
            .ok_or(PciError::NoDevice)?;
        let at = offset as usize;
        match width {
            Width::Byte => regs[at] = value as u8,
            Width::Word => regs[at..at + 2].copy_from_slice(&(value as u16).to_le_bytes()),
            Width::Dword => regs[at..at + 4].copy_from_slice(&value.to_le_bytes()),
        }
        Ok(())
    }

    fn max_bus(&self) -> u8 {
        self.max_bus
    }

    fn name(&self) -> &'static str {
        "memory fixture"
    }
}
