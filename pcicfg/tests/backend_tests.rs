//! Memory-mapped backend exercised end to end through the access front end

use pcicfg::codec;
use pcicfg::regs::offset;
use pcicfg::{ConfigSpace, EcamBackend, PciAddress, PciError, Width};

/// RAM standing in for a mapped ECAM region, u32-backed so every lane the
/// codec can produce is properly aligned.
fn window(buses: usize) -> Vec<u32> {
    vec![0u32; buses << 18]
}

fn preload_dword(window: &mut [u32], addr: PciAddress, offset: u16, value: u32) {
    let at = codec::ecam_offset(addr, offset, Width::Dword) / 4;
    window[at] = value;
}

#[test]
fn test_ecam_vendor_probe_through_facade() {
    let mut ram = window(4);
    let device = PciAddress::new(2, 1, 0);
    preload_dword(&mut ram, device, 0x00, 0x29C0_8086);

    let backend = unsafe { EcamBackend::with_bus_range(ram.as_mut_ptr() as *mut u8, 0, 3) };
    let pci = ConfigSpace::new(backend);

    assert_eq!(pci.read_word(device, offset::VENDOR_ID), Ok(0x8086));
    assert_eq!(pci.read_word(device, offset::DEVICE_ID), Ok(0x29C0));
    assert_eq!(pci.read_dword(device, offset::VENDOR_ID), Ok(0x29C0_8086));
}

#[test]
fn test_ecam_command_write_through_facade() {
    let mut ram = window(1);
    let device = PciAddress::new(0, 3, 0);

    let backend = unsafe { EcamBackend::with_bus_range(ram.as_mut_ptr() as *mut u8, 0, 0) };
    let pci = ConfigSpace::new(backend);

    pci.write_word(device, offset::COMMAND, 0x0007)
        .expect("write inside the window should succeed");
    assert_eq!(pci.read_word(device, offset::COMMAND), Ok(0x0007));

    // The neighboring status word shares the dword and must stay untouched
    assert_eq!(pci.read_word(device, offset::STATUS), Ok(0x0000));
}

#[test]
fn test_ecam_bus_beyond_window() {
    let mut ram = window(4);
    let backend = unsafe { EcamBackend::with_bus_range(ram.as_mut_ptr() as *mut u8, 0, 3) };
    let pci = ConfigSpace::new(backend);

    assert_eq!(
        pci.read_word(PciAddress::new(9, 0, 0), offset::VENDOR_ID),
        Err(PciError::NoDevice),
        "A bus the window cannot reach holds no devices"
    );
    assert_eq!(pci.max_bus(), 3, "Bus limit should follow the window");
}

#[test]
fn test_ecam_window_with_nonzero_start_bus() {
    let mut ram = window(2);
    let backend = unsafe { EcamBackend::with_bus_range(ram.as_mut_ptr() as *mut u8, 2, 3) };
    let pci = ConfigSpace::new(backend);

    let on_window = PciAddress::new(2, 0, 0);
    pci.write_dword(on_window, offset::BAR0, 0xFEBC_0000).unwrap();
    assert_eq!(pci.read_dword(on_window, offset::BAR0), Ok(0xFEBC_0000));

    // Buses below the window's first bus are as unreachable as ones above
    assert_eq!(
        pci.read_word(PciAddress::new(0, 0, 0), offset::VENDOR_ID),
        Err(PciError::NoDevice)
    );
}

#[test]
fn test_ecam_reaches_extended_config_space() {
    let mut ram = window(1);
    let device = PciAddress::new(0, 0, 0);

    let backend = unsafe { EcamBackend::with_bus_range(ram.as_mut_ptr() as *mut u8, 0, 0) };
    let pci = ConfigSpace::new(backend);

    // A PCIe extended capability header beyond the legacy 256-byte limit
    pci.write_dword(device, 0x100, 0x1402_0001).unwrap();
    assert_eq!(pci.read_dword(device, 0x100), Ok(0x1402_0001));
    assert_eq!(pci.read_word(device, 0x100), Ok(0x0001));
}
