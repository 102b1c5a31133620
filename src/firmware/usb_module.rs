//! USB Module
//!
//! Status lines go out over a USB CDC serial port. The stack lives in
//! `critical_section` protected globals and is serviced from `USBCTRL_IRQ`,
//! so enumeration keeps working while the main loop blocks on the buzzer or
//! the joystick settle delay.

use core::cell::RefCell;
use critical_section::Mutex;
use usb_device::prelude::*;
use usbd_serial::SerialPort;

use rp235x_hal as hal;
use hal::pac;

use rp235x_hal::pac::interrupt;

use pomodoro_pico::countdown::CountdownSnapshot;
use pomodoro_pico::view;

type UsbBusType = hal::usb::UsbBus;

static USB_DEVICE: Mutex<RefCell<Option<UsbDevice<UsbBusType>>>> = Mutex::new(RefCell::new(None));
static USB_SERIAL: Mutex<RefCell<Option<SerialPort<UsbBusType>>>> = Mutex::new(RefCell::new(None));

/// Initialize USB Serial and enable the USB interrupt.
pub fn init(
    usb_periph: pac::USB,
    usb_dpram: pac::USB_DPRAM,
    usb_clock: hal::clocks::UsbClock,
    resets: &mut pac::RESETS,
) {
    let usb_bus = hal::usb::UsbBus::new(
        usb_periph,
        usb_dpram,
        usb_clock,
        true,
        resets,
    );

    // The allocator must outlive the device, so it is parked in a static.
    static mut USB_BUS: Option<usb_device::bus::UsbBusAllocator<hal::usb::UsbBus>> = None;

    // Safety: called once during bring-up, before the USB interrupt is unmasked.
    let bus_allocator = unsafe {
        let bus_ptr = core::ptr::addr_of_mut!(USB_BUS);
        *bus_ptr = Some(usb_device::bus::UsbBusAllocator::new(usb_bus));
        (*bus_ptr).as_ref().unwrap()
    };

    let serial = SerialPort::new(bus_allocator);
    let usb_dev = UsbDeviceBuilder::new(bus_allocator, UsbVidPid(0x16c0, 0x27dd))
        .strings(&[StringDescriptors::default()
            .manufacturer("Raspberry Pi")
            .product("Pico 2 Pomodoro Timer")
            .serial_number("POMO001")])
        .unwrap()
        .device_class(usbd_serial::USB_CLASS_CDC)
        .build();

    critical_section::with(|cs| {
        USB_DEVICE.borrow_ref_mut(cs).replace(usb_dev);
        USB_SERIAL.borrow_ref_mut(cs).replace(serial);
    });

    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
    }
}

/// Writes the one-line status report for `snapshot`; dropped if no host is listening.
pub fn write_status(snapshot: &CountdownSnapshot) {
    let mut line = view::status_line(snapshot);
    if line.push_str("\r\n").is_err() {
        return;
    }
    critical_section::with(|cs| {
        if let Some(serial) = USB_SERIAL.borrow_ref_mut(cs).as_mut() {
            let _ = serial.write(line.as_bytes());
        }
    });
}

#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    critical_section::with(|cs| {
        let mut dev = USB_DEVICE.borrow_ref_mut(cs);
        let mut serial = USB_SERIAL.borrow_ref_mut(cs);

        if let (Some(dev), Some(serial)) = (dev.as_mut(), serial.as_mut()) {
            // Host input is ignored
            if dev.poll(&mut [serial]) {
                let _ = serial.read(&mut [0u8; 64]);
            }
        }
    });
}
