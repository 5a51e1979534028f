//! Teensy 4.0 demo. Ramps channel A of a DAC80004 and steps the other three.
//!
//! Wiring:
//!
//! * p10 - SYNC (LPSPI4 hardware chip select)
//! * p11 - SDIN
//! * p13 - SCLK
//! * p8  - CLR
//! * p9  - LDAC

#![no_std]
#![no_main]

#[macro_use]
extern crate log;

use bsp::hal::ccm;
use dacx0004::{Address, Command, Dacx0004, Interface, ShiftRegister, SpiInterface, Variant};
use imxrt_hal::gpio::GPIO;
use teensy4_bsp as bsp;

mod logging;

/// The DACx0004 wants SCLK idle high, data sampled on the falling edge.
const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_2;

#[cortex_m_rt::entry]
fn main() -> ! {
    assert!(logging::init().is_ok());

    let mut p = bsp::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();
    let mut systick = bsp::SysTick::new(cp.SYST);

    // Wait so we don't miss the first log message, crashes etc.
    systick.delay(1000);

    let pins = bsp::t40::into_pins(p.iomuxc);

    let (_, _, _, spi4_builder) = p.spi.clock(
        &mut p.ccm.handle,
        ccm::spi::ClockSelect::Pll2,
        ccm::spi::PrescalarSelect::LPSPI_PODF_5,
    );

    let mut spi4 = spi4_builder.build(pins.p11, pins.p12, pins.p13);
    spi4.set_mode(SPI_MODE).unwrap();
    // Datasheet allows 50MHz, keep it modest for flying wires.
    spi4.set_clock_speed(bsp::hal::spi::ClockSpeed(4_000_000))
        .unwrap();
    spi4.enable_chip_select_0(pins.p10);

    let clr = GPIO::new(pins.p8).output();
    let ldac = GPIO::new(pins.p9).output();

    let iface = SpiInterface::builder(spi4).ldac(ldac).clr(clr).build();

    let mut dac = Dacx0004::init(Variant::Dac80004, iface).unwrap();
    dac.software_reset().unwrap();
    systick.delay(1);

    // Park B, C and D at quarter, half and three quarter scale in one transfer.
    let mut buf = [0_u8; 12];
    for (i, addr) in [Address::B, Address::C, Address::D].iter().enumerate() {
        let sr = ShiftRegister::new(Command::WriteBuffer)
            .address(*addr)
            .data(0x4000 * (i as u16 + 1));
        dac.format(&sr, &mut buf[i * 4..(i + 1) * 4]);
    }
    dac.interface_mut().shift(&buf).unwrap();
    dac.update(Address::All).unwrap();

    info!("Ramping channel A");

    let mut value = 0_u16;

    loop {
        dac.write_update(Address::A, value).unwrap();
        value = value.wrapping_add(0x100);

        if value == 0 {
            debug!("ramp wrapped");
        }

        systick.delay(1);
    }
}

#[panic_handler]
fn panic(p: &core::panic::PanicInfo) -> ! {
    error!("{:?}", p);
    loop {}
}
