//! USB logging support for the demo firmware.

use core::cell::RefCell;

use bsp::hal::ral::usb::USB1;
use bsp::interrupt;
use cortex_m::interrupt::Mutex;
use log::LevelFilter;
use teensy4_bsp as bsp;

/// Specify any logging filters here
const FILTERS: &[bsp::usb::Filter] = &[
    // ("dacx0004", Some(LevelFilter::Info)),
];

static POLLER: Mutex<RefCell<Option<bsp::usb::Poller>>> = Mutex::new(RefCell::new(None));

/// Log over USB serial. The USB interrupt is unmasked on return.
pub fn init() -> Result<bsp::usb::Reader, bsp::usb::Error> {
    // Only main calls this, first thing, so USB1 is still free.
    let inst = USB1::take().unwrap();
    bsp::usb::init(
        inst,
        bsp::usb::LoggingConfig {
            filters: FILTERS,
            max_level: LevelFilter::Debug,
            ..Default::default()
        },
    )
    .map(|(poller, reader)| {
        setup(poller);
        reader
    })
}

fn setup(poller: bsp::usb::Poller) {
    cortex_m::interrupt::free(|cs| {
        POLLER.borrow(cs).replace(Some(poller));

        // Safety: the poller is in place before the ISR can run.
        unsafe { cortex_m::peripheral::NVIC::unmask(bsp::interrupt::USB_OTG1) };
    });
}

#[cortex_m_rt::interrupt]
fn USB_OTG1() {
    cortex_m::interrupt::free(|cs| {
        if let Some(poller) = POLLER.borrow(cs).borrow_mut().as_mut() {
            poller.poll();
        }
    });
}
