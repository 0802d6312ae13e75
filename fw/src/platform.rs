// Copyright (c) 2022-2023 The MobileCoin Foundation

//! TKey Platform Support

use core::{
    convert::Infallible,
    ptr::{read_volatile, write_volatile},
};

use tkey_x25519_core::{
    engine::{Driver, Led},
    io::Io,
    secret::CDI_WORDS,
};

use crate::consts::*;

// LED flags map directly to register bits
const _: () = assert!(Led::BLUE.bits() == 1 << tk1::LED_B_BIT);
const _: () = assert!(Led::GREEN.bits() == 1 << tk1::LED_G_BIT);
const _: () = assert!(Led::RED.bits() == 1 << tk1::LED_R_BIT);

#[inline(always)]
fn reg_read(addr: usize) -> u32 {
    // SAFETY: fixed, aligned MMIO register addresses
    unsafe { read_volatile(addr as *const u32) }
}

#[inline(always)]
fn reg_write(addr: usize, v: u32) {
    // SAFETY: fixed, aligned MMIO register addresses
    unsafe { write_volatile(addr as *mut u32, v) }
}

/// TKey hardware driver
pub struct TkeyDriver {}

impl Driver for TkeyDriver {
    /// CDI must be read word-by-word
    fn read_cdi(&self, words: &mut [u32; CDI_WORDS]) {
        for (i, w) in words.iter_mut().enumerate() {
            *w = reg_read(tk1::CDI_FIRST + i * 4);
        }
    }

    fn set_led(&self, led: Led) {
        reg_write(tk1::LED, led.bits());
    }

    fn touch_event(&self) -> bool {
        reg_read(touch::STATUS) & (1 << touch::STATUS_EVENT_BIT) != 0
    }

    /// Any write acknowledges the touch event
    fn touch_clear(&self) {
        reg_write(touch::STATUS, 0);
    }

    fn timer_start(&self, timeout_s: u32) {
        reg_write(timer::CTRL, 1 << timer::CTRL_STOP_BIT);

        // Prescale to one tick per second
        reg_write(timer::PRESCALER, CPU_FREQ_HZ);
        reg_write(timer::TIMER, timeout_s);

        reg_write(timer::CTRL, 1 << timer::CTRL_START_BIT);
    }

    /// Timer stops running once the countdown reaches zero
    fn timer_expired(&self) -> bool {
        reg_read(timer::STATUS) & (1 << timer::STATUS_RUNNING_BIT) == 0
    }
}

/// Blocking UART transport
pub struct Uart {}

impl Io for Uart {
    type Error = Infallible;

    fn read(&mut self, buff: &mut [u8]) -> Result<(), Self::Error> {
        for b in buff.iter_mut() {
            while reg_read(uart::RX_STATUS) & 1 == 0 {}

            *b = reg_read(uart::RX_DATA) as u8;
        }

        Ok(())
    }

    fn write(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        for b in buff {
            while reg_read(uart::TX_STATUS) & 1 == 0 {}

            reg_write(uart::TX_DATA, *b as u32);
        }

        Ok(())
    }
}

/// Enable the CPU execution monitor over RAM above the loaded application,
/// trapping on any attempt to execute data or stack
pub fn cpu_monitor_init() {
    let first = reg_read(tk1::APP_ADDR).wrapping_add(reg_read(tk1::APP_SIZE));

    reg_write(tk1::CPU_MON_FIRST, first);
    reg_write(tk1::CPU_MON_LAST, (RAM_BASE + RAM_SIZE) as u32);
    reg_write(tk1::CPU_MON_CTRL, 1);
}
