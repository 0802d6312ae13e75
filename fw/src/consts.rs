// Copyright (c) 2022-2023 The MobileCoin Foundation

//! TKey X25519 App Constants

#![allow(unused)]

/// CPU clock frequency, used as the timer prescaler for one second ticks
pub const CPU_FREQ_HZ: u32 = 18_000_000;

/// Application RAM
pub const RAM_BASE: usize = 0x4000_0000;
pub const RAM_SIZE: usize = 0x2_0000;

/// TK1 core registers
pub mod tk1 {
    pub const LED: usize = 0xff00_0024;
    pub const APP_ADDR: usize = 0xff00_0030;
    pub const APP_SIZE: usize = 0xff00_0034;
    pub const CDI_FIRST: usize = 0xff00_0080;
    pub const CPU_MON_CTRL: usize = 0xff00_0180;
    pub const CPU_MON_FIRST: usize = 0xff00_0184;
    pub const CPU_MON_LAST: usize = 0xff00_0188;

    pub const LED_B_BIT: u32 = 0;
    pub const LED_G_BIT: u32 = 1;
    pub const LED_R_BIT: u32 = 2;
}

/// Touch sensor
pub mod touch {
    pub const STATUS: usize = 0xc400_0024;
    pub const STATUS_EVENT_BIT: u32 = 0;
}

/// Countdown timer
pub mod timer {
    pub const CTRL: usize = 0xc100_0020;
    pub const STATUS: usize = 0xc100_0024;
    pub const PRESCALER: usize = 0xc100_0028;
    pub const TIMER: usize = 0xc100_002c;

    pub const CTRL_START_BIT: u32 = 0;
    pub const CTRL_STOP_BIT: u32 = 1;
    pub const STATUS_RUNNING_BIT: u32 = 0;
}

/// UART
pub mod uart {
    pub const RX_STATUS: usize = 0xc300_0080;
    pub const RX_DATA: usize = 0xc300_0084;
    pub const TX_STATUS: usize = 0xc300_0100;
    pub const TX_DATA: usize = 0xc300_0104;
}

/// QEMU debug output port
pub const QEMU_DEBUG: usize = 0xfe00_1000;
