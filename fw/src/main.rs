// Copyright (c) 2022-2023 The MobileCoin Foundation

#![no_std]
#![no_main]

extern crate rlibc;

use core::arch::global_asm;

use tkey_x25519_core::{
    dispatch::Dispatcher,
    engine::{Driver, Engine, Led},
};

mod consts;

mod platform;
use platform::*;

#[cfg(feature = "qemu-debug")]
mod debug;

// Startup: clear registers and bss, set the stack then jump to main
global_asm!(
    r#"
    .section .text.init
    .global _start
_start:
    li x1, 0
    li x2, 0
    li x3, 0
    li x4, 0
    li x5, 0
    li x6, 0
    li x7, 0
    li x8, 0
    li x9, 0
    li x10, 0
    li x11, 0
    li x12, 0
    li x13, 0
    li x14, 0
    li x15, 0
    la sp, _stack_start
    la a0, _sbss
    la a1, _ebss
1:
    bgeu a0, a1, 2f
    sw zero, 0(a0)
    addi a0, a0, 4
    j 1b
2:
    call main
3:
    j 3b
"#
);

#[no_mangle]
extern "C" fn main() -> ! {
    #[cfg(feature = "qemu-debug")]
    debug::init(log::LevelFilter::Debug);

    // Use execution monitor on RAM after app
    cpu_monitor_init();

    let engine = Engine::new(TkeyDriver {});
    let mut dispatcher = Dispatcher::new(engine, Uart {});

    #[cfg(feature = "qemu-debug")]
    log::info!(
        "x25519 app v{} ready",
        tkey_x25519_proto::name_version::APP_VERSION
    );

    loop {
        match dispatcher.poll() {
            Ok(_code) => {
                #[cfg(feature = "qemu-debug")]
                log::debug!("sent {}", _code);
            }
            Err(_e) => {
                #[cfg(feature = "qemu-debug")]
                log::warn!("request dropped: {:?}", _e);
            }
        }
    }
}

/// Show a steady red LED and halt
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    TkeyDriver {}.set_led(Led::RED);

    #[allow(clippy::empty_loop)]
    loop {}
}
