// Copyright (c) 2022-2023 The MobileCoin Foundation

//! QEMU debug port logger

use core::{fmt::Write, ptr::write_volatile};

use log::{LevelFilter, Log, Metadata, Record};

use crate::consts::QEMU_DEBUG;

struct QemuPort;

impl Write for QemuPort {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            // SAFETY: debug port is a fixed MMIO register
            unsafe { write_volatile(QEMU_DEBUG as *mut u8, b) };
        }
        Ok(())
    }
}

struct QemuLogger;

impl Log for QemuLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let _ = writeln!(QemuPort, "{} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: QemuLogger = QemuLogger;

/// Install the QEMU debug logger
pub fn init(level: LevelFilter) {
    // SAFETY: called once at startup, prior to any logging, with a single hart
    unsafe {
        let _ = log::set_logger_racy(&LOGGER);
        log::set_max_level_racy(level);
    }
}
