// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Touch confirmation
//!
//! A bounded wait for physical presence: any stale event is cleared, the
//! countdown timer armed, and the indicator blinked while polling for
//! either timer expiry or a new touch event.

use strum::{Display, EnumIter};

use crate::engine::{Driver, Led};

/// Touch confirmation state
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum TouchState {
    /// Awaiting touch
    Waiting,
    /// Touch received within the timeout window
    Confirmed,
    /// Timer elapsed without touch
    TimedOut,
}

/// Touch confirmation configuration
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TouchConfig {
    /// Timeout window in seconds
    pub timeout_s: u32,
    /// Indicator colour while waiting
    pub led: Led,
    /// Poll iterations per indicator toggle
    pub blink_polls: u32,
}

impl TouchConfig {
    pub const DEFAULT: Self = Self {
        timeout_s: 10,
        led: Led::IDLE,
        blink_polls: 350_000,
    };
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Touch confirmation context
#[derive(Debug)]
pub struct Touch {
    cfg: TouchConfig,
    lit: bool,
    state: TouchState,
}

impl Touch {
    /// Start touch confirmation, clearing any stray event and arming the timer
    pub fn start<DRV: Driver>(drv: &DRV, cfg: &TouchConfig) -> Self {
        drv.touch_clear();
        drv.timer_start(cfg.timeout_s);

        #[cfg(feature = "log")]
        log::debug!("awaiting touch ({}s)", cfg.timeout_s);

        Self {
            cfg: *cfg,
            lit: false,
            state: TouchState::Waiting,
        }
    }

    /// Fetch current state
    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Run one blink period, toggling the indicator then polling
    /// for timeout or touch
    pub fn step<DRV: Driver>(&mut self, drv: &DRV) -> TouchState {
        if self.state != TouchState::Waiting {
            return self.state;
        }

        self.lit = !self.lit;
        drv.set_led(match self.lit {
            true => self.cfg.led,
            false => Led::empty(),
        });

        for _ in 0..self.cfg.blink_polls.max(1) {
            // Expiry takes precedence over a simultaneous touch
            if drv.timer_expired() {
                self.state = TouchState::TimedOut;
                break;
            }

            if drv.touch_event() {
                drv.touch_clear();
                self.state = TouchState::Confirmed;
                break;
            }
        }

        if self.state != TouchState::Waiting {
            drv.set_led(Led::empty());

            #[cfg(feature = "log")]
            log::debug!("touch {}", self.state);
        }

        self.state
    }
}

/// Wait for touch confirmation, returning [TouchState::Confirmed]
/// or [TouchState::TimedOut]
#[cfg_attr(feature = "noinline", inline(never))]
pub fn wait_touch<DRV: Driver>(drv: &DRV, cfg: &TouchConfig) -> TouchState {
    let mut t = Touch::start(drv, cfg);

    loop {
        match t.step(drv) {
            TouchState::Waiting => continue,
            s => return s,
        }
    }
}
