// Copyright (c) 2022-2023 The MobileCoin Foundation

use std::{
    io::BufRead,
    net::{SocketAddr, TcpListener},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

use clap::Parser;
use log::{debug, info, LevelFilter};
use tokio::sync::oneshot;

use tkey_x25519_core::{secret::CDI_LEN, touch::TouchConfig};
use tkey_x25519_sim::*;

/// TKey X25519 application simulator
///
/// This serves the X25519 device application over TCP using simulated
/// hardware, so host tooling can be exercised without a TKey.
#[derive(Clone, Debug, PartialEq, Parser)]
pub struct Args {
    /// Address to listen on
    #[clap(long, env = "TKEY_SIM_LISTEN", default_value = "127.0.0.1:7701")]
    listen: SocketAddr,

    /// Device CDI (hex encoded, random if not provided)
    #[clap(long, env = "TKEY_SIM_CDI", value_parser = parse_cdi)]
    cdi: Option<[u8; CDI_LEN]>,

    /// Presence source for touch confirmation
    #[clap(long, value_enum, default_value = "auto")]
    touch: TouchMode,

    /// Touch confirmation timeout
    #[clap(long, default_value = "10")]
    touch_timeout_s: u32,

    /// Log level
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging
    let _ = simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default());

    // Setup simulated device
    let cdi = args.cdi.unwrap_or_else(rand::random);
    info!("cdi: {}", hex::encode(cdi));

    let drv = SimDriver::new(cdi, args.touch);

    if args.touch == TouchMode::Stdin {
        let p = drv.presence();
        thread::spawn(move || touch_stdin(p));
    }

    let touch = TouchConfig {
        timeout_s: args.touch_timeout_s,
        ..SIM_TOUCH
    };

    let listener = TcpListener::bind(args.listen)?;
    info!("listening on {} (touch: {})", listener.local_addr()?, args.touch);

    // Run blocking server on a dedicated thread
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        let r = serve(&listener, &drv, &touch);
        let _ = tx.send(r);
    });

    // Await server exit or exit signal
    tokio::select!(
        r = rx => {
            r??;
        }
        _ = tokio::signal::ctrl_c() => {
            debug!("Exit!");
        },
    );

    Ok(())
}

/// Signal presence on each line read from stdin
fn touch_stdin(presence: Arc<AtomicBool>) {
    info!("press enter to touch");

    for l in std::io::stdin().lock().lines() {
        if l.is_err() {
            break;
        }

        info!("touch!");
        presence.store(true, Ordering::SeqCst);
    }
}
