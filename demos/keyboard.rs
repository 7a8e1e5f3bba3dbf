//! # Example: keyboard
//!
//! A worker thread owns two handlers and runs the loop; the main thread reads
//! stdin and emits one event per character.
//!
//! Demonstrates how to:
//! - Register handlers of different arity on an owner thread.
//! - Emit from another thread so calls are queued for the owner's run loop.
//! - Quit on `q` or on Ctrl-C via [`looper::shutdown::quit_on_signal`].
//!
//! ## Flow
//! ```text
//! worker thread:  register("key-enter", ||) + register("key", |char|) ─► run_loop()
//! main thread:    stdin ─► emit("key-enter", ()) | emit("key", (ch,))  ─► queued
//! quit:           'q' or signal ─► quit() ─► run_loop drains and returns
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=looper=debug cargo run --example keyboard --features signals
//! ```

use std::io::Read;
use std::sync::Arc;
use std::thread;

use looper::{Dispatcher, shutdown};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Shared dispatcher
    let dispatcher = Dispatcher::builder().name("keyboard").build();

    // 2. Worker thread owns the handlers and drains the queue
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    let worker = {
        let d = Arc::clone(&dispatcher);
        thread::spawn(move || {
            d.register("key-enter", || println!("worker: Enter pressed"));
            d.register("key", |ch: char| println!("worker: pressed {ch}"));
            let _ = ready_tx.send(());
            println!("run loop started");
            let exit = d.run_loop();
            println!("run loop exited: {exit:?}");
        })
    };
    ready_rx.recv()?;

    // 3. Ctrl-C / SIGTERM also quit the loop
    tokio::spawn(shutdown::quit_on_signal(Arc::clone(&dispatcher)));

    // 4. Forward stdin until 'q' or EOF (detached: a pending read must not block exit)
    {
        let d = Arc::clone(&dispatcher);
        thread::spawn(move || {
            for byte in std::io::stdin().lock().bytes() {
                let Ok(byte) = byte else { break };
                let res = match byte as char {
                    'q' => break,
                    '\n' => d.emit("key-enter", ()),
                    ch => d.emit("key", (ch,)),
                };
                if let Err(err) = res {
                    tracing::warn!(error = %err, "emit failed");
                }
            }
            d.quit();
        });
    }

    dispatcher.quitted().await;

    tokio::task::spawn_blocking(move || worker.join())
        .await?
        .map_err(|_| "worker thread panicked")?;
    Ok(())
}
