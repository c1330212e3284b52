//! Device Lifecycle Walkthrough
//!
//! Drives a device with command names from the command line and prints the
//! state after each one, then snapshots and restores the device.
//!
//! With no arguments a full cycle plus one out-of-order command is used.
//!
//! Run with: RUST_LOG=debug cargo run --example lifecycle -- receive_command reset

use anyhow::Context;
use device_lifecycle::{Command, Device, DeviceSnapshot};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let commands: Vec<Command> = if args.is_empty() {
        vec![
            Command::ReceiveCommand,
            Command::CompleteTask,
            Command::ProcessCommand,
            Command::CompleteTask,
            Command::Reset,
        ]
    } else {
        args.iter()
            .map(|arg| arg.parse::<Command>())
            .collect::<Result<_, _>>()
            .context("invalid command on the command line")?
    };

    let mut device = Device::builder().label("gpu0").history_capacity(16).build()?;
    println!("=== Device Lifecycle ===\n");
    println!("{:<16} {:<10} -> state", "command", "result");

    for command in commands {
        let outcome = device.apply(command);
        let result = if outcome.is_transitioned() {
            "applied"
        } else {
            "ignored"
        };
        println!("{:<16} {:<10} -> {}", command, result, device.current_state());
    }

    let json = device.snapshot().to_json()?;
    println!("\nSnapshot:\n{json}");

    let restored = Device::restore(DeviceSnapshot::from_json(&json)?)?;
    println!(
        "\nRestored '{}' in state {} (next available: {})",
        restored.label(),
        restored.current_state(),
        restored.available_command()
    );

    Ok(())
}
