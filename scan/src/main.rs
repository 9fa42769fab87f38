use anyhow::{Context, Result};
use clap::Parser;
use deckhand_types::ControllerModel;
use deckhand_usb::devices::supported_matchers;
use deckhand_usb::matcher::InterfaceClaim;
use deckhand_usb::resolver::{enumerate_devices, ClaimResolver, EnumeratedDevice, ResolvedClaim};
use log::info;
use serde::Serialize;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

use crate::cli::{Cli, LevelFilter};

mod cli;

#[derive(Debug, Serialize)]
struct ClaimReport<'a> {
    model: String,
    device: &'a EnumeratedDevice,
    interfaces: &'a [InterfaceClaim],
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    CombinedLogger::init(vec![TermLogger::new(
        match args.log_level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        },
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .context("Could not configure the logger")?;

    let known = supported_matchers();
    let mut resolver = ClaimResolver::new();
    for (_, matcher) in &known {
        resolver.register(matcher);
    }

    let devices = enumerate_devices().context("Could not enumerate USB devices")?;
    info!("Checking {} connected USB devices", devices.len());

    // Resolve each connected device on its own, so every supported surface is
    // reported rather than just the highest-priority one.
    let mut found: Vec<(ControllerModel, ResolvedClaim)> = Vec::new();
    for device in &devices {
        if let Ok(resolved) = resolver.resolve(std::slice::from_ref(device)) {
            let model = known
                .iter()
                .find(|(_, matcher)| matcher.identity() == resolved.matcher().identity())
                .map(|(model, _)| *model);
            if let Some(model) = model {
                found.push((model, resolved));
            }
        }
    }

    if args.json {
        let reports: Vec<ClaimReport> = found
            .iter()
            .map(|(model, resolved)| ClaimReport {
                model: model.to_string(),
                device: resolved.device(),
                interfaces: resolved.interface_claims(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No supported control surfaces found.");
        return Ok(());
    }

    for (model, resolved) in &found {
        let device = resolved.device();
        println!(
            "{} ({}) on bus {:03} address {:03}",
            model,
            device.identity(),
            device.bus_number(),
            device.address()
        );
        for claim in resolved.interface_claims() {
            let endpoints = claim
                .endpoint_addresses()
                .iter()
                .map(|endpoint| format!("{endpoint:#04x}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  interface {:#04x}: endpoints [{endpoints}]",
                claim.interface_number()
            );
        }
    }

    Ok(())
}
