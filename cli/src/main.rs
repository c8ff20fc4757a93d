use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::sync::Arc;
use strum::IntoEnumIterator;
use vsl_types::{ControlKind, LogicalControl};
use vsl_usb::device::base::ControlTransport;
use vsl_usb::device::simulated::SimulatedDevice;
use vsl_usb::device::{find_devices, AudioBoxUSB};
use vsl_usb::initialiser::init_controls;
use vsl_usb::mixer::{Change, ElemType, ElemValue};
use vsl_usb::registry::Mixer;
use vsl_usb::transaction::ControlRequests;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

mod cli;
mod settings;

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    CombinedLogger::init(vec![TermLogger::new(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .context("Could not configure the logger")?;

    let settings = Settings::read(&args.config)?;
    debug!("Loaded settings: {:?}", settings);

    if let Command::Devices = args.command {
        return list_devices(&settings);
    }

    if args.simulate {
        info!("Using a simulated AudioBox");
        let device = Arc::new(SimulatedDevice::new(settings.interface));
        return run(device, &settings, &args.command);
    }

    let found = find_devices(settings.vendor_id, settings.product_id);
    let location = match found.as_slice() {
        [] => bail!(
            "No AudioBox found ({:04x}:{:04x})",
            settings.vendor_id,
            settings.product_id
        ),
        [device] => device.clone(),
        [device, ..] => {
            info!("{} devices found, using the first", found.len());
            device.clone()
        }
    };

    let device = AudioBoxUSB::from_device(location, &settings.attach_options())
        .context("Unable to attach to the AudioBox")?;
    run(Arc::new(device), &settings, &args.command)
}

fn list_devices(settings: &Settings) -> Result<()> {
    let found = find_devices(settings.vendor_id, settings.product_id);
    if found.is_empty() {
        println!("No devices found");
    }
    for device in found {
        println!(
            "Bus {:03} Device {:03}: {:04x}:{:04x}",
            device.bus_number(),
            device.address(),
            settings.vendor_id,
            settings.product_id
        );
    }
    Ok(())
}

fn run<T: ControlTransport>(device: Arc<T>, settings: &Settings, command: &Command) -> Result<()> {
    let mut mixer: Mixer<T> = Mixer::new();
    init_controls(&mut mixer, ControlRequests::new(&device), settings.units())
        .context("Unable to register the AudioBox controls")?;

    match command {
        Command::Devices => {}
        Command::List => {
            for control in LogicalControl::iter() {
                let info = mixer.info(control.name())?;
                let values = mixer.read(control.name())?;
                match info.elem_type {
                    ElemType::Integer => println!(
                        "{}: {} (min {}, max {}, step {})",
                        control.name(),
                        format_values(control.kind(), &values),
                        info.min,
                        info.max,
                        info.step
                    ),
                    ElemType::Boolean => println!(
                        "{}: {}",
                        control.name(),
                        format_values(control.kind(), &values)
                    ),
                }
            }
        }
        Command::Get { control } => {
            let values = mixer.read(control.name())?;
            println!("{}", format_values(control.kind(), &values));
        }
        Command::Set { control, values } => {
            let values = parse_values(control.kind(), values)?;
            if mixer.write(control.name(), &ElemValue::from(values))? == Change::Changed {
                info!("{} updated", control.name());
            }
            let values = mixer.read(control.name())?;
            println!("{}", format_values(control.kind(), &values));
        }
    }
    Ok(())
}

fn format_values(kind: ControlKind, values: &[i32]) -> String {
    match kind {
        ControlKind::Volume => values
            .iter()
            .map(|value| format!("{:.2} dB", *value as f64 / 100.0))
            .collect::<Vec<String>>()
            .join(", "),
        ControlKind::Mute => match values.first() {
            Some(0) => String::from("off"),
            _ => String::from("on"),
        },
    }
}

fn parse_values(kind: ControlKind, values: &[String]) -> Result<Vec<i32>> {
    match kind {
        ControlKind::Volume => {
            let gains = values
                .iter()
                .map(|value| {
                    value
                        .parse::<i32>()
                        .with_context(|| format!("'{}' is not a gain in 1/100 dB", value))
                })
                .collect::<Result<Vec<i32>>>()?;
            match gains.as_slice() {
                [both] => Ok(vec![*both, *both]),
                [left, right] => Ok(vec![*left, *right]),
                _ => bail!("Volumes take one or two values"),
            }
        }
        ControlKind::Mute => match values {
            [value] => match value.to_lowercase().as_str() {
                "on" | "1" | "true" => Ok(vec![1]),
                "off" | "0" | "false" => Ok(vec![0]),
                _ => Err(anyhow!("'{}' is not on or off", value)),
            },
            _ => bail!("Switches take a single value"),
        },
    }
}
