use clap::{Parser, Subcommand};
use ds1820::{HubConfig, Role, SensorHub, SensorRegistry};
use onewire_gpio::BitBangBuilder;
use std::{thread, time::Duration};

mod delay;
mod line;

use delay::SpinDelay;
use line::SysfsLine;

/// Reads the brewery's DS1820 thermometers over a bit-banged 1-Wire GPIO line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Sysfs GPIO number of the 1-Wire data line
    #[arg(short, long)]
    gpio: u64,
    /// Wait between starting a conversion and reading it, in ms (at least 750)
    #[arg(long, default_value_t = 1000)]
    conversion_ms: u32,
    /// Pause between two sampling cycles, in ms
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Sample every assigned sensor periodically
    Monitor {
        /// Stop after this many cycles
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Read the identity of the only sensor on the bus
    Discover {
        /// Bind the sensor to a role and read it
        #[arg(long)]
        assign: Option<Role>,
    },
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Claim the data line
    let line = SysfsLine::new(args.gpio).expect("Failed to export GPIO");
    let master = BitBangBuilder::default()
        .build(line, SpinDelay)
        .expect("Failed to set up the 1-Wire master");
    let config = HubConfig::default().with_conversion_ms(args.conversion_ms);
    let mut hub = SensorHub::new(
        master,
        linux_embedded_hal::Delay,
        SensorRegistry::default(),
        config,
    );
    hub.start().expect("No sensor on the 1-Wire bus");

    match args.command {
        Command::Monitor { cycles } => {
            let mut done = 0;
            loop {
                if let Err(e) = hub.sample() {
                    log::error!("Sampling cycle failed: {e:?}");
                }
                for role in Role::ALL {
                    log::info!("{role:>8}: {}", hub.reading(role));
                }
                done += 1;
                if cycles.is_some_and(|n| done >= n) {
                    break;
                }
                thread::sleep(Duration::from_millis(args.interval_ms));
            }
        }
        Command::Discover { assign } => {
            let rom = hub.begin_discovery().expect("Failed to read the sensor identity");
            log::info!("ROM: {rom}");
            match hub.read_discovered() {
                Ok(t) => log::info!("Current scratchpad: {t} °C"),
                Err(e) => log::error!("Failed to read the sensor: {e:?}"),
            }
            if let Some(role) = assign {
                hub.assign(role, rom).expect("Refusing to assign");
                hub.sample().expect("Sampling cycle failed");
                log::info!("{role}: {}", hub.reading(role));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_discover_with_role() {
        let args = Args::try_parse_from(["brewctl", "--gpio", "4", "discover", "--assign", "mash"]).unwrap();
        assert_eq!(args.gpio, 4);
        assert_eq!(args.conversion_ms, 1000);
        assert_eq!(args.command, Command::Discover { assign: Some(Role::Mash) });
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Args::try_parse_from(["brewctl", "-g", "4", "discover", "--assign", "kettle"]).is_err());
    }

    #[test]
    fn parses_monitor() {
        let args = Args::try_parse_from(["brewctl", "-g", "17", "--interval-ms", "5000", "monitor", "--cycles", "3"]).unwrap();
        assert_eq!(args.interval_ms, 5000);
        assert_eq!(args.command, Command::Monitor { cycles: Some(3) });
    }
}
