use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use autoclick::{Args, AutoClicker};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let default = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_writer(Arc::new(file)).with_ansi(false).init();
        }
        None => builder.init(),
    }
    Ok(())
}

fn install_interrupt_flag() -> Result<Arc<AtomicBool>, std::io::Error> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&flag))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&flag))?;
    Ok(flag)
}

fn main() {
    let args = Args::parse();

    if let Err(err) = init_logging(&args) {
        eprintln!("❌ Failed to set up logging: {err}");
        std::process::exit(1);
    }

    let settings = match args.resolve() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("❌ Error loading configuration: {err:#}");
            std::process::exit(1);
        }
    };

    let interrupt = match install_interrupt_flag() {
        Ok(flag) => flag,
        Err(err) => {
            eprintln!("❌ Failed to install signal handler: {err}");
            std::process::exit(1);
        }
    };

    let mut clicker = match AutoClicker::open(settings, interrupt) {
        Ok(clicker) => clicker,
        Err(err) => {
            eprintln!("❌ Cannot reach the pointer device: {err}");
            std::process::exit(1);
        }
    };

    match clicker.run() {
        Ok(outcome) => {
            println!("\n{}", outcome.message());
            info!(?outcome, "session finished");
        }
        Err(err) => {
            error!(%err, "pointer backend failure");
            eprintln!("❌ Clicking failed: {err}");
            std::process::exit(1);
        }
    }
}
