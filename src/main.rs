mod api;
mod config;
mod menu;
mod models;
mod simulation;
mod utils;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use tokio_util::sync::CancellationToken;

use api::ApiClient;
use config::SimulatorConfig;
use menu::{prompt_mode, MenuError, Mode};
use models::Reading;
use simulation::{ReadingGenerator, Simulator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    info!("Elderly Care Home - IoT Sensor Simulator");

    // Load configuration
    let config = match SimulatorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Authenticate once before any readings are sent
    let client = ApiClient::new(config.api_base_url.clone());
    let token = match client.login(&config.credentials).await {
        Ok(token) => token,
        Err(e) => {
            error!("Login failed: {}", e);
            return Err(e.into());
        }
    };

    let mode = match prompt_mode(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(mode) => mode,
        Err(MenuError::Io(e)) => {
            error!("Failed to read menu choice: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };

    // Handle Ctrl+C gracefully
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ctrl_c_cancel.cancel(),
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let generator = ReadingGenerator::from_config(StdRng::from_os_rng(), &config);
    let mut simulator = Simulator::new(
        generator,
        config.room_ids.clone(),
        config.anomaly_probability,
        cancel,
    );

    let send = |reading: Reading| {
        let (client, token) = (&client, &token);
        async move { client.send_reading(token, &reading).await }
    };

    match mode {
        Mode::QuickTest => {
            simulator.quick_test(send).await;
        }
        Mode::Timed(plan) => {
            simulator.run(plan, send).await;
        }
    }

    Ok(())
}
