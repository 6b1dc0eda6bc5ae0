//! Interop CLI - query status, upload telemetry and report targets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interop_cli::Orbit;
use interop_client::InteropClient;
use interop_core::{Target, WireRecord};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time;

/// Team-side command line for the interop server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Interop server URL
    #[arg(long, env = "INTEROP_URL", default_value = "http://localhost:8000")]
    url: String,

    /// Session token issued to the team
    #[arg(long, env = "INTEROP_SESSION_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show server message, time and active mission
    Status,
    /// List every mission
    Missions,
    /// Show stationary and moving obstacles
    Obstacles,
    /// Fly a circular track, posting telemetry at a fixed rate
    Fly {
        #[arg(long, default_value_t = 38.1446)]
        lat: f64,
        #[arg(long, default_value_t = -76.4282)]
        lon: f64,
        /// Radius in meters
        #[arg(long, default_value_t = 200.0)]
        radius: f64,
        /// Altitude MSL in feet
        #[arg(long, default_value_t = 300.0)]
        altitude: f64,
        /// Ground speed in m/s
        #[arg(long, default_value_t = 15.0)]
        speed: f64,
        /// Duration in seconds
        #[arg(long, default_value_t = 60)]
        duration: u64,
        /// Update rate in Hz
        #[arg(long, default_value_t = 1.0)]
        rate: f64,
    },
    /// Report a target read from a JSON file
    Report {
        file: PathBuf,
    },
    /// List this team's targets, or show one
    Targets {
        id: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = InteropClient::new(&args.url).with_session_token(args.token);

    match args.command {
        Command::Status => {
            let status = client.server_info().await?;
            print_json(&status)?;
        }
        Command::Missions => print_json(&client.missions().await?)?,
        Command::Obstacles => print_json(&client.obstacles().await?)?,
        Command::Fly {
            lat,
            lon,
            radius,
            altitude,
            speed,
            duration,
            rate,
        } => fly(&client, Orbit::new(lat, lon, radius, altitude, speed), duration, rate).await?,
        Command::Report { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let payload: serde_json::Value = serde_json::from_str(&text)?;
            let target = Target::from_wire(&payload)?;
            let stored = client.post_target(&target).await?;
            print_json(&stored)?;
        }
        Command::Targets { id: Some(id) } => print_json(&client.target(id).await?)?,
        Command::Targets { id: None } => print_json(&client.targets().await?)?,
    }

    Ok(())
}

async fn fly(client: &InteropClient, orbit: Orbit, duration: u64, rate: f64) -> Result<()> {
    anyhow::ensure!(rate > 0.0, "rate must be positive");

    println!("Flying orbit around ({}, {})", orbit.center_lat, orbit.center_lon);
    println!("  Radius: {}m, Altitude: {}ft MSL", orbit.radius_m, orbit.altitude_msl);

    let start = time::Instant::now();
    let mut sent = 0u32;
    let mut interval = time::interval(Duration::from_secs_f64(1.0 / rate));

    loop {
        interval.tick().await;
        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > duration as f64 {
            break;
        }

        let telemetry = orbit.telemetry(elapsed)?;
        match client.post_telemetry(&telemetry).await {
            Ok(()) => {
                sent += 1;
                println!(
                    "[{:3}] ({:.6}, {:.6}) hdg {:5.1} -> OK",
                    sent, telemetry.latitude, telemetry.longitude, telemetry.uas_heading
                );
            }
            Err(e) => eprintln!("Error sending telemetry: {}", e),
        }
    }

    println!("\nDone. Sent {} telemetry updates.", sent);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
