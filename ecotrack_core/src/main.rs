use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ecotrack_core::{
    compute_electricity_emission, compute_lpg_emission, compute_travel_emission, CarbonStore,
    ElectricityInput, EngineConfig, FileSnapshotStore, LpgInput, ProfileStore, TransportMode,
    TravelPatch,
};

#[derive(Debug, Parser)]
#[command(name = "ecotrack", about = "Household carbon footprint estimates")]
struct Cli {
    /// Carbon state snapshot (overrides ECOTRACK_STATE_PATH).
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly figures per category and the yearly estimate.
    Show,
    /// Update the commute; omitted flags keep their current value.
    Travel {
        #[arg(long)]
        mode: Option<TransportMode>,
        #[arg(long)]
        distance_km: Option<f64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
        days_per_week: Option<u8>,
    },
    Electricity {
        #[arg(long)]
        kwh: f64,
    },
    Lpg {
        #[arg(long)]
        cylinders: f64,
    },
    Reset,
    /// Pie segments as JSON.
    Chart,
    /// Monthly total against national and global averages.
    Compare,
    Login {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: String,
    },
    Logout,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

// The input layer clamps; `1e999` parses to infinity and must not reach the store.
fn clamp_input(x: f64) -> f64 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

fn print_breakdown(store: &CarbonStore<FileSnapshotStore>) {
    let state = store.get();
    let factors = store.factors();
    let travel = compute_travel_emission(&state.travel, factors);
    let electricity = compute_electricity_emission(&state.electricity, factors);
    let lpg = compute_lpg_emission(&state.lpg, factors);
    let summary = store.summary();

    println!("category,monthly_kg,yearly_kg");
    println!(
        "travel ({}; {:.1} km x {} d/wk; {:.2} kg/day),{:.2},{:.2}",
        state.travel.mode,
        state.travel.distance_km,
        state.travel.days_per_week,
        travel.daily,
        travel.monthly,
        travel.yearly
    );
    println!(
        "electricity ({:.1} kWh/mo),{:.2},{:.2}",
        state.electricity.monthly_kwh, electricity.monthly, electricity.yearly
    );
    println!(
        "lpg ({:.1} cyl/yr),{:.2},{:.2}",
        state.lpg.cylinders_per_year, lpg.monthly, lpg.yearly
    );
    println!(
        "total,{:.2},{:.2}",
        summary.total(),
        summary.yearly_total_kg()
    );
    println!("~{:.2} tonnes CO2 per year", summary.yearly_total_tonnes());
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut config = EngineConfig::from_env();
    if let Some(path) = cli.state {
        config.state_path = path;
    }
    init_tracing(config.log_json);

    if let Command::Login { name, email } = &cli.command {
        let mut profiles = ProfileStore::open(FileSnapshotStore::new(&config.profile_path));
        let profile = profiles.sign_in(name, email)?;
        println!("signed in as {} <{}>", profile.name, profile.email);
        return Ok(());
    }
    if let Command::Logout = cli.command {
        ProfileStore::open(FileSnapshotStore::new(&config.profile_path)).sign_out()?;
        println!("signed out");
        return Ok(());
    }

    let mut store = CarbonStore::open(FileSnapshotStore::new(&config.state_path));
    info!(path = %config.state_path.display(), "carbon state loaded");

    match cli.command {
        Command::Show => print_breakdown(&store),
        Command::Travel {
            mode,
            distance_km,
            days_per_week,
        } => {
            let patch = TravelPatch {
                mode,
                distance_km: distance_km.map(clamp_input),
                days_per_week,
            };
            if patch.is_empty() {
                return Err("travel needs --mode, --distance-km or --days-per-week".into());
            }
            store.patch(patch)?;
            print_breakdown(&store);
        }
        Command::Electricity { kwh } => {
            store.patch(ElectricityInput {
                monthly_kwh: clamp_input(kwh),
            })?;
            print_breakdown(&store);
        }
        Command::Lpg { cylinders } => {
            store.patch(LpgInput {
                cylinders_per_year: clamp_input(cylinders),
            })?;
            print_breakdown(&store);
        }
        Command::Reset => {
            store.reset()?;
            print_breakdown(&store);
        }
        Command::Chart => {
            let slices = store.summary().chart_slices();
            println!("{}", serde_json::to_string_pretty(&slices)?);
        }
        Command::Compare => {
            for bar in store.summary().comparison() {
                println!("{},{:.1}", bar.name, bar.monthly_kg);
            }
        }
        // Account commands returned above.
        Command::Login { .. } | Command::Logout => {}
    }

    Ok(())
}
