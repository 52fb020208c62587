use anyhow::Result;
use clap::{Parser, Subcommand};
use hifitime::Epoch;
use orrery_core::constants::AU;
use orrery_render::ViewerConfig;
use orrery_sim::{Body, Moon, SolarSystem, TimeController};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Animated, navigable 3D solar system")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive viewer
    View {
        /// Viewer config JSON; flags below override file values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory of body textures (earth.png, mars.jpg, ...)
        #[arg(long)]
        textures: Option<PathBuf>,

        /// Stars in the backdrop
        #[arg(long)]
        stars: Option<usize>,

        /// Particles in the main asteroid belt
        #[arg(long)]
        asteroids: Option<usize>,

        /// Particles in the Kuiper belt
        #[arg(long)]
        kuiper: Option<usize>,

        /// Starting epoch, e.g. "2000-01-01T12:00:00 UTC"
        #[arg(short, long)]
        epoch: Option<String>,

        /// Simulation rate in days per second
        #[arg(short, long)]
        rate: Option<f64>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },

    /// List all bodies with radius, distance, and period
    Bodies,

    /// Show the info page for one body
    Info {
        /// Body name, e.g. "earth" or "Saturn"
        body: String,
    },

    /// Show heliocentric positions at an epoch
    Positions {
        /// Epoch (ISO format with scale, e.g. "2000-01-01T12:00:00 UTC")
        #[arg(short, long, default_value = "2000-01-01T12:00:00 UTC")]
        epoch: String,
    },

    /// Non-graphical clock simulation printing positions as time advances
    TimeSim {
        /// Starting epoch
        #[arg(short, long, default_value = "2000-01-01T12:00:00 UTC")]
        epoch: String,

        /// Time rate (days per second)
        #[arg(long, default_value = "100")]
        rate: f64,

        /// Duration to simulate (seconds of real time)
        #[arg(long, default_value = "10")]
        duration: f64,
    },
}

fn parse_epoch(s: &str) -> Result<Epoch> {
    Epoch::from_str(s).map_err(|e| anyhow::anyhow!("Invalid epoch {:?}: {}", s, e))
}

fn print_positions(system: &SolarSystem) {
    println!("{:<10} {:>12} {:>12} {:>12} {:>10}", "Body", "x (AU)", "y (AU)", "z (AU)", "r (AU)");
    for body in Body::planets() {
        let pos = system.body_position(*body);
        println!(
            "{:<10} {:>12.5} {:>12.5} {:>12.5} {:>10.4}",
            body.name(),
            pos.x / AU,
            pos.y / AU,
            pos.z / AU,
            pos.magnitude() / AU,
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            config,
            textures,
            stars,
            asteroids,
            kuiper,
            epoch,
            rate,
            width,
            height,
        } => {
            let mut viewer = match config {
                Some(path) => ViewerConfig::load(&path)?,
                None => ViewerConfig::default(),
            };

            if let Some(dir) = textures {
                viewer.texture_dir = Some(dir);
            }
            if let Some(n) = stars {
                viewer.star_count = n;
            }
            if let Some(n) = asteroids {
                viewer.asteroid_count = n;
            }
            if let Some(n) = kuiper {
                viewer.kuiper_count = n;
            }
            if let Some(e) = epoch {
                viewer.start_epoch = Some(e);
            }
            if let Some(r) = rate {
                viewer.rate_days_per_second = r;
            }
            if let Some(w) = width {
                viewer.width = w;
            }
            if let Some(h) = height {
                viewer.height = h;
            }

            orrery_render::run(viewer)?;
        }

        Commands::Bodies => {
            println!(
                "{:<10} {:>12} {:>10} {:>14} {:>8} {:>6}",
                "Body", "Radius (km)", "a (AU)", "Period (days)", "Moons", "Rings"
            );
            for body in Body::all() {
                let facts = body.facts();
                println!(
                    "{:<10} {:>12.0} {:>10.3} {:>14.2} {:>8} {:>6}",
                    facts.name,
                    facts.mean_radius_km,
                    facts.semi_major_axis_au,
                    facts.orbital_period_days,
                    facts.moons.len(),
                    if facts.has_rings { "yes" } else { "no" },
                );
            }
        }

        Commands::Info { body } => {
            let Some(body) = Body::parse(&body) else {
                anyhow::bail!(
                    "Unknown body {:?}. Try one of: {}",
                    body,
                    Body::all()
                        .iter()
                        .map(|b| b.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            };

            let facts = body.facts();
            println!("{}", facts.name);
            println!("{}", "=".repeat(facts.name.len()));
            println!("  Mean radius:      {:.0} km", facts.mean_radius_km);
            println!("  Rotation period:  {:.2} h{}", facts.rotation_period_hours.abs(),
                if facts.rotation_period_hours < 0.0 { " (retrograde)" } else { "" });
            println!("  Axial tilt:       {:.2}°", facts.axial_tilt_deg);

            if body != Body::Sun {
                println!("  Semi-major axis:  {:.3} AU", facts.semi_major_axis_au);
                println!("  Eccentricity:     {:.5}", facts.eccentricity);
                println!("  Inclination:      {:.3}°", facts.inclination_deg);
                println!("  Orbital period:   {:.2} days ({:.2} yr)",
                    facts.orbital_period_days, facts.orbital_period_days / 365.25);
            }

            if let Some(rings) = body.rings() {
                println!(
                    "  Rings:            {:.0}-{:.0} km from center",
                    rings.inner_radius / 1000.0,
                    rings.outer_radius / 1000.0
                );
            }

            if facts.moons.is_empty() {
                println!("  Moons:            none");
            } else {
                println!("  Moons:");
                for moon in Moon::of(body) {
                    let a_km = moon.elements().a / 1000.0;
                    let period_days =
                        moon.elements().period() / orrery_core::constants::SECONDS_PER_DAY;
                    println!(
                        "    {:<10} a = {:>9.0} km, period = {:>7.2} days",
                        moon.name(),
                        a_km,
                        period_days
                    );
                }
            }
        }

        Commands::Positions { epoch } => {
            let epoch = parse_epoch(&epoch)?;
            let system = SolarSystem::at_epoch(epoch);

            println!("Heliocentric positions at {}\n", epoch);
            print_positions(&system);
        }

        Commands::TimeSim { epoch, rate, duration } => {
            let epoch = parse_epoch(&epoch)?;
            let mut controller = TimeController::at_epoch(epoch);
            controller.set_rate_days_per_second(rate);

            let mut system = SolarSystem::at_epoch(epoch);

            // One printed step per simulated second of real time
            let steps = duration.ceil() as usize;
            for step in 0..=steps {
                system.set_epoch(controller.current());

                println!("t+{:>4}s  epoch {}  (year {:.2})", step, controller.current(), controller.year());
                print_positions(&system);
                println!();

                controller.tick(1.0);
            }
        }
    }

    Ok(())
}
