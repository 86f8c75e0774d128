use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{ArgAction, Args, Parser, Subcommand};
use qspace::config::{CentralBody, find_body, load_bodies, load_simulation};
use qspace::epoch::{CalendarTimestamp, julian_date, modified_julian_date};
use qspace::export::elements::{ElementRow, ElementsReport, write_elements_csv, write_report};
use qspace::export::trajectory::{read_trajectory, write_trajectory};
use qspace::export::writer_for_path;
use qspace::orbits::{
    CartesianState, KeplerianElements, elements_to_state, sample_orbit, state_to_elements,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Convert between Cartesian states, Keplerian elements, and Julian Dates.
#[derive(Parser)]
#[command(author, version, about = "Orbit state and Keplerian element conversions")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a position/velocity pair into Keplerian elements
    Elements {
        /// Position in km
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, required = true)]
        position: Vec<f64>,

        /// Velocity in km/s
        #[arg(long, num_args = 3, value_names = ["VX", "VY", "VZ"], allow_negative_numbers = true, required = true)]
        velocity: Vec<f64>,

        #[command(flatten)]
        body: BodyArgs,

        /// Print a JSON report instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Convert Keplerian elements into a position/velocity pair
    State {
        #[command(flatten)]
        elements: ElementArgs,

        #[command(flatten)]
        body: BodyArgs,

        /// Print a JSON report instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Julian Date of an RFC 3339 UTC timestamp or of a Unix time
    Jd {
        /// Timestamp such as 2000-01-01T12:00:00Z
        timestamp: Option<String>,

        /// Seconds since 1970-01-01T00:00:00Z
        #[arg(long, conflicts_with = "timestamp", allow_negative_numbers = true)]
        unix: Option<i64>,
    },

    /// Convert every row of a trajectory file into elements (CSV); degenerate rows are
    /// skipped with a warning and the `index` column keeps the original row number
    Track {
        /// Trajectory file with tab-separated `x y z vx vy vz` rows
        #[arg(long)]
        input: PathBuf,

        /// Output CSV file (use '-' for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Write a trajectory file sampling one orbit uniformly in true anomaly
    Sample {
        #[command(flatten)]
        elements: ElementArgs,

        /// Number of samples
        #[arg(long, default_value_t = 360)]
        count: usize,

        /// Output trajectory file (use '-' for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Summarize a simulation config: window epochs and initial elements
    Config {
        /// Legacy `simulation.cfg`, TOML, or YAML file
        path: PathBuf,

        #[command(flatten)]
        body: BodyArgs,
    },
}

#[derive(Args, Debug)]
struct BodyArgs {
    /// Gravitational parameter in km^3/s^2 (overrides the catalog)
    #[arg(long)]
    mu: Option<f64>,

    /// Central body name (case-insensitive)
    #[arg(long, default_value = "Earth")]
    body: String,

    /// Central-body catalog: YAML list, TOML file, or directory of TOML files
    #[arg(long)]
    bodies: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ElementArgs {
    /// Semi-major axis in km (negative for hyperbolic orbits)
    #[arg(long, allow_negative_numbers = true)]
    a: f64,

    /// Eccentricity
    #[arg(long, default_value_t = 0.0)]
    e: f64,

    /// Inclination
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    i: f64,

    /// Right ascension of the ascending node
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    raan: f64,

    /// Argument of perigee
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    argp: f64,

    /// True anomaly
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    nu: f64,

    /// Angles are given in radians instead of degrees
    #[arg(long, default_value_t = false)]
    radians: bool,
}

impl ElementArgs {
    fn to_elements(&self) -> KeplerianElements {
        if self.radians {
            KeplerianElements::new(self.a, self.e, self.i, self.raan, self.argp, self.nu)
        } else {
            KeplerianElements::from_degrees(self.a, self.e, self.i, self.raan, self.argp, self.nu)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Elements {
            position,
            velocity,
            body,
            json,
        } => {
            let body = resolve_body(&body)?;
            let state = CartesianState::new(triple(&position)?, triple(&velocity)?);
            let elements = state_to_elements(&state, body.mu_km3_s2)?;
            if json {
                print_report(&ElementsReport::new(&body.name, body.mu_km3_s2, state, elements))?;
            } else {
                print_elements(&body, &elements);
            }
        }
        Command::State {
            elements,
            body,
            json,
        } => {
            let body = resolve_body(&body)?;
            let elements = elements.to_elements();
            let state = elements_to_state(&elements, body.mu_km3_s2)?;
            if json {
                print_report(&ElementsReport::new(&body.name, body.mu_km3_s2, state, elements))?;
            } else {
                print_state(&state);
            }
        }
        Command::Jd { timestamp, unix } => {
            let ts = match (timestamp, unix) {
                (_, Some(seconds)) => CalendarTimestamp::from_unix_seconds(seconds)?,
                (Some(text), None) => text.parse::<CalendarTimestamp>()?,
                (None, None) => return Err(anyhow!("pass a timestamp or --unix")),
            };
            println!("UTC : {ts}");
            println!("JD  : {:.6}", julian_date(&ts));
            println!("MJD : {:.6}", modified_julian_date(&ts));
        }
        Command::Track {
            input,
            output,
            body,
        } => {
            let body = resolve_body(&body)?;
            let states = read_trajectory(&input)
                .with_context(|| format!("reading trajectory {}", input.display()))?;
            let mut rows = Vec::with_capacity(states.len());
            for (index, state) in states.iter().enumerate() {
                match state_to_elements(state, body.mu_km3_s2) {
                    Ok(elements) => rows.push(ElementRow::new(index, &elements)),
                    Err(err) => warn!(index, %err, "skipping sample"),
                }
            }
            info!(samples = states.len(), converted = rows.len(), "track converted");
            let mut writer = open_output(&output)?;
            write_elements_csv(&mut writer, &rows)?;
            writer.flush()?;
        }
        Command::Sample {
            elements,
            count,
            output,
            body,
        } => {
            let body = resolve_body(&body)?;
            let states = sample_orbit(&elements.to_elements(), body.mu_km3_s2, count)?;
            let mut writer = open_output(&output)?;
            write_trajectory(&mut writer, &states)?;
            writer.flush()?;
        }
        Command::Config { path, body } => {
            let body = resolve_body(&body)?;
            let config = load_simulation(&path)
                .with_context(|| format!("loading simulation config {}", path.display()))?;
            let (jd_start, jd_stop) = config.julian_window()?;
            println!("start : {} (JD {:.6})", config.start_epoch()?, jd_start);
            println!("stop  : {} (JD {:.6})", config.stop_epoch()?, jd_stop);
            println!("span  : {} s", config.duration_seconds());
            print_state(&config.initial_state);
            let elements = state_to_elements(&config.initial_state, body.mu_km3_s2)?;
            print_elements(&body, &elements);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn resolve_body(args: &BodyArgs) -> anyhow::Result<CentralBody> {
    if let Some(mu) = args.mu {
        return Ok(CentralBody {
            name: args.body.clone(),
            mu_km3_s2: mu,
            radius_km: 0.0,
        });
    }
    match &args.bodies {
        Some(path) => {
            let bodies = load_bodies(path)
                .with_context(|| format!("loading body catalog {}", path.display()))?;
            Ok(find_body(&bodies, &args.body)?.clone())
        }
        None => {
            let earth = CentralBody::earth();
            if earth.name.eq_ignore_ascii_case(&args.body) {
                Ok(earth)
            } else {
                Err(anyhow!(
                    "unknown body `{}`; pass --bodies or --mu",
                    args.body
                ))
            }
        }
    }
}

fn triple(values: &[f64]) -> anyhow::Result<[f64; 3]> {
    values
        .try_into()
        .map_err(|_| anyhow!("expected 3 components, got {}", values.len()))
}

fn open_output(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    writer_for_path(path).with_context(|| format!("opening output {}", path.display()))
}

fn print_report(report: &ElementsReport) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, report)?;
    writeln!(handle)?;
    Ok(())
}

fn print_elements(body: &CentralBody, elements: &KeplerianElements) {
    let [i, raan, omega, theta] = elements.angles_deg();
    println!("body  : {} (mu = {} km^3/s^2)", body.name, body.mu_km3_s2);
    println!("a     : {:.6} km", elements.a);
    println!("e     : {:.9}", elements.e);
    println!("i     : {i:.6} deg");
    println!("RAAN  : {raan:.6} deg");
    println!("omega : {omega:.6} deg");
    println!("theta : {theta:.6} deg");
    if let Some(period) = elements.period(body.mu_km3_s2) {
        println!("period: {period:.3} s");
    }
}

fn print_state(state: &CartesianState) {
    let r = &state.position_km;
    let v = &state.velocity_km_s;
    println!("r     : [{:.6}, {:.6}, {:.6}] km", r[0], r[1], r[2]);
    println!("v     : [{:.9}, {:.9}, {:.9}] km/s", v[0], v[1], v[2]);
}
