mod ic;
mod render;
mod table;

use clap::{Parser, Subcommand, ValueEnum};
use ic::{IcType, generate_ic};
use numeric_core::{EulerInput, Expr, FlowConfig, FlowSession, Grid, StepError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tabulate forward Euler steps for dy/dx = f(x, y)
    Euler(EulerArgs),
    /// Run the 2D advection-diffusion pipe flow and export its frames
    Flow(FlowArgs),
}

#[derive(clap::Args, Debug)]
struct EulerArgs {
    /// Differential equation dy/dx in x and y, e.g. "x + y"
    #[arg(long)]
    equation: String,

    /// Initial value of x
    #[arg(long, allow_hyphen_values = true)]
    x0: String,

    /// Initial value of y
    #[arg(long, allow_hyphen_values = true)]
    y0: String,

    /// Calculation point
    #[arg(long, allow_hyphen_values = true)]
    xn: String,

    /// Step size h
    #[arg(long, allow_hyphen_values = true)]
    step: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(clap::Args, Debug)]
struct FlowArgs {
    /// Output directory for frames.bin / meta.jsonl (no export when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file with flow settings; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run (defaults to num_frames from the config)
    #[arg(long)]
    frames: Option<usize>,

    /// Export every k-th frame
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Velocity, clamped to [0.1, 2.0]
    #[arg(long)]
    velocity: Option<f64>,

    /// Diffusion coefficient, clamped to [0.01, 1.0]
    #[arg(long)]
    diffusion: Option<f64>,

    /// Initial density
    #[arg(long, value_enum, default_value_t = IcType::Slab)]
    ic: IcType,

    /// RNG seed for the random initial conditions
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Print a character heatmap of the last frame
    #[arg(long)]
    preview: bool,
}

#[derive(Serialize)]
struct MetaRow<'a> {
    frame: u64,
    rows: usize,
    cols: usize,

    velocity: f64,
    diffusion_coefficient: f64,
    dt: f64,
    dx: f64,
    dy: f64,

    min: f64,
    max: f64,
    mass: f64,

    ic_type: &'a str,
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Euler(a) => run_euler(&a),
        Command::Flow(a) => run_flow(&a),
    }
}

fn run_euler(args: &EulerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = EulerInput::parse(&args.x0, &args.y0, &args.xn, &args.step)?;
    let expr = Expr::parse(&args.equation)?;

    let mut rows = Vec::new();
    let mut failure: Option<StepError> = None;
    for item in input.steps(&expr)? {
        match item {
            Ok(row) => rows.push(row),
            Err(e) => failure = Some(e),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Table => writeln!(out, "{}", table::render(&rows, failure.as_ref()))?,
        Format::Json => {
            for row in &rows {
                serde_json::to_writer(&mut out, row)?;
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn run_flow(args: &FlowArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.every == 0 {
        return Err("--every must be >= 1".into());
    }

    let config = match &args.config {
        Some(path) => FlowConfig::from_path(path)?,
        None => FlowConfig::default(),
    };
    let frames = args.frames.unwrap_or(config.num_frames);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let initial = generate_ic(&mut rng, &config, args.ic)?;
    let range = (initial.min(), initial.max());

    let mut session = FlowSession::with_initial(config, initial)?;
    if let Some(v) = args.velocity {
        session.set_velocity(v);
    }
    if let Some(d) = args.diffusion {
        session.set_diffusion_coefficient(d);
    }
    info!(
        frames,
        velocity = session.velocity(),
        diffusion = session.diffusion_coefficient(),
        ic = args.ic.as_str(),
        "running flow"
    );

    let mut export = match &args.out {
        Some(dir) => Some(FrameExport::create(dir, session.config())?),
        None => None,
    };

    if let Some(e) = export.as_mut() {
        e.write(&session, args.ic.as_str(), args.seed)?;
    }

    let mut diverged = false;
    for _ in 0..frames {
        session.tick();

        if !diverged && session.field().has_non_finite() {
            warn!(frame = session.frame(), "field contains non-finite values");
            diverged = true;
        }

        if session.frame() % args.every as u64 == 0 {
            if let Some(e) = export.as_mut() {
                e.write(&session, args.ic.as_str(), args.seed)?;
            }
        }
    }

    if let Some(e) = export {
        let written = e.finish()?;
        println!("Wrote {} frames to: {}", written, args.out.as_deref().unwrap_or(Path::new(".")).display());
    }

    if args.preview {
        println!("{}", render::heatmap(session.field(), range, 100, 50));
    }

    let field = session.field();
    println!(
        "Frame {}: min={} max={} mass={}",
        session.frame(),
        table::format_g(field.min()),
        table::format_g(field.max()),
        table::format_g(field.sum())
    );

    Ok(())
}

struct FrameExport {
    frames: BufWriter<File>,
    meta: BufWriter<File>,
    written: u64,
}

impl FrameExport {
    fn create(dir: &Path, config: &FlowConfig) -> Result<FrameExport, Box<dyn std::error::Error>> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join("config.json"), serde_json::to_string_pretty(config)?)?;

        let frames = BufWriter::new(File::create(dir.join("frames.bin"))?);
        let meta = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(dir.join("meta.jsonl"))?,
        );
        Ok(FrameExport {
            frames,
            meta,
            written: 0,
        })
    }

    fn write(&mut self, session: &FlowSession, ic_type: &str, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
        let field = session.field();
        let p = session.params();

        write_f64_grid(&mut self.frames, field)?;

        let row = MetaRow {
            frame: session.frame(),
            rows: field.rows(),
            cols: field.cols(),

            velocity: p.velocity,
            diffusion_coefficient: p.diffusion_coefficient,
            dt: p.dt,
            dx: p.dx,
            dy: p.dy,

            min: field.min(),
            max: field.max(),
            mass: field.sum(),

            ic_type,
            seed,
        };
        serde_json::to_writer(&mut self.meta, &row)?;
        self.meta.write_all(b"\n")?;

        self.written += 1;
        Ok(())
    }

    fn finish(mut self) -> io::Result<u64> {
        self.frames.flush()?;
        self.meta.flush()?;
        Ok(self.written)
    }
}

fn write_f64_grid<W: Write>(w: &mut W, g: &Grid) -> io::Result<()> {
    for &x in g.as_slice() {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}
