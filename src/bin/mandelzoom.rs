use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use mandelzoom::{
    CycleRun, DryRunRenderer, FrameIndex, FrameRange, PngFlag, ProcessRenderer, QuadraticRun,
    RendererSpec, RunRenderer, Segment, default_segments, renderer_available, run_growth_decay,
    run_polynomial, run_quadratic, select_segments,
};

#[derive(Parser, Debug)]
#[command(name = "mandelzoom", version)]
struct Cli {
    /// Print each renderer command line instead of launching it.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quadratic progression: zoom(f) = floor(f^2 / 20), min 1.
    Quadratic(QuadraticArgs),
    /// Segmented polynomial-fit progression over calibration tables.
    Poly(PolyArgs),
    /// Percentage zoom-in followed by percentage zoom-out back to 1.0.
    Cycle(CycleArgs),
}

#[derive(Parser, Debug)]
struct QuadraticArgs {
    /// Renderer binary to invoke once per frame.
    #[arg(long, default_value = "geomandel")]
    renderer: PathBuf,

    /// Number of frames; indices run 1..=N.
    #[arg(long, default_value_t = 499)]
    frames: u64,

    #[arg(long, default_value_t = 2048)]
    bailout: u32,

    #[arg(long, default_value_t = 4)]
    multi: u32,

    #[arg(long, default_value_t = 484.0)]
    xcoord: f64,

    #[arg(long, default_value_t = 444.0)]
    ycoord: f64,

    /// Filename suffix appended to the zero-padded frame index.
    #[arg(long, default_value = "_mandelvid484_444")]
    suffix: String,

    /// Coloring frequency triple passed through to the renderer.
    #[arg(long, value_parser = parse_f64_triplet, default_value = "0,16,2")]
    rgb_freq: [f64; 3],

    /// Disable the triangle-wave rgb-base pulse (255 down to 0 and back).
    #[arg(long)]
    no_pulse: bool,
}

#[derive(Parser, Debug)]
struct PolyArgs {
    /// Renderer binary to invoke once per frame.
    #[arg(long, default_value = "geomandel")]
    renderer: PathBuf,

    #[arg(long, default_value_t = 4096)]
    bailout: u32,

    #[arg(long, default_value_t = 4)]
    multi: u32,

    #[arg(long, default_value_t = 501.70535)]
    xcoord: f64,

    #[arg(long, default_value_t = 450.64976)]
    ycoord: f64,

    /// Filename suffix appended to the zero-padded frame index.
    #[arg(long, default_value = "_mandelvideo_1000_poly3_%x-%y_%zx")]
    suffix: String,

    /// JSON calibration table to use instead of the built-in one.
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// 1-based segment indices to run, in order.
    #[arg(long, value_delimiter = ',', default_values_t = [2usize, 3])]
    segments: Vec<usize>,

    #[arg(long, value_parser = parse_rgb_triplet, default_value = "200,200,200")]
    rgb_base: [u8; 3],

    #[arg(long, value_parser = parse_f64_triplet, default_value = "0.02,0.016,0.012")]
    rgb_freq: [f64; 3],

    #[arg(long, value_parser = parse_f64_triplet, default_value = "4,2,1")]
    rgb_phase: [f64; 3],
}

#[derive(Parser, Debug)]
struct CycleArgs {
    /// Renderer binary to invoke once per frame.
    #[arg(long, default_value = "geomandel")]
    renderer: PathBuf,

    #[arg(long, default_value_t = 4096)]
    bailout: u32,

    #[arg(long, default_value_t = 4)]
    multi: u32,

    #[arg(long, default_value_t = 501.705349998)]
    xcoord: f64,

    #[arg(long, default_value_t = 450.64976)]
    ycoord: f64,

    /// Zoom-in frame count.
    #[arg(long, default_value_t = 1800)]
    growth_frames: u64,

    /// Multiplicative growth per zoom-in frame (0.015 = 1.5%).
    #[arg(long, default_value_t = 0.015)]
    growth_rate: f64,

    /// Zoom-out frame count.
    #[arg(long, default_value_t = 300)]
    decay_frames: u64,

    /// Percentage removed per zoom-out frame.
    #[arg(long, default_value_t = 8.5456)]
    decay_rate: f64,

    /// Filename suffix for zoom-in frames.
    #[arg(long, default_value = "_mandelvideo_2100frames_1.5pct_%x-%y_%zx")]
    suffix_in: String,

    /// Filename suffix for zoom-out frames.
    #[arg(long, default_value = "_mandelvideo_2100frames_out_%x-%y_%zx")]
    suffix_out: String,

    #[arg(long, value_parser = parse_rgb_triplet, default_value = "200,200,200")]
    rgb_base: [u8; 3],

    #[arg(long, value_parser = parse_f64_triplet, default_value = "0.02,0.016,0.012")]
    rgb_freq: [f64; 3],

    #[arg(long, value_parser = parse_f64_triplet, default_value = "4,2,1")]
    rgb_phase: [f64; 3],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut process = ProcessRenderer;
    let mut dry = DryRunRenderer;
    let renderer: &mut dyn RunRenderer = if cli.dry_run { &mut dry } else { &mut process };

    match cli.cmd {
        Command::Quadratic(args) => cmd_quadratic(args, cli.dry_run, renderer),
        Command::Poly(args) => cmd_poly(args, cli.dry_run, renderer),
        Command::Cycle(args) => cmd_cycle(args, cli.dry_run, renderer),
    }
}

fn warn_if_missing(binary: &std::path::Path, dry_run: bool) {
    if !dry_run && !renderer_available(binary) {
        eprintln!(
            "warning: renderer '{}' did not respond to --help; frames will likely fail",
            binary.display()
        );
    }
}

fn cmd_quadratic(
    args: QuadraticArgs,
    dry_run: bool,
    renderer: &mut dyn RunRenderer,
) -> anyhow::Result<()> {
    warn_if_missing(&args.renderer, dry_run);

    let spec = RendererSpec {
        binary: args.renderer,
        multi: args.multi,
        bailout: args.bailout,
        png_flag: PngFlag::ImgPng,
        xcoord: args.xcoord,
        ycoord: args.ycoord,
        rgb_base: None,
        rgb_freq: Some(args.rgb_freq),
        rgb_phase: None,
    };
    let cfg = QuadraticRun {
        frames: FrameRange::new(FrameIndex(1), FrameIndex(end_frame(args.frames)?))?,
        suffix: args.suffix,
        pulse: !args.no_pulse,
    };

    let zooms = run_quadratic(&spec, &cfg, renderer)?;
    eprintln!("sequenced {} quadratic frames", zooms.len());
    Ok(())
}

fn cmd_poly(args: PolyArgs, dry_run: bool, renderer: &mut dyn RunRenderer) -> anyhow::Result<()> {
    warn_if_missing(&args.renderer, dry_run);

    let table = match &args.calibration {
        Some(path) => read_calibration(path)?,
        None => default_segments(),
    };
    let segments = select_segments(&table, &args.segments)?;

    let spec = RendererSpec {
        binary: args.renderer,
        multi: args.multi,
        bailout: args.bailout,
        png_flag: PngFlag::ImagePng,
        xcoord: args.xcoord,
        ycoord: args.ycoord,
        rgb_base: Some(args.rgb_base),
        rgb_freq: Some(args.rgb_freq),
        rgb_phase: Some(args.rgb_phase),
    };

    let zooms = run_polynomial(&spec, &segments, &args.suffix, renderer)?;
    eprintln!(
        "sequenced {} polynomial frames over {} segment(s)",
        zooms.len(),
        segments.len()
    );
    Ok(())
}

fn cmd_cycle(args: CycleArgs, dry_run: bool, renderer: &mut dyn RunRenderer) -> anyhow::Result<()> {
    warn_if_missing(&args.renderer, dry_run);

    let spec = RendererSpec {
        binary: args.renderer,
        multi: args.multi,
        bailout: args.bailout,
        png_flag: PngFlag::ImagePng,
        xcoord: args.xcoord,
        ycoord: args.ycoord,
        rgb_base: Some(args.rgb_base),
        rgb_freq: Some(args.rgb_freq),
        rgb_phase: Some(args.rgb_phase),
    };
    let cfg = CycleRun {
        growth_frames: args.growth_frames,
        growth_rate: args.growth_rate,
        decay_frames: args.decay_frames,
        decay_rate: args.decay_rate,
        suffix_in: args.suffix_in,
        suffix_out: args.suffix_out,
    };

    eprintln!(
        "zooming in for {} frames at {}%, out for {} frames at {}%",
        cfg.growth_frames,
        cfg.growth_rate * 100.0,
        cfg.decay_frames,
        cfg.decay_rate
    );
    let zooms = run_growth_decay(&spec, &cfg, renderer)?;
    eprintln!("sequenced {} cycle frames", zooms.len());
    Ok(())
}

fn end_frame(frames: u64) -> anyhow::Result<u64> {
    frames
        .checked_add(1)
        .ok_or_else(|| anyhow::anyhow!("--frames {frames} is out of range"))
}

fn read_calibration(path: &std::path::Path) -> anyhow::Result<Vec<Segment>> {
    let f = File::open(path).with_context(|| format!("open calibration '{}'", path.display()))?;
    let r = BufReader::new(f);
    let table: Vec<Segment> =
        serde_json::from_reader(r).with_context(|| "parse calibration JSON")?;
    Ok(table)
}

fn parse_rgb_triplet(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    let &[r, g, b] = parts.as_slice() else {
        return Err(format!("expected r,g,b got '{s}'"));
    };
    let parse = |v: &str| v.trim().parse::<u8>().map_err(|e| format!("'{v}': {e}"));
    Ok([parse(r)?, parse(g)?, parse(b)?])
}

fn parse_f64_triplet(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    let &[a, b, c] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got '{s}'"));
    };
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("'{v}': {e}"));
    Ok([parse(a)?, parse(b)?, parse(c)?])
}
