use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use hilligoss::{
    FfmpegVideoSource, FrameSource, ImageSequenceSource, SamplingMode, SessionOpts,
    SessionStats, StillImageSource, TraceParams, TraceSession, GRID_SIDE,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_STILL_FPS: f64 = 24.0;

#[derive(Parser, Debug)]
#[command(name = "hilligoss", version, about = "Trace images as stereo X/Y oscilloscope audio")]
struct Cli {
    /// Log debug detail (per-chunk and per-frame statistics).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace one or more still images.
    Still(StillArgs),
    /// Trace every frame of a video (requires `ffmpeg` on PATH and the `media-ffmpeg` feature).
    Video(VideoArgs),
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input image. Repeat the flag to trace a sequence.
    #[arg(long = "in", required = true)]
    in_paths: Vec<PathBuf>,

    /// Output path; `.wav` writes a WAV file, anything else raw s16le.
    #[arg(long)]
    out: PathBuf,

    /// Trace each image this many times.
    #[arg(long, default_value_t = 1)]
    repeat: u64,

    #[command(flatten)]
    trace: TraceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct VideoArgs {
    /// Input media file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.wav` writes a WAV file, anything else raw s16le.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    trace: TraceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct TraceArgs {
    /// JSON file with base trace parameters; flags below override it.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Intensity at or below which pixels are never drawn (0..255).
    #[arg(long)]
    black: Option<i64>,

    /// Intensity treated as full brightness (0..255).
    #[arg(long)]
    white: Option<i64>,

    /// Maximum points per stroke.
    #[arg(long)]
    jump: Option<usize>,

    /// Neighbor search half-width in pixels; below 1 searches the whole frame.
    #[arg(long)]
    distance: Option<i64>,

    /// Acceptance floor for dim pixels.
    #[arg(long)]
    boost: Option<f64>,

    /// Brightness response exponent, log2 (-2..2).
    #[arg(long)]
    curve: Option<f64>,

    /// Sampling mode: 0 normal, 1 sparkly, 2 extra sparkly, 3..6 scrolling grid.
    #[arg(long)]
    mode: Option<u8>,

    /// Calibration border samples appended to every buffer.
    #[arg(long)]
    border: Option<usize>,

    /// Points per buffer. Defaults to what fills one frame at `--rate`/`--fps`.
    #[arg(long)]
    points: Option<usize>,

    /// Draw dark regions instead of bright ones.
    #[arg(long, default_value_t = false)]
    invert: bool,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output sample rate in Hz.
    #[arg(long, default_value_t = 192_000)]
    rate: u32,

    /// Source frame rate. Stills default to 24; video defaults to the probed rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Trace each source frame this many times with advancing phase.
    #[arg(long, default_value_t = 1)]
    frame_loop: u32,

    /// Write each traced buffer this many times.
    #[arg(long, default_value_t = 1)]
    sync: u32,

    /// Override worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Buffers traced per parallel batch.
    #[arg(long, default_value_t = 64)]
    batch: usize,

    /// Disable parallel tracing.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Base RNG seed. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Video(args) => cmd_video(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut source: Box<dyn FrameSource> = match args.in_paths.as_slice() {
        [single] => Box::new(
            StillImageSource::open(single, args.repeat)
                .with_context(|| format!("load image '{}'", single.display()))?,
        ),
        many => {
            let repeat = args.repeat as usize;
            Box::new(ImageSequenceSource::new(
                many.iter()
                    .flat_map(|p| std::iter::repeat_n(p.clone(), repeat))
                    .collect::<Vec<_>>(),
            ))
        }
    };
    let fps = args.output.fps.unwrap_or(DEFAULT_STILL_FPS);
    run(source.as_mut(), fps, &args.trace, &args.output, &args.out)
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let mut source = FfmpegVideoSource::open(&args.in_path)
        .with_context(|| format!("open video '{}'", args.in_path.display()))?;
    let fps = match args.output.fps.or(source.fps_hint()) {
        Some(fps) => fps,
        None => {
            tracing::warn!(fps = DEFAULT_STILL_FPS, "video frame rate unknown; assuming default");
            DEFAULT_STILL_FPS
        }
    };
    run(&mut source, fps, &args.trace, &args.output, &args.out)
}

fn run(
    source: &mut dyn FrameSource,
    fps: f64,
    trace: &TraceArgs,
    output: &OutputArgs,
    out: &Path,
) -> anyhow::Result<()> {
    anyhow::ensure!(fps.is_finite() && fps > 0.0, "--fps must be a positive number");
    let params = trace_params(trace, output, fps)?;
    let opts = SessionOpts {
        sample_rate: output.rate,
        frame_loop: output.frame_loop,
        sync_count: output.sync,
        parallel: !output.sequential,
        batch_size: output.batch,
        threads: output.threads,
        seed: output.seed.unwrap_or_else(rand::random),
    };
    tracing::info!(
        seed = opts.seed,
        points = params.target_count,
        fps,
        rate = opts.sample_rate,
        "tracing"
    );

    let session = TraceSession::new(params, opts)?;
    let mut sink = hilligoss::sink_for_path(out);
    let started = Instant::now();
    let stats = session.render_source(source, sink.as_mut())?;
    report(&stats, output.rate, started.elapsed().as_secs_f64(), out);
    Ok(())
}

fn trace_params(trace: &TraceArgs, output: &OutputArgs, fps: f64) -> anyhow::Result<TraceParams> {
    // Point count precedence: --points, then the parameter file, then the rate/fps budget.
    let (mut params, file_target) = match &trace.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read parameter file '{}'", path.display()))?;
            let raw: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse parameter file '{}'", path.display()))?;
            let file_target = raw
                .get("target_count")
                .and_then(serde_json::Value::as_u64)
                .map(|n| n as usize);
            (TraceParams::from_json_str(&text)?, file_target)
        }
        None => (TraceParams::default(), None),
    };
    params.target_count = trace.points.or(file_target).unwrap_or_else(|| {
        hilligoss::target_count_for(output.rate, fps, output.sync, output.frame_loop)
    });
    if let Some(v) = trace.black {
        params.black = v.clamp(0, 255) as u8;
    }
    if let Some(v) = trace.white {
        params.white = v.clamp(0, 255) as u8;
    }
    if let Some(v) = trace.jump {
        params.jump_period = v.max(1);
    }
    if let Some(v) = trace.distance {
        params.search_distance = if v < 1 { GRID_SIDE } else { v as usize };
    }
    if let Some(v) = trace.boost {
        params.boost = v;
    }
    if let Some(v) = trace.curve {
        params.curve = v.clamp(-2.0, 2.0);
    }
    if let Some(v) = trace.mode {
        params.mode = SamplingMode::from_index(v)?;
    }
    if let Some(v) = trace.border {
        params.border_samples = v;
    }
    if trace.invert {
        params.invert = true;
    }
    Ok(params)
}

fn report(stats: &SessionStats, rate: u32, elapsed: f64, out: &Path) {
    let audio_secs = stats.samples_written as f64 / 2.0 / f64::from(rate);
    let realtime = if elapsed > 0.0 { audio_secs / elapsed } else { 0.0 };
    eprintln!(
        "wrote {}: {} frames, {} buffers, {:.2}s of audio in {:.2}s ({:.1}x realtime)",
        out.display(),
        stats.source_frames,
        stats.calls,
        audio_secs,
        elapsed,
        realtime
    );
}
