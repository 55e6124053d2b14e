use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use hilligoss::{
    FrameIndex, Grid, SamplingMode, TraceParams, choose_pixels, emit_border, emit_path_samples,
    frame_seed, plan_path,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    frames: u32,
    points: usize,
    jump: usize,
    distance: usize,
    mode: u8,
    border: usize,
    warmup: u32,
    repeats: u32,
    seed: u64,
    json_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    select_total: Duration,
    plan_total: Duration,
    emit_total: Duration,
    wall_total: Duration,
    accepted: usize,
    strokes: usize,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.frames == 0 {
        anyhow::bail!("--frames must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be > 0");
    }

    let params = TraceParams {
        target_count: args.points,
        jump_period: args.jump,
        search_distance: args.distance,
        mode: SamplingMode::from_index(args.mode)?,
        border_samples: args.border,
        ..TraceParams::default()
    };
    params.validate()?;

    let frames = (0..args.frames).map(synth_frame).collect::<Vec<_>>();

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for _ in 0..args.warmup {
            let _ = run_once(&args, &params, &frames, None);
        }
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {frames} frames/run, points={points}, jump={jump}, distance={distance}, mode={mode}, seed={seed}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        frames = args.frames,
        points = args.points,
        jump = args.jump,
        distance = args.distance,
        mode = args.mode,
        seed = args.seed,
    );

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    let mut digest = String::new();
    for i in 0..args.repeats {
        let mut hasher = sha2::Sha256::new();
        runs.push(run_once(&args, &params, &frames, Some(&mut hasher)));
        let run_digest = hex(&hasher.finalize());
        if i == 0 {
            digest = run_digest;
        } else if run_digest != digest {
            anyhow::bail!("run {i} produced digest {run_digest}, expected {digest} (nondeterminism)");
        }
    }

    eprintln!("output sha256: {digest}");
    let rows = report_percentiles(&runs);

    if let Some(path) = &args.json_out {
        let report = json!({
            "frames": args.frames,
            "repeats": args.repeats,
            "params": params,
            "seed": args.seed,
            "sha256": digest,
            "accepted_last": runs.last().map(|m| m.accepted),
            "strokes_last": runs.last().map(|m| m.strokes),
            "stages": rows,
        });
        let text = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, text)
            .with_context(|| format!("write json report '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

/// Radial gradient with concentric rings, shifted a little per frame.
fn synth_frame(i: u32) -> Grid {
    let shift = f64::from(i) * 6.0;
    Grid::from_fn(|x, y| {
        let dx = f64::from(x) - 256.0 - shift;
        let dy = f64::from(y) - 256.0;
        let r = (dx * dx + dy * dy).sqrt();
        let base = (255.0 - r * 0.6).max(0.0);
        let ring = if ((r + shift) as u32 / 32).is_multiple_of(2) {
            1.0
        } else {
            0.35
        };
        (base * ring) as u8
    })
}

fn run_once(
    args: &BenchArgs,
    params: &TraceParams,
    frames: &[Grid],
    mut hasher: Option<&mut sha2::Sha256>,
) -> RunMetrics {
    let mut m = RunMetrics::default();
    let wall = Instant::now();
    let mut out = Vec::<i16>::with_capacity(params.output_len());

    for (i, grid) in frames.iter().enumerate() {
        let frame = FrameIndex(i as u64);
        let mut rng = Pcg64::seed_from_u64(frame_seed(args.seed, frame));

        let t = Instant::now();
        let selection = choose_pixels(grid, params, frame, &mut rng);
        m.select_total += t.elapsed();

        let t = Instant::now();
        let path = plan_path(&selection.points, params, &mut rng);
        m.plan_total += t.elapsed();

        let t = Instant::now();
        out.clear();
        emit_path_samples(&path.points, params.target_count, &mut out);
        emit_border(params.border_samples, &mut out);
        m.emit_total += t.elapsed();

        m.accepted += selection.accepted;
        m.strokes += path.stroke_count();
        if let Some(h) = hasher.as_deref_mut() {
            for s in &out {
                h.update(s.to_le_bytes());
            }
        }
    }

    m.wall_total = wall.elapsed();
    m
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        frames: 8,
        points: 8000,
        jump: 100,
        distance: 30,
        mode: 0,
        border: 0,
        warmup: 1,
        repeats: 20,
        seed: 0,
        json_out: None,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--frames" => out.frames = parse_num(args.next(), "--frames")?,
            "--points" => out.points = parse_num(args.next(), "--points")?,
            "--jump" => out.jump = parse_num(args.next(), "--jump")?,
            "--distance" => out.distance = parse_num(args.next(), "--distance")?,
            "--mode" => out.mode = parse_num(args.next(), "--mode")?,
            "--border" => out.border = parse_num(args.next(), "--border")?,
            "--warmup" => out.warmup = parse_num(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_num(args.next(), "--repeats")?,
            "--seed" => out.seed = parse_num(args.next(), "--seed")?,
            "--json" => {
                out.json_out = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --json (expected a path)")
                })?))
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"hilligoss-bench

Traces synthetic 512x512 frames repeatedly and reports p50/p90/p99 per stage.

Usage:
  cargo run -q -p hilligoss-bench --release
  cargo run -q -p hilligoss-bench --release -- --frames 24 --repeats 50
  cargo run -q -p hilligoss-bench --release -- --mode 1 --json target/bench.json

Args:
  --frames N    synthetic frames per run (default 8)
  --points N    target points per frame (default 8000)
  --jump N      max points per stroke (default 100)
  --distance N  neighbor search half-width (default 30)
  --mode N      sampling mode 0..6 (default 0)
  --border N    border samples per frame (default 0)
  --warmup N    (default 1)
  --repeats N   (default 20)
  --seed N      base seed (default 0)
  --json PATH   also write a JSON report
"#
    );
}

fn parse_num<T>(v: Option<String>, flag: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<T>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn report_percentiles(runs: &[RunMetrics]) -> serde_json::Value {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: Getter) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn ms(d: Duration) -> f64 {
        d.as_secs_f64() * 1000.0
    }

    let fields: &[Field] = &[
        ("select_total", |m| m.select_total),
        ("plan_total", |m| m.plan_total),
        ("emit_total", |m| m.emit_total),
        ("wall_total", |m| m.wall_total),
    ];

    let mut rows = serde_json::Map::new();
    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        let (p50, p90, p99) = (ms(p(&v, 0.50)), ms(p(&v, 0.90)), ms(p(&v, 0.99)));
        eprintln!(
            "  {name:14} p50={p50:>10.3}ms  p90={p90:>10.3}ms  p99={p99:>10.3}ms",
            name = *name,
        );
        rows.insert(
            (*name).to_string(),
            json!({ "p50_ms": p50, "p90_ms": p90, "p99_ms": p99 }),
        );
    }
    serde_json::Value::Object(rows)
}
