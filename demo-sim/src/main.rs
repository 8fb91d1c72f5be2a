use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use codec::{
    apply_delta, decode_full_snapshot, encode_delta_with_scratch, encode_full_snapshot,
    CodecLimits, DeltaConfig, DeltaScratch, Snapshot,
};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "demo-sim",
    version,
    about = "Deterministic animation-variable sync simulation"
)]
struct Cli {
    /// Number of simulated actors, each with its own snapshot pair.
    #[arg(long, default_value_t = 16)]
    actors: u32,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u32,
    /// RNG seed for deterministic results.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Float change tolerance for the delta encoder.
    #[arg(long, default_value_t = codec::DEFAULT_FLOAT_EPSILON)]
    float_epsilon: f32,
    /// Optional cadence for bursty many-field changes.
    #[arg(long)]
    burst_every: Option<u32>,
    /// Optional output directory for per-tick diff captures.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Fail if average diff size exceeds this value.
    #[arg(long)]
    max_avg_diff_bytes: Option<u64>,
}

/// One actor's animation state: a sender-side pair plus the receiver replica.
struct Actor {
    acked: Snapshot,
    current: Snapshot,
    replica: Snapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let limits = CodecLimits::default();
    let config = DeltaConfig {
        float_epsilon: cli.float_epsilon,
    };

    if let Some(dir) = &cli.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    }

    let mut rng = Rng::new(cli.seed);
    let mut actors = init_actors(cli.actors, &mut rng);
    let mut scratch = DeltaScratch::new();
    let mut summary = Summary::new(&cli);

    // Tick 0 bootstraps every replica through the keyframe path.
    for actor in &mut actors {
        let bytes = encode_full_snapshot(&actor.acked);
        actor.replica = decode_full_snapshot(&bytes, &actor.acked.counts(), &limits)
            .context("bootstrap full snapshot")?;
        summary.push_full(bytes.len() as u64);
    }

    for tick in 1..=cli.ticks {
        let burst = cli
            .burst_every
            .is_some_and(|every| every > 0 && tick % every == 0);
        for (idx, actor) in actors.iter_mut().enumerate() {
            step_snapshot(&mut actor.current, &mut rng, burst);

            let bytes =
                encode_delta_with_scratch(&actor.acked, &actor.current, &config, &limits, &mut scratch)
                    .context("encode diff")?;
            apply_delta(&mut actor.replica, &bytes, &limits).context("apply diff")?;
            verify(&actor.replica, &actor.current, &config)
                .with_context(|| format!("actor {idx} diverged at tick {tick}"))?;

            if let Some(dir) = &cli.out_dir {
                write_capture(dir, idx, tick, &bytes)?;
            }
            summary.push_delta(bytes.len() as u64);
            actor.acked = actor.replica.clone();
            actor.current = actor.acked.clone();
        }
    }

    summary.finalize();
    summary.assert_budget(cli.max_avg_diff_bytes)?;
    println!("{}", serde_json::to_string_pretty(&summary).context("serialize summary")?);
    Ok(())
}

fn init_actors(count: u32, rng: &mut Rng) -> Vec<Actor> {
    let mut actors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut snapshot = Snapshot {
            booleans: vec![false; 48],
            integers: vec![0; 16],
            floats: vec![0.0; 24],
        };
        for b in &mut snapshot.booleans {
            *b = rng.next_u32() % 2 == 0;
        }
        for i in &mut snapshot.integers {
            *i = rng.next_u32() % 64;
        }
        for f in &mut snapshot.floats {
            *f = f32::from(rng.next_u32() as u16 % 360);
        }
        actors.push(Actor {
            acked: snapshot.clone(),
            current: snapshot.clone(),
            replica: snapshot,
        });
    }
    actors
}

fn step_snapshot(snapshot: &mut Snapshot, rng: &mut Rng, burst: bool) {
    // A calm tick flips a couple of graph variables; a burst tick touches
    // most of them, which is what an animation state transition looks like.
    let touches = if burst { 24 } else { 3 };
    for _ in 0..touches {
        let r = rng.next_u32();
        match r % 4 {
            0 => {
                let i = rng.index(snapshot.booleans.len());
                snapshot.booleans[i] = !snapshot.booleans[i];
            }
            1 => {
                let i = rng.index(snapshot.integers.len());
                snapshot.integers[i] = r % 64;
            }
            _ => {
                let i = rng.index(snapshot.floats.len());
                snapshot.floats[i] += f32::from(r as u16 % 16) / 4.0;
            }
        }
    }
}

/// Replica must match the sender exactly except for sub-epsilon float noise
/// the encoder is allowed to suppress.
fn verify(replica: &Snapshot, current: &Snapshot, config: &DeltaConfig) -> Result<()> {
    if replica.booleans != current.booleans || replica.integers != current.integers {
        anyhow::bail!("boolean/integer mismatch after apply");
    }
    if replica.floats.len() != current.floats.len() {
        anyhow::bail!("float count mismatch after apply");
    }
    for (idx, (&got, &want)) in replica.floats.iter().zip(&current.floats).enumerate() {
        if got != want && !config.nearly_equal(got, want) {
            anyhow::bail!("float {idx} drifted: got {got}, want {want}");
        }
    }
    Ok(())
}

fn write_capture(dir: &Path, actor: usize, tick: u32, bytes: &[u8]) -> Result<()> {
    let path = dir.join(format!("diff_a{actor:03}_t{tick:06}.bin"));
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn index(&mut self, len: usize) -> usize {
        self.next_u32() as usize % len.max(1)
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    actors: u32,
    ticks: u32,
    seed: u64,
    float_epsilon: f32,
    full_packets: u64,
    full_bytes_total: u64,
    delta_packets: u64,
    delta_bytes_total: u64,
    delta_bytes_min: u64,
    delta_bytes_max: u64,
    delta_bytes_avg: f64,
}

impl Summary {
    fn new(cli: &Cli) -> Self {
        Self {
            actors: cli.actors,
            ticks: cli.ticks,
            seed: cli.seed,
            float_epsilon: cli.float_epsilon,
            full_packets: 0,
            full_bytes_total: 0,
            delta_packets: 0,
            delta_bytes_total: 0,
            delta_bytes_min: u64::MAX,
            delta_bytes_max: 0,
            delta_bytes_avg: 0.0,
        }
    }

    fn push_full(&mut self, bytes: u64) {
        self.full_packets += 1;
        self.full_bytes_total += bytes;
    }

    fn push_delta(&mut self, bytes: u64) {
        self.delta_packets += 1;
        self.delta_bytes_total += bytes;
        self.delta_bytes_min = self.delta_bytes_min.min(bytes);
        self.delta_bytes_max = self.delta_bytes_max.max(bytes);
    }

    fn finalize(&mut self) {
        if self.delta_packets == 0 {
            self.delta_bytes_min = 0;
        } else {
            self.delta_bytes_avg = self.delta_bytes_total as f64 / self.delta_packets as f64;
        }
    }

    fn assert_budget(&self, max_avg: Option<u64>) -> Result<()> {
        if let Some(max) = max_avg {
            if self.delta_bytes_avg > max as f64 {
                anyhow::bail!(
                    "average diff size {:.1} exceeds budget {max}",
                    self.delta_bytes_avg
                );
            }
        }
        Ok(())
    }
}
