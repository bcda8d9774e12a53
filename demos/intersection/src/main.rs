//! ixsim: stochastic queueing simulation of a signalised intersection.
//!
//! Builds an intersection from a named preset or a JSON scenario file,
//! applies command-line overrides, runs one seeded simulation (or a batch of
//! independent replicates), and prints a per-arm table with saturation and
//! cross-arm summary statistics.  `--output` exports CSV files.

mod scenario;


use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use ix_analysis::{ReportStats, Saturation, SaturationEstimator, SummaryStats, across_runs};
use ix_core::{ArmId, ArrivalSampling, Tick};
use ix_output::{CsvWriter, SimOutputObserver, summary_rows};
use ix_sim::sweep::replicate;
use ix_sim::{RunReport, SimBuilder, SimObserver};

use scenario::{Overrides, Scenario};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SamplingArg {
    /// One arrival trial per arm per full phase pass.
    PerCycle,
    /// One arrival trial per arm per second.
    PerTick,
}

impl From<SamplingArg> for ArrivalSampling {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::PerCycle => ArrivalSampling::PerCycle,
            SamplingArg::PerTick => ArrivalSampling::PerTick,
        }
    }
}

#[derive(Parser)]
#[command(name = "ixsim")]
#[command(about = "Stochastic queueing simulation of a signalised intersection")]
struct Cli {
    /// Topology preset: plus, tee or star.
    #[arg(long, default_value = "plus", conflicts_with = "scenario")]
    preset: String,

    /// JSON scenario file holding a model and a run config.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Arrival rate in veh/h; one value for every arm or one per arm
    /// (comma separated).  Defaults to 400 for presets.
    #[arg(long, value_delimiter = ',')]
    rate: Option<Vec<f64>>,

    /// Simulated seconds.  Defaults to 1800 for presets.
    #[arg(long)]
    horizon: Option<u64>,

    /// Per-second departure probability on green.
    #[arg(long)]
    service_prob: Option<f64>,

    /// Arrival sampling.  Defaults to per-tick; per-cycle draws once per
    /// phase pass and realises far less than the nominal demand.
    #[arg(long, value_enum)]
    sampling: Option<SamplingArg>,

    #[arg(long)]
    seed: Option<u64>,

    /// Cycle length for --split; defaults to the current cycle.
    #[arg(long)]
    cycle: Option<u32>,

    /// Green split in percent of the cycle, one value per phase.
    #[arg(long, value_delimiter = ',')]
    split: Option<Vec<f64>>,

    /// Saturation flow in veh/h used for the saturation estimate.
    #[arg(long, default_value_t = ix_analysis::DEFAULT_MAX_FLOW_PER_HOUR)]
    max_flow: f64,

    /// Queue snapshot interval in ticks (0 disables).
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for CSV export.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write arm summaries to `output.db` in the output directory
    /// (requires the `sqlite` feature).
    #[arg(long, requires = "output")]
    sqlite: bool,

    /// Independent replicates to run; more than one prints cross-run stats
    /// and rejects --output, --sqlite and --time-limit.
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Abort a single run after this many wall-clock seconds.
    #[arg(long)]
    time_limit: Option<u64>,

    /// Write the resolved scenario to this JSON file and exit.
    #[arg(long)]
    save_scenario: Option<PathBuf>,
}

impl Cli {
    /// Export and wall-clock limits apply to a single run only.
    fn check_replicates(&self) -> Result<()> {
        if self.runs <= 1 {
            return Ok(());
        }
        let single_only: Vec<&str> = [
            ("--output", self.output.is_some()),
            ("--sqlite", self.sqlite),
            ("--time-limit", self.time_limit.is_some()),
        ]
        .into_iter()
        .filter_map(|(flag, set)| set.then_some(flag))
        .collect();
        if !single_only.is_empty() {
            bail!("{} cannot be combined with --runs {}", single_only.join(", "), self.runs);
        }
        Ok(())
    }
}

// ── Progress logging ──────────────────────────────────────────────────────────

/// Logs every `every`-th pass at info level and all queue snapshots at debug.
struct ProgressLog {
    every:      u64,
    arrivals:   u64,
    departures: u64,
}

impl SimObserver for ProgressLog {
    fn on_pass_start(&mut self, tick: Tick, pass: u64) {
        if pass > 0 && pass.is_multiple_of(self.every) {
            log::info!(
                "pass {pass} at {tick}: {} arrived, {} departed",
                self.arrivals,
                self.departures
            );
        }
    }

    fn on_arrival(&mut self, _tick: Tick, _arm: ArmId) {
        self.arrivals += 1;
    }

    fn on_departure(&mut self, _tick: Tick, _arm: ArmId, _delay_secs: u64) {
        self.departures += 1;
    }

    fn on_queue_snapshot(&mut self, tick: Tick, lengths: &[usize]) {
        log::debug!("queues at {tick}: {lengths:?}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    cli.check_replicates()?;

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::preset(&cli.preset)?,
    };
    scenario.apply(Overrides {
        rates:               cli.rate.clone(),
        horizon_secs:        cli.horizon,
        service_probability: cli.service_prob,
        sampling:            cli.sampling.map(Into::into),
        seed:                cli.seed,
        snapshot_interval:   cli.snapshot_interval,
        cycle_secs:          cli.cycle,
        split:               cli.split.clone(),
    })?;
    ix_model::validate_run(&scenario.model, &scenario.config)?;

    if let Some(path) = &cli.save_scenario {
        scenario.save(path)?;
        log::info!("scenario written to {}", path.display());
        return Ok(());
    }

    print_header(&scenario);
    let saturation = SaturationEstimator::shared(cli.max_flow)
        .estimate(&scenario.model, &scenario.config.arrival_rates_per_hour)?;

    if cli.runs > 1 {
        run_replicates(&scenario, &saturation, cli.runs)
    } else {
        run_single(&cli, scenario, &saturation)
    }
}

fn run_single(cli: &Cli, scenario: Scenario, saturation: &[Saturation]) -> Result<()> {
    let Scenario { model, config } = scenario;
    let mut builder = SimBuilder::seeded(model.clone(), config.clone());
    if let Some(secs) = cli.time_limit {
        builder = builder.time_limit(Duration::from_secs(secs));
    }
    let mut sim = builder.build()?;
    let progress = ProgressLog { every: 10, arrivals: 0, departures: 0 };

    let t0 = Instant::now();
    let report = match &cli.output {
        Some(dir) => {
            let rows_for = |report: &RunReport| summary_rows(&model, &config, report, saturation);

            let mut obs = (progress, SimOutputObserver::new(CsvWriter::new(dir)?));
            let report = sim.run(&mut obs)?;
            obs.1.finish(&rows_for(&report))?;
            log::info!("CSV written to {}", dir.display());

            if cli.sqlite {
                #[cfg(feature = "sqlite")]
                {
                    use ix_output::OutputWriter;

                    let mut db = ix_output::SqliteWriter::new(dir)?;
                    db.write_arm_summaries(&rows_for(&report))?;
                    db.finish()?;
                    log::info!("arm summaries written to {}", dir.join("output.db").display());
                }
                #[cfg(not(feature = "sqlite"))]
                log::error!("--sqlite ignored: rebuild with --features sqlite");
            }
            report
        }
        None => {
            let mut obs = progress;
            sim.run(&mut obs)?
        }
    };
    log::info!("simulation complete in {:.3} s", t0.elapsed().as_secs_f64());

    print_arm_table(&report, saturation);
    if let Some(stats) = ReportStats::from_report(&report) {
        println!();
        print_stats_header();
        print_stats_row("mean delay (s)", &stats.mean_delay);
        print_stats_row("max queue", &stats.max_queue);
        print_stats_row("served", &stats.served);
    }
    Ok(())
}

fn run_replicates(scenario: &Scenario, saturation: &[Saturation], runs: usize) -> Result<()> {
    let t0 = Instant::now();
    let reports = replicate(&scenario.model, &scenario.config, runs, scenario.config.seed)
        .into_iter()
        .collect::<Result<Vec<RunReport>, _>>()?;
    log::info!("{runs} runs complete in {:.3} s", t0.elapsed().as_secs_f64());

    println!("Mean delay (s) per arm across {runs} runs");
    print_per_arm_stats(&across_runs(&reports, |a| a.mean_delay_secs), saturation);
    println!();
    println!("Max queue per arm across {runs} runs");
    print_per_arm_stats(&across_runs(&reports, |a| a.max_queue as f64), saturation);
    Ok(())
}

// ── Tables ────────────────────────────────────────────────────────────────────

fn print_header(s: &Scenario) {
    println!("=== ixsim ===");
    println!(
        "Arms: {}  |  Phases: {}  |  Cycle: {} s  |  Horizon: {} s  |  Sampling: {}  |  Seed: {}",
        s.model.n_arms,
        s.model.phases.len(),
        s.model.total_cycle_seconds(),
        s.config.horizon_secs,
        s.config.arrival_sampling,
        s.config.seed,
    );
    for p in &s.model.phases {
        let arms: Vec<String> = p.arms_active.iter().map(|a| a.0.to_string()).collect();
        println!("  {:<14} {:>4} s  arms [{}]", p.name, p.green_time, arms.join(", "));
    }
    println!();
}

fn fmt_saturation(s: Option<&Saturation>) -> String {
    match s {
        Some(Saturation::Ratio(r)) => format!("{r:.3}"),
        Some(Saturation::Unserved) => "unserved".to_owned(),
        None => "-".to_owned(),
    }
}

fn print_arm_table(report: &RunReport, saturation: &[Saturation]) {
    println!(
        "{:<5} {:>10} {:>10} {:>9} {:>8} {:>8} {:>9} {:>10}",
        "Arm", "MeanDelay", "MaxDelay", "MaxQueue", "Arrived", "Served", "Remaining", "Saturation"
    );
    println!("{}", "-".repeat(76));
    for a in &report.arms {
        println!(
            "{:<5} {:>10.2} {:>10} {:>9} {:>8} {:>8} {:>9} {:>10}",
            a.arm.0,
            a.mean_delay_secs,
            a.max_delay_secs,
            a.max_queue,
            a.arrivals,
            a.served,
            a.remaining_queue,
            fmt_saturation(saturation.get(a.arm.index())),
        );
    }
    println!(
        "Ended at {} after {} passes",
        ix_core::SimClock { current_tick: report.elapsed },
        report.passes_completed
    );
}

fn print_stats_header() {
    println!("{:<16} {:>10} {:>10} {:>10} {:>10}", "Across arms", "Mean", "Min", "Max", "StdDev");
    println!("{}", "-".repeat(60));
}

fn print_stats_row(label: &str, s: &SummaryStats) {
    println!("{label:<16} {:>10.2} {:>10.2} {:>10.2} {:>10.2}", s.mean, s.min, s.max, s.std_dev);
}

fn print_per_arm_stats(stats: &[SummaryStats], saturation: &[Saturation]) {
    println!(
        "{:<5} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Arm", "Mean", "Min", "Max", "StdDev", "Saturation"
    );
    println!("{}", "-".repeat(60));
    for (i, s) in stats.iter().enumerate() {
        println!(
            "{i:<5} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10}",
            s.mean,
            s.min,
            s.max,
            s.std_dev,
            fmt_saturation(saturation.get(i)),
        );
    }
}
