mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use cookietrail_game::GameConfig;
use policy::BotSkill;
use reports::{aggregate_runs, generate_console_report, generate_json_report};
use simulation::{RunRecord, SimulationConfig, run_simulation};

#[derive(Debug, Parser)]
#[command(name = "cookietrail-tester", version)]
#[command(about = "Automated QA playthroughs for Cookie Trailer Tycoon game logic")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per seed (seed+i for each extra iteration)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Bot arithmetic skill
    #[arg(long, value_enum, default_value_t = BotSkill::Competent)]
    skill: BotSkill,

    /// Day cap per run before a run counts as a timeout
    #[arg(long, default_value_t = 60)]
    max_days: u32,

    /// Optional KEY=VALUE settings file overriding the default game tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{}", "🍪 Cookietrail Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());

    let start_time = Instant::now();
    let cfg = load_game_config(args.config.as_deref())?;
    let seeds = parse_seeds(&args.seeds)?;

    let records = run_sweep(&args, &cfg, &seeds)?;
    write_report(&args, &records, start_time)?;

    if records.iter().any(|r| r.ending.is_none()) {
        std::process::exit(1);
    }
    Ok(())
}

fn load_game_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(GameConfig::from_key_values(&text))
        }
        None => Ok(GameConfig::default()),
    }
}

fn parse_seeds(csv: &str) -> Result<Vec<u64>> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u64>().with_context(|| format!("invalid seed: {s}")))
        .collect()
}

fn run_sweep(args: &Args, cfg: &GameConfig, seeds: &[u64]) -> Result<Vec<RunRecord>> {
    let mut records = Vec::with_capacity(seeds.len() * args.iterations);
    for &seed in seeds {
        for i in 0..args.iterations as u64 {
            let sim = SimulationConfig::new(args.skill, seed + i).with_max_days(args.max_days);
            let record = run_simulation(cfg, sim)?;
            if args.verbose {
                log::info!(
                    "seed {} finished: {} after {} days",
                    record.seed,
                    record.ending_label(),
                    record.days_played
                );
            }
            records.push(record);
        }
    }
    Ok(records)
}

fn write_report(args: &Args, records: &[RunRecord], start_time: Instant) -> Result<()> {
    let aggregate = aggregate_runs(records);
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, records, &aggregate)?,
        _ => generate_console_report(
            &mut output_target,
            records,
            &aggregate,
            start_time.elapsed(),
        )?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_lists() {
        assert_eq!(parse_seeds("1337").unwrap(), vec![1337]);
        assert_eq!(parse_seeds(" 1, 2 ,3 ").unwrap(), vec![1, 2, 3]);
        assert!(parse_seeds("1,nope").is_err());
    }

    #[test]
    fn default_config_when_no_file_given() {
        let cfg = load_game_config(None).unwrap();
        assert_eq!(cfg.starting_funds_cents, 50_000);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let temp = std::env::temp_dir().join("cookietrail-tester-settings.txt");
        std::fs::write(&temp, "STARTING_FUNDS=123\n# comment\nCOOKIE_PRICE=2\n").unwrap();
        let cfg = load_game_config(Some(&temp)).unwrap();
        assert_eq!(cfg.starting_funds_cents, 12_300);
        assert_eq!(cfg.cookie_price_cents, 200);
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }

    #[test]
    fn json_report_lands_in_output_file() {
        let temp = std::env::temp_dir().join("cookietrail-tester-report.json");
        let args = Args {
            seeds: "7".to_string(),
            iterations: 1,
            skill: BotSkill::Expert,
            max_days: 5,
            config: None,
            report: "json".to_string(),
            output: Some(temp.clone()),
            verbose: false,
        };
        write_report(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("aggregate"));
    }
}
