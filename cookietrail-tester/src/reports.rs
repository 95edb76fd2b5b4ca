//! Report generation for simulation sweeps.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::simulation::RunRecord;

/// Aggregate statistics over a sweep of runs.
#[derive(Debug, Clone, Serialize)]
pub struct SweepAggregate {
    pub runs: usize,
    pub victories: usize,
    pub bankruptcies: usize,
    pub timeouts: usize,
    pub win_rate: f64,
    pub mean_days: f64,
    pub mean_final_funds_cents: f64,
    pub mean_cookies_sold: f64,
}

#[must_use]
pub fn aggregate_runs(records: &[RunRecord]) -> SweepAggregate {
    let runs = records.len();
    let victories = records
        .iter()
        .filter(|r| r.ending_label() == "victory")
        .count();
    let bankruptcies = records
        .iter()
        .filter(|r| r.ending_label() == "bankrupt")
        .count();
    let timeouts = runs - victories - bankruptcies;
    let denom = runs.max(1) as f64;
    SweepAggregate {
        runs,
        victories,
        bankruptcies,
        timeouts,
        win_rate: victories as f64 / denom,
        mean_days: records.iter().map(|r| f64::from(r.days_played)).sum::<f64>() / denom,
        mean_final_funds_cents: records
            .iter()
            .map(|r| r.final_funds_cents as f64)
            .sum::<f64>()
            / denom,
        mean_cookies_sold: records
            .iter()
            .map(|r| f64::from(r.total_cookies_sold))
            .sum::<f64>()
            / denom,
    }
}

/// Human-readable summary for the terminal.
pub fn generate_console_report(
    out: &mut dyn Write,
    records: &[RunRecord],
    aggregate: &SweepAggregate,
    duration: Duration,
) -> Result<()> {
    writeln!(out, "{}", "Playthrough Summary".bright_yellow().bold())?;
    writeln!(out, "{}", "-".repeat(40).yellow())?;

    for record in records {
        let label = match record.ending_label() {
            "victory" => "victory".green(),
            "bankrupt" => "bankrupt".red(),
            other => other.yellow(),
        };
        writeln!(
            out,
            "  seed {:>10} [{}] {:>8}  days {:>3}  funds ${:>9.2}  cookies {:>4}  rep {:.2}",
            record.seed,
            record.skill,
            label,
            record.days_played,
            record.final_funds_cents as f64 / 100.0,
            record.total_cookies_sold,
            record.reputation,
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} runs: {} victories, {} bankruptcies, {} timeouts ({:.0}% win rate)",
        aggregate.runs,
        aggregate.victories.to_string().green(),
        aggregate.bankruptcies.to_string().red(),
        aggregate.timeouts,
        aggregate.win_rate * 100.0,
    )?;
    writeln!(
        out,
        "  mean: {:.1} days, ${:.2} final funds, {:.1} cookies sold",
        aggregate.mean_days,
        aggregate.mean_final_funds_cents / 100.0,
        aggregate.mean_cookies_sold,
    )?;
    writeln!(out, "  elapsed: {duration:?}")?;
    Ok(())
}

/// Machine-readable dump of the raw records plus the aggregate.
pub fn generate_json_report(
    out: &mut dyn Write,
    records: &[RunRecord],
    aggregate: &SweepAggregate,
) -> Result<()> {
    #[derive(Serialize)]
    struct Report<'a> {
        aggregate: &'a SweepAggregate,
        runs: &'a [RunRecord],
    }
    let report = Report { aggregate, runs: records };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookietrail_game::Ending;

    fn sample(seed: u64, ending: Option<Ending>) -> RunRecord {
        RunRecord {
            seed,
            skill: "expert",
            ending,
            days_played: 4,
            final_funds_cents: 62_000,
            reputation: 1.2,
            total_cookies_sold: 40,
        }
    }

    #[test]
    fn aggregate_counts_endings() {
        let records = vec![
            sample(1, Some(Ending::Victory)),
            sample(2, Some(Ending::Victory)),
            sample(3, Some(Ending::Bankrupt)),
            sample(4, None),
        ];
        let agg = aggregate_runs(&records);
        assert_eq!(agg.runs, 4);
        assert_eq!(agg.victories, 2);
        assert_eq!(agg.bankruptcies, 1);
        assert_eq!(agg.timeouts, 1);
        assert!((agg.win_rate - 0.5).abs() < f64::EPSILON);
        assert!((agg.mean_days - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_of_empty_sweep_is_zeroed() {
        let agg = aggregate_runs(&[]);
        assert_eq!(agg.runs, 0);
        assert!(agg.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn console_report_mentions_every_seed() {
        let records = vec![sample(11, Some(Ending::Victory)), sample(22, None)];
        let agg = aggregate_runs(&records);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &records, &agg, Duration::from_millis(5)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("11"));
        assert!(text.contains("22"));
        assert!(text.contains("win rate"));
    }

    #[test]
    fn json_report_is_valid_json() {
        let records = vec![sample(1, Some(Ending::Bankrupt))];
        let agg = aggregate_runs(&records);
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &records, &agg).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["aggregate"]["runs"], 1);
        assert_eq!(value["runs"][0]["seed"], 1);
    }
}
