use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use depthwise::genomics::{SampleCoverageSummary, TargetCoverageTable};
use indexmap::IndexMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "depthwise", about = "Depth-of-coverage summaries from per-sample histograms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarise per-target, per-sample depth histograms.
    Summarize {
        /// Histogram file (`<target>\t<sample>\t<c0,c1,...>` per line).
        histograms: PathBuf,
        /// Bins to report the percentage of positions at or above.
        #[arg(long = "pct-bin", default_values_t = [1usize])]
        pct_bins: Vec<usize>,
    },
}

/// Histograms of every sample for one target, in first-seen order.
#[derive(Debug)]
struct TargetHistograms {
    target: String,
    samples: Vec<(String, Vec<u64>)>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            histograms,
            pct_bins,
        } => run_summarize(histograms, pct_bins)?,
    }

    Ok(())
}

fn run_summarize(path: PathBuf, pct_bins: Vec<usize>) -> Result<()> {
    let targets = read_histogram_file(&path)
        .with_context(|| format!("failed to read histograms from {}", path.display()))?;

    let max_samples = targets.iter().map(|t| t.samples.len()).max().unwrap_or(0);
    let num_bins = targets
        .iter()
        .flat_map(|t| t.samples.iter().map(|(_, h)| h.len()))
        .max()
        .unwrap_or(0);
    info!(
        targets = targets.len(),
        max_samples, num_bins, "loaded histograms"
    );

    let mut table = TargetCoverageTable::new(max_samples, num_bins);

    println!("target\tsample\ttotal\tq1_bin\tmedian_bin\tq3_bin\tpct_above");
    for target in &targets {
        for (sample, histogram) in &target.samples {
            let summary = SampleCoverageSummary::from_histogram(sample.as_str(), histogram, &pct_bins);
            let pct = summary
                .pct_above
                .iter()
                .map(|(bin, pct)| match pct {
                    Some(value) => format!("{bin}:{value:.2}"),
                    None => format!("{bin}:NA"),
                })
                .collect::<Vec<_>>()
                .join(",");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                target.target,
                summary.sample,
                summary.total,
                summary.lower_quartile_bin,
                summary.median_bin,
                summary.upper_quartile_bin,
                pct
            );
        }

        let histograms: Vec<&[u64]> = target.samples.iter().map(|(_, h)| h.as_slice()).collect();
        table.update(&histograms);
    }

    println!();
    let header: Vec<String> = (0..table.num_bins()).map(|bin| format!("bin_{bin}")).collect();
    println!("min_samples\t{}", header.join("\t"));
    for (rank, row) in table.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(u64::to_string).collect();
        println!("{}\t{}", rank + 1, cells.join("\t"));
    }

    Ok(())
}

fn read_histogram_file(path: &Path) -> Result<Vec<TargetHistograms>> {
    parse_histograms(BufReader::new(File::open(path)?))
}

/// Group histogram lines by target; a target's lines need not be adjacent.
fn parse_histograms<R: BufRead>(reader: R) -> Result<Vec<TargetHistograms>> {
    let mut by_target: IndexMap<String, Vec<(String, Vec<u64>)>> = IndexMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            bail!("line {}: expected 3 tab-separated fields, found {}", idx + 1, fields.len());
        }
        let histogram = fields[2]
            .split(',')
            .map(|count| count.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: invalid histogram", idx + 1))?;

        by_target
            .entry(fields[0].to_string())
            .or_default()
            .push((fields[1].to_string(), histogram));
    }

    Ok(by_target
        .into_iter()
        .map(|(target, samples)| TargetHistograms { target, samples })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(targets: &[TargetHistograms]) -> TargetCoverageTable {
        let max_samples = targets.iter().map(|t| t.samples.len()).max().unwrap_or(0);
        let mut table = TargetCoverageTable::new(max_samples, 2);
        for target in targets {
            let histograms: Vec<&[u64]> =
                target.samples.iter().map(|(_, h)| h.as_slice()).collect();
            table.update(&histograms);
        }
        table
    }

    #[test]
    fn interleaved_target_lines_are_grouped() {
        let input = "t1\ts1\t0,5\nt2\ts1\t5,0\nt1\ts2\t0,5\n";
        let targets = parse_histograms(input.as_bytes()).unwrap();

        let names: Vec<&str> = targets.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(names, vec!["t1", "t2"]);
        assert_eq!(targets[0].samples.len(), 2);
        assert_eq!(targets[0].samples[1].0, "s2");

        let table = fold(&targets);
        assert_eq!(table.rows(), &[vec![2u64, 1], vec![1, 1]]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = "# target\tsample\thistogram\n\nt1\ts1\t1,2,3\n";
        let targets = parse_histograms(input.as_bytes()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].samples[0].1, vec![1u64, 2, 3]);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_histograms("t1\ts1\n".as_bytes()).is_err());
        assert!(parse_histograms("t1\ts1\t1,x\n".as_bytes()).is_err());
    }
}
