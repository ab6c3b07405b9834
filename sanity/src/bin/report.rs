use sanity::*;
use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A utility for scoring candidate placements
/// and picking the best one.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arg {
    /// Placement files (JSON)
    #[arg(required = true, value_parser = clap::value_parser!(PathBuf))]
    inputs:     Vec<PathBuf>,

    /// Metric to minimize when ranking
    #[arg(short, long, value_enum, default_value_t = Objective::MakeSpan)]
    objective:  Objective,

    /// Print the reports as JSON
    #[arg(long)]
    json:       bool,

    /// Fail if any processor rejected one of its jobs
    #[arg(long)]
    strict:     bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    objective:  Objective,
    best:       Option<&'a Path>,
    reports:    &'a [Report],
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Arg::parse();
    let mut reports = vec![];
    for (path, res) in cli.inputs.iter().zip(evaluate_all::<JsonParser>(&cli.inputs)) {
        let report = res.with_context(|| format!("evaluating {}", path.display()))?;
        if cli.strict && !report.rejected.is_empty() {
            return Err(SanityError::Rejected {
                path:   path.clone(),
                count:  report.rejected.len(),
            }.into());
        }
        reports.push(report);
    }

    let winner = best(&reports, cli.objective);
    if let Some(idx) = winner {
        info!(
            objective = ?cli.objective,
            score = cli.objective.score(&reports[idx]),
            "best candidate: {}",
            reports[idx].source.display()
        );
    }

    if cli.json {
        let summary = Summary {
            objective:  cli.objective,
            best:       winner.map(|idx| reports[idx].source.as_path()),
            reports:    &reports,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for r in &reports {
            println!("{}\n", r);
        }
        if let Some(idx) = winner {
            println!("Best ({:?}):\t{}", cli.objective, reports[idx].source.display());
        }
    }

    Ok(())
}
