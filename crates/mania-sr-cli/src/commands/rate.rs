//! Rate command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mania_sr_core::{
    ChartDocument, EngineConfig, RateModifier, RatingOutcome, RatingResult, rate_batch,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, warn};

/// One line of output: a rated chart or a file that could not be read.
#[derive(Serialize)]
#[serde(untagged)]
enum Report<'a> {
    Rated {
        path: &'a Path,
        #[serde(flatten)]
        result: &'a RatingResult,
    },
    Failed {
        path: &'a Path,
        error: String,
    },
}

/// Run the rate command
pub fn run(
    files: &[PathBuf],
    rate: Option<RateModifier>,
    timings: bool,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let config = EngineConfig {
        collect_timings: config.collect_timings || timings,
        ..config
    };

    let mut charts = Vec::with_capacity(files.len());
    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        match ChartDocument::load(path) {
            Ok(mut document) => {
                if let Some(rate) = rate {
                    document.rate = rate;
                }
                entries.push(Ok(charts.len()));
                charts.push(document);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                entries.push(Err(e.to_string()));
            }
        }
    }

    if charts.is_empty() {
        bail!("No chart document could be loaded");
    }

    let results = rate_batch(&charts, &config);
    info!("Rated {} of {} charts", results.len(), files.len());

    let reports: Vec<Report> = files
        .iter()
        .zip(entries)
        .map(|(path, entry)| match entry {
            Ok(index) => Report::Rated {
                path,
                result: &results[index],
            },
            Err(error) => Report::Failed { path, error },
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load engine config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn print_report(report: &Report) {
    match report {
        Report::Rated { path, result } => {
            println!("{}\t{}", path.display(), colored_label(result));
            if let Some(timings) = &result.stage_timings {
                for (stage, elapsed) in timings {
                    println!("  {:<10} {:?}", stage, elapsed.dimmed());
                }
            }
        }
        Report::Failed { path, error } => {
            println!("{}\t{}", path.display(), format!("error: {}", error).red());
        }
    }
}

fn colored_label(result: &RatingResult) -> String {
    let label = rating_label(result);
    match result.outcome {
        RatingOutcome::Rated => label.green().to_string(),
        RatingOutcome::Empty => label.dimmed().to_string(),
        RatingOutcome::Unsupported(_) => label.yellow().to_string(),
        RatingOutcome::Fault { .. } => label.red().to_string(),
    }
}

/// Rating as shown to the user; sentinels become `N/A` with the reason.
fn rating_label(result: &RatingResult) -> String {
    match &result.outcome {
        RatingOutcome::Rated => format!("{:.4}", result.rating),
        RatingOutcome::Empty => "N/A (empty chart)".to_string(),
        RatingOutcome::Unsupported(reason) => format!("N/A ({})", reason),
        RatingOutcome::Fault { message } => format!("N/A (internal error: {})", message),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mania_sr_core::{DifficultyContext, NoteEvent, rate_with_config};
    use tempfile::NamedTempFile;

    use super::*;

    fn chart_file(key_count: u32, note_count: u32) -> NamedTempFile {
        let notes = (0..note_count)
            .map(|i| NoteEvent::tap(i as usize % 4, i * 200))
            .collect();
        let document = ChartDocument::new(DifficultyContext::new(key_count, 8.0), notes);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&document).unwrap()).unwrap();
        file
    }

    #[test]
    fn test_rating_label() {
        let notes: Vec<NoteEvent> = (0..20).map(|i| NoteEvent::tap(0, i * 150)).collect();
        let context = DifficultyContext::new(4, 8.0);

        let rated = rate_with_config(&notes, &context, &EngineConfig::default());
        let label = rating_label(&rated);
        assert_eq!(label, format!("{:.4}", rated.rating));

        let unsupported = rate_with_config(
            &notes,
            &DifficultyContext::new(11, 8.0),
            &EngineConfig::default(),
        );
        assert_eq!(
            rating_label(&unsupported),
            "N/A (key count 11 has no adjacency data)"
        );

        let empty = rate_with_config(&[], &context, &EngineConfig::default());
        assert_eq!(rating_label(&empty), "N/A (empty chart)");
    }

    #[test]
    fn test_run_rates_files_and_skips_unreadable_ones() {
        let good = chart_file(4, 20);
        let unsupported = chart_file(13, 20);
        let files = vec![
            good.path().to_path_buf(),
            PathBuf::from("/nonexistent/chart.json"),
            unsupported.path().to_path_buf(),
        ];

        assert!(run(&files, Some(RateModifier::DoubleTime), true, false, None).is_ok());
        assert!(run(&files, None, false, true, None).is_ok());
    }

    #[test]
    fn test_run_fails_when_nothing_loads() {
        let files = vec![PathBuf::from("/nonexistent/chart.json")];
        assert!(run(&files, None, false, false, None).is_err());
    }

    #[test]
    fn test_run_reports_bad_config() {
        let good = chart_file(4, 20);
        let mut config = NamedTempFile::new().unwrap();
        write!(config, "not json").unwrap();

        let result = run(
            &[good.path().to_path_buf()],
            None,
            false,
            false,
            Some(config.path()),
        );
        assert!(result.is_err());
    }
}
