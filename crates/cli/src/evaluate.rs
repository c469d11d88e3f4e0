//! Score the annotated sample and write the evaluation artifacts.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use sentival_config::ValidationConfig;
use sentival_io::report::{heavy_rule, interpretation, light_rule, percent};
use sentival_io::{load_annotated, write_evaluation, CsvFormat, EvaluationOutputs, IoError, WrittenOutputs};
use sentival_recon::{evaluate, EvaluationReport, EvaluationStage};

use crate::exit_codes::EXIT_ERROR;
use crate::util::preview;
use crate::CliError;

/// Error examples shown on the console.
const ERROR_EXAMPLES: usize = 5;
/// Display columns of post text per example.
const PREVIEW_WIDTH: usize = 100;

#[derive(Serialize)]
struct RunMeta {
    engine_version: &'static str,
    run_at: String,
    annotated_file: String,
}

#[derive(Serialize)]
struct OutputPaths {
    errors: Option<String>,
    report: String,
    heatmap: String,
}

#[derive(Serialize)]
struct EvaluationOutput<'a> {
    meta: RunMeta,
    #[serde(flatten)]
    report: &'a EvaluationReport,
    outputs: OutputPaths,
}

pub fn cmd_evaluate(config: &ValidationConfig, json: bool) -> Result<(), CliError> {
    let fmt = CsvFormat::new(&config.io.encoding, config.io.delimiter)?;
    let annotated = config.annotated_path();

    if !json {
        let heavy = heavy_rule();
        println!("{heavy}\nEVALUACIÓN DE PRECISIÓN DEL MODELO\n{heavy}");
    }

    let rows = load_annotated(&annotated, &fmt).map_err(|e| {
        let missing = matches!(e, IoError::MissingInput(_));
        let err = CliError::from(e);
        if missing {
            err.with_hint(format!(
                "annotate {} and save it as {}",
                config.paths.sample_file, config.paths.annotated_file
            ))
        } else {
            err
        }
    })?;

    let report = evaluate(&rows, &config.thresholds)?;
    if report.unannotated > 0 {
        eprintln!(
            "Advertencia: hay publicaciones sin etiquetar\n   Sin etiquetar: {}",
            report.unannotated
        );
    }

    config.ensure_dirs()?;
    let outputs = EvaluationOutputs {
        errors: config.errors_path(),
        report: config.report_path(),
        heatmap: config.heatmap_path(),
    };
    let written = write_evaluation(&report, &outputs, &config.thresholds, &fmt)?;
    log::debug!("evaluation stage: {} ({})", EvaluationStage::Reported, written.report.display());

    if json {
        let output = EvaluationOutput {
            meta: RunMeta {
                engine_version: env!("CARGO_PKG_VERSION"),
                run_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                annotated_file: annotated.display().to_string(),
            },
            report: &report,
            outputs: OutputPaths {
                errors: written.errors.as_ref().map(|p| p.display().to_string()),
                report: written.report.display().to_string(),
                heatmap: written.heatmap.display().to_string(),
            },
        };
        let json_str = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        eprintln!(
            "accuracy {} over {} posts, verdict {}",
            percent(report.accuracy),
            report.annotated,
            report.verdict
        );
        return Ok(());
    }

    print_console(&report, &written);
    Ok(())
}

fn print_console(report: &EvaluationReport, written: &WrittenOutputs) {
    let heavy = heavy_rule();
    let light = light_rule();

    println!("\n✓ Publicaciones validadas: {}", report.annotated);

    println!("\n{heavy}\nACCURACY: {}\n{heavy}", percent(report.accuracy));

    println!("\nREPORTE DE CLASIFICACIÓN:\n{light}");
    print!("{}", report.metrics.to_report_table());

    println!("\nMATRIZ DE CONFUSIÓN:\n{light}");
    print!("{}", report.confusion);

    println!("\n✓ Matriz guardada en: {}", written.heatmap.display());

    if let Some(errors_path) = &written.errors {
        println!("\n{heavy}\nANÁLISIS DE ERRORES ({} casos):\n{heavy}", report.errors.len());
        println!("✓ Errores exportados a: {}", errors_path.display());

        println!("\nEjemplos de errores:\n{light}");
        for error in report.errors.iter().take(ERROR_EXAMPLES) {
            println!("\nTexto: {}", preview(&error.text, PREVIEW_WIDTH));
            println!("Predicho: {} | Real: {}", error.automated, error.manual);
        }
    } else if written.stale_errors_removed {
        eprintln!("note: no errors; previous error file removed");
    }

    println!("\n✓ Reporte completo guardado en: {}", written.report.display());

    println!("\n{heavy}\nINTERPRETACIÓN:\n{heavy}");
    for line in interpretation(report.verdict) {
        println!("{line}");
    }
    println!("{heavy}");
}
