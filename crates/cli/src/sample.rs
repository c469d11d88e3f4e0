//! Draw the stratified sample and export the annotation sheet.

use serde::Serialize;

use sentival_config::ValidationConfig;
use sentival_io::{load_corpus, write_sample, CsvFormat, IoError};
use sentival_recon::sampler::distribution;
use sentival_recon::{create_sample, Sentiment};

use crate::exit_codes::EXIT_ERROR;
use crate::util::pad_right;
use crate::CliError;

#[derive(Serialize)]
struct SampleSummary {
    status: &'static str,
    corpus_size: usize,
    requested: usize,
    sample_size: usize,
    seed: u64,
    output: String,
    distribution: Vec<ClassCount>,
}

#[derive(Serialize)]
struct ClassCount {
    label: Sentiment,
    count: usize,
}

pub fn cmd_sample(config: &ValidationConfig, size: usize, seed: u64, json: bool) -> Result<(), CliError> {
    let fmt = CsvFormat::new(&config.io.encoding, config.io.delimiter)?;
    let rule = "=".repeat(80);

    if !json {
        println!("{rule}\nCREACIÓN DE MUESTRA PARA VALIDACIÓN MANUAL\n{rule}");
    }

    let corpus = load_corpus(&config.features_path(), &config.texts_path(), &fmt).map_err(|e| {
        let missing = matches!(e, IoError::MissingInput(_));
        let err = CliError::from(e);
        if missing {
            err.with_hint("run `sentival --init` to create the data folders, then add the corpus files")
        } else {
            err
        }
    })?;

    if !json {
        println!("✓ Total de publicaciones: {}", corpus.len());
    }

    let sample = create_sample(&corpus, size, seed)?;
    if sample.len() < size {
        eprintln!(
            "note: corpus has {} posts, sample reduced from {} to {}",
            corpus.len(),
            size,
            sample.len()
        );
    }

    config.ensure_dirs()?;
    let output = config.sample_path();
    write_sample(&output, &sample, &fmt)?;
    log::info!("sample of {} written to {}", sample.len(), output.display());

    let counts = distribution(&sample);

    if json {
        let summary = SampleSummary {
            status: "ok",
            corpus_size: corpus.len(),
            requested: size,
            sample_size: sample.len(),
            seed,
            output: output.display().to_string(),
            distribution: counts
                .iter()
                .map(|&(label, count)| ClassCount { label, count })
                .collect(),
        };
        let json_str = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    println!("\n✓ Muestra creada: {} publicaciones", sample.len());
    println!("✓ Guardado en: {}", output.display());

    println!("\nDistribución de sentimientos en la muestra:");
    for (label, count) in &counts {
        println!("  {} {count:>5}", pad_right(label.as_str(), 4));
    }

    print_instructions(config);
    Ok(())
}

fn print_instructions(config: &ValidationConfig) {
    let rule = "=".repeat(80);
    println!("\n{rule}\nINSTRUCCIONES PARA ETIQUETADO MANUAL:\n{rule}");
    println!("1. Abre el archivo: {}", config.paths.sample_file);
    println!("2. Lee cada 'texto_publicacion'");
    println!("3. En 'sentimiento_manual', escribe:");
    for label in Sentiment::ALL {
        println!("   - {} ({})", label.as_str(), label.description());
    }
    println!("4. Guarda el archivo como: {}", config.paths.annotated_file);
    println!("5. Ejecuta: sentival --evaluar");
    println!("{rule}");
}
