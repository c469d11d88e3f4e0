// Plain-text evaluation report

use sentival_recon::{EvaluationReport, Verdict, VerdictThresholds};

pub const RULE_WIDTH: usize = 80;

pub fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// `0.7512` -> `75.12%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn verdict_mark(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Acceptable => "✓",
        Verdict::Marginal => "⚠️",
        Verdict::Low => "❌",
    }
}

/// `✓ RESULTADO: ACEPTABLE (≥75%)`
pub fn verdict_line(verdict: Verdict, thresholds: &VerdictThresholds) -> String {
    format!(
        "{} RESULTADO: {} ({})",
        verdict_mark(verdict),
        verdict.heading(),
        thresholds.range_label(verdict)
    )
}

/// Reader-facing interpretation of a verdict, one line per entry.
pub fn interpretation(verdict: Verdict) -> &'static [&'static str] {
    match verdict {
        Verdict::Acceptable => &[
            "✓ El modelo tiene una precisión ACEPTABLE",
            "  Los resultados del análisis de sentimiento son confiables",
        ],
        Verdict::Marginal => &[
            "⚠️ El modelo tiene una precisión MARGINAL",
            "  Los resultados deben interpretarse con cautela",
            "  Considera usar un modelo diferente o afinar parámetros",
        ],
        Verdict::Low => &[
            "❌ El modelo tiene una precisión BAJA",
            "  Los resultados NO son confiables",
            "  Se recomienda cambiar de modelo o revisar los datos",
        ],
    }
}

/// Render the report file: header, validated count, accuracy, classification
/// table, labelled confusion matrix and verdict line.
pub fn render_report(report: &EvaluationReport, thresholds: &VerdictThresholds) -> String {
    let mut out = String::new();
    let heavy = heavy_rule();
    let light = light_rule();

    out.push_str(&format!("{heavy}\nREPORTE DE VALIDACIÓN DE SENTIMIENTO\n{heavy}\n\n"));
    out.push_str(&format!("Publicaciones validadas: {}\n", report.annotated));
    if report.unannotated > 0 {
        out.push_str(&format!("Sin etiquetar (excluidas): {}\n", report.unannotated));
    }
    out.push_str(&format!("Accuracy: {}\n\n", percent(report.accuracy)));

    out.push_str(&format!("REPORTE DE CLASIFICACIÓN:\n{light}\n"));
    out.push_str(&report.metrics.to_report_table());

    out.push_str(&format!("\n\nMATRIZ DE CONFUSIÓN:\n{light}\n"));
    out.push_str(&report.confusion.to_string());

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str(&verdict_line(report.verdict, thresholds));
    out.push_str(&format!("\n{heavy}\n"));

    out
}
