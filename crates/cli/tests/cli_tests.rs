// End-to-end tests for the `sentival` binary against temporary projects.
// Run with: cargo test -p sentival-cli --test cli_tests -- --nocapture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const FEATURES: &str = "data/features/caracteristicas_completas.csv";
const TEXTS: &str = "data/processed/publicaciones_texto.csv";
const RESULTS: &str = "data/results";

const SAMPLE_HEADER: &str =
    "id_publicacion,id_participante,texto_publicacion,sentimiento,sentimiento_manual";

/// Runs the binary against `root`, isolated from the user's config dir.
fn sentival(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentival"));
    cmd.current_dir(root)
        .arg("--root")
        .arg(root)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env("APPDATA", root.join(".config"))
        .env_remove("SENTIVAL_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run(root: &Path, args: &[&str]) -> Output {
    sentival(root).args(args).output().expect("run sentival")
}

fn code(out: &Output) -> i32 {
    out.status.code().expect("exit code")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn results(root: &Path, name: &str) -> PathBuf {
    root.join(RESULTS).join(name)
}

fn read_text(path: &Path) -> String {
    let content = fs::read_to_string(path).expect("read output");
    content.trim_start_matches('\u{feff}').to_string()
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with `per_class` posts of each label.
fn project(per_class: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut features = String::from("id_publicacion,id_participante,sentimiento,n_palabras\n");
    let mut texts = String::from("id_publicacion,texto_publicacion\n");
    let mut n = 0;
    for label in ["POS", "NEU", "NEG"] {
        for _ in 0..per_class {
            n += 1;
            features.push_str(&format!("p{n},u{},{label},{}\n", n % 4, n * 3));
            texts.push_str(&format!("p{n},\"publicación {n}, etiqueta {label}\"\n"));
        }
    }
    write_file(dir.path(), FEATURES, &features);
    write_file(dir.path(), TEXTS, &texts);
    dir
}

/// Annotated sheet: 4 rows, one disagreement (automated POS, manual NEG).
fn write_annotated(root: &Path) {
    write_file(
        root,
        &format!("{RESULTS}/muestra_validacion_manual_etiquetada.csv"),
        &format!(
            "{SAMPLE_HEADER}\n\
             p1,u1,me encanta,POS,pos\n\
             p2,u2,qué horror,POS, NEG \n\
             p3,u3,normal,NEU,NEU\n\
             p4,u4,mal día,NEG,NEG\n\
             p5,u5,sin revisar,NEU,\n"
        ),
    );
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

#[test]
fn sample_writes_annotation_sheet() {
    let dir = project(10);
    let out = run(dir.path(), &["--muestra", "12", "--seed", "1"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let sheet = read_text(&results(dir.path(), "muestra_validacion_manual.csv"));
    let mut lines = sheet.lines();
    assert_eq!(lines.next(), Some(SAMPLE_HEADER));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.ends_with(',')), "manual label column starts empty");

    let text = stdout(&out);
    assert!(text.contains("✓ Total de publicaciones: 30"));
    assert!(text.contains("✓ Muestra creada: 12 publicaciones"));
    assert!(text.contains("INSTRUCCIONES PARA ETIQUETADO MANUAL"));
    assert!(text.contains("muestra_validacion_manual_etiquetada.csv"));
}

#[test]
fn sample_file_starts_with_bom() {
    let dir = project(3);
    let out = run(dir.path(), &["--muestra", "3"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let bytes = fs::read(results(dir.path(), "muestra_validacion_manual.csv")).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
}

#[test]
fn same_seed_same_sample() {
    let dir = project(20);
    let path = results(dir.path(), "muestra_validacion_manual.csv");

    assert_eq!(code(&run(dir.path(), &["--muestra", "15", "--seed", "9"])), 0);
    let first = fs::read(&path).unwrap();
    assert_eq!(code(&run(dir.path(), &["--muestra", "15", "--seed", "9"])), 0);
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rerun_overwrites_instead_of_appending() {
    let dir = project(20);
    let path = results(dir.path(), "muestra_validacion_manual.csv");

    assert_eq!(code(&run(dir.path(), &["--muestra", "15", "--seed", "1"])), 0);
    assert_eq!(code(&run(dir.path(), &["--muestra", "15", "--seed", "2"])), 0);

    let sheet = read_text(&path);
    assert_eq!(sheet.lines().count(), 16);
    assert_eq!(sheet.matches(SAMPLE_HEADER).count(), 1);

    let fresh = project(20);
    assert_eq!(code(&run(fresh.path(), &["--muestra", "15", "--seed", "2"])), 0);
    let expected = fs::read(results(fresh.path(), "muestra_validacion_manual.csv")).unwrap();
    assert_eq!(fs::read(&path).unwrap(), expected, "file holds exactly the second run");
}

#[test]
fn verbose_evaluation_logs_the_reported_stage() {
    let dir = TempDir::new().unwrap();
    write_annotated(dir.path());

    let out = run(dir.path(), &["--evaluar", "-vv"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("evaluation stage: reported"));
}

#[test]
fn small_corpus_caps_the_sample() {
    let dir = project(2);
    let out = run(dir.path(), &["--muestra", "100"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let sheet = read_text(&results(dir.path(), "muestra_validacion_manual.csv"));
    assert_eq!(sheet.lines().count(), 7);
    assert!(stderr(&out).contains("sample reduced from 100 to 6"));
}

#[test]
fn sample_json_summary() {
    let dir = project(10);
    let out = run(dir.path(), &["--muestra", "9", "--json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(v["status"], "ok");
    assert_eq!(v["sample_size"], 9);
    assert_eq!(v["seed"], 42);
    assert_eq!(v["distribution"][0]["label"], "POS");
    assert_eq!(v["distribution"][0]["count"], 3);
}

#[test]
fn missing_corpus_exits_3_with_hint() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &[]);

    assert_eq!(code(&out), 3);
    let err = stderr(&out);
    assert!(err.contains("input file not found"), "stderr: {err}");
    assert!(err.contains("caracteristicas_completas.csv"));
    assert!(err.contains("hint:"));
    assert!(!results(dir.path(), "muestra_validacion_manual.csv").exists());
}

#[test]
fn empty_corpus_exits_4_without_output() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), FEATURES, "id_publicacion,id_participante,sentimiento\n");
    write_file(dir.path(), TEXTS, "id_publicacion,texto_publicacion\n");

    let out = run(dir.path(), &[]);
    assert_eq!(code(&out), 4, "stderr: {}", stderr(&out));
    assert!(!results(dir.path(), "muestra_validacion_manual.csv").exists());
}

#[test]
fn zero_sample_size_is_rejected() {
    let dir = project(3);
    let out = run(dir.path(), &["--muestra", "0"]);
    assert_eq!(code(&out), 2);
}

#[test]
fn unknown_corpus_label_exits_5() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), FEATURES, "id_publicacion,id_participante,sentimiento\np1,u1,FELIZ\n");
    write_file(dir.path(), TEXTS, "id_publicacion,texto_publicacion\np1,hola\n");

    let out = run(dir.path(), &[]);
    assert_eq!(code(&out), 5);
    assert!(stderr(&out).contains("FELIZ"));
}

#[test]
fn missing_column_exits_5() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), FEATURES, "id_publicacion,sentimiento\np1,POS\n");
    write_file(dir.path(), TEXTS, "id_publicacion,texto_publicacion\np1,hola\n");

    let out = run(dir.path(), &[]);
    assert_eq!(code(&out), 5);
    assert!(stderr(&out).contains("id_participante"));
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[test]
fn evaluate_writes_all_outputs() {
    let dir = TempDir::new().unwrap();
    write_annotated(dir.path());

    let out = run(dir.path(), &["--evaluar"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("✓ Publicaciones validadas: 4"));
    assert!(text.contains("ACCURACY: 75.00%"));
    assert!(text.contains("ANÁLISIS DE ERRORES (1 casos)"));
    assert!(text.contains("Predicho: POS | Real: NEG"));
    assert!(text.contains("precisión ACEPTABLE"));
    let err = stderr(&out);
    assert_eq!(err.matches("Sin etiquetar: 1").count(), 1);
    assert!(!err.contains("no manual label"), "engine notice stays below the default level: {err}");

    let report = fs::read_to_string(results(dir.path(), "validacion_sentimiento_reporte.txt")).unwrap();
    assert!(report.contains("Publicaciones validadas: 4"));
    assert!(report.contains("Accuracy: 75.00%"));
    assert!(report.contains("✓ RESULTADO: ACEPTABLE (≥75%)"));

    let errors = read_text(&results(dir.path(), "errores_sentimiento.csv"));
    assert_eq!(
        errors,
        "id_publicacion,texto_publicacion,sentimiento,sentimiento_manual\np2,qué horror,POS,NEG\n"
    );

    let svg = fs::read_to_string(results(dir.path(), "confusion_matrix_sentimiento.svg")).unwrap();
    assert!(svg.contains("Accuracy: 75.00%"));
}

#[test]
fn evaluate_json_report() {
    let dir = TempDir::new().unwrap();
    write_annotated(dir.path());

    let out = run(dir.path(), &["--evaluar", "--json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(v["annotated"], 4);
    assert_eq!(v["unannotated"], 1);
    assert_eq!(v["accuracy"], 0.75);
    assert_eq!(v["verdict"], "acceptable");
    assert_eq!(v["errors"][0]["id"], "p2");
    assert_eq!(v["errors"][0]["row"], 1);
    assert!(v["meta"]["engine_version"].is_string());
    assert!(v["outputs"]["errors"].is_string());
}

#[test]
fn evaluate_missing_annotated_file_exits_3() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--evaluar"]);

    assert_eq!(code(&out), 3);
    assert!(stderr(&out).contains("muestra_validacion_manual_etiquetada.csv"));
    assert!(!results(dir.path(), "validacion_sentimiento_reporte.txt").exists());
}

#[test]
fn evaluate_unannotated_sheet_exits_4_without_report() {
    let dir = project(5);
    assert_eq!(code(&run(dir.path(), &["--muestra", "6"])), 0);
    fs::copy(
        results(dir.path(), "muestra_validacion_manual.csv"),
        results(dir.path(), "muestra_validacion_manual_etiquetada.csv"),
    )
    .unwrap();

    let out = run(dir.path(), &["--evaluar"]);
    assert_eq!(code(&out), 4, "stderr: {}", stderr(&out));
    assert!(!results(dir.path(), "validacion_sentimiento_reporte.txt").exists());
    assert!(!results(dir.path(), "confusion_matrix_sentimiento.svg").exists());
}

#[test]
fn evaluate_unknown_manual_label_exits_5() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        &format!("{RESULTS}/muestra_validacion_manual_etiquetada.csv"),
        &format!("{SAMPLE_HEADER}\np1,u1,hola,POS,MAYBE\n"),
    );

    let out = run(dir.path(), &["--evaluar"]);
    assert_eq!(code(&out), 5);
    assert!(stderr(&out).contains("MAYBE"));
}

#[test]
fn perfect_run_removes_stale_errors() {
    let dir = TempDir::new().unwrap();
    write_annotated(dir.path());
    assert_eq!(code(&run(dir.path(), &["--evaluar"])), 0);
    assert!(results(dir.path(), "errores_sentimiento.csv").exists());

    write_file(
        dir.path(),
        &format!("{RESULTS}/muestra_validacion_manual_etiquetada.csv"),
        &format!("{SAMPLE_HEADER}\np1,u1,bien,POS,POS\np2,u2,mal,NEG,NEG\n"),
    );
    let out = run(dir.path(), &["--evaluar"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(!results(dir.path(), "errores_sentimiento.csv").exists());
    assert!(stdout(&out).contains("ACCURACY: 100.00%"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn project_config_changes_thresholds() {
    let dir = TempDir::new().unwrap();
    write_annotated(dir.path());
    write_file(dir.path(), "sentival.toml", "[thresholds]\nacceptable = 0.80\nmarginal = 0.50\n");

    let out = run(dir.path(), &["--evaluar"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let report = fs::read_to_string(results(dir.path(), "validacion_sentimiento_reporte.txt")).unwrap();
    assert!(report.contains("⚠️ RESULTADO: MARGINAL (50-80%)"));
}

#[test]
fn invalid_config_exits_6() {
    let dir = project(3);
    write_file(dir.path(), "sentival.toml", "[thresholds]\nacceptable = 0.5\nmarginal = 0.7\n");

    let out = run(dir.path(), &[]);
    assert_eq!(code(&out), 6);
    assert!(stderr(&out).contains("thresholds.marginal"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = project(3);
    let out = run(dir.path(), &["--config", "nope.toml"]);
    assert_eq!(code(&out), 6);
}

#[test]
fn unknown_encoding_exits_6() {
    let dir = project(3);
    write_file(dir.path(), "sentival.toml", "[io]\nencoding = \"klingon\"\n");

    let out = run(dir.path(), &[]);
    assert_eq!(code(&out), 6);
}

#[test]
fn init_creates_layout_and_config() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--init"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    assert!(dir.path().join("data/features").is_dir());
    assert!(dir.path().join("data/processed").is_dir());
    assert!(dir.path().join(RESULTS).is_dir());
    assert!(dir.path().join("sentival.toml").is_file());

    // Second run leaves the file alone
    let again = run(dir.path(), &["--init"]);
    assert_eq!(code(&again), 0);
    assert!(stderr(&again).contains("already exists"));

    let show = run(dir.path(), &["--show-config"]);
    assert_eq!(code(&show), 0);
    assert!(stdout(&show).contains("CONFIGURACIÓN ACTUAL"));
}

#[test]
fn evaluate_conflicts_with_sample_size() {
    let dir = project(3);
    let out = run(dir.path(), &["--evaluar", "--muestra", "10"]);
    assert_eq!(code(&out), 2);
}
