//! Document matching through configured helper processes.

use clap::Parser;
use simdupe::cli::Cli;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run_with_config(dir: &Path, config: &Path) -> String {
    let cli = Cli::try_parse_from([
        "simdupe".to_string(),
        "--no-progress".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        dir.display().to_string(),
        "--similar".to_string(),
    ])
    .unwrap();

    let mut out = Vec::new();
    simdupe::run(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn write_spreadsheets(dir: &Path) {
    // Unrelated names and equal sizes so only the helper can match them.
    fs::write(dir.join("budget.xlsx"), vec![1u8; 500]).unwrap();
    fs::write(dir.join("q3.xlsx"), vec![2u8; 500]).unwrap();
}

#[cfg(unix)]
#[test]
fn test_helper_success_matches_documents() {
    let data = tempdir().unwrap();
    let conf = tempdir().unwrap();
    write_spreadsheets(data.path());
    let config = conf.path().join("simdupe.toml");
    fs::write(
        &config,
        "[comparers.spreadsheet]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 0\", \"helper\"]\n",
    )
    .unwrap();

    let output = run_with_config(data.path(), &config);

    assert!(output.starts_with("SIMILAR|"));
    assert!(output.contains(&format!(
        "{}|0.85",
        data.path().join("q3.xlsx").display()
    )));
}

#[cfg(unix)]
#[test]
fn test_helper_failure_falls_back_to_heuristics() {
    let data = tempdir().unwrap();
    let conf = tempdir().unwrap();
    write_spreadsheets(data.path());
    let config = conf.path().join("simdupe.toml");
    fs::write(
        &config,
        "[comparers.spreadsheet]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 1\", \"helper\"]\n",
    )
    .unwrap();

    assert!(run_with_config(data.path(), &config).is_empty());
}

#[test]
fn test_missing_helper_falls_back_to_size_and_name() {
    let data = tempdir().unwrap();
    let conf = tempdir().unwrap();
    fs::write(data.path().join("report.xlsx"), vec![1u8; 1000]).unwrap();
    fs::write(data.path().join("report_final.xlsx"), vec![2u8; 900]).unwrap();
    let config = conf.path().join("simdupe.toml");
    fs::write(
        &config,
        "[comparers.spreadsheet]\nprogram = \"simdupe-helper-that-does-not-exist\"\n",
    )
    .unwrap();

    let output = run_with_config(data.path(), &config);

    // size ratio 0.9, name score 0.8
    assert!(output.contains(&format!(
        "{}|0.85",
        data.path().join("report_final.xlsx").display()
    )));
}

#[test]
fn test_builtin_word_comparer() {
    use docx_rs::{Docx, Paragraph, Run};

    let data = tempdir().unwrap();
    let conf = tempdir().unwrap();
    let write_docx = |name: &str, text: &str| {
        let file = fs::File::create(data.path().join(name)).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
            .build()
            .pack(file)
            .unwrap();
    };
    write_docx(
        "minutes.docx",
        "quarterly planning meeting attendees budget review hiring roadmap",
    );
    write_docx(
        "agenda.docx",
        "quarterly planning meeting attendees budget review hiring",
    );
    let config = conf.path().join("simdupe.toml");
    fs::write(&config, "[comparers]\nbuiltin_word = true\n").unwrap();

    let output = run_with_config(data.path(), &config);

    assert!(output.starts_with("SIMILAR|"));
    assert!(output.contains("minutes.docx|0.85"));
}
