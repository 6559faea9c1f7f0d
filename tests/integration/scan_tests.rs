use clap::Parser;
use simdupe::cli::Cli;
use simdupe::error::ExitCode;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn run_in(dir: &Path, extra: &[&str]) -> (ExitCode, String) {
    let mut args = vec![
        "simdupe".to_string(),
        "--no-progress".to_string(),
        dir.display().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    let cli = Cli::try_parse_from(args).unwrap();

    let mut out = Vec::new();
    let code = simdupe::run(cli, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let (code, output) = run_in(dir.path(), &[]);

    assert_eq!(code, ExitCode::Success);
    assert!(output.is_empty());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "content a").unwrap();
    fs::write(dir.path().join("b.txt"), "content b").unwrap();
    fs::write(dir.path().join("c.txt"), "content c").unwrap();

    let (code, output) = run_in(dir.path(), &[]);

    assert_eq!(code, ExitCode::Success);
    assert!(output.is_empty());
}

#[test]
fn test_scan_exact_group_only() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"duplicate content")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"duplicate content")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"something else entirely")
        .unwrap();

    let (code, output) = run_in(dir.path(), &[]);

    let expected = format!(
        "EXACT|1.00\n{}\n{}\n---GROUP---\n",
        dir.path().join("a.txt").display(),
        dir.path().join("b.txt").display()
    );
    assert_eq!(code, ExitCode::Success);
    assert_eq!(output, expected);
    assert!(!output.contains("c.txt"));
}

#[test]
fn test_scan_nested_duplicates_across_categories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested").join("deeper");
    fs::create_dir_all(&nested).unwrap();

    fs::write(dir.path().join("song.mp3"), b"ID3 fake audio").unwrap();
    fs::write(nested.join("song_copy.mp3"), b"ID3 fake audio").unwrap();
    fs::write(dir.path().join("pack.zip"), b"PK fake archive").unwrap();
    fs::write(nested.join("pack.zip"), b"PK fake archive").unwrap();

    let (_, output) = run_in(dir.path(), &[]);

    let headers = output.lines().filter(|l| *l == "EXACT|1.00").count();
    let separators = output.lines().filter(|l| *l == "---GROUP---").count();
    assert_eq!(headers, 2);
    assert_eq!(separators, 2);
    assert!(output.contains(&nested.join("song_copy.mp3").display().to_string()));
    assert!(output.contains(&nested.join("pack.zip").display().to_string()));
}

#[test]
fn test_uncategorized_files_are_ignored() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("copy.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("README"), "fn main() {}").unwrap();

    let (code, output) = run_in(dir.path(), &[]);

    assert_eq!(code, ExitCode::Success);
    assert!(output.is_empty());
}

#[test]
fn test_extension_matching_is_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("A.TXT"), "same").unwrap();
    fs::write(dir.path().join("b.Txt"), "same").unwrap();

    let (_, output) = run_in(dir.path(), &[]);

    assert!(output.starts_with("EXACT|1.00\n"));
    assert_eq!(output.lines().count(), 4);
}

#[test]
fn test_empty_files_are_exact_duplicates() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1.txt")).unwrap();
    File::create(dir.path().join("empty2.txt")).unwrap();

    let (_, output) = run_in(dir.path(), &[]);

    assert!(output.starts_with("EXACT|1.00\n"));
}
