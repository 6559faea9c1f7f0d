use clap::Parser;
use image::{GrayImage, ImageFormat, Luma};
use simdupe::cli::Cli;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run_similar(dir: &Path) -> String {
    let cli = Cli::try_parse_from([
        "simdupe".to_string(),
        "--no-progress".to_string(),
        dir.display().to_string(),
        "--similar".to_string(),
    ])
    .unwrap();

    let mut out = Vec::new();
    simdupe::run(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// A 9x8 rising gradient with the first `flips` rows perturbed so that
/// each of those rows changes exactly one hash bit.
fn save_gradient(path: &Path, flips: u32) {
    let img = GrayImage::from_fn(9, 8, |x, y| {
        if y < flips && x == 1 {
            Luma([200])
        } else {
            Luma([(x * 20) as u8])
        }
    });
    // PNG bytes under any extension; the decoder sniffs the format.
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

#[test]
fn test_exact_then_similar_images() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "the same words").unwrap();
    fs::write(dir.path().join("a_copy.txt"), "the same words").unwrap();
    save_gradient(&dir.path().join("b.jpg"), 0);
    save_gradient(&dir.path().join("c.jpg"), 3);

    let output = run_similar(dir.path());

    let expected = format!(
        "EXACT|1.00\n{}\n{}\n---GROUP---\nSIMILAR|0.98\n{}|1.00\n{}|0.95\n---GROUP---\n",
        dir.path().join("a.txt").display(),
        dir.path().join("a_copy.txt").display(),
        dir.path().join("b.jpg").display(),
        dir.path().join("c.jpg").display(),
    );
    assert_eq!(output, expected);
}

#[test]
fn test_images_too_far_apart_are_not_grouped() {
    let dir = tempdir().unwrap();
    save_gradient(&dir.path().join("a.png"), 0);
    // Alternating columns: half of the comparisons flip.
    let img = GrayImage::from_fn(9, 8, |x, _| Luma([if x % 2 == 0 { 0 } else { 200 }]));
    img.save_with_format(dir.path().join("b.png"), ImageFormat::Png)
        .unwrap();

    assert!(run_similar(dir.path()).is_empty());
}

#[test]
fn test_undecodable_images_never_match() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken1.jpg"), b"not an image").unwrap();
    fs::write(dir.path().join("broken2.jpg"), b"not an image either").unwrap();

    assert!(run_similar(dir.path()).is_empty());
}

#[test]
fn test_audio_numbered_copy() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("song.mp3"), b"first encoding").unwrap();
    fs::write(dir.path().join("song1.mp3"), b"second encoding").unwrap();
    fs::write(dir.path().join("other.mp3"), b"unrelated track").unwrap();

    let output = run_similar(dir.path());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("SIMILAR|"));
    assert_eq!(
        lines[1],
        format!("{}|1.00", dir.path().join("song.mp3").display())
    );
    assert_eq!(
        lines[2],
        format!("{}|0.95", dir.path().join("song1.mp3").display())
    );
    assert_eq!(lines[3], "---GROUP---");
}

#[test]
fn test_archives_by_size_and_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("backup.zip"), vec![1u8; 1000]).unwrap();
    fs::write(dir.path().join("backup_old.zip"), vec![2u8; 900]).unwrap();
    fs::write(dir.path().join("tiny.zip"), vec![3u8; 10]).unwrap();

    let output = run_similar(dir.path());

    assert!(output.contains(&format!(
        "{}|0.85",
        dir.path().join("backup_old.zip").display()
    )));
    assert!(!output.contains("tiny.zip"));
}

#[test]
fn test_plain_text_word_overlap() {
    let dir = tempdir().unwrap();
    let words = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
    fs::write(dir.path().join("draft.txt"), words).unwrap();
    fs::write(dir.path().join("memo.txt"), format!("{} kilo", words)).unwrap();

    let output = run_similar(dir.path());

    assert!(output.starts_with("SIMILAR|"));
    assert!(output.contains(&format!("{}|0.91", dir.path().join("memo.txt").display())));
}

#[test]
fn test_different_categories_never_group() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("holiday.mp3"), vec![0u8; 100]).unwrap();
    fs::write(dir.path().join("holiday.zip"), vec![1u8; 100]).unwrap();

    assert!(run_similar(dir.path()).is_empty());
}

#[test]
fn test_exact_members_are_not_regrouped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("track.mp3"), b"same bytes").unwrap();
    fs::write(dir.path().join("track1.mp3"), b"same bytes").unwrap();
    fs::write(dir.path().join("track2.mp3"), b"different bytes").unwrap();

    let output = run_similar(dir.path());

    // track2 would match track and track1 by name, but both were claimed
    // by the exact pass and track2 is left alone.
    assert_eq!(output.lines().filter(|l| l.starts_with("EXACT")).count(), 1);
    assert_eq!(output.lines().filter(|l| l.starts_with("SIMILAR")).count(), 0);
}
