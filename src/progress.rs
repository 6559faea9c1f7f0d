//! Progress reporting utilities using indicatif.
//!
//! The grouping engine reports through the [`ProgressCallback`] trait and
//! never touches the terminal itself. [`Progress`] is the stderr renderer
//! used by the CLI. When stderr is not a terminal the bar is hidden and
//! each event is logged instead.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress callback for the grouping phases.
///
/// Implement this trait to receive progress updates during
/// the duplicate detection pipeline.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (`"fingerprint"` or `"similarity"`)
    /// * `total` - Total number of records to process
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called every few processed records.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of records processed so far
    /// * `path` - Path of the most recent record
    fn on_progress(&self, current: usize, path: &str);

    /// Called when a phase completes.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase
    fn on_phase_end(&self, phase: &str);
}

struct ActivePhase {
    bar: ProgressBar,
    total: usize,
}

/// Progress reporter using indicatif.
pub struct Progress {
    draw_target: fn() -> ProgressDrawTarget,
    active: Mutex<Option<ActivePhase>>,
}

impl Progress {
    /// Create a progress reporter drawing to stderr.
    ///
    /// # Examples
    ///
    /// ```
    /// use simdupe::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            draw_target: ProgressDrawTarget::stderr,
            active: Mutex::new(None),
        }
    }

    /// Create a reporter that never draws and only logs.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            draw_target: ProgressDrawTarget::hidden,
            active: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn label(phase: &str) -> &str {
        match phase {
            "fingerprint" => "Fingerprinting",
            "similarity" => "Comparing",
            other => other,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        let bar = ProgressBar::with_draw_target(Some(total as u64), (self.draw_target)());
        bar.set_style(Self::style());
        bar.set_message(Self::label(phase).to_string());
        if bar.is_hidden() {
            log::info!("{}: {} files", Self::label(phase), total);
        }

        if let Ok(mut active) = self.active.lock() {
            *active = Some(ActivePhase { bar, total });
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        let Ok(active) = self.active.lock() else {
            return;
        };
        let Some(phase) = active.as_ref() else {
            return;
        };

        if phase.bar.is_hidden() {
            log::info!("Processed {}/{} files...", current, phase.total);
        } else {
            phase.bar.set_position(current as u64);
            phase.bar.set_message(truncate_path(path, 30));
        }
    }

    fn on_phase_end(&self, phase: &str) {
        let Ok(mut active) = self.active.lock() else {
            return;
        };
        if let Some(finished) = active.take() {
            if finished.bar.is_hidden() {
                log::debug!("{} complete", Self::label(phase));
            }
            finished.bar.finish_and_clear();
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let count = file_name.chars().count();
    if count >= max_len {
        let tail: String = file_name.chars().skip(count - max_len + 3).collect();
        return format!("...{}", tail);
    }

    format!(".../{}", file_name)
}
