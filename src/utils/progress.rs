use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const FILE_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Terminal progress for a run. A silent reporter draws nothing.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Bar counting observation files through an ingestion run.
    pub fn for_files(total: usize, silent: bool) -> Self {
        if silent {
            return Self { bar: None };
        }
        Self::ticking(ProgressBar::new(total as u64), FILE_TEMPLATE, "Ingesting")
    }

    /// Spinner for work of unknown length, such as the statistics scan.
    pub fn spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self { bar: None };
        }
        Self::ticking(ProgressBar::new_spinner(), SPINNER_TEMPLATE, message)
    }

    fn ticking(bar: ProgressBar, template: &str, message: &str) -> Self {
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn start_file(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            bar.set_message(format!("Ingesting {}", name));
        }
    }

    pub fn file_done(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn set_message(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
        }
    }

    pub fn finish(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message);
        }
    }
}

impl Drop for ProgressReporter {
    // A run that bails out early leaves its bar where it stopped
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_silent_reporter_draws_nothing() {
        let reporter = ProgressReporter::for_files(3, true);
        assert!(reporter.bar.is_none());

        reporter.start_file(Path::new("wx_data/S1.txt"));
        reporter.file_done();
        reporter.finish("done".to_string());

        assert!(ProgressReporter::spinner("Calculating", true).bar.is_none());
    }

    #[test]
    fn test_file_progress_counts_files() {
        let bar = ProgressBar::with_draw_target(Some(2), ProgressDrawTarget::hidden());
        let reporter = ProgressReporter { bar: Some(bar.clone()) };

        for name in ["S1.txt", "S2.txt"] {
            reporter.start_file(&Path::new("wx_data").join(name));
            reporter.file_done();
        }

        assert_eq!(bar.position(), 2);
        assert_eq!(bar.message(), "Ingesting S2.txt");

        reporter.finish("Ingested 2 files".to_string());
        assert!(bar.is_finished());
    }
}
