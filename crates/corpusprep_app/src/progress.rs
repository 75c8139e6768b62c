use corpusprep_engine::ProgressSink;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal progress bar on stderr. Falls back to a spinner when the line
/// total is unknown.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr()),
        }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn start(&self, total_lines: Option<u64>) {
        match total_lines {
            Some(total) => {
                self.bar.set_length(total);
                self.bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
            }
            None => {
                self.bar.set_style(
                    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} lines")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
            }
        }
    }

    fn advance(&self, lines: u64) {
        self.bar.inc(lines);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_mode_tracks_lines_without_a_total() {
        let progress = BarProgress::new();
        progress.start(None);
        progress.advance(1);
        progress.advance(2);
        assert_eq!(progress.bar.length(), None);
        assert_eq!(progress.bar.position(), 3);
        progress.finish();
        assert!(progress.bar.is_finished());
    }

    #[test]
    fn bar_mode_uses_the_counted_total() {
        let progress = BarProgress::new();
        progress.start(Some(10));
        progress.advance(4);
        assert_eq!(progress.bar.length(), Some(10));
        assert_eq!(progress.bar.position(), 4);
    }
}
