//! Progress bar on stderr while a batch is in flight.

use indicatif::{ProgressBar, ProgressStyle};

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>10.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta}) {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

pub struct ProgressTracker {
    pb: ProgressBar,
    failed: u64,
}

impl ProgressTracker {
    pub fn new(len: u64) -> Self {
        let pb = ProgressBar::new(len);
        let pb = match ProgressStyle::with_template(PB_STYLE) {
            Ok(style) => pb.with_style(style.tick_chars(TICK).progress_chars(PB_CHARS)),
            Err(_) => pb,
        };
        pb.set_prefix("Expanding");
        Self { pb, failed: 0 }
    }

    pub fn step(&mut self, ok: bool) {
        if !ok {
            self.failed += 1;
            self.pb.set_message(format!("{} failed", self.failed));
        }
        self.pb.inc(1);
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
