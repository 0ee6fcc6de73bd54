use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }

    pub fn is_hidden(&self) -> bool {
        self.spinner.is_hidden()
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// Sets up the spinner once; `hidden` keeps it off the terminal entirely.
pub fn init(hidden: bool) {
    SPINNER.get_or_init(|| init_spinner(hidden));
}

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(|| init_spinner(true))
}

fn init_spinner(hidden: bool) -> SpinnerHandle {
    if hidden {
        return SpinnerHandle {
            spinner: ProgressBar::hidden(),
        };
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    pb.set_style(style);

    SpinnerHandle { spinner: pb }
}

pub fn start() {
    get_spinner()
        .spinner
        .enable_steady_tick(Duration::from_millis(100));
}

pub fn report_probe_progress(port: u16) {
    get_spinner().set_message(format!(
        "Probing port {}...",
        port.to_string().green().bold()
    ));
}

/// Routes log lines above the spinner, or straight to stderr when there is
/// no spinner to draw around.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let handle = get_spinner();
        if handle.is_hidden() {
            return std::io::stderr().write(buf);
        }
        let msg = String::from_utf8_lossy(buf);
        handle.println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}
