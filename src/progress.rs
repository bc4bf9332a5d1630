use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct SpinnerHelper;

impl SpinnerHelper {
  /// Spinner on stderr, not drawn at all when stderr is not a terminal.
  pub fn create(message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
      .map(|style| {
        // For more spinners check out the cli-spinners project:
        // https://github.com/sindresorhus/cli-spinners/blob/master/spinners.json
        style.tick_strings(&["▖", "▘", "▝", "▗", "■"])
      })
      .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(message);
    spinner
  }
}
