use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const NUMBER_TEMPLATE: &str = "{spinner} {msg:15} {wide_bar:} {pos:>7}/{len}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn number_bar() -> ProgressStyle {
        ProgressStyle::with_template(NUMBER_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

/// Bar on stderr counting finished review fetches. Draws nothing when stderr
/// is not a terminal.
pub fn review_progress() -> ProgressBar {
    let pb = ProgressBar::new(0).with_style(ProgressStyleTemplate::number_bar());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
