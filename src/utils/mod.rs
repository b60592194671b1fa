mod progress_style;

pub use progress_style::review_progress;
