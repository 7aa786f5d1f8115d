pub mod dashboard;
pub mod icons;
pub mod progress;

pub use progress::ProgressUI;
