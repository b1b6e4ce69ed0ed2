pub mod scenario;
mod util;

pub use util::{artifacts_dir, capture_artifacts, split_csv};
