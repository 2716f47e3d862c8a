//! Tracker normalizers
//!
//! Each submodule maps one tracker's loosely shaped JSON into the fixed
//! records the site templates expect. Normalizers are pure: loading and
//! writing happen in the build passes.
//!
//! | module      | source(s)              | output            |
//! |-------------|------------------------|-------------------|
//! | [`reading`] | `goodreads`            | `_data/reading.yml` |
//! | [`studies`] | `coursera`, `upso`     | `_data/studies.yml` |
//! | [`work`]    | `github_daily`         | `_data/work.yml`  |
//! | [`cv`]      | `linkedin`             | `about.md`        |

pub mod cv;
pub mod reading;
pub mod studies;
pub mod work;

pub use cv::Profile;
pub use reading::Book;
pub use studies::{Course, Studies, Subject};
pub use work::WorkActivity;
