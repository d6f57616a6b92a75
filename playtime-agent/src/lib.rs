//! Total duration and watch progress of YouTube playlists, overlaid onto the page.

pub mod agent;
pub mod commandline;
pub mod configuration;
pub mod context;
pub mod error;
pub mod extraction;
pub mod host;
pub mod overlay;
pub mod playlist;
pub mod popup;
pub mod reference_time;
pub mod scheduler;
