//! Render a repository's contributors as a grid of avatars in one SVG file.
//!
//! The crate is organised as a short pipeline: [`list_contributors`] pages
//! through the hosting API, [`render_grid`] downloads every avatar and lays
//! the cells out row-major, and [`write_svg`] minifies and persists the
//! document. [`generate`] wires the three together. Network access goes
//! through the [`ContributorSource`] and [`AvatarFetcher`] traits so callers
//! construct the clients once and tests substitute fakes.

pub mod avatar;
pub mod config;
pub mod contributors;
mod error;
pub mod output;
pub mod pipeline;
pub mod render;

pub use avatar::{
    AvatarFetcher, FetchedImage, HttpAvatarFetcher, encode_data_uri, fetch_data_uri,
    sized_avatar_url,
};
pub use config::{
    AvatarUrl, DEFAULT_AVATAR_SIZE, DEFAULT_COLUMNS, DEFAULT_LIMIT, GridOptions, ListOptions,
    MARGIN, MAX_AVATAR_SIZE, MAX_LIMIT, OUTPUT_FILE, PAGE_SIZE, REQUEST_TIMEOUT,
};
pub use contributors::{
    Contributor, ContributorRow, ContributorSource, ListOutcome, PageFailure, PageRequest,
    is_bot, list_contributors, page_plan,
};
pub use error::{Error, write_error};
pub use output::{minify, write_svg};
pub use pipeline::{GenerateOutcome, GenerateRequest, generate};
pub use render::{AvatarCell, AvatarImage, GridDocument, GridLayout, render_grid};
