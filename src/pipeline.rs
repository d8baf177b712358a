// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// End-to-end generation: list contributors, render the grid, write the file.
use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    avatar::AvatarFetcher,
    config::{GridOptions, ListOptions},
    contributors::{ContributorSource, list_contributors},
    error::Error,
    output::write_svg,
    render::render_grid,
};

/// Everything needed for one run.
#[derive(Debug, Clone,)]
pub struct GenerateRequest
{
    pub owner:  String,
    pub repo:   String,
    pub list:   ListOptions,
    pub grid:   GridOptions,
    pub output: PathBuf,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum GenerateOutcome
{
    /// The repository yielded no contributors; nothing was written.
    NoContributors
    {
        /// Pages that failed while listing.
        failed_pages: usize,
    },
    /// The SVG was written.
    Written
    {
        path:         PathBuf,
        contributors: usize,
        placeholders: usize,
        failed_pages: usize,
    },
}

/// Runs lister, renderer and writer in sequence.
///
/// Failed pages and failed avatars degrade the output but do not abort the
/// run; both are reported in the returned [`GenerateOutcome`].
///
/// # Errors
///
/// Returns [`Error::Write`] when the SVG cannot be persisted.
pub async fn generate<S, F,>(
    source: &S,
    fetcher: &F,
    request: &GenerateRequest,
) -> Result<GenerateOutcome, Error,>
where
    S: ContributorSource,
    F: AvatarFetcher,
{
    let listed = list_contributors(source, &request.owner, &request.repo, &request.list,).await;
    let failed_pages = listed.failures.len();

    if listed.is_partial() {
        let pages: Vec<String,> =
            listed.failures.iter().map(|failure| failure.page.to_string(),).collect();
        warn!("Continuing without contributor page(s) {}", pages.join(", "));
    }

    if listed.contributors.is_empty() {
        info!("No contributors found for {}/{}", request.owner, request.repo);
        return Ok(GenerateOutcome::NoContributors {
            failed_pages,
        },);
    }

    let document = render_grid(fetcher, &listed.contributors, request.grid,).await;
    let path = write_svg(&request.output, &document.to_string(),)?;

    Ok(GenerateOutcome::Written {
        path,
        contributors: document.cells.len(),
        placeholders: document.placeholder_count(),
        failed_pages,
    },)
}
