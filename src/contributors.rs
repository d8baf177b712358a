// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Contributor listing for a single repository.
///
/// Fetches the contributors endpoint page by page up to a requested limit,
/// normalizes each row into a [`Contributor`], and drops automation accounts
/// unless asked to keep them.
use std::future::Future;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    config::{ListOptions, PAGE_SIZE, REQUEST_TIMEOUT},
    error::Error,
};

/// Raw row returned by the contributors endpoint.
#[derive(Debug, Clone, Deserialize,)]
pub struct ContributorRow
{
    pub login:      String,
    pub id:         u64,
    pub avatar_url: String,
}

/// Account handle and avatar reference used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Contributor
{
    pub name:       String,
    pub avatar_url: String,
}

impl std::fmt::Display for Contributor
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        write!(f, "{} ({})", self.name, self.avatar_url)
    }
}

/// Source of contributor pages.
///
/// Implemented for [`Octocrab`]; tests substitute in-memory fakes.
pub trait ContributorSource: Clone + Send + Sync + 'static
{
    /// Requests one page of contributors.
    fn fetch_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<ContributorRow,>, Error,>,> + Send;
}

#[derive(Debug, Serialize,)]
struct PageQuery
{
    per_page: u32,
    page:     u32,
}

impl ContributorSource for Octocrab
{
    async fn fetch_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ContributorRow,>, Error,>
    {
        let query = PageQuery {
            per_page, page,
        };

        self.get(format!("/repos/{owner}/{repo}/contributors"), Some(&query,),).await.map_err(
            |e| Error::service(format!("failed to list contributors of {owner}/{repo}: {e}"),),
        )
    }
}

/// One request of the pagination plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct PageRequest
{
    /// 1-based page number sent to the API.
    pub page: u32,
    /// Number of rows kept from this page.
    pub take: u32,
}

/// Splits `limit` into full pages of [`PAGE_SIZE`] plus one truncated page
/// for the remainder.
///
/// # Examples
///
/// ```
/// use contrib_grid::{PageRequest, page_plan};
///
/// assert_eq!(page_plan(150,), vec![
///     PageRequest { page: 1, take: 100 },
///     PageRequest { page: 2, take: 50 },
/// ]);
/// assert!(page_plan(0,).is_empty());
/// ```
pub fn page_plan(limit: u32,) -> Vec<PageRequest,>
{
    let full_pages = limit / PAGE_SIZE;
    let remainder = limit % PAGE_SIZE;

    let mut plan: Vec<PageRequest,> =
        (1..=full_pages).map(|page| PageRequest { page, take: PAGE_SIZE, },).collect();

    if remainder > 0 {
        plan.push(PageRequest {
            page: full_pages + 1, take: remainder,
        },);
    }

    plan
}

/// Returns `true` for handles that mark automation accounts.
pub fn is_bot(name: &str,) -> bool
{
    name.ends_with("[bot]",) || name.ends_with("-bot",)
}

/// A page that could not be fetched.
#[derive(Debug,)]
pub struct PageFailure
{
    pub page:  u32,
    pub error: Error,
}

/// Contributors collected from all pages together with the pages that
/// failed.
#[derive(Debug, Default,)]
pub struct ListOutcome
{
    pub contributors: Vec<Contributor,>,
    pub failures:     Vec<PageFailure,>,
}

impl ListOutcome
{
    /// Returns `true` when at least one page failed.
    pub fn is_partial(&self,) -> bool
    {
        !self.failures.is_empty()
    }
}

/// Lists up to `options.limit` contributors of `owner/repo`.
///
/// Every page of the plan is requested concurrently and the results are
/// joined in page order. A failed or timed out page contributes nothing and
/// is reported in [`ListOutcome::failures`]; the remaining pages are still
/// returned.
///
/// # Example
///
/// ```no_run
/// use contrib_grid::{ListOptions, list_contributors};
/// use octocrab::Octocrab;
///
/// # async fn example() -> Result<(), contrib_grid::Error> {
/// let client = Octocrab::builder().build()?;
/// let outcome = list_contributors(&client, "octocat", "hello-world", &ListOptions::default(),).await;
/// for contributor in &outcome.contributors {
///     println!("{contributor}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn list_contributors<S: ContributorSource,>(
    source: &S,
    owner: &str,
    repo: &str,
    options: &ListOptions,
) -> ListOutcome
{
    let plan = page_plan(options.limit,);
    debug!("Requesting {} contributor page(s) for {}/{}", plan.len(), owner, repo);

    let handles: Vec<_,> = plan
        .iter()
        .map(|request| {
            let source = source.clone();
            let owner = owner.to_owned();
            let repo = repo.to_owned();
            let request = *request;
            tokio::spawn(async move {
                let operation = format!("contributors page {} of {owner}/{repo}", request.page);
                match timeout(
                    REQUEST_TIMEOUT,
                    source.fetch_page(&owner, &repo, request.page, PAGE_SIZE,),
                )
                .await
                {
                    Ok(result,) => result,
                    Err(_,) => Err(Error::timeout(operation, REQUEST_TIMEOUT,),),
                }
            },)
        },)
        .collect();

    let mut outcome = ListOutcome::default();

    for (request, handle,) in plan.iter().zip(handles,) {
        let rows = match handle.await {
            Ok(Ok(rows,),) => rows,
            Ok(Err(error,),) => {
                warn!("Contributors page {} failed: {}", request.page, error);
                outcome.failures.push(PageFailure {
                    page: request.page, error,
                },);
                continue;
            }
            Err(join_error,) => {
                warn!("Contributors page {} task aborted: {}", request.page, join_error);
                outcome.failures.push(PageFailure {
                    page:  request.page,
                    error: Error::service(format!("page task aborted: {join_error}"),),
                },);
                continue;
            }
        };

        outcome.contributors.extend(
            rows.into_iter().take(request.take as usize,).map(|row| Contributor {
                avatar_url: options.avatar_url.resolve(row.id, &row.avatar_url,),
                name:       row.login,
            },),
        );
    }

    if !options.include_bots {
        outcome.contributors.retain(|contributor| !is_bot(&contributor.name,),);
    }

    info!(
        "Found {} contributors for {}/{} ({} page(s) failed)",
        outcome.contributors.len(),
        owner,
        repo,
        outcome.failures.len()
    );

    outcome
}
