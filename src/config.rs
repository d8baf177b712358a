// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tunables and option types shared by the lister and the renderer.
//!
//! Every run is configured from CLI flags; the types here carry the parsed
//! values and enforce the invariants the rest of the crate relies on (a
//! non-zero column count and an avatar size within the host's limits).

use std::time::Duration;

use crate::error::Error;

/// Maximum number of results the contributors endpoint returns per request.
pub const PAGE_SIZE: u32 = 100;

/// Largest accepted limit; the contributors endpoint only lists the top 500
/// accounts with handles.
pub const MAX_LIMIT: u32 = 500;

/// Number of contributors requested when no limit is supplied.
pub const DEFAULT_LIMIT: u32 = 30;

/// Avatar edge length in pixels when no size is supplied.
pub const DEFAULT_AVATAR_SIZE: u32 = 60;

/// Largest avatar edge length the renderer accepts.
pub const MAX_AVATAR_SIZE: u32 = 460;

/// Number of avatar cells per row when no column count is supplied.
pub const DEFAULT_COLUMNS: u32 = 10;

/// Gap between neighbouring cells and around the grid, in pixels.
pub const MARGIN: u32 = 10;

/// Upper bound applied to every upstream request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30,);

/// File written in the working directory when no output path is given.
pub const OUTPUT_FILE: &str = "contributors.svg";

/// Prefix of the profile link attached to every avatar.
pub const PROFILE_BASE_URL: &str = "https://github.com/";

/// How the avatar reference of a contributor is derived from the API row.
#[derive(Debug, Clone, PartialEq, Eq, Default,)]
pub enum AvatarUrl
{
    /// Use the `avatar_url` returned by the API unchanged.
    #[default]
    AsReturned,
    /// Build the URL from a template where `{id}` is replaced by the numeric
    /// account id.
    UserIdTemplate(String,),
}

impl AvatarUrl
{
    /// Resolves the avatar reference for an account.
    ///
    /// # Examples
    ///
    /// ```
    /// use contrib_grid::AvatarUrl;
    ///
    /// let template =
    ///     AvatarUrl::UserIdTemplate("https://avatars.githubusercontent.com/u/{id}?v=4".into(),);
    /// assert_eq!(
    ///     template.resolve(583231, "https://example.com/a.png",),
    ///     "https://avatars.githubusercontent.com/u/583231?v=4"
    /// );
    /// assert_eq!(AvatarUrl::AsReturned.resolve(1, "https://example.com/a.png",), "https://example.com/a.png");
    /// ```
    pub fn resolve(&self, id: u64, returned: &str,) -> String
    {
        match self {
            Self::AsReturned => returned.to_owned(),
            Self::UserIdTemplate(template,) => template.replace("{id}", &id.to_string(),),
        }
    }
}

/// Options controlling how many contributors are listed and which survive.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ListOptions
{
    /// Maximum number of contributors to request.
    pub limit:        u32,
    /// Keep accounts whose handle marks them as automation.
    pub include_bots: bool,
    /// Strategy used to derive avatar references.
    pub avatar_url:   AvatarUrl,
}

impl ListOptions
{
    /// Creates list options from user input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `limit` exceeds [`MAX_LIMIT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use contrib_grid::{AvatarUrl, ListOptions};
    ///
    /// assert!(ListOptions::new(500, false, AvatarUrl::AsReturned,).is_ok());
    /// assert!(ListOptions::new(501, false, AvatarUrl::AsReturned,).is_err());
    /// ```
    pub fn new(limit: u32, include_bots: bool, avatar_url: AvatarUrl,) -> Result<Self, Error,>
    {
        if limit > MAX_LIMIT {
            return Err(Error::validation(format!(
                "limit must not exceed {MAX_LIMIT} contributors, got {limit}"
            ),),);
        }

        Ok(Self {
            limit, include_bots, avatar_url,
        },)
    }
}

impl Default for ListOptions
{
    fn default() -> Self
    {
        Self {
            limit: DEFAULT_LIMIT, include_bots: false, avatar_url: AvatarUrl::AsReturned,
        }
    }
}

/// Validated grid geometry.
///
/// Construct through [`GridOptions::new`], which clamps the avatar size to
/// [`MAX_AVATAR_SIZE`] and rejects degenerate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct GridOptions
{
    avatar_size: u32,
    columns:     u32,
    margin:      u32,
}

impl GridOptions
{
    /// Creates grid options from user input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `avatar_size` or `columns` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use contrib_grid::GridOptions;
    ///
    /// let options = GridOptions::new(1024, 4,).expect("valid grid",);
    /// assert_eq!(options.avatar_size(), 460);
    /// assert!(GridOptions::new(60, 0,).is_err());
    /// ```
    pub fn new(avatar_size: u32, columns: u32,) -> Result<Self, Error,>
    {
        if avatar_size == 0 {
            return Err(Error::validation("avatar size must be at least 1 pixel",),);
        }
        if columns == 0 {
            return Err(Error::validation("column count must be at least 1",),);
        }

        Ok(Self {
            avatar_size: avatar_size.min(MAX_AVATAR_SIZE,), columns, margin: MARGIN,
        },)
    }

    /// Avatar edge length in pixels after clamping.
    pub fn avatar_size(&self,) -> u32
    {
        self.avatar_size
    }

    /// Number of cells per row.
    pub fn columns(&self,) -> u32
    {
        self.columns
    }

    /// Gap between cells in pixels.
    pub fn margin(&self,) -> u32
    {
        self.margin
    }
}

impl Default for GridOptions
{
    fn default() -> Self
    {
        Self {
            avatar_size: DEFAULT_AVATAR_SIZE, columns: DEFAULT_COLUMNS, margin: MARGIN,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults_match_documented_values()
    {
        let grid = GridOptions::default();
        assert_eq!(grid.avatar_size(), 60);
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.margin(), 10);

        let list = ListOptions::default();
        assert_eq!(list.limit, 30);
        assert!(!list.include_bots);
        assert_eq!(list.avatar_url, AvatarUrl::AsReturned);
    }

    #[test]
    fn oversized_avatars_are_clamped()
    {
        let grid = GridOptions::new(461, 3,).expect("valid grid",);
        assert_eq!(grid.avatar_size(), MAX_AVATAR_SIZE);

        let grid = GridOptions::new(460, 3,).expect("valid grid",);
        assert_eq!(grid.avatar_size(), 460);
    }

    #[test]
    fn zero_columns_are_rejected()
    {
        let error = GridOptions::new(60, 0,).expect_err("expected validation error",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn zero_size_is_rejected()
    {
        let error = GridOptions::new(0, 10,).expect_err("expected validation error",);
        match error {
            Error::Validation {
                message,
            } => assert!(message.contains("avatar size")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn limit_above_cap_is_rejected()
    {
        let accepted =
            ListOptions::new(MAX_LIMIT, true, AvatarUrl::AsReturned,).expect("limit at cap",);
        assert_eq!(accepted.limit, MAX_LIMIT);
        assert!(accepted.include_bots);

        let error = ListOptions::new(u32::MAX, false, AvatarUrl::AsReturned,)
            .expect_err("expected validation error",);
        match error {
            Error::Validation {
                message,
            } => assert!(message.contains("must not exceed 500")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn template_without_placeholder_is_used_verbatim()
    {
        let strategy = AvatarUrl::UserIdTemplate("https://example.com/static.png".to_owned(),);
        assert_eq!(strategy.resolve(7, "ignored",), "https://example.com/static.png");
    }
}
