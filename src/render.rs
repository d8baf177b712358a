// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Grid layout and SVG assembly.
//!
//! Contributors are placed row-major into a fixed number of columns. The
//! document is collected as a list of positioned [`AvatarCell`] values and
//! serialized once through [`std::fmt::Display`], escaping every piece of
//! user supplied text.

use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter}
};

use tracing::{info, warn};

use crate::{
    avatar::{AvatarFetcher, fetch_data_uri},
    config::{GridOptions, PROFILE_BASE_URL},
    contributors::Contributor
};

/// Fill colour of the cell drawn when an avatar could not be fetched.
const PLACEHOLDER_FILL: &str = "#d0d7de";

/// Pixel geometry of the avatar grid.
///
/// # Examples
///
/// ```
/// use contrib_grid::{GridLayout, GridOptions};
///
/// let layout = GridLayout::new(GridOptions::default());
/// assert_eq!(layout.position(12), (140, 70));
/// assert_eq!(layout.width(), 710);
/// assert_eq!(layout.height(3), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns:     u32,
    avatar_size: u32,
    margin:      u32
}

impl GridLayout {
    /// Creates a layout from validated grid options.
    pub fn new(options: GridOptions) -> Self {
        Self {
            columns:     options.columns(),
            avatar_size: options.avatar_size(),
            margin:      options.margin()
        }
    }

    /// Offset of the cell holding the contributor at `index`.
    pub fn position(&self, index: usize) -> (u64, u64) {
        let index = index as u64;
        let columns = u64::from(self.columns);
        let stride = self.stride();
        ((index % columns) * stride, (index / columns) * stride)
    }

    /// Number of rows needed for `count` contributors.
    pub fn rows(&self, count: usize) -> u64 {
        (count as u64).div_ceil(u64::from(self.columns))
    }

    /// Document width; independent of the contributor count.
    pub fn width(&self) -> u64 {
        let columns = u64::from(self.columns);
        columns * u64::from(self.avatar_size) + (columns + 1) * u64::from(self.margin)
    }

    /// Document height for `count` contributors.
    pub fn height(&self, count: usize) -> u64 {
        let rows = self.rows(count);
        rows * u64::from(self.avatar_size) + (rows + 1) * u64::from(self.margin)
    }

    /// Avatar edge length in pixels.
    pub fn avatar_size(&self) -> u32 {
        self.avatar_size
    }

    fn stride(&self) -> u64 {
        u64::from(self.avatar_size) + u64::from(self.margin)
    }
}

/// Image shown inside a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarImage {
    /// Avatar embedded as a data URI.
    Embedded(String),
    /// Grey rounded square drawn when the avatar could not be fetched.
    Placeholder
}

/// One positioned avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarCell {
    pub x:     u64,
    pub y:     u64,
    pub size:  u32,
    pub login: String,
    pub image: AvatarImage
}

/// Structured SVG document for a contributor grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDocument {
    pub width:  u64,
    pub height: u64,
    pub cells:  Vec<AvatarCell>
}

impl GridDocument {
    /// Positions one cell per contributor, pairing each with its image in
    /// input order.
    pub fn assemble<I>(layout: &GridLayout, contributors: &[Contributor], images: I) -> Self
    where
        I: IntoIterator<Item = AvatarImage>
    {
        let cells = contributors
            .iter()
            .zip(images)
            .enumerate()
            .map(|(index, (contributor, image))| {
                let (x, y) = layout.position(index);
                AvatarCell {
                    x,
                    y,
                    size: layout.avatar_size(),
                    login: contributor.name.clone(),
                    image
                }
            })
            .collect();

        Self {
            width: layout.width(),
            height: layout.height(contributors.len()),
            cells
        }
    }

    /// Number of cells whose avatar could not be fetched.
    pub fn placeholder_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.image == AvatarImage::Placeholder)
            .count()
    }
}

impl Display for GridDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        )?;
        writeln!(
            f,
            "  <clipPath id=\"clip\" clipPathUnits=\"objectBoundingBox\">\n    <rect ry=\"0.5\" width=\"1\" height=\"1\" fill=\"black\"/>\n  </clipPath>"
        )?;
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        writeln!(f, "</svg>")
    }
}

impl Display for AvatarCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let login = escape_xml(&self.login);
        let size = self.size;

        writeln!(
            f,
            "  <svg x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\">",
            self.x, self.y
        )?;
        writeln!(
            f,
            "    <a href=\"{}{login}\" target=\"_blank\">",
            PROFILE_BASE_URL
        )?;
        writeln!(f, "      <title>{login}</title>")?;
        match &self.image {
            AvatarImage::Embedded(uri) => writeln!(
                f,
                "      <image href=\"{}\" width=\"{size}\" height=\"{size}\" clip-path=\"url(#clip)\"/>",
                escape_xml(uri)
            )?,
            AvatarImage::Placeholder => writeln!(
                f,
                "      <rect width=\"{size}\" height=\"{size}\" fill=\"{PLACEHOLDER_FILL}\" clip-path=\"url(#clip)\"/>"
            )?
        }
        writeln!(f, "    </a>\n  </svg>")
    }
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

/// Fetches every avatar concurrently and assembles the grid document.
///
/// Avatars that fail to download, time out, or whose fetch task panics are
/// rendered as placeholders so a single bad image never aborts the render.
///
/// # Example
///
/// ```no_run
/// use contrib_grid::{Contributor, GridOptions, HttpAvatarFetcher, render_grid};
///
/// # async fn example() -> Result<(), contrib_grid::Error> {
/// let fetcher = HttpAvatarFetcher::new()?;
/// let contributors = vec![Contributor {
///     name:       "octocat".to_owned(),
///     avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_owned()
/// }];
/// let document = render_grid(&fetcher, &contributors, GridOptions::default()).await;
/// println!("{document}");
/// # Ok(())
/// # }
/// ```
pub async fn render_grid<F: AvatarFetcher>(
    fetcher: &F,
    contributors: &[Contributor],
    options: GridOptions
) -> GridDocument {
    let layout = GridLayout::new(options);
    let size = layout.avatar_size();

    let handles: Vec<_> = contributors
        .iter()
        .map(|contributor| {
            let fetcher = fetcher.clone();
            let url = contributor.avatar_url.clone();
            tokio::spawn(async move { fetch_data_uri(&fetcher, &url, size).await })
        })
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for (contributor, handle) in contributors.iter().zip(handles) {
        let image = match handle.await {
            Ok(Ok(uri)) => AvatarImage::Embedded(uri),
            Ok(Err(error)) => {
                warn!("Using placeholder for {}: {}", contributor.name, error);
                AvatarImage::Placeholder
            }
            Err(join_error) => {
                warn!("Avatar task for {} aborted: {}", contributor.name, join_error);
                AvatarImage::Placeholder
            }
        };
        images.push(image);
    }

    let document = GridDocument::assemble(&layout, contributors, images);
    info!(
        "Rendered {} avatar(s) in a {}x{} grid ({} placeholder(s))",
        document.cells.len(),
        document.width,
        document.height,
        document.placeholder_count()
    );

    document
}
