// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistence of the rendered SVG.
//!
//! The document is minified by collapsing whitespace runs and written over
//! any existing file. Failures here are fatal for the run.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::info;

use crate::error::{self, Error};

static WHITESPACE_RUN: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\s+",).expect("valid whitespace pattern",),);

/// Collapses every run of whitespace into a single space.
///
/// # Examples
///
/// ```
/// use contrib_grid::minify;
///
/// assert_eq!(minify("<svg>\n  <a>\t</a>\n</svg>\n",), "<svg> <a> </a> </svg> ");
/// ```
pub fn minify(svg: &str,) -> String
{
    WHITESPACE_RUN.replace_all(svg, " ",).into_owned()
}

/// Minifies `svg` and writes it to `path`, replacing any previous file.
///
/// # Errors
///
/// Returns [`Error::Write`] when the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use contrib_grid::write_svg;
///
/// # fn example() -> Result<(), contrib_grid::Error> {
/// let path = write_svg(Path::new("contributors.svg",), "<svg>\n</svg>",)?;
/// println!("Saved {}", path.display());
/// # Ok(())
/// # }
/// ```
pub fn write_svg(path: &Path, svg: &str,) -> Result<PathBuf, Error,>
{
    let minified = minify(svg,);

    let file = File::create(path,).map_err(|source| error::write_error(path, source,),)?;
    let mut writer = BufWriter::new(file,);
    writer
        .write_all(minified.as_bytes(),)
        .map_err(|source| error::write_error(path, source,),)?;
    writer.flush().map_err(|source| error::write_error(path, source,),)?;

    info!("Wrote {} bytes to {}", minified.len(), path.display());

    Ok(path.to_path_buf(),)
}
