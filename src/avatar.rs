// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Avatar download and embedding.
//!
//! Avatars are requested at the rendered size through the host's `s` query
//! parameter and embedded into the SVG as base64 data URIs so the output
//! renders without further network access.

use std::future::Future;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::CONTENT_TYPE;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{config::REQUEST_TIMEOUT, error::Error};

/// Mime type assumed when the host does not declare an image type.
const FALLBACK_MIME: &str = "image/png";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw image bytes together with the declared content type.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct FetchedImage
{
    pub bytes:        Vec<u8,>,
    pub content_type: Option<String,>,
}

/// Downloads avatar images.
pub trait AvatarFetcher: Clone + Send + Sync + 'static
{
    /// Performs a binary GET of `url`.
    fn fetch(&self, url: &str,) -> impl Future<Output = Result<FetchedImage, Error,>,> + Send;
}

/// [`AvatarFetcher`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone,)]
pub struct HttpAvatarFetcher
{
    client: reqwest::Client,
}

impl HttpAvatarFetcher
{
    /// Builds the HTTP client used for every avatar of a run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, Error,>
    {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT,)
            .user_agent(USER_AGENT,)
            .build()
            .map_err(|e| Error::service(format!("failed to create HTTP client: {e}"),),)?;

        Ok(Self {
            client,
        },)
    }
}

impl AvatarFetcher for HttpAvatarFetcher
{
    async fn fetch(&self, url: &str,) -> Result<FetchedImage, Error,>
    {
        let response = self.client.get(url,).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE,)
            .and_then(|value| value.to_str().ok(),)
            .map(str::to_owned,);
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedImage {
            bytes, content_type,
        },)
    }
}

/// Appends the host-side resize parameter to an avatar URL.
///
/// Data URIs are returned unchanged.
///
/// # Examples
///
/// ```
/// use contrib_grid::sized_avatar_url;
///
/// assert_eq!(
///     sized_avatar_url("https://avatars.githubusercontent.com/u/1?v=4", 60,),
///     "https://avatars.githubusercontent.com/u/1?v=4&s=60"
/// );
/// assert_eq!(sized_avatar_url("https://example.com/a.png", 60,), "https://example.com/a.png?s=60");
/// ```
pub fn sized_avatar_url(url: &str, size: u32,) -> String
{
    if url.starts_with("data:",) {
        return url.to_owned();
    }

    let separator = if url.contains('?',) { '&' } else { '?' };
    format!("{url}{separator}s={size}")
}

/// Encodes a fetched image as a `data:` URI.
pub fn encode_data_uri(image: &FetchedImage,) -> String
{
    let mime = image
        .content_type
        .as_deref()
        .and_then(|value| value.split(';',).next(),)
        .map(str::trim,)
        .filter(|value| value.starts_with("image/",),)
        .unwrap_or(FALLBACK_MIME,);

    format!("data:{mime};base64,{}", BASE64.encode(&image.bytes,))
}

/// Fetches an avatar at `size` pixels and returns it as a data URI.
///
/// URLs that already are data URIs are returned without a request.
///
/// # Errors
///
/// Returns the transport, status or timeout error of the request. The
/// renderer turns it into a placeholder cell.
pub async fn fetch_data_uri<F: AvatarFetcher,>(
    fetcher: &F,
    url: &str,
    size: u32,
) -> Result<String, Error,>
{
    if url.starts_with("data:",) {
        return Ok(url.to_owned(),);
    }

    let sized = sized_avatar_url(url, size,);
    debug!("Fetching avatar {}", sized);

    let image = match timeout(REQUEST_TIMEOUT, fetcher.fetch(&sized,),).await {
        Ok(Ok(image,),) => image,
        Ok(Err(error,),) => {
            warn!("Avatar {} could not be fetched: {}", sized, error);
            return Err(error,);
        }
        Err(_,) => {
            let error = Error::timeout(format!("avatar {sized}"), REQUEST_TIMEOUT,);
            warn!("{}", error);
            return Err(error,);
        }
    };

    Ok(encode_data_uri(&image,),)
}

#[cfg(test)]
mod tests
{
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, Default,)]
    struct RecordingFetcher
    {
        urls: Arc<Mutex<Vec<String,>,>,>,
        fail: bool,
    }

    impl AvatarFetcher for RecordingFetcher
    {
        async fn fetch(&self, url: &str,) -> Result<FetchedImage, Error,>
        {
            self.urls.lock().unwrap().push(url.to_owned(),);
            if self.fail {
                return Err(Error::Status {
                    url: url.to_owned(), status: 502,
                },);
            }
            Ok(FetchedImage {
                bytes: b"png".to_vec(), content_type: Some("image/png".to_owned(),),
            },)
        }
    }

    #[test]
    fn data_uri_uses_declared_image_type()
    {
        let image = FetchedImage {
            bytes:        vec![0xff, 0xd8, 0xff],
            content_type: Some("image/jpeg; charset=binary".to_owned(),),
        };
        assert_eq!(encode_data_uri(&image), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn data_uri_falls_back_to_png()
    {
        let missing = FetchedImage {
            bytes: b"abc".to_vec(), content_type: None,
        };
        assert_eq!(encode_data_uri(&missing), "data:image/png;base64,YWJj");

        let not_an_image = FetchedImage {
            bytes: b"abc".to_vec(), content_type: Some("text/html".to_owned(),),
        };
        assert_eq!(encode_data_uri(&not_an_image), "data:image/png;base64,YWJj");
    }

    #[test]
    fn sized_url_leaves_data_uris_alone()
    {
        let uri = "data:image/png;base64,AAAA";
        assert_eq!(sized_avatar_url(uri, 60), uri);
    }

    #[tokio::test]
    async fn fetch_requests_sized_url_and_encodes()
    {
        let fetcher = RecordingFetcher::default();
        let uri = fetch_data_uri(&fetcher, "https://avatars.example/u/1?v=4", 48,)
            .await
            .expect("fetch should succeed",);

        assert_eq!(uri, "data:image/png;base64,cG5n");
        assert_eq!(*fetcher.urls.lock().unwrap(), vec![
            "https://avatars.example/u/1?v=4&s=48".to_owned()
        ]);
    }

    #[tokio::test]
    async fn embedded_avatars_skip_the_network()
    {
        let fetcher = RecordingFetcher::default();
        let uri = fetch_data_uri(&fetcher, "data:image/png;base64,AAAA", 60,)
            .await
            .expect("data uri passes through",);

        assert_eq!(uri, "data:image/png;base64,AAAA");
        assert!(fetcher.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_is_reported()
    {
        let fetcher = RecordingFetcher {
            fail: true, ..RecordingFetcher::default()
        };
        let error = fetch_data_uri(&fetcher, "https://avatars.example/u/2", 60,)
            .await
            .expect_err("expected status error",);

        match error {
            Error::Status {
                status, ..
            } => assert_eq!(status, 502),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn http_fetcher_can_be_constructed()
    {
        assert!(HttpAvatarFetcher::new().is_ok());
    }
}
