//! Background media selection.
//!
//! A background is an opaque locator plus a [`MediaKind`] derived from the
//! locator itself. Selection never checks that the resource is reachable;
//! the durable read grant is a separate best-effort step through
//! [`ResourceGrants`].

use std::fs::File;
use std::io;

use mime_guess::mime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::file_locator_path;

/// How a background resource renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Static image, scaled to fill
    #[default]
    Image,
    /// Muted video, looped
    Video,
}

impl MediaKind {
    #[must_use]
    pub const fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }

    #[must_use]
    pub const fn from_video_flag(is_video: bool) -> Self {
        if is_video {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// A chosen background: the locator as given and its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSelection {
    pub locator: String,
    pub kind: MediaKind,
}

impl BackgroundSelection {
    /// Classify a picked locator, keeping it as given; blank locators yield `None`
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Option<Self> {
        let locator = locator.into();
        if locator.trim().is_empty() {
            return None;
        }

        let kind = classify(locator.trim());
        Some(Self { locator, kind })
    }

    #[must_use]
    pub const fn is_video(&self) -> bool {
        self.kind.is_video()
    }
}

/// Classify a locator as image or video.
///
/// A recognised file extension decides first (`video/*` is a video, anything
/// else an image). Locators without one, such as content-provider URIs, are
/// videos when their path mentions `video`.
#[must_use]
pub fn classify(locator: &str) -> MediaKind {
    let path = strip_query_and_fragment(locator);

    if let Some(guess) = mime_guess::from_path(path).first() {
        return MediaKind::from_video_flag(guess.type_() == mime::VIDEO);
    }

    MediaKind::from_video_flag(path.to_ascii_lowercase().contains("video"))
}

fn strip_query_and_fragment(locator: &str) -> &str {
    locator
        .split(['?', '#'])
        .next()
        .unwrap_or(locator)
}

/// Errors from requesting a durable grant on a picked resource
#[derive(Debug, Error)]
pub enum GrantError {
    #[error("resource {locator} is not readable: {source}")]
    Unreadable {
        locator: String,
        #[source]
        source: io::Error,
    },
    #[error("grant refused for {0}")]
    Refused(String),
}

/// Source of durable read grants for picked resources
pub trait ResourceGrants {
    /// Ask for read access that outlives the current session
    fn take_persistable_grant(&self, locator: &str) -> Result<(), GrantError>;
}

impl<G: ResourceGrants + ?Sized> ResourceGrants for &G {
    fn take_persistable_grant(&self, locator: &str) -> Result<(), GrantError> {
        (**self).take_persistable_grant(locator)
    }
}

/// Grants everything; for environments without a permission model
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrants;

impl ResourceGrants for NoGrants {
    fn take_persistable_grant(&self, _locator: &str) -> Result<(), GrantError> {
        Ok(())
    }
}

/// Grants local files that can be opened for reading.
///
/// Non-file schemes are outside this process's control and are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileGrants;

impl ResourceGrants for LocalFileGrants {
    fn take_persistable_grant(&self, locator: &str) -> Result<(), GrantError> {
        let Some(path) = file_locator_path(locator) else {
            return Ok(());
        };

        File::open(path)
            .map(|_| ())
            .map_err(|source| GrantError::Unreadable {
                locator: locator.to_string(),
                source,
            })
    }
}

/// Request a grant once, logging and swallowing any failure
pub fn request_grant_best_effort<G: ResourceGrants + ?Sized>(grants: &G, locator: &str) -> bool {
    match grants.take_persistable_grant(locator) {
        Ok(()) => {
            tracing::debug!("Took persistable grant on {locator}");
            true
        }
        Err(error) => {
            tracing::warn!("Could not take persistable grant: {error}");
            false
        }
    }
}
