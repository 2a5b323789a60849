//! DTOs for the share link endpoint.

use serde::Serialize;

use crate::application::services::ShareLink;
use crate::domain::entities::{ObjectType, Platform};

/// Share links for one target, one per platform.
#[derive(Debug, Serialize)]
pub struct ShareLinksResponse {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub links: Vec<ShareLinkInfo>,
}

#[derive(Debug, Serialize)]
pub struct ShareLinkInfo {
    pub platform: Platform,
    pub url: String,
}

impl From<ShareLink> for ShareLinkInfo {
    fn from(link: ShareLink) -> Self {
        Self {
            platform: link.platform,
            url: link.url,
        }
    }
}
