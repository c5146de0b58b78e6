use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;
use utoipa::ToSchema;

/// ResourceType
///
/// The display type of a library resource. Drives the icon and viewer the
/// clients pick; it is never used for access decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ResourceType {
    Video,
    Audio,
    Pdf,
    Image,
    Link,
    Article,
}

impl FromStr for ResourceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(ResourceType::Video),
            "audio" | "podcast" => Ok(ResourceType::Audio),
            "pdf" | "document" => Ok(ResourceType::Pdf),
            "image" => Ok(ResourceType::Image),
            "link" => Ok(ResourceType::Link),
            "article" => Ok(ResourceType::Article),
            _ => Err(()),
        }
    }
}

// Checked in order; the first type with a keyword hit wins.
const KEYWORDS: &[(ResourceType, &[&str])] = &[
    (ResourceType::Video, &["video", "youtube", "youtu.be", "vimeo", "mp4"]),
    (ResourceType::Audio, &["podcast", "audio", "mp3"]),
    (ResourceType::Pdf, &["pdf"]),
    (ResourceType::Image, &["image", "infographic", "png", "jpg", "jpeg"]),
];

/// infer_resource_type
///
/// Guesses a display type from free-form tags and metadata strings (URL, MIME
/// type, title). An explicit `type:<name>` tag always wins; otherwise keywords
/// are matched case-insensitively, then any http(s) URL makes it a link, and
/// everything else is an article.
pub fn infer_resource_type<T, M>(tags: &[T], metadata: &[M]) -> ResourceType
where
    T: AsRef<str>,
    M: AsRef<str>,
{
    let explicit = tags.iter().find_map(|tag| {
        let tag = tag.as_ref().trim();
        tag.get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("type:"))
            .and_then(|_| tag[5..].parse::<ResourceType>().ok())
    });
    if let Some(resource_type) = explicit {
        return resource_type;
    }

    let haystack: Vec<String> = tags
        .iter()
        .map(|t| t.as_ref())
        .chain(metadata.iter().map(|m| m.as_ref()))
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let keyword_hit = KEYWORDS.iter().find(|(_, words)| {
        haystack
            .iter()
            .any(|value| words.iter().any(|word| value.contains(word)))
    });
    if let Some((resource_type, _)) = keyword_hit {
        return *resource_type;
    }

    if haystack
        .iter()
        .any(|value| value.starts_with("http://") || value.starts_with("https://"))
    {
        return ResourceType::Link;
    }

    ResourceType::Article
}
