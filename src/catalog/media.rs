//! Media type detection from URLs.

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "tiff", "ico",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "mkv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

/// Lowercased extension of the URL path, ignoring any query string.
/// Only ASCII alphanumeric extensions count; anything else yields `""`.
pub fn extension_from_url(url: &str) -> String {
    let path = url.split('?').next().unwrap_or_default().to_lowercase();

    match path.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_string()
        }
        _ => String::new(),
    }
}

pub fn is_image(url: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_from_url(url).as_str())
}

pub fn is_video(url: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&extension_from_url(url).as_str())
}

pub fn detect_kind(url: &str) -> MediaKind {
    if is_image(url) {
        MediaKind::Image
    } else if is_video(url) {
        MediaKind::Video
    } else {
        MediaKind::Other
    }
}

/// Last path segment without the query string, percent-decoded when possible.
pub fn file_name_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or_default();
    let name = last.split('?').next().unwrap_or_default();

    match urlencoding::decode(name) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => name.to_string(),
    }
}
