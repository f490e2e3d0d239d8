use notion_icon_types::DEFAULT_MIME_TYPE;
use std::path::Path;

/// Mime type for an image file extension, if it is one we recognize.
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}

/// Explicit mime type, else the guess from the extension, else `image/png`.
pub fn mime_type_for(path: &Path, explicit: Option<&str>) -> String {
    explicit
        .filter(|m| !m.trim().is_empty())
        .or_else(|| guess_mime_type(path))
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}
