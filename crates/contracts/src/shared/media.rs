/// Resolve a media path returned by the API against the API base.
///
/// Absolute `http(s)` URLs pass through; relative paths such as
/// `/media/course_thumbnails/a.png` get the base prepended.
pub fn resolve_media_url(base: &str, url: Option<&str>) -> Option<String> {
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return Some(url.to_string());
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        Some(format!("{}{}", base, url))
    } else {
        Some(format!("{}/{}", base, url))
    }
}

/// Largest image accepted for thumbnails and profile pictures.
pub const MAX_IMAGE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

/// `None` when a picked file can be uploaded as an image. `size` is in bytes
/// as the browser reports it.
pub fn check_image_upload(mime_type: &str, size: f64) -> Option<String> {
    if !mime_type.starts_with("image/") {
        return Some("Please select an image file".to_string());
    }
    if size > MAX_IMAGE_BYTES {
        return Some("Image size should not exceed 5MB".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_media_url() {
        assert_eq!(
            resolve_media_url("http://localhost:8000", Some("/media/a.png")),
            Some("http://localhost:8000/media/a.png".to_string())
        );
        assert_eq!(
            resolve_media_url("http://localhost:8000/", Some("media/a.png")),
            Some("http://localhost:8000/media/a.png".to_string())
        );
        assert_eq!(
            resolve_media_url("http://x", Some("https://cdn.example.com/a.png")),
            Some("https://cdn.example.com/a.png".to_string())
        );
        assert_eq!(resolve_media_url("http://x", Some("  ")), None);
        assert_eq!(resolve_media_url("http://x", None), None);
    }

    #[test]
    fn test_check_image_upload() {
        assert_eq!(check_image_upload("image/png", 1024.0), None);
        assert_eq!(check_image_upload("image/jpeg", MAX_IMAGE_BYTES), None);
        assert_eq!(
            check_image_upload("image/png", MAX_IMAGE_BYTES + 1.0).as_deref(),
            Some("Image size should not exceed 5MB")
        );
        assert_eq!(
            check_image_upload("application/pdf", 10.0).as_deref(),
            Some("Please select an image file")
        );
    }
}
