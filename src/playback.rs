//! Playback and download URL construction.
//!
//! Playback itself is delegated to the Drive preview viewer; this module
//! only builds the URLs that hand a file id to it. The id is opaque and
//! not validated beyond presence.

/// URL of the embedded preview player for a file id.
pub fn preview_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/preview")
}

/// Direct download URL for a file id.
pub fn download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}
