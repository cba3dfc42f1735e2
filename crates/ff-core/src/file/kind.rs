use serde::{Deserialize, Serialize};

use crate::file::source::SourceKind;

/// Closed enumeration of the file types the navigator can watch.
///
/// Media kinds are observed through per-kind store collections; non-media
/// kinds are matched by extension within the downloads collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    Archive,
    Apk,
    Ebook,
}

impl FileKind {
    pub const MEDIA: [FileKind; 3] = [FileKind::Image, FileKind::Video, FileKind::Audio];

    pub const NON_MEDIA: [FileKind; 5] = [
        FileKind::Pdf,
        FileKind::Text,
        FileKind::Archive,
        FileKind::Apk,
        FileKind::Ebook,
    ];

    pub const ALL: [FileKind; 8] = [
        FileKind::Image,
        FileKind::Video,
        FileKind::Audio,
        FileKind::Pdf,
        FileKind::Text,
        FileKind::Archive,
        FileKind::Apk,
        FileKind::Ebook,
    ];

    pub fn is_media(&self) -> bool {
        matches!(self, FileKind::Image | FileKind::Video | FileKind::Audio)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Audio => "Audio",
            FileKind::Pdf => "PDF",
            FileKind::Text => "Text",
            FileKind::Archive => "Archive",
            FileKind::Apk => "APK",
            FileKind::Ebook => "E-Book",
        }
    }

    /// Display color for the action surface.
    pub fn color_hex(&self) -> &'static str {
        match self {
            FileKind::Image => "#37a1ab",
            FileKind::Video => "#e55656",
            FileKind::Audio => "#d191e0",
            FileKind::Pdf => "#e24646",
            FileKind::Text => "#8a9fe3",
            FileKind::Archive => "#c1a456",
            FileKind::Apk => "#79bf67",
            FileKind::Ebook => "#d9945e",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileKind::Image => &["jpg", "jpeg", "png", "gif", "bmp", "webp", "heic"],
            FileKind::Video => &["mp4", "mkv", "webm", "avi", "mov", "3gp"],
            FileKind::Audio => &["mp3", "m4a", "wav", "flac", "ogg", "opus", "aac"],
            FileKind::Pdf => &["pdf"],
            FileKind::Text => &["txt", "md", "doc", "docx", "odt", "rtf"],
            FileKind::Archive => &["zip", "rar", "7z", "tar", "gz"],
            FileKind::Apk => &["apk"],
            FileKind::Ebook => &["epub", "mobi", "azw", "azw3"],
        }
    }

    pub fn matches_extension(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.extensions().iter().any(|ext| *ext == extension)
    }

    /// Source kinds a source pair of this kind can be configured with.
    pub fn source_kinds(&self) -> &'static [SourceKind] {
        match self {
            FileKind::Image => &[
                SourceKind::Camera,
                SourceKind::Screenshot,
                SourceKind::Download,
                SourceKind::OtherApp,
            ],
            FileKind::Video => &[
                SourceKind::Camera,
                SourceKind::Download,
                SourceKind::OtherApp,
            ],
            FileKind::Audio => &[SourceKind::Download, SourceKind::OtherApp],
            _ => &[SourceKind::Download],
        }
    }
}
