use crate::snapshot::ImageInfo;

#[derive(Clone, Copy, Debug)]
pub struct ImageCatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub src: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const DEFAULT_IMAGE_ID: &str = "meadow";

pub const IMAGE_CATALOG: &[ImageCatalogEntry] = &[
    ImageCatalogEntry {
        id: "meadow",
        label: "Meadow",
        src: "images/meadow.jpg",
        width: 1600,
        height: 1067,
    },
    ImageCatalogEntry {
        id: "harbor",
        label: "Harbor",
        src: "images/harbor.jpg",
        width: 1920,
        height: 1280,
    },
    ImageCatalogEntry {
        id: "lighthouse",
        label: "Lighthouse",
        src: "images/lighthouse.jpg",
        width: 1200,
        height: 1600,
    },
];

pub fn image_by_id(id: &str) -> Option<&'static ImageCatalogEntry> {
    let trimmed = id.trim();
    IMAGE_CATALOG
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(trimmed))
}

impl ImageCatalogEntry {
    pub fn to_info(&self) -> ImageInfo {
        ImageInfo {
            id: self.id.to_string(),
            label: self.label.to_string(),
            src: self.src.to_string(),
            width: self.width,
            height: self.height,
        }
    }
}
