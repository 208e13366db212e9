//! On-disk layout of one set directory

use std::path::{Path, PathBuf};

pub const CARDS_CSV: &str = "cards.csv";
pub const SET_JSON: &str = "set.json";
pub const OUTPUT_JSON: &str = "output.json";
pub const WWW_DIR: &str = "www";
pub const ASSETS_DIR: &str = "assets";

/// Cover images, probed in this order
const COVER_IMAGES: &[&str] = &["cover.png", "cover.jpg", "cover.webp"];

#[derive(Debug, Clone)]
pub struct SetPaths {
    pub name: String,
    pub dir: PathBuf,
}

impl SetPaths {
    pub fn new(sets_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: sets_dir.join(name),
        }
    }

    pub fn cards_csv(&self) -> PathBuf {
        self.dir.join(CARDS_CSV)
    }

    pub fn set_json(&self) -> PathBuf {
        self.dir.join(SET_JSON)
    }

    pub fn output_json(&self) -> PathBuf {
        self.dir.join(OUTPUT_JSON)
    }

    pub fn www_dir(&self) -> PathBuf {
        self.dir.join(WWW_DIR)
    }

    /// Cover image as a path relative to `www/`, if one exists
    pub fn cover_image(&self) -> Option<String> {
        let assets = self.dir.join(ASSETS_DIR);
        COVER_IMAGES
            .iter()
            .find(|name| assets.join(name).is_file())
            .map(|name| format!("../{}/{}", ASSETS_DIR, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_paths() {
        let paths = SetPaths::new(Path::new("set"), "xxvi");
        assert_eq!(paths.cards_csv(), Path::new("set/xxvi/cards.csv"));
        assert_eq!(paths.set_json(), Path::new("set/xxvi/set.json"));
        assert_eq!(paths.output_json(), Path::new("set/xxvi/output.json"));
        assert_eq!(paths.www_dir(), Path::new("set/xxvi/www"));
    }

    #[test]
    fn test_cover_image_priority() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetPaths::new(dir.path(), "xxvi");
        assert_eq!(paths.cover_image(), None);

        let assets = paths.dir.join(ASSETS_DIR);
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("cover.webp"), b"").unwrap();
        assert_eq!(paths.cover_image().as_deref(), Some("../assets/cover.webp"));

        fs::write(assets.join("cover.jpg"), b"").unwrap();
        assert_eq!(paths.cover_image().as_deref(), Some("../assets/cover.jpg"));
    }
}
