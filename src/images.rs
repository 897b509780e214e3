use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_IMAGE: &str = "default.png";
const PROVIDER_PLACEHOLDER: &str = "https://cdn.sportmonks.com/images/cricket/placeholder.png";

#[derive(Debug, Clone, Default, Deserialize)]
struct ImageIndex {
    #[serde(default)]
    data: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub image_path: String,
}

/// Player portrait references keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PlayerImages {
    entries: Vec<ImageEntry>,
}

impl PlayerImages {
    pub fn new(entries: Vec<ImageEntry>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading player images from {}", path.display()))?;
        let index: ImageIndex = serde_json::from_str(&content)
            .with_context(|| format!("parsing player images in {}", path.display()))?;
        Ok(Self::new(index.data))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Match on surname plus first initial, then surname alone.
    pub fn lookup(&self, player: &str) -> &str {
        let parts: Vec<&str> = player.split(' ').collect();
        let last_name = parts.last().copied().unwrap_or_default();
        let initial = parts.first().and_then(|p| p.chars().next());

        let found = self
            .entries
            .iter()
            .find(|e| e.lastname == last_name && e.firstname.chars().next() == initial)
            .or_else(|| self.entries.iter().find(|e| e.lastname == last_name));

        match found {
            Some(e) if e.image_path != PROVIDER_PLACEHOLDER && !e.image_path.is_empty() => {
                &e.image_path
            }
            _ => DEFAULT_IMAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(first: &str, last: &str, path: &str) -> ImageEntry {
        ImageEntry { firstname: first.into(), lastname: last.into(), image_path: path.into() }
    }

    fn images() -> PlayerImages {
        PlayerImages::new(vec![
            entry("Kevin", "O'Brien", "kob.png"),
            entry("Niall", "O'Brien", "nob.png"),
            entry("Sikandar", "Raza", PROVIDER_PLACEHOLDER),
            entry("Paul", "Stirling", "stirling.png"),
        ])
    }

    #[test]
    fn initial_disambiguates_shared_surnames() {
        assert_eq!(images().lookup("N O'Brien"), "nob.png");
        assert_eq!(images().lookup("K O'Brien"), "kob.png");
    }

    #[test]
    fn falls_back_to_surname_only() {
        assert_eq!(images().lookup("PR Stirling"), "stirling.png");
        assert_eq!(images().lookup("T O'Brien"), "kob.png");
    }

    #[test]
    fn placeholder_and_misses_map_to_default() {
        assert_eq!(images().lookup("Sikandar Raza"), DEFAULT_IMAGE);
        assert_eq!(images().lookup("Nobody Known"), DEFAULT_IMAGE);
    }

    #[test]
    fn loads_index_file() {
        let dir = std::env::temp_dir().join(format!("cricxi-images-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("playerImages.json");
        std::fs::write(
            &path,
            r#"{"data":[{"firstname":"Paul","lastname":"Stirling","image_path":"p.png"}]}"#,
        )
        .unwrap();
        let images = PlayerImages::load(&path).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images.lookup("Paul Stirling"), "p.png");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
