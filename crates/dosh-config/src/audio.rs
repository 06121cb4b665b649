use serde::{Deserialize, Serialize};

fn default_words_dir() -> String {
    "audio/words".to_string()
}

fn default_examples_dir() -> String {
    "audio/examples".to_string()
}

fn default_extension() -> String {
    "mp3".to_string()
}

/// Layout of recorded audio assets. The bytes themselves are opaque.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_words_dir")]
    pub words_dir: String,
    #[serde(default = "default_examples_dir")]
    pub examples_dir: String,
    /// File name suffix, empty for none
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            words_dir: default_words_dir(),
            examples_dir: default_examples_dir(),
            extension: default_extension(),
        }
    }
}

impl AudioConfig {
    pub fn word_path(&self, entry_id: &str) -> String {
        self.asset_path(&self.words_dir, entry_id)
    }

    pub fn example_path(&self, example_id: &str) -> String {
        self.asset_path(&self.examples_dir, example_id)
    }

    fn asset_path(&self, dir: &str, id: &str) -> String {
        let dir = dir.trim_end_matches('/');
        if self.extension.is_empty() {
            format!("{dir}/{id}")
        } else {
            format!("{dir}/{id}.{}", self.extension.trim_start_matches('.'))
        }
    }
}
