use anyhow::Context;
use atlas_client::DEFAULT_API_BASE;
use atlas_core::session::{DEFAULT_NODE, DEFAULT_PATH_FROM, DEFAULT_PATH_TO};
use atlas_core::{EdgeHighlight, LayoutParams, SessionDefaults};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub api_base: String,
    pub default_node: String,
    pub path_from: String,
    pub path_to: String,
    pub edge_highlight: EdgeHighlight,
    pub ring_radius: f32,
    pub ring_height: f32,
    pub show_labels: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let layout = LayoutParams::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_node: DEFAULT_NODE.to_string(),
            path_from: DEFAULT_PATH_FROM.to_string(),
            path_to: DEFAULT_PATH_TO.to_string(),
            edge_highlight: EdgeHighlight::default(),
            ring_radius: layout.radius,
            ring_height: layout.height,
            show_labels: true,
        }
    }
}

impl ViewerConfig {
    pub fn layout_params(&self) -> LayoutParams {
        let fallback = LayoutParams::default();
        LayoutParams {
            radius: if self.ring_radius > 0.0 {
                self.ring_radius
            } else {
                fallback.radius
            },
            height: self.ring_height,
        }
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            center_id: self.default_node.clone(),
            path_from: self.path_from.clone(),
            path_to: self.path_to.clone(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "atlas-viewer")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable viewer config");
        ViewerConfig::default()
    })
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<PathBuf> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)?;
    Ok(path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}
