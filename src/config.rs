use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

/// How the viewport treats the highlighted node.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// Recenter the viewport on the node.
    Center,
    /// Minimal scroll to bring the node into view.
    #[default]
    Visible,
}

impl Placement {
    /// Map the transformer's wire value: exactly `"center"` recenters,
    /// anything else scrolls minimally.
    pub fn from_wire(value: &str) -> Self {
        if value == "center" {
            Self::Center
        } else {
            Self::Visible
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_auto_expand: bool,
    pub placement: Option<Placement>,
    pub bottom_margin: Option<u16>,
    pub theme: Option<ThemeMode>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_auto_expand: self.no_auto_expand || other.no_auto_expand,
            placement: other.placement.or(self.placement),
            bottom_margin: other.bottom_margin.or(self.bottom_margin),
            theme: other.theme.or(self.theme),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mindline").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mindline")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mindline").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("mindline")
                .join("config");
        }
    }

    PathBuf::from(".mindlinerc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mindlinerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mindline defaults (saved with --save)".to_string());
    if flags.no_auto_expand {
        lines.push("--no-auto-expand".to_string());
    }
    if let Some(placement) = flags.placement {
        let placement_str = match placement {
            Placement::Center => "center",
            Placement::Visible => "visible",
        };
        lines.push(format!("--placement {}", placement_str));
    }
    if let Some(margin) = flags.bottom_margin {
        lines.push(format!("--bottom-margin {}", margin));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {}", theme_str));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-auto-expand" {
            flags.no_auto_expand = true;
        } else if token == "--placement" {
            if let Some(next) = tokens.get(i + 1) {
                flags.placement = parse_placement(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--placement=") {
            flags.placement = parse_placement(value);
        } else if token == "--bottom-margin" {
            if let Some(next) = tokens.get(i + 1) {
                flags.bottom_margin = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--bottom-margin=") {
            flags.bottom_margin = value.parse().ok();
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        }
        i += 1;
    }
    flags
}

fn parse_placement(s: &str) -> Option<Placement> {
    match s {
        "center" => Some(Placement::Center),
        "visible" => Some(Placement::Visible),
        _ => None,
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
