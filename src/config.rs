use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Preference key holding the editor theme id.
pub const EDITOR_THEME_KEY: &str = "editor-theme";
/// Preference key holding the light/dark/system colour mode.
pub const COLOR_MODE_KEY: &str = "theme";

/// Colour scheme of the editor pane.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorTheme {
    GithubLight,
    #[default]
    GithubDark,
    Dracula,
    Monokai,
    SolarizedDark,
}

impl EditorTheme {
    /// Selector order.
    pub const ALL: [Self; 5] = [
        Self::GithubLight,
        Self::GithubDark,
        Self::Dracula,
        Self::Monokai,
        Self::SolarizedDark,
    ];

    /// Identifier stored in the preference file.
    pub const fn id(self) -> &'static str {
        match self {
            Self::GithubLight => "github-light",
            Self::GithubDark => "github-dark",
            Self::Dracula => "dracula",
            Self::Monokai => "monokai",
            Self::SolarizedDark => "solarized-dark",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GithubLight => "GitHub Light",
            Self::GithubDark => "GitHub Dark",
            Self::Dracula => "Dracula",
            Self::Monokai => "Monokai",
            Self::SolarizedDark => "Solarized Dark",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.id() == id)
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Light/dark preference for the page chrome and preview.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Light,
    Dark,
    /// Follow the terminal background.
    #[default]
    System,
}

impl ColorMode {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    /// Resolve to a concrete appearance, consulting a `COLORFGBG` value for `System`.
    pub fn resolve_with(self, colorfgbg: Option<&str>) -> Appearance {
        match self {
            Self::Light => Appearance::Light,
            Self::Dark => Appearance::Dark,
            Self::System => Appearance::from_colorfgbg(colorfgbg),
        }
    }
}

/// The appearance actually in effect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    #[default]
    Dark,
}

impl Appearance {
    /// Interpret a `COLORFGBG` value (`fg;bg`). Missing or unparsable is dark.
    pub fn from_colorfgbg(colorfgbg: Option<&str>) -> Self {
        let Some(value) = colorfgbg else {
            return Self::Dark;
        };
        let bg_str = value.rsplit(';').next().unwrap_or(value);
        let Ok(bg) = bg_str.trim().parse::<u8>() else {
            return Self::Dark;
        };
        // 7 is white; 8 is bright black, the rest of the bright range is light.
        if bg == 7 || (9..=15).contains(&bg) {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to read preferences {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write preferences {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preferences {} are not a JSON object of strings", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode preferences")]
    Encode(#[from] serde_json::Error),
}

/// Default location of the preference file for this platform.
pub fn preferences_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(
                PathBuf::from(appdata)
                    .join("splitmark")
                    .join("preferences.json"),
            );
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("splitmark")
                    .join("preferences.json"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("splitmark").join("preferences.json"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("splitmark")
                    .join("preferences.json"),
            );
        }
    }

    None
}

/// Flat string key/value store persisted as a JSON object.
///
/// Every `set` writes the whole file. A store without a path keeps values in
/// memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, PreferenceError> {
        if !path.exists() {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                values: BTreeMap::new(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| PreferenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let values = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content).map_err(|source| PreferenceError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };
        tracing::info!(path = %path.display(), "preferences.load");
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Like [`load`](Self::load), but an unreadable or corrupt file yields an
    /// empty store that will overwrite it on the next `set`.
    pub fn open(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "preferences unreadable, using defaults");
            Self {
                path: Some(path.to_path_buf()),
                values: BTreeMap::new(),
            }
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and write the file immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(path, format!("{json}\n")).map_err(|source| PreferenceError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "preferences.save");
        Ok(())
    }
}

/// Typed view of the stored preferences, with defaults applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub editor_theme: EditorTheme,
    pub color_mode: ColorMode,
}

impl Preferences {
    /// Read both keys, falling back to the default for missing or unknown values.
    pub fn from_store(store: &PreferenceStore) -> Self {
        let editor_theme = store
            .get(EDITOR_THEME_KEY)
            .and_then(|id| {
                let theme = EditorTheme::from_id(id);
                if theme.is_none() {
                    tracing::warn!(value = id, "unknown editor theme preference");
                }
                theme
            })
            .unwrap_or_default();
        let color_mode = store
            .get(COLOR_MODE_KEY)
            .and_then(|id| {
                let mode = ColorMode::from_id(id);
                if mode.is_none() {
                    tracing::warn!(value = id, "unknown colour mode preference");
                }
                mode
            })
            .unwrap_or_default();
        Self {
            editor_theme,
            color_mode,
        }
    }

    /// Apply session overrides (from the command line) on top.
    #[must_use]
    pub fn with_overrides(self, theme: Option<EditorTheme>, mode: Option<ColorMode>) -> Self {
        Self {
            editor_theme: theme.unwrap_or(self.editor_theme),
            color_mode: mode.unwrap_or(self.color_mode),
        }
    }
}
