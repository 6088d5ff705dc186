//! Editor settings
//!
//! Each collection is edited under a [`BlockEditorConfig`]: a title, the
//! block types that may be added, an optional size cap and an optional
//! prompt for content generation. [`EditorSettings`] holds one config per
//! collection and can be layered from TOML files:
//!
//! 1. Built-in defaults
//! 2. Global: `<config_dir>/svc-blocks/editor.toml`
//! 3. Project: `<root>/.svc-blocks/editor.toml`
//! 4. Local: `<root>/.svc-blocks/editor.local.toml`
//!
//! Later layers override earlier ones field by field:
//!
//! ```toml
//! [faq]
//! title = "Preguntas frecuentes"
//! max_blocks = 8
//! ai_prompt = "Genera preguntas frecuentes para {service}"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use svc_blocks::BlockType;

use crate::collection::CollectionKind;
use crate::error::{Error, Result};

/// Settings directory name, both globally and inside a project root.
pub const SETTINGS_DIR: &str = ".svc-blocks";
const GLOBAL_DIR: &str = "svc-blocks";
const SETTINGS_FILE: &str = "editor.toml";
const LOCAL_SETTINGS_FILE: &str = "editor.local.toml";

/// How one collection is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEditorConfig {
    pub title: String,
    pub allowed_types: Vec<BlockType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Upper bound on the collection size when adding blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_blocks: Option<usize>,
    /// Prompt template handed to the content generator, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prompt: Option<String>,
}

impl BlockEditorConfig {
    pub fn new(title: impl Into<String>, allowed_types: Vec<BlockType>) -> Self {
        Self {
            title: title.into(),
            allowed_types,
            placeholder: None,
            max_blocks: None,
            ai_prompt: None,
        }
    }

    pub fn allows(&self, block_type: BlockType) -> bool {
        self.allowed_types.contains(&block_type)
    }

    /// Built-in config for a collection.
    pub fn default_for(kind: CollectionKind) -> Self {
        let list_types = vec![BlockType::ListItem, BlockType::Text];
        let (title, types, placeholder) = match kind {
            CollectionKind::Features => {
                ("Características", list_types, "Describe una característica")
            }
            CollectionKind::Benefits => ("Beneficios", list_types, "Describe un beneficio"),
            CollectionKind::Includes => ("Incluye", list_types, "¿Qué incluye el servicio?"),
            CollectionKind::Excludes => {
                ("No incluye", list_types, "¿Qué no incluye el servicio?")
            }
            CollectionKind::Faq => (
                "Preguntas frecuentes",
                vec![BlockType::FaqItem],
                "Escribe una pregunta",
            ),
        };

        Self {
            placeholder: Some(placeholder.to_string()),
            ..Self::new(title, types)
        }
    }

    fn merge(&mut self, overlay: &PartialEditorConfig) {
        if let Some(title) = &overlay.title {
            self.title = title.clone();
        }
        if let Some(types) = &overlay.allowed_types {
            self.allowed_types = types.clone();
        }
        if let Some(placeholder) = &overlay.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(max_blocks) = overlay.max_blocks {
            self.max_blocks = Some(max_blocks);
        }
        if let Some(prompt) = &overlay.ai_prompt {
            self.ai_prompt = Some(prompt.clone());
        }
    }
}

/// A config section as written in a settings file: every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PartialEditorConfig {
    title: Option<String>,
    allowed_types: Option<Vec<BlockType>>,
    placeholder: Option<String>,
    max_blocks: Option<usize>,
    ai_prompt: Option<String>,
}

/// One settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    features: Option<PartialEditorConfig>,
    benefits: Option<PartialEditorConfig>,
    includes: Option<PartialEditorConfig>,
    excludes: Option<PartialEditorConfig>,
    faq: Option<PartialEditorConfig>,
}

impl SettingsFile {
    fn section(&self, kind: CollectionKind) -> Option<&PartialEditorConfig> {
        match kind {
            CollectionKind::Features => self.features.as_ref(),
            CollectionKind::Benefits => self.benefits.as_ref(),
            CollectionKind::Includes => self.includes.as_ref(),
            CollectionKind::Excludes => self.excludes.as_ref(),
            CollectionKind::Faq => self.faq.as_ref(),
        }
    }
}

/// Editor config for every collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSettings {
    pub features: BlockEditorConfig,
    pub benefits: BlockEditorConfig,
    pub includes: BlockEditorConfig,
    pub excludes: BlockEditorConfig,
    pub faq: BlockEditorConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            features: BlockEditorConfig::default_for(CollectionKind::Features),
            benefits: BlockEditorConfig::default_for(CollectionKind::Benefits),
            includes: BlockEditorConfig::default_for(CollectionKind::Includes),
            excludes: BlockEditorConfig::default_for(CollectionKind::Excludes),
            faq: BlockEditorConfig::default_for(CollectionKind::Faq),
        }
    }
}

impl EditorSettings {
    /// Built-in defaults overlaid with one TOML document.
    ///
    /// # Example
    ///
    /// ```
    /// use svc_content::{CollectionKind, EditorSettings};
    ///
    /// let settings = EditorSettings::parse("[faq]\nmax_blocks = 5\n").unwrap();
    /// assert_eq!(settings.get(CollectionKind::Faq).max_blocks, Some(5));
    /// assert_eq!(settings.get(CollectionKind::Features).title, "Características");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.overlay(content)?;
        Ok(settings)
    }

    /// Read one settings file over the built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = Self::default();
        settings.overlay_file(path)?;
        Ok(settings)
    }

    pub fn get(&self, kind: CollectionKind) -> &BlockEditorConfig {
        match kind {
            CollectionKind::Features => &self.features,
            CollectionKind::Benefits => &self.benefits,
            CollectionKind::Includes => &self.includes,
            CollectionKind::Excludes => &self.excludes,
            CollectionKind::Faq => &self.faq,
        }
    }

    pub fn get_mut(&mut self, kind: CollectionKind) -> &mut BlockEditorConfig {
        match kind {
            CollectionKind::Features => &mut self.features,
            CollectionKind::Benefits => &mut self.benefits,
            CollectionKind::Includes => &mut self.includes,
            CollectionKind::Excludes => &mut self.excludes,
            CollectionKind::Faq => &mut self.faq,
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply a TOML document over the current values.
    pub fn overlay(&mut self, content: &str) -> Result<()> {
        let file: SettingsFile = toml::from_str(content)?;
        self.apply(&file);
        Ok(())
    }

    fn overlay_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let file: SettingsFile = toml::from_str(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply(&file);
        Ok(())
    }

    fn apply(&mut self, file: &SettingsFile) {
        for kind in CollectionKind::ALL {
            if let Some(section) = file.section(kind) {
                self.get_mut(kind).merge(section);
            }
        }
    }
}

/// Resolves [`EditorSettings`] from the global, project and local layers.
#[derive(Debug, Clone)]
pub struct SettingsResolver {
    root: PathBuf,
    global_dir: Option<PathBuf>,
}

impl SettingsResolver {
    /// Resolver for a project root, with the global layer under the user's
    /// config directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_dir: dirs::config_dir().map(|dir| dir.join(GLOBAL_DIR)),
        }
    }

    /// Use `dir` as the global layer's directory, or skip the layer with `None`.
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of every layer, lowest precedence first.
    pub fn layer_paths(&self) -> Vec<PathBuf> {
        let project_dir = self.root.join(SETTINGS_DIR);
        self.global_dir
            .iter()
            .map(|dir| dir.join(SETTINGS_FILE))
            .chain([
                project_dir.join(SETTINGS_FILE),
                project_dir.join(LOCAL_SETTINGS_FILE),
            ])
            .collect()
    }

    pub fn resolve(&self) -> Result<EditorSettings> {
        let mut settings = EditorSettings::default();

        for path in self.layer_paths() {
            if path.is_file() {
                tracing::debug!(?path, "Loading editor settings layer");
                settings.overlay_file(&path)?;
            } else {
                tracing::debug!(?path, "No editor settings layer found, skipping");
            }
        }

        Ok(settings)
    }
}
