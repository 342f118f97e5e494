use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Resolved site configuration: `folio.toml` (optional) overlaid by
/// `FOLIO_*` environment variables.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub docs_dir: PathBuf,
    pub exclude: Vec<String>,
    pub homepage: HomepageConfig,
    pub giscus: Option<GiscusConfig>,
    pub assistant: AssistantConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            docs_dir: PathBuf::from("docs"),
            exclude: Vec::new(),
            homepage: HomepageConfig::default(),
            giscus: None,
            assistant: AssistantConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration for a site rooted at `root`. A missing config file
    /// is not an error; a malformed one is.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&raw, root)?
        } else if config_path.is_some() {
            return Err(FolioError::Config(format!(
                "config file does not exist: {}",
                path.display()
            )));
        } else {
            Self {
                docs_dir: root.join("docs"),
                ..Self::default()
            }
        };

        config.apply_env_overrides(root);
        Ok(config)
    }

    /// Parse a `folio.toml` document; relative `docs_dir` resolves against
    /// `root`.
    pub fn from_toml_str(raw: &str, root: &Path) -> Result<Self> {
        let file: SiteConfigFile = toml::from_str(raw)?;
        let docs_dir = file.docs_dir.unwrap_or_else(|| PathBuf::from("docs"));
        let docs_dir = if docs_dir.is_absolute() {
            docs_dir
        } else {
            root.join(docs_dir)
        };

        Ok(Self {
            title: file.title.unwrap_or_else(|| "Folio".to_string()),
            docs_dir,
            exclude: file.exclude,
            homepage: file.homepage.unwrap_or_default(),
            giscus: file.giscus.and_then(GiscusFile::resolve),
            assistant: file.assistant.map(AssistantFile::resolve).unwrap_or_default(),
        })
    }

    fn apply_env_overrides(&mut self, root: &Path) {
        if let Some(title) = read_non_empty_env("FOLIO_SITE_TITLE") {
            self.title = title;
        }
        if let Some(dir) = read_non_empty_env("FOLIO_DOCS_DIR") {
            let dir = PathBuf::from(dir);
            self.docs_dir = if dir.is_absolute() { dir } else { root.join(dir) };
        }

        if let Some(giscus) = GiscusConfig::from_env() {
            self.giscus = Some(giscus);
        }
        self.assistant.apply_env_overrides();
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SiteConfigFile {
    title: Option<String>,
    docs_dir: Option<PathBuf>,
    exclude: Vec<String>,
    homepage: Option<HomepageConfig>,
    giscus: Option<GiscusFile>,
    assistant: Option<AssistantFile>,
}

/// Giscus comment-widget settings handed to the client verbatim.
/// Present only when the four repository identifiers are configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiscusConfig {
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub mapping: String,
    pub strict: String,
    pub reactions_enabled: String,
    pub emit_metadata: String,
    pub input_position: String,
    pub theme: String,
    pub lang: String,
}

impl GiscusConfig {
    fn from_env() -> Option<Self> {
        let repo = read_non_empty_env("FOLIO_GISCUS_REPO")?;
        let repo_id = read_non_empty_env("FOLIO_GISCUS_REPO_ID")?;
        let category = read_non_empty_env("FOLIO_GISCUS_CATEGORY")?;
        let category_id = read_non_empty_env("FOLIO_GISCUS_CATEGORY_ID")?;

        Some(Self::with_defaults(
            repo,
            repo_id,
            category,
            category_id,
            GiscusOptional {
                mapping: read_non_empty_env("FOLIO_GISCUS_MAPPING"),
                strict: read_non_empty_env("FOLIO_GISCUS_STRICT"),
                reactions_enabled: read_non_empty_env("FOLIO_GISCUS_REACTIONS_ENABLED"),
                emit_metadata: read_non_empty_env("FOLIO_GISCUS_EMIT_METADATA"),
                input_position: read_non_empty_env("FOLIO_GISCUS_INPUT_POSITION"),
                theme: read_non_empty_env("FOLIO_GISCUS_THEME"),
                lang: read_non_empty_env("FOLIO_GISCUS_LANG"),
            },
        ))
    }

    fn with_defaults(
        repo: String,
        repo_id: String,
        category: String,
        category_id: String,
        optional: GiscusOptional,
    ) -> Self {
        Self {
            repo,
            repo_id,
            category,
            category_id,
            mapping: optional.mapping.unwrap_or_else(|| "pathname".to_string()),
            strict: optional.strict.unwrap_or_else(|| "0".to_string()),
            reactions_enabled: optional
                .reactions_enabled
                .unwrap_or_else(|| "1".to_string()),
            emit_metadata: optional.emit_metadata.unwrap_or_else(|| "0".to_string()),
            input_position: optional
                .input_position
                .unwrap_or_else(|| "bottom".to_string()),
            theme: optional
                .theme
                .unwrap_or_else(|| "preferred_color_scheme".to_string()),
            lang: optional.lang.unwrap_or_else(|| "en".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct GiscusOptional {
    mapping: Option<String>,
    strict: Option<String>,
    reactions_enabled: Option<String>,
    emit_metadata: Option<String>,
    input_position: Option<String>,
    theme: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GiscusFile {
    repo: Option<String>,
    repo_id: Option<String>,
    category: Option<String>,
    category_id: Option<String>,
    mapping: Option<String>,
    strict: Option<String>,
    reactions_enabled: Option<String>,
    emit_metadata: Option<String>,
    input_position: Option<String>,
    theme: Option<String>,
    lang: Option<String>,
}

impl GiscusFile {
    fn resolve(self) -> Option<GiscusConfig> {
        Some(GiscusConfig::with_defaults(
            self.repo?,
            self.repo_id?,
            self.category?,
            self.category_id?,
            GiscusOptional {
                mapping: self.mapping,
                strict: self.strict,
                reactions_enabled: self.reactions_enabled,
                emit_metadata: self.emit_metadata,
                input_position: self.input_position,
                theme: self.theme,
                lang: self.lang,
            },
        ))
    }
}

/// AI assistant proxy settings. The API key only ever comes from the
/// environment, never from the config file.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub enabled: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            enabled: false,
        }
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) = read_non_empty_env("FOLIO_AI_API_URL") {
            self.api_url = url;
        }
        if let Some(key) = read_non_empty_env("FOLIO_AI_API_KEY") {
            self.api_key = key;
        }
        if let Some(model) = read_non_empty_env("FOLIO_AI_MODEL") {
            self.model = model;
        }
        if let Some(flag) = read_non_empty_env("FOLIO_AI_ENABLED") {
            self.enabled = parse_bool_flag(&flag);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AssistantFile {
    api_url: Option<String>,
    model: Option<String>,
    enabled: Option<bool>,
}

impl AssistantFile {
    fn resolve(self) -> AssistantConfig {
        let mut config = AssistantConfig::default();
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        config
    }
}

/// Homepage copy surfaced through `/api/site` for the client to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomepageConfig {
    pub hero: HeroSection,
    pub features: Vec<FeatureItem>,
    pub cta: CallToAction,
    pub footer: FooterSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub primary_button: HomepageLink,
    pub secondary_button: HomepageLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToAction {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterSection {
    pub copyright: String,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            hero: HeroSection::default(),
            features: vec![
                FeatureItem {
                    icon: "book".to_string(),
                    title: "Markdown first".to_string(),
                    description: "Tables, task lists, footnotes, and fenced code out of the box."
                        .to_string(),
                },
                FeatureItem {
                    icon: "sigma".to_string(),
                    title: "Math rendering".to_string(),
                    description: "Inline and display math rendered client-side with KaTeX."
                        .to_string(),
                },
                FeatureItem {
                    icon: "search".to_string(),
                    title: "Full-text search".to_string(),
                    description: "Weighted search across titles, descriptions, tags, and content."
                        .to_string(),
                },
            ],
            cta: CallToAction::default(),
            footer: FooterSection::default(),
        }
    }
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            title: "Documentation that stays close to the source".to_string(),
            subtitle: "A content-driven documentation site".to_string(),
            description: "Write markdown, get a browsable, searchable, taggable site."
                .to_string(),
            primary_button: HomepageLink {
                text: "Start reading".to_string(),
                href: "#/docs".to_string(),
            },
            secondary_button: HomepageLink {
                text: "Browse tags".to_string(),
                href: "#/tags".to_string(),
            },
        }
    }
}

impl Default for HomepageLink {
    fn default() -> Self {
        Self {
            text: "Docs".to_string(),
            href: "#/docs".to_string(),
        }
    }
}

impl Default for FeatureItem {
    fn default() -> Self {
        Self {
            icon: String::new(),
            title: String::new(),
            description: String::new(),
        }
    }
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            title: "Start writing".to_string(),
            description: "Drop markdown files into the docs directory and reload.".to_string(),
            button_text: "Open the docs".to_string(),
            button_href: "#/docs".to_string(),
        }
    }
}

impl Default for FooterSection {
    fn default() -> Self {
        Self {
            copyright: "Built with Folio.".to_string(),
        }
    }
}

fn read_non_empty_env(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_bool_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_toml_is_empty() {
        let config = SiteConfig::from_toml_str("", Path::new("/site")).expect("config");
        assert_eq!(config.title, "Folio");
        assert_eq!(config.docs_dir, Path::new("/site/docs"));
        assert!(config.giscus.is_none());
        assert!(!config.assistant.is_enabled());
    }

    #[test]
    fn parses_site_and_assistant_sections() {
        let raw = r#"
title = "Handbook"
docs_dir = "content"
exclude = ["drafts/**"]

[assistant]
model = "gpt-4o-mini"
enabled = true
"#;
        let config = SiteConfig::from_toml_str(raw, Path::new("/site")).expect("config");
        assert_eq!(config.title, "Handbook");
        assert_eq!(config.docs_dir, Path::new("/site/content"));
        assert_eq!(config.exclude, ["drafts/**"]);
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        // Enabled flag alone is not enough without an API key.
        assert!(!config.assistant.is_enabled());
    }

    #[test]
    fn giscus_requires_all_four_identifiers() {
        let partial = r#"
[giscus]
repo = "owner/repo"
repo_id = "R_x"
"#;
        let config = SiteConfig::from_toml_str(partial, Path::new("/s")).expect("config");
        assert!(config.giscus.is_none());

        let complete = r#"
[giscus]
repo = "owner/repo"
repo_id = "R_x"
category = "General"
category_id = "DIC_x"
"#;
        let config = SiteConfig::from_toml_str(complete, Path::new("/s")).expect("config");
        let giscus = config.giscus.expect("giscus");
        assert_eq!(giscus.repo, "owner/repo");
        assert_eq!(giscus.mapping, "pathname");
        assert_eq!(giscus.input_position, "bottom");
        assert_eq!(giscus.theme, "preferred_color_scheme");
    }

    #[test]
    fn absolute_docs_dir_is_not_rejoined() {
        let raw = "docs_dir = \"/var/docs\"\n";
        let config = SiteConfig::from_toml_str(raw, Path::new("/site")).expect("config");
        assert_eq!(config.docs_dir, Path::new("/var/docs"));
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        assert!(SiteConfig::from_toml_str("nonsense = true\n", Path::new("/s")).is_err());
    }

    #[test]
    fn bool_flag_parsing_accepts_common_spellings() {
        assert!(parse_bool_flag("true"));
        assert!(parse_bool_flag("1"));
        assert!(parse_bool_flag(" YES "));
        assert!(!parse_bool_flag("false"));
        assert!(!parse_bool_flag("0"));
    }
}
