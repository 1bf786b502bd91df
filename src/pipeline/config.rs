//! Pipeline configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use crate::models::AllowsNulls;

/// Label for a category in the generated document
pub const DEFAULT_CATEGORY_DESCRIPTOR: &str = "Schema";
/// Label for an item in the generated document
pub const DEFAULT_ITEM_DESCRIPTOR: &str = "Table";
pub const DEFAULT_TEMPLATE_DIR: &str = "./_templates";
pub const DEFAULT_TEMPLATE_NAME: &str = "data_dictionary.hbs";
/// File stem of the rendered document in render-only mode
pub const DEFAULT_RENDER_OUTPUT_NAME: &str = "temp";

/// Dictionary generation settings
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// template_dir = "docs/_templates"
/// output_dir = "docs/source"
/// column_description = "TODO: describe"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// What a category is called in the document
    pub category_descriptor: String,
    /// What an item is called in the document
    pub item_descriptor: String,
    /// Directory templates are resolved from
    pub template_dir: PathBuf,
    /// Template used for the render stage
    pub template_name: String,
    /// Directory artifacts are written to
    pub output_dir: PathBuf,
    /// Output file stem when rendering an existing document
    pub render_output_name: String,
    /// Placeholder description for a generated category
    pub category_description: String,
    /// Placeholder description for a generated item
    pub item_description: String,
    /// Placeholder description for introspected columns
    pub column_description: String,
    /// Nullability written for introspected columns
    pub introspected_allows_nulls: AllowsNulls,
    /// Run the render stage after generating a document
    pub render: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            category_descriptor: DEFAULT_CATEGORY_DESCRIPTOR.to_string(),
            item_descriptor: DEFAULT_ITEM_DESCRIPTOR.to_string(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            output_dir: PathBuf::from("."),
            render_output_name: DEFAULT_RENDER_OUTPUT_NAME.to_string(),
            category_description: "This is a test dataset.".to_string(),
            item_description: "This is a test table.".to_string(),
            column_description: "Update this with an actual description.".to_string(),
            introspected_allows_nulls: AllowsNulls::False,
            render: true,
        }
    }
}

impl DictionaryConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::io_with_path(path, "failed to read config", e))?;
        Self::from_toml_str(&content).map_err(|e| {
            PipelineError::ConfigError(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_category_descriptor(mut self, label: impl Into<String>) -> Self {
        self.category_descriptor = label.into();
        self
    }

    pub fn with_item_descriptor(mut self, label: impl Into<String>) -> Self {
        self.item_descriptor = label.into();
        self
    }

    /// Set the template directory
    pub fn with_template_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_dir = path.into();
        self
    }

    /// Set the template name
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_render_output_name(mut self, name: impl Into<String>) -> Self {
        self.render_output_name = name.into();
        self
    }

    pub fn with_column_description(mut self, description: impl Into<String>) -> Self {
        self.column_description = description.into();
        self
    }

    pub fn with_introspected_allows_nulls(mut self, allows_nulls: AllowsNulls) -> Self {
        self.introspected_allows_nulls = allows_nulls;
        self
    }

    /// Enable or disable the render stage
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.category_descriptor.trim().is_empty() {
            return Err("category_descriptor must not be empty".to_string());
        }
        if self.item_descriptor.trim().is_empty() {
            return Err("item_descriptor must not be empty".to_string());
        }
        if self.template_name.trim().is_empty() {
            return Err("template_name must not be empty".to_string());
        }
        if self.render_output_name.trim().is_empty() {
            return Err("render_output_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Where a run starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineInput {
    /// Introspect a geospatial source, write a document, optionally render it
    Source(PathBuf),
    /// Render an existing document
    Document(PathBuf),
}

impl PipelineInput {
    /// Pick the input from the two mutually exclusive options.
    ///
    /// Fails without touching the filesystem when neither or both are given.
    pub fn from_options(
        file: Option<PathBuf>,
        document: Option<PathBuf>,
    ) -> PipelineResult<Self> {
        match (file, document) {
            (Some(file), None) => Ok(Self::Source(file)),
            (None, Some(document)) => Ok(Self::Document(document)),
            (Some(_), Some(_)) => Err(PipelineError::ConfigError(
                "--file and --rst_only cannot be used together".to_string(),
            )),
            (None, None) => Err(PipelineError::MissingInput(
                "Missing -f or --file option with string pointing to a valid file \
                 (or --rst_only with an existing dictionary document)"
                    .to_string(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Source(path) | Self::Document(path) => path,
        }
    }
}

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Read a source schema and build the dataset
    Introspect,
    /// Load an existing document
    Load,
    /// Write the document as YAML
    Serialize,
    /// Render the document through the template
    Render,
}

impl PipelineStage {
    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Introspect => "introspect",
            Self::Load => "load",
            Self::Serialize => "serialize",
            Self::Render => "render",
        }
    }

    /// Get stage description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Introspect => "Read source schema",
            Self::Load => "Load dictionary document",
            Self::Serialize => "Write dictionary document",
            Self::Render => "Render dictionary through template",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DictionaryConfig::default();
        assert_eq!(config.category_descriptor, "Schema");
        assert_eq!(config.item_descriptor, "Table");
        assert_eq!(config.template_dir, PathBuf::from("./_templates"));
        assert_eq!(config.render_output_name, "temp");
        assert_eq!(config.introspected_allows_nulls, AllowsNulls::False);
        assert!(config.render);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DictionaryConfig::new()
            .with_template_dir("tpl")
            .with_template_name("x.hbs")
            .with_output_dir("/out")
            .with_render(false);
        assert_eq!(config.template_dir, PathBuf::from("tpl"));
        assert_eq!(config.template_name, "x.hbs");
        assert_eq!(config.output_dir, PathBuf::from("/out"));
        assert!(!config.render);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DictionaryConfig::from_toml_str(
            r#"
template_name = "custom.hbs"
introspected_allows_nulls = "Y"
"#,
        )
        .unwrap();
        assert_eq!(config.template_name, "custom.hbs");
        assert_eq!(config.introspected_allows_nulls, AllowsNulls::Yes);
        assert_eq!(config.item_descriptor, "Table");
    }

    #[test]
    fn test_config_validation() {
        let config = DictionaryConfig::default().with_template_name(" ");
        assert!(config.validate().is_err());

        let config = DictionaryConfig::default().with_item_descriptor("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_input_requires_exactly_one_option() {
        assert!(matches!(
            PipelineInput::from_options(None, None),
            Err(PipelineError::MissingInput(_))
        ));
        assert!(matches!(
            PipelineInput::from_options(Some("a.shp".into()), Some("a.yml".into())),
            Err(PipelineError::ConfigError(_))
        ));
        assert_eq!(
            PipelineInput::from_options(None, Some("a.yml".into())).unwrap(),
            PipelineInput::Document(PathBuf::from("a.yml"))
        );
    }

    #[test]
    fn test_input_path() {
        let source = PipelineInput::from_options(Some("data/roads.shp".into()), None).unwrap();
        assert_eq!(source.path(), Path::new("data/roads.shp"));
        assert_eq!(PipelineInput::Document("a.yml".into()).path(), Path::new("a.yml"));
    }
}
