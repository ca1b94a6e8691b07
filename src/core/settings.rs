//! Kind-specific control settings
//!
//! Every control kind has its own settings record. The `Default` impl of a
//! record carries the kind defaults, so callers override only the fields they
//! care about with struct update syntax:
//!
//! ```
//! use acf_blocks::core::settings::{NumberSettings, TextSettings};
//!
//! let text = TextSettings { maxlength: Some(80), ..Default::default() };
//! let number = NumberSettings { min: Some(0.0), step: Some(5.0), ..Default::default() };
//! assert_eq!(text.maxlength, Some(80));
//! assert_eq!(number.max, None);
//! ```
//!
//! Unset optional fields are left out of the rendered record so the host
//! falls back to its own defaults.

use serde::{Serialize, Serializer};

/// Serializes optional flags as the `0`/`1` integers the host expects.
pub(crate) mod flag {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(set) => serializer.serialize_u8(u8::from(*set)),
            None => serializer.serialize_none(),
        }
    }
}

/// Format of the value the host returns for media controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    /// Full attachment array
    Array,
    /// Attachment URL
    #[default]
    Url,
    /// Attachment ID
    Id,
}

/// Format of the value the host returns for choice controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceReturnFormat {
    Value,
    Label,
    Array,
}

/// Which part of the media library a picker may browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Library {
    /// Every attachment
    #[default]
    All,
    /// Only attachments uploaded to the current post
    UploadedTo,
}

/// How a textarea renders new lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NewLines {
    /// Automatically add paragraphs
    #[serde(rename = "wpautop")]
    Paragraphs,
    /// Automatically add `<br>`
    #[serde(rename = "br")]
    LineBreaks,
    /// No formatting
    #[serde(rename = "")]
    None,
}

/// Tabs available in the rich text editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTabs {
    All,
    Visual,
    Text,
}

/// Layout of choice inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Vertical,
    Horizontal,
}

/// An upload size limit, either in megabytes or with explicit units (`"256KB"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileSize {
    Megabytes(u32),
    Text(String),
}

impl Default for FileSize {
    fn default() -> Self {
        FileSize::Megabytes(0)
    }
}

impl From<u32> for FileSize {
    fn from(megabytes: u32) -> Self {
        FileSize::Megabytes(megabytes)
    }
}

impl From<&str> for FileSize {
    fn from(text: &str) -> Self {
        FileSize::Text(text.to_string())
    }
}

/// Ordered value -> label mapping offered by select, checkbox and radio controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices(Vec<(String, String)>);

impl Choices {
    /// Create an empty set of choices
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a choice, replacing the label of an existing value in place
    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
        let value = value.into();
        let label = label.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == value) {
            Some(entry) => entry.1 = label,
            None => self.0.push((value, label)),
        }
    }

    /// Label of the given value
    pub fn get(&self, value: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == value)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(value, label)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(value, label)| (value.as_str(), label.as_str()))
    }
}

impl<V: Into<String>, L: Into<String>> FromIterator<(V, L)> for Choices {
    fn from_iter<I: IntoIterator<Item = (V, L)>>(iter: I) -> Self {
        let mut choices = Choices::new();
        for (value, label) in iter {
            choices.insert(value, label);
        }
        choices
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Choices {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Choices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(value, label)| (value, label)))
    }
}

/// Settings for single line text controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextSettings {
    /// Character limit, unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub readonly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub disabled: Option<bool>,
}

/// Settings for multi line text controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextAreaSettings {
    /// Character limit, unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<u32>,
    /// Visible rows, unrestricted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// New line handling, the host uses paragraphs when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_lines: Option<NewLines>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub readonly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub disabled: Option<bool>,
}

/// Settings for number controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumberSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Step size between allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Settings for rich text (WYSIWYG) controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RichTextSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabs: Option<EditorTabs>,
    /// `"full"`, `"basic"` or the name of a custom toolbar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<String>,
    /// Whether the media upload button is shown
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub media_upload: Option<bool>,
}

/// Settings for oEmbed controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Settings for single image pickers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageSettings {
    /// Defaults to [`ReturnFormat::Url`]
    pub return_format: ReturnFormat,
    /// Image size shown while editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<Library>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<FileSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<FileSize>,
    /// Comma separated list of allowed extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_types: Option<String>,
}

/// Settings for file upload controls
///
/// Unlike the other media kinds every field is always written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSettings {
    pub return_format: ReturnFormat,
    pub preview_size: String,
    pub library: Library,
    pub min_size: FileSize,
    /// `0` means unlimited
    pub max_size: FileSize,
    /// Comma separated list of allowed extensions, empty for any
    pub mime_types: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            return_format: ReturnFormat::Url,
            preview_size: "thumbnail".to_string(),
            library: Library::All,
            min_size: FileSize::Megabytes(0),
            max_size: FileSize::Megabytes(0),
            mime_types: String::new(),
        }
    }
}

/// Settings for gallery pickers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GallerySettings {
    /// Minimum number of attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// Maximum number of attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<Library>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<FileSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<FileSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_types: Option<String>,
}

/// Settings for select dropdowns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectSettings {
    /// Allow a blank value
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub allow_null: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub multiple: Option<bool>,
    /// Use the enhanced (select2) interface
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub ui: Option<bool>,
    /// Load choices lazily, needs `ui`
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub ajax: Option<bool>,
}

/// Settings for checkbox lists
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckboxSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// Let editors add their own options
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub allow_custom: Option<bool>,
    /// Save custom options into the choices
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub save_custom: Option<bool>,
    /// Prepend a "Toggle all" checkbox
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub toggle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_format: Option<ChoiceReturnFormat>,
}

/// Settings for true/false controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanSettings {
    /// Text shown next to the toggle
    pub message: String,
}

/// Settings for radio button groups
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadioSettings {
    /// Offer an "other" text input
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub other_choice: Option<bool>,
    /// Save "other" values into the choices. Only works for database fields.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag::serialize")]
    pub save_other_choice: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}
