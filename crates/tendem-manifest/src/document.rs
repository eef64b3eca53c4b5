//! The manifest document
//!
//! The document is held as an order-preserving JSON object rather than a
//! typed struct: the packer's schema grows independently of this tool, and
//! fields we do not model must survive a rewrite byte for byte.

use serde_json::{Map, Value};
use tendem_fs::{NormalizedPath, io};

use crate::error::{Error, Result};
use crate::tool::ToolEntry;
use crate::{TOOLS_KEY, VERSION_KEY};

/// Top-level fields that must be strings.
const STRING_FIELDS: &[&str] = &["name", VERSION_KEY, "description"];

/// Top-level fields that must be objects.
const OBJECT_FIELDS: &[&str] = &["user_config", "compatibility"];

/// A loaded `manifest.json`
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: NormalizedPath,
    root: Map<String, Value>,
    original: String,
}

impl ManifestDocument {
    /// Read and validate the manifest at `path`.
    ///
    /// A missing file is an error; the manifest is never created here.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::parse(path.clone(), &content)
    }

    /// Validate manifest `content` that was read from `path`.
    pub fn parse(path: NormalizedPath, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Parse {
            path: path.to_native(),
            source,
        })?;

        let Value::Object(root) = value else {
            return Err(Error::NotAnObject {
                path: path.to_native(),
            });
        };

        let doc = Self {
            path,
            root,
            original: content.to_string(),
        };
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        for field in STRING_FIELDS {
            if !self.root.get(*field).is_some_and(Value::is_string) {
                return Err(self.invalid_field(field, "a string"));
            }
        }
        for field in OBJECT_FIELDS {
            if !self.root.get(*field).is_some_and(Value::is_object) {
                return Err(self.invalid_field(field, "an object"));
            }
        }
        if let Some(tools) = self.root.get(TOOLS_KEY)
            && !tools.is_array()
        {
            return Err(self.invalid_field(TOOLS_KEY, "an array"));
        }
        // Surface malformed tool entries at load time
        self.tools()?;
        Ok(())
    }

    fn invalid_field(&self, field: &str, expected: &'static str) -> Error {
        Error::InvalidField {
            path: self.path.to_native(),
            field: field.to_string(),
            expected,
        }
    }

    /// Extension name, e.g. `tendem-mcp`.
    pub fn name(&self) -> &str {
        self.str_field("name")
    }

    pub fn version(&self) -> &str {
        self.str_field(VERSION_KEY)
    }

    fn str_field(&self, key: &str) -> &str {
        self.root.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// The tools currently declared. An absent `tools` key reads as empty.
    pub fn tools(&self) -> Result<Vec<ToolEntry>> {
        let Some(Value::Array(entries)) = self.root.get(TOOLS_KEY) else {
            return Ok(Vec::new());
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let invalid = |reason: &str| Error::InvalidToolEntry {
                    path: self.path.to_native(),
                    index,
                    reason: reason.to_string(),
                };
                let obj = entry.as_object().ok_or_else(|| invalid("must be an object"))?;
                let name = obj
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("must have a string 'name'"))?;
                let description = match obj.get("description") {
                    None | Some(Value::Null) => "",
                    Some(Value::String(s)) => s.as_str(),
                    Some(_) => return Err(invalid("has a non-string 'description'")),
                };
                Ok(ToolEntry::new(name, description))
            })
            .collect()
    }

    /// Replace the `tools` array. The key keeps its position; if it was
    /// absent it is appended after the existing fields.
    pub fn set_tools(&mut self, tools: &[ToolEntry]) {
        let entries = tools
            .iter()
            .map(|t| {
                let mut entry = Map::new();
                entry.insert("name".into(), Value::String(t.name.clone()));
                entry.insert("description".into(), Value::String(t.description.clone()));
                Value::Object(entry)
            })
            .collect();
        self.root.insert(TOOLS_KEY.into(), Value::Array(entries));
    }

    /// Stamp the extension version.
    pub fn set_version(&mut self, version: &semver::Version) {
        self.root
            .insert(VERSION_KEY.into(), Value::String(version.to_string()));
    }

    /// Render the document as it will be written: two-space indented JSON,
    /// non-ASCII characters verbatim, one trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.root).map_err(Error::Render)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// The file content as it was loaded.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether rendering would change the file on disk.
    pub fn is_modified(&self) -> Result<bool> {
        Ok(self.render()? != self.original)
    }

    /// Write the rendered document back to its path atomically and return
    /// the written content.
    pub fn save(&mut self) -> Result<String> {
        let rendered = self.render()?;
        io::write_text(&self.path, &rendered)?;
        tracing::info!(path = %self.path, "Manifest written");
        self.original = rendered.clone();
        Ok(rendered)
    }
}
