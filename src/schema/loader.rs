//! Schema loading functionality.
//!
//! This module provides the [`SchemaRegistry`] type for loading document
//! schemas from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ControllerError, ControllerResult};

use super::DocSchema;

/// Loads and provides access to the settlement document schemas.
///
/// The registry holds the parent doctype schema plus the schemas of every
/// child-table doctype the parent declares.
///
/// # Directory Structure
///
/// The schema directory should have the following structure:
/// ```text
/// config/full_and_final/
/// ├── doctype.yaml             # Parent doctype fields
/// └── children/
///     └── outstanding_statement.yaml  # Child table row fields
/// ```
///
/// # Example
///
/// ```no_run
/// use fnf_settlement::schema::SchemaRegistry;
///
/// let registry = SchemaRegistry::load("./config/full_and_final").unwrap();
///
/// let tables: Vec<(&str, &str)> = registry.parent().table_fields().collect();
/// println!("Child tables: {:?}", tables);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    parent: DocSchema,
    children: HashMap<String, DocSchema>,
}

impl SchemaRegistry {
    /// Loads schemas from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the schema directory (e.g., "./config/full_and_final")
    ///
    /// # Returns
    ///
    /// Returns a `SchemaRegistry` on success, or an error if the parent
    /// schema file is missing or any file contains invalid YAML. A missing
    /// `children/` directory is allowed for doctypes without child tables.
    pub fn load<P: AsRef<Path>>(path: P) -> ControllerResult<Self> {
        let path = path.as_ref();

        let parent_path = path.join("doctype.yaml");
        let parent = Self::load_yaml::<DocSchema>(&parent_path)?;

        let children_dir = path.join("children");
        let children = if children_dir.exists() {
            Self::load_children(&children_dir)?
        } else {
            HashMap::new()
        };

        Ok(Self { parent, children })
    }

    /// Builds a registry from already-constructed schemas.
    ///
    /// Child schemas are keyed by their doctype name.
    pub fn from_parts(parent: DocSchema, children: Vec<DocSchema>) -> Self {
        let children = children
            .into_iter()
            .map(|schema| (schema.name.clone(), schema))
            .collect();
        Self { parent, children }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ControllerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ControllerError::SchemaNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ControllerError::SchemaParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every child doctype schema from the children directory.
    fn load_children(children_dir: &Path) -> ControllerResult<HashMap<String, DocSchema>> {
        let dir_str = children_dir.display().to_string();

        let entries = fs::read_dir(children_dir).map_err(|_| ControllerError::SchemaNotFound {
            path: dir_str.clone(),
        })?;

        let mut children = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| ControllerError::SchemaNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let schema = Self::load_yaml::<DocSchema>(&path)?;
                children.insert(schema.name.clone(), schema);
            }
        }

        Ok(children)
    }

    /// Returns the parent doctype schema.
    pub fn parent(&self) -> &DocSchema {
        &self.parent
    }

    /// Gets a child doctype schema by doctype name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fnf_settlement::schema::SchemaRegistry;
    ///
    /// let registry = SchemaRegistry::load("./config/full_and_final")?;
    /// let rows = registry.child("Full and Final Outstanding Statement")?;
    /// println!("Row doctype has {} fields", rows.fields.len());
    /// # Ok::<(), fnf_settlement::error::ControllerError>(())
    /// ```
    pub fn child(&self, doctype: &str) -> ControllerResult<&DocSchema> {
        self.children
            .get(doctype)
            .ok_or_else(|| ControllerError::ChildSchemaNotFound {
                doctype: doctype.to_string(),
            })
    }

    /// Resolves the row schema behind a table field of the parent doctype.
    pub fn child_for_table(&self, fieldname: &str) -> ControllerResult<&DocSchema> {
        let doctype = self
            .parent
            .table_fields()
            .find(|(name, _)| *name == fieldname)
            .map(|(_, doctype)| doctype)
            .ok_or_else(|| ControllerError::ChildSchemaNotFound {
                doctype: fieldname.to_string(),
            })?;
        self.child(doctype)
    }
}
