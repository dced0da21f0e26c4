use serde::{Deserialize, Serialize};

use crate::keyed::{self, Keyed};
use crate::schema::UNKNOWN_KIND;

/// A Mathlib declaration entry from the declaration-data snapshot.
///
/// The name is the key of the `declarations` object; `kind` and `docLink` are
/// optional on the wire and fall back to [`UNKNOWN_KIND`] and an empty link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    #[serde(skip)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_link: Option<String>,
}

impl DeclarationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_doc_link(mut self, doc_link: impl Into<String>) -> Self {
        self.doc_link = Some(doc_link.into());
        self
    }

    /// Declaration kind, or `"unknown"` when the snapshot omits it.
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN_KIND)
    }

    /// Relative documentation link, or `""` when the snapshot omits it.
    pub fn doc_link(&self) -> &str {
        self.doc_link.as_deref().unwrap_or_default()
    }
}

impl Keyed for DeclarationRecord {
    fn key(&self) -> &str {
        &self.name
    }

    fn set_key(&mut self, key: String) {
        self.name = key;
    }
}

/// Instances registered for a single type class.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct InstanceClass {
    pub class: String,
    pub instances: Vec<String>,
}

impl From<Vec<String>> for InstanceClass {
    fn from(instances: Vec<String>) -> Self {
        Self {
            class: String::new(),
            instances,
        }
    }
}

impl From<InstanceClass> for Vec<String> {
    fn from(class: InstanceClass) -> Self {
        class.instances
    }
}

impl Keyed for InstanceClass {
    fn key(&self) -> &str {
        &self.class
    }

    fn set_key(&mut self, key: String) {
        self.class = key;
    }
}

/// A documentation module and the modules that import it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imported_by: Vec<String>,
}

impl Keyed for ModuleRecord {
    fn key(&self) -> &str {
        &self.name
    }

    fn set_key(&mut self, key: String) {
        self.name = key;
    }
}

/// In-memory view of one declaration-data snapshot.
///
/// Collections keep the order of the source document; keys are unique by
/// construction of the upstream format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    #[serde(with = "keyed")]
    pub declarations: Vec<DeclarationRecord>,
    #[serde(default, with = "keyed", skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<InstanceClass>,
    #[serde(default, with = "keyed", skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleRecord>,
}

impl Dataset {
    pub const fn new(declarations: Vec<DeclarationRecord>) -> Self {
        Self {
            declarations,
            instances: Vec::new(),
            modules: Vec::new(),
        }
    }

    pub fn declaration(&self, name: &str) -> Option<&DeclarationRecord> {
        self.declarations.iter().find(|record| record.name == name)
    }
}

/// A single search hit, tagged by the kind of record it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    #[serde(rename_all = "camelCase")]
    Declaration {
        name: String,
        kind: String,
        doc_link: String,
    },
    Instance {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    Module {
        name: String,
        url: String,
        imported_by: Vec<String>,
    },
}

impl SearchResult {
    pub fn declaration(record: &DeclarationRecord) -> Self {
        Self::Declaration {
            name: record.name.clone(),
            kind: record.kind().to_string(),
            doc_link: record.doc_link().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Declaration { name, .. } | Self::Instance { name } | Self::Module { name, .. } => {
                name
            }
        }
    }
}
