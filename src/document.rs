use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{IniError, Result};

/// Parameters of one section, keyed by parameter name, in insertion order.
pub type Section = IndexMap<String, String>;

/// An INI document: sections keyed by their case-sensitive name, in insertion order.
///
/// Every parameter lives inside a section, so a parameter can only be written once its
/// section exists. The map is not synchronized; share it across threads behind a lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)] // Allows Document to be treated as IndexMap for serde
pub struct Document(IndexMap<String, Section>);

impl Document {
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    /// Section names in insertion order.
    pub fn sections(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Parameter names of `section` in insertion order.
    pub fn parameters(&self, section: &str) -> Result<Vec<&str>> {
        let params = self.section_or_err(section)?;
        Ok(params.keys().map(String::as_str).collect())
    }

    /// Looks up a value. A missing section is reported before a missing parameter.
    pub fn get(&self, section: &str, parameter: &str) -> Result<&str> {
        self.section_or_err(section)?
            .get(parameter)
            .map(String::as_str)
            .ok_or_else(|| IniError::ParameterNotFound {
                section: section.to_string(),
                parameter: parameter.to_string(),
            })
    }

    /// Inserts an empty section, or empties it if it already exists.
    ///
    /// This overwrites rather than merges: any parameters previously held by `name` are
    /// dropped. The section keeps its original position.
    ///
    /// Names are not validated. An empty name is accepted here but saves as `[]`, which
    /// does not load back.
    pub fn insert_section(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        match self.0.get_mut(&name) {
            Some(params) => {
                if !params.is_empty() {
                    warn!("Resetting section [{name}], dropping {} parameter(s)", params.len());
                }
                params.clear();
            }
            None => {
                self.0.insert(name, Section::new());
            }
        }
        self
    }

    /// Sets `parameter` in an existing section, overwriting any previous value.
    ///
    /// The document is left untouched when `section` is missing.
    pub fn set(
        &mut self,
        section: &str,
        parameter: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let Some(params) = self.0.get_mut(section) else {
            return Err(IniError::WriteWithoutSection {
                section: section.to_string(),
                parameter: parameter.into(),
            });
        };
        params.insert(parameter.into(), value.into());
        Ok(self)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.0.get(name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Section> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.0.get_mut(name)
    }

    fn section_or_err(&self, name: &str) -> Result<&Section> {
        self.0
            .get(name)
            .ok_or_else(|| IniError::SectionNotFound(name.to_string()))
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
