use exam_core::model::{ConfigError, ExamConfig, TechnologyLevel};

/// The selector's technology→level mapping.
///
/// Holds at most one level per technology and preserves insertion order, so
/// the staged sequence lists technologies in the order the user picked them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TechSelection {
    entries: Vec<(String, u8)>,
}

impl TechSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles a technology/level pair: picking the already-active level
    /// deselects the technology, picking another level replaces it.
    pub fn toggle(&mut self, technology: &str, level: u8) {
        if let Some(position) = self
            .entries
            .iter()
            .position(|(name, _)| name == technology)
        {
            if self.entries[position].1 == level {
                self.entries.remove(position);
            } else {
                self.entries[position].1 = level;
            }
        } else {
            self.entries.push((technology.to_string(), level));
        }
    }

    #[must_use]
    pub fn selected_level(&self, technology: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(name, _)| name == technology)
            .map(|(_, level)| *level)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order, for the selected-technologies chips.
    #[must_use]
    pub fn entries(&self) -> &[(String, u8)] {
        &self.entries
    }

    /// Builds the staged configuration from the selection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an empty selection or invalid count; the
    /// selector's bounded controls keep both unreachable in practice.
    pub fn to_config(&self, question_count: u32) -> Result<ExamConfig, ConfigError> {
        let technologies = self
            .entries
            .iter()
            .map(|(technology, level)| TechnologyLevel::new(technology.clone(), *level))
            .collect::<Result<Vec<_>, _>>()?;
        ExamConfig::new(technologies, question_count)
    }
}
