//! Project configuration data, as consumed from the resource-format
//! reader.
//!
//! The core does not parse `project.godot`; the host's resource reader
//! flattens it into this shape. Paths stay in resource form
//! (`res://...`) here and are resolved against the project root by the
//! indexer.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// One `_global_script_classes` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalClass {
    /// The declared global class name.
    pub class: SmolStr,
    /// Resource path of the declaring script.
    pub path: String,
    /// Source language; only `"GDScript"` entries are indexed.
    pub language: SmolStr,
}

/// The project-configuration facts the indexer consumes.
#[derive(Clone, Debug, Default)]
pub struct ProjectConfig {
    pub global_classes: Vec<GlobalClass>,
    /// Autoload name → resource path. A leading `*` marks an enabled
    /// autoload; `.tscn` targets are scene autoloads and carry no script.
    pub autoloads: IndexMap<SmolStr, String>,
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_class(
        mut self,
        class: impl Into<SmolStr>,
        path: impl Into<String>,
        language: impl Into<SmolStr>,
    ) -> Self {
        self.global_classes.push(GlobalClass {
            class: class.into(),
            path: path.into(),
            language: language.into(),
        });
        self
    }

    pub fn with_autoload(mut self, name: impl Into<SmolStr>, path: impl Into<String>) -> Self {
        self.autoloads.insert(name.into(), path.into());
        self
    }
}
