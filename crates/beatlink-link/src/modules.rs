//! Module alias table: which part of the app a deep link opens.
//!
//! Deep links name a module by a short lowercase alias (`construct`,
//! `gallery`, ...). Each alias maps to the module that owns the target
//! tab, the tab itself, and optionally a different module to actually
//! navigate to.

use serde::Serialize;

use crate::LinkError;

/// Where a module alias leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleTarget {
    /// Module that owns the tab.
    pub module: &'static str,
    /// Tab to select inside `module`, if not its default.
    pub tab: Option<&'static str>,
    /// Module to navigate to instead of `module`, if different.
    pub redirect: Option<&'static str>,
}

impl ModuleTarget {
    const fn module(module: &'static str) -> Self {
        Self { module, tab: None, redirect: None }
    }

    const fn tab(module: &'static str, tab: &'static str) -> Self {
        Self { module, tab: Some(tab), redirect: None }
    }

    /// The module navigation should actually land on.
    pub fn destination(&self) -> &'static str {
        self.redirect.unwrap_or(self.module)
    }
}

const MODULE_ALIASES: &[(&str, ModuleTarget)] = &[
    ("create", ModuleTarget::module("create")),
    ("construct", ModuleTarget::tab("create", "constructor")),
    ("constructor", ModuleTarget::tab("create", "constructor")),
    ("generate", ModuleTarget::tab("create", "generator")),
    ("generator", ModuleTarget::tab("create", "generator")),
    ("assemble", ModuleTarget::tab("create", "assembler")),
    ("discover", ModuleTarget::module("discover")),
    ("browse", ModuleTarget::tab("discover", "gallery")),
    ("gallery", ModuleTarget::tab("discover", "gallery")),
    ("learn", ModuleTarget::module("learn")),
    ("codex", ModuleTarget::tab("learn", "codex")),
    ("quiz", ModuleTarget::tab("learn", "quiz")),
    ("compose", ModuleTarget::module("compose")),
    ("animate", ModuleTarget::tab("compose", "arrange")),
    ("train", ModuleTarget::module("train")),
    ("library", ModuleTarget::module("library")),
    // Saved sequences are shown in the library module, but the
    // favourites tab state belongs to discover.
    (
        "favorites",
        ModuleTarget {
            module: "discover",
            tab: Some("favorites"),
            redirect: Some("library"),
        },
    ),
];

/// Looks up a module alias. Matching is case-insensitive.
///
/// # Errors
/// [`LinkError::UnknownModuleMapping`] if the alias isn't in the table.
pub fn resolve_module(alias: &str) -> Result<ModuleTarget, LinkError> {
    let alias = alias.trim().to_ascii_lowercase();
    MODULE_ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, target)| *target)
        .ok_or(LinkError::UnknownModuleMapping(alias))
}

/// Every known alias, in table order.
pub fn module_aliases() -> impl Iterator<Item = &'static str> {
    MODULE_ALIASES.iter().map(|(name, _)| *name)
}
