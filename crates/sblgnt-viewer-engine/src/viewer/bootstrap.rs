use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{ConfigPatch, Viewer, ViewerHost};

pub const DEFAULT_GLOBAL_PROPERTY_NAME: &str = "SBLGNTViewer";

/// Options accepted by [`bootstrap`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub config: ConfigPatch,
    pub global_property_name: Option<String>,
    pub auto_init: Option<bool>,
}

impl BootstrapOptions {
    pub fn from_value(value: &Value) -> Self {
        Self {
            config: ConfigPatch::from_value(value),
            global_property_name: crate::models::string_field(
                value,
                &["globalPropertyName", "global_property_name"],
            ),
            auto_init: value
                .get("autoInit")
                .or_else(|| value.get("auto_init"))
                .and_then(Value::as_bool),
        }
    }

    /// Fields set in `other` win
    pub fn merged_with(self, other: BootstrapOptions) -> Self {
        Self {
            config: self.config.merged_with(other.config),
            global_property_name: other.global_property_name.or(self.global_property_name),
            auto_init: other.auto_init.or(self.auto_init),
        }
    }
}

/// Process-wide registry viewers are published into.
///
/// `viewer_config` holds configuration the embedding page set up before
/// bootstrap ran.
#[derive(Default)]
pub struct GlobalScope {
    pub viewer_config: Option<Value>,
    viewers: HashMap<String, Viewer>,
}

impl GlobalScope {
    pub fn with_viewer_config(viewer_config: Value) -> Self {
        Self {
            viewer_config: Some(viewer_config),
            viewers: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Viewer> {
        self.viewers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Viewer> {
        self.viewers.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.viewers.contains_key(name)
    }
}

/// Build a viewer, configure it, optionally start it, and publish it in `scope`.
///
/// Scope configuration is applied first and explicit `options` override it.
/// A viewer already published under the same name is replaced.
pub fn bootstrap<'a>(
    scope: &'a mut GlobalScope,
    host: ViewerHost,
    options: BootstrapOptions,
) -> &'a mut Viewer {
    let options = scope
        .viewer_config
        .as_ref()
        .map(BootstrapOptions::from_value)
        .unwrap_or_default()
        .merged_with(options);

    let mut viewer = Viewer::new(host);
    viewer.configure(&options.config);
    if options.auto_init.unwrap_or(true) {
        viewer.init();
    }

    let name = options
        .global_property_name
        .unwrap_or_else(|| DEFAULT_GLOBAL_PROPERTY_NAME.to_string());
    log::info!("Publishing viewer as {name}");

    match scope.viewers.entry(name) {
        Entry::Occupied(mut slot) => {
            slot.insert(viewer);
            slot.into_mut()
        }
        Entry::Vacant(slot) => slot.insert(viewer),
    }
}
