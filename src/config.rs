//! # Configuration Schema and Parsing
//!
//! This module defines the data structures describing what the generator
//! works on: which repositories to sync, which C# files to scan for enums
//! and classes, the Lua symbol each one is emitted as, and the fixed lookup
//! tables used during emission (type defaults, reserved-word substitutions).
//!
//! The built-in configuration (`Config::default()`) mirrors the Quaver
//! plugin API and its ImGui.NET bindings. An optional `stubgen.yaml` file
//! may override any subset of fields; everything it omits keeps the built-in
//! value.
//!
//! All of this data is immutable once loaded and is passed explicitly to the
//! extraction and emission code; nothing here is a process-wide global.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const IMGUI_NET_GENERATED: &str = "ImGui.NET/src/ImGui.NET/Generated";
const QUAVER_SHARED: &str = "Quaver/Quaver.Shared";
const QUAVER_ENUM_DIR: &str = "Quaver/Quaver.API/Quaver.API/Enums";
const MONOGAME_KEYS: &str = "Quaver/Wobble/MonoGame/MonoGame.Framework/Input/Keys.cs";

/// A source repository to keep present and up to date before generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Local checkout directory, relative to the working directory.
    pub dir: String,
    /// Remote URL passed to `git clone`.
    pub url: String,
}

/// Configuration pair naming an emitted Lua symbol and the C# source file
/// it is extracted from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    /// The Lua-side name the extracted declaration is emitted as.
    pub name: String,
    /// Path to the C# source file, relative to the working directory.
    pub path: PathBuf,
}

impl Descriptor {
    fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
        }
    }
}

/// Full generator configuration.
///
/// `#[serde(default)]` means a user-provided YAML file only needs to name
/// the fields it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path the generated Lua document is written to (truncating).
    pub output: PathBuf,
    /// Repositories synced before each generation run.
    pub repositories: Vec<Repository>,
    /// Enum descriptors, emitted in order.
    pub enums: Vec<Descriptor>,
    /// Class descriptors, emitted in order after the enums.
    ///
    /// Names may repeat: the Quaver plugin API exposes two `state` classes
    /// (standalone plugins and editor plugins) and both blocks are emitted.
    pub classes: Vec<Descriptor>,
    /// The one enum whose XML-doc comments get collapsed onto the value
    /// line. This fixup is specific to MonoGame's `Keys.cs` documentation
    /// style and is not applied to any other descriptor.
    pub key_enum: Descriptor,
    /// C# type name (lowercased) to Lua default-value literal.
    pub type_defaults: HashMap<String, String>,
    /// Parameter names that collide with Lua reserved words, and what to
    /// rename them to in emitted stubs.
    pub keyword_replacements: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("intellisense.lua"),
            repositories: vec![
                Repository {
                    dir: "Quaver".to_string(),
                    url: "https://github.com/Quaver/Quaver".to_string(),
                },
                Repository {
                    dir: "ImGui.NET".to_string(),
                    url: "https://github.com/mellinoe/ImGui.NET".to_string(),
                },
            ],
            enums: builtin_enums(),
            classes: builtin_classes(),
            key_enum: Descriptor::new("keys", MONOGAME_KEYS),
            type_defaults: builtin_type_defaults(),
            keyword_replacements: builtin_keyword_replacements(),
        }
    }
}

fn imgui_enum(name: &str, file: &str) -> Descriptor {
    Descriptor::new(name, format!("{}/{}", IMGUI_NET_GENERATED, file))
}

fn builtin_enums() -> Vec<Descriptor> {
    vec![
        // imgui
        imgui_enum("imgui_input_text_flags", "ImGuiInputTextFlags.gen.cs"),
        imgui_enum("imgui_data_type", "ImGuiDataType.gen.cs"),
        imgui_enum("imgui_tree_node_flags", "ImGuiTreeNodeFlags.gen.cs"),
        imgui_enum("imgui_selectable_flags", "ImGuiSelectableFlags.gen.cs"),
        imgui_enum("imgui_mouse_cursor", "ImGuiMouseCursor.gen.cs"),
        imgui_enum("imgui_cond", "ImGuiCond.gen.cs"),
        imgui_enum("imgui_window_flags", "ImGuiWindowFlags.gen.cs"),
        imgui_enum("imgui_dir", "ImGuiDir.gen.cs"),
        imgui_enum("imgui_drag_drop_flags", "ImGuiDragDropFlags.gen.cs"),
        imgui_enum("imgui_tab_bar_flags", "ImGuiTabBarFlags.gen.cs"),
        imgui_enum("imgui_tab_item_flags", "ImGuiTabItemFlags.gen.cs"),
        imgui_enum("imgui_color_edit_flags", "ImGuiColorEditFlags.gen.cs"),
        imgui_enum("imgui_key", "ImGuiKey.gen.cs"),
        imgui_enum("imgui_col", "ImGuiCol.gen.cs"),
        imgui_enum("imgui_combo_flags", "ImGuiComboFlags.gen.cs"),
        imgui_enum("imgui_focused_flags", "ImGuiFocusedFlags.gen.cs"),
        imgui_enum("imgui_hovered_flags", "ImGuiHoveredFlags.gen.cs"),
        // quaver
        Descriptor::new("game_mode", format!("{}/GameMode.cs", QUAVER_ENUM_DIR)),
        Descriptor::new("hitsounds", format!("{}/Hitsounds.cs", QUAVER_ENUM_DIR)),
        Descriptor::new(
            "time_signature",
            format!("{}/TimeSignature.cs", QUAVER_ENUM_DIR),
        ),
        // keys isn't listed here since it needs its own doc-comment fixup
    ]
}

fn builtin_classes() -> Vec<Descriptor> {
    vec![
        Descriptor::new("imgui", format!("{}/Scripting/ImGuiWrapper.cs", QUAVER_SHARED)),
        Descriptor::new("state", format!("{}/Scripting/LuaPluginState.cs", QUAVER_SHARED)),
        Descriptor::new(
            "state",
            format!("{}/Screens/Edit/Plugins/EditorPluginState.cs", QUAVER_SHARED),
        ),
        Descriptor::new(
            "map",
            format!("{}/Screens/Edit/Plugins/EditorPluginMap.cs", QUAVER_SHARED),
        ),
        Descriptor::new(
            "utils",
            format!("{}/Screens/Edit/Plugins/EditorPluginUtils.cs", QUAVER_SHARED),
        ),
        Descriptor::new(
            "actions",
            format!(
                "{}/Screens/Edit/Actions/EditorPluginActionManager.cs",
                QUAVER_SHARED
            ),
        ),
    ]
}

fn builtin_type_defaults() -> HashMap<String, String> {
    [
        ("double", "0.0"),
        ("float", "0.0"),
        ("int", "0"),
        ("long", "0"),
        ("bool", "false"),
        ("gamemode", "game_mode.Keys4"),
        ("string", "\"\""),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn builtin_keyword_replacements() -> HashMap<String, String> {
    [("repeat", "rep")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Config {
    /// Look up the Lua default literal for a C# type name.
    ///
    /// The lookup is case-insensitive; unrecognized types fall back to the
    /// empty-table placeholder `{}`.
    pub fn default_value_for(&self, cs_type: &str) -> &str {
        self.type_defaults
            .get(&cs_type.to_lowercase())
            .map(String::as_str)
            .unwrap_or("{}")
    }

    /// Apply the reserved-word substitution to a parameter name.
    pub fn lua_safe_param<'a>(&'a self, name: &'a str) -> &'a str {
        self.keyword_replacements
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

/// Parse a YAML configuration string.
pub fn parse(yaml: &str) -> Result<Config> {
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "stubgen.yaml only needs the fields you want to override; \
             see Config for the full schema"
                .to_string(),
        ),
    })
}

/// Load configuration from a YAML file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("Cannot read {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}
