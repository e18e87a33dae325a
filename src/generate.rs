//! # Stub Emission and Document Assembly
//!
//! Turns extracted declaration bodies into Lua stub blocks and joins them
//! into the final intellisense document.
//!
//! Enum bodies are emitted near-verbatim as a table literal assignment.
//! Class bodies are reduced to field-default assignments and no-op function
//! declarations, which is all an editor needs for completion hints.
//!
//! A descriptor whose extraction came back empty is omitted from the
//! document entirely; there are no placeholders.

use std::fs;
use std::path::Path;

use log::info;
use regex::Regex;

use crate::config::{Config, Descriptor};
use crate::error::Result;
use crate::extract::{BodyExtractor, DeclKind};
use crate::patterns::Patterns;

/// One generation pass over a configuration.
///
/// Holds the compiled pattern set so descriptors share the same machinery;
/// the configuration itself is borrowed and never mutated.
pub struct Generator<'a> {
    config: &'a Config,
    patterns: Patterns,
    extractor: BodyExtractor,
    summary_doc: Regex,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            config,
            patterns: Patterns::new()?,
            extractor: BodyExtractor::new()?,
            // A three-line XML-doc block (already converted to `--`)
            // directly above an enum value.
            summary_doc: Regex::new(r"(?m)^(\s+)-- ?<.*>\n\s+(-- .*)\n\s+-- ?</.*>\n\s+(.*)")?,
        })
    }

    /// Emit an enum block: source-path comment, then the body assigned to
    /// the configured name verbatim.
    pub fn enum_stub(&self, descriptor: &Descriptor) -> Result<Option<String>> {
        info!("Generating enum {}", descriptor.path.display());
        let body = self
            .extractor
            .load_decl_body(&descriptor.path, DeclKind::Enum)?;
        Ok(body.map(|body| assignment_block(&descriptor.name, &descriptor.path, &body)))
    }

    /// Emit the key enum block.
    ///
    /// MonoGame's `Keys.cs` documents every value with a three-line
    /// `<summary>` block; those are collapsed onto the value line, comment
    /// trailing. This fixup is intentionally not applied to any other
    /// descriptor.
    pub fn key_enum_stub(&self) -> Result<Option<String>> {
        let descriptor = &self.config.key_enum;
        info!("Generating enum {}", descriptor.path.display());
        let body = self
            .extractor
            .load_decl_body(&descriptor.path, DeclKind::Enum)?;
        Ok(body.map(|body| {
            let collapsed = self.summary_doc.replace_all(&body, "${1}${3} ${2}");
            assignment_block(&descriptor.name, &descriptor.path, &collapsed)
        }))
    }

    /// Emit a class block: source-path comment, one default-value
    /// assignment per field, one no-op function stub per method.
    pub fn class_stub(&self, descriptor: &Descriptor) -> Result<Option<String>> {
        info!("Generating class {}", descriptor.path.display());
        let Some(body) = self
            .extractor
            .load_decl_body(&descriptor.path, DeclKind::Class)?
        else {
            return Ok(None);
        };

        let mut lines = vec![format!("-- {}", descriptor.path.display())];

        for field in self.patterns.fields(&body) {
            lines.push(format!(
                "{}.{} = {} -- {}",
                descriptor.name,
                field.name,
                self.config.default_value_for(&field.cs_type),
                field.cs_type
            ));
        }

        for function in self.patterns.functions(&body) {
            let params: Vec<String> = self
                .patterns
                .parameters(&function.params)
                .into_iter()
                .map(|param| self.config.lua_safe_param(&param.name).to_string())
                .collect();
            lines.push(format!(
                "function {}.{}({}) end",
                descriptor.name,
                function.name,
                params.join(", ")
            ));
        }

        Ok(Some(lines.join("\n")))
    }

    /// Assemble the whole document: timestamp header, enum blocks, class
    /// blocks, key enum, blank-line separated. Empty blocks are dropped.
    pub fn render_document(&self) -> Result<String> {
        let mut blocks = vec![format!(
            "-- LAST UPDATED: {}",
            chrono::Local::now().date_naive()
        )];

        for descriptor in &self.config.enums {
            if let Some(block) = self.enum_stub(descriptor)? {
                blocks.push(block);
            }
        }
        for descriptor in &self.config.classes {
            if let Some(block) = self.class_stub(descriptor)? {
                blocks.push(block);
            }
        }
        if let Some(block) = self.key_enum_stub()? {
            blocks.push(block);
        }

        Ok(blocks.join("\n\n"))
    }

    /// Render and write the document to the configured output path,
    /// truncating any previous contents.
    pub fn write_document(&self) -> Result<()> {
        let document = self.render_document()?;
        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config.output, document)?;
        info!("Written to {}", self.config.output.display());
        Ok(())
    }
}

fn assignment_block(name: &str, path: &Path, body: &str) -> String {
    format!("-- {}\n{} = {}", path.display(), name, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Descriptor;
    use tempfile::TempDir;

    const GAME_MODE_CS: &str = "namespace Quaver.API.Enums\n{\n    public enum GameMode\n    {\n        // 4 keys\n        Keys4 = 1,\n\n        // 7 keys\n        Keys7 = 2\n    }\n}\n";

    const PLUGIN_STATE_CS: &str = "namespace Quaver.Shared.Scripting\n{\n    public class LuaPluginState\n    {\n        public float DeltaTime { get; set; }\n\n        public double SongTime { get; set; }\n\n        [MoonSharpVisible(false)]\n        public Qua Secret { get; set; }\n\n        public GameMode Mode { get; set; }\n\n        public void PushImguiStyle(int style)\n        {\n        }\n\n        public string Echo(int count, ref string repeat)\n        {\n        }\n    }\n}\n";

    const KEYS_CS: &str = "namespace Microsoft.Xna.Framework.Input\n{\n    public enum Keys\n    {\n        /// <summary>\n        /// Reserved.\n        /// </summary>\n        None = 0,\n        /// <summary>\n        /// BACKSPACE key.\n        /// </summary>\n        Back = 8,\n    }\n}\n";

    struct Fixture {
        _dir: TempDir,
        config: Config,
    }

    fn fixture(files: &[(&str, &str)]) -> Fixture {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let mut config = Config::default();
        config.output = dir.path().join("intellisense.lua");
        config.repositories = Vec::new();
        config.enums = vec![Descriptor {
            name: "game_mode".to_string(),
            path: dir.path().join("GameMode.cs"),
        }];
        config.classes = vec![Descriptor {
            name: "state".to_string(),
            path: dir.path().join("LuaPluginState.cs"),
        }];
        config.key_enum = Descriptor {
            name: "keys".to_string(),
            path: dir.path().join("Keys.cs"),
        };
        Fixture { _dir: dir, config }
    }

    #[test]
    fn test_enum_stub() {
        let f = fixture(&[("GameMode.cs", GAME_MODE_CS)]);
        let generator = Generator::new(&f.config).unwrap();

        let block = generator.enum_stub(&f.config.enums[0]).unwrap().unwrap();
        let expected_body =
            "{\n    -- 4 keys\n    Keys4 = 1,\n\n    -- 7 keys\n    Keys7 = 2\n}";
        assert_eq!(
            block,
            format!(
                "-- {}\ngame_mode = {}",
                f.config.enums[0].path.display(),
                expected_body
            )
        );
    }

    #[test]
    fn test_enum_stub_missing_file() {
        let f = fixture(&[]);
        let generator = Generator::new(&f.config).unwrap();
        assert_eq!(generator.enum_stub(&f.config.enums[0]).unwrap(), None);
    }

    #[test]
    fn test_class_stub() {
        let f = fixture(&[("LuaPluginState.cs", PLUGIN_STATE_CS)]);
        let generator = Generator::new(&f.config).unwrap();

        let block = generator.class_stub(&f.config.classes[0]).unwrap().unwrap();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("-- "));
        assert_eq!(lines[1], "state.DeltaTime = 0.0 -- float");
        assert_eq!(lines[2], "state.SongTime = 0.0 -- double");
        // The hidden Qua field is excluded, not defaulted
        assert_eq!(lines[3], "state.Mode = game_mode.Keys4 -- GameMode");
        assert_eq!(lines[4], "function state.PushImguiStyle(style) end");
        // "ref" dropped, reserved word "repeat" renamed
        assert_eq!(lines[5], "function state.Echo(count, rep) end");
    }

    #[test]
    fn test_class_stub_unrecognized_type_falls_back() {
        let f = fixture(&[(
            "LuaPluginState.cs",
            "class LuaPluginState\n    {\n        public Qua Map { get; set; }\n    }\n",
        )]);
        let generator = Generator::new(&f.config).unwrap();
        let block = generator.class_stub(&f.config.classes[0]).unwrap().unwrap();
        assert!(block.ends_with("state.Map = {} -- Qua"));
    }

    #[test]
    fn test_key_enum_stub_collapses_summaries() {
        let f = fixture(&[("Keys.cs", KEYS_CS)]);
        let generator = Generator::new(&f.config).unwrap();

        let block = generator.key_enum_stub().unwrap().unwrap();
        assert!(block.contains("keys = {"));
        assert!(block.contains("    None = 0, -- Reserved.\n"));
        assert!(block.contains("    Back = 8, -- BACKSPACE key.\n"));
        assert!(!block.contains("<summary>"));
    }

    #[test]
    fn test_plain_enum_keeps_summary_blocks() {
        // The doc-comment collapse is scoped to the key enum only.
        let f = fixture(&[("GameMode.cs", KEYS_CS)]);
        let generator = Generator::new(&f.config).unwrap();

        let block = generator.enum_stub(&f.config.enums[0]).unwrap().unwrap();
        assert!(block.contains("-- <summary>"));
    }

    #[test]
    fn test_render_document_order_and_separation() {
        let f = fixture(&[
            ("GameMode.cs", GAME_MODE_CS),
            ("LuaPluginState.cs", PLUGIN_STATE_CS),
            ("Keys.cs", KEYS_CS),
        ]);
        let generator = Generator::new(&f.config).unwrap();

        let document = generator.render_document().unwrap();
        let first_line = document.lines().next().unwrap();
        assert!(first_line.starts_with("-- LAST UPDATED: "));

        let game_mode = document.find("game_mode = {").unwrap();
        let state = document.find("state.DeltaTime").unwrap();
        let keys = document.find("keys = {").unwrap();
        assert!(game_mode < state);
        assert!(state < keys);

        // Blocks are separated by exactly one blank line
        assert!(document.contains("}\n\n-- "));
    }

    #[test]
    fn test_render_document_omits_missing_entries() {
        // Only the class source exists; enum and key blocks are dropped
        // without placeholders and without failing the run.
        let f = fixture(&[("LuaPluginState.cs", PLUGIN_STATE_CS)]);
        let generator = Generator::new(&f.config).unwrap();

        let document = generator.render_document().unwrap();
        // The class block still references game_mode in a field default;
        // only the enum *block* must be absent.
        assert!(!document.contains("game_mode = {"));
        assert!(!document.contains("keys = "));
        assert!(document.contains("state.DeltaTime = 0.0 -- float"));
    }

    #[test]
    fn test_render_document_idempotent_modulo_timestamp() {
        let f = fixture(&[
            ("GameMode.cs", GAME_MODE_CS),
            ("LuaPluginState.cs", PLUGIN_STATE_CS),
            ("Keys.cs", KEYS_CS),
        ]);
        let generator = Generator::new(&f.config).unwrap();

        let first = generator.render_document().unwrap();
        let second = generator.render_document().unwrap();
        let strip = |doc: &str| doc.splitn(2, '\n').nth(1).unwrap_or_default().to_string();
        assert_eq!(strip(&first), strip(&second));
    }

    #[test]
    fn test_write_document_truncates_previous_output() {
        let f = fixture(&[("GameMode.cs", GAME_MODE_CS)]);
        std::fs::write(&f.config.output, "stale content that is much longer than the new one\n".repeat(50))
            .unwrap();

        let generator = Generator::new(&f.config).unwrap();
        generator.write_document().unwrap();

        let written = std::fs::read_to_string(&f.config.output).unwrap();
        assert!(!written.contains("stale content"));
        assert!(written.contains("game_mode = {"));
    }

    #[test]
    fn test_write_document_creates_parent_directory() {
        let f = fixture(&[("GameMode.cs", GAME_MODE_CS)]);
        let mut config = f.config.clone();
        config.output = f.config.output.parent().unwrap().join("out/stubs.lua");

        let generator = Generator::new(&config).unwrap();
        generator.write_document().unwrap();
        assert!(config.output.exists());
    }

    #[test]
    fn test_duplicate_class_names_emit_both_blocks() {
        let f = fixture(&[("LuaPluginState.cs", PLUGIN_STATE_CS)]);
        let mut config = f.config.clone();
        let second = Descriptor {
            name: "state".to_string(),
            path: config.classes[0].path.clone(),
        };
        config.classes.push(second);

        let generator = Generator::new(&config).unwrap();
        let document = generator.render_document().unwrap();
        assert_eq!(document.matches("state.DeltaTime = 0.0 -- float").count(), 2);
    }

    #[test]
    fn test_descriptor_paths_appear_in_headers() {
        let f = fixture(&[("GameMode.cs", GAME_MODE_CS)]);
        let generator = Generator::new(&f.config).unwrap();
        let block = generator.enum_stub(&f.config.enums[0]).unwrap().unwrap();
        let header = block.lines().next().unwrap();
        assert_eq!(
            header,
            format!("-- {}", f.config.enums[0].path.display())
        );
    }
}
