//! Canned configuration/output pairs the playground can load in one step.

/// A named example: configuration text and matching tool output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Lookup key, e.g. `"eslint-compact"`.
    pub name: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
    pub config: &'static str,
    pub output: &'static str,
}

const ESLINT_COMPACT_CONFIG: &str = r#"{
  "owner": "eslint-compact",
  "pattern": [
    {
      "regexp": "^(.+):\\sline\\s(\\d+),\\scol\\s(\\d+),\\s(Error|Warning|Info)\\s-\\s(.+)\\s\\((.+)\\)$",
      "file": 1,
      "line": 2,
      "column": 3,
      "severity": 4,
      "message": 5,
      "code": 6
    }
  ]
}"#;

const ESLINT_COMPACT_OUTPUT: &str =
    "badFile.js: line 50, col 11, Error - 'myVar' is defined but never used. (no-unused-vars)";

const ESLINT_STYLISH_CONFIG: &str = r#"{
  "owner": "eslint-stylish",
  "pattern": [
    {
      "regexp": "^([^\\s].*)$",
      "file": 1
    },
    {
      "regexp": "^\\s+(\\d+):(\\d+)\\s+(error|warning|info)\\s+(.*)\\s\\s+(.*)$",
      "line": 1,
      "column": 2,
      "severity": 3,
      "message": 4,
      "code": 5,
      "loop": true
    }
  ]
}"#;

const ESLINT_STYLISH_OUTPUT: &str = r#"test.js
  1:0   error  Missing "use strict" statement                 strict
  5:10  error  'addOne' is defined but never used             no-unused-vars

foo.js
  36:10  error  Expected parentheses around arrow function argument  arrow-parens
  37:13  error  Expected parentheses around arrow function argument  arrow-parens

✖ 4 problems (4 errors, 0 warnings)"#;

/// Every preset, in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "eslint-compact",
        label: "ESLint Compact",
        config: ESLINT_COMPACT_CONFIG,
        output: ESLINT_COMPACT_OUTPUT,
    },
    Preset {
        name: "eslint-stylish",
        label: "ESLint Stylish",
        config: ESLINT_STYLISH_CONFIG,
        output: ESLINT_STYLISH_OUTPUT,
    },
];

/// `(name, label)` pairs of every preset, in display order.
pub fn list_examples() -> Vec<(&'static str, &'static str)> {
    PRESETS.iter().map(|p| (p.name, p.label)).collect()
}

/// Look up a preset by name.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn lists_presets_in_order() {
        assert_eq!(
            list_examples(),
            vec![
                ("eslint-compact", "ESLint Compact"),
                ("eslint-stylish", "ESLint Stylish"),
            ]
        );
    }

    #[test]
    fn every_preset_config_decodes() {
        for preset in PRESETS {
            let parsed = config::parse(preset.config)
                .unwrap_or_else(|e| panic!("{} failed to decode: {e}", preset.name));
            assert_eq!(parsed.owner, preset.name);
        }
    }

    #[test]
    fn stylish_loops_on_last_rule() {
        let parsed = config::parse(find("eslint-stylish").unwrap().config).unwrap();
        assert!(!parsed.pattern[0].loops());
        assert!(parsed.pattern[1].loops());
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(find("gcc").is_none());
    }
}
