use crate::fixtures::{env_map, preset};
use indexmap::IndexMap;
use mcpgen::entry::Entry;
use mcpgen::generator::{generate, generate_string, render, ConfigTarget};
use mcpgen::selection::{reconcile, set_env_value, toggle, Selection};
use rstest::rstest;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bare(id: &str) -> Entry {
        Entry { args: vec!["-y".to_string()], ..preset(id, &[]) }
    }

    fn selected(entry: Entry) -> Selection {
        Selection { selected: true, ..Selection::new(entry) }
    }

    #[rstest]
    #[case(ConfigTarget::Standalone, r#"{"mcpServers":{"x":{"command":"npx","args":["-y"]}}}"#)]
    #[case(
        ConfigTarget::EditorSettings,
        r#"{"mcp":{"mcpServers":{"x":{"command":"npx","args":["-y"]}}}}"#
    )]
    fn test_target_wrapping(#[case] target: ConfigTarget, #[case] expected: &str) {
        let document = generate(&[selected(bare("x"))], target);
        assert_eq!(serde_json::to_string(&document).unwrap(), expected);
    }

    #[test]
    fn test_env_override_precedence() {
        let mut selection = selected(preset("x", &[("TOKEN", "default")]));
        selection.env_values = env_map(&[("TOKEN", "override")]);

        let document = generate(&[selection], ConfigTarget::Standalone);
        let env = document.servers().mcp_servers["x"].env.clone().unwrap();
        assert_eq!(env["TOKEN"], "override");
    }

    #[test]
    fn test_empty_value_suppression() {
        let document = generate(&[selected(preset("x", &[("KEY", "")]))], ConfigTarget::Standalone);
        let json: serde_json::Value = serde_json::to_value(&document).unwrap();

        assert!(json["mcpServers"]["x"].get("env").is_none());
    }

    #[test]
    fn test_override_only_keys_are_forwarded_after_base_keys() {
        let mut selection = selected(preset("x", &[("B", "base"), ("A", "")]));
        selection.env_values = env_map(&[("EXTRA", "1"), ("A", "set")]);

        let document = generate(&[selection], ConfigTarget::Standalone);
        let env = document.servers().mcp_servers["x"].env.clone().unwrap();
        let keys: Vec<&String> = env.keys().collect();
        assert_eq!(keys, vec!["B", "A", "EXTRA"]);
    }

    #[test]
    fn test_args_are_copied_verbatim() {
        let entry = Entry {
            args: vec!["--flag".to_string(), "--flag".to_string(), "z".to_string(), "a".to_string()],
            ..preset("x", &[])
        };

        let document = generate(&[selected(entry)], ConfigTarget::Standalone);
        assert_eq!(document.servers().mcp_servers["x"].args, vec!["--flag", "--flag", "z", "a"]);
    }

    #[test]
    fn test_golden_output_preserves_selection_order() {
        let entries = vec![
            preset("github", &[("GITHUB_TOKEN", ""), ("GITHUB_HOST", "github.com")]),
            bare("unused"),
            bare("fetch"),
        ];
        let mut selections = reconcile(&entries, &[]);
        selections = toggle(&selections, "github");
        selections = toggle(&selections, "fetch");
        selections = set_env_value(&selections, "github", "GITHUB_TOKEN", "ghp_123");

        let rendered = generate_string(&selections, ConfigTarget::Standalone).unwrap();
        let expected = r#"{
  "mcpServers": {
    "github": {
      "command": "npx",
      "args": [
        "-y",
        "@example/github"
      ],
      "env": {
        "GITHUB_TOKEN": "ghp_123",
        "GITHUB_HOST": "github.com"
      }
    },
    "fetch": {
      "command": "npx",
      "args": [
        "-y"
      ]
    }
  }
}"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_zero_selected_is_not_an_error() {
        let selections = reconcile(&[bare("a"), bare("b")], &[]);

        let standalone = generate(&selections, ConfigTarget::Standalone);
        assert!(standalone.is_empty());
        assert_eq!(standalone.servers().mcp_servers, IndexMap::new());

        let editor = render(&generate(&selections, ConfigTarget::EditorSettings)).unwrap();
        assert_eq!(editor, "{\n  \"mcp\": {\n    \"mcpServers\": {}\n  }\n}");
    }
}
