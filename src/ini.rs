/// Minimal INI reader for project configuration and model files
///
/// Keys before the first `[section]` header are top-level; keys inside a
/// section are addressed as `section.key`. Lines starting with `#` or `;`
/// are comments. Later definitions of a key replace earlier ones but keep
/// their original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    entries: Vec<(String, String)>,
}

impl Ini {
    pub fn parse(content: &str) -> Self {
        let mut ini = Ini::default();
        let mut current_section = String::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(section) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                current_section = section.trim().to_string();
                continue;
            }

            if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim();
                let full_key = if current_section.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", current_section, key)
                };
                ini.set(full_key, value.trim().to_string());
            }
        }
        ini
    }

    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(known, _)| *known == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(known, _)| known == key)
            .map(|(_, value)| value.as_str())
    }

    /// Names of all sections starting with `prefix.` in order of appearance,
    /// with the prefix removed; e.g. `fields` yields `title` for `[fields.title]`.
    pub fn subsections(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let lead = format!("{}.", prefix);
        for (key, _) in &self.entries {
            let Some(rest) = key.strip_prefix(&lead) else {
                continue;
            };
            // `rest` is `<name>.<key>`; names may contain dots themselves
            if let Some((name, _)) = rest.rsplit_once('.') {
                if !names.iter().any(|known| known == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Truthy configuration values as the site builder writes them
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "true" | "True" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_level_and_sections() {
        let ini = Ini::parse(
            "# comment\ncontent = en\ntranslations = de, fr\n\n[fields.title]\ntype = string\ntranslate = True\n; other\n[fields.body]\ntype = markdown\n",
        );
        assert_eq!(ini.get("content"), Some("en"));
        assert_eq!(ini.get("translations"), Some("de, fr"));
        assert_eq!(ini.get("fields.title.translate"), Some("True"));
        assert_eq!(ini.get("fields.body.type"), Some("markdown"));
        assert_eq!(ini.get("missing"), None);
    }

    #[test]
    fn test_subsections_in_order() {
        let ini = Ini::parse("[model]\nname = Page\n[fields.title]\ntype = string\n[fields.body]\ntype = flow\n");
        assert_eq!(ini.subsections("fields"), vec!["title", "body"]);
    }

    #[test]
    fn test_later_value_wins() {
        let ini = Ini::parse("enable = true\nenable = false\n");
        assert_eq!(ini.get("enable"), Some("false"));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("True"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("yes"));
        assert!(!is_truthy("false"));
    }
}
