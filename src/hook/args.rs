//! Gerrit hook argument conventions.
//!
//! Gerrit invokes hooks with `--key value` pairs whose keys vary by hook
//! type; unknown keys must be tolerated, and some flags carry no value.
//! For local development an argument file can stand in for a real
//! invocation: its first line names the hook (possibly as a path), then
//! each `--key` line is followed by the value, which may span several
//! lines.

use std::collections::BTreeMap;
use std::path::Path;

use super::InvocationError;

/// Key/value attributes of one hook invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgMap(BTreeMap<String, String>);

impl ArgMap {
    /// Parses `--key value` pairs, skipping the leading program name.
    ///
    /// A `--key` immediately followed by another `--key` keeps an empty
    /// value; tokens that are not flags and not consumed as values are
    /// ignored.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = argv
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();
        let mut map = BTreeMap::new();
        let mut i = 0;
        while i < args.len() {
            if let Some(key) = args[i].strip_prefix("--") {
                if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                    map.insert(key.to_string(), args[i + 1].clone());
                    i += 2;
                    continue;
                }
                map.insert(key.to_string(), String::new());
            }
            i += 1;
        }
        ArgMap(map)
    }

    /// Reads a captured invocation back from a file, returning the hook
    /// name and its attributes.
    pub fn from_arg_file(path: &Path) -> Result<(String, ArgMap), InvocationError> {
        let content = std::fs::read_to_string(path).map_err(|source| InvocationError::ArgFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = content.lines();
        let action = lines
            .next()
            .map(|l| l.rsplit('/').next().unwrap_or(l).to_string())
            .unwrap_or_default();

        let mut map = BTreeMap::new();
        let mut key: Option<String> = None;
        let mut value = String::new();
        for line in lines {
            if let Some(next_key) = line.strip_prefix("--") {
                if let Some(k) = key.take() {
                    map.insert(k, std::mem::take(&mut value));
                }
                key = Some(next_key.to_string());
            } else if key.is_some() {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line);
            }
        }
        if let Some(k) = key {
            map.insert(k, value);
        }
        Ok((action, ArgMap(map)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_key_value_pairs() {
        let args = ArgMap::from_argv([
            "patchset-created",
            "--project",
            "acme/widgets",
            "--change",
            "c1",
            "--commit",
            "abc123",
        ]);
        assert_eq!(args.get("project"), Some("acme/widgets"));
        assert_eq!(args.get("change"), Some("c1"));
        assert_eq!(args.get("commit"), Some("abc123"));
        assert_eq!(args.get("comment"), None);
    }

    #[test]
    fn flag_followed_by_flag_keeps_an_empty_value() {
        let args = ArgMap::from_argv(["hook", "--kind", "--change", "c1"]);
        assert_eq!(args.get("kind"), Some(""));
        assert_eq!(args.get("change"), Some("c1"));
    }

    #[test]
    fn trailing_flag_without_a_value_is_kept() {
        let args = ArgMap::from_argv(["hook", "--change", "c1", "--dry-run"]);
        assert_eq!(args.get("dry-run"), Some(""));
    }

    #[test]
    fn stray_tokens_are_ignored() {
        let args = ArgMap::from_argv(["hook", "stray", "--change", "c1"]);
        assert_eq!(args.get("change"), Some("c1"));
        assert_eq!(args.get("stray"), None);
    }

    #[test]
    fn only_the_program_name_yields_an_empty_map() {
        assert!(ArgMap::from_argv(["hook"]).is_empty());
        assert!(ArgMap::from_argv(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn values_may_look_like_urls_or_contain_spaces() {
        let args = ArgMap::from_argv([
            "hook",
            "--change-url",
            "https://review.example.net/c/1",
            "--comment",
            "please run jenkins verify now",
        ]);
        assert_eq!(args.get("change-url"), Some("https://review.example.net/c/1"));
        assert_eq!(args.get("comment"), Some("please run jenkins verify now"));
    }

    #[test]
    fn reads_an_argument_file_with_multiline_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "/site/hooks/comment-added\n\
             --project\n\
             acme/widgets\n\
             --comment\n\
             first line\n\
             second line\n\
             --change\n\
             c1"
        )
        .unwrap();

        let (action, args) = ArgMap::from_arg_file(file.path()).unwrap();
        assert_eq!(action, "comment-added");
        assert_eq!(args.get("project"), Some("acme/widgets"));
        assert_eq!(args.get("comment"), Some("first line\nsecond line"));
        assert_eq!(args.get("change"), Some("c1"));
    }

    #[test]
    fn missing_argument_file_is_an_error() {
        let err = ArgMap::from_arg_file(Path::new("/nonexistent/args.txt")).unwrap_err();
        assert!(matches!(err, InvocationError::ArgFile { .. }));
    }

    #[test]
    fn empty_argument_file_yields_an_empty_action() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (action, args) = ArgMap::from_arg_file(file.path()).unwrap();
        assert_eq!(action, "");
        assert!(args.is_empty());
    }
}
