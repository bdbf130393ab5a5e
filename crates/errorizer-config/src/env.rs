use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand environment placeholders in raw config text
///
/// Runs before TOML parsing so config structs only ever see plain strings.
/// Comment lines are left as written.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut failure = None;

    let expanded: String = input
        .split_inclusive('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return Cow::Borrowed(line);
            }

            placeholder().replace_all(line, |captures: &Captures<'_>| {
                let key = &captures[1];
                let default_value = captures.get(2).map(|m| m.as_str());

                match lookup(key, default_value) {
                    Ok(value) => value,
                    Err(error) => {
                        failure.get_or_insert(error);
                        String::new()
                    }
                }
            })
        })
        .collect();

    match failure {
        Some(error) => Err(error),
        None => Ok(expanded),
    }
}

fn lookup(key: &str, default_value: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default_value) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
