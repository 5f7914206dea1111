//! This module contains the macros used in the project.

/// Resolve a required value: command line (flag or environment) first, then the
/// matching key of the configuration file section. Empty strings count as absent.
/// When both are absent, `$flag` is pushed to `$missing` and an empty string is returned.
macro_rules! config_value {
    ($cli_value:expr, $section:expr, $key_name:ident, $flag:expr, $missing:ident) => {
        match $cli_value
            .as_ref()
            .filter(|value| !value.is_empty())
            .or_else(|| {
                $section
                    .and_then(|section| section.$key_name.as_ref())
                    .filter(|value| !value.is_empty())
            }) {
            Some(value) => value.clone(),
            None => {
                $missing.push($flag);
                String::new()
            }
        }
    };
}

pub(crate) use config_value;
