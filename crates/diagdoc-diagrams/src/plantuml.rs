//! `PlantUML` source preprocessing.

/// Insert `skinparam dpi <dpi>` right after the `@startuml` line.
///
/// Sources without `@startuml` get the directive prepended. Sources that
/// already set a DPI are returned unchanged.
#[must_use]
pub fn inject_dpi(source: &str, dpi: u32) -> String {
    if source
        .lines()
        .any(|line| line.trim_start().starts_with("skinparam dpi"))
    {
        return source.to_owned();
    }

    let directive = format!("skinparam dpi {dpi}\n");

    let Some(pos) = source.find("@startuml") else {
        return format!("{directive}{source}");
    };

    match source[pos..].find('\n') {
        Some(newline_pos) => {
            let insert_pos = pos + newline_pos + 1;
            let mut result = String::with_capacity(source.len() + directive.len());
            result.push_str(&source[..insert_pos]);
            result.push_str(&directive);
            result.push_str(&source[insert_pos..]);
            result
        }
        // `@startuml` on the last line without a newline
        None => format!("{source}\n{directive}"),
    }
}
