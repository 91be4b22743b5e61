// codegen/src/utils.rs

/// Capitalize the first letter of a string
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Capitalize the first letter of each `_`-delimited word and join them
/// without separators. Remaining characters are kept as they are.
///
/// # Examples
/// ```
/// use elegen_codegen::utils::title_case;
/// assert_eq!(title_case("in_progress"), "InProgress");
/// assert_eq!(title_case("DONE"), "DONE");
/// assert_eq!(title_case("associatedTags"), "AssociatedTags");
/// ```
pub fn title_case(s: &str) -> String { s.split('_').map(capitalize).collect() }

/// File name of the model generated for `entity_name`
pub fn model_filename(entity_name: &str) -> String { format!("{}.go", entity_name.to_lowercase()) }

/// Escape a string as a Go interpreted string literal, quotes included
pub fn go_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
