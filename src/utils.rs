/// Count plus the correctly-numbered noun: `pluralize(1, "file", "files")`
/// is `"1 file"`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
