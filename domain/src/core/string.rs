//! String helpers shared by the domain and presentation layers.

/// Replace every run of whitespace with a single `-`.
///
/// Used to derive tab panel ids from participant labels. The mapping is
/// lossy: `"Agent  One"` and `"Agent-One"` share a slug.
pub fn slugify_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push('-');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify_whitespace("Agent  One"), "Agent-One");
        assert_eq!(slugify_whitespace("a b\tc"), "a-b-c");
        assert_eq!(slugify_whitespace("Chair"), "Chair");
    }
}
