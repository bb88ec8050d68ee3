/// Stack of currently open block identifiers
///
/// Tracks nesting one line at a time with two heuristics: a trimmed line
/// ending in `{` that contains a `:` opens a block named by the text before
/// the first colon, and a trimmed line that starts with `},` or is exactly
/// `}` closes the innermost one. Anything else, including `};` or `})`,
/// leaves the stack alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStack {
    segments: Vec<String>,
    underflows: usize,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a block identifier if `trimmed` opens a keyed block
    ///
    /// Returns the pushed identifier.
    pub fn observe_open(&mut self, trimmed: &str) -> Option<&str> {
        if !trimmed.ends_with('{') {
            return None;
        }
        let (key, _) = trimmed.split_once(':')?;
        self.segments.push(key.trim().to_string());
        self.segments.last().map(String::as_str)
    }

    /// Pop the innermost block if `trimmed` closes one
    ///
    /// A close on an empty stack is ignored and counted as an underflow.
    /// Returns the popped identifier.
    pub fn observe_close(&mut self, trimmed: &str) -> Option<String> {
        if !(trimmed.starts_with("},") || trimmed == "}") {
            return None;
        }
        let popped = self.segments.pop();
        if popped.is_none() {
            self.underflows += 1;
        }
        popped
    }

    /// Identifier at `index`, counting from the outermost block
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// True when the stack holds at least `1 + scope.len()` entries and the
    /// entries after the first equal `scope`
    pub fn matches_scope<S: AsRef<str>>(&self, scope: &[S]) -> bool {
        if self.segments.len() < scope.len() + 1 {
            return false;
        }
        self.segments[1..=scope.len()]
            .iter()
            .zip(scope)
            .all(|(segment, expected)| segment.as_str() == expected.as_ref())
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn underflows(&self) -> usize {
        self.underflows
    }

    /// Dotted path of the open blocks, e.g. `th.admin.locations`
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_pushes_key_before_first_colon() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.observe_open("th: {"), Some("th"));
        assert_eq!(stack.observe_open("admin : {"), Some("admin"));
        assert_eq!(stack.observe_open("'a:b': {"), Some("'a"));
        assert_eq!(stack.path(), "th.admin.'a");
    }

    #[test]
    fn test_open_requires_colon_and_trailing_brace() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.observe_open("export const translations = {"), None);
        assert_eq!(stack.observe_open("title: 'Home',"), None);
        assert_eq!(stack.observe_open("nested: { a: 1 },"), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_close_patterns() {
        let mut stack = ContextStack::new();
        stack.observe_open("a: {");
        stack.observe_open("b: {");
        stack.observe_open("c: {");

        assert_eq!(stack.observe_close("};"), None);
        assert_eq!(stack.observe_close("})"), None);
        assert_eq!(stack.observe_close("}"), Some("c".to_string()));
        assert_eq!(stack.observe_close("},"), Some("b".to_string()));
        assert_eq!(stack.observe_close("}, // done"), Some("a".to_string()));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_close_on_empty_stack_is_counted_not_fatal() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.observe_close("}"), None);
        assert_eq!(stack.observe_close("},"), None);
        assert_eq!(stack.underflows(), 2);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_matches_scope() {
        let mut stack = ContextStack::new();
        stack.observe_open("th: {");
        stack.observe_open("admin: {");
        assert!(!stack.matches_scope(&["admin", "locations"]));

        stack.observe_open("locations: {");
        assert!(stack.matches_scope(&["admin", "locations"]));
        assert!(!stack.matches_scope(&["admin", "lockers"]));

        // Deeper nesting still matches on the leading entries
        stack.observe_open("filters: {");
        assert!(stack.matches_scope(&["admin", "locations"]));
        assert_eq!(stack.segment(0), Some("th"));
        assert_eq!(stack.segment(9), None);
    }
}
