//! `dedupe-class`: drop repeated character class entries.

use std::collections::HashSet;

use rxtree_ast::{Ast, NodePath, PathId, PathResult, VisitResult, Visitor};
use tracing::debug;

use super::Pass;

/// Removes class entries whose generated text already appeared earlier in
/// the same class, so `[abca-za-z]` becomes `[abca-z]`. Entries are compared
/// as written: `a` and `a-a` are different entries.
#[derive(Debug, Default)]
pub struct DedupeClass {
    removed: usize,
}

impl DedupeClass {
    pub const NAME: &'static str = "dedupe-class";

    /// Entries removed by the last run.
    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl Visitor for DedupeClass {
    fn visit_character_class(&mut self, path: &mut NodePath<'_>) -> PathResult<VisitResult> {
        let mut seen = HashSet::new();
        let mut duplicates: Vec<PathId> = Vec::new();
        let mut index = 0;
        while let Some(entry) = path.get_child(index) {
            if let Some(source) = entry.source() {
                if !seen.insert(source) {
                    duplicates.push(entry.id());
                }
            }
            index += 1;
        }

        let count = duplicates.len();
        for duplicate in duplicates {
            path.at(duplicate).remove();
        }
        if count > 0 {
            debug!(path = %path.id(), removed = count, "deduped class");
        }
        self.removed += count;
        Ok(VisitResult::Continue)
    }
}

impl Pass for DedupeClass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, _ast: &Ast) {
        self.removed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxtree_ast::{generate, parse, TraversalContext};

    fn dedupe(pattern: &str) -> (String, usize) {
        let mut ast = parse(pattern).unwrap();
        let mut pass = DedupeClass::default();
        pass.run(&mut ast, &mut TraversalContext::new()).unwrap();
        (generate(&ast), pass.removed())
    }

    #[test]
    fn removes_repeats_in_order() {
        assert_eq!(dedupe("/[abca-za-z]/"), ("/[abca-z]/".to_string(), 1));
        assert_eq!(dedupe(r"/[^\d\d_]/"), (r"/[^\d_]/".to_string(), 1));
    }

    #[test]
    fn classes_are_independent() {
        assert_eq!(dedupe("/[ab][ab]a/"), ("/[ab][ab]a/".to_string(), 0));
    }

    #[test]
    fn nested_in_groups() {
        assert_eq!(dedupe("/(?:[xx]|[yy])+/"), ("/(?:[x]|[y])+/".to_string(), 2));
    }
}
