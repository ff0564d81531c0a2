//! Rewrite passes over the pattern tree.
//!
//! A [`Pass`] is a [`Visitor`] with a name and two hooks: `should_run`
//! decides whether the pass applies to a tree at all, and `init` resets
//! per-run state. [`run_passes`] runs each pass in order with its own
//! [`TraversalContext`], so path handles never leak between passes.
//!
//! Built-in passes are resolved by name with [`resolve_pass`]:
//!
//! | Name | Effect |
//! |------|--------|
//! | `strip-chars` | remove simple chars whose value is in the strip set |
//! | `ungroup` | replace a non-capturing group holding one term with that term |
//! | `dedupe-class` | remove repeated entries inside character classes |

mod dedupe_class;
mod strip_chars;
mod ungroup;

pub use dedupe_class::DedupeClass;
pub use strip_chars::StripChars;
pub use ungroup::Ungroup;

use rxtree_ast::{traverse_with, Ast, PathResult, TraversalContext, VisitResult, Visitor};
use rxtree_core::error::RxError;
use rxtree_core::output::PassSummary;
use tracing::info;

/// Names accepted by [`resolve_pass`], in documentation order.
pub const PASS_NAMES: &[&str] = &[StripChars::NAME, Ungroup::NAME, DedupeClass::NAME];

/// A named rewrite run as one traversal.
pub trait Pass: Visitor {
    /// Stable name used on the command line and in responses.
    fn name(&self) -> &'static str;

    /// Whether the pass applies to `ast`. Skipped passes do not traverse.
    fn should_run(&self, _ast: &Ast) -> bool {
        true
    }

    /// Reset per-run state before traversal.
    fn init(&mut self, _ast: &Ast) {}

    /// Traverse `ast` with this pass as the visitor.
    fn run(&mut self, ast: &mut Ast, cx: &mut TraversalContext) -> PathResult<VisitResult> {
        traverse_with(ast, cx, self)
    }
}

/// Options shared by pass constructors.
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
    /// Characters removed by `strip-chars`.
    pub strip: String,
}

/// Build the pass registered under `name`.
pub fn resolve_pass(name: &str, options: &PassOptions) -> Result<Box<dyn Pass>, RxError> {
    match name {
        StripChars::NAME => Ok(Box::new(StripChars::new(&options.strip))),
        Ungroup::NAME => Ok(Box::new(Ungroup::default())),
        DedupeClass::NAME => Ok(Box::new(DedupeClass::default())),
        other => Err(RxError::invalid_args_with_details(
            format!("unknown pass '{}'", other),
            serde_json::json!({ "available": PASS_NAMES }),
        )),
    }
}

/// Resolve every name in order, failing on the first unknown one.
pub fn resolve_passes(
    names: &[String],
    options: &PassOptions,
) -> Result<Vec<Box<dyn Pass>>, RxError> {
    names
        .iter()
        .map(|name| resolve_pass(name, options))
        .collect()
}

/// Run `passes` over `ast` in order.
///
/// Each pass gets a fresh context. A path error aborts the run and is
/// reported against the pass that raised it; edits made before the error
/// stay in the tree.
pub fn run_passes(ast: &mut Ast, passes: &mut [Box<dyn Pass>]) -> Result<Vec<PassSummary>, RxError> {
    let mut summaries = Vec::with_capacity(passes.len());
    for pass in passes.iter_mut() {
        let name = pass.name();
        if !pass.should_run(ast) {
            info!(pass = name, "pass skipped");
            summaries.push(PassSummary {
                name: name.to_string(),
                ran: false,
            });
            continue;
        }

        pass.init(ast);
        let mut cx = TraversalContext::new();
        pass.run(ast, &mut cx)
            .map_err(|err| RxError::transform(name, err.to_string()))?;
        info!(pass = name, paths = cx.path_count(), "pass complete");
        summaries.push(PassSummary {
            name: name.to_string(),
            ran: true,
        });
    }
    Ok(summaries)
}
