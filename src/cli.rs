//! CLI front door.
//!
//! Provides the command implementations behind the `rxt` binary:
//! - `parse` - parse a pattern and return its JSON AST
//! - `generate` - parse a pattern and regenerate its text
//! - `transform` - run passes over a pattern and return the result
//!
//! ## Patterns and Flags
//!
//! A pattern is either a literal (`/body/flags`) or a bare body. When
//! explicit flags are given the pattern is always taken as a bare body.
//! A bare body without explicit flags uses the configured default flags.
//!
//! ## Error Handling
//!
//! All functions return `Result<T, RxError>`. Output (success or error) is
//! written by the caller.

use rxtree_ast::{
    generate, parse, parse_with_flags, prettify_error, split_literal, Ast, ParserError,
};
use rxtree_core::config::RxConfig;
use rxtree_core::error::RxError;
use rxtree_core::output::{GenerateResponse, ParseResponse, TransformResponse};
use tracing::debug;

use crate::passes::{resolve_passes, run_passes, PassOptions};

/// Parse `pattern` according to the flag rules above.
pub fn parse_pattern(pattern: &str, flags: Option<&str>, config: &RxConfig) -> Result<Ast, RxError> {
    let result = match flags {
        Some(flags) => parse_with_flags(pattern, flags),
        None if split_literal(pattern).is_some() => parse(pattern),
        None => parse_with_flags(pattern, &config.flags),
    };
    result.map_err(|err| report_parse_error(err, pattern))
}

fn report_parse_error(err: ParserError, pattern: &str) -> RxError {
    debug!("{}", prettify_error(&err, pattern, "pattern"));
    RxError::from(err)
}

/// Parse a pattern and encode its tree.
pub fn run_parse(
    pattern: &str,
    flags: Option<&str>,
    config: &RxConfig,
) -> Result<ParseResponse, RxError> {
    let ast = parse_pattern(pattern, flags, config)?;
    Ok(ParseResponse::new(pattern, ast.root_json()))
}

/// Parse a pattern and regenerate it.
pub fn run_generate(
    pattern: &str,
    flags: Option<&str>,
    config: &RxConfig,
) -> Result<GenerateResponse, RxError> {
    let ast = parse_pattern(pattern, flags, config)?;
    Ok(GenerateResponse::new(pattern, generate(&ast)))
}

/// Run passes over a pattern.
///
/// `passes` and `strip` fall back to the configured defaults when empty or
/// absent.
pub fn run_transform(
    pattern: &str,
    flags: Option<&str>,
    passes: &[String],
    strip: Option<&str>,
    config: &RxConfig,
) -> Result<TransformResponse, RxError> {
    let names = if passes.is_empty() {
        config.passes.as_slice()
    } else {
        passes
    };
    let options = PassOptions {
        strip: strip.unwrap_or(&config.strip).to_string(),
    };
    let mut resolved = resolve_passes(names, &options)?;

    let mut ast = parse_pattern(pattern, flags, config)?;
    let before = generate(&ast);
    let summaries = run_passes(&mut ast, &mut resolved)?;
    let output = generate(&ast);
    let changed = output != before;
    debug!(%before, %output, changed, "transform complete");

    Ok(TransformResponse::new(pattern, output, summaries, changed))
}
