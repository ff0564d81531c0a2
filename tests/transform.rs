//! Transform runs through the library front door.

use rxtree::cli::{run_parse, run_transform};
use rxtree::config::{Config, RxConfig};
use rxtree::error::{OutputErrorCode, RxError};
use rxtree::output::PassSummary;
use tempfile::TempDir;

fn names(passes: &[&str]) -> Vec<String> {
    passes.iter().map(|name| name.to_string()).collect()
}

fn summary(name: &str, ran: bool) -> PassSummary {
    PassSummary {
        name: name.to_string(),
        ran,
    }
}

#[test]
fn passes_run_in_order() {
    let config = RxConfig::default();
    let response = run_transform(
        "/(?:[aab])(?:x)y/",
        None,
        &names(&["strip-chars", "ungroup", "dedupe-class"]),
        Some("y"),
        &config,
    )
    .unwrap();
    assert_eq!(response.status, "ok");
    assert_eq!(response.output, "/[ab]x/");
    assert!(response.changed);
    assert_eq!(
        response.passes,
        vec![
            summary("strip-chars", true),
            summary("ungroup", true),
            summary("dedupe-class", true),
        ]
    );
}

#[test]
fn strip_then_ungroup_collapses_emptied_groups() {
    let config = RxConfig::default();
    let response = run_transform(
        "/(?:ab)c/",
        None,
        &names(&["strip-chars", "ungroup"]),
        Some("a"),
        &config,
    )
    .unwrap();
    assert_eq!(response.output, "/bc/");
}

#[test]
fn configured_defaults_apply() {
    let config = RxConfig {
        passes: names(&["strip-chars"]),
        strip: "-".to_string(),
        ..RxConfig::default()
    };
    let response = run_transform("/a-b/", None, &[], None, &config).unwrap();
    assert_eq!(response.output, "/ab/");
    assert_eq!(response.passes, vec![summary("strip-chars", true)]);
}

#[test]
fn unchanged_output_is_reported() {
    let config = RxConfig::default();
    let response = run_transform("/abc/", None, &[], None, &config).unwrap();
    assert_eq!(response.output, "/abc/");
    assert!(!response.changed);
    assert_eq!(
        response.passes,
        vec![summary("ungroup", true), summary("dedupe-class", true)]
    );
}

#[test]
fn unknown_pass_is_invalid_arguments() {
    let config = RxConfig::default();
    let err = run_transform("/a/", None, &names(&["nope"]), None, &config).unwrap_err();
    assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
    assert_eq!(err.error_code().code(), 2);
}

#[test]
fn syntax_errors_carry_offset() {
    let config = RxConfig::default();
    let err = run_parse("/a[b/", None, &config).unwrap_err();
    assert_eq!(err.error_code(), OutputErrorCode::SyntaxError);
    assert!(matches!(err, RxError::Syntax { .. }));
}

#[test]
fn parse_emits_typed_tree() {
    let config = RxConfig::default();
    let response = run_parse("/a|b/i", None, &config).unwrap();
    assert_eq!(response.ast["type"], "RegExp");
    assert_eq!(response.ast["flags"], "i");
    assert_eq!(response.ast["body"]["type"], "Disjunction");
    assert_eq!(
        response.ast["body"]["alternatives"][1]["expressions"][0]["value"],
        "b"
    );
}

#[test]
fn project_config_feeds_transform() {
    let dir = TempDir::new().unwrap();
    let path = Config::project_path(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "[rxtree]\npasses = [\"strip-chars\"]\nstrip = \"z\"\nflags = \"g\"\n",
    )
    .unwrap();

    let config = Config::load_from_project(dir.path()).unwrap();
    let response = run_transform("azb", None, &[], None, &config.rxtree).unwrap();
    assert_eq!(response.output, "/ab/g");
}

#[test]
fn stripped_output_reparses_to_the_same_terms() {
    let config = RxConfig::default();
    for pattern in [r"/(a)\1b0/", "/a{b2}/"] {
        let response =
            run_transform(pattern, None, &names(&["strip-chars"]), Some("b"), &config).unwrap();
        assert_eq!(response.output, pattern);
        assert!(!response.changed);
    }
}
