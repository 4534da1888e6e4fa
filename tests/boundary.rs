//! Boundary cases (§8/§14).


use harness::{run, run_with};
use llmd::CompilerConfig;

#[test]
fn empty_input_is_empty_output() {
    assert_eq!(run(""), "");
}

#[test]
fn heading_only_input_is_a_single_scope_line() {
    let out = run("## Getting Started");
    assert_eq!(out, "@getting_started\n");
}

#[test]
fn fenced_block_at_position_zero_with_no_heading() {
    let out = run("```yaml\nkey: value\n```");
    assert_eq!(out, "@root\n::yaml\n<<<\nkey: value\n>>>\n");
}

#[test]
fn two_column_property_table_with_single_data_row() {
    let input = "| Name | Color |\n|------|-------|\n| flm-badge | red |";
    let out = run(input);
    assert!(out.contains("badge=red"));
}

#[test]
fn heading_that_normalizes_to_empty_emits_bare_scope() {
    let out = run("## !!!");
    assert!(out.starts_with("@\n") || out == "@\n");
}

#[test]
fn whitespace_and_thematic_breaks_collapse_to_empty_output() {
    let out = run("---\n\n***\n\n   \n");
    assert_eq!(out, "");
}

#[test]
fn compression_zero_preserves_raw_kv_lines() {
    let cfg = CompilerConfig { compression: 0, ..Default::default() };
    let out = run_with("Rate limit: 1000 requests per minute.", &cfg);
    assert!(out.contains(":rate_limit=1000 requests per minute."));
}
