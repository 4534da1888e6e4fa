//! Universal invariants (§8/§14), checked across a handful of representative
//! documents rather than as a full property-based generator.


use harness::run;
use llmd::CompilerConfig;
use test_case::test_case;

const DOCS: &[&str] = &[
    "",
    "## Heading only",
    "## Authentication\nSome prose.\n- one\n- two\nRate limit: 1000 requests per minute.",
    "```rust\nfn main() {}\n```",
    "```\nunterminated fence\nstill going",
    "| A | B |\n|---|---|\n| x | y |\n| z | w |",
    "plain paragraph with no structure at all",
    "## A\ntext\n### B\ntext\n## C\ntext",
];

#[test_case(DOCS[0]; "empty")]
#[test_case(DOCS[1]; "heading_only")]
#[test_case(DOCS[2]; "authentication")]
#[test_case(DOCS[3]; "fenced_block")]
#[test_case(DOCS[4]; "unterminated_fence")]
#[test_case(DOCS[5]; "table")]
#[test_case(DOCS[6]; "plain_paragraph")]
#[test_case(DOCS[7]; "heading_descent")]
fn output_is_lf_terminated_with_no_cr(input: &str) {
    let out = run(input);
    assert!(!out.contains('\r'));
    if !out.is_empty() {
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }
}

#[test_case(DOCS[3]; "fenced_block")]
#[test_case(DOCS[4]; "unterminated_fence")]
fn block_delimiters_alternate_and_are_preceded_by_a_header(input: &str) {
    let out = run(input);
    let lines: Vec<&str> = out.lines().collect();
    let open_count = lines.iter().filter(|l| **l == "<<<").count();
    let close_count = lines.iter().filter(|l| **l == ">>>").count();
    assert_eq!(open_count, close_count);

    let mut expect_open = true;
    for line in &lines {
        if *line == "<<<" {
            assert!(expect_open, "saw <<< while already inside a block");
            expect_open = false;
        } else if *line == ">>>" {
            assert!(!expect_open, "saw >>> while not inside a block");
            expect_open = true;
        }
    }
    assert!(expect_open, "block left unclosed");

    for (i, line) in lines.iter().enumerate() {
        if *line == "<<<" {
            assert!(i > 0 && lines[i - 1].starts_with("::"), "<<< not preceded by a :: header");
        }
    }
}

#[test]
fn unterminated_trailing_fence_still_produces_one_block() {
    let out = run("```\nline one\nline two");
    assert_eq!(out.matches("<<<").count(), 1);
    assert_eq!(out.matches(">>>").count(), 1);
    assert!(out.contains("line one"));
    assert!(out.contains("line two"));
}

#[test_case(DOCS[2]; "authentication")]
#[test_case(DOCS[5]; "table")]
#[test_case(DOCS[6]; "plain_paragraph")]
fn scoped_lines_are_preceded_by_a_scope(input: &str) {
    let out = run(input);
    let mut seen_scope = false;
    let mut in_payload = false;
    for line in out.lines() {
        if line == "<<<" {
            in_payload = true;
            continue;
        }
        if line == ">>>" {
            in_payload = false;
            continue;
        }
        if in_payload {
            continue;
        }
        if line.starts_with('@') {
            seen_scope = true;
            continue;
        }
        if line.starts_with("::") {
            continue;
        }
        assert!(seen_scope, "content line {line:?} appeared before any scope");
    }
}

#[test_case(DOCS[2]; "authentication")]
#[test_case(DOCS[3]; "fenced_block")]
#[test_case(DOCS[5]; "table")]
#[test_case(DOCS[6]; "plain_paragraph")]
#[test_case(DOCS[7]; "heading_descent")]
fn compilation_is_deterministic(input: &str) {
    let cfg = CompilerConfig::default();
    assert_eq!(run(input), llmd::compile(input, &cfg));
}

#[test]
fn no_headings_and_no_content_produces_empty_output() {
    assert_eq!(run(""), "");
    assert_eq!(run("---\n\n   \n"), "");
}

#[test]
fn prefix_marker_keys_recover_the_original_full_key() {
    let input = "## Text Styles\n\
| Class | Effect |\n\
|-------|--------|\n\
| flm-text--secondary | a |\n\
| flm-text--disabled | b |\n\
| flm-text--error | c |";
    let out = run(input);
    let pfx_line = out.lines().find(|l| l.starts_with(":_pfx=")).expect("expected a _pfx line");
    let prefix = pfx_line.strip_prefix(":_pfx=").unwrap();
    for suffix in ["secondary", "disabled", "error"] {
        let full_key = format!("{prefix}{suffix}");
        assert!(out.contains(&full_key) || out.lines().any(|l| l.contains(&format!("{suffix}="))));
    }
}

#[test]
fn c2_output_does_not_contain_phrase_map_sources() {
    let out = run("This feature is used to reduce tokens, due to verbosity, as well as improve clarity.");
    assert!(!out.to_lowercase().contains("is used to"));
    assert!(!out.to_lowercase().contains("due to"));
    assert!(!out.to_lowercase().contains("as well as"));
}

#[test]
fn c2_output_does_not_contain_standalone_unit_phrases() {
    let out = run("Timeout: 30 seconds\nLatency budget: 200 milliseconds");
    assert!(!out.to_lowercase().contains("seconds"));
    assert!(!out.to_lowercase().contains("milliseconds"));
}
