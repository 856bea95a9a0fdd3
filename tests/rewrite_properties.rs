//! Property-based tests for the rewrite pass
//!
//! These tests verify invariants that should hold for all inputs:
//! - A second pass never changes the output of the first
//! - Sources without a `params` signature come back byte-identical
//! - The extraction binds exactly the declared fields, in order
//! - `Promise<...>` wraps the object type exactly once

use params_migrate::config::RewriteConfig;
use params_migrate::rewrite::transform_source;
use proptest::prelude::*;

const RESERVED: &[&str] = &[
    "params", "await", "async", "function", "const", "try", "readonly", "Promise",
];

/// Generate a lowercase identifier that is not a reserved word
fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_filter("not reserved", |s| !RESERVED.contains(&s.as_str()))
}

fn field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field_name(), 1..5)
}

fn handler(names: &[String], wrapped: bool, separator: &str, body: &[String]) -> String {
    let fields = names
        .iter()
        .map(|n| format!("{}: string", n))
        .collect::<Vec<_>>()
        .join(separator);
    let object = format!("{{ {} }}", fields);
    let annotation = if wrapped {
        format!("Promise<{}>", object)
    } else {
        object
    };

    let mut source = format!(
        "export async function GET(req, {{ params }}: {{ params: {} }}) {{\n  try {{\n",
        annotation
    );
    for line in body {
        source.push_str(&format!("    const {} = 1\n", line));
    }
    source.push_str("  } catch (error) {\n    return fail()\n  }\n}\n");
    source
}

proptest! {
    #[test]
    fn prop_second_pass_is_a_no_op(
        names in field_names(),
        wrapped in any::<bool>(),
        separator in prop_oneof![Just("; "), Just(", ")],
        body in prop::collection::vec(field_name(), 0..6),
    ) {
        let config = RewriteConfig::default();
        let source = handler(&names, wrapped, separator, &body);

        let (once, _) = transform_source(&source, &config);
        let (twice, outcome) = transform_source(&once, &config);

        prop_assert_eq!(&twice, &once);
        prop_assert!(!outcome.changed);
        prop_assert_eq!(once.matches("await params").count(), 1);
        prop_assert_eq!(once.matches("Promise<").count(), 1);
    }

    #[test]
    fn prop_extraction_binds_declared_names_in_order(
        names in field_names(),
        separator in prop_oneof![Just("; "), Just(", ")],
    ) {
        let source = handler(&names, false, separator, &[]);
        let (output, outcome) = transform_source(&source, &RewriteConfig::default());

        let expected = format!("    const {{ {} }} = await params\n", names.join(", "));
        prop_assert!(outcome.changed);
        prop_assert!(output.contains(&expected));
    }

    #[test]
    fn prop_sources_without_params_signature_are_untouched(
        lines in prop::collection::vec("[ -~]{0,60}", 0..20),
        crlf in any::<bool>(),
    ) {
        let newline = if crlf { "\r\n" } else { "\n" };
        let source = lines
            .iter()
            .filter(|line| !line.contains("params"))
            .cloned()
            .collect::<Vec<_>>()
            .join(newline);

        let (output, outcome) = transform_source(&source, &RewriteConfig::default());

        prop_assert_eq!(output, source);
        prop_assert!(!outcome.changed);
    }
}
