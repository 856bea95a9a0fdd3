//! Placement of the `const { ... } = await params` extraction statement.

use super::matcher::{ParameterSet, SignatureSite};
use super::scanner::{is_comment_line, Cursor};
use super::source::RouteFile;
use crate::config::RewriteConfig;

/// Where an extraction statement goes and how it is indented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPoint {
    /// Line index the statement will occupy, directly after `try {`
    pub index: usize,
    pub indent: String,
}

/// Finds the `try {` line that opens the function's executable block.
///
/// Blank and comment-only lines between the declaration and the block are
/// skipped, at most `block_lookahead` lines are examined, and the first
/// line with code must be the block opener. Anything else means no
/// injection.
pub fn locate_injection_point(
    file: &RouteFile,
    site: &SignatureSite,
    config: &RewriteConfig,
) -> Option<InjectionPoint> {
    let first = site.line + 1;
    let last = first.saturating_add(config.block_lookahead).min(file.len());

    let (index, text) = (first..last)
        .filter_map(|index| file.line(index).map(|text| (index, text)))
        .find(|(_, text)| !text.trim().is_empty() && !is_comment_line(text))?;

    if !opens_try_block(text) {
        log::debug!(
            "{}:{}: first statement is not `try {{`, skipping injection",
            file.path().display(),
            index + 1
        );
        return None;
    }

    let indent: String = text
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    Some(InjectionPoint {
        index: index + 1,
        indent: indent + &config.indent_unit,
    })
}

/// `try {` as the leading code on a line, any spacing allowed.
fn opens_try_block(text: &str) -> bool {
    let mut cursor = Cursor::new(text, 0);
    cursor.eat_word("try") && cursor.eat("{")
}

/// Renders the statement that binds every name of `params`.
pub fn extraction_statement(point: &InjectionPoint, params: &ParameterSet) -> String {
    format!(
        "{}const {{ {} }} = await params",
        point.indent,
        params.names().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::matcher::find_signature_sites;

    fn plan(source: &str) -> Option<InjectionPoint> {
        let file = RouteFile::parse("route.ts", source);
        let sites = find_signature_sites(&file);
        locate_injection_point(&file, &sites[0], &RewriteConfig::default())
    }

    const SIGNATURE: &str =
        "async function GET(req, { params }: { params: Promise<{ id: string }> }) {\n";

    #[test]
    fn test_point_follows_try_line() {
        let point = plan(&format!("{SIGNATURE}  try {{\n    work()\n  }} catch {{}}\n}}\n"));

        assert_eq!(
            point,
            Some(InjectionPoint {
                index: 2,
                indent: "    ".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let point = plan(&format!("{SIGNATURE}\n  // load the order\n  try {{\n"));

        assert_eq!(point.map(|p| p.index), Some(4));
    }

    #[test]
    fn test_other_statement_first_blocks_injection() {
        let point = plan(&format!("{SIGNATURE}  const session = await auth()\n  try {{\n"));

        assert_eq!(point, None);
    }

    #[test]
    fn test_try_beyond_lookahead_is_not_found() {
        let point = plan(&format!("{SIGNATURE}\n\n\n\n  try {{\n"));

        assert_eq!(point, None);
    }

    #[test]
    fn test_indent_derived_from_try_line() {
        let point = plan(&format!("{SIGNATURE}\ttry{{\n")).expect("try without space");

        assert_eq!(point.indent, "\t  ");
    }

    #[test]
    fn test_try_at_end_of_file_without_body() {
        let point = plan(&format!("{SIGNATURE}  try {{"));

        assert_eq!(point.map(|p| p.index), Some(2));
    }

    #[test]
    fn test_extraction_statement_lists_names_in_order() {
        let point = InjectionPoint {
            index: 2,
            indent: "    ".to_string(),
        };
        let params = ParameterSet::new(vec!["slug".to_string(), "locale".to_string()]);

        assert_eq!(
            extraction_statement(&point, &params),
            "    const { slug, locale } = await params"
        );
    }
}
