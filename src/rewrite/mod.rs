//! Detection and rewrite of route handlers that still take `params`
//! synchronously.
//!
//! A single pass per file runs, for every matched declaration:
//!
//! 1. [`matcher`] finds `async function` declarations typed
//!    `{ params }: { params: { ... } }` and extracts the field names
//! 2. [`signature`] wraps a bare object type in `Promise<...>`
//! 3. [`guard`] checks the function body for an existing `await params`
//! 4. [`injection`] places `const { ... } = await params` right after `try {`
//! 5. [`applier`] merges the resulting edits and reports whether the file
//!    changed
//!
//! Running the pass on its own output never changes it again.
//!
//! # Example
//!
//! ```rust
//! use params_migrate::config::RewriteConfig;
//! use params_migrate::rewrite::transform_source;
//!
//! let source = "async function GET(req, { params }: { params: { id: string } }) {\n  try {\n";
//! let (rewritten, outcome) = transform_source(source, &RewriteConfig::default());
//!
//! assert!(outcome.changed);
//! assert_eq!(
//!     rewritten,
//!     "async function GET(req, { params }: { params: Promise<{ id: string }> }) {\n  try {\n    const { id } = await params\n"
//! );
//! ```

pub mod applier;
pub mod guard;
pub mod injection;
pub mod matcher;
pub(crate) mod scanner;
pub mod signature;
pub mod source;

pub use applier::{apply_edits, Edit, TransformationOutcome};
pub use guard::has_existing_extraction;
pub use injection::{extraction_statement, locate_injection_point, InjectionPoint};
pub use matcher::{find_signature_sites, AnnotationShape, ParameterSet, SignatureSite};
pub use signature::rewrite_signature;
pub use source::{RouteFile, SourceLine};

use crate::config::RewriteConfig;

/// What happened to a declaration's type annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeState {
    AlreadyNewShape,
    Rewritten,
}

/// What happened to a declaration's extraction statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionState {
    Injected,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The body already awaits `params`
    AlreadyExtracted,
    /// No `try {` opens the body within the lookahead
    NoBlock,
}

/// Terminal state of one matched declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteReport {
    pub line: usize,
    pub shape: ShapeState,
    pub injection: InjectionState,
}

/// Result of running the pass over one file.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub file: RouteFile,
    pub outcome: TransformationOutcome,
    pub sites: Vec<SiteReport>,
}

/// Runs the full pass over `file` without touching the original.
pub fn transform(file: &RouteFile, config: &RewriteConfig) -> Transformed {
    let mut edits = Vec::new();
    let mut sites = Vec::new();

    for site in find_signature_sites(file) {
        if site.params.is_empty() {
            log::debug!(
                "{}:{}: no field names in params annotation, leaving as is",
                file.path().display(),
                site.line + 1
            );
            continue;
        }

        let shape = match file
            .line(site.line)
            .and_then(|text| rewrite_signature(text, &site))
        {
            Some(text) => {
                edits.push(Edit::ReplaceLine {
                    index: site.line,
                    text,
                });
                ShapeState::Rewritten
            }
            None => ShapeState::AlreadyNewShape,
        };

        let injection = plan_injection(file, &site, config, &mut edits);
        let report = SiteReport {
            line: site.line,
            shape,
            injection,
        };
        log::debug!("{}: {:?}", file.path().display(), report);
        sites.push(report);
    }

    let (file, outcome) = apply_edits(file, edits);
    Transformed {
        file,
        outcome,
        sites,
    }
}

fn plan_injection(
    file: &RouteFile,
    site: &SignatureSite,
    config: &RewriteConfig,
    edits: &mut Vec<Edit>,
) -> InjectionState {
    if has_existing_extraction(file, site) {
        return InjectionState::Skipped(SkipReason::AlreadyExtracted);
    }

    match locate_injection_point(file, site, config) {
        Some(point) => {
            edits.push(Edit::InsertLine {
                index: point.index,
                text: extraction_statement(&point, &site.params),
            });
            InjectionState::Injected
        }
        None => InjectionState::Skipped(SkipReason::NoBlock),
    }
}

/// Convenience wrapper over [`transform`] for in-memory source text.
pub fn transform_source(content: &str, config: &RewriteConfig) -> (String, TransformationOutcome) {
    let file = RouteFile::parse("<memory>", content);
    let transformed = transform(&file, config);
    (transformed.file.render(), transformed.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Transformed {
        transform(&RouteFile::parse("route.ts", source), &RewriteConfig::default())
    }

    #[test]
    fn test_bare_signature_is_rewritten_and_injected() {
        let result = run(
            "async function GET(req, { params }: { params: { id: string } }) {\n  try {\n    return ok()\n  } catch {}\n}\n",
        );

        assert_eq!(
            result.file.render(),
            "async function GET(req, { params }: { params: Promise<{ id: string }> }) {\n  try {\n    const { id } = await params\n    return ok()\n  } catch {}\n}\n"
        );
        assert_eq!(
            result.sites,
            vec![SiteReport {
                line: 0,
                shape: ShapeState::Rewritten,
                injection: InjectionState::Injected,
            }]
        );
        assert_eq!(result.outcome.sites_rewritten, 1);
        assert_eq!(result.outcome.sites_injected, 1);
    }

    #[test]
    fn test_new_shape_without_extraction_gets_injection_only() {
        let result = run(
            "async function GET(req, { params }: { params: Promise<{ id: string }> }) {\n  try {\n  } catch {}\n}\n",
        );

        assert!(result.outcome.changed);
        assert_eq!(result.outcome.sites_rewritten, 0);
        assert_eq!(result.sites[0].shape, ShapeState::AlreadyNewShape);
        assert_eq!(result.sites[0].injection, InjectionState::Injected);
    }

    #[test]
    fn test_missing_try_rewrites_signature_only() {
        let result = run(
            "async function GET(req, { params }: { params: { id: string } }) {\n  return ok(params.id)\n}\n",
        );

        assert!(result.outcome.changed);
        assert_eq!(result.sites[0].shape, ShapeState::Rewritten);
        assert_eq!(
            result.sites[0].injection,
            InjectionState::Skipped(SkipReason::NoBlock)
        );
    }

    #[test]
    fn test_empty_parameter_set_is_a_no_op() {
        let source = "async function GET(req, { params }: { params: {} }) {\n  try {\n  } catch {}\n}\n";
        let result = run(source);

        assert!(!result.outcome.changed);
        assert!(result.sites.is_empty());
        assert_eq!(result.file.render(), source);
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let source = "async function GET(req, { params }: { params: { slug: string; locale: string } }) {\n  try {\n  } catch {}\n}\n";
        let (once, _) = transform_source(source, &RewriteConfig::default());
        let (twice, outcome) = transform_source(&once, &RewriteConfig::default());

        assert_eq!(once, twice);
        assert!(!outcome.changed);
        assert!(once.contains("    const { slug, locale } = await params\n"));
    }
}
