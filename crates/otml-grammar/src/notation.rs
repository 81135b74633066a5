//! Bracketed constraint-set notation.
//!
//! ```text
//! Faith[] >> Max[[+cons]] >> Phonotactic[[+stop, -voice][+syll]]
//! ```
//!
//! Constraints are listed highest ranked first and separated by ` >> `. Each
//! term is a variant name followed by one outer pair of brackets holding the
//! feature bundles. The rendering of a `ConstraintSet` reads back through
//! [`parse_notation`], with or without its `Constraint Set (...): ` prefix.

use otml_core::{BundleSpec, ConstraintSpec};

use crate::error::{GrammarError, Result};

/// Separator between constraints, in descending rank.
pub const CONSTRAINTS_DELIMITER: &str = " >> ";

const DISPLAY_PREFIX: &str = "Constraint Set (";

/// Parses a whole constraint set into its specifications.
///
/// # Errors
///
/// [`GrammarError::Parse`] when the text is empty or a term is not of the
/// form `Name[...]`. Variant names, features and signs are not checked here;
/// that happens when the specifications are bound to a feature table.
pub fn parse_notation(text: &str) -> Result<Vec<ConstraintSpec>> {
    let text = strip_display_prefix(text.trim());
    if text.is_empty() {
        return Err(GrammarError::Parse("empty constraint set".to_string()));
    }
    text.split(CONSTRAINTS_DELIMITER.trim())
        .map(|term| parse_constraint(term.trim()))
        .collect()
}

/// Parses one `Name[...]` term.
pub fn parse_constraint(term: &str) -> Result<ConstraintSpec> {
    let open = term
        .find('[')
        .ok_or_else(|| GrammarError::Parse(format!("missing bundle list in '{term}'")))?;
    let (name, bundle_list) = term.split_at(open);
    let bundles = parse_bundle_list(bundle_list.trim())
        .map_err(|e| GrammarError::Parse(format!("{e} in '{term}'")))?;
    Ok(ConstraintSpec::new(name.trim(), bundles))
}

// `[]`, `[[..][..]]`, or a bare single bundle `[+cons, -voice]`.
fn parse_bundle_list(text: &str) -> std::result::Result<Vec<BundleSpec>, String> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| "unbalanced brackets".to_string())?
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }
    if !inner.starts_with('[') {
        return Ok(vec![parse_bundle(inner)?]);
    }

    let mut bundles = Vec::new();
    let mut rest = inner;
    while !rest.is_empty() {
        let body = rest
            .strip_prefix('[')
            .ok_or_else(|| format!("unexpected '{rest}'"))?;
        let close = body
            .find(']')
            .ok_or_else(|| "unterminated bundle".to_string())?;
        let content = &body[..close];
        if content.contains('[') {
            return Err("nested bundle".to_string());
        }
        bundles.push(parse_bundle(content)?);
        rest = body[close + 1..].trim_start();
    }
    Ok(bundles)
}

fn parse_bundle(text: &str) -> std::result::Result<BundleSpec, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(BundleSpec::default());
    }
    text.split(',')
        .map(|token| {
            let token = token.trim();
            let mut chars = token.chars();
            let sign = chars
                .next()
                .ok_or_else(|| "empty feature token".to_string())?;
            let feature = chars.as_str().trim();
            if feature.is_empty() {
                return Err(format!("missing feature name after '{sign}'"));
            }
            Ok((feature.to_string(), sign.to_string()))
        })
        .collect::<std::result::Result<Vec<_>, String>>()
        .map(BundleSpec)
}

fn strip_display_prefix(text: &str) -> &str {
    if !text.starts_with(DISPLAY_PREFIX) {
        return text;
    }
    match text.find("): ") {
        Some(end) => text[end + 3..].trim_start(),
        None => text,
    }
}

/// Renders specifications in bracketed notation.
pub fn to_notation(specs: &[ConstraintSpec]) -> String {
    specs
        .iter()
        .map(render_constraint)
        .collect::<Vec<_>>()
        .join(CONSTRAINTS_DELIMITER)
}

fn render_constraint(spec: &ConstraintSpec) -> String {
    let mut out = spec.kind.clone();
    out.push('[');
    for bundle in &spec.bundles {
        out.push('[');
        let tokens: Vec<String> = bundle
            .iter()
            .map(|(feature, sign)| format!("{sign}{feature}"))
            .collect();
        out.push_str(&tokens.join(", "));
        out.push(']');
    }
    out.push(']');
    out
}
