//! Rendering and persistence of output units.
//!
//! Each [`RouteBlock`] becomes an `@openapi` documented handler stub; the stubs
//! of one [`OutputUnit`] are joined into a single CommonJS module and written
//! beneath the application's routes tree.

use crate::aggregator::OutputUnit;
use crate::expander::RouteBlock;
use anyhow::{Context, Result};
use heck::ToLowerCamelCase;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders one route block as a documented handler stub.
///
/// # Example
///
/// ```
/// use swagger_routegen::emitter::render_block;
/// use swagger_routegen::expander::RouteBlock;
///
/// let block = RouteBlock {
///     route_path: "/pets".to_string(),
///     param_name: None,
///     method: "get".to_string(),
///     operation_desc: Some("List pets".to_string()),
///     response_desc: Some("OK".to_string()),
///     mime_type: "application/json".to_string(),
///     status_code: "200".to_string(),
/// };
/// let js = render_block(&block);
/// assert!(js.contains("async get (req, res) {"));
/// assert!(js.contains("res.status(200).send();"));
/// ```
pub fn render_block(block: &RouteBlock) -> String {
    let param = block.handler_param().map(js_identifier);
    let route_path = comment_text(&block.route_path);
    let mime_type = comment_text(&block.mime_type);
    let mut out = String::new();

    out.push_str("\n  /**\n   * @openapi\n   *\n");
    out.push_str(&format!("   * {}:\n", route_path));
    out.push_str(&format!("   *   {}:\n", block.method));
    out.push_str(&doc_line("   *     description:", block.operation_desc.as_deref()));

    if let Some(name) = block.handler_param() {
        out.push_str("   *     parameters:\n");
        out.push_str("   *       - in: path\n");
        out.push_str(&format!("   *         name: {}\n", comment_text(name)));
        out.push_str("   *         required: true\n");
        out.push_str("   *         schema:\n");
        out.push_str("   *           type: string\n");
    }

    out.push_str("   *     responses:\n");
    out.push_str(&format!("   *       {}:\n", block.status_code));
    out.push_str(&doc_line("   *         description:", block.response_desc.as_deref()));
    out.push_str("   *         content:\n");
    out.push_str(&format!("   *           {}:\n", mime_type));
    out.push_str("   *             schema:\n");
    out.push_str("   *               type: string\n");
    out.push_str("   *         headers:\n");
    out.push_str("   *           Content-Type:\n");
    out.push_str("   *             schema:\n");
    out.push_str("   *               type: string\n");
    out.push_str(&format!("   *               example: {}\n", mime_type));
    out.push_str("   */\n");

    match &param {
        Some(arg) => out.push_str(&format!("  async {} (req, res, {}) {{\n", block.method, arg)),
        None => out.push_str(&format!("  async {} (req, res) {{\n", block.method)),
    }
    out.push_str(&format!(
        "    res.setHeader('Content-Type', '{}');\n",
        block.mime_type.replace('\'', "\\'")
    ));
    out.push_str(&format!(
        "    res.status({}).send({});\n",
        status_literal(&block.status_code),
        param.as_deref().unwrap_or("")
    ));
    out.push_str("  }");

    out
}

/// Renders a whole output unit as a CommonJS module.
pub fn render_unit(unit: &OutputUnit) -> String {
    let blocks: Vec<String> = unit.blocks.iter().map(render_block).collect();
    format!(
        "'use strict';\n\nmodule.exports = {{\n{}\n}};\n",
        blocks.join(",\n")
    )
}

/// Renders an output unit and writes it to its target path.
///
/// The target directory is created when missing and an existing file is
/// overwritten.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written.
pub fn write_unit(unit: &OutputUnit) -> Result<PathBuf> {
    let path = unit.target_path();
    let content = render_unit(unit);
    write_to_file(&content, &path)
        .with_context(|| format!("Failed to emit resource {}", unit.root_pattern))?;
    Ok(path)
}

/// Writes string content to a file, creating parent directories first.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

fn doc_line(label: &str, text: Option<&str>) -> String {
    match text.map(comment_text).filter(|t| !t.is_empty()) {
        Some(text) => format!("{} {}\n", label, text),
        None => format!("{}\n", label),
    }
}

/// Folds text onto one line and keeps it from closing the comment early.
fn comment_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}

/// `2XX` style ranges send their first code; `default` sends 500.
fn status_literal(code: &str) -> String {
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        return code.to_string();
    }
    match code.chars().next() {
        Some(first @ '1'..='5') if code[1..].eq_ignore_ascii_case("xx") => format!("{}00", first),
        _ => "500".to_string(),
    }
}

fn js_identifier(name: &str) -> String {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        return name.to_string();
    }
    match name.to_lower_camel_case() {
        camel if camel.starts_with(|c: char| c.is_ascii_alphabetic()) => camel,
        camel => format!("_{}", camel),
    }
}
