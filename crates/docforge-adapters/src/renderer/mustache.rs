//! Mustache rendering on top of Handlebars.
//!
//! Mustache tags are rewritten into Handlebars expressions before rendering:
//!
//! | Mustache            | Handlebars                              |
//! |---------------------|-----------------------------------------|
//! | `{{name}}`          | `{{this.name}}`                         |
//! | `{{ a b }}`         | `{{this.[a b]}}`                        |
//! | `{{.}}`             | `{{this}}`                              |
//! | `{{#name}}..{{/name}}` | `{{#mustache_section this.name}}..`  |
//! | `{{^name}}..{{/name}}` | `{{#mustache_inverted this.name}}..` |
//! | `{{! comment}}`     | dropped                                 |
//!
//! Every variable is a path on `this`, so a key never resolves to a
//! Handlebars helper.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use serde_json::Value;
use tracing::instrument;

use docforge_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    error::{DocforgeError, DocforgeResult},
};

const SECTION_HELPER: &str = "mustache_section";
const INVERTED_HELPER: &str = "mustache_inverted";

/// Renders Mustache templates against a JSON mapping.
///
/// Missing keys render as the empty string and nothing is HTML-escaped.
pub struct MustacheRenderer {
    registry: Handlebars<'static>,
}

impl MustacheRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);
        registry.register_helper(SECTION_HELPER, Box::new(SectionHelper { inverted: false }));
        registry.register_helper(INVERTED_HELPER, Box::new(SectionHelper { inverted: true }));
        Self { registry }
    }
}

impl Default for MustacheRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MustacheRenderer {
    #[instrument(skip_all, fields(len = template.len()))]
    fn render(&self, template: &str, data: &Value) -> DocforgeResult<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        let translated = translate(template)?;
        self.registry
            .render_template(&translated, data)
            .map_err(|e| rendering_failed(e.to_string()))
    }
}

fn rendering_failed(reason: impl Into<String>) -> DocforgeError {
    ApplicationError::RenderingFailed {
        reason: reason.into(),
    }
    .into()
}

// ── section helper ────────────────────────────────────────────────────────────

/// `{{#name}}` / `{{^name}}` semantics: lists iterate, objects become the
/// context, other truthy values render once.
struct SectionHelper {
    inverted: bool,
}

impl HelperDef for SectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(template) = h.template() else {
            return Ok(());
        };
        let value = h
            .param(0)
            .map(|p| p.value().clone())
            .unwrap_or(Value::Null);

        if self.inverted {
            if !is_truthy(&value) {
                template.render(r, ctx, rc, out)?;
            }
            return Ok(());
        }

        match value {
            Value::Array(items) => {
                for item in items {
                    let mut block = BlockContext::new();
                    block.set_base_value(item);
                    rc.push_block(block);
                    template.render(r, ctx, rc, out)?;
                    rc.pop_block();
                }
            }
            Value::Object(_) => {
                let mut block = BlockContext::new();
                block.set_base_value(value);
                rc.push_block(block);
                template.render(r, ctx, rc, out)?;
                rc.pop_block();
            }
            other if is_truthy(&other) => template.render(r, ctx, rc, out)?,
            _ => {}
        }
        Ok(())
    }
}

/// JavaScript truthiness, with empty lists falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// ── translation ───────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Open {
    Section(String),
    Inverted(String),
}

impl Open {
    fn name(&self) -> &str {
        match self {
            Self::Section(n) | Self::Inverted(n) => n,
        }
    }
}

/// Rewrite Mustache tags as Handlebars expressions.
fn translate(template: &str) -> DocforgeResult<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut stack: Vec<Open> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let (inner, consumed) = if let Some(body) = after.strip_prefix('{') {
            let end = body
                .find("}}}")
                .ok_or_else(|| rendering_failed("unclosed '{{{' tag"))?;
            (format!("&{}", &body[..end]), 1 + end + 3)
        } else {
            let end = after
                .find("}}")
                .ok_or_else(|| rendering_failed("unclosed '{{' tag"))?;
            (after[..end].to_string(), end + 2)
        };
        rest = &after[consumed..];

        let tag = inner.trim();
        let (sigil, name) = match tag.chars().next() {
            Some(c @ ('#' | '^' | '/' | '!' | '&' | '>' | '=')) => (Some(c), tag[1..].trim()),
            _ => (None, tag),
        };

        match sigil {
            Some('!') | Some('>') => {}
            Some('=') => return Err(rendering_failed("custom delimiters are not supported")),
            Some('#') => {
                out.push_str(&block_open(SECTION_HELPER, name));
                stack.push(Open::Section(name.to_string()));
            }
            Some('^') => {
                out.push_str(&block_open(INVERTED_HELPER, name));
                stack.push(Open::Inverted(name.to_string()));
            }
            Some('/') => {
                let open = stack
                    .pop()
                    .ok_or_else(|| rendering_failed(format!("unopened section '{name}'")))?;
                if open.name() != name {
                    return Err(rendering_failed(format!(
                        "section '{}' closed by '{name}'",
                        open.name()
                    )));
                }
                let helper = match open {
                    Open::Section(_) => SECTION_HELPER,
                    Open::Inverted(_) => INVERTED_HELPER,
                };
                out.push_str(&format!("{{{{/{helper}}}}}"));
            }
            _ => {
                if let Some(path) = to_path(name) {
                    out.push_str(&format!("{{{{{path}}}}}"));
                }
            }
        }
    }
    out.push_str(rest);

    if let Some(open) = stack.pop() {
        return Err(rendering_failed(format!(
            "unclosed section '{}'",
            open.name()
        )));
    }
    Ok(out)
}

fn block_open(helper: &str, name: &str) -> String {
    let path = to_path(name).unwrap_or_else(|| "this.[]".to_string());
    format!("{{{{#{helper} {path}}}}}")
}

/// Mustache name as a Handlebars path rooted at `this`. `None` for names
/// that cannot be expressed, which render as empty.
fn to_path(name: &str) -> Option<String> {
    if name == "." {
        return Some("this".to_string());
    }
    if name.is_empty() {
        return None;
    }

    let mut path = String::from("this");
    for segment in name.split('.') {
        path.push('.');
        if is_plain_segment(segment) {
            path.push_str(segment);
        } else if !segment.is_empty() && !segment.contains(']') {
            path.push('[');
            path.push_str(segment);
            path.push(']');
        } else {
            return None;
        }
    }
    Some(path)
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.chars().all(|c| c.is_ascii_digit())
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
