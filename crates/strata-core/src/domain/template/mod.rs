//! Payload template engine.
//!
//! ## Syntax
//!
//! ```text
//! {{ name }}                      substitute a binding
//! {{ name | snake_case | upper }} pipe through helpers, left to right
//! {% if flag %}..{% else %}..{% endif %}
//! {% if not flag %}..{% endif %}
//! {# comment #}
//! {% raw %}{{ literal }}{% endraw %}
//! ```
//!
//! A block or comment tag alone on its line removes the whole line, so
//! conditionals do not leave blank lines behind.
//!
//! The helper table is an immutable value owned by a [`TemplateEngine`].
//! Build one engine per generation run; nothing is registered globally.

mod parser;

use std::collections::BTreeMap;

use crate::domain::{
    case,
    entities::binding::{BindingContext, Value},
    error::DomainError,
};

use parser::Node;

pub type HelperFn = fn(&str) -> String;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Named pure string transforms callable from templates.
#[derive(Debug, Clone)]
pub struct Helpers {
    table: BTreeMap<&'static str, HelperFn>,
}

impl Helpers {
    /// Case converters plus `upper` / `lower`.
    pub fn standard() -> Self {
        let table: BTreeMap<&'static str, HelperFn> = BTreeMap::from([
            ("pascal_case", case::to_pascal_case as HelperFn),
            ("camel_case", case::to_camel_case),
            ("snake_case", case::to_snake_case),
            ("kebab_case", case::to_kebab_case),
            ("upper", upper),
            ("lower", lower),
        ]);
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<HelperFn> {
        self.table.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

impl Default for Helpers {
    fn default() -> Self {
        Self::standard()
    }
}

fn upper(s: &str) -> String {
    s.to_uppercase()
}

fn lower(s: &str) -> String {
    s.to_lowercase()
}

// ── Template ─────────────────────────────────────────────────────────────────

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    /// Render against `context`.
    ///
    /// Only the taken branch of a conditional is evaluated, so bindings
    /// referenced inside an untaken branch need not exist.
    pub fn render(&self, helpers: &Helpers, context: &BindingContext) -> Result<String, DomainError> {
        let mut out = String::new();
        render_nodes(&self.nodes, helpers, context, &mut out)?;
        Ok(out)
    }
}

fn lookup<'c>(context: &'c BindingContext, name: &str) -> Result<&'c Value, DomainError> {
    context.get(name).ok_or_else(|| DomainError::UnboundVariable {
        name: name.to_string(),
    })
}

fn render_nodes(
    nodes: &[Node],
    helpers: &Helpers,
    context: &BindingContext,
    out: &mut String,
) -> Result<(), DomainError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Expr {
                name,
                helpers: pipeline,
                ..
            } => {
                let mut value = lookup(context, name)?.to_string();
                for helper in pipeline {
                    let apply = helpers.get(helper).ok_or_else(|| DomainError::UnknownHelper {
                        name: helper.clone(),
                    })?;
                    value = apply(&value);
                }
                out.push_str(&value);
            }
            Node::If {
                name,
                negated,
                then,
                otherwise,
                ..
            } => {
                let taken = lookup(context, name)?.is_truthy() != *negated;
                let branch = if taken { then } else { otherwise };
                render_nodes(branch, helpers, context, out)?;
            }
        }
    }
    Ok(())
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Parser + helper table for one generation run.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    helpers: Helpers,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self {
            helpers: Helpers::standard(),
        }
    }

    pub fn helpers(&self) -> &Helpers {
        &self.helpers
    }

    /// Parse and render in one call.
    pub fn render(&self, source: &str, context: &BindingContext) -> Result<String, DomainError> {
        Template::parse(source)?.render(&self.helpers, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BindingContext {
        BindingContext::new()
            .with_str("project_name", "shop-api")
            .with_str("module_path", "github.com/acme/shop-api")
            .with_str("empty", "")
            .with_bool("use_cache", true)
            .with_bool("use_docker", false)
    }

    fn render(src: &str) -> Result<String, DomainError> {
        TemplateEngine::new().render(src, &ctx())
    }

    #[test]
    fn text_without_tags_is_unchanged() {
        let src = "package main\n\nfunc main() { println(\"hi\") }\n";
        assert_eq!(render(src).unwrap(), src);
    }

    #[test]
    fn substitutes_values() {
        assert_eq!(render("module {{ module_path }}").unwrap(), "module github.com/acme/shop-api");
        assert_eq!(render("{{use_cache}}/{{ use_docker }}").unwrap(), "true/false");
    }

    #[test]
    fn applies_helpers_left_to_right() {
        assert_eq!(render("{{ project_name | pascal_case }}").unwrap(), "ShopApi");
        assert_eq!(render("{{ project_name | camel_case }}").unwrap(), "shopApi");
        assert_eq!(render("{{ project_name | snake_case | upper }}").unwrap(), "SHOP_API");
        assert_eq!(render("{{ project_name | upper | kebab_case }}").unwrap(), "s-h-o-p-a-p-i");
    }

    #[test]
    fn conditional_blocks() {
        let src = "a\n{% if use_cache %}\ncache\n{% else %}\nnone\n{% endif %}\nb\n";
        assert_eq!(render(src).unwrap(), "a\ncache\nb\n");

        let src = "{% if not use_docker %}no docker{% endif %}";
        assert_eq!(render(src).unwrap(), "no docker");
    }

    #[test]
    fn string_truthiness() {
        assert_eq!(render("{% if empty %}x{% else %}y{% endif %}").unwrap(), "y");
        assert_eq!(render("{% if project_name %}x{% endif %}").unwrap(), "x");
    }

    #[test]
    fn untaken_branch_may_reference_unknown_names() {
        assert_eq!(render("{% if use_docker %}{{ missing }}{% endif %}ok").unwrap(), "ok");
    }

    #[test]
    fn unbound_variable_is_reported() {
        assert_eq!(
            render("{{ nope }}").unwrap_err(),
            DomainError::UnboundVariable { name: "nope".into() }
        );
        assert_eq!(
            render("{% if nope %}{% endif %}").unwrap_err(),
            DomainError::UnboundVariable { name: "nope".into() }
        );
    }

    #[test]
    fn unknown_helper_is_reported() {
        assert_eq!(
            render("{{ project_name | shout }}").unwrap_err(),
            DomainError::UnknownHelper { name: "shout".into() }
        );
    }

    #[test]
    fn syntax_errors_are_template_errors() {
        let err = render("{{ project_name").unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn rendering_is_deterministic() {
        let template = Template::parse("{{ project_name }}-{% if use_cache %}c{% endif %}").unwrap();
        let helpers = Helpers::standard();
        let first = template.render(&helpers, &ctx()).unwrap();
        for _ in 0..10 {
            assert_eq!(template.render(&helpers, &ctx()).unwrap(), first);
        }
    }

    #[test]
    fn standard_helper_names() {
        let names: Vec<_> = Helpers::standard().names().collect();
        assert_eq!(
            names,
            vec!["camel_case", "kebab_case", "lower", "pascal_case", "snake_case", "upper"]
        );
    }
}
