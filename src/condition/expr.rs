//! Boolean match-expression trees and rendering.
//!
//! Condition logic is kept as a small tagged tree; turning a tree into
//! target-syntax text is a separate, swappable rendering pass.

/// A boolean match expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An opaque expression fragment, emitted verbatim.
    Literal(String),
    /// A base expression followed by chained continuations, applied in
    /// order. A literal link continues the expression inline; an OR group
    /// expands to one OR-combinator line per alternative.
    Chain { base: Box<Expr>, links: Vec<Expr> },
    /// Alternatives joined by the renderer's OR combinator. Children may
    /// themselves be chains, to arbitrary depth.
    OrGroup(Vec<Expr>),
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn chain(base: Expr, links: Vec<Expr>) -> Self {
        Expr::Chain {
            base: Box::new(base),
            links,
        }
    }
}

/// Renders an [`Expr`] to text.
///
/// The OR combinator template and the per-level indent are configurable so
/// the same tree can serve different target syntaxes.
#[derive(Debug, Clone)]
pub struct ExprRenderer {
    /// Template wrapping one OR alternative; `{}` is the alternative text.
    pub or_template: String,
    /// One level of indentation for OR-combinator lines.
    pub indent: String,
}

impl Default for ExprRenderer {
    fn default() -> Self {
        Self {
            or_template: ".or({})".to_string(),
            indent: "    ".to_string(),
        }
    }
}

impl ExprRenderer {
    pub fn render(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.render_into(expr, 1, &mut out);
        out
    }

    fn render_into(&self, expr: &Expr, depth: usize, out: &mut String) {
        match expr {
            Expr::Literal(text) => out.push_str(text),
            Expr::Chain { base, links } => {
                self.render_into(base, depth, out);
                for link in links {
                    match link {
                        Expr::OrGroup(children) => {
                            self.render_or_lines(children, depth, out);
                        }
                        other => self.render_into(other, depth, out),
                    }
                }
            }
            Expr::OrGroup(children) => {
                // A bare group renders its first alternative inline and the
                // rest as OR lines.
                let mut children = children.iter();
                if let Some(first) = children.next() {
                    self.render_into(first, depth, out);
                }
                for child in children {
                    self.push_or_line(child, depth, out);
                }
            }
        }
    }

    fn render_or_lines(&self, children: &[Expr], depth: usize, out: &mut String) {
        for child in children {
            self.push_or_line(child, depth, out);
        }
    }

    fn push_or_line(&self, child: &Expr, depth: usize, out: &mut String) {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
        let mut rendered = String::new();
        self.render_into(child, depth + 1, &mut rendered);
        out.push_str(&self.or_template.replacen("{}", &rendered, 1));
    }
}
