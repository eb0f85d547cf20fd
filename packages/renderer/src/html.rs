use crate::renderer::RenderedPage;
use pagecraft_common::{CssRule, VNode};

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    pub lang: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            lang: "en".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a rendered page as a standalone HTML document
pub fn to_html(page: &RenderedPage, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line(&format!("<html lang=\"{}\">", escape_html(&options.lang)));
    ctx.indent();

    write_head(page, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    write_node(&page.root, &mut ctx);
    if let Some(code) = page.body_code.as_deref().filter(|code| !code.trim().is_empty()) {
        write_raw(code, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

/// Serialize one node subtree, e.g. a canvas preview
pub fn to_html_fragment(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

fn write_head(page: &RenderedPage, ctx: &mut Context<'_>) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&page.title)));
    if let Some(description) = &page.description {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        ));
    }
    if !page.keywords.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"keywords\" content=\"{}\">",
            escape_html(&page.keywords.join(", "))
        ));
    }
    if let Some(image) = &page.og_image {
        ctx.add_line(&format!(
            "<meta property=\"og:image\" content=\"{}\">",
            escape_html(image)
        ));
    }
    if page.no_index {
        ctx.add_line("<meta name=\"robots\" content=\"noindex\">");
    }

    if !page.styles.is_empty() {
        ctx.add_line("<style>");
        ctx.indent();
        write_raw(&render_css(&page.styles), ctx);
        ctx.dedent();
        ctx.add_line("</style>");
    }

    if let Some(code) = page.head_code.as_deref().filter(|code| !code.trim().is_empty()) {
        write_raw(code, ctx);
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Trusted markup or CSS, re-indented line by line
fn write_raw(text: &str, ctx: &mut Context<'_>) {
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        ctx.add_line(line.trim_end());
    }
}

fn write_node(node: &VNode, ctx: &mut Context<'_>) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                if value.is_empty() {
                    ctx.add(&format!(" {}", name));
                } else {
                    ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
            }

            if !styles.is_empty() {
                let inline = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<_>>()
                    .join("; ");
                ctx.add(&format!(" style=\"{}\"", escape_html(&inline)));
            }

            if is_void(tag) {
                ctx.add(">");
                ctx.newline();
                return;
            }

            ctx.add(">");

            // Text-only children stay on the tag's line
            if children.iter().all(|child| matches!(child, VNode::Text { .. })) {
                for child in children {
                    if let VNode::Text { content } = child {
                        ctx.add(&escape_html(content));
                    }
                }
                ctx.add(&format!("</{}>", tag));
                ctx.newline();
                return;
            }

            ctx.newline();
            ctx.indent();
            for child in children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }

        VNode::Text { content } => ctx.add_line(&escape_html(content)),

        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")));
        }
    }
}

/// CSS text for a rule list; rules sharing a media query are grouped in one block
pub fn render_css(rules: &[CssRule]) -> String {
    let mut out = String::new();
    let mut media: Vec<(&str, Vec<&CssRule>)> = Vec::new();

    for rule in rules {
        match rule.media_query.as_deref() {
            None => write_rule(rule, "", &mut out),
            Some(query) => match media.iter_mut().find(|(q, _)| *q == query) {
                Some((_, group)) => group.push(rule),
                None => media.push((query, vec![rule])),
            },
        }
    }

    for (query, group) in media {
        out.push_str(&format!("@media {} {{\n", query));
        for rule in group {
            write_rule(rule, "  ", &mut out);
        }
        out.push_str("}\n");
    }
    out
}

fn write_rule(rule: &CssRule, indent: &str, out: &mut String) {
    if rule.properties.is_empty() {
        return;
    }
    out.push_str(&format!("{}{} {{\n", indent, rule.selector));
    for (name, value) in &rule.properties {
        out.push_str(&format!("{}  {}: {};\n", indent, name, value));
    }
    out.push_str(&format!("{}}}\n", indent));
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "track" | "wbr"
    )
}
