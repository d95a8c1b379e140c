use std::collections::HashSet;

/// Renders canned lesson markdown to HTML that is safe to inject.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "h3", "h4", "del", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn headings_lists_and_emphasis_survive() {
        let html = markdown_to_html("### Role\n\n- **Context:** trading\n- *Task*");
        assert!(html.contains("<h3>Role</h3>"));
        assert!(html.contains("<li><strong>Context:</strong> trading</li>"));
        assert!(html.contains("<em>Task</em>"));
    }

    #[test]
    fn links_and_scripts_are_dropped() {
        let html = markdown_to_html("[Link](javascript:alert(1)) <script>x()</script>");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn hard_breaks_render_as_br() {
        let html = markdown_to_html("Best,  \nProject Lead");
        assert!(html.contains("<br"));
        assert_eq!(sanitize_html("<p onclick=\"x\">hi</p>"), "<p>hi</p>");
    }
}
