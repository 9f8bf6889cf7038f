//! Legacy tool-page extraction.
//!
//! Tool pages that have not been ported to in-app modules still ship as
//! standalone HTML documents. This module pulls out the pieces the shell
//! needs: the primary content region, the scripts in document order, and
//! the function names referenced by inline `onclick` handlers. It is a
//! compatibility shim private to the loader; once every tool is a
//! `ToolModule` it can be deleted wholesale.

/// A script found in a legacy document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawScript {
    /// `<script src="...">` - `src` is as written, possibly relative.
    External { src: String },

    /// Inline `<script>` block.
    Inline { source: String },
}

/// The pieces of a legacy tool document the shell re-hosts.
#[derive(Debug, Clone)]
pub struct LegacyDocument {
    /// Inner markup of the primary content region.
    pub content: String,

    /// Every script in the document, in source order.
    pub scripts: Vec<RawScript>,

    /// Function names referenced by `onclick` attributes in the content.
    pub handler_names: Vec<String>,
}

/// Extract the re-hostable pieces of a legacy tool document.
///
/// The primary region is `<main>`, else the first `container`-classed
/// `<div>`, else `<body>`, else the whole input.
pub fn extract(html: &str) -> LegacyDocument {
    let content = primary_region(html);
    let scripts = collect_scripts(html);
    let handler_names = collect_handler_names(&content);

    LegacyDocument {
        content,
        scripts,
        handler_names,
    }
}

fn primary_region(html: &str) -> String {
    if let Some(inner) = tag_inner(html, "main") {
        return inner;
    }
    if let Some(inner) = container_div_inner(html) {
        return inner;
    }
    if let Some(inner) = tag_inner(html, "body") {
        return inner;
    }
    html.to_string()
}

/// Inner markup of the first `<tag ...>...</tag>` element, ignoring
/// nesting (fine for `main` and `body`, which appear once).
fn tag_inner(html: &str, tag: &str) -> Option<String> {
    let open = find_tag_open(html, tag)?;
    let content_start = html[open..].find('>')? + open + 1;
    let close = html[content_start..].find(&format!("</{tag}"))? + content_start;
    Some(html[content_start..close].to_string())
}

/// Inner markup of the first `<div class="...container...">`, balancing
/// nested divs.
fn container_div_inner(html: &str) -> Option<String> {
    let lower = html.to_lowercase();
    let mut search_from = 0;

    while let Some(rel) = lower[search_from..].find("<div") {
        let open = search_from + rel;
        let tag_end = lower[open..].find('>')? + open;
        let tag = &lower[open..tag_end];

        if tag.contains("container") {
            let content_start = tag_end + 1;
            let mut depth = 1usize;
            let mut pos = content_start;
            while depth > 0 {
                let next_open = lower[pos..].find("<div");
                let next_close = lower[pos..].find("</div")?;
                match next_open {
                    Some(o) if o < next_close => {
                        depth += 1;
                        pos += o + 4;
                    }
                    _ => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(html[content_start..pos + next_close].to_string());
                        }
                        pos += next_close + 5;
                    }
                }
            }
        }

        search_from = tag_end + 1;
    }

    None
}

fn find_tag_open(html: &str, tag: &str) -> Option<usize> {
    let lower = html.to_lowercase();
    let needle = format!("<{tag}");
    let mut from = 0;
    while let Some(rel) = lower[from..].find(&needle) {
        let pos = from + rel;
        // Reject prefixes like <mainframe>.
        match lower.as_bytes().get(pos + needle.len()) {
            Some(b'>') | Some(b' ') | Some(b'\n') | Some(b'\t') => return Some(pos),
            _ => from = pos + needle.len(),
        }
    }
    None
}

fn collect_scripts(html: &str) -> Vec<RawScript> {
    let lower = html.to_lowercase();
    let mut scripts = Vec::new();
    let mut from = 0;

    while let Some(rel) = lower[from..].find("<script") {
        let open = from + rel;
        let Some(tag_end_rel) = lower[open..].find('>') else {
            break;
        };
        let tag_end = open + tag_end_rel;
        let tag = &html[open..tag_end];

        let Some(close_rel) = lower[tag_end..].find("</script") else {
            break;
        };
        let body_end = tag_end + close_rel;

        if let Some(src) = attribute_value(tag, "src") {
            scripts.push(RawScript::External { src });
        } else {
            let source = html[tag_end + 1..body_end].to_string();
            if !source.trim().is_empty() {
                scripts.push(RawScript::Inline { source });
            }
        }

        from = body_end + "</script".len();
    }

    scripts
}

fn collect_handler_names(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut from = 0;

    while let Some(rel) = content[from..].find("onclick=") {
        let start = from + rel + "onclick=".len();
        let rest = &content[start..];
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            from = start;
            continue;
        };
        let Some(end) = rest[1..].find(quote) else {
            break;
        };
        let handler = &rest[1..end + 1];

        let name: String = handler
            .trim_start()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        let after = handler.trim_start()[name.len()..].trim_start();
        if !name.is_empty()
            && !name.chars().next().is_some_and(|c| c.is_ascii_digit())
            && after.starts_with('(')
            && !names.contains(&name)
        {
            names.push(name);
        }

        from = start + end + 2;
    }

    names
}

fn attribute_value(tag: &str, attribute: &str) -> Option<String> {
    let lower = tag.to_lowercase();
    let pos = lower.find(&format!("{attribute}="))?;
    let rest = &tag[pos + attribute.len() + 1..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let end = rest[1..].find(quote)?;
    Some(rest[1..end + 1].to_string())
}
