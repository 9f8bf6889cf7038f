//! Fragment builders for every page component.
//!
//! All functions here are pure over catalog state: same catalog, same
//! params, same markup. Components that take an id tolerate missing
//! catalog entries by delegating to the not-found fragment instead of
//! erroring.

use crate::domains::catalog::{Category, Tool, ToolCatalog};

use super::component::Fragment;

/// Home page: hero, popular tools grid, category grid.
pub fn home_page(catalog: &ToolCatalog) -> Fragment {
    format!(
        r##"<section class="hero-enhanced">
  <div class="container">
    <h1 class="hero-title">Development Station</h1>
    <p class="hero-description">{} free online developer utilities that work offline. No registration, no tracking, completely free.</p>
    <div class="hero-actions">
      <a href="#/tools" class="btn btn-primary btn-lg">Explore Tools</a>
      <a href="#/categories" class="btn btn-outline btn-lg">Browse Categories</a>
    </div>
  </div>
</section>
<section id="popular-tools" class="section">
  <div class="container">
    <h2>Popular Developer Tools</h2>
    <div class="grid grid-4" id="popularToolsGrid">{}</div>
  </div>
</section>
<section id="categories" class="section bg-secondary">
  <div class="container">
    <h2>Tool Categories</h2>
    <div class="grid grid-3" id="categoriesGrid">{}</div>
  </div>
</section>"##,
        catalog.all_tools().len(),
        popular_tools_grid(catalog),
        categories_grid(catalog),
    )
}

/// Tools listing page with category filter buttons.
pub fn tools_page(catalog: &ToolCatalog) -> Fragment {
    format!(
        r#"<div class="container">
  <div class="section-header text-center">
    <h1>All Developer Tools</h1>
  </div>
  <div class="filter-buttons-enhanced" id="toolFilters">{}</div>
  <div class="grid grid-4" id="allToolsGrid">{}</div>
</div>"#,
        filter_buttons(catalog),
        all_tools_grid(catalog),
    )
}

/// Categories listing page.
pub fn categories_page(catalog: &ToolCatalog) -> Fragment {
    format!(
        r#"<div class="container">
  <div class="section-header text-center">
    <h1>Tool Categories</h1>
  </div>
  <div class="grid grid-3" id="categoriesGrid">{}</div>
</div>"#,
        categories_grid(catalog),
    )
}

/// Single-category page. Unknown ids render the not-found fragment.
pub fn category_page(catalog: &ToolCatalog, category_id: &str) -> Fragment {
    let Some(category) = catalog.category_by_id(category_id) else {
        return not_found_page();
    };

    let tools = catalog.tools_by_category(category_id);
    let cards: String = tools.iter().map(|t| tool_card(t)).collect();

    format!(
        r#"<div class="container">
  <div class="section-header text-center">
    <div class="category-icon">{}</div>
    <h1>{}</h1>
    <p class="section-description">{}</p>
    <div class="text-sm text-secondary"><strong>{}</strong> tools in this category</div>
  </div>
  <div class="grid grid-4" id="categoryToolsGrid">{}</div>
</div>"#,
        category.icon,
        category.name,
        category.description,
        tools.len(),
        cards,
    )
}

/// Shell for an individual tool page, wrapping whatever content the
/// module or legacy loader produced.
pub fn tool_page(catalog: &ToolCatalog, tool: &Tool, tool_content: &str) -> Fragment {
    format!(
        r#"<div class="modern-tool-page">
  <section class="tool-hero-section">
    <div class="container">
      <h1 class="tool-hero-title">{}</h1>
      <p class="tool-hero-description">{}</p>
    </div>
  </section>
  <section class="tool-main-section">
    <div class="tool-workspace">{}</div>
  </section>
  <section class="tool-info-section">
    <div class="container">{}</div>
  </section>
</div>"#,
        tool.name,
        tool.description,
        tool_content,
        tool_sidebar(catalog, tool),
    )
}

/// About page.
pub fn about_page(catalog: &ToolCatalog) -> Fragment {
    format!(
        r#"<div class="container">
  <div class="section-header text-center">
    <h1>About Development Station</h1>
    <p class="section-description">Professional developer tools that work offline</p>
  </div>
  <div class="card">
    <h3 class="card-title">Our Mission</h3>
    <p>{} tools across {} categories, all running entirely in your browser. No registration required, no tracking, no hidden costs.</p>
  </div>
</div>"#,
        catalog.all_tools().len(),
        catalog.all_categories().len(),
    )
}

/// 404 fragment, also used by components as the missing-entry fallback.
pub fn not_found_page() -> Fragment {
    r##"<div class="container">
  <div class="text-center">
    <h1>404 - Tool Not Found</h1>
    <p class="section-description">The tool or page you're looking for doesn't exist or has been moved.</p>
    <div class="hero-actions">
      <a href="#/" class="btn btn-primary btn-lg">Go Home</a>
      <a href="#/tools" class="btn btn-outline btn-lg">Browse Tools</a>
    </div>
  </div>
</div>"##
        .to_string()
}

/// Inline fragment shown when a component fails to render. The app stays
/// alive; the user gets a manual reload action.
pub fn render_error_page() -> Fragment {
    r#"<div class="container">
  <div class="error-container text-center">
    <h2>Error Loading Page</h2>
    <p class="text-secondary">Sorry, there was an error loading this page. Please try again.</p>
    <button class="btn btn-primary" onclick="location.reload()">Reload Page</button>
  </div>
</div>"#
        .to_string()
}

/// Placeholder content for a tool whose interface could not be fetched.
pub fn tool_placeholder(tool: &Tool) -> Fragment {
    format!(
        r#"<div class="card">
  <h3 class="card-title">Tool Interface</h3>
  <div class="text-center p-8">
    <div class="loading-spinner"></div>
    <p class="text-secondary">Loading {}...</p>
  </div>
</div>"#,
        tool.name,
    )
}

/// Card markup for one tool, carrying search/filter data attributes.
pub fn tool_card(tool: &Tool) -> Fragment {
    let badge = if tool.popular {
        r#"<div class="popular-badge" title="Popular Tool"></div>"#
    } else {
        ""
    };

    format!(
        r##"<a href="#/tool/{}" class="tool-card-enhanced" data-search="{} {}" data-category="{}">
  <h3 class="card-title">{}</h3>
  <p class="card-description">{}</p>
  {}
</a>"##,
        tool.id,
        tool.name.to_lowercase(),
        tool.description.to_lowercase(),
        tool.category,
        tool.name,
        tool.description,
        badge,
    )
}

/// Card markup for one category.
pub fn category_card(category: &Category) -> Fragment {
    format!(
        r##"<a href="#/category/{}" class="category-card-enhanced">
  <div class="category-icon">{}</div>
  <h3 class="card-title">{}</h3>
  <p class="card-description">{}</p>
  <span class="tool-count">{} tools</span>
</a>"##,
        category.id, category.icon, category.name, category.description, category.count,
    )
}

/// Grid of popular tool cards.
pub fn popular_tools_grid(catalog: &ToolCatalog) -> Fragment {
    catalog
        .popular_tools()
        .iter()
        .map(|t| tool_card(t))
        .collect()
}

/// Grid of every tool card.
pub fn all_tools_grid(catalog: &ToolCatalog) -> Fragment {
    catalog.all_tools().iter().map(tool_card).collect()
}

/// Grid of search results, with a result-count header. Used by the shell's
/// live search on the home and tools pages.
pub fn search_results_grid(catalog: &ToolCatalog, query: &str) -> Fragment {
    let results = catalog.search(query);
    if results.is_empty() {
        return format!(
            r#"<div class="col-span-full text-center p-8">
  <h3>No tools found</h3>
  <p class="text-secondary">No results for "{query}". Try a different search term or browse all tools.</p>
</div>"#
        );
    }

    let plural = if results.len() == 1 { "" } else { "s" };
    let cards: String = results.iter().map(|t| tool_card(t)).collect();
    format!(
        r#"<div class="search-results-header">
  <span class="search-results-count">Found {} result{} for "{}"</span>
</div>
{}"#,
        results.len(),
        plural,
        query,
        cards,
    )
}

fn categories_grid(catalog: &ToolCatalog) -> Fragment {
    catalog.all_categories().iter().map(category_card).collect()
}

fn filter_buttons(catalog: &ToolCatalog) -> Fragment {
    let mut buttons = String::from(
        r#"<button class="filter-btn-enhanced active" data-category="all"><span>All Tools</span></button>"#,
    );
    for category in catalog.all_categories() {
        buttons.push_str(&format!(
            r#"<button class="filter-btn-enhanced" data-category="{}"><span>{}</span></button>"#,
            category.id, category.name,
        ));
    }
    buttons
}

fn tool_sidebar(catalog: &ToolCatalog, tool: &Tool) -> Fragment {
    let related = catalog.related_tools(tool.id, 3);
    if related.is_empty() {
        return String::new();
    }

    let links: String = related
        .iter()
        .map(|t| {
            format!(
                r##"<a href="#/tool/{}" class="related-tool-link"><div class="font-medium">{}</div><div class="text-xs text-secondary">{}</div></a>"##,
                t.id, t.name, t.description,
            )
        })
        .collect();

    format!(
        r#"<div class="card related-tools">
  <h3 class="card-title">Related Tools</h3>
  <div class="space-y-2">{links}</div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_contains_popular_grid() {
        let catalog = ToolCatalog::new();
        let html = home_page(&catalog);
        assert!(html.contains("popularToolsGrid"));
        assert!(html.contains("json-formatter"));
    }

    #[test]
    fn test_cards_and_hero_link_to_hash_paths() {
        let catalog = ToolCatalog::new();
        assert!(home_page(&catalog).contains(r##"href="#/tools""##));
        assert!(not_found_page().contains(r##"href="#/""##));

        let tool = catalog.tool_by_id("json-formatter").unwrap();
        assert!(tool_card(tool).contains(r##"href="#/tool/json-formatter""##));
        let category = catalog.category_by_id("data").unwrap();
        assert!(category_card(category).contains(r##"href="#/category/data""##));
    }

    #[test]
    fn test_category_page_unknown_id_is_not_found() {
        let catalog = ToolCatalog::new();
        let html = category_page(&catalog, "no-such-category");
        assert!(html.contains("404"));
    }

    #[test]
    fn test_category_page_lists_only_its_tools() {
        let catalog = ToolCatalog::new();
        let html = category_page(&catalog, "time");
        assert!(html.contains("unix-timestamp-converter"));
        assert!(!html.contains("#/tool/json-formatter"));
    }

    #[test]
    fn test_tool_card_popular_badge() {
        let catalog = ToolCatalog::new();
        let popular = catalog.tool_by_id("json-formatter").unwrap();
        let plain = catalog.tool_by_id("world-clock").unwrap();
        assert!(tool_card(popular).contains("popular-badge"));
        assert!(!tool_card(plain).contains("popular-badge"));
    }

    #[test]
    fn test_tool_sidebar_excludes_current_tool() {
        let catalog = ToolCatalog::new();
        let tool = catalog.tool_by_id("json-formatter").unwrap();
        let sidebar = tool_sidebar(&catalog, tool);
        assert!(!sidebar.contains("#/tool/json-formatter"));
    }

    #[test]
    fn test_search_results_grid_no_matches() {
        let catalog = ToolCatalog::new();
        let html = search_results_grid(&catalog, "zzzzzz");
        assert!(html.contains("No tools found"));
    }
}
