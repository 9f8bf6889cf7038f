//! Page component tags and the tool module interface.

use async_trait::async_trait;

use super::error::PageError;

/// A rendered markup fragment, ready for insertion into the main content
/// region of the document.
pub type Fragment = String;

/// Typed tag for every page the registry can render.
///
/// Routes carry one of these instead of a component name string, so a
/// route can never reference a component that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageComponent {
    Home,
    Tools,
    Categories,
    Category,
    Tool,
    About,
    NotFound,
}

impl PageComponent {
    /// Component name, used for logging and body CSS classes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "HomePage",
            Self::Tools => "ToolsPage",
            Self::Categories => "CategoriesPage",
            Self::Category => "CategoryPage",
            Self::Tool => "ToolPage",
            Self::About => "AboutPage",
            Self::NotFound => "NotFoundPage",
        }
    }
}

/// An in-app implementation of a single tool's interactive surface.
///
/// Tools backed by a module render directly inside the shell; tools
/// without one fall back to the legacy static-page loader. Registering a
/// module for an id that already has one replaces it (last wins).
#[async_trait]
pub trait ToolModule: Send + Sync {
    /// Produce the tool's markup fragment.
    async fn render(&self) -> Result<Fragment, PageError>;
}

/// A tool module backed by a fixed markup string.
///
/// Covers ported tools whose interactivity is wired up elsewhere; also
/// the test stand-in for registry behavior.
pub struct StaticToolModule {
    markup: String,
}

impl StaticToolModule {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

#[async_trait]
impl ToolModule for StaticToolModule {
    async fn render(&self) -> Result<Fragment, PageError> {
        Ok(self.markup.clone())
    }
}
