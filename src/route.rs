use crate::catalog::Catalog;

/// Navigable location, carried in the URL hash (`#/`, `#/example/<id>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Example(String),
}

const EXAMPLE_PREFIX: &str = "/example/";

const SITE_TITLE: &str = "WebGL Learning Hub";
const SITE_DESCRIPTION: &str = "An interactive platform to learn WebGL through practical examples. Browse a curated list of tutorials, view detailed explanations, and explore the corresponding code snippets to master modern web graphics.";

/// Document `<title>` and meta description for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHead {
    pub title: String,
    pub description: String,
}

impl Route {
    /// Anything that is not a well-formed example path lands on the catalog.
    pub fn parse(hash: &str) -> Self {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        match path.strip_prefix(EXAMPLE_PREFIX) {
            Some(id) => {
                let id = id.trim_end_matches('/');
                if id.is_empty() || id.contains('/') {
                    Route::Home
                } else {
                    Route::Example(id.to_string())
                }
            }
            None => Route::Home,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Example(id) => format!("#{EXAMPLE_PREFIX}{id}"),
        }
    }

    pub fn page_head(&self, catalog: &Catalog) -> PageHead {
        match self {
            Route::Home => PageHead {
                title: SITE_TITLE.to_string(),
                description: SITE_DESCRIPTION.to_string(),
            },
            Route::Example(id) => match catalog.get(id) {
                Some(example) => PageHead {
                    title: format!("{} - WebGL Hub", example.title),
                    description: example.summary.clone(),
                },
                None => PageHead {
                    title: "Example Not Found - WebGL Hub".to_string(),
                    description: SITE_DESCRIPTION.to_string(),
                },
            },
        }
    }
}
