use crate::catalog::{Catalog, Example};

/// Display order of the home page sections.
pub const CATEGORY_ORDER: [&str; 8] = [
    "WebGL Fundamentals",
    "2D Transformations",
    "Core 3D Concepts",
    "Texturing",
    "Lighting & Materials",
    "Advanced WebGL",
    "Introduction to Three.js",
    "Advanced Three.js",
];

#[derive(Debug)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub examples: Vec<&'a Example>,
}

/// Catalog entries grouped by category.
///
/// Categories named in the priority list come first, in list order; any
/// other category follows in order of first appearance. Empty categories are
/// skipped and entries keep their catalog order inside a group.
#[derive(Debug)]
pub struct CategoryIndex<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_order(catalog, &CATEGORY_ORDER)
    }

    pub fn with_order(catalog: &'a Catalog, order: &[&str]) -> Self {
        let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
        for example in catalog.iter() {
            match groups.iter_mut().find(|g| g.name == example.category) {
                Some(group) => group.examples.push(example),
                None => groups.push(CategoryGroup {
                    name: example.category.as_str(),
                    examples: vec![example],
                }),
            }
        }
        // stable: unlisted categories keep first-appearance order
        groups.sort_by_key(|g| order.iter().position(|name| *name == g.name).unwrap_or(order.len()));
        Self { groups }
    }

    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        &self.groups
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|g| g.name)
    }
}
