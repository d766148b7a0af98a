//! Page-context data model.
//!
//! These types are what templates render against and what `stream_context`
//! mode serializes to JSON. Field skipping keeps the JSON dump minimal.

use std::collections::BTreeMap;

use serde::Serialize;

/// A documented section extracted from a stylesheet comment block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Section {
    /// Section name (from `@section`, or the first description line)
    pub name: String,

    /// Slugified name, used as the HTML anchor id
    pub id: String,

    /// Free-form description text preceding the first tag
    pub description: String,

    /// Example markup from `@example`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Whether `@hideCode` suppressed the example's code listing
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hide_code: bool,

    /// Nested sections declared with `@sectionof <this section>`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Section>,

    /// Unrecognized tags (name -> value), visible to templates and hooks
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub misc: BTreeMap<String, String>,
}

impl Section {
    /// Slugify a section or page name: lowercase, whitespace runs become `-`.
    pub fn slugify(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut last_dash = false;
        for ch in name.trim().chars() {
            if ch.is_whitespace() {
                if !last_dash {
                    slug.push('-');
                    last_dash = true;
                }
            } else {
                for lower in ch.to_lowercase() {
                    slug.push(lower);
                }
                last_dash = false;
            }
        }
        slug
    }
}

/// Everything a single output page knows about itself and its siblings.
///
/// One context is built per distinct `@page` name (default page: `index`).
/// The `preprocess` hook receives `&mut PageContext` and may mutate any
/// field; additions that have no dedicated field go into `extra` and are
/// flattened into the serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Slugified page name, also the output file stem
    pub id: String,

    /// Page title (the page name as written)
    pub title: String,

    /// This page's top-level sections, children nested
    pub sections: Vec<Section>,

    /// Flat list of every section across all pages
    pub all_sections: Vec<Section>,

    /// Input stylesheet paths, as given to the generator
    pub stylesheets: Vec<String>,

    /// Raw stylesheet contents, filled when inlining is enabled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parsed_stylesheets: Vec<String>,

    /// Ids of every page in the run, giving templates cross-page links
    pub pages: Vec<String>,

    /// Hook-added fields without a dedicated slot
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PageContext {
    /// Create an empty context for a named page.
    pub fn new(name: &str) -> Self {
        Self {
            id: Section::slugify(name),
            title: name.to_string(),
            sections: Vec::new(),
            all_sections: Vec::new(),
            stylesheets: Vec::new(),
            parsed_stylesheets: Vec::new(),
            pages: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(Section::slugify("Buttons"), "buttons");
    }

    #[test]
    fn test_slugify_whitespace() {
        assert_eq!(Section::slugify("Primary Buttons"), "primary-buttons");
        assert_eq!(Section::slugify("  Primary   Buttons "), "primary-buttons");
    }

    #[test]
    fn test_slugify_preserves_punctuation() {
        assert_eq!(Section::slugify("Color.Swatch"), "color.swatch");
    }

    #[test]
    fn test_context_json_shape() {
        let mut context = PageContext::new("index");
        context.sections.push(Section {
            name: "Fixture".to_string(),
            id: "fixture".to_string(),
            description: "Test Fixture.".to_string(),
            ..Default::default()
        });
        context.pages.push("index".to_string());

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["id"], "index");
        assert_eq!(json["sections"][0]["name"], "Fixture");
        // Empty optionals never appear in the dump
        assert!(json.get("parsed_stylesheets").is_none());
        assert!(json["sections"][0].get("example").is_none());
    }

    #[test]
    fn test_extra_fields_flatten() {
        let mut context = PageContext::new("index");
        context
            .extra
            .insert("footer".to_string(), serde_json::json!("generated"));

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["footer"], "generated");
    }
}
