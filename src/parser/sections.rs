//! Section assembly: tagged comment blocks into an ordered section forest.
//!
//! A block becomes a section when it carries `@section`. `@sectionof`
//! nests it under another section, addressed by name or by dotted path
//! (`Parent.Child`); forward references are allowed, so resolution runs
//! as a fixpoint over the whole input. A reference that never resolves is
//! a structural error naming the offending identifier.

use std::collections::{BTreeMap, HashMap};

use crate::context::Section;
use crate::error::GuideError;
use crate::parser::comments::extract_blocks;
use crate::parser::tags::parse_block;

/// Default page for sections without `@page`.
pub const DEFAULT_PAGE: &str = "index";

/// A section as declared in one comment block, before nesting.
#[derive(Debug, Clone, Default)]
pub struct RawSection {
    pub name: String,
    pub description: String,
    pub example: Option<String>,
    pub hide_code: bool,
    /// `@page` value, roots only; `None` means the default page
    pub page: Option<String>,
    /// `@sectionof` reference, unresolved
    pub parent: Option<String>,
    pub misc: BTreeMap<String, String>,
}

/// A resolved top-level section together with its page name.
#[derive(Debug, Clone)]
pub struct RootSection {
    pub page: String,
    pub section: Section,
}

// ============================================================================
// Raw collection
// ============================================================================

/// Parse one stylesheet's text into raw sections, in source order.
///
/// Blocks without `@section` are not documentation sections and are
/// dropped. `@section` with no name falls back to the first description
/// line, which is then removed from the description.
pub fn collect_raw_sections(source: &str) -> Vec<RawSection> {
    extract_blocks(source)
        .iter()
        .filter_map(|block| raw_from_block(block))
        .collect()
}

fn raw_from_block(block: &str) -> Option<RawSection> {
    let parsed = parse_block(block);
    let section_tag = parsed.tag("section")?;

    let mut description = parsed.description.clone();
    let name = if section_tag.value.is_empty() {
        // Promote the first description line to the name
        let mut lines = description.lines();
        let first = lines.next()?.trim().to_string();
        if first.is_empty() {
            return None;
        }
        description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        first
    } else {
        section_tag.value.clone()
    };

    let mut raw = RawSection {
        name,
        description,
        ..Default::default()
    };

    for tag in &parsed.tags {
        match tag.name.as_str() {
            "section" => {}
            "sectionof" if !tag.value.is_empty() => raw.parent = Some(tag.value.clone()),
            "page" if !tag.value.is_empty() => raw.page = Some(tag.value.clone()),
            "example" => raw.example = Some(tag_content(&tag.value, &tag.block)),
            "hideCode" => raw.hide_code = true,
            _ => {
                raw.misc
                    .insert(tag.name.clone(), tag_content(&tag.value, &tag.block));
            }
        }
    }

    Some(raw)
}

/// Join a tag's inline value and continuation block.
fn tag_content(value: &str, block: &str) -> String {
    match (value.is_empty(), block.is_empty()) {
        (true, _) => block.to_string(),
        (_, true) => value.to_string(),
        _ => format!("{value}\n{block}"),
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Nest raw sections into the ordered forest of top-level sections.
///
/// Order is declaration order across the input. Fails with
/// [`GuideError::UndefinedSection`] when a `@sectionof` reference names
/// an unknown section, and [`GuideError::SectionCycle`] when references
/// nest a section inside itself.
pub fn assemble(raws: Vec<RawSection>) -> Result<Vec<RootSection>, GuideError> {
    let parent_of = resolve_parents(&raws)?;

    // children_of[i]: indices nested under raws[i], declaration order
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); raws.len()];
    let mut roots = Vec::new();
    for (idx, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(idx),
            None => roots.push(idx),
        }
    }

    Ok(roots
        .into_iter()
        .map(|idx| RootSection {
            page: raws[idx]
                .page
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE.to_string()),
            section: build_tree(idx, &raws, &children_of),
        })
        .collect())
}

/// Resolve every `@sectionof` reference to a raw-section index.
///
/// Runs to a fixpoint so dotted paths can reference sections that are
/// themselves attached in a later pass.
fn resolve_parents(raws: &[RawSection]) -> Result<Vec<Option<usize>>, GuideError> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, raw) in raws.iter().enumerate() {
        by_name.entry(raw.name.as_str()).or_default().push(idx);
    }

    let mut parent_of: Vec<Option<usize>> = vec![None; raws.len()];
    let mut unresolved: Vec<usize> = raws
        .iter()
        .enumerate()
        .filter(|(_, raw)| raw.parent.is_some())
        .map(|(idx, _)| idx)
        .collect();

    while !unresolved.is_empty() {
        let mut progressed = false;
        unresolved.retain(|&idx| {
            let reference = raws[idx].parent.as_deref().unwrap_or_default();
            match resolve_path(reference, raws, &by_name, &parent_of) {
                Some(parent) => {
                    parent_of[idx] = Some(parent);
                    progressed = true;
                    false
                }
                None => true,
            }
        });
        if !progressed {
            let reference = raws[unresolved[0]].parent.clone().unwrap_or_default();
            return Err(GuideError::UndefinedSection(reference));
        }
    }

    // A mutual reference pair resolves cleanly above, so check the
    // parent chains are acyclic before trusting them.
    for start in 0..raws.len() {
        let mut steps = 0;
        let mut current = start;
        while let Some(parent) = parent_of[current] {
            steps += 1;
            if steps > raws.len() {
                return Err(GuideError::SectionCycle(raws[start].name.clone()));
            }
            current = parent;
        }
    }

    Ok(parent_of)
}

/// Walk a (possibly dotted) reference down the forest by section name.
///
/// Returns `None` when an intermediate link is not resolved yet; the
/// fixpoint loop retries on the next pass.
fn resolve_path(
    reference: &str,
    raws: &[RawSection],
    by_name: &HashMap<&str, Vec<usize>>,
    parent_of: &[Option<usize>],
) -> Option<usize> {
    let mut components = reference.split('.');
    let first = components.next()?;
    let mut current = *by_name.get(first)?.first()?;

    for component in components {
        current = raws
            .iter()
            .enumerate()
            .position(|(idx, raw)| raw.name == component && parent_of[idx] == Some(current))?;
    }
    Some(current)
}

/// Build the owned section tree rooted at `idx`.
fn build_tree(idx: usize, raws: &[RawSection], children_of: &[Vec<usize>]) -> Section {
    let raw = &raws[idx];
    Section {
        name: raw.name.clone(),
        id: Section::slugify(&raw.name),
        description: raw.description.clone(),
        example: raw.example.clone(),
        hide_code: raw.hide_code,
        children: children_of[idx]
            .iter()
            .map(|&child| build_tree(child, raws, children_of))
            .collect(),
        misc: raw.misc.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(source: &str) -> Vec<RawSection> {
        collect_raw_sections(source)
    }

    #[test]
    fn test_collect_basic_section() {
        let sections = raws("/**\n * Test Fixture.\n * @section Fixture\n */");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Fixture");
        assert_eq!(sections[0].description, "Test Fixture.");
    }

    #[test]
    fn test_untagged_block_dropped() {
        let sections = raws("/**\n * Just a note.\n */\n/** @section Kept */");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Kept");
    }

    #[test]
    fn test_name_falls_back_to_first_line() {
        let sections = raws("/**\n * Buttons\n * All button styles.\n * @section\n */");
        assert_eq!(sections[0].name, "Buttons");
        assert_eq!(sections[0].description, "All button styles.");
    }

    #[test]
    fn test_unknown_tags_into_misc() {
        let sections = raws("/**\n * @section Colors\n * @deprecated use palette\n */");
        assert_eq!(sections[0].misc["deprecated"], "use palette");
    }

    #[test]
    fn test_assemble_nesting() {
        let input = "\
/**\n * Parent section.\n * @section Buttons\n */\n\
/**\n * Child section.\n * @section Primary\n * @sectionof Buttons\n */";
        let roots = assemble(raws(input)).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].section.name, "Buttons");
        assert_eq!(roots[0].section.children.len(), 1);
        assert_eq!(roots[0].section.children[0].name, "Primary");
    }

    #[test]
    fn test_assemble_forward_reference() {
        // Child declared before its parent
        let input = "\
/**\n * @section Primary\n * @sectionof Buttons\n */\n\
/**\n * @section Buttons\n */";
        let roots = assemble(raws(input)).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].section.children[0].name, "Primary");
    }

    #[test]
    fn test_assemble_dotted_path() {
        let input = "\
/**\n * @section Buttons\n */\n\
/**\n * @section Primary\n * @sectionof Buttons\n */\n\
/**\n * @section Hover\n * @sectionof Buttons.Primary\n */";
        let roots = assemble(raws(input)).unwrap();
        let primary = &roots[0].section.children[0];
        assert_eq!(primary.children[0].name, "Hover");
    }

    #[test]
    fn test_undefined_reference_is_error() {
        let input = "/**\n * @section Orphan\n * @sectionof Nowhere\n */";
        let err = assemble(raws(input)).unwrap_err();
        assert!(matches!(err, GuideError::UndefinedSection(_)));
        assert!(format!("{err}").contains("Nowhere"));
    }

    #[test]
    fn test_reference_cycle_is_error() {
        let input = "\
/**\n * @section A\n * @sectionof B\n */\n\
/**\n * @section B\n * @sectionof A\n */";
        let err = assemble(raws(input)).unwrap_err();
        assert!(matches!(err, GuideError::SectionCycle(_)));
    }

    #[test]
    fn test_self_reference_is_error() {
        let input = "/**\n * @section Loop\n * @sectionof Loop\n */";
        let err = assemble(raws(input)).unwrap_err();
        assert!(matches!(err, GuideError::SectionCycle(_)));
        assert!(format!("{err}").contains("Loop"));
    }

    #[test]
    fn test_cycle_never_drops_sections_silently() {
        // A three-section loop must fail, not assemble into zero roots.
        let input = "\
/**\n * @section A\n * @sectionof C\n */\n\
/**\n * @section B\n * @sectionof A\n */\n\
/**\n * @section C\n * @sectionof B\n */";
        assert!(assemble(raws(input)).is_err());
    }

    #[test]
    fn test_page_assignment() {
        let input = "\
/**\n * @section Intro\n */\n\
/**\n * @section Colors\n * @page Palette\n */";
        let roots = assemble(raws(input)).unwrap();
        assert_eq!(roots[0].page, DEFAULT_PAGE);
        assert_eq!(roots[1].page, "Palette");
    }

    #[test]
    fn test_example_and_hide_code() {
        let input = "/**\n * @section Btn\n * @example\n * <button>Go</button>\n * @hideCode\n */";
        let roots = assemble(raws(input)).unwrap();
        let section = &roots[0].section;
        assert_eq!(section.example.as_deref(), Some("<button>Go</button>"));
        assert!(section.hide_code);
    }
}
