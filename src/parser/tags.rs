//! `@tag` grammar inside a normalized comment block.
//!
//! Lines before the first tag form the free description. A tag line is
//! `@name rest-of-line`; lines that follow, up to the next tag or the end
//! of the block, are the tag's continuation block (used by `@example`).

/// A single parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without the leading `@`
    pub name: String,

    /// Remainder of the tag line, trimmed
    pub value: String,

    /// Continuation lines until the next tag, trimmed as a unit
    pub block: String,
}

/// A comment block split into description and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub description: String,
    pub tags: Vec<Tag>,
}

impl ParsedComment {
    /// First tag with the given name, if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Whether the block declares the given tag.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }
}

/// Parse one normalized comment block.
pub fn parse_block(block: &str) -> ParsedComment {
    let mut parsed = ParsedComment::default();
    let mut description = Vec::new();
    let mut current: Option<(Tag, Vec<String>)> = None;

    for line in block.lines() {
        if let Some(rest) = tag_line(line) {
            if let Some((tag, lines)) = current.take() {
                parsed.tags.push(finish_tag(tag, lines));
            }
            let (name, value) = split_tag(rest);
            current = Some((
                Tag {
                    name,
                    value,
                    block: String::new(),
                },
                Vec::new(),
            ));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        } else {
            description.push(line);
        }
    }

    if let Some((tag, lines)) = current.take() {
        parsed.tags.push(finish_tag(tag, lines));
    }

    parsed.description = description.join("\n").trim().to_string();
    parsed
}

/// Return the text after `@` if the line starts a tag.
fn tag_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('@')?;
    // `@ foo` is prose, not a tag
    rest.chars()
        .next()
        .filter(|c| c.is_alphanumeric())
        .map(|_| rest)
}

/// Split `name rest-of-line` into tag name and value.
fn split_tag(rest: &str) -> (String, String) {
    match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name.to_string(), value.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn finish_tag(mut tag: Tag, lines: Vec<String>) -> Tag {
    tag.block = lines.join("\n").trim().to_string();
    tag
}
