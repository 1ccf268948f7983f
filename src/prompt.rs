use crate::models::BlogData;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_TAGS: &str = "None";

// ── Public API ───────────────────────────────────────────────────────────────

/// Builds the instruction sent to the generative API.
///
/// Missing or blank `title`/`category`/`prompt` become `Not specified`. Blank
/// tags are dropped, and a tag list left empty becomes `None`. User text is
/// embedded as-is.
pub fn build_instruction(prompt: Option<&str>, blog: Option<&BlogData>) -> String {
    let title = field_or_default(blog.and_then(|b| b.title.as_deref()));
    let category = field_or_default(blog.and_then(|b| b.category.as_deref()));
    let tags: Vec<&str> = blog
        .and_then(|b| b.tags.as_deref())
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .filter(|tag| !tag.trim().is_empty())
        .collect();
    let tags = if tags.is_empty() {
        NO_TAGS.to_string()
    } else {
        tags.join(", ")
    };
    let request = field_or_default(prompt);

    format!(
        "You are Blogiphilia's writing assistant, an expert blog editor helping a writer \
improve their post.\n\n\
Blog details:\n\
Title: {title}\n\
Category: {category}\n\
Tags: {tags}\n\n\
User's request: {request}\n\n\
Give practical, well-structured help that fits the blog's topic and tone. \
Keep suggestions concise and ready to use."
    )
}

fn field_or_default(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_full_blog_context() {
        let blog = BlogData {
            title: Some("My Trip".into()),
            category: Some("Travel".into()),
            tags: Some(vec!["adventure".into(), "solo".into()]),
        };
        let text = build_instruction(Some("Improve my intro"), Some(&blog));
        assert!(text.contains("Title: My Trip\n"));
        assert!(text.contains("Category: Travel\n"));
        assert!(text.contains("Tags: adventure, solo\n"));
        assert!(text.contains("User's request: Improve my intro"));
    }

    #[test]
    fn missing_blog_data_uses_placeholders() {
        let text = build_instruction(Some("Suggest a title"), None);
        assert!(text.contains("Title: Not specified\n"));
        assert!(text.contains("Category: Not specified\n"));
        assert!(text.contains("Tags: None\n"));
        assert!(text.contains("User's request: Suggest a title"));
    }

    #[test]
    fn partial_blog_data_fills_only_gaps() {
        let blog = BlogData {
            title: Some("Sourdough".into()),
            category: None,
            tags: Some(Vec::new()),
        };
        let text = build_instruction(None, Some(&blog));
        assert!(text.contains("Title: Sourdough\n"));
        assert!(text.contains("Category: Not specified\n"));
        assert!(text.contains("Tags: None\n"));
        assert!(text.contains("User's request: Not specified"));
    }

    #[test]
    fn blank_tags_are_dropped() {
        let blog = BlogData {
            title: None,
            category: None,
            tags: Some(vec!["".into(), " ".into()]),
        };
        let text = build_instruction(None, Some(&blog));
        assert!(text.contains("Tags: None\n"));

        let blog = BlogData {
            title: None,
            category: None,
            tags: Some(vec!["food".into(), "  ".into(), "bread".into()]),
        };
        let text = build_instruction(None, Some(&blog));
        assert!(text.contains("Tags: food, bread\n"));
    }

    #[test]
    fn user_text_is_not_escaped() {
        let text = build_instruction(Some("use \"quotes\" & <tags>\nplease"), None);
        assert!(text.contains("User's request: use \"quotes\" & <tags>\nplease"));
    }
}
