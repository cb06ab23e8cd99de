use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const DEFAULT_TOPIC_TITLE: &str = "Daily Lesson";
pub const DEFAULT_DIFFICULTY: &str = "General";

/// Lesson content submitted to `POST /convert`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonRequest {
    /// Title shown in the running header. Defaults to "Daily Lesson".
    #[serde(default)]
    pub topic_title: Option<String>,
    /// Optional theory text rendered before the exercises.
    #[serde(default)]
    pub theory_content: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl LessonRequest {
    pub fn topic_title(&self) -> &str {
        self.topic_title.as_deref().unwrap_or(DEFAULT_TOPIC_TITLE)
    }

    /// Trimmed theory text, or `None` when absent or blank.
    pub fn theory(&self) -> Option<&str> {
        self.theory_content
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A single exercise page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Exercise {
    pub question: String,
    /// Difficulty label shown next to the question number. Defaults to "General".
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Hints in display order. Non-string and blank entries are dropped.
    #[serde(default, deserialize_with = "usable_hints")]
    pub hints: Vec<String>,
}

impl Exercise {
    pub fn difficulty(&self) -> &str {
        self.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY)
    }
}

fn usable_hints<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let hints = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(hint) if !hint.trim().is_empty() => Some(hint),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(hints)
}
