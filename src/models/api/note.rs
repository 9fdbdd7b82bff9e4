/// A personal recipe note with its tags in entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for a new note. Text fields are trimmed and blank tags dropped
/// before storage.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub tags: Vec<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub steps: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewNote {
    pub(crate) fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ingredients: self.ingredients.trim().to_string(),
            steps: self.steps.trim().to_string(),
            tags: clean_tags(&self.tags),
        }
    }
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
            && self.tags.is_none()
    }

    /// Merges the patch over `current`, applying the same trimming as [`NewNote`].
    pub(crate) fn apply(&self, current: &Note) -> NewNote {
        NewNote {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            ingredients: self
                .ingredients
                .clone()
                .unwrap_or_else(|| current.ingredients.clone()),
            steps: self.steps.clone().unwrap_or_else(|| current.steps.clone()),
            tags: self.tags.clone().unwrap_or_else(|| current.tags.clone()),
        }
        .normalized()
    }
}

/// Splits a comma separated tag list as typed on the command line.
pub fn parse_tags(input: &str) -> Vec<String> {
    clean_tags(&input.split(',').map(str::to_string).collect::<Vec<_>>())
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_normalized_trims_fields_and_tags() {
        let note = NewNote {
            title: "  Focaccia ".to_string(),
            ingredients: "\nflour, water\n".to_string(),
            steps: " knead ".to_string(),
            tags: vec![" bread ".to_string(), "  ".to_string(), "weekend".to_string()],
        }
        .normalized();

        assert_eq!(note.title, "Focaccia");
        assert_eq!(note.ingredients, "flour, water");
        assert_eq!(note.steps, "knead");
        assert_eq!(note.tags, vec!["bread", "weekend"]);
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let current = Note {
            id: 1,
            title: "Focaccia".to_string(),
            ingredients: "flour".to_string(),
            steps: "knead".to_string(),
            tags: vec!["bread".to_string()],
            created_at: String::new(),
            updated_at: String::new(),
        };
        let patch = NotePatch {
            steps: Some(" knead, rest, bake ".to_string()),
            ..Default::default()
        };

        let merged = patch.apply(&current);

        assert_eq!(merged.title, "Focaccia");
        assert_eq!(merged.steps, "knead, rest, bake");
        assert_eq!(merged.tags, vec!["bread"]);
        assert!(!patch.is_empty());
        assert!(NotePatch::default().is_empty());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("bread, weekend,,  "), vec!["bread", "weekend"]);
        assert!(parse_tags("").is_empty());
    }
}
