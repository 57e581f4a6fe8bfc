//! Draft help requests and the rules a draft must satisfy before it can be
//! sent to the server.

use saklolo_types::Category;

pub const MAX_DESCRIPTION_CHARS: usize = 1000;

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";

/// Photo bytes read from the staged preview at submit time
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A validated, unsaved help request
#[derive(Debug, Clone, PartialEq)]
pub struct DraftReport {
    pub description: String,
    pub category: Category,
    pub photo: Option<PhotoUpload>,
}

impl DraftReport {
    pub fn with_photo(mut self, photo: Option<PhotoUpload>) -> Self {
        self.photo = photo;
        self
    }
}

/// Field-level validation messages, shown inline under each form field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub description: Option<String>,
    pub category: Option<String>,
    pub photo: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.category.is_none() && self.photo.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Check the text fields of the form and produce a draft without a photo.
///
/// Every failing field gets its own message so the user sees all problems at
/// once. The description is trimmed before it is stored.
pub fn validate_report(description: &str, category: Option<Category>) -> Result<DraftReport, FieldErrors> {
    let mut errors = FieldErrors::default();

    let trimmed = description.trim();
    if trimmed.is_empty() {
        errors.description = Some(DESCRIPTION_REQUIRED.to_string());
    } else {
        let count = trimmed.chars().count();
        if count > MAX_DESCRIPTION_CHARS {
            errors.description = Some(format!(
                "Description must be at most {} characters (current: {})",
                MAX_DESCRIPTION_CHARS, count
            ));
        }
    }

    if category.is_none() {
        errors.category = Some(CATEGORY_REQUIRED.to_string());
    }

    match category {
        Some(category) if errors.is_empty() => Ok(DraftReport {
            description: trimmed.to_string(),
            category,
            photo: None,
        }),
        _ => Err(errors),
    }
}
