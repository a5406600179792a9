//! Per-document template fields supplied by the calling form

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

pub const PLACEHOLDER_COURSE_NAME: &str = "Course Name";
pub const PLACEHOLDER_TITLE: &str = "Page Title";
const PLACEHOLDER_VIDEO_TITLE: &str = "Video Title";
const PLACEHOLDER_FACULTY_NAME: &str = "Faculty Name";
const PLACEHOLDER_INSTRUCTOR_NAME: &str = "Instructor Name";
const PLACEHOLDER_INSTRUCTOR_EMAIL: &str = "instructor@wfu.edu";
const PLACEHOLDER_SYLLABUS_FILE: &str = "Syllabus.pdf";

/// Read-only template configuration for one render.
///
/// Every field is optional. Accessors substitute a literal placeholder
/// when a value is missing or blank, so rendering never fails on an
/// incomplete context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateContext {
    pub title: Option<String>,
    pub course_name: Option<String>,
    pub module_number: Option<u32>,
    pub objectives: Vec<String>,
    pub checklist: Vec<String>,
    pub video_title: Option<String>,
    pub faculty_name: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub faculty_image_number: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub course_id: Option<String>,
    pub base_url: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
    pub instructor_credentials: Option<String>,
    pub syllabus_file_name: Option<String>,
    pub module_titles: Vec<String>,
}

impl TemplateContext {
    /// Parse a context from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidContext(e.to_string()))
    }

    pub fn title(&self) -> &str {
        or_placeholder(&self.title, PLACEHOLDER_TITLE)
    }

    pub fn course_name(&self) -> &str {
        or_placeholder(&self.course_name, PLACEHOLDER_COURSE_NAME)
    }

    pub fn video_title(&self) -> &str {
        or_placeholder(&self.video_title, PLACEHOLDER_VIDEO_TITLE)
    }

    pub fn faculty_name(&self) -> &str {
        or_placeholder(&self.faculty_name, PLACEHOLDER_FACULTY_NAME)
    }

    pub fn instructor_name(&self) -> &str {
        or_placeholder(&self.instructor_name, PLACEHOLDER_INSTRUCTOR_NAME)
    }

    pub fn instructor_email(&self) -> &str {
        or_placeholder(&self.instructor_email, PLACEHOLDER_INSTRUCTOR_EMAIL)
    }

    pub fn instructor_credentials(&self) -> Option<&str> {
        non_blank(&self.instructor_credentials)
    }

    pub fn syllabus_file_name(&self) -> &str {
        or_placeholder(&self.syllabus_file_name, PLACEHOLDER_SYLLABUS_FILE)
    }

    pub fn course_id(&self) -> Option<&str> {
        non_blank(&self.course_id)
    }

    pub fn faculty_image_number(&self) -> Option<&str> {
        non_blank(&self.faculty_image_number)
    }

    /// Base URL of the LMS without a trailing slash (empty for relative links)
    pub fn base_url(&self) -> &str {
        non_blank(&self.base_url)
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or("")
    }
}

/// LMS ids show up both as JSON numbers and as strings
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'static str) -> &'a str {
    non_blank(value).unwrap_or(placeholder)
}
