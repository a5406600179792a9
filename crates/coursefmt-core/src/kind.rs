//! Document kinds recognized by the dispatcher

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The fixed institutional content types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    ModuleOverview,
    Discussion,
    Assignment,
    LearningMaterials,
    AssessmentOverview,
    FacultyBio,
    CourseWelcome,
    Syllabus,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 8] = [
        DocumentKind::ModuleOverview,
        DocumentKind::Discussion,
        DocumentKind::Assignment,
        DocumentKind::LearningMaterials,
        DocumentKind::AssessmentOverview,
        DocumentKind::FacultyBio,
        DocumentKind::CourseWelcome,
        DocumentKind::Syllabus,
    ];

    /// Canonical kebab-case tag
    pub fn tag(self) -> &'static str {
        match self {
            DocumentKind::ModuleOverview => "module-overview",
            DocumentKind::Discussion => "discussion",
            DocumentKind::Assignment => "assignment",
            DocumentKind::LearningMaterials => "learning-materials",
            DocumentKind::AssessmentOverview => "assessment-overview",
            DocumentKind::FacultyBio => "faculty-bio",
            DocumentKind::CourseWelcome => "course-welcome",
            DocumentKind::Syllabus => "syllabus",
        }
    }

    /// Look up a tag, accepting kebab, snake and camel case spellings
    pub fn from_tag(tag: &str) -> Option<Self> {
        let folded: String = tag
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.tag().replace('-', "") == folded)
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::from_tag(s).ok_or_else(|| Error::UnknownDocumentKind(s.to_string()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
