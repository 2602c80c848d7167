//! CV document types
//!
//! [`CvDocument`] is the normalized, fully-defaulted shape handed to
//! presentation code. Section entries stay as raw JSON so that whatever the
//! author wrote reaches the templates untouched; typed views over them are
//! available through [`CvDocument::records`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Page layout of the rendered CV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    Single,
    #[default]
    Two,
}

impl PageLayout {
    /// Canonical spellings, in display order
    pub const CANONICAL: [&'static str; 2] = ["single", "two"];

    /// Parse a canonical spelling only
    pub fn parse_canonical(value: &str) -> Option<Self> {
        match value {
            "single" => Some(PageLayout::Single),
            "two" => Some(PageLayout::Two),
            _ => None,
        }
    }

    /// Map a legacy spelling (`two-column`, `single_column`, ...) to its layout
    pub fn from_legacy(value: &str) -> Option<Self> {
        match value {
            "two-column" | "two_column" => Some(PageLayout::Two),
            "single-column" | "single_column" => Some(PageLayout::Single),
            _ => None,
        }
    }

    /// Canonicalize a raw `pageLayout` value. Anything unrecognized is `Two`.
    pub fn normalize(raw: Option<&Value>) -> Self {
        raw.and_then(Value::as_str)
            .and_then(|s| Self::from_legacy(s).or_else(|| Self::parse_canonical(s)))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageLayout::Single => "single",
            PageLayout::Two => "two",
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional top-level sequences of a CV document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Work,
    Volunteer,
    Education,
    Awards,
    Certificates,
    Publications,
    Skills,
    Languages,
    Interests,
    References,
    Projects,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Work,
        Section::Volunteer,
        Section::Education,
        Section::Awards,
        Section::Certificates,
        Section::Publications,
        Section::Skills,
        Section::Languages,
        Section::Interests,
        Section::References,
        Section::Projects,
    ];

    /// Field name in the JSON document
    pub fn key(&self) -> &'static str {
        match self {
            Section::Work => "work",
            Section::Volunteer => "volunteer",
            Section::Education => "education",
            Section::Awards => "awards",
            Section::Certificates => "certificates",
            Section::Publications => "publications",
            Section::Skills => "skills",
            Section::Languages => "languages",
            Section::Interests => "interests",
            Section::References => "references",
            Section::Projects => "projects",
        }
    }
}

/// The `basics` section after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default)]
    pub profiles: Vec<Value>,
    /// ICP filing numbers shown in the footer of sites hosted in mainland China
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beian: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<Value>,
}

impl Basics {
    /// Basics with only the required fields set
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            image: None,
            email: None,
            phone: None,
            url: None,
            summary: None,
            theme: None,
            location: None,
            profiles: Vec::new(),
            beian: None,
            about: None,
        }
    }

    /// Typed view of `profiles`, skipping entries that don't fit
    pub fn typed_profiles(&self) -> Vec<Profile> {
        typed_entries("basics.profiles", &self.profiles)
    }

    /// Typed view of `location`
    pub fn typed_location(&self) -> Option<Location> {
        self.location
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Typed view of `about`
    pub fn typed_about(&self) -> Option<About> {
        self.about
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// A normalized CV document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    #[serde(default)]
    pub analytics_code: String,
    pub page_layout: PageLayout,
    pub basics: Basics,
    #[serde(default)]
    pub work: Vec<Value>,
    #[serde(default)]
    pub volunteer: Vec<Value>,
    #[serde(default)]
    pub education: Vec<Value>,
    #[serde(default)]
    pub awards: Vec<Value>,
    #[serde(default)]
    pub certificates: Vec<Value>,
    #[serde(default)]
    pub publications: Vec<Value>,
    #[serde(default)]
    pub skills: Vec<Value>,
    #[serde(default)]
    pub languages: Vec<Value>,
    #[serde(default)]
    pub interests: Vec<Value>,
    #[serde(default)]
    pub references: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Value>,
}

impl CvDocument {
    /// Placeholder name used when `basics.name` is missing
    pub const UNKNOWN_NAME: &'static str = "Unknown Name";
    /// Placeholder label used when `basics.label` is missing
    pub const UNSPECIFIED_LABEL: &'static str = "Unspecified Position";
    /// Name shown when the CV data could not be loaded at all
    pub const FALLBACK_NAME: &'static str = "Failed to load CV data";
    pub const FALLBACK_LABEL: &'static str = "Please check the cv.json file";

    /// A document with the given basics and every section empty
    pub fn with_basics(basics: Basics) -> Self {
        Self {
            analytics_code: String::new(),
            page_layout: PageLayout::Two,
            basics,
            work: Vec::new(),
            volunteer: Vec::new(),
            education: Vec::new(),
            awards: Vec::new(),
            certificates: Vec::new(),
            publications: Vec::new(),
            skills: Vec::new(),
            languages: Vec::new(),
            interests: Vec::new(),
            references: Vec::new(),
            projects: Vec::new(),
            images: None,
        }
    }

    /// The fixed document served when loading fails
    pub fn fallback() -> Self {
        Self::with_basics(Basics::new(Self::FALLBACK_NAME, Self::FALLBACK_LABEL))
    }

    /// Whether this is the fallback document
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Raw entries of a section
    pub fn section(&self, section: Section) -> &[Value] {
        match section {
            Section::Work => &self.work,
            Section::Volunteer => &self.volunteer,
            Section::Education => &self.education,
            Section::Awards => &self.awards,
            Section::Certificates => &self.certificates,
            Section::Publications => &self.publications,
            Section::Skills => &self.skills,
            Section::Languages => &self.languages,
            Section::Interests => &self.interests,
            Section::References => &self.references,
            Section::Projects => &self.projects,
        }
    }

    pub(crate) fn section_mut(&mut self, section: Section) -> &mut Vec<Value> {
        match section {
            Section::Work => &mut self.work,
            Section::Volunteer => &mut self.volunteer,
            Section::Education => &mut self.education,
            Section::Awards => &mut self.awards,
            Section::Certificates => &mut self.certificates,
            Section::Publications => &mut self.publications,
            Section::Skills => &mut self.skills,
            Section::Languages => &mut self.languages,
            Section::Interests => &mut self.interests,
            Section::References => &mut self.references,
            Section::Projects => &mut self.projects,
        }
    }

    /// Typed entries of the section `T` belongs to.
    ///
    /// Entries that don't deserialize into `T` are skipped; validation has
    /// already reported them.
    pub fn records<T: SectionRecord>(&self) -> Vec<T> {
        typed_entries(T::SECTION.key(), self.section(T::SECTION))
    }

    /// Typed view of `images`
    pub fn typed_images(&self) -> Option<Images> {
        self.images
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

fn typed_entries<T: DeserializeOwned>(path: &str, entries: &[Value]) -> Vec<T> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping {}[{}]: {}", path, i, e);
                None
            }
        })
        .collect()
}

/// A record type stored in one of the document's sections
pub trait SectionRecord: DeserializeOwned {
    const SECTION: Section;
}

// =============================================================================
// Typed records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub network: String,
    pub username: String,
    pub url: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub description: Option<String>,
    #[serde(default)]
    pub personal_info: Vec<InfoItem>,
    #[serde(default)]
    pub traits: Vec<TextItem>,
    #[serde(default)]
    pub highlights: Vec<TextItem>,
    pub quote: Option<Quote>,
    /// Deprecated icon/text pairs, superseded by `traits`
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoItem {
    pub emoji: String,
    pub label: String,
    pub value: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub emoji: String,
    pub text: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub emoji: Option<String>,
    #[serde(default)]
    pub values: Vec<QuoteValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteValue {
    pub emoji: String,
    pub label: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub name: String,
    pub position: String,
    #[serde(rename = "location_type")]
    pub location_type: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, String>,
}

impl Work {
    /// Still ongoing (no end date)
    pub fn is_current(&self) -> bool {
        self.end_date.as_deref().map_or(true, str::is_empty)
    }
}

impl SectionRecord for Work {
    const SECTION: Section = Section::Work;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub organization: String,
    pub position: String,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl SectionRecord for Volunteer {
    const SECTION: Section = Section::Volunteer;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub url: Option<String>,
    pub area: String,
    pub study_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub score: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
}

impl SectionRecord for Education {
    const SECTION: Section = Section::Education;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub date: Option<String>,
    pub awarder: Option<String>,
    pub summary: Option<String>,
}

impl SectionRecord for Award {
    const SECTION: Section = Section::Awards;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub date: Option<String>,
    pub issuer: Option<String>,
    pub url: Option<String>,
}

impl SectionRecord for Certificate {
    const SECTION: Section = Section::Certificates;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub name: String,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
}

impl SectionRecord for Publication {
    const SECTION: Section = Section::Publications;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: Option<String>,
    pub level: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SectionRecord for Skill {
    const SECTION: Section = Section::Skills;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub fluency: Option<String>,
}

impl SectionRecord for Language {
    const SECTION: Section = Section::Languages;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SectionRecord for Interest {
    const SECTION: Section = Section::Interests;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub reference: String,
}

impl SectionRecord for Reference {
    const SECTION: Section = Section::References;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub url: Option<String>,
    pub github: Option<String>,
    pub image: Option<ProjectImage>,
}

impl SectionRecord for Project {
    const SECTION: Section = Section::Projects;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub url: String,
    pub position: Option<String>,
    /// Alternate image for dark mode
    pub dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Images {
    pub intro: Option<String>,
    #[serde(default)]
    pub list: Vec<ImageItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub image: String,
    pub alt: Option<String>,
    pub desc: Option<String>,
}
