use serde::{Deserialize, Serialize};

/// Cap on search results and on every list inside an `OccupationDetail`.
pub const MAX_ITEMS: usize = 10;

/// One search hit from the occupation directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    /// Stable O*NET-SOC code, e.g. `41-2011.00`.
    pub code: String,
    pub title: String,
}

/// Descriptive data for one occupation. Every list holds at most `MAX_ITEMS` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationDetail {
    pub title: String,
    pub code: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub knowledge: Vec<String>,
    #[serde(default)]
    pub work_activities: Vec<String>,
    #[serde(default)]
    pub work_context: Vec<String>,
    #[serde(default)]
    pub work_styles: Vec<String>,
    #[serde(default)]
    pub technology_skills: Vec<String>,
}

/// The seven descriptive sections of an occupation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tasks,
    Skills,
    Knowledge,
    WorkActivities,
    WorkContext,
    WorkStyles,
    TechnologySkills,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Tasks,
        Section::Skills,
        Section::Knowledge,
        Section::WorkActivities,
        Section::WorkContext,
        Section::WorkStyles,
        Section::TechnologySkills,
    ];

    /// Heading text used on the public summary page.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Tasks => "Tasks",
            Section::Skills => "Skills",
            Section::Knowledge => "Knowledge",
            Section::WorkActivities => "Work Activities",
            Section::WorkContext => "Work Context",
            Section::WorkStyles => "Work Styles",
            Section::TechnologySkills => "Technology Skills",
        }
    }

    /// Path below `/occupations/<code>/` in the web services API.
    pub fn api_path(self) -> &'static str {
        match self {
            Section::Tasks => "details/tasks",
            Section::Skills => "details/skills",
            Section::Knowledge => "details/knowledge",
            Section::WorkActivities => "details/work_activities",
            Section::WorkContext => "details/work_context",
            Section::WorkStyles => "summary/work_styles",
            Section::TechnologySkills => "summary/technology_skills",
        }
    }
}

impl OccupationDetail {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Tasks => &self.tasks,
            Section::Skills => &self.skills,
            Section::Knowledge => &self.knowledge,
            Section::WorkActivities => &self.work_activities,
            Section::WorkContext => &self.work_context,
            Section::WorkStyles => &self.work_styles,
            Section::TechnologySkills => &self.technology_skills,
        }
    }

    /// Replaces a section, keeping only the first `MAX_ITEMS` entries.
    pub fn set_section(&mut self, section: Section, mut items: Vec<String>) {
        items.truncate(MAX_ITEMS);
        let slot = match section {
            Section::Tasks => &mut self.tasks,
            Section::Skills => &mut self.skills,
            Section::Knowledge => &mut self.knowledge,
            Section::WorkActivities => &mut self.work_activities,
            Section::WorkContext => &mut self.work_context,
            Section::WorkStyles => &mut self.work_styles,
            Section::TechnologySkills => &mut self.technology_skills,
        };
        *slot = items;
    }

    /// True when no section carries any entry.
    pub fn is_blank(&self) -> bool {
        Section::ALL.iter().all(|s| self.section(*s).is_empty())
    }
}
