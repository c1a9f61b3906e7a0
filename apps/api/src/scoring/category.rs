//! The fixed set of preference categories and the job fields each may match.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Roles,
    Skills,
    Sectors,
    Locations,
    JobSite,
    JobType,
    ExperienceLevel,
    CompensationType,
    Companies,
}

impl Category {
    /// Evaluation order. Match details are appended in this order too.
    pub const ALL: [Category; 9] = [
        Category::Roles,
        Category::Skills,
        Category::Sectors,
        Category::Locations,
        Category::JobSite,
        Category::JobType,
        Category::ExperienceLevel,
        Category::CompensationType,
        Category::Companies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Roles => "roles",
            Category::Skills => "skills",
            Category::Sectors => "sectors",
            Category::Locations => "locations",
            Category::JobSite => "job_site",
            Category::JobType => "job_type",
            Category::ExperienceLevel => "experience_level",
            Category::CompensationType => "compensation_type",
            Category::Companies => "companies",
        }
    }

    /// Dotted job paths this category is allowed to match against. Roles see the title only.
    pub fn field_paths(self) -> &'static [&'static str] {
        match self {
            Category::Roles => &["title"],
            Category::Skills => &["description", "skill_requirements.skill.name"],
            Category::Sectors => &["sectors.sector.name"],
            Category::Locations => &["city.name", "city.country.name"],
            Category::JobSite => &["job_site"],
            Category::JobType => &["job_type"],
            Category::ExperienceLevel => &["experience_level"],
            Category::CompensationType => &["compensation_type"],
            Category::Companies => &["entity.name"],
        }
    }

    /// Exact lookup by canonical name. Synonyms are resolved by the preference layer.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
