use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic a free-text question is routed to. Declaration order is match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greeting,
    Projects,
    DreamJournal,
    ProjectManagement,
    Education,
    Waterloo,
    Skills,
    TechStack,
    Contact,
    Now,
    Personal,
    Hire,
    Default,
}

impl Category {
    /// Every category that has triggers, in the order they are tried.
    pub const MATCH_ORDER: [Category; 12] = [
        Category::Greeting,
        Category::Projects,
        Category::DreamJournal,
        Category::ProjectManagement,
        Category::Education,
        Category::Waterloo,
        Category::Skills,
        Category::TechStack,
        Category::Contact,
        Category::Now,
        Category::Personal,
        Category::Hire,
    ];

    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => &["hi", "hello", "hey", "greetings", "sup", "howdy"],
            Category::Projects => &["project", "work", "portfolio", "built", "created", "developed"],
            Category::DreamJournal => &["dream", "journal", "dream journal", "dreams"],
            Category::ProjectManagement => {
                &["project management", "management suite", "collaboration", "task"]
            }
            Category::Education => {
                &["education", "study", "degree", "university", "school", "background"]
            }
            Category::Waterloo => &["waterloo", "uw", "management engineering"],
            Category::Skills => &["skills", "technologies", "languages", "frameworks", "experience"],
            Category::TechStack => &["tech stack", "stack", "tools", "favorite"],
            Category::Contact => &["contact", "email", "reach", "connect", "linkedin", "github"],
            Category::Now => &["now", "current", "working on", "learning", "doing"],
            Category::Personal => &["personal", "hobbies", "interests", "fun", "like"],
            Category::Hire => {
                &["hire", "job", "opportunity", "work together", "available", "freelance"]
            }
            Category::Default => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::Projects => "projects",
            Category::DreamJournal => "dreamjournal",
            Category::ProjectManagement => "projectmanagement",
            Category::Education => "education",
            Category::Waterloo => "waterloo",
            Category::Skills => "skills",
            Category::TechStack => "techstack",
            Category::Contact => "contact",
            Category::Now => "now",
            Category::Personal => "personal",
            Category::Hire => "hire",
            Category::Default => "default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First category (in `MATCH_ORDER`) with a trigger contained in the
/// lowercased input. Plain substring search; "this" matches "hi".
pub fn classify(input: &str) -> Category {
    let lowered = input.to_lowercase();
    Category::MATCH_ORDER
        .into_iter()
        .find(|c| c.triggers().iter().any(|t| lowered.contains(t)))
        .unwrap_or(Category::Default)
}
