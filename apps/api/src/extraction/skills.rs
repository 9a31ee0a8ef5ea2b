//! Skill extraction: case-insensitive substring search against a fixed
//! vocabulary. Best-effort by design — "java" inside "javascript" counts as
//! both, which is the accepted cost of substring matching.

/// The skill vocabulary. Entries are lowercase; the search result is a
/// deduplicated subset of this list and should be treated as a set.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "javascript", "typescript", "python", "java", "c++", "c#", "php", "ruby", "go", "rust",
    "kotlin", "swift", "scala", "sql",
    // Frameworks
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring", "rails",
    ".net", "laravel",
    // Datastores
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "sqlite", "cassandra",
    // Cloud platforms & infrastructure
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "heroku",
    // Tools
    "git", "jenkins", "jira", "linux", "graphql", "kafka", "photoshop", "figma", "excel",
    // Soft skills
    "leadership", "communication", "teamwork", "project management", "agile", "scrum",
    "mentoring", "problem solving",
];

/// Returns the vocabulary entries found in `text`, lowercased and
/// deduplicated. Empty input yields an empty set.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}
