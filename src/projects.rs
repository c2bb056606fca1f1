//! Static page content: projects, education history, and the skill list.
//! Fixed at page load, the way the section set itself is.

#[derive(Clone, Debug)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub link: Option<&'static str>,
    pub year: u16,
}

#[derive(Clone, Debug)]
pub struct EducationItem {
    pub years: &'static str,
    pub school: &'static str,
    pub degree: &'static str,
    pub detail: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Orbit Tracker",
        description: "Real-time satellite pass predictions with an interactive sky map and notification scheduling.",
        tags: &["typescript", "webgl", "apis"],
        link: Some("https://github.com/example/orbit-tracker"),
        year: 2025,
    },
    Project {
        title: "Pantry Pal",
        description: "Recipe suggestions from whatever is left in the fridge, with a barcode scanner for restocking.",
        tags: &["react", "node", "postgres"],
        link: Some("https://github.com/example/pantry-pal"),
        year: 2024,
    },
    Project {
        title: "Inkwell",
        description: "A distraction-free markdown journal with full-text search and end-to-end encrypted sync.",
        tags: &["rust", "wasm", "crypto"],
        link: None,
        year: 2024,
    },
    Project {
        title: "Transit Pulse",
        description: "City bus arrival board for e-ink displays, built around a tiny power-sipping scheduler.",
        tags: &["embedded", "python", "gtfs"],
        link: Some("https://github.com/example/transit-pulse"),
        year: 2023,
    },
];

const EDUCATION: &[EducationItem] = &[
    EducationItem {
        years: "2021 — 2025",
        school: "State University of Technology",
        degree: "B.Sc. Computer Science",
        detail: "Focus on distributed systems and human-computer interaction.",
    },
    EducationItem {
        years: "2023",
        school: "Open Cloud Academy",
        degree: "Cloud Infrastructure Certificate",
        detail: "Hands-on coursework in container orchestration and observability.",
    },
];

pub const SKILLS: &[&str] = &[
    "Rust", "TypeScript", "React", "Node.js", "PostgreSQL", "Docker", "CSS", "WebAssembly",
];

/// Projects sorted newest first for the grid.
pub fn all_projects() -> Vec<Project> {
    let mut projects = PROJECTS.to_vec();
    projects.sort_by(|a, b| b.year.cmp(&a.year));
    projects
}

pub fn education_history() -> &'static [EducationItem] {
    EDUCATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_sorted_newest_first() {
        let projects = all_projects();
        assert!(!projects.is_empty());
        assert!(projects.windows(2).all(|pair| pair[0].year >= pair[1].year));
    }

    #[test]
    fn project_titles_are_unique() {
        let mut titles: Vec<&str> = PROJECTS.iter().map(|project| project.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), PROJECTS.len());
    }
}
