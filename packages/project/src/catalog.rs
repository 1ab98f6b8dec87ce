//! Read-only project catalog shared by every request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use terrapulse_project_models::{DataSource, Project};

use crate::loader::load_projects;

/// Builds a lookup from `project_id` to project.
///
/// Duplicate identifiers are allowed: the later project wins.
#[must_use]
pub fn build_index(projects: &[Project]) -> BTreeMap<String, Project> {
    projects
        .iter()
        .map(|project| (project.project_id.clone(), project.clone()))
        .collect()
}

/// The loaded project set, its identifier index, and where it came from.
///
/// Constructed once at startup and never mutated, so it can be shared
/// between concurrent readers without locking.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
    index: BTreeMap<String, Project>,
    source: DataSource,
    data_path: PathBuf,
}

impl ProjectCatalog {
    /// Loads the catalog from the feature file at `path`, falling back to
    /// the sample set.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let (projects, source) = load_projects(path);
        Self::from_projects(projects, source, path.to_path_buf())
    }

    /// Wraps an already-loaded project set.
    #[must_use]
    pub fn from_projects(projects: Vec<Project>, source: DataSource, data_path: PathBuf) -> Self {
        let index = build_index(&projects);
        if index.len() != projects.len() {
            log::warn!(
                "{} duplicate project ids; later entries win lookups",
                projects.len() - index.len()
            );
        }
        Self {
            projects,
            index,
            source,
            data_path,
        }
    }

    /// All projects in load order, duplicates included.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project by identifier.
    #[must_use]
    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.index.get(project_id)
    }

    /// Where the projects came from.
    #[must_use]
    pub const fn source(&self) -> DataSource {
        self.source
    }

    /// Feature file path the catalog was loaded from (or expected at).
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Number of loaded projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the catalog holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_projects;

    #[test]
    fn index_is_last_write_wins() {
        let mut projects = sample_projects();
        let mut duplicate = projects[0].clone();
        duplicate.name = "Replacement".to_string();
        projects.push(duplicate);

        let index = build_index(&projects);
        assert_eq!(index.len(), 3);
        assert_eq!(index["nova-001"].name, "Replacement");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog =
            ProjectCatalog::from_projects(sample_projects(), DataSource::Sample, PathBuf::new());
        assert!(catalog.get("nova-999").is_none());
        assert_eq!(catalog.get("nova-002").map(|p| p.county.as_str()), Some("Prince William"));
    }

    #[test]
    fn list_keeps_duplicates_and_order() {
        let mut projects = sample_projects();
        projects.push(projects[0].clone());
        let catalog = ProjectCatalog::from_projects(projects, DataSource::Geojson, PathBuf::new());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.projects()[3].project_id, "nova-001");
        assert_eq!(catalog.source(), DataSource::Geojson);
    }
}
