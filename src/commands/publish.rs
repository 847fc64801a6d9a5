//! Publish staged posts

use anyhow::Result;

use crate::admin::{publish_staged, PublishError, PublishReport, Staging};
use crate::store::JsonPostStore;
use crate::Workspace;

/// Publish everything staged; `author` overrides the configured author id
pub fn run(workspace: &Workspace, author: Option<&str>) -> Result<PublishReport> {
    let author_id = workspace
        .author_id(author)
        .ok_or(PublishError::MissingAuthor)?;

    let mut store = JsonPostStore::open(&workspace.data_dir)?;
    let mut staging = Staging::load(&workspace.data_dir)?;

    let report = publish_staged(&mut store, &mut staging, &author_id)?;
    staging.save()?;

    if report.is_complete() {
        println!("Published {} post(s).", report.published.len());
    } else {
        println!(
            "Published {} post(s), {} failed:",
            report.published.len(),
            report.failed.len()
        );
        for (title, reason) in &report.failed {
            println!("  {} ({})", title, reason);
        }
        println!("Failed posts are still staged.");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_front_matter;
    use crate::store::PostStore;
    use tempfile::TempDir;

    #[test]
    fn test_publish_uses_author_override() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path()).unwrap();

        let mut staging = Staging::load(&workspace.data_dir).unwrap();
        staging.stage(parse_front_matter("---\ntitle: Ship It\n---\n", "ship.md"));
        staging.save().unwrap();

        let err = run(&workspace, None).unwrap_err();
        assert!(err.downcast_ref::<PublishError>().is_some());

        let report = run(&workspace, Some("omar")).unwrap();
        assert_eq!(report.published.len(), 1);
        assert!(Staging::load(&workspace.data_dir).unwrap().is_empty());

        let store = JsonPostStore::open(&workspace.data_dir).unwrap();
        assert_eq!(store.get("ship-it").unwrap().unwrap().author_id, "omar");
    }
}
