//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove the build output
pub fn run(site: &Site) -> Result<()> {
    if site.dist_dir.exists() {
        fs::remove_dir_all(&site.dist_dir)?;
        tracing::info!("Deleted: {:?}", site.dist_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", site.dist_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_dist_only() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(site.dist_dir.join("data")).unwrap();
        fs::create_dir_all(&site.data_dir).unwrap();

        run(&site).unwrap();
        assert!(!site.dist_dir.exists());
        assert!(site.data_dir.exists());

        // second run is a no-op
        run(&site).unwrap();
    }
}
