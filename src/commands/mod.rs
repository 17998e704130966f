pub mod fixes;
pub mod status;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::util::slugify;

/// Per-brand workspace directory under the workspace root.
pub fn brand_workspace(workspace_root: &Path, brand: &str) -> Result<PathBuf> {
    let slug = slugify(brand);
    if slug.is_empty() {
        bail!("brand name produces an empty workspace slug: {brand:?}");
    }
    Ok(workspace_root.join(slug))
}
