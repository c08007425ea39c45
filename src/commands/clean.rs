//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Travelog;

/// Remove everything a previous generation produced
pub fn run(travelog: &Travelog) -> Result<()> {
    if travelog.public_dir.exists() {
        fs::remove_dir_all(&travelog.public_dir)?;
        tracing::info!("Deleted: {:?}", travelog.public_dir);
    }

    Ok(())
}
