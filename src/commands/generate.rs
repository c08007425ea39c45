//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Travelog;

/// Generate the whole site from the content store
pub async fn run(travelog: &Travelog) -> Result<()> {
    let start = std::time::Instant::now();

    let store = travelog.store()?;
    let generator = Generator::new(travelog, store)?;
    let count = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} post pages in {:.2}s",
        count,
        duration.as_secs_f64()
    );

    Ok(())
}
