//! List site content

use anyhow::Result;

use crate::content::all_posts;
use crate::Travelog;

/// List every post the content store knows about, newest first
pub async fn run(travelog: &Travelog) -> Result<()> {
    let store = travelog.store()?;
    let posts = all_posts(store.as_ref(), &travelog.config.api).await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        let date = post
            .first_publication_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unpublished".to_string());
        println!("  {} - {} [{}]", date, post.data.title, post.uid);
    }

    Ok(())
}
