//! Post 관련 명령어

use psk_core::PressDb;

pub async fn list(db: &PressDb, limit: u64, json: bool) -> anyhow::Result<()> {
    let posts = db.list_posts(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("no posts");
        return Ok(());
    }
    for post in posts {
        println!("{post}");
    }
    Ok(())
}

pub async fn show(db: &PressDb, id: i64) -> anyhow::Result<()> {
    let Some(post) = db.get_post(id).await? else {
        anyhow::bail!("post {id} not found");
    };
    println!("{post}");

    let comments = db.comments_for_post(post.id).await?;
    println!("comments: {}", comments.len());
    for comment in comments {
        println!("- {comment}");
    }

    let terms = db.terms_for_post(post.id, None).await?;
    println!("terms: {}", terms.len());
    for term in terms {
        println!("- {term}");
    }
    Ok(())
}
