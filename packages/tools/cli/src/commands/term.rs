//! Term 관련 명령어

use psk_core::PressDb;

pub async fn list(db: &PressDb, taxonomy: Option<&str>, json: bool) -> anyhow::Result<()> {
    let terms = db.list_terms(taxonomy).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&terms)?);
        return Ok(());
    }

    if terms.is_empty() {
        println!("no terms");
        return Ok(());
    }
    for term in terms {
        println!("{term}");
    }
    Ok(())
}

pub async fn create(db: &PressDb, name: &str, slug: &str, taxonomy: &str) -> anyhow::Result<()> {
    let term = db.create_term(name, slug, taxonomy).await?;
    println!("created {term}");
    Ok(())
}
