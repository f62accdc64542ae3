//! Option 관련 명령어

use psk_core::PressDb;

pub async fn get(db: &PressDb, name: &str) -> anyhow::Result<()> {
    match db.get_option(name).await? {
        Some(value) => println!("{value}"),
        None => anyhow::bail!("option {name:?} not set"),
    }
    Ok(())
}

pub async fn set(db: &PressDb, name: &str, value: &str) -> anyhow::Result<()> {
    db.set_option(name, value).await?;
    println!("{name} = {value}");
    Ok(())
}
