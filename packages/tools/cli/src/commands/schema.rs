//! Schema 관련 명령어

use psk_core::PressDb;

pub async fn install(db: &PressDb) -> anyhow::Result<()> {
    db.install_schema().await?;
    println!("WordPress schema installed");
    Ok(())
}
