//! CLI 명령어 구현

pub mod options;
pub mod post;
pub mod schema;
pub mod term;

use anyhow::Context;
use psk_core::PressDb;

/// --db 옵션 > PSK_DB_URL 환경변수 순으로 연결합니다.
pub async fn connect(db_url: Option<&str>) -> anyhow::Result<PressDb> {
    let url = match db_url {
        Some(url) => url.to_owned(),
        None => std::env::var("PSK_DB_URL")
            .context("database URL not set (pass --db or set PSK_DB_URL)")?,
    };
    Ok(PressDb::connect(&url).await?)
}
