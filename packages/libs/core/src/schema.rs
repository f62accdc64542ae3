//! 스키마 설치
//!
//! WordPress `wp_*` 테이블 10개의 DDL을 의존성 순서대로 실행합니다.
//! 테이블/컬럼 이름은 기존 WordPress 데이터베이스와 바이트 단위로 동일합니다.
//!
//! 외래키는 문서화 목적으로 선언만 합니다. WordPress는 `post_parent`,
//! `comment_parent`, `user_id`, `wp_term_taxonomy.parent` 등에 "참조 없음"
//! 센티널 0을 저장하므로, 외래키를 강제하면 정상 데이터가 거부됩니다.
//! SQLite의 foreign_keys pragma는 켜지 않습니다. 유니크 제약은 항상 강제됩니다.

use sea_orm::ConnectionTrait;

use crate::error::Result;

/// 의존성 순서대로 정렬된 DDL
const CREATE_TABLES: [&str; 10] = [
    r#"CREATE TABLE IF NOT EXISTS wp_users (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        user_login VARCHAR(60) NOT NULL,
        user_pass VARCHAR(64) NOT NULL,
        user_nicename VARCHAR(50) NOT NULL,
        user_email VARCHAR(100) NOT NULL,
        user_url VARCHAR(100) NOT NULL,
        user_registered TEXT NOT NULL,
        user_activation_key VARCHAR(60) NOT NULL,
        user_status INTEGER NOT NULL,
        display_name VARCHAR(250) NOT NULL
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_posts (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        post_author INTEGER NOT NULL DEFAULT 0 REFERENCES wp_users (ID),
        post_date TEXT NOT NULL,
        post_date_gmt TEXT NOT NULL,
        post_content TEXT NOT NULL,
        post_title TEXT NOT NULL,
        post_excerpt TEXT NOT NULL,
        post_status VARCHAR(10) NOT NULL DEFAULT 'publish',
        comment_status VARCHAR(15) NOT NULL DEFAULT 'open',
        ping_status VARCHAR(6) NOT NULL DEFAULT 'open',
        post_password VARCHAR(20) NOT NULL DEFAULT '',
        post_name VARCHAR(200) NOT NULL,
        to_ping TEXT NOT NULL DEFAULT '',
        pinged TEXT NOT NULL DEFAULT '',
        post_modified TEXT NOT NULL,
        post_modified_gmt TEXT NOT NULL,
        post_content_filtered TEXT NOT NULL DEFAULT '',
        post_parent INTEGER NOT NULL DEFAULT 0 REFERENCES wp_posts (ID),
        guid VARCHAR(255) NOT NULL,
        menu_order INTEGER NOT NULL DEFAULT 0,
        post_type VARCHAR(20) NOT NULL DEFAULT 'post',
        post_mime_type VARCHAR(100) NOT NULL,
        comment_count INTEGER NOT NULL DEFAULT 0
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_comments (
        comment_ID INTEGER PRIMARY KEY AUTOINCREMENT,
        comment_post_ID INTEGER NOT NULL REFERENCES wp_posts (ID),
        comment_author TEXT NOT NULL,
        comment_author_email VARCHAR(100) NOT NULL,
        comment_author_url VARCHAR(200) NOT NULL,
        comment_author_IP VARCHAR(100) NOT NULL,
        comment_date TEXT NOT NULL,
        comment_date_gmt TEXT NOT NULL,
        comment_content TEXT NOT NULL,
        comment_karma INTEGER NOT NULL,
        comment_approved VARCHAR(4) NOT NULL,
        comment_agent VARCHAR(255) NOT NULL,
        comment_type VARCHAR(20) NOT NULL,
        comment_parent INTEGER NOT NULL REFERENCES wp_comments (comment_ID),
        user_id INTEGER NOT NULL REFERENCES wp_users (ID)
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_links (
        link_id INTEGER PRIMARY KEY AUTOINCREMENT,
        link_url VARCHAR(255) NOT NULL,
        link_name VARCHAR(255) NOT NULL,
        link_image VARCHAR(255) NOT NULL,
        link_target VARCHAR(25) NOT NULL,
        link_description VARCHAR(255) NOT NULL,
        link_visible VARCHAR(1) NOT NULL,
        link_owner INTEGER NOT NULL REFERENCES wp_users (ID),
        link_rating INTEGER NOT NULL,
        link_updated TEXT NOT NULL,
        link_rel VARCHAR(255) NOT NULL,
        link_notes TEXT NOT NULL,
        link_rss VARCHAR(255) NOT NULL
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_options (
        option_id INTEGER NOT NULL,
        blog_id INTEGER NOT NULL,
        option_name VARCHAR(64) NOT NULL,
        option_value TEXT NOT NULL,
        autoload VARCHAR(3) NOT NULL,
        PRIMARY KEY (option_id, blog_id, option_name)
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_postmeta (
        meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES wp_posts (ID),
        meta_key VARCHAR(255),
        meta_value TEXT
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_usermeta (
        umeta_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES wp_users (ID),
        meta_key VARCHAR(255),
        meta_value TEXT
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_terms (
        term_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(55) NOT NULL,
        slug VARCHAR(200) NOT NULL,
        term_group INTEGER NOT NULL DEFAULT 0,
        UNIQUE (slug)
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_term_taxonomy (
        term_taxonomy_id INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id INTEGER NOT NULL REFERENCES wp_terms (term_id),
        taxonomy VARCHAR(32) NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        parent INTEGER NOT NULL DEFAULT 0 REFERENCES wp_term_taxonomy (term_taxonomy_id),
        count INTEGER NOT NULL DEFAULT 0,
        UNIQUE (term_id, taxonomy)
    );"#,
    r#"CREATE TABLE IF NOT EXISTS wp_term_relationships (
        object_id INTEGER NOT NULL REFERENCES wp_posts (ID),
        term_taxonomy_id INTEGER NOT NULL REFERENCES wp_term_taxonomy (term_taxonomy_id),
        PRIMARY KEY (object_id, term_taxonomy_id)
    );"#,
];

/// 스키마를 설치합니다. 이미 설치된 테이블은 건드리지 않습니다.
pub async fn install_schema<C: ConnectionTrait>(conn: &C) -> Result<()> {
    for ddl in CREATE_TABLES {
        conn.execute_unprepared(ddl).await?;
    }
    tracing::info!(tables = CREATE_TABLES.len(), "wordpress schema installed");
    Ok(())
}
