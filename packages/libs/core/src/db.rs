//! 연결 핸들과 타입이 있는 오퍼레이션
//!
//! 애플리케이션은 시작 시 [`PressDb::connect`]로 핸들을 하나 만들고,
//! 이후 모든 스키마/조회/변경 오퍼레이션을 이 핸들로 수행합니다.
//! 여러 행을 건드리는 변경은 스토리지 트랜잭션 안에서 실행됩니다.
//!
//! 삭제는 캐스케이드하지 않습니다. 포스트를 지워도 댓글/메타/텀 연결은
//! 남으며, 정리는 호출자 책임입니다.

use chrono::{Local, Utc};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entities::{comment, link, option, post, postmeta, term_relationship, user, usermeta};
use crate::error::{Error, Result};
use crate::schema;
use crate::taxonomy::{self, Term};

/// 단일 사이트의 기본 blog id
pub const DEFAULT_BLOG_ID: i64 = 0;

/// WordPress 데이터베이스 핸들
#[derive(Clone)]
pub struct PressDb {
    conn: DatabaseConnection,
}

impl PressDb {
    /// 데이터베이스에 연결합니다.
    pub async fn connect(url: &str) -> Result<Self> {
        let mut opts = ConnectOptions::new(url.to_owned());
        opts.max_connections(5);
        Self::connect_with_options(opts).await
    }

    /// 풀 크기 등을 직접 지정해 연결합니다.
    pub async fn connect_with_options(opts: ConnectOptions) -> Result<Self> {
        let conn = Database::connect(opts).await?;
        Ok(Self { conn })
    }

    /// 내부 연결. 이 크레이트가 노출하지 않는 쿼리를 직접 실행할 때
    /// 사용합니다.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// 스키마를 설치합니다 (멱등).
    pub async fn install_schema(&self) -> Result<()> {
        schema::install_schema(&self.conn).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_user(
        &self,
        login: &str,
        email: &str,
        display_name: &str,
    ) -> Result<user::Model> {
        let now = Utc::now().naive_utc();
        Ok(user::ActiveModel {
            user_login: Set(login.to_owned()),
            user_pass: Set(String::new()),
            user_nicename: Set(slugify(login)),
            user_email: Set(email.to_owned()),
            user_url: Set(String::new()),
            user_registered: Set(now),
            user_activation_key: Set(String::new()),
            user_status: Set(0),
            display_name: Set(display_name.to_owned()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn find_user_by_login(&self, login: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::UserLogin.eq(login))
            .one(&self.conn)
            .await?)
    }

    pub async fn posts_by_author(&self, user_id: i64) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::PostAuthor.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn user_links(&self, user_id: i64) -> Result<Vec<link::Model>> {
        Ok(link::Entity::find()
            .filter(link::Column::LinkOwner.eq(user_id))
            .order_by_asc(link::Column::LinkId)
            .all(&self.conn)
            .await?)
    }

    pub async fn add_user_meta(
        &self,
        user_id: i64,
        key: &str,
        value: &str,
    ) -> Result<usermeta::Model> {
        Ok(usermeta::ActiveModel {
            user_id: Set(user_id),
            meta_key: Set(Some(key.to_owned())),
            meta_value: Set(Some(value.to_owned())),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn user_meta(&self, user_id: i64) -> Result<Vec<usermeta::Model>> {
        Ok(usermeta::Entity::find()
            .filter(usermeta::Column::UserId.eq(user_id))
            .order_by_asc(usermeta::Column::UmetaId)
            .all(&self.conn)
            .await?)
    }

    /// 같은 키의 메타 행은 여러 개일 수 있습니다. 값 전부를 돌려줍니다.
    pub async fn user_meta_values(&self, user_id: i64, key: &str) -> Result<Vec<String>> {
        let rows = usermeta::Entity::find()
            .filter(usermeta::Column::UserId.eq(user_id))
            .filter(usermeta::Column::MetaKey.eq(key))
            .order_by_asc(usermeta::Column::UmetaId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().filter_map(|m| m.meta_value).collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Posts
    // ─────────────────────────────────────────────────────────────────────────

    /// 포스트를 만들고 WordPress 컬럼 기본값을 채웁니다
    /// (`post_status='publish'`, `comment_status='open'`, `ping_status='open'`,
    /// `post_type='post'`, 타임스탬프는 생성 시각).
    pub async fn create_post(
        &self,
        author: Option<i64>,
        title: &str,
        content: &str,
    ) -> Result<post::Model> {
        let local = Local::now().naive_local();
        let gmt = Utc::now().naive_utc();
        Ok(post::ActiveModel {
            post_author: Set(author.unwrap_or(0)),
            post_date: Set(local),
            post_date_gmt: Set(gmt),
            post_content: Set(content.to_owned()),
            post_title: Set(title.to_owned()),
            post_excerpt: Set(String::new()),
            post_status: Set("publish".to_owned()),
            comment_status: Set("open".to_owned()),
            ping_status: Set("open".to_owned()),
            post_password: Set(String::new()),
            post_name: Set(slugify(title)),
            to_ping: Set(String::new()),
            pinged: Set(String::new()),
            post_modified: Set(local),
            post_modified_gmt: Set(gmt),
            post_content_filtered: Set(String::new()),
            post_parent: Set(0),
            guid: Set(String::new()),
            menu_order: Set(0),
            post_type: Set("post".to_owned()),
            post_mime_type: Set(String::new()),
            comment_count: Set(0),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<post::Model>> {
        Ok(post::Entity::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list_posts(&self, limit: u64) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .order_by_desc(post::Column::PostDate)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn post_author(&self, post: &post::Model) -> Result<Option<user::Model>> {
        if post.author_id().is_none() {
            return Ok(None);
        }
        Ok(post.find_related(user::Entity).one(&self.conn).await?)
    }

    /// 부모 포스트. `post_parent`가 센티널 0이면 None.
    pub async fn post_parent(&self, post: &post::Model) -> Result<Option<post::Model>> {
        match post.parent_id() {
            Some(parent) => self.get_post(parent).await,
            None => Ok(None),
        }
    }

    /// 자식 포스트들. 부모 컬럼에 대한 인덱스 조회로 계산합니다.
    pub async fn post_children(&self, post_id: i64) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::PostParent.eq(post_id))
            .order_by_asc(post::Column::MenuOrder)
            .order_by_asc(post::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// 부모 참조를 바꿉니다. None이면 루트(센티널 0)가 됩니다.
    /// 사이클 방지는 호출자 책임입니다.
    pub async fn set_post_parent(&self, post_id: i64, parent: Option<i64>) -> Result<()> {
        post::Entity::update(post::ActiveModel {
            id: Unchanged(post_id),
            post_parent: Set(parent.unwrap_or(0)),
            ..Default::default()
        })
        .exec(&self.conn)
        .await?;
        Ok(())
    }

    /// 포스트 한 건 삭제. 댓글/메타/텀 연결은 캐스케이드하지 않습니다.
    pub async fn delete_post(&self, id: i64) -> Result<bool> {
        let res = post::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn add_post_meta(
        &self,
        post_id: i64,
        key: &str,
        value: &str,
    ) -> Result<postmeta::Model> {
        Ok(postmeta::ActiveModel {
            post_id: Set(post_id),
            meta_key: Set(Some(key.to_owned())),
            meta_value: Set(Some(value.to_owned())),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn post_meta(&self, post_id: i64) -> Result<Vec<postmeta::Model>> {
        Ok(postmeta::Entity::find()
            .filter(postmeta::Column::PostId.eq(post_id))
            .order_by_asc(postmeta::Column::MetaId)
            .all(&self.conn)
            .await?)
    }

    /// 같은 키의 메타 행은 여러 개일 수 있습니다. 값 전부를 돌려줍니다.
    pub async fn post_meta_values(&self, post_id: i64, key: &str) -> Result<Vec<String>> {
        let rows = postmeta::Entity::find()
            .filter(postmeta::Column::PostId.eq(post_id))
            .filter(postmeta::Column::MetaKey.eq(key))
            .order_by_asc(postmeta::Column::MetaId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().filter_map(|m| m.meta_value).collect())
    }

    /// 키의 첫 번째 값
    pub async fn post_meta_value(&self, post_id: i64, key: &str) -> Result<Option<String>> {
        Ok(self.post_meta_values(post_id, key).await?.into_iter().next())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comments
    // ─────────────────────────────────────────────────────────────────────────

    /// 댓글을 만듭니다. `user`가 None이면 익명 댓글(user_id 0)입니다.
    pub async fn create_comment(
        &self,
        post_id: i64,
        user: Option<i64>,
        author: &str,
        content: &str,
    ) -> Result<comment::Model> {
        let local = Local::now().naive_local();
        let gmt = Utc::now().naive_utc();
        Ok(comment::ActiveModel {
            comment_post_id: Set(post_id),
            comment_author: Set(author.to_owned()),
            comment_author_email: Set(String::new()),
            comment_author_url: Set(String::new()),
            comment_author_ip: Set(String::new()),
            comment_date: Set(local),
            comment_date_gmt: Set(gmt),
            comment_content: Set(content.to_owned()),
            comment_karma: Set(0),
            comment_approved: Set("1".to_owned()),
            comment_agent: Set(String::new()),
            comment_type: Set(String::new()),
            comment_parent: Set(0),
            user_id: Set(user.unwrap_or(0)),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn get_comment(&self, id: i64) -> Result<Option<comment::Model>> {
        Ok(comment::Entity::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<comment::Model>> {
        Ok(comment::Entity::find()
            .filter(comment::Column::CommentPostId.eq(post_id))
            .order_by_asc(comment::Column::CommentId)
            .all(&self.conn)
            .await?)
    }

    /// 댓글이 달린 포스트 (back-reference)
    pub async fn comment_post(&self, comment: &comment::Model) -> Result<Option<post::Model>> {
        Ok(comment.find_related(post::Entity).one(&self.conn).await?)
    }

    /// 답글들. 부모 컬럼에 대한 인덱스 조회로 계산합니다.
    pub async fn comment_children(&self, comment_id: i64) -> Result<Vec<comment::Model>> {
        Ok(comment::Entity::find()
            .filter(comment::Column::CommentParent.eq(comment_id))
            .order_by_asc(comment::Column::CommentId)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_comment_parent(&self, comment_id: i64, parent: Option<i64>) -> Result<()> {
        comment::Entity::update(comment::ActiveModel {
            comment_id: Unchanged(comment_id),
            comment_parent: Set(parent.unwrap_or(0)),
            ..Default::default()
        })
        .exec(&self.conn)
        .await?;
        Ok(())
    }

    pub async fn delete_comment(&self, id: i64) -> Result<bool> {
        let res = comment::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_link(&self, owner: i64, name: &str, url: &str) -> Result<link::Model> {
        Ok(link::ActiveModel {
            link_url: Set(url.to_owned()),
            link_name: Set(name.to_owned()),
            link_image: Set(String::new()),
            link_target: Set(String::new()),
            link_description: Set(String::new()),
            link_visible: Set("Y".to_owned()),
            link_owner: Set(owner),
            link_rating: Set(0),
            link_updated: Set(Utc::now().naive_utc()),
            link_rel: Set(String::new()),
            link_notes: Set(String::new()),
            link_rss: Set(String::new()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn link_owner(&self, link: &link::Model) -> Result<Option<user::Model>> {
        Ok(link.find_related(user::Entity).one(&self.conn).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Options
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_option(&self, name: &str) -> Result<Option<String>> {
        let row = option::Entity::find()
            .filter(option::Column::BlogId.eq(DEFAULT_BLOG_ID))
            .filter(option::Column::OptionName.eq(name))
            .one(&self.conn)
            .await?;
        Ok(row.map(|o| o.option_value))
    }

    /// 옵션을 쓰거나 덮어씁니다.
    ///
    /// `option_id`는 복합 기본키의 일부라 엔진이 채번하지 않습니다.
    /// 새 행에는 현재 최대값 + 1을 씁니다.
    pub async fn set_option(&self, name: &str, value: &str) -> Result<()> {
        let existing = option::Entity::find()
            .filter(option::Column::BlogId.eq(DEFAULT_BLOG_ID))
            .filter(option::Column::OptionName.eq(name))
            .one(&self.conn)
            .await?;

        match existing {
            Some(row) => {
                option::Entity::update(option::ActiveModel {
                    option_id: Unchanged(row.option_id),
                    blog_id: Unchanged(row.blog_id),
                    option_name: Unchanged(row.option_name),
                    option_value: Set(value.to_owned()),
                    autoload: Unchanged(row.autoload),
                })
                .exec(&self.conn)
                .await?;
            }
            None => {
                let next_id = option::Entity::find()
                    .order_by_desc(option::Column::OptionId)
                    .one(&self.conn)
                    .await?
                    .map(|o| o.option_id + 1)
                    .unwrap_or(1);
                option::ActiveModel {
                    option_id: Set(next_id),
                    blog_id: Set(DEFAULT_BLOG_ID),
                    option_name: Set(name.to_owned()),
                    option_value: Set(value.to_owned()),
                    autoload: Set("yes".to_owned()),
                }
                .insert(&self.conn)
                .await?;
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Terms
    // ─────────────────────────────────────────────────────────────────────────

    /// 텀을 만듭니다. wp_terms/wp_term_taxonomy 두 행이 한 트랜잭션에서
    /// 함께 커밋됩니다.
    pub async fn create_term(&self, name: &str, slug: &str, taxonomy: &str) -> Result<Term> {
        let txn = self.conn.begin().await?;
        let term = taxonomy::create_term(&txn, name, slug, taxonomy).await?;
        txn.commit().await?;
        Ok(term)
    }

    pub async fn find_term(&self, taxonomy: &str, slug: &str) -> Result<Option<Term>> {
        taxonomy::find_term(&self.conn, taxonomy, slug).await
    }

    /// [`PressDb::find_term`]과 같지만, 없으면 에러입니다.
    pub async fn require_term(&self, taxonomy: &str, slug: &str) -> Result<Term> {
        self.find_term(taxonomy, slug)
            .await?
            .ok_or_else(|| Error::TermNotFound {
                taxonomy: taxonomy.to_owned(),
                slug: slug.to_owned(),
            })
    }

    pub async fn get_term(&self, term_taxonomy_id: i64) -> Result<Option<Term>> {
        taxonomy::get_term(&self.conn, term_taxonomy_id).await
    }

    /// 파사드의 변경 사항을 두 백킹 행에 함께 저장합니다.
    pub async fn update_term(&self, term: &Term) -> Result<()> {
        let txn = self.conn.begin().await?;
        term.save(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_term(&self, term: &Term) -> Result<()> {
        let txn = self.conn.begin().await?;
        taxonomy::delete_term(&txn, term).await?;
        txn.commit().await?;
        Ok(())
    }

    /// 포스트에 텀을 연결합니다. join row 추가와 count 갱신이 한
    /// 트랜잭션입니다. 이미 연결돼 있으면 false.
    pub async fn attach_term(&self, post_id: i64, term: &Term) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let attached = taxonomy::attach_term(&txn, post_id, term).await?;
        txn.commit().await?;
        Ok(attached)
    }

    pub async fn detach_term(&self, post_id: i64, term: &Term) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let detached = taxonomy::detach_term(&txn, post_id, term).await?;
        txn.commit().await?;
        Ok(detached)
    }

    /// 한 taxonomy 안에서 포스트의 텀 집합을 통째로 교체합니다.
    pub async fn set_post_terms(
        &self,
        post_id: i64,
        taxonomy_name: &str,
        terms: &[Term],
    ) -> Result<()> {
        let txn = self.conn.begin().await?;
        taxonomy::set_post_terms(&txn, post_id, taxonomy_name, terms).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn terms_for_post(
        &self,
        post_id: i64,
        taxonomy_name: Option<&str>,
    ) -> Result<Vec<Term>> {
        taxonomy::terms_for_post(&self.conn, post_id, taxonomy_name).await
    }

    pub async fn posts_for_term(&self, term: &Term) -> Result<Vec<post::Model>> {
        term.posts(&self.conn).await
    }

    pub async fn list_terms(&self, taxonomy_name: Option<&str>) -> Result<Vec<Term>> {
        taxonomy::list_terms(&self.conn, taxonomy_name).await
    }

    /// 포스트의 join row 수. 중복 없는 연결 상태 점검에 씁니다.
    pub async fn term_relationship_count(&self, post_id: i64) -> Result<u64> {
        Ok(term_relationship::Entity::find()
            .filter(term_relationship::Column::ObjectId.eq(post_id))
            .count(&self.conn)
            .await?)
    }
}

/// 제목을 `post_name`/`user_nicename`용 슬러그로 바꿉니다.
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
        assert_eq!(slugify("Earth"), "earth");
        assert_eq!(slugify("a/b?c"), "a-b-c");
    }
}
