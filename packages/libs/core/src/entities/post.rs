use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_posts")]
pub struct Model {
    #[sea_orm(column_name = "ID", primary_key)]
    pub id: i64,
    pub post_author: i64,
    pub post_date: DateTime,
    pub post_date_gmt: DateTime,
    pub post_content: String,
    pub post_title: String,
    pub post_excerpt: String,
    pub post_status: String,
    pub comment_status: String,
    pub ping_status: String,
    pub post_password: String,
    pub post_name: String,
    pub to_ping: String,
    pub pinged: String,
    pub post_modified: DateTime,
    pub post_modified_gmt: DateTime,
    pub post_content_filtered: String,
    pub post_parent: i64,
    pub guid: String,
    pub menu_order: i32,
    pub post_type: String,
    pub post_mime_type: String,
    pub comment_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PostAuthor",
        to = "super::user::Column::Id"
    )]
    Author,
    #[sea_orm(belongs_to = "Entity", from = "Column::PostParent", to = "Column::Id")]
    Parent,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::postmeta::Entity")]
    Meta,
    #[sea_orm(has_many = "super::term_relationship::Entity")]
    TermRelationships,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::postmeta::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meta.def()
    }
}

impl Related<super::term_relationship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TermRelationships.def()
    }
}

// Post ↔ TermTaxonomy many-to-many, wp_term_relationships를 경유
impl Related<super::term_taxonomy::Entity> for Entity {
    fn to() -> RelationDef {
        super::term_relationship::Relation::TermTaxonomy.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::term_relationship::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `post_parent`의 센티널 0을 None으로 해석
    pub fn parent_id(&self) -> Option<i64> {
        (self.post_parent != 0).then_some(self.post_parent)
    }

    /// `post_author`의 센티널 0을 None으로 해석
    pub fn author_id(&self) -> Option<i64> {
        (self.post_author != 0).then_some(self.post_author)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Post(ID={}, post_author={}, post_date={}, post_title={:?}, post_status={:?}, \
             comment_status={:?}, ping_status={:?}, post_name={:?}, post_parent={}, guid={:?}, \
             menu_order={}, post_type={:?}, post_mime_type={:?}, comment_count={})",
            self.id,
            self.post_author,
            self.post_date,
            self.post_title,
            self.post_status,
            self.comment_status,
            self.ping_status,
            self.post_name,
            self.post_parent,
            self.guid,
            self.menu_order,
            self.post_type,
            self.post_mime_type,
            self.comment_count,
        )
    }
}
