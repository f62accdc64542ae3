use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_comments")]
pub struct Model {
    #[sea_orm(column_name = "comment_ID", primary_key)]
    pub comment_id: i64,
    #[sea_orm(column_name = "comment_post_ID")]
    pub comment_post_id: i64,
    pub comment_author: String,
    pub comment_author_email: String,
    pub comment_author_url: String,
    #[sea_orm(column_name = "comment_author_IP")]
    pub comment_author_ip: String,
    pub comment_date: DateTime,
    pub comment_date_gmt: DateTime,
    pub comment_content: String,
    pub comment_karma: i32,
    pub comment_approved: String,
    pub comment_agent: String,
    pub comment_type: String,
    pub comment_parent: i64,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::CommentPostId",
        to = "super::post::Column::Id"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::CommentParent",
        to = "Column::CommentId"
    )]
    Parent,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `comment_parent`의 센티널 0을 None으로 해석
    pub fn parent_id(&self) -> Option<i64> {
        (self.comment_parent != 0).then_some(self.comment_parent)
    }

    /// 익명 댓글(user_id 0)은 None
    pub fn author_user_id(&self) -> Option<i64> {
        (self.user_id != 0).then_some(self.user_id)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comment(comment_ID={}, comment_post_ID={}, comment_author={:?}, \
             comment_author_email={:?}, comment_date={}, comment_approved={:?}, \
             comment_type={:?}, comment_parent={}, user_id={})",
            self.comment_id,
            self.comment_post_id,
            self.comment_author,
            self.comment_author_email,
            self.comment_date,
            self.comment_approved,
            self.comment_type,
            self.comment_parent,
            self.user_id,
        )
    }
}
