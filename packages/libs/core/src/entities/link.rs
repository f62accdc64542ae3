use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub link_id: i64,
    pub link_url: String,
    pub link_name: String,
    pub link_image: String,
    pub link_target: String,
    pub link_description: String,
    pub link_visible: String,
    pub link_owner: i64,
    pub link_rating: i32,
    pub link_updated: DateTime,
    pub link_rel: String,
    pub link_notes: String,
    pub link_rss: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LinkOwner",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link(link_id={}, link_url={:?}, link_name={:?}, link_target={:?}, \
             link_visible={:?}, link_owner={}, link_rating={}, link_updated={})",
            self.link_id,
            self.link_url,
            self.link_name,
            self.link_target,
            self.link_visible,
            self.link_owner,
            self.link_rating,
            self.link_updated,
        )
    }
}
