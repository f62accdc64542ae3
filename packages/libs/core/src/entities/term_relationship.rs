use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_term_relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub object_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub term_taxonomy_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::ObjectId",
        to = "super::post::Column::Id"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::term_taxonomy::Entity",
        from = "Column::TermTaxonomyId",
        to = "super::term_taxonomy::Column::TermTaxonomyId"
    )]
    TermTaxonomy,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::term_taxonomy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TermTaxonomy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TermRelationship(object_id={}, term_taxonomy_id={})",
            self.object_id, self.term_taxonomy_id,
        )
    }
}
