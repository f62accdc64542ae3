use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_terms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub term_id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub term_group: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::term_taxonomy::Entity")]
    Taxonomies,
}

impl Related<super::term_taxonomy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Taxonomies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Term(term_id={}, name={:?}, slug={:?}, term_group={})",
            self.term_id, self.name, self.slug, self.term_group,
        )
    }
}
