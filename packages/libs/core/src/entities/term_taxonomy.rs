use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_term_taxonomy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub term_taxonomy_id: i64,
    pub term_id: i64,
    pub taxonomy: String,
    pub description: String,
    pub parent: i64,
    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::term::Entity",
        from = "Column::TermId",
        to = "super::term::Column::TermId"
    )]
    Term,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::Parent",
        to = "Column::TermTaxonomyId"
    )]
    ParentTaxonomy,
    #[sea_orm(has_many = "super::term_relationship::Entity")]
    Relationships,
}

impl Related<super::term::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Term.def()
    }
}

impl Related<super::term_relationship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Relationships.def()
    }
}

// TermTaxonomy ↔ Post many-to-many, wp_term_relationships를 경유
impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        super::term_relationship::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::term_relationship::Relation::TermTaxonomy.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `parent`의 센티널 0을 None으로 해석
    pub fn parent_id(&self) -> Option<i64> {
        (self.parent != 0).then_some(self.parent)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TermTaxonomy(term_taxonomy_id={}, term_id={}, taxonomy={:?}, description={:?}, \
             parent={}, count={})",
            self.term_taxonomy_id,
            self.term_id,
            self.taxonomy,
            self.description,
            self.parent,
            self.count,
        )
    }
}
