use sea_orm::entity::prelude::*;

/// Person ↔ relationship link row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons_relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub person_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub relationship_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::persons::Entity",
        from = "Column::PersonId",
        to = "super::persons::Column::Id",
        on_delete = "Cascade"
    )]
    Person,
    #[sea_orm(
        belongs_to = "super::relationships::Entity",
        from = "Column::RelationshipId",
        to = "super::relationships::Column::Id",
        on_delete = "Cascade"
    )]
    Relationship,
}

impl ActiveModelBehavior for ActiveModel {}
