use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Public URL on the object store
    pub url: String,
    pub event_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
    #[sea_orm(has_many = "super::photo_students::Entity")]
    PhotoStudents,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::photo_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoStudents.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::photo_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::photo_students::Relation::Photo.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
