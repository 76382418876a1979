use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    /// Opaque id shared with the gallery store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(unique)]
    pub invite_token: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::plans::Entity> for Entity {
    fn to() -> RelationDef {
        super::contract_plans::Relation::Plan.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::contract_plans::Relation::Contract.def().rev())
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::contract_products::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::contract_products::Relation::Contract.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
