use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Cpf,
    Phone,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Plans {
    Table,
    Id,
    Name,
    Description,
    PriceCents,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    PriceCents,
}

/// Contract ids are opaque strings shared with the gallery store.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    Name,
    Description,
    InviteToken,
}

#[derive(DeriveIden)]
enum ContractPlans {
    Table,
    ContractId,
    PlanId,
}

#[derive(DeriveIden)]
enum ContractProducts {
    Table,
    ContractId,
    ProductId,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Date,
    ContractId,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    Name,
    EventId,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    Name,
    UserId,
    BirthDate,
    Shift,
    ReferencePhotoUrl,
    SchoolCourse,
    ClassId,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    PlanId,
    SubscribedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Users::Cpf)
                            .string_len(14)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Phone).string_len(20).null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plans::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Plans::Description).text().null())
                    .col(ColumnDef::new(Plans::PriceCents).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Products::Description).text().null())
                    .col(ColumnDef::new(Products::PriceCents).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Contracts::Description).text().null())
                    .col(
                        ColumnDef::new(Contracts::InviteToken)
                            .string_len(36)
                            .null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContractPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractPlans::ContractId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractPlans::PlanId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ContractPlans::ContractId)
                            .col(ContractPlans::PlanId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_plans_contract")
                            .from(ContractPlans::Table, ContractPlans::ContractId)
                            .to(Contracts::Table, Contracts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_plans_plan")
                            .from(ContractPlans::Table, ContractPlans::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContractProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractProducts::ContractId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractProducts::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ContractProducts::ContractId)
                            .col(ContractProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_products_contract")
                            .from(ContractProducts::Table, ContractProducts::ContractId)
                            .to(Contracts::Table, Contracts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_products_product")
                            .from(ContractProducts::Table, ContractProducts::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Events::Date).date().null())
                    .col(ColumnDef::new(Events::ContractId).string_len(36).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_contract")
                            .from(Events::Table, Events::ContractId)
                            .to(Contracts::Table, Contracts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Classes::EventId).string_len(36).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_event")
                            .from(Classes::Table, Classes::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Students::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Students::BirthDate).date().null())
                    .col(ColumnDef::new(Students::Shift).string_len(50).null())
                    .col(
                        ColumnDef::new(Students::ReferencePhotoUrl)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Students::SchoolCourse).string_len(255).null())
                    .col(ColumnDef::new(Students::ClassId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_user")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_class")
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_user_id")
                    .table(Students::Table)
                    .col(Students::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Subscriptions::PlanId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::SubscribedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_user")
                            .from(Subscriptions::Table, Subscriptions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_plan")
                            .from(Subscriptions::Table, Subscriptions::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
