use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
    Url,
    EventId,
}

/// Photo tagging link table, one row per (photo, student) pair
#[derive(DeriveIden)]
enum PhotoStudents {
    Table,
    PhotoId,
    StudentId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Photos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Photos::Url).string_len(255).not_null())
                    .col(ColumnDef::new(Photos::EventId).string_len(36).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_event")
                            .from(Photos::Table, Photos::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_photos_event_id")
                    .table(Photos::Table)
                    .col(Photos::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PhotoStudents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PhotoStudents::PhotoId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PhotoStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PhotoStudents::PhotoId)
                            .col(PhotoStudents::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_students_photo")
                            .from(PhotoStudents::Table, PhotoStudents::PhotoId)
                            .to(Photos::Table, Photos::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_students_student")
                            .from(PhotoStudents::Table, PhotoStudents::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // gallery lookups go through student_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_photo_students_student_id")
                    .table(PhotoStudents::Table)
                    .col(PhotoStudents::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhotoStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await?;
        Ok(())
    }
}
