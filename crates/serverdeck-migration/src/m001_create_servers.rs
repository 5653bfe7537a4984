//! Миграция: создание таблицы servers.

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_create_servers"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Servers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Servers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Servers::Host).string().not_null())
                    .col(ColumnDef::new(Servers::Ip).string().not_null())
                    .col(ColumnDef::new(Servers::Description).text().not_null())
                    .col(ColumnDef::new(Servers::Image).string().not_null())
                    .col(
                        ColumnDef::new(Servers::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Servers::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Servers::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Индекс по order: список всегда читается отсортированным
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Servers::Table)
                    .col(Servers::Order)
                    .name("idx_servers_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Servers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Servers {
    Table,
    Id,
    Host,
    Ip,
    Description,
    Image,
    Order,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use crate::{Migrator, MigratorTrait};
    use sea_orm::{ConnectionTrait, Database};

    #[tokio::test]
    async fn test_up_down_up() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db.execute_unprepared(
            "INSERT INTO servers (id, host, ip, description, image, \"order\", created_at, updated_at) \
             VALUES ('a', 'h', '10.0.0.1', 'd', 'i', 1, 't', 't')",
        )
        .await
        .unwrap();

        Migrator::down(&db, None).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        assert!(db.execute_unprepared("SELECT 1 FROM servers").await.is_ok());
    }
}
