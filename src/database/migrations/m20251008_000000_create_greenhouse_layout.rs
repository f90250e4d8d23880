use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GreenhouseLayout::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GreenhouseLayout::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GreenhouseLayout::Name).string().not_null())
                    .col(
                        ColumnDef::new(GreenhouseLayout::ComponentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::XPosition)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::YPosition)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::Width)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::Height)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(GreenhouseLayout::Color).string().not_null())
                    .col(
                        ColumnDef::new(GreenhouseLayout::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::Metadata)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::LayerOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GreenhouseLayout::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_greenhouse_layout_layer_order")
                    .table(GreenhouseLayout::Table)
                    .col(GreenhouseLayout::LayerOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GreenhouseLayout::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GreenhouseLayout {
    Table,
    Id,
    Name,
    ComponentType,
    XPosition,
    YPosition,
    Width,
    Height,
    Color,
    Status,
    Metadata,
    LayerOrder,
    CreatedAt,
    UpdatedAt,
}
