//! Subcommand handlers

use super::{AllArgs, Command, LoadArgs, SynthArgs, UsersArgs};
use crate::config::{DatabaseConfig, DatabaseEngine, SeedConfig, SqlSeedConfig, UsersSeedConfig, Validate};
use crate::core::seed::{
    FixtureSource, MAX_BATCH_SIZE, Record, SeedTarget, SqlScript, batch_count, chunk, seed_collection,
    seed_sql_target, seed_users,
};
use crate::infra::{synthesize, users_service_stack};
use crate::storage::{DynamoDbStore, SeedDatabase, SqlTableStore};
use crate::utils::error::{Result, SeedError};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{info, warn};

/// Run one subcommand to completion
pub async fn run(command: Command, config: &SeedConfig) -> Result<()> {
    match command {
        Command::Auth => seed_sql(SeedTarget::Auth, config).await,
        Command::Orders => seed_sql(SeedTarget::Orders, config).await,
        Command::Inventory => seed_sql(SeedTarget::Inventory, config).await,
        Command::Users(args) => users(args, config).await,
        Command::All(args) => all(args, config).await,
        Command::Load(args) => load(args, config).await,
        Command::Synth(args) => synth(args, config).await,
        Command::Validate => validate(config),
    }
}

const SQL_TARGETS: [SeedTarget; 3] = [SeedTarget::Auth, SeedTarget::Orders, SeedTarget::Inventory];

fn sql_config(target: SeedTarget, config: &SeedConfig) -> Result<&SqlSeedConfig> {
    match target {
        SeedTarget::Auth => Ok(&config.auth),
        SeedTarget::Orders => Ok(&config.orders),
        SeedTarget::Inventory => Ok(&config.inventory),
        SeedTarget::Users => Err(SeedError::config("users target is not seeded from SQL")),
    }
}

async fn seed_sql(target: SeedTarget, config: &SeedConfig) -> Result<()> {
    let target_config = sql_config(target, config)?;
    seed_sql_target(target, target_config, &config.resolve(&target_config.script)).await?;
    Ok(())
}

async fn users(args: UsersArgs, config: &SeedConfig) -> Result<()> {
    let mut users = config.users.clone();
    if let Some(batch_size) = args.batch_size {
        users.max_batch_size = batch_size;
        users
            .validate()
            .map_err(|e| SeedError::config(format!("users config error: {}", e)))?;
    }

    let fixture = config.resolve(&users.fixture);
    if args.dry_run {
        return plan(&users_source(&users, &fixture), users.max_batch_size).await;
    }

    let store = DynamoDbStore::connect(&users.dynamodb).await?;
    let report = seed_users(store, &users, &fixture).await?;
    let summary = report.into_result()?;
    info!("Users seed finished: {}", summary);
    Ok(())
}

async fn all(args: AllArgs, config: &SeedConfig) -> Result<()> {
    if args.dry_run {
        for target in SQL_TARGETS {
            let script = SqlScript::load(&config.resolve(&sql_config(target, config)?.script)).await?;
            info!(
                "{}: {} ({} bytes)",
                target.service(),
                script.path.display(),
                script.len()
            );
        }
        let fixture = config.resolve(&config.users.fixture);
        return plan(
            &users_source(&config.users, &fixture),
            config.users.max_batch_size,
        )
        .await;
    }

    for target in SeedTarget::ALL {
        match target {
            SeedTarget::Users => {
                users(
                    UsersArgs {
                        dry_run: false,
                        batch_size: None,
                    },
                    config,
                )
                .await?
            }
            sql => seed_sql(sql, config).await?,
        }
    }

    info!("All seed targets completed successfully!");
    Ok(())
}

async fn load(args: LoadArgs, config: &SeedConfig) -> Result<()> {
    let mut source = FixtureSource::new(config.resolve(&args.source), &args.key)
        .fields(args.fields.iter().cloned());
    if let Some(collection) = &args.collection {
        source = source.collection(collection);
    }

    if args.dry_run {
        return plan(&source, args.batch_size).await;
    }

    let (records, report) = match &args.database_url {
        Some(url) => {
            let engine = DatabaseEngine::detect(url).ok_or_else(|| {
                SeedError::config("database URL must start with mysql://, postgres:// or sqlite:")
            })?;
            let db = SeedDatabase::connect(&DatabaseConfig::from_url(engine, url)).await?;
            let store = table_store(db, &args.table, &args.key).await?;
            seed_collection(store, &source, args.batch_size).await?
        }
        None => {
            let mut dynamodb = config.users.dynamodb.clone();
            dynamodb.table_name = args.table.clone();
            let store = DynamoDbStore::connect(&dynamodb).await?;
            seed_collection(store, &source, args.batch_size).await?
        }
    };

    let summary = report.into_result()?;
    info!(
        "Loaded {} records into {}: {}",
        records.len(),
        args.table,
        summary
    );
    Ok(())
}

async fn synth(args: SynthArgs, config: &SeedConfig) -> Result<()> {
    let mut stack_config = config.stack.clone();
    if let Some(stage) = args.stage {
        stack_config.stage = stage;
        stack_config
            .validate()
            .map_err(|e| SeedError::config(format!("stack config error: {}", e)))?;
    }

    let template = synthesize(&users_service_stack(&stack_config))?;
    let json = template.to_json_pretty()?;

    match args.out {
        Some(path) => {
            tokio::fs::write(&path, json + "\n").await?;
            info!(
                "Wrote {} template for stage '{}' to {}",
                stack_config.stack_name,
                stack_config.stage,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn validate(config: &SeedConfig) -> Result<()> {
    config.validate()?;
    users_service_stack(&config.stack).validate()?;

    for target in SQL_TARGETS {
        let target_config = sql_config(target, config)?;
        info!(
            "{}: {} <- {}",
            target.service(),
            target_config.database.display_target(),
            config.resolve(&target_config.script).display()
        );
    }
    info!(
        "{}: table {} <- {}",
        SeedTarget::Users.service(),
        config.users.dynamodb.table_name,
        config.resolve(&config.users.fixture).display()
    );
    info!("Configuration is valid");
    Ok(())
}

/// Wrap `db` as a table store, closing the pool if the names are rejected
async fn table_store(db: SeedDatabase, table: &str, key: &str) -> Result<SqlTableStore> {
    match SqlTableStore::new(db.clone(), table, key) {
        Ok(store) => Ok(store),
        Err(e) => {
            if let Err(close) = db.close().await {
                warn!("Failed to close {} connection: {}", db.engine().label(), close);
            }
            Err(e)
        }
    }
}

fn users_source(users: &UsersSeedConfig, fixture: &Path) -> FixtureSource {
    FixtureSource::new(fixture, &users.key_field)
        .collection(&users.collection)
        .fields(users.fields.iter().cloned())
}

/// Load and batch `source` without writing anything
async fn plan(source: &FixtureSource, max_batch_size: usize) -> Result<()> {
    let size = NonZeroUsize::new(max_batch_size)
        .filter(|size| size.get() <= MAX_BATCH_SIZE)
        .ok_or_else(|| {
            SeedError::config(format!(
                "batch size {} is outside 1..={}",
                max_batch_size,
                MAX_BATCH_SIZE
            ))
        })?;

    let records: Vec<Record> = source.load().await?;
    let total = batch_count(records.len(), size);
    for batch in chunk(&records, size) {
        info!("Batch {}/{}: {} records", batch.number(), total, batch.len());
    }
    info!(
        "Dry run: {} records in {} batches, nothing written",
        records.len(),
        total
    );
    Ok(())
}
