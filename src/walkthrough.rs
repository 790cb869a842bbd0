//! The movies walkthrough: create the table, load it, work on one item, then query.
//!
//! Every response is printed through [`normalize`], so numbers read back from the
//! table show up as JSON integers or floats.

use crate::{
    common::{condition, path, projection},
    config,
    error::{self, Error, Result},
    movie, normalize, read, table, write,
};

use aws_sdk_dynamodb::{
    Client,
    client::Waiters,
    error::{ProvideErrorMetadata, SdkError},
    types,
};
use serde_json::{Value, json};
use std::{collections, path as fs_path, time};

/// Year of the movie created by the item operations.
pub const NEW_MOVIE_YEAR: i32 = 2015;

/// Title of the movie created by the item operations.
pub const NEW_MOVIE_TITLE: &str = "The Big New Movie";

const CONDITIONAL_CHECK_FAILED: &str = "The conditional request failed";

const TABLE_ACTIVE_TIMEOUT: time::Duration = time::Duration::from_secs(120);

fn info(member: &str) -> path::AttributePath {
    path::AttributePath::new("info").member(member)
}

fn new_movie_key() -> movie::MovieKey {
    movie::MovieKey::new(NEW_MOVIE_YEAR, NEW_MOVIE_TITLE)
}

/// Put the new movie with a plot and a zero rating.
pub fn put_new_movie(table_name: &str) -> write::put_item::PutItem<movie::Movie, Value> {
    write::put_item::PutItem {
        item: movie::Movie {
            year: NEW_MOVIE_YEAR,
            title: NEW_MOVIE_TITLE.to_string(),
            info: json!({
                "plot": "Nothing happens at all.",
                "rating": 0,
            }),
        },
        write_args: write::common::WriteArgs::new(table_name),
    }
}

/// Read the new movie back.
pub fn get_new_movie(table_name: &str) -> read::get_item::GetItem<movie::MovieKey> {
    read::get_item::GetItem {
        key: new_movie_key(),
        read_args: read::common::ReadArgs {
            table_name: table_name.to_string(),
            ..Default::default()
        },
    }
}

/// Set a rating, a new plot and a cast on the new movie.
pub fn update_new_movie(table_name: &str) -> write::update_item::UpdateItem<movie::MovieKey, Value> {
    use crate::write::update_item::{SetInput, UpdateAction, UpdateExpression, UpdateItem};

    UpdateItem {
        key: new_movie_key(),
        update_expression: UpdateExpression(vec![
            UpdateAction::Set(info("rating"), SetInput::Assign(json!(5.5))),
            UpdateAction::Set(
                info("plot"),
                SetInput::Assign(json!("Everything happens all at once.")),
            ),
            UpdateAction::Set(
                info("actors"),
                SetInput::Assign(json!(["Larry", "Moe", "Curly"])),
            ),
        ]),
        write_args: write::common::WriteArgs::new(table_name)
            .return_values(types::ReturnValue::UpdatedNew),
    }
}

/// Atomic counter: add one to the rating.
pub fn increment_rating(table_name: &str) -> write::update_item::UpdateItem<movie::MovieKey, Value> {
    use crate::write::update_item::{SetInput, UpdateAction, UpdateExpression, UpdateItem};

    UpdateItem {
        key: new_movie_key(),
        update_expression: UpdateExpression(vec![UpdateAction::Set(
            info("rating"),
            SetInput::Increment(json!(1)),
        )]),
        write_args: write::common::WriteArgs::new(table_name)
            .return_values(types::ReturnValue::UpdatedNew),
    }
}

/// Drop the lead actor, but only when there are more than three.
pub fn remove_lead_actor(
    table_name: &str,
) -> write::update_item::UpdateItem<movie::MovieKey, Value> {
    use crate::write::update_item::{UpdateAction, UpdateExpression, UpdateItem};

    UpdateItem {
        key: new_movie_key(),
        update_expression: UpdateExpression(vec![UpdateAction::Remove(info("actors").index(0))]),
        write_args: write::common::WriteArgs::new(table_name)
            .condition(condition::Condition::size(
                info("actors"),
                condition::Comparison::GreaterThan(json!(3)),
            ))
            .return_values(types::ReturnValue::UpdatedNew),
    }
}

/// Delete the new movie if its rating is at most 7.5.
pub fn delete_new_movie(table_name: &str) -> write::delete_item::DeleteItem<movie::MovieKey, Value> {
    write::delete_item::DeleteItem {
        key: new_movie_key(),
        write_args: write::common::WriteArgs::new(table_name).condition(condition::Condition::path(
            info("rating"),
            condition::Comparison::LessThanOrEqual(json!(7.5)),
        )),
    }
}

/// Every movie released in `year`.
pub fn movies_from(table_name: &str, year: i32) -> read::query::Query<Value> {
    read::query::Query {
        key_condition: read::query::KeyCondition::partition(movie::PARTITION_KEY, json!(year)),
        filter: None,
        read_args: read::common::ReadArgs {
            table_name: table_name.to_string(),
            ..Default::default()
        },
        scan_index_forward: None,
    }
}

/// Movies released in `year` with a title between `first` and `last`, with genres and lead actor.
pub fn titles_between(
    table_name: &str,
    year: i32,
    first: &str,
    last: &str,
) -> Result<read::query::Query<Value>> {
    let query = read::query::Query {
        key_condition: read::query::KeyCondition::partition(movie::PARTITION_KEY, json!(year))
            .sort(
                movie::SORT_KEY,
                condition::Comparison::Between(json!(first), json!(last)),
            ),
        filter: None,
        read_args: read::common::ReadArgs {
            projection: Some(projection::Projection::parse([
                "year",
                "title",
                "info.genres",
                "info.actors[0]",
            ])?),
            table_name: table_name.to_string(),
            ..Default::default()
        },
        scan_index_forward: None,
    };
    Ok(query)
}

/// Movies released between `first` and `last` inclusive, with their rating.
pub fn scan_years(table_name: &str, first: i32, last: i32) -> Result<read::scan::Scan<Value>> {
    let scan = read::scan::Scan {
        filter: Some(
            condition::Condition::path(
                path::AttributePath::new(movie::PARTITION_KEY),
                condition::Comparison::Between(json!(first), json!(last)),
            )
            .into(),
        ),
        read_args: read::common::ReadArgs {
            projection: Some(projection::Projection::parse([
                "year",
                "title",
                "info.rating",
            ])?),
            table_name: table_name.to_string(),
            ..Default::default()
        },
    };
    Ok(scan)
}

/// Render the attributes of a write response; no attributes renders as `{}`.
pub fn render_attributes(
    attributes: Option<&collections::HashMap<String, types::AttributeValue>>,
) -> Result<String> {
    match attributes {
        Some(attributes) => normalize::render(attributes),
        None => normalize::render(&collections::HashMap::<String, types::AttributeValue>::new()),
    }
}

/// Settle a conditional write: a failed condition prints its message and yields `None`.
///
/// Every other error propagates.
fn report_conditional<O, E, R>(
    result: std::result::Result<O, SdkError<E, R>>,
) -> Result<Option<O>>
where
    E: error::ConditionalFailure,
    Error: From<SdkError<E, R>>,
{
    match result {
        Ok(output) => Ok(Some(output)),
        Err(err) => match error::conditional_check_failed(&err) {
            Some(fault) => {
                let message = fault.message().unwrap_or(CONDITIONAL_CHECK_FAILED);
                tracing::warn!(reason = message, "condition rejected the write");
                println!("{message}");
                Ok(None)
            }
            None => Err(err.into()),
        },
    }
}

fn movie_line(key: &movie::MovieKey) -> String {
    format!("{} : {}", key.year, key.title)
}

/// Runs the walkthrough steps against one table.
#[derive(Clone, Debug)]
pub struct Walkthrough<'a> {
    client: &'a Client,
    table_name: String,
}

impl<'a> Walkthrough<'a> {
    /// Walkthrough on `table_name`.
    pub fn new(client: &'a Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create the table, print its status and wait for it to become active.
    pub async fn create_table(&self, create_table: table::CreateTable) -> Result<()> {
        tracing::info!(table = %self.table_name, "creating table");
        let output = create_table.send(self.client).await?;
        println!(
            "Table status: {}",
            table::table_status(&output).unwrap_or("UNKNOWN")
        );
        self.client
            .wait_until_table_exists()
            .table_name(&self.table_name)
            .wait(TABLE_ACTIVE_TIMEOUT)
            .await
            .map_err(|err| Error::Waiter(Box::new(err)))?;
        Ok(())
    }

    /// Put every movie of the data file; returns how many were loaded.
    pub async fn load_movies(&self, data_file: &fs_path::Path) -> Result<usize> {
        let movies = movie::load(data_file)?;
        tracing::info!(count = movies.len(), file = %data_file.display(), "loading movies");
        let count = movies.len();
        for movie in movies {
            println!("Adding movie: {} {}", movie.year, movie.title);
            let put_item: write::put_item::PutItem<movie::Movie, Value> =
                write::put_item::PutItem {
                    item: movie,
                    write_args: write::common::WriteArgs::new(self.table_name.as_str()),
                };
            put_item.send(self.client).await?;
        }
        Ok(count)
    }

    /// Create, read, update and delete the new movie.
    pub async fn item_operations(&self) -> Result<()> {
        tracing::info!("creating a new item");
        let output = put_new_movie(&self.table_name).send(self.client).await?;
        println!("PutItem succeeded:");
        println!("{}", render_attributes(output.attributes())?);

        tracing::info!("reading the item");
        self.get_new_movie().await?;

        tracing::info!("updating the item");
        let output = update_new_movie(&self.table_name)
            .send(self.client)
            .await?;
        println!("UpdateItem succeeded:");
        println!("{}", render_attributes(output.attributes())?);

        tracing::info!("incrementing an atomic counter");
        let output = increment_rating(&self.table_name)
            .send(self.client)
            .await?;
        println!("UpdateItem succeeded:");
        println!("{}", render_attributes(output.attributes())?);

        println!("Attempting conditional update...");
        let output =
            report_conditional(remove_lead_actor(&self.table_name).send(self.client).await)?;
        if let Some(output) = output {
            println!("UpdateItem succeeded:");
            println!("{}", render_attributes(output.attributes())?);
        }

        println!("Attempting a conditional delete...");
        let output =
            report_conditional(delete_new_movie(&self.table_name).send(self.client).await)?;
        if let Some(output) = output {
            println!("DeleteItem succeeded:");
            println!("{}", render_attributes(output.attributes())?);
        }
        Ok(())
    }

    async fn get_new_movie(&self) -> Result<()> {
        let output = match get_new_movie(&self.table_name).send(self.client).await {
            Ok(output) => output,
            Err(err) => {
                let message = err
                    .as_service_error()
                    .map(|service| service.message().unwrap_or_default().to_string());
                return match message {
                    Some(message) => {
                        println!("{message}");
                        Ok(())
                    }
                    None => Err(err.into()),
                };
            }
        };
        match output.item() {
            Some(item) => {
                println!("GetItem succeeded:");
                println!("{}", normalize::render(item)?);
            }
            None => tracing::warn!(year = NEW_MOVIE_YEAR, title = NEW_MOVIE_TITLE, "item not found"),
        }
        Ok(())
    }

    /// Query by year, query by year and title range, then scan a decade.
    pub async fn queries(&self) -> Result<()> {
        println!("Movies from 1985");
        let output = movies_from(&self.table_name, 1985)
            .send(self.client)
            .await?;
        let keys: Vec<movie::MovieKey> = serde_dynamo::from_items(output.items().to_vec())?;
        for key in &keys {
            println!("{}", movie_line(key));
        }

        println!("Movies from 1992 - titles A-L, with genres and lead actor");
        let output = titles_between(&self.table_name, 1992, "A", "L")?
            .send(self.client)
            .await?;
        for item in output.items() {
            println!("{}", normalize::render_line(item)?);
        }

        println!("Movies from the fifties, with rating");
        let output = scan_years(&self.table_name, 1950, 1959)?
            .send(self.client)
            .await?;
        tracing::info!(
            count = output.count(),
            scanned_count = output.scanned_count(),
            "scan finished"
        );
        for item in output.items() {
            println!("{}", normalize::render_line(item)?);
        }
        Ok(())
    }

    /// Delete the table.
    pub async fn delete_table(&self) -> Result<()> {
        tracing::info!(table = %self.table_name, "deleting table");
        table::DeleteTable {
            table_name: self.table_name.clone(),
        }
        .send(self.client)
        .await?;
        println!("Table deleted.");
        Ok(())
    }
}

/// Run every step of the walkthrough.
pub async fn run(client: &Client, config: &config::Config) -> Result<()> {
    let walkthrough = Walkthrough::new(client, config.table_name.as_str());
    walkthrough.create_table(config.create_table()).await?;
    let count = walkthrough.load_movies(&config.data_file).await?;
    tracing::info!(count, "movies loaded");
    walkthrough.item_operations().await?;
    walkthrough.queries().await?;
    if config.cleanup {
        walkthrough.delete_table().await?;
    }
    Ok(())
}
