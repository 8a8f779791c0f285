use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use mongodb::Database;

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub const GREETING: &str = "Hello, world!";

pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    async fn hello(&self) -> Option<String> {
        Some(GREETING.to_string())
    }
}

/// Builds the executable schema. The database handle, when available, is
/// exposed to resolvers as context data.
pub fn build_schema(database: Option<Database>) -> AppSchema {
    let builder = Schema::build(QueryRoot, EmptyMutation, EmptySubscription);
    match database {
        Some(database) => builder.data(database).finish(),
        None => builder.finish(),
    }
}
