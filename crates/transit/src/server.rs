use crate::{client::Client, database::Database, seed::SeedOutcome, RequestResult};

pub struct Server<D>
where
    D: Database + Send + Sync + Sized + 'static,
{
    database: D,
}

impl<D> Server<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// A client sharing this server's store. `id` shows up in log messages.
    pub fn client<S: Into<String>>(&self, id: S) -> Client<D> {
        Client::new(id, self.database.clone())
    }

    /// Prepares the store for serving, either by seeding an empty store or
    /// by replacing its content with the seed network.
    pub async fn bootstrap(&self, reset: bool) -> RequestResult<SeedOutcome> {
        let client = self.client("bootstrap");
        if reset {
            client.reset_to_seed().await
        } else {
            client.seed_if_empty().await
        }
    }
}
