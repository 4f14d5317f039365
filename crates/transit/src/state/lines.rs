use std::sync::Arc;

use futures::StreamExt;
use model::{line::Line, WithId};
use serde::Serialize;
use tokio::sync::watch;
use utility::id::Id;

use super::Follower;
use crate::{client::Client, database::Database, RequestResult};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinesSnapshot {
    pub loading: bool,
    pub lines: Vec<WithId<Line>>,
    pub error: Option<String>,
}

pub struct LinesState<D>
where
    D: Database + 'static,
{
    client: Client<D>,
    state: Arc<watch::Sender<LinesSnapshot>>,
    follower: Option<Follower>,
}

impl<D> LinesState<D>
where
    D: Database + 'static,
{
    /// Starts out loading, without any lines.
    pub fn new(client: Client<D>) -> Self {
        let (state, _) = watch::channel(LinesSnapshot {
            loading: true,
            ..Default::default()
        });
        Self {
            client,
            state: Arc::new(state),
            follower: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LinesSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LinesSnapshot {
        self.state.borrow().clone()
    }

    pub async fn load(&self) -> RequestResult<()> {
        self.state.send_modify(|state| state.loading = true);
        let result = self.client.get_lines().await;
        publish(&self.state, &result);
        result.map(|_| ())
    }

    /// Keeps the published lines current with every change of the store.
    /// Must be called within a tokio runtime.
    pub fn follow(&mut self) {
        let state = self.state.clone();
        let mut lines = Box::pin(self.client.watch_lines());
        self.follower = Some(Follower(tokio::spawn(async move {
            while let Some(result) = lines.next().await {
                publish(&state, &result);
            }
        })));
    }

    pub async fn get_line(&self, id: Id<Line>) -> RequestResult<Option<WithId<Line>>> {
        self.client.get_line(id).await
    }
}

fn publish(state: &watch::Sender<LinesSnapshot>, result: &RequestResult<Vec<WithId<Line>>>) {
    state.send_modify(|state| {
        state.loading = false;
        match result {
            Ok(lines) => {
                state.lines = lines.clone();
                state.error = None;
            }
            Err(why) => {
                log::warn!("failed to load lines: {}", why);
                state.error = Some(why.to_string());
            }
        }
    });
}
