//! Terminal front-end for Sviss ToDo.
//!
//! Talks to the server at `TODO_API_URL` and keeps the list in memory when
//! the server has no store.

use std::sync::Arc;
use sviss_todo_client::command::{self, Command, HELP};
use sviss_todo_client::{view, ClientAction, ClientEnvironment, ClientReducer, ClientState, HttpTodoApi};
use sviss_todo_core::environment::ShortIdGenerator;
use sviss_todo_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type ClientStore = Store<ClientState, ClientAction, ClientEnvironment<HttpTodoApi>, ClientReducer<HttpTodoApi>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the list
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_cli=warn,sviss_todo_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let name = std::env::var("NAME").ok();
    println!("Sviss ToDo");
    println!("{}", view::greeting(name.as_deref()));
    println!();

    let api = HttpTodoApi::from_env();
    tracing::info!(endpoint = %api.endpoint(), "Using todo server");

    let env = ClientEnvironment::new(Arc::new(api), Arc::new(ShortIdGenerator));
    let store: ClientStore = Store::new(ClientState::new(), ClientReducer::new(), env);

    let mut mount = store.send(ClientAction::Mount).await?;
    print!("{}", store.state(view::render).await);
    mount.wait().await;
    render(&store).await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                println!("{HELP}");
                continue;
            },
            Ok(Command::List) => {},
            Ok(Command::Add(text)) => {
                store.send(ClientAction::InputChanged(text)).await?.wait().await;
                if !store.state(ClientState::can_submit).await {
                    println!("Nothing to add yet");
                    continue;
                }
                store.send(ClientAction::Add).await?.wait().await;
            },
            Ok(Command::Remove(target)) => {
                let Some(id) = store.state(|state| target.resolve(state.items())).await else {
                    println!("No such item");
                    continue;
                };
                store.send(ClientAction::Remove { id }).await?.wait().await;
            },
            Err(error) => {
                println!("{error}");
                continue;
            },
        }
        render(&store).await;
    }

    store.shutdown();
    Ok(())
}

async fn render(store: &ClientStore) {
    println!();
    print!("{}", store.state(view::render).await);
}
