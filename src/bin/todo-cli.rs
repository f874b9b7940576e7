use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use todo_graphql::{
    client::{GraphqlClient, TodoBoard},
    config::DEFAULT_ENDPOINT,
};

const HELP: &str = "commands: ls | add <title> | done <n> | rm <n> | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let endpoint = std::env::var("TODO_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
    let mut api = GraphqlClient::new(endpoint.clone());
    if let Ok(token) = std::env::var("TODO_TOKEN") {
        api = api.with_bearer(token);
    }
    debug!("talking to {}", endpoint);

    let mut board = TodoBoard::new();
    board.refresh(&api).await;
    print!("{}", board.render());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "ls" => {
                board.refresh(&api).await;
            }
            "add" => {
                board.add(&api, rest).await;
            }
            "done" | "rm" => match pick(&board, rest) {
                Some(id) if command == "done" => {
                    board.toggle(&api, &id).await;
                }
                Some(id) => {
                    board.delete(&api, &id).await;
                }
                None => {
                    println!("no todo numbered {:?}", rest.trim());
                    continue;
                }
            },
            other => {
                println!("unknown command {other:?}; {HELP}");
                continue;
            }
        }
        print!("{}", board.render());
    }

    Ok(())
}

// Map a 1-based position in the rendered list to a todo id
fn pick(board: &TodoBoard, arg: &str) -> Option<String> {
    let n: usize = arg.trim().parse().ok()?;
    board
        .view()
        .get(n.checked_sub(1)?)
        .map(|todo| todo.id.clone())
}
