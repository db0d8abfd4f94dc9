use chrono::Utc;

use corkboard::board::Board;
use corkboard::client::Client;
use corkboard::config;
use corkboard::schedule::{self, ViewMode};

#[tokio::main]
async fn main() {
    env_logger::init();

    let api_base = std::env::var("CORKBOARD_API")
        .unwrap_or_else(|_| config::API_BASE.lock().unwrap().clone());
    let token = std::env::var("CORKBOARD_TOKEN").unwrap_or_default();

    let client = Client::new(&api_base, token).unwrap();
    let tasks = client.assigned_tasks().await.unwrap();
    let todos = client.my_todos().await.unwrap();

    let board = Board::build(&tasks, &todos);
    corkboard::utils::print_board(&board);

    let today = Utc::now().date_naive();
    let cells = schedule::cells(&tasks, today, ViewMode::Month, today).unwrap();
    corkboard::utils::print_month_grid(&cells);
}
