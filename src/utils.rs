//! Some utility functions

use chrono::Datelike;

use crate::board::Board;
use crate::schedule::CalendarCell;
use crate::task::Task;

/// A debug utility that pretty-prints the four board columns
pub fn print_board(board: &Board) {
    print_column("Ready", &board.tasks.ready);
    print_column("In progress", &board.tasks.in_progress);
    print_column("Review", &board.tasks.review);

    println!("To Do ({})", board.todo.len());
    for todo in board.todo {
        println!("    - {}", todo.title());
    }
}

fn print_column(title: &str, tasks: &[&Task]) {
    println!("{} ({})", title, tasks.len());
    for task in tasks {
        let completion = if task.done() { "✓" } else { " " };
        println!("    {} {}\t{}%", completion, task.name(), task.current_progress());
    }
}

/// A debug utility that pretty-prints a month grid, one line per week.
/// Today is starred, out-of-month days are dotted, and each cell shows its task count.
pub fn print_month_grid(cells: &[CalendarCell]) {
    for week in cells.chunks(7) {
        let mut line = String::new();
        for cell in week {
            let marker = if cell.is_today {
                '*'
            } else if cell.in_reference_month == false {
                '.'
            } else {
                ' '
            };
            line.push_str(&format!("{}{:>2}({}) ", marker, cell.date.day(), cell.tasks.len()));
        }
        println!("{}", line);
    }
}
