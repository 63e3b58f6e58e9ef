use crate::db::log::load_audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::audit::AuditEntry;
use crate::utils::time::format_stamp;
use ansi_term::Colour;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

const MAX_ACTION_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// ANSI colour for an audit action.
fn color_for_action(action: &str) -> Colour {
    match action {
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        "reminder_sent" => Colour::Cyan,
        "pm_approve" | "admin_approve" => Colour::Green,
        "pm_reject" | "admin_reject" => Colour::Red,
        other if other.starts_with("balance_") => Colour::Yellow,
        _ => Colour::White,
    }
}

/// `action (target)`, cut to `MAX_ACTION_WIDTH` visible columns with only
/// the action word coloured.
fn action_cell(e: &AuditEntry) -> String {
    let plain = if e.target.is_empty() {
        e.action.clone()
    } else {
        format!("{} ({})", e.action, e.target)
    };

    let visible = if plain.width() > MAX_ACTION_WIDTH {
        let mut s: String = plain.chars().take(MAX_ACTION_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_action(&e.action);
    match visible.split_once(' ') {
        Some((word, rest)) => format!("{} {}", color.paint(word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_audit(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let cells: Vec<(String, String)> = entries
            .iter()
            .map(|e| (format_stamp(&e.created_at), action_cell(e)))
            .collect();

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = cells.iter().map(|(d, _)| d.len()).max().unwrap_or(10);
        let op_w = cells
            .iter()
            .map(|(_, c)| strip_ansi(c).width())
            .max()
            .unwrap_or(10)
            .min(MAX_ACTION_WIDTH);

        println!("📜 Internal log:\n");

        for (e, (date, cell)) in entries.iter().zip(cells) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&cell).width()));
            let by = if e.user_id.is_empty() { "-" } else { e.user_id.as_str() };
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} | {} => {}",
                e.id, date, cell, padding, by, e.details,
            );
        }

        Ok(())
    }
}
