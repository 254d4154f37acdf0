use chrono::NaiveDate;

use taskview::config::TaskViewConfig;
use taskview::store::{JsonTaskStore, TaskStore};
use taskview::view::calendar::mark_calendar;
use taskview::view::sections::group;
use taskview::{Category, Priority, TaskFilter, normalize_all};

fn main() {
    // Log to the systemd user journal (`journalctl --user -t taskview -f`).
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("taskview".to_string())
        .install()
        .unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let config = TaskViewConfig::load();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut filter = TaskFilter::All;
    let mut calendar_date: Option<Option<String>> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--filter" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("--filter needs a value: starred, category:NAME or priority:NAME");
                    std::process::exit(2);
                };
                filter = match parse_filter(value) {
                    Some(f) => f,
                    None => {
                        eprintln!("unrecognized filter: {value}");
                        std::process::exit(2);
                    }
                };
                i += 2;
            }
            "--calendar" => {
                calendar_date = Some(args.get(i + 1).filter(|a| !a.starts_with("--")).cloned());
                i += if calendar_date.as_ref().is_some_and(|d| d.is_some()) {
                    2
                } else {
                    1
                };
            }
            other => {
                eprintln!("unrecognized argument: {other}");
                eprintln!("usage: taskview [--filter starred|category:NAME|priority:NAME] [--calendar [YYYY-MM-DD]]");
                std::process::exit(2);
            }
        }
    }

    let store = JsonTaskStore::new(config.data_path.clone());
    let records = match config.owner_id.as_deref() {
        Some(owner) => store.snapshot_for(owner),
        None => store.snapshot(),
    };
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            log::error!("failed to load tasks: {}", e);
            eprintln!("failed to load tasks from {}: {}", config.data_path.display(), e);
            std::process::exit(1);
        }
    };

    let tasks = normalize_all(&records);
    let today = chrono::Local::now().date_naive();

    match calendar_date {
        None => print_sections(&tasks, &filter, today),
        Some(raw) => {
            let selected = match raw {
                None => today,
                Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(_) => {
                        eprintln!("invalid date: {s} (expected YYYY-MM-DD)");
                        std::process::exit(2);
                    }
                },
            };
            print_calendar(&tasks, selected);
        }
    }
}

fn parse_filter(value: &str) -> Option<TaskFilter> {
    if value == "starred" {
        return Some(TaskFilter::Starred);
    }
    if let Some(name) = value.strip_prefix("category:") {
        return Some(TaskFilter::Category(Category::from_name(name)));
    }
    if let Some(name) = value.strip_prefix("priority:") {
        return Priority::from_name(name).map(TaskFilter::Priority);
    }
    None
}

fn print_sections(tasks: &[taskview::Task], filter: &TaskFilter, today: NaiveDate) {
    let sections = group(tasks, filter, today);
    if sections.is_empty() {
        println!("No tasks.");
        return;
    }
    for section in &sections {
        println!("=== {} ({}) ===", section.kind.label(), section.items.len());
        for task in &section.items {
            let when = match (task.due_date, task.time) {
                (Some(date), Some(time)) => format!("{date} {}", time.format("%H:%M")),
                (Some(date), None) => date.to_string(),
                _ => "no date".to_string(),
            };
            let star = if task.is_starred { " *" } else { "" };
            println!("  [{}] {} ({}){}", task.priority.name(), task.title, when, star);
        }
    }
}

fn print_calendar(tasks: &[taskview::Task], selected: NaiveDate) {
    let view = mark_calendar(tasks, selected);
    println!("=== Markings ===");
    for (key, mark) in &view.marks {
        let active = mark.dots.iter().filter(|d| !d.completed).count();
        let done = mark.dots.len() - active;
        let flag = if mark.selected { "  <selected>" } else { "" };
        println!("  {key}: {active} active, {done} completed{flag}");
    }
    println!("=== Due {selected} ({}) ===", view.day_tasks.len());
    for task in &view.day_tasks {
        let time = task
            .time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        println!("  {time}  {}", task.title);
    }
}
