use crate::model::Profile;
use crate::storage::ProfileStore;
use crate::{engine, quotes, ui};
use anyhow::Result;
use chrono::Local;

pub fn set(date: String, name: Option<String>) -> Result<()> {
    let store = ProfileStore::open()?;
    let profile = Profile::from_input(name, &date)?;
    store.save(&profile)?;
    println!(
        "Saved birthday {} to {}",
        profile.birth_date.format("%Y-%m-%d"),
        store.path().display()
    );
    Ok(())
}

pub fn show() -> Result<()> {
    let store = ProfileStore::open()?;
    let profile = match store.load() {
        Some(profile) => profile,
        None => {
            println!("No birthday saved yet. Run `bday set YYYY-MM-DD` or `bday tui`.");
            return Ok(());
        }
    };
    let now = Local::now().naive_local();
    let today = now.date();
    println!("{}", profile.title());
    if engine::is_anniversary(profile.birth_date, today) {
        println!("  {}", profile.greeting());
    } else {
        let target = engine::next_anniversary_moment(profile.birth_date, now);
        let left = engine::remaining(target, now);
        println!("  next anniversary: {}", target.date().format("%Y-%m-%d"));
        println!(
            "  remaining: {}d {:02}h {:02}m {:02}s",
            left.days, left.hours, left.minutes, left.seconds
        );
        println!(
            "  year progress: {:.0}%",
            engine::progress(profile.birth_date, today)
        );
    }
    println!("  quote: {}", quotes::daily_quote(today));
    Ok(())
}

pub fn quote() -> Result<()> {
    println!("{}", quotes::daily_quote(Local::now().date_naive()));
    Ok(())
}

pub fn reset() -> Result<()> {
    let store = ProfileStore::open()?;
    store.clear()?;
    println!("Cleared saved birthday");
    Ok(())
}

pub fn tui() -> Result<()> {
    let store = ProfileStore::open()?;
    let profile = store.load();
    ui::run(profile, store)
}
