use chrono::{Datelike, NaiveDate};

pub const QUOTES: [&str; 7] = [
    "Age is merely the number of years the world has been enjoying you!",
    "Every birthday is a gift. Every day is a gift. That's why it's called the present!",
    "Growing older is mandatory, but growing up is optional!",
    "The more candles, the bigger the wish!",
    "Birthdays are nature's way of telling us to eat more cake!",
    "Life should not only be lived, it should be celebrated!",
    "Another year older, another year wiser, another year more awesome!",
];

pub fn daily_quote(today: NaiveDate) -> &'static str {
    QUOTES[today.ordinal() as usize % QUOTES.len()]
}
