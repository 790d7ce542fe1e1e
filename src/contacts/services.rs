use time::{Date, Month};

use super::repo_types::Contact;

/// The birthday's next occurrence on or after `today`.
///
/// 29 February falls on 28 February in non-leap years.
pub fn next_birthday(birthday: Date, today: Date) -> Date {
    let in_year = |year: i32| {
        Date::from_calendar_date(year, birthday.month(), birthday.day())
            .or_else(|_| Date::from_calendar_date(year, Month::February, 28))
            .unwrap_or(today)
    };
    let this_year = in_year(today.year());
    if this_year >= today {
        this_year
    } else {
        in_year(today.year() + 1)
    }
}

/// Contacts whose next birthday is within `days` days of `today`, soonest first.
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: Date, days: i64) -> Vec<Contact> {
    let mut upcoming: Vec<(Date, Contact)> = contacts
        .into_iter()
        .map(|c| (next_birthday(c.birthday, today), c))
        .filter(|(next, _)| (*next - today).whole_days() <= days)
        .collect();
    upcoming.sort_by(|(a, ca), (b, cb)| a.cmp(b).then(ca.id.cmp(&cb.id)));
    upcoming.into_iter().map(|(_, c)| c).collect()
}
