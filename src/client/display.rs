use crate::domain::item::{Item, Timestamp};
use chrono::{DateTime, Local, TimeZone, Utc};

/// `"<barcode>: <name> @ <location>, last seen <when>"` in the given time zone.
pub fn format_item_in<Tz: TimeZone>(item: &Item, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}: {} @ {}, last seen {}",
        item.barcode,
        item.name,
        item.location,
        format_last_seen(item.last_seen, tz)
    )
}

/// [`format_item_in`] using the local time zone.
pub fn format_item(item: &Item) -> String {
    format_item_in(item, &Local)
}

fn format_last_seen<Tz: TimeZone>(last_seen: Option<Timestamp>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match last_seen.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_logged_items_say_never() {
        let item = Item {
            name: "Ladder".to_string(),
            barcode: 3,
            location: "Rig".to_string(),
            last_seen: None,
        };
        assert_eq!(format_item_in(&item, &Utc), "3: Ladder @ Rig, last seen never");
    }

    #[test]
    fn logged_items_show_timestamp() {
        let item = Item {
            name: "Ladder".to_string(),
            barcode: 3,
            location: "Rig".to_string(),
            last_seen: Some(1_700_000_000),
        };
        assert_eq!(
            format_item_in(&item, &Utc),
            "3: Ladder @ Rig, last seen 2023-11-14 22:13:20"
        );
    }
}
