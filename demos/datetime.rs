use datetime::{date_time, Date, DateLike, DateTime, Result, Unit};

fn main() -> Result<()> {
    // Current date time in the local time zone
    let now = date_time(())?;
    println!("{now}");
    println!("{}", now.format("YYYY-MM-DD HH:mm:ss Z"));

    // Date strings, numbers and date primitives
    let parsed = date_time("2018-07-29")?;
    let from_millis = date_time(1532822400000_i64)?;
    let from_date = date_time(Date::new(1532822400000, now.settings().time_zone().clone()))?;
    println!("{parsed} {from_millis} {from_date}");

    // Invalid values
    let invalid = date_time(DateLike::Null)?;
    println!("{} {}", invalid.is_valid(), invalid.format_default());

    // Arithmetic
    let next_week = parsed.add(1, Unit::Week);
    let end_of_month = parsed.end_of(Unit::Month);
    let last_year = parsed.subtract(1, Unit::Year);
    println!("{}", next_week.format("dddd D MMMM"));
    println!("{}", end_of_month.format("YYYY-MM-DD HH:mm:ss"));
    println!("{}", last_year.format("YYYY-MM-DD"));

    // Comparisons and differences
    println!("{}", parsed.is_same(&next_week, Unit::Month));
    println!("{}", next_week.diff(&parsed, Unit::Day, false));
    println!("{}", next_week.diff(&parsed, Unit::Month, true));

    // Conversions
    println!("{:?}", parsed.to_array());
    println!("{:?}", parsed.to_object());
    println!("{}", parsed.to_utc_string());
    println!("{:?}", DateTime::new("2018-07-29T10:00:00+02:00")?.to_iso_string());

    Ok(())
}
