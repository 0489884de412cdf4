use datetime::{FixedClock, Settings, TimeZone, Unit};

fn main() -> Result<(), datetime::Error> {
    // Deterministic clock and time zone
    let time_zone = TimeZone::from_posix_tz("CET-1CEST,M3.5.0,M10.5.0/3")?;
    let settings = Settings::new(FixedClock(1536924732345), time_zone);

    let now = settings.now();
    println!("{}", now.format_default());
    println!("{}", now.utc().format_default());

    // Values constructed from a date time share its settings
    let days = now.diff_from("2018-12-25", Unit::Day, false)?;
    println!("{days} days");

    // System clock and local time zone of the host, read from the `TZ` environment variable or the system
    let system = Settings::system();
    println!("{}", system.now().format("dddd D MMMM YYYY HH:mm ZZ"));

    Ok(())
}
