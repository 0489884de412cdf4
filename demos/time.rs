use datetime::*;

fn main() -> Result<()> {
    // 2000-01-01T00:00:00Z
    let unix_time = 946684800;

    // Get UTC time zone
    let time_zone_utc = TimeZone::utc();
    println!("{:?}", time_zone_utc.find_local_time_type(unix_time));

    // Get fixed time zone at GMT-1
    let time_zone_fixed = TimeZone::fixed(-3600);
    println!("{:?}", time_zone_fixed.find_local_time_type(unix_time).ut_offset());

    // Get local time zone
    let time_zone_local = TimeZone::local()?;
    println!("{:?}", time_zone_local.find_local_time_type(unix_time).ut_offset());

    // Get time zone from a TZ string:
    // From an absolute file
    let _ = TimeZone::from_posix_tz("/usr/share/zoneinfo/Pacific/Auckland");
    // From a file relative to the system timezone directory
    let _ = TimeZone::from_posix_tz("Pacific/Auckland");
    // From a time zone description
    TimeZone::from_posix_tz("HST10")?;
    TimeZone::from_posix_tz("<-03>3")?;
    let auckland = TimeZone::from_posix_tz("NZST-12:00:00NZDT-13:00:00,M10.1.0,M3.3.0")?;

    // Offset in milliseconds east of UTC at a time value
    println!("{}", auckland.offset_at(unix_time * 1000));

    // Local time 2000-01-01T00:00:00 in Auckland, as a time value
    println!("{}", auckland.local_to_utc(unix_time * 1000));

    Ok(())
}
