#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use datetime::TimeZone;

    if let Ok(time_zone) = TimeZone::from_tz_data(data) {
        let _ = time_zone.local_to_utc(0);
    }
});
