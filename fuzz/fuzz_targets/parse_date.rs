#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use datetime::{FixedClock, Settings, TimeZone, Unit};

    if let Ok(data) = std::str::from_utf8(data) {
        let settings = Settings::new(FixedClock(0), TimeZone::fixed(-18000));

        if let Ok(date_time) = settings.date_time(data) {
            for unit in Unit::ALL {
                let _ = date_time.start_of(unit).diff(&date_time.end_of(unit), unit, true);
                let _ = date_time.add(1, unit).format_default();
            }
        }
    }
});
