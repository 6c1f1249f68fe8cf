//! Reference samples the dashboard starts with.

use chrono::NaiveDate;

use super::models::ContaminantSample;

#[rustfmt::skip]
const REFERENCE: [(&str, &str, (i32, u32, u32), f64, f64, f64, f64, f64, f64, f64); 18] = [
    ("S001", "Pimpri",          (2024, 7, 20), 0.012, 0.008, 0.001, 0.002, 7.2, 18.6286, 73.8001),
    ("S002", "Chinchwad",       (2024, 7, 19), 0.005, 0.011, 0.003, 0.001, 7.5, 18.6276, 73.7816),
    ("S003", "Bhosari",         (2024, 7, 18), 0.009, 0.009, 0.005, 0.003, 7.1, 18.6114, 73.8445),
    ("S004", "Nigdi",           (2024, 7, 17), 0.025, 0.015, 0.007, 0.004, 6.8, 18.6498, 73.7644),
    ("S005", "Akurdi",          (2024, 7, 16), 0.003, 0.005, 0.001, 0.001, 7.8, 18.6422, 73.7725),
    ("S006", "Ravet",           (2024, 7, 15), 0.008, 0.007, 0.002, 0.002, 7.3, 18.6384, 73.7431),
    ("S007", "Moshi",           (2024, 7, 14), 0.015, 0.009, 0.004, 0.003, 6.9, 18.6588, 73.8568),
    ("S008", "Wakad",           (2024, 7, 13), 0.006, 0.012, 0.002, 0.001, 7.6, 18.5968, 73.7621),
    ("S009", "Hinjewadi",       (2024, 7, 12), 0.004, 0.006, 0.001, 0.001, 7.7, 18.5902, 73.7386),
    ("S010", "Thergaon",        (2024, 7, 11), 0.011, 0.010, 0.003, 0.002, 7.4, 18.6041, 73.7765),
    ("S011", "Pimple Saudagar", (2024, 7, 10), 0.007, 0.008, 0.002, 0.001, 7.5, 18.5986, 73.7972),
    ("S012", "Sangvi",          (2024, 7, 9),  0.018, 0.013, 0.006, 0.003, 6.7, 18.5714, 73.8131),
    ("S013", "Kasarwadi",       (2024, 7, 8),  0.022, 0.004, 0.008, 0.002, 7.0, 18.5912, 73.8239),
    ("S014", "Dapodi",          (2024, 7, 7),  0.002, 0.018, 0.001, 0.005, 6.6, 18.5746, 73.8315),
    ("S015", "Chikhali",        (2024, 7, 6),  0.013, 0.014, 0.003, 0.001, 7.2, 18.6811, 73.8019),
    ("S016", "Talawade",        (2024, 7, 5),  0.019, 0.019, 0.005, 0.004, 6.5, 18.6868, 73.7686),
    ("S017", "Charholi Budruk", (2024, 7, 4),  0.009, 0.002, 0.002, 0.002, 7.9, 18.6477, 73.8821),
    ("S018", "Dighi",           (2024, 7, 3),  0.021, 0.008, 0.006, 0.003, 7.1, 18.6322, 73.8762),
];

/// The 18 reference samples from Pimpri-Chinchwad, newest first.
pub fn reference_samples() -> Vec<ContaminantSample> {
    REFERENCE
        .iter()
        .filter_map(|&(id, location, (y, m, d), lead, arsenic, mercury, cadmium, ph, lat, lng)| {
            Some(ContaminantSample {
                id: id.to_string(),
                location: location.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                lead,
                arsenic,
                mercury,
                cadmium,
                ph,
                nitrate: None,
                sulfate: None,
                lat,
                lng,
            })
        })
        .collect()
}
